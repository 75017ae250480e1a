//! In-memory repositories and a oneshot test harness for the full router.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use beauty_webhook_api::config::AppConfig;
use beauty_webhook_api::errors::ServiceError;
use beauty_webhook_api::handlers::AppServices;
use beauty_webhook_api::models::{Campaign, Catalog, CatalogCampaign, Customer, Order, Product};
use beauty_webhook_api::repositories::{
    CampaignChanges, CampaignRepository, CatalogCampaignChanges, CatalogCampaignRepository,
    CatalogChanges, CatalogRepository, CustomerChanges, CustomerRepository, NewCampaign,
    NewCatalogCampaign, NewOrder, NewProduct, OrderChanges, OrderRepository, ProductChanges,
    ProductRepository,
};
use beauty_webhook_api::{build_router, AppState};

const NOW: &str = "2026-01-01T00:00:00Z";

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Default)]
pub struct InMemoryCatalogs {
    pub rows: Mutex<Vec<Catalog>>,
}

#[async_trait]
impl CatalogRepository for InMemoryCatalogs {
    async fn find_all(&self, include_archived: bool) -> Result<Vec<Catalog>, ServiceError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|c| include_archived || !c.archived)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Catalog>, ServiceError> {
        Ok(self.rows.lock().unwrap().iter().find(|c| c.id == id).cloned())
    }

    async fn find_active_by_name(&self, name: &str) -> Result<Option<Catalog>, ServiceError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.name == name && !c.archived)
            .cloned())
    }

    async fn count(&self, include_archived: bool) -> Result<usize, ServiceError> {
        Ok(self.find_all(include_archived).await?.len())
    }

    async fn create(&self, name: &str) -> Result<Catalog, ServiceError> {
        let created = Catalog {
            id: new_id(),
            name: name.to_string(),
            created_at: NOW.to_string(),
            updated_at: NOW.to_string(),
            archived: false,
        };
        self.rows.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: &str, changes: CatalogChanges) -> Result<Catalog, ServiceError> {
        let mut rows = self.rows.lock().unwrap();
        let found = rows
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| ServiceError::not_found("Catálogo no encontrado", "in-memory"))?;
        if let Some(name) = changes.name {
            found.name = name;
        }
        if let Some(archived) = changes.archived {
            found.archived = archived;
        }
        Ok(found.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        self.rows.lock().unwrap().retain(|c| c.id != id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryCampaigns {
    pub rows: Mutex<Vec<Campaign>>,
}

#[async_trait]
impl CampaignRepository for InMemoryCampaigns {
    async fn find_all(&self, include_archived: bool) -> Result<Vec<Campaign>, ServiceError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|c| include_archived || !c.archived)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Campaign>, ServiceError> {
        Ok(self.rows.lock().unwrap().iter().find(|c| c.id == id).cloned())
    }

    async fn count(&self, include_archived: bool) -> Result<usize, ServiceError> {
        Ok(self.find_all(include_archived).await?.len())
    }

    async fn find_active_by_name(&self, name: &str) -> Result<Option<Campaign>, ServiceError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.name == name && !c.archived)
            .cloned())
    }

    async fn create(&self, new: NewCampaign) -> Result<Campaign, ServiceError> {
        let created = Campaign {
            id: new_id(),
            name: new.name,
            start_date: new.start_date,
            end_date: new.end_date,
            created_at: NOW.to_string(),
            updated_at: NOW.to_string(),
            archived: false,
        };
        self.rows.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: &str, changes: CampaignChanges) -> Result<Campaign, ServiceError> {
        let mut rows = self.rows.lock().unwrap();
        let found = rows
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| ServiceError::not_found("Campaña no encontrada", "in-memory"))?;
        if let Some(name) = changes.name {
            found.name = name;
        }
        if let Some(start_date) = changes.start_date {
            found.start_date = start_date;
        }
        if let Some(end_date) = changes.end_date {
            found.end_date = end_date;
        }
        Ok(found.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        self.rows.lock().unwrap().retain(|c| c.id != id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryCatalogCampaigns {
    pub rows: Mutex<Vec<CatalogCampaign>>,
}

#[async_trait]
impl CatalogCampaignRepository for InMemoryCatalogCampaigns {
    async fn find_all(&self) -> Result<Vec<CatalogCampaign>, ServiceError> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<CatalogCampaign>, ServiceError> {
        Ok(self.rows.lock().unwrap().iter().find(|l| l.id == id).cloned())
    }

    async fn create(&self, new: NewCatalogCampaign) -> Result<CatalogCampaign, ServiceError> {
        let created = CatalogCampaign {
            id: new_id(),
            code: new.code,
            campaign_id: new.campaign_id,
            catalog_id: new.catalog_id,
            created_at: NOW.to_string(),
            updated_at: NOW.to_string(),
            archived: false,
        };
        self.rows.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        id: &str,
        changes: CatalogCampaignChanges,
    ) -> Result<CatalogCampaign, ServiceError> {
        let mut rows = self.rows.lock().unwrap();
        let found = rows
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| ServiceError::not_found("Catálogo campaña no encontrado", "in-memory"))?;
        if let Some(campaign_id) = changes.campaign_id {
            found.campaign_id = campaign_id;
        }
        if let Some(catalog_id) = changes.catalog_id {
            found.catalog_id = catalog_id;
        }
        Ok(found.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        self.rows.lock().unwrap().retain(|l| l.id != id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryCustomers {
    pub rows: Mutex<Vec<Customer>>,
}

#[async_trait]
impl CustomerRepository for InMemoryCustomers {
    async fn find_all(&self, include_archived: bool) -> Result<Vec<Customer>, ServiceError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|c| include_archived || !c.archived)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Customer>, ServiceError> {
        Ok(self.rows.lock().unwrap().iter().find(|c| c.id == id).cloned())
    }

    async fn find_active_by_name(&self, name: &str) -> Result<Option<Customer>, ServiceError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.name == name && !c.archived)
            .cloned())
    }

    async fn count(&self, include_archived: bool) -> Result<usize, ServiceError> {
        Ok(self.find_all(include_archived).await?.len())
    }

    async fn create(&self, name: &str) -> Result<Customer, ServiceError> {
        let created = Customer {
            id: new_id(),
            name: name.to_string(),
            created_at: NOW.to_string(),
            updated_at: NOW.to_string(),
            archived: false,
        };
        self.rows.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: &str, changes: CustomerChanges) -> Result<Customer, ServiceError> {
        let mut rows = self.rows.lock().unwrap();
        let found = rows
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| ServiceError::not_found("Cliente no encontrado", "in-memory"))?;
        if let Some(name) = changes.name {
            found.name = name;
        }
        if let Some(archived) = changes.archived {
            found.archived = archived;
        }
        Ok(found.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        self.rows.lock().unwrap().retain(|c| c.id != id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryProducts {
    pub rows: Mutex<Vec<Product>>,
}

#[async_trait]
impl ProductRepository for InMemoryProducts {
    async fn find_all(&self) -> Result<Vec<Product>, ServiceError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|p| !p.archived)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Product>, ServiceError> {
        Ok(self.rows.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, new: NewProduct) -> Result<Product, ServiceError> {
        let created = Product {
            id: new_id(),
            name: new.name,
            price: new.price,
            amount: new.amount,
            subtotal: new.subtotal,
            description: new.description,
            catalog: new.catalog,
            created_at: NOW.to_string(),
            updated_at: NOW.to_string(),
            archived: false,
        };
        self.rows.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: &str, changes: ProductChanges) -> Result<Product, ServiceError> {
        let mut rows = self.rows.lock().unwrap();
        let found = rows
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| ServiceError::not_found("Producto no encontrado", "in-memory"))?;
        if let Some(name) = changes.name {
            found.name = name;
        }
        if let Some(price) = changes.price {
            found.price = price;
        }
        if let Some(amount) = changes.amount {
            found.amount = amount;
        }
        if let Some(subtotal) = changes.subtotal {
            found.subtotal = subtotal;
        }
        if let Some(description) = changes.description {
            found.description = description;
        }
        if let Some(catalog) = changes.catalog {
            found.catalog = Some(catalog);
        }
        Ok(found.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(found) = rows.iter_mut().find(|p| p.id == id) {
            found.archived = true;
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryOrders {
    pub rows: Mutex<Vec<Order>>,
}

#[async_trait]
impl OrderRepository for InMemoryOrders {
    async fn find_all(&self) -> Result<Vec<Order>, ServiceError> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Order>, ServiceError> {
        Ok(self.rows.lock().unwrap().iter().find(|o| o.id == id).cloned())
    }

    async fn create(&self, new: NewOrder) -> Result<Order, ServiceError> {
        let created = Order {
            id: new_id(),
            code: new.code,
            customer: new.customer,
            status: new.status,
            total: new.total,
            product_ids: new.product_ids,
            created_at: NOW.to_string(),
            updated_at: NOW.to_string(),
            archived: false,
        };
        self.rows.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: &str, changes: OrderChanges) -> Result<Order, ServiceError> {
        let mut rows = self.rows.lock().unwrap();
        let found = rows
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| ServiceError::not_found("Pedido no encontrado", "in-memory"))?;
        if let Some(total) = changes.total {
            found.total = total;
        }
        if let Some(product_ids) = changes.product_ids {
            found.product_ids = product_ids;
        }
        Ok(found.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        self.rows.lock().unwrap().retain(|o| o.id != id);
        Ok(())
    }
}

fn test_config() -> AppConfig {
    AppConfig {
        notion_token: "test-token".to_string(),
        notion_catalog_db_id: "db-catalogs".to_string(),
        notion_campaign_db_id: "db-campaigns".to_string(),
        notion_catalog_campaign_db_id: "db-links".to_string(),
        notion_customer_db_id: "db-customers".to_string(),
        notion_product_db_id: "db-products".to_string(),
        notion_order_db_id: "db-orders".to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        environment: "test".to_string(),
        log_level: "debug".to_string(),
        log_json: false,
        cors_allowed_origins: None,
    }
}

/// Full application router over in-memory repositories, driven with
/// `tower::ServiceExt::oneshot`.
pub struct TestApp {
    pub router: Router,
    pub catalogs: Arc<InMemoryCatalogs>,
    pub campaigns: Arc<InMemoryCampaigns>,
    pub links: Arc<InMemoryCatalogCampaigns>,
    pub customers: Arc<InMemoryCustomers>,
    pub products: Arc<InMemoryProducts>,
    pub orders: Arc<InMemoryOrders>,
}

impl TestApp {
    pub fn new() -> Self {
        let catalogs = Arc::new(InMemoryCatalogs::default());
        let campaigns = Arc::new(InMemoryCampaigns::default());
        let links = Arc::new(InMemoryCatalogCampaigns::default());
        let customers = Arc::new(InMemoryCustomers::default());
        let products = Arc::new(InMemoryProducts::default());
        let orders = Arc::new(InMemoryOrders::default());

        let services = AppServices::from_repositories(
            catalogs.clone(),
            campaigns.clone(),
            links.clone(),
            customers.clone(),
            products.clone(),
            orders.clone(),
        );
        let state = AppState {
            config: Arc::new(test_config()),
            services,
        };

        Self {
            router: build_router(state),
            catalogs,
            campaigns,
            links,
            customers,
            products,
            orders,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                builder.body(Body::from(body.to_string())).unwrap()
            }
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let payload = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, payload)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
