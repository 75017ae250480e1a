//! Persistence layer over Notion databases.
//!
//! Each entity gets a trait so services stay testable against in-memory
//! fakes, plus a `Notion*Repository` that talks to one database through a
//! shared [`NotionClient`]. All deletes are soft: the page is moved to the
//! trash and disappears from unfiltered listings.

pub mod campaigns;
pub mod catalog_campaigns;
pub mod catalogs;
pub mod customers;
pub mod orders;
pub mod products;

use async_trait::async_trait;

pub use campaigns::NotionCampaignRepository;
pub use catalog_campaigns::NotionCatalogCampaignRepository;
pub use catalogs::NotionCatalogRepository;
pub use customers::NotionCustomerRepository;
pub use orders::NotionOrderRepository;
pub use products::NotionProductRepository;

use crate::errors::{map_notion_error, ServiceError};
use crate::models::{Campaign, Catalog, CatalogCampaign, Customer, Order, Product};
use crate::notion::{NotionError, NotionErrorCode};

/// Maps a retrieve-by-id failure: a missing page is `Ok(None)`, a malformed
/// page ID surfaces as a validation error, everything else goes through the
/// shared taxonomy.
fn map_lookup_error<T>(error: NotionError, entity: &str) -> Result<Option<T>, ServiceError> {
    match error.code() {
        Some(NotionErrorCode::ObjectNotFound) => Ok(None),
        Some(NotionErrorCode::ValidationError) => Err(ServiceError::validation(
            "El formato del ID es inválido",
            format!("El ID de {entity} es inválido o tiene el formato incorrecto"),
        )),
        _ => Err(map_notion_error(error, entity)),
    }
}

fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}

#[derive(Debug, Clone, Default)]
pub struct CatalogChanges {
    pub name: Option<String>,
    pub archived: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct NewCampaign {
    pub name: String,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Default)]
pub struct CampaignChanges {
    pub name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewCatalogCampaign {
    pub code: String,
    pub campaign_id: String,
    pub catalog_id: String,
}

#[derive(Debug, Clone, Default)]
pub struct CatalogCampaignChanges {
    pub campaign_id: Option<String>,
    pub catalog_id: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CustomerChanges {
    pub name: Option<String>,
    pub archived: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub amount: f64,
    pub subtotal: f64,
    pub description: String,
    pub catalog: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub amount: Option<f64>,
    pub subtotal: Option<f64>,
    pub description: Option<String>,
    pub catalog: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub code: String,
    pub customer: String,
    pub status: String,
    pub total: f64,
    pub product_ids: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct OrderChanges {
    pub total: Option<f64>,
    pub product_ids: Option<Vec<String>>,
}

#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn find_all(&self, include_archived: bool) -> Result<Vec<Catalog>, ServiceError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Catalog>, ServiceError>;
    /// Looks up a non-archived catalog by exact name, for duplicate checks.
    async fn find_active_by_name(&self, name: &str) -> Result<Option<Catalog>, ServiceError>;
    async fn count(&self, include_archived: bool) -> Result<usize, ServiceError>;
    async fn create(&self, name: &str) -> Result<Catalog, ServiceError>;
    async fn update(&self, id: &str, changes: CatalogChanges) -> Result<Catalog, ServiceError>;
    async fn delete(&self, id: &str) -> Result<(), ServiceError>;
}

#[async_trait]
pub trait CampaignRepository: Send + Sync {
    async fn find_all(&self, include_archived: bool) -> Result<Vec<Campaign>, ServiceError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Campaign>, ServiceError>;
    async fn find_active_by_name(&self, name: &str) -> Result<Option<Campaign>, ServiceError>;
    async fn count(&self, include_archived: bool) -> Result<usize, ServiceError>;
    async fn create(&self, new: NewCampaign) -> Result<Campaign, ServiceError>;
    async fn update(&self, id: &str, changes: CampaignChanges) -> Result<Campaign, ServiceError>;
    async fn delete(&self, id: &str) -> Result<(), ServiceError>;
}

#[async_trait]
pub trait CatalogCampaignRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<CatalogCampaign>, ServiceError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<CatalogCampaign>, ServiceError>;
    async fn create(&self, new: NewCatalogCampaign) -> Result<CatalogCampaign, ServiceError>;
    async fn update(
        &self,
        id: &str,
        changes: CatalogCampaignChanges,
    ) -> Result<CatalogCampaign, ServiceError>;
    async fn delete(&self, id: &str) -> Result<(), ServiceError>;
}

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn find_all(&self, include_archived: bool) -> Result<Vec<Customer>, ServiceError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Customer>, ServiceError>;
    async fn find_active_by_name(&self, name: &str) -> Result<Option<Customer>, ServiceError>;
    async fn count(&self, include_archived: bool) -> Result<usize, ServiceError>;
    async fn create(&self, name: &str) -> Result<Customer, ServiceError>;
    async fn update(&self, id: &str, changes: CustomerChanges) -> Result<Customer, ServiceError>;
    async fn delete(&self, id: &str) -> Result<(), ServiceError>;
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Product>, ServiceError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Product>, ServiceError>;
    async fn create(&self, new: NewProduct) -> Result<Product, ServiceError>;
    async fn update(&self, id: &str, changes: ProductChanges) -> Result<Product, ServiceError>;
    async fn delete(&self, id: &str) -> Result<(), ServiceError>;
}

#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Order>, ServiceError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Order>, ServiceError>;
    async fn create(&self, new: NewOrder) -> Result<Order, ServiceError>;
    async fn update(&self, id: &str, changes: OrderChanges) -> Result<Order, ServiceError>;
    async fn delete(&self, id: &str) -> Result<(), ServiceError>;
}
