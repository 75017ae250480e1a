pub mod campaigns;
pub mod catalog_campaigns;
pub mod catalogs;
pub mod common;
pub mod customers;
pub mod orders;
pub mod products;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::notion::NotionClient;
use crate::repositories::{
    CampaignRepository, CatalogCampaignRepository, CatalogRepository, CustomerRepository,
    NotionCampaignRepository, NotionCatalogCampaignRepository, NotionCatalogRepository,
    NotionCustomerRepository, NotionOrderRepository, NotionProductRepository, OrderRepository,
    ProductRepository,
};
use crate::services::{
    CampaignService, CatalogCampaignService, CatalogService, CustomerService, OrderService,
    ProductService,
};

pub use crate::AppState;

/// Service container handed to every handler through `AppState`.
#[derive(Clone)]
pub struct AppServices {
    pub catalogs: CatalogService,
    pub campaigns: CampaignService,
    pub catalog_campaigns: CatalogCampaignService,
    pub customers: CustomerService,
    pub products: ProductService,
    pub orders: OrderService,
}

impl AppServices {
    pub fn from_config(config: &AppConfig) -> Self {
        let client = Arc::new(NotionClient::new(config.notion_token.clone()));
        Self::with_client(client, config)
    }

    pub fn with_client(client: Arc<NotionClient>, config: &AppConfig) -> Self {
        let catalogs: Arc<dyn CatalogRepository> = Arc::new(NotionCatalogRepository::new(
            client.clone(),
            config.notion_catalog_db_id.clone(),
        ));
        let campaigns: Arc<dyn CampaignRepository> = Arc::new(NotionCampaignRepository::new(
            client.clone(),
            config.notion_campaign_db_id.clone(),
        ));
        let links: Arc<dyn CatalogCampaignRepository> =
            Arc::new(NotionCatalogCampaignRepository::new(
                client.clone(),
                config.notion_catalog_campaign_db_id.clone(),
            ));
        let customers: Arc<dyn CustomerRepository> = Arc::new(NotionCustomerRepository::new(
            client.clone(),
            config.notion_customer_db_id.clone(),
        ));
        let products: Arc<dyn ProductRepository> = Arc::new(NotionProductRepository::new(
            client.clone(),
            config.notion_product_db_id.clone(),
        ));
        let orders: Arc<dyn OrderRepository> = Arc::new(NotionOrderRepository::new(
            client,
            config.notion_order_db_id.clone(),
        ));

        Self::from_repositories(catalogs, campaigns, links, customers, products, orders)
    }

    /// Wires services onto arbitrary repository implementations; the tests
    /// use this with in-memory fakes.
    pub fn from_repositories(
        catalogs: Arc<dyn CatalogRepository>,
        campaigns: Arc<dyn CampaignRepository>,
        links: Arc<dyn CatalogCampaignRepository>,
        customers: Arc<dyn CustomerRepository>,
        products: Arc<dyn ProductRepository>,
        orders: Arc<dyn OrderRepository>,
    ) -> Self {
        Self {
            catalogs: CatalogService::new(catalogs.clone()),
            campaigns: CampaignService::new(campaigns.clone(), catalogs.clone(), links.clone()),
            catalog_campaigns: CatalogCampaignService::new(links, campaigns, catalogs),
            customers: CustomerService::new(customers),
            products: ProductService::new(products.clone()),
            orders: OrderService::new(orders, products),
        }
    }
}
