use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use crate::errors::{map_notion_error, ServiceError};
use crate::models::{product, Product};
use crate::notion::{CreatePageRequest, NotionClient, Property, UpdatePageRequest};

use super::{map_lookup_error, now_rfc3339, NewProduct, ProductChanges, ProductRepository};

const ENTITY: &str = "producto";

#[derive(Debug, Clone)]
pub struct NotionProductRepository {
    client: Arc<NotionClient>,
    database_id: String,
}

impl NotionProductRepository {
    pub fn new(client: Arc<NotionClient>, database_id: impl Into<String>) -> Self {
        Self {
            client,
            database_id: database_id.into(),
        }
    }
}

#[async_trait]
impl ProductRepository for NotionProductRepository {
    #[instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Product>, ServiceError> {
        let pages = self
            .client
            .query_database(&self.database_id, None)
            .await
            .map_err(|e| map_notion_error(e, ENTITY))?;

        pages.iter().map(Product::from_page).collect()
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> Result<Option<Product>, ServiceError> {
        match self.client.retrieve_page(id).await {
            Ok(page) => Ok(Some(Product::from_page(&page)?)),
            Err(e) => map_lookup_error(e, ENTITY),
        }
    }

    #[instrument(skip(self))]
    async fn create(&self, new: NewProduct) -> Result<Product, ServiceError> {
        let now = now_rfc3339();
        let mut properties = HashMap::from([
            (product::NAME.to_string(), Property::title(new.name)),
            (product::PRICE.to_string(), Property::number(new.price)),
            (product::AMOUNT.to_string(), Property::number(new.amount)),
            (
                product::SUBTOTAL.to_string(),
                Property::number(new.subtotal),
            ),
            (
                product::DESCRIPTION.to_string(),
                Property::rich_text(new.description),
            ),
            (product::CREATED_AT.to_string(), Property::date(now.clone())),
            (product::UPDATED_AT.to_string(), Property::date(now)),
        ]);
        if let Some(catalog) = new.catalog {
            properties.insert(product::CATALOG.to_string(), Property::select(catalog));
        }

        let page = self
            .client
            .create_page(&CreatePageRequest::new(&self.database_id, properties))
            .await
            .map_err(|e| map_notion_error(e, ENTITY))?;

        Product::from_page(&page)
    }

    #[instrument(skip(self))]
    async fn update(&self, id: &str, changes: ProductChanges) -> Result<Product, ServiceError> {
        let mut properties = HashMap::from([(
            product::UPDATED_AT.to_string(),
            Property::date(now_rfc3339()),
        )]);
        if let Some(name) = changes.name {
            properties.insert(product::NAME.to_string(), Property::title(name));
        }
        if let Some(price) = changes.price {
            properties.insert(product::PRICE.to_string(), Property::number(price));
        }
        if let Some(amount) = changes.amount {
            properties.insert(product::AMOUNT.to_string(), Property::number(amount));
        }
        if let Some(subtotal) = changes.subtotal {
            properties.insert(product::SUBTOTAL.to_string(), Property::number(subtotal));
        }
        if let Some(description) = changes.description {
            properties.insert(
                product::DESCRIPTION.to_string(),
                Property::rich_text(description),
            );
        }
        if let Some(catalog) = changes.catalog {
            properties.insert(product::CATALOG.to_string(), Property::select(catalog));
        }

        let page = self
            .client
            .update_page(id, &UpdatePageRequest::properties(properties))
            .await
            .map_err(|e| map_notion_error(e, ENTITY))?;

        Product::from_page(&page)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        self.client
            .update_page(id, &UpdatePageRequest::trash())
            .await
            .map_err(|e| map_notion_error(e, ENTITY))?;
        Ok(())
    }
}
