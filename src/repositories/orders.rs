use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use crate::errors::{map_notion_error, ServiceError};
use crate::models::{order, Order};
use crate::notion::{CreatePageRequest, NotionClient, Property, UpdatePageRequest};

use super::{map_lookup_error, now_rfc3339, NewOrder, OrderChanges, OrderRepository};

const ENTITY: &str = "pedido";

#[derive(Debug, Clone)]
pub struct NotionOrderRepository {
    client: Arc<NotionClient>,
    database_id: String,
}

impl NotionOrderRepository {
    pub fn new(client: Arc<NotionClient>, database_id: impl Into<String>) -> Self {
        Self {
            client,
            database_id: database_id.into(),
        }
    }
}

#[async_trait]
impl OrderRepository for NotionOrderRepository {
    #[instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Order>, ServiceError> {
        let pages = self
            .client
            .query_database(&self.database_id, None)
            .await
            .map_err(|e| map_notion_error(e, ENTITY))?;

        pages.iter().map(Order::from_page).collect()
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> Result<Option<Order>, ServiceError> {
        match self.client.retrieve_page(id).await {
            Ok(page) => Ok(Some(Order::from_page(&page)?)),
            Err(e) => map_lookup_error(e, ENTITY),
        }
    }

    #[instrument(skip(self))]
    async fn create(&self, new: NewOrder) -> Result<Order, ServiceError> {
        let now = now_rfc3339();
        let properties = HashMap::from([
            (order::CODE.to_string(), Property::title(new.code)),
            (
                order::CUSTOMER.to_string(),
                Property::rich_text(new.customer),
            ),
            (order::STATUS.to_string(), Property::status(new.status)),
            (order::TOTAL.to_string(), Property::number(new.total)),
            (
                order::PRODUCT.to_string(),
                Property::relation(new.product_ids),
            ),
            (order::CREATED_AT.to_string(), Property::date(now.clone())),
            (order::UPDATED_AT.to_string(), Property::date(now)),
        ]);

        let page = self
            .client
            .create_page(&CreatePageRequest::new(&self.database_id, properties))
            .await
            .map_err(|e| map_notion_error(e, ENTITY))?;

        Order::from_page(&page)
    }

    #[instrument(skip(self))]
    async fn update(&self, id: &str, changes: OrderChanges) -> Result<Order, ServiceError> {
        let mut properties = HashMap::from([(
            order::UPDATED_AT.to_string(),
            Property::date(now_rfc3339()),
        )]);
        if let Some(total) = changes.total {
            properties.insert(order::TOTAL.to_string(), Property::number(total));
        }
        if let Some(product_ids) = changes.product_ids {
            properties.insert(order::PRODUCT.to_string(), Property::relation(product_ids));
        }

        let page = self
            .client
            .update_page(id, &UpdatePageRequest::properties(properties))
            .await
            .map_err(|e| map_notion_error(e, ENTITY))?;

        Order::from_page(&page)
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
