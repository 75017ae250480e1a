use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use crate::errors::{map_notion_error, ServiceError};
use crate::models::{customer, Customer};
use crate::notion::{
    CreatePageRequest, NotionClient, Property, PropertyFilter, UpdatePageRequest,
};

use super::{map_lookup_error, now_rfc3339, CustomerChanges, CustomerRepository};

const ENTITY: &str = "cliente";

#[derive(Debug, Clone)]
pub struct NotionCustomerRepository {
    client: Arc<NotionClient>,
    database_id: String,
}

impl NotionCustomerRepository {
    pub fn new(client: Arc<NotionClient>, database_id: impl Into<String>) -> Self {
        Self {
            client,
            database_id: database_id.into(),
        }
    }

    async fn query(&self, include_archived: bool) -> Result<Vec<Customer>, ServiceError> {
        let filter =
            (!include_archived).then(|| PropertyFilter::checkbox_equals(customer::ARCHIVED, false));
        let pages = self
            .client
            .query_database(&self.database_id, filter)
            .await
            .map_err(|e| map_notion_error(e, ENTITY))?;

        pages.iter().map(Customer::from_page).collect()
    }
}

#[async_trait]
impl CustomerRepository for NotionCustomerRepository {
    #[instrument(skip(self))]
    async fn find_all(&self, include_archived: bool) -> Result<Vec<Customer>, ServiceError> {
        self.query(include_archived).await
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> Result<Option<Customer>, ServiceError> {
        match self.client.retrieve_page(id).await {
            Ok(page) => Ok(Some(Customer::from_page(&page)?)),
            Err(e) => map_lookup_error(e, ENTITY),
        }
    }

    #[instrument(skip(self))]
    async fn find_active_by_name(&self, name: &str) -> Result<Option<Customer>, ServiceError> {
        let filter = PropertyFilter::title_equals(customer::NAME, name);
        let pages = self
            .client
            .query_database(&self.database_id, Some(filter))
            .await
            .map_err(|e| map_notion_error(e, ENTITY))?;

        for page in &pages {
            let found = Customer::from_page(page)?;
            if !found.archived {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }

    #[instrument(skip(self))]
    async fn count(&self, include_archived: bool) -> Result<usize, ServiceError> {
        Ok(self.query(include_archived).await?.len())
    }

    #[instrument(skip(self))]
    async fn create(&self, name: &str) -> Result<Customer, ServiceError> {
        let now = now_rfc3339();
        let properties = HashMap::from([
            (customer::NAME.to_string(), Property::title(name)),
            (customer::ARCHIVED.to_string(), Property::checkbox(false)),
            (
                customer::CREATED_AT.to_string(),
                Property::date(now.clone()),
            ),
            (customer::UPDATED_AT.to_string(), Property::date(now)),
        ]);

        let page = self
            .client
            .create_page(&CreatePageRequest::new(&self.database_id, properties))
            .await
            .map_err(|e| map_notion_error(e, ENTITY))?;

        Customer::from_page(&page)
    }

    #[instrument(skip(self))]
    async fn update(&self, id: &str, changes: CustomerChanges) -> Result<Customer, ServiceError> {
        let mut properties = HashMap::from([(
            customer::UPDATED_AT.to_string(),
            Property::date(now_rfc3339()),
        )]);
        if let Some(name) = changes.name {
            properties.insert(customer::NAME.to_string(), Property::title(name));
        }
        if let Some(archived) = changes.archived {
            properties.insert(customer::ARCHIVED.to_string(), Property::checkbox(archived));
        }

        let page = self
            .client
            .update_page(id, &UpdatePageRequest::properties(properties))
            .await
            .map_err(|e| map_notion_error(e, ENTITY))?;

        Customer::from_page(&page)
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
