use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use crate::errors::{map_notion_error, ServiceError};
use crate::models::{catalog_campaign, CatalogCampaign};
use crate::notion::{CreatePageRequest, NotionClient, Property, UpdatePageRequest};

use super::{
    map_lookup_error, now_rfc3339, CatalogCampaignChanges, CatalogCampaignRepository,
    NewCatalogCampaign,
};

const ENTITY: &str = "catálogo campaña";

#[derive(Debug, Clone)]
pub struct NotionCatalogCampaignRepository {
    client: Arc<NotionClient>,
    database_id: String,
}

impl NotionCatalogCampaignRepository {
    pub fn new(client: Arc<NotionClient>, database_id: impl Into<String>) -> Self {
        Self {
            client,
            database_id: database_id.into(),
        }
    }
}

#[async_trait]
impl CatalogCampaignRepository for NotionCatalogCampaignRepository {
    #[instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<CatalogCampaign>, ServiceError> {
        let pages = self
            .client
            .query_database(&self.database_id, None)
            .await
            .map_err(|e| map_notion_error(e, ENTITY))?;

        pages.iter().map(CatalogCampaign::from_page).collect()
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> Result<Option<CatalogCampaign>, ServiceError> {
        match self.client.retrieve_page(id).await {
            Ok(page) => Ok(Some(CatalogCampaign::from_page(&page)?)),
            Err(e) => map_lookup_error(e, ENTITY),
        }
    }

    #[instrument(skip(self))]
    async fn create(&self, new: NewCatalogCampaign) -> Result<CatalogCampaign, ServiceError> {
        let now = now_rfc3339();
        let properties = HashMap::from([
            (catalog_campaign::CODE.to_string(), Property::title(new.code)),
            (
                catalog_campaign::CAMPAIGN.to_string(),
                Property::relation([new.campaign_id]),
            ),
            (
                catalog_campaign::CATALOG.to_string(),
                Property::relation([new.catalog_id]),
            ),
            (
                catalog_campaign::CREATED_AT.to_string(),
                Property::date(now.clone()),
            ),
            (
                catalog_campaign::UPDATED_AT.to_string(),
                Property::date(now),
            ),
        ]);

        let page = self
            .client
            .create_page(&CreatePageRequest::new(&self.database_id, properties))
            .await
            .map_err(|e| map_notion_error(e, ENTITY))?;

        CatalogCampaign::from_page(&page)
    }

    #[instrument(skip(self))]
    async fn update(
        &self,
        id: &str,
        changes: CatalogCampaignChanges,
    ) -> Result<CatalogCampaign, ServiceError> {
        let mut properties = HashMap::from([(
            catalog_campaign::UPDATED_AT.to_string(),
            Property::date(now_rfc3339()),
        )]);
        if let Some(campaign_id) = changes.campaign_id {
            properties.insert(
                catalog_campaign::CAMPAIGN.to_string(),
                Property::relation([campaign_id]),
            );
        }
        if let Some(catalog_id) = changes.catalog_id {
            properties.insert(
                catalog_campaign::CATALOG.to_string(),
                Property::relation([catalog_id]),
            );
        }

        let page = self
            .client
            .update_page(id, &UpdatePageRequest::properties(properties))
            .await
            .map_err(|e| map_notion_error(e, ENTITY))?;

        CatalogCampaign::from_page(&page)
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
