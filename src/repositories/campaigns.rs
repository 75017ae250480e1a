use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use crate::errors::{map_notion_error, ServiceError};
use crate::models::{campaign, Campaign};
use crate::notion::{
    CreatePageRequest, NotionClient, Property, PropertyFilter, UpdatePageRequest,
};

use super::{map_lookup_error, now_rfc3339, CampaignChanges, CampaignRepository, NewCampaign};

const ENTITY: &str = "campaña";

#[derive(Debug, Clone)]
pub struct NotionCampaignRepository {
    client: Arc<NotionClient>,
    database_id: String,
}

impl NotionCampaignRepository {
    pub fn new(client: Arc<NotionClient>, database_id: impl Into<String>) -> Self {
        Self {
            client,
            database_id: database_id.into(),
        }
    }

    async fn query(&self, include_archived: bool) -> Result<Vec<Campaign>, ServiceError> {
        let filter =
            (!include_archived).then(|| PropertyFilter::checkbox_equals(campaign::ARCHIVED, false));
        let pages = self
            .client
            .query_database(&self.database_id, filter)
            .await
            .map_err(|e| map_notion_error(e, ENTITY))?;

        pages.iter().map(Campaign::from_page).collect()
    }
}

#[async_trait]
impl CampaignRepository for NotionCampaignRepository {
    #[instrument(skip(self))]
    async fn find_all(&self, include_archived: bool) -> Result<Vec<Campaign>, ServiceError> {
        self.query(include_archived).await
    }

    #[instrument(skip(self))]
    async fn count(&self, include_archived: bool) -> Result<usize, ServiceError> {
        Ok(self.query(include_archived).await?.len())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> Result<Option<Campaign>, ServiceError> {
        match self.client.retrieve_page(id).await {
            Ok(page) => Ok(Some(Campaign::from_page(&page)?)),
            Err(e) => map_lookup_error(e, ENTITY),
        }
    }

    #[instrument(skip(self))]
    async fn find_active_by_name(&self, name: &str) -> Result<Option<Campaign>, ServiceError> {
        let filter = PropertyFilter::title_equals(campaign::NAME, name);
        let pages = self
            .client
            .query_database(&self.database_id, Some(filter))
            .await
            .map_err(|e| map_notion_error(e, ENTITY))?;

        for page in &pages {
            let found = Campaign::from_page(page)?;
            if !found.archived {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }

    #[instrument(skip(self))]
    async fn create(&self, new: NewCampaign) -> Result<Campaign, ServiceError> {
        let now = now_rfc3339();
        let properties = HashMap::from([
            (campaign::NAME.to_string(), Property::title(new.name)),
            (
                campaign::START_DATE.to_string(),
                Property::date(new.start_date),
            ),
            (campaign::END_DATE.to_string(), Property::date(new.end_date)),
            (campaign::ARCHIVED.to_string(), Property::checkbox(false)),
            (
                campaign::CREATED_AT.to_string(),
                Property::date(now.clone()),
            ),
            (campaign::UPDATED_AT.to_string(), Property::date(now)),
        ]);

        let page = self
            .client
            .create_page(&CreatePageRequest::new(&self.database_id, properties))
            .await
            .map_err(|e| map_notion_error(e, ENTITY))?;

        Campaign::from_page(&page)
    }

    #[instrument(skip(self))]
    async fn update(&self, id: &str, changes: CampaignChanges) -> Result<Campaign, ServiceError> {
        let mut properties = HashMap::from([(
            campaign::UPDATED_AT.to_string(),
            Property::date(now_rfc3339()),
        )]);
        if let Some(name) = changes.name {
            properties.insert(campaign::NAME.to_string(), Property::title(name));
        }
        if let Some(start_date) = changes.start_date {
            properties.insert(campaign::START_DATE.to_string(), Property::date(start_date));
        }
        if let Some(end_date) = changes.end_date {
            properties.insert(campaign::END_DATE.to_string(), Property::date(end_date));
        }

        let page = self
            .client
            .update_page(id, &UpdatePageRequest::properties(properties))
            .await
            .map_err(|e| map_notion_error(e, ENTITY))?;

        Campaign::from_page(&page)
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
