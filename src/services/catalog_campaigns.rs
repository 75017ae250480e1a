use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::models::CatalogCampaign;
use crate::repositories::{
    CampaignRepository, CatalogCampaignChanges, CatalogCampaignRepository, CatalogRepository,
    NewCatalogCampaign,
};

#[derive(Clone)]
pub struct CatalogCampaignService {
    links: Arc<dyn CatalogCampaignRepository>,
    campaigns: Arc<dyn CampaignRepository>,
    catalogs: Arc<dyn CatalogRepository>,
}

impl CatalogCampaignService {
    pub fn new(
        links: Arc<dyn CatalogCampaignRepository>,
        campaigns: Arc<dyn CampaignRepository>,
        catalogs: Arc<dyn CatalogRepository>,
    ) -> Self {
        Self {
            links,
            campaigns,
            catalogs,
        }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<CatalogCampaign>, ServiceError> {
        self.links.find_all().await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<CatalogCampaign, ServiceError> {
        self.links.find_by_id(id).await?.ok_or_else(|| {
            ServiceError::not_found(
                "Catálogo campaña no encontrado",
                "No existe el vínculo con el ID proporcionado",
            )
        })
    }

    async fn resolve_campaign(&self, campaign_id: &str) -> Result<(), ServiceError> {
        self.campaigns
            .find_by_id(campaign_id)
            .await?
            .ok_or_else(|| {
                ServiceError::not_found(
                    "Campaña no encontrada",
                    "No existe la campaña con el ID proporcionado",
                )
            })
            .map(|_| ())
    }

    async fn resolve_catalog(&self, catalog_id: &str) -> Result<(), ServiceError> {
        self.catalogs
            .find_by_id(catalog_id)
            .await?
            .ok_or_else(|| {
                ServiceError::not_found(
                    "Catálogo no encontrado",
                    "No existe el catálogo con el ID proporcionado",
                )
            })
            .map(|_| ())
    }

    /// Both ends of the link must exist; the visible `code` is generated
    /// here, not supplied by the caller.
    #[instrument(skip(self))]
    pub async fn create(
        &self,
        campaign_id: &str,
        catalog_id: &str,
    ) -> Result<CatalogCampaign, ServiceError> {
        self.resolve_campaign(campaign_id).await?;
        self.resolve_catalog(catalog_id).await?;

        self.links
            .create(NewCatalogCampaign {
                code: Uuid::new_v4().to_string(),
                campaign_id: campaign_id.to_string(),
                catalog_id: catalog_id.to_string(),
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: &str,
        campaign_id: Option<String>,
        catalog_id: Option<String>,
    ) -> Result<CatalogCampaign, ServiceError> {
        self.get(id).await?;
        if let Some(campaign_id) = &campaign_id {
            self.resolve_campaign(campaign_id).await?;
        }
        if let Some(catalog_id) = &catalog_id {
            self.resolve_catalog(catalog_id).await?;
        }

        self.links
            .update(
                id,
                CatalogCampaignChanges {
                    campaign_id,
                    catalog_id,
                },
            )
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        self.get(id).await?;
        self.links.delete(id).await
    }
}
