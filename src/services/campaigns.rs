use std::sync::Arc;

use tracing::{instrument, warn};
use uuid::Uuid;

use crate::dto::{CampaignCreateRequest, CampaignUpdateRequest};
use crate::errors::ServiceError;
use crate::models::Campaign;
use crate::repositories::{
    CampaignChanges, CampaignRepository, CatalogCampaignChanges, CatalogCampaignRepository,
    CatalogRepository, NewCampaign, NewCatalogCampaign,
};

/// Campaigns are always created linked to a catalog through a
/// CatalogCampaign page; the link is created right after the campaign and
/// the campaign is rolled back if the link write fails.
#[derive(Clone)]
pub struct CampaignService {
    campaigns: Arc<dyn CampaignRepository>,
    catalogs: Arc<dyn CatalogRepository>,
    links: Arc<dyn CatalogCampaignRepository>,
}

impl CampaignService {
    pub fn new(
        campaigns: Arc<dyn CampaignRepository>,
        catalogs: Arc<dyn CatalogRepository>,
        links: Arc<dyn CatalogCampaignRepository>,
    ) -> Self {
        Self {
            campaigns,
            catalogs,
            links,
        }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, include_archived: bool) -> Result<Vec<Campaign>, ServiceError> {
        self.campaigns.find_all(include_archived).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Campaign, ServiceError> {
        self.campaigns.find_by_id(id).await?.ok_or_else(|| {
            ServiceError::not_found(
                "Campaña no encontrada",
                "No existe la campaña con el ID proporcionado",
            )
        })
    }

    async fn resolve_catalog(&self, catalog_id: &str) -> Result<(), ServiceError> {
        let catalog = self.catalogs.find_by_id(catalog_id).await?.ok_or_else(|| {
            ServiceError::not_found(
                "Catálogo no encontrado",
                "No existe el catálogo con el ID proporcionado",
            )
        })?;
        if catalog.archived {
            return Err(ServiceError::validation(
                "No se puede vincular un catálogo archivado",
                "Restaure el catálogo antes de vincularlo a una campaña",
            ));
        }
        Ok(())
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create(&self, request: CampaignCreateRequest) -> Result<Campaign, ServiceError> {
        if self
            .campaigns
            .find_active_by_name(&request.name)
            .await?
            .is_some()
        {
            return Err(ServiceError::conflict(
                "Ya existe la campaña",
                format!("Otra campaña activa ya usa el nombre '{}'", request.name),
            ));
        }
        self.resolve_catalog(&request.catalog_id).await?;

        let campaign = self
            .campaigns
            .create(NewCampaign {
                name: request.name,
                start_date: request.start_date,
                end_date: request.end_date,
            })
            .await?;

        let link = NewCatalogCampaign {
            code: Uuid::new_v4().to_string(),
            campaign_id: campaign.id.clone(),
            catalog_id: request.catalog_id,
        };
        if let Err(link_error) = self.links.create(link).await {
            // Roll the campaign back so no unlinked campaign survives.
            if let Err(rollback_error) = self.campaigns.delete(&campaign.id).await {
                warn!(
                    campaign_id = %campaign.id,
                    error = %rollback_error,
                    "no se pudo revertir la campaña tras fallar el vínculo"
                );
            }
            return Err(link_error);
        }

        Ok(campaign)
    }

    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        id: &str,
        request: CampaignUpdateRequest,
    ) -> Result<Campaign, ServiceError> {
        let current = self.get(id).await?;
        if current.archived {
            return Err(ServiceError::validation(
                "No se puede actualizar una campaña archivada",
                "Restaure la campaña antes de modificarla",
            ));
        }

        if let Some(name) = &request.name {
            if let Some(other) = self.campaigns.find_active_by_name(name).await? {
                if other.id != id {
                    return Err(ServiceError::conflict(
                        "Ya existe la campaña",
                        format!("Otra campaña activa ya usa el nombre '{name}'"),
                    ));
                }
            }
        }

        if let (Some(catalog_id), Some(catalog_campaign_id)) =
            (&request.catalog_id, &request.catalog_campaign_id)
        {
            self.resolve_catalog(catalog_id).await?;
            self.links
                .update(
                    catalog_campaign_id,
                    CatalogCampaignChanges {
                        catalog_id: Some(catalog_id.clone()),
                        ..Default::default()
                    },
                )
                .await?;
        }

        self.campaigns
            .update(
                id,
                CampaignChanges {
                    name: request.name,
                    start_date: request.start_date,
                    end_date: request.end_date,
                },
            )
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        self.get(id).await?;
        self.campaigns.delete(id).await
    }
}
