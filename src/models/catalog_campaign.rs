use serde::Serialize;

use crate::errors::ServiceError;
use crate::notion::Page;

use super::missing_property;

pub const CODE: &str = "CODE";
pub const CAMPAIGN: &str = "CAMPAIGN";
pub const CATALOG: &str = "CATALOG";
pub const CREATED_AT: &str = "CREATED_AT";
pub const UPDATED_AT: &str = "UPDATED_AT";

/// Join record linking one campaign to one catalog. The `code` is a
/// generated UUID visible to users, distinct from the page ID.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogCampaign {
    pub id: String,
    pub code: String,
    pub campaign_id: String,
    pub catalog_id: String,
    pub created_at: String,
    pub updated_at: String,
    pub archived: bool,
}

impl CatalogCampaign {
    pub fn from_page(page: &Page) -> Result<Self, ServiceError> {
        let code = page
            .property(CODE)
            .ok_or_else(|| missing_property("catálogo campaña", CODE))?
            .title_text()
            .to_string();

        let campaign_id = page
            .property(CAMPAIGN)
            .and_then(|p| p.relation_ids().into_iter().next())
            .ok_or_else(|| missing_property("catálogo campaña", CAMPAIGN))?;

        let catalog_id = page
            .property(CATALOG)
            .and_then(|p| p.relation_ids().into_iter().next())
            .ok_or_else(|| missing_property("catálogo campaña", CATALOG))?;

        Ok(Self {
            id: page.id.clone(),
            code,
            campaign_id,
            catalog_id,
            created_at: page.created_time.clone(),
            updated_at: page.last_edited_time.clone(),
            archived: page.archived || page.in_trash,
        })
    }
}
