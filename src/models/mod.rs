//! Flat entity records mapped from Notion pages.
//!
//! `created_at` / `updated_at` come from the page-level timestamps; the
//! archived flag combines the entity's `Archived` checkbox with the
//! page-level trash flag.

pub mod campaign;
pub mod catalog;
pub mod catalog_campaign;
pub mod customer;
pub mod order;
pub mod product;

pub use campaign::Campaign;
pub use catalog::Catalog;
pub use catalog_campaign::CatalogCampaign;
pub use customer::Customer;
pub use order::Order;
pub use product::Product;

use crate::errors::ServiceError;
use crate::notion::Page;

pub(crate) fn missing_property(entity: &str, property: &str) -> ServiceError {
    ServiceError::internal(
        "Propiedad no encontrada",
        format!("La página de {entity} no contiene la propiedad '{property}'"),
    )
}

pub(crate) fn page_archived(page: &Page, checkbox_property: &str) -> bool {
    page.archived
        || page.in_trash
        || page
            .property(checkbox_property)
            .and_then(|p| p.checkbox)
            .unwrap_or(false)
}
