use serde::Serialize;

use crate::errors::ServiceError;
use crate::notion::Page;

use super::missing_property;

pub const CODE: &str = "Code";
pub const CUSTOMER: &str = "Customer";
pub const STATUS: &str = "Status";
pub const TOTAL: &str = "Total";
pub const PRODUCT: &str = "Product";
pub const CREATED_AT: &str = "Created_at";
pub const UPDATED_AT: &str = "Updated_at";

#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub id: String,
    pub code: String,
    pub customer: String,
    pub status: String,
    pub total: f64,
    pub product_ids: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
    pub archived: bool,
}

impl Order {
    pub fn from_page(page: &Page) -> Result<Self, ServiceError> {
        let code = page
            .property(CODE)
            .ok_or_else(|| missing_property("pedido", CODE))?
            .title_text()
            .to_string();

        let customer = page
            .property(CUSTOMER)
            .map(|p| p.rich_text_value().to_string())
            .unwrap_or_default();

        // The Status column is a status property, but older databases model
        // it as a select; accept either shape.
        let status = page
            .property(STATUS)
            .and_then(|p| p.status_name().or_else(|| p.select_name()))
            .unwrap_or("Pendiente")
            .to_string();

        let total = page
            .property(TOTAL)
            .and_then(|p| p.number)
            .ok_or_else(|| missing_property("pedido", TOTAL))?;

        let product_ids = page
            .property(PRODUCT)
            .map(|p| p.relation_ids())
            .unwrap_or_default();

        Ok(Self {
            id: page.id.clone(),
            code,
            customer,
            status,
            total,
            product_ids,
            created_at: page.created_time.clone(),
            updated_at: page.last_edited_time.clone(),
            archived: page.archived || page.in_trash,
        })
    }
}
