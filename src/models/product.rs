use serde::Serialize;

use crate::errors::ServiceError;
use crate::notion::Page;

use super::missing_property;

pub const NAME: &str = "Name";
pub const PRICE: &str = "Price";
pub const AMOUNT: &str = "Amount";
pub const SUBTOTAL: &str = "Subtotal";
pub const DESCRIPTION: &str = "Description";
pub const CATALOG: &str = "Catalog";
pub const CREATED_AT: &str = "Created_at";
pub const UPDATED_AT: &str = "Updated_at";

/// Product line; `subtotal` is always `price * amount`, recomputed on any
/// price or amount change.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub amount: f64,
    pub subtotal: f64,
    pub description: String,
    pub catalog: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub archived: bool,
}

impl Product {
    pub fn from_page(page: &Page) -> Result<Self, ServiceError> {
        let name = page
            .property(NAME)
            .ok_or_else(|| missing_property("producto", NAME))?
            .title_text()
            .to_string();

        let price = page
            .property(PRICE)
            .and_then(|p| p.number)
            .ok_or_else(|| missing_property("producto", PRICE))?;

        let amount = page
            .property(AMOUNT)
            .and_then(|p| p.number)
            .unwrap_or(1.0);

        let subtotal = page
            .property(SUBTOTAL)
            .and_then(|p| p.number)
            .unwrap_or(price * amount);

        let description = page
            .property(DESCRIPTION)
            .map(|p| p.rich_text_value().to_string())
            .unwrap_or_default();

        let catalog = page
            .property(CATALOG)
            .and_then(|p| p.select_name())
            .map(str::to_string);

        Ok(Self {
            id: page.id.clone(),
            name,
            price,
            amount,
            subtotal,
            description,
            catalog,
            created_at: page.created_time.clone(),
            updated_at: page.last_edited_time.clone(),
            archived: page.archived || page.in_trash,
        })
    }
}
