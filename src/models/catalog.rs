use serde::Serialize;

use crate::errors::ServiceError;
use crate::notion::Page;

use super::{missing_property, page_archived};

pub const NAME: &str = "Name";
pub const ARCHIVED: &str = "Archived";
pub const CREATED_AT: &str = "Created_at";
pub const UPDATED_AT: &str = "Updated_at";

#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    pub id: String,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
    pub archived: bool,
}

impl Catalog {
    pub fn from_page(page: &Page) -> Result<Self, ServiceError> {
        let name = page
            .property(NAME)
            .ok_or_else(|| missing_property("catálogo", NAME))?
            .title_text()
            .to_string();

        Ok(Self {
            id: page.id.clone(),
            name,
            created_at: page.created_time.clone(),
            updated_at: page.last_edited_time.clone(),
            archived: page_archived(page, ARCHIVED),
        })
    }
}
