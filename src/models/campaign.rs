use serde::Serialize;

use crate::errors::ServiceError;
use crate::notion::Page;

use super::{missing_property, page_archived};

pub const NAME: &str = "NAME";
pub const START_DATE: &str = "START_DATE";
pub const END_DATE: &str = "END_DATE";
pub const ARCHIVED: &str = "Archived";
pub const CREATED_AT: &str = "CREATED_AT";
pub const UPDATED_AT: &str = "UPDATED_AT";

#[derive(Debug, Clone, Serialize)]
pub struct Campaign {
    pub id: String,
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub created_at: String,
    pub updated_at: String,
    pub archived: bool,
}

impl Campaign {
    pub fn from_page(page: &Page) -> Result<Self, ServiceError> {
        let name = page
            .property(NAME)
            .ok_or_else(|| missing_property("campaña", NAME))?
            .title_text()
            .to_string();

        let start_date = page
            .property(START_DATE)
            .and_then(|p| p.date_start())
            .ok_or_else(|| missing_property("campaña", START_DATE))?
            .to_string();

        let end_date = page
            .property(END_DATE)
            .and_then(|p| p.date_start())
            .ok_or_else(|| missing_property("campaña", END_DATE))?
            .to_string();

        Ok(Self {
            id: page.id.clone(),
            name,
            start_date,
            end_date,
            created_at: page.created_time.clone(),
            updated_at: page.last_edited_time.clone(),
            archived: page_archived(page, ARCHIVED),
        })
    }
}
