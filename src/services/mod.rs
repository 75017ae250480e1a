//! Business rules between handlers and repositories.
//!
//! Services own the lifecycle guards (archived entities reject updates and
//! redundant transitions), duplicate-name checks among non-archived records,
//! and the cross-entity flows (campaign-catalog linking, order creation with
//! product compensation). Uniqueness stays check-then-write: two concurrent
//! creates with the same name can both land, and the winner is whichever
//! write reaches Notion last.

pub mod campaigns;
pub mod catalog_campaigns;
pub mod catalogs;
pub mod customers;
pub mod orders;
pub mod products;

pub use campaigns::CampaignService;
pub use catalog_campaigns::CatalogCampaignService;
pub use catalogs::CatalogService;
pub use customers::CustomerService;
pub use orders::OrderService;
pub use products::ProductService;

use serde::Serialize;

/// Archive counters for the stats endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArchiveStats {
    pub total: usize,
    pub active: usize,
    pub archived: usize,
}

impl ArchiveStats {
    pub fn from_counts(total: usize, active: usize) -> Self {
        Self {
            total,
            active,
            archived: total.saturating_sub(active),
        }
    }
}
