use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use crate::errors::{map_notion_error, ServiceError};
use crate::models::{catalog, Catalog};
use crate::notion::{
    CreatePageRequest, NotionClient, Property, PropertyFilter, UpdatePageRequest,
};

use super::{map_lookup_error, now_rfc3339, CatalogChanges, CatalogRepository};

const ENTITY: &str = "catálogo";

/// Catalog persistence against one Notion database.
#[derive(Debug, Clone)]
pub struct NotionCatalogRepository {
    client: Arc<NotionClient>,
    database_id: String,
}

impl NotionCatalogRepository {
    pub fn new(client: Arc<NotionClient>, database_id: impl Into<String>) -> Self {
        Self {
            client,
            database_id: database_id.into(),
        }
    }

    async fn query(&self, include_archived: bool) -> Result<Vec<Catalog>, ServiceError> {
        let filter =
            (!include_archived).then(|| PropertyFilter::checkbox_equals(catalog::ARCHIVED, false));
        let pages = self
            .client
            .query_database(&self.database_id, filter)
            .await
            .map_err(|e| map_notion_error(e, ENTITY))?;

        pages.iter().map(Catalog::from_page).collect()
    }
}

#[async_trait]
impl CatalogRepository for NotionCatalogRepository {
    #[instrument(skip(self))]
    async fn find_all(&self, include_archived: bool) -> Result<Vec<Catalog>, ServiceError> {
        self.query(include_archived).await
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> Result<Option<Catalog>, ServiceError> {
        match self.client.retrieve_page(id).await {
            Ok(page) => Ok(Some(Catalog::from_page(&page)?)),
            Err(e) => map_lookup_error(e, ENTITY),
        }
    }

    #[instrument(skip(self))]
    async fn find_active_by_name(&self, name: &str) -> Result<Option<Catalog>, ServiceError> {
        let filter = PropertyFilter::title_equals(catalog::NAME, name);
        let pages = self
            .client
            .query_database(&self.database_id, Some(filter))
            .await
            .map_err(|e| map_notion_error(e, ENTITY))?;

        for page in &pages {
            let found = Catalog::from_page(page)?;
            if !found.archived {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }

    #[instrument(skip(self))]
    async fn count(&self, include_archived: bool) -> Result<usize, ServiceError> {
        Ok(self.query(include_archived).await?.len())
    }

    #[instrument(skip(self))]
    async fn create(&self, name: &str) -> Result<Catalog, ServiceError> {
        let now = now_rfc3339();
        let properties = HashMap::from([
            (catalog::NAME.to_string(), Property::title(name)),
            (catalog::ARCHIVED.to_string(), Property::checkbox(false)),
            (catalog::CREATED_AT.to_string(), Property::date(now.clone())),
            (catalog::UPDATED_AT.to_string(), Property::date(now)),
        ]);

        let page = self
            .client
            .create_page(&CreatePageRequest::new(&self.database_id, properties))
            .await
            .map_err(|e| map_notion_error(e, ENTITY))?;

        Catalog::from_page(&page)
    }

    #[instrument(skip(self))]
    async fn update(&self, id: &str, changes: CatalogChanges) -> Result<Catalog, ServiceError> {
        let mut properties = HashMap::from([(
            catalog::UPDATED_AT.to_string(),
            Property::date(now_rfc3339()),
        )]);
        if let Some(name) = changes.name {
            properties.insert(catalog::NAME.to_string(), Property::title(name));
        }
        if let Some(archived) = changes.archived {
            properties.insert(catalog::ARCHIVED.to_string(), Property::checkbox(archived));
        }

        let page = self
            .client
            .update_page(id, &UpdatePageRequest::properties(properties))
            .await
            .map_err(|e| map_notion_error(e, ENTITY))?;

        Catalog::from_page(&page)
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn catalog_page(id: &str, name: &str, archived: bool) -> serde_json::Value {
        json!({
            "object": "page",
            "id": id,
            "created_time": "2024-05-01T10:00:00.000Z",
            "last_edited_time": "2024-05-01T10:00:00.000Z",
            "archived": false,
            "properties": {
                "Name": { "type": "title", "title": [ { "plain_text": name } ] },
                "Archived": { "type": "checkbox", "checkbox": archived }
            }
        })
    }

    fn repo(server: &MockServer) -> NotionCatalogRepository {
        let client = Arc::new(NotionClient::with_base_url("token", server.uri()));
        NotionCatalogRepository::new(client, "db-catalogs")
    }

    #[tokio::test]
    async fn find_all_filters_archived_by_default() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/databases/db-catalogs/query"))
            .and(body_partial_json(json!({
                "filter": { "property": "Archived", "checkbox": { "equals": false } }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [ catalog_page("a1b2c3d4-1111-2222-3333-444455556666", "Verano", false) ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let catalogs = repo(&server).find_all(false).await.unwrap();
        assert_eq!(catalogs.len(), 1);
        assert_eq!(catalogs[0].name, "Verano");
    }

    #[tokio::test]
    async fn create_writes_title_and_timestamps() {
        let server = MockServer::start().await;
        let id = "a1b2c3d4-1111-2222-3333-444455556666";

        Mock::given(method("POST"))
            .and(path("/pages"))
            .and(body_partial_json(json!({
                "parent": { "database_id": "db-catalogs" },
                "properties": {
                    "Name": { "title": [ { "text": { "content": "Verano" } } ] },
                    "Archived": { "checkbox": false }
                }
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(catalog_page(id, "Verano", false)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let created = repo(&server).create("Verano").await.unwrap();
        assert_eq!(created.id, id);
        assert!(!created.archived);
    }

    #[tokio::test]
    async fn find_by_id_maps_missing_page_to_none() {
        let server = MockServer::start().await;
        let id = "a1b2c3d4-1111-2222-3333-444455556666";

        Mock::given(method("GET"))
            .and(path(format!("/pages/{id}")))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "object": "error",
                "status": 404,
                "code": "object_not_found",
                "message": "Could not find page."
            })))
            .mount(&server)
            .await;

        let found = repo(&server).find_by_id(id).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn find_active_by_name_skips_archived_matches() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/databases/db-catalogs/query"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [ catalog_page("a1b2c3d4-1111-2222-3333-444455556666", "Verano", true) ]
            })))
            .mount(&server)
            .await;

        let found = repo(&server).find_active_by_name("Verano").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn delete_moves_page_to_trash() {
        let server = MockServer::start().await;
        let id = "a1b2c3d4-1111-2222-3333-444455556666";

        Mock::given(method("PATCH"))
            .and(path(format!("/pages/{id}")))
            .and(body_partial_json(json!({ "archived": true, "in_trash": true })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(catalog_page(id, "Verano", false)),
            )
            .expect(1)
            .mount(&server)
            .await;

        repo(&server).delete(id).await.unwrap();
    }
}
