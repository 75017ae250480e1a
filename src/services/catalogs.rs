use std::sync::Arc;

use tracing::instrument;

use crate::errors::ServiceError;
use crate::models::Catalog;
use crate::repositories::{CatalogChanges, CatalogRepository};

use super::ArchiveStats;

#[derive(Clone)]
pub struct CatalogService {
    repository: Arc<dyn CatalogRepository>,
}

impl CatalogService {
    pub fn new(repository: Arc<dyn CatalogRepository>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, include_archived: bool) -> Result<Vec<Catalog>, ServiceError> {
        self.repository.find_all(include_archived).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Catalog, ServiceError> {
        self.repository.find_by_id(id).await?.ok_or_else(|| {
            ServiceError::not_found(
                "Catálogo no encontrado",
                "No existe el catálogo con el ID proporcionado",
            )
        })
    }

    #[instrument(skip(self))]
    pub async fn create(&self, name: &str) -> Result<Catalog, ServiceError> {
        if self.repository.find_active_by_name(name).await?.is_some() {
            return Err(ServiceError::conflict(
                "Ya existe un catálogo con ese nombre",
                format!("Otro catálogo activo ya usa el nombre '{name}'"),
            ));
        }
        self.repository.create(name).await
    }

    #[instrument(skip(self))]
    pub async fn update(&self, id: &str, name: &str) -> Result<Catalog, ServiceError> {
        let current = self.get(id).await?;
        if current.archived {
            return Err(ServiceError::validation(
                "No se puede actualizar un catálogo archivado",
                "Restaure el catálogo antes de modificarlo",
            ));
        }
        if let Some(other) = self.repository.find_active_by_name(name).await? {
            if other.id != id {
                return Err(ServiceError::conflict(
                    "Ya existe un catálogo con ese nombre",
                    format!("Otro catálogo activo ya usa el nombre '{name}'"),
                ));
            }
        }

        self.repository
            .update(
                id,
                CatalogChanges {
                    name: Some(name.to_string()),
                    ..Default::default()
                },
            )
            .await
    }

    #[instrument(skip(self))]
    pub async fn archive(&self, id: &str) -> Result<Catalog, ServiceError> {
        let current = self.get(id).await?;
        if current.archived {
            return Err(ServiceError::validation(
                "El catálogo ya está archivado",
                "La transición de archivado es redundante",
            ));
        }

        self.repository
            .update(
                id,
                CatalogChanges {
                    archived: Some(true),
                    ..Default::default()
                },
            )
            .await
    }

    #[instrument(skip(self))]
    pub async fn restore(&self, id: &str) -> Result<Catalog, ServiceError> {
        let current = self.get(id).await?;
        if !current.archived {
            return Err(ServiceError::validation(
                "El catálogo no está archivado",
                "La transición de restauración es redundante",
            ));
        }

        self.repository
            .update(
                id,
                CatalogChanges {
                    archived: Some(false),
                    ..Default::default()
                },
            )
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        self.get(id).await?;
        self.repository.delete(id).await
    }

    #[instrument(skip(self))]
    pub async fn stats(&self) -> Result<ArchiveStats, ServiceError> {
        let (total, active) =
            tokio::try_join!(self.repository.count(true), self.repository.count(false))?;
        Ok(ArchiveStats::from_counts(total, active))
    }
}
