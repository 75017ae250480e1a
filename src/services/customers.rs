use std::sync::Arc;

use tracing::instrument;

use crate::errors::ServiceError;
use crate::models::Customer;
use crate::repositories::{CustomerChanges, CustomerRepository};

use super::ArchiveStats;

/// Same lifecycle as catalogs, without cross-entity links.
#[derive(Clone)]
pub struct CustomerService {
    repository: Arc<dyn CustomerRepository>,
}

impl CustomerService {
    pub fn new(repository: Arc<dyn CustomerRepository>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self))]
    pub async fn list(&self, include_archived: bool) -> Result<Vec<Customer>, ServiceError> {
        self.repository.find_all(include_archived).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Customer, ServiceError> {
        self.repository.find_by_id(id).await?.ok_or_else(|| {
            ServiceError::not_found(
                "Cliente no encontrado",
                "No existe el cliente con el ID proporcionado",
            )
        })
    }

    #[instrument(skip(self))]
    pub async fn create(&self, name: &str) -> Result<Customer, ServiceError> {
        if self.repository.find_active_by_name(name).await?.is_some() {
            return Err(ServiceError::conflict(
                "Ya existe un cliente con ese nombre",
                format!("Otro cliente activo ya usa el nombre '{name}'"),
            ));
        }
        self.repository.create(name).await
    }

    #[instrument(skip(self))]
    pub async fn update(&self, id: &str, name: &str) -> Result<Customer, ServiceError> {
        let current = self.get(id).await?;
        if current.archived {
            return Err(ServiceError::validation(
                "No se puede actualizar un cliente archivado",
                "Restaure el cliente antes de modificarlo",
            ));
        }
        if let Some(other) = self.repository.find_active_by_name(name).await? {
            if other.id != id {
                return Err(ServiceError::conflict(
                    "Ya existe un cliente con ese nombre",
                    format!("Otro cliente activo ya usa el nombre '{name}'"),
                ));
            }
        }

        self.repository
            .update(
                id,
                CustomerChanges {
                    name: Some(name.to_string()),
                    ..Default::default()
                },
            )
            .await
    }

    #[instrument(skip(self))]
    pub async fn archive(&self, id: &str) -> Result<Customer, ServiceError> {
        let current = self.get(id).await?;
        if current.archived {
            return Err(ServiceError::validation(
                "El cliente ya está archivado",
                "La transición de archivado es redundante",
            ));
        }

        self.repository
            .update(
                id,
                CustomerChanges {
                    archived: Some(true),
                    ..Default::default()
                },
            )
            .await
    }

    #[instrument(skip(self))]
    pub async fn restore(&self, id: &str) -> Result<Customer, ServiceError> {
        let current = self.get(id).await?;
        if !current.archived {
            return Err(ServiceError::validation(
                "El cliente no está archivado",
                "La transición de restauración es redundante",
            ));
        }

        self.repository
            .update(
                id,
                CustomerChanges {
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
