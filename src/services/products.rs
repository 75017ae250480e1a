use std::sync::Arc;

use tracing::instrument;

use crate::dto::ProductRequest;
use crate::errors::ServiceError;
use crate::models::Product;
use crate::repositories::{NewProduct, ProductChanges, ProductRepository};

#[derive(Clone)]
pub struct ProductService {
    repository: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Product>, ServiceError> {
        self.repository.find_all().await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Product, ServiceError> {
        self.repository.find_by_id(id).await?.ok_or_else(|| {
            ServiceError::not_found(
                "Producto no encontrado",
                "No existe el producto con el ID proporcionado",
            )
        })
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create(&self, request: ProductRequest) -> Result<Product, ServiceError> {
        let subtotal = request.subtotal();
        self.repository
            .create(NewProduct {
                name: request.name,
                price: request.price,
                amount: request.amount,
                subtotal,
                description: request.description,
                catalog: request.catalog,
            })
            .await
    }

    /// Full replacement of the product line; the subtotal is always
    /// recomputed from the incoming price and amount.
    #[instrument(skip(self, request))]
    pub async fn update(&self, id: &str, request: ProductRequest) -> Result<Product, ServiceError> {
        self.get(id).await?;
        let subtotal = request.subtotal();
        self.repository
            .update(
                id,
                ProductChanges {
                    name: Some(request.name),
                    price: Some(request.price),
                    amount: Some(request.amount),
                    subtotal: Some(subtotal),
                    description: Some(request.description),
                    catalog: request.catalog,
                },
            )
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        self.get(id).await?;
        self.repository.delete(id).await
    }
}
