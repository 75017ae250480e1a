use std::sync::Arc;

use chrono::Utc;
use tracing::{instrument, warn};

use crate::dto::ProductRequest;
use crate::errors::ServiceError;
use crate::models::Order;
use crate::repositories::{
    NewOrder, NewProduct, OrderChanges, OrderRepository, ProductRepository,
};

const INITIAL_STATUS: &str = "Pendiente";

/// Order creation is a multi-write flow: one product page per line, then
/// the order page referencing them all. There is no transaction upstream,
/// so any failure after the first product write triggers compensation:
/// every product page created so far is soft-deleted before the error is
/// returned.
#[derive(Clone)]
pub struct OrderService {
    orders: Arc<dyn OrderRepository>,
    products: Arc<dyn ProductRepository>,
}

impl OrderService {
    pub fn new(orders: Arc<dyn OrderRepository>, products: Arc<dyn ProductRepository>) -> Self {
        Self { orders, products }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Order>, ServiceError> {
        self.orders.find_all().await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Order, ServiceError> {
        self.orders.find_by_id(id).await?.ok_or_else(|| {
            ServiceError::not_found(
                "Pedido no encontrado",
                "No existe el pedido con el ID proporcionado",
            )
        })
    }

    /// Creates the product pages for `lines`, compensating on failure.
    /// Returns the created page IDs and the summed subtotals.
    async fn create_product_pages(
        &self,
        lines: Vec<ProductRequest>,
    ) -> Result<(Vec<String>, f64), ServiceError> {
        let mut created_ids = Vec::with_capacity(lines.len());
        let mut total = 0.0;

        for line in lines {
            let subtotal = line.subtotal();
            let result = self
                .products
                .create(NewProduct {
                    name: line.name,
                    price: line.price,
                    amount: line.amount,
                    subtotal,
                    description: line.description,
                    catalog: line.catalog,
                })
                .await;

            match result {
                Ok(product) => {
                    created_ids.push(product.id);
                    total += subtotal;
                }
                Err(error) => {
                    self.compensate_products(&created_ids).await;
                    return Err(error);
                }
            }
        }

        Ok((created_ids, total))
    }

    async fn compensate_products(&self, product_ids: &[String]) {
        for product_id in product_ids {
            if let Err(error) = self.products.delete(product_id).await {
                warn!(
                    %product_id,
                    error = %error,
                    "no se pudo revertir el producto del pedido fallido"
                );
            }
        }
    }

    #[instrument(skip(self, products), fields(customer = %customer, lines = products.len()))]
    pub async fn create(
        &self,
        customer: &str,
        products: Vec<ProductRequest>,
    ) -> Result<Order, ServiceError> {
        let (product_ids, total) = self.create_product_pages(products).await?;

        let code = format!("{}-{}", customer, Utc::now().to_rfc3339());
        let result = self
            .orders
            .create(NewOrder {
                code,
                customer: customer.to_string(),
                status: INITIAL_STATUS.to_string(),
                total,
                product_ids: product_ids.clone(),
            })
            .await;

        if result.is_err() {
            self.compensate_products(&product_ids).await;
        }
        result
    }

    /// Appends product lines to an existing order: the new product pages
    /// are created first, then the order is rewritten with the merged
    /// relation list and the summed total.
    #[instrument(skip(self, products), fields(lines = products.len()))]
    pub async fn add_products(
        &self,
        order_id: &str,
        products: Vec<ProductRequest>,
    ) -> Result<Order, ServiceError> {
        let order = self.get(order_id).await?;

        let (new_ids, added_total) = self.create_product_pages(products).await?;

        let mut product_ids = order.product_ids.clone();
        product_ids.extend(new_ids.iter().cloned());

        let result = self
            .orders
            .update(
                order_id,
                OrderChanges {
                    total: Some(order.total + added_total),
                    product_ids: Some(product_ids),
                },
            )
            .await;

        if result.is_err() {
            self.compensate_products(&new_ids).await;
        }
        result
    }
}
