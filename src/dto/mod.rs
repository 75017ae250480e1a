//! Request validation and normalization.
//!
//! Handlers take raw `serde_json::Value` bodies so malformed payloads reach
//! these parsers instead of axum's rejection, keeping every 400 in the same
//! Spanish-message envelope. All parsers are pure; anything that passes here
//! is ready for the service layer unchanged.

use chrono::{NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::errors::ServiceError;

static PAGE_ID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-f0-9]{8}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{12}$")
        .expect("static pattern compiles")
});

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Canonical dashed page-ID check applied to every path and body ID.
pub fn validate_page_id(id: &str) -> Result<(), ServiceError> {
    if PAGE_ID_PATTERN.is_match(id) {
        Ok(())
    } else {
        Err(ServiceError::validation(
            "El formato del ID es inválido",
            format!("'{id}' no es un ID válido"),
        ))
    }
}

/// Uppercases only the first letter, leaving the rest untouched.
fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn required_string(body: &Value, field: &str, message: &str) -> Result<String, ServiceError> {
    body.get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            ServiceError::validation(message, format!("El campo '{field}' es obligatorio"))
        })
}

fn optional_string(body: &Value, field: &str) -> Option<String> {
    body.get(field).and_then(Value::as_str).map(str::to_string)
}

/// Trimmed, non-empty, length-capped `name`. Capitalization is up to the
/// caller; campaigns and order lines keep the name as sent.
fn parse_name(body: &Value, max_len: usize, too_long: &str) -> Result<String, ServiceError> {
    let raw = required_string(body, "name", "El nombre es requerido y debe ser un texto")?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::validation(
            "El nombre no puede estar vacío",
            "El campo 'name' quedó vacío después de recortar espacios",
        ));
    }
    if trimmed.chars().count() > max_len {
        return Err(ServiceError::validation(
            too_long,
            format!("El nombre supera los {max_len} caracteres permitidos"),
        ));
    }
    Ok(trimmed.to_string())
}

fn parse_date(value: &str, field: &str) -> Result<NaiveDate, ServiceError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
        ServiceError::validation(
            "El formato de la fecha es inválido",
            format!("El campo '{field}' debe tener el formato YYYY-MM-DD"),
        )
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRequest {
    pub name: String,
}

impl CatalogRequest {
    pub fn parse(body: &Value) -> Result<Self, ServiceError> {
        let name = parse_name(body, 100, "El nombre no puede exceder 100 caracteres")?;
        Ok(Self {
            name: capitalize_first(&name),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomerRequest {
    pub name: String,
}

impl CustomerRequest {
    pub fn parse(body: &Value) -> Result<Self, ServiceError> {
        let name = parse_name(body, 100, "El nombre no puede exceder 100 caracteres")?;
        Ok(Self {
            name: capitalize_first(&name),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CampaignCreateRequest {
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub catalog_id: String,
}

/// Partial campaign update; the relink pair travels together or not at all.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CampaignUpdateRequest {
    pub name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub catalog_id: Option<String>,
    pub catalog_campaign_id: Option<String>,
}

fn parse_campaign_name(body: &Value) -> Result<String, ServiceError> {
    parse_name(body, 20, "El nombre no debe exceder los 20 caracteres")
}

fn validate_date_window(start: NaiveDate, end: NaiveDate) -> Result<(), ServiceError> {
    let today = Utc::now().date_naive();
    if start < today {
        return Err(ServiceError::validation(
            "La fecha de inicio no puede ser anterior a hoy",
            format!("start_date={start}, hoy={today}"),
        ));
    }
    if end < today {
        return Err(ServiceError::validation(
            "La fecha de fin no puede ser anterior a hoy",
            format!("end_date={end}, hoy={today}"),
        ));
    }
    if start >= end {
        return Err(ServiceError::validation(
            "La fecha de inicio no puede ser posterior o igual a la fecha de fin",
            format!("start_date={start}, end_date={end}"),
        ));
    }
    Ok(())
}

impl CampaignCreateRequest {
    pub fn parse(body: &Value) -> Result<Self, ServiceError> {
        let name = parse_campaign_name(body)?;

        let start_raw = required_string(body, "start_date", "La fecha de inicio es requerida")?;
        let end_raw = required_string(body, "end_date", "La fecha de fin es requerida")?;
        let start = parse_date(&start_raw, "start_date")?;
        let end = parse_date(&end_raw, "end_date")?;
        validate_date_window(start, end)?;

        let catalog_id = required_string(body, "catalog_id", "El catálogo es requerido")?;
        validate_page_id(&catalog_id)?;

        Ok(Self {
            name,
            start_date: start_raw,
            end_date: end_raw,
            catalog_id,
        })
    }
}

impl CampaignUpdateRequest {
    pub fn parse(body: &Value) -> Result<Self, ServiceError> {
        let name = match body.get("name") {
            Some(_) => Some(parse_campaign_name(body)?),
            None => None,
        };

        let start_raw = optional_string(body, "start_date");
        let end_raw = optional_string(body, "end_date");
        match (&start_raw, &end_raw) {
            (Some(start), Some(end)) => {
                let start = parse_date(start, "start_date")?;
                let end = parse_date(end, "end_date")?;
                validate_date_window(start, end)?;
            }
            (None, None) => {}
            _ => {
                return Err(ServiceError::validation(
                    "Las fechas de inicio y fin deben enviarse juntas",
                    "Solo una de 'start_date'/'end_date' está presente",
                ));
            }
        }

        let catalog_id = optional_string(body, "catalog_id");
        let catalog_campaign_id = optional_string(body, "catalog_campaign_id");
        match (&catalog_id, &catalog_campaign_id) {
            (Some(catalog_id), Some(catalog_campaign_id)) => {
                validate_page_id(catalog_id)?;
                validate_page_id(catalog_campaign_id)?;
            }
            (None, None) => {}
            _ => {
                return Err(ServiceError::validation(
                    "Para reasignar el catálogo se requieren 'catalog_id' y 'catalog_campaign_id'",
                    "Solo uno de 'catalog_id'/'catalog_campaign_id' está presente",
                ));
            }
        }

        Ok(Self {
            name,
            start_date: start_raw,
            end_date: end_raw,
            catalog_id,
            catalog_campaign_id,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogCampaignCreateRequest {
    pub campaign_id: String,
    pub catalog_id: String,
}

impl CatalogCampaignCreateRequest {
    pub fn parse(body: &Value) -> Result<Self, ServiceError> {
        let campaign_id = required_string(body, "campaign_id", "La campaña es requerida")?;
        let catalog_id = required_string(body, "catalog_id", "El catálogo es requerido")?;
        validate_page_id(&campaign_id)?;
        validate_page_id(&catalog_id)?;
        Ok(Self {
            campaign_id,
            catalog_id,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogCampaignUpdateRequest {
    pub campaign_id: Option<String>,
    pub catalog_id: Option<String>,
}

impl CatalogCampaignUpdateRequest {
    pub fn parse(body: &Value) -> Result<Self, ServiceError> {
        let campaign_id = optional_string(body, "campaign_id");
        let catalog_id = optional_string(body, "catalog_id");
        if campaign_id.is_none() && catalog_id.is_none() {
            return Err(ServiceError::validation(
                "No hay campos para actualizar",
                "Envíe 'campaign_id' o 'catalog_id'",
            ));
        }
        if let Some(campaign_id) = &campaign_id {
            validate_page_id(campaign_id)?;
        }
        if let Some(catalog_id) = &catalog_id {
            validate_page_id(catalog_id)?;
        }
        Ok(Self {
            campaign_id,
            catalog_id,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductRequest {
    pub name: String,
    pub price: f64,
    pub amount: f64,
    pub description: String,
    pub catalog: Option<String>,
}

impl ProductRequest {
    pub fn parse(body: &Value) -> Result<Self, ServiceError> {
        let name = required_string(body, "name", "El nombre es requerido y debe ser un texto")?;
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(ServiceError::validation(
                "El nombre no puede estar vacío",
                "El campo 'name' quedó vacío después de recortar espacios",
            ));
        }

        let description =
            required_string(body, "description", "La descripción es requerida")?;
        let description = description.trim().to_string();
        if description.is_empty() {
            return Err(ServiceError::validation(
                "La descripción no puede estar vacía",
                "El campo 'description' quedó vacío después de recortar espacios",
            ));
        }

        let price = body.get("price").and_then(Value::as_f64).ok_or_else(|| {
            ServiceError::validation(
                "El precio es requerido y debe ser un número",
                "El campo 'price' es obligatorio",
            )
        })?;
        if price <= 0.0 {
            return Err(ServiceError::validation(
                "El precio no puede ser cero o negativo",
                format!("price={price}"),
            ));
        }

        let amount = body.get("amount").and_then(Value::as_f64).unwrap_or(1.0);
        if amount < 1.0 {
            return Err(ServiceError::validation(
                "La cantidad debe ser al menos 1",
                format!("amount={amount}"),
            ));
        }

        let catalog = optional_string(body, "catalog")
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        Ok(Self {
            name,
            price,
            amount,
            description,
            catalog,
        })
    }

    /// Parse for standalone product creation: the name additionally gets
    /// first-letter capitalization. Order lines keep the name as sent.
    pub fn parse_capitalized(body: &Value) -> Result<Self, ServiceError> {
        let mut parsed = Self::parse(body)?;
        parsed.name = capitalize_first(&parsed.name);
        Ok(parsed)
    }

    pub fn subtotal(&self) -> f64 {
        self.price * self.amount
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderCreateRequest {
    pub customer: String,
    pub products: Vec<ProductRequest>,
}

impl OrderCreateRequest {
    pub fn parse(body: &Value) -> Result<Self, ServiceError> {
        let customer = body.get("customer").and_then(Value::as_str);
        let products = body.get("products").and_then(Value::as_array);

        let (customer, products) = match (customer, products) {
            (Some(customer), Some(products))
                if !customer.trim().is_empty() && !products.is_empty() =>
            {
                (customer.trim().to_string(), products)
            }
            _ => {
                return Err(ServiceError::validation(
                    "Nombre de cliente y productos son obligatorios.",
                    "Los campos 'customer' y 'products' deben estar presentes y no vacíos",
                ));
            }
        };

        let products = products
            .iter()
            .map(ProductRequest::parse)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { customer, products })
    }
}

/// Body of `POST /new/:id`: product lines to append to an existing order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderAppendRequest {
    pub products: Vec<ProductRequest>,
}

impl OrderAppendRequest {
    pub fn parse(body: &Value) -> Result<Self, ServiceError> {
        let products = body
            .get("products")
            .and_then(Value::as_array)
            .filter(|p| !p.is_empty())
            .ok_or_else(|| {
                ServiceError::validation(
                    "Los productos son obligatorios.",
                    "El campo 'products' debe estar presente y no vacío",
                )
            })?;

        let products = products
            .iter()
            .map(ProductRequest::parse)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { products })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rstest::rstest;
    use serde_json::json;

    fn future(days: i64) -> String {
        (Utc::now().date_naive() + Duration::days(days))
            .format(DATE_FORMAT)
            .to_string()
    }

    #[rstest]
    #[case("a1b2c3d4-1111-2222-3333-444455556666", true)]
    #[case("A1B2C3D4-1111-2222-3333-444455556666", false)]
    #[case("a1b2c3d411112222-3333-444455556666", false)]
    #[case("not-an-id", false)]
    #[case("", false)]
    fn page_id_pattern(#[case] id: &str, #[case] ok: bool) {
        assert_eq!(validate_page_id(id).is_ok(), ok);
    }

    #[test]
    fn catalog_name_is_trimmed_and_capitalized() {
        let parsed = CatalogRequest::parse(&json!({ "name": "  summer sale  " })).unwrap();
        assert_eq!(parsed.name, "Summer sale");
    }

    #[rstest]
    #[case(json!({}), "El nombre es requerido y debe ser un texto")]
    #[case(json!({ "name": 42 }), "El nombre es requerido y debe ser un texto")]
    #[case(json!({ "name": "   " }), "El nombre no puede estar vacío")]
    #[case(json!({ "name": "x".repeat(101) }), "El nombre no puede exceder 100 caracteres")]
    fn catalog_name_rejections(#[case] body: Value, #[case] message: &str) {
        let err = CatalogRequest::parse(&body).unwrap_err();
        assert_eq!(err.message(), message);
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn campaign_rejects_inverted_date_window() {
        let body = json!({
            "name": "Primavera",
            "start_date": future(10),
            "end_date": future(5),
            "catalog_id": "a1b2c3d4-1111-2222-3333-444455556666"
        });
        let err = CampaignCreateRequest::parse(&body).unwrap_err();
        assert_eq!(
            err.message(),
            "La fecha de inicio no puede ser posterior o igual a la fecha de fin"
        );
    }

    #[test]
    fn campaign_rejects_past_start_date() {
        let body = json!({
            "name": "Primavera",
            "start_date": "2020-01-01",
            "end_date": future(5),
            "catalog_id": "a1b2c3d4-1111-2222-3333-444455556666"
        });
        let err = CampaignCreateRequest::parse(&body).unwrap_err();
        assert_eq!(err.message(), "La fecha de inicio no puede ser anterior a hoy");
    }

    #[test]
    fn campaign_name_is_trimmed_but_not_capitalized() {
        let body = json!({
            "name": "  rebajas de otoño  ",
            "start_date": future(1),
            "end_date": future(5),
            "catalog_id": "a1b2c3d4-1111-2222-3333-444455556666"
        });
        let parsed = CampaignCreateRequest::parse(&body).unwrap();
        assert_eq!(parsed.name, "rebajas de otoño");
    }

    #[test]
    fn campaign_name_over_twenty_chars_is_rejected() {
        let body = json!({
            "name": "Campaña de primavera y verano",
            "start_date": future(1),
            "end_date": future(5),
            "catalog_id": "a1b2c3d4-1111-2222-3333-444455556666"
        });
        let err = CampaignCreateRequest::parse(&body).unwrap_err();
        assert_eq!(err.message(), "El nombre no debe exceder los 20 caracteres");
    }

    #[test]
    fn campaign_update_requires_relink_pair_together() {
        let body = json!({ "catalog_id": "a1b2c3d4-1111-2222-3333-444455556666" });
        let err = CampaignUpdateRequest::parse(&body).unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[rstest]
    #[case(json!({ "name": "Crema", "description": "Hidratante", "price": 0.0, "amount": 1 }), "El precio no puede ser cero o negativo")]
    #[case(json!({ "name": "Crema", "description": "Hidratante", "price": -5.0, "amount": 1 }), "El precio no puede ser cero o negativo")]
    #[case(json!({ "name": "Crema", "description": "Hidratante", "price": 10.0, "amount": 0 }), "La cantidad debe ser al menos 1")]
    #[case(json!({ "name": "Crema", "description": "   ", "price": 10.0, "amount": 1 }), "La descripción no puede estar vacía")]
    fn product_rejections(#[case] body: Value, #[case] message: &str) {
        let err = ProductRequest::parse(&body).unwrap_err();
        assert_eq!(err.message(), message);
    }

    #[test]
    fn standalone_product_name_is_capitalized_order_lines_stay_raw() {
        let body = json!({
            "name": "crema solar",
            "description": "Protección alta",
            "price": 15.0,
            "amount": 1
        });

        let standalone = ProductRequest::parse_capitalized(&body).unwrap();
        assert_eq!(standalone.name, "Crema solar");

        let line = ProductRequest::parse(&body).unwrap();
        assert_eq!(line.name, "crema solar");
    }

    #[test]
    fn product_subtotal_is_price_times_amount() {
        let parsed = ProductRequest::parse(&json!({
            "name": "Crema",
            "description": "Hidratante",
            "price": 12.5,
            "amount": 3
        }))
        .unwrap();
        assert_eq!(parsed.subtotal(), 37.5);
    }

    #[rstest]
    #[case(json!({ "products": [] }))]
    #[case(json!({ "customer": "Ana" }))]
    #[case(json!({ "customer": "   ", "products": [ { "name": "Crema", "description": "d", "price": 1.0 } ] }))]
    fn order_create_requires_customer_and_products(#[case] body: Value) {
        let err = OrderCreateRequest::parse(&body).unwrap_err();
        assert_eq!(err.message(), "Nombre de cliente y productos son obligatorios.");
    }
}
