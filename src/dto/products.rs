use serde::Deserialize;
use utoipa::ToSchema;

use crate::models::Availability;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub name: String,
    pub price: f64,
    pub inventory_product_id: i32,
    /// `AVAILABLE`/`UNAVAILABLE`, or `1`/`0`. Defaults to `AVAILABLE`.
    pub status: Option<Availability>,
    pub pic_url: Option<String>,
    pub short_desc: Option<String>,
}

/// Partial product update. Absent fields are left untouched; an explicit
/// `null` clears `pic_url` or `short_desc`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub inventory_product_id: Option<i32>,
    pub status: Option<Availability>,
    #[schema(value_type = Option<String>)]
    pub pic_url: Option<Option<String>>,
    #[schema(value_type = Option<String>)]
    pub short_desc: Option<Option<String>>,
}
