use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    entity::{products::Model as ProductModel, wishlists::Model as WishlistModel},
    error::{AppError, AppResult},
};

/// Availability of a wishlist product. Stored as `1`/`0`, rendered by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Availability {
    Available,
    Unavailable,
}

impl Availability {
    pub fn code(self) -> i32 {
        match self {
            Availability::Available => 1,
            Availability::Unavailable => 0,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Availability::Available),
            0 => Some(Availability::Unavailable),
            _ => None,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("AVAILABLE") {
            Some(Availability::Available)
        } else if name.eq_ignore_ascii_case("UNAVAILABLE") {
            Some(Availability::Unavailable)
        } else {
            None
        }
    }
}

/// Whether a wishlist product has been moved into the cart.
///
/// The only transition is `Default -> InCart`, made by add-to-cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InCartStatus {
    Default,
    InCart,
}

impl InCartStatus {
    pub fn code(self) -> i32 {
        match self {
            InCartStatus::Default => 0,
            InCartStatus::InCart => 1,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(InCartStatus::Default),
            1 => Some(InCartStatus::InCart),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: i32,
    pub wishlist_id: i32,
    pub inventory_product_id: i32,
    pub name: String,
    pub price: f64,
    pub status: Availability,
    pub pic_url: Option<String>,
    pub short_desc: Option<String>,
    pub in_cart_status: InCartStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Wishlist {
    pub id: i32,
    pub name: String,
    pub user_id: i32,
    pub products: Vec<Product>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ProductModel> for Product {
    type Error = AppError;

    fn try_from(model: ProductModel) -> AppResult<Self> {
        let status = Availability::from_code(model.status.into()).ok_or_else(|| {
            anyhow::anyhow!("product {} has unknown status code {}", model.id, model.status)
        })?;
        let in_cart_status = InCartStatus::from_code(model.in_cart_status.into()).ok_or_else(|| {
            anyhow::anyhow!(
                "product {} has unknown in-cart code {}",
                model.id,
                model.in_cart_status
            )
        })?;

        Ok(Product {
            id: model.id,
            wishlist_id: model.wishlist_id,
            inventory_product_id: model.inventory_product_id,
            name: model.name,
            price: model.price,
            status,
            pic_url: model.pic_url,
            short_desc: model.short_desc,
            in_cart_status,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        })
    }
}

impl Wishlist {
    pub fn from_entity(model: WishlistModel, products: Vec<ProductModel>) -> AppResult<Self> {
        let products = products
            .into_iter()
            .map(Product::try_from)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Wishlist {
            id: model.id,
            name: model.name,
            user_id: model.user_id,
            products,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        })
    }
}
