use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Wishlist;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateWishlistRequest {
    pub name: String,
    pub user_id: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RenameWishlistRequest {
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct WishlistList {
    #[schema(value_type = Vec<Wishlist>)]
    pub items: Vec<Wishlist>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeletedProducts {
    pub deleted: u64,
}
