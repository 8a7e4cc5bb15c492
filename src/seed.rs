//! Demo data: three wishlists for users 1 and 2, with products.

use crate::{
    dto::{products::CreateProductRequest, wishlists::CreateWishlistRequest},
    error::{AppError, AppResult},
    models::Availability,
    services::{product_service, wishlist_service},
    state::AppState,
};

pub const WISHLISTS: [(&str, i32); 3] = [
    ("User 1 first wishlist", 1),
    ("User 1 second wishlist", 1),
    ("User 2 first wishlist", 2),
];

/// (wishlist index into `WISHLISTS`, name, price, pic_url, short_desc, inventory_product_id)
type SeedProduct = (usize, &'static str, f64, &'static str, &'static str, i32);

pub const PRODUCTS: [SeedProduct; 9] = [
    (0, "toy", 11.5, "www.toy.com/1.png", "this is a toy", 3),
    (0, "book", 20.5, "www.book.com/1.png", "this is a book", 4),
    (0, "tv", 1001.5, "www.tv.com/1.png", "this is a tv", 15),
    (0, "pepsi", 7.5, "www.drinks.com/pepsi.png", "this is pepsi coke", 1),
    (0, "bread", 3.5, "www.bakery.com/1.png", "this is a bread", 20),
    (0, "soccer", 23.5, "www.soccer.com/1.png", "this is a soccer", 5),
    (1, "bread", 3.5, "www.bakery.com/1.png", "this is a bread", 20),
    (1, "soccer", 23.5, "www.soccer.com/1.png", "this is a soccer", 5),
    (1, "toy", 11.5, "www.toy.com/1.png", "this is a toy", 3),
];

/// Create (or reset) the demo wishlists and fill them. Returns the wishlist
/// ids in `WISHLISTS` order. Running it twice leaves the same data behind.
pub async fn seed(state: &AppState) -> AppResult<Vec<i32>> {
    let mut ids = Vec::with_capacity(WISHLISTS.len());
    for (name, user_id) in WISHLISTS {
        ids.push(ensure_wishlist(state, name, user_id).await?);
    }

    for (index, name, price, pic_url, short_desc, inventory_product_id) in PRODUCTS {
        product_service::add_product(
            state,
            ids[index],
            CreateProductRequest {
                name: name.into(),
                price,
                inventory_product_id,
                status: Some(Availability::Available),
                pic_url: Some(pic_url.into()),
                short_desc: Some(short_desc.into()),
            },
        )
        .await?;
    }

    tracing::info!(wishlists = ids.len(), products = PRODUCTS.len(), "seed completed");
    Ok(ids)
}

// An existing wishlist of the same user and name is reused with its products cleared.
async fn ensure_wishlist(state: &AppState, name: &str, user_id: i32) -> AppResult<i32> {
    let existing = wishlist_service::list_wishlists(state, Some(user_id))
        .await?
        .data
        .and_then(|list| list.items.into_iter().find(|w| w.name == name));

    if let Some(wishlist) = existing {
        product_service::clear_products(state, wishlist.id).await?;
        return Ok(wishlist.id);
    }

    wishlist_service::create_wishlist(
        state,
        CreateWishlistRequest {
            name: name.into(),
            user_id,
        },
    )
    .await?
    .data
    .map(|w| w.id)
    .ok_or_else(|| AppError::Internal(anyhow::anyhow!("create returned no wishlist")))
}
