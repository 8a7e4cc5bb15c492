use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post, put},
};

use crate::{
    dto::{
        products::{CreateProductRequest, UpdateProductRequest},
        wishlists::DeletedProducts,
    },
    error::AppResult,
    models::Product,
    response::{ApiResponse, Created, Empty, created},
    routes::{params::JsonBody, wishlists::WISHLIST_ID},
    services::product_service,
    state::AppState,
    validation,
};

const PRODUCT_ID: &str = "Product ID";

/// Product routes, mounted under `/wishlists`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{wishlist_id}/products",
            post(add_product).delete(clear_products),
        )
        .route(
            "/{wishlist_id}/products/{product_id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route(
            "/{wishlist_id}/products/{product_id}/add-to-cart",
            put(add_to_cart),
        )
}

/// Product routes addressed by product id alone, mounted under `/products`.
pub fn legacy_router() -> Router<AppState> {
    Router::new().route(
        "/{product_id}",
        get(get_product_by_id).delete(delete_product_by_id),
    )
}

fn scoped_ids(wishlist_id: &str, product_id: &str) -> AppResult<(i32, i32)> {
    Ok((
        validation::path_id(wishlist_id, WISHLIST_ID)?,
        validation::path_id(product_id, PRODUCT_ID)?,
    ))
}

#[utoipa::path(
    post,
    path = "/wishlists/{wishlist_id}/products",
    params(
        ("wishlist_id" = i32, Path, description = "Wishlist ID")
    ),
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product added to the wishlist", body = ApiResponse<Product>),
        (status = 400, description = "The posted data was not valid"),
        (status = 404, description = "Wishlist not found"),
        (status = 415, description = "application/json expected")
    ),
    tag = "Products"
)]
pub async fn add_product(
    State(state): State<AppState>,
    Path(wishlist_id): Path<String>,
    JsonBody(body): JsonBody,
) -> AppResult<Created<Product>> {
    let wishlist_id = validation::path_id(&wishlist_id, WISHLIST_ID)?;
    let payload = validation::new_product(&body)?;
    let resp = product_service::add_product(&state, wishlist_id, payload).await?;
    let location = resp
        .data
        .as_ref()
        .map(|p| format!("/wishlists/{wishlist_id}/products/{}", p.id))
        .unwrap_or_default();
    Ok(created(location, resp))
}

#[utoipa::path(
    delete,
    path = "/wishlists/{wishlist_id}/products",
    params(
        ("wishlist_id" = i32, Path, description = "Wishlist ID")
    ),
    responses(
        (status = 200, description = "All products removed", body = ApiResponse<DeletedProducts>),
        (status = 400, description = "Integer value expected for field: Wishlist ID"),
        (status = 404, description = "Wishlist not found")
    ),
    tag = "Products"
)]
pub async fn clear_products(
    State(state): State<AppState>,
    Path(wishlist_id): Path<String>,
) -> AppResult<Json<ApiResponse<DeletedProducts>>> {
    let wishlist_id = validation::path_id(&wishlist_id, WISHLIST_ID)?;
    let resp = product_service::clear_products(&state, wishlist_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/wishlists/{wishlist_id}/products/{product_id}",
    params(
        ("wishlist_id" = i32, Path, description = "Wishlist ID"),
        ("product_id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product", body = ApiResponse<Product>),
        (status = 400, description = "Integer value expected for the ids"),
        (status = 404, description = "Product not found in the wishlist")
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path((wishlist_id, product_id)): Path<(String, String)>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let (wishlist_id, product_id) = scoped_ids(&wishlist_id, &product_id)?;
    let resp = product_service::get_product(&state, wishlist_id, product_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/wishlists/{wishlist_id}/products/{product_id}",
    params(
        ("wishlist_id" = i32, Path, description = "Wishlist ID"),
        ("product_id" = i32, Path, description = "Product ID")
    ),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Updated product", body = ApiResponse<Product>),
        (status = 400, description = "The posted data was not valid"),
        (status = 404, description = "Product not found in the wishlist"),
        (status = 415, description = "application/json expected")
    ),
    tag = "Products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path((wishlist_id, product_id)): Path<(String, String)>,
    JsonBody(body): JsonBody,
) -> AppResult<Json<ApiResponse<Product>>> {
    let (wishlist_id, product_id) = scoped_ids(&wishlist_id, &product_id)?;
    product_service::require_product(&state, wishlist_id, product_id).await?;
    let payload = validation::product_changes(&body)?;
    let resp = product_service::update_product(&state, wishlist_id, product_id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/wishlists/{wishlist_id}/products/{product_id}",
    params(
        ("wishlist_id" = i32, Path, description = "Wishlist ID"),
        ("product_id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted", body = ApiResponse<Empty>),
        (status = 400, description = "Integer value expected for the ids"),
        (status = 404, description = "Product not found in the wishlist")
    ),
    tag = "Products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path((wishlist_id, product_id)): Path<(String, String)>,
) -> AppResult<Json<ApiResponse<Empty>>> {
    let (wishlist_id, product_id) = scoped_ids(&wishlist_id, &product_id)?;
    let resp = product_service::delete_product(&state, wishlist_id, product_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/wishlists/{wishlist_id}/products/{product_id}/add-to-cart",
    params(
        ("wishlist_id" = i32, Path, description = "Wishlist ID"),
        ("product_id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product placed in cart", body = ApiResponse<Product>),
        (status = 400, description = "Integer value expected for the ids"),
        (status = 404, description = "Product not found in the wishlist")
    ),
    tag = "Products"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    Path((wishlist_id, product_id)): Path<(String, String)>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let (wishlist_id, product_id) = scoped_ids(&wishlist_id, &product_id)?;
    let resp = product_service::add_to_cart(&state, wishlist_id, product_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/products/{product_id}",
    params(
        ("product_id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product", body = ApiResponse<Product>),
        (status = 404, description = "Product not found")
    ),
    tag = "Products"
)]
pub async fn get_product_by_id(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let product_id = validation::path_id(&product_id, PRODUCT_ID)?;
    let resp = product_service::get_product_by_id(&state, product_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/products/{product_id}",
    params(
        ("product_id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted", body = ApiResponse<Empty>),
        (status = 404, description = "Product not found")
    ),
    tag = "Products"
)]
pub async fn delete_product_by_id(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> AppResult<Json<ApiResponse<Empty>>> {
    let product_id = validation::path_id(&product_id, PRODUCT_ID)?;
    let resp = product_service::delete_product_by_id(&state, product_id).await?;
    Ok(Json(resp))
}
