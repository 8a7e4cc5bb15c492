use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};

use crate::{
    dto::wishlists::{CreateWishlistRequest, RenameWishlistRequest, WishlistList},
    error::AppResult,
    models::Wishlist,
    response::{ApiResponse, Created, Empty, created},
    routes::params::{JsonBody, WishlistQuery},
    services::wishlist_service,
    state::AppState,
    validation,
};

pub const WISHLIST_ID: &str = "Wishlist ID";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_wishlists).post(create_wishlist))
        .route(
            "/{wishlist_id}",
            get(get_wishlist).put(rename_wishlist).delete(delete_wishlist),
        )
}

#[utoipa::path(
    get,
    path = "/wishlists",
    params(WishlistQuery),
    responses(
        (status = 200, description = "List wishlists", body = ApiResponse<WishlistList>),
        (status = 400, description = "user_id is not an integer")
    ),
    tag = "Wishlists"
)]
pub async fn list_wishlists(
    State(state): State<AppState>,
    Query(query): Query<WishlistQuery>,
) -> AppResult<Json<ApiResponse<WishlistList>>> {
    let user_id = validation::user_filter(query.user_id.as_deref())?;
    let resp = wishlist_service::list_wishlists(&state, user_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/wishlists",
    request_body = CreateWishlistRequest,
    responses(
        (status = 201, description = "Wishlist created", body = ApiResponse<Wishlist>),
        (status = 400, description = "The posted data was not valid"),
        (status = 415, description = "application/json expected")
    ),
    tag = "Wishlists"
)]
pub async fn create_wishlist(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> AppResult<Created<Wishlist>> {
    let payload = validation::new_wishlist(&body)?;
    let resp = wishlist_service::create_wishlist(&state, payload).await?;
    let location = resp
        .data
        .as_ref()
        .map(|w| format!("/wishlists/{}", w.id))
        .unwrap_or_default();
    Ok(created(location, resp))
}

#[utoipa::path(
    get,
    path = "/wishlists/{wishlist_id}",
    params(
        ("wishlist_id" = i32, Path, description = "Wishlist ID")
    ),
    responses(
        (status = 200, description = "Wishlist with its products", body = ApiResponse<Wishlist>),
        (status = 400, description = "Integer value expected for field: Wishlist ID"),
        (status = 404, description = "Wishlist not found")
    ),
    tag = "Wishlists"
)]
pub async fn get_wishlist(
    State(state): State<AppState>,
    Path(wishlist_id): Path<String>,
) -> AppResult<Json<ApiResponse<Wishlist>>> {
    let wishlist_id = validation::path_id(&wishlist_id, WISHLIST_ID)?;
    let resp = wishlist_service::get_wishlist(&state, wishlist_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/wishlists/{wishlist_id}",
    params(
        ("wishlist_id" = i32, Path, description = "Wishlist ID")
    ),
    request_body = RenameWishlistRequest,
    responses(
        (status = 200, description = "Wishlist renamed", body = ApiResponse<Wishlist>),
        (status = 400, description = "The posted data was not valid"),
        (status = 404, description = "Wishlist not found"),
        (status = 415, description = "application/json expected")
    ),
    tag = "Wishlists"
)]
pub async fn rename_wishlist(
    State(state): State<AppState>,
    Path(wishlist_id): Path<String>,
    JsonBody(body): JsonBody,
) -> AppResult<Json<ApiResponse<Wishlist>>> {
    let wishlist_id = validation::path_id(&wishlist_id, WISHLIST_ID)?;
    // A missing wishlist is reported before any problem with the body.
    wishlist_service::require_wishlist(&state, wishlist_id).await?;
    let payload = validation::rename_wishlist(&body)?;
    let resp = wishlist_service::rename_wishlist(&state, wishlist_id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/wishlists/{wishlist_id}",
    params(
        ("wishlist_id" = i32, Path, description = "Wishlist ID")
    ),
    responses(
        (status = 200, description = "Wishlist and its products deleted", body = ApiResponse<Empty>),
        (status = 400, description = "Integer value expected for field: Wishlist ID"),
        (status = 404, description = "Wishlist not found")
    ),
    tag = "Wishlists"
)]
pub async fn delete_wishlist(
    State(state): State<AppState>,
    Path(wishlist_id): Path<String>,
) -> AppResult<Json<ApiResponse<Empty>>> {
    let wishlist_id = validation::path_id(&wishlist_id, WISHLIST_ID)?;
    let resp = wishlist_service::delete_wishlist(&state, wishlist_id).await?;
    Ok(Json(resp))
}
