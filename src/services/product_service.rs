use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};

use crate::{
    dto::{
        products::{CreateProductRequest, UpdateProductRequest},
        wishlists::DeletedProducts,
    },
    entity::{
        Products, now,
        products::{self, ActiveModel, Model as ProductModel},
    },
    error::{AppError, AppResult},
    models::{Availability, InCartStatus, Product},
    response::{ApiResponse, Empty, Meta},
    services::wishlist_service::lock_wishlist,
    state::AppState,
};

pub async fn add_product(
    state: &AppState,
    wishlist_id: i32,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let model = state
        .orm
        .transaction::<_, ProductModel, AppError>(move |txn| {
            Box::pin(async move {
                lock_wishlist(txn, wishlist_id).await?;
                let timestamp = now();
                let active = ActiveModel {
                    id: NotSet,
                    wishlist_id: Set(wishlist_id),
                    inventory_product_id: Set(payload.inventory_product_id),
                    name: Set(payload.name),
                    price: Set(payload.price),
                    status: Set(payload.status.unwrap_or(Availability::Available).code()),
                    pic_url: Set(payload.pic_url),
                    short_desc: Set(payload.short_desc),
                    in_cart_status: Set(InCartStatus::Default.code()),
                    created_at: Set(timestamp),
                    updated_at: Set(timestamp),
                };
                Ok(active.insert(txn).await?)
            })
        })
        .await?;

    tracing::info!(wishlist_id, product_id = model.id, "product added");
    Ok(ApiResponse::success(
        "Product created",
        Product::try_from(model)?,
        Some(Meta::empty()),
    ))
}

pub async fn get_product(
    state: &AppState,
    wishlist_id: i32,
    product_id: i32,
) -> AppResult<ApiResponse<Product>> {
    let model = find_scoped(&state.orm, wishlist_id, product_id).await?;
    tracing::debug!(wishlist_id, product_id, "product loaded");
    Ok(ApiResponse::success("Product", Product::try_from(model)?, None))
}

/// Fail with `NotFound` unless the product exists in the wishlist.
pub async fn require_product(state: &AppState, wishlist_id: i32, product_id: i32) -> AppResult<()> {
    find_scoped(&state.orm, wishlist_id, product_id).await.map(|_| ())
}

/// Look a product up by its id alone, whatever wishlist holds it.
pub async fn get_product_by_id(state: &AppState, product_id: i32) -> AppResult<ApiResponse<Product>> {
    let model = Products::find_by_id(product_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product with id {product_id} was not found")))?;
    Ok(ApiResponse::success("Product", Product::try_from(model)?, None))
}

/// Partial update. `status` is always rewritten: the supplied value, or the
/// current one when absent.
pub async fn update_product(
    state: &AppState,
    wishlist_id: i32,
    product_id: i32,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let model = state
        .orm
        .transaction::<_, ProductModel, AppError>(move |txn| {
            Box::pin(async move {
                lock_wishlist(txn, wishlist_id).await?;
                let existing = find_scoped(txn, wishlist_id, product_id).await?;
                let current_status = Availability::from_code(existing.status.into())
                    .unwrap_or(Availability::Available);

                let mut active: ActiveModel = existing.into();
                if let Some(name) = payload.name {
                    active.name = Set(name);
                }
                if let Some(price) = payload.price {
                    active.price = Set(price);
                }
                if let Some(inventory_product_id) = payload.inventory_product_id {
                    active.inventory_product_id = Set(inventory_product_id);
                }
                if let Some(pic_url) = payload.pic_url {
                    active.pic_url = Set(pic_url);
                }
                if let Some(short_desc) = payload.short_desc {
                    active.short_desc = Set(short_desc);
                }
                active.status = Set(payload.status.unwrap_or(current_status).code());
                active.updated_at = Set(now());

                Ok(active.update(txn).await?)
            })
        })
        .await?;

    tracing::info!(wishlist_id, product_id, "product updated");
    Ok(ApiResponse::success(
        "Updated",
        Product::try_from(model)?,
        Some(Meta::empty()),
    ))
}

pub async fn delete_product(
    state: &AppState,
    wishlist_id: i32,
    product_id: i32,
) -> AppResult<ApiResponse<Empty>> {
    state
        .orm
        .transaction::<_, (), AppError>(move |txn| {
            Box::pin(async move {
                lock_wishlist(txn, wishlist_id).await?;
                let result = Products::delete_many()
                    .filter(products::Column::Id.eq(product_id))
                    .filter(products::Column::WishlistId.eq(wishlist_id))
                    .exec(txn)
                    .await?;
                if result.rows_affected == 0 {
                    return Err(AppError::product_not_found(wishlist_id, product_id));
                }
                Ok(())
            })
        })
        .await?;

    tracing::info!(wishlist_id, product_id, "product deleted");
    Ok(ApiResponse::success(
        "Deleted",
        Empty::default(),
        Some(Meta::empty()),
    ))
}

/// Delete a product by its id alone. The owning wishlist is resolved first
/// so the delete still runs under that wishlist's lock.
pub async fn delete_product_by_id(
    state: &AppState,
    product_id: i32,
) -> AppResult<ApiResponse<Empty>> {
    let owner = Products::find_by_id(product_id)
        .one(&state.orm)
        .await?
        .map(|p| p.wishlist_id)
        .ok_or_else(|| AppError::NotFound(format!("Product with id {product_id} was not found")))?;

    delete_product(state, owner, product_id)
        .await
        .map_err(|err| match err {
            AppError::NotFound(_) => {
                AppError::NotFound(format!("Product with id {product_id} was not found"))
            }
            other => other,
        })
}

/// Remove every product from a wishlist, keeping the wishlist itself.
pub async fn clear_products(
    state: &AppState,
    wishlist_id: i32,
) -> AppResult<ApiResponse<DeletedProducts>> {
    let deleted = state
        .orm
        .transaction::<_, u64, AppError>(move |txn| {
            Box::pin(async move {
                lock_wishlist(txn, wishlist_id).await?;
                let result = Products::delete_many()
                    .filter(products::Column::WishlistId.eq(wishlist_id))
                    .exec(txn)
                    .await?;
                Ok(result.rows_affected)
            })
        })
        .await?;

    tracing::info!(wishlist_id, deleted, "wishlist products cleared");
    Ok(ApiResponse::success(
        "Products deleted",
        DeletedProducts { deleted },
        Some(Meta::empty()),
    ))
}

/// Move a product into the cart. Repeating the call is a no-op.
pub async fn add_to_cart(
    state: &AppState,
    wishlist_id: i32,
    product_id: i32,
) -> AppResult<ApiResponse<Product>> {
    let model = state
        .orm
        .transaction::<_, ProductModel, AppError>(move |txn| {
            Box::pin(async move {
                lock_wishlist(txn, wishlist_id).await?;
                let existing = find_scoped(txn, wishlist_id, product_id).await?;
                if existing.in_cart_status == InCartStatus::InCart.code() {
                    return Ok(existing);
                }

                let mut active: ActiveModel = existing.into();
                active.in_cart_status = Set(InCartStatus::InCart.code());
                active.updated_at = Set(now());
                Ok(active.update(txn).await?)
            })
        })
        .await?;

    tracing::info!(wishlist_id, product_id, "product placed in cart");
    Ok(ApiResponse::success(
        "Product placed in cart",
        Product::try_from(model)?,
        Some(Meta::empty()),
    ))
}

async fn find_scoped<C: ConnectionTrait>(
    db: &C,
    wishlist_id: i32,
    product_id: i32,
) -> AppResult<ProductModel> {
    Products::find_by_id(product_id)
        .filter(products::Column::WishlistId.eq(wishlist_id))
        .one(db)
        .await?
        .ok_or_else(|| AppError::product_not_found(wishlist_id, product_id))
}
