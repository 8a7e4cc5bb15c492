use std::collections::{HashMap, HashSet};

use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait, sea_query::Expr,
};

use crate::{
    dto::wishlists::{CreateWishlistRequest, RenameWishlistRequest, WishlistList},
    entity::{
        Products, Wishlists, now,
        products::{self, Model as ProductModel},
        wishlists::{self, ActiveModel, Model as WishlistModel},
    },
    error::{AppError, AppResult},
    models::Wishlist,
    response::{ApiResponse, Empty, Meta},
    state::AppState,
    validation::MAX_NAME_LENGTH,
};

pub async fn list_wishlists(
    state: &AppState,
    user_id: Option<i32>,
) -> AppResult<ApiResponse<WishlistList>> {
    let mut finder = Wishlists::find().order_by_asc(wishlists::Column::Id);
    if let Some(user_id) = user_id {
        finder = finder.filter(wishlists::Column::UserId.eq(user_id));
    }
    let models = finder.all(&state.orm).await?;

    let ids: Vec<i32> = models.iter().map(|w| w.id).collect();
    let mut grouped = products_by_wishlist(&state.orm, ids).await?;

    let items = models
        .into_iter()
        .map(|model| {
            let products = grouped.remove(&model.id).unwrap_or_default();
            Wishlist::from_entity(model, products)
        })
        .collect::<AppResult<Vec<_>>>()?;

    let total = items.len() as u64;
    tracing::debug!(?user_id, total, "listed wishlists");
    let message = if items.is_empty() {
        "No wishlists found"
    } else {
        "Wishlists"
    };
    Ok(ApiResponse::success(
        message,
        WishlistList { items },
        Some(Meta::total(total)),
    ))
}

pub async fn get_wishlist(state: &AppState, wishlist_id: i32) -> AppResult<ApiResponse<Wishlist>> {
    let model = Wishlists::find_by_id(wishlist_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| AppError::wishlist_not_found(wishlist_id))?;
    let wishlist = with_products(&state.orm, model).await?;
    tracing::debug!(wishlist_id, products = wishlist.products.len(), "wishlist loaded");
    Ok(ApiResponse::success("Wishlist", wishlist, None))
}

/// Fail with `NotFound` unless the wishlist exists.
pub async fn require_wishlist(state: &AppState, wishlist_id: i32) -> AppResult<()> {
    Wishlists::find_by_id(wishlist_id)
        .one(&state.orm)
        .await?
        .map(|_| ())
        .ok_or_else(|| AppError::wishlist_not_found(wishlist_id))
}

pub async fn create_wishlist(
    state: &AppState,
    payload: CreateWishlistRequest,
) -> AppResult<ApiResponse<Wishlist>> {
    let timestamp = now();
    let active = ActiveModel {
        id: NotSet,
        name: Set(payload.name),
        user_id: Set(payload.user_id),
        created_at: Set(timestamp),
        updated_at: Set(timestamp),
    };
    let model = active.insert(&state.orm).await?;
    tracing::info!(wishlist_id = model.id, user_id = model.user_id, "wishlist created");

    Ok(ApiResponse::success(
        "Wishlist created",
        Wishlist::from_entity(model, Vec::new())?,
        Some(Meta::empty()),
    ))
}

/// Rename a wishlist. When another wishlist of the same user already has the
/// requested name, the first free `"{name} N"` is used instead.
pub async fn rename_wishlist(
    state: &AppState,
    wishlist_id: i32,
    payload: RenameWishlistRequest,
) -> AppResult<ApiResponse<Wishlist>> {
    let model = state
        .orm
        .transaction::<_, WishlistModel, AppError>(move |txn| {
            Box::pin(async move {
                let current = lock_wishlist(txn, wishlist_id).await?;
                let taken: HashSet<String> = Wishlists::find()
                    .filter(wishlists::Column::UserId.eq(current.user_id))
                    .filter(wishlists::Column::Id.ne(wishlist_id))
                    .all(txn)
                    .await?
                    .into_iter()
                    .map(|w| w.name)
                    .collect();

                let name = available_name(&payload.name, &taken);
                let mut active: ActiveModel = current.into();
                active.name = Set(name);
                Ok(active.update(txn).await?)
            })
        })
        .await?;

    tracing::info!(wishlist_id, name = %model.name, "wishlist renamed");
    let wishlist = with_products(&state.orm, model).await?;
    Ok(ApiResponse::success("Updated", wishlist, Some(Meta::empty())))
}

/// Delete a wishlist together with all of its products.
pub async fn delete_wishlist(
    state: &AppState,
    wishlist_id: i32,
) -> AppResult<ApiResponse<Empty>> {
    let removed_products = state
        .orm
        .transaction::<_, u64, AppError>(move |txn| {
            Box::pin(async move {
                lock_wishlist(txn, wishlist_id).await?;
                let removed = Products::delete_many()
                    .filter(products::Column::WishlistId.eq(wishlist_id))
                    .exec(txn)
                    .await?
                    .rows_affected;
                Wishlists::delete_by_id(wishlist_id).exec(txn).await?;
                Ok(removed)
            })
        })
        .await?;

    tracing::info!(wishlist_id, removed_products, "wishlist deleted");
    Ok(ApiResponse::success(
        "Deleted",
        Empty::default(),
        Some(Meta::empty()),
    ))
}

/// Take the per-wishlist write lock inside a transaction.
///
/// Touching `updated_at` row-locks the wishlist on Postgres (SQLite takes the
/// database write lock), so every mutation of one wishlist runs in a single
/// total order. Zero touched rows means the wishlist does not exist.
pub(crate) async fn lock_wishlist<C: ConnectionTrait>(
    db: &C,
    wishlist_id: i32,
) -> AppResult<WishlistModel> {
    let touched = Wishlists::update_many()
        .col_expr(wishlists::Column::UpdatedAt, Expr::value(now()))
        .filter(wishlists::Column::Id.eq(wishlist_id))
        .exec(db)
        .await?;
    if touched.rows_affected == 0 {
        return Err(AppError::wishlist_not_found(wishlist_id));
    }

    Wishlists::find_by_id(wishlist_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::wishlist_not_found(wishlist_id))
}

async fn with_products<C: ConnectionTrait>(db: &C, model: WishlistModel) -> AppResult<Wishlist> {
    let products = Products::find()
        .filter(products::Column::WishlistId.eq(model.id))
        .order_by_asc(products::Column::Id)
        .all(db)
        .await?;
    Wishlist::from_entity(model, products)
}

async fn products_by_wishlist<C: ConnectionTrait>(
    db: &C,
    wishlist_ids: Vec<i32>,
) -> AppResult<HashMap<i32, Vec<ProductModel>>> {
    let mut grouped: HashMap<i32, Vec<ProductModel>> = HashMap::new();
    if wishlist_ids.is_empty() {
        return Ok(grouped);
    }

    let rows = Products::find()
        .filter(products::Column::WishlistId.is_in(wishlist_ids))
        .order_by_asc(products::Column::Id)
        .all(db)
        .await?;
    for row in rows {
        grouped.entry(row.wishlist_id).or_default().push(row);
    }
    Ok(grouped)
}

/// The requested name, or the first `"{name} N"` not taken. The base is cut
/// short when needed so the result stays within `MAX_NAME_LENGTH` characters.
fn available_name(requested: &str, taken: &HashSet<String>) -> String {
    if !taken.contains(requested) {
        return requested.to_string();
    }
    (1..)
        .map(|n| {
            let suffix = format!(" {n}");
            let room = MAX_NAME_LENGTH.saturating_sub(suffix.len());
            let base: String = requested.chars().take(room).collect();
            format!("{}{suffix}", base.trim_end())
        })
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or_else(|| requested.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taken(names: &[&str]) -> HashSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn free_name_is_kept() {
        assert_eq!(available_name("Gifts", &taken(&["Books"])), "Gifts");
    }

    #[test]
    fn clashing_name_gets_first_free_suffix() {
        assert_eq!(available_name("Gifts", &taken(&["Gifts"])), "Gifts 1");
        assert_eq!(
            available_name("Gifts", &taken(&["Gifts", "Gifts 1", "Gifts 3"])),
            "Gifts 2"
        );
    }

    #[test]
    fn suffixed_name_stays_within_limit() {
        let full = "a".repeat(MAX_NAME_LENGTH);
        let renamed = available_name(&full, &taken(&[&full]));
        assert_eq!(renamed.chars().count(), MAX_NAME_LENGTH);
        assert_eq!(renamed, format!("{} 1", "a".repeat(MAX_NAME_LENGTH - 2)));

        let first = renamed.clone();
        let next = available_name(&full, &taken(&[&full, &first]));
        assert_eq!(next, format!("{} 2", "a".repeat(MAX_NAME_LENGTH - 2)));
    }
}
