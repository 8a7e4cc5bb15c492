//! Field-presence and type checks applied to request input before it reaches
//! the services.
//!
//! Bodies are taken as loose JSON so that every problem can be reported with
//! a field-specific message. Integer fields accept JSON integers or strings of
//! digits; `price` accepts numbers or numeric strings; `status` accepts the
//! codes `1`/`0` or the names `AVAILABLE`/`UNAVAILABLE`.

use serde_json::{Map, Value};

use crate::{
    dto::{
        products::{CreateProductRequest, UpdateProductRequest},
        wishlists::{CreateWishlistRequest, RenameWishlistRequest},
    },
    error::{AppError, AppResult},
    models::Availability,
};

pub const MAX_NAME_LENGTH: usize = 64;

fn invalid(message: impl Into<String>) -> AppError {
    let message = message.into();
    tracing::warn!(%message, "validation failed");
    AppError::Validation(message)
}

fn wrong_type(field: &str, expected: &str) -> AppError {
    invalid(format!("Invalid type for field {field}, {expected} expected"))
}

/// Parse an id taken from the request path. Only plain digits are accepted.
pub fn path_id(raw: &str, field: &str) -> AppResult<i32> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(format!("Integer value expected for field: {field}")));
    }
    raw.parse::<i32>()
        .map_err(|_| invalid(format!("Integer value expected for field: {field}")))
}

/// Parse the optional `user_id` list filter. An empty value means no filter.
pub fn user_filter(raw: Option<&str>) -> AppResult<Option<i32>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse::<i32>()
            .map(Some)
            .map_err(|_| invalid("Integer value expected for query parameter: user_id")),
    }
}

pub fn new_wishlist(body: &Value) -> AppResult<CreateWishlistRequest> {
    let fields = object(body)?;
    let name = name_value(required(fields, "name", "wishlist")?)?;
    let user_id = integer_value(required(fields, "user_id", "wishlist")?, "user_id")?;
    Ok(CreateWishlistRequest { name, user_id })
}

pub fn rename_wishlist(body: &Value) -> AppResult<RenameWishlistRequest> {
    let fields = object(body)?;
    let name = name_value(required(fields, "name", "wishlist")?)?;
    Ok(RenameWishlistRequest { name })
}

/// Validate a new product. A `wishlist_id` in the body is ignored; the path
/// decides which wishlist the product lands in.
pub fn new_product(body: &Value) -> AppResult<CreateProductRequest> {
    let fields = object(body)?;
    let name = name_value(required(fields, "name", "product")?)?;
    let price = price_value(required(fields, "price", "product")?)?;
    let inventory_product_id = integer_value(
        required(fields, "inventory_product_id", "product")?,
        "inventory_product_id",
    )?;
    let status = present(fields, "status").map(status_value).transpose()?;
    let pic_url = optional_text(fields, "pic_url")?.flatten();
    let short_desc = optional_text(fields, "short_desc")?.flatten();

    Ok(CreateProductRequest {
        name,
        price,
        inventory_product_id,
        status,
        pic_url,
        short_desc,
    })
}

/// Validate a partial product update. `null` on a required field counts as
/// absent; `null` on `pic_url`/`short_desc` clears it. `id`, `wishlist_id` and
/// `in_cart_status` are not updatable and are ignored.
pub fn product_changes(body: &Value) -> AppResult<UpdateProductRequest> {
    let fields = object(body)?;
    Ok(UpdateProductRequest {
        name: present(fields, "name").map(name_value).transpose()?,
        price: present(fields, "price").map(price_value).transpose()?,
        inventory_product_id: present(fields, "inventory_product_id")
            .map(|v| integer_value(v, "inventory_product_id"))
            .transpose()?,
        status: present(fields, "status").map(status_value).transpose()?,
        pic_url: optional_text(fields, "pic_url")?,
        short_desc: optional_text(fields, "short_desc")?,
    })
}

fn object(body: &Value) -> AppResult<&Map<String, Value>> {
    body.as_object()
        .ok_or_else(|| invalid("Expected a json request body"))
}

fn required<'a>(fields: &'a Map<String, Value>, key: &str, resource: &str) -> AppResult<&'a Value> {
    present(fields, key).ok_or_else(|| invalid(format!("Invalid {resource}: missing {key}")))
}

/// The value under `key` unless it is absent or `null`.
fn present<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    fields.get(key).filter(|v| !v.is_null())
}

/// `None` when absent, `Some(None)` for an explicit `null`.
fn optional_text(fields: &Map<String, Value>, key: &str) -> AppResult<Option<Option<String>>> {
    match fields.get(key) {
        None => Ok(None),
        Some(Value::Null) => Ok(Some(None)),
        Some(Value::String(s)) => Ok(Some(Some(s.clone()))),
        Some(_) => Err(wrong_type(key, "string")),
    }
}

fn name_value(value: &Value) -> AppResult<String> {
    let Value::String(raw) = value else {
        return Err(wrong_type("name", "string"));
    };
    let name = raw.trim();
    if name.is_empty() {
        return Err(invalid("Invalid value for field name, non-empty string expected"));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(invalid(format!(
            "Invalid value for field name, at most {MAX_NAME_LENGTH} characters allowed"
        )));
    }
    Ok(name.to_string())
}

fn integer_value(value: &Value, field: &str) -> AppResult<i32> {
    let parsed = match value {
        Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| wrong_type(field, "integer"))
}

fn price_value(value: &Value) -> AppResult<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|p| p.is_finite() && *p >= 0.0)
        .ok_or_else(|| wrong_type("price", "non-negative number"))
}

fn status_value(value: &Value) -> AppResult<Availability> {
    let parsed = match value {
        Value::Number(n) => n.as_i64().and_then(Availability::from_code),
        Value::String(s) => {
            let s = s.trim();
            Availability::from_name(s)
                .or_else(|| s.parse::<i64>().ok().and_then(Availability::from_code))
        }
        _ => None,
    };
    parsed.ok_or_else(|| wrong_type("status", "AVAILABLE/UNAVAILABLE or 1/0"))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn message(err: AppError) -> String {
        match err {
            AppError::Validation(msg) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn path_id_accepts_digits_only() {
        assert_eq!(path_id("42", "Wishlist ID").unwrap(), 42);
        for raw in ["", "-1", "4a", "1.5", " 3", "99999999999"] {
            let err = path_id(raw, "Wishlist ID").unwrap_err();
            assert_eq!(message(err), "Integer value expected for field: Wishlist ID");
        }
    }

    #[test]
    fn user_filter_parses_or_rejects() {
        assert_eq!(user_filter(None).unwrap(), None);
        assert_eq!(user_filter(Some("")).unwrap(), None);
        assert_eq!(user_filter(Some("7")).unwrap(), Some(7));
        assert!(user_filter(Some("seven")).is_err());
    }

    #[test]
    fn new_wishlist_coerces_user_id() {
        let req = new_wishlist(&json!({ "name": " Birthday ", "user_id": "7" })).unwrap();
        assert_eq!(req.name, "Birthday");
        assert_eq!(req.user_id, 7);
    }

    #[test]
    fn new_wishlist_reports_missing_and_mistyped_fields() {
        let err = new_wishlist(&json!({ "user_id": 1 })).unwrap_err();
        assert_eq!(message(err), "Invalid wishlist: missing name");

        let err = new_wishlist(&json!({ "name": "x" })).unwrap_err();
        assert_eq!(message(err), "Invalid wishlist: missing user_id");

        let err = new_wishlist(&json!({ "name": "x", "user_id": 1.5 })).unwrap_err();
        assert_eq!(message(err), "Invalid type for field user_id, integer expected");

        let err = new_wishlist(&json!({ "name": "   ", "user_id": 1 })).unwrap_err();
        assert!(message(err).contains("non-empty string"));

        let err = new_wishlist(&json!(["name"])).unwrap_err();
        assert_eq!(message(err), "Expected a json request body");
    }

    #[test]
    fn names_longer_than_limit_are_rejected() {
        let long = "a".repeat(MAX_NAME_LENGTH + 1);
        assert!(rename_wishlist(&json!({ "name": long })).is_err());
        let exact = "a".repeat(MAX_NAME_LENGTH);
        assert_eq!(rename_wishlist(&json!({ "name": exact.clone() })).unwrap().name, exact);
    }

    #[test]
    fn new_product_defaults_and_status_encodings() {
        let req = new_product(&json!({
            "name": "Mug",
            "price": 9.99,
            "inventory_product_id": 42,
            "wishlist_id": 999
        }))
        .unwrap();
        assert_eq!(req.status, None);
        assert_eq!(req.pic_url, None);
        assert_eq!(req.price, 9.99);

        for (raw, expected) in [
            (json!(1), Availability::Available),
            (json!(0), Availability::Unavailable),
            (json!("unavailable"), Availability::Unavailable),
            (json!("1"), Availability::Available),
        ] {
            let req = new_product(&json!({
                "name": "Mug", "price": 1, "inventory_product_id": 1, "status": raw
            }))
            .unwrap();
            assert_eq!(req.status, Some(expected));
        }

        let err = new_product(&json!({
            "name": "Mug", "price": 1, "inventory_product_id": 1, "status": 5
        }))
        .unwrap_err();
        assert!(message(err).starts_with("Invalid type for field status"));
    }

    #[test]
    fn new_product_rejects_bad_numbers() {
        let err = new_product(&json!({ "name": "Mug", "price": -1, "inventory_product_id": 1 }))
            .unwrap_err();
        assert_eq!(message(err), "Invalid type for field price, non-negative number expected");

        let err = new_product(&json!({ "name": "Mug", "price": "cheap", "inventory_product_id": 1 }))
            .unwrap_err();
        assert!(message(err).contains("price"));

        let err = new_product(&json!({ "name": "Mug", "price": 2, "inventory_product_id": "x" }))
            .unwrap_err();
        assert_eq!(message(err), "Invalid type for field inventory_product_id, integer expected");

        let err = new_product(&json!({ "name": "Mug", "inventory_product_id": 1 })).unwrap_err();
        assert_eq!(message(err), "Invalid product: missing price");
    }

    #[test]
    fn product_changes_only_carries_supplied_fields() {
        let changes = product_changes(&json!({ "price": "3.5", "pic_url": null })).unwrap();
        assert_eq!(changes.price, Some(3.5));
        assert_eq!(changes.name, None);
        assert_eq!(changes.status, None);
        assert_eq!(changes.pic_url, Some(None));
        assert_eq!(changes.short_desc, None);

        let err = product_changes(&json!({ "inventory_product_id": true })).unwrap_err();
        assert!(message(err).contains("inventory_product_id"));
    }
}
