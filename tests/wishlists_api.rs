mod common;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use serde_json::json;
use tower::ServiceExt;

use common::{delete, get, post, put};

// The canonical walk-through: create, add product, read, delete, read again.
#[tokio::test]
async fn birthday_wishlist_round_trip() -> anyhow::Result<()> {
    let app = common::build_test_app().await?;

    let (status, body) = post(&app, "/wishlists", json!({ "name": "Birthday", "user_id": 7 })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["name"], "Birthday");
    assert_eq!(body["data"]["user_id"], 7);
    assert_eq!(body["data"]["products"], json!([]));

    let (status, body) = post(
        &app,
        "/wishlists/1/products",
        json!({ "name": "Mug", "price": 9.99, "inventory_product_id": 42, "status": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let product = &body["data"];
    assert_eq!(product["id"], 1);
    assert_eq!(product["wishlist_id"], 1);
    assert_eq!(product["inventory_product_id"], 42);
    assert_eq!(product["name"], "Mug");
    assert_eq!(product["price"], 9.99);
    assert_eq!(product["status"], "AVAILABLE");
    assert_eq!(product["in_cart_status"], "DEFAULT");

    let (status, body) = get(&app, "/wishlists/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["products"][0]["name"], "Mug");

    let (status, _) = delete(&app, "/wishlists/1").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get(&app, "/wishlists/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Wishlist with id 1 was not found");

    let (status, _) = delete(&app, "/wishlists/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn create_sets_location_header() -> anyhow::Result<()> {
    let app = common::build_test_app().await?;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/wishlists")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "name": "Books", "user_id": 2 }).to_string()))?;

    let response = app.oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.headers()[header::LOCATION], "/wishlists/1");
    Ok(())
}

#[tokio::test]
async fn validation_errors_are_400_with_message() -> anyhow::Result<()> {
    let app = common::build_test_app().await?;

    let (status, body) = post(&app, "/wishlists", json!({ "name": "x", "user_id": "abc" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid type for field user_id, integer expected");

    let (status, body) = post(&app, "/wishlists", json!({ "user_id": 1 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid wishlist: missing name");

    let (status, body) = get(&app, "/wishlists/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Integer value expected for field: Wishlist ID");

    let (status, _) = get(&app, "/wishlists/1/products/x").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get(&app, "/wishlists?user_id=seven").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    post(&app, "/wishlists", json!({ "name": "Home", "user_id": 1 })).await;
    let (status, body) = post(
        &app,
        "/wishlists/1/products",
        json!({ "name": "Mug", "price": "free", "inventory_product_id": 1 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("price"));

    let (status, _) = put(&app, "/wishlists/1", Some(json!({ "name": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn missing_resource_wins_over_bad_body() -> anyhow::Result<()> {
    let app = common::build_test_app().await?;

    let (status, body) = put(&app, "/wishlists/999", Some(json!({ "name": "" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Wishlist with id 999 was not found");

    post(&app, "/wishlists", json!({ "name": "Home", "user_id": 1 })).await;
    let (status, body) = put(&app, "/wishlists/1/products/5", Some(json!({ "price": "x" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["message"],
        "Product with id 5 was not found in wishlist with id 1"
    );

    // An existing product with the same body is still a validation error.
    post(
        &app,
        "/wishlists/1/products",
        json!({ "name": "Mug", "price": 9.99, "inventory_product_id": 42 }),
    )
    .await;
    let (status, _) = put(&app, "/wishlists/1/products/1", Some(json!({ "price": "x" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn malformed_and_untyped_bodies_are_rejected() -> anyhow::Result<()> {
    let app = common::build_test_app().await?;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/wishlists")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))?;
    let response = app.clone().oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/wishlists")
        .body(Body::from(r#"{"name":"x","user_id":1}"#))?;
    let response = app.oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

    Ok(())
}

#[tokio::test]
async fn list_filters_by_user_id() -> anyhow::Result<()> {
    let app = common::build_test_app().await?;
    post(&app, "/wishlists", json!({ "name": "A", "user_id": 1 })).await;
    post(&app, "/wishlists", json!({ "name": "B", "user_id": 2 })).await;
    post(&app, "/wishlists", json!({ "name": "C", "user_id": 1 })).await;

    let (status, body) = get(&app, "/wishlists").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
    assert_eq!(body["meta"]["total"], 3);

    let (_, body) = get(&app, "/wishlists?user_id=1").await;
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["A", "C"]);

    Ok(())
}

#[tokio::test]
async fn product_update_cart_and_delete_over_http() -> anyhow::Result<()> {
    let app = common::build_test_app().await?;
    post(&app, "/wishlists", json!({ "name": "Home", "user_id": 1 })).await;
    post(
        &app,
        "/wishlists/1/products",
        json!({
            "name": "Lamp",
            "price": 30,
            "inventory_product_id": 5,
            "pic_url": "www.lamp.com/1.png",
            "short_desc": "desk lamp",
            "wishlist_id": 77
        }),
    )
    .await;

    let (status, body) = put(
        &app,
        "/wishlists/1/products/1",
        Some(json!({ "price": 25.5, "status": "UNAVAILABLE", "in_cart_status": "IN_CART" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["wishlist_id"], 1);
    assert_eq!(body["data"]["price"], 25.5);
    assert_eq!(body["data"]["status"], "UNAVAILABLE");
    assert_eq!(body["data"]["in_cart_status"], "DEFAULT");
    assert_eq!(body["data"]["pic_url"], "www.lamp.com/1.png");

    let (status, _) = put(&app, "/wishlists/1/products/1", Some(json!({ "price": -2 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    for _ in 0..2 {
        let (status, body) = put(&app, "/wishlists/1/products/1/add-to-cart", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["in_cart_status"], "IN_CART");
    }

    let (status, _) = put(&app, "/wishlists/1/products/9/add-to-cart", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = get(&app, "/products/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Lamp");

    let (status, _) = delete(&app, "/wishlists/1/products/1").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = get(&app, "/wishlists/1/products/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = delete(&app, "/products/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn clear_products_over_http() -> anyhow::Result<()> {
    let app = common::build_test_app().await?;
    post(&app, "/wishlists", json!({ "name": "Home", "user_id": 1 })).await;
    for name in ["a", "b", "c"] {
        post(
            &app,
            "/wishlists/1/products",
            json!({ "name": name, "price": 1, "inventory_product_id": 1 }),
        )
        .await;
    }

    let (status, body) = delete(&app, "/wishlists/1/products").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["deleted"], 3);

    let (_, body) = get(&app, "/wishlists/1").await;
    assert_eq!(body["data"]["products"], json!([]));

    let (status, _) = delete(&app, "/wishlists/2/products").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    Ok(())
}
