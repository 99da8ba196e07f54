use anyhow::Result;
use httpmock::prelude::*;
use qkart::adapters::RecordingNotifier;
use qkart::core::{AddOptions, CartAction, NotificationLevel, Session};
use qkart::utils::error::BACKEND_UNREACHABLE;
use qkart::{HttpCommerceApi, Storefront, StorefrontError};
use serde_json::json;
use std::sync::Arc;

fn catalog_json() -> serde_json::Value {
    json!([
        {
            "name": "iPhone XR",
            "category": "Phones",
            "cost": 100,
            "rating": 4,
            "image": "https://i.imgur.com/lulqWzW.jpg",
            "_id": "v4sLtEcMpzabRyfx"
        },
        {
            "name": "Basketball",
            "category": "Sports",
            "cost": 100,
            "rating": 5,
            "image": "https://i.imgur.com/lulqWzW.jpg",
            "_id": "upLK9JbQ4rMhTwt4"
        }
    ])
}

fn storefront(
    server: &MockServer,
    session: Session,
) -> (Storefront<HttpCommerceApi, RecordingNotifier>, RecordingNotifier) {
    let notifier = RecordingNotifier::new();
    let api = Arc::new(HttpCommerceApi::new(server.url("/api/v1")));
    (Storefront::new(api, notifier.clone(), session), notifier)
}

const SEARCH_UNREACHABLE: &str =
    "Could not fetch products. Check that the backend is running, reachable and returns valid JSON.";
const CART_UNREACHABLE: &str =
    "Could not fetch cart details. Check that the backend is running, reachable and returns valid JSON.";

fn logged_in() -> Session {
    Session::authenticated("tok-123", "crio.do", 5000.0)
}

/// 頁面載入：商品與購物車合併，購物車中已下架的商品會被略過
#[tokio::test]
async fn test_load_merges_cart_and_drops_dangling_entries() -> Result<()> {
    let server = MockServer::start();

    let products_mock = server.mock(|when, then| {
        when.method(GET).path("/api/v1/products");
        then.status(200).json_body(catalog_json());
    });
    let cart_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/cart")
            .header("authorization", "Bearer tok-123");
        then.status(200).json_body(json!([
            { "productId": "upLK9JbQ4rMhTwt4", "qty": 3 },
            { "productId": "KCRwjF7lN97HnEaY", "qty": 1 },
            { "productId": "v4sLtEcMpzabRyfx", "qty": 1 }
        ]));
    });

    let (mut store, notifier) = storefront(&server, logged_in());
    store.load().await;

    products_mock.assert();
    cart_mock.assert();

    let ids: Vec<&str> = store.line_items().iter().map(|i| i.product.id.as_str()).collect();
    assert_eq!(ids, vec!["upLK9JbQ4rMhTwt4", "v4sLtEcMpzabRyfx"]);
    assert_eq!(store.line_items()[0].quantity, 3);
    assert_eq!(store.summary().total_value, 400.0);
    assert_eq!(store.cart_action("v4sLtEcMpzabRyfx"), CartAction::GoToCart);
    assert!(notifier.notifications().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_anonymous_load_never_requests_cart() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/api/v1/products");
        then.status(200).json_body(catalog_json());
    });
    let cart_mock = server.mock(|when, then| {
        when.method(GET).path("/api/v1/cart");
        then.status(200).json_body(json!([]));
    });

    let (mut store, _) = storefront(&server, Session::anonymous());
    store.load().await;

    cart_mock.assert_hits(0);
    assert_eq!(store.catalog().len(), 2);
    assert_eq!(store.cart_action("v4sLtEcMpzabRyfx"), CartAction::Add);

    Ok(())
}

#[tokio::test]
async fn test_catalog_server_error_resets_loading_and_notifies() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/api/v1/products");
        then.status(500).json_body(json!({
            "success": false,
            "message": "Something went wrong. Check the backend console for more details"
        }));
    });

    let (mut store, notifier) = storefront(&server, Session::anonymous());
    store.load().await;

    assert!(!store.is_loading());
    assert!(store.filtered_products().is_empty());
    assert_eq!(
        notifier.messages(),
        vec!["Something went wrong. Check the backend console for more details".to_string()]
    );

    Ok(())
}

/// 只有 500 會顯示後端訊息，其他 5xx 一律顯示通用錯誤
#[tokio::test]
async fn test_catalog_bad_gateway_shows_generic_message() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/api/v1/products");
        then.status(502).json_body(json!({ "success": false, "message": "Bad gateway upstream" }));
    });

    let (mut store, notifier) = storefront(&server, Session::anonymous());
    store.load().await;

    assert!(!store.is_loading());
    assert!(store.catalog().is_empty());
    assert_eq!(notifier.messages(), vec![BACKEND_UNREACHABLE.to_string()]);

    Ok(())
}

#[tokio::test]
async fn test_unreachable_backend_falls_back_to_generic_messages() -> Result<()> {
    let notifier = RecordingNotifier::new();
    let api = Arc::new(HttpCommerceApi::new("http://127.0.0.1:1/api/v1"));
    let mut store = Storefront::new(api, notifier.clone(), logged_in());

    store.load().await;

    assert!(!store.is_loading());
    assert!(store.catalog().is_empty());
    assert!(store.line_items().is_empty());
    assert_eq!(
        notifier.messages(),
        vec![BACKEND_UNREACHABLE.to_string(), CART_UNREACHABLE.to_string()]
    );

    store.search("iphone").await;
    assert!(store.filtered_products().is_empty());
    assert_eq!(notifier.messages()[2], SEARCH_UNREACHABLE);

    Ok(())
}

#[tokio::test]
async fn test_cart_server_error_shows_generic_message() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/api/v1/products");
        then.status(200).json_body(catalog_json());
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/cart");
        then.status(503).json_body(json!({ "success": false, "message": "Cart store offline" }));
    });

    let (mut store, notifier) = storefront(&server, logged_in());
    store.load().await;

    assert_eq!(store.catalog().len(), 2);
    assert!(store.line_items().is_empty());
    assert_eq!(notifier.messages(), vec![CART_UNREACHABLE.to_string()]);

    Ok(())
}

#[tokio::test]
async fn test_cart_bad_request_surfaces_server_message() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/api/v1/products");
        then.status(200).json_body(catalog_json());
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/cart");
        then.status(400).json_body(json!({ "success": false, "message": "Cart is corrupted" }));
    });

    let (mut store, notifier) = storefront(&server, logged_in());
    store.load().await;

    assert!(store.line_items().is_empty());
    assert_eq!(notifier.messages(), vec!["Cart is corrupted".to_string()]);

    Ok(())
}

#[tokio::test]
async fn test_search_outcomes() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/api/v1/products");
        then.status(200).json_body(catalog_json());
    });
    let hit_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/products/search")
            .query_param("value", "iphone");
        then.status(200).json_body(json!([catalog_json()[0]]));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/products/search")
            .query_param("value", "zzz");
        then.status(404).json_body(json!([]));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/products/search")
            .query_param("value", "boom");
        then.status(500).json_body(json!({ "success": false, "message": "Search is down" }));
    });

    let (mut store, notifier) = storefront(&server, Session::anonymous());
    store.load().await;

    store.search("iphone").await;
    hit_mock.assert();
    assert_eq!(store.filtered_products().len(), 1);
    assert_eq!(store.filtered_products()[0].name, "iPhone XR");

    store.search("zzz").await;
    assert!(store.filtered_products().is_empty());
    assert!(notifier.notifications().is_empty());

    store.search("boom").await;
    assert_eq!(store.filtered_products().len(), 2);
    assert_eq!(notifier.messages(), vec!["Search is down".to_string()]);

    Ok(())
}

/// 502 不會回復成完整商品列表，保留上一次的搜尋結果
#[tokio::test]
async fn test_search_bad_gateway_keeps_previous_results() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/api/v1/products");
        then.status(200).json_body(catalog_json());
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/products/search")
            .query_param("value", "iphone");
        then.status(200).json_body(json!([catalog_json()[0]]));
    });
    let gateway_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/products/search")
            .query_param("value", "iphone x");
        then.status(502).json_body(json!({ "success": false, "message": "Bad gateway upstream" }));
    });

    let (mut store, notifier) = storefront(&server, Session::anonymous());
    store.load().await;

    store.search("iphone").await;
    store.search("iphone x").await;
    gateway_mock.assert();

    assert_eq!(store.filtered_products().len(), 1);
    assert_eq!(store.filtered_products()[0].name, "iPhone XR");
    assert_eq!(notifier.messages(), vec![SEARCH_UNREACHABLE.to_string()]);

    Ok(())
}

#[tokio::test]
async fn test_add_to_cart_posts_once_and_refreshes_items() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/api/v1/products");
        then.status(200).json_body(catalog_json());
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/cart");
        then.status(200).json_body(json!([]));
    });
    let post_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/v1/cart")
            .header("authorization", "Bearer tok-123")
            .json_body(json!({ "productId": "upLK9JbQ4rMhTwt4", "qty": 1 }));
        then.status(200)
            .json_body(json!([{ "productId": "upLK9JbQ4rMhTwt4", "qty": 1 }]));
    });

    let (mut store, _) = storefront(&server, logged_in());
    store.load().await;
    assert!(store.line_items().is_empty());

    store.add_to_cart("upLK9JbQ4rMhTwt4", 1, AddOptions::add_new()).await?;

    post_mock.assert_hits(1);
    assert_eq!(store.line_items().len(), 1);
    assert_eq!(store.cart_action("upLK9JbQ4rMhTwt4"), CartAction::GoToCart);

    Ok(())
}

#[tokio::test]
async fn test_duplicate_add_makes_no_request_but_update_does() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/api/v1/products");
        then.status(200).json_body(catalog_json());
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/cart");
        then.status(200)
            .json_body(json!([{ "productId": "v4sLtEcMpzabRyfx", "qty": 1 }]));
    });
    let post_mock = server.mock(|when, then| {
        when.method(POST).path("/api/v1/cart");
        then.status(200)
            .json_body(json!([{ "productId": "v4sLtEcMpzabRyfx", "qty": 2 }]));
    });

    let (mut store, notifier) = storefront(&server, logged_in());
    store.load().await;

    let err = store
        .add_to_cart("v4sLtEcMpzabRyfx", 1, AddOptions::add_new())
        .await
        .unwrap_err();
    assert!(matches!(err, StorefrontError::DuplicateItem { .. }));
    post_mock.assert_hits(0);

    let warning = &notifier.notifications()[0];
    assert_eq!(warning.level, NotificationLevel::Warning);
    assert_eq!(
        warning.message,
        "Item already in cart. Use the cart sidebar to update quantity or remove item."
    );

    store
        .add_to_cart("v4sLtEcMpzabRyfx", 2, AddOptions::update_quantity())
        .await?;
    post_mock.assert_hits(1);
    assert_eq!(store.line_items()[0].quantity, 2);

    Ok(())
}

#[tokio::test]
async fn test_unauthenticated_add_makes_no_request() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/api/v1/products");
        then.status(200).json_body(catalog_json());
    });
    let post_mock = server.mock(|when, then| {
        when.method(POST).path("/api/v1/cart");
        then.status(200).json_body(json!([]));
    });

    let (mut store, notifier) = storefront(&server, Session::anonymous());
    store.load().await;

    for options in [AddOptions::add_new(), AddOptions::update_quantity()] {
        let err = store
            .add_to_cart("v4sLtEcMpzabRyfx", 1, options)
            .await
            .unwrap_err();
        assert!(matches!(err, StorefrontError::Unauthenticated));
    }

    post_mock.assert_hits(0);
    assert_eq!(notifier.messages()[0], "Please login to add to cart");

    Ok(())
}

#[tokio::test]
async fn test_failed_mutation_keeps_confirmed_cart() -> Result<()> {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/api/v1/products");
        then.status(200).json_body(catalog_json());
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/v1/cart");
        then.status(200)
            .json_body(json!([{ "productId": "v4sLtEcMpzabRyfx", "qty": 1 }]));
    });
    server.mock(|when, then| {
        when.method(POST).path("/api/v1/cart");
        then.status(404)
            .json_body(json!({ "success": false, "message": "Product doesn't exist" }));
    });

    let (mut store, notifier) = storefront(&server, logged_in());
    store.load().await;

    let err = store
        .add_to_cart("doesNotExist0000", 1, AddOptions::add_new())
        .await
        .unwrap_err();

    assert!(matches!(err, StorefrontError::MutationFailed { ref message } if message == "Product doesn't exist"));
    assert_eq!(store.line_items().len(), 1);
    assert_eq!(store.line_items()[0].product.id, "v4sLtEcMpzabRyfx");
    assert_eq!(notifier.notifications()[0].level, NotificationLevel::Error);

    Ok(())
}
