//! End-to-end storefront flows: catalog pages, the session cart, and the
//! redirect-after-POST behavior, driven over real HTTP.

use reqwest::StatusCode;

use minimart_integration_tests::{TestContext, new_client};

/// Location header as a string, for redirect assertions.
fn location(resp: &reqwest::Response) -> &str {
    resp.headers()
        .get("location")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

#[tokio::test]
async fn test_health_endpoints() {
    let ctx = TestContext::spawn().await;

    let resp = ctx
        .client
        .get(ctx.url("/health"))
        .send()
        .await
        .expect("Failed to get /health");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.expect("body"), "ok");

    let resp = ctx
        .client
        .get(ctx.url("/health/ready"))
        .send()
        .await
        .expect("Failed to get /health/ready");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_empty_catalog_page() {
    let ctx = TestContext::spawn().await;

    let resp = ctx
        .client
        .get(ctx.url("/"))
        .send()
        .await
        .expect("Failed to get catalog");
    assert_eq!(resp.status(), StatusCode::OK);

    let body = resp.text().await.expect("body");
    assert!(body.contains("Nothing in the catalog yet"));
}

#[tokio::test]
async fn test_product_detail_and_404() {
    let ctx = TestContext::spawn().await;
    ctx.create_product("Espresso Cup", "19.99").await;

    let resp = ctx
        .client
        .get(ctx.url("/product/1"))
        .send()
        .await
        .expect("Failed to get detail page");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("body");
    assert!(body.contains("Espresso Cup"));
    assert!(body.contains("$19.99"));

    // Unknown numeric id and non-numeric id both 404
    for path in ["/product/999", "/product/espresso"] {
        let resp = ctx
            .client
            .get(ctx.url(path))
            .send()
            .await
            .expect("Failed to get missing product");
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{path}");
    }
}

#[tokio::test]
async fn test_add_to_cart_merges_quantities() {
    let ctx = TestContext::spawn().await;
    ctx.create_product("Espresso Cup", "19.99").await;

    // Add 3 from the detail page; the redirect goes back to the referrer
    let resp = ctx
        .client
        .post(ctx.url("/add-to-cart/1"))
        .header("Referer", ctx.url("/product/1"))
        .form(&[("quantity", "3")])
        .send()
        .await
        .expect("Failed to add to cart");
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/product/1");

    // Add 2 more without a referrer; falls back to the catalog
    let resp = ctx
        .client
        .post(ctx.url("/add-to-cart/1"))
        .form(&[("quantity", "2")])
        .send()
        .await
        .expect("Failed to add to cart");
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");

    // Quantities merged, not overwritten: 3 + 2 = 5
    let body = ctx
        .client
        .get(ctx.url("/cart"))
        .send()
        .await
        .expect("Failed to get cart")
        .text()
        .await
        .expect("body");
    assert!(body.contains("Espresso Cup"));
    assert!(body.contains("value=\"5\""));
    // 5 x $19.99, line subtotal and grand total alike
    assert!(body.contains("$99.95"));
}

#[tokio::test]
async fn test_add_to_cart_defaults_malformed_quantity_to_one() {
    let ctx = TestContext::spawn().await;
    ctx.create_product("Espresso Cup", "19.99").await;

    let resp = ctx
        .client
        .post(ctx.url("/add-to-cart/1"))
        .form(&[("quantity", "lots")])
        .send()
        .await
        .expect("Failed to add to cart");
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let body = ctx
        .client
        .get(ctx.url("/cart"))
        .send()
        .await
        .expect("Failed to get cart")
        .text()
        .await
        .expect("body");
    assert!(body.contains("value=\"1\""));
}

#[tokio::test]
async fn test_update_cart_overwrites_and_removes() {
    let ctx = TestContext::spawn().await;
    ctx.create_product("Fancy Lamp", "100.00").await;

    ctx.client
        .post(ctx.url("/add-to-cart/1"))
        .form(&[("quantity", "1")])
        .send()
        .await
        .expect("Failed to add to cart");

    // Overwrite to 2: total is 2 x $100.00
    let resp = ctx
        .client
        .post(ctx.url("/update-cart"))
        .form(&[("qty_1", "2")])
        .send()
        .await
        .expect("Failed to update cart");
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/cart");

    let body = ctx
        .client
        .get(ctx.url("/cart"))
        .send()
        .await
        .expect("Failed to get cart")
        .text()
        .await
        .expect("body");
    assert!(body.contains("value=\"2\""));
    assert!(body.contains("$200.00"));

    // Zero removes the line entirely
    ctx.client
        .post(ctx.url("/update-cart"))
        .form(&[("qty_1", "0")])
        .send()
        .await
        .expect("Failed to update cart");

    let body = ctx
        .client
        .get(ctx.url("/cart"))
        .send()
        .await
        .expect("Failed to get cart")
        .text()
        .await
        .expect("body");
    assert!(body.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_cart_drops_lines_that_no_longer_resolve() {
    let ctx = TestContext::spawn().await;
    ctx.create_product("Espresso Cup", "19.99").await;

    // Id 999 does not exist; adding succeeds (session-only) but the line
    // cannot be priced and is dropped at render time
    ctx.client
        .post(ctx.url("/add-to-cart/999"))
        .form(&[("quantity", "1")])
        .send()
        .await
        .expect("Failed to add to cart");
    ctx.client
        .post(ctx.url("/add-to-cart/1"))
        .form(&[("quantity", "1")])
        .send()
        .await
        .expect("Failed to add to cart");

    let body = ctx
        .client
        .get(ctx.url("/cart"))
        .send()
        .await
        .expect("Failed to get cart")
        .text()
        .await
        .expect("body");
    assert!(body.contains("Espresso Cup"));
    assert!(!body.contains("qty_999"));
    // Only the resolvable line counts toward the total
    assert!(body.contains("$19.99"));
}

#[tokio::test]
async fn test_carts_are_per_session() {
    let ctx = TestContext::spawn().await;
    ctx.create_product("Espresso Cup", "19.99").await;

    ctx.client
        .post(ctx.url("/add-to-cart/1"))
        .form(&[("quantity", "2")])
        .send()
        .await
        .expect("Failed to add to cart");

    // A different visitor (fresh cookie jar) sees an empty cart
    let other = new_client();
    let body = other
        .get(ctx.url("/cart"))
        .send()
        .await
        .expect("Failed to get cart")
        .text()
        .await
        .expect("body");
    assert!(body.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_flash_message_shows_once() {
    let ctx = TestContext::spawn().await;
    ctx.create_product("Espresso Cup", "19.99").await;

    ctx.client
        .post(ctx.url("/add-to-cart/1"))
        .form(&[("quantity", "1")])
        .send()
        .await
        .expect("Failed to add to cart");

    let body = ctx
        .client
        .get(ctx.url("/cart"))
        .send()
        .await
        .expect("Failed to get cart")
        .text()
        .await
        .expect("body");
    assert!(body.contains("Added to cart."));

    // Consumed on first render
    let body = ctx
        .client
        .get(ctx.url("/cart"))
        .send()
        .await
        .expect("Failed to get cart")
        .text()
        .await
        .expect("body");
    assert!(!body.contains("Added to cart."));
}

#[tokio::test]
async fn test_static_assets_are_served() {
    let ctx = TestContext::spawn().await;

    let resp = ctx
        .client
        .get(ctx.url("/static/css/main.css"))
        .send()
        .await
        .expect("Failed to get stylesheet");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = ctx
        .client
        .get(ctx.url("/static/img/placeholder.svg"))
        .send()
        .await
        .expect("Failed to get placeholder image");
    assert_eq!(resp.status(), StatusCode::OK);
}
