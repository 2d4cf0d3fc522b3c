use serde_json::{json, Value};
use stockroom_server::{build_router, ApiConfig, AppState, Database};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

async fn spawn_app_with(api: ApiConfig) -> std::net::SocketAddr {
    let db = Database::in_memory().expect("open db");
    let app = build_router(AppState::with_config(db, api));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });
    addr
}

async fn spawn_app() -> std::net::SocketAddr {
    spawn_app_with(ApiConfig::default()).await
}

async fn send_raw(
    addr: std::net::SocketAddr,
    method: &str,
    path: &str,
    headers: &[(&str, &str)],
    body: Option<&str>,
) -> (u16, String, String) {
    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("connect server");
    let mut req = format!("{method} {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n");
    for (k, v) in headers {
        req.push_str(&format!("{k}: {v}\r\n"));
    }
    if let Some(body) = body {
        req.push_str(&format!(
            "Content-Type: application/json\r\nContent-Length: {}\r\n",
            body.len()
        ));
    }
    req.push_str("\r\n");
    if let Some(body) = body {
        req.push_str(body);
    }
    stream
        .write_all(req.as_bytes())
        .await
        .expect("write request");
    let mut response = String::new();
    stream
        .read_to_string(&mut response)
        .await
        .expect("read response");
    let (head, body) = response
        .split_once("\r\n\r\n")
        .expect("http response must have separator");
    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse::<u16>().ok())
        .expect("http status");
    (status, head.to_string(), body.to_string())
}

async fn send_json(
    addr: std::net::SocketAddr,
    method: &str,
    path: &str,
    body: Option<Value>,
) -> (u16, Value) {
    let raw = body.map(|b| b.to_string());
    let (status, _, text) = send_raw(addr, method, path, &[], raw.as_deref()).await;
    let parsed = if text.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&text).expect("json body")
    };
    (status, parsed)
}

#[tokio::test]
async fn category_lifecycle_scenario() {
    let addr = spawn_app().await;

    let (status, created) = send_json(
        addr,
        "POST",
        "/api/categories",
        Some(json!({"name": "Snacks"})),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(created["id"], json!(1));

    let (status, err) = send_json(
        addr,
        "POST",
        "/api/categories",
        Some(json!({"name": "Snacks"})),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(err["code"], json!("NameConflict"));
    assert_eq!(err["error"], json!("category name already exists"));
    let (_, categories) = send_json(addr, "GET", "/api/categories", None).await;
    assert_eq!(categories.as_array().map(Vec::len), Some(1));

    let (status, product) = send_json(
        addr,
        "POST",
        "/api/products",
        Some(json!({"name": "Chips", "price": "2.50", "stock": "10", "categoryId": "1"})),
    )
    .await;
    assert_eq!(status, 201);
    assert_eq!(product["price"], json!(2.5));
    assert_eq!(product["stock"], json!(10));
    assert_eq!(product["category"]["name"], json!("Snacks"));
    let product_id = product["id"].as_i64().expect("product id");

    let (status, detail) = send_json(addr, "GET", "/api/categories/1", None).await;
    assert_eq!(status, 200);
    assert_eq!(detail["products"][0]["id"], json!(product_id));

    let (status, body) = send_json(addr, "DELETE", "/api/categories/1", None).await;
    assert_eq!(status, 200);
    assert!(body["message"].is_string());

    let (status, product) =
        send_json(addr, "GET", &format!("/api/products/{product_id}"), None).await;
    assert_eq!(status, 200);
    assert_eq!(product["categoryId"], Value::Null);
    assert_eq!(product["category"], Value::Null);

    let (status, rows) = send_json(addr, "GET", "/api/products?category=none", None).await;
    assert_eq!(status, 200);
    let ids: Vec<i64> = rows
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|r| r["id"].as_i64())
        .collect();
    assert!(ids.contains(&product_id));
}

#[tokio::test]
async fn list_filters_and_shortcuts() {
    let addr = spawn_app().await;
    for (name, price, stock) in [("a", 5.0, 0), ("b", 150.0, 3), ("c", 120.0, 0), ("d", 50.0, 9)] {
        let (status, _) = send_json(
            addr,
            "POST",
            "/api/products",
            Some(json!({"name": name, "price": price, "stock": stock})),
        )
        .await;
        assert_eq!(status, 201);
    }

    let (_, rows) = send_json(addr, "GET", "/api/products?inStock=true", None).await;
    assert!(rows
        .as_array()
        .expect("array")
        .iter()
        .all(|r| r["stock"].as_i64().unwrap_or(0) > 0));

    let (_, rows) = send_json(addr, "GET", "/api/products?minPrice=10&maxPrice=120", None).await;
    let names: Vec<&str> = rows
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|r| r["name"].as_str())
        .collect();
    assert_eq!(names, vec!["c", "d"]);

    let (_, rows) = send_json(addr, "GET", "/api/products?inStock=&minPrice=", None).await;
    assert_eq!(rows.as_array().map(Vec::len), Some(4));

    let (_, rows) = send_json(addr, "GET", "/api/products/out-of-stock", None).await;
    assert_eq!(rows.as_array().map(Vec::len), Some(2));

    let (_, rows) = send_json(addr, "GET", "/api/products/expensive", None).await;
    let names: Vec<&str> = rows
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|r| r["name"].as_str())
        .collect();
    assert_eq!(names, vec!["b", "c"]);

    for bad in [
        "/api/products?category=abc",
        "/api/products?minPrice=x",
        "/api/products?inStock=maybe",
    ] {
        let (status, err) = send_json(addr, "GET", bad, None).await;
        assert_eq!(status, 400, "{bad}");
        assert_eq!(err["code"], json!("InvalidQueryParameter"));
    }
}

#[tokio::test]
async fn product_validation_and_not_found() {
    let addr = spawn_app().await;

    let (status, err) = send_json(addr, "POST", "/api/products", Some(json!({"price": 3}))).await;
    assert_eq!(status, 400);
    assert_eq!(err["code"], json!("ValidationFailed"));

    let (status, _) = send_json(
        addr,
        "POST",
        "/api/products",
        Some(json!({"name": "x", "price": "abc"})),
    )
    .await;
    assert_eq!(status, 400);

    let (status, _, body) = send_raw(addr, "POST", "/api/products", &[], Some("{not json")).await;
    assert_eq!(status, 400);
    let err: Value = serde_json::from_str(&body).expect("json error body");
    assert_eq!(err["code"], json!("InvalidBody"));

    let (status, err) = send_json(addr, "GET", "/api/products/99", None).await;
    assert_eq!(status, 404);
    assert_eq!(err["code"], json!("ProductNotFound"));

    let (status, err) = send_json(addr, "GET", "/api/products/abc", None).await;
    assert_eq!(status, 400);
    assert_eq!(err["code"], json!("InvalidPathParameter"));

    let (status, _) = send_json(
        addr,
        "PUT",
        "/api/products/99",
        Some(json!({"stock": 1})),
    )
    .await;
    assert_eq!(status, 404);

    let (status, _) = send_json(addr, "DELETE", "/api/products/99", None).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn blank_update_is_rejected_and_row_untouched() {
    let addr = spawn_app().await;
    let (_, product) = send_json(
        addr,
        "POST",
        "/api/products",
        Some(json!({"name": "Chips", "price": 2})),
    )
    .await;
    let path = format!("/api/products/{}", product["id"]);

    let (status, err) = send_json(
        addr,
        "PUT",
        &path,
        Some(json!({"name": "   ", "description": ""})),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(err["error"], json!("no valid fields provided for update"));

    let (_, after) = send_json(addr, "GET", &path, None).await;
    assert_eq!(after["name"], json!("Chips"));
    assert_eq!(after["updatedAt"], product["updatedAt"]);

    let (status, updated) = send_json(addr, "PUT", &path, Some(json!({"stock": "7"}))).await;
    assert_eq!(status, 200);
    assert_eq!(updated["stock"], json!(7));
}

#[tokio::test]
async fn bulk_delete_reports_only_existing_rows() {
    let addr = spawn_app().await;
    for name in ["a", "b", "c"] {
        send_json(addr, "POST", "/api/products", Some(json!({"name": name}))).await;
    }
    let (status, body) = send_json(
        addr,
        "POST",
        "/api/products/bulk-delete",
        Some(json!({"productIds": [1, "2", 999]})),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["deletedCount"], json!(2));

    let (status, _) = send_json(
        addr,
        "POST",
        "/api/products/bulk-delete",
        Some(json!({"productIds": []})),
    )
    .await;
    assert_eq!(status, 400);

    let (_, rows) = send_json(addr, "GET", "/api/products", None).await;
    assert_eq!(rows.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn delete_product_returns_no_content() {
    let addr = spawn_app().await;
    let (_, product) = send_json(addr, "POST", "/api/products", Some(json!({"name": "x"}))).await;
    let path = format!("/api/products/{}", product["id"]);
    let (status, _, body) = send_raw(addr, "DELETE", &path, &[], None).await;
    assert_eq!(status, 204);
    assert!(body.is_empty());
    let (status, _) = send_json(addr, "GET", &path, None).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn reset_empties_everything_and_restarts_numbering() {
    let addr = spawn_app().await;
    send_json(addr, "POST", "/api/categories", Some(json!({"name": "A"}))).await;
    send_json(addr, "POST", "/api/categories", Some(json!({"name": "B"}))).await;
    send_json(
        addr,
        "POST",
        "/api/products",
        Some(json!({"name": "x", "categoryId": 2})),
    )
    .await;

    let (status, body) = send_json(addr, "POST", "/api/categories/reset", None).await;
    assert_eq!(status, 200);
    assert!(body["message"].is_string());

    let (_, products) = send_json(addr, "GET", "/api/products", None).await;
    assert_eq!(products, json!([]));
    let (_, categories) = send_json(addr, "GET", "/api/categories", None).await;
    assert_eq!(categories, json!([]));

    let (_, created) = send_json(addr, "POST", "/api/categories", Some(json!({"name": "C"}))).await;
    assert_eq!(created["id"], json!(1));
}

#[tokio::test]
async fn category_update_and_missing_rows() {
    let addr = spawn_app().await;
    send_json(addr, "POST", "/api/categories", Some(json!({"name": "A"}))).await;
    send_json(addr, "POST", "/api/categories", Some(json!({"name": "B"}))).await;

    let (status, err) = send_json(addr, "PUT", "/api/categories/2", Some(json!({"name": "A"}))).await;
    assert_eq!(status, 400);
    assert_eq!(err["code"], json!("NameConflict"));

    let (status, updated) = send_json(
        addr,
        "PUT",
        "/api/categories/2",
        Some(json!({"description": "second"})),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(updated["name"], json!("B"));
    assert_eq!(updated["description"], json!("second"));

    let (status, _) = send_json(addr, "PUT", "/api/categories/2", Some(json!({}))).await;
    assert_eq!(status, 400);

    for method in ["GET", "DELETE"] {
        let (status, err) = send_json(addr, method, "/api/categories/42", None).await;
        assert_eq!(status, 404);
        assert_eq!(err["code"], json!("CategoryNotFound"));
    }
    let (status, _) = send_json(addr, "PUT", "/api/categories/42", Some(json!({"name": "Z"}))).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn unknown_category_reference_is_an_internal_error() {
    let addr = spawn_app().await;
    let (status, err) = send_json(
        addr,
        "POST",
        "/api/products",
        Some(json!({"name": "orphan", "categoryId": 77})),
    )
    .await;
    assert_eq!(status, 500);
    assert_eq!(err["error"], json!("error creating product"));
    assert_eq!(err["code"], json!("Internal"));
}

#[tokio::test]
async fn request_id_is_echoed_or_generated() {
    let addr = spawn_app().await;
    let (status, head, _) = send_raw(addr, "GET", "/healthz", &[("x-request-id", "req-fixed")], None).await;
    assert_eq!(status, 200);
    assert!(head.to_ascii_lowercase().contains("x-request-id: req-fixed"));

    let (_, head, _) = send_raw(addr, "GET", "/healthz", &[], None).await;
    assert!(head.to_ascii_lowercase().contains("x-request-id: req-"));
}

#[tokio::test]
async fn cors_preflight_and_origin_policy() {
    let addr = spawn_app().await;
    let (status, head, _) = send_raw(
        addr,
        "OPTIONS",
        "/api/products",
        &[("Origin", "http://localhost:5173")],
        None,
    )
    .await;
    assert_eq!(status, 204);
    let head = head.to_ascii_lowercase();
    assert!(head.contains("access-control-allow-origin: *"));
    assert!(head.contains("access-control-allow-methods"));

    let restricted = spawn_app_with(ApiConfig {
        cors_allowed_origins: vec!["https://shop.example".to_string()],
        ..ApiConfig::default()
    })
    .await;
    let (_, head, _) = send_raw(
        restricted,
        "GET",
        "/api/products",
        &[("Origin", "https://shop.example")],
        None,
    )
    .await;
    assert!(head
        .to_ascii_lowercase()
        .contains("access-control-allow-origin: https://shop.example"));

    let (_, head, _) = send_raw(
        restricted,
        "GET",
        "/api/products",
        &[("Origin", "https://evil.example")],
        None,
    )
    .await;
    assert!(!head.to_ascii_lowercase().contains("access-control-allow-origin"));
}


#[tokio::test]
async fn undecodable_path_segments_get_a_json_error_body() {
    let addr = spawn_app().await;
    for path in [
        "/api/products/%FF",
        "/api/categories/%C3%28",
        "/api/products/category/%FF",
    ] {
        let (status, head, body) = send_raw(addr, "GET", path, &[], None).await;
        assert_eq!(status, 400, "{path}");
        assert!(
            head.to_ascii_lowercase()
                .contains("content-type: application/json"),
            "{path}: {head}"
        );
        let err: Value = serde_json::from_str(&body).expect("json error body");
        assert_eq!(err["code"], json!("InvalidPathParameter"), "{path}");
        assert!(err["error"].is_string());
    }

    let (status, _, body) = send_raw(addr, "DELETE", "/api/products/%FF", &[], None).await;
    assert_eq!(status, 400);
    let err: Value = serde_json::from_str(&body).expect("json error body");
    assert_eq!(err["details"]["parameter"], json!("id"));
}

#[tokio::test]
async fn products_by_category_route_filters_and_validates() {
    let addr = spawn_app().await;
    send_json(addr, "POST", "/api/categories", Some(json!({"name": "Snacks"}))).await;
    send_json(addr, "POST", "/api/categories", Some(json!({"name": "Drinks"}))).await;
    for (name, category) in [("Chips", 1), ("Soda", 2), ("Nuts", 1), ("Juice", 2)] {
        let (status, _) = send_json(
            addr,
            "POST",
            "/api/products",
            Some(json!({"name": name, "categoryId": category})),
        )
        .await;
        assert_eq!(status, 201);
    }

    let (status, rows) = send_json(addr, "GET", "/api/products/category/1", None).await;
    assert_eq!(status, 200);
    let rows = rows.as_array().expect("array").clone();
    let names: Vec<&str> = rows.iter().filter_map(|r| r["name"].as_str()).collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"Chips") && names.contains(&"Nuts"));
    assert!(rows.iter().all(|r| r["categoryId"] == json!(1)));

    let (status, rows) = send_json(addr, "GET", "/api/products/category/9", None).await;
    assert_eq!(status, 200);
    assert_eq!(rows, json!([]));

    let (status, err) = send_json(addr, "GET", "/api/products/category/abc", None).await;
    assert_eq!(status, 400);
    assert_eq!(err["code"], json!("InvalidPathParameter"));
    assert_eq!(err["details"]["parameter"], json!("categoryId"));
}

#[tokio::test]
async fn product_update_can_detach_from_category() {
    let addr = spawn_app().await;
    send_json(addr, "POST", "/api/categories", Some(json!({"name": "Snacks"}))).await;
    let (_, product) = send_json(
        addr,
        "POST",
        "/api/products",
        Some(json!({"name": "Chips", "categoryId": 1})),
    )
    .await;
    assert_eq!(product["categoryId"], json!(1));
    let path = format!("/api/products/{}", product["id"]);

    let (status, updated) = send_json(addr, "PUT", &path, Some(json!({"categoryId": "none"}))).await;
    assert_eq!(status, 200);
    assert_eq!(updated["categoryId"], Value::Null);
    assert_eq!(updated["category"], Value::Null);
    assert_eq!(updated["name"], json!("Chips"));

    let (_, rows) = send_json(addr, "GET", "/api/products/category/1", None).await;
    assert_eq!(rows, json!([]));
}

#[tokio::test]
async fn category_list_items_carry_no_products() {
    let addr = spawn_app().await;
    send_json(addr, "POST", "/api/categories", Some(json!({"name": "Snacks"}))).await;
    send_json(
        addr,
        "POST",
        "/api/products",
        Some(json!({"name": "Chips", "categoryId": 1})),
    )
    .await;

    let (status, categories) = send_json(addr, "GET", "/api/categories", None).await;
    assert_eq!(status, 200);
    assert_eq!(categories[0]["name"], json!("Snacks"));
    assert!(categories[0].get("products").is_none());

    let (_, detail) = send_json(addr, "GET", "/api/categories/1", None).await;
    assert_eq!(detail["products"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn file_backed_database_survives_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("stockroom.sqlite");
    let path = path.to_str().expect("utf8 path").to_string();

    let api = ApiConfig {
        database_path: path.clone(),
        ..ApiConfig::default()
    };
    let db = Database::open(&api.database_path).expect("open file db");
    let app = build_router(AppState::with_config(db, api.clone()));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    let server = tokio::spawn(async move { axum::serve(listener, app).await });

    let (status, _) = send_json(addr, "POST", "/api/categories", Some(json!({"name": "Snacks"}))).await;
    assert_eq!(status, 201);
    server.abort();
    let _ = server.await;

    let reopened = Database::open(&path).expect("reopen file db");
    let names: Vec<String> = reopened
        .call(|conn| {
            Ok(stockroom_store::list_categories(conn)?
                .into_iter()
                .map(|c| c.name)
                .collect())
        })
        .await
        .expect("list categories");
    assert_eq!(names, vec!["Snacks".to_string()]);
}
