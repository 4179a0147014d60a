//! End-to-end cart behavior over HTTP and file storage.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use rocketshoes_cache::Cache;
use rocketshoes_cart::{
    messages, storage_key, CartStore, CatalogApi, CollectingNotifier, HttpCatalog,
    UpdateProductAmount, STORAGE_NAMESPACE,
};
use rocketshoes_commerce::{Cart, ProductId, Stock};
use rocketshoes_data::FetchClient;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

type Routes = Arc<Mutex<HashMap<String, String>>>;

/// Serve fixed JSON bodies by path; unknown paths answer 404.
async fn serve(routes: &[(&str, &str)]) -> (String, Routes) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let routes: Routes = Arc::new(Mutex::new(
        routes
            .iter()
            .map(|(p, b)| (p.to_string(), b.to_string()))
            .collect(),
    ));

    let table = routes.clone();
    tokio::spawn(async move {
        loop {
            let (mut socket, _) = match listener.accept().await {
                Ok(conn) => conn,
                Err(_) => return,
            };

            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                match socket.read(&mut chunk).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => buf.extend_from_slice(&chunk[..n]),
                }
            }
            let request = String::from_utf8_lossy(&buf);
            let path = request.split_whitespace().nth(1).unwrap_or("/").to_string();

            let body = table.lock().unwrap().get(&path).cloned();
            let (status, body) = match body {
                Some(body) => (200, body),
                None => (404, "{}".to_string()),
            };
            let reply = format!(
                "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let _ = socket.write_all(reply.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    (format!("http://{}", addr), routes)
}

fn open_store(base_url: &str, path: &std::path::Path) -> (CartStore, Arc<CollectingNotifier>) {
    let catalog = HttpCatalog::new(FetchClient::new().with_base_url(base_url));
    let notifier = Arc::new(CollectingNotifier::new());
    let store = CartStore::builder(Arc::new(catalog), Cache::open(path))
        .notifier(notifier.clone())
        .build();
    (store, notifier)
}

const PRODUCT_1: &str = r#"{"id":1,"title":"Tênis de Caminhada Leve Confortável","price":179.9,"image":"https://rocketseat-cdn.s3-sa-east-1.amazonaws.com/modulo-redux/tenis1.jpg"}"#;
const PRODUCT_2: &str = r#"{"id":2,"title":"Tênis VR Caminhada Confortável Detalhes Couro Masculino","price":139.9,"image":"https://rocketseat-cdn.s3-sa-east-1.amazonaws.com/modulo-redux/tenis2.jpg","brand":"VR"}"#;

#[tokio::test]
async fn test_cart_survives_restart() {
    let (base_url, _routes) = serve(&[
        ("/stock/1", r#"{"id":1,"amount":3}"#),
        ("/stock/2", r#"{"id":2,"amount":5}"#),
        ("/products/1", PRODUCT_1),
        ("/products/2", PRODUCT_2),
    ])
    .await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    let before = {
        let (store, notifier) = open_store(&base_url, &path);
        store.add_product(ProductId::new(1)).await;
        store.add_product(ProductId::new(2)).await;
        store
            .update_product_amount(UpdateProductAmount::new(ProductId::new(2), 4))
            .await;
        assert!(notifier.is_empty(), "{:?}", notifier.messages());
        store.cart().await
    };

    let (store, _) = open_store(&base_url, &path);
    let after = store.cart().await;

    assert_eq!(after, before);
    assert_eq!(after.amount_of(ProductId::new(2)), 4);
    assert_eq!(
        after.get(ProductId::new(2)).unwrap().product.extra["brand"],
        "VR"
    );
}

#[tokio::test]
async fn test_storage_holds_bare_item_array() {
    let (base_url, _routes) = serve(&[
        ("/stock/1", r#"{"id":1,"amount":3}"#),
        ("/products/1", PRODUCT_1),
    ])
    .await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    let (store, _) = open_store(&base_url, &path);
    store.add_product(ProductId::new(1)).await;

    let raw = Cache::open(&path)
        .get_raw(&storage_key(STORAGE_NAMESPACE))
        .unwrap()
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value[0]["id"], 1);
    assert_eq!(value[0]["amount"], 1);
    assert_eq!(value[0]["title"], "Tênis de Caminhada Leve Confortável");
}

#[tokio::test]
async fn test_stock_change_between_calls() {
    let (base_url, routes) = serve(&[
        ("/stock/1", r#"{"id":1,"amount":2}"#),
        ("/products/1", PRODUCT_1),
    ])
    .await;
    let dir = tempfile::tempdir().unwrap();
    let (store, notifier) = open_store(&base_url, &dir.path().join("storage.json"));

    store.add_product(ProductId::new(1)).await;
    routes
        .lock()
        .unwrap()
        .insert("/stock/1".into(), r#"{"id":1,"amount":1}"#.into());
    store.add_product(ProductId::new(1)).await;

    assert_eq!(store.cart().await.amount_of(ProductId::new(1)), 1);
    assert_eq!(notifier.messages(), vec![messages::STOCK_EXCEEDED]);
}

#[tokio::test]
async fn test_amount_only_stock_body() {
    let (base_url, _routes) = serve(&[
        ("/stock/1", r#"{"amount":2}"#),
        ("/products/1", PRODUCT_1),
    ])
    .await;
    let dir = tempfile::tempdir().unwrap();
    let (store, notifier) = open_store(&base_url, &dir.path().join("storage.json"));

    store.add_product(ProductId::new(1)).await;
    store.add_product(ProductId::new(1)).await;
    assert!(notifier.is_empty(), "{:?}", notifier.messages());
    assert_eq!(store.cart().await.amount_of(ProductId::new(1)), 2);

    store.add_product(ProductId::new(1)).await;
    store
        .update_product_amount(UpdateProductAmount::new(ProductId::new(1), 3))
        .await;

    assert_eq!(store.cart().await.amount_of(ProductId::new(1)), 2);
    assert_eq!(
        notifier.messages(),
        vec![messages::STOCK_EXCEEDED, messages::STOCK_EXCEEDED]
    );
}

#[tokio::test]
async fn test_stock_id_comes_from_request() {
    let (base_url, _routes) = serve(&[("/stock/7", r#"{"amount":0}"#)]).await;
    let catalog = HttpCatalog::new(FetchClient::new().with_base_url(&base_url));

    let stock = catalog.stock(ProductId::new(7)).await.unwrap();

    assert_eq!(stock, Stock::new(ProductId::new(7), 0));
}

#[tokio::test]
async fn test_unreachable_api_leaves_cart_empty() {
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    let (store, notifier) = open_store(&format!("http://{}", addr), &path);

    store.add_product(ProductId::new(1)).await;

    assert_eq!(store.cart().await, Cart::new());
    assert_eq!(notifier.messages(), vec![messages::ADD_FAILED]);
    assert!(!path.exists());
}
