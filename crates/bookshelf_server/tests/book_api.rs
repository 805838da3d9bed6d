use bookshelf_core::db::open_db_in_memory;
use bookshelf_core::{core_version, Book, BookService, BookStore, SqliteBookStore};
use bookshelf_server::build_router;
use serde_json::{json, Value};
use std::sync::Arc;

const SEED_THREE: &[&str] = &["스프링부트 따라하기", "리엑트 따라하기", "JUnit 따라하기"];

/// Spin up the server over a fresh in-memory database on an OS-assigned
/// port, returning the base URL. Ids always start at 1.
async fn spawn_server(seed_titles: &[&str]) -> String {
    let conn = open_db_in_memory().unwrap();
    {
        let store = SqliteBookStore::try_new(&conn).unwrap();
        for title in seed_titles {
            store.create_book(&Book::new(*title, "코스")).unwrap();
        }
    }

    let app = build_router(Arc::new(BookService::new(conn)));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://127.0.0.1:{port}")
}

#[tokio::test]
async fn save_creates_book_and_returns_201_with_assigned_id() {
    let base = spawn_server(&[]).await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/book"))
        .json(&json!({"title": "스프링 따라하기", "author": "코스"}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["id"], 1);
    assert_eq!(body["title"], "스프링 따라하기");
    assert_eq!(body["author"], "코스");
}

#[tokio::test]
async fn save_ignores_client_supplied_id() {
    let base = spawn_server(&[]).await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/book"))
        .json(&json!({"id": 50, "title": "스프링 따라하기", "author": "코스"}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["id"], 1);
}

#[tokio::test]
async fn save_with_empty_body_defaults_to_blank_fields() {
    let base = spawn_server(&[]).await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/book"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 201);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["id"], 1);
    assert_eq!(body["title"], "");
    assert_eq!(body["author"], "");
}

#[tokio::test]
async fn find_all_returns_seeded_books_in_id_order() {
    let base = spawn_server(&["스프링부트 따라하기", "리엑트 따라하기"]).await;

    let resp = reqwest::get(format!("{base}/book")).await.unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let books = body.as_array().unwrap();
    assert_eq!(books.len(), 2);
    assert_eq!(books[0]["title"], "스프링부트 따라하기");
    assert_eq!(books[1]["title"], "리엑트 따라하기");
}

#[tokio::test]
async fn find_by_id_returns_matching_book() {
    let base = spawn_server(SEED_THREE).await;

    let resp = reqwest::get(format!("{base}/book/2")).await.unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["id"], 2);
    assert_eq!(body["title"], "리엑트 따라하기");
}

#[tokio::test]
async fn find_by_absent_id_returns_404_with_check_hint() {
    let base = spawn_server(&[]).await;

    let resp = reqwest::get(format!("{base}/book/99")).await.unwrap();

    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], 404);
    assert!(body["error"].as_str().unwrap().contains("check the id"));
}

#[tokio::test]
async fn update_overwrites_title_and_keeps_path_id() {
    let base = spawn_server(SEED_THREE).await;

    let resp = reqwest::Client::new()
        .put(format!("{base}/book/1"))
        .json(&json!({"title": "C++ 따라하기", "author": "코스"}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["id"], 1);
    assert_eq!(body["title"], "C++ 따라하기");
}

#[tokio::test]
async fn update_ignores_id_inside_patch_body() {
    let base = spawn_server(SEED_THREE).await;
    let client = reqwest::Client::new();

    let resp = client
        .put(format!("{base}/book/1"))
        .json(&json!({"id": 7, "title": "C++ 따라하기", "author": "코스"}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["id"], 1);

    let missing = reqwest::get(format!("{base}/book/7")).await.unwrap();
    assert_eq!(missing.status(), 404);
}

#[tokio::test]
async fn update_absent_id_returns_404() {
    let base = spawn_server(&[]).await;

    let resp = reqwest::Client::new()
        .put(format!("{base}/book/9"))
        .json(&json!({"title": "ghost", "author": "nobody"}))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn delete_answers_plain_text_ok_and_removes_book() {
    let base = spawn_server(SEED_THREE).await;
    let client = reqwest::Client::new();

    let resp = client
        .delete(format!("{base}/book/1"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let content_type = resp
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.contains("text/plain"));
    assert_eq!(resp.text().await.unwrap(), "ok");

    let gone = reqwest::get(format!("{base}/book/1")).await.unwrap();
    assert_eq!(gone.status(), 404);

    let remaining: Value = reqwest::get(format!("{base}/book"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(remaining.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn delete_absent_id_returns_404() {
    let base = spawn_server(&[]).await;

    let resp = reqwest::Client::new()
        .delete(format!("{base}/book/5"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], 404);
}

#[tokio::test]
async fn health_reports_ok_and_core_version() {
    let base = spawn_server(&[]).await;

    let resp = reqwest::get(format!("{base}/health")).await.unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], core_version());
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let base = spawn_server(&[]).await;

    let resp = reqwest::get(format!("{base}/books")).await.unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn non_numeric_id_returns_400() {
    let base = spawn_server(&[]).await;

    let resp = reqwest::get(format!("{base}/book/abc")).await.unwrap();
    assert_eq!(resp.status(), 400);
}
