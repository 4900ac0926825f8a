use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use tempfile::TempDir;
use tokio::net::TcpListener;

use dashlist::{create_app, db, AppState};

struct TestServer {
    addr: String,
    client: Client,
    _dir: TempDir,
}

impl TestServer {
    async fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let db = db::init_db(dir.path().join("todos.db")).expect("Failed to create database");

        let state = AppState { db };
        let app = create_app(state);

        // Bind to random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = format!("http://{}", listener.local_addr().unwrap());

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = Client::new();

        TestServer {
            addr,
            client,
            _dir: dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.addr, path)
    }

    async fn list(&self) -> Vec<Value> {
        let resp = self
            .client
            .get(self.url("/rpc/listTodos"))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        resp.json().await.unwrap()
    }

    async fn add(&self, task: &str, due_date: &str) -> Value {
        let resp = self
            .client
            .post(self.url("/rpc/addTodo"))
            .json(&json!({"task": task, "dueDate": due_date}))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        resp.json().await.unwrap()
    }
}

#[tokio::test]
async fn test_list_starts_empty() {
    let server = TestServer::new().await;
    assert!(server.list().await.is_empty());
}

#[tokio::test]
async fn test_add_then_list() {
    let server = TestServer::new().await;

    let todo = server.add("Buy groceries", "2024-06-01T09:00:00Z").await;
    assert_eq!(todo["task"], "Buy groceries");
    assert_eq!(todo["isDone"], false);
    assert!(todo["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert!(todo["createdAt"].as_i64().is_some());
    assert!(todo["updatedAt"].as_i64().is_some());

    let todos = server.list().await;
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0]["id"], todo["id"]);
    assert_eq!(todos[0]["task"], "Buy groceries");
    assert_eq!(todos[0]["dueDate"], "2024-06-01T09:00:00Z");
    assert_eq!(todos[0]["isDone"], false);
}

#[tokio::test]
async fn test_add_empty_task_rejected() {
    let server = TestServer::new().await;

    for task in ["", "   "] {
        let resp = server
            .client
            .post(server.url("/rpc/addTodo"))
            .json(&json!({"task": task, "dueDate": "2024-06-01T09:00:00Z"}))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["error"], "Task cannot be empty");
    }

    // No record was created
    assert!(server.list().await.is_empty());
}

#[tokio::test]
async fn test_add_invalid_due_date_rejected() {
    let server = TestServer::new().await;

    let resp = server
        .client
        .post(server.url("/rpc/addTodo"))
        .json(&json!({"task": "Buy groceries", "dueDate": "tomorrow-ish"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Due date is not a valid timestamp");

    assert!(server.list().await.is_empty());
}

#[tokio::test]
async fn test_update_replaces_task_and_due_date() {
    let server = TestServer::new().await;

    let todo = server.add("Fix bike", "2024-06-01T09:00:00Z").await;
    let id = todo["id"].as_str().unwrap();

    let resp = server
        .client
        .post(server.url("/rpc/updateTodo"))
        .json(&json!({"id": id, "task": "Fix bike chain", "dueDate": "2024-06-02T18:30:00Z"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = resp.json().await.unwrap();
    assert_eq!(updated["id"], id);
    assert_eq!(updated["task"], "Fix bike chain");
    assert_eq!(updated["dueDate"], "2024-06-02T18:30:00Z");
    assert!(updated["updatedAt"].as_i64().unwrap() >= todo["updatedAt"].as_i64().unwrap());

    let todos = server.list().await;
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0]["task"], "Fix bike chain");
}

#[tokio::test]
async fn test_update_missing_id_not_found() {
    let server = TestServer::new().await;

    server.add("Call mom", "2024-06-01T09:00:00Z").await;

    let resp = server
        .client
        .post(server.url("/rpc/updateTodo"))
        .json(&json!({"id": "nosuchid", "task": "Call dad", "dueDate": "2024-06-01T09:00:00Z"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Store is unchanged
    let todos = server.list().await;
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0]["task"], "Call mom");
}

#[tokio::test]
async fn test_update_validates_before_existence_check() {
    let server = TestServer::new().await;

    let resp = server
        .client
        .post(server.url("/rpc/updateTodo"))
        .json(&json!({"id": "nosuchid", "task": "", "dueDate": "2024-06-01T09:00:00Z"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_mark_done_round_trip() {
    let server = TestServer::new().await;

    let todo = server.add("Water plants", "2024-06-01T09:00:00Z").await;
    let id = todo["id"].as_str().unwrap();

    let resp = server
        .client
        .post(server.url("/rpc/markTodoAsDone"))
        .json(&json!({"id": id, "isDone": true}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let done: Value = resp.json().await.unwrap();
    assert_eq!(done["isDone"], true);
    // Only isDone changed
    assert_eq!(done["task"], "Water plants");
    assert_eq!(done["dueDate"], "2024-06-01T09:00:00Z");

    let resp = server
        .client
        .post(server.url("/rpc/markTodoAsDone"))
        .json(&json!({"id": id, "isDone": false}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let undone: Value = resp.json().await.unwrap();
    assert_eq!(undone["isDone"], false);
}

#[tokio::test]
async fn test_mark_done_missing_id_not_found() {
    let server = TestServer::new().await;

    let resp = server
        .client
        .post(server.url("/rpc/markTodoAsDone"))
        .json(&json!({"id": "nosuchid", "isDone": true}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_then_delete_again() {
    let server = TestServer::new().await;

    let todo = server.add("Return books", "2024-06-01T09:00:00Z").await;
    let id = todo["id"].as_str().unwrap();

    let resp = server
        .client
        .post(server.url("/rpc/deleteTodo"))
        .json(&json!({"id": id}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let deleted: Value = resp.json().await.unwrap();
    assert_eq!(deleted["id"], id);

    assert!(server.list().await.is_empty());

    // Deleting an already-gone id surfaces NotFound, not silent success
    let resp = server
        .client
        .post(server.url("/rpc/deleteTodo"))
        .json(&json!({"id": id}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_full_scenario() {
    let server = TestServer::new().await;

    let todo = server.add("Buy milk", "2024-01-01T10:00:00Z").await;
    let id = todo["id"].as_str().unwrap().to_string();

    let todos = server.list().await;
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0]["task"], "Buy milk");
    assert_eq!(todos[0]["dueDate"], "2024-01-01T10:00:00Z");
    assert_eq!(todos[0]["isDone"], false);

    let resp = server
        .client
        .post(server.url("/rpc/markTodoAsDone"))
        .json(&json!({"id": id, "isDone": true}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let todos = server.list().await;
    assert_eq!(todos[0]["isDone"], true);

    let resp = server
        .client
        .post(server.url("/rpc/deleteTodo"))
        .json(&json!({"id": id}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    assert!(server.list().await.is_empty());
}

#[tokio::test]
async fn test_ids_are_unique() {
    let server = TestServer::new().await;

    let a = server.add("First", "2024-06-01T09:00:00Z").await;
    let b = server.add("Second", "2024-06-01T09:00:00Z").await;
    assert_ne!(a["id"], b["id"]);

    let todos = server.list().await;
    assert_eq!(todos.len(), 2);
}
