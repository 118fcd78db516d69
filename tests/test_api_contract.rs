//! End-to-end contract test: start the full app in-process on an ephemeral port
//! and drive every route over HTTP.

use serde_json::{json, Value};
use supplement_admin::{transport, DatabaseService};
use tempfile::TempDir;

const INDEX_HTML: &str = "<!doctype html><title>Supplement Admin</title><div id=\"root\"></div>";

struct TestServer {
    base_url: String,
    client: reqwest::Client,
    handle: tokio::task::JoinHandle<()>,
    _client_dir: TempDir,
}

impl TestServer {
    async fn start() -> Self {
        let db = DatabaseService::in_memory().await.unwrap();
        db.initialize().await.unwrap();

        let client_dir = tempfile::tempdir().unwrap();
        std::fs::write(client_dir.path().join("index.html"), INDEX_HTML).unwrap();
        std::fs::write(client_dir.path().join("app.js"), "console.log('app');").unwrap();

        let state = transport::http::AppState::new(db, client_dir.path());
        let app = transport::http::create_app(state);

        // Bind to an ephemeral port to avoid conflicts with a running server.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://127.0.0.1:{}", port),
            client: reqwest::Client::new(),
            handle,
            _client_dir: client_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json(&self, path: &str) -> (u16, Value) {
        let resp = self.client.get(self.url(path)).send().await.unwrap();
        let status = resp.status().as_u16();
        (status, resp.json().await.unwrap())
    }

    async fn send_json(&self, method: reqwest::Method, path: &str, body: Value) -> (u16, Value) {
        let resp = self
            .client
            .request(method, self.url(path))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = resp.status().as_u16();
        (status, resp.json().await.unwrap())
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn ids(group: &Value) -> Vec<i64> {
    group
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect()
}

fn find(group: &Value, id: i64) -> Option<Value> {
    group
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["id"].as_i64() == Some(id))
        .cloned()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn seeded_store_is_served() {
    let server = TestServer::start().await;

    let (status, body) = server.get_json("/api/ingredients").await;
    assert_eq!(status, 200);
    assert_eq!(body["dailyValue"].as_array().unwrap().len(), 5);
    assert_eq!(body["nonDailyValue"].as_array().unwrap().len(), 3);
    let protein = &body["dailyValue"][0];
    assert_eq!(protein["ingredient"], "Protein");
    assert_eq!(protein["unit"], "g");
    assert_eq!(protein["rdi"], 50.0);
    assert_eq!(protein["parent_id"], Value::Null);
    assert_eq!(protein["is_daily_value"], true);

    let (status, settings) = server.get_json("/api/settings").await;
    assert_eq!(status, 200);
    assert_eq!(settings, json!({ "dailyValueSymbol": "*", "nonDailyValueSymbol": "†" }));

    let (_, allergens) = server.get_json("/api/allergens").await;
    let names: Vec<&str> = allergens
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec!["Milk", "Eggs", "Fish", "Shellfish", "Tree Nuts", "Peanuts", "Wheat", "Soy"]
    );

    let (_, manufacturers) = server.get_json("/api/manufacturers").await;
    assert_eq!(manufacturers[0]["name"], "NutriCorp");
    assert_eq!(manufacturers[0]["address"], "123 Health St, Wellness City, CA 90210");

    let (_, distributors) = server.get_json("/api/distributors").await;
    assert_eq!(distributors[0]["name"], "FitDist");
    assert!(distributors[0]["id"].is_i64());

    let (_, panels) = server.get_json("/api/panels").await;
    assert_eq!(panels, json!([]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn ingredient_lifecycle() {
    let server = TestServer::start().await;

    let (status, created) = server
        .send_json(
            reqwest::Method::POST,
            "/api/ingredients",
            json!({ "ingredient": "Magnesium", "parent_id": 0, "unit": "mg", "rdi": 420, "is_daily_value": true }),
        )
        .await;
    assert_eq!(status, 201);
    let id = created["id"].as_i64().unwrap();

    let (_, list) = server.get_json("/api/ingredients").await;
    assert!(ids(&list["dailyValue"]).contains(&id));
    assert!(!ids(&list["nonDailyValue"]).contains(&id));
    assert_eq!(find(&list["dailyValue"], id).unwrap()["parent_id"], Value::Null);

    // Full replace, flipping the group.
    let (status, body) = server
        .send_json(
            reqwest::Method::PUT,
            &format!("/api/ingredients/{}", id),
            json!({ "ingredient": "Magnesium Glycinate", "parent_id": 7, "unit": "mcg", "rdi": 0, "is_daily_value": false }),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "message": "Ingredient updated" }));

    let (_, list) = server.get_json("/api/ingredients").await;
    assert!(!ids(&list["dailyValue"]).contains(&id));
    assert_eq!(
        find(&list["nonDailyValue"], id).unwrap(),
        json!({
            "id": id,
            "ingredient": "Magnesium Glycinate",
            "parent_id": 7,
            "unit": "mcg",
            "rdi": null,
            "is_daily_value": false
        })
    );

    let (status, body) = server
        .send_json(reqwest::Method::DELETE, &format!("/api/ingredients/{}", id), json!({}))
        .await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "message": "Ingredient deleted" }));

    let (_, list) = server.get_json("/api/ingredients").await;
    assert!(!ids(&list["dailyValue"]).contains(&id));
    assert!(!ids(&list["nonDailyValue"]).contains(&id));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn loosely_typed_text_fields_are_accepted() {
    let server = TestServer::start().await;

    let (status, created) = server
        .send_json(
            reqwest::Method::POST,
            "/api/ingredients",
            json!({ "ingredient": "Zinc", "unit": 5, "is_daily_value": true }),
        )
        .await;
    assert_eq!(status, 201);
    let id = created["id"].as_i64().unwrap();

    let (_, list) = server.get_json("/api/ingredients").await;
    let row = find(&list["dailyValue"], id).unwrap();
    assert_eq!(row["ingredient"], "Zinc");
    assert_eq!(row["unit"], "5");

    let (status, body) = server
        .send_json(
            reqwest::Method::PUT,
            "/api/settings",
            json!({ "dailyValueSymbol": 5, "nonDailyValueSymbol": "~" }),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "message": "Settings updated" }));

    let (_, settings) = server.get_json("/api/settings").await;
    assert_eq!(settings, json!({ "dailyValueSymbol": "5", "nonDailyValueSymbol": "~" }));
}

// Update/delete of an unknown id keep reporting success (zero rows affected is
// not surfaced to the client).
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn unknown_ingredient_ids_still_succeed() {
    let server = TestServer::start().await;

    let (status, body) = server
        .send_json(
            reqwest::Method::PUT,
            "/api/ingredients/99999",
            json!({ "ingredient": "Nobody", "is_daily_value": true }),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Ingredient updated");

    let resp = server
        .client
        .delete(server.url("/api/ingredients/99999"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Ingredient deleted");

    // A non-numeric id matches nothing either.
    let (status, body) = server
        .send_json(
            reqwest::Method::PUT,
            "/api/ingredients/abc",
            json!({ "ingredient": "X", "is_daily_value": true }),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "message": "Ingredient updated" }));

    let resp = server
        .client
        .delete(server.url("/api/ingredients/abc"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Ingredient deleted" }));

    let (_, list) = server.get_json("/api/ingredients").await;
    let total = ids(&list["dailyValue"]).len() + ids(&list["nonDailyValue"]).len();
    assert_eq!(total, 8);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn failures_are_uniform_500s() {
    let server = TestServer::start().await;

    // Missing name violates NOT NULL.
    let (status, body) = server
        .send_json(reqwest::Method::POST, "/api/ingredients", json!({ "unit": "mg" }))
        .await;
    assert_eq!(status, 500);
    assert_eq!(body, json!({ "error": "Failed to add ingredient" }));

    // Unreadable body.
    let resp = server
        .client
        .post(server.url("/api/ingredients"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 500);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Failed to add ingredient");

    let resp = server
        .client
        .put(server.url("/api/settings"))
        .header("content-type", "application/json")
        .body("[")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 500);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Failed to update settings");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn panels_round_trip() {
    let server = TestServer::start().await;

    let (status, created) = server
        .send_json(
            reqwest::Method::POST,
            "/api/panels",
            json!({ "sku": "X1", "flavor": "Berry" }),
        )
        .await;
    assert_eq!(status, 201);
    let id = created["id"].as_i64().unwrap();

    let (status, panels) = server.get_json("/api/panels").await;
    assert_eq!(status, 200);
    assert_eq!(panels, json!([{ "id": id, "sku": "X1", "flavor": "Berry" }]));

    let (status, body) = server
        .send_json(
            reqwest::Method::POST,
            "/api/panels",
            json!({ "sku": "X1", "flavor": "Lemon" }),
        )
        .await;
    assert_eq!(status, 500);
    assert_eq!(body, json!({ "error": "Failed to save panel" }));

    let (_, panels) = server.get_json("/api/panels").await;
    assert_eq!(panels.as_array().unwrap().len(), 1);
    assert_eq!(panels[0]["flavor"], "Berry");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn settings_write_is_per_key() {
    let server = TestServer::start().await;

    let (status, body) = server
        .send_json(
            reqwest::Method::PUT,
            "/api/settings",
            json!({ "dailyValueSymbol": "#", "ignored": "x" }),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "message": "Settings updated" }));

    let (_, settings) = server.get_json("/api/settings").await;
    assert_eq!(settings, json!({ "dailyValueSymbol": "#", "nonDailyValueSymbol": "†" }));

    // No recognized key: still a success, nothing changes.
    let (status, _) = server
        .send_json(reqwest::Method::PUT, "/api/settings", json!({}))
        .await;
    assert_eq!(status, 200);
    let (_, after) = server.get_json("/api/settings").await;
    assert_eq!(after, settings);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn unmatched_paths_serve_the_client() {
    let server = TestServer::start().await;

    for path in ["/", "/ingredients/5/edit", "/panels"] {
        let resp = server.client.get(server.url(path)).send().await.unwrap();
        assert_eq!(resp.status().as_u16(), 200, "path {path}");
        assert_eq!(resp.text().await.unwrap(), INDEX_HTML);
    }

    let resp = server.client.get(server.url("/app.js")).send().await.unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(resp.text().await.unwrap(), "console.log('app');");

    let (status, health) = server.get_json("/health").await;
    assert_eq!(status, 200);
    assert_eq!(health["data"], json!({ "status": "ok" }));

    let (status, doc) = server.get_json("/api-docs/openapi.json").await;
    assert_eq!(status, 200);
    assert!(doc["paths"]["/api/ingredients/{id}"].is_object());
}
