//! In-memory stand-in for the back office API.
//!
//! Serves `/admin/users` as a paginated, searchable collection and the
//! users toggle endpoint. Every request is recorded. A scripted failure can
//! be queued to answer the next request with an error status.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Value, json};

use backoffice::api::{ApiRequest, Method, Transport, error_from_response};
use backoffice::{BackofficeError, Result};

pub struct FakeApi {
    users: Mutex<Vec<Value>>,
    requests: Mutex<Vec<ApiRequest>>,
    next_failure: Mutex<Option<(u16, Option<Value>)>>,
}

impl FakeApi {
    /// `count` users with ids 1..=count, named `user-<id>`.
    pub fn with_users(count: u64) -> Self {
        let users = (1..=count)
            .map(|id| {
                json!({
                    "id": id,
                    "name": format!("user-{id}"),
                    "email": format!("user{id}@example.com"),
                    "archived": false,
                })
            })
            .collect();
        Self {
            users: Mutex::new(users),
            requests: Mutex::new(Vec::new()),
            next_failure: Mutex::new(None),
        }
    }

    /// Answer the next request with this status and body.
    pub fn fail_next(&self, status: u16, body: Option<Value>) {
        *self.next_failure.lock() = Some((status, body));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn user(&self, id: u64) -> Option<Value> {
        self.users.lock().iter().find(|u| u["id"] == id).cloned()
    }

    fn list_users(&self, request: &ApiRequest) -> Value {
        let param = |key: &str| {
            request
                .query
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        };
        let page: usize = param("page").and_then(|p| p.parse().ok()).unwrap_or(1);
        let per_page: usize = param("per_page").and_then(|p| p.parse().ok()).unwrap_or(15);
        let search = param("search").unwrap_or_default();

        let matching: Vec<Value> = self
            .users
            .lock()
            .iter()
            .filter(|u| u["name"].as_str().is_some_and(|n| n.contains(&search)))
            .cloned()
            .collect();

        let total = matching.len();
        let last_page = total.div_ceil(per_page).max(1);
        let data: Vec<Value> = matching
            .into_iter()
            .skip((page - 1) * per_page)
            .take(per_page)
            .collect();

        json!({
            "data": data,
            "meta": {
                "current_page": page,
                "last_page": last_page,
                "per_page": per_page,
                "total": total,
            }
        })
    }

    fn toggle_archive(&self, id: &str) -> Result<Value> {
        let mut users = self.users.lock();
        let user = users
            .iter_mut()
            .find(|u| u["id"].to_string() == id)
            .ok_or_else(|| error_from_response(404, Some(json!({"message": "User not found"}))))?;
        let archived = user["archived"].as_bool().unwrap_or(false);
        user["archived"] = Value::Bool(!archived);
        Ok(json!({"data": user.clone()}))
    }
}

#[async_trait]
impl Transport for FakeApi {
    async fn send(&self, request: ApiRequest) -> Result<Value> {
        self.requests.lock().push(request.clone());

        if let Some((status, body)) = self.next_failure.lock().take() {
            return Err(error_from_response(status, body));
        }

        let segments: Vec<&str> = request.path.trim_matches('/').split('/').collect();
        match (request.method, segments.as_slice()) {
            (Method::Get, ["admin", "users"]) => Ok(self.list_users(&request)),
            (Method::Patch, ["admin", "users", id, "toggle-archive"]) => self.toggle_archive(id),
            (Method::Post, ["admin", "admin-users"]) => Ok(json!({"message": "Admin created"})),
            _ => Err(BackofficeError::Http {
                status: 404,
                message: "Not Found".to_string(),
                body: None,
            }),
        }
    }
}
