#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use url::Url;

use faceboinks::app::feed::FeedRepository;
use faceboinks::app::likes::LikedPosts;
use faceboinks::infra::api::FeedApiClient;
use faceboinks::infra::prefs::{MemoryPreferences, PreferenceStore};
use faceboinks::FeedSession;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const CREATED_AT: &str = "2024-05-01T12:00:00.000Z";
pub const EDITED_AT: &str = "2024-05-01T12:05:00.000Z";

// ---------------------------------------------------------------------------
// MockApi — an in-process stand-in for the remote posts service
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    None,
    ServerError,
    Garbage,
}

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

struct MockState {
    posts: Vec<Value>,
    next_id: i64,
    failure: Failure,
    requests: Vec<Recorded>,
}

type Shared = Arc<Mutex<MockState>>;

pub struct MockApi {
    state: Shared,
    pub base_url: Url,
}

impl MockApi {
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(MockState {
            posts: Vec::new(),
            next_id: 1,
            failure: Failure::None,
            requests: Vec::new(),
        }));

        let router = Router::new()
            .route("/api/posts", get(list_posts).post(create_post))
            .route("/api/posts/:id", put(update_post).delete(delete_post))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind mock api");
        let addr = listener.local_addr().expect("mock api has no address");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("mock api crashed");
        });

        let base_url = Url::parse(&format!("http://{}/api", addr)).expect("bad mock url");
        Self { state, base_url }
    }

    /// Appends a raw post object in server (insertion) order.
    pub fn seed(&self, post: Value) {
        let mut state = self.state.lock().unwrap();
        if let Some(id) = post["id"].as_i64() {
            state.next_id = state.next_id.max(id + 1);
        }
        state.posts.push(post);
    }

    pub fn seed_post(&self, id: i64, author: &str, content: &str) {
        self.seed(post_json(id, author, content));
    }

    pub fn fail_with(&self, failure: Failure) {
        self.state.lock().unwrap().failure = failure;
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Requests other than `GET /posts`.
    pub fn mutations(&self) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|request| request.method != Method::GET)
            .collect()
    }

    pub fn stored_ids(&self) -> Vec<i64> {
        self.state
            .lock()
            .unwrap()
            .posts
            .iter()
            .filter_map(|post| post["id"].as_i64())
            .collect()
    }

    pub fn repository(&self) -> FeedRepository {
        let api = FeedApiClient::new(self.base_url.clone()).expect("bad api client");
        FeedRepository::new(api)
    }

    pub fn session(&self) -> FeedSession {
        self.session_with_store(Arc::new(MemoryPreferences::new()))
    }

    pub fn session_with_store(&self, store: Arc<dyn PreferenceStore>) -> FeedSession {
        let likes = LikedPosts::load(store).expect("failed to load liked posts");
        FeedSession::new(self.repository(), likes)
    }

    /// A session with the feed already loaded.
    pub async fn loaded_session(&self) -> FeedSession {
        let mut session = self.session();
        session.load();
        session.settle().await;
        session
    }
}

pub fn post_json(id: i64, author: &str, content: &str) -> Value {
    json!({
        "id": id,
        "content": content,
        "imageUrl": "",
        "author": author,
        "createdAt": CREATED_AT,
        "updatedAt": CREATED_AT,
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

fn record(state: &mut MockState, method: Method, path: String, body: Option<Value>) -> Failure {
    state.requests.push(Recorded { method, path, body });
    state.failure
}

fn failure_response(failure: Failure) -> Option<Response> {
    match failure {
        Failure::None => None,
        Failure::ServerError => Some(
            (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": "boom" }))).into_response(),
        ),
        Failure::Garbage => Some((StatusCode::OK, "<html>not json</html>").into_response()),
    }
}

async fn list_posts(State(state): State<Shared>) -> Response {
    let mut state = state.lock().unwrap();
    let failure = record(&mut state, Method::GET, "/posts".into(), None);
    if let Some(response) = failure_response(failure) {
        return response;
    }
    Json(Value::Array(state.posts.clone())).into_response()
}

async fn create_post(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut state = state.lock().unwrap();
    let failure = record(&mut state, Method::POST, "/posts".into(), Some(body.clone()));
    if let Some(response) = failure_response(failure) {
        return response;
    }

    // The service keeps only the authored fields; likes and comments are
    // dropped the way a service without engagement tracking would.
    let id = state.next_id;
    state.next_id += 1;
    let post = json!({
        "id": id,
        "content": body["content"],
        "imageUrl": body["imageUrl"],
        "author": body["author"],
        "createdAt": CREATED_AT,
        "updatedAt": CREATED_AT,
    });
    state.posts.push(post.clone());
    (StatusCode::CREATED, Json(post)).into_response()
}

async fn update_post(
    State(state): State<Shared>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    let failure = record(&mut state, Method::PUT, format!("/posts/{}", id), Some(body.clone()));
    if let Some(response) = failure_response(failure) {
        return response;
    }

    match state.posts.iter_mut().find(|post| post["id"] == id) {
        Some(post) => {
            post["content"] = body["content"].clone();
            post["imageUrl"] = body["imageUrl"].clone();
            post["author"] = body["author"].clone();
            post["updatedAt"] = json!(EDITED_AT);
            Json(post.clone()).into_response()
        }
        None => (StatusCode::NOT_FOUND, Json(json!({ "error": "post not found" }))).into_response(),
    }
}

async fn delete_post(State(state): State<Shared>, Path(id): Path<i64>) -> Response {
    let mut state = state.lock().unwrap();
    let failure = record(&mut state, Method::DELETE, format!("/posts/{}", id), None);
    if let Some(response) = failure_response(failure) {
        return response;
    }

    let before = state.posts.len();
    state.posts.retain(|post| post["id"] != id);
    if state.posts.len() == before {
        return (StatusCode::NOT_FOUND, Json(json!({ "error": "post not found" }))).into_response();
    }
    Json(json!({ "deleted": id })).into_response()
}
