//! In-process double of the Product Hunt v1 REST API.
//!
//! Serves a fixed seed of posts, users, and collections under `/v1`, with
//! the nested listing routes the real API exposes (`users/{id}/posts`,
//! `posts/{id}/collections`, ...). Every route demands a bearer token so
//! client tests get a deterministic 401 path. Responses use the v1 envelope
//! shapes (`{"posts": [...]}`, `{"post": {...}}`).

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;

#[derive(Clone, Debug, Serialize)]
pub struct Post {
    pub id: u64,
    pub name: String,
    pub tagline: String,
    pub day: String,
    pub user_id: u64,
}

#[derive(Clone, Debug, Serialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub username: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct Collection {
    pub id: u64,
    pub name: String,
    pub featured: bool,
    pub user_id: u64,
    pub post_ids: Vec<u64>,
}

/// Read-only seed data shared by all handlers.
#[derive(Debug)]
pub struct Fixtures {
    pub posts: Vec<Post>,
    pub users: Vec<User>,
    pub collections: Vec<Collection>,
}

pub type Db = Arc<Fixtures>;

fn post(id: u64, name: &str, tagline: &str, day: &str, user_id: u64) -> Post {
    Post {
        id,
        name: name.to_string(),
        tagline: tagline.to_string(),
        day: day.to_string(),
        user_id,
    }
}

pub fn fixtures() -> Fixtures {
    Fixtures {
        posts: vec![
            post(1, "Lens", "Find any photo", "2015-05-14", 1),
            post(2, "Beacon", "Ship updates faster", "2015-05-15", 1),
            post(3, "Quill", "Write together", "2015-05-15", 2),
        ],
        users: vec![
            User {
                id: 1,
                name: "Ada".to_string(),
                username: "ada".to_string(),
            },
            User {
                id: 2,
                name: "Lin".to_string(),
                username: "lin".to_string(),
            },
        ],
        collections: vec![
            Collection {
                id: 1,
                name: "Photo tools".to_string(),
                featured: true,
                user_id: 1,
                post_ids: vec![1],
            },
            Collection {
                id: 2,
                name: "Team writing".to_string(),
                featured: false,
                user_id: 2,
                post_ids: vec![2, 3],
            },
        ],
    }
}

pub fn app() -> Router {
    let db: Db = Arc::new(fixtures());
    Router::new()
        .route("/v1/posts", get(list_posts))
        .route("/v1/posts/{id}", get(get_post))
        .route("/v1/posts/{id}/collections", get(post_collections))
        .route("/v1/users", get(list_users))
        .route("/v1/users/{id}", get(get_user))
        .route("/v1/users/{id}/posts", get(user_posts))
        .route("/v1/users/{id}/collections", get(user_collections))
        .route("/v1/collections", get(list_collections))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

type Params = Query<HashMap<String, String>>;
type ApiResult = Result<Json<Value>, StatusCode>;

/// Demand a non-empty `Authorization: Bearer <token>` header.
fn authorize(headers: &HeaderMap) -> Result<(), StatusCode> {
    let token = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or("");
    if token.is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(())
}

/// Apply `per_page` the way the real API does: truncate, ignore garbage.
fn paginate<T: Clone>(items: Vec<T>, params: &HashMap<String, String>) -> Vec<T> {
    match params.get("per_page").and_then(|v| v.parse::<usize>().ok()) {
        Some(n) => items.into_iter().take(n).collect(),
        None => items,
    }
}

async fn list_posts(State(db): State<Db>, headers: HeaderMap, Query(params): Params) -> ApiResult {
    authorize(&headers)?;
    let posts = paginate(db.posts.clone(), &params);
    Ok(Json(json!({ "posts": posts })))
}

async fn get_post(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Query(params): Params,
) -> ApiResult {
    authorize(&headers)?;

    // `posts/all` is the list-everything form of the posts endpoint
    if id == "all" {
        let posts = paginate(db.posts.clone(), &params);
        return Ok(Json(json!({ "posts": posts })));
    }

    let id: u64 = id.parse().map_err(|_| StatusCode::BAD_REQUEST)?;
    db.posts
        .iter()
        .find(|p| p.id == id)
        .map(|p| Json(json!({ "post": p })))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn post_collections(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Query(params): Params,
) -> ApiResult {
    authorize(&headers)?;
    let collections: Vec<Collection> = db
        .collections
        .iter()
        .filter(|c| c.post_ids.contains(&id))
        .cloned()
        .collect();
    let collections = paginate(collections, &params);
    Ok(Json(json!({ "collections": collections })))
}

async fn list_users(State(db): State<Db>, headers: HeaderMap, Query(params): Params) -> ApiResult {
    authorize(&headers)?;
    let users = paginate(db.users.clone(), &params);
    Ok(Json(json!({ "users": users })))
}

async fn get_user(State(db): State<Db>, headers: HeaderMap, Path(id): Path<u64>) -> ApiResult {
    authorize(&headers)?;
    db.users
        .iter()
        .find(|u| u.id == id)
        .map(|u| Json(json!({ "user": u })))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn user_posts(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Query(params): Params,
) -> ApiResult {
    authorize(&headers)?;
    let posts: Vec<Post> = db.posts.iter().filter(|p| p.user_id == id).cloned().collect();
    let posts = paginate(posts, &params);
    Ok(Json(json!({ "posts": posts })))
}

async fn user_collections(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Query(params): Params,
) -> ApiResult {
    authorize(&headers)?;
    let collections: Vec<Collection> = db
        .collections
        .iter()
        .filter(|c| c.user_id == id)
        .cloned()
        .collect();
    let collections = paginate(collections, &params);
    Ok(Json(json!({ "collections": collections })))
}

async fn list_collections(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(params): Params,
) -> ApiResult {
    authorize(&headers)?;
    let mut collections = db.collections.clone();
    if params.get("search[featured]").map(String::as_str) == Some("true") {
        collections.retain(|c| c.featured);
    }
    let collections = paginate(collections, &params);
    Ok(Json(json!({ "collections": collections })))
}
