//! HTTP endpoints for the user directory.
//!
//! Three routes: a greeting at `/`, the collection at `/users`, and
//! single-record lookup at `/users/<id>`. Handlers receive shared
//! state by `Arc` rather than reaching for globals.

use std::sync::Arc;

use crate::config::Config;
use crate::http::{HttpRequest, Method};
use crate::server::{Error, HttpResponse, HttpServer, RoutePattern, StatusCode};
use crate::store::{NewUser, UserStore};

/// Shared state handed to every request handler.
pub struct AppState {
    /// The configuration loaded at startup.
    pub config: Config,
    /// The record store.
    pub store: UserStore,
}

/// Register the service's routes on the server.
pub async fn register(server: &HttpServer, state: Arc<AppState>) {
    let st = state.clone();
    server
        .add_route(RoutePattern::Exact("/".to_string()), vec![Method::GET], move |_req| {
            let st = st.clone();
            async move { home(&st) }
        })
        .await;

    let st = state.clone();
    server
        .add_route(
            RoutePattern::Exact("/users".to_string()),
            vec![Method::GET, Method::POST],
            move |req| {
                let st = st.clone();
                async move { users_collection(req, &st).await }
            },
        )
        .await;

    let st = state;
    server
        .add_route(RoutePattern::Prefix("/users/".to_string()), vec![Method::GET], move |req| {
            let st = st.clone();
            async move { user_by_id(req, &st).await }
        })
        .await;
}

/// `GET /`: greeting with the configured display name.
fn home(state: &AppState) -> Result<HttpResponse, Error> {
    Ok(HttpResponse::new(StatusCode::Ok)
        .with_content_type("text/plain")
        .with_body_string(format!("Welcome to {name}!", name = state.config.name)))
}

/// `GET /users` lists all records; `POST /users` creates one.
async fn users_collection(req: HttpRequest, state: &AppState) -> Result<HttpResponse, Error> {
    match req.method {
        Method::GET => HttpResponse::new(StatusCode::Ok).with_json(&state.store.list().await),
        Method::POST => {
            // Partial payloads are fine (missing fields become zero
            // values); a syntactically malformed body is a 400.
            let candidate: NewUser = match serde_json::from_slice(&req.body) {
                Ok(candidate) => candidate,
                Err(e) => {
                    return Ok(HttpResponse::new(StatusCode::BadRequest)
                        .with_content_type("text/plain")
                        .with_body_string(format!("Invalid user payload: {e}")))
                }
            };

            let user = state.store.create(candidate).await;
            HttpResponse::new(StatusCode::Created).with_json(&user)
        }
        _ => Err(Error::InternalError("Unexpected method".to_string())),
    }
}

/// `GET /users/<id>`: look up a single record.
async fn user_by_id(req: HttpRequest, state: &AppState) -> Result<HttpResponse, Error> {
    let path = req.path.split_once('?').map_or(req.path.as_str(), |(p, _)| p);

    // The path must be exactly "", "users", "<id>"
    let segments: Vec<&str> = path.split('/').collect();
    if segments.len() != 3 {
        return Ok(HttpResponse::new(StatusCode::NotFound)
            .with_content_type("text/plain")
            .with_body_string(format!("Not found: {path}")));
    }

    let id: u64 = match segments[2].parse() {
        Ok(id) => id,
        Err(_) => {
            return Ok(HttpResponse::new(StatusCode::BadRequest)
                .with_content_type("text/plain")
                .with_body_string(format!("Invalid user id: {raw}", raw = segments[2])))
        }
    };

    match state.store.find_by_id(id).await {
        Some(user) => HttpResponse::new(StatusCode::Ok).with_json(&user),
        None => Ok(HttpResponse::new(StatusCode::NotFound)
            .with_content_type("text/plain")
            .with_body_string(format!("User {id} not found"))),
    }
}
