use std::convert::Infallible;
use std::sync::Arc;

use headers::authorization::Bearer;
use headers::{Authorization, HeaderMapExt};
use warp::http::HeaderMap;
use warp::{Filter, Rejection};

use crate::error::ApiError;
use crate::state::AppState;

pub const BODY_LIMIT: u64 = 1024 * 64;

pub fn with_state(state: Arc<AppState>) -> impl Filter<Extract=(Arc<AppState>, ), Error=Infallible> + Clone {
    warp::any().map(move || state.clone())
}

/// Resolves `Authorization: Bearer <token>` to the owning user id.
pub fn with_auth(state: Arc<AppState>) -> impl Filter<Extract=(i64, ), Error=Rejection> + Clone {
    warp::header::headers_cloned()
        .and(with_state(state))
        .and_then(|headers: HeaderMap, state: Arc<AppState>| async move {
            let token = headers.typed_get::<Authorization<Bearer>>()
                .map(|auth| auth.token().to_string());
            match token {
                Some(token) => state.authorize(&token)
                    .ok_or_else(|| warp::reject::custom(ApiError::Unauthorized("token is invalid or expired"))),
                None => Err(warp::reject::custom(ApiError::Unauthorized("missing authorization header"))),
            }
        })
}
