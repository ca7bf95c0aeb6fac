use std::convert::Infallible;

use thiserror::Error;
use warp::http::StatusCode;
use warp::reject::Reject;
use warp::reply::{Json, WithStatus};
use warp::{Rejection, Reply};

use shared::types::ErrorResponse;

use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Unauthorized(&'static str),
    #[error("internal error")]
    Store(#[from] StoreError),
}

impl Reject for ApiError {}

pub fn error_reply(status: StatusCode, message: &str) -> WithStatus<Json> {
    warp::reply::with_status(
        warp::reply::json(&ErrorResponse { error: Some(message.to_string()) }),
        status,
    )
}

pub fn reject_store(err: StoreError) -> Rejection {
    warp::reject::custom(ApiError::Store(err))
}

#[tracing::instrument]
pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (status, message) = if let Some(api_err) = err.find::<ApiError>() {
        match api_err {
            ApiError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, api_err.to_string()),
            ApiError::Store(store_err) => {
                tracing::error!("store: {store_err}");
                (StatusCode::INTERNAL_SERVER_ERROR, api_err.to_string())
            }
        }
    } else if err.is_not_found() {
        (StatusCode::NOT_FOUND, "not found".to_string())
    } else if let Some(body_err) = err.find::<warp::filters::body::BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, body_err.to_string())
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, "payload too large".to_string())
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "method not allowed".to_string())
    } else {
        tracing::error!("unhandled rejection: {:?}", err);
        (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
    };
    Ok(error_reply(status, &message))
}
