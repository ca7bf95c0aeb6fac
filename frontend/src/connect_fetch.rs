use std::rc::Rc;

use futures::future::LocalBoxFuture;
use futures::FutureExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

use shared::constants::{CONTENT_TYPE_JSON, HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE};
use shared::types::ErrorResponse;
use shared::utils::{bearer, is_success};

use crate::error::{ActionError, FetchError};
use crate::session::Session;

pub const STATUS_UNAUTHORIZED: u16 = 401;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Json(String),
    Raw(Vec<u8>),
}

pub fn json_body<T: Serialize>(data: &T) -> Result<Body, FetchError> {
    Ok(Body::Json(serde_json::to_string(data)?))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Body>,
}

impl ApiRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        is_success(self.status)
    }

    pub fn json<R: DeserializeOwned>(&self) -> Result<R, FetchError> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// The server's own explanation, if the body carries one.
    pub fn error_message(&self) -> Option<String> {
        serde_json::from_str::<ErrorResponse>(&self.body)
            .ok()
            .and_then(|data| data.error)
            .filter(|message| !message.is_empty())
    }
}

pub trait Transport {
    fn send(&self, request: ApiRequest) -> LocalBoxFuture<'_, Result<ApiResponse, FetchError>>;
}

/// `window.fetch` underneath.
pub struct FetchTransport;

impl Transport for FetchTransport {
    fn send(&self, request: ApiRequest) -> LocalBoxFuture<'_, Result<ApiResponse, FetchError>> {
        fetch(request).boxed_local()
    }
}

async fn fetch(request: ApiRequest) -> Result<ApiResponse, FetchError> {
    let opts = RequestInit::new();
    opts.set_method(request.method.as_str());
    match &request.body {
        Some(Body::Json(text)) => opts.set_body(&JsValue::from_str(text)),
        Some(Body::Raw(bytes)) => opts.set_body(&JsValue::from(js_sys::Uint8Array::from(bytes.as_slice()))),
        None => {}
    }

    let req = Request::new_with_str_and_init(&request.url, &opts)?;
    for (name, value) in request.headers.iter() {
        req.headers().set(name, value)?;
    }

    let window = web_sys::window().ok_or_else(|| FetchError::Network("window is not available".to_string()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&req)).await?;
    let resp: Response = resp_value.dyn_into()?;
    let status = resp.status();
    let body = JsFuture::from(resp.text()?).await?.as_string().unwrap_or_default();

    Ok(ApiResponse { status, body })
}

/// Outcome of an authenticated call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Whatever the server answered, other than 401.
    Response(ApiResponse),
    /// The server rejected the token; the session is already gone.
    SessionExpired,
    Failed(FetchError),
}

impl Reply {
    pub fn into_result(self) -> Result<ApiResponse, ActionError> {
        match self {
            Reply::Response(response) => Ok(response),
            Reply::SessionExpired => Err(ActionError::SessionExpired),
            Reply::Failed(err) => Err(ActionError::Fetch(err)),
        }
    }
}

#[derive(Clone)]
pub struct ApiClient {
    base: String,
    transport: Rc<dyn Transport>,
    session: Session,
}

impl ApiClient {
    pub fn new(base: &str, transport: Rc<dyn Transport>, session: Session) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
            transport,
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn request(&self, method: Method, path: &str, body: Option<Body>, token: Option<&str>) -> ApiRequest {
        let mut headers = Vec::new();
        if let Some(token) = token {
            headers.push((HEADER_AUTHORIZATION.to_string(), bearer(token)));
        }
        if let Some(Body::Json(_)) = body {
            headers.push((HEADER_CONTENT_TYPE.to_string(), CONTENT_TYPE_JSON.to_string()));
        }
        ApiRequest {
            method,
            url: format!("{}{}", self.base, path),
            headers,
            body,
        }
    }

    /// Unauthenticated endpoints (register, login). A 401 here is just an
    /// answer, not an expired session.
    pub async fn send(&self, method: Method, path: &str, body: Option<Body>) -> Result<ApiResponse, FetchError> {
        log::debug!("{} {path}", method.as_str());
        let result = self.transport.send(self.request(method, path, body, None)).await;
        if let Err(err) = &result {
            log::error!("{} {path}: {err}", method.as_str());
        }
        result
    }

    pub async fn call(&self, method: Method, path: &str, body: Option<Body>) -> Reply {
        log::debug!("{} {path}", method.as_str());
        let token = self.session.token();
        let request = self.request(method, path, body, token.as_deref());
        match self.transport.send(request).await {
            Ok(response) if response.status == STATUS_UNAUTHORIZED => {
                log::warn!("{} {path}: token rejected, ending session", method.as_str());
                self.session.end();
                Reply::SessionExpired
            }
            Ok(response) => Reply::Response(response),
            Err(err) => {
                log::error!("{} {path}: {err}", method.as_str());
                Reply::Failed(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;
    use crate::test_utils::Fixture;
    use crate::types::Note;

    #[test]
    fn bearer_header_follows_session() {
        let fx = Fixture::with_token("abc");
        fx.transport.respond(200, "[]");
        block_on(fx.client.call(Method::Get, "/notes", None));

        fx.state.session.end();
        fx.transport.respond(200, "[]");
        block_on(fx.client.call(Method::Get, "/notes", None));

        let requests = fx.transport.requests();
        assert_eq!(requests[0].header("authorization"), Some("Bearer abc"));
        assert_eq!(requests[1].header("authorization"), None);
    }

    #[test]
    fn content_type_only_for_json_bodies() {
        let fx = Fixture::with_token("abc");
        for _ in 0..3 {
            fx.transport.respond(200, "{}");
        }
        block_on(fx.client.call(Method::Get, "/notes", None));
        block_on(fx.client.call(Method::Post, "/notes", Some(Body::Json("{}".to_string()))));
        block_on(fx.client.call(Method::Post, "/notes", Some(Body::Raw(vec![1, 2, 3]))));

        let requests = fx.transport.requests();
        assert_eq!(requests[0].header("content-type"), None);
        assert_eq!(requests[1].header("content-type"), Some("application/json"));
        assert_eq!(requests[2].header("content-type"), None);
    }

    #[test]
    fn url_joins_base_and_path() {
        let fx = Fixture::new();
        fx.transport.respond(200, "{}");
        block_on(fx.client.send(Method::Post, "/auth/login", None)).unwrap();
        assert_eq!(fx.transport.requests()[0].url, "http://api.test/api/auth/login");
    }

    #[test]
    fn unauthorized_ends_session_before_caller_sees_it() {
        let fx = Fixture::with_token("abc");
        fx.state.session.notes().lock_mut().push_cloned(Note { id: 1, text: "a".to_string(), created_at: None });
        fx.transport.respond(401, r#"{"msg":"Token has expired"}"#);

        let reply = block_on(fx.client.call(Method::Delete, "/notes/1", None));

        assert_eq!(reply, Reply::SessionExpired);
        assert!(!fx.state.session.is_authenticated());
        assert_eq!(fx.store.stored(), None);
        assert!(fx.state.session.notes().lock_ref().is_empty());
    }

    #[test]
    fn public_send_does_not_intercept() {
        let fx = Fixture::with_token("abc");
        fx.transport.respond(401, r#"{"error":"invalid credentials"}"#);
        let response = block_on(fx.client.send(Method::Post, "/auth/login", None)).unwrap();
        assert_eq!(response.status, 401);
        assert_eq!(response.error_message().as_deref(), Some("invalid credentials"));
        assert!(fx.state.session.is_authenticated());
        assert_eq!(fx.transport.requests()[0].header("authorization"), None);
    }

    #[test]
    fn transport_failure_is_reported() {
        let fx = Fixture::with_token("abc");
        fx.transport.fail(FetchError::Network("Failed to fetch".to_string()));
        let reply = block_on(fx.client.call(Method::Get, "/notes", None));
        assert_eq!(reply, Reply::Failed(FetchError::Network("Failed to fetch".to_string())));
        assert!(fx.state.session.is_authenticated());
    }

    #[test]
    fn error_message_needs_a_json_error_field() {
        let plain = ApiResponse { status: 500, body: "<html>oops</html>".to_string() };
        let empty = ApiResponse { status: 400, body: r#"{"error":""}"#.to_string() };
        assert_eq!(plain.error_message(), None);
        assert_eq!(empty.error_message(), None);
    }
}
