use std::sync::Arc;

use warp::http::StatusCode;
use warp::path;
use warp::{Filter, Rejection, Reply, reply};

use shared::constants::{API_AUTH, API_HEALTH, API_LOGIN, API_NOTES, API_REGISTER, ROOT_API};
use shared::types::{Credentials, DeletedResponse, HealthResponse, LoginResponse, NewNote, NoteSource, RegisterResponse, UserView};

use crate::error::{error_reply, reject_store};
use crate::filters::{with_auth, with_state, BODY_LIMIT};
use crate::state::AppState;
use crate::utils::{hash_password, new_salt, normalize_email, verify_password};

pub fn api_routes(state: Arc<AppState>) -> impl Filter<Extract=(impl Reply, ), Error=Rejection> + Clone {
    let health = warp::path(ROOT_API)
        .and(warp::path(API_HEALTH))
        .and(path::end())
        .and(warp::get())
        .map(|| reply::json(&HealthResponse { status: "ok".to_string() }));

    let register = warp::path(ROOT_API)
        .and(warp::path(API_AUTH))
        .and(warp::path(API_REGISTER))
        .and(path::end())
        .and(warp::post())
        .and(warp::body::content_length_limit(BODY_LIMIT))
        .and(warp::body::json())
        .and(with_state(state.clone()))
        .and_then(route_register);

    let login = warp::path(ROOT_API)
        .and(warp::path(API_AUTH))
        .and(warp::path(API_LOGIN))
        .and(path::end())
        .and(warp::post())
        .and(warp::body::content_length_limit(BODY_LIMIT))
        .and(warp::body::json())
        .and(with_state(state.clone()))
        .and_then(route_login);

    let notes_list = warp::path(ROOT_API)
        .and(warp::path(API_NOTES))
        .and(path::end())
        .and(warp::get())
        .and(with_auth(state.clone()))
        .and(with_state(state.clone()))
        .and_then(route_notes_list);

    let notes_create = warp::path(ROOT_API)
        .and(warp::path(API_NOTES))
        .and(path::end())
        .and(warp::post())
        .and(with_auth(state.clone()))
        .and(warp::body::content_length_limit(BODY_LIMIT))
        .and(warp::body::json())
        .and(with_state(state.clone()))
        .and_then(route_notes_create);

    let notes_delete = warp::path(ROOT_API)
        .and(warp::path(API_NOTES))
        .and(path::param::<i64>())
        .and(path::end())
        .and(warp::delete())
        .and(with_auth(state.clone()))
        .and(with_state(state))
        .and_then(route_notes_delete);

    health
        .or(register)
        .or(login)
        .or(notes_list)
        .or(notes_create)
        .or(notes_delete)
}

pub async fn route_register(data: Credentials, state: Arc<AppState>) -> Result<impl Reply, Rejection> {
    let email = normalize_email(&data.email);
    if email.is_empty() || data.password.is_empty() {
        return Ok(error_reply(StatusCode::BAD_REQUEST, "email and password are required"));
    }
    let salt = new_salt();
    let password_hash = hash_password(&data.password, &salt);
    let created = state.store.create_user(&email, &password_hash, &salt).await.map_err(reject_store)?;
    match created {
        Some(user) => {
            tracing::info!("registered user {}", user.idu);
            Ok(reply::with_status(
                reply::json(&RegisterResponse {
                    message: "registered".to_string(),
                    user: UserView::from(&user),
                }),
                StatusCode::CREATED,
            ))
        }
        None => Ok(error_reply(StatusCode::CONFLICT, "email already registered")),
    }
}

pub async fn route_login(data: Credentials, state: Arc<AppState>) -> Result<impl Reply, Rejection> {
    let email = normalize_email(&data.email);
    let user = state.store.find_user(&email).await.map_err(reject_store)?;
    match user {
        Some(user) if verify_password(&data.password, &user.salt, &user.password_hash) => {
            let access_token = state.open_session(user.idu);
            tracing::info!("user {} logged in", user.idu);
            Ok(reply::with_status(
                reply::json(&LoginResponse {
                    access_token,
                    user: Some(UserView::from(&user)),
                }),
                StatusCode::OK,
            ))
        }
        _ => Ok(error_reply(StatusCode::UNAUTHORIZED, "invalid credentials")),
    }
}

pub async fn route_notes_list(idu: i64, state: Arc<AppState>) -> Result<impl Reply, Rejection> {
    let notes = state.store.list_notes(idu).await.map_err(reject_store)?;
    let notes = notes.into_iter().map(NoteSource::from).collect::<Vec<_>>();
    Ok(reply::json(&notes))
}

pub async fn route_notes_create(idu: i64, data: NewNote, state: Arc<AppState>) -> Result<impl Reply, Rejection> {
    let text = data.text.trim();
    if text.is_empty() {
        return Ok(error_reply(StatusCode::BAD_REQUEST, "text is required"));
    }
    let note = state.store.create_note(idu, text).await.map_err(reject_store)?;
    Ok(reply::with_status(reply::json(&NoteSource::from(note)), StatusCode::CREATED))
}

pub async fn route_notes_delete(idn: i64, idu: i64, state: Arc<AppState>) -> Result<impl Reply, Rejection> {
    if state.store.delete_note(idu, idn).await.map_err(reject_store)? {
        Ok(reply::with_status(
            reply::json(&DeletedResponse { message: "deleted".to_string(), id: idn }),
            StatusCode::OK,
        ))
    } else {
        Ok(error_reply(StatusCode::NOT_FOUND, "note not found"))
    }
}

#[cfg(test)]
mod tests {
    use warp::http::Response;
    use warp::hyper::body::Bytes;
    use warp::test::request;

    use shared::types::ErrorResponse;

    use super::*;
    use crate::error::handle_rejection;
    use crate::store::MemoryStore;

    fn app() -> impl Filter<Extract=(impl Reply, ), Error=std::convert::Infallible> + Clone + 'static {
        let state = Arc::new(AppState::new(Arc::new(MemoryStore::default()), 6));
        api_routes(state).recover(handle_rejection)
    }

    fn credentials(email: &str, password: &str) -> Credentials {
        Credentials { email: email.to_string(), password: password.to_string() }
    }

    fn error_of(resp: &Response<Bytes>) -> String {
        serde_json::from_slice::<ErrorResponse>(resp.body()).unwrap().error.unwrap_or_default()
    }

    async fn login_token<F>(api: &F, email: &str, password: &str) -> String
        where F: Filter + 'static, F::Extract: Reply + Send
    {
        request().method("POST").path("/api/auth/register").json(&credentials(email, password)).reply(api).await;
        let resp = request().method("POST").path("/api/auth/login").json(&credentials(email, password)).reply(api).await;
        assert_eq!(resp.status(), StatusCode::OK);
        serde_json::from_slice::<LoginResponse>(resp.body()).unwrap().access_token
    }

    #[tokio::test]
    async fn health() {
        let resp = request().method("GET").path("/api/health").reply(&app()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(serde_json::from_slice::<HealthResponse>(resp.body()).unwrap().status, "ok");
    }

    #[tokio::test]
    async fn register_then_conflict() {
        let api = app();
        let resp = request().method("POST").path("/api/auth/register").json(&credentials(" A@B.c ", "pw")).reply(&api).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let data: RegisterResponse = serde_json::from_slice(resp.body()).unwrap();
        assert_eq!(data.user.email, "a@b.c");

        let resp = request().method("POST").path("/api/auth/register").json(&credentials("a@b.c", "other")).reply(&api).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        assert_eq!(error_of(&resp), "email already registered");
    }

    #[tokio::test]
    async fn register_requires_both_fields() {
        let resp = request().method("POST").path("/api/auth/register").body(r#"{"email":"a@b.c"}"#).reply(&app()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_of(&resp), "email and password are required");
    }

    #[tokio::test]
    async fn login_with_wrong_password() {
        let api = app();
        request().method("POST").path("/api/auth/register").json(&credentials("a@b.c", "pw")).reply(&api).await;
        let resp = request().method("POST").path("/api/auth/login").json(&credentials("a@b.c", "nope")).reply(&api).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(error_of(&resp), "invalid credentials");
    }

    #[tokio::test]
    async fn notes_need_a_token() {
        let api = app();
        let resp = request().method("GET").path("/api/notes").reply(&api).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let resp = request().method("GET").path("/api/notes").header("authorization", "Bearer forged").reply(&api).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(error_of(&resp), "token is invalid or expired");
    }

    #[tokio::test]
    async fn create_list_delete() {
        let api = app();
        let token = login_token(&api, "a@b.c", "pw").await;
        let auth = format!("Bearer {token}");

        let resp = request().method("POST").path("/api/notes").header("authorization", &auth)
            .json(&NewNote { text: "  Buy milk ".to_string() }).reply(&api).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let first: NoteSource = serde_json::from_slice(resp.body()).unwrap();
        assert_eq!(first.text, "Buy milk");
        assert!(first.created_at.is_some());

        request().method("POST").path("/api/notes").header("authorization", &auth)
            .json(&NewNote { text: "Call mom".to_string() }).reply(&api).await;

        let resp = request().method("GET").path("/api/notes").header("authorization", &auth).reply(&api).await;
        let notes: Vec<NoteSource> = serde_json::from_slice(resp.body()).unwrap();
        assert_eq!(notes.iter().map(|n| n.text.as_str()).collect::<Vec<_>>(), vec!["Call mom", "Buy milk"]);

        let resp = request().method("DELETE").path(&format!("/api/notes/{}", first.id)).header("authorization", &auth).reply(&api).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = request().method("DELETE").path(&format!("/api/notes/{}", first.id)).header("authorization", &auth).reply(&api).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(error_of(&resp), "note not found");
    }

    #[tokio::test]
    async fn empty_note_is_refused() {
        let api = app();
        let token = login_token(&api, "a@b.c", "pw").await;
        let resp = request().method("POST").path("/api/notes").header("authorization", format!("Bearer {token}"))
            .json(&NewNote { text: "   ".to_string() }).reply(&api).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_of(&resp), "text is required");
    }

    #[tokio::test]
    async fn notes_of_other_users_are_invisible() {
        let api = app();
        let alice = format!("Bearer {}", login_token(&api, "alice@x.y", "pw").await);
        let bob = format!("Bearer {}", login_token(&api, "bob@x.y", "pw").await);

        let resp = request().method("POST").path("/api/notes").header("authorization", &alice)
            .json(&NewNote { text: "secret".to_string() }).reply(&api).await;
        let note: NoteSource = serde_json::from_slice(resp.body()).unwrap();

        let resp = request().method("GET").path("/api/notes").header("authorization", &bob).reply(&api).await;
        assert_eq!(serde_json::from_slice::<Vec<NoteSource>>(resp.body()).unwrap().len(), 0);

        let resp = request().method("DELETE").path(&format!("/api/notes/{}", note.id)).header("authorization", &bob).reply(&api).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let resp = request().method("GET").path("/api/nothing").reply(&app()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
