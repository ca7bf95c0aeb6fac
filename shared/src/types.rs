use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct UserView {
    pub id: i64,
    pub email: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserView,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserView>,
}

/// Body of any non-2xx response. `error` is absent when the server had
/// nothing useful to say.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct NoteSource {
    pub id: i64,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct NewNote {
    pub text: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct DeletedResponse {
    pub message: String,
    pub id: i64,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct HealthResponse {
    pub status: String,
}
