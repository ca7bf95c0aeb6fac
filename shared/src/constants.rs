pub static ROOT_API: &'static str = "api";
pub static API_HEALTH: &'static str = "health";
pub static API_AUTH: &'static str = "auth";
pub static API_REGISTER: &'static str = "register";
pub static API_LOGIN: &'static str = "login";
pub static API_NOTES: &'static str = "notes";

pub static STORAGE_TOKEN_KEY: &'static str = "token";

pub static HEADER_AUTHORIZATION: &'static str = "Authorization";
pub static HEADER_CONTENT_TYPE: &'static str = "Content-Type";
pub static CONTENT_TYPE_JSON: &'static str = "application/json";

pub fn path_register() -> String {
    format!("/{API_AUTH}/{API_REGISTER}")
}

pub fn path_login() -> String {
    format!("/{API_AUTH}/{API_LOGIN}")
}

pub fn path_notes() -> String {
    format!("/{API_NOTES}")
}

pub fn path_note(id: i64) -> String {
    format!("/{API_NOTES}/{id}")
}
