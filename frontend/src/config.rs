use shared::constants::{ROOT_API, STORAGE_TOKEN_KEY};

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_base: String,
    pub storage_key: &'static str,
}

impl Default for ClientConfig {
    /// The API base is fixed at build time: `NOTES_API_BASE=https://host/api trunk build`.
    fn default() -> Self {
        let api_base = match option_env!("NOTES_API_BASE") {
            Some(base) if !base.is_empty() => base.to_string(),
            _ => format!("/{ROOT_API}"),
        };
        Self {
            api_base,
            storage_key: STORAGE_TOKEN_KEY,
        }
    }
}
