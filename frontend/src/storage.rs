use web_sys::Storage;

/// Durable home of the bearer token. Absence means logged out.
pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

pub struct LocalStorage {
    key: &'static str,
}

impl LocalStorage {
    pub fn new(key: &'static str) -> Self {
        Self { key }
    }

    fn storage() -> Option<Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .and_then(|s| s)
    }
}

impl TokenStore for LocalStorage {
    fn load(&self) -> Option<String> {
        Self::storage()
            .and_then(|s| s.get_item(self.key).ok())
            .and_then(|value| value)
            .filter(|token| !token.is_empty())
    }

    fn save(&self, token: &str) {
        match Self::storage() {
            Some(storage) => {
                if let Err(err) = storage.set_item(self.key, token) {
                    log::error!("token save: {:?}", err);
                }
            }
            None => log::warn!("localStorage is not available, session will not survive a reload"),
        }
    }

    fn clear(&self) {
        if let Some(storage) = Self::storage() {
            if let Err(err) = storage.remove_item(self.key) {
                log::error!("token clear: {:?}", err);
            }
        }
    }
}
