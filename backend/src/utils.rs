use std::fmt::LowerHex;

use sha2::{Digest, Sha512};
use uuid::Uuid;

pub fn get_hash(text: String) -> String {
    format!("{:x}", hash_prepare(text))
}

fn hash_prepare(text: String) -> impl LowerHex {
    let mut hasher = Sha512::new();
    hasher.update(text);
    hasher.finalize()
}

pub fn new_salt() -> String {
    Uuid::new_v4().simple().to_string()
}

pub fn new_token() -> String {
    get_hash(format!("{}-{}", Uuid::new_v4(), Uuid::new_v4()))
}

pub fn hash_password(password: &str, salt: &str) -> String {
    get_hash(format!("{salt}:{password}"))
}

pub fn verify_password(password: &str, salt: &str, password_hash: &str) -> bool {
    hash_password(password, salt) == password_hash
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
