pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}
