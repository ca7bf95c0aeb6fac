pub mod app_notes;
pub mod notes_client;
