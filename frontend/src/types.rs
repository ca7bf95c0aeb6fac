use shared::types::NoteSource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: i64,
    pub text: String,
    pub created_at: Option<String>,
}

impl From<NoteSource> for Note {
    fn from(src: NoteSource) -> Self {
        Self {
            id: src.id,
            text: src.text,
            created_at: src.created_at,
        }
    }
}

impl Note {
    /// `2024-05-01T10:20:30.123Z` becomes `2024-05-01 10:20`.
    pub fn created_label(&self) -> Option<String> {
        self.created_at
            .as_deref()
            .and_then(|date| date.get(..16))
            .map(|date| date.replacen('T', " ", 1))
    }
}
