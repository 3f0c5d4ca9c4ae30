//! Notes kept next to the drawing board.
//!
//! The canvas never looks inside a note. Everything here talks to a
//! [`NotesStore`], which may be a hosted table or the local
//! [`InMemoryNotes`].

mod memory;
mod notepad;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::NotesError;
use crate::user::UserId;

pub use memory::InMemoryNotes;
pub use notepad::{NEW_NOTE_TITLE, Notepad};

/// One row of the notes table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    #[serde(rename = "user_id")]
    pub owner: UserId,
    pub title: String,
    pub content: String,
    /// Milliseconds since the UNIX epoch
    pub created_at: u64,
    /// Milliseconds since the UNIX epoch
    pub updated_at: u64,
}

impl Note {
    /// Case-insensitive substring match on title or content
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.title.to_lowercase().contains(&term) || self.content.to_lowercase().contains(&term)
    }

    pub fn apply(&mut self, patch: &NotePatch, now: u64) {
        if let Some(title) = &patch.title {
            self.title.clone_from(title);
        }
        if let Some(content) = &patch.content {
            self.content.clone_from(content);
        }
        self.updated_at = now;
    }
}

/// Fields to change on an existing note; `None` leaves a field alone
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl NotePatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: None,
        }
    }

    pub fn content(content: impl Into<String>) -> Self {
        Self {
            title: None,
            content: Some(content.into()),
        }
    }
}

/// Where notes live
pub trait NotesStore: Send + Sync {
    /// Notes of `owner`, most recently updated first
    fn list(&self, owner: &UserId) -> Result<Vec<Note>, NotesError>;

    fn create(&self, owner: &UserId, title: &str, content: &str) -> Result<Note, NotesError>;

    fn update(&self, id: Uuid, patch: &NotePatch) -> Result<(), NotesError>;

    fn delete(&self, id: Uuid) -> Result<(), NotesError>;

    /// Notes of `owner` whose title or content contains `term`, ignoring case
    fn search(&self, owner: &UserId, term: &str) -> Result<Vec<Note>, NotesError>;
}

/// Parse note rows as returned by the hosted table
pub fn rows_from_json(json: &str) -> Result<Vec<Note>, NotesError> {
    Ok(serde_json::from_str(json)?)
}

pub fn rows_to_json(notes: &[Note]) -> Result<String, NotesError> {
    Ok(serde_json::to_string(notes)?)
}
