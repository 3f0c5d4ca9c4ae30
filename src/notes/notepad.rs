use std::sync::Arc;

use uuid::Uuid;

use super::{Note, NotePatch, NotesStore};
use crate::error::NotesError;
use crate::user::UserId;
use crate::util::time;

/// Title given to freshly created notes
pub const NEW_NOTE_TITLE: &str = "New Note";

/// What the notepad screen shows, kept in step with a [`NotesStore`]
///
/// Store failures never roll back local edits: the failure is kept as a
/// notice for the UI and the last known good list stays on screen.
pub struct Notepad {
    store: Arc<dyn NotesStore>,
    owner: UserId,
    notes: Vec<Note>,
    active: Option<Uuid>,
    search_term: String,
    notice: Option<String>,
}

impl Notepad {
    pub fn new(store: Arc<dyn NotesStore>, owner: UserId, initial: Vec<Note>) -> Self {
        let active = initial.first().map(|note| note.id);
        Self {
            store,
            owner,
            notes: initial,
            active,
            search_term: String::new(),
            notice: None,
        }
    }

    pub fn owner(&self) -> UserId {
        self.owner
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn active_id(&self) -> Option<Uuid> {
        self.active
    }

    pub fn active_note(&self) -> Option<&Note> {
        let id = self.active?;
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn select(&mut self, id: Uuid) {
        if self.notes.iter().any(|note| note.id == id) {
            self.active = Some(id);
        }
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// The last failure, if the UI has not dismissed it yet
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Reload the owner's notes from the store
    pub fn refresh(&mut self) {
        let result = self.store.list(&self.owner);
        if let Some(notes) = self.check("fetching notes", result) {
            self.replace_notes(notes);
        }
    }

    /// Create an empty note and make it active
    pub fn add_note(&mut self) -> Option<Uuid> {
        let result = self.store.create(&self.owner, NEW_NOTE_TITLE, "");
        let note = self.check("adding note", result)?;
        let id = note.id;
        self.notes.insert(0, note);
        self.active = Some(id);
        Some(id)
    }

    /// Save changed fields of a note
    pub fn update(&mut self, id: Uuid, patch: NotePatch) -> bool {
        let result = self.store.update(id, &patch);
        if self.check("updating note", result).is_none() {
            return false;
        }
        let now = time::timestamp_millis();
        if let Some(note) = self.notes.iter_mut().find(|note| note.id == id) {
            note.apply(&patch, now);
        }
        true
    }

    /// Remove a note; deleting the active note selects the first one left
    pub fn delete(&mut self, id: Uuid) -> bool {
        let result = self.store.delete(id);
        if self.check("deleting note", result).is_none() {
            return false;
        }
        self.notes.retain(|note| note.id != id);
        if self.active == Some(id) {
            self.active = self.notes.first().map(|note| note.id);
        }
        true
    }

    /// Filter by `term`; a blank term lists everything again
    pub fn search(&mut self, term: &str) {
        self.search_term = term.to_owned();
        if term.trim().is_empty() {
            self.refresh();
            return;
        }
        let result = self.store.search(&self.owner, term);
        if let Some(notes) = self.check("searching notes", result) {
            self.replace_notes(notes);
        }
    }

    fn replace_notes(&mut self, notes: Vec<Note>) {
        self.notes = notes;
        let still_there = self
            .active
            .is_some_and(|id| self.notes.iter().any(|note| note.id == id));
        if !still_there {
            self.active = self.notes.first().map(|note| note.id);
        }
    }

    fn check<T>(&mut self, what: &str, result: Result<T, NotesError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                log::error!("Error {what}: {err}");
                self.notice = Some(format!("Error {what}: {err}"));
                None
            }
        }
    }
}
