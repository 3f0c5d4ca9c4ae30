use parking_lot::RwLock;
use uuid::Uuid;

use super::{Note, NotePatch, NotesStore};
use crate::error::NotesError;
use crate::user::UserId;
use crate::util::time;

/// Notes held in process memory, newest first
#[derive(Debug, Default)]
pub struct InMemoryNotes {
    notes: RwLock<Vec<Note>>,
}

impl InMemoryNotes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing rows, sorted by recency
    pub fn from_rows(mut rows: Vec<Note>) -> Self {
        rows.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Self {
            notes: RwLock::new(rows),
        }
    }

    /// Every row, newest first
    pub fn rows(&self) -> Vec<Note> {
        self.notes.read().clone()
    }

    pub fn len(&self) -> usize {
        self.notes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.read().is_empty()
    }
}

impl NotesStore for InMemoryNotes {
    fn list(&self, owner: &UserId) -> Result<Vec<Note>, NotesError> {
        Ok(self
            .notes
            .read()
            .iter()
            .filter(|note| note.owner == *owner)
            .cloned()
            .collect())
    }

    fn create(&self, owner: &UserId, title: &str, content: &str) -> Result<Note, NotesError> {
        let now = time::timestamp_millis();
        let note = Note {
            id: Uuid::new_v4(),
            owner: *owner,
            title: title.to_owned(),
            content: content.to_owned(),
            created_at: now,
            updated_at: now,
        };
        self.notes.write().insert(0, note.clone());
        Ok(note)
    }

    fn update(&self, id: Uuid, patch: &NotePatch) -> Result<(), NotesError> {
        let mut notes = self.notes.write();
        let index = notes
            .iter()
            .position(|note| note.id == id)
            .ok_or(NotesError::NotFound(id))?;
        let mut note = notes.remove(index);
        note.apply(patch, time::timestamp_millis());
        notes.insert(0, note);
        Ok(())
    }

    fn delete(&self, id: Uuid) -> Result<(), NotesError> {
        let mut notes = self.notes.write();
        let before = notes.len();
        notes.retain(|note| note.id != id);
        if notes.len() == before {
            return Err(NotesError::NotFound(id));
        }
        Ok(())
    }

    fn search(&self, owner: &UserId, term: &str) -> Result<Vec<Note>, NotesError> {
        Ok(self
            .notes
            .read()
            .iter()
            .filter(|note| note.owner == *owner && note.matches(term))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_is_per_owner_and_newest_first() {
        let store = InMemoryNotes::new();
        let me = UserId::generate();
        let other = UserId::generate();

        let first = store.create(&me, "first", "").unwrap();
        store.create(&other, "theirs", "").unwrap();
        let second = store.create(&me, "second", "").unwrap();

        let mine = store.list(&me).unwrap();
        assert_eq!(mine.iter().map(|n| n.id).collect::<Vec<_>>(), vec![second.id, first.id]);
    }

    #[test]
    fn test_update_moves_note_to_front() {
        let store = InMemoryNotes::new();
        let me = UserId::generate();
        let old = store.create(&me, "old", "").unwrap();
        store.create(&me, "new", "").unwrap();

        store.update(old.id, &NotePatch::title("renamed")).unwrap();
        let mine = store.list(&me).unwrap();
        assert_eq!(mine[0].id, old.id);
        assert_eq!(mine[0].title, "renamed");
        assert!(mine[0].updated_at >= old.updated_at);
    }

    #[test]
    fn test_missing_ids_are_reported() {
        let store = InMemoryNotes::new();
        let id = Uuid::new_v4();
        assert!(matches!(store.update(id, &NotePatch::default()), Err(NotesError::NotFound(_))));
        assert!(matches!(store.delete(id), Err(NotesError::NotFound(_))));
    }

    #[test]
    fn test_search_title_or_content() {
        let store = InMemoryNotes::new();
        let me = UserId::generate();
        store.create(&me, "Groceries", "apples").unwrap();
        store.create(&me, "Ideas", "paint a GROCERY store").unwrap();
        store.create(&me, "Todo", "call mum").unwrap();
        store.create(&UserId::generate(), "groceries", "").unwrap();

        let hits = store.search(&me, "grocer").unwrap();
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|n| n.owner == me));
    }

    #[test]
    fn test_from_rows_sorts_by_recency() {
        let me = UserId::generate();
        let row = |title: &str, updated_at| Note {
            id: Uuid::new_v4(),
            owner: me,
            title: title.to_owned(),
            content: String::new(),
            created_at: 0,
            updated_at,
        };
        let store = InMemoryNotes::from_rows(vec![row("a", 1), row("c", 3), row("b", 2)]);
        let titles: Vec<String> = store.list(&me).unwrap().into_iter().map(|n| n.title).collect();
        assert_eq!(titles, ["c", "b", "a"]);
    }
}
