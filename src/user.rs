use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Storage key the identifier is persisted under
pub const USER_ID_KEY: &str = "user_id";

/// Stable per-install identifier used as the owner of notes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Load the persisted identifier, or create one on first run
    pub fn load_or_create(storage: Option<&dyn eframe::Storage>) -> Self {
        if let Some(id) = storage.and_then(|s| eframe::get_value::<UserId>(s, USER_ID_KEY)) {
            return id;
        }
        let id = Self::generate();
        log::info!("Generated user id {id}");
        id
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}
