use crate::Role;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Display and role record keyed by `Identity::id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub name: String,
    pub role: Role,
    pub avatar_url: Option<String>,
}

impl Profile {
    pub fn belongs_to(&self, identity_id: Uuid) -> bool {
        self.id == identity_id
    }
}
