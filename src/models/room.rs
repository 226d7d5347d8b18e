//! Room model.
//!
//! Rooms are classified by name: any room whose name contains `"lab"`
//! (case-insensitive) is a laboratory room, everything else is a lecture
//! room. Laboratory sessions prefer laboratory rooms and vice versa.

use serde::{Deserialize, Serialize};

/// Classification of a room, derived from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomKind {
    Lecture,
    Laboratory,
}

/// A physical room sessions are placed into.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Stable identifier.
    pub id: String,
    /// Display name (e.g. `"Room 204"`, `"Computer Lab 1"`).
    pub name: String,
}

impl Room {
    /// Creates a room.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Room classification based on the display name.
    pub fn kind(&self) -> RoomKind {
        if self.name.to_lowercase().contains("lab") {
            RoomKind::Laboratory
        } else {
            RoomKind::Lecture
        }
    }
}
