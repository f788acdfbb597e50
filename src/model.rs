//! Lookup-table entry and its create/update payloads.

/// One stored row, independent of the table's column names.
#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct Entry {
    pub id: String,
    pub name: String,
    pub abbreviation: String,
    pub description: String,
    pub is_active: bool,
}

/// Fields for a new entry; the id is allocated by the repository.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewEntry {
    pub name: String,
    pub abbreviation: String,
    pub description: String,
    pub is_active: bool,
}

impl NewEntry {
    pub fn into_entry(self, id: String) -> Entry {
        Entry {
            id,
            name: self.name,
            abbreviation: self.abbreviation,
            description: self.description,
            is_active: self.is_active,
        }
    }
}

/// Partial update. `None` keeps the stored value; `Some` overwrites it,
/// including `Some(false)` and `Some(String::new())`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntryPatch {
    pub name: Option<String>,
    pub abbreviation: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

impl EntryPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.abbreviation.is_none()
            && self.description.is_none()
            && self.is_active.is_none()
    }

    /// Merge onto `current`; the id never changes.
    pub fn apply(self, current: Entry) -> Entry {
        Entry {
            id: current.id,
            name: self.name.unwrap_or(current.name),
            abbreviation: self.abbreviation.unwrap_or(current.abbreviation),
            description: self.description.unwrap_or(current.description),
            is_active: self.is_active.unwrap_or(current.is_active),
        }
    }
}
