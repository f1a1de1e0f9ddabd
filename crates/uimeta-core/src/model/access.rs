use crate::model::{Id, window::yes};
use serde::{Deserialize, Serialize};

///
/// WindowAccess
///
/// A role's grant on one window. Nested tab rows narrow the readable tabs;
/// when a window grant carries no tab rows every tab is readable.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct WindowAccess {
    pub role_id: Id,
    pub window_id: Id,
    #[serde(default = "yes")]
    pub active: bool,
    #[serde(default = "yes")]
    pub editable: bool,
    #[serde(default)]
    pub tab_accesses: Vec<TabAccess>,
}

impl WindowAccess {
    #[must_use]
    pub fn tab_access(&self, tab_id: &str) -> Option<&TabAccess> {
        self.tab_accesses.iter().find(|access| access.tab_id == tab_id)
    }
}

///
/// TabAccess
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TabAccess {
    pub tab_id: Id,
    #[serde(default = "yes")]
    pub active: bool,
    #[serde(default = "yes")]
    pub allow_read: bool,
    #[serde(default)]
    pub field_accesses: Vec<FieldAccess>,
}

impl TabAccess {
    #[must_use]
    pub fn field_access(&self, field_id: &str) -> Option<&FieldAccess> {
        self.field_accesses
            .iter()
            .find(|access| access.field_id == field_id)
    }
}

///
/// FieldAccess
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct FieldAccess {
    pub field_id: Id,
    #[serde(default = "yes")]
    pub active: bool,
    #[serde(default = "yes")]
    pub editable_field: bool,
    #[serde(default = "yes")]
    pub check_on_save: bool,
}

///
/// ProcessAccess
/// Explicit grant of a process definition to a role.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ProcessAccess {
    pub role_id: Id,
    pub process_definition_id: Id,
    #[serde(default = "yes")]
    pub active: bool,
}
