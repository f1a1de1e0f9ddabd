use crate::model::Id;
use serde::{Deserialize, Serialize};

///
/// Window
/// Top-level UI container of ordered tabs.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Window {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub tabs: Vec<Tab>,
}

impl Window {
    #[must_use]
    pub fn tab(&self, tab_id: &str) -> Option<&Tab> {
        self.tabs.iter().find(|tab| tab.id == tab_id)
    }

    /// Nearest tab before `tab_id` one level up, in window order.
    #[must_use]
    pub fn parent_tab(&self, tab_id: &str) -> Option<&Tab> {
        let index = self.tabs.iter().position(|tab| tab.id == tab_id)?;
        let level = self.tabs[index].level;
        if level == 0 {
            return None;
        }

        self.tabs[..index]
            .iter()
            .rev()
            .find(|tab| tab.level + 1 == level)
    }
}

///
/// Tab
///
/// A grid/form view bound to one table. `level` 0 is the window root; the
/// parent of a nested tab is the nearest preceding tab one level up.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Tab {
    pub id: Id,
    pub window_id: Id,
    pub table_id: Id,
    pub name: String,
    #[serde(default)]
    pub level: u32,
    #[serde(default)]
    pub display_logic: Option<String>,
    #[serde(default)]
    pub filter_clause: Option<String>,
    #[serde(default = "yes")]
    pub active: bool,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl Tab {
    #[must_use]
    pub fn field(&self, field_id: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.id == field_id)
    }
}

///
/// Field
///
/// One UI-exposed property. A field without a column is virtual and skips
/// every column-dependent resolution step.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Field {
    pub id: Id,
    pub tab_id: Id,
    pub name: String,
    #[serde(default)]
    pub column_id: Option<Id>,
    #[serde(default)]
    pub display_logic: Option<String>,
    #[serde(default = "yes")]
    pub active: bool,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default = "yes")]
    pub displayed: bool,
    #[serde(default)]
    pub shown_in_grid: bool,
    #[serde(default)]
    pub grid_position: Option<u32>,
    #[serde(default)]
    pub sequence: Option<u32>,
}

impl Field {
    #[must_use]
    pub const fn is_virtual(&self) -> bool {
        self.column_id.is_none()
    }
}

pub(crate) const fn yes() -> bool {
    true
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn tab(id: &str, level: u32) -> Tab {
        Tab {
            id: Id::from(id),
            window_id: Id::from("W"),
            table_id: Id::from("T"),
            name: id.to_string(),
            level,
            display_logic: None,
            filter_clause: None,
            active: true,
            fields: vec![],
        }
    }

    #[test]
    fn parent_tab_is_nearest_preceding_lower_level() {
        let window = Window {
            id: Id::from("W"),
            name: "W".into(),
            tabs: vec![
                tab("H", 0),
                tab("L1", 1),
                tab("L2", 2),
                tab("L1b", 1),
                tab("L2b", 2),
            ],
        };

        assert!(window.parent_tab("H").is_none());
        assert_eq!(window.parent_tab("L1").unwrap().id, "H");
        assert_eq!(window.parent_tab("L2").unwrap().id, "L1");
        assert_eq!(window.parent_tab("L2b").unwrap().id, "L1b");
        assert!(window.parent_tab("missing").is_none());
    }
}
