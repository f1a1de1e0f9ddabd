use crate::model::{Id, window::yes};
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// ReferenceKind
///
/// Closed classification of a column or parameter reference id, resolved once
/// when a column is read. Unknown ids keep their raw value in `Other`.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
#[remain::sorted]
pub enum ReferenceKind {
    Button,
    CustomSelector,
    List,
    Other(String),
    Search,
    Table,
    TableDirectory,
    Tree,
    Window,
    YesNo,
}

impl ReferenceKind {
    pub const BUTTON_ID: &'static str = "28";
    pub const CUSTOM_SELECTOR_ID: &'static str = "95E2A8B50A254B2AAE6774B8C2F28120";
    pub const LIST_ID: &'static str = "17";
    pub const SEARCH_ID: &'static str = "30";
    pub const TABLE_DIRECTORY_ID: &'static str = "19";
    pub const TABLE_ID: &'static str = "18";
    pub const TREE_ID: &'static str = "8C57A4A2E05F4261A1FADF47C30398AD";
    pub const WINDOW_ID: &'static str = "FF80818132D8F0F30132D9BC395D0038";
    pub const YES_NO_ID: &'static str = "20";

    #[must_use]
    pub fn from_id(id: &str) -> Self {
        match id {
            Self::BUTTON_ID => Self::Button,
            Self::CUSTOM_SELECTOR_ID => Self::CustomSelector,
            Self::LIST_ID => Self::List,
            Self::SEARCH_ID => Self::Search,
            Self::TABLE_DIRECTORY_ID => Self::TableDirectory,
            Self::TABLE_ID => Self::Table,
            Self::TREE_ID => Self::Tree,
            Self::WINDOW_ID => Self::Window,
            Self::YES_NO_ID => Self::YesNo,
            other => Self::Other(other.to_string()),
        }
    }

    /// Kinds that carry a lookup configuration.
    #[must_use]
    pub const fn is_selector_bearing(&self) -> bool {
        matches!(
            self,
            Self::Table | Self::TableDirectory | Self::Search | Self::CustomSelector | Self::Tree
        )
    }

    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List)
    }

    #[must_use]
    pub const fn is_button(&self) -> bool {
        matches!(self, Self::Button)
    }

    #[must_use]
    pub const fn is_window(&self) -> bool {
        matches!(self, Self::Window)
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Button => write!(f, "button"),
            Self::CustomSelector => write!(f, "custom-selector"),
            Self::List => write!(f, "list"),
            Self::Other(id) => write!(f, "other({id})"),
            Self::Search => write!(f, "search"),
            Self::Table => write!(f, "table"),
            Self::TableDirectory => write!(f, "table-directory"),
            Self::Tree => write!(f, "tree"),
            Self::Window => write!(f, "window"),
            Self::YesNo => write!(f, "yes-no"),
        }
    }
}

///
/// Reference
///
/// A reference definition. Which of the optional parts is populated depends
/// on the kind of the column pointing at it.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Reference {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub selector: Option<Selector>,
    #[serde(default)]
    pub tree: Option<ReferencedTree>,
    #[serde(default)]
    pub list_values: Vec<ListValue>,
    /// Target window of a window reference.
    #[serde(default)]
    pub window_id: Option<Id>,
}

///
/// Selector
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Selector {
    pub id: Id,
    #[serde(default)]
    pub datasource: Option<DataSource>,
    #[serde(default)]
    pub table_id: Option<Id>,
    #[serde(default)]
    pub custom_query: bool,
    #[serde(default = "default_text_match")]
    pub text_match: String,
    #[serde(default)]
    pub fields: Vec<SelectorField>,
    #[serde(default)]
    pub display_field_id: Option<Id>,
    #[serde(default)]
    pub value_field_id: Option<Id>,
}

fn default_text_match() -> String {
    "startsWith".to_string()
}

impl Selector {
    #[must_use]
    pub fn display_field(&self) -> Option<&SelectorField> {
        self.field(self.display_field_id.as_ref()?)
    }

    #[must_use]
    pub fn value_field(&self) -> Option<&SelectorField> {
        self.field(self.value_field_id.as_ref()?)
    }

    /// First field of a manual datasource that has no table.
    #[must_use]
    pub fn manual_datasource_field(&self) -> Option<&DatasourceField> {
        self.datasource
            .as_ref()
            .filter(|ds| ds.table_id.is_none())
            .and_then(|ds| ds.fields.first())
    }

    fn field(&self, id: &Id) -> Option<&SelectorField> {
        self.fields.iter().find(|field| &field.id == id)
    }
}

///
/// DataSource
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DataSource {
    pub id: Id,
    #[serde(default)]
    pub table_id: Option<Id>,
    #[serde(default)]
    pub fields: Vec<DatasourceField>,
}

///
/// DatasourceField
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DatasourceField {
    pub name: String,
    #[serde(default)]
    pub reference_id: Option<Id>,
}

///
/// SelectorField
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SelectorField {
    pub id: Id,
    #[serde(default)]
    pub property: Option<String>,
    #[serde(default)]
    pub display_alias: Option<String>,
    #[serde(default)]
    pub datasource_field: Option<DatasourceField>,
    /// Explicit reference, consulted for custom-query selectors.
    #[serde(default)]
    pub reference_id: Option<Id>,
    #[serde(default)]
    pub outfield: bool,
    #[serde(default)]
    pub searchable: bool,
    #[serde(default = "yes")]
    pub active: bool,
}

///
/// ReferencedTree
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ReferencedTree {
    pub id: Id,
    #[serde(default)]
    pub display_property: Option<String>,
    pub value_property: String,
}

///
/// ListValue
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ListValue {
    pub id: Id,
    pub label: String,
    pub search_key: String,
    #[serde(default = "yes")]
    pub active: bool,
}

///
/// TESTS
///
