use crate::model::{Id, window::yes};
use serde::{Deserialize, Serialize};

///
/// DataOrigin
/// Where a table's rows come from.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[remain::sorted]
pub enum DataOrigin {
    Datasource,
    Hql,
    #[default]
    Table,
}

///
/// Table
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Table {
    pub id: Id,
    /// Entity name of the table.
    pub name: String,
    pub db_table_name: String,
    #[serde(default)]
    pub data_origin: DataOrigin,
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl Table {
    #[must_use]
    pub fn column_by_db_name(&self, db_column_name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|column| column.db_column_name.eq_ignore_ascii_case(db_column_name))
    }

    #[must_use]
    pub fn is_table_based(&self) -> bool {
        self.data_origin == DataOrigin::Table
    }
}

///
/// Column
///
/// A physical column. `reference_id` classifies its value kind;
/// `reference_value_id` narrows it (the list, selector or tree definition).
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Column {
    pub id: Id,
    pub table_id: Id,
    pub name: String,
    pub db_column_name: String,
    pub reference_id: Id,
    #[serde(default)]
    pub reference_value_id: Option<Id>,
    #[serde(default)]
    pub mandatory: bool,
    #[serde(default = "yes")]
    pub updatable: bool,
    #[serde(default)]
    pub link_to_parent: bool,
    /// Legacy process bound to a button column.
    #[serde(default)]
    pub process_id: Option<Id>,
    #[serde(default)]
    pub process_definition_id: Option<Id>,
    #[serde(default)]
    pub read_only_logic: Option<String>,
}
