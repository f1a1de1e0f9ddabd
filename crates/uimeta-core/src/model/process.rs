use crate::model::{Id, window::yes};
use serde::{Deserialize, Serialize};

///
/// ProcessDefinition
///
/// A modern process attached to button columns or opened standalone.
/// Parameters are ordered by `sequence` when assembled.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ProcessDefinition {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub on_load: Option<String>,
    #[serde(default)]
    pub on_process: Option<String>,
    #[serde(default)]
    pub report_definition_id: Option<Id>,
}

///
/// Parameter
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Parameter {
    pub id: Id,
    pub name: String,
    pub db_column_name: String,
    pub reference_id: Id,
    #[serde(default)]
    pub reference_value_id: Option<Id>,
    #[serde(default)]
    pub mandatory: bool,
    #[serde(default)]
    pub default_value: Option<String>,
    #[serde(default)]
    pub display_logic: Option<String>,
    #[serde(default)]
    pub read_only_logic: Option<String>,
    #[serde(default)]
    pub sequence: u32,
    #[serde(default = "yes")]
    pub active: bool,
}

///
/// ProcessAction
/// A legacy process bound to a button column.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ProcessAction {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub search_key: Option<String>,
    #[serde(default)]
    pub parameters: Vec<ProcessParameter>,
}

///
/// ProcessParameter
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ProcessParameter {
    pub id: Id,
    pub name: String,
    pub db_column_name: String,
    pub reference_id: Id,
    #[serde(default)]
    pub reference_value_id: Option<Id>,
    #[serde(default)]
    pub mandatory: bool,
    #[serde(default)]
    pub is_range: bool,
    #[serde(default)]
    pub value_format: Option<String>,
    #[serde(default)]
    pub min_value: Option<String>,
    #[serde(default)]
    pub max_value: Option<String>,
    #[serde(default)]
    pub sequence: u32,
    #[serde(default = "yes")]
    pub active: bool,
}

///
/// ReportDefinition
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ReportDefinition {
    pub id: Id,
    #[serde(default)]
    pub pdf_template: Option<String>,
    #[serde(default)]
    pub xls_template: Option<String>,
    #[serde(default)]
    pub html_template: Option<String>,
    #[serde(default)]
    pub use_pdf_as_xls_template: bool,
    #[serde(default)]
    pub use_pdf_as_html_template: bool,
}
