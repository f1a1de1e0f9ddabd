//! Assembled client documents.
//!
//! Documents are created fresh per request and carry no identity beyond the
//! ids they echo. Optional keys are omitted, not nulled, unless noted.

use crate::model::Id;
use serde::Serialize;
use std::collections::BTreeMap;

///
/// WindowDocument
///

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowDocument {
    pub id: Id,
    pub name: String,
    pub tabs: Vec<TabDocument>,
}

impl WindowDocument {
    #[must_use]
    pub fn tab(&self, tab_id: &str) -> Option<&TabDocument> {
        self.tabs.iter().find(|tab| tab.id == tab_id)
    }
}

///
/// TabDocument
///

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabDocument {
    pub id: Id,
    pub name: String,
    pub window_id: Id,
    pub table_id: Id,
    pub entity_name: String,
    pub tab_level: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_tab_id: Option<Id>,
    pub parent_columns: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_logic: Option<String>,
    /// Field documents keyed by their wire key.
    pub fields: BTreeMap<String, FieldDocument>,
}

///
/// FieldDocument
///

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDocument {
    pub id: Id,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<ColumnDocument>,
    pub hql_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_name: Option<String>,
    pub is_mandatory: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_name: Option<String>,
    pub checkonsave: bool,
    pub editable_field: bool,
    pub read_only: bool,
    pub is_updatable: bool,
    pub is_parent_record_property: bool,
    pub displayed: bool,
    pub shown_in_grid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_position: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<SelectorDocument>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_list: Option<Vec<ListEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_ref_list: Option<Vec<ListEntry>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub process_definition: Option<ProcessDefinitionDocument>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub process_action: Option<ProcessActionDocument>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub referenced_entity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referenced_window_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referenced_tab_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referenced_fields: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_referenced_window_accessible: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_logic_expression: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_logic_fields: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_only_logic_expression: Option<String>,
}

///
/// ColumnDocument
///

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDocument {
    pub id: Id,
    pub name: String,
    pub db_column_name: String,
    pub reference: Id,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_value: Option<Id>,
    pub mandatory: bool,
    pub updatable: bool,
    pub link_to_parent: bool,
}

///
/// SelectorDocument
///
/// Lookup configuration. Every branch emits the same shape;
/// `selectorDefinitionId` is serialized as `null` when absent.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectorDocument {
    pub datasource_id: String,
    pub selector_definition_id: Option<Id>,
    pub sort_field: String,
    pub match_mode: String,
    pub no_count: bool,
    pub field_id: Id,
    pub display_field: String,
    pub value_field: String,
    pub selected_properties: Vec<String>,
    pub additional_properties: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_search_fields: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree_reference_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_class_name: Option<String>,
}

///
/// ListEntry
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ListEntry {
    pub id: Id,
    pub label: String,
    pub value: String,
    pub active: bool,
}

///
/// ButtonDocument
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonDocument {
    pub id: Id,
    pub name: String,
    pub action: String,
    pub icon: String,
    pub process_id: Id,
}

///
/// FieldAttachment
/// How a process hangs off the field that triggers it.
///

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldAttachment {
    pub field_id: Id,
    pub column_id: Id,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_logic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_logic_expression: Option<String>,
    pub button_text: String,
    pub field_name: String,
    pub reference: Id,
    pub button: ButtonDocument,
}

///
/// ProcessDefinitionDocument
///

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessDefinitionDocument {
    pub id: Id,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Parameters keyed by DB column name.
    pub parameters: BTreeMap<String, ParameterDocument>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_load: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_process: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_definition: Option<ReportDocument>,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<FieldAttachment>,
}

///
/// ParameterDocument
///

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDocument {
    pub id: Id,
    pub name: String,
    pub db_column_name: String,
    pub reference: Id,
    pub mandatory: bool,
    pub sequence: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<SelectorDocument>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_list: Option<Vec<ListEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_logic_expression: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_logic_fields: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_only_logic_expression: Option<String>,
}

///
/// ReportDocument
///

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDocument {
    pub id: Id,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xls_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_template: Option<String>,
    pub use_pdf_as_xls_template: bool,
    pub use_pdf_as_html_template: bool,
}

///
/// ProcessActionDocument
///

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessActionDocument {
    pub id: Id,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_key: Option<String>,
    /// Parameters in sequence order.
    pub parameters: Vec<ProcessParameterDocument>,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<FieldAttachment>,
}

///
/// ProcessParameterDocument
///

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessParameterDocument {
    pub id: Id,
    pub name: String,
    pub db_column_name: String,
    pub reference: Id,
    pub mandatory: bool,
    pub sequence: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<SelectorDocument>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_list: Option<Vec<ListEntry>>,
    pub is_range: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_value: Option<String>,
}
