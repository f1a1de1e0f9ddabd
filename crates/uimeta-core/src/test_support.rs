//! Canonical sales-order catalog shared by unit tests.

use crate::{
    model::{Id, reference::SelectorField},
    store::InMemoryStore,
};
use uimeta_config::Config;

pub(crate) const ORDER_WINDOW: &str = "WIN-order";
pub(crate) const ORDER_TAB: &str = "TAB-order";
pub(crate) const ORDER_LINE_TAB: &str = "TAB-order-line";

pub(crate) const ORDER_PARTNER_FIELD: &str = "FLD-partner";
pub(crate) const ORDER_CATEGORY_FIELD: &str = "FLD-category";
pub(crate) const ORDER_DOC_STATUS_FIELD: &str = "FLD-docstatus";
pub(crate) const ORDER_POST_FIELD: &str = "FLD-posted";

pub(crate) const ORDER_PARTNER_COLUMN: &str = "COL-order-partner";
pub(crate) const ORDER_CATEGORY_COLUMN: &str = "COL-order-category";
pub(crate) const ORDER_DOC_STATUS_COLUMN: &str = "COL-order-docstatus";
pub(crate) const ORDER_POST_COLUMN: &str = "COL-order-posted";

pub(crate) const PARTNER_SELECTOR_REF: &str = "REF-partner-selector";
pub(crate) const PARTNER_TREE_REF: &str = "REF-partner-tree";
pub(crate) const STATUS_LIST_REF: &str = "REF-status";

pub(crate) const POST_PROCESS: &str = "PROC-post";

const CATALOG: &str = r#"{
    "windows": [
        {
            "id": "WIN-order",
            "name": "Sales Order",
            "tabs": [
                {
                    "id": "TAB-order", "window_id": "WIN-order", "table_id": "TBL-order",
                    "name": "Header", "level": 0, "filter_clause": "e.salesTransaction = true",
                    "fields": [
                        { "id": "FLD-partner", "tab_id": "TAB-order", "name": "Business Partner", "column_id": "COL-order-partner", "shown_in_grid": true, "grid_position": 10 },
                        { "id": "FLD-category", "tab_id": "TAB-order", "name": "Partner Category", "column_id": "COL-order-category" },
                        { "id": "FLD-docstatus", "tab_id": "TAB-order", "name": "Document Status", "column_id": "COL-order-docstatus", "display_logic": "@Processed@='N'" },
                        { "id": "FLD-processed", "tab_id": "TAB-order", "name": "Processed", "column_id": "COL-order-processed" },
                        { "id": "FLD-posted", "tab_id": "TAB-order", "name": "Post", "column_id": "COL-order-posted" },
                        { "id": "FLD-reactivate", "tab_id": "TAB-order", "name": "Reactivate", "column_id": "COL-order-reactivate" },
                        { "id": "FLD-description", "tab_id": "TAB-order", "name": "Description", "column_id": "COL-order-description", "display_logic": "@#AD_Role_ID@='R-other'" },
                        { "id": "FLD-total", "tab_id": "TAB-order", "name": "Grand Total", "column_id": "COL-order-total", "active": false },
                        { "id": "FLD-poref", "tab_id": "TAB-order", "name": "Order Reference", "column_id": "COL-order-poref", "display_logic": "@POReference@ = = (" },
                        { "id": "FLD-notes", "tab_id": "TAB-order", "name": "Quick Notes" }
                    ]
                },
                {
                    "id": "TAB-order-line", "window_id": "WIN-order", "table_id": "TBL-order-line",
                    "name": "Lines", "level": 1,
                    "fields": [
                        { "id": "FLD-line-order", "tab_id": "TAB-order-line", "name": "Order", "column_id": "COL-line-order" },
                        { "id": "FLD-line-no", "tab_id": "TAB-order-line", "name": "Line No.", "column_id": "COL-line-no" }
                    ]
                },
                {
                    "id": "TAB-order-tax", "window_id": "WIN-order", "table_id": "TBL-order-line",
                    "name": "Taxes", "level": 1, "display_logic": "@IsTaxIncluded@='Y'"
                }
            ]
        },
        {
            "id": "WIN-partner",
            "name": "Business Partner",
            "tabs": [
                {
                    "id": "TAB-partner", "window_id": "WIN-partner", "table_id": "TBL-partner",
                    "name": "Partner", "level": 0,
                    "fields": [
                        { "id": "FLD-bp-name", "tab_id": "TAB-partner", "name": "Name", "column_id": "COL-partner-name" },
                        { "id": "FLD-bp-value", "tab_id": "TAB-partner", "name": "Search Key", "column_id": "COL-partner-value" },
                        { "id": "FLD-bp-group", "tab_id": "TAB-partner", "name": "Category", "column_id": "COL-partner-group", "displayed": false }
                    ]
                },
                {
                    "id": "TAB-category", "window_id": "WIN-partner", "table_id": "TBL-category",
                    "name": "Category", "level": 1, "active": false,
                    "fields": [
                        { "id": "FLD-cat-name", "tab_id": "TAB-category", "name": "Name", "column_id": "COL-category-name" }
                    ]
                }
            ]
        }
    ],
    "tables": [
        {
            "id": "TBL-order", "name": "Order", "db_table_name": "C_Order",
            "columns": [
                { "id": "COL-order-partner", "table_id": "TBL-order", "name": "Business Partner", "db_column_name": "C_BPartner_ID", "reference_id": "19", "mandatory": true },
                { "id": "COL-order-category", "table_id": "TBL-order", "name": "Partner Category", "db_column_name": "C_BP_Group_ID", "reference_id": "19" },
                { "id": "COL-order-docstatus", "table_id": "TBL-order", "name": "Document Status", "db_column_name": "DocStatus", "reference_id": "17", "reference_value_id": "REF-status", "read_only_logic": "@Processed@='Y'" },
                { "id": "COL-order-processed", "table_id": "TBL-order", "name": "Processed", "db_column_name": "Processed", "reference_id": "20" },
                { "id": "COL-order-posted", "table_id": "TBL-order", "name": "Post", "db_column_name": "Posted", "reference_id": "28", "reference_value_id": "REF-status", "process_definition_id": "PROC-post" },
                { "id": "COL-order-reactivate", "table_id": "TBL-order", "name": "Reactivate", "db_column_name": "Reactivate", "reference_id": "28", "process_id": "PA-reactivate" },
                { "id": "COL-order-description", "table_id": "TBL-order", "name": "Description", "db_column_name": "Description", "reference_id": "14" },
                { "id": "COL-order-total", "table_id": "TBL-order", "name": "Grand Total", "db_column_name": "GrandTotal", "reference_id": "12" },
                { "id": "COL-order-poref", "table_id": "TBL-order", "name": "Order Reference", "db_column_name": "POReference", "reference_id": "10" },
                { "id": "COL-order-created", "table_id": "TBL-order", "name": "Creation Date", "db_column_name": "Created", "reference_id": "16", "mandatory": true, "updatable": false },
                { "id": "COL-order-createdby", "table_id": "TBL-order", "name": "Created By", "db_column_name": "CreatedBy", "reference_id": "30", "mandatory": true, "updatable": false },
                { "id": "COL-order-updated", "table_id": "TBL-order", "name": "Updated", "db_column_name": "Updated", "reference_id": "16", "mandatory": true, "updatable": false }
            ]
        },
        {
            "id": "TBL-order-line", "name": "OrderLine", "db_table_name": "C_OrderLine",
            "columns": [
                { "id": "COL-line-order", "table_id": "TBL-order-line", "name": "Order", "db_column_name": "C_Order_ID", "reference_id": "19", "link_to_parent": true, "updatable": false, "mandatory": true },
                { "id": "COL-line-no", "table_id": "TBL-order-line", "name": "Line No.", "db_column_name": "Line", "reference_id": "11" }
            ]
        },
        {
            "id": "TBL-partner", "name": "BusinessPartner", "db_table_name": "C_BPartner",
            "columns": [
                { "id": "COL-partner-name", "table_id": "TBL-partner", "name": "Name", "db_column_name": "Name", "reference_id": "10" },
                { "id": "COL-partner-value", "table_id": "TBL-partner", "name": "Search Key", "db_column_name": "Value", "reference_id": "10" },
                { "id": "COL-partner-group", "table_id": "TBL-partner", "name": "Category", "db_column_name": "C_BP_Group_ID", "reference_id": "19" },
                { "id": "COL-partner-active", "table_id": "TBL-partner", "name": "Active", "db_column_name": "IsActive", "reference_id": "20" }
            ]
        },
        {
            "id": "TBL-category", "name": "BusinessPartnerCategory", "db_table_name": "C_BP_Group",
            "columns": [
                { "id": "COL-category-name", "table_id": "TBL-category", "name": "Name", "db_column_name": "Name", "reference_id": "10" }
            ]
        }
    ],
    "entities": [
        {
            "name": "Order", "table_id": "TBL-order",
            "properties": [
                { "name": "id", "column_name": "C_Order_ID", "domain": { "type": "primitive" } },
                { "name": "businessPartner", "column_name": "C_BPartner_ID", "domain": { "type": "foreign_key", "entity": "BusinessPartner" } },
                { "name": "businessPartnerCategory", "column_name": "C_BP_Group_ID", "domain": { "type": "foreign_key", "entity": "BusinessPartnerCategory" } },
                { "name": "documentStatus", "column_name": "DocStatus", "domain": { "type": "primitive" } },
                { "name": "processed", "column_name": "Processed", "domain": { "type": "boolean" } },
                { "name": "posted", "column_name": "Posted", "domain": { "type": "primitive" } },
                { "name": "reactivate", "column_name": "Reactivate", "domain": { "type": "primitive" } },
                { "name": "description", "column_name": "Description", "domain": { "type": "primitive" } },
                { "name": "grandTotal", "column_name": "GrandTotal", "domain": { "type": "primitive" } },
                { "name": "orderReference", "column_name": "POReference", "domain": { "type": "primitive" } },
                { "name": "creationDate", "column_name": "Created", "domain": { "type": "primitive" } },
                { "name": "createdBy", "column_name": "CreatedBy", "domain": { "type": "foreign_key", "entity": "ADUser" } },
                { "name": "updated", "column_name": "Updated", "domain": { "type": "primitive" } }
            ]
        },
        {
            "name": "OrderLine", "table_id": "TBL-order-line",
            "properties": [
                { "name": "order", "column_name": "C_Order_ID", "domain": { "type": "foreign_key", "entity": "Order" } },
                { "name": "lineNo", "column_name": "Line", "domain": { "type": "primitive" } }
            ]
        },
        {
            "name": "BusinessPartner", "table_id": "TBL-partner",
            "properties": [
                { "name": "id", "column_name": "C_BPartner_ID", "domain": { "type": "primitive" } },
                { "name": "name", "column_name": "Name", "domain": { "type": "primitive" } },
                { "name": "searchKey", "column_name": "Value", "domain": { "type": "primitive" } },
                { "name": "category", "column_name": "C_BP_Group_ID", "domain": { "type": "foreign_key", "entity": "BusinessPartnerCategory" } },
                { "name": "active", "column_name": "IsActive", "domain": { "type": "boolean" } }
            ]
        },
        {
            "name": "BusinessPartnerCategory", "table_id": "TBL-category",
            "properties": [
                { "name": "id", "column_name": "C_BP_Group_ID", "domain": { "type": "primitive" } },
                { "name": "name", "column_name": "Name", "domain": { "type": "primitive" } }
            ]
        }
    ],
    "references": [
        {
            "id": "REF-status", "name": "Document Status",
            "list_values": [
                { "id": "1", "label": "Open", "search_key": "OP" },
                { "id": "2", "label": "Closed", "search_key": "CL" }
            ]
        },
        {
            "id": "REF-partner-selector", "name": "BusinessPartner",
            "selector": {
                "id": "SEL-partner",
                "table_id": "TBL-partner",
                "display_field_id": "SF-name",
                "value_field_id": "SF-id",
                "fields": [
                    { "id": "SF-id", "property": "id" },
                    { "id": "SF-name", "property": "name", "searchable": true },
                    { "id": "SF-searchKey", "property": "searchKey", "searchable": true },
                    { "id": "SF-category", "property": "category", "searchable": true, "outfield": true },
                    { "id": "SF-category-name", "property": "category.name", "searchable": true },
                    { "id": "SF-active", "property": "active", "searchable": true }
                ]
            }
        },
        {
            "id": "REF-partner-tree", "name": "BusinessPartner",
            "tree": { "id": "TREE-partner", "display_property": "name", "value_property": "searchKey" }
        }
    ],
    "process_definitions": [
        {
            "id": "PROC-post", "name": "Post Order", "description": "Posts the order",
            "on_load": "onLoadPost", "report_definition_id": "REP-post",
            "parameters": [
                { "id": "PAR-draft", "name": "Draft", "db_column_name": "IsDraft", "reference_id": "20", "sequence": 30 },
                { "id": "PAR-partner", "name": "Partner", "db_column_name": "C_BPartner_ID", "reference_id": "19", "sequence": 10, "mandatory": true },
                { "id": "PAR-action", "name": "Action", "db_column_name": "DocAction", "reference_id": "17", "reference_value_id": "REF-status", "sequence": 20, "display_logic": "@IsDraft@='Y'" },
                { "id": "PAR-hidden", "name": "Hidden", "db_column_name": "Hidden", "reference_id": "10", "sequence": 40, "active": false }
            ]
        }
    ],
    "process_actions": [
        {
            "id": "PA-reactivate", "name": "Reactivate Order", "search_key": "ReactivateOrder",
            "parameters": [
                { "id": "PP-date", "name": "Date", "db_column_name": "DateFrom", "reference_id": "15", "is_range": true, "value_format": "yyyy-MM-dd", "sequence": 10 }
            ]
        }
    ],
    "report_definitions": [
        { "id": "REP-post", "pdf_template": "post.jrxml", "use_pdf_as_xls_template": true }
    ],
    "window_accesses": [
        { "role_id": "R-admin", "window_id": "WIN-order" },
        { "role_id": "R-admin", "window_id": "WIN-partner" },
        {
            "role_id": "R-limited", "window_id": "WIN-order",
            "tab_accesses": [
                {
                    "tab_id": "TAB-order",
                    "field_accesses": [
                        { "field_id": "FLD-partner", "editable_field": false },
                        { "field_id": "FLD-docstatus" },
                        { "field_id": "FLD-description", "active": false }
                    ]
                },
                { "tab_id": "TAB-order-line", "allow_read": false }
            ]
        }
    ],
    "process_accesses": [
        { "role_id": "R-poster", "process_definition_id": "PROC-post" }
    ],
    "translations": [
        { "id": "1", "language": "es_ES", "text": "Abierto" },
        { "id": "WIN-order", "language": "es_ES", "text": "Pedidos" }
    ]
}"#;

pub(crate) fn fixture_store() -> InMemoryStore {
    InMemoryStore::from_json(CATALOG).expect("fixture catalog parses")
}

pub(crate) fn fixture_config() -> Config {
    Config::default()
}

pub(crate) fn selector_field(id: &str, property: Option<&str>) -> SelectorField {
    SelectorField {
        id: Id::from(id),
        property: property.map(ToString::to_string),
        display_alias: None,
        datasource_field: None,
        reference_id: None,
        outfield: false,
        searchable: false,
        active: true,
    }
}
