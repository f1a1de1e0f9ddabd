//! Dispatch-level behaviour of `MetadataService`.

use uimeta::{
    ErrorOrigin,
    core::context::{OrgGrant, RoleGrant},
    prelude::*,
};

const CATALOG: &str = r#"{
    "windows": [{
        "id": "W-product",
        "name": "Product",
        "tabs": [{
            "id": "T-product", "window_id": "W-product", "table_id": "TB-product", "name": "Product",
            "fields": [
                { "id": "F-name", "tab_id": "T-product", "name": "Name", "column_id": "C-name" },
                { "id": "F-uom", "tab_id": "T-product", "name": "UOM", "column_id": "C-uom" },
                { "id": "F-cost", "tab_id": "T-product", "name": "Cost", "column_id": "C-cost", "display_logic": "@#AD_Org_ID@='O-hq'" }
            ]
        }]
    }],
    "tables": [{
        "id": "TB-product", "name": "Product", "db_table_name": "M_Product",
        "columns": [
            { "id": "C-name", "table_id": "TB-product", "name": "Name", "db_column_name": "Name", "reference_id": "10", "mandatory": true },
            { "id": "C-uom", "table_id": "TB-product", "name": "UOM", "db_column_name": "C_UOM_ID", "reference_id": "19" },
            { "id": "C-cost", "table_id": "TB-product", "name": "Cost", "db_column_name": "Cost", "reference_id": "12" }
        ]
    }],
    "entities": [{
        "name": "Product", "table_id": "TB-product",
        "properties": [
            { "name": "name", "column_name": "Name", "domain": { "type": "primitive" } },
            { "name": "uOM", "column_name": "C_UOM_ID", "domain": { "type": "foreign_key", "entity": "UOM" } },
            { "name": "cost", "column_name": "Cost", "domain": { "type": "primitive" } }
        ]
    }],
    "process_definitions": [{ "id": "P-recalc", "name": "Recalculate" }],
    "window_accesses": [{ "role_id": "R-sales", "window_id": "W-product" }],
    "translations": [{ "id": "F-name", "language": "es_ES", "text": "Nombre" }]
}"#;

fn service() -> MetadataService<InMemoryStore> {
    let config = Config::from_toml_str("[tab]\naudit_fields = false\n").unwrap();

    MetadataService::from_catalog_json(CATALOG, config).unwrap()
}

fn grants() -> UserGrants {
    UserGrants {
        user_id: "U-ana".into(),
        roles: vec![RoleGrant {
            role_id: "R-sales".into(),
            client_id: "CL".into(),
            organizations: vec![
                OrgGrant {
                    org_id: "O-hq".into(),
                    warehouses: vec!["WH-main".into()],
                },
                OrgGrant {
                    org_id: "O-shop".into(),
                    warehouses: vec![],
                },
            ],
        }],
        ..UserGrants::default()
    }
}

#[test]
fn session_then_window_round_trip() {
    let service = service();
    let ctx = service
        .session(&SessionRequest::default(), &grants(), "es_ES")
        .unwrap();

    assert_eq!(ctx.role_id, "R-sales");
    assert_eq!(ctx.org_id, "O-hq");

    let window = service.window("W-product", &ctx).unwrap();
    let tab = window.tab("T-product").unwrap();

    assert_eq!(tab.fields["name"].name, "Nombre");
    assert!(tab.fields.contains_key("cost"));
    assert!(tab.fields.contains_key("uOM"));
}

#[test]
fn session_preferences_gate_fields() {
    let service = service();
    let request = SessionRequest {
        org: Some("O-shop".into()),
        ..SessionRequest::default()
    };
    let ctx = service.session(&request, &grants(), "en_US").unwrap();

    let tab = service.tab("T-product", &ctx).unwrap();

    assert!(!tab.fields.contains_key("cost"));
    assert_eq!(tab.fields["name"].name, "Name");
}

#[test]
fn errors_map_to_public_kinds() {
    let service = service();
    let ctx = RequestContext::new("R-sales", "U-ana");
    let stranger = RequestContext::new("R-none", "U-bob");

    let err = service.window("missing", &ctx).unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(err.origin, ErrorOrigin::Window);

    let err = service.window("W-product", &stranger).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unauthorized);

    let err = service.tab("T-product", &stranger).unwrap_err();
    assert!(err.is_unauthorized());

    let err = service.process("missing", &ctx).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.origin, ErrorOrigin::Process);
}

#[test]
fn ungranted_session_role_is_unauthorized() {
    let service = service();
    let request = SessionRequest {
        role: Some("R-admin".into()),
        ..SessionRequest::default()
    };

    let err = service.session(&request, &grants(), "en_US").unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unauthorized);
    assert_eq!(err.origin, ErrorOrigin::Session);
}

#[test]
fn process_documents_are_served() {
    let service = service();
    let ctx = RequestContext::new("R-sales", "U-ana");

    let process = service.process("P-recalc", &ctx).unwrap();
    assert_eq!(process.name, "Recalculate");
    assert!(process.parameters.is_empty());
}

#[test]
fn malformed_catalog_is_internal() {
    let err = MetadataService::from_catalog_json("[", Config::default()).err().unwrap();

    assert_eq!(err.kind, ErrorKind::Internal);
    assert_eq!(err.origin, ErrorOrigin::Store);
}

#[test]
fn documents_serialize_camel_case() {
    let service = service();
    let ctx = RequestContext::new("R-sales", "U-ana");

    let tab = service.tab("T-product", &ctx).unwrap();
    let json = serde_json::to_value(&tab).unwrap();

    assert_eq!(json["entityName"], "Product");
    assert_eq!(json["tabLevel"], 0);
    assert_eq!(json["fields"]["name"]["isMandatory"], true);
    assert_eq!(json["fields"]["uOM"]["selector"]["valueField"], "id");
}
