use crate::{
    assemble::{BUILTIN_EVALUATOR, FieldAssembler, field::column_document, input_name},
    context::RequestContext,
    document::{FieldDocument, TabDocument},
    error::{ErrorOrigin, InternalError},
    expr::{BuiltinEngine, ExpressionEvaluator, Scope, ScriptEngine},
    model::{
        Id, is_blank,
        access::{FieldAccess, TabAccess},
        table::{Column, Table},
        window::{Field, Tab},
    },
    resolve::SelectorResolver,
    store::{MetadataStore, Translator},
};
use std::collections::BTreeMap;
use tracing::{debug, warn};
use uimeta_config::Config;

/// Entity a user audit column points at.
const AUDIT_USER_ENTITY: &str = "ADUser";

///
/// AuditColumn
/// A creation / update stamp synthesized when the tab does not expose it.
///

struct AuditColumn {
    key: &'static str,
    db_column_name: &'static str,
    shown_in_grid: bool,
    user: bool,
}

const AUDIT_COLUMNS: [AuditColumn; 4] = [
    AuditColumn {
        key: "creationDate",
        db_column_name: "Created",
        shown_in_grid: true,
        user: false,
    },
    AuditColumn {
        key: "createdBy",
        db_column_name: "CreatedBy",
        shown_in_grid: false,
        user: true,
    },
    AuditColumn {
        key: "updated",
        db_column_name: "Updated",
        shown_in_grid: true,
        user: false,
    },
    AuditColumn {
        key: "updatedBy",
        db_column_name: "UpdatedBy",
        shown_in_grid: false,
        user: true,
    },
];

///
/// TabAssembler
///
/// Composes one tab: its metadata, parent link and the gated field map.
/// A field is emitted only when its process is reachable and its display
/// logic holds server-side; a field that fails to assemble is skipped.
///

pub struct TabAssembler<'a, S: ?Sized, E = BuiltinEngine> {
    store: &'a S,
    config: &'a Config,
    evaluator: &'a ExpressionEvaluator<E>,
}

impl<'a, S: MetadataStore + Translator + ?Sized> TabAssembler<'a, S> {
    pub fn new(store: &'a S, config: &'a Config) -> Self {
        Self::with_evaluator(store, config, &BUILTIN_EVALUATOR)
    }
}

impl<'a, S, E> TabAssembler<'a, S, E>
where
    S: MetadataStore + Translator + ?Sized,
    E: ScriptEngine,
{
    pub const fn with_evaluator(
        store: &'a S,
        config: &'a Config,
        evaluator: &'a ExpressionEvaluator<E>,
    ) -> Self {
        Self {
            store,
            config,
            evaluator,
        }
    }

    /// Assemble `tab`, filtering fields through the role's tab-access row
    /// when it lists field rows.
    pub fn assemble(
        &self,
        tab: &Tab,
        access: Option<&TabAccess>,
        ctx: &RequestContext,
    ) -> Result<TabDocument, InternalError> {
        let table = self
            .store
            .table(&tab.table_id)
            .ok_or_else(|| InternalError::not_found(ErrorOrigin::Tab, "table", &tab.table_id))?;
        let parent = self
            .store
            .window(&tab.window_id)
            .and_then(|window| window.parent_tab(&tab.id));

        let mut fields = self.fields(tab, access, ctx);
        if self.config.tab.audit_fields {
            self.add_audit_fields(&mut fields, tab, table);
        }

        Ok(TabDocument {
            id: tab.id.clone(),
            name: self.store.translate_or(&tab.id, &ctx.language, &tab.name),
            window_id: tab.window_id.clone(),
            table_id: tab.table_id.clone(),
            entity_name: table.name.clone(),
            tab_level: tab.level,
            parent_tab_id: parent.map(|parent| parent.id.clone()),
            parent_columns: self.parent_columns(tab, table),
            filter: non_blank(tab.filter_clause.as_deref()),
            display_logic: non_blank(tab.display_logic.as_deref()),
            fields,
        })
    }

    fn fields(
        &self,
        tab: &Tab,
        access: Option<&TabAccess>,
        ctx: &RequestContext,
    ) -> BTreeMap<String, FieldDocument> {
        let assembler = FieldAssembler::new(self.store, self.config);
        let scope = Scope::for_tab(tab, self.store);
        let mut out = BTreeMap::new();

        for (field, field_access) in Self::candidates(tab, access) {
            if !self.process_reachable(field, tab, ctx) {
                debug!(field_id = %field.id, "field skipped: process not granted");
                continue;
            }
            if !self
                .evaluator
                .evaluate(field.display_logic.as_deref(), &scope, ctx)
            {
                continue;
            }

            let Some(key) = assembler.wire_key(field) else {
                debug!(field_id = %field.id, "field skipped: no entity column name");
                continue;
            };
            if out.contains_key(&key) {
                debug!(field_id = %field.id, key = %key, "field skipped: duplicate key");
                continue;
            }

            match assembler.assemble(field, tab, field_access, &scope, ctx) {
                Ok(doc) => {
                    out.insert(key, doc);
                }
                Err(err) => warn!(field_id = %field.id, error = %err, "field skipped"),
            }
        }

        out
    }

    // Explicit active field rows when the role has any, else every active field.
    fn candidates<'t>(
        tab: &'t Tab,
        access: Option<&'t TabAccess>,
    ) -> Vec<(&'t Field, Option<&'t FieldAccess>)> {
        match access.filter(|access| !access.field_accesses.is_empty()) {
            Some(access) => access
                .field_accesses
                .iter()
                .filter(|row| row.active)
                .filter_map(|row| tab.field(&row.field_id).map(|field| (field, Some(row))))
                .filter(|(field, _)| field.active)
                .collect(),
            None => tab
                .fields
                .iter()
                .filter(|field| field.active)
                .map(|field| (field, None))
                .collect(),
        }
    }

    // A field bound to a process definition needs a process grant or a
    // readable window.
    fn process_reachable(&self, field: &Field, tab: &Tab, ctx: &RequestContext) -> bool {
        let Some(process_id) = field
            .column_id
            .as_deref()
            .and_then(|id| self.store.column(id))
            .and_then(|column| column.process_definition_id.as_ref())
        else {
            return true;
        };

        self.store.has_process_access(&ctx.role_id, process_id)
            || self.store.window_access(&ctx.role_id, &tab.window_id).is_some()
    }

    fn parent_columns(&self, tab: &Tab, table: &Table) -> Vec<String> {
        if tab.level == 0 {
            return Vec::new();
        }

        table
            .columns
            .iter()
            .filter(|column| column.link_to_parent)
            .filter_map(|column| self.store.column_property(column))
            .map(|property| property.name.clone())
            .collect()
    }

    fn add_audit_fields(&self, fields: &mut BTreeMap<String, FieldDocument>, tab: &Tab, table: &Table) {
        let base = self.config.tab.audit_grid_position;
        let mut order = 0;

        for audit in &AUDIT_COLUMNS {
            if fields.contains_key(audit.key) {
                continue;
            }
            let Some(column) = table.column_by_db_name(audit.db_column_name) else {
                debug!(tab_id = %tab.id, column = audit.db_column_name, "audit column missing");
                continue;
            };

            fields.insert(
                audit.key.to_string(),
                self.audit_field(audit, column, base + order),
            );
            order += 1;
        }
    }

    fn audit_field(&self, audit: &AuditColumn, column: &Column, grid_position: u32) -> FieldDocument {
        let id = Id::new(format!("audit_{}", column.id));
        let (selector, referenced_entity) = if audit.user {
            (
                Some(SelectorResolver::new(self.store, self.config).plain(&id)),
                Some(AUDIT_USER_ENTITY.to_string()),
            )
        } else {
            (None, None)
        };

        FieldDocument {
            id,
            name: column.name.clone(),
            column: Some(column_document(column)),
            hql_name: audit.key.to_string(),
            column_name: Some(column.db_column_name.clone()),
            is_mandatory: column.mandatory,
            input_name: Some(input_name(&column.db_column_name)),
            checkonsave: false,
            editable_field: false,
            read_only: true,
            is_updatable: false,
            is_parent_record_property: false,
            displayed: false,
            shown_in_grid: audit.shown_in_grid,
            grid_position: Some(grid_position),
            selector,
            referenced_entity,
            ..FieldDocument::default()
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .filter(|value| !is_blank(Some(*value)))
        .map(ToString::to_string)
}

///
/// TESTS
///
