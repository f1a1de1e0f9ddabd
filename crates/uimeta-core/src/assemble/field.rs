use crate::{
    assemble::{camel_case, input_name},
    context::RequestContext,
    document::{ColumnDocument, FieldDocument, ListEntry},
    error::{ErrorOrigin, InternalError},
    expr::{Scope, compile_logic},
    model::{
        Id,
        access::FieldAccess,
        reference::ReferenceKind,
        table::Column,
        window::{Field, Tab},
    },
    resolve::{
        ForeignKeyTargetResolver, ProcessAttachmentResolver, ReferenceListResolver,
        SelectorResolver,
    },
    store::{MetadataStore, Translator},
};
use tracing::warn;
use uimeta_config::Config;

///
/// FieldAssembler
///
/// Composes one field document. Base metadata is always present; every
/// enrichment (selector, lists, process, foreign-key target, logic) is
/// optional and a failing enrichment is logged and left absent.
///

pub struct FieldAssembler<'a, S: ?Sized> {
    store: &'a S,
    config: &'a Config,
}

impl<'a, S: MetadataStore + Translator + ?Sized> FieldAssembler<'a, S> {
    pub const fn new(store: &'a S, config: &'a Config) -> Self {
        Self { store, config }
    }

    /// Key of the field in its tab's field map: the entity property of its
    /// column, or the camel-cased name of a virtual field.
    #[must_use]
    pub fn wire_key(&self, field: &Field) -> Option<String> {
        let Some(column_id) = &field.column_id else {
            return Some(camel_case(&field.name));
        };

        let column = self.store.column(column_id)?;
        self.store
            .column_property(column)
            .map(|property| property.name.clone())
    }

    /// Build the document of `field` inside `tab`.
    ///
    /// Only a dangling column id is an error; enrichment failures are not.
    pub fn assemble(
        &self,
        field: &Field,
        tab: &Tab,
        access: Option<&FieldAccess>,
        scope: &Scope,
        ctx: &RequestContext,
    ) -> Result<FieldDocument, InternalError> {
        let editable_field = access.map_or(self.config.access.editable_field, |a| a.editable_field);
        let checkonsave = access.map_or(self.config.access.check_on_save, |a| a.check_on_save);

        let mut doc = FieldDocument {
            id: field.id.clone(),
            name: self.store.translate_or(&field.id, &ctx.language, &field.name),
            hql_name: field.name.clone(),
            checkonsave,
            editable_field,
            read_only: field.read_only || !editable_field,
            is_updatable: true,
            displayed: field.displayed,
            shown_in_grid: field.shown_in_grid,
            grid_position: field.grid_position,
            sequence: field.sequence,
            ..FieldDocument::default()
        };

        if let Some(display) = compile_logic(&field.id, field.display_logic.as_deref(), scope) {
            doc.display_logic_fields = Some(display.field_properties());
            doc.display_logic_expression = Some(display.to_client());
        }

        let Some(column_id) = &field.column_id else {
            return Ok(doc);
        };
        let column = self
            .store
            .column(column_id)
            .ok_or_else(|| InternalError::not_found(ErrorOrigin::Field, "column", column_id))?;

        self.apply_column(&mut doc, field, tab, column, scope, ctx);

        Ok(doc)
    }

    fn apply_column(
        &self,
        doc: &mut FieldDocument,
        field: &Field,
        tab: &Tab,
        column: &Column,
        scope: &Scope,
        ctx: &RequestContext,
    ) {
        if let Some(property) = self.store.column_property(column) {
            doc.hql_name.clone_from(&property.name);
        }
        doc.column = Some(column_document(column));
        doc.column_name = Some(column.db_column_name.clone());
        doc.input_name = Some(input_name(&column.db_column_name));
        doc.is_mandatory = column.mandatory;
        doc.is_updatable = column.updatable;
        doc.is_parent_record_property = self.is_parent_record_property(tab, column);

        let kind = ReferenceKind::from_id(&column.reference_id);
        let value_ref = column.reference_value_id.as_ref();

        doc.selector = SelectorResolver::new(self.store, self.config)
            .resolve_or_plain(&field.id, &kind, value_ref);

        if kind.is_list() {
            doc.ref_list = self.list(&field.id, value_ref, ctx);
        }
        if kind.is_button() {
            doc.button_ref_list = value_ref
                .and_then(|id| self.store.reference(id))
                .filter(|reference| !reference.list_values.is_empty())
                .map(|reference| ReferenceListResolver::new(self.store).entries(reference, &ctx.language));
        }

        let processes = ProcessAttachmentResolver::new(self.store, self.config);
        if processes.is_process_bearing(field, Some(column)) {
            match processes.attach(field, column, scope, ctx) {
                Ok(attachment) => {
                    doc.process_definition = attachment.definition;
                    doc.process_action = attachment.action;
                }
                Err(err) => warn!(field_id = %field.id, error = %err, "process attachment failed"),
            }
        }

        self.apply_foreign_key(doc, column, ctx);

        if let Some(read_only) = compile_logic(&field.id, column.read_only_logic.as_deref(), scope) {
            doc.read_only_logic_expression = Some(read_only.to_client());
        }
    }

    // Strict lookup supplies the navigation tab; the lenient lookup only
    // contributes a window when no active tab exists.
    fn apply_foreign_key(&self, doc: &mut FieldDocument, column: &Column, ctx: &RequestContext) {
        let strict = ForeignKeyTargetResolver::strict(self.store);
        let Some(target) = strict.resolve(column) else {
            return;
        };

        match target.tab {
            Some(tab) => {
                doc.referenced_window_id = Some(tab.window_id.clone());
                doc.referenced_tab_id = Some(tab.id.clone());
                doc.referenced_fields = Some(self.referenced_fields(tab));
            }
            None => {
                doc.referenced_window_id = ForeignKeyTargetResolver::lenient(self.store)
                    .target_tab(&target.entity_name)
                    .map(|tab| tab.window_id.clone());
            }
        }

        doc.is_referenced_window_accessible = Some(
            doc.referenced_window_id
                .as_ref()
                .is_some_and(|window_id| self.store.window_access(&ctx.role_id, window_id).is_some()),
        );
        doc.referenced_entity = Some(target.entity_name);
    }

    // Properties of the active, displayed, column-bound fields of a tab.
    fn referenced_fields(&self, tab: &Tab) -> Vec<String> {
        tab.fields
            .iter()
            .filter(|field| field.active && field.displayed)
            .filter_map(|field| field.column_id.as_deref())
            .filter_map(|id| self.store.column(id))
            .filter_map(|column| self.store.column_property(column))
            .map(|property| property.name.clone())
            .collect()
    }

    // Link-to-parent column pointing at the entity of a table-based parent tab.
    fn is_parent_record_property(&self, tab: &Tab, column: &Column) -> bool {
        if !column.link_to_parent {
            return false;
        }

        let Some(parent) = self
            .store
            .window(&tab.window_id)
            .and_then(|window| window.parent_tab(&tab.id))
        else {
            return false;
        };
        if !self
            .store
            .table(&parent.table_id)
            .is_some_and(|table| table.is_table_based())
        {
            return false;
        }

        let target = ForeignKeyTargetResolver::lenient(self.store)
            .referenced_property(column)
            .and_then(|property| property.domain.target_entity());
        let parent_entity = self.store.entity_for_table(&parent.table_id);

        matches!((target, parent_entity), (Some(target), Some(entity)) if entity.name == target)
    }

    fn list(
        &self,
        field_id: &Id,
        value_ref: Option<&Id>,
        ctx: &RequestContext,
    ) -> Option<Vec<ListEntry>> {
        let Some(reference_id) = value_ref else {
            warn!(field_id = %field_id, "list column without a value reference");
            return None;
        };

        ReferenceListResolver::new(self.store)
            .resolve(reference_id, &ctx.language)
            .inspect_err(|err| warn!(field_id = %field_id, error = %err, "list resolution failed"))
            .ok()
    }
}

/// Wire form of a column.
pub(crate) fn column_document(column: &Column) -> ColumnDocument {
    ColumnDocument {
        id: column.id.clone(),
        name: column.name.clone(),
        db_column_name: column.db_column_name.clone(),
        reference: column.reference_id.clone(),
        reference_value: column.reference_value_id.clone(),
        mandatory: column.mandatory,
        updatable: column.updatable,
        link_to_parent: column.link_to_parent,
    }
}

///
/// TESTS
///
