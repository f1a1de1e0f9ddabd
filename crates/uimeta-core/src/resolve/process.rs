use crate::{
    context::RequestContext,
    document::{
        ButtonDocument, FieldAttachment, ListEntry, ParameterDocument, ProcessActionDocument,
        ProcessDefinitionDocument, ProcessParameterDocument, ReportDocument, SelectorDocument,
    },
    error::{ErrorOrigin, InternalError},
    expr::{CompiledExpr, Scope, compile_logic},
    model::{
        Id,
        process::{Parameter, ProcessAction, ProcessDefinition, ProcessParameter},
        reference::ReferenceKind,
        table::Column,
        window::Field,
    },
    resolve::{ReferenceListResolver, SelectorResolver},
    store::{MetadataStore, Translator},
};
use tracing::warn;
use uimeta_config::Config;

/// Name given to allow-listed legacy process buttons.
pub const LEGACY_PROCESS_NAME: &str = "Legacy Process Placeholder";

///
/// ProcessAttachment
///

#[derive(Clone, Debug, Default)]
pub struct ProcessAttachment {
    pub definition: Option<ProcessDefinitionDocument>,
    pub action: Option<ProcessActionDocument>,
}

///
/// ProcessAttachmentResolver
///
/// Builds process metadata for button fields and standalone process
/// definitions. Parameters recurse into the selector and list resolvers.
///

pub struct ProcessAttachmentResolver<'a, S: ?Sized> {
    store: &'a S,
    config: &'a Config,
}

impl<'a, S: MetadataStore + Translator + ?Sized> ProcessAttachmentResolver<'a, S> {
    pub const fn new(store: &'a S, config: &'a Config) -> Self {
        Self { store, config }
    }

    /// A field triggers a process when its column is a button bound to a
    /// process, or when its id is on the legacy allow-list.
    #[must_use]
    pub fn is_process_bearing(&self, field: &Field, column: Option<&Column>) -> bool {
        if self.config.is_legacy_process(field.id.as_str()) {
            return true;
        }

        column.is_some_and(|column| {
            ReferenceKind::from_id(&column.reference_id).is_button()
                && (column.process_definition_id.is_some() || column.process_id.is_some())
        })
    }

    /// Process metadata for a process-bearing field.
    pub fn attach(
        &self,
        field: &Field,
        column: &Column,
        scope: &Scope,
        ctx: &RequestContext,
    ) -> Result<ProcessAttachment, InternalError> {
        let mut attachment = ProcessAttachment::default();

        if let Some(process_id) = &column.process_definition_id {
            let process = self.store.process_definition(process_id).ok_or_else(|| {
                InternalError::not_found(ErrorOrigin::Process, "process definition", process_id)
            })?;

            let mut document = self.definition_document(process, ctx);
            document.attachment =
                Some(self.field_attachment(field, column, &process.id, &process.name, scope, ctx));
            attachment.definition = Some(document);
        }

        if self.config.is_legacy_process(field.id.as_str()) {
            attachment.action = Some(ProcessActionDocument {
                id: field.id.clone(),
                name: LEGACY_PROCESS_NAME.to_string(),
                search_key: None,
                parameters: Vec::new(),
                attachment: Some(self.field_attachment(
                    field,
                    column,
                    &field.id,
                    LEGACY_PROCESS_NAME,
                    scope,
                    ctx,
                )),
            });
        } else if let Some(process_id) = &column.process_id {
            let process = self.store.process_action(process_id).ok_or_else(|| {
                InternalError::not_found(ErrorOrigin::Process, "process", process_id)
            })?;

            let mut document = self.action_document(process, ctx);
            document.attachment =
                Some(self.field_attachment(field, column, &process.id, &process.name, scope, ctx));
            attachment.action = Some(document);
        }

        Ok(attachment)
    }

    /// Standalone process-definition document.
    pub fn assemble_process(
        &self,
        process_id: &str,
        ctx: &RequestContext,
    ) -> Result<ProcessDefinitionDocument, InternalError> {
        let process = self.store.process_definition(process_id).ok_or_else(|| {
            InternalError::not_found(ErrorOrigin::Process, "process definition", process_id)
        })?;

        Ok(self.definition_document(process, ctx))
    }

    fn definition_document(
        &self,
        process: &ProcessDefinition,
        ctx: &RequestContext,
    ) -> ProcessDefinitionDocument {
        let scope = Scope::for_parameters(&process.parameters);

        let mut parameters: Vec<&Parameter> =
            process.parameters.iter().filter(|p| p.active).collect();
        parameters.sort_by_key(|p| p.sequence);

        let parameters = parameters
            .into_iter()
            .map(|parameter| {
                (
                    parameter.db_column_name.clone(),
                    self.parameter_document(parameter, &scope, ctx),
                )
            })
            .collect();

        let report_definition = process.report_definition_id.as_ref().and_then(|id| {
            let report = self.store.report_definition(id);
            if report.is_none() {
                warn!(process_id = %process.id, report_id = %id, "report definition not found");
            }

            report.map(|report| ReportDocument {
                id: report.id.clone(),
                pdf_template: report.pdf_template.clone(),
                xls_template: report.xls_template.clone(),
                html_template: report.html_template.clone(),
                use_pdf_as_xls_template: report.use_pdf_as_xls_template,
                use_pdf_as_html_template: report.use_pdf_as_html_template,
            })
        });

        ProcessDefinitionDocument {
            id: process.id.clone(),
            name: self.store.translate_or(&process.id, &ctx.language, &process.name),
            description: process.description.clone(),
            parameters,
            on_load: process.on_load.clone(),
            on_process: process.on_process.clone(),
            report_definition,
            attachment: None,
        }
    }

    fn parameter_document(
        &self,
        parameter: &Parameter,
        scope: &Scope,
        ctx: &RequestContext,
    ) -> ParameterDocument {
        let kind = ReferenceKind::from_id(&parameter.reference_id);
        let value_ref = parameter.reference_value_id.as_ref();

        let window_id = if kind.is_window() {
            value_ref
                .and_then(|id| self.store.reference(id))
                .and_then(|reference| reference.window_id.clone())
        } else {
            None
        };

        let display = compile_logic(&parameter.id, parameter.display_logic.as_deref(), scope);
        let read_only = compile_logic(&parameter.id, parameter.read_only_logic.as_deref(), scope);

        ParameterDocument {
            id: parameter.id.clone(),
            name: self
                .store
                .translate_or(&parameter.id, &ctx.language, &parameter.name),
            db_column_name: parameter.db_column_name.clone(),
            reference: parameter.reference_id.clone(),
            mandatory: parameter.mandatory,
            sequence: parameter.sequence,
            default_value: parameter.default_value.clone(),
            selector: self.selector(&parameter.id, &kind, value_ref),
            ref_list: self.list(&parameter.id, &kind, value_ref, ctx),
            window_id,
            display_logic_fields: display.as_ref().map(CompiledExpr::field_properties),
            display_logic_expression: display.as_ref().map(CompiledExpr::to_client),
            read_only_logic_expression: read_only.as_ref().map(CompiledExpr::to_client),
        }
    }

    fn action_document(&self, process: &ProcessAction, ctx: &RequestContext) -> ProcessActionDocument {
        let mut parameters: Vec<&ProcessParameter> =
            process.parameters.iter().filter(|p| p.active).collect();
        parameters.sort_by_key(|p| p.sequence);

        let parameters = parameters
            .into_iter()
            .map(|parameter| {
                let kind = ReferenceKind::from_id(&parameter.reference_id);
                let value_ref = parameter.reference_value_id.as_ref();

                ProcessParameterDocument {
                    id: parameter.id.clone(),
                    name: self
                        .store
                        .translate_or(&parameter.id, &ctx.language, &parameter.name),
                    db_column_name: parameter.db_column_name.clone(),
                    reference: parameter.reference_id.clone(),
                    mandatory: parameter.mandatory,
                    sequence: parameter.sequence,
                    selector: self.selector(&parameter.id, &kind, value_ref),
                    ref_list: self.list(&parameter.id, &kind, value_ref, ctx),
                    is_range: parameter.is_range,
                    value_format: parameter.value_format.clone(),
                    min_value: parameter.min_value.clone(),
                    max_value: parameter.max_value.clone(),
                }
            })
            .collect();

        ProcessActionDocument {
            id: process.id.clone(),
            name: self.store.translate_or(&process.id, &ctx.language, &process.name),
            search_key: process.search_key.clone(),
            parameters,
            attachment: None,
        }
    }

    // Button and field linkage shared by both process flavours.
    fn field_attachment(
        &self,
        field: &Field,
        column: &Column,
        process_id: &Id,
        process_name: &str,
        scope: &Scope,
        ctx: &RequestContext,
    ) -> FieldAttachment {
        let language = &ctx.language;
        let display_logic_expression = compile_logic(&field.id, field.display_logic.as_deref(), scope)
            .map(|compiled| compiled.to_client());

        FieldAttachment {
            field_id: field.id.clone(),
            column_id: column.id.clone(),
            display_logic: field.display_logic.clone(),
            display_logic_expression,
            button_text: self.store.translate_or(&column.id, language, &column.name),
            field_name: self.store.translate_or(&field.id, language, &field.name),
            reference: column.reference_id.clone(),
            button: ButtonDocument {
                id: field.id.clone(),
                name: self.store.translate_or(process_id, language, process_name),
                action: self.config.process.button_action.clone(),
                icon: self.config.process.button_icon.clone(),
                process_id: process_id.clone(),
            },
        }
    }

    fn selector(
        &self,
        owner_id: &Id,
        kind: &ReferenceKind,
        value_ref: Option<&Id>,
    ) -> Option<SelectorDocument> {
        SelectorResolver::new(self.store, self.config).resolve_or_plain(owner_id, kind, value_ref)
    }

    fn list(
        &self,
        owner_id: &Id,
        kind: &ReferenceKind,
        value_ref: Option<&Id>,
        ctx: &RequestContext,
    ) -> Option<Vec<ListEntry>> {
        if !kind.is_list() {
            return None;
        }

        let resolver = ReferenceListResolver::new(self.store);
        let Some(reference_id) = value_ref else {
            warn!(owner_id = %owner_id, "list reference without a value reference");
            return None;
        };

        resolver
            .resolve(reference_id, &ctx.language)
            .inspect_err(|err| warn!(owner_id = %owner_id, error = %err, "list resolution failed"))
            .ok()
    }
}

///
/// TESTS
///
