use crate::{
    assemble::{BUILTIN_EVALUATOR, TabAssembler},
    context::RequestContext,
    document::{ProcessDefinitionDocument, TabDocument, WindowDocument},
    error::{ErrorOrigin, InternalError},
    expr::{BuiltinEngine, ExpressionEvaluator, ScriptEngine},
    model::{
        access::{TabAccess, WindowAccess},
        is_blank,
        window::{Tab, Window},
    },
    resolve::ProcessAttachmentResolver,
    store::{MetadataStore, Translator},
};
use tracing::error;
use uimeta_config::Config;

///
/// WindowAssembler
///
/// Entry point for window, tab and process documents. Existence and grant
/// failures abort the call; a tab that fails to assemble is logged and left
/// out of its window.
///

pub struct WindowAssembler<'a, S: ?Sized, E = BuiltinEngine> {
    store: &'a S,
    config: &'a Config,
    evaluator: &'a ExpressionEvaluator<E>,
}

impl<'a, S: MetadataStore + Translator + ?Sized> WindowAssembler<'a, S> {
    pub fn new(store: &'a S, config: &'a Config) -> Self {
        Self::with_evaluator(store, config, &BUILTIN_EVALUATOR)
    }
}

impl<'a, S, E> WindowAssembler<'a, S, E>
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

    /// Assemble every readable tab of a window.
    pub fn assemble_window(
        &self,
        window_id: &str,
        ctx: &RequestContext,
    ) -> Result<WindowDocument, InternalError> {
        let window = self
            .store
            .window(window_id)
            .ok_or_else(|| InternalError::not_found(ErrorOrigin::Window, "window", window_id))?;
        let grant = self.grant(window, ctx)?;

        let tabs = self.tabs_for(window, grant);
        let assembler = self.tab_assembler();

        let tabs = tabs
            .into_iter()
            .filter_map(|(tab, access)| {
                assembler
                    .assemble(tab, access, ctx)
                    .inspect_err(|err| {
                        error!(tab_id = %tab.id, window_id = %window.id, error = %err, "tab omitted");
                    })
                    .ok()
            })
            .collect();

        Ok(WindowDocument {
            id: window.id.clone(),
            name: self
                .store
                .translate_or(&window.id, &ctx.language, &window.name),
            tabs,
        })
    }

    /// Assemble one tab. The role needs a grant on the owning window, and
    /// when the grant lists tab rows, an active readable row for this tab.
    pub fn assemble_tab(
        &self,
        tab_id: &str,
        ctx: &RequestContext,
    ) -> Result<TabDocument, InternalError> {
        let tab = self
            .store
            .tab(tab_id)
            .ok_or_else(|| InternalError::not_found(ErrorOrigin::Tab, "tab", tab_id))?;
        let window = self.store.window(&tab.window_id).ok_or_else(|| {
            InternalError::not_found(ErrorOrigin::Window, "window", &tab.window_id)
        })?;
        let grant = self.grant(window, ctx)?;

        if !grant.tab_accesses.is_empty() && readable(grant, tab).is_none() {
            return Err(InternalError::unauthorized(
                ErrorOrigin::Tab,
                format!("role {} cannot read tab {}", ctx.role_id, tab.id),
            ));
        }

        self.tab_assembler()
            .assemble(tab, grant.tab_access(&tab.id), ctx)
    }

    /// Assemble a standalone process definition.
    pub fn assemble_process(
        &self,
        process_id: &str,
        ctx: &RequestContext,
    ) -> Result<ProcessDefinitionDocument, InternalError> {
        ProcessAttachmentResolver::new(self.store, self.config).assemble_process(process_id, ctx)
    }

    fn grant(&self, window: &Window, ctx: &RequestContext) -> Result<&'a WindowAccess, InternalError> {
        self.store
            .window_access(&ctx.role_id, &window.id)
            .ok_or_else(|| {
                InternalError::unauthorized(
                    ErrorOrigin::Window,
                    format!("role {} has no access to window {}", ctx.role_id, window.id),
                )
            })
    }

    // Readable tabs in window order. Explicit tab rows, when present, must be
    // active and readable; either way only tabs without display logic pass.
    fn tabs_for<'w>(
        &self,
        window: &'w Window,
        grant: &'w WindowAccess,
    ) -> Vec<(&'w Tab, Option<&'w TabAccess>)> {
        let displayable = |tab: &Tab| is_blank(tab.display_logic.as_deref());

        if grant.tab_accesses.is_empty() {
            return window
                .tabs
                .iter()
                .filter(|tab| tab.active && displayable(tab))
                .map(|tab| (tab, None))
                .collect();
        }

        window
            .tabs
            .iter()
            .filter(|tab| displayable(tab))
            .filter_map(|tab| readable(grant, tab).map(|access| (tab, Some(access))))
            .collect()
    }

    const fn tab_assembler(&self) -> TabAssembler<'a, S, E> {
        TabAssembler::with_evaluator(self.store, self.config, self.evaluator)
    }
}

// The grant's row for `tab`, if it is active and allows reading.
fn readable<'w>(grant: &'w WindowAccess, tab: &Tab) -> Option<&'w TabAccess> {
    grant
        .tab_access(&tab.id)
        .filter(|access| access.active && access.allow_read)
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        ORDER_LINE_TAB, ORDER_TAB, ORDER_WINDOW, POST_PROCESS, fixture_config, fixture_store,
    };

    fn ctx(role: &str) -> RequestContext {
        RequestContext::new(role, "U1")
    }

    #[test]
    fn unknown_window_is_not_found() {
        let store = fixture_store();
        let config = fixture_config();
        let assembler = WindowAssembler::new(&store, &config);

        let err = assembler.assemble_window("missing", &ctx("R-admin")).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.origin, ErrorOrigin::Window);
    }

    #[test]
    fn ungranted_role_is_unauthorized() {
        let store = fixture_store();
        let config = fixture_config();
        let assembler = WindowAssembler::new(&store, &config);

        let err = assembler.assemble_window(ORDER_WINDOW, &ctx("R-none")).unwrap_err();
        assert!(err.is_unauthorized());

        let err = assembler.assemble_tab(ORDER_TAB, &ctx("R-none")).unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[test]
    fn without_tab_rows_blank_logic_tabs_are_included() {
        let store = fixture_store();
        let config = fixture_config();
        let assembler = WindowAssembler::new(&store, &config);

        let doc = assembler.assemble_window(ORDER_WINDOW, &ctx("R-admin")).unwrap();
        let ids: Vec<_> = doc.tabs.iter().map(|tab| tab.id.as_str()).collect();

        // the tax tab carries display logic
        assert_eq!(ids, vec![ORDER_TAB, ORDER_LINE_TAB]);
    }

    #[test]
    fn unreadable_tab_row_excludes_tab() {
        let store = fixture_store();
        let config = fixture_config();
        let assembler = WindowAssembler::new(&store, &config);

        let doc = assembler.assemble_window(ORDER_WINDOW, &ctx("R-limited")).unwrap();

        assert!(doc.tab(ORDER_TAB).is_some());
        assert!(doc.tab(ORDER_LINE_TAB).is_none());
    }

    #[test]
    fn failing_tab_is_omitted() {
        let mut store = fixture_store();
        let config = fixture_config();
        let mut window = store.window(ORDER_WINDOW).unwrap().clone();
        if let Some(line) = window.tabs.iter_mut().find(|tab| tab.id == ORDER_LINE_TAB) {
            line.table_id = "missing".into();
        }
        store.insert_window(window);
        let assembler = WindowAssembler::new(&store, &config);

        let doc = assembler.assemble_window(ORDER_WINDOW, &ctx("R-admin")).unwrap();

        assert_eq!(doc.tabs.len(), 1);
        assert!(doc.tab(ORDER_TAB).is_some());
    }

    #[test]
    fn assemble_tab_checks_existence_then_grant() {
        let store = fixture_store();
        let config = fixture_config();
        let assembler = WindowAssembler::new(&store, &config);

        assert!(assembler.assemble_tab("missing", &ctx("R-admin")).unwrap_err().is_not_found());

        let doc = assembler.assemble_tab(ORDER_LINE_TAB, &ctx("R-admin")).unwrap();
        assert_eq!(doc.parent_tab_id.as_ref().unwrap(), ORDER_TAB);
    }

    #[test]
    fn assemble_tab_honours_tab_rows() {
        let store = fixture_store();
        let config = fixture_config();
        let assembler = WindowAssembler::new(&store, &config);
        let limited = ctx("R-limited");

        assert!(assembler.assemble_tab(ORDER_TAB, &limited).is_ok());

        let err = assembler.assemble_tab(ORDER_LINE_TAB, &limited).unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(err.origin, ErrorOrigin::Tab);
    }

    #[test]
    fn process_passthrough() {
        let store = fixture_store();
        let config = fixture_config();
        let assembler = WindowAssembler::new(&store, &config);

        assert_eq!(
            assembler.assemble_process(POST_PROCESS, &ctx("R-admin")).unwrap().id,
            POST_PROCESS
        );
    }

    #[test]
    fn window_name_is_translated() {
        let store = fixture_store();
        let config = fixture_config();
        let assembler = WindowAssembler::new(&store, &config);

        let ctx = ctx("R-admin").with_language("es_ES");
        let doc = assembler.assemble_window(ORDER_WINDOW, &ctx).unwrap();
        assert_eq!(doc.name, "Pedidos");
    }
}
