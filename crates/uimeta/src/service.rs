use crate::Error;
use tracing::debug;
use uimeta_config::Config;
use uimeta_core::{
    assemble::WindowAssembler,
    context::{RequestContext, SessionRequest, UserGrants, resolve_session_defaults},
    document::{ProcessDefinitionDocument, TabDocument, WindowDocument},
    expr::{BuiltinEngine, ExpressionEvaluator, ScriptEngine},
    store::{InMemoryStore, MetadataStore, Translator},
};

///
/// MetadataService
///
/// Dispatch surface over a read-only store: one call per container level.
/// Every call takes the request context explicitly and returns the public
/// error taxonomy.
///

pub struct MetadataService<S, E = BuiltinEngine> {
    store: S,
    config: Config,
    evaluator: ExpressionEvaluator<E>,
}

impl<S: MetadataStore + Translator> MetadataService<S> {
    pub const fn new(store: S, config: Config) -> Self {
        Self::with_evaluator(store, config, ExpressionEvaluator::new())
    }
}

impl MetadataService<InMemoryStore> {
    /// Service over a JSON catalog snapshot.
    pub fn from_catalog_json(catalog: &str, config: Config) -> Result<Self, Error> {
        let store = InMemoryStore::from_json(catalog)?;
        debug!(windows = store.window_count(), "catalog loaded");

        Ok(Self::new(store, config))
    }
}

impl<S, E> MetadataService<S, E>
where
    S: MetadataStore + Translator,
    E: ScriptEngine,
{
    pub const fn with_evaluator(store: S, config: Config, evaluator: ExpressionEvaluator<E>) -> Self {
        Self {
            store,
            config,
            evaluator,
        }
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Request context for a user, choosing role / organization / warehouse
    /// from the request and the user's grants.
    pub fn session(
        &self,
        request: &SessionRequest,
        grants: &UserGrants,
        language: &str,
    ) -> Result<RequestContext, Error> {
        let defaults = resolve_session_defaults(request, grants)?;

        Ok(RequestContext::from_session(&defaults, language))
    }

    pub fn window(&self, window_id: &str, ctx: &RequestContext) -> Result<WindowDocument, Error> {
        Ok(self.assembler().assemble_window(window_id, ctx)?)
    }

    pub fn tab(&self, tab_id: &str, ctx: &RequestContext) -> Result<TabDocument, Error> {
        Ok(self.assembler().assemble_tab(tab_id, ctx)?)
    }

    pub fn process(
        &self,
        process_id: &str,
        ctx: &RequestContext,
    ) -> Result<ProcessDefinitionDocument, Error> {
        Ok(self.assembler().assemble_process(process_id, ctx)?)
    }

    const fn assembler(&self) -> WindowAssembler<'_, S, E> {
        WindowAssembler::with_evaluator(&self.store, &self.config, &self.evaluator)
    }
}
