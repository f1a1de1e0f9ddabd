//! ## Crate layout
//! - `config`: engine configuration loaded from TOML.
//! - `core`: metadata model, store boundary, expression engine, resolvers
//!   and assemblers.
//! - `error`: public error taxonomy for the dispatch layer.
//! - `service`: `MetadataService`, one call per container level.
//!
//! The `prelude` module carries what a dispatch layer needs to serve
//! window, tab and process documents.

pub use uimeta_config as config;
pub use uimeta_core as core;

mod error;
mod service;

pub use error::{Error, ErrorKind, ErrorOrigin};
pub use service::MetadataService;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        Error, ErrorKind, MetadataService,
        config::Config,
        core::{
            context::{RequestContext, SessionRequest, UserGrants},
            document::{ProcessDefinitionDocument, TabDocument, WindowDocument},
            store::{InMemoryStore, MetadataStore as _, Translator as _},
        },
    };
}
