//! Core runtime for uimeta: the metadata model, the read-only store boundary,
//! the display-logic expression engine, the field-level resolvers and the
//! window / tab / field assemblers that produce client documents.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod assemble;
pub mod context;
pub mod document;
pub mod error;
pub mod expr;
pub mod model;
pub mod resolve;
pub mod store;

// test
#[cfg(test)]
pub(crate) mod test_support;

pub use error::InternalError;

///
/// CONSTANTS
///

/// Property token that resolves to an entity's display identifier.
pub const IDENTIFIER: &str = "_identifier";

/// Property token for an entity's primary key.
pub const ID: &str = "id";

/// Separator replacing `.` in nested property paths on the wire.
pub const FIELD_SEPARATOR: &str = "$";

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No assemblers, stores, or resolvers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        context::RequestContext,
        model::{
            Id,
            reference::ReferenceKind,
            window::{Field, Tab, Window},
        },
    };
}
