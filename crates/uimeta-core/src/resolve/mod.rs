//! Field-level resolvers.
//!
//! Each resolver borrows the read-only store (and configuration where it
//! emits fixed ids) and holds no per-request state.

pub mod foreign_key;
pub mod list;
pub mod process;
pub mod property_path;
pub mod selector;

pub use foreign_key::{ForeignKeyTarget, ForeignKeyTargetResolver, Strictness};
pub use list::ReferenceListResolver;
pub use process::{ProcessAttachment, ProcessAttachmentResolver};
pub use selector::SelectorResolver;
