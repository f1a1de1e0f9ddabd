//! Read-only lookup boundary.
//!
//! Assemblers reach persisted metadata only through `MetadataStore` point
//! lookups and criteria queries, and localized strings only through
//! `Translator`. `InMemoryStore` implements both over a loaded snapshot.

mod memory;

pub use memory::{Catalog, InMemoryStore, Translation};

use crate::model::{
    access::WindowAccess,
    entity::{DomainType, EntitySchema, Property},
    process::{ProcessAction, ProcessDefinition, ReportDefinition},
    reference::{Reference, ReferenceKind},
    table::{Column, Table},
    window::{Tab, Window},
};

///
/// MetadataStore
///

pub trait MetadataStore {
    fn window(&self, id: &str) -> Option<&Window>;

    fn tab(&self, id: &str) -> Option<&Tab>;

    fn table(&self, id: &str) -> Option<&Table>;

    fn column(&self, id: &str) -> Option<&Column>;

    fn reference(&self, id: &str) -> Option<&Reference>;

    fn entity(&self, name: &str) -> Option<&EntitySchema>;

    fn entity_for_table(&self, table_id: &str) -> Option<&EntitySchema>;

    fn process_definition(&self, id: &str) -> Option<&ProcessDefinition>;

    fn process_action(&self, id: &str) -> Option<&ProcessAction>;

    fn report_definition(&self, id: &str) -> Option<&ReportDefinition>;

    /// The role's active grant on a window (at most one row).
    fn window_access(&self, role_id: &str, window_id: &str) -> Option<&WindowAccess>;

    /// First tab bound to a table, optionally restricted to active tabs.
    /// No ordering guarantee beyond store order.
    fn first_tab_for_table(&self, table_id: &str, active_only: bool) -> Option<&Tab>;

    fn has_process_access(&self, role_id: &str, process_definition_id: &str) -> bool;

    ///
    /// PROVIDED
    ///

    /// Entity property backing a column.
    fn column_property(&self, column: &Column) -> Option<&Property> {
        self.entity_for_table(column.table_id.as_str())?
            .property_for_column(&column.db_column_name)
    }

    /// Walk a dotted property path from an entity, following foreign keys.
    fn property_from_path(&self, entity_name: &str, path: &str) -> Option<&Property> {
        let mut entity = self.entity(entity_name)?;
        let mut segments = path.split('.').peekable();

        while let Some(segment) = segments.next() {
            let property = entity.property(segment)?;
            if segments.peek().is_none() {
                return Some(property);
            }

            entity = self.entity(property.domain.target_entity()?)?;
        }

        None
    }

    /// Domain type implied by a reference id.
    fn reference_domain(&self, reference_id: &str) -> DomainType {
        let kind = ReferenceKind::from_id(reference_id);
        if kind == ReferenceKind::YesNo {
            DomainType::Boolean
        } else if kind.is_selector_bearing() {
            let entity = self
                .reference(reference_id)
                .map(|reference| reference.name.clone())
                .unwrap_or_default();

            DomainType::ForeignKey { entity }
        } else {
            DomainType::Primitive
        }
    }
}

///
/// Translator
/// Localized names keyed by the translated record's id.
///

pub trait Translator {
    fn translation(&self, id: &str, language: &str) -> Option<String>;

    /// Translated text, falling back to the record's own name.
    fn translate_or(&self, id: &str, language: &str, fallback: &str) -> String {
        self.translation(id, language)
            .unwrap_or_else(|| fallback.to_string())
    }
}
