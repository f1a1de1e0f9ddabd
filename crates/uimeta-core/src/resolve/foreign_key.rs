use crate::{
    model::{entity::Property, table::Column, window::Tab},
    store::MetadataStore,
};

///
/// Strictness
///
/// The two target lookups. `ActiveTab` only accepts active tabs and drives
/// navigation targets; `AnyTab` also accepts inactive ones.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Strictness {
    ActiveTab,
    AnyTab,
}

///
/// ForeignKeyTarget
///

#[derive(Clone, Debug)]
pub struct ForeignKeyTarget<'a> {
    pub entity_name: String,
    pub tab: Option<&'a Tab>,
}

///
/// ForeignKeyTargetResolver
///

pub struct ForeignKeyTargetResolver<'a, S: ?Sized> {
    store: &'a S,
    strictness: Strictness,
}

impl<'a, S: MetadataStore + ?Sized> ForeignKeyTargetResolver<'a, S> {
    pub const fn strict(store: &'a S) -> Self {
        Self {
            store,
            strictness: Strictness::ActiveTab,
        }
    }

    pub const fn lenient(store: &'a S) -> Self {
        Self {
            store,
            strictness: Strictness::AnyTab,
        }
    }

    /// Entity property backing `column`, if it is a foreign key.
    pub fn referenced_property(&self, column: &Column) -> Option<&'a Property> {
        self.store
            .column_property(column)
            .filter(|property| property.domain.is_foreign_key())
    }

    /// Target entity and its first tab, or `None` when the column is not a
    /// foreign key.
    pub fn resolve(&self, column: &Column) -> Option<ForeignKeyTarget<'a>> {
        let entity_name = self.referenced_property(column)?.domain.target_entity()?;

        Some(ForeignKeyTarget {
            entity_name: entity_name.to_string(),
            tab: self.target_tab(entity_name),
        })
    }

    /// First tab bound to the entity's table, subject to strictness.
    pub fn target_tab(&self, entity_name: &str) -> Option<&'a Tab> {
        let entity = self.store.entity(entity_name)?;

        self.store.first_tab_for_table(
            &entity.table_id,
            self.strictness == Strictness::ActiveTab,
        )
    }
}

///
/// TESTS
///
