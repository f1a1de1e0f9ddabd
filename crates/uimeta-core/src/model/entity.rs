use crate::model::Id;
use serde::{Deserialize, Serialize};

///
/// EntitySchema
///
/// Runtime entity model for one table: the property names a client addresses
/// and the domain type of each property.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct EntitySchema {
    pub name: String,
    pub table_id: Id,
    #[serde(default)]
    pub properties: Vec<Property>,
}

impl EntitySchema {
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|property| property.name == name)
    }

    /// Property bound to a column, matched case-insensitively.
    #[must_use]
    pub fn property_for_column(&self, db_column_name: &str) -> Option<&Property> {
        self.properties.iter().find(|property| {
            property
                .column_name
                .as_deref()
                .is_some_and(|column| column.eq_ignore_ascii_case(db_column_name))
        })
    }
}

///
/// Property
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Property {
    pub name: String,
    #[serde(default)]
    pub column_name: Option<String>,
    pub domain: DomainType,
}

///
/// DomainType
///
/// Lossy classification of a property value, enough to decide search and
/// value-field handling.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainType {
    Boolean,
    ForeignKey { entity: String },
    Primitive,
}

impl DomainType {
    #[must_use]
    pub const fn is_boolean(&self) -> bool {
        matches!(self, Self::Boolean)
    }

    #[must_use]
    pub const fn is_foreign_key(&self) -> bool {
        matches!(self, Self::ForeignKey { .. })
    }

    #[must_use]
    pub fn target_entity(&self) -> Option<&str> {
        match self {
            Self::ForeignKey { entity } => Some(entity),
            _ => None,
        }
    }
}
