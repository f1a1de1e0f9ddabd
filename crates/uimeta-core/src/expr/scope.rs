use crate::{
    model::{process::Parameter, reference::ReferenceKind, window::Tab},
    store::MetadataStore,
};

///
/// ScopeEntry
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScopeEntry {
    pub column_name: String,
    pub property: String,
    pub boolean: bool,
}

///
/// Scope
///
/// Names a logic expression may refer to as sibling fields. Lookup matches
/// either the DB column name or the property name, ignoring case.
///

#[derive(Clone, Debug, Default)]
pub struct Scope {
    entries: Vec<ScopeEntry>,
}

impl Scope {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn bind(
        mut self,
        column_name: impl Into<String>,
        property: impl Into<String>,
        boolean: bool,
    ) -> Self {
        self.entries.push(ScopeEntry {
            column_name: column_name.into(),
            property: property.into(),
            boolean,
        });

        self
    }

    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&ScopeEntry> {
        self.entries.iter().find(|entry| {
            entry.column_name.eq_ignore_ascii_case(name) || entry.property.eq_ignore_ascii_case(name)
        })
    }

    /// Scope over the column-bound fields of a tab.
    pub fn for_tab<S: MetadataStore + ?Sized>(tab: &Tab, store: &S) -> Self {
        let mut scope = Self::new();

        for field in &tab.fields {
            let Some(column) = field.column_id.as_deref().and_then(|id| store.column(id)) else {
                continue;
            };
            let property = store
                .column_property(column)
                .map_or_else(|| column.db_column_name.clone(), |p| p.name.clone());
            let boolean = ReferenceKind::from_id(&column.reference_id) == ReferenceKind::YesNo;

            scope = scope.bind(column.db_column_name.clone(), property, boolean);
        }

        scope
    }

    /// Scope over a process definition's parameters, keyed by column name.
    #[must_use]
    pub fn for_parameters(parameters: &[Parameter]) -> Self {
        parameters.iter().fold(Self::new(), |scope, parameter| {
            let boolean = ReferenceKind::from_id(&parameter.reference_id) == ReferenceKind::YesNo;

            scope.bind(
                parameter.db_column_name.clone(),
                parameter.db_column_name.clone(),
                boolean,
            )
        })
    }
}
