use crate::{
    FIELD_SEPARATOR, ID, IDENTIFIER,
    document::SelectorDocument,
    error::InternalError,
    model::{
        Id,
        reference::{ReferenceKind, ReferencedTree, Selector},
    },
    resolve::property_path::{domain_type, is_derived, property_name},
    store::MetadataStore,
};
use tracing::warn;
use uimeta_config::Config;

const SUBSTRING: &str = "substring";

///
/// SelectorResolver
///
/// Stateless lookup-configuration service shared by fields, process
/// parameters and legacy process parameters.
///
/// The branch is chosen by what the value reference defines: a selector wins,
/// then a referenced tree, and otherwise the plain combo-table lookup.
///

pub struct SelectorResolver<'a, S: ?Sized> {
    store: &'a S,
    config: &'a Config,
}

impl<'a, S: MetadataStore + ?Sized> SelectorResolver<'a, S> {
    pub const fn new(store: &'a S, config: &'a Config) -> Self {
        Self { store, config }
    }

    /// Lookup configuration for a reference, or `None` when the kind does not
    /// bear a selector.
    pub fn resolve(
        &self,
        field_id: &Id,
        kind: &ReferenceKind,
        reference_value_id: Option<&Id>,
    ) -> Result<Option<SelectorDocument>, InternalError> {
        if !kind.is_selector_bearing() {
            return Ok(None);
        }

        let reference = reference_value_id.and_then(|id| self.store.reference(id));
        let selector = reference.and_then(|r| r.selector.as_ref());
        let tree = reference.and_then(|r| r.tree.as_ref());

        let document = match (selector, tree) {
            (Some(selector), _) => self.custom(field_id, selector)?,
            (None, Some(tree)) => self.tree(field_id, tree),
            (None, None) => self.plain(field_id),
        };

        Ok(Some(document))
    }

    /// Like `resolve`, but a failing custom or tree resolution falls back to
    /// the plain lookup, so a selector-bearing owner always gets a complete
    /// configuration.
    pub fn resolve_or_plain(
        &self,
        owner_id: &Id,
        kind: &ReferenceKind,
        reference_value_id: Option<&Id>,
    ) -> Option<SelectorDocument> {
        match self.resolve(owner_id, kind, reference_value_id) {
            Ok(document) => document,
            Err(err) => {
                warn!(owner_id = %owner_id, error = %err, "selector resolution failed, using plain lookup");
                Some(self.plain(owner_id))
            }
        }
    }

    /// Plain combo-table lookup over the identifier.
    #[must_use]
    pub fn plain(&self, field_id: &Id) -> SelectorDocument {
        SelectorDocument {
            datasource_id: self.config.datasource.combo_table.clone(),
            selector_definition_id: None,
            sort_field: IDENTIFIER.to_string(),
            match_mode: SUBSTRING.to_string(),
            no_count: true,
            field_id: field_id.clone(),
            display_field: IDENTIFIER.to_string(),
            value_field: ID.to_string(),
            selected_properties: vec![ID.to_string()],
            additional_properties: vec![ID.to_string()],
            extra_search_fields: None,
            tree_reference_id: None,
            filter_class_name: None,
        }
    }

    fn tree(&self, field_id: &Id, tree: &ReferencedTree) -> SelectorDocument {
        let display = tree
            .display_property
            .as_deref()
            .map_or_else(|| IDENTIFIER.to_string(), |p| p.replace('.', FIELD_SEPARATOR));

        SelectorDocument {
            datasource_id: self.config.datasource.tree.clone(),
            selector_definition_id: Some(tree.id.clone()),
            sort_field: display.clone(),
            match_mode: SUBSTRING.to_string(),
            no_count: true,
            field_id: field_id.clone(),
            display_field: display,
            value_field: tree.value_property.replace('.', FIELD_SEPARATOR),
            selected_properties: vec![ID.to_string()],
            additional_properties: vec![ID.to_string()],
            extra_search_fields: None,
            tree_reference_id: Some(tree.id.clone()),
            filter_class_name: None,
        }
    }

    fn custom(&self, field_id: &Id, selector: &Selector) -> Result<SelectorDocument, InternalError> {
        let datasource_id = self.datasource_id(selector)?;

        let sort_field = match selector.display_field() {
            Some(field) => field
                .display_alias
                .as_deref()
                .or(field.property.as_deref())
                .map_or_else(|| IDENTIFIER.to_string(), |name| name.replace('.', FIELD_SEPARATOR)),
            None => IDENTIFIER.to_string(),
        };

        let display_field = self.display_field(selector)?;
        let value_field = self.value_field(selector)?;
        let (selected_properties, additional_properties) =
            self.property_sets(selector, &display_field, &value_field)?;
        let extra_search_fields = self.extra_search_fields(selector, &display_field)?;

        Ok(SelectorDocument {
            datasource_id,
            selector_definition_id: Some(selector.id.clone()),
            sort_field,
            match_mode: selector.text_match.clone(),
            no_count: true,
            field_id: field_id.clone(),
            display_field,
            value_field,
            selected_properties,
            additional_properties,
            extra_search_fields: Some(extra_search_fields),
            tree_reference_id: None,
            filter_class_name: Some(self.config.datasource.selector_filter_class.clone()),
        })
    }

    // Manual datasource, then the custom-query datasource, then the table name.
    fn datasource_id(&self, selector: &Selector) -> Result<String, InternalError> {
        if let Some(ds) = &selector.datasource {
            return Ok(ds.id.to_string());
        }
        if selector.custom_query {
            return Ok(self.config.datasource.custom_query.clone());
        }

        selector
            .table_id
            .as_deref()
            .and_then(|id| self.store.table(id))
            .map(|table| table.name.clone())
            .ok_or_else(|| {
                InternalError::selector_configuration(format!(
                    "selector {} has neither datasource nor table",
                    selector.id
                ))
            })
    }

    /// Display property of a selector; falls back to the first manual
    /// datasource field and then to the identifier token.
    pub fn display_field(&self, selector: &Selector) -> Result<String, InternalError> {
        if let Some(field) = selector.display_field() {
            return property_name(field);
        }

        Ok(selector.manual_datasource_field().map_or_else(
            || IDENTIFIER.to_string(),
            |ds| ds.name.replace('.', FIELD_SEPARATOR),
        ))
    }

    /// Value property of a selector; foreign keys on non-custom-query
    /// selectors address the target's id. Falls back like `display_field`,
    /// ending at `id`.
    pub fn value_field(&self, selector: &Selector) -> Result<String, InternalError> {
        if let Some(field) = selector.value_field() {
            let name = property_name(field)?;
            if !selector.custom_query && domain_type(self.store, selector, field)?.is_foreign_key() {
                return Ok(format!("{name}{FIELD_SEPARATOR}{ID}"));
            }

            return Ok(name);
        }

        Ok(selector
            .manual_datasource_field()
            .map_or_else(|| ID.to_string(), |ds| ds.name.clone()))
    }

    // Selected: id, display (if not the identifier), then every flat name.
    // Additional: value, display, outfields, then every derived name.
    fn property_sets(
        &self,
        selector: &Selector,
        display: &str,
        value: &str,
    ) -> Result<(Vec<String>, Vec<String>), InternalError> {
        let mut selected = vec![ID.to_string()];
        let mut additional = vec![value.to_string()];
        let mut derived = Vec::new();

        if selector.display_field().is_some() && display != IDENTIFIER {
            push_unique(&mut selected, display);
            push_unique(&mut additional, display);
        }

        for field in &selector.fields {
            let name = property_name(field)?;
            if name == ID || name == IDENTIFIER {
                continue;
            }

            if is_derived(&name) {
                push_unique(&mut derived, &name);
            } else {
                push_unique(&mut selected, &name);
            }

            if field.outfield {
                push_unique(&mut additional, &name);
            }
        }

        for name in &derived {
            push_unique(&mut additional, name);
        }

        Ok((selected, additional))
    }

    // Active searchable fields other than the display field; booleans never
    // search and foreign keys search through their identifier.
    fn extra_search_fields(
        &self,
        selector: &Selector,
        display: &str,
    ) -> Result<Vec<String>, InternalError> {
        let mut out = Vec::new();

        for field in selector.fields.iter().filter(|f| f.active && f.searchable) {
            let name = property_name(field)?;
            if name == display {
                continue;
            }

            let domain = domain_type(self.store, selector, field)?;
            if domain.is_boolean() {
                continue;
            }

            let name = if domain.is_foreign_key() {
                format!("{name}{FIELD_SEPARATOR}{IDENTIFIER}")
            } else {
                name
            };
            push_unique(&mut out, &name);
        }

        Ok(out)
    }
}

fn push_unique(list: &mut Vec<String>, name: &str) {
    if !list.iter().any(|existing| existing == name) {
        list.push(name.to_string());
    }
}

///
/// TESTS
///
