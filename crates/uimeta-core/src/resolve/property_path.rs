use crate::{
    FIELD_SEPARATOR,
    error::InternalError,
    model::{
        entity::DomainType,
        reference::{Selector, SelectorField},
    },
    store::MetadataStore,
};

/// Wire name of a selector field.
///
/// Priority: explicit property path, display alias, datasource field name.
/// Dots become the field-path separator.
pub fn property_name(field: &SelectorField) -> Result<String, InternalError> {
    let raw = field
        .property
        .as_deref()
        .or(field.display_alias.as_deref())
        .or_else(|| field.datasource_field.as_ref().map(|ds| ds.name.as_str()))
        .ok_or_else(|| {
            InternalError::selector_configuration(format!(
                "selector field {} has no property, alias or datasource field",
                field.id
            ))
        })?;

    Ok(raw.replace('.', FIELD_SEPARATOR))
}

/// True when a wire name is a nested path.
#[must_use]
pub fn is_derived(name: &str) -> bool {
    name.contains(FIELD_SEPARATOR)
}

/// Domain type of a selector field.
///
/// Resolved against the selector's bound entity when the field names a
/// property, else through the field's explicit reference on a custom-query
/// selector, else through its datasource field's reference. Anything else is
/// a configuration error.
pub fn domain_type<S: MetadataStore + ?Sized>(
    store: &S,
    selector: &Selector,
    field: &SelectorField,
) -> Result<DomainType, InternalError> {
    if let (Some(table_id), Some(path)) = (&selector.table_id, &field.property) {
        let entity = store.entity_for_table(table_id).ok_or_else(|| {
            InternalError::selector_configuration(format!(
                "selector {} is bound to table {table_id} with no entity",
                selector.id
            ))
        })?;
        let property = store.property_from_path(&entity.name, path).ok_or_else(|| {
            InternalError::selector_configuration(format!(
                "property {path} not found in entity {}",
                entity.name
            ))
        })?;

        return Ok(property.domain.clone());
    }

    if selector.table_id.is_some()
        && selector.custom_query
        && let Some(reference_id) = &field.reference_id
    {
        return Ok(store.reference_domain(reference_id));
    }

    if let Some(reference_id) = field
        .datasource_field
        .as_ref()
        .and_then(|ds| ds.reference_id.as_ref())
    {
        return Ok(store.reference_domain(reference_id));
    }

    Err(InternalError::selector_configuration(format!(
        "cannot classify selector field {} of selector {}",
        field.id, selector.id
    )))
}

///
/// TESTS
///
