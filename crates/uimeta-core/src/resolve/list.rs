use crate::{
    document::ListEntry,
    error::{ErrorOrigin, InternalError},
    model::reference::Reference,
    store::{MetadataStore, Translator},
};

///
/// ReferenceListResolver
///
/// Enumerates a list reference's values in stored order, labels translated
/// into the request language. Inactive values are kept and flagged so the
/// client can still label stored data.
///

pub struct ReferenceListResolver<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S: MetadataStore + Translator + ?Sized> ReferenceListResolver<'a, S> {
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Entries of the list reference `reference_id`.
    pub fn resolve(&self, reference_id: &str, language: &str) -> Result<Vec<ListEntry>, InternalError> {
        let reference = self
            .store
            .reference(reference_id)
            .ok_or_else(|| InternalError::not_found(ErrorOrigin::Reference, "reference", reference_id))?;

        Ok(self.entries(reference, language))
    }

    #[must_use]
    pub fn entries(&self, reference: &Reference, language: &str) -> Vec<ListEntry> {
        reference
            .list_values
            .iter()
            .map(|value| ListEntry {
                id: value.id.clone(),
                label: self.store.translate_or(&value.id, language, &value.label),
                value: value.search_key.clone(),
                active: value.active,
            })
            .collect()
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{STATUS_LIST_REF, fixture_store};

    #[test]
    fn entries_keep_store_order() {
        let store = fixture_store();
        let resolver = ReferenceListResolver::new(&store);

        let entries = resolver.resolve(STATUS_LIST_REF, "en_US").unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(
            (entries[0].id.as_str(), entries[0].label.as_str(), entries[0].value.as_str()),
            ("1", "Open", "OP")
        );
        assert_eq!(
            (entries[1].id.as_str(), entries[1].label.as_str(), entries[1].value.as_str()),
            ("2", "Closed", "CL")
        );
    }

    #[test]
    fn labels_are_translated() {
        let store = fixture_store();
        let resolver = ReferenceListResolver::new(&store);

        let entries = resolver.resolve(STATUS_LIST_REF, "es_ES").unwrap();

        assert_eq!(entries[0].label, "Abierto");
        assert_eq!(entries[1].label, "Closed");
    }

    #[test]
    fn unknown_reference_is_not_found() {
        let store = fixture_store();
        let resolver = ReferenceListResolver::new(&store);

        assert!(resolver.resolve("missing", "en_US").unwrap_err().is_not_found());
    }
}
