use crate::{
    error::InternalError,
    model::{
        Id,
        access::{ProcessAccess, WindowAccess},
        entity::EntitySchema,
        process::{ProcessAction, ProcessDefinition, ReportDefinition},
        reference::Reference,
        table::{Column, Table},
        window::{Tab, Window},
    },
    store::{MetadataStore, Translator},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// Catalog
///
/// Serialized metadata snapshot accepted by `InMemoryStore::from_json`.
/// Every list defaults to empty.
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Catalog {
    pub windows: Vec<Window>,
    pub tables: Vec<Table>,
    pub entities: Vec<EntitySchema>,
    pub references: Vec<Reference>,
    pub process_definitions: Vec<ProcessDefinition>,
    pub process_actions: Vec<ProcessAction>,
    pub report_definitions: Vec<ReportDefinition>,
    pub window_accesses: Vec<WindowAccess>,
    pub process_accesses: Vec<ProcessAccess>,
    pub translations: Vec<Translation>,
}

///
/// Translation
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Translation {
    pub id: Id,
    pub language: String,
    pub text: String,
}

///
/// InMemoryStore
///
/// Indexed, read-only snapshot. Tabs and columns are reachable by id
/// through secondary indexes into their owning window / table.
///

#[derive(Debug, Default)]
pub struct InMemoryStore {
    windows: BTreeMap<Id, Window>,
    tab_windows: BTreeMap<Id, Id>,
    tables: BTreeMap<Id, Table>,
    column_tables: BTreeMap<Id, Id>,
    references: BTreeMap<Id, Reference>,
    entities: BTreeMap<String, EntitySchema>,
    table_entities: BTreeMap<Id, String>,
    process_definitions: BTreeMap<Id, ProcessDefinition>,
    process_actions: BTreeMap<Id, ProcessAction>,
    report_definitions: BTreeMap<Id, ReportDefinition>,
    window_accesses: Vec<WindowAccess>,
    process_accesses: Vec<ProcessAccess>,
    translations: BTreeMap<(String, Id), String>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a snapshot from its JSON form.
    pub fn from_json(source: &str) -> Result<Self, InternalError> {
        let catalog: Catalog = serde_json::from_str(source)
            .map_err(|err| InternalError::store_internal(format!("invalid catalog: {err}")))?;

        Ok(Self::from_catalog(catalog))
    }

    #[must_use]
    pub fn from_catalog(catalog: Catalog) -> Self {
        let mut store = Self::default();

        catalog.windows.into_iter().for_each(|w| store.insert_window(w));
        catalog.tables.into_iter().for_each(|t| store.insert_table(t));
        catalog.entities.into_iter().for_each(|e| store.insert_entity(e));
        catalog
            .references
            .into_iter()
            .for_each(|r| store.insert_reference(r));
        catalog
            .process_definitions
            .into_iter()
            .for_each(|p| store.insert_process_definition(p));
        catalog
            .process_actions
            .into_iter()
            .for_each(|p| store.insert_process_action(p));
        catalog
            .report_definitions
            .into_iter()
            .for_each(|r| store.insert_report_definition(r));
        catalog
            .window_accesses
            .into_iter()
            .for_each(|a| store.insert_window_access(a));
        catalog
            .process_accesses
            .into_iter()
            .for_each(|a| store.insert_process_access(a));
        for translation in catalog.translations {
            store.insert_translation(translation.id, translation.language, translation.text);
        }

        store
    }

    pub fn insert_window(&mut self, window: Window) {
        for tab in &window.tabs {
            self.tab_windows.insert(tab.id.clone(), window.id.clone());
        }
        self.windows.insert(window.id.clone(), window);
    }

    pub fn insert_table(&mut self, table: Table) {
        for column in &table.columns {
            self.column_tables.insert(column.id.clone(), table.id.clone());
        }
        self.tables.insert(table.id.clone(), table);
    }

    pub fn insert_entity(&mut self, entity: EntitySchema) {
        self.table_entities
            .insert(entity.table_id.clone(), entity.name.clone());
        self.entities.insert(entity.name.clone(), entity);
    }

    pub fn insert_reference(&mut self, reference: Reference) {
        self.references.insert(reference.id.clone(), reference);
    }

    pub fn insert_process_definition(&mut self, process: ProcessDefinition) {
        self.process_definitions.insert(process.id.clone(), process);
    }

    pub fn insert_process_action(&mut self, process: ProcessAction) {
        self.process_actions.insert(process.id.clone(), process);
    }

    pub fn insert_report_definition(&mut self, report: ReportDefinition) {
        self.report_definitions.insert(report.id.clone(), report);
    }

    pub fn insert_window_access(&mut self, access: WindowAccess) {
        self.window_accesses.push(access);
    }

    pub fn insert_process_access(&mut self, access: ProcessAccess) {
        self.process_accesses.push(access);
    }

    pub fn insert_translation(
        &mut self,
        id: impl Into<Id>,
        language: impl Into<String>,
        text: impl Into<String>,
    ) {
        self.translations
            .insert((language.into(), id.into()), text.into());
    }

    #[must_use]
    pub fn window_count(&self) -> usize {
        self.windows.len()
    }
}

impl MetadataStore for InMemoryStore {
    fn window(&self, id: &str) -> Option<&Window> {
        self.windows.get(id)
    }

    fn tab(&self, id: &str) -> Option<&Tab> {
        let window_id = self.tab_windows.get(id)?;

        self.windows.get(window_id)?.tab(id)
    }

    fn table(&self, id: &str) -> Option<&Table> {
        self.tables.get(id)
    }

    fn column(&self, id: &str) -> Option<&Column> {
        let table_id = self.column_tables.get(id)?;

        self.tables
            .get(table_id)?
            .columns
            .iter()
            .find(|column| column.id == id)
    }

    fn reference(&self, id: &str) -> Option<&Reference> {
        self.references.get(id)
    }

    fn entity(&self, name: &str) -> Option<&EntitySchema> {
        self.entities.get(name)
    }

    fn entity_for_table(&self, table_id: &str) -> Option<&EntitySchema> {
        let name = self.table_entities.get(table_id)?;

        self.entities.get(name)
    }

    fn process_definition(&self, id: &str) -> Option<&ProcessDefinition> {
        self.process_definitions.get(id)
    }

    fn process_action(&self, id: &str) -> Option<&ProcessAction> {
        self.process_actions.get(id)
    }

    fn report_definition(&self, id: &str) -> Option<&ReportDefinition> {
        self.report_definitions.get(id)
    }

    fn window_access(&self, role_id: &str, window_id: &str) -> Option<&WindowAccess> {
        self.window_accesses.iter().find(|access| {
            access.active && access.role_id == role_id && access.window_id == window_id
        })
    }

    fn first_tab_for_table(&self, table_id: &str, active_only: bool) -> Option<&Tab> {
        self.windows
            .values()
            .flat_map(|window| window.tabs.iter())
            .find(|tab| tab.table_id == table_id && (tab.active || !active_only))
    }

    fn has_process_access(&self, role_id: &str, process_definition_id: &str) -> bool {
        self.process_accesses.iter().any(|access| {
            access.active
                && access.role_id == role_id
                && access.process_definition_id == process_definition_id
        })
    }
}

impl Translator for InMemoryStore {
    fn translation(&self, id: &str, language: &str) -> Option<String> {
        self.translations
            .get(&(language.to_string(), Id::from(id)))
            .cloned()
    }
}

///
/// TESTS
///
