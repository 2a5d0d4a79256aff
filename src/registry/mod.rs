//! Process-lifetime registry of generated types.
//!
//! Keys are generated type names (source type name + fixed suffix). Entries
//! are never evicted, and a name maps to at most one generated type, so
//! repeated requests for the same source type return the identical `Arc`.
//!
//! # Concurrency
//!
//! The registry is owned by the orchestrator rather than being global.
//! [`TypeRegistry::get_or_try_insert_with`] is atomic per name: concurrent
//! first-time requests for the same name build at most one type and every
//! caller observes the winner. The builder closure runs while the name's
//! shard is locked and must not touch the registry.

mod hash;
pub use hash::schema_fingerprint;

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::error::{ReportError, ReportResult};
use crate::model::{RowType, SheetType};

/// A generated type held by the registry.
#[derive(Debug, Clone)]
pub enum GeneratedType {
    Row(Arc<RowType>),
    Sheet(Arc<SheetType>),
}

impl GeneratedType {
    pub fn name(&self) -> &str {
        match self {
            GeneratedType::Row(row) => row.name(),
            GeneratedType::Sheet(sheet) => sheet.name(),
        }
    }

    pub fn as_row(&self) -> Option<&Arc<RowType>> {
        match self {
            GeneratedType::Row(row) => Some(row),
            GeneratedType::Sheet(_) => None,
        }
    }

    pub fn as_sheet(&self) -> Option<&Arc<SheetType>> {
        match self {
            GeneratedType::Sheet(sheet) => Some(sheet),
            GeneratedType::Row(_) => None,
        }
    }

    /// Whether both values refer to the same registered instance.
    pub fn ptr_eq(&self, other: &GeneratedType) -> bool {
        match (self, other) {
            (GeneratedType::Row(a), GeneratedType::Row(b)) => Arc::ptr_eq(a, b),
            (GeneratedType::Sheet(a), GeneratedType::Sheet(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Name-keyed cache of generated types.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    entries: DashMap<String, GeneratedType>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, name: &str) -> Option<GeneratedType> {
        self.entries.get(name).map(|entry| entry.value().clone())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Register a new type under its own name.
    ///
    /// A name may be registered once; a second registration is a naming
    /// collision and leaves the existing entry untouched.
    pub fn register(&self, generated: GeneratedType) -> ReportResult<()> {
        match self.entries.entry(generated.name().to_string()) {
            Entry::Occupied(entry) => Err(ReportError::synthesis(
                entry.key().clone(),
                "a type with this name is already registered",
            )),
            Entry::Vacant(entry) => {
                tracing::debug!(type_name = %entry.key(), "registered generated type");
                entry.insert(generated);
                Ok(())
            }
        }
    }

    /// Return the entry for `name`, building and registering it if absent.
    ///
    /// The boolean is `true` when this call inserted the entry. A builder
    /// that returns a type with a different name is rejected.
    pub fn get_or_try_insert_with<F>(
        &self,
        name: &str,
        build: F,
    ) -> ReportResult<(GeneratedType, bool)>
    where
        F: FnOnce() -> ReportResult<GeneratedType>,
    {
        match self.entries.entry(name.to_string()) {
            Entry::Occupied(entry) => {
                tracing::trace!(type_name = %name, "registry hit");
                Ok((entry.get().clone(), false))
            }
            Entry::Vacant(entry) => {
                let generated = build()?;
                if generated.name() != name {
                    return Err(ReportError::synthesis(
                        name,
                        format!("builder produced type named `{}`", generated.name()),
                    ));
                }
                tracing::debug!(type_name = %name, "registered generated type");
                entry.insert(generated.clone());
                Ok((generated, true))
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }
}
