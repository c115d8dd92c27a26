//! Project-keyed snapshot store for the two-phase comparison workflow:
//! the planned snapshot is uploaded first and must survive until the built
//! snapshot arrives.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use ahash::AHashMap;
use serde::Serialize;
use tracing::info;

use crate::error::{Error, Result};
use crate::network::NetworkSnapshot;
use crate::reconcile::{ComparisonReport, reconcile};

#[derive(Clone, Default)]
struct ProjectEntry {
    planned: Option<Arc<NetworkSnapshot>>,
    built: Option<Arc<NetworkSnapshot>>,
}

/// Phase flags for one stored project.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProjectPhases {
    pub name: String,
    pub has_planned: bool,
    pub has_built: bool,
}

/// Shared store of per-project snapshots.
///
/// Snapshots are stored as whole `Arc`s swapped under a single lock, so a
/// reader always observes a fully written snapshot; concurrent uploads for
/// the same project serialize on the lock (last write wins).
#[derive(Default)]
pub struct ProjectStore {
    projects: RwLock<AHashMap<String, ProjectEntry>>,
}

impl ProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_planned(&self, project: &str, snapshot: NetworkSnapshot) {
        self.write().entry(project.to_owned()).or_default().planned = Some(Arc::new(snapshot));
        info!(project, phase = "planned", "stored snapshot");
    }

    pub fn put_built(&self, project: &str, snapshot: NetworkSnapshot) {
        self.write().entry(project.to_owned()).or_default().built = Some(Arc::new(snapshot));
        info!(project, phase = "built", "stored snapshot");
    }

    pub fn planned(&self, project: &str) -> Result<Arc<NetworkSnapshot>> {
        self.read()
            .get(project)
            .and_then(|entry| entry.planned.clone())
            .ok_or_else(|| Error::NotFound(format!("no planned snapshot for project '{project}'")))
    }

    pub fn built(&self, project: &str) -> Result<Arc<NetworkSnapshot>> {
        self.read()
            .get(project)
            .and_then(|entry| entry.built.clone())
            .ok_or_else(|| Error::NotFound(format!("no built snapshot for project '{project}'")))
    }

    /// Reconcile the stored planned and built snapshots for one project.
    pub fn compare(&self, project: &str) -> Result<ComparisonReport> {
        let planned = self.planned(project)?;
        let built = self.built(project)?;
        Ok(reconcile(&planned, &built))
    }

    /// All stored projects with their phase flags, sorted by name.
    pub fn projects(&self) -> Vec<ProjectPhases> {
        let mut projects: Vec<ProjectPhases> = self
            .read()
            .iter()
            .map(|(name, entry)| ProjectPhases {
                name: name.clone(),
                has_planned: entry.planned.is_some(),
                has_built: entry.built.is_some(),
            })
            .collect();
        projects.sort_by(|a, b| a.name.cmp(&b.name));
        projects
    }

    /// Drop a project and both of its snapshots. Returns false when the
    /// project was never stored.
    pub fn remove(&self, project: &str) -> bool {
        self.write().remove(project).is_some()
    }

    // Entries are swapped whole, so the map stays coherent even if a
    // writer panicked and poisoned the lock.
    fn read(&self) -> RwLockReadGuard<'_, AHashMap<String, ProjectEntry>> {
        self.projects.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, AHashMap<String, ProjectEntry>> {
        self.projects.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
