//! Application state managed by Tauri.
//!
//! [`AppState`] is registered with `tauri::Builder::manage` and accessed from
//! command handlers via `tauri::State<AppState>`. Each store carries a
//! monotonically increasing `revision` that every successful mutation bumps,
//! so the frontend can tell when a snapshot is stale.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::breeding::{self, BreedingConfig, BreedingReport};
use crate::feedlot::{self, FeedlotFilter, FeedlotReport};
use crate::models::{AnimalRecord, FilterSelection, Milestone, WeighingRecord};
use crate::tracker::{default_milestones, rollup};

/// A data file that has been loaded into memory.
#[derive(Debug)]
pub struct LoadedDataset<R = AnimalRecord> {
    /// Absolute path to the source file on disk.
    pub path: PathBuf,
    /// SHA-256 hex digest of the file at load time.
    pub checksum: String,
    /// RFC 3339 load timestamp (UTC).
    pub loaded_at: String,
    pub records: Vec<R>,
    /// Rows dropped at import because they could not be mapped.
    pub skipped_rows: usize,
}

/// Breeding dashboard store: the loaded herd plus the transient filter.
#[derive(Debug, Default)]
pub struct Herd {
    pub dataset: Option<LoadedDataset>,
    pub filter: FilterSelection,
    pub config: BreedingConfig,
    pub revision: u64,
}

impl Herd {
    pub fn with_config(config: BreedingConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// All loaded records, or an empty slice before the first load.
    pub fn records(&self) -> &[AnimalRecord] {
        self.dataset.as_ref().map_or(&[], |d| d.records.as_slice())
    }

    /// Recompute every aggregate for the current filter.
    pub fn report(&self) -> BreedingReport {
        breeding::analyze(self.records(), &self.filter, &self.config)
    }

    pub fn bump(&mut self) -> u64 {
        self.revision += 1;
        self.revision
    }
}

/// Feedlot dashboard store: the loaded dispatch lines plus the filter.
#[derive(Debug, Default)]
pub struct Feedlot {
    pub dataset: Option<LoadedDataset<WeighingRecord>>,
    pub filter: FeedlotFilter,
    pub revision: u64,
}

impl Feedlot {
    pub fn records(&self) -> &[WeighingRecord] {
        self.dataset.as_ref().map_or(&[], |d| d.records.as_slice())
    }

    pub fn report(&self) -> FeedlotReport {
        feedlot::analyze(self.records(), &self.filter)
    }

    pub fn bump(&mut self) -> u64 {
        self.revision += 1;
        self.revision
    }
}

/// Milestone tracker store.
#[derive(Debug)]
pub struct Tracker {
    pub milestones: Vec<Milestone>,
    pub revision: u64,
    /// File the milestones were last loaded from or saved to.
    pub source_path: Option<PathBuf>,
    /// RFC 3339 timestamp of the last save (empty when never saved).
    pub saved_at: String,
}

impl Default for Tracker {
    fn default() -> Self {
        Self {
            milestones: default_milestones(),
            revision: 0,
            source_path: None,
            saved_at: String::new(),
        }
    }
}

impl Tracker {
    /// Roll completions up over the whole tree and bump the revision.
    ///
    /// Called at the end of every successful mutation.
    pub fn commit(&mut self) -> u64 {
        rollup::recalculate_all(&mut self.milestones);
        self.revision += 1;
        self.revision
    }

    pub fn milestone_mut(&mut self, id: &str) -> Option<&mut Milestone> {
        self.milestones.iter_mut().find(|m| m.id == id)
    }
}

/// Root application state managed by Tauri.
///
/// Every store is wrapped in [`RwLock`] so that concurrent read commands
/// (e.g. a snapshot refresh alongside a code search) do not block each
/// other.
pub struct AppState {
    pub herd: RwLock<Herd>,
    pub feedlot: RwLock<Feedlot>,
    pub tracker: RwLock<Tracker>,
}

impl AppState {
    pub fn new(config: BreedingConfig, tracker: Tracker) -> Self {
        Self {
            herd: RwLock::new(Herd::with_config(config)),
            feedlot: RwLock::new(Feedlot::default()),
            tracker: RwLock::new(tracker),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(BreedingConfig::default(), Tracker::default())
    }
}
