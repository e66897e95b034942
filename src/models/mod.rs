pub mod animal;
pub mod filter;
pub mod milestone;
pub mod weighing;

pub use animal::{AnimalRecord, Severity, StatusCode};
pub use filter::{FilterSelection, GeneticFilter, Selection};
pub use milestone::{Document, DocumentStatus, Milestone, Priority, SubMilestone};
pub use weighing::WeighingRecord;
