//! Planet records and their derived numeric views
//!
//! - Record types supplied by the catalog layer
//! - Feature vector defaulting
//! - Habitability and transit-depth heuristics

pub mod features;
pub mod habitability;
pub mod record;

pub use features::{to_feature_vector, FeatureVector};
pub use record::{ConfirmationStatus, PlanetRecord};
