//! Layered service-user mapping resolution.
//!
//! This crate maps a calling principal (component name plus optional
//! sub-service qualifier) to a service-user id used for downstream
//! authorization decisions. The mapping is assembled from one base
//! configuration layer plus any number of ranked amendment layers that
//! independent contributors add and remove at runtime:
//! - [`MappingEngine`]: owns the active layer set and the merged table
//! - [`Layer`]/[`Rank`]: one contributor's ranked, immutable entry bundle
//! - [`ResolutionTable`]: the merged snapshot consulted by lookups
//! - [`ServiceUserValidator`]: pluggable veto over resolved ids
//! - [`MappingListener`]: change notification for downstream registrations

pub mod engine;
pub mod entry;
pub mod error;
pub mod layer;
pub mod listener;
pub mod parse;
pub mod registrar;
pub mod table;
pub mod validator;

pub use engine::MappingEngine;
pub use entry::{MappingEntry, MappingKey};
pub use error::{EngineError, ParseError};
pub use layer::{Layer, LayerHandle, Rank, SourceToken};
pub use listener::{ActiveUserIds, MappingListener};
pub use parse::{parse_entries, parse_entry};
pub use registrar::{MarkerReconciler, MarkerRegistrar};
pub use table::ResolutionTable;
pub use validator::{ServiceUserValidator, ValidatorChain};
