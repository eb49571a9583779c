//! Configuration model for the mapping engine.
//!
//! Mirrors the shape the engine's configuration arrives in from the outside:
//! one base block plus independently contributed amendment blocks, each
//! carrying raw `principal[:sub]=user` entries and, for amendments, a
//! precedence rank. Loading and watching the files themselves is the
//! embedder's concern; this crate only models the blocks and applies them.

use serde::Deserialize;
use sumap_core::{EngineError, LayerHandle, MappingEngine, SourceToken, parse_entries};


/// Base configuration block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BaseConfig {
	/// Raw `principal[:sub]=user` mapping entries.
	#[serde(default)]
	pub user_mapping: Vec<String>,
}

impl BaseConfig {
	/// Parses and installs this block as the engine's base layer.
	///
	/// Malformed entries are skipped and logged, never fatal to the block.
	pub fn apply(&self, engine: &MappingEngine) {
		engine.configure_base(parse_entries(self.user_mapping.iter().map(String::as_str)));
	}
}

/// One amendment contribution.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AmendmentConfig {
	/// Raw `principal[:sub]=user` mapping entries.
	#[serde(default)]
	pub user_mapping: Vec<String>,
	/// Layer precedence; higher overrides lower, and every amendment
	/// overrides the base.
	#[serde(default)]
	pub service_ranking: i32,
}

impl AmendmentConfig {
	/// Parses and adds this block as an amendment layer for `source`.
	///
	/// Malformed entries are skipped and logged; a duplicate source is a
	/// hard failure, as with [`MappingEngine::add_layer`].
	pub fn apply(
		&self,
		engine: &MappingEngine,
		source: SourceToken,
	) -> Result<LayerHandle, EngineError> {
		engine.add_layer(
			source,
			self.service_ranking,
			parse_entries(self.user_mapping.iter().map(String::as_str)),
		)
	}
}
