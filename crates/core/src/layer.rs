//! Ranked mapping layers.

use std::fmt;
use std::sync::Arc;

use crate::entry::MappingEntry;

/// Stable, opaque identity of a layer contributor.
///
/// Used to reject duplicate layers from the same contributor and to find the
/// layer again on removal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceToken(Arc<str>);

impl SourceToken {
	/// Creates a token from the contributor's stable identity string.
	pub fn new(token: &str) -> Self {
		Self(Arc::from(token))
	}

	/// The underlying identity string.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for SourceToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for SourceToken {
	fn from(token: &str) -> Self {
		Self::new(token)
	}
}

/// Layer precedence.
///
/// The base configuration layer always sorts below every amendment, whatever
/// the amendment's rank; among amendments, higher ranks win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
	/// Sentinel rank of the base configuration layer.
	Base,
	/// Amendment rank; higher takes precedence.
	Amendment(i32),
}

/// One contributor's immutable, ranked bundle of mapping entries.
///
/// `seq` is the registration sequence number the engine assigned at add time;
/// it breaks merge-order ties between layers of equal rank (later wins).
#[derive(Debug, Clone)]
pub struct Layer {
	source: SourceToken,
	rank: Rank,
	seq: u64,
	entries: Arc<[MappingEntry]>,
}

impl Layer {
	pub(crate) fn new(source: SourceToken, rank: Rank, seq: u64, entries: Vec<MappingEntry>) -> Self {
		Self {
			source,
			rank,
			seq,
			entries: entries.into(),
		}
	}

	/// The contributor this layer came from.
	pub fn source(&self) -> &SourceToken {
		&self.source
	}

	/// The layer's precedence rank.
	pub fn rank(&self) -> Rank {
		self.rank
	}

	/// The registration sequence number assigned by the engine.
	pub fn seq(&self) -> u64 {
		self.seq
	}

	/// The layer's mapping entries, in contribution order.
	pub fn entries(&self) -> &[MappingEntry] {
		&self.entries
	}

	/// Merge position: ascending rank, then ascending registration sequence.
	pub(crate) fn merge_key(&self) -> (Rank, u64) {
		(self.rank, self.seq)
	}
}

/// Handle returned by [`MappingEngine::add_layer`], used to remove exactly
/// that layer later.
///
/// Identity is the `(source, seq)` pair: a handle kept across a
/// remove-then-add of the same source does not remove the successor layer.
///
/// [`MappingEngine::add_layer`]: crate::engine::MappingEngine::add_layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerHandle {
	source: SourceToken,
	seq: u64,
}

impl LayerHandle {
	pub(crate) fn new(source: SourceToken, seq: u64) -> Self {
		Self { source, seq }
	}

	/// The contributor the referenced layer came from.
	pub fn source(&self) -> &SourceToken {
		&self.source
	}

	pub(crate) fn matches(&self, layer: &Layer) -> bool {
		self.seq == layer.seq && self.source == layer.source
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn base_rank_sorts_below_every_amendment() {
		assert!(Rank::Base < Rank::Amendment(i32::MIN));
		assert!(Rank::Amendment(i32::MIN) < Rank::Amendment(0));
		assert!(Rank::Amendment(0) < Rank::Amendment(100));
	}
}
