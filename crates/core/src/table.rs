//! Merged resolution snapshots.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::entry::MappingKey;
use crate::layer::Layer;

#[cfg(test)]
mod tests;

/// The merged, authoritative key → service-user-id mapping.
///
/// Built by folding all active layers in ascending `(rank, seq)` order so
/// the highest-precedence layer defining a key wins. The table is always
/// rebuilt whole on any layer-set change: removing a high-rank layer must
/// unmask the next-lower layer's entry for the same key, which an
/// incremental patch of the previous table cannot do. Published snapshots
/// are never mutated.
#[derive(Debug, Default)]
pub struct ResolutionTable {
	map: FxHashMap<MappingKey, Arc<str>>,
}

impl ResolutionTable {
	/// Folds `layers` into a fresh table.
	///
	/// The iteration order of the input is irrelevant; merge order is
	/// determined solely by rank and registration sequence, so the result is
	/// deterministic for a given active set.
	pub fn build<'a, I>(layers: I) -> Self
	where
		I: IntoIterator<Item = &'a Layer>,
	{
		let mut sorted: Vec<&Layer> = layers.into_iter().collect();
		sorted.sort_by_key(|layer| layer.merge_key());

		let mut map = FxHashMap::default();
		for layer in sorted {
			for entry in layer.entries() {
				map.insert(entry.key().clone(), entry.shared_user_id());
			}
		}
		Self { map }
	}

	/// Looks up the service-user id mapped to `key`.
	pub fn get(&self, key: &MappingKey) -> Option<&Arc<str>> {
		self.map.get(key)
	}

	/// Number of distinct keys in the table.
	pub fn len(&self) -> usize {
		self.map.len()
	}

	/// Returns true if no mapping is active.
	pub fn is_empty(&self) -> bool {
		self.map.is_empty()
	}

	/// Sorted distinct service-user ids currently resolvable.
	pub fn user_ids(&self) -> Vec<Arc<str>> {
		let mut ids: Vec<Arc<str>> = self.map.values().cloned().collect();
		ids.sort();
		ids.dedup();
		ids
	}
}
