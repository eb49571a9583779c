//! Change notification boundary.

use std::sync::Arc;

/// Sorted distinct service-user ids resolvable after a layer-set mutation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActiveUserIds(Vec<Arc<str>>);

impl ActiveUserIds {
	/// `ids` must already be sorted and deduplicated
	/// (see [`ResolutionTable::user_ids`](crate::table::ResolutionTable::user_ids)).
	pub(crate) fn new(ids: Vec<Arc<str>>) -> Self {
		Self(ids)
	}

	/// The ids, sorted.
	pub fn ids(&self) -> &[Arc<str>] {
		&self.0
	}

	/// Returns true if `user_id` is currently resolvable.
	pub fn contains(&self, user_id: &str) -> bool {
		self.0
			.binary_search_by(|id| id.as_ref().cmp(user_id))
			.is_ok()
	}

	/// Iterates the ids in sorted order.
	pub fn iter(&self) -> impl Iterator<Item = &Arc<str>> {
		self.0.iter()
	}

	/// Number of distinct resolvable ids.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns true if nothing is resolvable.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

/// Callback for layer-set changes.
///
/// Invoked synchronously after every effective mutation, in mutation order
/// for sequential mutations, with no engine lock held; implementations may
/// re-enter the engine.
pub trait MappingListener: Send + Sync {
	/// Called with the full set of distinct resolvable service-user ids.
	fn mappings_changed(&self, active: &ActiveUserIds);
}
