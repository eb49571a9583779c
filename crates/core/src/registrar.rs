//! Downstream marker reconciliation.
//!
//! The external registrar exposes one "is mapped" marker per resolvable
//! service-user id so dependents can discover which identities the engine
//! currently resolves. [`MarkerReconciler`] keeps that marker set consistent
//! by diffing every change notification against the previously published set.

use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashSet;

use crate::listener::{ActiveUserIds, MappingListener};

#[cfg(test)]
mod tests;

/// Registry boundary where per-user-id markers are published.
///
/// The underlying publish mechanism is a collaborator concern; the engine
/// only guarantees that `register`/`unregister` calls arrive in notification
/// order and never while an engine lock is held.
pub trait MarkerRegistrar: Send + Sync {
	/// Publishes a marker for `user_id`.
	fn register(&self, user_id: &str);

	/// Withdraws the marker for `user_id`.
	fn unregister(&self, user_id: &str);
}

impl<R: MarkerRegistrar + ?Sized> MarkerRegistrar for Arc<R> {
	fn register(&self, user_id: &str) {
		(**self).register(user_id);
	}

	fn unregister(&self, user_id: &str) {
		(**self).unregister(user_id);
	}
}

/// [`MappingListener`] that reconciles published markers with each notified
/// id set.
pub struct MarkerReconciler<R: MarkerRegistrar> {
	registrar: R,
	published: Mutex<FxHashSet<Arc<str>>>,
}

impl<R: MarkerRegistrar> MarkerReconciler<R> {
	/// Creates a reconciler with no markers published yet.
	pub fn new(registrar: R) -> Self {
		Self {
			registrar,
			published: Mutex::new(FxHashSet::default()),
		}
	}

	/// The wrapped registrar.
	pub fn registrar(&self) -> &R {
		&self.registrar
	}
}

impl<R: MarkerRegistrar> MappingListener for MarkerReconciler<R> {
	fn mappings_changed(&self, active: &ActiveUserIds) {
		let mut published = self.published.lock();
		published.retain(|id| {
			if active.contains(id) {
				true
			} else {
				self.registrar.unregister(id);
				false
			}
		});
		for id in active.iter() {
			if published.insert(id.clone()) {
				self.registrar.register(id);
			}
		}
	}
}
