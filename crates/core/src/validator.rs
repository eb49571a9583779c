//! Pluggable veto over resolved service-user ids.

use std::sync::Arc;

use arc_swap::ArcSwap;


/// Policy predicate that can veto a resolved service-user id for a given
/// principal / sub-service pair.
///
/// Validators express hard policy vetoes, not soft hints: a vetoed
/// sub-service-specific resolution does not fall back to the principal-level
/// mapping.
pub trait ServiceUserValidator: Send + Sync {
	/// Returns false to veto the candidate id.
	fn is_valid(&self, user_id: &str, principal: &str, sub_service: Option<&str>) -> bool;
}

impl<F> ServiceUserValidator for F
where
	F: Fn(&str, &str, Option<&str>) -> bool + Send + Sync,
{
	fn is_valid(&self, user_id: &str, principal: &str, sub_service: Option<&str>) -> bool {
		self(user_id, principal, sub_service)
	}
}

/// Ordered set of registered validators, ANDed together.
///
/// Registration identity is `Arc` pointer equality; validators are
/// referenced, never owned. The set is swapped atomically so checks never
/// block on concurrent registration, and every check reads the set fresh.
#[derive(Default)]
pub struct ValidatorChain {
	validators: ArcSwap<Vec<Arc<dyn ServiceUserValidator>>>,
}

impl ValidatorChain {
	/// Creates an empty chain.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a validator. Registering the same `Arc` twice is a no-op.
	pub fn register(&self, validator: Arc<dyn ServiceUserValidator>) {
		self.validators.rcu(|current| {
			let mut next = (**current).clone();
			if !next.iter().any(|v| Arc::ptr_eq(v, &validator)) {
				next.push(validator.clone());
			}
			next
		});
	}

	/// Unregisters a validator by `Arc` identity. Unknown references are
	/// ignored.
	pub fn unregister(&self, validator: &Arc<dyn ServiceUserValidator>) {
		self.validators.rcu(|current| {
			let mut next = (**current).clone();
			next.retain(|v| !Arc::ptr_eq(v, validator));
			next
		});
	}

	/// AND over all currently registered validators; vacuously true when the
	/// chain is empty.
	pub fn is_valid(&self, user_id: &str, principal: &str, sub_service: Option<&str>) -> bool {
		self.validators
			.load()
			.iter()
			.all(|v| v.is_valid(user_id, principal, sub_service))
	}

	/// Number of registered validators.
	pub fn len(&self) -> usize {
		self.validators.load().len()
	}

	/// Returns true if no validator is registered.
	pub fn is_empty(&self) -> bool {
		self.validators.load().is_empty()
	}
}
