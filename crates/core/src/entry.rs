//! Mapping keys and entries.

use std::fmt;
use std::sync::Arc;

/// Lookup key for a mapping: a principal name plus an optional sub-service
/// qualifier.
///
/// An absent sub-service and an empty (after trim) sub-service string are
/// equivalent; both normalize to `None`, so `("p", None)` and `("p", Some(""))`
/// are the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MappingKey {
	principal: Arc<str>,
	sub_service: Option<Arc<str>>,
}

impl MappingKey {
	/// Creates a normalized key.
	pub fn new(principal: &str, sub_service: Option<&str>) -> Self {
		Self {
			principal: Arc::from(principal),
			sub_service: sub_service
				.map(str::trim)
				.filter(|s| !s.is_empty())
				.map(Arc::from),
		}
	}

	/// The principal (calling component) name.
	pub fn principal(&self) -> &str {
		&self.principal
	}

	/// The sub-service qualifier, if any.
	pub fn sub_service(&self) -> Option<&str> {
		self.sub_service.as_deref()
	}
}

impl fmt::Display for MappingKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.sub_service {
			Some(sub) => write!(f, "{}:{}", self.principal, sub),
			None => write!(f, "{}", self.principal),
		}
	}
}

/// One immutable mapping from a [`MappingKey`] to a service-user id.
///
/// Invariants (enforced by [`parse_entry`](crate::parse::parse_entry)): the
/// principal and the user id are non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingEntry {
	key: MappingKey,
	user_id: Arc<str>,
}

impl MappingEntry {
	/// Creates an entry for an already-validated key/id pair.
	pub fn new(key: MappingKey, user_id: &str) -> Self {
		Self {
			key,
			user_id: Arc::from(user_id),
		}
	}

	/// The lookup key.
	pub fn key(&self) -> &MappingKey {
		&self.key
	}

	/// The mapped service-user id.
	pub fn user_id(&self) -> &str {
		&self.user_id
	}

	pub(crate) fn shared_user_id(&self) -> Arc<str> {
		self.user_id.clone()
	}
}

impl fmt::Display for MappingEntry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}={}", self.key, self.user_id)
	}
}
