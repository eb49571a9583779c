//! Raw mapping entry parsing.
//!
//! Grammar: `principal[":" subService] "=" serviceUserId`. All tokens are
//! trimmed; principal and user id must be non-empty, and the sub-service
//! token must be non-empty when the `:` separator is present.

use crate::entry::{MappingEntry, MappingKey};
use crate::error::ParseError;


/// Parses one raw mapping entry.
pub fn parse_entry(raw: &str) -> Result<MappingEntry, ParseError> {
	let (lhs, rhs) = raw.split_once('=').ok_or(ParseError::MissingSeparator)?;

	let user_id = rhs.trim();
	if user_id.is_empty() {
		return Err(ParseError::EmptyUserId);
	}

	let (principal, sub_service) = match lhs.split_once(':') {
		Some((principal, sub)) => {
			let sub = sub.trim();
			if sub.is_empty() {
				return Err(ParseError::EmptySubService);
			}
			(principal.trim(), Some(sub))
		}
		None => (lhs.trim(), None),
	};
	if principal.is_empty() {
		return Err(ParseError::EmptyPrincipal);
	}

	Ok(MappingEntry::new(
		MappingKey::new(principal, sub_service),
		user_id,
	))
}

/// Parses a contributor's raw entries, skipping malformed ones.
///
/// One bad entry must not block the rest of the same layer, so failures are
/// logged and dropped (accumulate-and-continue).
pub fn parse_entries<'a, I>(raw: I) -> Vec<MappingEntry>
where
	I: IntoIterator<Item = &'a str>,
{
	let mut entries = Vec::new();
	for line in raw {
		match parse_entry(line) {
			Ok(entry) => entries.push(entry),
			Err(err) => {
				tracing::warn!(
					domain = "sumap",
					entry = line,
					%err,
					"skipping malformed mapping entry",
				);
			}
		}
	}
	entries
}
