use thiserror::Error;

use crate::layer::SourceToken;

/// Failure to parse one raw mapping entry.
///
/// Entry-level only: the engine's policy is to skip the bad entry and keep
/// the rest of the contributor's layer.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
	/// The entry has no `=` separator.
	#[error("missing '=' separator")]
	MissingSeparator,
	/// The principal name is empty after trimming.
	#[error("empty principal name")]
	EmptyPrincipal,
	/// A `:` separator is present but the sub-service token is empty.
	#[error("empty sub-service name")]
	EmptySubService,
	/// The service-user id is empty after trimming.
	#[error("empty service user id")]
	EmptyUserId,
}

/// Engine-level failures surfaced to callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
	/// The source token already has an active layer. Replacing a layer is
	/// remove-then-add; adding twice indicates a caller bug.
	#[error("source '{0}' already has an active mapping layer")]
	DuplicateSource(SourceToken),
}
