//! The mapping resolution engine.

use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::Mutex;

use crate::entry::{MappingEntry, MappingKey};
use crate::error::EngineError;
use crate::layer::{Layer, LayerHandle, Rank, SourceToken};
use crate::listener::{ActiveUserIds, MappingListener};
use crate::table::ResolutionTable;
use crate::validator::{ServiceUserValidator, ValidatorChain};


/// Source token of the base configuration layer.
const BASE_SOURCE: &str = "<base>";

/// Active layers: the base plus zero or more amendments.
struct LayerSet {
	base: Layer,
	amendments: Vec<Layer>,
	next_seq: u64,
}

impl LayerSet {
	fn iter(&self) -> impl Iterator<Item = &Layer> {
		std::iter::once(&self.base).chain(self.amendments.iter())
	}
}

/// Owns the active layer set and the merged [`ResolutionTable`] snapshot.
///
/// Lookups load the current snapshot atomically and never block on layer
/// mutation. Mutations serialize on an internal mutex, rebuild the table
/// whole, swap it in, and notify listeners only after the lock is released,
/// so a listener re-entering the engine cannot deadlock.
///
/// One engine instance per resolution domain; tearing it down is dropping
/// it, there are no held external resources.
pub struct MappingEngine {
	layers: Mutex<LayerSet>,
	table: ArcSwap<ResolutionTable>,
	validators: ValidatorChain,
	listeners: ArcSwap<Vec<Arc<dyn MappingListener>>>,
}

impl Default for MappingEngine {
	fn default() -> Self {
		Self::new()
	}
}

impl MappingEngine {
	/// Creates an engine with an empty base layer.
	pub fn new() -> Self {
		Self {
			layers: Mutex::new(LayerSet {
				base: Layer::new(SourceToken::new(BASE_SOURCE), Rank::Base, 0, Vec::new()),
				amendments: Vec::new(),
				next_seq: 1,
			}),
			table: ArcSwap::from_pointee(ResolutionTable::default()),
			validators: ValidatorChain::new(),
			listeners: ArcSwap::from_pointee(Vec::new()),
		}
	}

	/// Creates an engine with the given base configuration.
	pub fn with_base(entries: Vec<MappingEntry>) -> Self {
		let engine = Self::new();
		engine.configure_base(entries);
		engine
	}

	/// Replaces the base (sentinel-rank) configuration layer, then rebuilds
	/// and notifies.
	pub fn configure_base(&self, entries: Vec<MappingEntry>) {
		let active = {
			let mut layers = self.layers.lock();
			layers.base = Layer::new(SourceToken::new(BASE_SOURCE), Rank::Base, 0, entries);
			tracing::debug!(
				domain = "sumap",
				entries = layers.base.entries().len(),
				"base configuration replaced",
			);
			self.publish(&layers)
		};
		self.notify(&active);
	}

	/// Registers an amendment layer for `source` at `rank`, then rebuilds
	/// and notifies.
	///
	/// Fails if `source` already has an active layer; replacing a layer is
	/// remove-then-add (two notifications).
	pub fn add_layer(
		&self,
		source: SourceToken,
		rank: i32,
		entries: Vec<MappingEntry>,
	) -> Result<LayerHandle, EngineError> {
		let (handle, active) = {
			let mut layers = self.layers.lock();
			if layers.amendments.iter().any(|l| l.source() == &source) {
				return Err(EngineError::DuplicateSource(source));
			}
			let seq = layers.next_seq;
			layers.next_seq += 1;
			layers
				.amendments
				.push(Layer::new(source.clone(), Rank::Amendment(rank), seq, entries));
			tracing::debug!(domain = "sumap", %source, rank, seq, "mapping layer added");
			(LayerHandle::new(source, seq), self.publish(&layers))
		};
		self.notify(&active);
		Ok(handle)
	}

	/// Removes the layer identified by `handle`, then rebuilds and notifies.
	///
	/// Idempotent: removing an absent handle is a no-op (no rebuild, no
	/// notification), because unbind callbacks can race with teardown.
	pub fn remove_layer(&self, handle: &LayerHandle) {
		let active = {
			let mut layers = self.layers.lock();
			let before = layers.amendments.len();
			layers.amendments.retain(|l| !handle.matches(l));
			if layers.amendments.len() == before {
				return;
			}
			tracing::debug!(domain = "sumap", source = %handle.source(), "mapping layer removed");
			self.publish(&layers)
		};
		self.notify(&active);
	}

	/// Resolves the service-user id for a principal and optional sub-service.
	///
	/// A sub-service-specific mapping takes precedence over the
	/// principal-level one, but if the validator chain vetoes it the lookup
	/// returns `None` rather than falling back: a veto is hard policy, not a
	/// hint. `None` when no entry matches either key; any default-user
	/// policy belongs to the caller.
	pub fn resolve(&self, principal: &str, sub_service: Option<&str>) -> Option<Arc<str>> {
		let table = self.table.load();
		let sub = sub_service.map(str::trim).filter(|s| !s.is_empty());

		if let Some(sub) = sub {
			if let Some(user_id) = table.get(&MappingKey::new(principal, Some(sub))) {
				return self
					.validators
					.is_valid(user_id, principal, Some(sub))
					.then(|| user_id.clone());
			}
		}

		let user_id = table.get(&MappingKey::new(principal, None))?;
		self.validators
			.is_valid(user_id, principal, sub)
			.then(|| user_id.clone())
	}

	/// The validator chain consulted by [`resolve`](Self::resolve).
	pub fn validators(&self) -> &ValidatorChain {
		&self.validators
	}

	/// Registers a change listener. Registering the same `Arc` twice is a
	/// no-op.
	pub fn register_listener(&self, listener: Arc<dyn MappingListener>) {
		self.listeners.rcu(|current| {
			let mut next = (**current).clone();
			if !next.iter().any(|l| Arc::ptr_eq(l, &listener)) {
				next.push(listener.clone());
			}
			next
		});
	}

	/// Unregisters a change listener by `Arc` identity.
	pub fn unregister_listener(&self, listener: &Arc<dyn MappingListener>) {
		self.listeners.rcu(|current| {
			let mut next = (**current).clone();
			next.retain(|l| !Arc::ptr_eq(l, listener));
			next
		});
	}

	/// Registers a validator on the chain.
	pub fn register_validator(&self, validator: Arc<dyn ServiceUserValidator>) {
		self.validators.register(validator);
	}

	/// Unregisters a validator from the chain.
	pub fn unregister_validator(&self, validator: &Arc<dyn ServiceUserValidator>) {
		self.validators.unregister(validator);
	}

	/// The distinct service-user ids resolvable right now.
	pub fn active_user_ids(&self) -> ActiveUserIds {
		ActiveUserIds::new(self.table.load().user_ids())
	}

	/// The current resolution snapshot.
	pub fn snapshot(&self) -> Arc<ResolutionTable> {
		self.table.load_full()
	}

	/// Rebuilds the table from `layers` and swaps it in. Caller holds the
	/// layer lock; the swap is the sole publication point.
	fn publish(&self, layers: &LayerSet) -> ActiveUserIds {
		let table = ResolutionTable::build(layers.iter());
		let active = ActiveUserIds::new(table.user_ids());
		self.table.store(Arc::new(table));
		active
	}

	fn notify(&self, active: &ActiveUserIds) {
		for listener in self.listeners.load().iter() {
			listener.mappings_changed(active);
		}
	}
}
