use super::*;
use crate::engine::MappingEngine;
use crate::layer::SourceToken;
use crate::parse::parse_entries;

/// Counts markers like the real registry would hold registrations.
#[derive(Default)]
struct CountingRegistrar {
	registered: Mutex<Vec<String>>,
}

impl CountingRegistrar {
	fn registered(&self) -> Vec<String> {
		let mut ids = self.registered.lock().clone();
		ids.sort();
		ids
	}
}

impl MarkerRegistrar for CountingRegistrar {
	fn register(&self, user_id: &str) {
		self.registered.lock().push(user_id.to_string());
	}

	fn unregister(&self, user_id: &str) {
		self.registered.lock().retain(|id| id != user_id);
	}
}

#[test]
fn markers_track_the_resolvable_id_set() {
	let registrar = Arc::new(CountingRegistrar::default());
	let engine = MappingEngine::new();
	engine.register_listener(Arc::new(MarkerReconciler::new(registrar.clone())));

	engine.configure_base(parse_entries(["bundle1=sample", "bundle1:sub=sample_sub"]));
	assert_eq!(registrar.registered(), ["sample", "sample_sub"]);

	let first = engine
		.add_layer(SourceToken::new("amend1"), 100, parse_entries(["bundle2=another"]))
		.unwrap();
	assert_eq!(registrar.registered(), ["another", "sample", "sample_sub"]);

	let second = engine
		.add_layer(
			SourceToken::new("amend2"),
			200,
			parse_entries(["bundle2:sub=another_sub"]),
		)
		.unwrap();
	assert_eq!(
		registrar.registered(),
		["another", "another_sub", "sample", "sample_sub"]
	);

	engine.remove_layer(&first);
	assert_eq!(registrar.registered(), ["another_sub", "sample", "sample_sub"]);
	engine.remove_layer(&second);
	assert_eq!(registrar.registered(), ["sample", "sample_sub"]);
}

#[test]
fn unchanged_ids_are_not_republished() {
	let registrar = Arc::new(CountingRegistrar::default());
	let engine = MappingEngine::new();
	engine.register_listener(Arc::new(MarkerReconciler::new(registrar.clone())));

	engine.configure_base(parse_entries(["bundleA=userX"]));
	// Same id resolvable before and after: the marker must survive, not
	// cycle through unregister/register.
	engine.configure_base(parse_entries(["bundleA=userX", "bundleB=userX"]));

	assert_eq!(registrar.registered(), ["userX"]);
}

#[test]
fn overridden_id_swaps_its_marker() {
	let registrar = Arc::new(CountingRegistrar::default());
	let engine = MappingEngine::new();
	engine.register_listener(Arc::new(MarkerReconciler::new(registrar.clone())));

	engine.configure_base(parse_entries(["bundleB=userY"]));
	let handle = engine
		.add_layer(SourceToken::new("amend"), 100, parse_entries(["bundleB=userZ"]))
		.unwrap();
	assert_eq!(registrar.registered(), ["userZ"]);

	engine.remove_layer(&handle);
	assert_eq!(registrar.registered(), ["userY"]);
}
