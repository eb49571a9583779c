use super::*;
use crate::layer::{Rank, SourceToken};
use crate::parse::parse_entry;

fn layer(source: &str, rank: Rank, seq: u64, lines: &[&str]) -> Layer {
	let entries = lines.iter().map(|l| parse_entry(l).unwrap()).collect();
	Layer::new(SourceToken::new(source), rank, seq, entries)
}

fn get<'a>(table: &'a ResolutionTable, principal: &str, sub: Option<&str>) -> Option<&'a str> {
	table
		.get(&MappingKey::new(principal, sub))
		.map(|id| id.as_ref())
}

#[test]
fn higher_rank_wins_regardless_of_input_order() {
	let low = layer("low", Rank::Amendment(1), 1, &["bundleB=userY"]);
	let high = layer("high", Rank::Amendment(100), 2, &["bundleB=userZ"]);

	let forward = ResolutionTable::build([&low, &high]);
	let reverse = ResolutionTable::build([&high, &low]);

	assert_eq!(get(&forward, "bundleB", None), Some("userZ"));
	assert_eq!(get(&reverse, "bundleB", None), Some("userZ"));
}

#[test]
fn equal_rank_later_registration_wins() {
	let first = layer("first", Rank::Amendment(100), 1, &["bundleB=userY"]);
	let second = layer("second", Rank::Amendment(100), 2, &["bundleB=userZ"]);

	let table = ResolutionTable::build([&second, &first]);
	assert_eq!(get(&table, "bundleB", None), Some("userZ"));
}

#[test]
fn base_is_overridden_by_any_amendment_rank() {
	let base = layer("base", Rank::Base, 0, &["bundleA=userX"]);
	let amendment = layer("amend", Rank::Amendment(i32::MIN), 1, &["bundleA=userW"]);

	let table = ResolutionTable::build([&base, &amendment]);
	assert_eq!(get(&table, "bundleA", None), Some("userW"));
}

#[test]
fn non_overlapping_keys_all_survive_the_fold() {
	let base = layer("base", Rank::Base, 0, &["bundleA=userX", "bundleA:sub=userSub"]);
	let amendment = layer("amend", Rank::Amendment(100), 1, &["bundleB=userY"]);

	let table = ResolutionTable::build([&base, &amendment]);
	assert_eq!(table.len(), 3);
	assert_eq!(get(&table, "bundleA", None), Some("userX"));
	assert_eq!(get(&table, "bundleA", Some("sub")), Some("userSub"));
	assert_eq!(get(&table, "bundleB", None), Some("userY"));
}

#[test]
fn user_ids_are_sorted_and_distinct() {
	let base = layer(
		"base",
		Rank::Base,
		0,
		&["b=userY", "a=userX", "c=userX"],
	);

	let table = ResolutionTable::build([&base]);
	let user_ids = table.user_ids();
	let ids: Vec<&str> = user_ids.iter().map(|id| id.as_ref()).collect();
	assert_eq!(ids, ["userX", "userY"]);
}

#[test]
fn empty_layer_set_builds_empty_table() {
	let table = ResolutionTable::build(std::iter::empty::<&Layer>());
	assert!(table.is_empty());
	assert!(table.user_ids().is_empty());
}
