use std::collections::HashSet;

use crate::catalog::CatalogItem;

/// Unique identifiers of every artist credited on `items`.
///
/// Set semantics with first-seen order kept, so repeated runs over the same input agree.
pub fn extract_entity_ids(items: &[CatalogItem]) -> Vec<String> {
	collect_unique(items.iter().flat_map(|item| item.artists.iter()).filter_map(|r| r.entity_id()))
}

/// Unique identifiers of the first credited artist of each item.
pub fn extract_primary_entity_ids(items: &[CatalogItem]) -> Vec<String> {
	collect_unique(items.iter().filter_map(|item| item.artists.first()).filter_map(|r| r.entity_id()))
}

fn collect_unique<'a, I>(ids: I) -> Vec<String>
where
	I: Iterator<Item = &'a str>,
{
	let mut seen = HashSet::new();

	ids.filter(|id| seen.insert(*id)).map(str::to_string).collect()
}
