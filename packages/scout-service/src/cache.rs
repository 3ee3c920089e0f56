//! Time-bounded store of finished search results keyed by search type and query.

use std::{
	collections::HashMap,
	sync::{Mutex, MutexGuard},
	time::{Duration, Instant},
};

use scout_domain::DisplayCard;

pub trait ResultCache
where
	Self: Send + Sync,
{
	fn get(&self, key: &str) -> Option<Vec<DisplayCard>>;

	fn set(&self, key: &str, cards: Vec<DisplayCard>);

	fn clear(&self);
}

/// `"<search_type>:<trimmed lower-cased query>"`.
pub fn cache_key(search_type: &str, query: &str) -> String {
	format!("{search_type}:{}", query.trim().to_lowercase())
}

struct CacheEntry {
	cards: Vec<DisplayCard>,
	stored_at: Instant,
}

/// Unbounded in-process cache. Expired entries are evicted lazily on read.
pub struct MemoryCache {
	ttl: Duration,
	entries: Mutex<HashMap<String, CacheEntry>>,
}
impl MemoryCache {
	pub fn new(ttl: Duration) -> Self {
		Self { ttl, entries: Mutex::new(HashMap::new()) }
	}

	pub fn len(&self) -> usize {
		self.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn get_at(&self, key: &str, now: Instant) -> Option<Vec<DisplayCard>> {
		let mut entries = self.lock();
		let expired = match entries.get(key) {
			Some(entry) => now.saturating_duration_since(entry.stored_at) > self.ttl,
			None => return None,
		};
		if expired {
			entries.remove(key);

			return None;
		}

		entries.get(key).map(|entry| entry.cards.clone())
	}

	pub fn set_at(&self, key: &str, cards: Vec<DisplayCard>, now: Instant) {
		self.lock().insert(key.to_string(), CacheEntry { cards, stored_at: now });
	}

	fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
		self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
	}
}
impl ResultCache for MemoryCache {
	fn get(&self, key: &str) -> Option<Vec<DisplayCard>> {
		self.get_at(key, Instant::now())
	}

	fn set(&self, key: &str, cards: Vec<DisplayCard>) {
		self.set_at(key, cards, Instant::now());
	}

	fn clear(&self) {
		self.lock().clear();
	}
}

/// Installed when `cache.enabled = false`.
pub struct NoopCache;
impl ResultCache for NoopCache {
	fn get(&self, _key: &str) -> Option<Vec<DisplayCard>> {
		None
	}

	fn set(&self, _key: &str, _cards: Vec<DisplayCard>) {}

	fn clear(&self) {}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn card(id: &str) -> DisplayCard {
		DisplayCard {
			id: id.to_string(),
			name: format!("Artist {id}"),
			image: String::new(),
			shop_url: String::new(),
			spotify_url: String::new(),
		}
	}

	#[test]
	fn key_separates_search_types_and_normalizes_query() {
		assert_eq!(cache_key("genre", "  Jazz,Blues "), "genre:jazz,blues");
		assert_ne!(cache_key("genre", "jazz"), cache_key("llm", "jazz"));
	}

	#[test]
	fn entry_lives_through_ttl_and_is_evicted_after() {
		let ttl = Duration::from_secs(3_600);
		let cache = MemoryCache::new(ttl);
		let start = Instant::now();

		cache.set_at("genre:jazz", vec![card("a1")], start);

		assert_eq!(cache.get_at("genre:jazz", start + ttl).map(|cards| cards.len()), Some(1));
		assert!(cache.get_at("genre:jazz", start + ttl + Duration::from_nanos(1)).is_none());
		assert!(cache.is_empty());
	}

	#[test]
	fn last_write_wins() {
		let cache = MemoryCache::new(Duration::from_secs(60));

		cache.set("llm:queen", vec![card("a1")]);
		cache.set("llm:queen", vec![card("a2"), card("a3")]);

		let cards = cache.get("llm:queen").expect("Expected cached cards.");

		assert_eq!(cards.iter().map(|card| card.id.as_str()).collect::<Vec<_>>(), ["a2", "a3"]);
	}

	#[test]
	fn clear_drops_everything() {
		let cache = MemoryCache::new(Duration::from_secs(60));

		cache.set("genre:jazz", vec![card("a1")]);
		cache.set("llm:queen", vec![card("a2")]);
		cache.clear();

		assert!(cache.is_empty());
	}

	#[test]
	fn noop_cache_never_hits() {
		let cache = NoopCache;

		cache.set("genre:jazz", vec![card("a1")]);

		assert!(cache.get("genre:jazz").is_none());
	}
}
