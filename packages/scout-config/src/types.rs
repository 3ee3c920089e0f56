use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub catalog: CatalogConfig,
	pub llm: LlmProviderConfig,
	#[serde(default)]
	pub links: Links,
	#[serde(default)]
	pub pipeline: Pipeline,
	#[serde(default)]
	pub throttle: Throttle,
	#[serde(default)]
	pub cache: Cache,
	#[serde(default)]
	pub security: Security,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub admin_bind: String,
	pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
	pub accounts_base: String,
	#[serde(default = "default_token_path")]
	pub token_path: String,
	pub api_base: String,
	/// Optional. Falls back to `SPOTIPY_CLIENT_ID` when absent.
	#[serde(default)]
	pub client_id: Option<String>,
	/// Optional. Falls back to `SPOTIPY_CLIENT_SECRET` when absent.
	#[serde(default)]
	pub client_secret: Option<String>,
	/// Market passed to the recommendations endpoint, e.g. "US".
	#[serde(default)]
	pub market: Option<String>,
	#[serde(default = "default_batch_size")]
	pub batch_size: u32,
	pub timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	/// Optional. Falls back to `OPENROUTER_KEY` when absent.
	#[serde(default)]
	pub api_key: Option<String>,
	pub path: String,
	pub model: String,
	#[serde(default)]
	pub temperature: Option<f32>,
	/// Routing hint forwarded as `provider.sort`, e.g. "throughput".
	#[serde(default)]
	pub provider_sort: Option<String>,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Links {
	pub storefront_base: String,
	pub entity_page_base: String,
	pub placeholder_base: String,
}
impl Default for Links {
	fn default() -> Self {
		Self {
			storefront_base: "https://shop.spotify.com/en/artist".to_string(),
			entity_page_base: "https://open.spotify.com/artist".to_string(),
			placeholder_base: "https://ui-avatars.com/api/".to_string(),
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Pipeline {
	pub max_genres: u32,
	pub pages_per_genre: u32,
	pub page_size: u32,
	pub default_genre: String,
	/// Stop paging a genre on the first page shorter than `page_size` instead of waiting for an
	/// empty page.
	pub stop_on_short_page: bool,
	/// One of "search" or "recommendations".
	pub genre_source: String,
	pub recommendation_limit: u32,
	pub recommendation_rounds: u32,
	/// One of "all" or "primary".
	pub credited_artists: String,
	pub max_llm_names: u32,
}
impl Default for Pipeline {
	fn default() -> Self {
		Self {
			max_genres: 5,
			pages_per_genre: 5,
			page_size: 50,
			default_genre: "jazz".to_string(),
			stop_on_short_page: false,
			genre_source: "search".to_string(),
			recommendation_limit: 100,
			recommendation_rounds: 1,
			credited_artists: "all".to_string(),
			max_llm_names: 8,
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Throttle {
	/// One of "fixed", "token_bucket", or "none".
	pub policy: String,
	pub delay_ms: u64,
	pub per_second: u32,
	pub burst: u32,
}
impl Default for Throttle {
	fn default() -> Self {
		Self { policy: "fixed".to_string(), delay_ms: 100, per_second: 10, burst: 1 }
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Cache {
	pub enabled: bool,
	pub ttl_seconds: u64,
}
impl Default for Cache {
	fn default() -> Self {
		Self { enabled: true, ttl_seconds: 3_600 }
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Security {
	pub bind_localhost_only: bool,
	pub api_auth_token: Option<String>,
}

fn default_token_path() -> String {
	"/api/token".to_string()
}

fn default_batch_size() -> u32 {
	50
}
