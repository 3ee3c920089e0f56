pub mod cache;
pub mod collector;
pub mod details;
pub mod discover;
pub mod resolver;
pub mod throttle;

mod error;

pub use cache::{MemoryCache, NoopCache, ResultCache};
pub use discover::{SearchRequest, SearchResponse, SearchUser};
pub use error::{Error, Result};
pub use throttle::Throttle;

use std::{future::Future, pin::Pin, sync::Arc, time::Duration};

use scout_config::{CatalogConfig, Config, LlmProviderConfig};
use scout_domain::{CatalogItem, Entity};
use scout_providers::{
	Result as ProviderResult,
	catalog::{self, AccessToken},
	llm,
};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait CatalogProvider
where
	Self: Send + Sync,
{
	fn token<'a>(&'a self, cfg: &'a CatalogConfig) -> BoxFuture<'a, ProviderResult<AccessToken>>;

	fn search_tracks<'a>(
		&'a self,
		cfg: &'a CatalogConfig,
		token: &'a AccessToken,
		genre: &'a str,
		limit: u32,
		offset: u32,
	) -> BoxFuture<'a, ProviderResult<Vec<CatalogItem>>>;

	fn recommendations<'a>(
		&'a self,
		cfg: &'a CatalogConfig,
		token: &'a AccessToken,
		seed_genres: &'a [String],
		limit: u32,
	) -> BoxFuture<'a, ProviderResult<Vec<CatalogItem>>>;

	fn artists<'a>(
		&'a self,
		cfg: &'a CatalogConfig,
		token: &'a AccessToken,
		ids: &'a [String],
	) -> BoxFuture<'a, ProviderResult<Vec<Entity>>>;

	fn search_artist<'a>(
		&'a self,
		cfg: &'a CatalogConfig,
		token: &'a AccessToken,
		name: &'a str,
	) -> BoxFuture<'a, ProviderResult<Option<Entity>>>;
}

pub trait LlmProvider
where
	Self: Send + Sync,
{
	fn complete<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		prompt: &'a str,
	) -> BoxFuture<'a, ProviderResult<String>>;
}

#[derive(Clone)]
pub struct Providers {
	pub catalog: Arc<dyn CatalogProvider>,
	pub llm: Arc<dyn LlmProvider>,
}
impl Providers {
	pub fn new(catalog: Arc<dyn CatalogProvider>, llm: Arc<dyn LlmProvider>) -> Self {
		Self { catalog, llm }
	}
}
impl Default for Providers {
	fn default() -> Self {
		let provider = Arc::new(DefaultProviders);

		Self { catalog: provider.clone(), llm: provider }
	}
}

pub struct ScoutService {
	pub cfg: Config,
	pub providers: Providers,
	pub throttle: Arc<dyn Throttle>,
	pub cache: Arc<dyn ResultCache>,
}
impl ScoutService {
	pub fn new(cfg: Config) -> Result<Self> {
		Self::with_providers(cfg, Providers::default())
	}

	/// Builds the throttle and cache from `cfg` around the given providers.
	pub fn with_providers(cfg: Config, providers: Providers) -> Result<Self> {
		let throttle: Arc<dyn Throttle> = Arc::from(throttle::from_config(&cfg.throttle)?);
		let cache: Arc<dyn ResultCache> = if cfg.cache.enabled {
			Arc::new(MemoryCache::new(Duration::from_secs(cfg.cache.ttl_seconds)))
		} else {
			Arc::new(NoopCache)
		};

		Ok(Self { cfg, providers, throttle, cache })
	}
}

struct DefaultProviders;
impl CatalogProvider for DefaultProviders {
	fn token<'a>(&'a self, cfg: &'a CatalogConfig) -> BoxFuture<'a, ProviderResult<AccessToken>> {
		Box::pin(catalog::request_token(cfg))
	}

	fn search_tracks<'a>(
		&'a self,
		cfg: &'a CatalogConfig,
		token: &'a AccessToken,
		genre: &'a str,
		limit: u32,
		offset: u32,
	) -> BoxFuture<'a, ProviderResult<Vec<CatalogItem>>> {
		Box::pin(catalog::search_tracks_by_genre(cfg, token, genre, limit, offset))
	}

	fn recommendations<'a>(
		&'a self,
		cfg: &'a CatalogConfig,
		token: &'a AccessToken,
		seed_genres: &'a [String],
		limit: u32,
	) -> BoxFuture<'a, ProviderResult<Vec<CatalogItem>>> {
		Box::pin(catalog::recommendations(cfg, token, seed_genres, limit))
	}

	fn artists<'a>(
		&'a self,
		cfg: &'a CatalogConfig,
		token: &'a AccessToken,
		ids: &'a [String],
	) -> BoxFuture<'a, ProviderResult<Vec<Entity>>> {
		Box::pin(catalog::artists_by_ids(cfg, token, ids))
	}

	fn search_artist<'a>(
		&'a self,
		cfg: &'a CatalogConfig,
		token: &'a AccessToken,
		name: &'a str,
	) -> BoxFuture<'a, ProviderResult<Option<Entity>>> {
		Box::pin(catalog::search_artist_by_name(cfg, token, name))
	}
}
impl LlmProvider for DefaultProviders {
	fn complete<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		prompt: &'a str,
	) -> BoxFuture<'a, ProviderResult<String>> {
		Box::pin(llm::complete(cfg, prompt))
	}
}
