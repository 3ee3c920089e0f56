mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Cache, CatalogConfig, Config, Links, LlmProviderConfig, Pipeline, Security, Service, Throttle,
};

use std::{env, fs, path::Path};

pub const CATALOG_CLIENT_ID_ENV: &str = "SPOTIPY_CLIENT_ID";
pub const CATALOG_CLIENT_SECRET_ENV: &str = "SPOTIPY_CLIENT_SECRET";
pub const LLM_API_KEY_ENV: &str = "OPENROUTER_KEY";

/// Upper bound the catalog enforces on search page sizes and bulk lookups.
pub const CATALOG_MAX_PAGE: u32 = 50;
/// Upper bound the catalog enforces on seed genres per recommendations request.
pub const CATALOG_MAX_SEED_GENRES: u32 = 5;
pub const CATALOG_MAX_RECOMMENDATIONS: u32 = 100;

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);
	apply_env(&mut cfg, |key| env::var(key).ok());
	validate(&cfg)?;

	Ok(cfg)
}

/// Fills absent credentials from the environment.
///
/// Credentials that remain absent are not an error here. The provider that needs them reports a
/// configuration error when it is called.
pub fn apply_env<F>(cfg: &mut Config, lookup: F)
where
	F: Fn(&str) -> Option<String>,
{
	let resolve = |current: &mut Option<String>, key: &str| {
		if current.is_none() {
			*current = lookup(key).filter(|value| !value.trim().is_empty());
		}
	};
	resolve(&mut cfg.catalog.client_id, CATALOG_CLIENT_ID_ENV);
	resolve(&mut cfg.catalog.client_secret, CATALOG_CLIENT_SECRET_ENV);
	resolve(&mut cfg.llm.api_key, LLM_API_KEY_ENV);
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.service.admin_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.admin_bind must be non-empty.".to_string(),
		});
	}

	for (label, value) in [
		("catalog.accounts_base", &cfg.catalog.accounts_base),
		("catalog.api_base", &cfg.catalog.api_base),
		("llm.api_base", &cfg.llm.api_base),
		("llm.model", &cfg.llm.model),
		("links.storefront_base", &cfg.links.storefront_base),
		("links.entity_page_base", &cfg.links.entity_page_base),
		("links.placeholder_base", &cfg.links.placeholder_base),
		("pipeline.default_genre", &cfg.pipeline.default_genre),
	] {
		if value.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}
	if cfg.catalog.batch_size == 0 || cfg.catalog.batch_size > CATALOG_MAX_PAGE {
		return Err(Error::Validation {
			message: format!("catalog.batch_size must be in the range 1-{CATALOG_MAX_PAGE}."),
		});
	}
	if cfg.pipeline.page_size == 0 || cfg.pipeline.page_size > CATALOG_MAX_PAGE {
		return Err(Error::Validation {
			message: format!("pipeline.page_size must be in the range 1-{CATALOG_MAX_PAGE}."),
		});
	}
	if cfg.pipeline.max_genres == 0 || cfg.pipeline.max_genres > CATALOG_MAX_SEED_GENRES {
		return Err(Error::Validation {
			message: format!(
				"pipeline.max_genres must be in the range 1-{CATALOG_MAX_SEED_GENRES}."
			),
		});
	}
	if cfg.pipeline.pages_per_genre == 0 {
		return Err(Error::Validation {
			message: "pipeline.pages_per_genre must be greater than zero.".to_string(),
		});
	}
	if cfg.pipeline.max_llm_names == 0 {
		return Err(Error::Validation {
			message: "pipeline.max_llm_names must be greater than zero.".to_string(),
		});
	}
	if !matches!(cfg.pipeline.genre_source.as_str(), "search" | "recommendations") {
		return Err(Error::Validation {
			message: "pipeline.genre_source must be one of search or recommendations.".to_string(),
		});
	}
	if cfg.pipeline.genre_source == "recommendations" {
		if cfg.pipeline.recommendation_limit == 0
			|| cfg.pipeline.recommendation_limit > CATALOG_MAX_RECOMMENDATIONS
		{
			return Err(Error::Validation {
				message: format!(
					"pipeline.recommendation_limit must be in the range 1-{CATALOG_MAX_RECOMMENDATIONS}."
				),
			});
		}
		if cfg.pipeline.recommendation_rounds == 0 {
			return Err(Error::Validation {
				message: "pipeline.recommendation_rounds must be greater than zero.".to_string(),
			});
		}
	}
	if !matches!(cfg.pipeline.credited_artists.as_str(), "all" | "primary") {
		return Err(Error::Validation {
			message: "pipeline.credited_artists must be one of all or primary.".to_string(),
		});
	}

	match cfg.throttle.policy.as_str() {
		"fixed" | "none" => {},
		"token_bucket" => {
			if cfg.throttle.per_second == 0 {
				return Err(Error::Validation {
					message: "throttle.per_second must be greater than zero.".to_string(),
				});
			}
			if cfg.throttle.burst == 0 {
				return Err(Error::Validation {
					message: "throttle.burst must be greater than zero.".to_string(),
				});
			}
		},
		_ => {
			return Err(Error::Validation {
				message: "throttle.policy must be one of fixed, token_bucket, or none.".to_string(),
			});
		},
	}
	if cfg.cache.enabled && cfg.cache.ttl_seconds == 0 {
		return Err(Error::Validation {
			message: "cache.ttl_seconds must be greater than zero.".to_string(),
		});
	}
	if let Some(temperature) = cfg.llm.temperature
		&& (!temperature.is_finite() || temperature < 0.0)
	{
		return Err(Error::Validation {
			message: "llm.temperature must be a finite number, zero or greater.".to_string(),
		});
	}

	for (key, value) in &cfg.llm.default_headers {
		if !value.is_string() {
			return Err(Error::Validation {
				message: format!("llm.default_headers.{key} must be a string."),
			});
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	for value in [
		&mut cfg.catalog.client_id,
		&mut cfg.catalog.client_secret,
		&mut cfg.catalog.market,
		&mut cfg.llm.api_key,
		&mut cfg.llm.provider_sort,
		&mut cfg.security.api_auth_token,
	] {
		if value.as_deref().map(|raw| raw.trim().is_empty()).unwrap_or(false) {
			*value = None;
		}
	}

	cfg.pipeline.default_genre = cfg.pipeline.default_genre.trim().to_lowercase();
	for base in [
		&mut cfg.catalog.accounts_base,
		&mut cfg.catalog.api_base,
		&mut cfg.llm.api_base,
		&mut cfg.links.storefront_base,
		&mut cfg.links.entity_page_base,
	] {
		while base.ends_with('/') {
			base.pop();
		}
	}
}
