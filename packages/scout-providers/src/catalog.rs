//! Client-credentials access to the remote music catalog.

use std::fmt;

use reqwest::StatusCode;
use serde_json::Value;

use scout_config::{
	CATALOG_MAX_PAGE, CATALOG_MAX_RECOMMENDATIONS, CATALOG_MAX_SEED_GENRES, CatalogConfig,
};
use scout_domain::{CatalogItem, Entity, genre::genre_query};

use crate::{Error, Result};

/// Bearer token from the client-credentials grant. Never persisted and never logged.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);
impl AccessToken {
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	pub fn secret(&self) -> &str {
		&self.0
	}
}
impl fmt::Debug for AccessToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("AccessToken(<redacted>)")
	}
}

pub async fn request_token(cfg: &CatalogConfig) -> Result<AccessToken> {
	let (Some(client_id), Some(client_secret)) =
		(cfg.client_id.as_deref(), cfg.client_secret.as_deref())
	else {
		return Err(Error::Configuration {
			message: format!(
				"catalog client credentials are not set; configure catalog.client_id and catalog.client_secret or {} and {}.",
				scout_config::CATALOG_CLIENT_ID_ENV,
				scout_config::CATALOG_CLIENT_SECRET_ENV,
			),
		});
	};
	let client = crate::http_client(cfg.timeout_ms)?;
	let url = format!("{}{}", cfg.accounts_base, cfg.token_path);
	let res = client
		.post(url)
		.form(&[
			("grant_type", "client_credentials"),
			("client_id", client_id),
			("client_secret", client_secret),
		])
		.send()
		.await?;

	if !res.status().is_success() {
		let (status, body) = crate::failure_parts(res).await;

		return Err(Error::UpstreamAuth { status: status.as_u16(), body });
	}

	parse_token_response(crate::read_json(res, "Token response").await?)
}

/// One page of tracks tagged with `genre`.
pub async fn search_tracks_by_genre(
	cfg: &CatalogConfig,
	token: &AccessToken,
	genre: &str,
	limit: u32,
	offset: u32,
) -> Result<Vec<CatalogItem>> {
	let limit = limit.clamp(1, CATALOG_MAX_PAGE);
	let client = crate::http_client(cfg.timeout_ms)?;
	let res = client
		.get(format!("{}/v1/search", cfg.api_base))
		.bearer_auth(token.secret())
		.query(&[
			("q", genre_query(genre)),
			("type", "track".to_string()),
			("limit", limit.to_string()),
			("offset", offset.to_string()),
		])
		.send()
		.await?;

	if !res.status().is_success() {
		let (status, body) = crate::failure_parts(res).await;

		return Err(catalog_failure(status, body));
	}

	parse_track_page(crate::read_json(res, "Search response").await?)
}

/// One batch of tracks recommended for up to five seed genres.
pub async fn recommendations(
	cfg: &CatalogConfig,
	token: &AccessToken,
	seed_genres: &[String],
	limit: u32,
) -> Result<Vec<CatalogItem>> {
	let seeds = seed_genres
		.iter()
		.take(CATALOG_MAX_SEED_GENRES as usize)
		.map(String::as_str)
		.collect::<Vec<_>>()
		.join(",");
	let mut query = vec![
		("seed_genres", seeds),
		("limit", limit.clamp(1, CATALOG_MAX_RECOMMENDATIONS).to_string()),
	];
	if let Some(market) = cfg.market.as_deref() {
		query.push(("market", market.to_string()));
	}

	let client = crate::http_client(cfg.timeout_ms)?;
	let res = client
		.get(format!("{}/v1/recommendations", cfg.api_base))
		.bearer_auth(token.secret())
		.query(&query)
		.send()
		.await?;

	if !res.status().is_success() {
		let (status, body) = crate::failure_parts(res).await;

		return Err(catalog_failure(status, body));
	}

	parse_recommendations(crate::read_json(res, "Recommendations response").await?)
}

/// Full records for at most [`CATALOG_MAX_PAGE`] identifiers. Unknown identifiers are dropped.
pub async fn artists_by_ids(
	cfg: &CatalogConfig,
	token: &AccessToken,
	ids: &[String],
) -> Result<Vec<Entity>> {
	if ids.is_empty() {
		return Ok(Vec::new());
	}
	if ids.len() > CATALOG_MAX_PAGE as usize {
		return Err(Error::Configuration {
			message: format!("At most {CATALOG_MAX_PAGE} artist ids may be requested at once."),
		});
	}

	let client = crate::http_client(cfg.timeout_ms)?;
	let res = client
		.get(format!("{}/v1/artists", cfg.api_base))
		.bearer_auth(token.secret())
		.query(&[("ids", ids.join(","))])
		.send()
		.await?;

	if !res.status().is_success() {
		let (status, body) = crate::failure_parts(res).await;

		return Err(catalog_failure(status, body));
	}

	parse_artists(crate::read_json(res, "Artists response").await?)
}

/// Best single match for an artist name.
pub async fn search_artist_by_name(
	cfg: &CatalogConfig,
	token: &AccessToken,
	name: &str,
) -> Result<Option<Entity>> {
	let client = crate::http_client(cfg.timeout_ms)?;
	let res = client
		.get(format!("{}/v1/search", cfg.api_base))
		.bearer_auth(token.secret())
		.query(&[("q", name), ("type", "artist"), ("limit", "1")])
		.send()
		.await?;

	if !res.status().is_success() {
		let (status, body) = crate::failure_parts(res).await;

		return Err(catalog_failure(status, body));
	}

	parse_artist_search(crate::read_json(res, "Artist search response").await?)
}

/// A rejected bearer token is an auth failure; anything else is a search failure.
fn catalog_failure(status: StatusCode, body: String) -> Error {
	if status == StatusCode::UNAUTHORIZED {
		Error::UpstreamAuth { status: status.as_u16(), body }
	} else {
		Error::UpstreamSearch { status: status.as_u16(), body }
	}
}

fn parse_token_response(json: Value) -> Result<AccessToken> {
	json.get("access_token")
		.and_then(Value::as_str)
		.filter(|token| !token.trim().is_empty())
		.map(AccessToken::new)
		.ok_or_else(|| Error::MalformedResponse {
			message: "Token response is missing access_token.".to_string(),
		})
}

fn parse_track_page(json: Value) -> Result<Vec<CatalogItem>> {
	match json.get("tracks").and_then(|tracks| tracks.get("items")) {
		Some(items) => decode_list(items, "search track"),
		None => Ok(Vec::new()),
	}
}

fn parse_recommendations(json: Value) -> Result<Vec<CatalogItem>> {
	let tracks = json.get("tracks").ok_or_else(|| Error::MalformedResponse {
		message: "Recommendations response is missing tracks.".to_string(),
	})?;

	decode_list(tracks, "recommended track")
}

fn parse_artists(json: Value) -> Result<Vec<Entity>> {
	let artists = json.get("artists").ok_or_else(|| Error::MalformedResponse {
		message: "Artists response is missing artists.".to_string(),
	})?;

	decode_list(artists, "artist")
}

fn parse_artist_search(json: Value) -> Result<Option<Entity>> {
	let Some(items) = json.get("artists").and_then(|artists| artists.get("items")) else {
		return Ok(None);
	};

	Ok(decode_list::<Entity>(items, "artist search result")?.into_iter().next())
}

/// Decodes a JSON array, skipping `null` entries the catalog emits for unknown identifiers.
fn decode_list<T>(value: &Value, label: &str) -> Result<Vec<T>>
where
	T: serde::de::DeserializeOwned,
{
	let Some(entries) = value.as_array() else {
		return Err(Error::MalformedResponse { message: format!("Expected a {label} array.") });
	};

	entries
		.iter()
		.filter(|entry| !entry.is_null())
		.map(|entry| crate::decode(entry.clone(), label))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn token_debug_is_redacted() {
		let token = AccessToken::new("very-secret");

		assert!(!format!("{token:?}").contains("very-secret"));
	}

	#[test]
	fn parses_track_page_items() {
		let json = serde_json::json!({
			"tracks": {
				"items": [
					{ "id": "t1", "name": "So What", "artists": [{ "id": "a1", "name": "Miles Davis" }] },
					null
				]
			}
		});
		let items = parse_track_page(json).expect("parse failed");

		assert_eq!(items.len(), 1);
		assert_eq!(items[0].artists[0].id, "a1");
	}

	#[test]
	fn missing_tracks_is_an_empty_page() {
		let items = parse_track_page(serde_json::json!({})).expect("parse failed");

		assert!(items.is_empty());
	}

	#[test]
	fn track_without_id_is_malformed() {
		let json = serde_json::json!({ "tracks": { "items": [{ "name": "No id" }] } });
		let err = parse_track_page(json).expect_err("expected malformed response");

		assert!(matches!(err, Error::MalformedResponse { .. }));
	}

	#[test]
	fn artists_drop_unknown_ids() {
		let json = serde_json::json!({
			"artists": [{ "id": "a1", "name": "Nina Simone" }, null]
		});
		let artists = parse_artists(json).expect("parse failed");

		assert_eq!(artists.len(), 1);
	}

	#[test]
	fn artist_search_takes_first_result() {
		let json = serde_json::json!({
			"artists": { "items": [{ "id": "a1", "name": "Queen" }, { "id": "a2", "name": "Queens" }] }
		});
		let artist = parse_artist_search(json).expect("parse failed");

		assert_eq!(artist.map(|artist| artist.id), Some("a1".to_string()));
	}

	#[test]
	fn unauthorized_maps_to_auth_failure() {
		assert!(catalog_failure(StatusCode::UNAUTHORIZED, String::new()).is_auth());
		assert!(!catalog_failure(StatusCode::BAD_GATEWAY, String::new()).is_auth());
	}
}
