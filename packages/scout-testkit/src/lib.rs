//! Shared fixtures: a config builder and a `wiremock` stand-in for the catalog and LLM endpoints.

use std::collections::HashMap;

use serde_json::{Map, Value};
use wiremock::{
	Mock, MockServer, Request, ResponseTemplate,
	matchers::{method, path, query_param},
};

use scout_config::{
	Cache, CatalogConfig, Config, Links, LlmProviderConfig, Pipeline, Security, Service, Throttle,
};

pub const TOKEN_PATH: &str = "/api/token";
pub const COMPLETION_PATH: &str = "/chat/completions";

/// A config pointing every upstream at `base_url`, with credentials set and throttling off.
pub fn test_config(base_url: &str) -> Config {
	Config {
		service: Service {
			http_bind: "127.0.0.1:0".to_string(),
			admin_bind: "127.0.0.1:0".to_string(),
			log_level: "info".to_string(),
		},
		catalog: CatalogConfig {
			accounts_base: base_url.to_string(),
			token_path: TOKEN_PATH.to_string(),
			api_base: base_url.to_string(),
			client_id: Some("test-client".to_string()),
			client_secret: Some("test-secret".to_string()),
			market: None,
			batch_size: 50,
			timeout_ms: 5_000,
		},
		llm: LlmProviderConfig {
			provider_id: "test".to_string(),
			api_base: base_url.to_string(),
			api_key: Some("test-llm-key".to_string()),
			path: COMPLETION_PATH.to_string(),
			model: "test-model".to_string(),
			temperature: None,
			provider_sort: None,
			timeout_ms: 5_000,
			default_headers: Map::new(),
		},
		links: Links::default(),
		pipeline: Pipeline::default(),
		throttle: Throttle { policy: "none".to_string(), ..Throttle::default() },
		cache: Cache::default(),
		security: Security { bind_localhost_only: true, api_auth_token: None },
	}
}

pub fn track_json(id: &str, artist_ids: &[&str]) -> Value {
	let artists: Vec<Value> = artist_ids
		.iter()
		.map(|artist_id| {
			serde_json::json!({
				"id": artist_id,
				"name": format!("Artist {artist_id}"),
				"uri": format!("spotify:artist:{artist_id}"),
				"external_urls": { "spotify": format!("https://open.spotify.com/artist/{artist_id}") }
			})
		})
		.collect();

	serde_json::json!({
		"id": id,
		"name": format!("Track {id}"),
		"artists": artists,
		"external_urls": { "spotify": format!("https://open.spotify.com/track/{id}") }
	})
}

pub fn artist_json(id: &str, name: &str, image: Option<&str>) -> Value {
	let images: Vec<Value> = image
		.map(|url| vec![serde_json::json!({ "url": url, "height": 640, "width": 640 })])
		.unwrap_or_default();

	serde_json::json!({
		"id": id,
		"name": name,
		"images": images,
		"external_urls": { "spotify": format!("https://open.spotify.com/artist/{id}") },
		"followers": { "total": 1_000 },
		"genres": ["jazz"]
	})
}

pub fn tracks_page(items: Vec<Value>) -> Value {
	serde_json::json!({ "tracks": { "items": items } })
}

pub fn completion_json(content: &str) -> Value {
	serde_json::json!({
		"choices": [
			{ "index": 0, "message": { "role": "assistant", "content": content } }
		]
	})
}

pub struct CatalogStub {
	server: MockServer,
}
impl CatalogStub {
	pub async fn start() -> Self {
		Self { server: MockServer::start().await }
	}

	pub fn uri(&self) -> String {
		self.server.uri()
	}

	pub fn server(&self) -> &MockServer {
		&self.server
	}

	pub fn config(&self) -> Config {
		test_config(&self.uri())
	}

	pub async fn mount_token(&self, token: &str) {
		Mock::given(method("POST"))
			.and(path(TOKEN_PATH))
			.respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
				"access_token": token,
				"token_type": "Bearer",
				"expires_in": 3_600
			})))
			.mount(&self.server)
			.await;
	}

	pub async fn mount_token_failure(&self, status: u16, body: &str) {
		Mock::given(method("POST"))
			.and(path(TOKEN_PATH))
			.respond_with(ResponseTemplate::new(status).set_body_string(body))
			.mount(&self.server)
			.await;
	}

	/// Serves `items` for the genre search page starting at `offset`.
	pub async fn mount_genre_page(&self, genre: &str, offset: u32, items: Vec<Value>) {
		Mock::given(method("GET"))
			.and(path("/v1/search"))
			.and(query_param("type", "track"))
			.and(query_param("q", format!("genre:\"{genre}\"")))
			.and(query_param("offset", offset.to_string()))
			.respond_with(ResponseTemplate::new(200).set_body_json(tracks_page(items)))
			.mount(&self.server)
			.await;
	}

	pub async fn mount_genre_failure(&self, genre: &str, status: u16) {
		Mock::given(method("GET"))
			.and(path("/v1/search"))
			.and(query_param("type", "track"))
			.and(query_param("q", format!("genre:\"{genre}\"")))
			.respond_with(ResponseTemplate::new(status).set_body_string("upstream unavailable"))
			.mount(&self.server)
			.await;
	}

	pub async fn mount_recommendations(&self, items: Vec<Value>) {
		Mock::given(method("GET"))
			.and(path("/v1/recommendations"))
			.respond_with(
				ResponseTemplate::new(200).set_body_json(serde_json::json!({ "tracks": items })),
			)
			.mount(&self.server)
			.await;
	}

	/// Serves the bulk artist endpoint from `artists`, answering `null` for unknown ids.
	pub async fn mount_artists(&self, artists: Vec<Value>) {
		let by_id: HashMap<String, Value> = artists
			.into_iter()
			.filter_map(|artist| {
				let id = artist.get("id").and_then(Value::as_str)?.to_string();

				Some((id, artist))
			})
			.collect();

		Mock::given(method("GET"))
			.and(path("/v1/artists"))
			.respond_with(move |request: &Request| {
				let ids = request
					.url
					.query_pairs()
					.find(|(key, _)| key == "ids")
					.map(|(_, value)| value.into_owned())
					.unwrap_or_default();
				let found: Vec<Value> = ids
					.split(',')
					.filter(|id| !id.is_empty())
					.map(|id| by_id.get(id).cloned().unwrap_or(Value::Null))
					.collect();

				ResponseTemplate::new(200).set_body_json(serde_json::json!({ "artists": found }))
			})
			.mount(&self.server)
			.await;
	}

	/// Serves the name search for `name` with `artist` as its only hit.
	pub async fn mount_artist_search(&self, name: &str, artist: Option<Value>) {
		let items: Vec<Value> = artist.into_iter().collect();

		Mock::given(method("GET"))
			.and(path("/v1/search"))
			.and(query_param("type", "artist"))
			.and(query_param("q", name))
			.respond_with(
				ResponseTemplate::new(200)
					.set_body_json(serde_json::json!({ "artists": { "items": items } })),
			)
			.mount(&self.server)
			.await;
	}

	pub async fn mount_completion(&self, content: &str) {
		Mock::given(method("POST"))
			.and(path(COMPLETION_PATH))
			.respond_with(ResponseTemplate::new(200).set_body_json(completion_json(content)))
			.mount(&self.server)
			.await;
	}

	pub async fn mount_completion_failure(&self, status: u16, body: &str) {
		Mock::given(method("POST"))
			.and(path(COMPLETION_PATH))
			.respond_with(ResponseTemplate::new(status).set_body_string(body))
			.mount(&self.server)
			.await;
	}

	/// Requests received so far whose path equals `request_path`.
	pub async fn requests_to(&self, request_path: &str) -> Vec<Request> {
		self.server
			.received_requests()
			.await
			.unwrap_or_default()
			.into_iter()
			.filter(|request| request.url.path() == request_path)
			.collect()
	}
}
