//! End-to-end runs of both discovery paths against a stubbed catalog and completion endpoint.

use serde_json::Value;

use scout_providers::catalog::AccessToken;
use scout_service::{Error, ScoutService, SearchRequest};
use scout_testkit::{CatalogStub, artist_json, track_json};

fn genre_page(prefix: &str, count: usize, distinct_artists: usize) -> Vec<Value> {
	(0..count)
		.map(|index| {
			let artist = format!("{prefix}-a{}", index % distinct_artists);

			track_json(&format!("{prefix}-t{index}"), &[artist.as_str()])
		})
		.collect()
}

fn artists(prefix: &str, count: usize) -> Vec<Value> {
	(0..count)
		.map(|index| {
			let id = format!("{prefix}-a{index}");

			artist_json(&id, &format!("Artist {id}"), Some(&format!("https://img.example.com/{id}.jpg")))
		})
		.collect()
}

#[tokio::test]
async fn genre_search_walks_pages_and_builds_cards() {
	let stub = CatalogStub::start().await;

	stub.mount_token("tok-e2e").await;
	stub.mount_genre_page("jazz", 0, genre_page("jazz", 30, 30)).await;
	stub.mount_genre_page("jazz", 50, Vec::new()).await;
	stub.mount_genre_page("blues", 0, genre_page("blues", 30, 15)).await;
	stub.mount_genre_page("blues", 50, Vec::new()).await;
	stub.mount_artists(artists("jazz", 30).into_iter().chain(artists("blues", 15)).collect()).await;

	let service = ScoutService::new(stub.config()).expect("Failed to build service.");
	let response = service
		.search(SearchRequest {
			query: "jazz,blues".to_string(),
			search_type: Some("genre".to_string()),
			user: None,
		})
		.await
		.expect("search failed");

	assert_eq!(response.results.len(), 45);
	assert_eq!(response.results[0].id, "jazz-a0");
	assert_eq!(response.results[0].image, "https://img.example.com/jazz-a0.jpg");
	assert_eq!(response.results[0].spotify_url, "https://open.spotify.com/artist/jazz-a0");
	assert_eq!(stub.requests_to(scout_testkit::TOKEN_PATH).await.len(), 1);
	assert_eq!(stub.requests_to("/v1/search").await.len(), 4);
	assert_eq!(stub.requests_to("/v1/artists").await.len(), 1);

	let genres = vec!["jazz".to_string(), "blues".to_string()];
	let items = service
		.collect(&AccessToken::new("tok-e2e"), &genres)
		.await
		.expect("collection failed");

	assert_eq!(items.len(), 60);
}

#[tokio::test]
async fn recommendations_source_skips_genre_search() {
	let stub = CatalogStub::start().await;

	stub.mount_token("tok-e2e").await;
	stub.mount_recommendations(genre_page("soul", 12, 4)).await;
	stub.mount_artists(artists("soul", 4)).await;

	let mut cfg = stub.config();

	cfg.pipeline.genre_source = "recommendations".to_string();

	let service = ScoutService::new(cfg).expect("Failed to build service.");
	let response = service
		.search(SearchRequest {
			query: "soul".to_string(),
			search_type: Some("genre".to_string()),
			user: None,
		})
		.await
		.expect("search failed");

	assert_eq!(
		response.results.iter().map(|card| card.id.as_str()).collect::<Vec<_>>(),
		["soul-a0", "soul-a1", "soul-a2", "soul-a3"]
	);
	assert_eq!(stub.requests_to("/v1/recommendations").await.len(), 1);
	assert!(stub.requests_to("/v1/search").await.is_empty());
}

#[tokio::test]
async fn llm_search_resolves_names_through_catalog() {
	let stub = CatalogStub::start().await;

	stub.mount_token("tok-e2e").await;
	stub.mount_completion("Here you go: [\"Queen\", \"Unknown Band\"]").await;
	stub.mount_artist_search("Queen", Some(artist_json("q1", "Queen", None))).await;
	stub.mount_artist_search("Unknown Band", None).await;

	let service = ScoutService::new(stub.config()).expect("Failed to build service.");
	let response = service
		.search(SearchRequest {
			query: "all-time-favorites".to_string(),
			search_type: Some("llm".to_string()),
			user: None,
		})
		.await
		.expect("search failed");

	assert_eq!(response.results.len(), 1);
	assert_eq!(response.results[0].name, "Queen");
	assert!(response.results[0].image.contains("name=Queen"));
	assert!(stub.requests_to("/v1/artists").await.is_empty());
}

#[tokio::test]
async fn rejected_credentials_fail_genre_search() {
	let stub = CatalogStub::start().await;

	stub.mount_token_failure(400, r#"{"error":"invalid_client"}"#).await;

	let service = ScoutService::new(stub.config()).expect("Failed to build service.");
	let err = service
		.search(SearchRequest {
			query: "jazz".to_string(),
			search_type: Some("genre".to_string()),
			user: None,
		})
		.await
		.expect_err("Expected auth failure.");

	assert!(matches!(err, Error::UpstreamAuth { status: 400, .. }), "Unexpected: {err:?}");
	assert!(stub.requests_to("/v1/search").await.is_empty());
}
