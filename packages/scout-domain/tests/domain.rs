use scout_config::Links;
use scout_domain::{
	CatalogItem, Entity, EntityRef, ExternalUrls, Followers, Image, card, extract, names,
};

fn entity_ref(id: &str) -> EntityRef {
	EntityRef {
		id: id.to_string(),
		name: format!("Artist {id}"),
		uri: format!("spotify:artist:{id}"),
		external_urls: ExternalUrls::default(),
	}
}

fn item(id: &str, artist_ids: &[&str]) -> CatalogItem {
	CatalogItem {
		id: id.to_string(),
		name: format!("Track {id}"),
		artists: artist_ids.iter().map(|artist| entity_ref(artist)).collect(),
		external_urls: ExternalUrls::default(),
	}
}

fn entity(id: &str, name: &str, image: Option<&str>) -> Entity {
	Entity {
		id: id.to_string(),
		name: name.to_string(),
		images: image
			.map(|url| vec![Image { url: url.to_string(), height: Some(640), width: Some(640) }])
			.unwrap_or_default(),
		external_urls: ExternalUrls::default(),
		followers: Followers { total: 10 },
		genres: vec!["jazz".to_string()],
	}
}

#[test]
fn extractor_unions_all_credited_artists() {
	let items = vec![item("t1", &["a1", "a2"]), item("t2", &["a2", "a3"]), item("t3", &["a1"])];
	let ids = extract::extract_entity_ids(&items);

	assert_eq!(ids, vec!["a1", "a2", "a3"]);
}

#[test]
fn extractor_output_is_bounded_and_sourced_from_input() {
	let items = vec![item("t1", &["a1", "a2", "a1"]), item("t2", &[]), item("t3", &["a4"])];
	let ids = extract::extract_entity_ids(&items);
	let ref_count: usize = items.iter().map(|item| item.artists.len()).sum();

	assert!(ids.len() <= ref_count);

	for id in &ids {
		assert!(
			items.iter().any(|item| item.artists.iter().any(|artist| &artist.id == id)),
			"{id} does not come from the input"
		);
	}
}

#[test]
fn extractor_is_idempotent() {
	let items = vec![item("t1", &["a3", "a1"]), item("t2", &["a2", "a3"])];

	assert_eq!(extract::extract_entity_ids(&items), extract::extract_entity_ids(&items));
}

#[test]
fn primary_extractor_takes_first_credit_only() {
	let items = vec![item("t1", &["a1", "a2"]), item("t2", &["a3", "a1"]), item("t3", &["a1"])];

	assert_eq!(extract::extract_primary_entity_ids(&items), vec!["a1", "a3"]);
}

#[test]
fn cards_preserve_length_and_order() {
	let entities = vec![
		entity("a2", "Second", Some("https://img.example.com/2.jpg")),
		entity("a1", "First", None),
		entity("a3", "Third", Some("https://img.example.com/3.jpg")),
	];
	let cards = card::build_cards(&entities, &Links::default());

	assert_eq!(cards.len(), entities.len());
	assert_eq!(
		cards.iter().map(|card| card.id.as_str()).collect::<Vec<_>>(),
		vec!["a2", "a1", "a3"]
	);
}

#[test]
fn card_links_derive_from_identifier() {
	let cards =
		card::build_cards(&[entity("xyz", "Nina", Some("https://img/1.jpg"))], &Links::default());

	assert_eq!(cards[0].shop_url, "https://shop.spotify.com/en/artist/xyz/store");
	assert_eq!(cards[0].spotify_url, "https://open.spotify.com/artist/xyz");
	assert_eq!(cards[0].image, "https://img/1.jpg");
}

#[test]
fn missing_image_falls_back_to_escaped_placeholder() {
	let cards = card::build_cards(&[entity("a1", "Earth, Wind & Fire", None)], &Links::default());

	assert_eq!(
		cards[0].image,
		"https://ui-avatars.com/api/?name=Earth%2C%20Wind%20%26%20Fire&size=300&background=random"
	);
}

#[test]
fn card_serializes_in_camel_case() {
	let cards = card::build_cards(&[entity("a1", "Nina", None)], &Links::default());
	let json = serde_json::to_value(&cards[0]).expect("serialize failed");

	assert!(json.get("shopUrl").is_some());
	assert!(json.get("spotifyUrl").is_some());
	assert!(json.get("shop_url").is_none());
}

#[test]
fn parses_plain_json_array() {
	assert_eq!(names::parse_name_list(r#"["A","B","C"]"#, 8), vec!["A", "B", "C"]);
}

#[test]
fn parses_bracketed_span_inside_prose() {
	assert_eq!(names::parse_name_list(r#"Here are some: ["A", "B"]"#, 8), vec!["A", "B"]);
}

#[test]
fn parses_comma_list_without_brackets() {
	assert_eq!(names::parse_name_list("A, B, C", 8), vec!["A", "B", "C"]);
}

#[test]
fn empty_completion_yields_no_names() {
	assert!(names::parse_name_list("", 8).is_empty());
	assert!(names::parse_name_list("   ", 8).is_empty());
}

#[test]
fn parses_fenced_json_and_caps_count() {
	let text = "```json\n[\"A\", \"B\", \"C\", \"D\"]\n```";

	assert_eq!(names::parse_name_list(text, 3), vec!["A", "B", "C"]);
}

#[test]
fn splits_single_quoted_bracket_span() {
	assert_eq!(
		names::parse_name_list("Sure! ['Queen', 'AC/DC', ''] hope that helps", 8),
		vec!["Queen", "AC/DC"]
	);
}
