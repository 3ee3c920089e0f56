use serde::{Deserialize, Serialize};

use scout_config::Links;

use crate::catalog::Entity;

const PLACEHOLDER_SIZE: u32 = 300;

/// UI-facing projection of an [`Entity`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayCard {
	pub id: String,
	pub name: String,
	pub image: String,
	pub shop_url: String,
	pub spotify_url: String,
}

pub fn build_cards(entities: &[Entity], links: &Links) -> Vec<DisplayCard> {
	entities.iter().map(|entity| build_card(entity, links)).collect()
}

pub fn build_card(entity: &Entity, links: &Links) -> DisplayCard {
	let image = entity
		.primary_image()
		.map(str::to_string)
		.unwrap_or_else(|| placeholder_image(&links.placeholder_base, &entity.name));

	DisplayCard {
		id: entity.id.clone(),
		name: entity.name.clone(),
		image,
		shop_url: storefront_url(&links.storefront_base, &entity.id),
		spotify_url: entity_page_url(&links.entity_page_base, &entity.id),
	}
}

pub fn storefront_url(base: &str, id: &str) -> String {
	format!("{}/{id}/store", base.trim_end_matches('/'))
}

pub fn entity_page_url(base: &str, id: &str) -> String {
	format!("{}/{id}", base.trim_end_matches('/'))
}

/// Deterministic avatar URL keyed by the escaped entity name.
pub fn placeholder_image(base: &str, name: &str) -> String {
	let separator = if base.contains('?') { '&' } else { '?' };

	format!(
		"{base}{separator}name={}&size={PLACEHOLDER_SIZE}&background=random",
		urlencoding::encode(name.trim())
	)
}
