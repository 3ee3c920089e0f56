//! Typed contracts for the catalog payloads the pipeline consumes.
//!
//! Only identifiers and names are required. Everything else defaults so a sparse payload still
//! decodes, while a payload missing an identifier is rejected at the boundary.

use serde::{Deserialize, Serialize};

const ENTITY_URI_PREFIX: &str = "spotify:artist:";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalUrls {
	#[serde(default)]
	pub spotify: Option<String>,
}

/// A track returned by genre search or recommendations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
	pub id: String,
	pub name: String,
	#[serde(default)]
	pub artists: Vec<EntityRef>,
	#[serde(default)]
	pub external_urls: ExternalUrls,
}

/// Lightweight pointer to an [`Entity`] as embedded in a [`CatalogItem`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
	#[serde(default)]
	pub id: String,
	pub name: String,
	#[serde(default)]
	pub uri: String,
	#[serde(default)]
	pub external_urls: ExternalUrls,
}
impl EntityRef {
	/// The referenced identifier, recovered from the URI when the payload omits `id`.
	pub fn entity_id(&self) -> Option<&str> {
		let id = self.id.trim();
		if !id.is_empty() {
			return Some(id);
		}

		self.uri.strip_prefix(ENTITY_URI_PREFIX).map(str::trim).filter(|id| !id.is_empty())
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
	pub url: String,
	#[serde(default)]
	pub height: Option<u32>,
	#[serde(default)]
	pub width: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Followers {
	#[serde(default)]
	pub total: u64,
}

/// The authoritative artist record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
	pub id: String,
	pub name: String,
	#[serde(default)]
	pub images: Vec<Image>,
	#[serde(default)]
	pub external_urls: ExternalUrls,
	#[serde(default)]
	pub followers: Followers,
	#[serde(default)]
	pub genres: Vec<String>,
}
impl Entity {
	pub fn primary_image(&self) -> Option<&str> {
		self.images.iter().map(|image| image.url.trim()).find(|url| !url.is_empty())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn entity_ref_recovers_id_from_uri() {
		let entity_ref: EntityRef = serde_json::from_value(serde_json::json!({
			"name": "Miles Davis",
			"uri": "spotify:artist:0kbYTNQb4Pb1rPbbaF0pT4"
		}))
		.expect("decode failed");

		assert_eq!(entity_ref.entity_id(), Some("0kbYTNQb4Pb1rPbbaF0pT4"));
	}

	#[test]
	fn entity_ref_without_id_or_uri_has_no_id() {
		let entity_ref: EntityRef =
			serde_json::from_value(serde_json::json!({ "name": "Unknown", "uri": "" }))
				.expect("decode failed");

		assert_eq!(entity_ref.entity_id(), None);
	}

	#[test]
	fn entity_requires_identifier() {
		let result: Result<Entity, _> =
			serde_json::from_value(serde_json::json!({ "name": "Nina Simone" }));

		assert!(result.is_err());
	}

	#[test]
	fn primary_image_skips_blank_urls() {
		let entity: Entity = serde_json::from_value(serde_json::json!({
			"id": "a1",
			"name": "Nina Simone",
			"images": [{ "url": " " }, { "url": "https://img.example.com/1.jpg", "height": 640 }]
		}))
		.expect("decode failed");

		assert_eq!(entity.primary_image(), Some("https://img.example.com/1.jpg"));
	}
}
