use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::Instrument;
use uuid::Uuid;

use scout_domain::{
	DisplayCard,
	card::build_cards,
	extract::{extract_entity_ids, extract_primary_entity_ids},
	genre::parse_genres,
};

use crate::{Error, Result, ScoutService, cache::cache_key};

const CREDITED_PRIMARY: &str = "primary";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
	Genre,
	Llm,
}
impl SearchType {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Genre => "genre",
			Self::Llm => "llm",
		}
	}

	/// Absent means `llm`.
	pub fn parse(raw: Option<&str>) -> Result<Self> {
		match raw.map(str::trim).filter(|value| !value.is_empty()) {
			None => Ok(Self::Llm),
			Some(value) if value.eq_ignore_ascii_case("genre") => Ok(Self::Genre),
			Some(value) if value.eq_ignore_ascii_case("llm") => Ok(Self::Llm),
			Some(value) => Err(Error::InvalidRequest {
				message: format!("searchType must be \"genre\" or \"llm\", got {value:?}."),
			}),
		}
	}
}

/// Identity supplied by the fronting authentication layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchUser {
	pub id: String,
	pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
	pub query: String,
	#[serde(default)]
	pub search_type: Option<String>,
	#[serde(skip)]
	pub user: Option<SearchUser>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
	pub success: bool,
	pub query: String,
	pub search_type: SearchType,
	pub results: Vec<DisplayCard>,
	pub user: Option<SearchUser>,
	#[serde(with = "time::serde::rfc3339")]
	pub timestamp: OffsetDateTime,
}

impl ScoutService {
	pub async fn search(&self, req: SearchRequest) -> Result<SearchResponse> {
		let query = req.query.trim();
		if query.is_empty() {
			return Err(Error::InvalidRequest { message: "query must not be empty.".to_string() });
		}

		let search_type = SearchType::parse(req.search_type.as_deref())?;
		let key = cache_key(search_type.as_str(), query);
		let results = match self.cache.get(&key) {
			Some(cards) => {
				tracing::info!(search_type = search_type.as_str(), hit = true, "Cache hit.");

				cards
			},
			None => {
				let cards = match search_type {
					SearchType::Genre => self.discover_by_genre(query).await?,
					SearchType::Llm => self.discover_by_llm(query).await?,
				};
				self.cache.set(&key, cards.clone());

				cards
			},
		};

		Ok(SearchResponse {
			success: true,
			query: query.to_string(),
			search_type,
			results,
			user: req.user,
			timestamp: OffsetDateTime::now_utc(),
		})
	}

	pub fn clear_cache(&self) {
		self.cache.clear();
		tracing::info!("Result cache cleared.");
	}

	/// Genre path: token, collection, extraction, details, cards.
	pub async fn discover_by_genre(&self, raw_genres: &str) -> Result<Vec<DisplayCard>> {
		let span = tracing::info_span!("discover_by_genre", run_id = %Uuid::new_v4());

		self.run_genre_path(raw_genres).instrument(span).await
	}

	/// LLM path. Falls back to the genre path when it fails or finds nothing.
	pub async fn discover_by_llm(&self, query: &str) -> Result<Vec<DisplayCard>> {
		let llm_error = match self.discover_by_names(query).await {
			Ok(cards) if !cards.is_empty() => return Ok(cards),
			Ok(_) => {
				tracing::info!("LLM path found no artists. Falling back to genre search.");

				None
			},
			Err(err) => {
				tracing::warn!(error = %err, "LLM path failed. Falling back to genre search.");

				Some(err)
			},
		};
		match (self.discover_by_genre(query).await, llm_error) {
			(Ok(cards), _) => Ok(cards),
			(Err(genre), Some(llm)) =>
				Err(Error::Combined { llm: Box::new(llm), genre: Box::new(genre) }),
			(Err(genre), None) => Err(genre),
		}
	}

	async fn discover_by_names(&self, query: &str) -> Result<Vec<DisplayCard>> {
		let span = tracing::info_span!("discover_by_llm", run_id = %Uuid::new_v4());

		self.run_llm_path(query).instrument(span).await
	}

	async fn run_genre_path(&self, raw_genres: &str) -> Result<Vec<DisplayCard>> {
		let pipeline = &self.cfg.pipeline;
		let genres = parse_genres(raw_genres, pipeline.max_genres as usize, &pipeline.default_genre);
		let token = self.providers.catalog.token(&self.cfg.catalog).await?;
		let items = self.collect(&token, &genres).await?;
		let ids = if pipeline.credited_artists == CREDITED_PRIMARY {
			extract_primary_entity_ids(&items)
		} else {
			extract_entity_ids(&items)
		};
		let entities = self.fetch_entities(&token, &ids).await?;
		let cards = build_cards(&entities, &self.cfg.links);
		tracing::info!(
			genres = ?genres,
			tracks = items.len(),
			unique_artists = ids.len(),
			cards = cards.len(),
			"Genre discovery finished."
		);

		Ok(cards)
	}

	async fn run_llm_path(&self, query: &str) -> Result<Vec<DisplayCard>> {
		let names = self.resolve_names(query).await?;
		if names.is_empty() {
			return Ok(Vec::new());
		}

		let token = self.providers.catalog.token(&self.cfg.catalog).await?;
		let entities = self.search_entities_by_name(&token, &names).await?;
		let cards = build_cards(&entities, &self.cfg.links);
		tracing::info!(names = names.len(), cards = cards.len(), "LLM discovery finished.");

		Ok(cards)
	}
}
