//! Free-text query to catalog entities via a language model.

use std::collections::HashSet;

use scout_domain::{Entity, names::parse_name_list, prompt::build_prompt};
use scout_providers::catalog::AccessToken;

use crate::{Error, Result, ScoutService};

impl ScoutService {
	/// Asks the model for candidate names. An unparseable answer yields an empty list.
	pub async fn resolve_names(&self, query: &str) -> Result<Vec<String>> {
		let max_names = self.cfg.pipeline.max_llm_names;
		let prompt = build_prompt(query, max_names);
		let content = self.providers.llm.complete(&self.cfg.llm, &prompt).await?;
		let names = parse_name_list(&content, max_names as usize);
		if names.is_empty() {
			tracing::warn!(response_len = content.len(), "Model answer held no usable names.");
		} else {
			tracing::debug!(count = names.len(), "Resolved candidate names.");
		}

		Ok(names)
	}

	/// Looks up each name, keeping the first entity seen per identifier.
	pub async fn search_entities_by_name(
		&self,
		token: &AccessToken,
		names: &[String],
	) -> Result<Vec<Entity>> {
		let mut seen = HashSet::new();
		let mut entities = Vec::new();
		for (index, name) in names.iter().enumerate() {
			if index > 0 {
				self.throttle.pause().await;
			}

			match self.providers.catalog.search_artist(&self.cfg.catalog, token, name).await {
				Ok(Some(entity)) =>
					if seen.insert(entity.id.clone()) {
						entities.push(entity);
					},
				Ok(None) => {
					tracing::debug!(name = name.as_str(), "No catalog match.");
				},
				Err(err) => {
					let err = Error::from(err);
					if err.is_auth() {
						return Err(err);
					}

					tracing::warn!(error = %err, name = name.as_str(), "Name search failed.");
				},
			}
		}

		Ok(entities)
	}
}
