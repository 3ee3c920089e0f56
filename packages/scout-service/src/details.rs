use scout_config::CATALOG_MAX_PAGE;
use scout_domain::Entity;
use scout_providers::catalog::AccessToken;

use crate::{Error, Result, ScoutService};

impl ScoutService {
	/// Fetches full records for `ids` in batches, skipping batches that fail.
	pub async fn fetch_entities(&self, token: &AccessToken, ids: &[String]) -> Result<Vec<Entity>> {
		let batch_size = self.cfg.catalog.batch_size.clamp(1, CATALOG_MAX_PAGE) as usize;
		let mut entities = Vec::with_capacity(ids.len());
		for (batch, chunk) in ids.chunks(batch_size).enumerate() {
			if batch > 0 {
				self.throttle.pause().await;
			}

			match self.providers.catalog.artists(&self.cfg.catalog, token, chunk).await {
				Ok(found) => {
					tracing::debug!(
						batch,
						requested = chunk.len(),
						found = found.len(),
						"Fetched detail batch."
					);
					entities.extend(found);
				},
				Err(err) => {
					let err = Error::from(err);
					if err.is_auth() {
						return Err(err);
					}

					tracing::warn!(error = %err, batch, size = chunk.len(), "Detail batch failed.");
				},
			}
		}

		Ok(entities)
	}
}
