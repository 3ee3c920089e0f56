//! Walks the catalog for genre-tagged items, one request at a time.

use scout_domain::CatalogItem;
use scout_providers::catalog::AccessToken;

use crate::{Error, Result, ScoutService};

const SOURCE_RECOMMENDATIONS: &str = "recommendations";

impl ScoutService {
	/// Collects items for `genres` from the configured source.
	///
	/// Page and round failures are logged and skipped. Authentication failures abort, and the last
	/// error is returned when no request of the run succeeded.
	pub async fn collect(&self, token: &AccessToken, genres: &[String]) -> Result<Vec<CatalogItem>> {
		if self.cfg.pipeline.genre_source == SOURCE_RECOMMENDATIONS {
			match self.collect_recommendations(token, genres).await {
				Ok(items) => return Ok(items),
				Err(err) if err.is_auth() => return Err(err),
				Err(err) => {
					tracing::warn!(
						error = %err,
						"Recommendations unavailable. Falling back to genre search."
					);
				},
			}
		}

		self.collect_search_pages(token, genres).await
	}

	pub async fn collect_search_pages(
		&self,
		token: &AccessToken,
		genres: &[String],
	) -> Result<Vec<CatalogItem>> {
		let pipeline = &self.cfg.pipeline;
		let limit = pipeline.page_size;
		let mut items = Vec::new();
		let mut requests = 0_usize;
		let mut failures = 0_usize;
		let mut last_error = None;
		for genre in genres {
			for page in 0..pipeline.pages_per_genre {
				if requests > 0 {
					self.throttle.pause().await;
				}

				requests += 1;
				let offset = page * limit;
				let page_items = match self
					.providers
					.catalog
					.search_tracks(&self.cfg.catalog, token, genre, limit, offset)
					.await
				{
					Ok(page_items) => page_items,
					Err(err) => {
						let err = Error::from(err);
						if err.is_auth() {
							return Err(err);
						}

						tracing::warn!(
							error = %err,
							genre = genre.as_str(),
							offset,
							"Search page failed. Skipping the rest of this genre."
						);
						failures += 1;
						last_error = Some(err);
						break;
					},
				};
				let count = page_items.len();
				tracing::debug!(genre = genre.as_str(), offset, count, "Collected search page.");
				items.extend(page_items);
				if count == 0 || (pipeline.stop_on_short_page && count < limit as usize) {
					break;
				}
			}
		}
		if failures == requests
			&& let Some(err) = last_error
		{
			return Err(err);
		}

		Ok(items)
	}

	pub async fn collect_recommendations(
		&self,
		token: &AccessToken,
		genres: &[String],
	) -> Result<Vec<CatalogItem>> {
		let pipeline = &self.cfg.pipeline;
		let mut items = Vec::new();
		let mut succeeded = 0_u32;
		let mut last_error = None;
		for round in 0..pipeline.recommendation_rounds {
			if round > 0 {
				self.throttle.pause().await;
			}

			match self
				.providers
				.catalog
				.recommendations(&self.cfg.catalog, token, genres, pipeline.recommendation_limit)
				.await
			{
				Ok(round_items) => {
					tracing::debug!(round, count = round_items.len(), "Collected recommendations.");
					succeeded += 1;
					items.extend(round_items);
				},
				Err(err) => {
					let err = Error::from(err);
					if err.is_auth() {
						return Err(err);
					}

					tracing::warn!(error = %err, round, "Recommendations round failed.");
					last_error = Some(err);
				},
			}
		}
		if succeeded == 0
			&& let Some(err) = last_error
		{
			return Err(err);
		}

		Ok(items)
	}
}
