use std::collections::HashSet;

/// Splits a comma-separated genre list into normalized tags.
///
/// Tags are trimmed, lower-cased and deduplicated in first-seen order, then capped at
/// `max_genres`. Input without any usable tag yields `[default_genre]`.
pub fn parse_genres(raw: &str, max_genres: usize, default_genre: &str) -> Vec<String> {
	let mut seen = HashSet::new();
	let genres: Vec<String> = raw
		.split(',')
		.map(|genre| genre.trim().to_lowercase())
		.filter(|genre| !genre.is_empty())
		.filter(|genre| seen.insert(genre.clone()))
		.take(max_genres)
		.collect();

	if genres.is_empty() {
		return vec![default_genre.trim().to_lowercase()];
	}

	genres
}

/// Search expression for one genre tag.
pub fn genre_query(genre: &str) -> String {
	format!("genre:\"{genre}\"")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn normalizes_and_dedupes() {
		assert_eq!(parse_genres(" Jazz, blues ,JAZZ,,", 5, "jazz"), vec!["jazz", "blues"]);
	}

	#[test]
	fn caps_at_max() {
		let genres = parse_genres("a,b,c,d,e,f,g", 5, "jazz");

		assert_eq!(genres, vec!["a", "b", "c", "d", "e"]);
	}

	#[test]
	fn blank_input_uses_default() {
		assert_eq!(parse_genres("  , ,", 5, "Jazz"), vec!["jazz"]);
		assert_eq!(parse_genres("", 5, "jazz"), vec!["jazz"]);
	}

	#[test]
	fn builds_genre_query() {
		assert_eq!(genre_query("hip hop"), "genre:\"hip hop\"");
	}
}
