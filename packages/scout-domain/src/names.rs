use std::sync::LazyLock;

use regex::Regex;

static BRACKETED: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?s)\[(.*?)\]").expect("Bracket pattern must compile."));

/// Extracts artist names from a completion.
///
/// Tried in order: the whole text as a JSON array of strings, the first `[...]` span, then the
/// whole text split on commas. An empty result is a valid outcome, not an error.
pub fn parse_name_list(text: &str, max: usize) -> Vec<String> {
	let text = text.trim();
	if text.is_empty() {
		return Vec::new();
	}

	let names = if let Ok(names) = serde_json::from_str::<Vec<String>>(text) {
		names
	} else if let Some(captures) = BRACKETED.captures(text) {
		let span = captures.get(0).map(|m| m.as_str()).unwrap_or_default();

		serde_json::from_str::<Vec<String>>(span).unwrap_or_else(|_| {
			split_names(captures.get(1).map(|m| m.as_str()).unwrap_or_default())
		})
	} else {
		split_names(text)
	};

	names
		.into_iter()
		.map(|name| name.trim().to_string())
		.filter(|name| !name.is_empty())
		.take(max)
		.collect()
}

fn split_names(raw: &str) -> Vec<String> {
	raw.split(',')
		.map(|part| part.trim().trim_matches(|c| matches!(c, '[' | ']' | '"' | '\'' | '`')))
		.map(str::to_string)
		.collect()
}
