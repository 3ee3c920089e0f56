pub const FEATURED_QUERIES: [&str; 4] =
	["billboard-top-100", "vinyl-collections", "up-and-coming-artists", "all-time-favorites"];

const RESPONSE_SUFFIX: &str = ". Response must be ONLY the JSON array, no additional text.";

pub fn is_featured_query(query: &str) -> bool {
	let lower = query.trim().to_lowercase();

	FEATURED_QUERIES.contains(&lower.as_str())
}

/// The single user message sent to the completion endpoint for `query`.
pub fn build_prompt(query: &str, count: u32) -> String {
	format!("{}{RESPONSE_SUFFIX}", instruction_for(query, count))
}

fn instruction_for(query: &str, count: u32) -> String {
	let query = query.trim();
	let (subject, example) = match query.to_lowercase().as_str() {
		"billboard-top-100" => (
			"current Billboard Top 100 artists",
			r#"["The Weeknd", "Taylor Swift", "Bad Bunny", "Harry Styles", "Doja Cat", "Post Malone", "Olivia Rodrigo", "Dua Lipa"]"#,
		),
		"vinyl-collections" => (
			"artists known for vinyl releases",
			r#"["Taylor Swift", "Arctic Monkeys", "Fleetwood Mac", "Pink Floyd", "The Beatles", "Radiohead", "Lana Del Rey", "Mac Miller"]"#,
		),
		"up-and-coming-artists" => (
			"emerging artists",
			r#"["Chappell Roan", "Sabrina Carpenter", "Gracie Abrams", "Clairo", "Rex Orange County", "Phoebe Bridgers", "Mitski", "Steve Lacy"]"#,
		),
		"all-time-favorites" => (
			"legendary artists",
			r#"["The Beatles", "Queen", "Led Zeppelin", "Pink Floyd", "The Rolling Stones", "David Bowie", "AC/DC", "Nirvana"]"#,
		),
		_ => {
			let placeholders = (1..=count)
				.map(|index| format!("\"Artist Name {index}\""))
				.collect::<Vec<_>>()
				.join(", ");

			return format!(
				"Based on the query \"{query}\", return exactly {count} relevant musical artists in this format: [{placeholders}]"
			);
		},
	};

	format!("Return exactly {count} {subject} in this format: {example}")
}
