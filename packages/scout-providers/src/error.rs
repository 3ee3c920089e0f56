pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Reqwest(#[from] reqwest::Error),
	#[error(transparent)]
	InvalidHeaderName(#[from] reqwest::header::InvalidHeaderName),
	#[error(transparent)]
	InvalidHeaderValue(#[from] reqwest::header::InvalidHeaderValue),
	#[error("Missing configuration: {message}")]
	Configuration { message: String },
	#[error("Catalog token request failed with status {status}: {body}")]
	UpstreamAuth { status: u16, body: String },
	#[error("Catalog request failed with status {status}: {body}")]
	UpstreamSearch { status: u16, body: String },
	#[error("LLM request failed with status {status}: {body}")]
	UpstreamLlm { status: u16, body: String },
	#[error("Malformed upstream response: {message}")]
	MalformedResponse { message: String },
}
impl Error {
	pub fn is_auth(&self) -> bool {
		matches!(self, Self::UpstreamAuth { .. })
	}
}
