pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Missing configuration: {message}")]
	Configuration { message: String },
	#[error("Catalog authentication failed with status {status}: {body}")]
	UpstreamAuth { status: u16, body: String },
	#[error("Catalog request failed with status {status}: {body}")]
	UpstreamSearch { status: u16, body: String },
	#[error("LLM request failed with status {status}: {body}")]
	UpstreamLlm { status: u16, body: String },
	#[error("Malformed upstream response: {message}")]
	MalformedResponse { message: String },
	#[error("Transport error: {message}")]
	Transport { message: String },
	#[error("Both discovery paths failed. LLM path: {llm}. Genre path: {genre}.")]
	Combined { llm: Box<Error>, genre: Box<Error> },
}
impl Error {
	pub fn is_auth(&self) -> bool {
		matches!(self, Self::UpstreamAuth { .. })
	}

	/// Failures caused by a remote dependency rather than by the caller or local setup.
	pub fn is_upstream(&self) -> bool {
		matches!(
			self,
			Self::UpstreamAuth { .. }
				| Self::UpstreamSearch { .. }
				| Self::UpstreamLlm { .. }
				| Self::MalformedResponse { .. }
				| Self::Transport { .. }
				| Self::Combined { .. }
		)
	}
}

impl From<scout_providers::Error> for Error {
	fn from(err: scout_providers::Error) -> Self {
		match err {
			scout_providers::Error::Configuration { message } => Self::Configuration { message },
			scout_providers::Error::UpstreamAuth { status, body } =>
				Self::UpstreamAuth { status, body },
			scout_providers::Error::UpstreamSearch { status, body } =>
				Self::UpstreamSearch { status, body },
			scout_providers::Error::UpstreamLlm { status, body } =>
				Self::UpstreamLlm { status, body },
			scout_providers::Error::MalformedResponse { message } =>
				Self::MalformedResponse { message },
			scout_providers::Error::Reqwest(inner) => Self::Transport { message: inner.to_string() },
			other @ (scout_providers::Error::InvalidHeaderName(_)
			| scout_providers::Error::InvalidHeaderValue(_)) =>
				Self::Configuration { message: other.to_string() },
		}
	}
}
