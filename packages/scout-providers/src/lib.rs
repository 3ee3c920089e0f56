pub mod catalog;
pub mod llm;

mod error;

pub use error::{Error, Result};

use std::time::Duration;

use reqwest::{
	Client, Response, StatusCode,
	header::{AUTHORIZATION, HeaderMap, HeaderName},
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

pub fn auth_headers(api_key: &str, default_headers: &Map<String, Value>) -> Result<HeaderMap> {
	let mut headers = HeaderMap::new();
	headers.insert(AUTHORIZATION, format!("Bearer {api_key}").parse()?);
	for (key, value) in default_headers {
		let Some(raw) = value.as_str() else {
			return Err(Error::Configuration {
				message: format!("Default header {key} must be a string."),
			});
		};
		headers.insert(HeaderName::from_bytes(key.as_bytes())?, raw.parse()?);
	}

	Ok(headers)
}

pub(crate) fn http_client(timeout_ms: u64) -> Result<Client> {
	Ok(Client::builder().timeout(Duration::from_millis(timeout_ms)).build()?)
}

/// Splits a non-success response into its status code and body text for diagnostics.
pub(crate) async fn failure_parts(res: Response) -> (StatusCode, String) {
	let status = res.status();
	let body = res.text().await.unwrap_or_default();

	(status, body)
}

pub(crate) fn decode<T>(value: Value, label: &str) -> Result<T>
where
	T: DeserializeOwned,
{
	serde_json::from_value(value)
		.map_err(|err| Error::MalformedResponse { message: format!("Invalid {label}: {err}") })
}

pub(crate) async fn read_json(res: Response, label: &str) -> Result<Value> {
	res.json::<Value>().await.map_err(|err| Error::MalformedResponse {
		message: format!("{label} body is not valid JSON: {err}"),
	})
}
