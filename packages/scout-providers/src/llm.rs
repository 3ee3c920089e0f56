use serde_json::Value;

use scout_config::LlmProviderConfig;

use crate::{Error, Result};

/// Sends `prompt` as a single-turn chat completion and returns the message content.
pub async fn complete(cfg: &LlmProviderConfig, prompt: &str) -> Result<String> {
	let Some(api_key) = cfg.api_key.as_deref() else {
		return Err(Error::Configuration {
			message: format!(
				"llm api key is not set; configure llm.api_key or {}.",
				scout_config::LLM_API_KEY_ENV
			),
		});
	};
	let client = crate::http_client(cfg.timeout_ms)?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = completion_body(cfg, prompt);
	tracing::debug!(provider_id = %cfg.provider_id, model = %cfg.model, "Requesting completion.");
	let res = client
		.post(&url)
		.headers(crate::auth_headers(api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;

	if !res.status().is_success() {
		let (status, body) = crate::failure_parts(res).await;

		return Err(Error::UpstreamLlm { status: status.as_u16(), body });
	}

	parse_completion_content(crate::read_json(res, "Completion response").await?)
}

fn completion_body(cfg: &LlmProviderConfig, prompt: &str) -> Value {
	let mut body = serde_json::json!({
		"model": cfg.model,
		"messages": [
			{ "role": "user", "content": prompt }
		],
	});
	if let Some(temperature) = cfg.temperature {
		body["temperature"] = serde_json::json!(temperature);
	}
	if let Some(sort) = cfg.provider_sort.as_deref() {
		body["provider"] = serde_json::json!({ "sort": sort });
	}

	body
}

fn parse_completion_content(json: Value) -> Result<String> {
	json.get("choices")
		.and_then(|v| v.as_array())
		.and_then(|arr| arr.first())
		.and_then(|choice| choice.get("message"))
		.and_then(|msg| msg.get("content"))
		.and_then(|c| c.as_str())
		.map(str::to_string)
		.ok_or_else(|| Error::MalformedResponse {
			message: "Completion response is missing choices[0].message.content.".to_string(),
		})
}
