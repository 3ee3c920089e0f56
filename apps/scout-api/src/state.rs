use std::sync::Arc;

use scout_service::ScoutService;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<ScoutService>,
	pub api_auth_token: Option<Arc<str>>,
}
impl AppState {
	pub fn new(config: scout_config::Config) -> color_eyre::Result<Self> {
		let service = ScoutService::new(config)?;

		Ok(Self::from_service(service))
	}

	pub fn from_service(service: ScoutService) -> Self {
		let api_auth_token = service.cfg.security.api_auth_token.as_deref().map(Arc::from);

		Self { service: Arc::new(service), api_auth_token }
	}
}
