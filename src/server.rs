//! HTTP surface exposed to browsers.
//!
//! - `GET /` serves the landing page with the WebSDK settings embedded.
//! - `GET /app.js` serves the browser bootstrap script.
//! - `GET /sumsub/init` runs a session bootstrap and returns `{ token, userId, externalUserId }`,
//!   or `{ error }` with a 5xx status.
//!
//! The bootstrap endpoint does not authenticate its caller.

mod error;
mod page;

pub use error::*;
pub use page::*;

// crates.io
use axum::{
	Json, Router,
	extract::State,
	http::header,
	response::{Html, IntoResponse},
	routing::get,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
// self
use crate::{
	_prelude::*,
	config::BridgeConfig,
	error::{ConfigError, TransportError},
	flows::{SessionBroker, SessionGrant},
};

/// Route of the session bootstrap endpoint.
pub const INIT_ROUTE: &str = "/sumsub/init";
/// Route of the browser bootstrap script.
pub const SCRIPT_ROUTE: &str = "/app.js";

/// Shared, immutable handler state.
#[derive(Debug)]
pub struct AppState {
	/// Bootstrap orchestrator.
	pub broker: SessionBroker,
	/// Pre-rendered landing page.
	pub page: String,
}
impl AppState {
	/// Renders the landing page once and bundles it with the broker.
	pub fn new(broker: SessionBroker, settings: &WebSdkSettings) -> Result<Self, ConfigError> {
		let page = render_index(settings)
			.map_err(|e| ConfigError::invalid_var("WEBSDK_SETTINGS", e))?;

		Ok(Self { broker, page })
	}
}

/// Builds the router for the given state.
pub fn router(state: Arc<AppState>) -> Router {
	Router::new()
		.route("/", get(index))
		.route(SCRIPT_ROUTE, get(script))
		.route(INIT_ROUTE, get(init_session))
		.layer(TraceLayer::new_for_http())
		.layer(CorsLayer::permissive())
		.with_state(state)
}

/// Binds `config.listen_addr` and serves until Ctrl-C.
pub async fn serve(config: BridgeConfig) -> Result<()> {
	let broker = SessionBroker::new(&config)?;
	let state = Arc::new(AppState::new(broker, &WebSdkSettings::default())?);
	let listener = TcpListener::bind(config.listen_addr).await.map_err(TransportError::from)?;

	tracing::info!(
		addr = %config.listen_addr,
		base_url = %config.base_url,
		level = %config.level_name,
		"Sumsub bridge listening."
	);

	serve_on(listener, state, shutdown_signal()).await
}

/// Serves on an already bound listener until `shutdown` resolves.
pub async fn serve_on<F>(listener: TcpListener, state: Arc<AppState>, shutdown: F) -> Result<()>
where
	F: 'static + Send + Future<Output = ()>,
{
	axum::serve(listener, router(state))
		.with_graceful_shutdown(shutdown)
		.await
		.map_err(|e| TransportError::Io(e).into())
}

async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
	Html(state.page.clone())
}

async fn script() -> impl IntoResponse {
	([(header::CONTENT_TYPE, "text/javascript; charset=utf-8")], APP_JS)
}

async fn init_session(
	State(state): State<Arc<AppState>>,
) -> Result<Json<SessionGrant>, ApiError> {
	let grant = state.broker.bootstrap_session().await?;

	tracing::info!(
		applicant = %grant.user_id,
		external_user_id = %grant.external_user_id,
		"Session bootstrapped."
	);

	Ok(Json(grant))
}

async fn shutdown_signal() {
	if let Err(e) = tokio::signal::ctrl_c().await {
		tracing::error!(error = %e, "Failed to listen for shutdown signal.");

		std::future::pending::<()>().await;
	}

	tracing::info!("Shutdown signal received.");
}
