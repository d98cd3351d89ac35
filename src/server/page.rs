//! Landing page and browser bootstrap script, embedded at compile time.

// self
use crate::_prelude::*;

/// Browser bootstrap script served at [`super::SCRIPT_ROUTE`].
pub const APP_JS: &str = include_str!("../../assets/app.js");

const INDEX_HTML: &str = include_str!("../../assets/index.html");
const SETTINGS_PLACEHOLDER: &str = "{{WEBSDK_SETTINGS}}";

/// WebSDK settings applied by the bootstrap script in a single builder pass.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebSdkSettings {
	/// UI language code.
	pub lang: String,
	/// UI theme name.
	pub theme: String,
	/// Whether the SDK injects its own viewport meta tag.
	pub add_viewport_tag: bool,
	/// Whether the iframe grows with its content.
	pub adapt_iframe_height: bool,
	/// CSS selector of the container the SDK mounts into.
	pub container: String,
}
impl Default for WebSdkSettings {
	fn default() -> Self {
		Self {
			lang: "en".into(),
			theme: "light".into(),
			add_viewport_tag: false,
			adapt_iframe_height: true,
			container: "#sumsub-websdk-container".into(),
		}
	}
}

/// Renders the landing page with `settings` embedded as JSON.
pub fn render_index(settings: &WebSdkSettings) -> Result<String, serde_json::Error> {
	// `</` would terminate the surrounding <script> element early.
	let json = serde_json::to_string(settings)?.replace("</", "<\\/");

	Ok(INDEX_HTML.replace(SETTINGS_PLACEHOLDER, &json))
}
