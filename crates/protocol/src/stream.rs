//! URL of the noVNC page that bridges the virtual display.
//!
//! The sandbox exposes each forwarded port as
//! `https://<port>-<session>-<endpoint>.<domain>`; noVNC serves `vnc.html`
//! from that origin.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ProtocolError, Result};

pub const DEFAULT_STREAM_PORT: u16 = 6080;
pub const DEFAULT_STREAM_DOMAIN: &str = "e2b.app";

/// How the stream URL is composed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StreamConfig {
	/// Forwarded noVNC port.
	pub port: u16,
	/// Domain the sandbox's forwarded ports live under.
	pub domain: String,
	/// Connect as soon as the page loads.
	pub auto_connect: bool,
	/// noVNC `resize` mode (`scale`, `remote`, ...). Omitted when `None`.
	pub resize: Option<String>,
	/// VNC password, passed as the `password` query parameter.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub auth_key: Option<String>,
}

impl Default for StreamConfig {
	fn default() -> Self {
		Self {
			port: DEFAULT_STREAM_PORT,
			domain: DEFAULT_STREAM_DOMAIN.to_string(),
			auto_connect: true,
			resize: Some("scale".to_string()),
			auth_key: None,
		}
	}
}

impl StreamConfig {
	/// Composes the viewer URL for one sandbox session.
	pub fn url(&self, session_id: &str, endpoint_id: &str) -> Result<Url> {
		for (label, value) in [("session id", session_id), ("endpoint id", endpoint_id)] {
			if value.is_empty() || !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
				return Err(ProtocolError::invalid(format!("{label} is not a valid host label: {value:?}")));
			}
		}

		let base = format!("https://{}-{session_id}-{endpoint_id}.{}/vnc.html", self.port, self.domain);
		let mut url = Url::parse(&base).map_err(|e| ProtocolError::invalid(format!("stream url {base}: {e}")))?;

		{
			let mut query = url.query_pairs_mut();
			if self.auto_connect {
				query.append_pair("autoconnect", "true");
			}
			if let Some(resize) = &self.resize {
				query.append_pair("resize", resize);
			}
			if let Some(key) = &self.auth_key {
				query.append_pair("password", key);
			}
		}
		if url.query() == Some("") {
			url.set_query(None);
		}

		Ok(url)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_stream_url() {
		let url = StreamConfig::default().url("i3k9x2", "a1b2c3").unwrap();
		assert_eq!(
			url.as_str(),
			"https://6080-i3k9x2-a1b2c3.e2b.app/vnc.html?autoconnect=true&resize=scale"
		);
	}

	#[test]
	fn bare_url_without_query() {
		let config = StreamConfig {
			auto_connect: false,
			resize: None,
			..Default::default()
		};
		let url = config.url("s", "e").unwrap();
		assert_eq!(url.as_str(), "https://6080-s-e.e2b.app/vnc.html");
	}

	#[test]
	fn auth_key_is_encoded() {
		let config = StreamConfig {
			auth_key: Some("p&ss word".into()),
			resize: None,
			..Default::default()
		};
		let url = config.url("s", "e").unwrap();
		assert_eq!(url.query(), Some("autoconnect=true&password=p%26ss+word"));
	}

	#[test]
	fn rejects_non_label_ids() {
		assert!(StreamConfig::default().url("a.b", "c").is_err());
		assert!(StreamConfig::default().url("", "c").is_err());
		assert!(StreamConfig::default().url("a", "c/d").is_err());
	}

	#[test]
	fn config_deserializes_with_defaults() {
		let config: StreamConfig = serde_json::from_str(r#"{"port": 6081}"#).unwrap();
		assert_eq!(config.port, 6081);
		assert_eq!(config.domain, DEFAULT_STREAM_DOMAIN);
		assert!(config.auto_connect);
	}
}
