//! Binary-level checks that need no X server.

use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

fn vdesk(config_home: &Path, args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_vdesk"))
		.env("XDG_CONFIG_HOME", config_home)
		.env_remove("RUST_LOG")
		.args(["-f", "json"])
		.args(args)
		.output()
		.expect("failed to execute vdesk")
}

fn envelope(output: &Output) -> Value {
	let stdout = String::from_utf8_lossy(&output.stdout);
	serde_json::from_str(&stdout).unwrap_or_else(|e| panic!("stdout is not JSON ({e}): {stdout}"))
}

#[test]
fn keys_maps_names_offline() {
	let home = TempDir::new().unwrap();
	let output = vdesk(home.path(), &["keys", "enter"]);
	assert!(output.status.success());

	let json = envelope(&output);
	assert_eq!(json["ok"], true);
	assert_eq!(json["command"], "keys");
	assert_eq!(json["data"]["keysym"], "Return");
}

#[test]
fn keys_maps_chord() {
	let home = TempDir::new().unwrap();
	let json = envelope(&vdesk(home.path(), &["keys", "ctrl", "alt", "delete"]));
	assert_eq!(json["data"]["keysym"], "ctrl+alt+Delete");
}

#[test]
fn unknown_scroll_direction_is_invalid_input() {
	let home = TempDir::new().unwrap();
	let output = vdesk(home.path(), &["scroll", "sideways"]);
	assert_eq!(output.status.code(), Some(1));

	let json = envelope(&output);
	assert_eq!(json["ok"], false);
	assert_eq!(json["command"], "scroll");
	assert_eq!(json["error"]["code"], "INVALID_INPUT");
	assert!(String::from_utf8_lossy(&output.stderr).contains("INVALID_INPUT"));
}

#[test]
fn missing_explicit_config_is_config_error() {
	let home = TempDir::new().unwrap();
	let missing = home.path().join("nope.json");
	let output = vdesk(home.path(), &["--config", missing.to_str().unwrap(), "cursor"]);
	assert_eq!(output.status.code(), Some(1));

	let json = envelope(&output);
	assert_eq!(json["error"]["code"], "CONFIG_ERROR");
	let message = json["error"]["message"].as_str().unwrap_or_default();
	assert!(message.contains("nope.json"), "message should name the file: {message}");
}

#[test]
fn stream_url_for_local_session() {
	let home = TempDir::new().unwrap();
	let json = envelope(&vdesk(home.path(), &["stream-url"]));
	assert_eq!(json["ok"], true);
	assert_eq!(
		json["data"]["url"],
		"https://6080-local-localhost.e2b.app/vnc.html?autoconnect=true&resize=scale"
	);
	assert_eq!(json["session"]["runner"], "shell");
}

#[test]
fn stream_url_uses_config_file() {
	let home = TempDir::new().unwrap();
	let dir = home.path().join("vdesk");
	std::fs::create_dir_all(&dir).unwrap();
	std::fs::write(
		dir.join("config.json"),
		r#"{ "endpointId": "edge7", "stream": { "port": 6081, "resize": null } }"#,
	)
	.unwrap();

	let json = envelope(&vdesk(home.path(), &["stream-url", "--auth-key", "s3cret"]));
	assert_eq!(
		json["data"]["url"],
		"https://6081-local-edge7.e2b.app/vnc.html?autoconnect=true&password=s3cret"
	);
}
