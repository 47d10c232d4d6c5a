//! Key-name lookup. Runs offline; no session is opened.

use serde::Serialize;
use vdesk::KeyPress;

use crate::cli::KeysArgs;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyAlias {
	pub name: String,
	pub keysym: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum KeysData {
	Mapped { keysym: String },
	Listed { aliases: Vec<KeyAlias> },
}

pub const NAME: &str = "keys";

pub fn execute(args: &KeysArgs) -> Result<(serde_json::Value, KeysData)> {
	if args.list || args.names.is_empty() {
		let aliases = vdesk::key_aliases()
			.iter()
			.map(|(name, keysym)| KeyAlias {
				name: (*name).to_string(),
				keysym: (*keysym).to_string(),
			})
			.collect();
		return Ok((serde_json::Value::Null, KeysData::Listed { aliases }));
	}

	let keysym = KeyPress::from_names(args.names.clone()).keysym().map_err(vdesk::Error::from)?;
	Ok((serde_json::json!({ "names": args.names }), KeysData::Mapped { keysym }))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn keys(names: &[&str]) -> KeysArgs {
		KeysArgs {
			names: names.iter().map(|s| s.to_string()).collect(),
			list: false,
		}
	}

	#[test]
	fn maps_single_key() {
		let (_, data) = execute(&keys(&["enter"])).unwrap();
		assert!(matches!(data, KeysData::Mapped { ref keysym } if keysym == "Return"));
	}

	#[test]
	fn maps_chord() {
		let (inputs, data) = execute(&keys(&["ctrl", "shift", "t"])).unwrap();
		assert!(matches!(data, KeysData::Mapped { ref keysym } if keysym == "ctrl+shift+t"));
		assert_eq!(inputs["names"][0], "ctrl");
	}

	#[test]
	fn blank_key_is_rejected() {
		assert!(execute(&keys(&["ctrl", " "])).is_err());
	}

	#[test]
	fn list_contains_aliases() {
		let (inputs, data) = execute(&KeysArgs { names: vec![], list: true }).unwrap();
		assert!(inputs.is_null());
		match data {
			KeysData::Listed { aliases } => {
				assert!(aliases.iter().any(|a| a.name == "enter" && a.keysym == "Return"));
			}
			other => panic!("unexpected data: {other:?}"),
		}
	}
}
