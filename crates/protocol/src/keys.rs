//! Friendly key names to X keysyms.
//!
//! `xdotool key` expects keysym names such as `Return` or `Page_Down`. Callers
//! usually think in terms like `enter` or `pgdn`, so [`map_key`] translates
//! the common aliases and passes everything else through untouched.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::error::{ProtocolError, Result};

/// Separator xdotool uses for simultaneous key presses.
pub const CHORD_SEPARATOR: &str = "+";

/// Lowercase alias to keysym. Output casing is significant to xdotool.
const KEY_ALIASES: &[(&str, &str)] = &[
	// Common aliases
	("enter", "Return"),
	("ret", "Return"),
	("esc", "Escape"),
	("escape", "Escape"),
	("ctrl", "ctrl"),
	("control", "ctrl"),
	("alt", "alt"),
	("shift", "shift"),
	("cmd", "Super_L"),
	("super", "Super_L"),
	("meta", "Super_L"),
	("win", "Super_L"),
	("windows", "Super_L"),
	("backspace", "BackSpace"),
	("del", "Delete"),
	("delete", "Delete"),
	("ins", "Insert"),
	("insert", "Insert"),
	("pgup", "Page_Up"),
	("pgdn", "Page_Down"),
	("pageup", "Page_Up"),
	("pagedown", "Page_Down"),
	("page_up", "Page_Up"),
	("page_down", "Page_Down"),
	("capslock", "Caps_Lock"),
	("caps_lock", "Caps_Lock"),
	("numlock", "Num_Lock"),
	("num_lock", "Num_Lock"),
	("scrolllock", "Scroll_Lock"),
	("scroll_lock", "Scroll_Lock"),
	("tab", "Tab"),
	("space", "space"),
	("home", "Home"),
	("end", "End"),
	("pause", "Pause"),
	("menu", "Menu"),
	("print_screen", "Print"),
	// Sided modifiers
	("shift_left", "Shift_L"),
	("shift_right", "Shift_R"),
	("control_left", "Control_L"),
	("control_right", "Control_R"),
	("alt_left", "Alt_L"),
	("alt_right", "Alt_R"),
	("super_left", "Super_L"),
	("super_right", "Super_R"),
	// Arrows
	("left", "Left"),
	("right", "Right"),
	("up", "Up"),
	("down", "Down"),
	// Function keys
	("f1", "F1"),
	("f2", "F2"),
	("f3", "F3"),
	("f4", "F4"),
	("f5", "F5"),
	("f6", "F6"),
	("f7", "F7"),
	("f8", "F8"),
	("f9", "F9"),
	("f10", "F10"),
	("f11", "F11"),
	("f12", "F12"),
	// Punctuation by name
	("plus", "plus"),
	("minus", "minus"),
	("equal", "equal"),
	("equals", "equal"),
	("comma", "comma"),
	("period", "period"),
	("dot", "period"),
	("slash", "slash"),
	("backslash", "backslash"),
	("semicolon", "semicolon"),
	("quote", "apostrophe"),
	("apostrophe", "apostrophe"),
	("backtick", "grave"),
	("grave", "grave"),
	("tilde", "asciitilde"),
	("bracket_left", "bracketleft"),
	("bracket_right", "bracketright"),
	("brace_left", "braceleft"),
	("brace_right", "braceright"),
	("paren_left", "parenleft"),
	("paren_right", "parenright"),
	// Digits
	("0", "0"),
	("1", "1"),
	("2", "2"),
	("3", "3"),
	("4", "4"),
	("5", "5"),
	("6", "6"),
	("7", "7"),
	("8", "8"),
	("9", "9"),
	// Letters always go out lowercase
	("a", "a"),
	("b", "b"),
	("c", "c"),
	("d", "d"),
	("e", "e"),
	("f", "f"),
	("g", "g"),
	("h", "h"),
	("i", "i"),
	("j", "j"),
	("k", "k"),
	("l", "l"),
	("m", "m"),
	("n", "n"),
	("o", "o"),
	("p", "p"),
	("q", "q"),
	("r", "r"),
	("s", "s"),
	("t", "t"),
	("u", "u"),
	("v", "v"),
	("w", "w"),
	("x", "x"),
	("y", "y"),
	("z", "z"),
];

static KEY_TABLE: LazyLock<HashMap<&'static str, &'static str>> =
	LazyLock::new(|| KEY_ALIASES.iter().copied().collect());

/// Returns every `(alias, keysym)` pair in table order.
pub fn aliases() -> &'static [(&'static str, &'static str)] {
	KEY_ALIASES
}

/// Maps a key name to the keysym xdotool expects.
///
/// Lookup ignores case. Names without an alias are returned exactly as given,
/// since raw keysyms such as `KP_Enter` are case-sensitive.
pub fn map_key(name: &str) -> &str {
	match KEY_TABLE.get(name.to_lowercase().as_str()) {
		Some(keysym) => *keysym,
		None => name,
	}
}

/// Maps each key independently and joins them into a chord expression.
pub fn map_keys<I, S>(names: I) -> String
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	names
		.into_iter()
		.map(|name| map_key(name.as_ref()).to_string())
		.collect::<Vec<_>>()
		.join(CHORD_SEPARATOR)
}

/// Argument of a key-press action.
///
/// Deserializes from either a JSON string (`"enter"`) or an array of names
/// (`["ctrl", "c"]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyPress {
	/// One key, mapped on its own.
	Single(String),
	/// Keys pressed together, in the order given.
	Chord(Vec<String>),
}

impl KeyPress {
	/// Builds a press from CLI-style arguments: one name is a single key,
	/// several are a chord.
	pub fn from_names(mut names: Vec<String>) -> Self {
		if names.len() == 1 {
			Self::Single(names.remove(0))
		} else {
			Self::Chord(names)
		}
	}

	/// Renders the keysym expression passed to `xdotool key`.
	///
	/// Empty chords and blank key names are rejected; xdotool would otherwise
	/// be invoked with nothing to press.
	pub fn keysym(&self) -> Result<String> {
		match self {
			Self::Single(name) => {
				if name.trim().is_empty() {
					return Err(ProtocolError::invalid("key name must not be empty"));
				}
				Ok(map_key(name).to_string())
			}
			Self::Chord(names) => {
				if names.is_empty() {
					return Err(ProtocolError::invalid("key chord must contain at least one key"));
				}
				if let Some(pos) = names.iter().position(|n| n.trim().is_empty()) {
					return Err(ProtocolError::invalid(format!("key chord has an empty name at position {pos}")));
				}
				Ok(map_keys(names))
			}
		}
	}
}

impl From<&str> for KeyPress {
	fn from(name: &str) -> Self {
		Self::Single(name.to_string())
	}
}

impl From<String> for KeyPress {
	fn from(name: String) -> Self {
		Self::Single(name)
	}
}

impl From<Vec<String>> for KeyPress {
	fn from(names: Vec<String>) -> Self {
		Self::Chord(names)
	}
}

impl<const N: usize> From<[&str; N]> for KeyPress {
	fn from(names: [&str; N]) -> Self {
		Self::Chord(names.iter().map(|n| n.to_string()).collect())
	}
}
