//! Wire-level pieces of vdesk: key symbols, xdotool command rendering and
//! parsing of the text those commands print.
//!
//! Nothing in this crate performs I/O. Every function either builds a shell
//! command string or interprets captured stdout, so the whole surface can be
//! tested without a display.
//!
//! # Main Types
//!
//! - [`KeyPress`] - a single key or an ordered chord
//! - [`Xdo`] - renders desktop actions as `DISPLAY=... xdotool ...` commands
//! - [`StreamConfig`] - composes the URL of the bridged VNC session

pub mod command;
pub mod error;
pub mod keys;
pub mod parse;
pub mod stream;

pub use command::{MouseButton, Point, ScrollDirection, Xdo};
pub use error::{ProtocolError, Result};
pub use keys::{KeyPress, map_key, map_keys};
pub use parse::ScreenSize;
pub use stream::StreamConfig;
pub use url::Url;
