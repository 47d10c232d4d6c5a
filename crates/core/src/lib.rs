//! Remote control for a sandboxed X11 desktop behind a VNC bridge.
//!
//! A [`Desktop`] turns pointer, keyboard and query actions into `xdotool`
//! (and friends) shell commands and sends them through a
//! [`CommandRunner`]. Readiness waits poll the same runner until a
//! condition holds or the attempt budget is spent.
//!
//! ```ignore
//! use vdesk::{Desktop, PollPolicy, Point, ShellRunner};
//!
//! let desktop = Desktop::new(ShellRunner::new()?);
//! desktop.wait_for_display(PollPolicy::attempts(30)).await?;
//! desktop.left_click(Some(Point::new(120, 48))).await?;
//! desktop.press_key(["ctrl", "l"]).await?;
//! desktop.type_text("https://example.com").await?;
//! desktop.press_key("enter").await?;
//! ```

pub mod desktop;
pub mod error;
pub mod wait;

#[cfg(test)]
mod testing;

pub use desktop::{DEFAULT_CHUNK_SIZE, DEFAULT_TYPE_DELAY, Desktop, ScreenshotFormat};
pub use error::{Error, Result};
pub use vdesk_protocol::keys::aliases as key_aliases;
pub use vdesk_protocol::{KeyPress, MouseButton, Point, ScreenSize, ScrollDirection, StreamConfig, Url, map_key, map_keys};
pub use vdesk_runtime::{CommandRunner, DockerRunner, ExecError, ShellRunner};
pub use wait::{DEFAULT_POLL_ATTEMPTS, DEFAULT_POLL_INTERVAL, PollPolicy, Probe, wait_for};
