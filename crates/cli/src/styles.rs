//! Help output colors.

use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Style};

const HEADER: Style = AnsiColor::Yellow.on_default().bold();
const LITERAL: Style = AnsiColor::Green.on_default();
const PLACEHOLDER: Style = AnsiColor::Cyan.on_default();

/// Yellow section headers, green subcommands and flags, cyan `<VALUES>`,
/// bold red errors.
pub fn cli_styles() -> Styles {
	Styles::styled()
		.header(HEADER)
		.usage(HEADER)
		.literal(LITERAL)
		.placeholder(PLACEHOLDER)
		.valid(LITERAL)
		.invalid(AnsiColor::Red.on_default())
		.error(AnsiColor::Red.on_default().bold())
}
