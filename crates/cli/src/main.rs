use clap::Parser;
use vdesk_cli::{
	cli::Cli,
	commands,
	error::CliError,
	logging,
	output::{self, OutputFormat, ResultBuilder},
};

#[tokio::main]
async fn main() {
	let cli = Cli::parse();
	logging::init_logging(cli.verbose);

	let format = cli.format;
	let command = cli.command.name();

	if let Err(err) = commands::dispatch(cli, format).await {
		handle_error(err, command, format);
		std::process::exit(1);
	}
}

fn handle_error(err: CliError, command: &'static str, format: OutputFormat) {
	let cmd_error = err.to_command_error();

	// Humans read stderr
	output::print_error_stderr(&cmd_error);

	// Agents read the envelope
	if format != OutputFormat::Text {
		let result: output::CommandResult<()> = ResultBuilder::new(command).error(cmd_error).build();
		output::print_result(&result, format);
	}
}
