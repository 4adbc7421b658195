use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Stamp build version and date into your bundled output files.",
	long_about = "aiv (auto inject version) stamps version and build date information into \
	              bundled output files.\n\nEvery script, markup, and stylesheet asset gets a \
	              comment banner, and `[AIV]...[/AIV]` regions inside matching files are replaced \
	              with resolved `{version}` and `{date}` values.\n\nQuick start:\n  aiv init    \
	              Create an aiv.toml config file\n  aiv check   Preview what would be injected\n  \
	              aiv inject  Write the injections to disk"
)]
pub struct AivCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the project root directory, used to discover the config file
	/// and the package manifest.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Version string to inject, overriding the one read from the package
	/// manifest.
	#[arg(long, global = true)]
	pub app_version: Option<String>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Initialize aiv in a project by creating a sample config file.
	///
	/// Creates an `aiv.toml` file in the project root documenting every
	/// option with its default value. If the file already exists, this
	/// command is a no-op and exits successfully.
	Init,
	/// Preview the injections without writing any file.
	///
	/// Runs both strategies over the asset directory and reports which files
	/// would receive a banner and how many inline tag regions would be
	/// replaced, leaving everything on disk untouched.
	///
	/// Use `--diff` to see exactly what would change and `--format` to
	/// control the output style.
	Check {
		/// Show a unified diff for each file that would change, highlighting
		/// the differences between current and injected content.
		#[arg(long, default_value_t = false)]
		diff: bool,

		/// Output format for check results. Use `text` for human-readable
		/// output or `json` for programmatic consumption.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,

		/// Directory of built assets to scan, relative to the project root.
		/// Defaults to the project root itself.
		directory: Option<PathBuf>,
	},
	/// Inject the version banner and inline tags into the built assets.
	///
	/// Prepends a comment banner to every script, markup, and stylesheet
	/// asset and replaces `[AIV]...[/AIV]` regions in files matching the
	/// configured filename pattern, then writes the results back to disk.
	///
	/// Use `--dry-run` to preview the affected files without writing.
	Inject {
		/// Preview changes without writing files. Prints which files would
		/// be modified.
		#[arg(long, default_value_t = false)]
		dry_run: bool,

		/// Directory of built assets to scan, relative to the project root.
		/// Defaults to the project root itself.
		directory: Option<PathBuf>,
	},
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output with colors and formatting.
	Text,
	/// JSON output for programmatic consumption. Includes every planned
	/// banner and inline replacement count per file.
	Json,
}
