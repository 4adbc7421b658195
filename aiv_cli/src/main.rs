use std::path::Path;
use std::path::PathBuf;
use std::process;

use aiv_cli::AivCli;
use aiv_cli::Commands;
use aiv_cli::OutputFormat;
use aiv_core::AivConfig;
use aiv_core::AivError;
use aiv_core::InjectionContext;
use aiv_core::InjectionReport;
use aiv_core::TagRegistry;
use aiv_core::enumerate_assets;
use aiv_core::resolve_version;
use aiv_core::run;
use aiv_core::write_assets;
use clap::Parser;
use owo_colors::OwoColorize;
use similar::ChangeTag;
use similar::TextDiff;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = AivCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_tracing(args.verbose);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match &args.command {
		Some(Commands::Init) => run_init(&args),
		Some(Commands::Check {
			diff,
			format,
			directory,
		}) => run_check(&args, *diff, *format, directory.as_deref()),
		Some(Commands::Inject { dry_run, directory }) => {
			run_inject(&args, *dry_run, directory.as_deref())
		}
		None => {
			eprintln!("No subcommand specified. Run `aiv --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<AivError>() {
			Ok(aiv_err) => {
				let report: miette::Report = (*aiv_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

fn init_tracing(verbose: bool) {
	let default_level = if verbose { "info" } else { "warn" };
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}

fn resolve_root(args: &AivCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Load config, resolve the version, and run both strategies over the asset
/// directory without writing anything. Shared by `check` and `inject`.
fn plan_injection(
	args: &AivCli,
	directory: Option<&Path>,
) -> Result<(PathBuf, InjectionReport), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let scan_root = match directory {
		Some(dir) => root.join(dir),
		None => root.clone(),
	};

	let config = AivConfig::load(&root)?.unwrap_or_default();
	let version = resolve_version(&root, &config, args.app_version.as_deref())?;
	let context = InjectionContext::new(version, config);
	let registry = TagRegistry::standard();

	let assets = enumerate_assets(&scan_root)?;
	let report = run(assets, &context, &registry)?;

	Ok((scan_root, report))
}

fn run_init(args: &AivCli) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let config_path = root.join("aiv.toml");

	if config_path.exists() {
		println!("Config file already exists: {}", config_path.display());
		return Ok(());
	}

	let sample_config = "# aiv configuration\n# Every value below is the default.\n\n# Package \
	                     manifest the injected version is read from (json or \
	                     toml).\npackage_file = \"package.json\"\n\n# strftime format used by \
	                     the {date} tag.\ndate_format = \"%B %-d, %Y\"\n\n[banner]\n# Prepend a \
	                     comment banner to every script, markup, and stylesheet \
	                     asset.\nenabled = true\ntag = \"Build version: {version} - \
	                     {date}\"\n# Use /** ... */ instead of // for script \
	                     assets.\nmulti_line_comment_type = false\n\n[inline]\n# Replace \
	                     [AIV]...[/AIV] regions inside files matching file_regex.\nenabled = \
	                     true\nfile_regex = '\\.+'\naiv_tag_regexp = \
	                     '\\[AIV\\][\\s\\S]*?\\[/AIV\\]'\n";

	std::fs::write(&config_path, sample_config)?;
	println!("Created aiv.toml");
	println!();
	println!("Next steps:");
	println!("  1. Preview the injections for your build output: `aiv check dist`");
	println!("  2. Optionally add [AIV]version={{version}}[/AIV] regions to your sources");
	println!("  3. Run `aiv inject dist` after each build to stamp the assets");

	Ok(())
}

fn run_check(
	args: &AivCli,
	show_diff: bool,
	format: OutputFormat,
	directory: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
	let (scan_root, report) = plan_injection(args, directory)?;

	match format {
		OutputFormat::Json => print_check_json(&scan_root, &report),
		OutputFormat::Text => print_check_text(&scan_root, &report, show_diff)?,
	}

	Ok(())
}

fn print_check_json(scan_root: &Path, report: &InjectionReport) {
	let banners: Vec<serde_json::Value> = report
		.banners
		.iter()
		.map(|record| {
			serde_json::json!({
				"file": record.filename,
				"kind": record.kind.as_str(),
				"version": record.version,
			})
		})
		.collect();
	let inline: Vec<serde_json::Value> = report
		.inline
		.iter()
		.map(|record| {
			serde_json::json!({
				"file": record.filename,
				"replaced": record.replaced,
			})
		})
		.collect();
	let changed: Vec<String> = report
		.updated_files
		.keys()
		.map(|path| make_relative(path, scan_root))
		.collect();

	let output = serde_json::json!({
		"changed": changed,
		"banners": banners,
		"inline": inline,
	});
	println!("{output}");
}

fn print_check_text(
	scan_root: &Path,
	report: &InjectionReport,
	show_diff: bool,
) -> Result<(), Box<dyn std::error::Error>> {
	if report.is_empty() {
		println!("{} nothing to inject.", colored!("warning:", yellow));
		return Ok(());
	}

	if !report.banners.is_empty() {
		println!("{}", colored!("Banners:", bold));
		for record in &report.banners {
			println!(
				"  {} [{}] version {}",
				record.filename, record.kind, record.version
			);
		}
	}

	let replaced: Vec<_> = report
		.inline
		.iter()
		.filter(|record| record.replaced > 0)
		.collect();
	if !replaced.is_empty() {
		if !report.banners.is_empty() {
			println!();
		}
		println!("{}", colored!("Inline tags:", bold));
		for record in replaced {
			println!("  {} {} region(s)", record.filename, record.replaced);
		}
	}

	if show_diff {
		for (path, updated) in &report.updated_files {
			let current = std::fs::read_to_string(path)?;
			println!();
			println!("{}", colored!(make_relative(path, scan_root), bold));
			print_diff(&current, updated);
		}
	}

	println!();
	println!(
		"{} banner(s) and {} inline region(s) across {} file(s). Run `aiv inject` to write.",
		report.banners.len(),
		report.replaced_total(),
		report.updated_files.len()
	);

	Ok(())
}

fn run_inject(
	args: &AivCli,
	dry_run: bool,
	directory: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
	let (scan_root, report) = plan_injection(args, directory)?;

	if report.is_empty() {
		println!("{} nothing to inject.", colored!("warning:", yellow));
		return Ok(());
	}

	if dry_run {
		println!(
			"Dry run: would inject {} banner(s) and {} inline region(s) in {} file(s):",
			report.banners.len(),
			report.replaced_total(),
			report.updated_files.len()
		);
		for path in report.updated_files.keys() {
			println!("  {}", make_relative(path, &scan_root));
		}
		return Ok(());
	}

	write_assets(&report)?;
	println!(
		"Injected {} banner(s) and {} inline region(s) across {} file(s).",
		report.banners.len(),
		report.replaced_total(),
		report.updated_files.len()
	);

	if args.verbose {
		for path in report.updated_files.keys() {
			println!("  {}", make_relative(path, &scan_root));
		}
	}

	Ok(())
}

/// Print a unified diff between two strings, colorized.
fn print_diff(current: &str, expected: &str) {
	let diff = TextDiff::from_lines(current, expected);
	for change in diff.iter_all_changes() {
		match change.tag() {
			ChangeTag::Delete => {
				print!("  {}", colored!(format!("-{change}"), red));
			}
			ChangeTag::Insert => {
				print!("  {}", colored!(format!("+{change}"), green));
			}
			ChangeTag::Equal => {
				print!("   {change}");
			}
		}
	}
}

/// Make a path relative to root for display purposes.
fn make_relative(path: &Path, root: &Path) -> String {
	path.strip_prefix(root)
		.unwrap_or(path)
		.display()
		.to_string()
}
