use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum AivError {
	#[error(transparent)]
	#[diagnostic(code(aiv::io_error))]
	Io(#[from] std::io::Error),

	#[error("symlink cycle detected at: `{path}`")]
	#[diagnostic(
		code(aiv::symlink_cycle),
		help("remove the circular symlink from the output directory")
	)]
	SymlinkCycle { path: String },

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(aiv::config_parse),
		help("check that aiv.toml is valid TOML with optional [banner] and [inline] sections")
	)]
	ConfigParse(String),

	#[error("invalid pattern for `{option}`: {reason}")]
	#[diagnostic(
		code(aiv::invalid_pattern),
		help("the value must be a valid regular expression")
	)]
	InvalidPattern { option: String, reason: String },

	#[error("pattern for `{0}` can match an empty string")]
	#[diagnostic(
		code(aiv::zero_length_pattern),
		help(
			"a pattern that matches zero characters selects nothing to replace; anchor it to the \
			 literal sentinel markers, e.g. `\\[AIV\\][\\s\\S]*?\\[/AIV\\]`"
		)
	)]
	ZeroLengthPattern(String),

	#[error("invalid date format: `{0}`")]
	#[diagnostic(
		code(aiv::date_format),
		help("use chrono strftime specifiers, e.g. `%Y-%m-%d` or `%B %-d, %Y`")
	)]
	DateFormat(String),

	#[error("failed to read version from `{path}`: {reason}")]
	#[diagnostic(code(aiv::version_file))]
	VersionFile { path: String, reason: String },

	#[error("no version found in `{0}`")]
	#[diagnostic(
		code(aiv::missing_version),
		help("add a `version` field to the manifest or pass `--app-version`")
	)]
	MissingVersion(String),

	#[error("unsupported manifest format: `{0}`")]
	#[diagnostic(
		code(aiv::unsupported_format),
		help("supported manifest formats: json, toml")
	)]
	UnsupportedManifestFormat(String),

	#[error("edit range {start}..{end} is out of bounds or splits a character")]
	#[diagnostic(code(aiv::edit_bounds))]
	InvalidEditRange { start: usize, end: usize },

	#[error("edit range {start}..{end} overlaps an earlier edit")]
	#[diagnostic(
		code(aiv::overlapping_edit),
		help("match spans must be collected against the original text and kept disjoint")
	)]
	OverlappingEdit { start: usize, end: usize },
}

pub type AivResult<T> = Result<T, AivError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
