use std::path::Path;
use std::path::PathBuf;

use chrono::format::Item;
use chrono::format::StrftimeItems;
use serde::Deserialize;

use crate::AivError;
use crate::AivResult;

/// Short product tag stamped into every banner and used for the sentinel
/// markers recognized by the inline strategy.
pub const SHORT: &str = "AIV";

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = ["aiv.toml", ".aiv.toml", ".config/aiv.toml"];

/// Configuration loaded from an `aiv.toml` file.
///
/// Every field has a default, so an absent config file means an all-default
/// run:
///
/// ```toml
/// package_file = "package.json"
/// date_format = "%B %-d, %Y"
///
/// [banner]
/// enabled = true
/// tag = "Build version: {version} - {date}"
/// multi_line_comment_type = false
///
/// [inline]
/// enabled = true
/// file_regex = '\.+'
/// aiv_tag_regexp = '\[AIV\][\s\S]*?\[/AIV\]'
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct AivConfig {
	/// Manifest file the injected version is read from when no explicit
	/// override is given. JSON and TOML manifests are supported, including a
	/// Cargo-style `[package]` table.
	#[serde(default = "default_package_file")]
	pub package_file: PathBuf,
	/// chrono strftime format used by the `{date}` tag in both strategies.
	#[serde(default = "default_date_format")]
	pub date_format: String,
	/// Comment banner strategy options.
	#[serde(default)]
	pub banner: BannerConfig,
	/// Inline sentinel-tag strategy options.
	#[serde(default)]
	pub inline: InlineConfig,
}

/// Options for the comment banner strategy.
#[derive(Debug, Clone, Deserialize)]
pub struct BannerConfig {
	/// Toggle the strategy without removing its options.
	#[serde(default = "default_enabled")]
	pub enabled: bool,
	/// Template expanded through the tag registry and wrapped in the comment
	/// syntax selected by each asset's extension.
	#[serde(default = "default_tag")]
	pub tag: String,
	/// Use a `/** ... */` block comment instead of a `//` line comment for
	/// script assets.
	#[serde(default)]
	pub multi_line_comment_type: bool,
}

/// Options for the inline sentinel-tag strategy.
#[derive(Debug, Clone, Deserialize)]
pub struct InlineConfig {
	/// Toggle the strategy without removing its options.
	#[serde(default = "default_enabled")]
	pub enabled: bool,
	/// Pattern selecting which filenames the strategy processes. The default
	/// matches any filename containing a dot.
	#[serde(default = "default_file_regex")]
	pub file_regex: String,
	/// Pattern identifying sentinel-wrapped regions. Rejected if it can
	/// match an empty string.
	#[serde(default = "default_aiv_tag_regexp")]
	pub aiv_tag_regexp: String,
}

impl Default for AivConfig {
	fn default() -> Self {
		Self {
			package_file: default_package_file(),
			date_format: default_date_format(),
			banner: BannerConfig::default(),
			inline: InlineConfig::default(),
		}
	}
}

impl Default for BannerConfig {
	fn default() -> Self {
		Self {
			enabled: default_enabled(),
			tag: default_tag(),
			multi_line_comment_type: false,
		}
	}
}

impl Default for InlineConfig {
	fn default() -> Self {
		Self {
			enabled: default_enabled(),
			file_regex: default_file_regex(),
			aiv_tag_regexp: default_aiv_tag_regexp(),
		}
	}
}

fn default_package_file() -> PathBuf {
	PathBuf::from("package.json")
}

fn default_date_format() -> String {
	"%B %-d, %Y".to_string()
}

fn default_enabled() -> bool {
	true
}

fn default_tag() -> String {
	"Build version: {version} - {date}".to_string()
}

fn default_file_regex() -> String {
	r"\.+".to_string()
}

fn default_aiv_tag_regexp() -> String {
	r"\[AIV\][\s\S]*?\[/AIV\]".to_string()
}

impl AivConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> AivResult<Option<AivConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config: AivConfig =
			toml::from_str(&content).map_err(|e| AivError::ConfigParse(e.to_string()))?;
		config.validate()?;

		Ok(Some(config))
	}

	/// Check that the configured date format is renderable. chrono reports
	/// bad specifiers only while formatting, which is too late to fail
	/// gracefully, so the format string is checked up front.
	pub fn validate(&self) -> AivResult<()> {
		let has_error =
			StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error));
		if has_error {
			return Err(AivError::DateFormat(self.date_format.clone()));
		}

		Ok(())
	}
}

/// Resolve the version to inject: an explicit override wins, otherwise the
/// `version` field of the configured manifest.
pub fn resolve_version(
	root: &Path,
	config: &AivConfig,
	override_version: Option<&str>,
) -> AivResult<String> {
	if let Some(version) = override_version {
		return Ok(version.to_string());
	}

	let manifest_path = root.join(&config.package_file);
	let display = config.package_file.display().to_string();
	let content = std::fs::read_to_string(&manifest_path).map_err(|e| AivError::VersionFile {
		path: display.clone(),
		reason: e.to_string(),
	})?;

	let format = manifest_path
		.extension()
		.and_then(|e| e.to_str())
		.unwrap_or("")
		.to_ascii_lowercase();

	let version = match format.as_str() {
		"json" => {
			let value: serde_json::Value =
				serde_json::from_str(&content).map_err(|e| AivError::VersionFile {
					path: display.clone(),
					reason: e.to_string(),
				})?;
			value
				.get("version")
				.and_then(serde_json::Value::as_str)
				.map(str::to_string)
		}
		"toml" => {
			let value: toml::Value =
				toml::from_str(&content).map_err(|e| AivError::VersionFile {
					path: display.clone(),
					reason: e.to_string(),
				})?;
			manifest_toml_version(&value)
		}
		other => return Err(AivError::UnsupportedManifestFormat(other.to_string())),
	};

	version.ok_or(AivError::MissingVersion(display))
}

/// Read `version` from a TOML manifest, checking the top level first and
/// then a Cargo-style `[package]` table.
fn manifest_toml_version(value: &toml::Value) -> Option<String> {
	let top_level = value.get("version").and_then(toml::Value::as_str);
	let package = value
		.get("package")
		.and_then(|package| package.get("version"))
		.and_then(toml::Value::as_str);

	top_level.or(package).map(str::to_string)
}
