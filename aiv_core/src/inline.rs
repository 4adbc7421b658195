use regex::Regex;

use crate::AivError;
use crate::AivResult;
use crate::AssetBuffer;
use crate::InjectionContext;
use crate::SHORT;
use crate::TagRegistry;
use crate::config::InlineConfig;

/// Compiled and validated patterns for the inline strategy.
///
/// Construction fails on malformed patterns and on sentinel patterns that
/// can match an empty string, so neither ever reaches the scan below.
#[derive(Debug, Clone)]
pub struct InlineOptions {
	file_regex: Regex,
	tag_regex: Regex,
}

impl InlineOptions {
	pub fn new(config: &InlineConfig) -> AivResult<Self> {
		let file_regex = compile_pattern("inline.file_regex", &config.file_regex)?;
		let tag_regex = compile_pattern("inline.aiv_tag_regexp", &config.aiv_tag_regexp)?;

		if tag_regex.is_match("") {
			return Err(AivError::ZeroLengthPattern(
				"inline.aiv_tag_regexp".to_string(),
			));
		}

		Ok(Self {
			file_regex,
			tag_regex,
		})
	}

	/// Returns true when the inline strategy applies to `filename`.
	pub fn matches_file(&self, filename: &str) -> bool {
		self.file_regex.is_match(filename)
	}
}

fn compile_pattern(option: &str, pattern: &str) -> AivResult<Regex> {
	Regex::new(pattern).map_err(|e| AivError::InvalidPattern {
		option: option.to_string(),
		reason: e.to_string(),
	})
}

/// Replace every sentinel region in `buffer` with its resolved text.
///
/// Returns `None` when `filename` is not selected by the file pattern, and
/// the number of regions replaced otherwise. All match spans are collected
/// against the buffer's original text before any edit is recorded, so
/// earlier replacements never shift later spans.
pub fn inject_inline(
	buffer: &mut AssetBuffer,
	filename: &str,
	context: &InjectionContext,
	registry: &TagRegistry,
	options: &InlineOptions,
) -> AivResult<Option<usize>> {
	if !options.matches_file(filename) {
		return Ok(None);
	}

	let mut regions = Vec::new();
	for found in options.tag_regex.find_iter(buffer.original()) {
		if found.is_empty() {
			return Err(AivError::ZeroLengthPattern(
				"inline.aiv_tag_regexp".to_string(),
			));
		}
		regions.push((found.start(), found.end(), found.as_str().to_string()));
	}

	for (start, end, matched) in &regions {
		let replacement = resolve_region(matched, context, registry);
		buffer.replace(*start, *end, replacement)?;
	}

	Ok(Some(regions.len()))
}

/// Resolve one matched sentinel region: substitute the `version` and `date`
/// tags, then strip the sentinel markers wherever they appear in the match.
fn resolve_region(matched: &str, context: &InjectionContext, registry: &TagRegistry) -> String {
	let mut resolved = matched.to_string();

	if let Some(version) = registry.get("version") {
		resolved = resolved.replace("{version}", &version(context));
	}
	if let Some(date) = registry.get("date") {
		resolved = resolved.replace("{date}", &date(context));
	}

	resolved
		.replace(&format!("[{SHORT}]"), "")
		.replace(&format!("[/{SHORT}]"), "")
}
