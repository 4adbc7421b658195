use crate::AivResult;
use crate::AssetBuffer;
use crate::InjectionContext;
use crate::SHORT;
use crate::TagRegistry;
use crate::tags::resolve;

/// Line terminator appended after every injected banner.
pub const LINE_TERMINATOR: &str = if cfg!(windows) { "\r\n" } else { "\n" };

/// Asset families the banner strategy knows a comment syntax for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
	/// `js`, `mjs`, `cjs`: `//` line or `/** */` block comments.
	Script,
	/// `html`, `htm`: `<!-- -->` comments.
	Markup,
	/// `css`: `/** **/` comments.
	Stylesheet,
}

impl AssetKind {
	/// Dispatch on an extension, normalized first. Returns `None` for
	/// extensions without a known comment syntax.
	pub fn from_extension(extension: &str) -> Option<Self> {
		match normalize_extension(extension) {
			"js" | "mjs" | "cjs" => Some(Self::Script),
			"html" | "htm" => Some(Self::Markup),
			"css" => Some(Self::Stylesheet),
			_ => None,
		}
	}

	/// Stable lowercase name used in reports.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Script => "script",
			Self::Markup => "markup",
			Self::Stylesheet => "stylesheet",
		}
	}
}

impl std::fmt::Display for AssetKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Strip a leading dot and any query-string suffix from an extension.
///
/// Emitted filenames may carry cache-busting parameters (`main.css?hash=123`),
/// so everything from the first `?` onward is ignored.
pub fn normalize_extension(extension: &str) -> &str {
	let trimmed = extension.strip_prefix('.').unwrap_or(extension);
	match trimmed.split_once('?') {
		Some((ext, _)) => ext,
		None => trimmed,
	}
}

/// Build the banner for one asset kind: the configured tag template expanded
/// through the registry, wrapped in the kind's comment syntax.
pub fn banner_text(kind: AssetKind, context: &InjectionContext, registry: &TagRegistry) -> String {
	let resolved = resolve(&context.config.banner.tag, context, registry);
	let (open, close) = match kind {
		AssetKind::Script if context.config.banner.multi_line_comment_type => ("/**", "*/ "),
		AssetKind::Script => ("//", " "),
		AssetKind::Markup => ("<!--", " --> "),
		AssetKind::Stylesheet => ("/**", " **/ "),
	};

	format!("{open} [{SHORT}] {resolved}{close}")
}

/// Prepend the banner for `extension` to `buffer`.
///
/// The banner and a line terminator are inserted at offset 0; existing
/// content is preserved and shifted. Extensions without a comment syntax
/// leave the buffer untouched and report `None`.
pub fn inject_banner(
	extension: &str,
	buffer: &mut AssetBuffer,
	context: &InjectionContext,
	registry: &TagRegistry,
) -> AivResult<Option<AssetKind>> {
	let Some(kind) = AssetKind::from_extension(extension) else {
		return Ok(None);
	};

	let banner = banner_text(kind, context, registry);
	buffer.insert(0, format!("{banner}{LINE_TERMINATOR}"))?;

	Ok(Some(kind))
}
