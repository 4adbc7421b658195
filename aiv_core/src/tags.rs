use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::Local;
use regex::Captures;
use regex::Regex;
use tracing::error;

use crate::InjectionContext;

/// Produces the replacement text for one tag identifier.
pub type TagResolverFn = fn(&InjectionContext) -> String;

/// The placeholder grammar: a bare ASCII-alphabetic identifier in braces.
static TAG_PATTERN: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\{([a-zA-Z]+)\}").expect("tag pattern is a valid regex"));

/// Immutable mapping from tag identifier to resolver function.
///
/// Built once at startup and passed by reference wherever templates are
/// resolved. New tag kinds are added by registering entries before first
/// use:
///
/// ```rust
/// use aiv_core::AivConfig;
/// use aiv_core::InjectionContext;
/// use aiv_core::TagRegistry;
/// use aiv_core::resolve;
///
/// fn build_host(_: &InjectionContext) -> String {
/// 	"ci-01".to_string()
/// }
///
/// let mut registry = TagRegistry::standard();
/// registry.register("host", build_host);
///
/// let context = InjectionContext::new("1.2.3", AivConfig::default());
/// assert_eq!(resolve("{version}+{host}", &context, &registry), "1.2.3+ci-01");
/// ```
#[derive(Debug, Clone, Default)]
pub struct TagRegistry {
	entries: BTreeMap<String, TagResolverFn>,
}

impl TagRegistry {
	/// Create an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a registry with the standard `version` and `date` tags.
	pub fn standard() -> Self {
		let mut registry = Self::new();
		registry.register("version", resolve_version_tag);
		registry.register("date", resolve_date_tag);
		registry
	}

	/// Register a resolver under `name`, replacing any existing entry.
	pub fn register(&mut self, name: impl Into<String>, resolver: TagResolverFn) {
		self.entries.insert(name.into(), resolver);
	}

	pub fn get(&self, name: &str) -> Option<TagResolverFn> {
		self.entries.get(name).copied()
	}

	pub fn contains(&self, name: &str) -> bool {
		self.entries.contains_key(name)
	}

	/// Registered identifiers in sorted order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.entries.keys().map(String::as_str)
	}
}

fn resolve_version_tag(context: &InjectionContext) -> String {
	context.version.clone()
}

fn resolve_date_tag(context: &InjectionContext) -> String {
	Local::now().format(&context.config.date_format).to_string()
}

/// Expand every `{identifier}` placeholder in `template`.
///
/// Unknown identifiers are reported at error level and left in place
/// verbatim; a template typo never aborts the run.
pub fn resolve(template: &str, context: &InjectionContext, registry: &TagRegistry) -> String {
	resolve_with_diagnostics(template, context, registry).0
}

/// Expand `template`, also returning the unknown identifiers encountered in
/// order of appearance, one entry per occurrence.
pub fn resolve_with_diagnostics(
	template: &str,
	context: &InjectionContext,
	registry: &TagRegistry,
) -> (String, Vec<String>) {
	let mut unknown = Vec::new();
	let resolved = TAG_PATTERN
		.replace_all(template, |caps: &Captures| {
			let name = &caps[1];
			match registry.get(name) {
				Some(resolver) => resolver(context),
				None => {
					error!("unsupported tag in template [{name}]");
					unknown.push(name.to_string());
					caps[0].to_string()
				}
			}
		})
		.into_owned();

	(resolved, unknown)
}
