use crate::AivConfig;

/// Immutable per-run value handed to every tag resolver and strategy.
///
/// Constructed once per run from the resolved version and the merged
/// configuration, then only ever borrowed.
#[derive(Debug, Clone)]
pub struct InjectionContext {
	/// The version string substituted for the `{version}` tag.
	pub version: String,
	/// Merged configuration for the run.
	pub config: AivConfig,
}

impl InjectionContext {
	pub fn new(version: impl Into<String>, config: AivConfig) -> Self {
		Self {
			version: version.into(),
			config,
		}
	}
}
