use crate::AivConfig;
use crate::BannerConfig;
use crate::InjectionContext;
use crate::InlineConfig;
use crate::InlineOptions;
use crate::TagRegistry;

pub(crate) fn version_context(version: &str) -> InjectionContext {
	InjectionContext::new(version, AivConfig::default())
}

pub(crate) fn banner_context(version: &str, tag: &str) -> InjectionContext {
	let config = AivConfig {
		banner: BannerConfig {
			tag: tag.into(),
			..BannerConfig::default()
		},
		..AivConfig::default()
	};
	InjectionContext::new(version, config)
}

pub(crate) fn block_banner_context(version: &str, tag: &str) -> InjectionContext {
	let config = AivConfig {
		banner: BannerConfig {
			tag: tag.into(),
			multi_line_comment_type: true,
			..BannerConfig::default()
		},
		..AivConfig::default()
	};
	InjectionContext::new(version, config)
}

pub(crate) fn standard_registry() -> TagRegistry {
	TagRegistry::standard()
}

pub(crate) fn inline_options() -> InlineOptions {
	InlineOptions::new(&InlineConfig::default()).unwrap_or_else(|e| panic!("inline options: {e}"))
}

pub(crate) fn inline_options_for(file_regex: &str) -> InlineOptions {
	let config = InlineConfig {
		file_regex: file_regex.into(),
		..InlineConfig::default()
	};
	InlineOptions::new(&config).unwrap_or_else(|e| panic!("inline options: {e}"))
}
