use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

use tracing::info;

use crate::AivError;
use crate::AivResult;
use crate::AssetBuffer;
use crate::AssetKind;
use crate::InjectionContext;
use crate::InlineOptions;
use crate::TagRegistry;
use crate::banner::inject_banner;
use crate::inline::inject_inline;

/// One output file eligible for injection.
#[derive(Debug)]
pub struct Asset {
	/// Path relative to the scanned root with `/` separators, used for
	/// filename matching and reporting.
	pub filename: String,
	/// Location on disk.
	pub path: PathBuf,
	/// The file's text plus any recorded edits.
	pub buffer: AssetBuffer,
}

/// A banner injected into one asset.
#[derive(Debug)]
pub struct BannerRecord {
	pub filename: String,
	pub kind: AssetKind,
	pub version: String,
}

/// Inline replacement count for one asset selected by the filename pattern.
/// Recorded even when the count is zero.
#[derive(Debug)]
pub struct InlineRecord {
	pub filename: String,
	pub replaced: usize,
}

/// Outcome of one injection run.
#[derive(Debug, Default)]
pub struct InjectionReport {
	/// Banner injections, one per asset with a known comment syntax.
	pub banners: Vec<BannerRecord>,
	/// Inline match counts, one per asset selected by the filename pattern.
	pub inline: Vec<InlineRecord>,
	/// Files whose content changed, with their new text.
	pub updated_files: BTreeMap<PathBuf, String>,
}

impl InjectionReport {
	/// Returns true when no asset would change.
	pub fn is_empty(&self) -> bool {
		self.updated_files.is_empty()
	}

	/// Total number of inline replacements across all assets.
	pub fn replaced_total(&self) -> usize {
		self.inline.iter().map(|entry| entry.replaced).sum()
	}
}

/// Enumerate output assets under `root` in deterministic sorted order.
///
/// Hidden entries and common non-output directories are skipped, as are
/// files whose content is not valid UTF-8 (images and other binary assets).
pub fn enumerate_assets(root: &Path) -> AivResult<Vec<Asset>> {
	let mut files = Vec::new();
	let mut visited_dirs = HashSet::new();
	walk_dir(root, &mut files, &mut visited_dirs)?;
	// Sort for deterministic ordering.
	files.sort();

	let mut assets = Vec::new();
	for path in files {
		let text = match std::fs::read_to_string(&path) {
			Ok(text) => text,
			Err(error) if error.kind() == std::io::ErrorKind::InvalidData => continue,
			Err(error) => return Err(error.into()),
		};
		let filename = path
			.strip_prefix(root)
			.unwrap_or(&path)
			.to_string_lossy()
			.replace('\\', "/");
		assets.push(Asset {
			filename,
			path,
			buffer: AssetBuffer::new(text),
		});
	}

	Ok(assets)
}

fn is_ignored_name(name: &str) -> bool {
	name.starts_with('.') || name == "node_modules" || name == "target"
}

fn walk_dir(
	dir: &Path,
	files: &mut Vec<PathBuf>,
	visited_dirs: &mut HashSet<PathBuf>,
) -> AivResult<()> {
	if !dir.is_dir() {
		return Ok(());
	}

	// Detect symlink cycles by tracking canonical paths.
	let canonical = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
	if !visited_dirs.insert(canonical) {
		return Err(AivError::SymlinkCycle {
			path: dir.display().to_string(),
		});
	}

	let entries = std::fs::read_dir(dir)?;

	for entry in entries {
		let entry = entry?;
		let path = entry.path();

		if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
			if is_ignored_name(name) {
				continue;
			}
		}

		if path.is_dir() {
			walk_dir(&path, files, visited_dirs)?;
		} else if path.is_file() {
			files.push(path);
		}
	}

	Ok(())
}

/// Run the enabled strategies over `assets` and report what changed.
///
/// The two strategies execute as separate passes over the whole asset set,
/// banner first. The banner pass is sealed into each buffer before the
/// inline pass scans, so the inline strategy sees banner edits as part of
/// the serialized text.
pub fn run(
	mut assets: Vec<Asset>,
	context: &InjectionContext,
	registry: &TagRegistry,
) -> AivResult<InjectionReport> {
	context.config.validate()?;
	let options = InlineOptions::new(&context.config.inline)?;

	let mut report = InjectionReport::default();
	let mut touched: BTreeSet<PathBuf> = BTreeSet::new();

	if context.config.banner.enabled {
		for asset in &mut assets {
			let extension = file_extension(&asset.filename);
			let kind = inject_banner(&extension, &mut asset.buffer, context, registry)?;
			// One line per visited file, whether or not a banner went in.
			info!(
				"banner: match: {}: injected: {}",
				asset.filename, context.version
			);
			let Some(kind) = kind else {
				continue;
			};
			report.banners.push(BannerRecord {
				filename: asset.filename.clone(),
				kind,
				version: context.version.clone(),
			});
		}

		// Seal the banner pass before the inline scan.
		for asset in &mut assets {
			if asset.buffer.is_modified() {
				touched.insert(asset.path.clone());
				asset.buffer = AssetBuffer::new(asset.buffer.to_text());
			}
		}
	}

	if context.config.inline.enabled {
		for asset in &mut assets {
			let Some(replaced) =
				inject_inline(&mut asset.buffer, &asset.filename, context, registry, &options)?
			else {
				continue;
			};
			info!("inline: match: {}: replaced: {replaced}", asset.filename);
			report.inline.push(InlineRecord {
				filename: asset.filename.clone(),
				replaced,
			});
		}
	}

	for asset in assets {
		if asset.buffer.is_modified() || touched.contains(&asset.path) {
			report.updated_files.insert(asset.path, asset.buffer.to_text());
		}
	}

	Ok(report)
}

/// Write the updated contents back to disk. Untouched assets are not
/// rewritten.
pub fn write_assets(report: &InjectionReport) -> AivResult<()> {
	for (path, content) in &report.updated_files {
		std::fs::write(path, content)?;
	}

	Ok(())
}

fn file_extension(filename: &str) -> String {
	Path::new(filename)
		.extension()
		.map(|ext| ext.to_string_lossy().into_owned())
		.unwrap_or_default()
}
