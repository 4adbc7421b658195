//! `aiv_core` is the engine behind the [aiv](https://github.com/ifiokjr/aiv)
//! build version injector. It stamps the package version and build date into
//! bundled output files, either by prepending a comment banner chosen per
//! asset kind or by replacing `[AIV]...[/AIV]` regions left in the sources.
//!
//! A run wraps every file under the output directory in an [`AssetBuffer`],
//! applies the banner strategy and then the inline strategy, and collects the
//! results into an [`InjectionReport`] that [`write_assets`] persists.

pub use banner::*;
pub use buffer::*;
pub use config::*;
pub use context::*;
pub use error::*;
pub use inline::*;
pub use pipeline::*;
pub use tags::*;

pub mod banner;
mod buffer;
pub mod config;
mod context;
mod error;
pub mod inline;
mod pipeline;
pub mod tags;

#[cfg(test)]
mod __fixtures;
