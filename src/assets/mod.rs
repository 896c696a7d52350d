//! Notification sound assets.
//!
//! - [`spec`]: per-asset configuration records (tones, arrangements)
//! - [`catalog`]: the built-in soft and bell sound sets, JSON loading
//! - [`generate`]: renders a catalog into WAV files
//! - [`report`]: what was written

pub mod catalog;
pub mod generate;
pub mod report;
pub mod spec;

pub use catalog::{Catalog, Style};
pub use generate::{generate_all, generate_all_to, generate_asset, render_asset};
pub use report::GeneratedAsset;
pub use spec::{Arrangement, AssetSpec, Segment, ToneSpec};
