//! URL handling module for Site-Crawler
//!
//! This module provides crawl target construction, host comparison and the
//! reference normalizer that classifies every discovered link.

mod domain;
mod normalize;
mod target;

// Re-export main functions
pub use domain::{authority, is_same_domain, strip_www};
pub use normalize::{
    canonicalize, is_image_path, is_script_or_style_path, normalize_reference, strip_trailing_slash,
    IgnoreReason, Normalized, NormalizedRef,
};
pub use target::CrawlTarget;

/// Link classification types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LinkClass {
    /// Navigable page on the crawl's own host - will be followed
    Internal,
    /// Reference to another host - recorded, never fetched
    External,
    /// Image asset on any host - recorded, never fetched
    Media,
}
