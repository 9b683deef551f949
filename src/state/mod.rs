//! State module for tracking crawl progress
//!
//! This module provides the per-run bookkeeping the traversal engine owns.
//!
//! # Components
//!
//! - `PageState`: How a claimed page finished (expanded, duplicate, dead, ...)
//! - `VisitedState`: The claimed-URL and seen-fingerprint sets for one crawl

mod page_state;
mod visited;

// Re-export main types
pub use page_state::PageState;
pub use visited::VisitedState;
