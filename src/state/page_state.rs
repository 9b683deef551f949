/// Page state definitions for tracking crawl progress
///
/// Every URL the engine claims ends in exactly one of these states.
use serde::Serialize;
use std::fmt;

/// Represents how a claimed page left the crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageState {
    // ===== Terminal Success States =====
    /// Page was fetched, its links extracted and merged
    Expanded,

    // ===== Terminal Skip States =====
    /// Body was byte-identical to a page already expanded
    DuplicateContent,

    /// Loaded fine but is not HTML (PDF, feed, image...)
    NonHtml,

    /// Redirected to another host; not expanded
    OffHostRedirect,

    /// Fetch was cut short by the crawl deadline
    Abandoned,

    // ===== Terminal Error States =====
    /// Page returned HTTP 404
    DeadLink,

    /// Non-404 HTTP error or transport failure
    Failed,
}

impl PageState {
    /// All states, in display order
    pub const ALL: [PageState; 7] = [
        Self::Expanded,
        Self::DuplicateContent,
        Self::NonHtml,
        Self::OffHostRedirect,
        Self::Abandoned,
        Self::DeadLink,
        Self::Failed,
    ];

    /// Returns true if this represents a successful completion
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Expanded)
    }

    /// Returns true if this represents an error state
    pub fn is_error(&self) -> bool {
        matches!(self, Self::DeadLink | Self::Failed)
    }

    /// Stable snake_case label
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expanded => "expanded",
            Self::DuplicateContent => "duplicate_content",
            Self::NonHtml => "non_html",
            Self::OffHostRedirect => "off_host_redirect",
            Self::Abandoned => "abandoned",
            Self::DeadLink => "dead_link",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
