use crate::crawler::ContentFingerprint;
use std::collections::HashSet;

/// URLs claimed for visiting and fingerprints already expanded, for one crawl
///
/// Owned by the crawl coordinator and dropped when the crawl returns. Both
/// operations are test-and-set, so a URL or a body is only ever accepted once.
#[derive(Debug, Default)]
pub struct VisitedState {
    urls: HashSet<String>,
    fingerprints: HashSet<ContentFingerprint>,
}

impl VisitedState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `url`; returns false if it was already claimed
    pub fn claim_url(&mut self, url: &str) -> bool {
        if self.urls.contains(url) {
            return false;
        }
        self.urls.insert(url.to_string())
    }

    /// Records `fingerprint`; returns false if the same content was seen before
    pub fn claim_fingerprint(&mut self, fingerprint: &ContentFingerprint) -> bool {
        if self.fingerprints.contains(fingerprint) {
            return false;
        }
        self.fingerprints.insert(fingerprint.clone())
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    pub fn visited_count(&self) -> usize {
        self.urls.len()
    }

    pub fn fingerprint_count(&self) -> usize {
        self.fingerprints.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_url_once() {
        let mut state = VisitedState::new();
        assert!(state.claim_url("https://example.com/"));
        assert!(!state.claim_url("https://example.com/"));
        assert!(state.is_visited("https://example.com/"));
        assert_eq!(state.visited_count(), 1);
    }

    #[test]
    fn test_claim_fingerprint_once() {
        let mut state = VisitedState::new();
        let fp = ContentFingerprint::of(b"<html></html>");
        assert!(state.claim_fingerprint(&fp));
        assert!(!state.claim_fingerprint(&ContentFingerprint::of(b"<html></html>")));
        assert!(state.claim_fingerprint(&ContentFingerprint::of(b"<p></p>")));
        assert_eq!(state.fingerprint_count(), 2);
    }

    #[test]
    fn test_fresh_state_is_empty() {
        let state = VisitedState::new();
        assert!(!state.is_visited("https://example.com/"));
        assert_eq!(state.visited_count(), 0);
        assert_eq!(state.fingerprint_count(), 0);
    }
}
