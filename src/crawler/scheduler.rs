//! Frontier of pages waiting to be visited
//!
//! The frontier is a plain worklist replacing call-stack recursion:
//! - Depth-first uses it as a stack, reproducing the order of a recursive walk
//! - Breadth-first uses it as a queue
//!
//! Membership is not checked here; the coordinator claims each URL against
//! the visited set when it leaves the frontier.

use crate::config::TraversalOrder;
use crate::url::CrawlTarget;
use std::collections::VecDeque;

/// Pending crawl targets
#[derive(Debug)]
pub struct Frontier {
    order: TraversalOrder,
    pending: VecDeque<CrawlTarget>,
}

impl Frontier {
    /// Creates a frontier holding only `seed`
    pub fn new(order: TraversalOrder, seed: CrawlTarget) -> Self {
        let mut pending = VecDeque::new();
        pending.push_back(seed);
        Self { order, pending }
    }

    /// Adds the children of one page
    ///
    /// `children` must already be in visiting order (lexicographic for
    /// extracted links); the first child is the next one dequeued under
    /// depth-first order.
    pub fn push_children(&mut self, children: Vec<CrawlTarget>) {
        match self.order {
            TraversalOrder::DepthFirst => {
                for child in children.into_iter().rev() {
                    self.pending.push_back(child);
                }
            }
            TraversalOrder::BreadthFirst => self.pending.extend(children),
        }
    }

    /// Takes the next target to visit
    pub fn pop(&mut self) -> Option<CrawlTarget> {
        match self.order {
            TraversalOrder::DepthFirst => self.pending.pop_back(),
            TraversalOrder::BreadthFirst => self.pending.pop_front(),
        }
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(path: &str) -> CrawlTarget {
        CrawlTarget::parse(&format!("https://example.com{}", path)).unwrap()
    }

    fn drain(frontier: &mut Frontier) -> Vec<String> {
        std::iter::from_fn(|| frontier.pop())
            .map(|t| t.path().to_string())
            .collect()
    }

    #[test]
    fn test_seed_comes_out_first() {
        let mut frontier = Frontier::new(TraversalOrder::DepthFirst, target("/"));
        assert_eq!(frontier.len(), 1);
        assert_eq!(frontier.pop().unwrap().path(), "/");
        assert!(frontier.is_empty());
        assert!(frontier.pop().is_none());
    }

    #[test]
    fn test_depth_first_order() {
        let mut frontier = Frontier::new(TraversalOrder::DepthFirst, target("/"));
        frontier.pop();
        frontier.push_children(vec![target("/a"), target("/b")]);

        // Visiting /a discovers /a/1 and /a/2 before /b is reached
        assert_eq!(frontier.pop().unwrap().path(), "/a");
        frontier.push_children(vec![target("/a/1"), target("/a/2")]);

        assert_eq!(drain(&mut frontier), vec!["/a/1", "/a/2", "/b"]);
    }

    #[test]
    fn test_breadth_first_order() {
        let mut frontier = Frontier::new(TraversalOrder::BreadthFirst, target("/"));
        frontier.pop();
        frontier.push_children(vec![target("/a"), target("/b")]);

        assert_eq!(frontier.pop().unwrap().path(), "/a");
        frontier.push_children(vec![target("/a/1"), target("/a/2")]);

        assert_eq!(drain(&mut frontier), vec!["/b", "/a/1", "/a/2"]);
    }
}
