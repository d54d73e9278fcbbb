//! Run summary.

use std::fmt;

use crate::{AsyncBackendId, BackendId, CustomCategory};

/// What one run did, for logging and for callers that need to act on it
/// (for example building Ada codecs).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Units dispatched on the main path.
    pub units_processed: usize,
    /// Units skipped on the main path because they have no parameters.
    pub units_skipped: usize,
    /// Units driven through the custom router.
    pub router_units: usize,
    /// Leaf callbacks per backend, in first-seen order.
    pub leaf_visits: Vec<(BackendId, usize)>,
    /// Asynchronous backends started, in first-seen order.
    pub async_started: Vec<AsyncBackendId>,
    pub categories_finalized: Vec<CustomCategory>,
    /// Some unit targets Ada or QGen Ada, so Ada codecs must be built.
    pub requires_ada_codecs: bool,
}

impl RunReport {
    pub(crate) fn record_visit(&mut self, backend: BackendId) {
        match self.leaf_visits.iter_mut().find(|(id, _)| *id == backend) {
            Some((_, count)) => *count += 1,
            None => self.leaf_visits.push((backend, 1)),
        }
    }

    /// Leaf callbacks received by one backend.
    pub fn visits(&self, backend: BackendId) -> usize {
        self.leaf_visits
            .iter()
            .find(|(id, _)| *id == backend)
            .map_or(0, |(_, count)| *count)
    }

    pub fn total_visits(&self) -> usize {
        self.leaf_visits.iter().map(|(_, count)| count).sum()
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} units processed, {} skipped, {} routed; {} leaf callbacks",
            self.units_processed,
            self.units_skipped,
            self.router_units,
            self.total_visits()
        )?;
        for (backend, count) in &self.leaf_visits {
            write!(f, "\n  {backend}: {count}")?;
        }
        if !self.async_started.is_empty() {
            let started: Vec<_> = self.async_started.iter().map(|id| id.as_str()).collect();
            write!(f, "\n  run-wide backends: {}", started.join(", "))?;
        }
        if !self.categories_finalized.is_empty() {
            let finalized: Vec<_> = self
                .categories_finalized
                .iter()
                .map(|c| c.as_str())
                .collect();
            write!(f, "\n  finalized: {}", finalized.join(", "))?;
        }
        if self.requires_ada_codecs {
            write!(f, "\n  Ada codecs required")?;
        }
        Ok(())
    }
}
