use std::fmt;

/// Tracks which phase the current load cycle is in.
///
/// The UI queries this tracker to decide whether to render the throbber and
/// to format the header's status label, which stays stable once the cycle
/// has settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadStatus {
    phase: Phase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Fetching,
    Failed,
    Ready { total: usize },
}

impl LoadStatus {
    /// Create a tracker for a cycle that is still fetching.
    #[must_use]
    pub const fn fetching() -> Self {
        Self {
            phase: Phase::Fetching,
        }
    }

    /// Record that the cycle committed a collection of `total` templates.
    pub fn mark_ready(&mut self, total: usize) {
        self.phase = Phase::Ready { total };
    }

    /// Record that the cycle failed; the error view carries the details.
    pub fn mark_failed(&mut self) {
        self.phase = Phase::Failed;
    }

    /// Return a formatted status label and a completion flag for the UI.
    ///
    /// `shown` is how many templates the filter currently lets through; it
    /// only appears once the cycle is ready, and collapses away when the
    /// whole collection is visible.
    #[must_use]
    pub fn status(&self, label: &str, shown: usize) -> (String, bool) {
        match self.phase {
            Phase::Fetching => (format!("Fetching {}…", lowercase_first(label)), false),
            Phase::Failed => (format!("{label} unavailable"), true),
            Phase::Ready { total } => {
                let display = CountDisplay {
                    shown: shown.min(total),
                    total,
                };
                (format!("{label}: {display}"), true)
            }
        }
    }
}

impl Default for LoadStatus {
    fn default() -> Self {
        Self::fetching()
    }
}

struct CountDisplay {
    shown: usize,
    total: usize,
}

impl fmt::Display for CountDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.shown == self.total {
            write!(f, "{}", self.total)
        } else {
            write!(f, "{}/{}", self.shown, self.total)
        }
    }
}

fn lowercase_first(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::LoadStatus;

    #[test]
    fn reports_fetching_with_spinner() {
        let status = LoadStatus::fetching();
        let (label, complete) = status.status("Templates", 0);
        assert_eq!(label, "Fetching templates…");
        assert!(!complete);
    }

    #[test]
    fn reports_filtered_counts_once_ready() {
        let mut status = LoadStatus::fetching();
        status.mark_ready(100);
        let (label, complete) = status.status("Templates", 7);
        assert_eq!(label, "Templates: 7/100");
        assert!(complete);
    }

    #[test]
    fn collapses_counts_when_everything_is_shown() {
        let mut status = LoadStatus::fetching();
        status.mark_ready(42);
        let (label, complete) = status.status("Templates", 42);
        assert_eq!(label, "Templates: 42");
        assert!(complete);
    }

    #[test]
    fn clamps_shown_to_the_committed_total() {
        let mut status = LoadStatus::fetching();
        status.mark_ready(3);
        let (label, _) = status.status("Templates", 9);
        assert_eq!(label, "Templates: 3");
    }

    #[test]
    fn reports_failure_without_spinner() {
        let mut status = LoadStatus::fetching();
        status.mark_failed();
        let (label, complete) = status.status("Templates", 0);
        assert_eq!(label, "Templates unavailable");
        assert!(complete);
    }
}
