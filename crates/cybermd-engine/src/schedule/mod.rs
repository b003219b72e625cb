//! # Reparse scheduling
//!
//! Debounces edits into parse-and-highlight passes and decides which pass
//! results reach the view.
//!
//! ```text
//!   Idle ──edit──▶ Pending(deadline) ──poll ≥ deadline──▶ Running
//!    ▲               │  ▲ edit re-arms                      │ edit arms
//!    │               │  └──────────────                     │ a deadline
//!    └──complete─────┴─────────────────────complete─────────┘
//! ```
//!
//! The scheduler never reads the clock: every call takes `now`, so the
//! owning loop (and tests) control time. It also never runs a pass itself;
//! [`poll`](ReparseScheduler::poll) hands out the snapshot to run and
//! [`complete`](ReparseScheduler::complete) reports back.

pub mod worker;

use std::time::{Duration, Instant};

use log::debug;

use crate::document::DocumentSnapshot;

pub use worker::{
    BackgroundExecutor, Completed, InlineExecutor, PassExecutor, PassLimits, PassOutput, run_pass,
};

/// Quiet interval after the last edit before a pass starts.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// An edit is waiting for the quiet interval to elapse.
    Pending { deadline: Instant },
    /// A pass for `version` is in flight. `rearmed` holds the deadline of
    /// an edit that arrived meanwhile.
    Running {
        version: u64,
        rearmed: Option<Instant>,
    },
}

/// What to do with a finished pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The pass ran on the latest text; show its result.
    Deliver,
    /// The text changed while the pass ran; drop its result.
    Discard,
}

#[derive(Debug)]
pub struct ReparseScheduler {
    interval: Duration,
    phase: Phase,
    latest: Option<DocumentSnapshot>,
    latest_version: Option<u64>,
}

impl Default for ReparseScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl ReparseScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            phase: Phase::Idle,
            latest: None,
            latest_version: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Running { .. })
    }

    /// Version of the newest snapshot seen.
    pub fn latest_version(&self) -> Option<u64> {
        self.latest_version
    }

    /// Records an edit and re-arms the debounce deadline.
    ///
    /// Returns `false`, changing nothing, when `snapshot` is not newer than
    /// the latest version already recorded.
    pub fn on_edit(&mut self, snapshot: DocumentSnapshot, now: Instant) -> bool {
        let version = snapshot.version();
        if let Some(latest) = self.latest_version
            && version <= latest
        {
            debug!("ignoring edit v{version}, already at v{latest}");
            return false;
        }
        let deadline = now + self.interval;
        self.phase = match self.phase {
            Phase::Idle | Phase::Pending { .. } => Phase::Pending { deadline },
            Phase::Running { version, .. } => Phase::Running {
                version,
                rearmed: Some(deadline),
            },
        };
        debug!("edit v{version}, phase {:?}", self.phase);
        self.latest_version = Some(version);
        self.latest = Some(snapshot);
        true
    }

    /// Starts a pass when the deadline has passed and none is running.
    ///
    /// The returned snapshot must be run and reported back through
    /// [`complete`](Self::complete).
    pub fn poll(&mut self, now: Instant) -> Option<DocumentSnapshot> {
        let Phase::Pending { deadline } = self.phase else {
            return None;
        };
        if now < deadline {
            return None;
        }
        let snapshot = self.latest.take()?;
        self.phase = Phase::Running {
            version: snapshot.version(),
            rearmed: None,
        };
        debug!("starting pass for v{}", snapshot.version());
        Some(snapshot)
    }

    /// Reports that the pass for `version` finished.
    pub fn complete(&mut self, version: u64) -> Completion {
        let rearmed = match self.phase {
            Phase::Running { rearmed, .. } => rearmed,
            _ => None,
        };
        self.phase = match rearmed {
            Some(deadline) => Phase::Pending { deadline },
            None => Phase::Idle,
        };
        if Some(version) == self.latest_version {
            Completion::Deliver
        } else {
            debug!(
                "discarding stale pass v{version}, latest is v{:?}",
                self.latest_version
            );
            Completion::Discard
        }
    }

    /// When the owning loop next needs to call [`poll`](Self::poll).
    ///
    /// While a pass runs the answer is `None`: its completion is what
    /// moves the scheduler on.
    pub fn next_deadline(&self) -> Option<Instant> {
        match self.phase {
            Phase::Pending { deadline } => Some(deadline),
            Phase::Idle | Phase::Running { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn snap(version: u64) -> DocumentSnapshot {
        DocumentSnapshot::new(version, format!("v{version}").as_str())
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn burst_of_edits_runs_one_pass_on_the_last() {
        let t0 = Instant::now();
        let mut s = ReparseScheduler::new(ms(300));
        s.on_edit(snap(1), t0);
        s.on_edit(snap(2), t0 + ms(50));
        s.on_edit(snap(3), t0 + ms(100));

        assert!(s.poll(t0 + ms(350)).is_none());
        assert_eq!(s.next_deadline(), Some(t0 + ms(400)));

        let started = s.poll(t0 + ms(400)).map(|snap| snap.version());
        assert_eq!(started, Some(3));
        assert!(s.poll(t0 + ms(900)).is_none());
        assert_eq!(s.complete(3), Completion::Deliver);
        assert_eq!(s.phase(), Phase::Idle);
    }

    #[test]
    fn idle_scheduler_has_nothing_to_do() {
        let mut s = ReparseScheduler::default();
        assert_eq!(s.interval(), DEFAULT_DEBOUNCE);
        assert_eq!(s.next_deadline(), None);
        assert!(s.poll(Instant::now()).is_none());
    }

    #[test]
    fn single_flight_while_running() {
        let t0 = Instant::now();
        let mut s = ReparseScheduler::new(ms(300));
        s.on_edit(snap(1), t0);
        assert!(s.poll(t0 + ms(300)).is_some());

        s.on_edit(snap(2), t0 + ms(310));
        assert!(s.is_running());
        assert!(s.poll(t0 + ms(5000)).is_none());
        assert_eq!(s.next_deadline(), None);

        assert_eq!(s.complete(1), Completion::Discard);
        assert_eq!(
            s.phase(),
            Phase::Pending {
                deadline: t0 + ms(610)
            }
        );
        let next = s.poll(t0 + ms(610)).map(|snap| snap.version());
        assert_eq!(next, Some(2));
        assert_eq!(s.complete(2), Completion::Deliver);
    }

    #[test]
    fn stale_pass_is_discarded_even_when_deadline_not_reached() {
        let t0 = Instant::now();
        let mut s = ReparseScheduler::new(ms(300));
        s.on_edit(snap(4), t0);
        s.poll(t0 + ms(300));
        s.on_edit(snap(5), t0 + ms(301));
        assert_eq!(s.complete(4), Completion::Discard);
        assert!(s.poll(t0 + ms(400)).is_none());
    }

    #[test]
    fn older_or_repeated_versions_are_ignored() {
        let t0 = Instant::now();
        let mut s = ReparseScheduler::new(ms(300));
        assert!(s.on_edit(snap(2), t0));
        assert!(!s.on_edit(snap(2), t0 + ms(100)));
        assert!(!s.on_edit(snap(1), t0 + ms(200)));
        assert_eq!(s.latest_version(), Some(2));
        assert_eq!(s.next_deadline(), Some(t0 + ms(300)));
    }

    #[test]
    fn zero_interval_fires_immediately() {
        let t0 = Instant::now();
        let mut s = ReparseScheduler::new(Duration::ZERO);
        s.on_edit(snap(1), t0);
        assert!(s.poll(t0).is_some());
    }
}
