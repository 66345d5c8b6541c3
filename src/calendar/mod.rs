//! Economic calendar and event-phase resolution
//!
//! Phase is always a pure function of `(now, release_time)`. It is never
//! cached, which keeps long-running processes from carrying a stale phase.

use chrono::{DateTime, Duration, Utc};

use crate::models::event::{EconomicEvent, Phase};

/// Window before release during which pre-positioning is allowed.
pub const PRE_EVENT_MINUTES: i64 = 30;
/// Release window: the print itself plus immediate spike.
pub const RELEASE_MINUTES: i64 = 2;
pub const INITIAL_MOVE_MINUTES: i64 = 15;
pub const FOLLOW_THROUGH_MINUTES: i64 = 45;
/// End of the event's tradable lifecycle.
pub const LOOKAHEAD_MINUTES: i64 = 120;

/// Resolve the event-relative phase at `now`.
pub fn phase_at(now: DateTime<Utc>, event: &EconomicEvent) -> Phase {
    let offset = now - event.release_time;

    if offset < Duration::minutes(-PRE_EVENT_MINUTES) {
        Phase::None
    } else if offset < Duration::zero() {
        Phase::PreEvent
    } else if offset < Duration::minutes(RELEASE_MINUTES) {
        Phase::Release
    } else if offset < Duration::minutes(INITIAL_MOVE_MINUTES) {
        Phase::InitialMove
    } else if offset < Duration::minutes(FOLLOW_THROUGH_MINUTES) {
        Phase::FollowThrough
    } else if offset < Duration::minutes(LOOKAHEAD_MINUTES) {
        Phase::Reversal
    } else {
        Phase::None
    }
}

/// Read-only store of scheduled events, sorted by release time.
#[derive(Debug, Clone, Default)]
pub struct EconomicCalendar {
    events: Vec<EconomicEvent>,
}

impl EconomicCalendar {
    pub fn new(mut events: Vec<EconomicEvent>) -> Self {
        events.sort_by_key(|e| e.release_time);
        Self { events }
    }

    pub fn events(&self) -> &[EconomicEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The event currently in an active phase for `symbol`, if any. With
    /// overlapping schedules the one closest to release wins.
    pub fn active_event(&self, symbol: &str, now: DateTime<Utc>) -> Option<&EconomicEvent> {
        self.events
            .iter()
            .filter(|e| e.symbol == symbol && phase_at(now, e).is_active())
            .min_by_key(|e| (now - e.release_time).abs())
    }

    /// Events scheduled for `symbol` after `now`, nearest first.
    pub fn upcoming(&self, symbol: &str, now: DateTime<Utc>) -> Vec<&EconomicEvent> {
        self.events
            .iter()
            .filter(|e| e.symbol == symbol && e.release_time > now)
            .collect()
    }
}
