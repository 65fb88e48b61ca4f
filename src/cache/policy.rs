//! TTL policies — how long a cached document stays servable.
//!
//! Policies are evaluated against the cached document itself, so a category
//! whose freshness depends on content (a schedule showing a live game) can
//! shrink its TTL without the cache knowing anything about schedules.

use mlb_api::wire::ScheduleResponse;
use std::time::Duration;

pub const SCHEDULE_TTL: Duration = Duration::from_secs(300);
pub const LIVE_TTL: Duration = Duration::from_secs(60);
pub const PROFILE_TTL: Duration = Duration::from_secs(86_400);
pub const POSTSEASON_TTL: Duration = Duration::from_secs(3_600);
pub const POSTSEASON_LIVE_TTL: Duration = Duration::from_secs(300);

pub trait TtlPolicy {
    fn effective_ttl(&self, document: &str) -> Duration;
}

/// Content-independent TTL.
#[derive(Debug, Clone, Copy)]
pub struct FixedTtl(pub Duration);

impl TtlPolicy for FixedTtl {
    fn effective_ttl(&self, _document: &str) -> Duration {
        self.0
    }
}

/// Schedule policy: while any game in the cached window is live, state
/// changes every few seconds and the entry expires five times faster.
#[derive(Debug, Clone, Copy)]
pub struct LiveAwareTtl {
    pub idle: Duration,
    pub live: Duration,
}

impl Default for LiveAwareTtl {
    fn default() -> Self {
        Self {
            idle: SCHEDULE_TTL,
            live: LIVE_TTL,
        }
    }
}

impl TtlPolicy for LiveAwareTtl {
    fn effective_ttl(&self, document: &str) -> Duration {
        match serde_json::from_str::<ScheduleResponse>(document) {
            Ok(schedule) if schedule.has_live_games() => self.live,
            _ => self.idle,
        }
    }
}
