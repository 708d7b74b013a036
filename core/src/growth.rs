//! Time-based growth. Nothing here is stored: readiness is recomputed
//! from (planted_at, growth_duration, now) every time it is asked for,
//! so the garden view and harvest validation can never disagree.

use crate::{state::Plant, types::Timestamp};
use serde::{Deserialize, Serialize};

pub const READY_LABEL: &str = "Ready";

/// Percent grown in [0, 100], one decimal. Stays at or below 99.9 until
/// the full duration has elapsed.
pub fn growth_percent(planted_at: Timestamp, growth_duration: i64, now: Timestamp) -> f64 {
    let elapsed = now - planted_at;
    if elapsed <= 0 {
        return 0.0;
    }
    if growth_duration <= 0 || elapsed >= growth_duration {
        return 100.0;
    }
    let raw = elapsed as f64 / growth_duration as f64 * 100.0;
    ((raw * 10.0).round() / 10.0).min(99.9)
}

pub fn is_ready(planted_at: Timestamp, growth_duration: i64, now: Timestamp) -> bool {
    growth_percent(planted_at, growth_duration, now) >= 100.0
}

pub fn remaining_seconds(planted_at: Timestamp, growth_duration: i64, now: Timestamp) -> i64 {
    (planted_at + growth_duration - now).max(0)
}

/// `1h 2m`, `4m 5s`, `59s`, or `Ready`. Seconds are dropped once an
/// hour or more remains.
pub fn format_remaining(seconds: i64) -> String {
    if seconds <= 0 {
        return READY_LABEL.to_string();
    }

    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    let mut parts = Vec::with_capacity(3);
    if hours > 0 {
        parts.push(format!("{hours}h"));
    }
    if minutes > 0 {
        parts.push(format!("{minutes}m"));
    }
    if secs > 0 && hours == 0 {
        parts.push(format!("{secs}s"));
    }
    parts.join(" ")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthStatus {
    pub percent:           f64,
    pub ready:             bool,
    pub remaining_seconds: i64,
    pub remaining_label:   String,
}

impl GrowthStatus {
    pub fn at(planted_at: Timestamp, growth_duration: i64, now: Timestamp) -> Self {
        let percent = growth_percent(planted_at, growth_duration, now);
        let remaining = remaining_seconds(planted_at, growth_duration, now);
        Self {
            percent,
            ready: percent >= 100.0,
            remaining_seconds: remaining,
            remaining_label: format_remaining(remaining),
        }
    }

    pub fn evaluate(plant: &Plant, now: Timestamp) -> Self {
        Self::at(plant.planted_at, plant.growth_duration, now)
    }
}
