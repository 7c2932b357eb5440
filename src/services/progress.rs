// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Challenge progress aggregation and leaderboard ranking.

use crate::entities::run;
use std::cmp::Ordering;

/// The four supported challenge types.
///
/// `WeeklyMileage` aggregates exactly like `TotalDistance` (no week
/// bucketing); the name is kept for compatibility with stored data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeType {
    WeeklyMileage,
    Fastest5k,
    TotalDistance,
    TotalTime,
}

impl ChallengeType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "weekly_mileage" => Some(Self::WeeklyMileage),
            "fastest_5k" => Some(Self::Fastest5k),
            "total_distance" => Some(Self::TotalDistance),
            "total_time" => Some(Self::TotalTime),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::WeeklyMileage => "weekly_mileage",
            Self::Fastest5k => "fastest_5k",
            Self::TotalDistance => "total_distance",
            Self::TotalTime => "total_time",
        }
    }
}

/// Aggregate a user's progress from runs already filtered to the challenge
/// window. For `Fastest5k` the result is the best (lowest) duration among
/// runs of roughly 5 km, with 0 meaning no attempt yet.
pub fn compute_progress(challenge_type: ChallengeType, runs: &[run::Model]) -> f64 {
    match challenge_type {
        ChallengeType::WeeklyMileage | ChallengeType::TotalDistance => {
            runs.iter().map(|r| r.distance_km).sum()
        }
        ChallengeType::TotalTime => runs.iter().map(|r| r.duration_minutes).sum(),
        ChallengeType::Fastest5k => runs
            .iter()
            .filter(|r| r.distance_km >= 4.5 && r.distance_km <= 5.5)
            .map(|r| r.duration_minutes)
            .fold(0.0, |best, d| {
                if best == 0.0 || d < best {
                    d
                } else {
                    best
                }
            }),
    }
}

/// Fold a manual progress entry into a participant's total. Times for
/// `Fastest5k` only improve downward (0 counts as unset); everything else
/// accumulates.
pub fn apply_manual_entry(challenge_type: ChallengeType, current: f64, entry: f64) -> f64 {
    match challenge_type {
        ChallengeType::Fastest5k => {
            if current == 0.0 || entry < current {
                entry
            } else {
                current
            }
        }
        _ => current + entry,
    }
}

/// Value used for ordering a participant. For `Fastest5k` a progress of 0
/// means no attempt and must sort after every real time.
fn ranking_value(challenge_type: ChallengeType, progress: f64) -> f64 {
    if challenge_type == ChallengeType::Fastest5k && progress == 0.0 {
        f64::INFINITY
    } else {
        progress
    }
}

/// Sort items into leaderboard order: ascending for `Fastest5k`, descending
/// otherwise. The sort is stable, so ties keep their incoming order.
pub fn sort_leaderboard<T, F>(challenge_type: ChallengeType, items: &mut [T], progress: F)
where
    F: Fn(&T) -> f64,
{
    items.sort_by(|a, b| {
        let (va, vb) = (
            ranking_value(challenge_type, progress(a)),
            ranking_value(challenge_type, progress(b)),
        );
        let ord = va.partial_cmp(&vb).unwrap_or(Ordering::Equal);
        if challenge_type == ChallengeType::Fastest5k {
            ord
        } else {
            ord.reverse()
        }
    });
}

/// Percent of goal reached, rounded to one decimal. A non-positive goal
/// yields 0.
pub fn progress_percentage(goal_value: f64, progress: f64) -> f64 {
    if goal_value > 0.0 {
        (progress / goal_value * 1000.0).round() / 10.0
    } else {
        0.0
    }
}
