// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity-feed reconciliation.
//!
//! Run activities only store a human-readable description like
//! "Ada ran 6.00 km at 12.00 km/h". To show run details (duration, notes)
//! in the feed, the distance and speed are parsed back out of the text and
//! matched against the author's runs near the activity timestamp.

use crate::entities::run;

/// Extract `(distance_km, speed_kmh)` from a run description. Expects the
/// shape "... <distance> km at <speed> km/h" and returns None otherwise.
pub fn parse_run_description(description: &str) -> Option<(f64, f64)> {
    let tokens: Vec<&str> = description.split_whitespace().collect();
    for i in 1..tokens.len() {
        if tokens[i] == "km"
            && i + 3 < tokens.len()
            && tokens[i + 1] == "at"
            && tokens[i + 3] == "km/h"
        {
            let distance: f64 = tokens[i - 1].parse().ok()?;
            let speed: f64 = tokens[i + 2].parse().ok()?;
            return Some((distance, speed));
        }
    }
    None
}

/// Match a parsed feed entry against candidate runs (the author's runs
/// within the reconciliation window, newest first). Tolerances widen over
/// three passes; the last pass ignores speed entirely. The first hit wins.
pub fn match_run(distance: f64, speed: f64, candidates: &[run::Model]) -> Option<&run::Model> {
    let passes: [(f64, Option<f64>); 3] = [(0.01, Some(0.01)), (0.1, Some(0.5)), (0.5, None)];

    for (dist_tol, speed_tol) in passes {
        for candidate in candidates {
            if (candidate.distance_km - distance).abs() > dist_tol {
                continue;
            }
            if let Some(tol) = speed_tol {
                if (candidate.speed_kmh - speed).abs() > tol {
                    continue;
                }
            }
            return Some(candidate);
        }
    }
    None
}
