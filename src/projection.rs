//! Projection of distances and points onto a route polyline.
//!
//! A [`CumulativeDistances`] table holds the along-route distance (miles)
//! at every polyline point. It is derived from the polyline and never
//! edited independently of it.

use std::ops::Index;

use crate::coordinate::Coordinate;
use crate::haversine::haversine_miles;

/// Declared and summed totals further apart than this are reconciled.
pub const TOTAL_DISTANCE_TOLERANCE_MILES: f64 = 1.0;

/// Non-decreasing along-route distances, one per route point, starting at 0.
#[derive(Debug, Clone, PartialEq)]
pub struct CumulativeDistances(Vec<f64>);

impl CumulativeDistances {
    /// Sums consecutive great-circle distances along `points`.
    ///
    /// When the summed length disagrees with `total_miles` by more than
    /// [`TOTAL_DISTANCE_TOLERANCE_MILES`], the last entry is set to
    /// `total_miles`. Routes with fewer than two points yield `[0]`.
    pub fn from_route(points: &[Coordinate], total_miles: f64) -> Self {
        if points.len() < 2 {
            return Self(vec![0.0]);
        }

        let mut table = Vec::with_capacity(points.len());
        let mut running = 0.0;
        table.push(running);
        for pair in points.windows(2) {
            running += haversine_miles(pair[0], pair[1]);
            table.push(running);
        }

        if let Some(last) = table.last_mut() {
            if (*last - total_miles).abs() > TOTAL_DISTANCE_TOLERANCE_MILES {
                *last = total_miles;
            }
        }

        Self(table)
    }

    /// Wraps a precomputed table. An empty input becomes `[0]`.
    pub fn from_values(values: Vec<f64>) -> Self {
        if values.is_empty() {
            Self(vec![0.0])
        } else {
            Self(values)
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// Distance at `index`, clamped to the last entry.
    pub fn at(&self, index: usize) -> f64 {
        self.0
            .get(index)
            .or_else(|| self.0.last())
            .copied()
            .unwrap_or(0.0)
    }

    /// Smallest index `>= from_index` whose distance is `>= target_miles`,
    /// or the last index when the target lies beyond the route.
    ///
    /// Forward-only scan; callers advancing `from_index` monotonically keep
    /// the aggregate cost linear in route length.
    pub fn index_at_or_after(&self, target_miles: f64, from_index: usize) -> usize {
        self.0
            .iter()
            .enumerate()
            .skip(from_index)
            .find(|(_, distance)| **distance >= target_miles)
            .map_or_else(|| self.last_index(), |(index, _)| index)
    }
}

impl Index<usize> for CumulativeDistances {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

/// Index of the route point closest to `target`; the first of equals wins.
///
/// Returns `None` for an empty route.
pub fn nearest_point_index(points: &[Coordinate], target: Coordinate) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, point) in points.iter().enumerate() {
        let dist = haversine_miles(target, *point);
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((index, dist)),
        }
    }
    best.map(|(index, _)| index)
}
