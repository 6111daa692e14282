use crate::RockTabError;
use serde::Serialize;

/// Known pairing of a musical position (measure index + fraction) with elapsed seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SyncPoint {
    pub position: f64,
    pub time: f64,
}

impl SyncPoint {
    pub const fn new(position: f64, time: f64) -> Self {
        Self { position, time }
    }
}

/// Irregularities kept as-is in the table but reported to the caller
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SyncAnomaly {
    /// Elapsed time goes backwards between two consecutive positions
    NonMonotonicTime {
        position: f64,
        previous_time: f64,
        time: f64,
    },
}

/// Round seconds to the nearest millisecond, never negative zero
pub fn round_millis(seconds: f64) -> f64 {
    (seconds * 1000.0).round() / 1000.0 + 0.0
}

/// Piecewise linear mapping from musical position to elapsed seconds
#[derive(Debug, Clone, PartialEq)]
pub struct TimeTable {
    points: Vec<SyncPoint>, // strictly increasing positions
    anomalies: Vec<SyncAnomaly>,
}

impl TimeTable {
    /// Sort and deduplicate breakpoints, the last point supplied for a position wins.
    pub fn build<I>(breakpoints: I) -> Result<Self, RockTabError>
    where
        I: IntoIterator<Item = SyncPoint>,
    {
        let mut sorted: Vec<SyncPoint> = breakpoints.into_iter().collect();
        if let Some(bad) = sorted
            .iter()
            .find(|p| !p.position.is_finite() || !p.time.is_finite())
        {
            return Err(RockTabError::InvalidSyncData(format!(
                "non finite breakpoint {bad:?}"
            )));
        }
        if sorted.is_empty() {
            return Err(RockTabError::InvalidSyncData(
                "no breakpoints to build a time table".to_string(),
            ));
        }

        // -0.0 and 0.0 are the same position
        for point in &mut sorted {
            point.position += 0.0;
        }
        // stable sort keeps the input order for equal positions
        sorted.sort_by(|a, b| a.position.total_cmp(&b.position));
        let mut points: Vec<SyncPoint> = Vec::with_capacity(sorted.len());
        for point in sorted {
            match points.last_mut() {
                Some(last) if last.position == point.position => *last = point,
                _ => points.push(point),
            }
        }

        let anomalies: Vec<SyncAnomaly> = points
            .windows(2)
            .filter(|w| w[1].time < w[0].time)
            .map(|w| SyncAnomaly::NonMonotonicTime {
                position: w[1].position,
                previous_time: w[0].time,
                time: w[1].time,
            })
            .collect();
        for anomaly in &anomalies {
            log::warn!("Sync data anomaly {anomaly:?}");
        }
        log::debug!("Time table built with {} breakpoints", points.len());
        Ok(Self { points, anomalies })
    }

    pub fn points(&self) -> &[SyncPoint] {
        &self.points
    }

    pub fn anomalies(&self) -> &[SyncAnomaly] {
        &self.anomalies
    }

    /// Interpolated seconds for a position, extrapolated from the edge segments
    pub fn read(&self, position: f64) -> f64 {
        let points = &self.points;
        if points.len() == 1 {
            return points[0].time;
        }
        // index of the segment [i, i + 1] to use, clamped to the edge segments
        let upper = points.partition_point(|p| p.position <= position);
        let i = upper.clamp(1, points.len() - 1) - 1;
        let (a, b) = (points[i], points[i + 1]);
        let slope = (b.time - a.time) / (b.position - a.position);
        a.time + (position - a.position) * slope
    }

    /// Interpolated seconds for a position, rounded to the millisecond
    pub fn lookup(&self, position: f64) -> f64 {
        round_millis(self.read(position))
    }
}
