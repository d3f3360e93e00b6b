//! Time-series feed for the chart collaborator.
//!
//! The chart widget itself is external; this holds the numeric series
//! it draws from. Points are appended only on the periodic tick/push
//! path (the session enforces that), so series spacing reflects real
//! sample cadence rather than out-of-band manual edits.

use serde::{Deserialize, Serialize};
use vigil_core::{VitalField, VitalsRecord};

/// One field's rolling series of (time, value) points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VitalSeries {
    /// Sampled field
    pub field: VitalField,
    /// Points, oldest first
    pub points: Vec<(f64, f64)>,
}

impl VitalSeries {
    /// Create an empty series.
    #[must_use]
    pub const fn new(field: VitalField) -> Self {
        Self {
            field,
            points: Vec::new(),
        }
    }

    /// Min/max of the Y values, if any points exist.
    #[must_use]
    pub fn y_range(&self) -> Option<(f64, f64)> {
        if self.points.is_empty() {
            return None;
        }
        let min = self
            .points
            .iter()
            .map(|(_, y)| *y)
            .fold(f64::INFINITY, f64::min);
        let max = self
            .points
            .iter()
            .map(|(_, y)| *y)
            .fold(f64::NEG_INFINITY, f64::max);
        Some((min, max))
    }
}

/// Rolling chart series for a set of fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartFeed {
    series: Vec<VitalSeries>,
    capacity: usize,
}

impl Default for ChartFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartFeed {
    /// Rolling-window length per series.
    pub const DEFAULT_CAPACITY: usize = 60;

    /// Create a feed charting heart rate and SpO2 (the dashboard's
    /// default trend pair).
    #[must_use]
    pub fn new() -> Self {
        Self::with_fields(&[VitalField::HeartRate, VitalField::Spo2])
    }

    /// Create a feed charting the given fields.
    #[must_use]
    pub fn with_fields(fields: &[VitalField]) -> Self {
        Self {
            series: fields.iter().map(|&field| VitalSeries::new(field)).collect(),
            capacity: Self::DEFAULT_CAPACITY,
        }
    }

    /// Override the rolling-window length.
    #[must_use]
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    /// All series.
    #[must_use]
    pub fn series(&self) -> &[VitalSeries] {
        &self.series
    }

    /// One field's series, if charted.
    #[must_use]
    pub fn get(&self, field: VitalField) -> Option<&VitalSeries> {
        self.series.iter().find(|s| s.field == field)
    }

    /// Append one sample per charted field at time `t`, trimming each
    /// series to the rolling window.
    pub fn append(&mut self, t: f64, record: &VitalsRecord) {
        for series in &mut self.series {
            series.points.push((t, record.get(series.field)));
            if series.points.len() > self.capacity {
                let excess = series.points.len() - self.capacity;
                series.points.drain(..excess);
            }
        }
    }

    /// Replace one field's series wholesale (history backfill).
    pub fn replace(&mut self, field: VitalField, points: Vec<(f64, f64)>) {
        if let Some(series) = self.series.iter_mut().find(|s| s.field == field) {
            series.points = points;
            if series.points.len() > self.capacity {
                let excess = series.points.len() - self.capacity;
                series.points.drain(..excess);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_tracks_record() {
        let mut feed = ChartFeed::new();
        let record = VitalsRecord::default();
        feed.append(0.0, &record);
        feed.append(3.0, &record);
        let hr = feed.get(VitalField::HeartRate).unwrap();
        assert_eq!(hr.points, vec![(0.0, 72.0), (3.0, 72.0)]);
    }

    #[test]
    fn test_window_trims_oldest() {
        let mut feed = ChartFeed::new().capacity(3);
        let record = VitalsRecord::default();
        for i in 0..5 {
            feed.append(f64::from(i), &record);
        }
        let spo2 = feed.get(VitalField::Spo2).unwrap();
        assert_eq!(spo2.points.len(), 3);
        assert_eq!(spo2.points[0].0, 2.0);
    }

    #[test]
    fn test_replace_backfills_and_trims() {
        let mut feed = ChartFeed::new().capacity(2);
        feed.replace(
            VitalField::HeartRate,
            vec![(0.0, 70.0), (1.0, 71.0), (2.0, 72.0)],
        );
        let hr = feed.get(VitalField::HeartRate).unwrap();
        assert_eq!(hr.points, vec![(1.0, 71.0), (2.0, 72.0)]);
    }

    #[test]
    fn test_replace_unknown_field_is_ignored() {
        let mut feed = ChartFeed::new();
        feed.replace(VitalField::Humidity, vec![(0.0, 42.0)]);
        assert!(feed.get(VitalField::Humidity).is_none());
    }

    #[test]
    fn test_y_range() {
        let mut series = VitalSeries::new(VitalField::HeartRate);
        assert!(series.y_range().is_none());
        series.points = vec![(0.0, 70.0), (1.0, 85.0), (2.0, 64.0)];
        assert_eq!(series.y_range(), Some((64.0, 85.0)));
    }
}
