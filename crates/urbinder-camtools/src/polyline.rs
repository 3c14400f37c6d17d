use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use urbinder_core::Point3;

/// Points joined end to end; consecutive points share a segment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polyline {
    points: Vec<Point3>,
}

impl Polyline {
    pub fn new(points: Vec<Point3>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&Point3> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&Point3> {
        self.points.last()
    }

    /// Number of segments the polyline is made of
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// True when the last point returns to the first within `tolerance`
    pub fn is_closed(&self, tolerance: f64) -> bool {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) if self.points.len() > 2 => first.approx_eq(last, tolerance),
            _ => false,
        }
    }

    pub fn reversed(&self) -> Self {
        Self::new(self.points.iter().rev().copied().collect())
    }

    pub fn length(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| pair[0].distance_to(&pair[1]))
            .sum()
    }
}

impl From<Vec<Point3>> for Polyline {
    fn from(points: Vec<Point3>) -> Self {
        Self::new(points)
    }
}

impl From<VecDeque<Point3>> for Polyline {
    fn from(points: VecDeque<Point3>) -> Self {
        Self::new(points.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_square() {
        let square = Polyline::new(vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
        ]);
        assert!(square.is_closed(0.01));
        assert_eq!(square.segment_count(), 4);
        assert_eq!(square.length(), 4.0);
    }

    #[test]
    fn test_single_segment_is_open() {
        let line = Polyline::new(vec![Point3::origin(), Point3::origin()]);
        assert!(!line.is_closed(0.01));
    }
}
