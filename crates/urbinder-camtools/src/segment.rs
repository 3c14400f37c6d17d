use serde::{Deserialize, Serialize};
use urbinder_core::Point3;

/// An undirected edge between two points.
///
/// Serialized as `[[x, y, z], [x, y, z]]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[Point3; 2]", into = "[Point3; 2]")]
pub struct Segment {
    pub start: Point3,
    pub end: Point3,
}

impl Segment {
    pub fn new(start: Point3, end: Point3) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    /// The same edge walked the other way
    pub fn reversed(&self) -> Self {
        Self::new(self.end, self.start)
    }
}

impl From<[Point3; 2]> for Segment {
    fn from(points: [Point3; 2]) -> Self {
        Self::new(points[0], points[1])
    }
}

impl From<Segment> for [Point3; 2] {
    fn from(segment: Segment) -> Self {
        [segment.start, segment.end]
    }
}
