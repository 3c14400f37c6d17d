//! Lift-clearance toolpaths.
//!
//! Each polyline is approached from above its first point and left from
//! above its last, so travel between polylines never touches the surface.

use crate::polyline::Polyline;
use serde::{Deserialize, Serialize};
use tracing::debug;
use urbinder_core::Point3;

/// Offset added to a polyline's ends for the approach and retract moves
pub const DEFAULT_LIFT_CLEARANCE: Point3 = Point3::new(0.0, 0.0, 0.5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaypointKind {
    /// Clear of the surface, approaching or leaving a polyline
    Lift,
    /// On the surface, part of a polyline
    Contact,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub position: Point3,
    pub kind: WaypointKind,
}

impl Waypoint {
    pub fn lift(position: Point3) -> Self {
        Self {
            position,
            kind: WaypointKind::Lift,
        }
    }

    pub fn contact(position: Point3) -> Self {
        Self {
            position,
            kind: WaypointKind::Contact,
        }
    }

    pub fn is_contact(&self) -> bool {
        self.kind == WaypointKind::Contact
    }
}

/// Ordered waypoints for a whole drawing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Toolpath {
    waypoints: Vec<Waypoint>,
}

impl Toolpath {
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Waypoint positions without their kinds
    pub fn points(&self) -> Vec<Point3> {
        self.waypoints.iter().map(|w| w.position).collect()
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolpathBuilder {
    clearance: Point3,
}

impl ToolpathBuilder {
    pub fn new(clearance: Point3) -> Self {
        Self { clearance }
    }

    pub fn clearance(&self) -> Point3 {
        self.clearance
    }

    /// Concatenate `polylines` in order, each wrapped in lift moves.
    /// Empty polylines are skipped.
    pub fn build(&self, polylines: &[Polyline]) -> Toolpath {
        let mut waypoints = Vec::new();

        for polyline in polylines {
            let (Some(&first), Some(&last)) = (polyline.first(), polyline.last()) else {
                continue;
            };

            waypoints.push(Waypoint::lift(first + self.clearance));
            waypoints.extend(polyline.points().iter().copied().map(Waypoint::contact));
            waypoints.push(Waypoint::lift(last + self.clearance));
        }

        debug!(
            "Built toolpath with {} waypoints from {} polylines",
            waypoints.len(),
            polylines.len()
        );

        Toolpath { waypoints }
    }
}

impl Default for ToolpathBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_LIFT_CLEARANCE)
    }
}
