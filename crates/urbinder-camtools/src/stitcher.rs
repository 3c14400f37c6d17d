//! Segment stitching.
//!
//! Mesh edges arrive in no particular order and with no direction. The
//! stitcher grows one polyline at a time: every pass walks the remaining
//! segments and splices any that touch either end of the current polyline.
//! When a whole pass adds nothing the polyline is finished and the next one
//! is seeded from the first leftover segment.
//!
//! Matching is greedy and order-dependent. No attempt is made to minimise
//! the number of polylines or the travel between them.

use crate::polyline::Polyline;
use crate::segment::Segment;
use std::collections::VecDeque;
use tracing::debug;
use urbinder_core::Point3;

/// Distance under which two endpoints are the same point
pub const DEFAULT_TOLERANCE: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentStitcher {
    tolerance: f64,
}

impl SegmentStitcher {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Chain `segments` into polylines, in discovery order
    pub fn stitch(&self, segments: &[Segment]) -> Vec<Polyline> {
        let mut remaining: Vec<Segment> = segments.to_vec();
        let mut polylines = Vec::new();
        let mut current: VecDeque<Point3> = VecDeque::new();
        let mut passes = 0usize;

        while !remaining.is_empty() {
            passes += 1;
            let mut consumed = false;
            let mut retained = Vec::with_capacity(remaining.len());

            for segment in remaining {
                if current.is_empty() {
                    current.push_back(segment.start);
                    current.push_back(segment.end);
                    consumed = true;
                } else if self.splice(&mut current, &segment) {
                    consumed = true;
                } else {
                    retained.push(segment);
                }
            }

            remaining = retained;

            if !consumed {
                polylines.push(Polyline::from(std::mem::take(&mut current)));
            }
        }

        if !current.is_empty() {
            polylines.push(Polyline::from(current));
        }

        debug!(
            "Stitched {} segments into {} polylines in {} passes",
            segments.len(),
            polylines.len(),
            passes
        );

        polylines
    }

    /// Attach `segment` to whichever end of `chain` it touches
    fn splice(&self, chain: &mut VecDeque<Point3>, segment: &Segment) -> bool {
        let (Some(&front), Some(&back)) = (chain.front(), chain.back()) else {
            return false;
        };

        if segment.start.approx_eq(&back, self.tolerance) {
            chain.push_back(segment.end);
        } else if segment.end.approx_eq(&back, self.tolerance) {
            chain.push_back(segment.start);
        } else if segment.end.approx_eq(&front, self.tolerance) {
            chain.push_front(segment.start);
        } else if segment.start.approx_eq(&front, self.tolerance) {
            chain.push_front(segment.end);
        } else {
            return false;
        }

        true
    }
}

impl Default for SegmentStitcher {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE)
    }
}
