use urbinder_camtools::{Polyline, Segment, SegmentStitcher, ToolpathBuilder};
use urbinder_core::Point3;

fn seg(a: [f64; 3], b: [f64; 3]) -> Segment {
    Segment::new(a.into(), b.into())
}

fn open_square() -> Vec<Segment> {
    vec![
        seg([0.0, 0.0, 0.0], [1.0, 0.0, 0.0]),
        seg([1.0, 0.0, 0.0], [1.0, 1.0, 0.0]),
        seg([1.0, 1.0, 0.0], [0.0, 1.0, 0.0]),
    ]
}

fn expected_square_points() -> Vec<Point3> {
    vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(1.0, 1.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
    ]
}

/// Compare polylines ignoring walking direction
fn same_up_to_direction(polyline: &Polyline, expected: &[Point3]) -> bool {
    polyline.points() == expected || polyline.reversed().points() == expected
}

#[test]
fn test_open_square_is_one_polyline() {
    let polylines = SegmentStitcher::default().stitch(&open_square());

    assert_eq!(polylines.len(), 1);
    assert_eq!(polylines[0].points(), expected_square_points().as_slice());
}

#[test]
fn test_disjoint_segments_stay_separate() {
    let segments = vec![
        seg([0.0, 0.0, 0.0], [1.0, 0.0, 0.0]),
        seg([5.0, 5.0, 0.0], [6.0, 5.0, 0.0]),
    ];
    let polylines = SegmentStitcher::default().stitch(&segments);

    assert_eq!(polylines.len(), 2);
    assert_eq!(polylines[0].points(), &[segments[0].start, segments[0].end]);
    assert_eq!(polylines[1].points(), &[segments[1].start, segments[1].end]);
}

#[test]
fn test_reversed_and_shuffled_input() {
    let expected = expected_square_points();
    let square = open_square();
    let stitcher = SegmentStitcher::default();

    let reversed_order: Vec<Segment> = square.iter().rev().copied().collect();
    let flipped: Vec<Segment> = square.iter().map(Segment::reversed).collect();
    let shuffled = vec![square[1], square[2].reversed(), square[0]];
    let middle_last = vec![square[0], square[2], square[1]];

    for input in [reversed_order, flipped, shuffled, middle_last] {
        let polylines = stitcher.stitch(&input);
        assert_eq!(polylines.len(), 1, "input {:?}", input);
        assert!(
            same_up_to_direction(&polylines[0], &expected),
            "got {:?}",
            polylines[0]
        );
    }
}

#[test]
fn test_segments_from_json() {
    let segments: Vec<Segment> =
        serde_json::from_str("[[[0,0,0],[1,0,0]], [[1,0,0],[1,1,0]]]").unwrap();
    let polylines = SegmentStitcher::default().stitch(&segments);
    assert_eq!(polylines[0].len(), 3);
}

#[test]
fn test_single_polyline_toolpath() {
    let polyline = Polyline::new(vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)]);
    let toolpath = ToolpathBuilder::new(Point3::new(0.0, 0.0, 0.5)).build(&[polyline]);

    assert_eq!(
        toolpath.points(),
        vec![
            Point3::new(0.0, 0.0, 0.5),
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.5),
        ]
    );
}

#[test]
fn test_toolpath_keeps_discovery_order() {
    let polylines = SegmentStitcher::default().stitch(&[
        seg([0.0, 0.0, 0.0], [1.0, 0.0, 0.0]),
        seg([5.0, 0.0, 0.0], [6.0, 0.0, 0.0]),
    ]);
    let toolpath = ToolpathBuilder::default().build(&polylines);
    let points = toolpath.points();

    assert_eq!(points.len(), 8);
    assert_eq!(points[3], Point3::new(1.0, 0.0, 0.5));
    assert_eq!(points[4], Point3::new(5.0, 0.0, 0.5));
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    fn grid_point() -> impl Strategy<Value = Point3> {
        (0i32..4, 0i32..4).prop_map(|(x, y)| Point3::new(x as f64, y as f64, 0.0))
    }

    proptest! {
        #[test]
        fn prop_every_segment_is_used_once(
            segments in prop::collection::vec((grid_point(), grid_point()), 0..30)
        ) {
            let segments: Vec<Segment> =
                segments.into_iter().map(|(a, b)| Segment::new(a, b)).collect();
            let polylines = SegmentStitcher::default().stitch(&segments);

            let used: usize = polylines.iter().map(Polyline::segment_count).sum();
            prop_assert_eq!(used, segments.len());
            prop_assert!(polylines.iter().all(|p| p.len() >= 2));
        }

        #[test]
        fn prop_consecutive_points_are_input_segments(
            segments in prop::collection::vec((grid_point(), grid_point()), 1..30)
        ) {
            let segments: Vec<Segment> =
                segments.into_iter().map(|(a, b)| Segment::new(a, b)).collect();
            let polylines = SegmentStitcher::default().stitch(&segments);

            for polyline in &polylines {
                for pair in polyline.points().windows(2) {
                    let found = segments.iter().any(|s| {
                        (s.start == pair[0] && s.end == pair[1])
                            || (s.start == pair[1] && s.end == pair[0])
                    });
                    prop_assert!(found);
                }
            }
        }

        #[test]
        fn prop_toolpath_adds_two_lifts_per_polyline(
            segments in prop::collection::vec((grid_point(), grid_point()), 0..30)
        ) {
            let segments: Vec<Segment> =
                segments.into_iter().map(|(a, b)| Segment::new(a, b)).collect();
            let polylines = SegmentStitcher::default().stitch(&segments);
            let toolpath = ToolpathBuilder::default().build(&polylines);

            let points: usize = polylines.iter().map(Polyline::len).sum();
            prop_assert_eq!(toolpath.len(), points + 2 * polylines.len());
        }
    }
}
