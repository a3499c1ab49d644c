use drillkit_core::data::{
    CornerPosition, DrillPoint, DrillPointRecord, Edge, Point3, Vector3, Workpiece,
    WorkpieceRecord,
};
use drillkit_geometry::{JobPipeline, PipelineConfig, WorkpiecePositioner, WorkpieceRotator};

fn workpiece(width: f64, height: f64, thickness: f64) -> Workpiece {
    Workpiece::from_record(WorkpieceRecord {
        corner_points: vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(width, 0.0, 0.0),
            Point3::new(width, height, 0.0),
            Point3::new(0.0, height, 0.0),
        ],
        width,
        height,
        thickness,
    })
    .unwrap()
}

fn record(position: (f64, f64, f64), vector: (f64, f64, f64)) -> DrillPointRecord {
    DrillPointRecord {
        position: position.into(),
        diameter: 8.0,
        depth: 21.5,
        extrusion_vector: vector.into(),
        layer: "EDGE.DRILL_D8.0_P21.5".to_string(),
    }
}

#[test]
fn test_two_edge_points_end_to_end() {
    let points: Vec<DrillPoint> = vec![
        record((50.0, -10.0, 0.0), (1.0, 0.0, 0.0)).into(),
        record((-250.0, -10.0, -500.0), (-1.0, 0.0, 0.0)).into(),
    ];

    let pipeline = JobPipeline::new(PipelineConfig {
        apply_positioning: false,
        ..Default::default()
    });
    let outcome = pipeline
        .run(workpiece(500.0, 300.0, 20.0), points, None)
        .unwrap();

    assert_eq!(outcome.points.len(), 2);

    let right = &outcome.points[0];
    assert_eq!(right.edge, Some(Edge::Right));
    assert!(!right.transformation_skipped);
    assert_eq!(right.machine_position, Some(Point3::new(500.0, 250.0, 10.0)));

    let left = &outcome.points[1];
    assert_eq!(left.edge, Some(Edge::Left));
    assert!(!left.transformation_skipped);
    assert_eq!(left.machine_position, Some(Point3::new(0.0, 50.0, 10.0)));

    // One X+ group and one X- group at 8.0mm.
    assert_eq!(outcome.report.analysis.statistics.total_groups, 2);
}

#[test]
fn test_positioning_shifts_machine_coordinates() {
    let points: Vec<DrillPoint> = vec![record((50.0, -10.0, 0.0), (1.0, 0.0, 0.0)).into()];

    let pipeline = JobPipeline::with_defaults();
    let outcome = pipeline
        .run(workpiece(500.0, 300.0, 20.0), points, None)
        .unwrap();

    // Bottom-left to top-left is a shift down by the full height.
    let point = &outcome.points[0];
    assert_eq!(point.machine_position, Some(Point3::new(500.0, -50.0, 10.0)));
    assert_eq!(point.applied_offset, Some((0.0, -300.0)));
}

#[test]
fn test_mixed_batch_keeps_vertical_points() {
    let points: Vec<DrillPoint> = vec![
        record((50.0, -10.0, 0.0), (1.0, 0.0, 0.0)).into(),
        record((150.0, 250.0, 20.0), (0.0, 0.0, 1.0)).into(),
    ];

    let pipeline = JobPipeline::with_defaults();
    let outcome = pipeline
        .run(workpiece(500.0, 300.0, 20.0), points, None)
        .unwrap();

    assert_eq!(outcome.points.len(), 2);
    let vertical = &outcome.points[1];
    assert_eq!(vertical.edge, Some(Edge::Vertical));
    assert!(vertical.transformation_skipped);
    assert!(vertical.machine_position.is_none());
}

#[test]
fn test_rotation_closure_on_corner_sets() {
    let mut rotator = WorkpieceRotator::from_corners(vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(555.0, 0.0, 0.0),
        Point3::new(555.0, 570.0, 0.0),
        Point3::new(0.0, 570.0, 0.0),
    ])
    .unwrap();

    let before: Vec<Point3> = rotator.current_corners().to_vec();
    for _ in 0..4 {
        rotator.rotate_90_clockwise();
    }
    for (restored, original) in rotator.current_corners().iter().zip(&before) {
        assert!((restored.x - original.x).abs() < 0.05);
        assert!((restored.y - original.y).abs() < 0.05);
    }
}

#[test]
fn test_dimensions_track_point_c_after_rotation() {
    let mut rotator = WorkpieceRotator::from_corners(vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(555.0, 0.0, 0.0),
        Point3::new(555.0, 570.0, 0.0),
        Point3::new(0.0, 570.0, 0.0),
    ])
    .unwrap();

    rotator.rotate_90_clockwise();
    let point_c = rotator.current_corners()[2];
    let (width, height) = rotator.dimensions();
    assert_eq!(width, point_c.x.abs());
    assert_eq!(height, point_c.y.abs());
    assert_eq!((width, height), (570.0, 555.0));
}

#[test]
fn test_offset_symmetry() {
    let positioner = WorkpiecePositioner::new(CornerPosition::TopLeft, 555.0, 570.0);
    assert_eq!(
        positioner.calculate_offset(drillkit_core::data::Orientation::BottomLeft),
        (0.0, -570.0)
    );
    assert_eq!(
        positioner.calculate_offset(drillkit_core::data::Orientation::TopRight),
        (-555.0, 0.0)
    );
}
