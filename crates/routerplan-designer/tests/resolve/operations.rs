use routerplan_core::{AngleDirection, RawAngle, RawMeasurement, UnitTable};
use routerplan_designer::operation::*;
use routerplan_designer::placement::*;
use routerplan_designer::{BoundingBox, FrameSet, ResolveError, ResolvedCoordinate};

fn ctx() -> ResolveContext {
    ResolveContext::new(FrameSet {
        material: BoundingBox::new(0.0, 0.0, 600.0, 400.0),
        part: BoundingBox::new(100.0, 100.0, 300.0, 200.0),
        workspace: BoundingBox::new(0.0, 0.0, 1200.0, 900.0),
    })
}

fn part_top_left() -> Placement {
    Placement::new(
        OriginLocation::TopLeft,
        Orientation::Edge,
        MeasurementMode::PartAbsolute,
    )
}

fn resolve_shape(shape: Operation) -> Result<CanonicalOperation, ResolveError> {
    let spec = OperationSpec::new(shape, part_top_left());
    resolve_operation(&spec, &mut ctx(), &UnitTable::new())
}

fn pt(x: &str, y: &str) -> PointField {
    PointField::right_down(x, y)
}

fn m(text: &str) -> RawMeasurement {
    RawMeasurement::parse(text)
}

fn close(a: ResolvedCoordinate, b: ResolvedCoordinate) -> bool {
    (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
}

fn all_shapes() -> Vec<Operation> {
    let points = || Points {
        points: vec![pt("0", "0"), pt("10", "0"), pt("10", "10")],
    };
    let lw = || LengthWidth {
        position: pt("50", "50"),
        length: m("20"),
        width: m("10"),
    };
    let square = || SquareSize {
        position: pt("5", "5"),
        side: m("1in"),
    };
    let cr = || CenterRadius {
        center: pt("150", "100"),
        radius: m("25"),
    };
    let cd = || CenterDiameter {
        center: pt("150", "100"),
        diameter: m("50"),
    };
    let heading = || AngleLength {
        start: pt("0", "0"),
        angle: RawAngle::parse("90"),
        direction: None,
        length: m("10"),
    };
    let arc = || ArcParams {
        center: pt("150", "100"),
        radius: m("25"),
        start_angle: RawAngle::parse("0"),
        sweep: RawAngle::parse("90"),
        direction: None,
    };
    let polygon = || RegularPolygonParams {
        center: pt("150", "100"),
        radius: m("20"),
        sides: 5,
        rotation: Some(RawAngle::parse("-90")),
    };
    let closed_path = || PathParams {
        data: "M 0, 0; L 10, 0; Q 15, 5, 10, 10; C 5, 15, 0, 15, 0, 10; Z".to_string(),
    };
    let at = || At { at: pt("1", "2") };

    vec![
        Operation::DrawLine(Segment {
            start: pt("0", "0"),
            end: pt("30", "40"),
        }),
        Operation::DrawLineAtAngle(heading()),
        Operation::DrawPolyline(Points {
            points: vec![pt("0", "0"), pt("5", "5")],
        }),
        Operation::DrawPolygon(points()),
        Operation::DrawTriangle(points()),
        Operation::DrawRectangle(lw()),
        Operation::DrawCenteredRectangle(lw()),
        Operation::DrawSquare(square()),
        Operation::DrawCircle(cr()),
        Operation::DrawCircleByDiameter(cd()),
        Operation::DrawArc(arc()),
        Operation::DrawEllipse(lw()),
        Operation::DrawRegularPolygon(polygon()),
        Operation::DrawQuadraticCurve(QuadraticParams {
            start: pt("0", "0"),
            control: pt("5", "10"),
            end: pt("10", "0"),
        }),
        Operation::DrawCubicCurve(CubicParams {
            start: pt("0", "0"),
            control1: pt("0", "10"),
            control2: pt("10", "10"),
            end: pt("10", "0"),
        }),
        Operation::DrawPath(PathParams {
            data: "M 0, 0; L 10, 0; E; M 0, 5; L 10, 5; E".to_string(),
        }),
        Operation::FillPolygon(points()),
        Operation::FillTriangle(points()),
        Operation::FillRectangle(lw()),
        Operation::FillCenteredRectangle(lw()),
        Operation::FillSquare(square()),
        Operation::FillCircle(cr()),
        Operation::FillCircleByDiameter(cd()),
        Operation::FillEllipse(lw()),
        Operation::FillRegularPolygon(polygon()),
        Operation::FillSector(arc()),
        Operation::FillPath(closed_path()),
        Operation::MoveTo(at()),
        Operation::MoveAtAngle(heading()),
        Operation::MoveHome,
        Operation::Point(at()),
        Operation::PointAtAngle(heading()),
    ]
}

#[test]
fn test_every_operation_resolves_and_renders() {
    let shapes = all_shapes();
    assert_eq!(shapes.len(), 32);
    for shape in shapes {
        let name = shape.name();
        let category = shape.category();
        let op = resolve_shape(shape).unwrap_or_else(|e| panic!("{}: {}", name, e));
        assert_eq!(op.kind, name);
        assert_eq!(op.fill, category == OperationCategory::Fill);
        let path = op.to_path();
        assert!(path.iter().count() > 0, "{} rendered nothing", name);
    }
}

#[test]
fn test_rectangles() {
    let lw = LengthWidth {
        position: pt("50", "50"),
        length: m("20"),
        width: m("10"),
    };
    let corner = resolve_shape(Operation::DrawRectangle(lw.clone())).unwrap();
    assert_eq!(
        corner.primitive,
        Primitive::Rectangle {
            corner: ResolvedCoordinate::new(150.0, 150.0),
            width: 20.0,
            height: 10.0,
        }
    );
    let centered = resolve_shape(Operation::FillCenteredRectangle(lw)).unwrap();
    assert_eq!(
        centered.primitive,
        Primitive::Rectangle {
            corner: ResolvedCoordinate::new(140.0, 145.0),
            width: 20.0,
            height: 10.0,
        }
    );
}

#[test]
fn test_line_at_angle_with_direction() {
    let op = resolve_shape(Operation::DrawLineAtAngle(AngleLength {
        start: pt("0", "0"),
        angle: RawAngle::parse("90"),
        direction: Some(AngleDirection::Left),
        length: m("10"),
    }))
    .unwrap();
    match op.primitive {
        Primitive::Line { start, end } => {
            assert_eq!(start, ResolvedCoordinate::new(100.0, 100.0));
            // 90 to the left wraps to 270: straight up in a y-down frame
            assert!(close(end, ResolvedCoordinate::new(100.0, 90.0)));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_path_coordinates_resolve_through_placement() {
    let op = resolve_shape(Operation::DrawPath(PathParams {
        data: "M 0, 0; L 1 in, 0; L 1in, 1/2in; Z".to_string(),
    }))
    .unwrap();
    match op.primitive {
        Primitive::Path { subpaths } => {
            assert_eq!(subpaths.len(), 1);
            let subpath = &subpaths[0];
            assert_eq!(subpath.start, ResolvedCoordinate::new(100.0, 100.0));
            assert!(subpath.closed);
            match subpath.segments[1] {
                PathSegment::Line { to } => {
                    assert!(close(to, ResolvedCoordinate::new(125.4, 112.7)))
                }
                other => panic!("unexpected {:?}", other),
            }
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_path_syntax_checked_before_evaluation() {
    let err = resolve_shape(Operation::DrawPath(PathParams {
        data: "M 1/0, 0; L 1, 1".to_string(),
    }))
    .unwrap_err();
    assert!(matches!(err, ResolveError::MalformedPath { index: 2, .. }));
}

#[test]
fn test_triangle_needs_three_points() {
    let err = resolve_shape(Operation::DrawTriangle(Points {
        points: vec![pt("0", "0"), pt("1", "1")],
    }))
    .unwrap_err();
    assert!(matches!(
        err,
        ResolveError::ParameterOutOfRange { parameter: "points", .. }
    ));
}

#[test]
fn test_arc_direction() {
    let arc = |direction| ArcParams {
        center: pt("0", "0"),
        radius: m("10"),
        start_angle: RawAngle::parse("0"),
        sweep: RawAngle::parse("90"),
        direction,
    };
    let cw = resolve_shape(Operation::DrawArc(arc(None))).unwrap();
    let ccw = resolve_shape(Operation::DrawArc(arc(Some(AngleDirection::CounterClockwise)))).unwrap();
    assert!(close(cw.primitive.end_point(), ResolvedCoordinate::new(100.0, 110.0)));
    assert!(close(ccw.primitive.end_point(), ResolvedCoordinate::new(100.0, 90.0)));

    let negative = resolve_shape(Operation::DrawArc(ArcParams {
        sweep: RawAngle::parse("-90"),
        ..arc(None)
    }))
    .unwrap();
    match &negative.primitive {
        Primitive::Arc {
            sweep_angle,
            clockwise,
            ..
        } => {
            assert_eq!(*sweep_angle, 270.0);
            assert!(*clockwise);
        }
        other => panic!("unexpected {:?}", other),
    }
    assert!(close(negative.primitive.end_point(), ResolvedCoordinate::new(100.0, 90.0)));

    let full = resolve_shape(Operation::DrawArc(ArcParams {
        sweep: RawAngle::parse("360"),
        ..arc(None)
    }))
    .unwrap_err();
    assert!(matches!(
        full,
        ResolveError::ParameterOutOfRange { parameter: "sweep", .. }
    ));
}

#[test]
fn test_move_home_goes_to_physical_origin() {
    let mut ctx = ctx();
    let spec = OperationSpec::new(Operation::MoveHome, part_top_left());
    let op = resolve_operation(&spec, &mut ctx, &UnitTable::new()).unwrap();
    assert_eq!(op.primitive, Primitive::Travel { to: ResolvedCoordinate::new(0.0, 0.0) });
    assert_eq!(op.pen, PenState::Move);
    assert_eq!(ctx.last_position, Some(ResolvedCoordinate::new(0.0, 0.0)));
}

#[test]
fn test_measure_errors_name_the_field() {
    let err = resolve_shape(Operation::DrawCircle(CenterRadius {
        center: pt("0", "0"),
        radius: m("3 # 4"),
    }))
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid radius: Unrecognized character '#' at position 2"
    );
}
