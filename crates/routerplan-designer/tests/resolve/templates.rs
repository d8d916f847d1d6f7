use routerplan_core::{RawMeasurement, UnitTable};
use routerplan_designer::operation::*;
use routerplan_designer::placement::*;
use routerplan_designer::{BoundingBox, CutTemplate, FrameSet, ResolveError, ResolvedCoordinate};

fn ctx() -> ResolveContext {
    ResolveContext::new(FrameSet::uniform(BoundingBox::new(0.0, 0.0, 600.0, 400.0)))
}

fn edge() -> Placement {
    Placement::new(
        OriginLocation::TopLeft,
        Orientation::Edge,
        MeasurementMode::PartAbsolute,
    )
}

fn relative() -> Placement {
    Placement::new(
        OriginLocation::TopLeft,
        Orientation::Relative,
        MeasurementMode::Relative,
    )
}

fn circle(x: &str, y: &str, radius: &str) -> Operation {
    Operation::DrawCircle(CenterRadius {
        center: PointField::right_down(x, y),
        radius: RawMeasurement::parse(radius),
    })
}

fn coaster_grid() -> CutTemplate {
    let mut template = CutTemplate::new("Coaster grid");
    for row in 0..4 {
        for col in 0..5 {
            let x = format!("{} + {}", 50 + col * 100, "1/2in");
            let y = format!("{}", 50 + row * 100);
            template.add_operation(OperationSpec::new(circle(&x, &y, "45"), edge()));
        }
    }
    template
}

#[test]
fn test_parallel_matches_document_order() {
    let template = coaster_grid();
    let resolver = Resolver::new(UnitTable::new());
    assert!(!template.is_order_dependent(&resolver));

    let in_order = template.resolve_in_order(&resolver, ctx()).unwrap();
    let parallel = template.resolve_parallel(&resolver, ctx()).unwrap();
    assert_eq!(in_order.len(), 20);
    assert_eq!(in_order, parallel);
}

#[test]
fn test_relative_operations_chain() {
    let template = CutTemplate::new("Steps")
        .with_operation(OperationSpec::new(
            Operation::MoveTo(At {
                at: PointField::right_down("10", "10"),
            }),
            edge(),
        ))
        .with_operation(OperationSpec::new(
            Operation::DrawLine(Segment {
                start: PointField::right_down("0", "0"),
                end: PointField::right_down("5", "5"),
            }),
            relative(),
        ))
        .with_operation(OperationSpec::new(
            Operation::Point(At {
                at: PointField::right_down("1", "0"),
            }),
            relative(),
        ));
    let resolver = Resolver::new(UnitTable::new());
    assert!(template.is_order_dependent(&resolver));
    let resolved = template.resolve_parallel(&resolver, ctx()).unwrap();
    assert_eq!(
        resolved[1].primitive,
        Primitive::Line {
            start: ResolvedCoordinate::new(10.0, 10.0),
            end: ResolvedCoordinate::new(15.0, 15.0),
        }
    );
    assert_eq!(
        resolved[2].primitive,
        Primitive::Point {
            at: ResolvedCoordinate::new(16.0, 15.0)
        }
    );
}

#[test]
fn test_first_relative_operation_has_no_reference() {
    let template = CutTemplate::new("Orphan").with_operation(OperationSpec::new(
        Operation::MoveTo(At {
            at: PointField::right_down("1", "1"),
        }),
        relative(),
    ));
    let err = template
        .resolve_in_order(&Resolver::default(), ctx())
        .unwrap_err();
    match err {
        ResolveError::InOperation { index, source, .. } => {
            assert_eq!(index, 0);
            assert!(matches!(
                *source,
                ResolveError::Coordinate(routerplan_designer::CoordinateError::NoReferencePosition)
            ));
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_error_reports_failing_operation() {
    let mut template = coaster_grid();
    template.operations[7] = OperationSpec::new(circle("10", "10", "1 - 2"), edge());
    let resolver = Resolver::new(UnitTable::new());

    for result in [
        template.resolve_in_order(&resolver, ctx()),
        template.resolve_parallel(&resolver, ctx()),
    ] {
        let err = result.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Operation 7 (draw_circle): Invalid radius: Length must not be negative: -1"
        );
    }
}

#[test]
fn test_parallel_reports_lowest_failing_index() {
    let mut template = coaster_grid();
    template.operations[3] = OperationSpec::new(circle("10", "10", "-1"), edge());
    template.operations[15] = OperationSpec::new(circle("10", "10", "1/0"), edge());
    template.operations[19] = OperationSpec::new(circle("10", "10", "#"), edge());
    let resolver = Resolver::new(UnitTable::new());

    for _ in 0..16 {
        match template.resolve_parallel(&resolver, ctx()).unwrap_err() {
            ResolveError::InOperation { index, .. } => assert_eq!(index, 3),
            other => panic!("unexpected {:?}", other),
        }
    }
}

#[test]
fn test_unplaced_operations_take_resolver_default() {
    let template = CutTemplate::new("Defaults")
        .with_operation(OperationSpec::new(
            Operation::MoveTo(At {
                at: PointField::right_down("10", "10"),
            }),
            edge(),
        ))
        .with_operation(OperationSpec::unplaced(Operation::Point(At {
            at: PointField::right_down("1", "2"),
        })));
    let json = template.to_json().unwrap();
    assert_eq!(json.matches("\"placement\"").count(), 1);

    let absolute = Resolver::new(UnitTable::new()).with_default_placement(edge());
    assert!(!template.is_order_dependent(&absolute));
    let resolved = template.resolve_parallel(&absolute, ctx()).unwrap();
    assert_eq!(
        resolved[1].primitive,
        Primitive::Point {
            at: ResolvedCoordinate::new(1.0, 2.0)
        }
    );

    let chained = Resolver::new(UnitTable::new()).with_default_placement(relative());
    assert!(template.is_order_dependent(&chained));
    let resolved = template.resolve_parallel(&chained, ctx()).unwrap();
    assert_eq!(
        resolved[1].primitive,
        Primitive::Point {
            at: ResolvedCoordinate::new(11.0, 12.0)
        }
    );
}

#[test]
fn test_template_json_keeps_text() {
    let template = coaster_grid();
    let json = template.to_json().unwrap();
    assert!(json.contains("\"kind\": \"draw_circle\""));
    assert!(json.contains("50 + 1/2in"));
    let back = CutTemplate::from_json(&json).unwrap();
    assert_eq!(back.len(), 20);
    assert_eq!(back.operations, template.operations);
}
