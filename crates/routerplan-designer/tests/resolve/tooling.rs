use routerplan_core::{
    DataError, Error as CoreError, MaterialTable, ToolName, ToolTypeTable, UnitTable,
};
use routerplan_designer::operation::*;
use routerplan_designer::placement::*;
use routerplan_designer::{BoundingBox, FrameSet, ResolveError};

const TOOL_TYPES: &str = r#"[
    {"type_name": "end_mill", "supported": true, "property_names": ["diameter", "flutes"]},
    {"type_name": "v_bit", "supported": true, "property_names": ["angle"]},
    {"type_name": "drag_knife", "supported": false}
]"#;

const MATERIALS: &str = r#"[
    {"name": "Red Oak", "formal_feed_rate": 1500.0},
    {"name": "Acrylic", "formal_feed_rate": 1200.0, "user_feed_rate": 1400.0,
     "feed_rate_limits": {"minimum": 1000.0, "maximum": 1800.0}}
]"#;

fn tool(tool_type: &str) -> ToolName {
    ToolName {
        name: "shop tool".to_string(),
        tool_type: tool_type.to_string(),
    }
}

fn spec(tool_type: &str, material: &str) -> OperationSpec {
    OperationSpec::new(
        Operation::FillSquare(SquareSize {
            position: PointField::right_down("10", "10"),
            side: routerplan_core::RawMeasurement::parse("2 in"),
        }),
        Placement::new(
            OriginLocation::TopLeft,
            Orientation::Edge,
            MeasurementMode::MaterialAbsolute,
        ),
    )
    .with_tooling(tool(tool_type), material)
}

fn ctx() -> ResolveContext {
    ResolveContext::new(FrameSet::uniform(BoundingBox::new(0.0, 0.0, 300.0, 300.0)))
}

#[test]
fn test_feed_rate_from_material() {
    let tools = ToolTypeTable::from_json(TOOL_TYPES).unwrap();
    let materials = MaterialTable::from_json(MATERIALS).unwrap();
    let resolver = Resolver::new(UnitTable::new())
        .with_tool_types(&tools)
        .with_materials(&materials);

    let oak = resolver.resolve(&spec("end_mill", "Red Oak"), &mut ctx()).unwrap();
    assert_eq!(oak.feed_rate, Some(1500.0));
    assert!(oak.fill);

    let acrylic = resolver.resolve(&spec("v_bit", "Acrylic"), &mut ctx()).unwrap();
    assert_eq!(acrylic.feed_rate, Some(1400.0));
}

#[test]
fn test_unsupported_and_unknown_tooling() {
    let tools = ToolTypeTable::from_json(TOOL_TYPES).unwrap();
    let materials = MaterialTable::from_json(MATERIALS).unwrap();
    let resolver = Resolver::new(UnitTable::new())
        .with_tool_types(&tools)
        .with_materials(&materials);

    assert!(matches!(
        resolver.resolve(&spec("drag_knife", "Red Oak"), &mut ctx()),
        Err(ResolveError::Tooling(CoreError::Data(
            DataError::UnsupportedToolType { .. }
        )))
    ));
    assert!(matches!(
        resolver.resolve(&spec("laser", "Red Oak"), &mut ctx()),
        Err(ResolveError::Tooling(CoreError::Data(DataError::UnknownEntry {
            kind: "tool type",
            ..
        })))
    ));
    assert!(matches!(
        resolver.resolve(&spec("end_mill", "Balsa"), &mut ctx()),
        Err(ResolveError::Tooling(CoreError::Data(DataError::UnknownEntry { .. })))
    ));
}

#[test]
fn test_untooled_operation_has_no_feed_rate() {
    let mut untooled = spec("end_mill", "Red Oak");
    untooled.tooling = None;
    let op = resolve_operation(&untooled, &mut ctx(), &UnitTable::new()).unwrap();
    assert_eq!(op.feed_rate, None);
}
