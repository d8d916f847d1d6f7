use routerplan_core::data::tools::*;
use routerplan_core::{DataError, Error};

const TOOL_TYPES_JSON: &str = r#"[
    {"type_name": "end_mill", "supported": true, "property_names": ["diameter", "flute_length", "flutes"]},
    {"type_name": "v_bit", "supported": true, "property_names": ["diameter", "angle"]},
    {"type_name": "drag_knife", "supported": false}
]"#;

#[test]
fn test_tool_type_table_from_json() {
    let table = ToolTypeTable::from_json(TOOL_TYPES_JSON).unwrap();
    assert_eq!(table.len(), 3);

    let names: Vec<_> = table.iter().map(|t| t.type_name.as_str()).collect();
    assert_eq!(names, vec!["end_mill", "v_bit", "drag_knife"]);

    let end_mill = table.get("end_mill").unwrap();
    assert_eq!(
        end_mill.property_names,
        vec!["diameter", "flute_length", "flutes"]
    );
    assert!(table.get("drag_knife").unwrap().property_names.is_empty());
}

#[test]
fn test_unsupported_tool_type() {
    let table = ToolTypeTable::from_json(TOOL_TYPES_JSON).unwrap();
    let tool = ToolName {
        name: "Roland blade".to_string(),
        tool_type: "drag_knife".to_string(),
    };
    assert!(matches!(
        table.resolve_tool(&tool),
        Err(Error::Data(DataError::UnsupportedToolType { .. }))
    ));
}

#[test]
fn test_definition_field_order() {
    let definition = ToolTypeDefinition::new("v_bit", true).with_property("angle");
    let json = serde_json::to_string(&definition).unwrap();
    assert_eq!(
        json,
        r#"{"type_name":"v_bit","supported":true,"property_names":["angle"]}"#
    );
}

#[test]
fn test_malformed_json() {
    assert!(matches!(
        ToolTypeTable::from_json("{not json"),
        Err(Error::Json(_))
    ));
}
