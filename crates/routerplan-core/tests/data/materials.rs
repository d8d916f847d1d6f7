use routerplan_core::data::materials::*;
use routerplan_core::data::FloatRange;
use routerplan_core::{DataError, Error};

const MATERIALS_JSON: &str = r#"[
    {"name": "Red Oak", "formal_feed_rate": 1500.0},
    {"name": "Acrylic", "formal_feed_rate": 1200.0, "user_feed_rate": 1400.0,
     "feed_rate_limits": {"minimum": 1000.0, "maximum": 1800.0}},
    {"name": "Aluminum 6061", "formal_feed_rate": 900.0, "user_feed_rate": 2500.0,
     "feed_rate_limits": {"minimum": 600.0, "maximum": 2200.0}}
]"#;

#[test]
fn test_material_table_from_json() {
    let table = MaterialTable::from_json(MATERIALS_JSON).unwrap();
    assert_eq!(table.len(), 3);
    assert!(!table.is_empty());

    let oak = table.get("Red Oak").unwrap();
    assert_eq!(oak.formal_feed_rate, 1500.0);
    assert_eq!(oak.user_feed_rate, None);
    assert_eq!(oak.effective_feed_rate().unwrap(), 1500.0);
}

#[test]
fn test_user_feed_rate_wins() {
    let table = MaterialTable::from_json(MATERIALS_JSON).unwrap();
    let acrylic = table.require("Acrylic").unwrap();
    assert_eq!(acrylic.effective_feed_rate().unwrap(), 1400.0);
}

#[test]
fn test_user_feed_rate_outside_limits() {
    let table = MaterialTable::from_json(MATERIALS_JSON).unwrap();
    let aluminum = table.require("Aluminum 6061").unwrap();
    match aluminum.effective_feed_rate() {
        Err(Error::Data(DataError::FeedRateOutOfRange {
            feed_rate, maximum, ..
        })) => {
            assert_eq!(feed_rate, 2500.0);
            assert_eq!(maximum, 2200.0);
        }
        other => panic!("expected FeedRateOutOfRange, got {:?}", other),
    }
}

#[test]
fn test_duplicate_material() {
    let result = MaterialTable::from_definitions(vec![
        MaterialTypeDefinition::new("MDF", 2000.0),
        MaterialTypeDefinition::new("MDF", 1800.0),
    ]);
    assert!(matches!(
        result,
        Err(Error::Data(DataError::DuplicateEntry { .. }))
    ));
}

#[test]
fn test_inverted_limits_rejected_on_load() {
    let json = r#"[{"name": "MDF", "formal_feed_rate": 2000.0,
        "feed_rate_limits": {"minimum": 3000.0, "maximum": 1000.0}}]"#;
    assert!(matches!(MaterialTable::from_json(json), Err(Error::Json(_))));
}

#[test]
fn test_limits_boundary_inclusive() {
    let mut mdf = MaterialTypeDefinition::new("MDF", 2000.0);
    mdf.feed_rate_limits = Some(FloatRange::new(1000.0, 3000.0).unwrap());
    mdf.user_feed_rate = Some(3000.0);
    assert_eq!(mdf.effective_feed_rate().unwrap(), 3000.0);
}
