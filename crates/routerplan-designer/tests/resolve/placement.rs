use proptest::prelude::*;
use routerplan_core::CanonicalValue;
use routerplan_designer::placement::*;
use routerplan_designer::{BoundingBox, CoordinateError, FrameSet, ResolvedCoordinate};

fn orientation() -> impl Strategy<Value = Orientation> {
    prop::sample::select(Orientation::ALL.to_vec())
}

fn mode() -> impl Strategy<Value = MeasurementMode> {
    prop::sample::select(MeasurementMode::ALL.to_vec())
}

proptest! {
    #[test]
    fn right_offset_from_top_left_is_mode_independent(
        left in -500.0f64..500.0,
        top in -500.0f64..500.0,
        orientation in orientation(),
        mode in mode(),
    ) {
        let bounds = BoundingBox::new(left, top, 300.0, 200.0);
        let ctx = ResolveContext::new(FrameSet::uniform(bounds))
            .with_last_position(bounds.top_left());
        let offset = OffsetSpec::new(AxisSide::Right, Anchor::Relative, CanonicalValue::length(50.0));

        let result = resolve(&offset, OriginLocation::TopLeft, orientation, mode, &ctx);
        if is_compatible(orientation, mode) {
            let point = result.unwrap();
            prop_assert_eq!(point.x, left + 50.0);
            prop_assert_eq!(point.y, top);
        } else {
            prop_assert_eq!(
                result.unwrap_err(),
                CoordinateError::IncompatibleModeCombination { orientation, mode }
            );
        }
    }

    #[test]
    fn resolution_is_deterministic(
        value in -1000.0f64..1000.0,
        orientation in orientation(),
        mode in mode(),
    ) {
        let frames = FrameSet {
            material: BoundingBox::new(0.0, 0.0, 600.0, 400.0),
            part: BoundingBox::new(100.0, 50.0, 300.0, 200.0),
            workspace: BoundingBox::new(0.0, 0.0, 1200.0, 900.0),
        };
        let ctx = ResolveContext::new(frames).with_last_position(ResolvedCoordinate::new(7.0, 9.0));
        let offset = OffsetSpec::new(AxisSide::Bottom, Anchor::Relative, CanonicalValue::length(value));
        let a = resolve(&offset, OriginLocation::MiddleRight, orientation, mode, &ctx);
        let b = resolve(&offset, OriginLocation::MiddleRight, orientation, mode, &ctx);
        prop_assert_eq!(a, b);
    }
}

#[test]
fn test_every_incompatible_pair_fails_before_origin_check() {
    let ctx = ResolveContext::new(FrameSet::uniform(BoundingBox::new(0.0, 0.0, 300.0, 200.0)));
    let offset = OffsetSpec::new(AxisSide::Left, Anchor::Relative, CanonicalValue::length(1.0));
    for orientation in Orientation::ALL {
        for mode in MeasurementMode::ALL {
            if is_compatible(orientation, mode) {
                continue;
            }
            assert!(matches!(
                resolve(&offset, OriginLocation::None, orientation, mode, &ctx),
                Err(CoordinateError::IncompatibleModeCombination { .. })
            ));
        }
    }
}

#[test]
fn test_undefined_origin_even_for_relative() {
    let ctx = ResolveContext::new(FrameSet::default())
        .with_last_position(ResolvedCoordinate::new(1.0, 1.0));
    let offset = OffsetSpec::new(AxisSide::Left, Anchor::Relative, CanonicalValue::length(1.0));
    assert_eq!(
        resolve(
            &offset,
            OriginLocation::None,
            Orientation::Relative,
            MeasurementMode::Relative,
            &ctx
        ),
        Err(CoordinateError::UndefinedOrigin)
    );
}

#[test]
fn test_centered_modes_snap_center_side() {
    let frames = FrameSet {
        material: BoundingBox::new(0.0, 0.0, 600.0, 400.0),
        part: BoundingBox::new(100.0, 50.0, 300.0, 200.0),
        workspace: BoundingBox::new(0.0, 0.0, 1200.0, 900.0),
    };
    let ctx = ResolveContext::new(frames);
    let placement = |mode| Placement::new(OriginLocation::BottomLeft, Orientation::Edge, mode);
    let centered = PositionSpec {
        x: OffsetSpec::new(AxisSide::Center, Anchor::Relative, CanonicalValue::length(0.0)),
        y: OffsetSpec::new(AxisSide::Center, Anchor::Relative, CanonicalValue::length(0.0)),
    };

    let expectations = [
        (MeasurementMode::MaterialCenter, ResolvedCoordinate::new(300.0, 200.0)),
        (MeasurementMode::PartCenter, ResolvedCoordinate::new(250.0, 150.0)),
        (MeasurementMode::WorkspaceCenter, ResolvedCoordinate::new(600.0, 450.0)),
        (MeasurementMode::PartAbsolute, ResolvedCoordinate::new(100.0, 250.0)),
    ];
    for (mode, expected) in expectations {
        assert_eq!(
            resolve_position(&centered, &placement(mode), &ctx).unwrap(),
            expected,
            "{}",
            mode
        );
    }
}
