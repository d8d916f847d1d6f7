use tracing::trace;

use routerplan_core::Dimension;

use super::{
    is_compatible, Anchor, Axis, AxisSide, MeasurementMode, OffsetSpec, Orientation,
    OriginLocation, Placement, PositionSpec,
};
use crate::error::CoordinateError;
use crate::geometry::{BoundingBox, FrameSet, ResolvedCoordinate};

/// Inputs a resolution reads besides the offset itself
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResolveContext {
    pub frames: FrameSet,
    /// End point of the previously resolved operation
    pub last_position: Option<ResolvedCoordinate>,
}

impl ResolveContext {
    pub fn new(frames: FrameSet) -> Self {
        Self {
            frames,
            last_position: None,
        }
    }

    pub fn with_last_position(mut self, position: ResolvedCoordinate) -> Self {
        self.last_position = Some(position);
        self
    }
}

/// Fail unless the orientation/mode pair appears in the compatibility table.
pub fn check_compatible(
    orientation: Orientation,
    mode: MeasurementMode,
) -> Result<(), CoordinateError> {
    if is_compatible(orientation, mode) {
        Ok(())
    } else {
        Err(CoordinateError::IncompatibleModeCombination { orientation, mode })
    }
}

fn active_box(mode: MeasurementMode, frames: &FrameSet) -> &BoundingBox {
    match mode {
        MeasurementMode::MaterialAbsolute | MeasurementMode::MaterialCenter => &frames.material,
        MeasurementMode::PartAbsolute | MeasurementMode::PartCenter | MeasurementMode::Relative => {
            &frames.part
        }
        MeasurementMode::WorkspaceAbsolute | MeasurementMode::WorkspaceCenter => &frames.workspace,
    }
}

/// Resolve one offset into an absolute coordinate.
///
/// The axis the offset does not move along keeps the reference point's
/// coordinate.
pub fn resolve(
    offset: &OffsetSpec,
    origin: OriginLocation,
    orientation: Orientation,
    mode: MeasurementMode,
    ctx: &ResolveContext,
) -> Result<ResolvedCoordinate, CoordinateError> {
    check_compatible(orientation, mode)?;
    if offset.value.dimension != Dimension::Length {
        return Err(CoordinateError::NotALength);
    }

    let (reference, bounds, centered) = match offset.anchor {
        Anchor::Absolute => (ctx.frames.physical_origin(), ctx.frames.workspace, false),
        Anchor::Relative => {
            let bounds = match orientation {
                Orientation::Workspace => &ctx.frames.workspace,
                _ => active_box(mode, &ctx.frames),
            };
            let anchor = origin
                .point_on(bounds)
                .ok_or(CoordinateError::UndefinedOrigin)?;
            let reference = match orientation {
                Orientation::Relative => ctx
                    .last_position
                    .ok_or(CoordinateError::NoReferencePosition)?,
                Orientation::Edge | Orientation::Workpiece | Orientation::Workspace => anchor,
            };
            (reference, *bounds, mode.is_centered())
        }
    };

    let resolved = apply_offset(offset, reference, &bounds, centered)?;
    trace!(
        side = %offset.axis_side,
        value = offset.value.magnitude,
        x = resolved.x,
        y = resolved.y,
        "resolved offset"
    );
    Ok(resolved)
}

fn apply_offset(
    offset: &OffsetSpec,
    reference: ResolvedCoordinate,
    bounds: &BoundingBox,
    centered: bool,
) -> Result<ResolvedCoordinate, CoordinateError> {
    let value = offset.value.magnitude;
    let center = bounds.center();
    let half_extent = || {
        if value < 0.0 {
            Err(CoordinateError::NegativeExtent { value })
        } else {
            Ok(value / 2.0)
        }
    };

    let mut point = reference;
    match offset.axis_side {
        AxisSide::Left => point.x -= value,
        AxisSide::Right => point.x += value,
        AxisSide::Top => point.y -= value,
        AxisSide::Bottom => point.y += value,
        AxisSide::Center => {
            if centered {
                point = center;
            }
        }
        AxisSide::LeftEdgeToCenter => point.x = center.x + half_extent()?,
        AxisSide::RightEdgeToCenter => point.x = center.x - half_extent()?,
        AxisSide::TopEdgeToCenter => point.y = center.y + half_extent()?,
        AxisSide::BottomEdgeToCenter => point.y = center.y - half_extent()?,
    }
    Ok(point)
}

/// Resolve an x offset and a y offset into one point.
pub fn resolve_position(
    position: &PositionSpec,
    placement: &Placement,
    ctx: &ResolveContext,
) -> Result<ResolvedCoordinate, CoordinateError> {
    for (offset, axis) in [(&position.x, Axis::X), (&position.y, Axis::Y)] {
        if !offset.axis_side.applies_to(axis) {
            return Err(CoordinateError::WrongAxis {
                side: offset.axis_side,
                axis,
            });
        }
    }

    let resolve_axis = |offset: &OffsetSpec| {
        resolve(
            offset,
            placement.origin,
            placement.orientation,
            placement.mode,
            ctx,
        )
    };
    let x = resolve_axis(&position.x)?.x;
    let y = resolve_axis(&position.y)?.y;
    Ok(ResolvedCoordinate::new(x, y))
}
