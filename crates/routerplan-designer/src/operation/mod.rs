//! Drawing, filling, moving and point operations.
//!
//! An [`OperationSpec`] is the editable form: every measurement is kept as
//! the text the user typed. [`resolve_operation`] turns it into a
//! [`CanonicalOperation`] holding a flat, fully resolved [`Primitive`]. The
//! two forms never share storage, so the text always survives a round trip.

mod path_data;
mod primitive;
mod resolver;

use serde::{Deserialize, Serialize};
use std::fmt;

use routerplan_core::{AngleDirection, RawAngle, RawMeasurement, ToolName};

use crate::placement::{Anchor, AxisSide, Placement};

pub use path_data::{parse_path_data, PathCommand, PathPair};
pub use primitive::{CanonicalOperation, PathSegment, Primitive, Subpath};
pub use resolver::{resolve_operation, Resolver};

/// Whether the tool marks the work while traversing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PenState {
    /// Non-marking traversal
    Move,
    /// Marking traversal
    #[default]
    Draw,
}

/// Offset text along one axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OffsetField {
    pub side: AxisSide,
    #[serde(default)]
    pub anchor: Anchor,
    pub value: RawMeasurement,
}

impl OffsetField {
    pub fn new(side: AxisSide, value: &str) -> Self {
        Self {
            side,
            anchor: Anchor::Relative,
            value: RawMeasurement::parse(value),
        }
    }

    pub fn absolute(mut self) -> Self {
        self.anchor = Anchor::Absolute;
        self
    }
}

/// A point given as one offset per axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointField {
    pub x: OffsetField,
    pub y: OffsetField,
}

impl PointField {
    /// Point measured right and down from the placement's reference
    pub fn right_down(x: &str, y: &str) -> Self {
        Self {
            x: OffsetField::new(AxisSide::Right, x),
            y: OffsetField::new(AxisSide::Bottom, y),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: PointField,
    pub end: PointField,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Points {
    pub points: Vec<PointField>,
}

/// `length` runs along X, `width` along Y
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LengthWidth {
    pub position: PointField,
    pub length: RawMeasurement,
    pub width: RawMeasurement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquareSize {
    pub position: PointField,
    pub side: RawMeasurement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CenterRadius {
    pub center: PointField,
    pub radius: RawMeasurement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CenterDiameter {
    pub center: PointField,
    pub diameter: RawMeasurement,
}

/// Start point plus a heading and a distance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngleLength {
    pub start: PointField,
    pub angle: RawAngle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<AngleDirection>,
    pub length: RawMeasurement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcParams {
    pub center: PointField,
    pub radius: RawMeasurement,
    pub start_angle: RawAngle,
    /// Normalized into `[0, 360)` without regard to `direction`: `-90` is a
    /// 270 degree sweep, not a 90 degree sweep the other way.
    pub sweep: RawAngle,
    /// Sweep direction; clockwise when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<AngleDirection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegularPolygonParams {
    pub center: PointField,
    pub radius: RawMeasurement,
    pub sides: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<RawAngle>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuadraticParams {
    pub start: PointField,
    pub control: PointField,
    pub end: PointField,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CubicParams {
    pub start: PointField,
    pub control1: PointField,
    pub control2: PointField,
    pub end: PointField,
}

/// Encoded path data, e.g. `M 0, 0; L 10, 0; L 10, 5; Z`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathParams {
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct At {
    pub at: PointField,
}

/// Broad family of an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationCategory {
    Draw,
    Fill,
    Move,
    Point,
}

/// Every operation a cut template can contain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Operation {
    DrawLine(Segment),
    DrawLineAtAngle(AngleLength),
    DrawPolyline(Points),
    DrawPolygon(Points),
    DrawTriangle(Points),
    DrawRectangle(LengthWidth),
    DrawCenteredRectangle(LengthWidth),
    DrawSquare(SquareSize),
    DrawCircle(CenterRadius),
    DrawCircleByDiameter(CenterDiameter),
    DrawArc(ArcParams),
    DrawEllipse(LengthWidth),
    DrawRegularPolygon(RegularPolygonParams),
    DrawQuadraticCurve(QuadraticParams),
    DrawCubicCurve(CubicParams),
    DrawPath(PathParams),

    FillPolygon(Points),
    FillTriangle(Points),
    FillRectangle(LengthWidth),
    FillCenteredRectangle(LengthWidth),
    FillSquare(SquareSize),
    FillCircle(CenterRadius),
    FillCircleByDiameter(CenterDiameter),
    FillEllipse(LengthWidth),
    FillRegularPolygon(RegularPolygonParams),
    FillSector(ArcParams),
    FillPath(PathParams),

    MoveTo(At),
    MoveAtAngle(AngleLength),
    MoveHome,

    Point(At),
    PointAtAngle(AngleLength),
}

impl Operation {
    /// Stable snake_case name, matching the serialized `kind` tag
    pub fn name(&self) -> &'static str {
        match self {
            Self::DrawLine(_) => "draw_line",
            Self::DrawLineAtAngle(_) => "draw_line_at_angle",
            Self::DrawPolyline(_) => "draw_polyline",
            Self::DrawPolygon(_) => "draw_polygon",
            Self::DrawTriangle(_) => "draw_triangle",
            Self::DrawRectangle(_) => "draw_rectangle",
            Self::DrawCenteredRectangle(_) => "draw_centered_rectangle",
            Self::DrawSquare(_) => "draw_square",
            Self::DrawCircle(_) => "draw_circle",
            Self::DrawCircleByDiameter(_) => "draw_circle_by_diameter",
            Self::DrawArc(_) => "draw_arc",
            Self::DrawEllipse(_) => "draw_ellipse",
            Self::DrawRegularPolygon(_) => "draw_regular_polygon",
            Self::DrawQuadraticCurve(_) => "draw_quadratic_curve",
            Self::DrawCubicCurve(_) => "draw_cubic_curve",
            Self::DrawPath(_) => "draw_path",
            Self::FillPolygon(_) => "fill_polygon",
            Self::FillTriangle(_) => "fill_triangle",
            Self::FillRectangle(_) => "fill_rectangle",
            Self::FillCenteredRectangle(_) => "fill_centered_rectangle",
            Self::FillSquare(_) => "fill_square",
            Self::FillCircle(_) => "fill_circle",
            Self::FillCircleByDiameter(_) => "fill_circle_by_diameter",
            Self::FillEllipse(_) => "fill_ellipse",
            Self::FillRegularPolygon(_) => "fill_regular_polygon",
            Self::FillSector(_) => "fill_sector",
            Self::FillPath(_) => "fill_path",
            Self::MoveTo(_) => "move_to",
            Self::MoveAtAngle(_) => "move_at_angle",
            Self::MoveHome => "move_home",
            Self::Point(_) => "point",
            Self::PointAtAngle(_) => "point_at_angle",
        }
    }

    pub fn category(&self) -> OperationCategory {
        match self {
            Self::DrawLine(_)
            | Self::DrawLineAtAngle(_)
            | Self::DrawPolyline(_)
            | Self::DrawPolygon(_)
            | Self::DrawTriangle(_)
            | Self::DrawRectangle(_)
            | Self::DrawCenteredRectangle(_)
            | Self::DrawSquare(_)
            | Self::DrawCircle(_)
            | Self::DrawCircleByDiameter(_)
            | Self::DrawArc(_)
            | Self::DrawEllipse(_)
            | Self::DrawRegularPolygon(_)
            | Self::DrawQuadraticCurve(_)
            | Self::DrawCubicCurve(_)
            | Self::DrawPath(_) => OperationCategory::Draw,
            Self::FillPolygon(_)
            | Self::FillTriangle(_)
            | Self::FillRectangle(_)
            | Self::FillCenteredRectangle(_)
            | Self::FillSquare(_)
            | Self::FillCircle(_)
            | Self::FillCircleByDiameter(_)
            | Self::FillEllipse(_)
            | Self::FillRegularPolygon(_)
            | Self::FillSector(_)
            | Self::FillPath(_) => OperationCategory::Fill,
            Self::MoveTo(_) | Self::MoveAtAngle(_) | Self::MoveHome => OperationCategory::Move,
            Self::Point(_) | Self::PointAtAngle(_) => OperationCategory::Point,
        }
    }

    pub fn is_fill(&self) -> bool {
        self.category() == OperationCategory::Fill
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tool and material an operation cuts with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolingSpec {
    pub tool: ToolName,
    pub material: String,
}

/// Editable operation as stored in a template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationSpec {
    pub shape: Operation,
    #[serde(default)]
    pub pen: PenState,
    /// Unset means the resolver's default placement
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement: Option<Placement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooling: Option<ToolingSpec>,
}

impl OperationSpec {
    pub fn new(shape: Operation, placement: Placement) -> Self {
        Self {
            placement: Some(placement),
            ..Self::unplaced(shape)
        }
    }

    /// An operation that takes whatever placement the resolver defaults to
    pub fn unplaced(shape: Operation) -> Self {
        let pen = match shape.category() {
            OperationCategory::Move => PenState::Move,
            _ => PenState::Draw,
        };
        Self {
            shape,
            pen,
            placement: None,
            tooling: None,
        }
    }

    pub fn with_pen(mut self, pen: PenState) -> Self {
        self.pen = pen;
        self
    }

    pub fn with_tooling(mut self, tool: ToolName, material: impl Into<String>) -> Self {
        self.tooling = Some(ToolingSpec {
            tool,
            material: material.into(),
        });
        self
    }
}
