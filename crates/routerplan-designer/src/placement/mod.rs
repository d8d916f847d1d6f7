//! Placement vocabulary and the coordinate resolver.
//!
//! A placement combines an origin anchor, an orientation and a measurement
//! mode. Offsets are measured from the point the placement selects.

mod resolve;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use resolve::{check_compatible, resolve, resolve_position, ResolveContext};

use routerplan_core::CanonicalValue;

use crate::geometry::{BoundingBox, ResolvedCoordinate};

/// Named anchor on a bounding box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OriginLocation {
    /// Not chosen yet
    #[default]
    None,
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    Center,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl OriginLocation {
    /// The anchor point on `bounds`, or `None` when no origin is set.
    pub fn point_on(self, bounds: &BoundingBox) -> Option<ResolvedCoordinate> {
        let center = bounds.center();
        let (x, y) = match self {
            Self::None => return None,
            Self::TopLeft => (bounds.left(), bounds.top()),
            Self::TopCenter => (center.x, bounds.top()),
            Self::TopRight => (bounds.right(), bounds.top()),
            Self::MiddleLeft => (bounds.left(), center.y),
            Self::Center => (center.x, center.y),
            Self::MiddleRight => (bounds.right(), center.y),
            Self::BottomLeft => (bounds.left(), bounds.bottom()),
            Self::BottomCenter => (center.x, bounds.bottom()),
            Self::BottomRight => (bounds.right(), bounds.bottom()),
        };
        Some(ResolvedCoordinate::new(x, y))
    }
}

/// What the origin anchor is measured on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// The active reference box
    #[default]
    Edge,
    /// The last resolved tool position
    Relative,
    /// The active reference box, named for the workpiece
    Workpiece,
    /// The machine workspace box regardless of mode
    Workspace,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation::Edge,
        Orientation::Relative,
        Orientation::Workpiece,
        Orientation::Workspace,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Edge => write!(f, "edge"),
            Self::Relative => write!(f, "relative"),
            Self::Workpiece => write!(f, "workpiece"),
            Self::Workspace => write!(f, "workspace"),
        }
    }
}

/// Which box the offset is taken from, and whether `Center` snaps to it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementMode {
    MaterialAbsolute,
    MaterialCenter,
    #[default]
    PartAbsolute,
    PartCenter,
    Relative,
    WorkspaceAbsolute,
    WorkspaceCenter,
}

impl MeasurementMode {
    pub const ALL: [MeasurementMode; 7] = [
        MeasurementMode::MaterialAbsolute,
        MeasurementMode::MaterialCenter,
        MeasurementMode::PartAbsolute,
        MeasurementMode::PartCenter,
        MeasurementMode::Relative,
        MeasurementMode::WorkspaceAbsolute,
        MeasurementMode::WorkspaceCenter,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Whether the mode measures from its box's center
    pub fn is_centered(self) -> bool {
        matches!(
            self,
            Self::MaterialCenter | Self::PartCenter | Self::WorkspaceCenter
        )
    }
}

impl fmt::Display for MeasurementMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MaterialAbsolute => "material_absolute",
            Self::MaterialCenter => "material_center",
            Self::PartAbsolute => "part_absolute",
            Self::PartCenter => "part_center",
            Self::Relative => "relative",
            Self::WorkspaceAbsolute => "workspace_absolute",
            Self::WorkspaceCenter => "workspace_center",
        };
        f.write_str(name)
    }
}

const Y: bool = true;
const N: bool = false;

/// Orientation (rows) against measurement mode (columns), in declaration order.
const COMPATIBILITY: [[bool; 7]; 4] = [
    // MatAbs MatCtr PartAbs PartCtr Rel WsAbs WsCtr
    [Y, Y, Y, Y, N, Y, Y], // Edge
    [N, N, N, N, Y, N, N], // Relative
    [Y, Y, Y, Y, N, Y, Y], // Workpiece
    [Y, Y, Y, Y, N, Y, Y], // Workspace
];

/// Single table lookup for orientation/mode validity
pub fn is_compatible(orientation: Orientation, mode: MeasurementMode) -> bool {
    COMPATIBILITY[orientation.index()][mode.index()]
}

/// Origin, orientation and mode chosen for an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Placement {
    #[serde(default)]
    pub origin: OriginLocation,
    #[serde(default)]
    pub orientation: Orientation,
    #[serde(default)]
    pub mode: MeasurementMode,
}

impl Placement {
    pub fn new(origin: OriginLocation, orientation: Orientation, mode: MeasurementMode) -> Self {
        Self {
            origin,
            orientation,
            mode,
        }
    }

    /// Whether resolution depends on the previous tool position
    pub fn is_relative(&self) -> bool {
        self.orientation == Orientation::Relative || self.mode == MeasurementMode::Relative
    }
}

/// Machine axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => write!(f, "x"),
            Self::Y => write!(f, "y"),
        }
    }
}

/// Direction an offset moves from its reference point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisSide {
    Left,
    Center,
    Right,
    Top,
    Bottom,
    LeftEdgeToCenter,
    RightEdgeToCenter,
    TopEdgeToCenter,
    BottomEdgeToCenter,
}

impl AxisSide {
    /// The axis this side moves along. `Center` applies to both.
    pub fn axis(self) -> Option<Axis> {
        match self {
            Self::Center => None,
            Self::Left | Self::Right | Self::LeftEdgeToCenter | Self::RightEdgeToCenter => {
                Some(Axis::X)
            }
            Self::Top | Self::Bottom | Self::TopEdgeToCenter | Self::BottomEdgeToCenter => {
                Some(Axis::Y)
            }
        }
    }

    pub fn applies_to(self, axis: Axis) -> bool {
        self.axis().is_none_or(|a| a == axis)
    }
}

impl fmt::Display for AxisSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::LeftEdgeToCenter => "left_edge_to_center",
            Self::RightEdgeToCenter => "right_edge_to_center",
            Self::TopEdgeToCenter => "top_edge_to_center",
            Self::BottomEdgeToCenter => "bottom_edge_to_center",
        };
        f.write_str(name)
    }
}

/// Whether an offset is measured from the placement or the physical origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    #[default]
    Relative,
    Absolute,
}

/// A resolved offset along one axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetSpec {
    pub axis_side: AxisSide,
    pub anchor: Anchor,
    pub value: CanonicalValue,
}

impl OffsetSpec {
    pub fn new(axis_side: AxisSide, anchor: Anchor, value: CanonicalValue) -> Self {
        Self {
            axis_side,
            anchor,
            value,
        }
    }
}

/// An x offset and a y offset that together name one point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionSpec {
    pub x: OffsetSpec,
    pub y: OffsetSpec,
}
