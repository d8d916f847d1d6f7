use tracing::debug;

use routerplan_core::{
    AngleDirection, Error as CoreError, IntRange, MaterialTable, RawAngle, RawMeasurement,
    SignPolicy, ToolTypeTable, UnitTable,
};

use super::path_data::{parse_path_data, PathCommand, PathPair};
use super::primitive::{CanonicalOperation, PathSegment, Primitive, Subpath};
use super::{
    AngleLength, ArcParams, LengthWidth, OffsetField, Operation, OperationSpec, PathParams,
    PointField, Points, RegularPolygonParams, ToolingSpec,
};
use crate::error::{ResolveError, ResolveResult};
use crate::geometry::ResolvedCoordinate;
use crate::placement::{
    check_compatible, resolve_position, Anchor, AxisSide, OffsetSpec, Placement, PositionSpec,
    ResolveContext,
};

/// Resolves operation specs against a unit table and optional tooling data
///
/// ```rust
/// use routerplan_core::UnitTable;
/// use routerplan_designer::geometry::{BoundingBox, FrameSet};
/// use routerplan_designer::operation::{Operation, OperationSpec, At, PointField, Resolver};
/// use routerplan_designer::placement::{Placement, OriginLocation, Orientation, MeasurementMode, ResolveContext};
///
/// let resolver = Resolver::new(UnitTable::new());
/// let mut ctx = ResolveContext::new(FrameSet::uniform(BoundingBox::new(0.0, 0.0, 300.0, 200.0)));
/// let placement = Placement::new(OriginLocation::TopLeft, Orientation::Edge, MeasurementMode::PartAbsolute);
/// let spec = OperationSpec::new(Operation::Point(At { at: PointField::right_down("1in", "5") }), placement);
///
/// let resolved = resolver.resolve(&spec, &mut ctx).unwrap();
/// assert_eq!(resolved.primitive.end_point().x, 25.4);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    units: UnitTable,
    tool_types: Option<&'a ToolTypeTable>,
    materials: Option<&'a MaterialTable>,
    polygon_sides: IntRange,
    default_placement: Placement,
}

impl Default for Resolver<'_> {
    fn default() -> Self {
        Self {
            units: UnitTable::default(),
            tool_types: None,
            materials: None,
            polygon_sides: IntRange::POLYGON_SIDES,
            default_placement: Placement::default(),
        }
    }
}

/// Resolve one operation with no tooling tables.
pub fn resolve_operation(
    spec: &OperationSpec,
    ctx: &mut ResolveContext,
    units: &UnitTable,
) -> ResolveResult<CanonicalOperation> {
    Resolver::new(*units).resolve(spec, ctx)
}

fn is_clockwise(direction: Option<AngleDirection>) -> bool {
    !matches!(
        direction,
        Some(AngleDirection::Left) | Some(AngleDirection::CounterClockwise)
    )
}

impl<'a> Resolver<'a> {
    pub fn new(units: UnitTable) -> Self {
        Self {
            units,
            ..Self::default()
        }
    }

    pub fn with_tool_types(mut self, tool_types: &'a ToolTypeTable) -> Self {
        self.tool_types = Some(tool_types);
        self
    }

    pub fn with_materials(mut self, materials: &'a MaterialTable) -> Self {
        self.materials = Some(materials);
        self
    }

    /// Allowed side counts for regular polygons; [`IntRange::POLYGON_SIDES`]
    /// unless set. Counts below 3 are always rejected.
    pub fn with_polygon_sides(mut self, range: IntRange) -> Self {
        self.polygon_sides = range;
        self
    }

    /// Placement for operations that do not carry their own
    pub fn with_default_placement(mut self, placement: Placement) -> Self {
        self.default_placement = placement;
        self
    }

    /// The placement `spec` resolves with
    pub fn placement_for(&self, spec: &OperationSpec) -> Placement {
        spec.placement.unwrap_or(self.default_placement)
    }

    pub fn units(&self) -> &UnitTable {
        &self.units
    }

    /// Resolve `spec` and advance the context's last position to the
    /// primitive's end point.
    pub fn resolve(
        &self,
        spec: &OperationSpec,
        ctx: &mut ResolveContext,
    ) -> ResolveResult<CanonicalOperation> {
        let placement = self.placement_for(spec);
        check_compatible(placement.orientation, placement.mode)?;
        let feed_rate = spec
            .tooling
            .as_ref()
            .map(|tooling| self.feed_rate(tooling))
            .transpose()?;
        let primitive = self.primitive(&spec.shape, &placement, ctx)?;

        ctx.last_position = Some(primitive.end_point());
        debug!(
            kind = spec.shape.name(),
            pen = ?spec.pen,
            "resolved operation"
        );
        Ok(CanonicalOperation {
            kind: spec.shape.name(),
            primitive,
            fill: spec.shape.is_fill(),
            pen: spec.pen,
            feed_rate,
        })
    }

    fn feed_rate(&self, tooling: &ToolingSpec) -> ResolveResult<f64> {
        let tool_types = self
            .tool_types
            .ok_or_else(|| CoreError::other("no tool type definitions loaded"))?;
        tool_types.resolve_tool(&tooling.tool)?;

        let materials = self
            .materials
            .ok_or_else(|| CoreError::other("no material definitions loaded"))?;
        Ok(materials.require(&tooling.material)?.effective_feed_rate()?)
    }

    fn length(&self, field: &'static str, raw: &RawMeasurement) -> ResolveResult<f64> {
        raw.evaluate(&self.units, SignPolicy::NonNegative)
            .map(|v| v.magnitude)
            .map_err(ResolveError::measure(field))
    }

    fn angle(
        &self,
        field: &'static str,
        raw: &RawAngle,
        direction: Option<AngleDirection>,
    ) -> ResolveResult<f64> {
        raw.evaluate(&self.units, direction)
            .map(|v| v.magnitude)
            .map_err(ResolveError::measure(field))
    }

    fn offset(&self, field: &'static str, raw: &OffsetField) -> ResolveResult<OffsetSpec> {
        let value = raw
            .value
            .evaluate(&self.units, SignPolicy::Signed)
            .map_err(ResolveError::measure(field))?;
        Ok(OffsetSpec::new(raw.side, raw.anchor, value))
    }

    fn point(
        &self,
        field: &'static str,
        raw: &PointField,
        placement: &Placement,
        ctx: &ResolveContext,
    ) -> ResolveResult<ResolvedCoordinate> {
        let position = PositionSpec {
            x: self.offset(field, &raw.x)?,
            y: self.offset(field, &raw.y)?,
        };
        Ok(resolve_position(&position, placement, ctx)?)
    }

    fn points(
        &self,
        raw: &Points,
        minimum: usize,
        exact: bool,
        placement: &Placement,
        ctx: &ResolveContext,
    ) -> ResolveResult<Vec<ResolvedCoordinate>> {
        let count = raw.points.len();
        if count < minimum || (exact && count != minimum) {
            return Err(ResolveError::ParameterOutOfRange {
                parameter: "points",
                value: count.to_string(),
                allowed: if exact {
                    minimum.to_string()
                } else {
                    format!("at least {}", minimum)
                },
            });
        }
        raw.points
            .iter()
            .map(|p| self.point("point", p, placement, ctx))
            .collect()
    }

    fn heading(
        &self,
        raw: &AngleLength,
        placement: &Placement,
        ctx: &ResolveContext,
    ) -> ResolveResult<(ResolvedCoordinate, ResolvedCoordinate)> {
        let start = self.point("start", &raw.start, placement, ctx)?;
        let angle = self.angle("angle", &raw.angle, raw.direction)?;
        let length = self.length("length", &raw.length)?;
        Ok((start, start.polar_offset(angle, length)))
    }

    fn rectangle(
        &self,
        raw: &LengthWidth,
        centered: bool,
        placement: &Placement,
        ctx: &ResolveContext,
    ) -> ResolveResult<Primitive> {
        let position = self.point("position", &raw.position, placement, ctx)?;
        let width = self.length("length", &raw.length)?;
        let height = self.length("width", &raw.width)?;
        let corner = if centered {
            ResolvedCoordinate::new(position.x - width / 2.0, position.y - height / 2.0)
        } else {
            position
        };
        Ok(Primitive::Rectangle {
            corner,
            width,
            height,
        })
    }

    fn ellipse(
        &self,
        raw: &LengthWidth,
        placement: &Placement,
        ctx: &ResolveContext,
    ) -> ResolveResult<Primitive> {
        Ok(Primitive::Ellipse {
            center: self.point("center", &raw.position, placement, ctx)?,
            radius_x: self.length("length", &raw.length)? / 2.0,
            radius_y: self.length("width", &raw.width)? / 2.0,
        })
    }

    fn arc(
        &self,
        raw: &ArcParams,
        sector: bool,
        placement: &Placement,
        ctx: &ResolveContext,
    ) -> ResolveResult<Primitive> {
        let center = self.point("center", &raw.center, placement, ctx)?;
        let radius = self.length("radius", &raw.radius)?;
        let start_angle = self.angle("start angle", &raw.start_angle, None)?;
        let sweep_angle = self.angle("sweep", &raw.sweep, None)?;
        if sweep_angle == 0.0 {
            return Err(ResolveError::ParameterOutOfRange {
                parameter: "sweep",
                value: raw.sweep.to_string(),
                allowed: "0 < sweep < 360".to_string(),
            });
        }
        let clockwise = is_clockwise(raw.direction);
        Ok(if sector {
            Primitive::Sector {
                center,
                radius,
                start_angle,
                sweep_angle,
                clockwise,
            }
        } else {
            Primitive::Arc {
                center,
                radius,
                start_angle,
                sweep_angle,
                clockwise,
            }
        })
    }

    fn regular_polygon(
        &self,
        raw: &RegularPolygonParams,
        placement: &Placement,
        ctx: &ResolveContext,
    ) -> ResolveResult<Primitive> {
        if raw.sides < 3 || !self.polygon_sides.contains(raw.sides) {
            return Err(ResolveError::ParameterOutOfRange {
                parameter: "sides",
                value: raw.sides.to_string(),
                allowed: self.polygon_sides.to_string(),
            });
        }

        let center = self.point("center", &raw.center, placement, ctx)?;
        let radius = self.length("radius", &raw.radius)?;
        let rotation = match &raw.rotation {
            Some(rotation) => self.angle("rotation", rotation, None)?,
            None => 0.0,
        };
        let points = (0..raw.sides)
            .map(|i| center.polar_offset(rotation + 360.0 * i as f64 / raw.sides as f64, radius))
            .collect();
        Ok(Primitive::Polyline {
            points,
            closed: true,
        })
    }

    fn path_pair(
        &self,
        pair: &PathPair,
        placement: &Placement,
        ctx: &ResolveContext,
    ) -> ResolveResult<ResolvedCoordinate> {
        let value = |raw: &RawMeasurement| {
            raw.evaluate(&self.units, SignPolicy::Signed)
                .map_err(ResolveError::measure("path coordinate"))
        };
        let position = PositionSpec {
            x: OffsetSpec::new(AxisSide::Right, Anchor::Relative, value(&pair.x)?),
            y: OffsetSpec::new(AxisSide::Bottom, Anchor::Relative, value(&pair.y)?),
        };
        Ok(resolve_position(&position, placement, ctx)?)
    }

    fn path(
        &self,
        raw: &PathParams,
        fill: bool,
        placement: &Placement,
        ctx: &ResolveContext,
    ) -> ResolveResult<Primitive> {
        let commands = parse_path_data(&raw.data)?;
        let at = |pair: &PathPair| self.path_pair(pair, placement, ctx);

        let mut subpaths = Vec::new();
        let mut current: Option<Subpath> = None;
        for (index, command) in commands.iter().enumerate() {
            match command {
                PathCommand::MoveTo(pair) => {
                    current = Some(Subpath {
                        start: at(pair)?,
                        segments: Vec::new(),
                        closed: false,
                    });
                }
                PathCommand::LineTo(to) => {
                    let segment = PathSegment::Line { to: at(to)? };
                    push_segment(&mut current, index, segment)?;
                }
                PathCommand::QuadraticTo(control, to) => {
                    let segment = PathSegment::Quadratic {
                        control: at(control)?,
                        to: at(to)?,
                    };
                    push_segment(&mut current, index, segment)?;
                }
                PathCommand::CubicTo(control1, control2, to) => {
                    let segment = PathSegment::Cubic {
                        control1: at(control1)?,
                        control2: at(control2)?,
                        to: at(to)?,
                    };
                    push_segment(&mut current, index, segment)?;
                }
                PathCommand::Close | PathCommand::End => {
                    let mut subpath = current
                        .take()
                        .ok_or_else(|| ResolveError::malformed_path(index, "no open subpath"))?;
                    subpath.closed = matches!(command, PathCommand::Close);
                    if fill && !subpath.closed {
                        return Err(ResolveError::malformed_path(
                            index,
                            "filled paths must close every subpath",
                        ));
                    }
                    subpaths.push(subpath);
                }
            }
        }
        Ok(Primitive::Path { subpaths })
    }

    fn primitive(
        &self,
        shape: &Operation,
        placement: &Placement,
        ctx: &ResolveContext,
    ) -> ResolveResult<Primitive> {
        let primitive = match shape {
            Operation::DrawLine(segment) => Primitive::Line {
                start: self.point("start", &segment.start, placement, ctx)?,
                end: self.point("end", &segment.end, placement, ctx)?,
            },
            Operation::DrawLineAtAngle(raw) => {
                let (start, end) = self.heading(raw, placement, ctx)?;
                Primitive::Line { start, end }
            }
            Operation::DrawPolyline(raw) => Primitive::Polyline {
                points: self.points(raw, 2, false, placement, ctx)?,
                closed: false,
            },
            Operation::DrawPolygon(raw) | Operation::FillPolygon(raw) => Primitive::Polyline {
                points: self.points(raw, 3, false, placement, ctx)?,
                closed: true,
            },
            Operation::DrawTriangle(raw) | Operation::FillTriangle(raw) => Primitive::Polyline {
                points: self.points(raw, 3, true, placement, ctx)?,
                closed: true,
            },
            Operation::DrawRectangle(raw) | Operation::FillRectangle(raw) => {
                self.rectangle(raw, false, placement, ctx)?
            }
            Operation::DrawCenteredRectangle(raw) | Operation::FillCenteredRectangle(raw) => {
                self.rectangle(raw, true, placement, ctx)?
            }
            Operation::DrawSquare(raw) | Operation::FillSquare(raw) => {
                let side = self.length("side", &raw.side)?;
                Primitive::Rectangle {
                    corner: self.point("position", &raw.position, placement, ctx)?,
                    width: side,
                    height: side,
                }
            }
            Operation::DrawCircle(raw) | Operation::FillCircle(raw) => Primitive::Circle {
                center: self.point("center", &raw.center, placement, ctx)?,
                radius: self.length("radius", &raw.radius)?,
            },
            Operation::DrawCircleByDiameter(raw) | Operation::FillCircleByDiameter(raw) => {
                Primitive::Circle {
                    center: self.point("center", &raw.center, placement, ctx)?,
                    radius: self.length("diameter", &raw.diameter)? / 2.0,
                }
            }
            Operation::DrawArc(raw) => self.arc(raw, false, placement, ctx)?,
            Operation::FillSector(raw) => self.arc(raw, true, placement, ctx)?,
            Operation::DrawEllipse(raw) | Operation::FillEllipse(raw) => {
                self.ellipse(raw, placement, ctx)?
            }
            Operation::DrawRegularPolygon(raw) | Operation::FillRegularPolygon(raw) => {
                self.regular_polygon(raw, placement, ctx)?
            }
            Operation::DrawQuadraticCurve(raw) => Primitive::Path {
                subpaths: vec![Subpath {
                    start: self.point("start", &raw.start, placement, ctx)?,
                    segments: vec![PathSegment::Quadratic {
                        control: self.point("control", &raw.control, placement, ctx)?,
                        to: self.point("end", &raw.end, placement, ctx)?,
                    }],
                    closed: false,
                }],
            },
            Operation::DrawCubicCurve(raw) => Primitive::Path {
                subpaths: vec![Subpath {
                    start: self.point("start", &raw.start, placement, ctx)?,
                    segments: vec![PathSegment::Cubic {
                        control1: self.point("control1", &raw.control1, placement, ctx)?,
                        control2: self.point("control2", &raw.control2, placement, ctx)?,
                        to: self.point("end", &raw.end, placement, ctx)?,
                    }],
                    closed: false,
                }],
            },
            Operation::DrawPath(raw) => self.path(raw, false, placement, ctx)?,
            Operation::FillPath(raw) => self.path(raw, true, placement, ctx)?,
            Operation::MoveTo(raw) => Primitive::Travel {
                to: self.point("position", &raw.at, placement, ctx)?,
            },
            Operation::MoveAtAngle(raw) => Primitive::Travel {
                to: self.heading(raw, placement, ctx)?.1,
            },
            Operation::MoveHome => Primitive::Travel {
                to: ctx.frames.physical_origin(),
            },
            Operation::Point(raw) => Primitive::Point {
                at: self.point("position", &raw.at, placement, ctx)?,
            },
            Operation::PointAtAngle(raw) => Primitive::Point {
                at: self.heading(raw, placement, ctx)?.1,
            },
        };
        Ok(primitive)
    }
}

fn push_segment(
    current: &mut Option<Subpath>,
    index: usize,
    segment: PathSegment,
) -> ResolveResult<()> {
    let subpath = current
        .as_mut()
        .ok_or_else(|| ResolveError::malformed_path(index, "drawing command outside a subpath"))?;
    subpath.segments.push(segment);
    Ok(())
}
