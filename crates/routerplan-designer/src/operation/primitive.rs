use lyon::math::{point, vector, Angle, Box2D};
use lyon::path::{Path, Winding};
use serde::Serialize;

use super::PenState;
use crate::geometry::ResolvedCoordinate;

/// Segment of a resolved path
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PathSegment {
    Line {
        to: ResolvedCoordinate,
    },
    Quadratic {
        control: ResolvedCoordinate,
        to: ResolvedCoordinate,
    },
    Cubic {
        control1: ResolvedCoordinate,
        control2: ResolvedCoordinate,
        to: ResolvedCoordinate,
    },
}

impl PathSegment {
    pub fn end(&self) -> ResolvedCoordinate {
        match *self {
            Self::Line { to } | Self::Quadratic { to, .. } | Self::Cubic { to, .. } => to,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subpath {
    pub start: ResolvedCoordinate,
    pub segments: Vec<PathSegment>,
    pub closed: bool,
}

impl Subpath {
    /// Where the tool stops after tracing this subpath
    pub fn end_point(&self) -> ResolvedCoordinate {
        if self.closed {
            return self.start;
        }
        self.segments.last().map_or(self.start, PathSegment::end)
    }
}

/// Flat geometric primitive in absolute machine coordinates
///
/// Angles are degrees measured from +X toward +Y. Because +Y points down,
/// increasing angles turn clockwise on screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Primitive {
    Point {
        at: ResolvedCoordinate,
    },
    Line {
        start: ResolvedCoordinate,
        end: ResolvedCoordinate,
    },
    Polyline {
        points: Vec<ResolvedCoordinate>,
        closed: bool,
    },
    Rectangle {
        corner: ResolvedCoordinate,
        width: f64,
        height: f64,
    },
    Circle {
        center: ResolvedCoordinate,
        radius: f64,
    },
    Arc {
        center: ResolvedCoordinate,
        radius: f64,
        start_angle: f64,
        sweep_angle: f64,
        clockwise: bool,
    },
    Sector {
        center: ResolvedCoordinate,
        radius: f64,
        start_angle: f64,
        sweep_angle: f64,
        clockwise: bool,
    },
    Ellipse {
        center: ResolvedCoordinate,
        radius_x: f64,
        radius_y: f64,
    },
    Path {
        subpaths: Vec<Subpath>,
    },
    Travel {
        to: ResolvedCoordinate,
    },
}

fn arc_end_angle(start_angle: f64, sweep_angle: f64, clockwise: bool) -> f64 {
    if clockwise {
        start_angle + sweep_angle
    } else {
        start_angle - sweep_angle
    }
}

/// Sample an arc into points, including both ends.
fn arc_points(
    center: ResolvedCoordinate,
    radius: f64,
    start_angle: f64,
    sweep_angle: f64,
    clockwise: bool,
) -> Vec<ResolvedCoordinate> {
    let steps = ((sweep_angle.abs() / 5.0).ceil() as usize).max(2);
    let end_angle = arc_end_angle(start_angle, sweep_angle, clockwise);
    (0..=steps)
        .map(|i| {
            let t = i as f64 / steps as f64;
            center.polar_offset(start_angle + (end_angle - start_angle) * t, radius)
        })
        .collect()
}

impl Primitive {
    /// Where the tool rests after this primitive
    pub fn end_point(&self) -> ResolvedCoordinate {
        match self {
            Self::Point { at } => *at,
            Self::Line { end, .. } => *end,
            Self::Polyline { points, closed } => {
                let last = if *closed { points.first() } else { points.last() };
                last.copied().unwrap_or_default()
            }
            Self::Rectangle { corner, .. } => *corner,
            Self::Circle { center, radius } => center.polar_offset(0.0, *radius),
            Self::Arc {
                center,
                radius,
                start_angle,
                sweep_angle,
                clockwise,
            } => center.polar_offset(
                arc_end_angle(*start_angle, *sweep_angle, *clockwise),
                *radius,
            ),
            Self::Sector { center, .. } => *center,
            Self::Ellipse {
                center, radius_x, ..
            } => ResolvedCoordinate::new(center.x + radius_x, center.y),
            Self::Path { subpaths } => subpaths
                .last()
                .map(Subpath::end_point)
                .unwrap_or_default(),
            Self::Travel { to } => *to,
        }
    }

    /// Build a lyon path for rendering and toolpath emission
    pub fn to_path(&self) -> Path {
        let mut builder = Path::builder();
        match self {
            Self::Point { at } | Self::Travel { to: at } => {
                builder.begin(at.to_lyon());
                builder.end(false);
            }
            Self::Line { start, end } => {
                builder.begin(start.to_lyon());
                builder.line_to(end.to_lyon());
                builder.end(false);
            }
            Self::Polyline { points, closed } => {
                if let Some((first, rest)) = points.split_first() {
                    builder.begin(first.to_lyon());
                    for p in rest {
                        builder.line_to(p.to_lyon());
                    }
                    builder.end(*closed);
                }
            }
            Self::Rectangle {
                corner,
                width,
                height,
            } => {
                builder.add_rectangle(
                    &Box2D::new(
                        corner.to_lyon(),
                        point((corner.x + width) as f32, (corner.y + height) as f32),
                    ),
                    Winding::Positive,
                );
            }
            Self::Circle { center, radius } => {
                builder.add_circle(center.to_lyon(), *radius as f32, Winding::Positive);
            }
            Self::Arc {
                center,
                radius,
                start_angle,
                sweep_angle,
                clockwise,
            } => {
                let samples = arc_points(*center, *radius, *start_angle, *sweep_angle, *clockwise);
                if let Some((first, rest)) = samples.split_first() {
                    builder.begin(first.to_lyon());
                    for p in rest {
                        builder.line_to(p.to_lyon());
                    }
                    builder.end(false);
                }
            }
            Self::Sector {
                center,
                radius,
                start_angle,
                sweep_angle,
                clockwise,
            } => {
                builder.begin(center.to_lyon());
                for p in arc_points(*center, *radius, *start_angle, *sweep_angle, *clockwise) {
                    builder.line_to(p.to_lyon());
                }
                builder.close();
            }
            Self::Ellipse {
                center,
                radius_x,
                radius_y,
            } => {
                builder.add_ellipse(
                    center.to_lyon(),
                    vector(*radius_x as f32, *radius_y as f32),
                    Angle::radians(0.0),
                    Winding::Positive,
                );
            }
            Self::Path { subpaths } => {
                for subpath in subpaths {
                    builder.begin(subpath.start.to_lyon());
                    for segment in &subpath.segments {
                        match segment {
                            PathSegment::Line { to } => {
                                builder.line_to(to.to_lyon());
                            }
                            PathSegment::Quadratic { control, to } => {
                                builder.quadratic_bezier_to(control.to_lyon(), to.to_lyon());
                            }
                            PathSegment::Cubic {
                                control1,
                                control2,
                                to,
                            } => {
                                builder.cubic_bezier_to(
                                    control1.to_lyon(),
                                    control2.to_lyon(),
                                    to.to_lyon(),
                                );
                            }
                        }
                    }
                    builder.end(subpath.closed);
                }
            }
        }
        builder.build()
    }
}

/// Resolved operation handed to the toolpath emitter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalOperation {
    pub kind: &'static str,
    pub primitive: Primitive,
    pub fill: bool,
    pub pen: PenState,
    /// Effective feed rate in mm/min when tooling was given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feed_rate: Option<f64>,
}

impl CanonicalOperation {
    pub fn to_path(&self) -> Path {
        self.primitive.to_path()
    }
}
