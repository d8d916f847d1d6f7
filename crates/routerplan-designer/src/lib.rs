//! # RouterPlan Designer
//!
//! Turns measured placements into absolute machine coordinates and editable
//! operations into canonical geometric primitives.
//!
//! ## Architecture
//!
//! ```text
//! Placement (origin, orientation, measurement mode)
//!   └── Coordinate resolver ── FrameSet (material, part, workspace)
//!
//! OperationSpec (textual, editable)
//!   └── Resolver ── measure (routerplan-core)
//!         └── CanonicalOperation (primitive, pen, feed rate) ── lyon Path
//!
//! CutTemplate (ordered operations)
//!   └── document-order or parallel resolution
//! ```

pub mod error;
pub mod geometry;
pub mod operation;
pub mod placement;
pub mod template;

pub use error::{CoordinateError, ResolveError, ResolveResult};
pub use geometry::{BoundingBox, FrameSet, ResolvedCoordinate};
pub use operation::{
    resolve_operation, CanonicalOperation, Operation, OperationCategory, OperationSpec, PenState,
    Primitive, Resolver,
};
pub use placement::{
    is_compatible, resolve, resolve_position, Anchor, AxisSide, MeasurementMode, OffsetSpec,
    Orientation, OriginLocation, Placement, PositionSpec, ResolveContext,
};
pub use template::CutTemplate;
