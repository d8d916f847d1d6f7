//! Configuration collaborator data
//!
//! Tool types and materials are loaded from external definitions and handed
//! to the resolvers as immutable lookup tables.

pub mod materials;
pub mod ranges;
pub mod tools;

pub use materials::{MaterialTable, MaterialTypeDefinition};
pub use ranges::{FloatRange, IntRange};
pub use tools::{ToolName, ToolTypeDefinition, ToolTypeTable};
