//! # Cut Templates
//!
//! A cut template is an ordered list of editable operations saved under a
//! name. Templates serialize to JSON in their textual form only; resolved
//! output is produced on demand.
//!
//! Operations whose placement is relative chain from the previous
//! operation's end point and must be resolved in document order. Templates
//! without any relative placement can be resolved in parallel.

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{ResolveError, ResolveResult};
use crate::operation::{CanonicalOperation, OperationSpec, Resolver};
use crate::placement::ResolveContext;

/// A named, ordered set of operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutTemplate {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub operations: Vec<OperationSpec>,
}

impl CutTemplate {
    /// Create an empty template
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            created_at: Utc::now(),
            operations: Vec::new(),
        }
    }

    pub fn add_operation(&mut self, operation: OperationSpec) {
        self.operations.push(operation);
    }

    pub fn with_operation(mut self, operation: OperationSpec) -> Self {
        self.add_operation(operation);
        self
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Whether any operation, placed as `resolver` would place it, reads
    /// the previous operation's end point
    pub fn is_order_dependent(&self, resolver: &Resolver<'_>) -> bool {
        self.operations
            .iter()
            .any(|op| resolver.placement_for(op).is_relative())
    }

    /// Resolve every operation in document order, chaining end points.
    pub fn resolve_in_order(
        &self,
        resolver: &Resolver<'_>,
        ctx: ResolveContext,
    ) -> ResolveResult<Vec<CanonicalOperation>> {
        let mut ctx = ctx;
        let resolved = self
            .operations
            .iter()
            .enumerate()
            .map(|(index, op)| {
                resolver
                    .resolve(op, &mut ctx)
                    .map_err(|err| in_operation(index, op, err))
            })
            .collect::<ResolveResult<Vec<_>>>()?;
        info!(
            "Resolved template '{}' ({} operations)",
            self.name,
            resolved.len()
        );
        Ok(resolved)
    }

    /// Resolve independent operations in parallel.
    ///
    /// Falls back to [`resolve_in_order`](Self::resolve_in_order) when any
    /// operation is relative. Output order always matches document order,
    /// and on failure the lowest failing index is reported.
    pub fn resolve_parallel(
        &self,
        resolver: &Resolver<'_>,
        ctx: ResolveContext,
    ) -> ResolveResult<Vec<CanonicalOperation>> {
        if self.is_order_dependent(resolver) {
            debug!(
                "Template '{}' has relative placements; resolving in order",
                self.name
            );
            return self.resolve_in_order(resolver, ctx);
        }

        // Collect every outcome first so the reported failure is the lowest
        // index, not whichever worker failed first.
        let outcomes: Vec<ResolveResult<CanonicalOperation>> = self
            .operations
            .par_iter()
            .enumerate()
            .map(|(index, op)| {
                let mut local = ctx;
                resolver
                    .resolve(op, &mut local)
                    .map_err(|err| in_operation(index, op, err))
            })
            .collect();
        let resolved = outcomes.into_iter().collect::<ResolveResult<Vec<_>>>()?;
        info!(
            "Resolved template '{}' in parallel ({} operations)",
            self.name,
            resolved.len()
        );
        Ok(resolved)
    }
}

fn in_operation(index: usize, op: &OperationSpec, err: ResolveError) -> ResolveError {
    ResolveError::InOperation {
        index,
        kind: op.shape.name(),
        source: Box::new(err),
    }
}
