//! # Query metadata
//!
//! Validates the fragments and routes an application declares against a GraphQL schema and
//! turns them into [`Metadata`]: a typed description of every selection plus one executable
//! document per route. The output depends only on its inputs, so generating twice from the
//! same schema and sources yields byte-identical JSON.

#![cfg_attr(test, allow(unused_crate_dependencies))]

mod context;
mod diagnostics;
mod metadata;
mod printer;
mod schema;
mod validate;

pub use diagnostics::{Diagnostics, GenerateError};
pub use metadata::{
    ArgumentMetadata, FieldMetadata, FragmentMetadata, Metadata, QueryMetadata, SelectionMetadata,
    VariableDefinition,
};

use cynic_introspection::Schema;
use query_binding::Sources;

use self::context::Context;

bitflags::bitflags! {
    /// Options to configure generation.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    pub struct Options: u8 {
        /// If included, any validation error fails generation as a whole and no metadata is
        /// produced. Otherwise invalid selections are left out and reported next to the
        /// metadata that could be generated.
        const ABORT_ON_ERROR = 0b1;
    }
}

/// Metadata produced by a successful generation, with the errors that were tolerated to
/// produce it. Under [`Options::ABORT_ON_ERROR`] the diagnostics are always empty.
#[derive(Debug)]
pub struct Generated {
    pub metadata: Metadata,
    pub diagnostics: Diagnostics,
}

/// Validates `sources` against `schema` and generates their metadata.
pub fn generate(schema: &Schema, sources: &Sources, options: Options) -> Result<Generated, Diagnostics> {
    let mut ctx = Context::new(schema, options);

    let metadata = validate::validate(sources, &mut ctx);

    if ctx.options.contains(Options::ABORT_ON_ERROR) && !ctx.diagnostics.is_empty() {
        tracing::debug!(errors = ctx.diagnostics.len(), "aborting metadata generation");
        return Err(ctx.diagnostics);
    }

    tracing::debug!(
        fragments = metadata.fragments.len(),
        queries = metadata.queries.len(),
        tolerated = ctx.diagnostics.len(),
        "generated query metadata"
    );

    Ok(Generated {
        metadata,
        diagnostics: ctx.diagnostics,
    })
}
