use std::{collections::BTreeMap, sync::Arc};

use cynic_introspection::Schema;
use query_binding::Fragment;

use crate::{schema::SchemaIndex, Diagnostics, GenerateError, Options};

pub(crate) struct Context<'a> {
    pub(crate) schema: SchemaIndex<'a>,
    /// Every fragment reachable from the sources, declared or not, by name.
    pub(crate) fragments: BTreeMap<&'a str, &'a Arc<Fragment>>,
    pub(crate) diagnostics: Diagnostics,
    pub(crate) options: Options,
}

impl<'a> Context<'a> {
    pub(crate) fn new(schema: &'a Schema, options: Options) -> Self {
        Context {
            schema: SchemaIndex::new(schema),
            fragments: BTreeMap::new(),
            diagnostics: Diagnostics::default(),
            options,
        }
    }

    pub(crate) fn push_error(&mut self, error: GenerateError) {
        tracing::debug!(%error, "query binding rejected");
        self.diagnostics.push(error);
    }
}
