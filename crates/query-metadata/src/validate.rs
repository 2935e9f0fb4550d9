mod fragment;
mod literal;
mod route;
mod sources;

use query_binding::Sources;

use crate::{context::Context, Metadata};

pub(crate) fn validate<'a>(sources: &'a Sources, ctx: &mut Context<'a>) -> Metadata {
    sources::collect_fragments(sources, ctx);

    let mut metadata = Metadata::default();

    let fragments: Vec<_> = ctx.fragments.values().copied().collect();

    for fragment in fragments {
        if let Some(fragment_metadata) = fragment::validate_fragment(fragment, ctx) {
            metadata.fragments.insert(fragment.name().to_owned(), fragment_metadata);
        }
    }

    metadata.prune();

    for route in sources.routes() {
        if let Some(query) = route::validate_route(route, &metadata, ctx) {
            metadata.queries.insert(route.name().to_owned(), query);
        }
    }

    metadata
}
