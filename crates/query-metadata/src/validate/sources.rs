use std::{
    collections::{BTreeSet, HashSet, VecDeque},
    sync::Arc,
};

use query_binding::{Fragment, Sources};

use crate::{context::Context, GenerateError};

/// Registers every fragment reachable from the declared fragments and the routes, and checks
/// that declarations and embeddings agree: each declared fragment is embedded by a parent or
/// roots a route, each embedded fragment is declared and no two different fragments share a
/// name.
pub(crate) fn collect_fragments<'a>(sources: &'a Sources, ctx: &mut Context<'a>) {
    let declared: BTreeSet<&str> = sources.fragments().iter().map(|fragment| fragment.name()).collect();

    let mut embedded = BTreeSet::new();
    let mut reported_undeclared = BTreeSet::new();
    let mut queue: VecDeque<&'a Arc<Fragment>> = sources.fragments().iter().collect();

    for route in sources.routes() {
        let root = route.fragment();
        embedded.insert(root.name());

        if !declared.contains(root.name()) && reported_undeclared.insert(root.name()) {
            ctx.push_error(GenerateError::UndeclaredFragment {
                fragment: root.name().to_owned(),
                parent: route.name().to_owned(),
            });
        }

        queue.push_back(root);
    }

    let mut visited = HashSet::new();

    while let Some(parent) = queue.pop_front() {
        if !visited.insert(Arc::as_ptr(parent)) {
            continue;
        }

        register(parent, ctx);

        for child in parent.child_fragments() {
            embedded.insert(child.name());

            if !declared.contains(child.name()) && reported_undeclared.insert(child.name()) {
                ctx.push_error(GenerateError::UndeclaredFragment {
                    fragment: child.name().to_owned(),
                    parent: parent.name().to_owned(),
                });
            }

            queue.push_back(child);
        }
    }

    for name in declared.difference(&embedded) {
        ctx.push_error(GenerateError::UnusedFragment {
            fragment: (*name).to_owned(),
        });
    }
}

fn register<'a>(fragment: &'a Arc<Fragment>, ctx: &mut Context<'a>) {
    let Some(existing) = ctx.fragments.get(fragment.name()).copied() else {
        ctx.fragments.insert(fragment.name(), fragment);
        return;
    };

    if !Arc::ptr_eq(existing, fragment) && **existing != **fragment {
        ctx.push_error(GenerateError::DuplicateFragment {
            fragment: fragment.name().to_owned(),
        });
    }
}
