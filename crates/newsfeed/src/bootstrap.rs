use query_binding::Route;

use crate::{
    views::{StoryType, TopItems, TopItemsData},
    Bundle, HostDocument, MountError, Network, RootContainer,
};

/// Where and through what the application is mounted.
#[derive(Clone)]
pub struct MountConfig {
    pub network: Network,
    /// Id of the host element the view tree is inserted into.
    pub element: String,
}

/// Runs the application's route query and inserts the rendered story list into the
/// configured element. The bundle must have been built for the application's route, and the
/// element must exist and must not have been mounted before.
/// Errors are returned as they happen; nothing is retried.
pub async fn mount(document: &mut HostDocument, config: MountConfig, bundle: &Bundle) -> Result<Mounted, MountError> {
    let route = crate::route();

    if bundle.entry != route.name() {
        return Err(MountError::EntryMismatch {
            bundle: bundle.entry.clone(),
            route: route.name().to_owned(),
        });
    }

    let query = bundle
        .metadata
        .query(route.name())
        .ok_or_else(|| MountError::MissingQuery(route.name().to_owned()))?;

    document.ensure_vacant(&config.element)?;

    let container = RootContainer::new(config.network, &route, query);
    let data: TopItemsData = container.fetch().await?;
    let view = TopItems::from_variables(route.variables(), data)?;

    document.fill(&config.element, view.to_string())?;

    tracing::info!(
        element = %config.element,
        story_type = %view.selected(),
        stories = view.items().count(),
        "mounted"
    );

    Ok(Mounted {
        route,
        container,
        view,
        element: config.element,
    })
}

/// A mounted view tree and the container that feeds it.
pub struct Mounted {
    route: Route,
    container: RootContainer,
    view: TopItems,
    element: String,
}

impl Mounted {
    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn view(&self) -> &TopItems {
        &self.view
    }

    pub fn container(&self) -> &RootContainer {
        &self.container
    }

    /// Changes the story type: the list requests the new variables, the container runs the
    /// query again and the element is re-rendered once the data resolves.
    pub async fn select(&mut self, document: &mut HostDocument, story_type: StoryType) -> Result<(), MountError> {
        self.view.on_change(story_type, &mut self.container);

        let data = self.container.fetch().await?;
        self.view.applied(data);

        document.replace(&self.element, self.view.to_string())?;

        tracing::info!(story_type = %story_type, stories = self.view.items().count(), "applied story type");

        Ok(())
    }
}
