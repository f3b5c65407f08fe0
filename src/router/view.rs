//! Views and on-demand view loading.
//!
//! DESIGN
//! ======
//! Rendering lives outside this crate. A route only knows how to obtain its
//! view from a [`ViewCatalog`]; the descriptor keeps the loaded view in a
//! [`ViewSlot`] so the catalog is asked at most once per route. Lazy slots
//! are filled the first time their route is entered, eager slots when the
//! route table is built.

use std::fmt;
use std::sync::{Arc, OnceLock};

use super::RouteName;

/// A view that can be activated for a route.
pub trait View: Send + Sync {
    /// Component name, e.g. `"HomeView"`.
    fn component(&self) -> &str;
}

impl fmt::Debug for dyn View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("View").field("component", &self.component()).finish()
    }
}

/// Produces the view for a route on demand.
pub trait ViewCatalog: Send + Sync {
    fn load(&self, route: RouteName) -> Arc<dyn View>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loading {
    /// Loaded when the route table is built.
    Eager,
    /// Loaded the first time the route is entered.
    Lazy,
}

pub(crate) struct ViewSlot {
    loading: Loading,
    view: OnceLock<Arc<dyn View>>,
}

impl ViewSlot {
    pub(crate) fn new(loading: Loading) -> Self {
        Self { loading, view: OnceLock::new() }
    }

    pub(crate) fn loading(&self) -> Loading {
        self.loading
    }

    pub(crate) fn is_loaded(&self) -> bool {
        self.view.get().is_some()
    }

    pub(crate) fn resolve(&self, route: RouteName, catalog: &dyn ViewCatalog) -> Arc<dyn View> {
        Arc::clone(self.view.get_or_init(|| {
            tracing::debug!(route = %route, "loading view");
            catalog.load(route)
        }))
    }
}

// =============================================================================
// DEFAULT CATALOG
// =============================================================================

/// A view known only by its component name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedView {
    component: &'static str,
}

impl NamedView {
    #[must_use]
    pub fn new(component: &'static str) -> Self {
        Self { component }
    }
}

impl View for NamedView {
    fn component(&self) -> &str {
        self.component
    }
}

/// Catalog mapping each route to a [`NamedView`] of its component.
#[derive(Debug, Default, Clone, Copy)]
pub struct ComponentCatalog;

impl ViewCatalog for ComponentCatalog {
    fn load(&self, route: RouteName) -> Arc<dyn View> {
        Arc::new(NamedView::new(route.component()))
    }
}

#[cfg(test)]
#[path = "view_test.rs"]
mod tests;
