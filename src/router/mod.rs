//! Route table and navigation.
//!
//! DESIGN
//! ======
//! The table is a fixed, ordered list of [`RouteDescriptor`]s built once at
//! startup. Navigating resolves a path to the first matching descriptor,
//! runs its guard (if any), follows redirects, and loads the view on first
//! entry. Protected routes all share one [`RequireAuth`] guard.

pub mod guard;
pub mod pattern;
pub mod view;

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

pub use guard::{Guard, GuardOutcome, LOGIN_PATH, RequireAuth};
pub use pattern::{PathPattern, RouteParams};
pub use view::{ComponentCatalog, Loading, NamedView, View, ViewCatalog};

use crate::net::api::BlogApi;
use crate::session::SessionStorage;
use view::ViewSlot;

/// Upper bound on guard redirects followed by one navigation.
pub const MAX_REDIRECTS: usize = 8;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("no route matches {0}")]
    NotFound(String),

    #[error("route {route} requires parameter :{param}")]
    MissingParam { route: RouteName, param: String },

    #[error("too many redirects navigating to {0}")]
    RedirectLoop(String),
}

// =============================================================================
// ROUTE NAMES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteName {
    Home,
    LoginSignup,
    Start,
    PostBlog,
    EditBlog,
    PostEngage,
    ReadBlog,
    Profile,
    EditProfile,
    SearchUser,
    CommentBlog,
    Followers,
    Followings,
}

impl RouteName {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::LoginSignup => "loginsignup",
            Self::Start => "start",
            Self::PostBlog => "postblog",
            Self::EditBlog => "editblog",
            Self::PostEngage => "postengage",
            Self::ReadBlog => "readblog",
            Self::Profile => "profile",
            Self::EditProfile => "editprofile",
            Self::SearchUser => "searchuser",
            Self::CommentBlog => "commentblog",
            Self::Followers => "followers",
            Self::Followings => "followings",
        }
    }

    /// Name of the view component rendered for this route.
    #[must_use]
    pub fn component(self) -> &'static str {
        match self {
            Self::Home => "HomeView",
            Self::LoginSignup => "LoginSignup",
            Self::Start => "StartView",
            Self::PostBlog => "PostBlog",
            Self::EditBlog => "EditBlog",
            Self::PostEngage => "PostEngage",
            Self::ReadBlog => "ReadBlog",
            Self::Profile => "UserProfile",
            Self::EditProfile => "EditProfile",
            Self::SearchUser => "SearchUser",
            Self::CommentBlog => "CommentBlog",
            Self::Followers => "MyFollowers",
            Self::Followings => "MyFollowings",
        }
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// (path, name, guarded, loading), in match order.
const ROUTES: &[(&str, RouteName, bool, Loading)] = &[
    ("/home", RouteName::Home, true, Loading::Eager),
    ("/loginsignup", RouteName::LoginSignup, false, Loading::Lazy),
    ("/", RouteName::Start, false, Loading::Lazy),
    ("/postblog", RouteName::PostBlog, true, Loading::Lazy),
    ("/editblog/:id", RouteName::EditBlog, true, Loading::Lazy),
    ("/postengage/:id", RouteName::PostEngage, true, Loading::Lazy),
    ("/readblog/:id", RouteName::ReadBlog, false, Loading::Lazy),
    ("/profile/:username", RouteName::Profile, true, Loading::Lazy),
    ("/editprofile", RouteName::EditProfile, true, Loading::Lazy),
    ("/searchuser", RouteName::SearchUser, true, Loading::Lazy),
    ("/comment/:id", RouteName::CommentBlog, true, Loading::Lazy),
    ("/followers", RouteName::Followers, true, Loading::Lazy),
    ("/followings", RouteName::Followings, true, Loading::Lazy),
];

// =============================================================================
// ROUTE TABLE
// =============================================================================

/// A resolved navigation target: which route, the concrete path, and the
/// captured params.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub name: RouteName,
    pub path: String,
    pub params: RouteParams,
}

pub struct RouteDescriptor {
    pattern: PathPattern,
    name: RouteName,
    view: ViewSlot,
    guard: Option<Arc<dyn Guard>>,
}

impl RouteDescriptor {
    #[must_use]
    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    #[must_use]
    pub fn name(&self) -> RouteName {
        self.name
    }

    #[must_use]
    pub fn is_guarded(&self) -> bool {
        self.guard.is_some()
    }

    #[must_use]
    pub fn loading(&self) -> Loading {
        self.view.loading()
    }

    /// Whether the view has been loaded yet.
    #[must_use]
    pub fn is_view_loaded(&self) -> bool {
        self.view.is_loaded()
    }
}

impl fmt::Debug for RouteDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteDescriptor")
            .field("pattern", &self.pattern.as_str())
            .field("name", &self.name)
            .field("guarded", &self.is_guarded())
            .field("loading", &self.loading())
            .finish_non_exhaustive()
    }
}

pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
    catalog: Arc<dyn ViewCatalog>,
}

impl RouteTable {
    /// Build the application's route table. Protected routes get `auth`;
    /// eager views are loaded from `catalog` before this returns.
    #[must_use]
    pub fn new(catalog: Arc<dyn ViewCatalog>, auth: Arc<dyn Guard>) -> Self {
        let routes: Vec<RouteDescriptor> = ROUTES
            .iter()
            .map(|&(path, name, guarded, loading)| RouteDescriptor {
                pattern: PathPattern::parse(path),
                name,
                view: ViewSlot::new(loading),
                guard: guarded.then(|| Arc::clone(&auth)),
            })
            .collect();

        for route in routes.iter().filter(|r| r.loading() == Loading::Eager) {
            route.view.resolve(route.name, catalog.as_ref());
        }

        Self { routes, catalog }
    }

    #[must_use]
    pub fn routes(&self) -> &[RouteDescriptor] {
        &self.routes
    }

    #[must_use]
    pub fn get(&self, name: RouteName) -> Option<&RouteDescriptor> {
        self.routes.iter().find(|r| r.name == name)
    }

    /// Find the first route matching `path`.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::NotFound`] if no pattern matches.
    pub fn resolve(&self, path: &str) -> Result<(&RouteDescriptor, RouteMatch), RouteError> {
        self.routes
            .iter()
            .find_map(|route| {
                route
                    .pattern
                    .matches(path)
                    .map(|params| (route, RouteMatch { name: route.name, path: path.to_owned(), params }))
            })
            .ok_or_else(|| RouteError::NotFound(path.to_owned()))
    }

    /// Build the path for a named route.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::MissingParam`] if `params` lacks a value the
    /// route's pattern needs.
    pub fn href(&self, name: RouteName, params: &RouteParams) -> Result<String, RouteError> {
        let route = self.get(name).ok_or_else(|| RouteError::NotFound(name.to_string()))?;
        route
            .pattern
            .fill(params)
            .map_err(|param| RouteError::MissingParam { route: name, param })
    }
}

impl fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteTable").field("routes", &self.routes).finish_non_exhaustive()
    }
}

// =============================================================================
// ROUTER
// =============================================================================

/// The route that ended up active, with its loaded view.
#[derive(Debug, Clone)]
pub struct Activation {
    pub route: RouteMatch,
    pub view: Arc<dyn View>,
}

#[derive(Debug, Clone)]
pub struct Navigation {
    pub activation: Activation,
    /// The originally requested path when a guard redirected elsewhere.
    pub redirected_from: Option<String>,
}

impl Navigation {
    #[must_use]
    pub fn was_redirected(&self) -> bool {
        self.redirected_from.is_some()
    }
}

#[derive(Debug)]
pub struct Router {
    table: RouteTable,
    current: Mutex<Option<RouteMatch>>,
}

impl Router {
    #[must_use]
    pub fn new(table: RouteTable) -> Self {
        Self { table, current: Mutex::new(None) }
    }

    /// Build the standard table with every protected route behind
    /// [`RequireAuth`].
    #[must_use]
    pub fn with_auth(
        catalog: Arc<dyn ViewCatalog>,
        session: Arc<dyn SessionStorage>,
        api: Arc<dyn BlogApi>,
    ) -> Self {
        let auth: Arc<dyn Guard> = Arc::new(RequireAuth::new(session, api));
        Self::new(RouteTable::new(catalog, auth))
    }

    #[must_use]
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// The most recently activated route, if any.
    #[must_use]
    pub fn current(&self) -> Option<RouteMatch> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Navigate to `path`, running guards and following their redirects.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::NotFound`] if the path (or a redirect target)
    /// matches no route, or [`RouteError::RedirectLoop`] after
    /// [`MAX_REDIRECTS`] redirects.
    pub async fn navigate(&self, path: &str) -> Result<Navigation, RouteError> {
        let from = self.current();
        let mut target = path.to_owned();
        let mut redirected_from = None;

        for _ in 0..=MAX_REDIRECTS {
            let (route, to) = self.table.resolve(&target)?;
            let outcome = match &route.guard {
                Some(guard) => guard.check(&to, from.as_ref()).await,
                None => GuardOutcome::Proceed,
            };

            match outcome {
                GuardOutcome::Proceed => {
                    let view = route.view.resolve(route.name, self.table.catalog.as_ref());
                    tracing::info!(route = %to.name, path = %to.path, "route activated");
                    *self.current.lock().unwrap_or_else(PoisonError::into_inner) = Some(to.clone());
                    return Ok(Navigation { activation: Activation { route: to, view }, redirected_from });
                }
                GuardOutcome::Redirect(next) => {
                    tracing::debug!(from = %target, to = %next, "navigation redirected");
                    if redirected_from.is_none() {
                        redirected_from = Some(path.to_owned());
                    }
                    target = next;
                }
            }
        }

        Err(RouteError::RedirectLoop(path.to_owned()))
    }
}

#[cfg(test)]
#[path = "helpers_test.rs"]
pub(crate) mod test_helpers;

#[cfg(test)]
#[path = "router_test.rs"]
mod tests;
