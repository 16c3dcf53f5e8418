//! Navigation between the screens.

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

use prakriti_auth::session::AuthContext;
use prakriti_store::backend::Backend;

use crate::admin::AdminScreen;
use crate::assessment::AssessmentScreen;
use crate::schedule::ScheduleScreen;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Route {
    #[default]
    Assessment,
    Schedule,
    Admin,
}

impl Route {
    pub fn label(self) -> &'static str {
        match self {
            Route::Assessment => "Assessment",
            Route::Schedule => "Daily Schedule",
            Route::Admin => "Admin Panel",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Holds the shared backend and session, tracks the active route, and
/// builds screens wired to it.
pub struct Shell {
    backend: Arc<dyn Backend>,
    auth: Arc<dyn AuthContext>,
    route: Arc<watch::Sender<Route>>,
}

impl Shell {
    pub fn new(backend: Arc<dyn Backend>, auth: Arc<dyn AuthContext>) -> Self {
        Self {
            backend,
            auth,
            route: Arc::new(watch::Sender::new(Route::default())),
        }
    }

    pub fn route(&self) -> Route {
        *self.route.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Route> {
        self.route.subscribe()
    }

    /// Switch screens. The admin route is refused for non-administrators.
    pub fn navigate(&self, route: Route) -> bool {
        if !self.available_routes().contains(&route) {
            return false;
        }
        let previous = self.route.send_replace(route);
        info!(from = %previous, to = %route, "navigate");
        true
    }

    pub fn available_routes(&self) -> Vec<Route> {
        let mut routes = vec![Route::Assessment, Route::Schedule];
        if self.auth.is_admin() {
            routes.push(Route::Admin);
        }
        routes
    }

    /// An assessment screen that moves to the schedule once its result is
    /// stored.
    pub fn assessment(&self) -> AssessmentScreen {
        let route = Arc::clone(&self.route);
        AssessmentScreen::new(Arc::clone(&self.backend), Arc::clone(&self.auth)).on_complete(
            move || {
                route.send_replace(Route::Schedule);
            },
        )
    }

    pub fn schedule(&self) -> ScheduleScreen {
        ScheduleScreen::new(Arc::clone(&self.backend), Arc::clone(&self.auth))
    }

    pub fn admin(&self) -> AdminScreen {
        AdminScreen::new(Arc::clone(&self.backend), Arc::clone(&self.auth))
    }
}
