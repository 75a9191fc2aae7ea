use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::debug;

/// Screens a view can send the user to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    Home,
    Login,
    Register,
    Dashboard,
    Hotels,
    LocalHotel(String),
    ExternalHotel(String),
    Profile,
    Flights,
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Current route as an observable value; the shell renders whatever it holds.
pub struct RouteState {
    current: watch::Sender<Route>,
}

impl RouteState {
    pub fn new(initial: Route) -> Self {
        let (current, _) = watch::channel(initial);
        Self { current }
    }

    pub fn current(&self) -> Route {
        self.current.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Route> {
        self.current.subscribe()
    }
}

impl Default for RouteState {
    fn default() -> Self {
        Self::new(Route::Home)
    }
}

impl Navigator for RouteState {
    fn navigate(&self, route: Route) {
        debug!("Navigating to {:?}", route);
        self.current.send_replace(route);
    }
}
