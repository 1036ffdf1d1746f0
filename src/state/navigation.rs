//! Navigation-related state types.
//!
//! This module contains the route names, the screen each one resolves to and
//! the holder for the current route.

use crate::api::{Landmark, Session};
use std::fmt;

/// Specifying the different routes.
///
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Route {
    Dashboard,
    Landmarks,
    QrCode,
    TouristForm,
    AddLandmark,
    EditLandmark,
    Reports,
    Unknown(String),
}

impl Route {
    /// Return the route for an external name. Names outside the known set
    /// are kept as [`Route::Unknown`].
    ///
    pub fn parse(name: &str) -> Route {
        match name {
            "dashboard" => Route::Dashboard,
            "landmarks" => Route::Landmarks,
            "qrcode" | "qrCode" => Route::QrCode,
            "touristForm" => Route::TouristForm,
            "addLandmark" => Route::AddLandmark,
            "editLandmark" => Route::EditLandmark,
            "reports" => Route::Reports,
            other => Route::Unknown(other.to_owned()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Route::Dashboard => "dashboard",
            Route::Landmarks => "landmarks",
            Route::QrCode => "qrcode",
            Route::TouristForm => "touristForm",
            Route::AddLandmark => "addLandmark",
            Route::EditLandmark => "editLandmark",
            Route::Reports => "reports",
            Route::Unknown(name) => name,
        }
    }

    /// Whether only admins may open the route.
    ///
    pub fn requires_admin(&self) -> bool {
        matches!(self, Route::AddLandmark | Route::EditLandmark)
    }
}

impl Default for Route {
    fn default() -> Self {
        Route::Dashboard
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Data handed to the screen opened by a route.
///
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum RouteParams {
    Landmark(Landmark),
}

/// Specifying the different screens.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Screen {
    Login,
    Dashboard,
    Landmarks,
    QrCode,
    TouristForm,
    AddLandmark,
    EditLandmark,
    Reports,
}

/// Entries of the bottom navigation bar.
///
pub const NAV_BAR: [(Route, &str); 4] = [
    (Route::Dashboard, "Dashboard"),
    (Route::Landmarks, "Landmarks"),
    (Route::QrCode, "QR Code"),
    (Route::Reports, "Reports"),
];

/// Return the screen to show for the session and route.
///
pub fn dispatch(session: Option<&Session>, route: &Route) -> Screen {
    let session = match session {
        Some(session) => session,
        None => return Screen::Login,
    };
    if route.requires_admin() && !session.is_admin() {
        return Screen::Landmarks;
    }
    match route {
        Route::Dashboard | Route::Unknown(_) => Screen::Dashboard,
        Route::Landmarks => Screen::Landmarks,
        Route::QrCode => Screen::QrCode,
        Route::TouristForm => Screen::TouristForm,
        Route::AddLandmark => Screen::AddLandmark,
        Route::EditLandmark => Screen::EditLandmark,
        Route::Reports => Screen::Reports,
    }
}

/// Holds the current route and its parameters.
///
#[derive(Debug, Default, Clone)]
pub struct Navigator {
    current_route: Route,
    route_params: Option<RouteParams>,
}

impl Navigator {
    /// Overwrite both the route and its parameters.
    ///
    pub fn set_route(&mut self, route: Route, params: Option<RouteParams>) {
        log::debug!("Route changed from '{}' to '{}'", self.current_route, route);
        self.current_route = route;
        self.route_params = params;
    }

    /// Reset to the dashboard. There is no history.
    ///
    pub fn go_back(&mut self) {
        self.set_route(Route::Dashboard, None);
    }

    pub fn current_route(&self) -> &Route {
        &self.current_route
    }

    pub fn route_params(&self) -> Option<&RouteParams> {
        self.route_params.as_ref()
    }
}
