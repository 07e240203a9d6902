use tracing::info;

use crate::error::ClientError;
use crate::session::{Session, SessionStore};

pub const LOGIN_ROUTE: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationPage {
    Appointments,
    History,
    Faq,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub page: NavigationPage,
    pub title: &'static str,
    pub description: &'static str,
    pub route: &'static str,
}

static TILES: [Tile; 3] = [
    Tile {
        page: NavigationPage::Appointments,
        title: "Appointments",
        description: "Schedule and manage your appointments",
        route: "/appointment-scheduler",
    },
    Tile {
        page: NavigationPage::History,
        title: "History",
        description: "View your past appointments and records",
        route: "/medical-history",
    },
    Tile {
        page: NavigationPage::Faq,
        title: "FAQ",
        description: "Find answers to common questions",
        route: "/faq",
    },
];

pub struct Dashboard<'a, S: SessionStore + ?Sized> {
    sessions: &'a S,
}

impl<'a, S: SessionStore + ?Sized> Dashboard<'a, S> {
    pub fn new(sessions: &'a S) -> Self {
        Self { sessions }
    }

    pub fn tiles(&self) -> &'static [Tile] {
        &TILES
    }

    pub fn route_for(&self, page: NavigationPage) -> &'static str {
        TILES
            .iter()
            .find(|tile| tile.page == page)
            .map(|tile| tile.route)
            .unwrap_or(LOGIN_ROUTE)
    }

    pub fn session(&self) -> Result<Option<Session>, ClientError> {
        self.sessions.load()
    }

    /// Forgets the stored session and returns the route to land on.
    pub fn sign_out(&self) -> Result<&'static str, ClientError> {
        self.sessions.clear()?;
        info!("Signed out");
        Ok(LOGIN_ROUTE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemorySessionStore;

    #[test]
    fn test_tiles_and_routes() {
        let store = MemorySessionStore::new();
        let dashboard = Dashboard::new(&store);

        let titles: Vec<&str> = dashboard.tiles().iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["Appointments", "History", "FAQ"]);
        assert_eq!(dashboard.route_for(NavigationPage::Appointments), "/appointment-scheduler");
        assert_eq!(dashboard.route_for(NavigationPage::Faq), "/faq");
    }

    #[test]
    fn test_sign_out_clears_session() {
        let store = MemorySessionStore::with_session(Session::new("1", Some("tok".to_string())));
        let dashboard = Dashboard::new(&store);

        assert_eq!(dashboard.sign_out().unwrap(), LOGIN_ROUTE);
        assert!(dashboard.session().unwrap().is_none());
    }
}
