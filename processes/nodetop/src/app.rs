use std::sync::Arc;

use tokio::sync::{watch, Notify};

use crate::data::DashboardState;
use crate::ui::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Overview,
    Topology,
    Keyspaces,
    Caches,
}

impl View {
    pub const ALL: [View; 4] = [View::Overview, View::Topology, View::Keyspaces, View::Caches];

    pub fn title(self) -> &'static str {
        match self {
            View::Overview => "Overview",
            View::Topology => "Topology",
            View::Keyspaces => "Keyspaces",
            View::Caches => "Caches",
        }
    }

    pub fn index(self) -> usize {
        match self {
            View::Overview => 0,
            View::Topology => 1,
            View::Keyspaces => 2,
            View::Caches => 3,
        }
    }

    pub fn next(self) -> Self {
        match self {
            View::Overview => View::Topology,
            View::Topology => View::Keyspaces,
            View::Keyspaces => View::Caches,
            View::Caches => View::Overview,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            View::Overview => View::Caches,
            View::Topology => View::Overview,
            View::Keyspaces => View::Topology,
            View::Caches => View::Keyspaces,
        }
    }
}

pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,

    // Data, replaced whole by the poller
    pub state: Arc<DashboardState>,
    updates: watch::Receiver<Arc<DashboardState>>,
    refresh: Arc<Notify>,
    pub source_description: String,

    // Navigation state
    pub scroll: usize,

    // UI
    pub theme: Theme,
}

impl App {
    pub fn new(
        updates: watch::Receiver<Arc<DashboardState>>,
        refresh: Arc<Notify>,
        source_description: String,
        theme: Theme,
    ) -> Self {
        let state = updates.borrow().clone();
        Self {
            running: true,
            current_view: View::Overview,
            show_help: false,
            state,
            updates,
            refresh,
            source_description,
            scroll: 0,
            theme,
        }
    }

    /// Pick up the latest published state; true if it changed
    pub fn sync(&mut self) -> bool {
        match self.updates.has_changed() {
            Ok(true) => {
                self.state = self.updates.borrow_and_update().clone();
                self.clamp_scroll();
                true
            }
            _ => false,
        }
    }

    /// True once the poller has gone away
    pub fn poller_stopped(&self) -> bool {
        self.updates.has_changed().is_err()
    }

    pub fn request_refresh(&self) {
        self.refresh.notify_one();
    }

    /// Rows in the current view that can be scrolled through
    pub fn row_count(&self) -> usize {
        match self.current_view {
            View::Overview => 0,
            View::Topology => self
                .state
                .status
                .as_ref()
                .map(|s| s.datacenters.iter().map(|dc| dc.nodes.len() + 1).sum())
                .unwrap_or(0),
            View::Keyspaces => {
                self.state.table_stats.as_ref().map(|t| t.keyspaces.len()).unwrap_or(0)
            }
            View::Caches => 0,
        }
    }

    fn clamp_scroll(&mut self) {
        self.scroll = self.scroll.min(self.row_count().saturating_sub(1));
    }

    pub fn next_view(&mut self) {
        self.set_view(self.current_view.next());
    }

    pub fn prev_view(&mut self) {
        self.set_view(self.current_view.prev());
    }

    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
        self.scroll = 0;
    }

    pub fn scroll_down(&mut self) {
        if self.scroll < self.row_count().saturating_sub(1) {
            self.scroll += 1;
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn quit(&mut self) {
        self.running = false;
    }
}
