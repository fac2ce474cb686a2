use promdash::dashboard::{Dashboard, Panel, Row};
use promdash::prom::{MetricScraper, Snapshot};
use ratatui::widgets::ListState;

#[derive(Debug)]
enum Direction {
    Up,
    Down,
}

pub struct App<'a> {
    pub endpoint: &'a str,
    pub scrape_interval: u64,
    pub metric_scraper: MetricScraper,
    pub dashboard: Dashboard,

    pub panel_list_state: ListState,
    pub should_quit: bool,
}

impl<'a> App<'a> {
    pub fn new(
        endpoint: &'a str,
        scrape_interval: u64,
        metric_scraper: MetricScraper,
        dashboard: Dashboard,
    ) -> App<'a> {
        let mut panel_list_state = ListState::default();
        if !dashboard.panels.is_empty() {
            panel_list_state.select(Some(0));
        }
        App {
            endpoint,
            scrape_interval,
            metric_scraper,
            dashboard,
            panel_list_state,
            should_quit: false,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        self.metric_scraper.snapshot()
    }

    pub fn selected_panel(&self) -> Option<&Panel> {
        self.panel_list_state
            .selected()
            .and_then(|i| self.dashboard.panels.get(i))
    }

    pub fn selected_rows(&self, snapshot: &Snapshot) -> Vec<Row> {
        self.selected_panel()
            .map(|panel| panel.evaluate(&snapshot.families, &self.dashboard.names))
            .unwrap_or_default()
    }

    fn change_selected_panel(&mut self, direction: Direction) {
        update_list_state_with_direction(
            direction,
            &mut self.panel_list_state,
            self.dashboard.panels.len(),
        );
        if let Some(panel) = self.selected_panel() {
            log::debug!("Selected panel {}", panel.title);
        }
    }

    pub fn on_down(&mut self) {
        self.change_selected_panel(Direction::Down);
    }

    pub fn on_up(&mut self) {
        self.change_selected_panel(Direction::Up);
    }

    pub fn on_refresh(&mut self) {
        log::info!("Manual refresh requested");
        self.metric_scraper.refresh();
    }

    pub fn on_quit(&mut self) {
        self.should_quit = true;
    }
}

fn update_list_state_with_direction(direction: Direction, state: &mut ListState, list_len: usize) {
    if list_len == 0 {
        return;
    }
    match direction {
        Direction::Down => {
            if let Some(selected) = state.selected() {
                if selected >= list_len - 1 {
                    state.select(Some(0));
                } else {
                    state.select(Some(selected + 1));
                }
            }
        }
        Direction::Up => {
            if let Some(selected) = state.selected() {
                if selected > 0 {
                    state.select(Some(selected - 1));
                } else {
                    state.select(Some(list_len - 1));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_wraps_around() {
        let mut state = ListState::default();
        state.select(Some(0));
        update_list_state_with_direction(Direction::Up, &mut state, 3);
        assert_eq!(state.selected(), Some(2));
        update_list_state_with_direction(Direction::Down, &mut state, 3);
        assert_eq!(state.selected(), Some(0));
        update_list_state_with_direction(Direction::Down, &mut state, 3);
        assert_eq!(state.selected(), Some(1));
    }

    #[test]
    fn empty_list_keeps_selection() {
        let mut state = ListState::default();
        update_list_state_with_direction(Direction::Down, &mut state, 0);
        assert_eq!(state.selected(), None);
    }
}
