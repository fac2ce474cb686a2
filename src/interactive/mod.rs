use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use promdash::dashboard::Dashboard;
use promdash::prom::MetricScraper;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::Terminal;

use self::app::App;

mod app;
mod ui;

const UI_TICK: Duration = Duration::from_millis(250);

/// Runs the terminal dashboard until the user quits. The scraper is stopped
/// before returning.
pub async fn show(
    endpoint: String,
    scrape_interval: u64,
    mut metric_scraper: MetricScraper,
    dashboard: Dashboard,
) -> anyhow::Result<()> {
    metric_scraper.start(Duration::from_secs(scrape_interval));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&endpoint, scrape_interval, metric_scraper, dashboard);
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.metric_scraper.stop();
    if let Err(err) = &res {
        log::error!("Dashboard failed: {err:?}");
    }
    log::info!("Dashboard closed");
    res
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> anyhow::Result<()> {
    loop {
        let snapshot = app.snapshot();
        terminal.draw(|f| ui::draw(f, app, &snapshot))?;

        // crossterm polling blocks, keep the runtime workers free for the scraper
        let ready = tokio::task::block_in_place(|| event::poll(UI_TICK))?;
        if ready {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => app.on_quit(),
                        KeyCode::Down | KeyCode::Char('j') => app.on_down(),
                        KeyCode::Up | KeyCode::Char('k') => app.on_up(),
                        KeyCode::Char('r') => app.on_refresh(),
                        _ => {}
                    }
                }
            }
        }
        if app.should_quit {
            return Ok(());
        }
    }
}
