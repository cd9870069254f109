//! Terminal client for the car-rental catalog service.
//!
//! Run the binary to launch the interactive catalog.
//! Run with `--snapshot` to print the catalog as HTML and exit.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stdout, Stdout};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use tracing::{info, warn};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    runtime::Dispatcher,
    state::{AppState, Focus, RefreshCause, StatusKind, BACKEND_UNREACHABLE},
    sync::{self, Command, SyncUpdate},
};
use crate::config::AppConfig;
use crate::core::{
    api::{CarApi, HttpCarApi},
    markup,
    view::{CatalogView, Escaping, RenderOptions},
};
use crate::ui::{
    catalog_widget::CatalogWidget,
    form_widget::{form_rows, FormWidget},
    layout::AppLayout,
    popup::ConfirmPopup,
    spinner::SyncIndicator,
    theme::Theme,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Browse and manage the car-rental catalog")]
struct Cli {
    /// Service base URL (overrides the config file).
    #[arg(long)]
    base_url: Option<String>,

    /// Initial search text.
    #[arg(long)]
    query: Option<String>,

    /// Fetch the catalog once, print it as HTML and exit.
    #[arg(long)]
    snapshot: bool,

    /// Currency symbol shown before prices.
    #[arg(long)]
    currency: Option<String>,

    /// Print the effective configuration and exit.
    #[arg(long = "print-config")]
    print_config: bool,

    /// Write the effective configuration to the config file and exit.
    #[arg(long = "write-config")]
    write_config: bool,
}

impl Cli {
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(url) = &self.base_url {
            config.base_url = url.clone();
        }
        if let Some(currency) = &self.currency {
            config.currency = currency.clone();
        }
    }
}

// ───────────────────────────────────────── snapshot mode ─────

/// One refresh cycle rendered as HTML on stdout.
async fn print_snapshot(api: &dyn CarApi, config: &AppConfig, query: &str) -> ExitCode {
    let update = sync::execute(api, Command::Refresh { generation: 0 }).await;
    let SyncUpdate::Fetched { result, .. } = update else {
        return ExitCode::FAILURE;
    };
    match result {
        Ok(snapshot) => {
            let opts = RenderOptions {
                escaping: Escaping::Markup,
                currency: config.currency.clone(),
            };
            let view = CatalogView::build(&snapshot, query, &opts);
            println!("{}", markup::render_catalog(&view, &config.placeholder_image));
            ExitCode::SUCCESS
        }
        Err(e) => {
            warn!(error = %e, "snapshot fetch failed");
            eprintln!("{BACKEND_UNREACHABLE}");
            ExitCode::FAILURE
        }
    }
}

// ───────────────────────────────────────── drawing ───────────

fn pane_block(title: String, focused: bool) -> Block<'static> {
    Block::default()
        .title(title)
        .title_style(Theme::title_style())
        .borders(Borders::ALL)
        .border_style(if focused {
            Theme::focused_border_style()
        } else {
            Theme::border_style()
        })
}

fn focus_hint(state: &AppState) -> String {
    match state.focus {
        Focus::Catalog => state.config.status_bar_hint(),
        Focus::Search => "type to filter | Ctrl+u: clear | Enter/Esc: back".into(),
        Focus::AddForm => "Tab: next field | Enter: add car | Esc: back".into(),
        Focus::RentForm => "Tab: next field | ◂ ▸: choose car | Enter: rent | Esc: back".into(),
        Focus::ConfirmDelete(_) => "y: delete | n/Esc: cancel".into(),
    }
}

fn draw_status_bar(frame: &mut Frame, state: &AppState, area: Rect) {
    let synced = state
        .last_synced
        .map(|t| format!(" synced {} ", t.format("%H:%M:%S")))
        .unwrap_or_default();

    let left = match &state.status {
        Some(status) => {
            let (icon, style) = match status.kind {
                StatusKind::Success => ("✔", Theme::success_style()),
                StatusKind::Error => ("✘", Theme::error_style()),
            };
            Span::styled(format!(" {icon} {}", status.text), style)
        }
        None => Span::styled(format!(" {}", focus_hint(state)), Theme::status_bar_style()),
    };

    let used = left.content.chars().count() + synced.chars().count();
    let gap = (area.width as usize).saturating_sub(used);
    let line = Line::from(vec![
        left,
        Span::styled(" ".repeat(gap), Theme::status_bar_style()),
        Span::styled(synced, Theme::status_bar_style()),
    ]);
    frame.render_widget(Paragraph::new(line).style(Theme::status_bar_style()), area);
}

fn draw(frame: &mut Frame, state: &AppState) {
    let layout = AppLayout::from_area(frame.area());

    // Search box.
    let search_focused = state.focus == Focus::Search;
    let cursor = if search_focused { "▏" } else { "" };
    let search = Paragraph::new(Line::from(vec![
        Span::styled(state.query.clone(), Theme::input_style()),
        Span::styled(cursor, Theme::input_style()),
    ]))
    .block(pane_block(" Search ".into(), search_focused));
    frame.render_widget(search, layout.search_area);

    // Catalog.
    let title = match &state.view {
        Some(view) => format!(" Cars · {} ", view.count_label),
        None => " Cars ".into(),
    };
    let catalog = CatalogWidget::new(state.view.as_ref())
        .selected(state.selected)
        .loading(state.refreshing)
        .block(pane_block(title, state.focus == Focus::Catalog));
    frame.render_widget(catalog, layout.catalog_area);
    frame.render_widget(
        SyncIndicator {
            pending: state.in_flight,
            tick: state.tick,
        },
        layout.catalog_area,
    );

    // Forms.
    let add_focused = state.focus == Focus::AddForm;
    let add = FormWidget::new(form_rows(&state.add_form, None))
        .active(add_focused.then_some(state.add_field))
        .block(pane_block(" Add car ".into(), add_focused));
    frame.render_widget(add, layout.add_area);

    let rent_choice = state.selected_rent_car().and_then(|id| {
        state
            .view
            .as_ref()?
            .select
            .options()
            .iter()
            .find(|o| o.car_id == id)
            .map(|o| o.label.as_str())
    });
    let rent_focused = state.focus == Focus::RentForm;
    let rent = FormWidget::new(form_rows(&state.rent_form, rent_choice))
        .active(rent_focused.then_some(state.rent_row))
        .block(pane_block(" Rent car ".into(), rent_focused));
    frame.render_widget(rent, layout.rent_area);

    draw_status_bar(frame, state, layout.status_area);

    if let Focus::ConfirmDelete(car_id) = &state.focus {
        frame.render_widget(ConfirmPopup { car_id }, frame.area());
    }
}

// ───────────────────────────────────────── event loop ────────

async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state: &mut AppState,
    api: Arc<dyn CarApi>,
) -> Result<()> {
    let mut events = spawn_event_reader(Duration::from_millis(100));
    let (dispatcher, mut updates) = Dispatcher::new(api);

    let initial = state.begin_refresh(RefreshCause::Load);
    dispatcher.dispatch(state, initial);

    loop {
        terminal.draw(|frame| draw(frame, state))?;

        tokio::select! {
            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => {
                        if let Some(cmd) = handler::handle_key(state, k) {
                            dispatcher.dispatch(state, cmd);
                        }
                    }
                    AppEvent::Resize => {}
                    AppEvent::Tick => state.tick = state.tick.wrapping_add(1),
                }
            }

            Some(update) = updates.recv() => {
                if let Some(cmd) = state.apply(update) {
                    dispatcher.dispatch(state, cmd);
                }
                // Apply whatever else is already queued before redrawing.
                while let Ok(update) = updates.try_recv() {
                    if let Some(cmd) = state.apply(update) {
                        dispatcher.dispatch(state, cmd);
                    }
                }
            }

            else => break,
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Silent unless RUST_LOG is set.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // stdout carries the TUI and snapshots
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load();
    cli.apply_overrides(&mut config);

    if cli.print_config {
        print!("{}", config.serialise());
        return Ok(ExitCode::SUCCESS);
    }
    if cli.write_config {
        let path = config.save()?;
        println!("{}", path.display());
        return Ok(ExitCode::SUCCESS);
    }

    let http = HttpCarApi::new(&config.base_url)?;
    info!(base_url = %http.base_url(), "using catalog service");
    let api: Arc<dyn CarApi> = Arc::new(http);
    let query = cli.query.unwrap_or_default();

    if cli.snapshot {
        return Ok(print_snapshot(api.as_ref(), &config, &query).await);
    }

    let mut state = AppState::new(config);
    state.query = query;

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    let outcome = run(&mut terminal, &mut state, api).await;

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    outcome.map(|()| ExitCode::SUCCESS)
}
