//! Input handling: maps key events to state mutations.
//!
//! Handlers never touch the network.  Anything that needs the service comes
//! back as a [`Command`] for the event loop to dispatch.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::config::Action;
use crate::core::form::{AddCarForm, FormFields};

use super::state::{AppState, Focus, RefreshCause, RENT_CAR_ROW, RENT_ROWS};
use super::sync::Command;

/// Process a key event, dispatching based on focus.
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    // Ctrl+c always quits, regardless of focus.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return None;
    }

    match state.focus {
        Focus::Catalog => handle_catalog_key(state, key),
        Focus::Search => handle_search_key(state, key),
        Focus::AddForm => handle_add_key(state, key),
        Focus::RentForm => handle_rent_key(state, key),
        Focus::ConfirmDelete(_) => handle_confirm_key(state, key),
    }
}

// ── Catalog (configurable bindings) ─────────────────────────────

fn handle_catalog_key(state: &mut AppState, key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Home => {
            state.selected = 0;
            return None;
        }
        KeyCode::End => {
            state.selected = state.cards().len().saturating_sub(1);
            return None;
        }
        _ => {}
    }

    match state.config.match_key(key)? {
        Action::Quit => {
            state.should_quit = true;
            None
        }
        Action::MoveUp => {
            state.select_prev();
            None
        }
        Action::MoveDown => {
            state.select_next();
            None
        }
        Action::Activate => state.activate_selected(),
        Action::Search => {
            state.focus = Focus::Search;
            None
        }
        Action::AddCar => {
            state.focus = Focus::AddForm;
            None
        }
        Action::RentCar => {
            state.open_rent_form();
            None
        }
        Action::Refresh => Some(state.begin_refresh(RefreshCause::User)),
    }
}

// ── Search box ──────────────────────────────────────────────────

/// Every edit to the query starts a new refresh cycle.
fn handle_search_key(state: &mut AppState, key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Tab => {
            state.focus = Focus::Catalog;
            None
        }
        KeyCode::Backspace => {
            state.query.pop()?;
            Some(state.begin_refresh(RefreshCause::Search))
        }
        KeyCode::Char('u') if key.modifiers == KeyModifiers::CONTROL => {
            if state.query.is_empty() {
                return None;
            }
            state.query.clear();
            Some(state.begin_refresh(RefreshCause::Search))
        }
        KeyCode::Char(ch) if is_text_input(key) => {
            state.query.push(ch);
            Some(state.begin_refresh(RefreshCause::Search))
        }
        _ => None,
    }
}

// ── Add-car form ────────────────────────────────────────────────

fn handle_add_key(state: &mut AppState, key: KeyEvent) -> Option<Command> {
    let rows = AddCarForm::LABELS.len();
    match key.code {
        KeyCode::Esc => {
            state.focus = Focus::Catalog;
            None
        }
        KeyCode::Tab | KeyCode::Down => {
            state.add_field = (state.add_field + 1) % rows;
            None
        }
        KeyCode::BackTab | KeyCode::Up => {
            state.add_field = (state.add_field + rows - 1) % rows;
            None
        }
        KeyCode::Enter => state.submit_add(),
        _ => {
            edit_text(state.add_form.field_mut(state.add_field), key);
            None
        }
    }
}

// ── Rent form ───────────────────────────────────────────────────

fn handle_rent_key(state: &mut AppState, key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Esc => {
            state.focus = Focus::Catalog;
            None
        }
        KeyCode::Tab | KeyCode::Down => {
            state.rent_row = (state.rent_row + 1) % RENT_ROWS;
            None
        }
        KeyCode::BackTab | KeyCode::Up => {
            state.rent_row = (state.rent_row + RENT_ROWS - 1) % RENT_ROWS;
            None
        }
        KeyCode::Enter => state.submit_rent(),
        KeyCode::Left if state.rent_row == RENT_CAR_ROW => {
            state.cycle_rent_car(-1);
            None
        }
        KeyCode::Right | KeyCode::Char(' ') if state.rent_row == RENT_CAR_ROW => {
            state.cycle_rent_car(1);
            None
        }
        _ => {
            edit_text(state.rent_form.field_mut(state.rent_row), key);
            None
        }
    }
}

// ── Delete confirmation ─────────────────────────────────────────

fn handle_confirm_key(state: &mut AppState, key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => state.confirm_delete(true),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => state.confirm_delete(false),
        _ => None,
    }
}

// ── helpers ─────────────────────────────────────────────────────

fn is_text_input(key: KeyEvent) -> bool {
    key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT
}

fn edit_text(field: Option<&mut String>, key: KeyEvent) {
    let Some(field) = field else {
        return;
    };
    match key.code {
        KeyCode::Backspace => {
            field.pop();
        }
        KeyCode::Char(ch) if is_text_input(key) => field.push(ch),
        _ => {}
    }
}
