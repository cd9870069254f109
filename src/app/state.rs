//! Central application state.
//!
//! All mutable state lives here so that rendering is a pure function over
//! `&AppState` and every change goes through `&mut AppState`.  Network work
//! is described by the [`Command`]s these methods return; the caller
//! decides how to run them.

use chrono::{DateTime, Local};
use tracing::debug;

use crate::app::sync::{Command, MutationKind, SyncUpdate};
use crate::config::AppConfig;
use crate::core::{
    car::Snapshot,
    form::{AddCarForm, FormFields, RentForm},
    view::{CarCard, CardAction, CatalogView, Escaping, RenderOptions},
};

pub const BACKEND_UNREACHABLE: &str = "Backend not reachable. Start server.";

/// Which pane has keyboard focus.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Catalog,
    Search,
    AddForm,
    RentForm,
    /// Waiting for the user to confirm deleting this car.
    ConfirmDelete(String),
}

/// Why a refresh cycle started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshCause {
    Load,
    Search,
    User,
    /// Follow-up of a successful mutation; keeps the outcome message.
    Mutation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }
}

/// Row of the rent form.  Customer and days are text; the car row cycles
/// through the available-cars selection.
pub const RENT_ROWS: usize = RentForm::LABELS.len();
pub const RENT_CAR_ROW: usize = 1;

pub struct AppState {
    pub config: AppConfig,
    /// Last successfully fetched collection.  `None` while a refresh is
    /// pending or after it failed.
    pub snapshot: Option<Snapshot>,
    /// What the catalog pane shows; rebuilt wholesale from `snapshot`.
    pub view: Option<CatalogView>,
    /// Live search text.
    pub query: String,
    pub status: Option<StatusMessage>,
    pub focus: Focus,
    /// Highlighted card in the catalog pane.
    pub selected: usize,
    pub add_form: AddCarForm,
    pub add_field: usize,
    pub rent_form: RentForm,
    pub rent_row: usize,
    /// Car chosen in the rent form's selection control.
    pub rent_car: Option<String>,
    /// Generation of the newest refresh issued.  Older fetch results are
    /// dropped on arrival.
    pub refresh_generation: u64,
    /// `true` until the newest refresh resolves.
    pub refreshing: bool,
    /// Commands dispatched but not yet applied.
    pub in_flight: usize,
    pub last_synced: Option<DateTime<Local>>,
    pub should_quit: bool,
    /// Drives the sync spinner.
    pub tick: u64,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            snapshot: None,
            view: None,
            query: String::new(),
            status: None,
            focus: Focus::default(),
            selected: 0,
            add_form: AddCarForm::default(),
            add_field: 0,
            rent_form: RentForm::default(),
            rent_row: 0,
            rent_car: None,
            refresh_generation: 0,
            refreshing: false,
            in_flight: 0,
            last_synced: None,
            should_quit: false,
            tick: 0,
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            escaping: Escaping::Terminal,
            currency: self.config.currency.clone(),
        }
    }

    // ── refresh cycle ───────────────────────────────────────────

    /// Start a refresh cycle: drop the rendered view and hand back the
    /// fetch command for the new generation.
    pub fn begin_refresh(&mut self, cause: RefreshCause) -> Command {
        self.refresh_generation = self.refresh_generation.wrapping_add(1);
        self.refreshing = true;
        self.snapshot = None;
        self.view = None;
        if cause != RefreshCause::Mutation {
            self.status = None;
        }
        debug!(generation = self.refresh_generation, ?cause, "refresh started");
        Command::Refresh {
            generation: self.refresh_generation,
        }
    }

    /// Apply a finished command.  Returns the follow-up refresh after a
    /// successful mutation.
    pub fn apply(&mut self, update: SyncUpdate) -> Option<Command> {
        self.in_flight = self.in_flight.saturating_sub(1);
        match update {
            SyncUpdate::Fetched { generation, result } => {
                if generation != self.refresh_generation {
                    debug!(generation, latest = self.refresh_generation, "stale refresh dropped");
                    return None;
                }
                self.refreshing = false;
                match result {
                    Ok(snapshot) => {
                        self.last_synced = Some(Local::now());
                        self.snapshot = Some(snapshot);
                        self.rebuild_view();
                    }
                    Err(_) => {
                        self.snapshot = None;
                        self.view = None;
                        self.status = Some(StatusMessage::error(BACKEND_UNREACHABLE));
                    }
                }
                None
            }
            SyncUpdate::Mutated { kind, result } => match result {
                Ok(reply) => {
                    self.status = Some(StatusMessage::success(
                        kind.success_message(&reply, &self.config.currency),
                    ));
                    if kind == MutationKind::Add {
                        self.add_form.clear();
                        self.add_field = 0;
                    }
                    Some(self.begin_refresh(RefreshCause::Mutation))
                }
                Err(err) => {
                    self.status = Some(StatusMessage::error(kind.failure_message(&err)));
                    None
                }
            },
        }
    }

    fn rebuild_view(&mut self) {
        let Some(snapshot) = &self.snapshot else {
            self.view = None;
            return;
        };
        let view = CatalogView::build(snapshot, &self.query, &self.render_options());

        let cards = view.cards().len();
        self.selected = self.selected.min(cards.saturating_sub(1));

        // Keep the chosen rental car if it is still available.
        let options = view.select.options();
        let still_there = self
            .rent_car
            .as_ref()
            .is_some_and(|id| options.iter().any(|o| &o.car_id == id));
        if !still_there {
            self.rent_car = options.first().map(|o| o.car_id.clone());
        }

        self.view = Some(view);
    }

    // ── catalog selection ───────────────────────────────────────

    pub fn cards(&self) -> &[CarCard] {
        self.view.as_ref().map(|v| v.cards()).unwrap_or_default()
    }

    pub fn selected_card(&self) -> Option<&CarCard> {
        self.cards().get(self.selected)
    }

    pub fn select_next(&mut self) {
        let max = self.cards().len();
        if max > 0 && self.selected < max - 1 {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Run the highlighted card's action.  Delete asks for confirmation
    /// first; return is dispatched straight away.
    pub fn activate_selected(&mut self) -> Option<Command> {
        let card = self.selected_card()?;
        let car_id = card.car_id.clone();
        match card.action {
            CardAction::Delete => {
                self.focus = Focus::ConfirmDelete(car_id);
                None
            }
            CardAction::Return => Some(Command::ReturnCar(car_id)),
        }
    }

    /// Resolve the delete confirmation.  Declining issues nothing.
    pub fn confirm_delete(&mut self, confirmed: bool) -> Option<Command> {
        let Focus::ConfirmDelete(car_id) = &self.focus else {
            return None;
        };
        let cmd = confirmed.then(|| Command::DeleteCar(car_id.clone()));
        self.focus = Focus::Catalog;
        cmd
    }

    // ── forms ───────────────────────────────────────────────────

    pub fn submit_add(&mut self) -> Option<Command> {
        match self.add_form.validate() {
            Ok(car) => Some(Command::AddCar(car)),
            Err(e) => {
                self.status = Some(StatusMessage::error(e.to_string()));
                None
            }
        }
    }

    pub fn submit_rent(&mut self) -> Option<Command> {
        match self.rent_form.validate(self.selected_rent_car()) {
            Ok(request) => Some(Command::RentCar(request)),
            Err(e) => {
                self.status = Some(StatusMessage::error(e.to_string()));
                None
            }
        }
    }

    /// The chosen rental car, if it is among the current options.
    pub fn selected_rent_car(&self) -> Option<&str> {
        let id = self.rent_car.as_deref()?;
        let view = self.view.as_ref()?;
        view.select
            .options()
            .iter()
            .any(|o| o.car_id == id)
            .then_some(id)
    }

    /// Move the rent selection by `delta` options, wrapping.
    pub fn cycle_rent_car(&mut self, delta: isize) {
        let Some(view) = &self.view else {
            return;
        };
        let options = view.select.options();
        if options.is_empty() {
            return;
        }
        let current = self
            .rent_car
            .as_ref()
            .and_then(|id| options.iter().position(|o| &o.car_id == id))
            .unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(options.len() as isize) as usize;
        self.rent_car = Some(options[next].car_id.clone());
    }

    /// Open the rent form, preselecting the highlighted card when it can be
    /// rented.
    pub fn open_rent_form(&mut self) {
        if let Some(card) = self.selected_card() {
            if card.action == CardAction::Delete {
                self.rent_car = Some(card.car_id.clone());
            }
        }
        self.rent_row = 0;
        self.focus = Focus::RentForm;
    }
}
