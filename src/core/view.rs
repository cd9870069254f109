//! Pure view-model derivation for the catalog.
//!
//! Everything here is a function of an immutable [`Snapshot`], the search
//! text and the [`RenderOptions`].  Renderers (terminal widgets, HTML
//! markup) only consume the resulting [`CatalogView`].

use super::car::{Amount, Car, Snapshot};

pub const EMPTY_CATALOG: &str = "No cars found. Add your first car above.";
pub const NO_CARS_AVAILABLE: &str = "No cars available";

// ───────────────────────────────────────── escaping ──────────

/// How user-supplied text is made safe for the target output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escaping {
    /// HTML entity escaping of `& < > " '`.
    Markup,
    /// Control characters removed so a name can't move the cursor or
    /// recolour the terminal.
    Terminal,
}

impl Escaping {
    pub fn apply(self, text: &str) -> String {
        match self {
            Escaping::Markup => escape_markup(text),
            Escaping::Terminal => text.chars().filter(|c| !c.is_control()).collect(),
        }
    }
}

pub fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            c => out.push(c),
        }
    }
    out
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub escaping: Escaping,
    /// Prefix for prices, e.g. `₹`.
    pub currency: String,
}

// ───────────────────────────────────────── derivation ────────

/// Lower-cased, trimmed search text.  Empty means "no filtering".
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Cars whose `brand model` contains the query, case-insensitively.
pub fn filter_cars<'a>(cars: &'a [Car], query: &str) -> Vec<&'a Car> {
    let q = normalize_query(query);
    if q.is_empty() {
        return cars.iter().collect();
    }
    cars.iter()
        .filter(|c| c.display_name().to_lowercase().contains(&q))
        .collect()
}

pub fn available_cars(cars: &[Car]) -> Vec<&Car> {
    cars.iter().filter(|c| c.available).collect()
}

/// `"1 car"` / `"N cars"`.
pub fn count_label(count: usize) -> String {
    format!("{count} car{}", if count == 1 { "" } else { "s" })
}

// ───────────────────────────────────────── view model ────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Badge {
    Available,
    /// Escaped renter name (`"User"` when the service left it blank).
    RentedBy(String),
}

impl Badge {
    pub fn text(&self) -> String {
        match self {
            Badge::Available => "Available".to_string(),
            Badge::RentedBy(name) => format!("Rented by {name}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    Delete,
    Return,
}

impl CardAction {
    pub fn label(self) -> &'static str {
        match self {
            CardAction::Delete => "Delete",
            CardAction::Return => "Return",
        }
    }
}

/// One catalog card.  `car_id` is the raw identifier used to dispatch the
/// card's action; every display field has already been escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarCard {
    pub car_id: String,
    pub title: String,
    pub price: String,
    pub image_url: String,
    pub badge: Badge,
    pub action: CardAction,
}

impl CarCard {
    pub fn from_car(car: &Car, opts: &RenderOptions) -> Self {
        let esc = |s: &str| opts.escaping.apply(s);
        let (badge, action) = if car.available {
            (Badge::Available, CardAction::Delete)
        } else {
            (Badge::RentedBy(esc(car.renter())), CardAction::Return)
        };
        Self {
            car_id: car.car_id.clone(),
            title: format!("{} {}", esc(&car.brand), esc(&car.model)),
            price: format!("{}{}/day", opts.currency, Amount(car.price_per_day)),
            image_url: esc(&car.image_url),
            badge,
            action,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub car_id: String,
    pub label: String,
}

/// Contents of the "car to rent" selection control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CarSelect {
    /// Nothing is available; a single disabled entry is shown.
    Placeholder,
    Options(Vec<SelectOption>),
}

impl CarSelect {
    pub fn options(&self) -> &[SelectOption] {
        match self {
            CarSelect::Placeholder => &[],
            CarSelect::Options(opts) => opts,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogBody {
    /// Filter matched nothing; only the empty-state message is shown.
    Empty,
    Cards(Vec<CarCard>),
}

/// Everything one refresh cycle renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogView {
    /// Counts the unfiltered collection.
    pub count_label: String,
    pub select: CarSelect,
    pub body: CatalogBody,
}

impl CatalogView {
    pub fn build(snapshot: &Snapshot, query: &str, opts: &RenderOptions) -> Self {
        let available = available_cars(snapshot);
        let select = if available.is_empty() {
            CarSelect::Placeholder
        } else {
            CarSelect::Options(
                available
                    .into_iter()
                    .map(|c| SelectOption {
                        car_id: c.car_id.clone(),
                        label: format!(
                            "{} {} ({})",
                            opts.escaping.apply(&c.brand),
                            opts.escaping.apply(&c.model),
                            opts.escaping.apply(&c.car_id),
                        ),
                    })
                    .collect(),
            )
        };

        let filtered = filter_cars(snapshot, query);
        let body = if filtered.is_empty() {
            CatalogBody::Empty
        } else {
            CatalogBody::Cards(filtered.into_iter().map(|c| CarCard::from_car(c, opts)).collect())
        };

        Self {
            count_label: count_label(snapshot.len()),
            select,
            body,
        }
    }

    pub fn cards(&self) -> &[CarCard] {
        match &self.body {
            CatalogBody::Empty => &[],
            CatalogBody::Cards(cards) => cards,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn car(id: &str, brand: &str, model: &str, available: bool) -> Car {
        Car {
            car_id: id.into(),
            brand: brand.into(),
            model: model.into(),
            price_per_day: 1200.0,
            image_url: "x".into(),
            available,
            rented_by: (!available).then(|| "Ravi".to_string()),
        }
    }

    fn fleet() -> Snapshot {
        Snapshot::new(vec![
            car("C1", "Tata", "Nexon", true),
            car("C2", "Maruti", "Swift", false),
            car("C3", "Tata", "Harrier", true),
            car("C4", "Hyundai", "Creta", false),
        ])
    }

    fn markup() -> RenderOptions {
        RenderOptions {
            escaping: Escaping::Markup,
            currency: "₹".into(),
        }
    }

    #[test]
    fn filter_matches_brand_and_model_case_insensitively() {
        let snap = fleet();
        let ids = |q: &str| filter_cars(&snap, q).into_iter().map(|c| c.car_id.as_str()).collect::<Vec<_>>();

        assert_eq!(ids("tata"), ["C1", "C3"]);
        assert_eq!(ids("  HARR "), ["C3"]);
        // The separator between brand and model is part of the haystack.
        assert_eq!(ids("tata nex"), ["C1"]);
        assert_eq!(ids("swift"), ["C2"]);
        assert!(ids("tesla").is_empty());
    }

    #[test]
    fn blank_query_keeps_everything() {
        let snap = fleet();
        assert_eq!(filter_cars(&snap, "").len(), 4);
        assert_eq!(filter_cars(&snap, "   \t").len(), 4);
    }

    #[test]
    fn count_label_pluralises_and_ignores_filter() {
        assert_eq!(count_label(0), "0 cars");
        assert_eq!(count_label(1), "1 car");
        assert_eq!(count_label(2), "2 cars");

        let view = CatalogView::build(&fleet(), "nexon", &markup());
        assert_eq!(view.cards().len(), 1);
        assert_eq!(view.count_label, "4 cars");
    }

    #[test]
    fn select_lists_exactly_the_available_cars() {
        let view = CatalogView::build(&fleet(), "creta", &markup());
        let ids: Vec<_> = view.select.options().iter().map(|o| o.car_id.as_str()).collect();
        assert_eq!(ids, ["C1", "C3"]);
        assert_eq!(view.select.options()[0].label, "Tata Nexon (C1)");
    }

    #[test]
    fn select_shows_placeholder_when_nothing_is_available() {
        let snap = Snapshot::new(vec![car("C2", "Maruti", "Swift", false)]);
        let view = CatalogView::build(&snap, "", &markup());
        assert_eq!(view.select, CarSelect::Placeholder);
        assert_eq!(view.cards().len(), 1);
    }

    #[test]
    fn empty_filter_result_renders_empty_state_only() {
        let view = CatalogView::build(&fleet(), "tesla", &markup());
        assert_eq!(view.body, CatalogBody::Empty);
        assert!(view.cards().is_empty());

        let view = CatalogView::build(&Snapshot::default(), "", &markup());
        assert_eq!(view.body, CatalogBody::Empty);
        assert_eq!(view.count_label, "0 cars");
        assert_eq!(view.select, CarSelect::Placeholder);
    }

    #[test]
    fn cards_pick_badge_and_action_from_availability() {
        let view = CatalogView::build(&fleet(), "", &markup());
        let cards = view.cards();

        assert_eq!(cards[0].badge, Badge::Available);
        assert_eq!(cards[0].action, CardAction::Delete);
        assert_eq!(cards[0].price, "₹1200/day");

        assert_eq!(cards[1].badge.text(), "Rented by Ravi");
        assert_eq!(cards[1].action, CardAction::Return);
    }

    #[test]
    fn rented_car_without_renter_shows_user() {
        let mut c = car("C9", "Kia", "Seltos", false);
        c.rented_by = None;
        let card = CarCard::from_car(&c, &markup());
        assert_eq!(card.badge, Badge::RentedBy("User".into()));
    }

    #[test]
    fn markup_escaping_covers_user_text() {
        let mut c = car("C5", "<b>Tata</b>", "Nexon & \"Co\" 'X'", false);
        c.rented_by = Some("<script>alert(1)</script>".into());
        let card = CarCard::from_car(&c, &markup());

        assert_eq!(
            card.title,
            "&lt;b&gt;Tata&lt;/b&gt; Nexon &amp; &quot;Co&quot; &#039;X&#039;"
        );
        assert_eq!(
            card.badge,
            Badge::RentedBy("&lt;script&gt;alert(1)&lt;/script&gt;".into())
        );
        for field in [&card.title, &card.badge.text()] {
            assert!(!field.contains('<') && !field.contains('>') && !field.contains('"'));
        }
    }

    #[test]
    fn terminal_escaping_strips_control_characters() {
        let opts = RenderOptions {
            escaping: Escaping::Terminal,
            currency: "$".into(),
        };
        let c = car("C6", "Ta\x1b[31mta", "Nex\non", true);
        let card = CarCard::from_car(&c, &opts);
        assert_eq!(card.title, "Ta[31mta Nexon");
        assert_eq!(card.price, "$1200/day");
    }
}
