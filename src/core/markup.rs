//! HTML rendering of a [`CatalogView`].
//!
//! The view must have been built with [`Escaping::Markup`](super::view::Escaping);
//! this module only escapes the raw identifiers and the placeholder URL it
//! places in attributes.

use std::fmt::Write;

use super::view::{
    escape_markup, Badge, CardAction, CarCard, CarSelect, CatalogBody, CatalogView, EMPTY_CATALOG,
    NO_CARS_AVAILABLE,
};

/// Renders the count pill, the rent selection control and the card grid.
pub fn render_catalog(view: &CatalogView, placeholder_image: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, r#"<span id="countPill" class="pill">{}</span>"#, view.count_label);
    out.push_str(&render_select(&view.select));
    out.push_str(&render_grid(&view.body, placeholder_image));
    out
}

pub fn render_select(select: &CarSelect) -> String {
    let mut out = String::from("<select id=\"carSelect\">\n");
    match select {
        CarSelect::Placeholder => {
            let _ = writeln!(out, r#"  <option value="" disabled selected>{NO_CARS_AVAILABLE}</option>"#);
        }
        CarSelect::Options(options) => {
            for opt in options {
                let _ = writeln!(
                    out,
                    r#"  <option value="{}">{}</option>"#,
                    escape_markup(&opt.car_id),
                    opt.label
                );
            }
        }
    }
    out.push_str("</select>\n");
    out
}

pub fn render_grid(body: &CatalogBody, placeholder_image: &str) -> String {
    let mut out = String::from("<div id=\"carGrid\">\n");
    match body {
        CatalogBody::Empty => {
            let _ = writeln!(out, r#"  <p class="message">{EMPTY_CATALOG}</p>"#);
        }
        CatalogBody::Cards(cards) => {
            for card in cards {
                out.push_str(&render_card(card, placeholder_image));
            }
        }
    }
    out.push_str("</div>\n");
    out
}

fn render_card(card: &CarCard, placeholder_image: &str) -> String {
    let badge = match &card.badge {
        Badge::Available => format!(r#"<span class="badge">{}</span>"#, card.badge.text()),
        Badge::RentedBy(_) => format!(r#"<span class="badge red">{}</span>"#, card.badge.text()),
    };
    let button_class = match card.action {
        CardAction::Delete => "btn danger",
        CardAction::Return => "btn ghost",
    };
    let action = match card.action {
        CardAction::Delete => "delete",
        CardAction::Return => "return",
    };

    let mut out = String::new();
    let _ = writeln!(out, r#"  <div class="car-card">"#);
    let _ = writeln!(
        out,
        r#"    <img src="{}" alt="{}" onerror="this.src='{}'">"#,
        card.image_url,
        card.title,
        escape_markup(&js_single_quoted(placeholder_image))
    );
    let _ = writeln!(out, r#"    <div class="car-body">"#);
    let _ = writeln!(out, r#"      <div class="car-title">"#);
    let _ = writeln!(out, "        <h3>{}</h3>", card.title);
    let _ = writeln!(out, r#"        <div class="price">{}</div>"#, card.price);
    let _ = writeln!(out, "      </div>");
    let _ = writeln!(out, r#"      <div class="meta">{badge}</div>"#);
    let _ = writeln!(
        out,
        r#"      <div class="actions"><button class="{button_class}" data-action="{action}" data-car-id="{}">{}</button></div>"#,
        escape_markup(&card.car_id),
        card.action.label()
    );
    let _ = writeln!(out, "    </div>");
    let _ = writeln!(out, "  </div>");
    out
}

/// Body of a single-quoted JavaScript string literal.
fn js_single_quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '\'' => {
                out.push('\\');
                out.push(c);
            }
            '\n' | '\r' => {}
            _ => out.push(c),
        }
    }
    out
}
