//! HTML rendering of the search page

use axum::{
    Router,
    extract::{OriginalUri, Path, Query, State},
    response::{Html, Redirect},
    routing::get,
};
use std::fmt::Write;

use super::{SearchState, SearchView};
use crate::api::{FlightQuery, lookup_flight};
use crate::i18n::{Dictionary, Locale, switch_locale_path};
use crate::models::FlightSummary;
use crate::{Result, web::AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(redirect_to_default_locale))
        .route("/{lang}", get(search_page))
}

async fn redirect_to_default_locale() -> Redirect {
    Redirect::permanent(&format!("/{}", Locale::default().tag()))
}

async fn search_page(
    State(state): State<AppState>,
    Path(lang): Path<String>,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<FlightQuery>,
) -> Result<Html<String>> {
    let locale = Locale::from_tag(&lang);
    let dictionary = Dictionary::load(locale)?;
    let mut view = SearchView::new(locale);

    if let Some(input) = query.flight_iata.as_deref() {
        if let Some(flight_code) = view.submit(input) {
            let outcome = lookup_flight(state.provider(), Some(&flight_code)).await;
            view.resolve(outcome);
        }
    }

    Ok(Html(render(&view, &dictionary, uri.path(), &lang)))
}

/// Render the whole page for the current view state
#[must_use]
pub fn render(view: &SearchView, dictionary: &Dictionary, path: &str, current_tag: &str) -> String {
    let locale = view.locale();
    let mut html = String::with_capacity(4096);

    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="/static/styles.css">
</head>
<body>
<main class="container">
"#,
        lang = locale.tag(),
        title = escape_html(&dictionary.title),
    );

    render_language_switcher(&mut html, locale, path, current_tag);

    let _ = write!(
        html,
        r#"<div class="card">
<div class="header"><h1>{title}</h1></div>
<form method="get" action="{action}" class="form-group" onsubmit="var b=this.querySelector('button');if(b.disabled){{return false;}}b.disabled=true;b.textContent=b.dataset.searching;">
<div class="input-wrapper">
<input type="text" name="flight_iata" placeholder="{placeholder}" value="{value}" autofocus>
</div>
<button type="submit" data-searching="{searching}"{disabled}>{button}</button>
</form>
"#,
        title = escape_html(&dictionary.title),
        action = escape_html(path),
        placeholder = escape_html(&dictionary.search_placeholder),
        value = escape_html(view.input()),
        searching = escape_html(&dictionary.searching),
        disabled = if view.is_pending() { " disabled" } else { "" },
        button = escape_html(if view.is_pending() {
            &dictionary.searching
        } else {
            &dictionary.search_button
        }),
    );

    match view.state() {
        SearchState::Failed(kind) => {
            let _ = write!(
                html,
                "<div class=\"error\" role=\"alert\"><span>{}</span></div>\n",
                escape_html(kind.message(dictionary))
            );
        }
        SearchState::Success(summary) => render_summary(&mut html, summary, dictionary, locale),
        SearchState::Idle | SearchState::Searching { .. } => {}
    }

    html.push_str("</div>\n</main>\n</body>\n</html>\n");
    html
}

fn render_language_switcher(html: &mut String, locale: Locale, path: &str, current_tag: &str) {
    html.push_str("<nav class=\"language-switcher\">\n");
    for target in Locale::ALL {
        let class = if target == locale { "active" } else { "inactive" };
        let _ = writeln!(
            html,
            r#"<a class="{class}" hreflang="{tag}" href="{href}">{label}</a>"#,
            tag = target.tag(),
            href = escape_html(&switch_locale_path(path, current_tag, target)),
            label = target.short_label(),
        );
    }
    html.push_str("</nav>\n");
}

fn render_summary(html: &mut String, summary: &FlightSummary, dictionary: &Dictionary, locale: Locale) {
    let _ = write!(
        html,
        r#"<div class="result-card">
<div class="flight-header"><div class="flight-number"><span>{flight}</span></div></div>
<div class="flight-grid">
<div class="flight-item"><span class="label">{departure}</span><span class="value">{departure_location}</span></div>
<div class="flight-item"><span class="label">{arrival}</span><span class="value">{arrival_location}</span></div>
<div class="flight-item"><span class="label">{departure_time}</span><span class="value">{departure_at}<span class="sub-text">({departure_tz})</span></span></div>
<div class="flight-item"><span class="label">{arrival_time}</span><span class="value">{arrival_at}<span class="sub-text">({arrival_tz})</span></span></div>
</div>
</div>
"#,
        flight = escape_html(&summary.flight_number),
        departure = escape_html(&dictionary.departure),
        departure_location = escape_html(&summary.departure_location),
        arrival = escape_html(&dictionary.arrival),
        arrival_location = escape_html(&summary.arrival_location),
        departure_time = escape_html(&dictionary.departure_time),
        departure_at = escape_html(&summary.departure_display(locale)),
        departure_tz = escape_html(&summary.departure_time_zone),
        arrival_time = escape_html(&dictionary.arrival_time),
        arrival_at = escape_html(&summary.arrival_display(locale)),
        arrival_tz = escape_html(&summary.arrival_time_zone),
    );
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
