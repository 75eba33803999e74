//! Server-rendered address form.
//!
//! Lookup outcomes are always rendered with status 200; failures show up as an
//! inline message above the form results.

use axum::{
    Form,
    extract::State,
    response::Html,
};
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::sync::Arc;
use tracing::warn;

use super::{AddressForm, AppState};
use crate::constants;
use crate::models::{GeoResult, SearchRecord};

const STYLE: &str = "\
body { font-family: sans-serif; background: #f4f5f7; margin: 0; }
.container { max-width: 760px; margin: 40px auto; background: #fff; padding: 24px 32px; border-radius: 8px; }
form { display: flex; gap: 8px; }
input[type=text] { flex: 1; padding: 8px; font-size: 16px; }
button { padding: 8px 16px; font-size: 16px; }
.error { color: #c0392b; }
.address-result { border-top: 1px solid #ddd; padding-top: 12px; }";

#[derive(Default)]
struct PageView<'a> {
    address: &'a str,
    error: Option<String>,
    results: &'a [GeoResult],
    saved: &'a [SearchRecord],
}

/// `GET /`
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let saved = saved_addresses(&state).await;

    Html(render(&PageView {
        saved: &saved,
        ..PageView::default()
    }))
}

/// `POST /get-info`
pub async fn get_info(
    State(state): State<Arc<AppState>>,
    Form(form): Form<AddressForm>,
) -> Html<String> {
    let outcome = state.lookup_service().lookup(&form.address).await;
    let saved = saved_addresses(&state).await;

    let page = match &outcome {
        Ok(found) => render(&PageView {
            address: found.address.as_str(),
            results: &found.results,
            saved: &saved,
            ..PageView::default()
        }),
        Err(e) => render(&PageView {
            address: &form.address,
            error: Some(e.user_message()),
            saved: &saved,
            ..PageView::default()
        }),
    };

    Html(page)
}

async fn saved_addresses(state: &AppState) -> Vec<SearchRecord> {
    match state
        .lookup_service()
        .history(Some(constants::limits::DEFAULT_HISTORY_LIMIT))
        .await
    {
        Ok(records) => records,
        Err(e) => {
            warn!(error = %e, "Failed to load saved addresses");
            Vec::new()
        }
    }
}

fn render(view: &PageView<'_>) -> String {
    let mut html = String::with_capacity(4096);

    html.push_str("<!DOCTYPE html>\n<html lang=\"ru\">\n<head>\n");
    html.push_str("<meta charset=\"UTF-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    html.push_str("<title>Московский адрес</title>\n");
    html.push_str(&format!("<style>\n{STYLE}\n</style>\n"));
    html.push_str("</head>\n<body>\n<div class=\"container\">\n");

    html.push_str("<h1>Введите адрес в Москве</h1>\n");
    html.push_str(&format!(
        "<form action=\"/get-info\" method=\"post\">\n\
         <input type=\"text\" name=\"address\" required minlength=\"{}\" maxlength=\"{}\" \
         placeholder=\"Введите адрес\" value=\"{}\">\n\
         <button type=\"submit\">Поиск</button>\n</form>\n",
        constants::address::MIN_LENGTH,
        constants::address::MAX_LENGTH,
        encode_double_quoted_attribute(view.address),
    ));

    if let Some(error) = &view.error {
        html.push_str(&format!("<h2 class=\"error\">{}</h2>\n", encode_text(error)));
    }

    if !view.results.is_empty() {
        html.push_str("<h1>Результаты поиска:</h1>\n");
        for (index, result) in view.results.iter().enumerate() {
            render_result(&mut html, index + 1, result);
        }
    }

    html.push_str("<h2>Сохраненные адреса:</h2>\n<ol>\n");
    for record in view.saved {
        html.push_str(&format!(
            "<li>{}</li>\n",
            encode_text(&record.normalized_address)
        ));
    }
    html.push_str("</ol>\n</div>\n</body>\n</html>\n");

    html
}

fn render_result(html: &mut String, number: usize, result: &GeoResult) {
    html.push_str("<div class=\"address-result\">\n");
    html.push_str(&format!("<h2>Информация об адресе {number}:</h2>\n<ul>\n"));
    html.push_str(&format!(
        "<li><strong>Адрес:</strong> {}</li>\n",
        encode_text(&result.formatted_address)
    ));

    for (label, value) in [
        ("Район", &result.district),
        ("Улица", &result.street),
        ("Дом", &result.house),
    ] {
        if !value.is_empty() {
            html.push_str(&format!(
                "<li><strong>{label}:</strong> {}</li>\n",
                encode_text(value)
            ));
        }
    }
    html.push_str(&format!(
        "<li><strong>Координаты:</strong> {}</li>\n</ul>\n",
        encode_text(&result.coordinates.to_string())
    ));

    if !result.nearby_stations.is_empty() {
        html.push_str("<h3>Ближайшие станции метро:</h3>\n<ol>\n");
        for station in &result.nearby_stations {
            html.push_str(&format!(
                "<li>{} - {}</li>\n",
                encode_text(&station.name),
                encode_text(&station.description)
            ));
        }
        html.push_str("</ol>\n");
    }

    html.push_str("</div>\n");
}
