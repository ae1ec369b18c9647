//! HTML rendering for the navigation shell
//!
//! Header, sidebar and main area are fixed; each view renders only its
//! `<main>` content. Map tiles and the marker widget are drawn by the
//! browser-side map library from the `#map` data attributes.

use axum::response::Html;
use shared::{
    prediction_months, prediction_years, AgriculturalPractice, AnalysisContext, CropDraft,
    CultivationArea, Notice, NoticeKind,
};

use crate::views::AnalysisSnapshot;

pub const APP_TITLE: &str = "Crop Advisor";

/// Escape text for use in HTML bodies and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn navigation() -> String {
    let mut links = String::from(r#"<a href="/registerCrop" class="clientes">Register Crop</a>"#);
    for context in AnalysisContext::ALL {
        links.push_str(&format!(
            r#"<a href="{}" class="productos">{}</a>"#,
            context.path(),
            context.nav_label()
        ));
    }
    format!(
        r#"<aside class="sidebar col-3"><h2>Navigation</h2><nav class="navegacion">{}</nav></aside>"#,
        links
    )
}

fn notices(pending: &[Notice]) -> String {
    pending
        .iter()
        .map(|notice| {
            let class = match notice.kind {
                NoticeKind::Success => "notice notice-success",
                NoticeKind::Error => "notice notice-error",
            };
            format!(
                r#"<div class="{}" role="alert"><strong>{}</strong><p>{}</p></div>"#,
                class,
                escape(&notice.title),
                escape(&notice.text)
            )
        })
        .collect()
}

/// Wrap view content in the fixed header/sidebar/main layout
pub fn page(title: &str, pending: &[Notice], main: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>{title} | {app}</title></head>
<body>
<header class="barra"><div class="contenedor"><h1>{app}</h1></div></header>
<div class="grid contenedor contenido-principal">
{nav}
<main class="caja-contenido col-9">{notices}{main}</main>
</div>
</body>
</html>"#,
        title = escape(title),
        app = APP_TITLE,
        nav = navigation(),
        notices = notices(pending),
        main = main,
    ))
}

fn option(value: &str, label: &str, selected: &str) -> String {
    let mark = if value == selected { " selected" } else { "" };
    format!(
        r#"<option value="{}"{}>{}</option>"#,
        escape(value),
        mark,
        escape(label)
    )
}

fn select(name: &str, label: &str, placeholder: &str, selected: &str, options: &[(String, String)]) -> String {
    let mut body = option("", placeholder, selected);
    for (value, text) in options {
        body.push_str(&option(value, text, selected));
    }
    format!(
        r#"<div class="campo"><label>{}</label><select name="{}" class="input-field" required>{}</select></div>"#,
        label, name, body
    )
}

/// The registration form with the map and the resolved place name
pub fn registration_form(
    draft: &CropDraft,
    marker: shared::Coordinates,
    location_name: &str,
    current_year: i32,
) -> String {
    let areas: Vec<(String, String)> = CultivationArea::ALL
        .iter()
        .map(|a| (a.value().to_string(), a.label().to_string()))
        .collect();
    let practices: Vec<(String, String)> = AgriculturalPractice::ALL
        .iter()
        .map(|p| (p.value().to_string(), p.label().to_string()))
        .collect();
    let years: Vec<(String, String)> = prediction_years(current_year)
        .into_iter()
        .map(|y| (y.to_string(), y.to_string()))
        .collect();
    let months: Vec<(String, String)> = prediction_months()
        .into_iter()
        .map(|m| (m.to_string(), m.to_string()))
        .collect();

    format!(
        r#"<div class="cultivo-container">
<h2 class="form-title">Register your crop</h2>
<form class="formulario" method="post" action="/registerCrop">
<legend class="form-legend">Fill in all fields</legend>
<div class="campo"><label>Crop:</label><input type="text" placeholder="Type of Crop" name="crop" class="input-field" value="{crop}" required></div>
{area}
{practice}
{year}
{month}
<div class="enviar"><div class="button-container">
<div class="eliminar"><button type="submit" form="reset-form" class="btn btn-rojo">Delete Data</button></div>
<input type="submit" class="btn btn-verde" value="Analyze">
</div></div>
</form>
<form id="reset-form" method="post" action="/registerCrop/reset"></form>
<h1>Select Location</h1>
<div class="campo"><div id="map" data-lat="{lat}" data-lng="{lng}" data-zoom="13" style="height: 500px; width: 100%"></div></div>
<form class="map-event" method="post" action="/registerCrop/location">
<input type="hidden" name="source" value="click">
<input type="number" step="any" name="lat" value="{lat}" required>
<input type="number" step="any" name="lng" value="{lng}" required>
<input type="submit" class="btn" value="Move marker">
</form>
<div class="campo location-display"><h3 class="location-title">Current Location:</h3><p class="location-name">{place}</p></div>
</div>"#,
        crop = escape(&draft.crop),
        area = select("cultivationA", "Cultivation Area:", "Select an Area", &draft.cultivation_a, &areas),
        practice = select("agriculturalP", "Agricultural Practices:", "Select a Practice", &draft.agricultural_p, &practices),
        year = select("predictionYear", "Prediction Year:", "Select a Year", &draft.prediction_year, &years),
        month = select("predictionMonth", "Prediction Month:", "Select a Month", &draft.prediction_month, &months),
        lat = marker.lat,
        lng = marker.lng,
        place = escape(location_name),
    )
}

/// An analysis page body
pub fn analysis(snapshot: &AnalysisSnapshot) -> String {
    let record_json = match &snapshot.record {
        Some(record) => serde_json::to_string_pretty(record).unwrap_or_else(|_| "{}".to_string()),
        None => "{}".to_string(),
    };

    let mut body = format!(
        "<h1>{}</h1><pre>{}</pre>",
        snapshot.context.tag(),
        escape(&record_json)
    );
    if snapshot.loading {
        body.push_str(r#"<p class="loading">Loading recommendations...</p>"#);
    }
    if let Some(error) = &snapshot.error {
        body.push_str(&format!(r#"<p class="error" style="color: red">{}</p>"#, escape(error)));
    }
    if let Some(text) = snapshot.recommendation.as_deref().filter(|t| !t.is_empty()) {
        body.push_str(&format!(
            r#"<div class="result-container"><h2>Recommendations:</h2><pre>{}</pre></div>"#,
            escape(text)
        ));
    }
    body.push_str(&format!(
        r#"<div class="btn-container"><form method="post" action="{path}/speak"><button class="custom-btn">Read Aloud</button></form><form method="post" action="{path}/stop"><button class="custom-btn">Stop</button></form></div>"#,
        path = snapshot.context.path()
    ));
    body
}
