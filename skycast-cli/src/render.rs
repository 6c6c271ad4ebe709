//! Human-friendly rendering of cycle state. Reads state, never mutates it.

use chrono::Local;

use skycast_core::{LocationPhase, LocationState, SearchState, format_long_date};

/// Print the full dashboard: location weather on top, city search below.
pub fn draw(location: &LocationState, search: &SearchState) {
    print!("{}", location_panel(location));
    print!("{}", search_panel_with_header(search, location));
    println!();
}

pub fn location_panel(state: &LocationState) -> String {
    let mut out = String::new();

    if let Some(notice) = state.notice {
        out.push_str(&format!("! {}\n", notice.message()));
    }

    match state.phase {
        LocationPhase::Loading => {
            out.push_str("Detecting your location...\n");
        }
        LocationPhase::Ready => {
            if let Some(snapshot) = &state.snapshot {
                out.push_str(&format!("{}, {}\n", snapshot.city, snapshot.country));
                out.push_str(&format!(
                    "{}  {}\n",
                    snapshot.icon.glyph(),
                    snapshot.condition
                ));
                out.push_str(&format!(
                    "{}\n",
                    format_long_date(Local::now().date_naive())
                ));
                out.push_str(&format!(
                    "{}°C / {}°F\n",
                    snapshot.temperature_c, snapshot.temperature_f
                ));
            }
        }
    }

    out
}

fn search_panel_with_header(search: &SearchState, location: &LocationState) -> String {
    let mut out = String::new();

    // The search panel shows the location cycle's condition and icon, the
    // way the dashboard's two views share one header.
    if let Some(snapshot) = &location.snapshot {
        out.push_str(&format!(
            "\n{}  {}\n",
            snapshot.icon.glyph(),
            snapshot.condition
        ));
    }

    out.push_str(&search_panel(search));
    out
}

pub fn search_panel(state: &SearchState) -> String {
    if let Some(snapshot) = state.snapshot() {
        let mut out = String::new();
        out.push_str(&format!(
            "{}, {}  [{}]\n",
            snapshot.city, snapshot.country, snapshot.icon_id
        ));
        out.push_str(&format!(
            "Temperature  {}°C ({})\n",
            snapshot.temperature_c, snapshot.condition
        ));
        out.push_str(&format!("Humidity     {}%\n", snapshot.humidity_pct));
        out.push_str(&format!("Visibility   {} km\n", snapshot.visibility_km));
        out.push_str(&format!("Wind Speed   {} km/h\n", snapshot.wind_speed));
        out
    } else if let Some(error) = state.error() {
        format!("{} {}\n", error.attempted_query, error.message)
    } else {
        String::new()
    }
}
