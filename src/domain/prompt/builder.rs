use minijinja::{AutoEscape, Environment, context};

use crate::domain::RawSnapshot;

const TEMPLATE_NAME: &str = "weather_analyst";
const TEMPLATE: &str = include_str!("weather_analyst.j2");

/// Default strictness wording placed first in the requirements list.
pub const DEFAULT_STRICTNESS: &str =
    "Respond ONLY with valid JSON. No explanation, no markdown, no backticks, no extra text.";

/// Render the model instruction for `snapshot`.
///
/// Deterministic for a given snapshot and wording. Cities are listed
/// explicitly and the snapshot is embedded pretty-printed.
pub fn build_prompt(snapshot: &RawSnapshot, strictness: &str) -> String {
    let cities: Vec<&str> = snapshot.cities().collect();
    let weather_json = snapshot.to_pretty_json();

    render_template(&cities, &weather_json, strictness).unwrap_or_else(|err| {
        log::warn!("Prompt template failed to render ({}); using plain layout", err);
        render_plain(&cities, &weather_json, strictness)
    })
}

fn render_template(
    cities: &[&str],
    weather_json: &str,
    strictness: &str,
) -> Result<String, minijinja::Error> {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.add_template(TEMPLATE_NAME, TEMPLATE)?;

    env.get_template(TEMPLATE_NAME)?.render(context! {
        cities => cities,
        weather_json => weather_json,
        strictness => strictness,
    })
}

fn render_plain(cities: &[&str], weather_json: &str, strictness: &str) -> String {
    let keys = if cities.is_empty() {
        "(no cities: reply with an empty object {})".to_string()
    } else {
        cities.join(", ")
    };
    format!(
        "You are an AI weather analyst. Return ONLY a single JSON object whose top-level keys \
         are exactly: {}. Each value must contain exactly the string fields \"mood\" (one short \
         word) and \"summary\" (1-2 sentences). {}\n\nWeather data:\n{}\n",
        keys, strictness, weather_json
    )
}
