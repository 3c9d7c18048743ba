//! Display formatting for weather readings

/// Rounds half away from zero; integer output never shows `-0`
fn round_display(value: f64) -> i64 {
    value.round() as i64
}

/// Formats a Celsius temperature, e.g. `23.6` -> `"24°C"`
pub fn format_temperature(celsius: f64) -> String {
    format!("{}°C", round_display(celsius))
}

/// Formats relative humidity, e.g. `60` -> `"60%"`
pub fn format_humidity(percent: u8) -> String {
    format!("{}%", percent)
}

/// Formats a wind speed already converted to km/h, e.g. `18.0` -> `"18 km/h"`
pub fn format_wind(kmh: f64) -> String {
    format!("{} km/h", round_display(kmh))
}

/// Uppercases the first letter of every word, like CSS `text-transform: capitalize`
pub fn capitalize_words(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if at_word_start && c.is_alphabetic() {
            out.extend(c.to_uppercase());
            at_word_start = false;
        } else {
            out.push(c);
            if c.is_whitespace() {
                at_word_start = true;
            } else if c.is_alphanumeric() {
                at_word_start = false;
            }
        }
    }
    out
}
