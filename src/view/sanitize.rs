//! Display-string cleanup and number formatting.

/// Remove the artifacts of missing optional fields from a location string.
///
/// Splits on commas, drops empty parts and `null` tokens, and rejoins with
/// `", "`. Applying it twice gives the same result as applying it once.
pub fn sanitize_location(raw: &str) -> String {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty() && !part.eq_ignore_ascii_case("null"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Location label for a reading, with the `"<city>, <country>"` fallback
pub fn location_label(
    display_location: Option<&str>,
    city: Option<&str>,
    country: Option<&str>,
) -> String {
    let primary = display_location
        .map(sanitize_location)
        .filter(|s| !s.is_empty())
        .or_else(|| city.map(sanitize_location).filter(|s| !s.is_empty()));

    match primary {
        Some(label) => label,
        None => {
            let fallback = sanitize_location(&format!(
                "{}, {}",
                city.unwrap_or("Unknown"),
                country.unwrap_or("")
            ));
            if fallback.is_empty() {
                "Unknown".to_string()
            } else {
                fallback
            }
        }
    }
}

/// Integral values without decimals, others with at most two
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }
    if value.fract() == 0.0 {
        return format!("{:.0}", value);
    }
    let s = format!("{:.2}", value);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Text shown in place of a missing value
pub const PLACEHOLDER: &str = "--";

pub fn format_optional(value: Option<f64>) -> String {
    value.map(format_number).unwrap_or_else(|| PLACEHOLDER.to_string())
}
