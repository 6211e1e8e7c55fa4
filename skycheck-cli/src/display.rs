use skycheck_core::CurrentWeather;

/// Width of the centered city and description columns.
pub const FIELD_WIDTH: usize = 20;

/// One-line summary: centered city, tab, centered description, then `(<temp>°<unit>)`.
pub fn summary_line(weather: &CurrentWeather) -> String {
    format!(
        "{city:^width$}\t{description:^width$} ({temp}°{unit})",
        city = weather.city,
        description = capitalize_words(&weather.description),
        temp = weather.temperature,
        unit = weather.units.symbol(),
        width = FIELD_WIDTH,
    )
}

/// Uppercase the first letter of each word and lowercase the rest.
pub fn capitalize_words(text: &str) -> String {
    text.split(' ').map(capitalize).collect::<Vec<_>>().join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
