//! Multi-valued column encoding.
//!
//! Multi-valued schedule fields are stored padded with a control character,
//! e.g. `"\x012\x015\x01"`. Comma-separated input is accepted as well.

/// Separator used for padded multi-value columns.
pub const VALUE_SEPARATOR: char = '\u{1}';

/// Split a padded or comma-separated value into its non-empty items.
pub fn explode_padded(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    raw.split(|c| c == VALUE_SEPARATOR || c == ',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Join items into the padded column form. An empty list is stored as `None`.
pub fn implode_padded<I, T>(items: I) -> Option<String>
where
    I: IntoIterator<Item = T>,
    T: ToString,
{
    let items: Vec<String> = items.into_iter().map(|i| i.to_string()).collect();
    if items.is_empty() {
        return None;
    }

    let mut out = String::new();
    out.push(VALUE_SEPARATOR);
    for item in items {
        out.push_str(&item);
        out.push(VALUE_SEPARATOR);
    }
    Some(out)
}
