//! A1-notation addresses for the values endpoints.
//!
//! Reading and writing build addresses differently: `read` leaves a range
//! that already names a tab alone, `write` always prefixes the tab.

const TAB_SEPARATOR: char = '!';

/// An empty `range` counts as omitted and reads the whole tab
pub fn read_address(tab: &str, range: Option<&str>) -> String {
    match range.filter(|r| !r.is_empty()) {
        None => tab.to_string(),
        Some(range) if range.contains(TAB_SEPARATOR) => range.to_string(),
        Some(range) => format!("{}{}{}", tab, TAB_SEPARATOR, range),
    }
}

pub fn write_address(tab: &str, range: &str) -> String {
    format!("{}{}{}", tab, TAB_SEPARATOR, range)
}
