//! String transforms for API parameters and display.

/// Normalize a query part before sending it to a backend.
///
/// Trims, lowercases and collapses whitespace runs into single spaces.
pub fn format_for_api(text: &str) -> String {
    text.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Title-case each word for headings: "new YORK" becomes "New York".
pub fn format_for_display(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Truncate text to fit within `max_width` terminal columns.
///
/// Wide characters count as two columns. An ellipsis is appended when
/// anything was cut.
///
/// # Examples
///
/// ```
/// use hotel_search::utils::truncate_with_ellipsis;
///
/// assert_eq!(truncate_with_ellipsis("Hotel Metropol", 8), "Hotel...");
/// assert_eq!(truncate_with_ellipsis("Inn", 8), "Inn");
/// ```
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }

    let char_widths: Vec<(char, usize)> = text
        .chars()
        .map(|c| (c, unicode_width::UnicodeWidthChar::width(c).unwrap_or(1)))
        .collect();

    let total_width: usize = char_widths.iter().map(|(_, w)| *w).sum();
    if total_width <= max_width {
        return text.to_string();
    }

    let budget = max_width.saturating_sub(3);
    let mut current_width = 0;
    let mut end_idx = 0;
    for (i, (_, w)) in char_widths.iter().enumerate() {
        if current_width + w > budget {
            break;
        }
        current_width += w;
        end_idx = i + 1;
    }

    let kept: String = char_widths[..end_idx].iter().map(|(c, _)| *c).collect();
    format!("{}...", kept.trim_end())
}
