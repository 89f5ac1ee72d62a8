//! Terminal rendering for the command-line front-end.
//!
//! This module turns [`ResultView`]s and [`SearchError`]s into colored
//! output, and provides the spinner shown while a search is in flight.

use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::time::Duration;

use crate::models::{Hotel, StarSelector};
use crate::search::{ResultView, SearchError};
use crate::utils::truncate_with_ellipsis;

/// Check if stdout is a terminal.
pub fn is_terminal() -> bool {
    std::io::stdout().is_terminal()
}

/// Status icons for different operations.
pub fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Success => "✓",
        Status::Error => "✗",
        Status::Warning => "⚠",
        Status::Info => "ℹ",
    }
}

/// Status types for colored output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Error,
    Warning,
    Info,
}

/// Print a styled status message.
pub fn print_status(status: Status, msg: &str) {
    let icon = status_icon(status);
    match status {
        Status::Success => println!("{} {}", icon.green().bold(), msg),
        Status::Error => eprintln!("{} {}", icon.red().bold(), msg),
        Status::Warning => eprintln!("{} {}", icon.yellow().bold(), msg),
        Status::Info => println!("{} {}", icon.cyan().bold(), msg),
    }
}

/// Print the heading of a result view: location, filter and count.
pub fn print_results_header(view: &ResultView) {
    println!();
    println!(
        "{}",
        format!("━━━ Hotels: {}, {} ━━━", view.country, view.city)
            .bold()
            .cyan()
    );
    if view.selector != StarSelector::All {
        println!("Filter: {}", view.selector.label().yellow());
    }
    println!("Hotels found: {}", view.count.to_string().bold());
}

/// Print one hotel as a card.
pub fn print_hotel_card(hotel: &Hotel) {
    println!();
    println!("  {}", truncate_with_ellipsis(hotel.display_name(), 70).blue().bold());
    if let Some(address) = &hotel.address {
        println!("    📍 {}", address);
    }
    if let Some(stars) = &hotel.stars {
        println!("    ⭐ {} stars", stars.yellow());
    }
    if let Some(phone) = &hotel.phone {
        println!("    📞 {}", phone);
    }
    if let Some(website) = &hotel.website {
        println!("    🌐 {}", website.dimmed());
    }
    if let Some(booking) = &hotel.booking_url {
        println!("    🛏  {}", booking.green());
    }
}

/// Print a full result view as cards.
pub fn print_view(view: &ResultView) {
    print_results_header(view);
    if view.is_empty() {
        println!();
        print_status(Status::Info, "No hotels match this filter");
        return;
    }
    for hotel in &view.hotels {
        print_hotel_card(hotel);
    }
    println!();
}

/// Print a search failure the way the user should see it.
pub fn print_search_error(err: &SearchError, raw_query: &str) {
    match err {
        SearchError::EmptyResult => {
            print_status(
                Status::Warning,
                &format!("No hotels with detailed information found for \"{}\"", raw_query.trim()),
            );
            eprintln!("  Try a different query");
        }
        SearchError::InvalidQuery | SearchError::InvalidSelector(_) => {
            print_status(Status::Error, &err.to_string());
        }
        _ => {
            print_status(Status::Error, &err.to_string());
            eprintln!("  Check the spelling of the country and the city");
        }
    }
}

/// Spinner shown while waiting on the backend.
pub struct Spinner {
    pb: indicatif::ProgressBar,
}

impl Spinner {
    /// Start a spinner with the given message. Hidden when stdout is not a terminal.
    pub fn new(msg: &str) -> Self {
        let pb = if is_terminal() {
            indicatif::ProgressBar::new_spinner()
        } else {
            indicatif::ProgressBar::hidden()
        };
        pb.set_style(
            indicatif::ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| indicatif::ProgressStyle::default_spinner()),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        Self { pb }
    }

    /// Stop the spinner and clear its line.
    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if !self.pb.is_finished() {
            self.pb.finish_and_clear();
        }
    }
}
