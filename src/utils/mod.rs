//! Utility modules supporting search operations.
//!
//! - [`HttpClient`]: shared HTTP client with user agent and timeouts
//! - [`format_for_api`]: normalize a query part before it goes on the wire
//! - [`format_for_display`]: title-case a query part for headings
//! - [`truncate_with_ellipsis`]: fit text into terminal columns
//!
//! # String transforms
//!
//! ```rust
//! use hotel_search::utils::{format_for_api, format_for_display};
//!
//! assert_eq!(format_for_api("  New   YORK "), "new york");
//! assert_eq!(format_for_display("new YORK"), "New York");
//! ```

mod http;
mod text;

pub use http::{default_user_agent, HttpClient, DEFAULT_TIMEOUT};
pub use text::{format_for_api, format_for_display, truncate_with_ellipsis};
