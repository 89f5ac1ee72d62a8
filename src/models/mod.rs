//! Core data models for hotels and search operations.

mod hotel;
mod search;

pub use hotel::{Hotel, HotelBuilder, NO_DATA_SENTINELS};
pub use search::{ApiErrorBody, Query, RankedResult, SearchResponse, StarSelector};
