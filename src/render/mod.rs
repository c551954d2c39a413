//! Presentation of filter options, recommendations, empty results and errors
pub mod html;
pub mod text;

/// Message shown when a pick matched nothing
pub const NO_MATCHES: &str = "No matches found for those filters.";
