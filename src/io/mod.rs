/// Paths used by the application
pub mod paths;
