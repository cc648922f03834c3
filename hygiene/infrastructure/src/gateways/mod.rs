pub mod food_standards;

pub use food_standards::HttpRatingSource;
