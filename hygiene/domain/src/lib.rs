pub mod authority;
pub mod establishment;
pub mod rating;

pub use authority::Authority;
pub use establishment::Establishment;
pub use rating::{aggregate_ratings, rating_label, RatingBucket};
