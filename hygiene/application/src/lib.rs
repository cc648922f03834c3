pub mod caching;
pub mod ports;
pub mod query;
pub mod results;

pub use caching::CachingSource;
pub use ports::{RatingSource, SourceError};
pub use query::{QueryError, QueryService, QueryServiceImpl};
pub use results::{AuthoritiesResult, EstablishmentsResult, OutputAuthority, OutputRating};
