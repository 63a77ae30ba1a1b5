pub mod error;
pub mod factory;
pub mod http;
pub mod key_rotation;
pub mod news;
pub mod omdb;
pub mod raw;
pub mod tmdb;
pub mod traits;
pub mod youtube;

pub use error::SourceError;
pub use factory::{SourceFactory, SourceFactoryRegistry};
pub use key_rotation::KeyRing;
pub use news::NewsClient;
pub use omdb::OmdbClient;
pub use raw::{RatingScale, RawItem, RawRating};
pub use tmdb::TmdbClient;
pub use traits::{MovieSearch, ReviewSource};
pub use youtube::YouTubeClient;
