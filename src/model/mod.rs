//! Catalog records kept in the cache and the TMDB payloads that fill them.

pub mod media;
pub mod movie;
pub mod network;
pub mod person;
pub mod tv;

pub use media::{Keyword, Review, Video};
pub use movie::Movie;
pub use person::Person;
pub use tv::Tv;
