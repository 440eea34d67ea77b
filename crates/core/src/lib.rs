pub mod config;
pub mod error;
pub mod movie;

pub use config::{Config, OmdbConfig, TmdbConfig, Vendor};
pub use error::FetchError;
pub use movie::{Movie, MovieDetail, Shape};
