//! Vendor clients and the fetch operations the view shell consumes.
//!
//! Each vendor sits behind [`provider::MovieProvider`]; the
//! [`discover::Discovery`] facade adds query defaulting, the detail →
//! similar sequencing, and the stale-response guard.

pub mod discover;
mod http;
pub mod latest;
pub mod omdb;
pub mod provider;
pub mod similar;
pub mod tmdb;

pub use discover::{Discovery, ViewUpdate};
pub use provider::MovieProvider;
