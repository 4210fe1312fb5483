//! HTTP surface of the analyst session

pub mod http;

pub use http::*;
