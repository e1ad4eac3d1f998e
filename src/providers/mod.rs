//! Prediction service implementations

pub mod http;

pub use http::HttpService;
