//! Text generator adapters

mod http_generator;

pub use http_generator::HttpTextGenerator;
