pub mod builder;
pub mod collections;
pub mod fields;
pub mod http;
pub mod images;
pub mod pipeline;
