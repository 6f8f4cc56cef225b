pub mod cache;
pub mod documents;
pub mod http;
pub mod inject;
pub mod xml;
