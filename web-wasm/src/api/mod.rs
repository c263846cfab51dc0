//! バックエンドAPI

pub mod backend;

pub use backend::WebBackend;
