pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod page;
pub mod render;
pub mod submit;

pub use error::{Error, Result};
