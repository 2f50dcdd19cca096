pub mod base;
pub mod http;
pub mod paste;
