pub mod base;
pub mod beam;
