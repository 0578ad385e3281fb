pub mod common;
pub mod dish;
pub mod food;
pub mod plan;
pub mod shop;
pub mod sync;
