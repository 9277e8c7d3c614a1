//! Request extractors whose rejections render as `AppError`.

mod api;
pub use api::{ApiJson, ApiPath, ApiQuery};
