//! Request handlers for the gateway endpoints.

pub mod health;
pub mod stream;

pub use health::health_check;
pub use stream::stream_video;
