//! Application-level initialization.

#[cfg(feature = "tracing-subscriber")]
mod tracing_subscriber;

#[cfg(feature = "tracing-subscriber")]
pub use self::tracing_subscriber::init_tracing;
