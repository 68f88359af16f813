//! Logitech G600 button mapping codec and device access
//!
//! The mouse stores three mode pages of 153 bytes each. [`field`] holds a
//! declarative schema engine, [`mapping`] the G600 layout on top of it.

pub mod cli;
pub mod codes;
pub mod device;
pub mod error;
pub mod field;
pub mod mapping;
pub mod profile;
pub mod protocol;
pub mod scalar;
pub mod settings;
pub mod value;

pub use error::{BuildError, BuildErrorKind, ConfigError, DecodeError, LoadError, TransportError};
pub use mapping::{Built, ConfigFormat, MouseMapping};
pub use value::Value;
