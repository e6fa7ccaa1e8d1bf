pub mod config_error;
pub use config_error::*;

pub mod config_format;
pub use config_format::*;

pub mod slug_config;
pub use slug_config::*;

pub mod config_document;
pub use config_document::*;
