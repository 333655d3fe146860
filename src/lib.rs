pub mod decode;
pub mod error;
pub mod join;
pub mod logging;
pub mod persist;
pub mod pipeline;
pub mod reader;
pub mod sanitize;
pub mod table;

pub use error::{EtlError, Result};
