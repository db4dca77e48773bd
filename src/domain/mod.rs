pub mod format;

pub use format::{format_flutter_response, format_response};
