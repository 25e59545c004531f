pub mod json;
pub mod markdown;

pub use json::{JsonConfig, convert_to_json};
pub use markdown::{MarkdownConfig, convert_to_markdown};
