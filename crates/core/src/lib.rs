pub mod background;
pub mod block;
pub mod error;
pub mod fetch;
pub mod formatters;
pub mod importer;
pub mod metadata;
pub mod parse;
pub mod postprocess;
pub mod preprocess;
pub mod resource;
pub mod siteconfig;
pub mod transform;

pub use block::{Cell, create_table};
pub use error::{BlogshiftError, Result};
pub use fetch::FetchConfig;
#[cfg(feature = "fetch")]
pub use fetch::fetch_url;
pub use fetch::{fetch_file, fetch_stdin};
pub use formatters::{JsonConfig, MarkdownConfig, convert_to_json, convert_to_markdown};
pub use importer::{Importer, ImporterConfig, ImporterConfigBuilder, derive_name, derive_path};
pub use metadata::{Metadata, MetadataField, MetadataValue};
pub use parse::Document;
pub use postprocess::{PostProcessConfig, post_process_md};
pub use preprocess::prune_html;
pub use resource::{OutputFormat, OutputResource};
pub use siteconfig::{BUILTIN_PROFILES, ConfigLoader, ConfigLoaderBuilder, ConfigParser, SiteProfile, builtin_profile};
