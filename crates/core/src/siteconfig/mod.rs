//! Declarative site profiles.
//!
//! A profile names every selector the import pipeline touches, so site
//! variants differ only in data. Profiles are plain `key: value` files;
//! two are bundled (`blog` and `blog-v2`) and more can be dropped into a
//! profile directory keyed by domain.

pub mod directives;
pub mod loader;
pub mod parser;

pub use directives::{Directive, SiteProfile};
pub use loader::{BUILTIN_PROFILES, ConfigLoader, ConfigLoaderBuilder, builtin_profile};
pub use parser::ConfigParser;
