use std::sync::LazyLock;

use regex::Regex;

use crate::siteconfig::SiteProfile;

/// Low control characters other than tab, line feed and carriage return.
static CONTROL_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x13]").unwrap());

const NBSP: char = '\u{a0}';

/// Configuration for Markdown post-processing cleanup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostProcessConfig {
    /// Remove U+0000..U+0013 except `\t`, `\n` and `\r` (default: false)
    pub strip_control_chars: bool,
}

impl PostProcessConfig {
    pub fn from_profile(profile: &SiteProfile) -> Self {
        Self { strip_control_chars: profile.should_strip_control_chars() }
    }
}

/// Clean rendered Markdown.
///
/// Control characters go first when enabled, then every non-breaking space.
pub fn post_process_md(markdown: &str, config: &PostProcessConfig) -> String {
    let cleaned = if config.strip_control_chars {
        CONTROL_CHARS.replace_all(markdown, "")
    } else {
        markdown.into()
    };

    cleaned.replace(NBSP, "")
}
