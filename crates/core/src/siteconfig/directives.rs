use crate::error::{BlogshiftError, Result};

/// Represents a single site profile directive
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    /// Profile name, informational
    Name(String),

    /// Main content region
    Main(String),

    /// Boilerplate to remove before anything else runs
    Prune(String),

    /// Hero banner and the title heading placed before it
    Hero(String),
    Title(String),

    /// Block builders
    RelatedPosts(String),
    Embeds(bool),
    Callout(String),
    CalloutHeading(String),
    CalloutSubheading(String),
    CalloutLink(String),
    CalloutRight(String),
    CalloutLeft(String),
    Toc(String),

    /// Metadata sources
    Author(String),
    MetaText(String),
    StructuredData(String),

    /// Markdown post-processing
    StripControlChars(bool),

    /// Destination path derivation
    PathPrefix(String),
    PathSkip(usize),
}

/// Site profile: every selector and switch one site variant needs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteProfile {
    pub name: Option<String>,
    pub main: Option<String>,
    pub prune: Vec<String>,

    pub hero: Option<String>,
    pub title: Option<String>,

    pub related_posts: Option<String>,
    pub embeds: Option<bool>,
    pub callout: Option<String>,
    pub callout_heading: Option<String>,
    pub callout_subheading: Option<String>,
    pub callout_link: Option<String>,
    pub callout_right: Option<String>,
    pub callout_left: Option<String>,
    pub toc: Option<String>,

    pub author: Option<String>,
    pub meta_text: Option<String>,
    pub structured_data: Option<String>,

    pub strip_control_chars: Option<bool>,

    pub path_prefix: Option<String>,
    pub path_skip: Option<usize>,
}

impl SiteProfile {
    const DEFAULT_MAIN: &'static str = "main";
    const DEFAULT_CALLOUT_LINK: &'static str = "a";
    const DEFAULT_PATH_PREFIX: &'static str = "blog";
    const DEFAULT_PATH_SKIP: usize = 3;

    /// Create a new empty profile
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directive to this profile
    pub fn add_directive(&mut self, directive: Directive) {
        match directive {
            Directive::Name(name) => self.name = Some(name),
            Directive::Main(selector) => self.main = Some(selector),
            Directive::Prune(selector) => self.prune.push(selector),

            Directive::Hero(selector) => self.hero = Some(selector),
            Directive::Title(selector) => self.title = Some(selector),

            Directive::RelatedPosts(selector) => self.related_posts = Some(selector),
            Directive::Embeds(value) => self.embeds = Some(value),
            Directive::Callout(selector) => self.callout = Some(selector),
            Directive::CalloutHeading(selector) => self.callout_heading = Some(selector),
            Directive::CalloutSubheading(selector) => self.callout_subheading = Some(selector),
            Directive::CalloutLink(selector) => self.callout_link = Some(selector),
            Directive::CalloutRight(class) => self.callout_right = Some(class),
            Directive::CalloutLeft(class) => self.callout_left = Some(class),
            Directive::Toc(selector) => self.toc = Some(selector),

            Directive::Author(selector) => self.author = Some(selector),
            Directive::MetaText(selector) => self.meta_text = Some(selector),
            Directive::StructuredData(selector) => self.structured_data = Some(selector),

            Directive::StripControlChars(value) => self.strip_control_chars = Some(value),

            Directive::PathPrefix(prefix) => self.path_prefix = Some(prefix),
            Directive::PathSkip(count) => self.path_skip = Some(count),

        }
    }

    /// Merge another profile into this one
    /// Lists are appended; scalars set in `other` replace ours
    pub fn merge(&mut self, other: &SiteProfile) {
        fn take<T: Clone>(ours: &mut Option<T>, theirs: &Option<T>) {
            if theirs.is_some() {
                ours.clone_from(theirs);
            }
        }

        take(&mut self.name, &other.name);
        take(&mut self.main, &other.main);
        self.prune.extend(other.prune.iter().cloned());

        take(&mut self.hero, &other.hero);
        take(&mut self.title, &other.title);

        take(&mut self.related_posts, &other.related_posts);
        take(&mut self.embeds, &other.embeds);
        take(&mut self.callout, &other.callout);
        take(&mut self.callout_heading, &other.callout_heading);
        take(&mut self.callout_subheading, &other.callout_subheading);
        take(&mut self.callout_link, &other.callout_link);
        take(&mut self.callout_right, &other.callout_right);
        take(&mut self.callout_left, &other.callout_left);
        take(&mut self.toc, &other.toc);

        take(&mut self.author, &other.author);
        take(&mut self.meta_text, &other.meta_text);
        take(&mut self.structured_data, &other.structured_data);

        take(&mut self.strip_control_chars, &other.strip_control_chars);

        take(&mut self.path_prefix, &other.path_prefix);
        take(&mut self.path_skip, &other.path_skip);

    }

    /// Main content selector (default: `main`)
    pub fn main_selector(&self) -> &str {
        self.main.as_deref().unwrap_or(Self::DEFAULT_MAIN)
    }

    /// Whether iframes become Embed blocks (default: true)
    pub fn should_build_embeds(&self) -> bool {
        self.embeds.unwrap_or(true)
    }

    /// Link selector inside a callout (default: `a`)
    pub fn callout_link_selector(&self) -> &str {
        self.callout_link.as_deref().unwrap_or(Self::DEFAULT_CALLOUT_LINK)
    }

    /// Whether low control characters are stripped from rendered Markdown (default: false)
    pub fn should_strip_control_chars(&self) -> bool {
        self.strip_control_chars.unwrap_or(false)
    }

    /// Destination path prefix (default: `blog`)
    pub fn path_prefix(&self) -> &str {
        self.path_prefix.as_deref().unwrap_or(Self::DEFAULT_PATH_PREFIX)
    }

    /// Leading path entries dropped from the destination path (default: 3)
    pub fn path_skip(&self) -> usize {
        self.path_skip.unwrap_or(Self::DEFAULT_PATH_SKIP)
    }
}

/// Parse a directive line from the profile format
pub fn parse_directive(line: &str) -> Result<Directive> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Err(BlogshiftError::SiteConfigError("Empty or comment line".to_string()));
    }

    let Some((key, value)) = line.split_once(':') else {
        return Err(BlogshiftError::SiteConfigError(format!(
            "Invalid directive format: {}",
            line
        )));
    };

    let key = key.trim();
    let value = value.trim();

    if value.is_empty() {
        return Err(BlogshiftError::SiteConfigError(format!("Missing value for {}", key)));
    }

    let text = value.to_string();

    match key {
        "name" => Ok(Directive::Name(text)),
        "main" => Ok(Directive::Main(text)),
        "prune" => Ok(Directive::Prune(text)),

        "hero" => Ok(Directive::Hero(text)),
        "title" => Ok(Directive::Title(text)),

        "related_posts" => Ok(Directive::RelatedPosts(text)),
        "embeds" => Ok(Directive::Embeds(parse_boolean(value)?)),
        "callout" => Ok(Directive::Callout(text)),
        "callout_heading" => Ok(Directive::CalloutHeading(text)),
        "callout_subheading" => Ok(Directive::CalloutSubheading(text)),
        "callout_link" => Ok(Directive::CalloutLink(text)),
        "callout_right" => Ok(Directive::CalloutRight(text)),
        "callout_left" => Ok(Directive::CalloutLeft(text)),
        "toc" => Ok(Directive::Toc(text)),

        "author" => Ok(Directive::Author(text)),
        "meta_text" => Ok(Directive::MetaText(text)),
        "structured_data" => Ok(Directive::StructuredData(text)),

        "strip_control_chars" => Ok(Directive::StripControlChars(parse_boolean(value)?)),

        "path_prefix" => Ok(Directive::PathPrefix(text)),
        "path_skip" => value
            .parse::<usize>()
            .map(Directive::PathSkip)
            .map_err(|_| BlogshiftError::SiteConfigError(format!("Invalid path_skip value: {}", value))),


        _ => Err(BlogshiftError::SiteConfigError(format!("Unknown directive: {}", key))),
    }
}

/// Parse a boolean value from the profile format
fn parse_boolean(value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "yes" | "true" | "1" => Ok(true),
        "no" | "false" | "0" => Ok(false),
        _ => Err(BlogshiftError::SiteConfigError(format!(
            "Invalid boolean value: {}",
            value
        ))),
    }
}
