use crate::error::{BlogshiftError, Result};
use crate::siteconfig::directives::SiteProfile;
use crate::siteconfig::parser::ConfigParser;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const BLOG_PROFILE: &str = include_str!("../../site_profiles/blog.txt");
const BLOG_V2_PROFILE: &str = include_str!("../../site_profiles/blog-v2.txt");

/// Names of the profiles bundled with the library
pub const BUILTIN_PROFILES: &[&str] = &["blog", "blog-v2"];

/// Load a bundled profile by name.
///
/// `blog-v2` is the `blog` profile with its own directives layered on top.
pub fn builtin_profile(name: &str) -> Result<SiteProfile> {
    match name {
        "blog" => ConfigParser::parse_string(BLOG_PROFILE),
        "blog-v2" => {
            let mut profile = ConfigParser::parse_string(BLOG_PROFILE)?;
            profile.merge(&ConfigParser::parse_string(BLOG_V2_PROFILE)?);
            Ok(profile)
        }
        _ => Err(BlogshiftError::ConfigError(format!(
            "Unknown profile '{}' (available: {})",
            name,
            BUILTIN_PROFILES.join(", ")
        ))),
    }
}

/// Site profile loader
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Custom profile directory path
    custom_dir: Option<PathBuf>,
    /// Standard profile directory path
    standard_dir: Option<PathBuf>,
    /// Profile cache keyed by domain
    cache: HashMap<String, SiteProfile>,
}

impl ConfigLoader {
    /// Create a new loader without search directories
    pub fn new() -> Self {
        Self { custom_dir: None, standard_dir: None, cache: HashMap::new() }
    }

    /// Resolve a profile reference: a bundled name or a path to a profile file
    pub fn load(&self, reference: &str) -> Result<SiteProfile> {
        if BUILTIN_PROFILES.contains(&reference) {
            return builtin_profile(reference);
        }

        let path = Path::new(reference);
        if path.is_file() {
            return ConfigParser::parse_file(path);
        }

        Err(BlogshiftError::ConfigError(format!(
            "'{}' is neither a bundled profile ({}) nor a readable file",
            reference,
            BUILTIN_PROFILES.join(", ")
        )))
    }

    /// Load the profile for a page URL, or `None` when no file matches its domain
    pub fn load_for_url(&mut self, url: &str) -> Result<Option<SiteProfile>> {
        let domain = self.extract_domain(url)?;
        self.load_for_domain(&domain)
    }

    /// Load and merge every profile file matching a domain
    pub fn load_for_domain(&mut self, domain: &str) -> Result<Option<SiteProfile>> {
        if let Some(profile) = self.cache.get(domain) {
            return Ok(Some(profile.clone()));
        }

        let mut merged = SiteProfile::new();
        let mut found = false;

        for file_path in self.find_config_files(domain).iter().rev() {
            match ConfigParser::parse_file(file_path) {
                Ok(profile) => {
                    tracing::debug!(path = %file_path.display(), domain, "loaded site profile");
                    merged.merge(&profile);
                    found = true;
                }
                Err(e) => tracing::warn!(path = %file_path.display(), error = %e, "skipping unreadable site profile"),
            }
        }

        if !found {
            return Ok(None);
        }

        self.cache.insert(domain.to_string(), merged.clone());
        Ok(Some(merged))
    }

    /// Find all profile files for a domain in priority order
    fn find_config_files(&self, domain: &str) -> Vec<PathBuf> {
        let mut config_files = Vec::new();
        let config_names = self.generate_config_names(domain);

        for dir in [&self.custom_dir, &self.standard_dir].into_iter().flatten() {
            for name in &config_names {
                let file_path = dir.join(name);
                if file_path.exists() && !config_files.contains(&file_path) {
                    config_files.push(file_path);
                }
            }
        }

        config_files
    }

    /// Generate possible profile file names for a domain
    fn generate_config_names(&self, domain: &str) -> Vec<String> {
        let mut names = Vec::new();

        names.push(format!("{}.txt", domain));

        if let Some(without_www) = domain.strip_prefix("www.") {
            names.push(format!("{}.txt", without_www));
        }

        if !domain.starts_with('.') {
            names.push(format!(".{}.txt", domain));
        }

        if let Some(without_www) = domain.strip_prefix("www.")
            && !without_www.starts_with('.')
        {
            names.push(format!(".{}.txt", without_www));
        }

        let parts: Vec<&str> = domain.split('.').collect();
        for i in 1..parts.len().saturating_sub(1) {
            let parent = parts[i..].join(".");
            if parent.contains('.') {
                names.push(format!("{}.txt", parent));
                names.push(format!(".{}.txt", parent));
            }
        }

        names.dedup();
        names
    }

    /// Extract domain from URL
    fn extract_domain(&self, url: &str) -> Result<String> {
        let url = url::Url::parse(url).map_err(|e| BlogshiftError::InvalidUrl(e.to_string()))?;

        let domain = url
            .host_str()
            .ok_or_else(|| BlogshiftError::InvalidUrl("No domain found in URL".to_string()))?;

        Ok(domain.to_string())
    }
}

/// Builder for ConfigLoader
#[derive(Debug)]
pub struct ConfigLoaderBuilder {
    custom_dir: Option<PathBuf>,
    standard_dir: Option<PathBuf>,
}

impl ConfigLoaderBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self { custom_dir: None, standard_dir: None }
    }

    /// Set custom profile directory
    pub fn custom_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.custom_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set standard profile directory
    pub fn standard_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.standard_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Build the ConfigLoader
    pub fn build(self) -> ConfigLoader {
        ConfigLoader { custom_dir: self.custom_dir, standard_dir: self.standard_dir, cache: HashMap::new() }
    }
}

impl Default for ConfigLoaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        let mut builder = ConfigLoaderBuilder::new();

        if let Some(custom_dir) = Self::default_custom_dir() {
            builder = builder.custom_dir(custom_dir);
        }

        if let Some(standard_dir) = Self::default_standard_dir() {
            builder = builder.standard_dir(standard_dir);
        }

        builder.build()
    }
}

impl ConfigLoader {
    /// Get default custom profile directory (~/.config/blogshift/profiles)
    fn default_custom_dir() -> Option<PathBuf> {
        let dir = dirs::home_dir()?.join(".config").join("blogshift").join("profiles");
        if dir.is_dir() { Some(dir) } else { None }
    }

    /// Get default standard profile directory (relative to the working directory)
    fn default_standard_dir() -> Option<PathBuf> {
        let std_dir = PathBuf::from("site_profiles");
        if std_dir.is_dir() { Some(std_dir) } else { None }
    }
}
