use crate::error::{BlogshiftError, Result};
use crate::siteconfig::directives::{SiteProfile, parse_directive};
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Site profile file parser
#[derive(Debug)]
pub struct ConfigParser;

impl ConfigParser {
    /// Parse a single profile file
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<SiteProfile> {
        let file = std::fs::File::open(&path).map_err(|e| {
            BlogshiftError::SiteConfigError(format!("Cannot open file {}: {}", path.as_ref().display(), e))
        })?;

        Self::parse_reader(BufReader::new(file))
    }

    /// Parse a profile from a reader
    pub fn parse_reader<R: BufRead>(reader: R) -> Result<SiteProfile> {
        let mut profile = SiteProfile::new();

        for (index, line) in reader.lines().enumerate() {
            let line_number = index + 1;
            let line = line
                .map_err(|e| BlogshiftError::SiteConfigError(format!("Read error at line {}: {}", line_number, e)))?;
            Self::apply_line(&mut profile, &line, line_number)?;
        }

        Ok(profile)
    }

    /// Parse a profile from a string
    pub fn parse_string(content: &str) -> Result<SiteProfile> {
        let mut profile = SiteProfile::new();

        for (index, line) in content.lines().enumerate() {
            Self::apply_line(&mut profile, line, index + 1)?;
        }

        Ok(profile)
    }

    fn apply_line(profile: &mut SiteProfile, line: &str, line_number: usize) -> Result<()> {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        match parse_directive(line) {
            Ok(directive) => {
                profile.add_directive(directive);
                Ok(())
            }
            Err(e) => Err(BlogshiftError::SiteConfigError(format!(
                "Parse error at line {}: {}",
                line_number, e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_string_basic() {
        let content = r#"
# Example profile
main: .blogPostMain
prune: nav
prune: footer
callout: .cta
embeds: no
"#;

        let profile = ConfigParser::parse_string(content).unwrap();

        assert_eq!(profile.main.as_deref(), Some(".blogPostMain"));
        assert_eq!(profile.prune.len(), 2);
        assert_eq!(profile.callout.as_deref(), Some(".cta"));
        assert_eq!(profile.embeds, Some(false));
    }

    #[test]
    fn test_parse_string_reports_line_number() {
        let content = "main: .blogPostMain\n\nbogus: value\n";
        let err = ConfigParser::parse_string(content).unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_parse_reader() {
        let reader = Cursor::new("main: article\ntoc: .toc\n");
        let profile = ConfigParser::parse_reader(reader).unwrap();

        assert_eq!(profile.main.as_deref(), Some("article"));
        assert_eq!(profile.toc.as_deref(), Some(".toc"));
    }

    #[test]
    fn test_parse_file_missing() {
        let result = ConfigParser::parse_file("/nonexistent/profile.txt");
        assert!(matches!(result, Err(BlogshiftError::SiteConfigError(_))));
    }
}
