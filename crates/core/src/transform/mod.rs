//! The import pipeline.
//!
//! Each [`Step`] rewrites part of the working [`Document`] in place. Steps
//! run in a fixed order, since later steps depend on earlier rewrites; the
//! site profile decides which optional steps are enabled.

pub mod callouts;
pub mod embeds;
pub mod headings;
pub mod hero;
pub mod related;
pub mod toc;

use dom_query::NodeRef;

use crate::Result;
use crate::metadata::{Metadata, append_metadata_block, extract_metadata, remove_meta_text};
use crate::parse::Document;
use crate::siteconfig::SiteProfile;

use self::callouts::CalloutSelectors;

/// State threaded through every step of one import.
pub struct Context<'a> {
    pub document: &'a Document,
    /// Main content region; block builders only look inside it.
    pub main: NodeRef<'a>,
    pub profile: &'a SiteProfile,
    /// Raw response body, read for structured data.
    pub source: &'a str,
    pub metadata: Metadata,
}

impl<'a> Context<'a> {
    pub fn new(document: &'a Document, main: NodeRef<'a>, profile: &'a SiteProfile, source: &'a str) -> Self {
        Self { document, main, profile, source, metadata: Metadata::new() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    NormalizeHeadings,
    ExtractHero,
    RelatedPosts,
    Embeds,
    Callouts,
    TableOfContents,
    Metadata,
}

impl Step {
    /// Every step, in execution order.
    pub const ALL: [Step; 7] = [
        Step::NormalizeHeadings,
        Step::ExtractHero,
        Step::RelatedPosts,
        Step::Embeds,
        Step::Callouts,
        Step::TableOfContents,
        Step::Metadata,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Step::NormalizeHeadings => "normalize-headings",
            Step::ExtractHero => "hero",
            Step::RelatedPosts => "related-posts",
            Step::Embeds => "embeds",
            Step::Callouts => "callouts",
            Step::TableOfContents => "toc",
            Step::Metadata => "metadata",
        }
    }

    /// Whether `profile` configures this step.
    pub fn is_enabled(self, profile: &SiteProfile) -> bool {
        match self {
            Step::NormalizeHeadings | Step::Metadata => true,
            Step::ExtractHero => profile.hero.is_some(),
            Step::RelatedPosts => profile.related_posts.is_some(),
            Step::Embeds => profile.should_build_embeds(),
            Step::Callouts => profile.callout.is_some(),
            Step::TableOfContents => profile.toc.is_some(),
        }
    }

    pub fn run(self, context: &mut Context<'_>) -> Result<()> {
        let (document, profile, source) = (context.document, context.profile, context.source);
        let main = &context.main;

        match self {
            Step::NormalizeHeadings => headings::normalize_headings(document, main)?,
            Step::ExtractHero => {
                if let Some(hero) = profile.hero.as_deref() {
                    hero::extract_hero(document, hero, profile.title.as_deref())?;
                }
            }
            Step::RelatedPosts => {
                if let Some(selector) = profile.related_posts.as_deref() {
                    related::build_related_posts(document, main, selector)?;
                }
            }
            Step::Embeds => {
                let count = embeds::build_embeds(document, main)?;
                tracing::debug!(count, "built embed blocks");
            }
            Step::Callouts => {
                if let Some(selectors) = CalloutSelectors::from_profile(profile) {
                    let count = callouts::build_callouts(document, main, &selectors)?;
                    tracing::debug!(count, "built callout blocks");
                }
            }
            Step::TableOfContents => {
                if let Some(selector) = profile.toc.as_deref() {
                    toc::build_toc(document, main, selector)?;
                }
            }
            Step::Metadata => {
                let metadata = extract_metadata(document, profile, source)?;
                append_metadata_block(document, main, &metadata);
                remove_meta_text(document, profile)?;
                context.metadata = metadata;
            }
        }

        Ok(())
    }
}

/// Run every step the profile enables, in order.
pub fn run_pipeline(context: &mut Context<'_>) -> Result<()> {
    for step in Step::ALL {
        if !step.is_enabled(context.profile) {
            tracing::debug!(step = step.name(), "step disabled by profile");
            continue;
        }

        tracing::debug!(step = step.name(), "running step");
        step.run(context)?;
    }

    Ok(())
}
