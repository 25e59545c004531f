use dom_query::{NodeRef, Selection};

use crate::Result;
use crate::block::{Cell, create_table};
use crate::parse::{Document, first_within, select_within};
use crate::siteconfig::SiteProfile;

pub const CALLOUT_BLOCK: &str = "Callout";

/// Where a callout finds its parts.
#[derive(Debug, Clone, Copy)]
pub struct CalloutSelectors<'p> {
    pub container: &'p str,
    pub heading: Option<&'p str>,
    pub subheading: Option<&'p str>,
    pub link: &'p str,
    /// Modifier class marking a right-aligned callout
    pub right: Option<&'p str>,
    /// Modifier class marking a left-aligned callout
    pub left: Option<&'p str>,
}

impl<'p> CalloutSelectors<'p> {
    /// Selectors from a profile, or `None` when the profile has no callouts.
    pub fn from_profile(profile: &'p SiteProfile) -> Option<Self> {
        Some(Self {
            container: profile.callout.as_deref()?,
            heading: profile.callout_heading.as_deref(),
            subheading: profile.callout_subheading.as_deref(),
            link: profile.callout_link_selector(),
            right: profile.callout_right.as_deref(),
            left: profile.callout_left.as_deref(),
        })
    }
}

/// Block name for a callout: `Callout`, `Callout (right)` or `Callout (left)`.
pub fn callout_name(callout: &NodeRef<'_>, selectors: &CalloutSelectors<'_>) -> String {
    if selectors.right.is_some_and(|class| callout.has_class(class)) {
        format!("{} (right)", CALLOUT_BLOCK)
    } else if selectors.left.is_some_and(|class| callout.has_class(class)) {
        format!("{} (left)", CALLOUT_BLOCK)
    } else {
        CALLOUT_BLOCK.to_string()
    }
}

/// Replace every callout container in `main` with a callout block.
///
/// Row two holds a `<div>` with an `<h3>` (heading text) and a `<p>`
/// (subheading markup); row three, when the callout has a link, holds
/// the link itself. Returns how many callouts were replaced.
pub fn build_callouts<'a>(
    document: &'a Document, main: &NodeRef<'a>, selectors: &CalloutSelectors<'_>,
) -> Result<usize> {
    let callouts = select_within(&Selection::from(main.clone()), selectors.container)?;

    for callout in callouts.nodes() {
        let content = document.new_element("div");

        if let Some(selector) = selectors.heading
            && let Some(heading) = first_within(callout, selector)?
        {
            let h3 = document.new_element("h3");
            h3.append_child(&document.inner().tree.new_text(heading.text()));
            content.append_child(&h3);
        }

        if let Some(selector) = selectors.subheading
            && let Some(subheading) = first_within(callout, selector)?
        {
            let paragraph = document.new_element("p");
            paragraph.set_html(subheading.inner_html());
            content.append_child(&paragraph);
        }

        let mut rows = vec![vec![Cell::from(callout_name(callout, selectors))], vec![Cell::Node(content)]];
        if let Some(link) = first_within(callout, selectors.link)? {
            rows.push(vec![Cell::Node(link)]);
        }

        let table = create_table(document.inner(), rows);
        callout.replace_with(&table);
    }

    Ok(callouts.length())
}
