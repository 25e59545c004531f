//! Page metadata and the trailing `Metadata` block.
//!
//! Fields are read from document-level `<meta>` tags, a few profile
//! selectors and, for profiles that name one, a structured-data script in
//! the raw response body. A field is only present when its source exists.

use std::fmt;

use dom_query::NodeRef;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::block::{Cell, create_table, escape_html};
use crate::parse::Document;
use crate::siteconfig::SiteProfile;
use crate::{BlogshiftError, Result};

pub const METADATA_BLOCK: &str = "Metadata";

/// A metadata field, in rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataField {
    Title,
    Description,
    Category,
    PublicationDate,
    Author,
    ReadTime,
    Image,
    CardImage,
}

impl MetadataField {
    pub fn label(self) -> &'static str {
        match self {
            MetadataField::Title => "Title",
            MetadataField::Description => "Description",
            MetadataField::Category => "Category",
            MetadataField::PublicationDate => "Publication Date",
            MetadataField::Author => "Author",
            MetadataField::ReadTime => "Read Time",
            MetadataField::Image => "Image",
            MetadataField::CardImage => "Card Image",
        }
    }
}

impl fmt::Display for MetadataField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A metadata value: plain text, or serialized element markup.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
    Text(String),
    Element(String),
}

impl MetadataValue {
    pub fn as_str(&self) -> &str {
        match self {
            MetadataValue::Text(text) => text,
            MetadataValue::Element(markup) => markup,
        }
    }

    /// Block cell for this value: a text node, or the element markup as-is.
    pub fn to_cell<'a>(&self) -> Cell<'a> {
        match self {
            MetadataValue::Text(text) => Cell::Text(text.clone()),
            MetadataValue::Element(markup) => Cell::Html(markup.clone()),
        }
    }
}

/// Ordered metadata map. Insertion order is rendering order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    entries: Vec<(MetadataField, MetadataValue)>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing an existing one in place.
    pub fn insert(&mut self, field: MetadataField, value: MetadataValue) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == field) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((field, value)),
        }
    }

    pub fn get(&self, field: MetadataField) -> Option<&MetadataValue> {
        self.entries.iter().find(|(existing, _)| *existing == field).map(|(_, value)| value)
    }

    pub fn contains(&self, field: MetadataField) -> bool {
        self.get(field).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MetadataField, &MetadataValue)> {
        self.entries.iter().map(|(field, value)| (*field, value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Metadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, value) in &self.entries {
            map.serialize_entry(field.label(), value.as_str())?;
        }
        map.end()
    }
}

/// Reads every metadata field a profile knows how to find.
pub struct MetadataBuilder<'a> {
    document: &'a Document,
    profile: &'a SiteProfile,
    source: &'a str,
}

impl<'a> MetadataBuilder<'a> {
    /// `source` is the raw response body; structured data is read from it.
    pub fn new(document: &'a Document, profile: &'a SiteProfile, source: &'a str) -> Self {
        Self { document, profile, source }
    }

    pub fn build(&self) -> Result<Metadata> {
        let mut metadata = Metadata::new();

        if let Some(title) = self.title() {
            metadata.insert(MetadataField::Title, MetadataValue::Text(title));
        }
        if let Some(description) = self.document.meta_content("og:description") {
            metadata.insert(MetadataField::Description, MetadataValue::Text(description));
        }
        if let Some(category) = self.document.meta_content("article:section") {
            metadata.insert(MetadataField::Category, MetadataValue::Text(category));
        }
        if let Some(date) = self.publication_date() {
            metadata.insert(MetadataField::PublicationDate, MetadataValue::Text(date));
        }
        if let Some(author) = self.author()? {
            metadata.insert(MetadataField::Author, MetadataValue::Element(author));
        }
        if let Some(read_time) = self.read_time()? {
            metadata.insert(MetadataField::ReadTime, MetadataValue::Text(read_time));
        }
        if let Some(image) = self.document.meta_content("og:image") {
            metadata.insert(MetadataField::Image, MetadataValue::Element(image_markup(&image)));
        }
        if let Some(card_image) = self.card_image()? {
            metadata.insert(MetadataField::CardImage, MetadataValue::Element(image_markup(&card_image)));
        }

        Ok(metadata)
    }

    fn title(&self) -> Option<String> {
        let title: String = self.document.title()?.chars().filter(|c| !matches!(c, '\n' | '\t')).collect();
        if title.trim().is_empty() { None } else { Some(title) }
    }

    fn publication_date(&self) -> Option<String> {
        let published = self.document.meta_content("article:published_time")?;
        let date = published.split('T').next().unwrap_or_default().trim();
        if date.is_empty() { None } else { Some(date.to_string()) }
    }

    fn author(&self) -> Result<Option<String>> {
        let Some(selector) = self.profile.author.as_deref() else {
            return Ok(None);
        };
        Ok(self.document.select_first(selector)?.map(|author| author.html().to_string()))
    }

    fn read_time(&self) -> Result<Option<String>> {
        let Some(selector) = self.profile.meta_text.as_deref() else {
            return Ok(None);
        };
        Ok(self.document.select_first(selector)?.and_then(|meta| read_time_from_text(&meta.text())))
    }

    fn card_image(&self) -> Result<Option<String>> {
        let Some(selector) = self.profile.structured_data.as_deref() else {
            return Ok(None);
        };
        let Some(json) = structured_data_text(self.source, selector)? else {
            return Ok(None);
        };

        match serde_json::from_str::<Value>(json.trim()) {
            Ok(value) => Ok(card_image_url(&value)),
            Err(e) => {
                tracing::warn!(error = %e, "could not parse structured data, skipping card image");
                Ok(None)
            }
        }
    }
}

/// Build the metadata map for a page.
pub fn extract_metadata(document: &Document, profile: &SiteProfile, source: &str) -> Result<Metadata> {
    MetadataBuilder::new(document, profile, source).build()
}

/// Read time from a meta-text block: the third line, but only when the
/// block has exactly three non-blank lines.
pub fn read_time_from_text(text: &str) -> Option<String> {
    let lines: Vec<&str> = text.lines().map(str::trim).filter(|line| !line.is_empty()).collect();
    match lines.as_slice() {
        [_, _, read_time] => Some((*read_time).to_string()),
        _ => None,
    }
}

/// Image URL from a schema.org graph.
///
/// Prefers the first `ImageObject` in `@graph` (`url`, then `contentUrl`),
/// then a top-level `image` or `thumbnailUrl`.
pub fn card_image_url(value: &Value) -> Option<String> {
    let from_graph = value
        .get("@graph")
        .and_then(Value::as_array)
        .and_then(|graph| graph.iter().find(|node| node.get("@type").is_some_and(is_image_object)))
        .and_then(|image| {
            ["url", "contentUrl"].iter().find_map(|key| image.get(*key).and_then(Value::as_str))
        });

    from_graph
        .or_else(|| ["image", "thumbnailUrl"].iter().find_map(|key| image_reference(value.get(*key)?)))
        .map(str::to_string)
}

fn is_image_object(kind: &Value) -> bool {
    match kind {
        Value::String(kind) => kind == "ImageObject",
        Value::Array(kinds) => kinds.iter().any(|kind| kind.as_str() == Some("ImageObject")),
        _ => false,
    }
}

fn image_reference(value: &Value) -> Option<&str> {
    match value {
        Value::String(url) => Some(url),
        Value::Object(image) => image.get("url").and_then(Value::as_str),
        Value::Array(images) => images.first().and_then(image_reference),
        _ => None,
    }
}

/// Text of the first script in the raw body matching `selector`.
fn structured_data_text(source: &str, selector: &str) -> Result<Option<String>> {
    let selector = scraper::Selector::parse(selector).map_err(|_| BlogshiftError::InvalidSelector(selector.to_string()))?;
    let html = scraper::Html::parse_document(source);
    let text = html.select(&selector).next().map(|script| script.text().collect());
    Ok(text)
}

fn image_markup(src: &str) -> String {
    format!("<img src=\"{}\">", escape_html(src))
}

/// Append a `Metadata` block to `main`: a header row, then one
/// `[label, value]` row per field.
pub fn append_metadata_block<'a>(document: &'a Document, main: &NodeRef<'a>, metadata: &Metadata) -> NodeRef<'a> {
    let mut rows = vec![vec![Cell::from(METADATA_BLOCK)]];
    rows.extend(
        metadata
            .iter()
            .map(|(field, value)| vec![Cell::from(field.label()), value.to_cell()]),
    );

    let table = create_table(document.inner(), rows);
    main.append_child(&table);
    table
}

/// Remove the raw meta-text elements once their content has been captured.
pub fn remove_meta_text(document: &Document, profile: &SiteProfile) -> Result<usize> {
    let Some(selector) = profile.meta_text.as_deref() else {
        return Ok(0);
    };

    let meta_text = document.select(selector)?;
    for node in meta_text.nodes() {
        node.remove_from_parent();
    }
    Ok(meta_text.length())
}
