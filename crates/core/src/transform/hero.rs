use dom_query::NodeRef;

use crate::Result;
use crate::background::resolve_background_image;
use crate::parse::Document;

/// Turn the hero banner into an `<img>` and move the title heading in front of it.
///
/// The title is looked up before the banner is replaced, so a heading nested
/// inside the banner is kept. Returns the resolved hero node, or `None` when
/// the page has no banner.
pub fn extract_hero<'a>(document: &'a Document, hero: &str, title: Option<&str>) -> Result<Option<NodeRef<'a>>> {
    let Some(banner) = document.select_first(hero)? else {
        return Ok(None);
    };

    let heading = match title {
        Some(selector) => document.select_first(selector)?,
        None => None,
    };

    let image = resolve_background_image(document.inner(), banner);

    if let Some(heading) = heading {
        heading.remove_from_parent();
        image.insert_before(&heading);
    }

    Ok(Some(image))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HERO_HTML: &str = r#"
        <html><body><main class="blogPostMain">
            <div class="blogPostHero">
                <div class="blogPostHero__background" style="background-image: url('https://cdn.example.com/hero.jpg')"></div>
                <div class="blogPostHero__text"><h1 class="blogPostHero__title">Shipping faster</h1></div>
            </div>
        </main></body></html>
    "#;

    #[test]
    fn test_hero_becomes_image_preceded_by_title() {
        let doc = Document::parse(HERO_HTML);

        let image = extract_hero(&doc, ".blogPostHero__background", Some(".blogPostHero__title"))
            .unwrap()
            .unwrap();

        assert_eq!(image.attr("src").as_deref(), Some("https://cdn.example.com/hero.jpg"));
        assert!(!doc.select(".blogPostHero__background").unwrap().exists());

        let previous = image.prev_element_sibling().unwrap();
        assert_eq!(previous.node_name().as_deref(), Some("h1"));
        assert_eq!(doc.select(".blogPostHero__text h1").unwrap().length(), 0);
    }

    #[test]
    fn test_hero_image_serializes_as_void_element() {
        let doc = Document::parse(HERO_HTML);
        extract_hero(&doc, ".blogPostHero__background", Some(".blogPostHero__title")).unwrap();

        let main = doc.select("main").unwrap().html().to_string();
        assert!(main.contains(r#"<img src="https://cdn.example.com/hero.jpg">"#));
        assert!(!main.contains("</img>"));
    }

    #[test]
    fn test_missing_banner_is_noop() {
        let doc = Document::parse(HERO_HTML);
        let before = doc.inner().html().to_string();

        let result = extract_hero(&doc, ".noSuchHero", Some(".blogPostHero__title")).unwrap();

        assert!(result.is_none());
        assert_eq!(doc.inner().html().to_string(), before);
    }

    #[test]
    fn test_banner_without_background_still_gets_title() {
        let doc = Document::parse(
            r#"<html><body><div class="banner"><img src="inline.png"></div><p><h2 class="title">T</h2></p></body></html>"#,
        );

        let node = extract_hero(&doc, ".banner", Some(".title")).unwrap().unwrap();

        assert!(node.has_class("banner"));
        assert_eq!(node.prev_element_sibling().unwrap().node_name().as_deref(), Some("h2"));
    }
}
