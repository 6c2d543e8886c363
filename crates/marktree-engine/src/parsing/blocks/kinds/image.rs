use std::sync::OnceLock;

use regex::Regex;

use crate::tree::ImageAttrs;

/// Standalone images: an `<img>` tag line, `![alt](src)` or
/// `[![alt](src)](href)` filling the whole line.
pub struct ImageBlock;

fn img_tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^\s*<img[\s/>]").expect("Invalid img regex"))
}

fn attr_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)\b([a-z-]+)\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
            .expect("Invalid attribute regex")
    })
}

fn markdown_image_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^!\[([^\]]*)\]\(([^()\s]*)\)$").expect("Invalid image regex")
    })
}

fn linked_image_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\[!\[([^\]]*)\]\(([^()\s]*)\)\]\(([^()\s]*)\)$")
            .expect("Invalid linked image regex")
    })
}

impl ImageBlock {
    pub fn is_img_tag(text: &str) -> bool {
        img_tag_regex().is_match(text)
    }

    /// An `<img ...>` line. The whole line is kept as `html` so it
    /// serializes back verbatim.
    pub fn from_img_tag(text: &str) -> Option<ImageAttrs> {
        if !Self::is_img_tag(text) {
            return None;
        }
        let mut attrs = ImageAttrs {
            html: Some(text.to_string()),
            ..ImageAttrs::default()
        };
        for caps in attr_regex().captures_iter(text) {
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .map_or(String::new(), |m| m.as_str().to_string());
            match caps[1].to_ascii_lowercase().as_str() {
                "src" => attrs.url = value,
                "alt" => attrs.alt = value,
                "style" => attrs.style = Some(value),
                _ => {}
            }
        }
        Some(attrs)
    }

    pub fn from_markdown(text: &str) -> Option<ImageAttrs> {
        if let Some(caps) = linked_image_regex().captures(text) {
            return Some(ImageAttrs {
                alt: caps[1].to_string(),
                url: caps[2].to_string(),
                href: Some(caps[3].to_string()),
                ..ImageAttrs::default()
            });
        }
        let caps = markdown_image_regex().captures(text)?;
        Some(ImageAttrs {
            alt: caps[1].to_string(),
            url: caps[2].to_string(),
            ..ImageAttrs::default()
        })
    }
}
