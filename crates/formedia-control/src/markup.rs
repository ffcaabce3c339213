//! Markup builder
//!
//! A small element tree mirroring the host's `markup(tag, children, attrs)`
//! call shape, plus the per-subtype builders: a captioned figure for images,
//! HTML5 `<video>`/`<audio>` elements with a single `<source>` and fallback
//! text for the other two.

use formedia_core::{AttrValues, MediaSubtype};

/// One node in the built element tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// A renderable element: tag, attributes in insertion order, children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Render to an HTML string. Attribute values and text are escaped;
    /// attributes with empty values render in bare (boolean) form.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            if !value.is_empty() {
                out.push_str("=\"");
                out.push_str(&escape_attr(value));
                out.push('"');
            }
        }
        out.push('>');
        for child in &self.children {
            match child {
                Node::Element(el) => out.push_str(&el.to_html()),
                Node::Text(text) => out.push_str(&escape_text(text)),
            }
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
        out
    }
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

/// Build an element the way the host's templating call does.
pub fn markup(tag: &str, children: Vec<Node>, attrs: &AttrValues) -> Element {
    Element {
        tag: tag.to_string(),
        attrs: attrs
            .iter()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect(),
        children,
    }
}

/// Layout hint returned alongside the built field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    #[default]
    Default,
    /// The field renders its own caption; the host should not add a label.
    NoLabel,
}

/// A built field element plus its layout hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltField {
    pub field: Element,
    pub layout: Layout,
}

/// Build the element tree for the active subtype.
///
/// The host injects a `type` key into every field's resolved config; it is
/// stripped before the attributes land on an element. A missing or
/// unrecognized `subtype` value produces no output.
pub fn build_media_field(attrs: &AttrValues, label: &str) -> Option<BuiltField> {
    let subtype: MediaSubtype = attrs.get("subtype")?.parse().ok()?;
    let attrs = attrs.without(&["type"]);

    match subtype {
        MediaSubtype::Image => {
            let img = markup("img", Vec::new(), &attrs);
            let caption = markup("figcaption", vec![Node::Text(label.to_string())], &AttrValues::new());
            let figure = markup(
                "figure",
                vec![Node::Element(img), Node::Element(caption)],
                &attrs,
            );
            Some(BuiltField {
                field: figure,
                layout: Layout::NoLabel,
            })
        }
        MediaSubtype::Video => Some(BuiltField {
            field: av_element("video", &attrs, "Your browser does not support HTML5 video", true),
            layout: Layout::Default,
        }),
        MediaSubtype::Audio => Some(BuiltField {
            field: av_element("audio", &attrs, "Your browser does not support HTML5 audio", false),
            layout: Layout::Default,
        }),
    }
}

/// `<video>`/`<audio>` share a shape: controls on, one `<source>` carrying
/// the data URI and mimetype, and a fallback paragraph.
fn av_element(tag: &str, attrs: &AttrValues, fallback: &str, no_download: bool) -> Element {
    let mut attrs = attrs.clone();
    attrs.set("controls", "");
    if no_download {
        attrs.set("controlsList", "nodownload");
    }

    let source_attrs: AttrValues = [
        ("src", attrs.get("src").unwrap_or("")),
        ("type", attrs.get("mimetype").unwrap_or("")),
    ]
    .into_iter()
    .collect();
    let source = markup("source", Vec::new(), &source_attrs);
    let fallback_p = markup(
        "p",
        vec![Node::Text(fallback.to_string())],
        &AttrValues::new(),
    );

    markup(
        tag,
        vec![Node::Element(source), Node::Element(fallback_p)],
        &attrs,
    )
}
