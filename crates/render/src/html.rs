//! HTML serialization of presentation elements.
//!
//! A reference presentation layer for embedders that want markup straight
//! from the pipeline. All text and attribute values pass through escaping
//! here, which makes the no-raw-markup guarantee observable as a string
//! property.

use crate::element::PresentationElement;
use html_escape::{encode_double_quoted_attribute, encode_text};

/// Elements serialized without a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Serialize a presentation tree to an HTML string.
pub fn to_html(element: &PresentationElement) -> String {
    let mut out = String::new();
    write_element(element, &mut out);
    out
}

fn write_element(element: &PresentationElement, out: &mut String) {
    match element {
        PresentationElement::Text { content } => {
            out.push_str(&encode_text(content));
        }
        PresentationElement::Element {
            name,
            attrs,
            children,
        } => {
            out.push('<');
            out.push_str(name);
            for (attr, value) in attrs {
                out.push(' ');
                out.push_str(attr);
                out.push_str("=\"");
                out.push_str(&encode_double_quoted_attribute(value));
                out.push('"');
            }

            if VOID_ELEMENTS.contains(&name.as_str()) && children.is_empty() {
                out.push_str(" />");
                return;
            }

            out.push('>');
            for child in children {
                write_element(child, out);
            }
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
    }
}
