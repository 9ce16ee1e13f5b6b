//! Plain-text flattening of HTML fragments.

use scraper::{Html, Node};

/// Elements whose text content is never shown to shoppers.
const HIDDEN_ELEMENTS: [&str; 3] = ["script", "style", "template"];

/// Returns the visible text of a fragment, with entities decoded and outer
/// whitespace trimmed. Absent or empty input yields an empty string.
pub fn html_to_text(fragment: Option<&str>) -> String {
    let Some(fragment) = fragment.filter(|f| !f.is_empty()) else {
        return String::new();
    };

    let document = Html::parse_fragment(fragment);

    let text: String = document
        .root_element()
        .descendants()
        .filter_map(|node| match node.value() {
            Node::Text(text) if !inside_hidden(node.parent().map(|p| p.value())) => {
                Some(&**text)
            }
            _ => None,
        })
        .collect();

    text.trim().to_string()
}

fn inside_hidden(parent: Option<&Node>) -> bool {
    parent
        .and_then(Node::as_element)
        .is_some_and(|element| HIDDEN_ELEMENTS.contains(&element.name()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_to_text_none_and_empty() {
        assert_eq!(html_to_text(None), "");
        assert_eq!(html_to_text(Some("")), "");
    }

    #[test]
    fn test_html_to_text_strips_tags() {
        assert_eq!(
            html_to_text(Some("<p>Free <b>shipping</b> on orders over $50</p>")),
            "Free shipping on orders over $50"
        );
    }

    #[test]
    fn test_html_to_text_decodes_entities() {
        assert_eq!(html_to_text(Some("Tom &amp; Jerry&nbsp;set")), "Tom & Jerry\u{a0}set");
    }

    #[test]
    fn test_html_to_text_skips_scripts() {
        assert_eq!(
            html_to_text(Some("<div>Visible<script>var hidden = 1;</script></div>")),
            "Visible"
        );
    }

    #[test]
    fn test_html_to_text_plain_passthrough() {
        assert_eq!(html_to_text(Some("  just text  ")), "just text");
    }
}
