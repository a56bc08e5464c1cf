// src/extraction/normalizer.rs
use super::error::ParseError;
use scraper::{ElementRef, Html, Node, Selector};

/// Elements whose subtrees must never leak into the downstream prompt.
const SKIPPED_ELEMENTS: [&str; 2] = ["script", "style"];

/// Reduce raw HTML to the visible text of its body: script and style
/// subtrees are dropped, runs of whitespace collapse to single spaces.
///
/// This is a coarse text-extraction pass, not a readability algorithm;
/// navigation bars and footers survive if the page has them.
pub fn normalize(raw_html: &str) -> Result<String, ParseError> {
    let document = Html::parse_document(raw_html);

    let root = Selector::parse("body")
        .ok()
        .and_then(|selector| document.select(&selector).next())
        .unwrap_or_else(|| document.root_element());

    let mut buffer = String::new();
    collect_text(root, &mut buffer);

    let text = buffer.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.is_empty() {
        return Err(ParseError::EmptyDocument);
    }

    Ok(text)
}

/// Depth-first text collection, skipping scripts and styles entirely.
fn collect_text(root: ElementRef<'_>, buffer: &mut String) {
    let mut pending: Vec<_> = root.children().collect();
    pending.reverse();

    while let Some(node) = pending.pop() {
        match node.value() {
            Node::Element(element) if SKIPPED_ELEMENTS.contains(&element.name()) => {}
            Node::Element(_) => {
                let mut children: Vec<_> = node.children().collect();
                children.reverse();
                pending.extend(children);
            }
            Node::Text(text) => {
                buffer.push_str(text);
                buffer.push(' ');
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_script_and_style_content() {
        let html = "<html><head><style>body { color: red; }</style></head>\
                    <body><script>evil()</script>Salary: $150,000. Start: June 1, 2024.</body></html>";
        let text = normalize(html).unwrap();

        assert_eq!(text, "Salary: $150,000. Start: June 1, 2024.");
        assert!(!text.contains("evil()"));
        assert!(!text.contains("color: red"));
    }

    #[test]
    fn strips_nested_script_subtrees() {
        let html = "<body><div><script>var a = 1;<b>inner</b></script>kept</div></body>";
        let text = normalize(html).unwrap();

        assert!(!text.contains("var a"));
        assert!(text.contains("kept"));
    }

    #[test]
    fn collapses_whitespace_runs() {
        let html = "<body>  Base \t salary:\n\n  $120,000   per\tyear  </body>";
        let text = normalize(html).unwrap();

        assert_eq!(text, "Base salary: $120,000 per year");
        assert!(!text.contains("  "));
        assert_eq!(text, text.trim());
    }

    #[test]
    fn joins_text_across_nested_elements() {
        let html = "<body><h1>Offer</h1><p>Start date: <b>June 1</b></p></body>";
        let text = normalize(html).unwrap();

        assert_eq!(text, "Offer Start date: June 1");
    }

    #[test]
    fn decodes_html_entities() {
        let html = "<body>Jones &amp; Co &lt;offer&gt;</body>";
        assert_eq!(normalize(html).unwrap(), "Jones & Co <offer>");
    }

    #[test]
    fn normalization_is_idempotent() {
        let html = "<body><p>Compensation:</p>\n\n<p>$150,000</p></body>";
        let once = normalize(html).unwrap();
        let twice = normalize(&once).unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn empty_document_is_a_parse_error() {
        assert!(matches!(normalize(""), Err(ParseError::EmptyDocument)));
        assert!(matches!(
            normalize("<html><body></body></html>"),
            Err(ParseError::EmptyDocument)
        ));
        assert!(matches!(
            normalize("<body><script>only_code()</script></body>"),
            Err(ParseError::EmptyDocument)
        ));
    }
}
