//! HTML body flattening
//!
//! Bulletin destinations take plain text. Paragraphs become blocks separated
//! by a blank CRLF line, line breaks become spaces, and runs of spaces are
//! collapsed.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Node};

/// Paragraph terminator in flattened text
pub const PARAGRAPH_BREAK: &str = "\r\n\r\n";

const CRLF: &str = "\r\n";

static SPACE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(" +").expect("space run pattern is valid"));

/// Flatten an HTML body into plain text
///
/// - Without any `<p>`, every `<br>` becomes a single space.
/// - With paragraphs, each `<p>` becomes its trimmed text (inner `<br>` as a
///   space) followed by `\r\n\r\n`; whitespace-only paragraphs disappear and
///   `<br>` outside paragraphs is dropped.
/// - Runs of spaces collapse to a single space.
/// - Line breaks inside text keep CRLF when the input uses CRLF.
///
/// # Examples
///
/// ```
/// use newsdesk::formatter::flatten_body;
///
/// let text = flatten_body("<p>Hello  world</p><p>  </p><p>Bye</p>");
/// assert_eq!(text, "Hello world\r\n\r\nBye\r\n\r\n");
///
/// assert_eq!(flatten_body("one<br>two<br/>three"), "one two three");
/// ```
pub fn flatten_body(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let root = fragment.root_element();
    let has_paragraphs = root.descendants().any(|node| is_element(node.value(), "p"));

    // The parser turns CRLF into LF inside text nodes.
    let newline = if html.contains(CRLF) { CRLF } else { "\n" };

    let mut text = String::with_capacity(html.len());
    render(root, has_paragraphs, newline, &mut text);
    collapse_spaces(&text)
}

/// All text of an HTML fragment, markup removed
pub fn plain_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut text = String::new();
    collect_text(fragment.root_element(), false, "\n", &mut text);
    text
}

/// Collapse runs of spaces into one
pub fn collapse_spaces(text: &str) -> String {
    SPACE_RUNS.replace_all(text, " ").into_owned()
}

fn render(element: ElementRef<'_>, has_paragraphs: bool, newline: &str, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => push_text(text, newline, out),
            Node::Element(el) => {
                let Some(child_element) = ElementRef::wrap(child) else {
                    continue;
                };
                match el.name() {
                    "p" if has_paragraphs => {
                        let mut paragraph = String::new();
                        collect_text(child_element, true, newline, &mut paragraph);
                        let paragraph = paragraph.trim();
                        if !paragraph.is_empty() {
                            out.push_str(paragraph);
                            out.push_str(PARAGRAPH_BREAK);
                        }
                    }
                    "br" if !has_paragraphs => out.push(' '),
                    "br" => {}
                    name if is_non_text(name) => {}
                    _ => render(child_element, has_paragraphs, newline, out),
                }
            }
            _ => {}
        }
    }
}

fn collect_text(element: ElementRef<'_>, br_as_space: bool, newline: &str, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => push_text(text, newline, out),
            Node::Element(el) => {
                let Some(child_element) = ElementRef::wrap(child) else {
                    continue;
                };
                match el.name() {
                    "br" if br_as_space => out.push(' '),
                    name if is_non_text(name) => {}
                    _ => collect_text(child_element, br_as_space, newline, out),
                }
            }
            _ => {}
        }
    }
}

fn push_text(text: &str, newline: &str, out: &mut String) {
    if newline == "\n" {
        out.push_str(text);
        return;
    }
    for (index, line) in text.split('\n').enumerate() {
        if index > 0 {
            out.push_str(newline);
        }
        out.push_str(line);
    }
}

fn is_element(node: &Node, name: &str) -> bool {
    matches!(node, Node::Element(el) if el.name() == name)
}

fn is_non_text(name: &str) -> bool {
    matches!(name, "script" | "style" | "template")
}
