//! HTML to plain text conversion for post bodies.

use scraper::{ElementRef, Html, Node};

/// Converts rich markup into plain text.
pub trait MarkupConverter: Send + Sync {
    fn to_plain_text(&self, markup: &str) -> String;
}

/// Default converter backed by the scraper HTML parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlTextConverter;

const SKIPPED: &[&str] = &["script", "style", "head", "noscript", "template"];

const BLOCKS: &[&str] = &[
    "p", "div", "section", "article", "header", "footer", "aside", "nav", "main",
    "blockquote", "pre", "table", "tr", "ul", "ol", "dl", "dt", "dd", "figure",
    "figcaption", "h1", "h2", "h3", "h4", "h5", "h6", "hr",
];

impl MarkupConverter for HtmlTextConverter {
    fn to_plain_text(&self, markup: &str) -> String {
        if markup.trim().is_empty() {
            return String::new();
        }
        let fragment = Html::parse_fragment(markup);
        let mut out = TextBuffer::default();
        walk(fragment.root_element(), &mut out);
        out.finish()
    }
}

fn walk(element: ElementRef<'_>, out: &mut TextBuffer) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_text(text),
            Node::Element(el) => {
                let Some(child_ref) = ElementRef::wrap(child) else {
                    continue;
                };
                let name = el.name();
                if SKIPPED.contains(&name) {
                    continue;
                }
                match name {
                    "br" => out.line_break(),
                    "img" => {
                        if let Some(alt) = el.attr("alt").filter(|a| !a.trim().is_empty()) {
                            out.push_text(alt);
                        }
                    }
                    "li" => {
                        out.line_break();
                        out.push_raw("* ");
                        walk(child_ref, out);
                        out.line_break();
                    }
                    "td" | "th" => {
                        walk(child_ref, out);
                        out.push_text(" ");
                    }
                    _ if BLOCKS.contains(&name) => {
                        out.paragraph_break();
                        walk(child_ref, out);
                        out.paragraph_break();
                    }
                    _ => walk(child_ref, out),
                }
            }
            _ => {}
        }
    }
}

/// Accumulates text while collapsing whitespace and limiting blank lines.
#[derive(Default)]
struct TextBuffer {
    out: String,
    pending_space: bool,
}

impl TextBuffer {
    fn push_text(&mut self, text: &str) {
        for word in text.split_inclusive(char::is_whitespace) {
            let trimmed = word.trim_end();
            if !trimmed.is_empty() {
                self.push_raw(trimmed);
            }
            if word.len() != trimmed.len() {
                self.pending_space = true;
            }
        }
    }

    fn push_raw(&mut self, s: &str) {
        if self.pending_space && !self.at_line_start() {
            self.out.push(' ');
        }
        self.pending_space = false;
        self.out.push_str(s);
    }

    fn at_line_start(&self) -> bool {
        self.out.is_empty() || self.out.ends_with('\n') || self.out.ends_with(' ')
    }

    fn line_break(&mut self) {
        self.pending_space = false;
        while self.out.ends_with(' ') {
            self.out.pop();
        }
        if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.out.push('\n');
        }
    }

    fn paragraph_break(&mut self) {
        self.line_break();
        if !self.out.is_empty() && !self.out.ends_with("\n\n") {
            self.out.push('\n');
        }
    }

    fn finish(self) -> String {
        self.out.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(html: &str) -> String {
        HtmlTextConverter.to_plain_text(html)
    }

    #[test]
    fn strips_inline_markup() {
        assert_eq!(convert("<p>Hello <b>world</b>!</p>"), "Hello world!");
    }

    #[test]
    fn paragraphs_and_lists() {
        let html = "<p>Intro</p><ul><li>Item 1</li><li>Item <i>2</i></li></ul><p>Outro</p>";
        assert_eq!(convert(html), "Intro\n\n* Item 1\n* Item 2\n\nOutro");
    }

    #[test]
    fn line_breaks_and_whitespace() {
        assert_eq!(convert("one<br>two<br/>  three \n\t four"), "one\ntwo\nthree four");
    }

    #[test]
    fn entities_are_decoded() {
        assert_eq!(convert("<p>Fish &amp; chips &lt;3</p>"), "Fish & chips <3");
    }

    #[test]
    fn scripts_dropped_and_images_use_alt() {
        let html =
            r#"<div>Before <script>alert(1)</script><img src="x.png" alt="A chart"> after</div>"#;
        assert_eq!(convert(html), "Before A chart after");
    }

    #[test]
    fn links_keep_their_text() {
        assert_eq!(
            convert(r#"Read <a href="https://example.org">the docs</a>."#),
            "Read the docs."
        );
    }

    #[test]
    fn empty_input() {
        assert_eq!(convert(""), "");
        assert_eq!(convert("   "), "");
    }
}
