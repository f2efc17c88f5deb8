//! Markup parsing: raw article text into an untyped syntax tree.
//!
//! The dialect is a constrained tag syntax mixed with literal text:
//! `<note type="warn">hi</note>`, self-closing `<divider />`, nesting, and
//! nothing else. Input is author-controlled and untrusted, so parsing never
//! fails: anything the scanner cannot make sense of degrades to literal text
//! or an auto-closed element, with a [`ParseWarning`] recorded alongside.

use crate::error::{ParseWarning, Span};
use crate::syntax::SyntaxNode;

/// Result of a parse: the document root plus recovery warnings.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    /// Root `Document` node spanning the whole input; its children are the
    /// block-level nodes in document order.
    pub root: SyntaxNode,
    /// Non-fatal problems found while scanning.
    pub warnings: Vec<ParseWarning>,
}

/// Parse raw article markup into a syntax tree.
///
/// Whitespace-only text runs directly under the root (between block-level
/// siblings) are dropped; inside elements they are preserved verbatim.
pub fn parse(raw: &str) -> Parsed {
    Scanner::new(raw).run()
}

struct Scanner<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
    root: SyntaxNode,
    /// Open elements, outermost first.
    stack: Vec<SyntaxNode>,
    warnings: Vec<ParseWarning>,
    /// Start of the pending literal run, if one is open.
    run_start: Option<usize>,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
            root: SyntaxNode::document(Span::new(0, input.len())),
            stack: Vec::new(),
            warnings: Vec::new(),
            run_start: None,
        }
    }

    fn run(mut self) -> Parsed {
        let len = self.input.len();
        while self.pos < len {
            if self.bytes[self.pos] == b'<' {
                self.scan_tag();
            } else {
                // Literal text up to the next candidate tag start.
                if self.run_start.is_none() {
                    self.run_start = Some(self.pos);
                }
                match self.input[self.pos..].find('<') {
                    Some(rel) => self.pos += rel,
                    None => self.pos = len,
                }
            }
        }

        self.flush_text(len);
        self.close_remaining(len);

        Parsed {
            root: self.root,
            warnings: self.warnings,
        }
    }

    /// Attempt to read a tag construct at `pos` (which holds `<`). On any
    /// malformation the `<` is demoted to literal text and scanning resumes
    /// one byte later.
    fn scan_tag(&mut self) {
        let tag_start = self.pos;
        match self.bytes.get(tag_start + 1) {
            Some(b'/') => self.scan_close_tag(tag_start),
            Some(b) if b.is_ascii_alphabetic() => self.scan_open_tag(tag_start),
            _ => self.demote(tag_start),
        }
    }

    fn scan_close_tag(&mut self, tag_start: usize) {
        let mut i = tag_start + 2;
        let name = scan_name(self.bytes, &mut i);
        if name.is_empty() {
            self.demote(tag_start);
            return;
        }
        skip_whitespace(self.bytes, &mut i);
        match self.bytes.get(i) {
            Some(b'>') => {
                let close_span = Span::new(tag_start, i + 1);
                self.flush_text(tag_start);
                self.handle_close(&name, close_span);
                self.pos = i + 1;
            }
            Some(_) => self.demote(tag_start),
            None => self.unterminated_header(tag_start, name),
        }
    }

    fn scan_open_tag(&mut self, tag_start: usize) {
        let mut i = tag_start + 1;
        let name = scan_name(self.bytes, &mut i);

        let mut node = SyntaxNode::tag(name.clone(), Span::new(tag_start, tag_start));
        loop {
            skip_whitespace(self.bytes, &mut i);
            match self.bytes.get(i) {
                None => {
                    self.unterminated_header(tag_start, name);
                    return;
                }
                Some(b'>') => {
                    let end = i + 1;
                    self.flush_text(tag_start);
                    node.span = Span::new(tag_start, end);
                    self.stack.push(node);
                    self.pos = end;
                    return;
                }
                Some(b'/') if self.bytes.get(i + 1) == Some(&b'>') => {
                    let end = i + 2;
                    self.flush_text(tag_start);
                    node.span = Span::new(tag_start, end);
                    self.attach(node);
                    self.pos = end;
                    return;
                }
                Some(b) if b.is_ascii_alphabetic() => {
                    let attr = scan_name(self.bytes, &mut i);
                    skip_whitespace(self.bytes, &mut i);
                    let value = if self.bytes.get(i) == Some(&b'=') {
                        i += 1;
                        skip_whitespace(self.bytes, &mut i);
                        match self.scan_attr_value(&mut i) {
                            Some(value) => value,
                            None => {
                                self.unterminated_header(tag_start, name);
                                return;
                            }
                        }
                    } else {
                        // Bare attribute: presence means true.
                        "true".to_string()
                    };

                    if node.raw_attributes.contains_key(&attr) {
                        self.warnings.push(ParseWarning::DuplicateAttribute {
                            span: Span::new(tag_start, i),
                            tag: name.clone(),
                            attribute: attr,
                        });
                    } else {
                        node.raw_attributes.insert(attr, value);
                    }
                }
                Some(_) => {
                    self.demote(tag_start);
                    return;
                }
            }
        }
    }

    /// Read an attribute value at `i`: quoted (either quote kind) or an
    /// unquoted run. Returns `None` only when a quote never closes.
    fn scan_attr_value(&mut self, i: &mut usize) -> Option<String> {
        match self.bytes.get(*i) {
            Some(&quote) if quote == b'"' || quote == b'\'' => {
                let value_start = *i + 1;
                let rel = self.bytes[value_start..].iter().position(|&b| b == quote)?;
                let value = self.input[value_start..value_start + rel].to_string();
                *i = value_start + rel + 1;
                Some(value)
            }
            _ => {
                let value_start = *i;
                while let Some(&b) = self.bytes.get(*i) {
                    if b.is_ascii_whitespace() || b == b'>' {
                        break;
                    }
                    if b == b'/' && self.bytes.get(*i + 1) == Some(&b'>') {
                        break;
                    }
                    *i += 1;
                }
                Some(self.input[value_start..*i].to_string())
            }
        }
    }

    /// Close the innermost open element matching `name`, auto-closing anything
    /// opened inside it. A name matching nothing open is dropped.
    fn handle_close(&mut self, name: &str, close_span: Span) {
        let matched = self
            .stack
            .iter()
            .rposition(|node| node.kind.tag_name() == Some(name));
        let Some(idx) = matched else {
            self.warnings.push(ParseWarning::StrayCloseTag {
                span: close_span,
                name: name.to_string(),
            });
            return;
        };

        while self.stack.len() > idx + 1 {
            let mut open = self.stack.pop().expect("stack length checked above");
            self.warnings.push(ParseWarning::UnclosedTag {
                span: Span::new(open.span.start, close_span.start),
                name: open
                    .kind
                    .tag_name()
                    .unwrap_or_default()
                    .to_string(),
            });
            open.span.end = close_span.start;
            self.attach(open);
        }

        let mut node = self.stack.pop().expect("matched element is on the stack");
        node.span.end = close_span.end;
        self.attach(node);
    }

    /// Auto-close every element still open when the input ends.
    fn close_remaining(&mut self, end: usize) {
        while let Some(mut open) = self.stack.pop() {
            self.warnings.push(ParseWarning::UnclosedTag {
                span: Span::new(open.span.start, end),
                name: open
                    .kind
                    .tag_name()
                    .unwrap_or_default()
                    .to_string(),
            });
            open.span.end = end;
            self.attach(open);
        }
    }

    /// A tag header hit EOF before its `>`: record the warning and let the
    /// remainder of the input ride out as literal text.
    fn unterminated_header(&mut self, tag_start: usize, name: String) {
        self.warnings.push(ParseWarning::UnterminatedTagHeader {
            span: Span::new(tag_start, self.input.len()),
            name,
        });
        if self.run_start.is_none() {
            self.run_start = Some(tag_start);
        }
        self.pos = self.input.len();
    }

    /// Treat the `<` at `tag_start` as literal text and resume after it.
    fn demote(&mut self, tag_start: usize) {
        if self.run_start.is_none() {
            self.run_start = Some(tag_start);
        }
        self.pos = tag_start + 1;
    }

    /// Emit the pending literal run, if any, as a text node ending at `end`.
    fn flush_text(&mut self, end: usize) {
        let Some(start) = self.run_start.take() else {
            return;
        };
        if start >= end {
            return;
        }
        let node = SyntaxNode::text(self.input[start..end].to_string(), Span::new(start, end));
        self.attach(node);
    }

    fn attach(&mut self, node: SyntaxNode) {
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => {
                // Between block-level siblings, whitespace carries no meaning.
                if node.is_blank_text() {
                    return;
                }
                self.root.children.push(node);
            }
        }
    }
}

/// Read a name (`[a-z][a-z0-9_-]*`, case-folded) at `i`, advancing past it.
fn scan_name(bytes: &[u8], i: &mut usize) -> String {
    let mut name = String::new();
    if let Some(b) = bytes.get(*i)
        && b.is_ascii_alphabetic()
    {
        name.push(b.to_ascii_lowercase() as char);
        *i += 1;
        while let Some(&b) = bytes.get(*i) {
            if b.is_ascii_alphanumeric() || b == b'-' || b == b'_' {
                name.push(b.to_ascii_lowercase() as char);
                *i += 1;
            } else {
                break;
            }
        }
    }
    name
}

fn skip_whitespace(bytes: &[u8], i: &mut usize) {
    while let Some(b) = bytes.get(*i) {
        if b.is_ascii_whitespace() {
            *i += 1;
        } else {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::SyntaxKind;

    fn tag_name(node: &SyntaxNode) -> &str {
        node.kind.tag_name().unwrap_or("")
    }

    #[test]
    fn parse_plain_text() {
        let parsed = parse("hello world");
        assert!(parsed.warnings.is_empty());
        assert_eq!(parsed.root.kind, SyntaxKind::Document);
        assert_eq!(parsed.root.span, Span::new(0, 11));
        assert_eq!(parsed.root.children.len(), 1);
        assert_eq!(parsed.root.children[0].text, "hello world");
        assert_eq!(parsed.root.children[0].span, Span::new(0, 11));
    }

    #[test]
    fn parse_empty_input() {
        let parsed = parse("");
        assert!(parsed.warnings.is_empty());
        assert!(parsed.root.children.is_empty());
        assert_eq!(parsed.root.span, Span::new(0, 0));
    }

    #[test]
    fn parse_simple_element() {
        let parsed = parse("<note type=\"warn\">hi</note>");
        assert!(parsed.warnings.is_empty());
        assert_eq!(parsed.root.children.len(), 1);

        let note = &parsed.root.children[0];
        assert_eq!(tag_name(note), "note");
        assert_eq!(note.raw_attributes.get("type").map(String::as_str), Some("warn"));
        assert_eq!(note.span, Span::new(0, 27));
        assert_eq!(note.children.len(), 1);
        assert_eq!(note.children[0].text, "hi");
    }

    #[test]
    fn parse_self_closing_tag() {
        let parsed = parse("<divider />");
        assert!(parsed.warnings.is_empty());
        assert_eq!(parsed.root.children.len(), 1);
        assert_eq!(tag_name(&parsed.root.children[0]), "divider");
        assert!(parsed.root.children[0].children.is_empty());
    }

    #[test]
    fn parse_self_closing_without_space() {
        let parsed = parse("<divider/>");
        assert!(parsed.warnings.is_empty());
        assert_eq!(tag_name(&parsed.root.children[0]), "divider");
    }

    #[test]
    fn whitespace_between_blocks_dropped() {
        let parsed = parse("<divider />\n  \n<divider />");
        assert!(parsed.warnings.is_empty());
        assert_eq!(parsed.root.children.len(), 2);
        assert!(parsed.root.children.iter().all(|c| !c.kind.is_text()));
    }

    #[test]
    fn whitespace_inside_element_preserved() {
        let parsed = parse("<quote>  </quote>");
        assert_eq!(parsed.root.children.len(), 1);
        let quote = &parsed.root.children[0];
        assert_eq!(quote.children.len(), 1);
        assert_eq!(quote.children[0].text, "  ");
    }

    #[test]
    fn text_around_inline_content_preserved() {
        let parsed = parse("<note type=\"a\"> spaced </note>");
        let note = &parsed.root.children[0];
        assert_eq!(note.children[0].text, " spaced ");
    }

    #[test]
    fn nested_elements_preserve_order() {
        let parsed = parse("<quote>a<note type=\"x\">b</note>c</quote>");
        let quote = &parsed.root.children[0];
        assert_eq!(quote.children.len(), 3);
        assert_eq!(quote.children[0].text, "a");
        assert_eq!(tag_name(&quote.children[1]), "note");
        assert_eq!(quote.children[2].text, "c");
    }

    #[test]
    fn tag_and_attribute_names_case_folded() {
        let parsed = parse("<NOTE TYPE=\"warn\">hi</NOTE>");
        let note = &parsed.root.children[0];
        assert_eq!(tag_name(note), "note");
        assert_eq!(note.raw_attributes.get("type").map(String::as_str), Some("warn"));
    }

    #[test]
    fn bare_attribute_reads_as_true() {
        let parsed = parse("<note type=\"a\" pinned>x</note>");
        let note = &parsed.root.children[0];
        assert_eq!(note.raw_attributes.get("pinned").map(String::as_str), Some("true"));
    }

    #[test]
    fn unquoted_attribute_value() {
        let parsed = parse("<youtube id=abc123 />");
        let youtube = &parsed.root.children[0];
        assert_eq!(youtube.raw_attributes.get("id").map(String::as_str), Some("abc123"));
    }

    #[test]
    fn single_quoted_value_keeps_double_quotes() {
        let parsed = parse("<note type='say \"hi\"'>x</note>");
        let note = &parsed.root.children[0];
        assert_eq!(
            note.raw_attributes.get("type").map(String::as_str),
            Some("say \"hi\"")
        );
    }

    #[test]
    fn quoted_value_may_contain_angle_bracket() {
        let parsed = parse("<note type=\"a > b\">x</note>");
        assert!(parsed.warnings.is_empty());
        let note = &parsed.root.children[0];
        assert_eq!(note.raw_attributes.get("type").map(String::as_str), Some("a > b"));
        assert_eq!(note.children[0].text, "x");
    }

    #[test]
    fn duplicate_attribute_first_wins() {
        let parsed = parse("<note type=\"a\" type=\"b\">x</note>");
        let note = &parsed.root.children[0];
        assert_eq!(note.raw_attributes.get("type").map(String::as_str), Some("a"));
        assert!(matches!(
            parsed.warnings.as_slice(),
            [ParseWarning::DuplicateAttribute { tag, attribute, .. }]
                if tag == "note" && attribute == "type"
        ));
    }

    #[test]
    fn lone_angle_bracket_is_text() {
        let parsed = parse("a < b");
        assert!(parsed.warnings.is_empty());
        assert_eq!(parsed.root.children.len(), 1);
        assert_eq!(parsed.root.children[0].text, "a < b");
    }

    #[test]
    fn non_tag_punctuation_is_text() {
        let parsed = parse("<!doctype html>");
        assert_eq!(parsed.root.children.len(), 1);
        assert_eq!(parsed.root.children[0].text, "<!doctype html>");
    }

    #[test]
    fn unclosed_tag_auto_closed_at_eof() {
        let parsed = parse("<note type=\"a\">hi");
        assert!(matches!(
            parsed.warnings.as_slice(),
            [ParseWarning::UnclosedTag { name, .. }] if name == "note"
        ));
        let note = &parsed.root.children[0];
        assert_eq!(tag_name(note), "note");
        assert_eq!(note.children[0].text, "hi");
        assert_eq!(note.span.end, 17);
    }

    #[test]
    fn mismatched_close_auto_closes_inner() {
        let parsed = parse("<quote><note type=\"a\">hi</quote>");
        assert!(matches!(
            parsed.warnings.as_slice(),
            [ParseWarning::UnclosedTag { name, .. }] if name == "note"
        ));
        let quote = &parsed.root.children[0];
        assert_eq!(tag_name(quote), "quote");
        let note = &quote.children[0];
        assert_eq!(tag_name(note), "note");
        assert_eq!(note.children[0].text, "hi");
    }

    #[test]
    fn stray_close_tag_dropped() {
        let parsed = parse("hi</note>");
        assert!(matches!(
            parsed.warnings.as_slice(),
            [ParseWarning::StrayCloseTag { name, .. }] if name == "note"
        ));
        assert_eq!(parsed.root.children.len(), 1);
        assert_eq!(parsed.root.children[0].text, "hi");
    }

    #[test]
    fn unterminated_header_becomes_text() {
        let input = "before <note type=\"warn";
        let parsed = parse(input);
        assert!(matches!(
            parsed.warnings.as_slice(),
            [ParseWarning::UnterminatedTagHeader { name, .. }] if name == "note"
        ));
        assert_eq!(parsed.root.children.len(), 1);
        assert_eq!(parsed.root.children[0].text, input);
        assert_eq!(parsed.root.children[0].span, Span::new(0, input.len()));
    }

    #[test]
    fn unterminated_quote_becomes_text() {
        let input = "<note type=\"warn>hi</note>";
        let parsed = parse(input);
        // The quote swallows the rest of the input, so the header never ends.
        assert!(matches!(
            parsed.warnings.as_slice(),
            [ParseWarning::UnterminatedTagHeader { name, .. }] if name == "note"
        ));
        assert_eq!(parsed.root.children[0].text, input);
    }

    #[test]
    fn spans_are_contiguous_and_in_bounds() {
        let input = "x<quote>a<divider />b</quote>y";
        let parsed = parse(input);

        fn check(node: &SyntaxNode, len: usize) {
            assert!(node.span.start <= node.span.end);
            assert!(node.span.end <= len);
            for child in &node.children {
                check(child, len);
            }
        }
        check(&parsed.root, input.len());
    }

    #[test]
    fn multibyte_text_survives() {
        let parsed = parse("caf\u{e9} \u{1f512}<divider />\u{6ce8}");
        assert_eq!(parsed.root.children.len(), 3);
        assert_eq!(parsed.root.children[0].text, "caf\u{e9} \u{1f512}");
        assert_eq!(parsed.root.children[2].text, "\u{6ce8}");
    }
}
