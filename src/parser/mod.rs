//! Markup parser
//!
//! A hand-written parser that turns document text into a [`Node`] tree.
//! It handles a practical subset of XML 1.0: elements, attributes, text,
//! the five predefined entities and numeric character references. An XML
//! declaration, comments, processing instructions and a DOCTYPE block are
//! skipped. CDATA sections are not supported.
//!
//! Parsing is fail-fast: the first structural problem produces exactly one
//! `PARSE_ERROR` diagnostic at the current position and no tree.

mod cursor;
mod entities;

pub use cursor::Cursor;
pub use entities::decode_entity;

use crate::documents::Node;
use crate::error::{Error, ErrorCode, ParseOutcome, Result, ValidationError};
use crate::limits::Limits;
use crate::names::{is_name_char, is_name_start_char};
use crate::namespaces::NamespaceContext;

/// Markup parser
///
/// Holds only configuration; all scan state lives in [`Cursor`] values
/// threaded through each step, so one parser can be shared and reused
/// freely.
#[derive(Debug, Clone, Default)]
pub struct XmlParser {
    limits: Limits,
}

impl XmlParser {
    /// Create a parser with default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom limits
    pub fn with_limits(limits: Limits) -> Self {
        Self { limits }
    }

    /// Get the configured limits
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Parse a document into its root node
    pub fn parse(&self, text: &str) -> ParseOutcome<Node> {
        let scanner = Scanner {
            input: text,
            limits: &self.limits,
        };

        match scanner.parse_document() {
            Ok(root) => {
                tracing::debug!(root = %root.name, bytes = text.len(), "parsed document");
                ParseOutcome::success(root)
            }
            Err(err) => {
                let diagnostic = match err {
                    Error::Parse(diagnostic) => diagnostic,
                    other => ValidationError::new(ErrorCode::ParseError, other.to_string()),
                };
                tracing::debug!(error = %diagnostic, "document rejected");
                ParseOutcome::failure(diagnostic)
            }
        }
    }
}

/// A parsed start tag
struct StartTag {
    node: Node,
    /// Namespace scope, present only when the tag declares `xmlns` attributes
    scope: Option<NamespaceContext>,
    self_closing: bool,
    end: Cursor,
}

/// An element whose end tag has not been reached yet
struct OpenElement {
    node: Node,
    declares_scope: bool,
    text: String,
    text_start: Option<Cursor>,
}

/// Where content scanning stopped
enum Content {
    ChildStart,
    EndTag,
}

/// Borrowed view of the input for one `parse` call
struct Scanner<'a> {
    input: &'a str,
    limits: &'a Limits,
}

impl<'a> Scanner<'a> {
    fn error(&self, cur: Cursor, message: impl Into<String>) -> Error {
        Error::Parse(ValidationError::new(ErrorCode::ParseError, message).at(cur.line, cur.column))
    }

    /// Re-anchor a limit violation at the current position
    fn limit(&self, cur: Cursor, check: Result<()>) -> Result<()> {
        check.map_err(|e| self.error(cur, e.to_string()))
    }

    fn rest(&self, cur: Cursor) -> &'a str {
        &self.input[cur.offset..]
    }

    fn peek(&self, cur: Cursor) -> Option<char> {
        self.rest(cur).chars().next()
    }

    fn starts_with(&self, cur: Cursor, prefix: &str) -> bool {
        self.rest(cur).starts_with(prefix)
    }

    fn skip_whitespace(&self, mut cur: Cursor) -> Cursor {
        while let Some(c) = self.peek(cur) {
            if !c.is_whitespace() {
                break;
            }
            cur = cur.advance(c);
        }
        cur
    }

    /// Advance past the next occurrence of `terminator`
    fn skip_past(&self, mut cur: Cursor, terminator: &str) -> Option<Cursor> {
        loop {
            if self.starts_with(cur, terminator) {
                return Some(cur.advance_str(terminator));
            }
            let c = self.peek(cur)?;
            cur = cur.advance(c);
        }
    }

    /// Skip a DOCTYPE block, counting nested angle brackets
    fn skip_doctype(&self, start: Cursor) -> Result<Cursor> {
        let mut cur = start;
        let mut depth = 0usize;
        while let Some(c) = self.peek(cur) {
            cur = cur.advance(c);
            match c {
                '<' => depth += 1,
                '>' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(cur);
                    }
                }
                _ => {}
            }
        }
        Err(self.error(cur, "Unterminated DOCTYPE declaration"))
    }

    /// Skip comments, DOCTYPE blocks and processing instructions
    fn skip_misc(&self, mut cur: Cursor) -> Result<Cursor> {
        loop {
            cur = self.skip_whitespace(cur);
            if self.starts_with(cur, "<!--") {
                cur = self
                    .skip_past(cur.advance_str("<!--"), "-->")
                    .ok_or_else(|| self.error(cur, "Unterminated comment"))?;
            } else if self.starts_with(cur, "<!DOCTYPE") {
                cur = self.skip_doctype(cur)?;
            } else if self.starts_with(cur, "<?") {
                cur = self
                    .skip_past(cur.advance_str("<?"), "?>")
                    .ok_or_else(|| self.error(cur, "Unterminated processing instruction"))?;
            } else {
                return Ok(cur);
            }
        }
    }

    fn parse_document(&self) -> Result<Node> {
        let start = Cursor::start();
        self.limit(start, self.limits.check_input_size(self.input.len()))?;

        let mut cur = self.skip_whitespace(start);
        if self.starts_with(cur, "<?xml") {
            cur = self
                .skip_past(cur, "?>")
                .ok_or_else(|| self.error(cur, "Unterminated XML declaration"))?;
        }
        cur = self.skip_misc(cur)?;

        match self.peek(cur) {
            None => return Err(self.error(cur, "No root element found")),
            Some('<') if self.starts_with(cur, "</") => {
                return Err(self.error(cur, "Unexpected end tag"))
            }
            Some('<') => {}
            Some(_) => return Err(self.error(cur, "Unexpected content before root element")),
        }

        let (root, cur) = self.parse_element(cur)?;

        let cur = self.skip_misc(cur)?;
        if self.peek(cur).is_some() {
            return Err(self.error(cur, "Unexpected content after root element"));
        }
        Ok(root)
    }

    fn parse_name(&self, start: Cursor) -> Result<(String, Cursor)> {
        match self.peek(start) {
            None => return Err(self.error(start, "Unexpected end of input, expected a name")),
            Some(c) if !is_name_start_char(c) => {
                return Err(self.error(start, format!("Invalid name start character '{}'", c)))
            }
            Some(_) => {}
        }

        let mut cur = start;
        while let Some(c) = self.peek(cur) {
            if !is_name_char(c) {
                break;
            }
            cur = cur.advance(c);
        }
        Ok((self.input[start.offset..cur.offset].to_string(), cur))
    }

    /// Decode an entity reference; `start` points at the `&`
    fn parse_entity(&self, start: Cursor) -> Result<(String, Cursor)> {
        let body = start.advance('&');
        let mut cur = body;
        loop {
            match self.peek(cur) {
                Some(';') => break,
                Some(c) if c == '#' || is_name_char(c) => cur = cur.advance(c),
                _ => return Err(self.error(cur, "Unterminated entity reference")),
            }
        }
        let name = &self.input[body.offset..cur.offset];
        Ok((decode_entity(name), cur.advance(';')))
    }

    fn parse_attribute_value(&self, start: Cursor) -> Result<(String, Cursor)> {
        let quote = match self.peek(start) {
            Some(q @ ('"' | '\'')) => q,
            _ => return Err(self.error(start, "Expected quoted attribute value")),
        };

        let mut value = String::new();
        let mut cur = start.advance(quote);
        loop {
            match self.peek(cur) {
                None => return Err(self.error(cur, "Unterminated attribute value")),
                Some(c) if c == quote => return Ok((value, cur.advance(c))),
                Some('&') => {
                    let (decoded, next) = self.parse_entity(cur)?;
                    value.push_str(&decoded);
                    cur = next;
                }
                Some(c) => {
                    value.push(c);
                    cur = cur.advance(c);
                }
            }
        }
    }

    /// Parse the root element and everything under it; `start` points at its `<`
    ///
    /// Open elements live on an explicit stack, so nesting depth is bounded
    /// only by [`Limits::max_depth`] and never by the thread's stack size.
    fn parse_element(&self, start: Cursor) -> Result<(Node, Cursor)> {
        let document_scope = NamespaceContext::new();
        let mut scopes: Vec<NamespaceContext> = Vec::new();
        let mut open: Vec<OpenElement> = Vec::new();
        let mut cur = start;

        loop {
            // `cur` points at the `<` of a start tag
            let scope = scopes.last().unwrap_or(&document_scope);
            let tag = self.parse_start_tag(cur, scope, open.len() + 1)?;
            cur = tag.end;

            let element = OpenElement {
                node: tag.node,
                declares_scope: tag.scope.is_some(),
                text: String::new(),
                text_start: None,
            };
            scopes.extend(tag.scope);

            let mut closed = if tag.self_closing {
                Some(element)
            } else {
                open.push(element);
                None
            };

            // Close finished elements until the next child start tag
            loop {
                if let Some(element) = closed.take() {
                    if element.declares_scope {
                        scopes.pop();
                    }
                    let node = self.finish_element(element)?;
                    match open.last_mut() {
                        Some(parent) => parent.node.children.push(node),
                        None => return Ok((node, cur)),
                    }
                }

                let top = open
                    .last_mut()
                    .ok_or_else(|| self.error(cur, "No open element"))?;
                let (content, next) = self.scan_content(top, cur)?;
                cur = next;
                match content {
                    Content::ChildStart => break,
                    Content::EndTag => closed = open.pop(),
                }
            }
        }
    }

    /// Parse a start tag; `start` points at its `<`
    fn parse_start_tag(
        &self,
        start: Cursor,
        scope: &NamespaceContext,
        depth: usize,
    ) -> Result<StartTag> {
        self.limit(start, self.limits.check_depth(depth))?;

        let (name, mut cur) = self.parse_name(start.advance('<'))?;
        let mut node = Node::new(name).with_position(start.position());

        let self_closing = loop {
            let after_ws = self.skip_whitespace(cur);
            match self.peek(after_ws) {
                None => return Err(self.error(after_ws, "Unexpected end of input in start tag")),
                Some('>') => {
                    cur = after_ws.advance('>');
                    break false;
                }
                Some('/') => {
                    if !self.starts_with(after_ws, "/>") {
                        return Err(self.error(after_ws, "Expected '>' after '/'"));
                    }
                    cur = after_ws.advance_str("/>");
                    break true;
                }
                Some(_) => {
                    let (attr_name, next) = self.parse_name(after_ws)?;
                    let next = self.skip_whitespace(next);
                    if self.peek(next) != Some('=') {
                        return Err(self.error(
                            next,
                            format!("Expected '=' after attribute name '{}'", attr_name),
                        ));
                    }
                    let next = self.skip_whitespace(next.advance('='));
                    let (value, next) = self.parse_attribute_value(next)?;

                    if node.attributes.contains_key(&attr_name) {
                        return Err(self.error(
                            after_ws,
                            format!("Duplicate attribute '{}'", attr_name),
                        ));
                    }
                    self.limit(after_ws, self.limits.check_attributes(node.attributes.len() + 1))?;
                    node.attributes.insert(attr_name, value);
                    cur = next;
                }
            }
        };

        let declared = if node.attributes.keys().any(|k| crate::names::is_xmlns_attribute(k)) {
            let mut inner = scope.clone();
            for (attr, value) in &node.attributes {
                inner.declare(attr, value);
            }
            Some(inner)
        } else {
            None
        };
        node.namespace = declared
            .as_ref()
            .unwrap_or(scope)
            .lookup(&node.name)
            .map(str::to_string);

        Ok(StartTag {
            node,
            scope: declared,
            self_closing,
            end: cur,
        })
    }

    /// Scan element content up to the next child start tag or the element's end tag
    fn scan_content(
        &self,
        element: &mut OpenElement,
        mut cur: Cursor,
    ) -> Result<(Content, Cursor)> {
        loop {
            match self.peek(cur) {
                None => {
                    return Err(self.error(
                        cur,
                        format!("Unexpected end of input, expected '</{}>'", element.node.name),
                    ))
                }
                Some('<') if self.starts_with(cur, "</") => {
                    let (end_name, next) = self.parse_name(cur.advance_str("</"))?;
                    if end_name != element.node.name {
                        return Err(self.error(
                            cur,
                            format!(
                                "Mismatched end tag: expected '</{}>' but found '</{}>'",
                                element.node.name, end_name
                            ),
                        ));
                    }
                    let next = self.skip_whitespace(next);
                    if self.peek(next) != Some('>') {
                        return Err(self.error(next, "Expected '>' to close end tag"));
                    }
                    return Ok((Content::EndTag, next.advance('>')));
                }
                Some('<') if self.starts_with(cur, "<!--") => {
                    cur = self
                        .skip_past(cur.advance_str("<!--"), "-->")
                        .ok_or_else(|| self.error(cur, "Unterminated comment"))?;
                }
                Some('<') if self.starts_with(cur, "<?") => {
                    cur = self
                        .skip_past(cur.advance_str("<?"), "?>")
                        .ok_or_else(|| self.error(cur, "Unterminated processing instruction"))?;
                }
                Some('<') => {
                    if let Some(text_cur) = element.text_start.take() {
                        self.flush_text(&mut element.node, &element.text, text_cur)?;
                    }
                    element.text.clear();
                    return Ok((Content::ChildStart, cur));
                }
                Some('&') => {
                    let (decoded, next) = self.parse_entity(cur)?;
                    if element.text_start.is_none() && !decoded.trim().is_empty() {
                        element.text_start = Some(cur);
                    }
                    element.text.push_str(&decoded);
                    cur = next;
                }
                Some(c) => {
                    if element.text_start.is_none() && !c.is_whitespace() {
                        element.text_start = Some(cur);
                    }
                    element.text.push(c);
                    cur = cur.advance(c);
                }
            }
        }
    }

    /// Attach trailing text once the end tag has been seen
    fn finish_element(&self, element: OpenElement) -> Result<Node> {
        let OpenElement {
            mut node,
            text,
            text_start,
            ..
        } = element;

        if let Some(text_cur) = text_start {
            self.limit(text_cur, self.limits.check_text_length(text.len()))?;
            let trimmed = text.trim();
            if node.children.is_empty() {
                node.text = Some(trimmed.to_string());
            } else {
                node.children
                    .push(Node::text_node(trimmed).with_position(text_cur.position()));
            }
        }
        Ok(node)
    }

    /// Push accumulated mixed-content text as a `#text` child
    fn flush_text(&self, node: &mut Node, text: &str, text_cur: Cursor) -> Result<()> {
        self.limit(text_cur, self.limits.check_text_length(text.len()))?;
        node.children
            .push(Node::text_node(text.trim()).with_position(text_cur.position()));
        Ok(())
    }
}
