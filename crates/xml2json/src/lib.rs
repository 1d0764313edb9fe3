//! Translates XML into JSON on top of `grammar-engine`: builds a grammar whose
//! reducers maintain an element stack, feeds it input chunk by chunk, then walks the
//! finished tree to emit a [`serde_json::Value`].

mod builder;
mod element;
mod error;
mod grammar;
mod json;

pub use builder::Builder;
pub use element::{Attribute, Element, ElementId};
pub use error::{Error, Result};

use grammar_engine::Parser;
use std::cell::RefCell;
use std::rc::Rc;

/// Drives the XML grammar over input chunks and owns the [`Builder`] it reports into.
pub struct XmlToJson {
    parser: Parser,
    builder: Rc<RefCell<Builder>>,
}

impl XmlToJson {
    pub fn new() -> Result<Self> {
        let builder = Rc::new(RefCell::new(Builder::new()));
        let grammar = grammar::build(builder.clone())?;
        let parser = Parser::sink(grammar)?;
        Ok(Self { parser, builder })
    }

    /// Feeds `chunk` to the grammar, then advances the builder's line counter once
    /// per newline byte in `chunk` — generalising the reference driver's per-line
    /// `xml_action.line_end()` call to arbitrary chunk granularity.
    pub fn feed(&mut self, chunk: &str) -> Result<()> {
        let newlines = chunk.bytes().filter(|&b| b == b'\n').count();
        let result = self.parser.feed(chunk);
        for _ in 0..newlines {
            self.builder.borrow_mut().line_end();
        }
        result.map_err(|parse_err| self.classify_parse_error(parse_err))
    }

    fn classify_parse_error(&self, parse_err: grammar_engine::ParseError) -> Error {
        match self.builder.borrow_mut().take_pending_unbalanced() {
            Some((expected, found)) => Error::XmlUnbalanced {
                expected,
                found,
                line: self.builder.borrow().line(),
            },
            None => Error::Parse(parse_err),
        }
    }

    pub fn builder(&self) -> std::cell::Ref<'_, Builder> {
        self.builder.borrow()
    }

    /// Emits the finished tree as JSON, or `None` if no root element has closed yet.
    pub fn to_json(&self) -> Option<serde_json::Value> {
        let builder = self.builder.borrow();
        builder.result().map(|root| json::to_json(&builder, root))
    }
}

impl Default for XmlToJson {
    fn default() -> Self {
        Self::new().expect("the built-in xml grammar always sinks cleanly")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn xml_to_json_round_trip() {
        let mut translator = XmlToJson::new().unwrap();
        translator
            .feed(r#"<r><a x="1">hi</a><a x="2">ho</a></r>"#)
            .unwrap();
        let value = translator.to_json().unwrap();
        assert_eq!(
            value,
            json!({ "a": [ { "content": "hi", "x": "1" }, { "content": "ho", "x": "2" } ] })
        );
    }

    #[test]
    fn comment_and_self_closing_tag() {
        let mut translator = XmlToJson::new().unwrap();
        translator.feed("<r><!-- note --><b/></r>").unwrap();
        let value = translator.to_json().unwrap();
        assert_eq!(value, json!({ "b": {} }));
    }

    #[test]
    fn unbalanced_close_tag_is_reported() {
        let mut translator = XmlToJson::new().unwrap();
        let err = translator.feed("<a></b>").unwrap_err();
        match err {
            Error::XmlUnbalanced { expected, found, line } => {
                assert_eq!(expected, "a");
                assert_eq!(found, "b");
                assert_eq!(line, 1);
            }
            other => panic!("expected XmlUnbalanced, got {other:?}"),
        }
    }

    #[test]
    fn feeding_across_an_arbitrary_chunk_boundary_still_works() {
        let mut translator = XmlToJson::new().unwrap();
        let xml = r#"<root><child name="v">text</child></root>"#;
        for byte in xml.as_bytes() {
            translator.feed(std::str::from_utf8(&[*byte]).unwrap()).unwrap();
        }
        let value = translator.to_json().unwrap();
        assert_eq!(value, json!({ "child": { "content": "text", "name": "v" } }));
    }
}
