use crate::element::{Attribute, Element, ElementId};

/// Maintains the open-element stack and the finished tree, driven by the semantic
/// callbacks a grammar built with [`crate::grammar::build`] invokes. Grounded in the
/// reference `XmlSemanticAction`'s stack-of-`XmlElement*` design; shared with the
/// grammar's reducer closures via `Rc<RefCell<Builder>>` since the engine's closures
/// are plain `Fn`, not members of a captured object.
#[derive(Debug, Default)]
pub struct Builder {
    elements: Vec<Element>,
    stack: Vec<ElementId>,
    result: Option<ElementId>,
    line: u32,
    /// Set by `on_close` when the closing tag doesn't match the stack top; read back
    /// by the crate's `feed` wrapper to turn the engine's generic SyntaxError into a
    /// properly typed `XmlUnbalanced`.
    pending_unbalanced: Option<(String, String)>,
}

impl Builder {
    pub fn new() -> Self {
        Self {
            line: 1,
            ..Default::default()
        }
    }

    pub fn element(&self, id: ElementId) -> &Element {
        &self.elements[id]
    }

    pub fn result(&self) -> Option<ElementId> {
        self.result
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub(crate) fn take_pending_unbalanced(&mut self) -> Option<(String, String)> {
        self.pending_unbalanced.take()
    }

    pub(crate) fn has_pending_unbalanced(&self) -> bool {
        self.pending_unbalanced.is_some()
    }

    pub fn on_open(&mut self, name: &str) {
        let id = self.elements.len();
        self.elements.push(Element::new(name, self.line));
        self.stack.push(id);
        log::trace!(target: "xml2json::builder", "opened <{name}> at line {}", self.line);
    }

    /// Returns `false` (and records the mismatch for the caller to surface) if `name`
    /// doesn't match the top of stack, rather than failing here directly, since the
    /// engine's reducer contract can't express a typed `XmlUnbalanced` failure.
    pub fn on_close(&mut self, name: &str) -> bool {
        let top = *self.stack.last().expect("close with no open tag");
        if self.elements[top].tag != name {
            self.pending_unbalanced = Some((self.elements[top].tag.clone(), name.to_string()));
            return false;
        }
        self.stack.pop();
        self.attach_finished(top);
        log::trace!(target: "xml2json::builder", "closed </{name}>");
        true
    }

    pub fn on_self_close(&mut self) {
        let top = self.stack.pop().expect("self-close with no open tag");
        log::trace!(target: "xml2json::builder", "self-closed <{}/>", self.elements[top].tag);
        self.attach_finished(top);
    }

    fn attach_finished(&mut self, id: ElementId) {
        match self.stack.last() {
            Some(&parent) => self.elements[parent].children.push(id),
            None => self.result = Some(id),
        }
    }

    pub fn on_content(&mut self, text: &str) {
        if let Some(&top) = self.stack.last() {
            log::trace!(target: "xml2json::builder", "content on <{}>: {text:?}", self.elements[top].tag);
            self.elements[top].push_content(text);
        }
    }

    pub fn on_attribute_name(&mut self, name: &str) {
        let top = *self.stack.last().expect("attribute outside any open tag");
        log::trace!(target: "xml2json::builder", "attribute {name} on <{}>", self.elements[top].tag);
        self.elements[top].attributes.push(Attribute {
            name: name.to_string(),
            value: String::new(),
        });
    }

    pub fn on_attribute_value(&mut self, value: &str) {
        let top = *self.stack.last().expect("attribute value outside any open tag");
        self.elements[top]
            .attributes
            .last_mut()
            .expect("attribute value without a preceding attribute name")
            .value = value.to_string();
    }

    pub fn line_end(&mut self) {
        self.line += 1;
    }
}
