/// Index into a [`crate::builder::Builder`]'s element arena.
pub type ElementId = usize;

#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// One node of the parsed XML tree. Grounded directly in the reference `XmlElement`:
/// tag, the line on which the open tag appeared, accumulated (and quote-escaped)
/// content, an ordered attribute list, and an ordered list of children.
#[derive(Debug, Clone)]
pub struct Element {
    pub tag: String,
    pub line_number: u32,
    pub content: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<ElementId>,
}

impl Element {
    pub fn new(tag: impl Into<String>, line_number: u32) -> Self {
        Self {
            tag: tag.into(),
            line_number,
            content: String::new(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn has_content(&self) -> bool {
        !self.content.is_empty()
    }

    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Appends `text` to this element's content, then escapes any `"` not already
    /// preceded by a backslash. Mirrors `XmlElement::add_content`'s eager,
    /// storage-time escaping rather than escaping at JSON-emission time.
    pub(crate) fn push_content(&mut self, text: &str) {
        self.content.push_str(text);
        self.content = escape_unescaped_quotes(&self.content);
    }
}

fn escape_unescaped_quotes(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut prev_was_backslash = false;
    for c in content.chars() {
        if c == '"' && !prev_was_backslash {
            out.push('\\');
        }
        out.push(c);
        prev_was_backslash = c == '\\';
    }
    out
}
