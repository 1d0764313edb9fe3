use crate::builder::Builder;
use crate::element::ElementId;
use serde_json::{Map, Value};

/// Emits `elem` (and its subtree) as a [`serde_json::Value`], mirroring
/// `JSONPrint::print_body`: a leaf with content and nothing else becomes a bare
/// string; otherwise an object with an optional `"content"` key, one key per
/// attribute, and one key per distinct child tag (children sharing a tag become a
/// JSON array, in their original relative order). Children are visited in
/// tag-name-sorted order, ties broken by source line, so output is deterministic
/// regardless of the order attributes or children were encountered while parsing.
pub fn to_json(builder: &Builder, id: ElementId) -> Value {
    let elem = builder.element(id);

    if elem.has_content() && !elem.has_attributes() && !elem.has_children() {
        return Value::String(elem.content.clone());
    }

    let mut object = Map::new();
    if elem.has_content() {
        object.insert("content".to_string(), Value::String(elem.content.clone()));
    }
    for attribute in &elem.attributes {
        object.insert(attribute.name.clone(), Value::String(attribute.value.clone()));
    }

    let mut children = elem.children.clone();
    children.sort_by(|&a, &b| {
        let (ea, eb) = (builder.element(a), builder.element(b));
        ea.tag.cmp(&eb.tag).then(ea.line_number.cmp(&eb.line_number))
    });

    let mut index = 0;
    while index < children.len() {
        let tag = builder.element(children[index]).tag.clone();
        let run_end = children[index..]
            .iter()
            .position(|&c| builder.element(c).tag != tag)
            .map(|offset| index + offset)
            .unwrap_or(children.len());

        let run = &children[index..run_end];
        if run.len() == 1 {
            object.insert(tag, to_json(builder, run[0]));
        } else {
            let array = run.iter().map(|&c| to_json(builder, c)).collect();
            object.insert(tag, Value::Array(array));
        }
        index = run_end;
    }

    Value::Object(object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Builder;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn leaf_with_content_and_no_attributes_is_a_bare_string() {
        let mut b = Builder::new();
        b.on_open("a");
        b.on_content("hi");
        b.on_close("a");
        let root = b.result().unwrap();
        assert_eq!(to_json(&b, root), json!("hi"));
    }

    #[test]
    fn repeated_child_tags_become_a_sorted_array() {
        let mut b = Builder::new();
        b.on_open("r");
        b.on_open("a");
        b.on_attribute_name("x");
        b.on_attribute_value("1");
        b.on_content("hi");
        b.on_close("a");
        b.on_open("a");
        b.on_attribute_name("x");
        b.on_attribute_value("2");
        b.on_content("ho");
        b.on_close("a");
        b.on_close("r");

        let root = b.result().unwrap();
        let value = to_json(&b, root);
        assert_eq!(
            value,
            json!({ "a": [ { "content": "hi", "x": "1" }, { "content": "ho", "x": "2" } ] })
        );
    }
}
