use pretty_assertions::assert_eq;
use serde_json::json;
use xml2json::{Error, XmlToJson};

#[test]
fn nested_elements_with_attributes_and_mixed_tag_repetition() {
    let mut translator = XmlToJson::new().unwrap();
    translator
        .feed(r#"<root><item id="1">first</item><item id="2">second</item><note/></root>"#)
        .unwrap();

    let value = translator.to_json().unwrap();
    assert_eq!(
        value,
        json!({
            "item": [
                { "content": "first", "id": "1" },
                { "content": "second", "id": "2" },
            ],
            "note": {},
        })
    );
}

#[test]
fn leading_prologue_and_declaration_are_skipped() {
    let mut translator = XmlToJson::new().unwrap();
    translator
        .feed("<?xml version=\"1.0\"?>\n<root><a>hi</a></root>")
        .unwrap();
    let value = translator.to_json().unwrap();
    assert_eq!(value, json!({ "a": "hi" }));
}

#[test]
fn comment_inside_the_tree_is_skipped_without_affecting_siblings() {
    let mut translator = XmlToJson::new().unwrap();
    translator
        .feed("<root><a>one</a><!-- a comment\nspanning lines --><b>two</b></root>")
        .unwrap();
    let value = translator.to_json().unwrap();
    assert_eq!(value, json!({ "a": "one", "b": "two" }));
}

#[test]
fn self_closing_tag_becomes_an_empty_object() {
    let mut translator = XmlToJson::new().unwrap();
    translator.feed("<root><empty/></root>").unwrap();
    let value = translator.to_json().unwrap();
    assert_eq!(value, json!({ "empty": {} }));
}

#[test]
fn mismatched_close_tag_reports_the_expected_and_found_names() {
    let mut translator = XmlToJson::new().unwrap();
    let err = translator.feed("<root><a>hi</b></root>").unwrap_err();
    match err {
        Error::XmlUnbalanced { expected, found, .. } => {
            assert_eq!(expected, "a");
            assert_eq!(found, "b");
        }
        other => panic!("expected XmlUnbalanced, got {other:?}"),
    }
}

#[test]
fn feeding_one_byte_at_a_time_produces_the_same_tree_as_one_big_chunk() {
    let xml = r#"<root><a x="1">hi</a><b>there</b></root>"#;

    let mut whole = XmlToJson::new().unwrap();
    whole.feed(xml).unwrap();

    let mut piecemeal = XmlToJson::new().unwrap();
    for ch in xml.chars() {
        let mut buf = [0u8; 4];
        piecemeal.feed(ch.encode_utf8(&mut buf)).unwrap();
    }

    assert_eq!(whole.to_json().unwrap(), piecemeal.to_json().unwrap());
}
