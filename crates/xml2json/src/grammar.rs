use crate::builder::Builder;
use grammar_engine::{BuildResult, Grammar};
use std::cell::RefCell;
use std::rc::Rc;

/// Builds the XML grammar driving `builder`'s semantic callbacks, translating the
/// reference `xml2json.cpp`'s two `DefineGrammar` objects (`xml_rules`, `xml_in_tree`)
/// rule for rule: a toplevel grammar that skips the prologue/comments/declaration and
/// descends into the tree on the root tag, appended to the in-tree grammar that loops
/// over open tags, attributes, close tags, and nested comments.
pub fn build(builder: Rc<RefCell<Builder>>) -> BuildResult<Grammar> {
    let in_tree = build_in_tree(&builder)?;
    let toplevel = build_toplevel(&builder)?;
    Ok(toplevel.append(in_tree))
}

fn build_in_tree(builder: &Rc<RefCell<Builder>>) -> BuildResult<Grammar> {
    let b = builder.clone();
    let content_rule = Grammar::new()
        .label("in-tree")
        .re("([^<]*)")?
        .on_string(move |s| b.borrow_mut().on_content(s), 1);

    let close_tag = {
        let b = builder.clone();
        let b_pred = builder.clone();
        Grammar::new()
            .re(r"^\s*</\s*([^>[:space:]]*)\s*>")?
            .on_string(move |s| {
                b.borrow_mut().on_close(s);
            }, 1)
            .if_(
                move || b_pred.borrow().has_pending_unbalanced(),
                Grammar::new().error("unbalanced close tag"),
            )?
            .go("in-tree")
    };

    let comment = Grammar::new()
        .re(r"^\s*<!--")?
        .label("comment")
        .branch(vec![
            Grammar::new().re(".*-->")?.go("in-tree"),
            Grammar::new().re(".*")?.go("comment"),
        ])?;

    let open_tag = {
        let b_open = builder.clone();
        let b_self_close = builder.clone();
        let b_attr_name = builder.clone();
        let b_attr_value = builder.clone();

        Grammar::new()
            .re(r"\s*<([^>/[:space:]]*)")?
            .on_string(move |s| b_open.borrow_mut().on_open(s), 1)
            .label("tag-loop")
            .re(r"^\s*")?
            .ignore()
            .branch(vec![
                Grammar::new().re("^>")?.go("in-tree"),
                Grammar::new()
                    .re("/>")?
                    .thunk(move || b_self_close.borrow_mut().on_self_close())
                    .go("in-tree"),
                Grammar::otherwise()
                    .re(r"(\s*[^>=[:space:]]*?)\s*?=")?
                    .on_string(move |s| b_attr_name.borrow_mut().on_attribute_name(s), 1)
                    .re("\"(.*?)\"")?
                    .on_string(move |s| b_attr_value.borrow_mut().on_attribute_value(s), 1)
                    .go("tag-loop"),
            ])?
    };

    let declaration_misplaced = Grammar::new().re(r"<\?")?.error("xml declaration must be at top-level.");
    let unknown_tag = Grammar::otherwise().error("don't know how to handle tag.");

    Ok(content_rule
        .branch(vec![close_tag, comment, open_tag, declaration_misplaced, unknown_tag])?
        .go("in-tree"))
}

fn build_toplevel(_builder: &Rc<RefCell<Builder>>) -> BuildResult<Grammar> {
    let prologue = Grammar::new().label("toplevel-rule").re("[^<]*")?.thunk(|| {});

    let declaration = Grammar::new().re(r"<\?.*\?>")?.go("toplevel-rule");

    let comment = Grammar::new()
        .re(r"^\s*<!--")?
        .label("toplevel-comment")
        .branch(vec![
            Grammar::new().re(".*-->")?.go("toplevel-rule"),
            Grammar::new().re(".*")?.go("toplevel-comment"),
        ])?;

    let unopened_close = Grammar::new().re(r"^\s*</")?.error("close tag with no open tags");

    let descend_to_root = Grammar::otherwise().re(r"^\s*")?.go("in-tree");

    prologue.branch(vec![declaration, comment, unopened_close, descend_to_root])
}
