use crate::error::{BuildError, BuildResult, ParseError};
use crate::match_result::Match;
use crate::pattern::Pattern;
use crate::rules::{BranchCase, BranchData, ReduceAction, RuleId, RuleKind};
use crate::tree::Tree;
use std::rc::Rc;

/// Fluent builder producing a [`Tree`]; see component design §4.8.
///
/// Every method consumes `self` and returns `Self`, so the Rust type system enforces
/// the source's "move nulls the original" discipline for free: there is no way to
/// reuse a builder after its tree has been handed to a [`crate::parser::Parser`],
/// because that hand-off takes the `Grammar` by value.
pub struct Grammar {
    tree: Tree,
    head: Option<RuleId>,
    tail: Option<RuleId>,
}

impl Default for Grammar {
    fn default() -> Self {
        Self::new()
    }
}

impl Grammar {
    pub fn new() -> Self {
        Self {
            tree: Tree::new(),
            head: None,
            tail: None,
        }
    }

    /// A Grammar whose sole rule is an Otherwise placeholder, used only inside
    /// `branch(...)` to designate the branch's fallback default.
    pub fn otherwise() -> Self {
        let mut tree = Tree::new();
        let id = tree.push(RuleKind::Otherwise);
        Self {
            tree,
            head: Some(id),
            tail: Some(id),
        }
    }

    pub(crate) fn into_parts(self) -> (Tree, Option<RuleId>, Option<RuleId>) {
        (self.tree, self.head, self.tail)
    }

    pub(crate) fn head(&self) -> Option<RuleId> {
        self.head
    }

    fn append_node(mut self, kind: RuleKind) -> (Self, RuleId) {
        let id = self.tree.push(kind);
        match self.tail {
            Some(tail) => self.tree.set_default(tail, id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        (self, id)
    }

    pub fn re(self, source: &str) -> BuildResult<Self> {
        let pattern = Pattern::new(source, false)?;
        Ok(self.append_node(RuleKind::ScanUntil(Rc::new(pattern))).0)
    }

    pub fn re_i(self, source: &str) -> BuildResult<Self> {
        let pattern = Pattern::new(source, true)?;
        Ok(self.append_node(RuleKind::ScanUntil(Rc::new(pattern))).0)
    }

    pub fn on_match<F>(self, cb: F) -> Self
    where
        F: Fn(&mut Match) + 'static,
    {
        let action: ReduceAction = Rc::new(move |m: &mut Match| {
            cb(m);
            Ok(())
        });
        self.append_node(RuleKind::Reduce(action)).0
    }

    pub fn on_string<F>(self, cb: F, capture_index: usize) -> Self
    where
        F: Fn(&str) + 'static,
    {
        let action: ReduceAction = Rc::new(move |m: &mut Match| {
            cb(m.capture(capture_index));
            Ok(())
        });
        self.append_node(RuleKind::Reduce(action)).0
    }

    pub fn thunk<F>(self, cb: F) -> Self
    where
        F: Fn() + 'static,
    {
        let action: ReduceAction = Rc::new(move |_m: &mut Match| {
            cb();
            Ok(())
        });
        self.append_node(RuleKind::Reduce(action)).0
    }

    pub fn ignore(self) -> Self {
        let action: ReduceAction = Rc::new(|_m: &mut Match| Ok(()));
        self.append_node(RuleKind::Reduce(action)).0
    }

    pub fn put_back(self) -> Self {
        self.append_node(RuleKind::PutBack).0
    }

    pub fn put_back_literal(self, text: impl Into<String>) -> Self {
        self.append_node(RuleKind::PutBackLiteral(text.into())).0
    }

    pub fn label(self, name: &str) -> Self {
        let (mut g, id) = self.append_node(RuleKind::Label(name.to_string()));
        g.tree.bind_label(name, id);
        g
    }

    pub fn go(self, name: &str) -> Self {
        let (mut g, id) = self.append_node(RuleKind::Goto(None));
        g.tree.reference_label(name, id);
        g
    }

    pub fn if_<F>(self, pred: F, consequent: Grammar) -> BuildResult<Self>
    where
        F: Fn() -> bool + 'static,
    {
        let (consequent_tree, consequent_head, _) = consequent.into_parts();
        let mut result = self;
        let offset = result.tree.absorb(consequent_tree);
        let consequent_id = consequent_head.map(|h| h + offset).ok_or_else(|| {
            BuildError::Structural("if_'s consequent grammar must contain at least one rule".to_string())
        })?;
        let predicate: Rc<dyn Fn() -> bool> = Rc::new(pred);
        Ok(result.append_node(RuleKind::If(predicate, consequent_id)).0)
    }

    pub fn stop(self) -> Self {
        self.append_node(RuleKind::Stop).0
    }

    pub fn error(self, msg: impl Into<String>) -> Self {
        let message = msg.into();
        let action: ReduceAction = Rc::new(move |m: &mut Match| {
            Err(ParseError::SyntaxError {
                message: message.clone(),
                unconsumed: m.whole().to_string(),
            })
        });
        self.append_node(RuleKind::Reduce(action)).0
    }

    /// Concatenates `other` onto the end of this grammar, merging symbol tables and
    /// patching pending Gotos in both directions.
    pub fn append(self, other: Grammar) -> Self {
        let (other_tree, other_head, other_tail) = other.into_parts();
        let mut result = self;
        let offset = result.tree.absorb(other_tree);
        let other_head = other_head.map(|h| h + offset);
        let other_tail = other_tail.map(|t| t + offset);

        match (result.tail, other_head) {
            (Some(tail), Some(head)) => result.tree.set_default(tail, head),
            (None, head) => result.head = head,
            _ => {}
        }
        if other_tail.is_some() {
            result.tail = other_tail;
        }
        result
    }

    /// Opens a Branch absorbing `cases` per the composition rules in §4.4: a case
    /// whose first rule is a ScanUntil becomes `(pattern, that rule's default)`; a case
    /// whose first rule is a Branch has its cases flattened in; a case built with
    /// [`Grammar::otherwise`] sets the branch's own default instead of becoming a case.
    /// Every other shape is rejected as a [`BuildError::Structural`].
    pub fn branch(self, cases: Vec<Grammar>) -> BuildResult<Self> {
        let (mut g, branch_id) = self.append_node(RuleKind::Branch(BranchData {
            cases: Vec::new(),
            more_chars: false,
        }));
        let (mut g, post_id) = g.append_node(RuleKind::Label("post-branch".to_string()));
        g.tree.set_default(branch_id, post_id);

        for case in cases {
            g = push_case(g, branch_id, post_id, case)?;
        }
        Ok(g)
    }
}

fn push_case(mut g: Grammar, branch_id: RuleId, post_id: RuleId, case: Grammar) -> BuildResult<Grammar> {
    let (case_tree, case_head, case_tail) = case.into_parts();
    let offset = g.tree.absorb(case_tree);
    let head = case_head.map(|h| h + offset).ok_or_else(|| {
        BuildError::Structural("a case being pushed to a grammar branch must begin with a scanner".to_string())
    })?;
    let tail = case_tail.map(|t| t + offset).unwrap_or(head);

    let head_kind_is_scan_until = matches!(g.tree.node(head).kind, RuleKind::ScanUntil(_));
    let head_kind_is_branch = matches!(g.tree.node(head).kind, RuleKind::Branch(_));
    let head_kind_is_otherwise = matches!(g.tree.node(head).kind, RuleKind::Otherwise);

    if head_kind_is_scan_until {
        let pattern = match &g.tree.node(head).kind {
            RuleKind::ScanUntil(p) => p.clone(),
            _ => unreachable!(),
        };
        let after_scan = g.tree.node(head).default;
        // the scan's own node is discarded; the case begins at whatever follows it
        let target = after_scan.unwrap_or(post_id);
        g.tree.node_mut(tail).default = Some(post_id);
        if let RuleKind::Branch(data) = &mut g.tree.node_mut(branch_id).kind {
            data.cases.push(BranchCase {
                pattern: Some(pattern),
                target,
            });
        }
    } else if head_kind_is_branch {
        let absorbed_cases = match &mut g.tree.node_mut(head).kind {
            RuleKind::Branch(data) => std::mem::take(&mut data.cases),
            _ => unreachable!(),
        };
        g.tree.node_mut(tail).default = Some(post_id);
        if let RuleKind::Branch(data) = &mut g.tree.node_mut(branch_id).kind {
            data.cases.extend(absorbed_cases);
        }
    } else if head_kind_is_otherwise {
        let fallback = g.tree.node(head).default.unwrap_or(post_id);
        g.tree.node_mut(tail).default = Some(post_id);
        g.tree.set_default(branch_id, fallback);
    } else {
        return Err(BuildError::Structural(
            "a case being pushed to a grammar branch must begin with a scanner".to_string(),
        ));
    }

    Ok(g)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    #[test]
    fn branch_first_position_short_circuit() {
        let trace: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));
        let trace_a = trace.clone();
        let trace_b = trace.clone();

        let grammar = Grammar::new()
            .branch(vec![
                Grammar::new().re("a").unwrap().thunk(move || trace_a.borrow_mut().push("a")),
                Grammar::new().re("b").unwrap().thunk(move || trace_b.borrow_mut().push("b")),
            ])
            .unwrap();

        let mut parser = Parser::sink(grammar).unwrap();
        parser.feed("ab").unwrap();
        assert_eq!(*trace.borrow(), vec!["a", "b"]);
    }

    #[test]
    fn loop_via_goto_terminates_at_stop() {
        let count = Rc::new(RefCell::new(0));
        let count_cb = count.clone();

        let grammar = Grammar::new()
            .label("L")
            .branch(vec![
                Grammar::new().re("x").unwrap().thunk(move || *count_cb.borrow_mut() += 1),
                Grammar::new().re("$").unwrap().stop(),
            ])
            .unwrap()
            .go("L");

        let mut parser = Parser::sink(grammar).unwrap();
        parser.feed("xxx").unwrap();
        assert_eq!(*count.borrow(), 3);
    }

    #[test]
    fn forward_goto_resolves_before_label_is_defined() {
        let grammar = Grammar::new().go("end").label("mid").label("end");
        assert!(Parser::sink(grammar).is_ok());
    }

    #[test]
    fn unresolved_goto_is_rejected_at_sink() {
        let grammar = Grammar::new().go("missing");
        let err = Parser::sink(grammar).unwrap_err();
        match err {
            BuildError::UnresolvedSymbol(names) => assert_eq!(names, vec!["missing".to_string()]),
            _ => panic!("expected UnresolvedSymbol"),
        }
    }
}
