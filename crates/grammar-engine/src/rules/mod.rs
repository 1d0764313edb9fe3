mod branch;
mod control;
mod label_goto;
mod put_back;
mod reduce;
mod scan_until;

pub use branch::{BranchCase, BranchData};

use crate::error::ParseResult;
use crate::match_result::Match;
use crate::pattern::Pattern;
use std::rc::Rc;

/// Stable index of a rule node inside a [`crate::tree::Tree`] arena.
///
/// Goto and Branch introduce back-edges between these indices, which is what lets the
/// rule graph contain cycles without unsafe pointer tricks.
pub type RuleId = usize;

/// A reducer's action: mutates the current [`Match`] (and, via captured shared state,
/// whatever external structure the grammar's author is building). Fallible internally
/// so that the builder's `error(msg)` primitive can raise a `SyntaxError`; the public
/// DSL entry points (`on_match`, `on_string`, `thunk`, `ignore`) only ever wrap
/// infallible closures.
pub type ReduceAction = Rc<dyn Fn(&mut Match) -> ParseResult<()>>;

/// An `If` predicate. Side effects are permitted but discouraged; see component design.
pub type Predicate = Rc<dyn Fn() -> bool>;

pub enum RuleKind {
    ScanUntil(Rc<Pattern>),
    Reduce(ReduceAction),
    Branch(BranchData),
    Label(String),
    /// Resolved target is the id of the `Label` node itself; stepping a Goto jumps to
    /// that label's `default`, not the label node. `None` means not yet back-patched.
    Goto(Option<RuleId>),
    PutBack,
    PutBackLiteral(String),
    If(Predicate, RuleId),
    Stop,
    /// Builder-only placeholder produced by [`crate::grammar::Grammar::otherwise`].
    /// Always absorbed away by `branch(...)`'s case-composition logic; falls through
    /// to `default` like a Label if it is ever stepped directly.
    Otherwise,
}

pub struct RuleNode {
    pub kind: RuleKind,
    pub default: Option<RuleId>,
}

impl RuleNode {
    pub(crate) fn offset(&mut self, delta: usize) {
        if let Some(next) = self.default.as_mut() {
            *next += delta;
        }
        match &mut self.kind {
            RuleKind::Branch(data) => {
                for case in &mut data.cases {
                    case.target += delta;
                }
            }
            RuleKind::Goto(Some(target)) => *target += delta,
            RuleKind::If(_, consequent) => *consequent += delta,
            _ => {}
        }
    }
}

/// Dispatches a single trampoline step for `current`, matching the contract in
/// component design §4.2: either advance to a next rule, or pause (signalled by the
/// `bool`) and re-enter `current` on the following call.
pub(crate) fn step(
    nodes: &[RuleNode],
    current: RuleId,
    m: &mut Match,
    input: &mut String,
) -> ParseResult<(Option<RuleId>, bool)> {
    let node = &nodes[current];
    match &node.kind {
        RuleKind::ScanUntil(pattern) => scan_until::step(pattern, node.default, current, m, input),
        RuleKind::Reduce(action) => reduce::step(action, node.default, m),
        RuleKind::Branch(data) => branch::step(data, node.default, current, m, input),
        RuleKind::Label(_) => label_goto::label_step(node.default),
        RuleKind::Goto(target) => {
            label_goto::goto_step(nodes, target.expect("goto resolved by sink before parsing"))
        }
        RuleKind::PutBack => put_back::put_back_step(node.default, m, input),
        RuleKind::PutBackLiteral(text) => put_back::put_back_literal_step(node.default, text, input),
        RuleKind::If(pred, consequent) => control::if_step(pred, *consequent, node.default),
        RuleKind::Stop => control::stop_step(node.default),
        RuleKind::Otherwise => label_goto::label_step(node.default),
    }
}
