use crate::error::{BuildError, BuildResult, ParseResult};
use crate::grammar::Grammar;
use crate::match_result::Match;
use crate::rules::{self, RuleId};
use crate::tree::Tree;

/// Trampoline that drives rule nodes over successive input chunks, preserving
/// partial-scan state between calls. See component design §4.9.
pub struct Parser {
    tree: Tree,
    root: Option<RuleId>,
    current: Option<RuleId>,
    buffer: String,
    m: Match,
}

impl Parser {
    /// Takes ownership of `grammar`'s Tree, failing with [`BuildError::UnresolvedSymbol`]
    /// if any Goto was never bound to a Label.
    pub fn sink(grammar: Grammar) -> BuildResult<Self> {
        let head = grammar.head();
        let (tree, _, _) = grammar.into_parts();
        let unresolved = tree.unresolved_names();
        if !unresolved.is_empty() {
            return Err(BuildError::UnresolvedSymbol(unresolved));
        }
        Ok(Self {
            tree,
            root: head,
            current: head,
            buffer: String::new(),
            m: Match::new(),
        })
    }

    /// Restores `current_rule` to the start of the grammar and clears buffered input
    /// and the match. A parser that has raised a parse-time error must be reset before
    /// it can be fed again.
    pub fn reset(&mut self) {
        self.current = self.root;
        self.buffer.clear();
        self.m = Match::new();
    }

    /// Whether the grammar has terminated (`current_rule` is null).
    pub fn is_leaf(&self) -> bool {
        self.current.is_none()
    }

    pub fn current_match(&self) -> &Match {
        &self.m
    }

    /// Appends `chunk` to the internal buffer and runs the trampoline loop until a
    /// rule suspends (need-more-input) or the grammar terminates. Persisting the
    /// buffer across calls, rather than treating each chunk as an isolated string, is
    /// what makes a pattern or ScanUntil miss that straddles a chunk boundary resolve
    /// correctly once the remainder arrives (chunk-boundary independence, §8).
    pub fn feed(&mut self, chunk: &str) -> ParseResult<()> {
        self.buffer.push_str(chunk);
        loop {
            let Some(current) = self.current else {
                break;
            };
            let (next, need_more) = rules::step(&self.tree.nodes, current, &mut self.m, &mut self.buffer)?;
            self.current = next;
            if need_more {
                break;
            }
        }
        Ok(())
    }
}
