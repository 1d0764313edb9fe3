use crate::rules::{RuleId, RuleKind, RuleNode};
use std::collections::HashMap;

/// An arena of rule nodes plus the symbol tables a [`crate::grammar::Grammar`] needs
/// while it is under construction: a `name -> Label` table, and a `name -> [Goto]`
/// table of forward references awaiting their label.
#[derive(Default)]
pub struct Tree {
    pub(crate) nodes: Vec<RuleNode>,
    symbols: HashMap<String, RuleId>,
    pending: HashMap<String, Vec<RuleId>>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, kind: RuleKind) -> RuleId {
        let id = self.nodes.len();
        self.nodes.push(RuleNode { kind, default: None });
        id
    }

    pub(crate) fn set_default(&mut self, id: RuleId, next: RuleId) {
        self.nodes[id].default = Some(next);
    }

    pub(crate) fn node(&self, id: RuleId) -> &RuleNode {
        &self.nodes[id]
    }

    pub(crate) fn node_mut(&mut self, id: RuleId) -> &mut RuleNode {
        &mut self.nodes[id]
    }

    /// Registers `id` as the label bound to `name`, patching every Goto that was
    /// waiting on it. A later label with the same name wins for future lookups, but
    /// Gotos already bound to an earlier label keep that binding.
    pub(crate) fn bind_label(&mut self, name: &str, id: RuleId) {
        self.symbols.insert(name.to_string(), id);
        if let Some(waiting) = self.pending.remove(name) {
            for goto_id in waiting {
                if let RuleKind::Goto(target) = &mut self.nodes[goto_id].kind {
                    *target = Some(id);
                }
            }
        }
    }

    /// Resolves `goto_id` against `name` immediately if a label is already bound,
    /// otherwise queues it in the pending table.
    pub(crate) fn reference_label(&mut self, name: &str, goto_id: RuleId) {
        if let Some(&label_id) = self.symbols.get(name) {
            if let RuleKind::Goto(target) = &mut self.nodes[goto_id].kind {
                *target = Some(label_id);
            }
        } else {
            self.pending.entry(name.to_string()).or_default().push(goto_id);
        }
    }

    pub(crate) fn unresolved_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.pending.keys().cloned().collect();
        names.sort();
        names
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Moves every node out of `other` into `self`, offsetting internal RuleId
    /// references so indices keep pointing at the right logical node, merges both
    /// trees' symbol/pending tables, and back-patches anything newly resolvable.
    /// Returns the offset applied, so the caller can translate `other`'s former ids.
    pub(crate) fn absorb(&mut self, mut other: Tree) -> usize {
        let offset = self.nodes.len();
        for node in &mut other.nodes {
            node.offset(offset);
        }
        self.nodes.append(&mut other.nodes);

        for (name, id) in other.symbols {
            self.symbols.insert(name, id + offset);
        }
        for (name, ids) in other.pending {
            let shifted: Vec<RuleId> = ids.into_iter().map(|id| id + offset).collect();
            self.pending.entry(name).or_default().extend(shifted);
        }

        let resolvable: Vec<(String, RuleId)> = self
            .pending
            .keys()
            .filter_map(|name| self.symbols.get(name).map(|&id| (name.clone(), id)))
            .collect();
        for (name, label_id) in resolvable {
            if let Some(waiting) = self.pending.remove(&name) {
                for goto_id in waiting {
                    if let RuleKind::Goto(target) = &mut self.nodes[goto_id].kind {
                        *target = Some(label_id);
                    }
                }
            }
        }

        offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goto_before_label_resolves_on_binding() {
        let mut tree = Tree::new();
        let goto_id = tree.push(RuleKind::Goto(None));
        tree.reference_label("end", goto_id);
        assert_eq!(tree.unresolved_names(), vec!["end".to_string()]);

        let label_id = tree.push(RuleKind::Label("end".to_string()));
        tree.bind_label("end", label_id);
        assert!(tree.unresolved_names().is_empty());
        match &tree.node(goto_id).kind {
            RuleKind::Goto(Some(target)) => assert_eq!(*target, label_id),
            _ => panic!("expected resolved goto"),
        }
    }

    #[test]
    fn earlier_label_wins_for_gotos_bound_before_a_later_label_is_added() {
        let mut tree = Tree::new();
        let goto_id = tree.push(RuleKind::Goto(None));
        tree.reference_label("l", goto_id);
        let first_label = tree.push(RuleKind::Label("l".to_string()));
        tree.bind_label("l", first_label);

        let second_label = tree.push(RuleKind::Label("l".to_string()));
        tree.bind_label("l", second_label);

        match &tree.node(goto_id).kind {
            RuleKind::Goto(Some(target)) => assert_eq!(*target, first_label),
            _ => panic!("goto should have kept its original binding"),
        }

        let later_goto = tree.push(RuleKind::Goto(None));
        tree.reference_label("l", later_goto);
        match &tree.node(later_goto).kind {
            RuleKind::Goto(Some(target)) => assert_eq!(*target, second_label),
            _ => panic!("new goto should resolve to the later label"),
        }
    }
}
