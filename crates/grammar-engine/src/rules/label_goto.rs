use super::{RuleId, RuleNode};
use crate::error::ParseResult;

/// A Label is an identity rule: it just falls through to its own default.
pub(crate) fn label_step(default: Option<RuleId>) -> ParseResult<(Option<RuleId>, bool)> {
    Ok((default, false))
}

/// A Goto jumps to the node *after* its target label, making the jump zero-cost while
/// keeping the label itself addressable (e.g. for diagnostics).
pub(crate) fn goto_step(nodes: &[RuleNode], target: RuleId) -> ParseResult<(Option<RuleId>, bool)> {
    Ok((nodes[target].default, false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleKind;

    #[test]
    fn goto_resolves_to_the_node_after_its_label() {
        let nodes = vec![
            RuleNode {
                kind: RuleKind::Label("L".to_string()),
                default: Some(1),
            },
            RuleNode {
                kind: RuleKind::Stop,
                default: None,
            },
        ];
        let (next, _) = goto_step(&nodes, 0).unwrap();
        assert_eq!(next, Some(1));
    }
}
