use super::RuleId;
use crate::error::{ParseError, ParseResult};
use crate::match_result::Match;
use crate::pattern::Pattern;
use std::rc::Rc;

/// One arm of a [`BranchData`]: `pattern == None` is an "otherwise" case, taken
/// unconditionally as soon as the selection loop reaches it.
pub struct BranchCase {
    pub pattern: Option<Rc<Pattern>>,
    pub target: RuleId,
}

pub struct BranchData {
    pub cases: Vec<BranchCase>,
    /// Settable but never produced by the builder DSL itself; see design notes.
    pub more_chars: bool,
}

struct Candidate {
    position: usize,
    suffix: String,
    captures: Vec<Option<String>>,
    target: RuleId,
}

/// Implements the selection algorithm from component design §4.4: position-0 cases
/// short-circuit immediately, otherwise the case with the smallest match position wins,
/// ties broken by declaration order.
pub(crate) fn step(
    data: &BranchData,
    default: Option<RuleId>,
    current: RuleId,
    m: &mut Match,
    input: &mut String,
) -> ParseResult<(Option<RuleId>, bool)> {
    if input.is_empty() {
        return Ok((Some(current), true));
    }

    let mut best: Option<Candidate> = None;
    let mut taken: Option<Candidate> = None;

    for case in &data.cases {
        match &case.pattern {
            None => {
                taken = Some(Candidate {
                    position: 0,
                    suffix: input.clone(),
                    captures: Vec::new(),
                    target: case.target,
                });
                break;
            }
            Some(pattern) => {
                let Some(hit) = pattern.search(input) else {
                    continue;
                };
                if hit.position == 0 {
                    taken = Some(Candidate {
                        position: 0,
                        suffix: hit.suffix,
                        captures: hit.captures,
                        target: case.target,
                    });
                    break;
                }
                let replace = best.as_ref().map_or(true, |b| hit.position < b.position);
                if replace {
                    best = Some(Candidate {
                        position: hit.position,
                        suffix: hit.suffix,
                        captures: hit.captures,
                        target: case.target,
                    });
                }
            }
        }
    }

    match taken.or(best) {
        Some(chosen) => {
            log::trace!(target: "grammar_engine::rules::branch", "selected case at position {}", chosen.position);
            *input = chosen.suffix;
            m.set(chosen.captures);
            Ok((Some(chosen.target), false))
        }
        None if data.more_chars => Ok((Some(current), true)),
        None => match default {
            Some(fallback) => {
                log::trace!(target: "grammar_engine::rules::branch", "no case matched, falling through to default");
                Ok((Some(fallback), false))
            }
            None => Err(ParseError::SyntaxError {
                message: "branch had no applicable case and no default".to_string(),
                unconsumed: input.clone(),
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::match_result::Match;
    use pretty_assertions::assert_eq;

    fn case(src: &str, target: RuleId) -> BranchCase {
        BranchCase {
            pattern: Some(Rc::new(Pattern::new(src, false).unwrap())),
            target,
        }
    }

    #[test]
    fn empty_input_pauses() {
        let data = BranchData {
            cases: vec![case("a", 1)],
            more_chars: false,
        };
        let mut m = Match::new();
        let mut input = String::new();
        let (next, need_more) = step(&data, None, 0, &mut m, &mut input).unwrap();
        assert_eq!(next, Some(0));
        assert!(need_more);
    }

    #[test]
    fn position_zero_short_circuits_over_later_smaller_candidates() {
        let data = BranchData {
            cases: vec![case("b", 1), case("a", 2)],
            more_chars: false,
        };
        let mut m = Match::new();
        let mut input = "ab".to_string();
        let (next, need_more) = step(&data, None, 0, &mut m, &mut input).unwrap();
        assert!(!need_more);
        assert_eq!(next, Some(2));
        assert_eq!(input, "b");
    }

    #[test]
    fn no_match_without_default_is_a_syntax_error() {
        let data = BranchData {
            cases: vec![case("z", 1)],
            more_chars: false,
        };
        let mut m = Match::new();
        let mut input = "abc".to_string();
        let err = step(&data, None, 0, &mut m, &mut input).unwrap_err();
        assert!(matches!(err, ParseError::SyntaxError { .. }));
    }
}
