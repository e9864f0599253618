use crate::clause::{ClauseKind, ConstraintClause, FieldRuleSet};
use crate::error::{MalformedRuleError, Result};

/// Default maximum tag length in bytes.
pub const DEFAULT_MAX_TAG_LEN: usize = 1024;

/// Default maximum number of `oneof` members.
pub const DEFAULT_MAX_ONEOF_MEMBERS: usize = 64;

/// Size limits applied while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseLimits {
    /// Tags longer than this (in bytes) are rejected.
    pub max_tag_len: usize,
    /// `oneof` clauses with more members than this are rejected.
    pub max_oneof_members: usize,
}

impl Default for ParseLimits {
    fn default() -> Self {
        Self {
            max_tag_len: DEFAULT_MAX_TAG_LEN,
            max_oneof_members: DEFAULT_MAX_ONEOF_MEMBERS,
        }
    }
}

/// Parse a tag with default limits.
pub fn parse(tag: &str) -> Result<FieldRuleSet> {
    parse_with(tag, &ParseLimits::default())
}

/// Parse a tag into an ordered clause list.
///
/// Grammar:
/// ```text
/// tag     := clause ("," clause)*
/// clause  := keyword | keyword "=" arg
/// oneof   := "oneof=" member ("," member)*     (last clause only)
/// ```
///
/// `oneof` is variadic: every token after `oneof=` is an enumeration member.
/// A member that looks like a clause (a known keyword, or anything containing
/// `=`) is rejected rather than silently swallowed, whatever its position.
pub fn parse_with(tag: &str, limits: &ParseLimits) -> Result<FieldRuleSet> {
    if tag.len() > limits.max_tag_len {
        return Err(MalformedRuleError::TooLong {
            len: tag.len(),
            max: limits.max_tag_len,
        });
    }
    if tag.is_empty() {
        return Err(MalformedRuleError::Empty);
    }

    let tokens: Vec<&str> = tag.split(',').collect();
    let mut clauses: Vec<ConstraintClause> = Vec::with_capacity(tokens.len());
    let mut idx = 0;

    while idx < tokens.len() {
        let token = tokens[idx];
        let position = idx + 1;
        if token.is_empty() {
            return Err(MalformedRuleError::EmptyClause { position });
        }

        let (keyword, arg) = split_clause(token);
        let kind = ClauseKind::from_keyword(keyword).ok_or_else(|| {
            MalformedRuleError::UnknownKeyword {
                keyword: keyword.to_string(),
            }
        })?;

        if clauses.iter().any(|clause| clause.kind() == kind) {
            return Err(MalformedRuleError::DuplicateClause {
                keyword: kind.keyword(),
            });
        }

        let clause = match (kind, arg) {
            (ClauseKind::OneOf, Some(first)) if !first.is_empty() => {
                let members = parse_members(first, &tokens[idx + 1..], position, limits)?;
                idx = tokens.len();
                clauses.push(ConstraintClause::one_of(members));
                continue;
            }
            (ClauseKind::Min | ClauseKind::Max, Some(raw)) if !raw.is_empty() => {
                ConstraintClause::bounded(kind, raw.to_string(), parse_bound(kind, raw)?)
            }
            (kind, None) if !kind.takes_argument() => ConstraintClause::bare(kind),
            (kind, Some(_)) if !kind.takes_argument() => {
                return Err(MalformedRuleError::UnexpectedArgument {
                    keyword: kind.keyword(),
                })
            }
            (kind, _) => {
                return Err(MalformedRuleError::MissingArgument {
                    keyword: kind.keyword(),
                })
            }
        };

        clauses.push(clause);
        idx += 1;
    }

    Ok(FieldRuleSet::new(clauses))
}

fn split_clause(token: &str) -> (&str, Option<&str>) {
    match token.split_once('=') {
        Some((keyword, arg)) => (keyword, Some(arg)),
        None => (token, None),
    }
}

fn parse_bound(kind: ClauseKind, raw: &str) -> Result<u64> {
    // `u64::from_str` accepts a leading `+`; the grammar does not.
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid_integer(kind, raw));
    }
    raw.parse::<u64>().map_err(|_| invalid_integer(kind, raw))
}

fn invalid_integer(kind: ClauseKind, raw: &str) -> MalformedRuleError {
    MalformedRuleError::InvalidInteger {
        keyword: kind.keyword(),
        value: raw.to_string(),
    }
}

fn parse_members(
    first: &str,
    rest: &[&str],
    position: usize,
    limits: &ParseLimits,
) -> Result<Vec<String>> {
    let count = rest.len() + 1;
    if count > limits.max_oneof_members {
        return Err(MalformedRuleError::TooManyMembers {
            count,
            max: limits.max_oneof_members,
        });
    }

    let mut members = Vec::with_capacity(count);
    let tokens = std::iter::once(&first).chain(rest);

    for (offset, token) in tokens.enumerate() {
        if token.is_empty() {
            return Err(MalformedRuleError::EmptyClause {
                position: position + offset,
            });
        }
        if looks_like_clause(token) {
            return Err(MalformedRuleError::OneOfNotLast {
                found: (*token).to_string(),
            });
        }
        members.push((*token).to_string());
    }

    Ok(members)
}

fn looks_like_clause(token: &str) -> bool {
    let (keyword, arg) = split_clause(token);
    arg.is_some() || ClauseKind::from_keyword(keyword).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause::Format;

    fn kinds(set: &FieldRuleSet) -> Vec<ClauseKind> {
        set.iter().map(|clause| clause.kind()).collect()
    }

    #[test]
    fn parses_required_then_max_in_order() {
        let set = parse("required,max=255").unwrap();
        assert_eq!(kinds(&set), vec![ClauseKind::Required, ClauseKind::Max]);
        assert_eq!(set.clauses()[1].bound(), Some(255));
        assert_eq!(set.clauses()[1].args(), ["255".to_string()]);
    }

    #[test]
    fn oneof_consumes_remaining_tokens() {
        let set = parse("required,oneof=x,y,z").unwrap();
        assert_eq!(kinds(&set), vec![ClauseKind::Required, ClauseKind::OneOf]);
        assert_eq!(set.clauses()[1].members(), ["x", "y", "z"].map(String::from));
    }

    #[test]
    fn oneof_single_member() {
        let set = parse("oneof=only").unwrap();
        assert_eq!(set.clauses()[0].members(), ["only".to_string()]);
    }

    #[test]
    fn oneof_not_last_is_rejected() {
        assert_eq!(
            parse("oneof=x,required"),
            Err(MalformedRuleError::OneOfNotLast {
                found: "required".to_string()
            })
        );
        assert!(matches!(
            parse("oneof=a,b,max=3"),
            Err(MalformedRuleError::OneOfNotLast { .. })
        ));
        assert!(matches!(
            parse("oneof=a,b=c"),
            Err(MalformedRuleError::OneOfNotLast { .. })
        ));
    }

    #[test]
    fn oneof_members_follow_one_rule_in_any_order() {
        for tag in ["oneof=email,phone", "oneof=phone,email"] {
            assert_eq!(
                parse(tag),
                Err(MalformedRuleError::OneOfNotLast {
                    found: "email".to_string()
                }),
                "{tag}"
            );
        }
        for tag in ["oneof=a=b", "oneof=x,a=b"] {
            assert_eq!(
                parse(tag),
                Err(MalformedRuleError::OneOfNotLast {
                    found: "a=b".to_string()
                }),
                "{tag}"
            );
        }
        assert_eq!(
            parse("oneof=phone,sms").unwrap().clauses()[0].members(),
            ["phone", "sms"].map(String::from)
        );
    }

    #[test]
    fn oneof_members_are_case_preserved() {
        let set = parse("oneof=Audio,VIDEO").unwrap();
        assert_eq!(set.clauses()[0].members(), ["Audio", "VIDEO"].map(String::from));
    }

    #[test]
    fn format_keywords_are_bare() {
        let set = parse("required,jwt").unwrap();
        assert_eq!(
            kinds(&set),
            vec![ClauseKind::Required, ClauseKind::Format(Format::Jwt)]
        );
        assert_eq!(
            parse("email=strict"),
            Err(MalformedRuleError::UnexpectedArgument { keyword: "email" })
        );
        assert_eq!(
            parse("required=true"),
            Err(MalformedRuleError::UnexpectedArgument {
                keyword: "required"
            })
        );
    }

    #[test]
    fn unknown_keyword_is_rejected() {
        assert_eq!(
            parse("required,len=3"),
            Err(MalformedRuleError::UnknownKeyword {
                keyword: "len".to_string()
            })
        );
        assert!(matches!(
            parse(" required"),
            Err(MalformedRuleError::UnknownKeyword { .. })
        ));
    }

    #[test]
    fn bounds_must_be_non_negative_integers() {
        for bad in ["max=-1", "max=+3", "min=3.5", "min=abc", "max=99999999999999999999"] {
            assert!(
                matches!(parse(bad), Err(MalformedRuleError::InvalidInteger { .. })),
                "{bad} should fail"
            );
        }
        assert_eq!(parse("min=0").unwrap().clauses()[0].bound(), Some(0));
    }

    #[test]
    fn missing_arguments_are_rejected() {
        for (tag, keyword) in [("max", "max"), ("min=", "min"), ("oneof=", "oneof"), ("oneof", "oneof")] {
            assert_eq!(
                parse(tag),
                Err(MalformedRuleError::MissingArgument { keyword }),
                "{tag}"
            );
        }
    }

    #[test]
    fn empty_tokens_are_rejected() {
        assert_eq!(parse(""), Err(MalformedRuleError::Empty));
        assert_eq!(
            parse("required,,max=3"),
            Err(MalformedRuleError::EmptyClause { position: 2 })
        );
        assert_eq!(
            parse("max=3,"),
            Err(MalformedRuleError::EmptyClause { position: 2 })
        );
        assert_eq!(
            parse("oneof=a,,b"),
            Err(MalformedRuleError::EmptyClause { position: 2 })
        );
    }

    #[test]
    fn duplicate_keywords_are_rejected() {
        assert_eq!(
            parse("min=1,max=4,min=2"),
            Err(MalformedRuleError::DuplicateClause { keyword: "min" })
        );
    }

    #[test]
    fn limits_are_enforced() {
        let limits = ParseLimits {
            max_tag_len: 8,
            ..ParseLimits::default()
        };
        assert_eq!(
            parse_with("required,max=255", &limits),
            Err(MalformedRuleError::TooLong { len: 16, max: 8 })
        );

        let limits = ParseLimits {
            max_oneof_members: 2,
            ..ParseLimits::default()
        };
        assert!(parse_with("oneof=a,b", &limits).is_ok());
        assert_eq!(
            parse_with("oneof=a,b,c", &limits),
            Err(MalformedRuleError::TooManyMembers { count: 3, max: 2 })
        );
    }

    #[test]
    fn display_round_trips_accepted_tags() {
        for tag in ["required", "required,max=255", "min=1,max=4,oneof=a,b"] {
            assert_eq!(parse(tag).unwrap().to_string(), tag);
        }
    }
}
