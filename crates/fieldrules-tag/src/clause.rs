use std::fmt;

/// Structural format checks that take no arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Three dot-separated base64url segments; header and payload decode to JSON objects.
    Jwt,
    /// A plausible `local@domain.tld` address.
    Email,
    /// Canonical hyphenated UUID text (8-4-4-4-12 hex digits).
    Uuid,
}

impl Format {
    pub const ALL: [Format; 3] = [Format::Jwt, Format::Email, Format::Uuid];

    /// Keyword used in tags and reported as the violated rule.
    pub fn keyword(self) -> &'static str {
        match self {
            Format::Jwt => "jwt",
            Format::Email => "email",
            Format::Uuid => "uuid",
        }
    }
}

/// The kind of a parsed clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClauseKind {
    Required,
    Min,
    Max,
    OneOf,
    Format(Format),
}

impl ClauseKind {
    /// Resolve a tag keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "required" => Some(ClauseKind::Required),
            "min" => Some(ClauseKind::Min),
            "max" => Some(ClauseKind::Max),
            "oneof" => Some(ClauseKind::OneOf),
            other => Format::ALL
                .into_iter()
                .find(|format| format.keyword() == other)
                .map(ClauseKind::Format),
        }
    }

    /// Keyword used in tags and reported as the violated rule.
    pub fn keyword(self) -> &'static str {
        match self {
            ClauseKind::Required => "required",
            ClauseKind::Min => "min",
            ClauseKind::Max => "max",
            ClauseKind::OneOf => "oneof",
            ClauseKind::Format(format) => format.keyword(),
        }
    }

    pub(crate) fn takes_argument(self) -> bool {
        matches!(self, ClauseKind::Min | ClauseKind::Max | ClauseKind::OneOf)
    }
}

/// One parsed constraint: a keyword plus its arguments.
///
/// Clauses are only built by the parser, so `min`/`max` always carry exactly
/// one valid integer argument and `oneof` at least one member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintClause {
    kind: ClauseKind,
    args: Vec<String>,
    bound: Option<u64>,
}

impl ConstraintClause {
    pub(crate) fn bare(kind: ClauseKind) -> Self {
        Self {
            kind,
            args: Vec::new(),
            bound: None,
        }
    }

    pub(crate) fn bounded(kind: ClauseKind, raw: String, bound: u64) -> Self {
        Self {
            kind,
            args: vec![raw],
            bound: Some(bound),
        }
    }

    pub(crate) fn one_of(members: Vec<String>) -> Self {
        Self {
            kind: ClauseKind::OneOf,
            args: members,
            bound: None,
        }
    }

    pub fn kind(&self) -> ClauseKind {
        self.kind
    }

    /// Rule name reported in violations (`"required"`, `"max"`, `"jwt"`, ...).
    pub fn rule(&self) -> &'static str {
        self.kind.keyword()
    }

    /// Arguments in tag order. Empty for bare keywords.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Numeric argument of a `min`/`max` clause.
    pub fn bound(&self) -> Option<u64> {
        self.bound
    }

    /// Enumeration members of a `oneof` clause; empty for other kinds.
    pub fn members(&self) -> &[String] {
        match self.kind {
            ClauseKind::OneOf => &self.args,
            _ => &[],
        }
    }
}

impl fmt::Display for ConstraintClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.args.is_empty() {
            f.write_str(self.rule())
        } else {
            write!(f, "{}={}", self.rule(), self.args.join(","))
        }
    }
}

/// Ordered clauses attached to one field. Order is evaluation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldRuleSet {
    clauses: Vec<ConstraintClause>,
}

impl FieldRuleSet {
    pub(crate) fn new(clauses: Vec<ConstraintClause>) -> Self {
        Self { clauses }
    }

    pub fn clauses(&self) -> &[ConstraintClause] {
        &self.clauses
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ConstraintClause> {
        self.clauses.iter()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Whether the set contains a `required` clause.
    pub fn is_required(&self) -> bool {
        self.clauses
            .iter()
            .any(|clause| clause.kind == ClauseKind::Required)
    }
}

impl<'a> IntoIterator for &'a FieldRuleSet {
    type Item = &'a ConstraintClause;
    type IntoIter = std::slice::Iter<'a, ConstraintClause>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.iter()
    }
}

impl fmt::Display for FieldRuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, clause) in self.clauses.iter().enumerate() {
            if idx > 0 {
                f.write_str(",")?;
            }
            write!(f, "{clause}")?;
        }
        Ok(())
    }
}
