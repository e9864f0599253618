/// Errors produced while parsing a constraint tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedRuleError {
    /// The tag contains no clauses.
    #[error("empty rule tag")]
    Empty,

    /// The tag exceeds the configured length limit.
    #[error("rule tag too long ({len} bytes, max {max})")]
    TooLong { len: usize, max: usize },

    /// A comma-separated token is empty (e.g. `required,,max=3`).
    #[error("empty clause at position {position}")]
    EmptyClause { position: usize },

    /// The clause keyword is not recognized.
    #[error("unknown rule keyword `{keyword}`")]
    UnknownKeyword { keyword: String },

    /// A keyword that needs an argument was given none.
    #[error("rule `{keyword}` requires an argument")]
    MissingArgument { keyword: &'static str },

    /// A bare keyword was given an argument.
    #[error("rule `{keyword}` takes no argument")]
    UnexpectedArgument { keyword: &'static str },

    /// A `min`/`max` argument is not a non-negative integer.
    #[error("rule `{keyword}` expects a non-negative integer, got `{value}`")]
    InvalidInteger { keyword: &'static str, value: String },

    /// A `oneof` member spells a clause. `oneof` must be the last clause of a
    /// tag, so such a token is read as a misplaced clause wherever it appears.
    #[error("`oneof` must be the last clause and its members cannot spell a rule (found `{found}`)")]
    OneOfNotLast { found: String },

    /// `oneof` lists more members than the configured limit.
    #[error("`oneof` has too many members ({count}, max {max})")]
    TooManyMembers { count: usize, max: usize },

    /// The same rule keyword appears twice in one tag.
    #[error("rule `{keyword}` appears more than once")]
    DuplicateClause { keyword: &'static str },
}

pub type Result<T> = std::result::Result<T, MalformedRuleError>;
