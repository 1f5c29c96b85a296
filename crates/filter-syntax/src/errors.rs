use crate::{ast::Combinator, path::FilterPath};
use std::{collections::BTreeMap, fmt};
use thiserror::Error;

/// Key under which every filter error is reported to callers.
pub const ERROR_KEY: &str = "filters";

/// Type of validation issue found while walking the filter input
#[derive(Debug, Clone, PartialEq)]
pub enum FilterIssueKind {
    // Operator keys
    UnknownOperator { key: String },
    OperatorValueNotList { value: String },
    EmptyOperator { key: String },

    // Operator members
    MemberNotMapping { value: String },
    EmptyMember,
    MemberMultipleKeys { keys: Vec<String> },

    // Fields
    UnknownField { field: String },
    EmptyFieldOperators { field: String },
    CombinatorAsFieldOperator { field: String, op: String },
}

impl fmt::Display for FilterIssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterIssueKind::UnknownOperator { key } => {
                write!(
                    f,
                    "Unknown operators (must be one of {}): {}",
                    Combinator::known_keys(),
                    key
                )
            }
            FilterIssueKind::OperatorValueNotList { value } => {
                write!(f, "Filter operations must be defined as a list of dicts: {value}")
            }
            FilterIssueKind::EmptyOperator { key } => {
                write!(f, "Filter operations cannot be empty: {key}")
            }
            FilterIssueKind::MemberNotMapping { value } => {
                write!(f, "Filter operation members must be dictionaries: {value}")
            }
            FilterIssueKind::EmptyMember => {
                write!(f, "Filter operation members cannot be empty")
            }
            FilterIssueKind::MemberMultipleKeys { keys } => {
                write!(
                    f,
                    "Filter operation members can only have one key: {}",
                    keys.join(", ")
                )
            }
            FilterIssueKind::UnknownField { field } => write!(f, "Unknown field: {field}"),
            FilterIssueKind::EmptyFieldOperators { field } => {
                write!(f, "No operators defined for field: {field}")
            }
            FilterIssueKind::CombinatorAsFieldOperator { field, op } => {
                write!(f, "Operator {op} cannot be used on field: {field}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterIssue {
    pub kind: FilterIssueKind,
    pub path: FilterPath,
    pub message: String,
}

impl FilterIssue {
    pub fn new(kind: FilterIssueKind, path: FilterPath) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            path,
            message,
        }
    }
}

impl fmt::Display for FilterIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at {})", self.message, self.path)
    }
}

/// Ordered collection of every issue found in one parse
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterIssues {
    pub errors: Vec<FilterIssue>,
}

impl FilterIssues {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add_error(&mut self, issue: FilterIssue) {
        self.errors.push(issue);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FilterIssue> {
        self.errors.iter()
    }

    /// Messages in the order they were found, safe to show to end users.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.message.clone()).collect()
    }

    pub fn merge(&mut self, other: FilterIssues) {
        self.errors.extend(other.errors);
    }
}

impl fmt::Display for FilterIssues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            return write!(f, "No filter issues");
        }

        let lines = self.errors.iter().map(|e| e.to_string()).collect::<Vec<_>>();
        write!(f, "{}", lines.join("\n"))
    }
}

/// Safety limits that abort a parse as soon as they are crossed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LimitError {
    #[error("Filters exceed the maximum nesting depth of {max}")]
    NestingTooDeep { max: usize },

    #[error("Filters exceed the maximum number of operations ({max})")]
    TooManyOperations { max: usize },

    #[error("Filters contain {count} entries in a single list or dict, the maximum is {max}")]
    TooManyMembers { count: usize, max: usize },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("Filters must be defined as a dict or a list of dicts")]
    InvalidShape,

    #[error(transparent)]
    Limit(#[from] LimitError),

    #[error("{0}")]
    Validation(FilterIssues),
}

impl FilterError {
    /// Structural and limit errors stop the parse on the spot; validation
    /// errors are collected over the whole input.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, FilterError::Validation(_))
    }

    pub fn issues(&self) -> Option<&FilterIssues> {
        match self {
            FilterError::Validation(issues) => Some(issues),
            _ => None,
        }
    }

    pub fn messages(&self) -> Vec<String> {
        match self {
            FilterError::Validation(issues) => issues.messages(),
            fatal => vec![fatal.to_string()],
        }
    }

    /// Error report keyed under [`ERROR_KEY`].
    pub fn error_dict(&self) -> BTreeMap<String, Vec<String>> {
        BTreeMap::from([(ERROR_KEY.to_string(), self.messages())])
    }
}

/// Errors raised when a serialized filter tree breaks the node invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AstError {
    #[error("Comparison '{0}' has no field")]
    MissingField(String),

    #[error("Combinator '{0}' must hold a list of filters")]
    ChildrenNotAList(&'static str),

    #[error("Combinator '{0}' must hold at least one filter")]
    EmptyCombinator(&'static str),

    #[error("Invalid child filter: {0}")]
    InvalidChild(String),

    #[error("Comparison on '{0}' cannot use combinator '{1}'")]
    CombinatorAsComparison(String, &'static str),
}
