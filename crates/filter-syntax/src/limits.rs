use crate::{
    ast::{Combinator, FilterOp},
    errors::{FilterIssue, FilterIssueKind, FilterIssues, LimitError},
    path::FilterPath,
    schema::FieldSchema,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

pub const DEFAULT_MAX_DEPTH: usize = 10;
pub const DEFAULT_MAX_OPERATIONS: usize = 1000;

/// Upper bounds applied to a single parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserLimits {
    /// Maximum number of nested operator lists (`$and`/`$or`)
    pub max_depth: usize,
    /// Maximum number of nodes built, also the maximum entries of any
    /// mapping, top-level list or operator list
    pub max_operations: usize,
}

impl ParserLimits {
    pub fn new(max_depth: usize, max_operations: usize) -> Self {
        Self {
            max_depth,
            max_operations,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_operations(mut self, max_operations: usize) -> Self {
        self.max_operations = max_operations;
        self
    }
}

impl Default for ParserLimits {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH, DEFAULT_MAX_OPERATIONS)
    }
}

/// State of one parse call: counters and collected issues.
///
/// A context is created per call and dropped with it, so parses never share
/// mutable state.
pub struct ParseContext<'a, S: FieldSchema + ?Sized> {
    schema: &'a S,
    limits: ParserLimits,
    depth: usize,
    operations: usize,
    issues: FilterIssues,
}

impl<'a, S: FieldSchema + ?Sized> ParseContext<'a, S> {
    pub fn new(schema: &'a S, limits: ParserLimits) -> Self {
        Self {
            schema,
            limits,
            depth: 0,
            operations: 0,
            issues: FilterIssues::new(),
        }
    }

    pub fn schema(&self) -> &'a S {
        self.schema
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn operations(&self) -> usize {
        self.operations
    }

    /// Enter an operator member list. Checked before descending.
    pub fn descend(&mut self) -> Result<(), LimitError> {
        if self.depth >= self.limits.max_depth {
            warn!(
                "Filter nesting exceeds the maximum depth of {}",
                self.limits.max_depth
            );
            return Err(LimitError::NestingTooDeep {
                max: self.limits.max_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }

    pub fn ascend(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Reject mappings and lists with more entries than operations allowed.
    pub fn check_width(&self, count: usize) -> Result<(), LimitError> {
        if count > self.limits.max_operations {
            warn!(
                "Filter list or mapping holds {} entries, maximum is {}",
                count, self.limits.max_operations
            );
            return Err(LimitError::TooManyMembers {
                count,
                max: self.limits.max_operations,
            });
        }
        Ok(())
    }

    fn count_operation(&mut self) -> Result<(), LimitError> {
        self.operations += 1;
        if self.operations > self.limits.max_operations {
            warn!(
                "Filter exceeds the maximum of {} operations",
                self.limits.max_operations
            );
            return Err(LimitError::TooManyOperations {
                max: self.limits.max_operations,
            });
        }
        Ok(())
    }

    /// Build a comparison node, counting it against the operation limit.
    pub fn leaf(&mut self, field: &str, op: &str, value: Value) -> Result<FilterOp, LimitError> {
        self.count_operation()?;
        Ok(FilterOp::field(field, op, value))
    }

    /// Combine nodes under `kind`, keeping the count equal to the nodes that
    /// remain in the tree.
    ///
    /// Same-kind children are spliced away and stop counting. The combinator
    /// itself counts only when at least two children remain after splicing.
    pub fn combine(
        &mut self,
        kind: Combinator,
        children: Vec<FilterOp>,
    ) -> Result<Option<FilterOp>, LimitError> {
        let spliced = children
            .iter()
            .filter(|child| child.combinator() == Some(kind))
            .count();
        let remaining: usize = children
            .iter()
            .map(|child| match child.children() {
                Some(grandchildren) if child.combinator() == Some(kind) => grandchildren.len(),
                _ => 1,
            })
            .sum();

        self.operations = self.operations.saturating_sub(spliced);
        if remaining > 1 {
            self.count_operation()?;
        }
        Ok(FilterOp::combine(kind, children))
    }

    pub fn report(&mut self, kind: FilterIssueKind, path: FilterPath) {
        self.issues.add_error(FilterIssue::new(kind, path));
    }

    pub fn has_errors(&self) -> bool {
        self.issues.has_errors()
    }

    pub fn into_issues(self) -> FilterIssues {
        self.issues
    }
}
