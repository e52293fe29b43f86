use super::expressions::Expr;

/// `from <source_name> [where <expr>]`, also spelled `for <source_name> ...`
#[derive(Debug, Clone, PartialEq)]
pub struct QueryFrom {
    pub source_name: String,
    pub where_clause: Option<Expr>,
}

/// `take [path] { selection }`
#[derive(Debug, Clone, PartialEq)]
pub struct QueryTake {
    pub root_path: Option<PathExpression>,
    pub selection: SelectionBlock,
}

/// Navigation across related entities, e.g. `studio->games(year > 2000)`.
#[derive(Debug, Clone, PartialEq)]
pub struct PathExpression {
    pub segments: Vec<PathSegment>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PathSegment {
    pub field: String,
    pub filter: Option<FilterBlock>,
}

/// Parenthesized, comma-separated conditions attached to a path segment.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterBlock {
    pub conditions: Vec<Expr>,
}

/// Brace-delimited fields to retrieve, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionBlock {
    pub entries: Vec<SelectionItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectionItem {
    Entry(SelectionEntry),
    /// `* except { ... }`
    Except(SelectionExcept),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectionEntry {
    /// Field name, or `*` for every field
    pub field: String,
    pub nested: Option<SelectionBlock>,
}

impl SelectionEntry {
    pub const WILDCARD: &'static str = "*";

    pub fn is_wildcard(&self) -> bool {
        self.field == Self::WILDCARD
    }
}

/// Fields subtracted from a wildcard selection.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionExcept {
    pub block: SelectionBlock,
}
