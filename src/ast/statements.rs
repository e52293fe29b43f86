use super::{expressions::Expr, query::QueryFrom};

/// Mutation statements.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    CreateTable(CreateTableStatement),
    DropTable(DropTableStatement),
    Add(AddStatement),
    AddBatch(AddBatchStatement),
    Remove(RemoveStatement),
    Update(UpdateStatement),
}

/// Create Table Statement
///
/// ```text
/// create table games { id: Auto<int> pk, title: string }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTableStatement {
    /// Leading `from`/`for` clause, if one was written
    pub source: Option<QueryFrom>,
    pub name: String,
    pub fields: Vec<TableField>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableField {
    pub name: String,
    /// Type name as written, generic arguments included (`Auto<int>`)
    pub type_name: String,
    pub is_primary_key: bool,
}

/// Drop Table Statement
#[derive(Debug, Clone, PartialEq)]
pub struct DropTableStatement {
    pub source: Option<QueryFrom>,
    pub name: String,
}

/// `{ field: <expr>, ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentBlock {
    pub entries: Vec<Assignment>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub field: String,
    pub value: Expr,
}

/// Add Statement
///
/// ```text
/// add to people { name: "Bob", age: 30 }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AddStatement {
    pub source_name: Option<String>,
    pub where_clause: Option<Expr>,
    pub target: String,
    pub assignments: AssignmentBlock,
}

/// Add Batch Statement
///
/// ```text
/// add to people [ { name: "Bob" }, { name: "Eve" } ]
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AddBatchStatement {
    pub source_name: Option<String>,
    pub where_clause: Option<Expr>,
    pub target: String,
    pub blocks: Vec<AssignmentBlock>,
}

/// Remove Statement, `remove [from] <target> [where <expr>]`
#[derive(Debug, Clone, PartialEq)]
pub struct RemoveStatement {
    pub source: Option<QueryFrom>,
    pub target: String,
    pub where_clause: Option<Expr>,
}

/// Update Statement, `update [or add] { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStatement {
    pub source_name: Option<String>,
    pub where_clause: Option<Expr>,
    pub assignments: AssignmentBlock,
    /// Set by `update or add`: insert when nothing matched
    pub else_add: bool,
}
