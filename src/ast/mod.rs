/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The query root, its body and the trailing modifiers
/// - expressions: Definitions for the expression variants and literals
/// - query: Definitions for `from` clauses, `take` selections and paths
/// - statements: Definitions for the mutation statements
pub mod ast;
pub mod expressions;
pub mod query;
pub mod statements;
