//! Unit tests for the parser module.
//!
//! This module contains tests for parsing the language constructs:
//! - `from`/`for` clauses and `take` queries
//! - Selection blocks, except blocks and root paths
//! - Expressions (flat precedence, paths, conditionals, function calls)
//! - Mutation statements
//! - Modifiers and their duplicate policy
//! - Error cases

use crate::{
    ast::{
        ast::{LimitModifier, Modifier, OrderByModifier, QueryBody, QueryRoot},
        expressions::{BinaryOperator, BuiltinFunction, Expr, Literal},
        query::{
            FilterBlock, PathExpression, PathSegment, QueryFrom, QueryTake, SelectionBlock,
            SelectionEntry, SelectionExcept, SelectionItem,
        },
        statements::{
            AddBatchStatement, AddStatement, Assignment, AssignmentBlock, CreateTableStatement,
            DropTableStatement, RemoveStatement, Statement, TableField, UpdateStatement,
        },
    },
    errors::errors::{Error, ErrorImpl, ErrorKind},
    lexer::{lexer::Lexer, tokens::TokenKind},
};

use super::parser::parse;

fn parse_source(source: &str) -> Result<QueryRoot, Error> {
    parse(Lexer::new(source.to_string(), Some("test.tql".to_string())))
}

fn field(name: &str) -> SelectionItem {
    SelectionItem::Entry(SelectionEntry {
        field: name.to_string(),
        nested: None,
    })
}

fn nested(name: &str, entries: Vec<SelectionItem>) -> SelectionItem {
    SelectionItem::Entry(SelectionEntry {
        field: name.to_string(),
        nested: Some(SelectionBlock { entries }),
    })
}

fn assignment(name: &str, value: Expr) -> Assignment {
    Assignment {
        field: name.to_string(),
        value,
    }
}

fn query_parts(root: QueryRoot) -> (QueryFrom, QueryTake) {
    match root.body {
        QueryBody::Query { from, take } => (from, take),
        QueryBody::Mutation(statement) => panic!("expected a query, got {:?}", statement),
    }
}

fn statement(root: QueryRoot) -> Statement {
    match root.body {
        QueryBody::Mutation(statement) => statement,
        QueryBody::Query { .. } => panic!("expected a mutation"),
    }
}

fn where_clause(source: &str) -> Expr {
    let (from, _) = query_parts(parse_source(source).unwrap());
    from.where_clause.unwrap()
}

#[test]
fn test_parse_wildcard_query() {
    let root = parse_source("from people take { * }").unwrap();

    assert_eq!(
        root,
        QueryRoot {
            body: QueryBody::Query {
                from: QueryFrom {
                    source_name: "people".to_string(),
                    where_clause: None,
                },
                take: QueryTake {
                    root_path: None,
                    selection: SelectionBlock {
                        entries: vec![field("*")],
                    },
                },
            },
            modifiers: vec![],
        }
    );
}

#[test]
fn test_parse_where_and_fields() {
    let (from, take) =
        query_parts(parse_source("from people where age > 18 take { name, age }").unwrap());

    assert_eq!(from.source_name, "people");
    assert_eq!(
        from.where_clause,
        Some(Expr::binary(
            Expr::identifier("age"),
            BinaryOperator::Greater,
            Expr::integer(18)
        ))
    );
    assert_eq!(take.selection.entries, vec![field("name"), field("age")]);
}

#[test]
fn test_for_is_the_same_as_from() {
    let with_from = parse_source("from games take { title }").unwrap();
    let with_for = parse_source("FOR games take { title }").unwrap();

    assert_eq!(with_from, with_for);
}

#[test]
fn test_selection_preserves_source_order_and_nesting() {
    let (_, take) = query_parts(
        parse_source("from games take { title studio { name, country { code } }, year, }").unwrap(),
    );

    assert_eq!(
        take.selection.entries,
        vec![
            field("title"),
            nested("studio", vec![field("name"), nested("country", vec![field("code")])]),
            field("year"),
        ]
    );
}

#[test]
fn test_wildcard_except_is_an_except_entry() {
    let (_, take) =
        query_parts(parse_source("from people take { * except { password, email } }").unwrap());

    assert_eq!(
        take.selection.entries,
        vec![SelectionItem::Except(SelectionExcept {
            block: SelectionBlock {
                entries: vec![field("password"), field("email")],
            },
        })]
    );
}

#[test]
fn test_except_inside_nested_entry_is_allowed() {
    let (_, take) = query_parts(
        parse_source("from people take { name, friends { * except { age } } }").unwrap(),
    );

    match &take.selection.entries[1] {
        SelectionItem::Entry(entry) => {
            let inner = entry.nested.as_ref().unwrap();
            assert!(matches!(inner.entries[0], SelectionItem::Except(_)));
        }
        other => panic!("unexpected entry {:?}", other),
    }
}

#[test]
fn test_nested_except_is_rejected() {
    let direct = parse_source("from people take { * except { * except { a } } }").unwrap_err();
    assert_eq!(direct.get_error(), &ErrorImpl::NestedExcept);
    assert_eq!(direct.kind(), ErrorKind::Parse);

    let deep = parse_source("from people take { * except { friends { * except { b } } } }")
        .unwrap_err();
    assert_eq!(deep.get_error(), &ErrorImpl::NestedExcept);
}

#[test]
fn test_plain_wildcard_inside_except_is_allowed() {
    let (_, take) =
        query_parts(parse_source("from people take { * except { friends { * } } }").unwrap());

    assert_eq!(
        take.selection.entries,
        vec![SelectionItem::Except(SelectionExcept {
            block: SelectionBlock {
                entries: vec![nested("friends", vec![field("*")])],
            },
        })]
    );
}

#[test]
fn test_take_root_path_with_filters() {
    let (_, take) = query_parts(
        parse_source("from studios take games(rating >= 8, year > 2000)->developer { name }")
            .unwrap(),
    );

    assert_eq!(
        take.root_path,
        Some(PathExpression {
            segments: vec![
                PathSegment {
                    field: "games".to_string(),
                    filter: Some(FilterBlock {
                        conditions: vec![
                            Expr::binary(
                                Expr::identifier("rating"),
                                BinaryOperator::GreaterEqual,
                                Expr::integer(8)
                            ),
                            Expr::binary(
                                Expr::identifier("year"),
                                BinaryOperator::Greater,
                                Expr::integer(2000)
                            ),
                        ],
                    }),
                },
                PathSegment {
                    field: "developer".to_string(),
                    filter: None,
                },
            ],
        })
    );
    assert_eq!(take.selection.entries, vec![field("name")]);
}

#[test]
fn test_take_requires_selection_block() {
    let error = parse_source("from people take name").unwrap_err();

    assert_eq!(
        error.get_error(),
        &ErrorImpl::UnexpectedToken {
            expected: TokenKind::OpenCurly,
            received: TokenKind::EOF,
        }
    );
    assert_eq!(error.get_position().0, 21);
}

#[test]
fn test_take_without_source_fails() {
    let error = parse_source("take { * }").unwrap_err();

    assert_eq!(error.get_error(), &ErrorImpl::MissingQuerySource);
    assert_eq!(error.kind(), ErrorKind::Parse);
    assert_eq!(error.get_position().0, 0);
}

#[test]
fn test_binary_operators_are_flat_and_left_associative() {
    let expr = where_clause("from t where 1 + 2 * 3 take { * }");

    assert_eq!(
        expr,
        Expr::binary(
            Expr::binary(Expr::integer(1), BinaryOperator::Add, Expr::integer(2)),
            BinaryOperator::Multiply,
            Expr::integer(3)
        )
    );
}

#[test]
fn test_comparison_and_logic_share_precedence() {
    let expr = where_clause("from t where a == 1 && b take { * }");

    assert_eq!(
        expr,
        Expr::binary(
            Expr::binary(Expr::identifier("a"), BinaryOperator::Equal, Expr::integer(1)),
            BinaryOperator::And,
            Expr::identifier("b")
        )
    );
}

#[test]
fn test_arrow_chain_collapses_into_one_identifier() {
    let expr = where_clause("from games where leadDeveloper->studio->country == 'SE' take { * }");

    assert_eq!(
        expr,
        Expr::binary(
            Expr::identifier("leadDeveloper->studio->country"),
            BinaryOperator::Equal,
            Expr::string("SE")
        )
    );
}

#[test]
fn test_literal_expressions() {
    let expr = where_clause("from t where active != false || score < 2.5 take { * }");

    assert_eq!(
        expr,
        Expr::binary(
            Expr::binary(
                Expr::binary(
                    Expr::identifier("active"),
                    BinaryOperator::NotEqual,
                    Expr::Literal(Literal::Boolean(false))
                ),
                BinaryOperator::Or,
                Expr::identifier("score")
            ),
            BinaryOperator::Less,
            Expr::Literal(Literal::Float(2.5))
        )
    );
}

#[test]
fn test_conditional_expression() {
    let expr = where_clause("from t where if a > 1 then b else c + 1 take { * }");

    assert_eq!(
        expr,
        Expr::Conditional {
            condition: Box::new(Expr::binary(
                Expr::identifier("a"),
                BinaryOperator::Greater,
                Expr::integer(1)
            )),
            then_branch: Box::new(Expr::identifier("b")),
            else_branch: Box::new(Expr::binary(
                Expr::identifier("c"),
                BinaryOperator::Add,
                Expr::integer(1)
            )),
        }
    );
}

#[test]
fn test_conditional_requires_else() {
    let error = parse_source("from t where if a then b take { * }").unwrap_err();

    assert_eq!(
        error.get_error(),
        &ErrorImpl::UnexpectedToken {
            expected: TokenKind::Else,
            received: TokenKind::Take,
        }
    );
}

#[test]
fn test_function_calls() {
    let expr = where_clause("from t where count(friends) > exists() take { * }");

    assert_eq!(
        expr,
        Expr::binary(
            Expr::FunctionCall {
                function: BuiltinFunction::Count,
                argument: Some(Box::new(Expr::identifier("friends"))),
            },
            BinaryOperator::Greater,
            Expr::FunctionCall {
                function: BuiltinFunction::Exists,
                argument: None,
            }
        )
    );
}

#[test]
fn test_function_call_takes_at_most_one_argument() {
    let error = parse_source("from t where count(a, b) take { * }").unwrap_err();

    assert_eq!(
        error.get_error(),
        &ErrorImpl::UnexpectedToken {
            expected: TokenKind::CloseParen,
            received: TokenKind::Comma,
        }
    );
}

#[test]
fn test_negative_number_is_not_a_primary() {
    let error = parse_source("from t where x == -1 take { * }").unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
    assert_eq!(error.get_position().0, 18);
}

#[test]
fn test_parse_add() {
    let root = parse_source("add to people { name: \"Bob\", age: 30 }").unwrap();

    assert!(!root.is_query());
    assert_eq!(
        statement(root),
        Statement::Add(AddStatement {
            source_name: None,
            where_clause: None,
            target: "people".to_string(),
            assignments: AssignmentBlock {
                entries: vec![
                    assignment("name", Expr::string("Bob")),
                    assignment("age", Expr::integer(30)),
                ],
            },
        })
    );
}

#[test]
fn test_parse_add_batch() {
    let root = parse_source("add to people [ { name: 'Ann' }, { name: 'Eve', age: 2 + 3 } ]").unwrap();

    assert_eq!(
        statement(root),
        Statement::AddBatch(AddBatchStatement {
            source_name: None,
            where_clause: None,
            target: "people".to_string(),
            blocks: vec![
                AssignmentBlock {
                    entries: vec![assignment("name", Expr::string("Ann"))],
                },
                AssignmentBlock {
                    entries: vec![
                        assignment("name", Expr::string("Eve")),
                        assignment(
                            "age",
                            Expr::binary(Expr::integer(2), BinaryOperator::Add, Expr::integer(3))
                        ),
                    ],
                },
            ],
        })
    );
}

#[test]
fn test_add_carries_source_clause() {
    let root = parse_source("for studios where name == 'Acme' add to games { title: 'X' }").unwrap();

    match statement(root) {
        Statement::Add(add) => {
            assert_eq!(add.source_name.as_deref(), Some("studios"));
            assert!(add.where_clause.is_some());
            assert_eq!(add.target, "games");
        }
        other => panic!("unexpected statement {:?}", other),
    }
}

#[test]
fn test_parse_update_or_add() {
    let root = parse_source("update or add { score: 1 }").unwrap();

    assert_eq!(
        statement(root),
        Statement::Update(UpdateStatement {
            source_name: None,
            where_clause: None,
            assignments: AssignmentBlock {
                entries: vec![assignment("score", Expr::integer(1))],
            },
            else_add: true,
        })
    );
}

#[test]
fn test_parse_update_with_source() {
    let root = parse_source("for people where id == 7 update { age: age + 1 }").unwrap();

    assert_eq!(
        statement(root),
        Statement::Update(UpdateStatement {
            source_name: Some("people".to_string()),
            where_clause: Some(Expr::binary(
                Expr::identifier("id"),
                BinaryOperator::Equal,
                Expr::integer(7)
            )),
            assignments: AssignmentBlock {
                entries: vec![assignment(
                    "age",
                    Expr::binary(Expr::identifier("age"), BinaryOperator::Add, Expr::integer(1))
                )],
            },
            else_add: false,
        })
    );
}

#[test]
fn test_update_or_requires_add() {
    let error = parse_source("update or { a: 1 }").unwrap_err();

    assert_eq!(
        error.get_error(),
        &ErrorImpl::UnexpectedToken {
            expected: TokenKind::Add,
            received: TokenKind::OpenCurly,
        }
    );
}

#[test]
fn test_parse_remove_forms_are_equivalent() {
    let bare = parse_source("remove people where age < 18").unwrap();
    let with_from = parse_source("remove from people where age < 18").unwrap();

    assert_eq!(bare, with_from);
    assert_eq!(
        statement(bare),
        Statement::Remove(RemoveStatement {
            source: None,
            target: "people".to_string(),
            where_clause: Some(Expr::binary(
                Expr::identifier("age"),
                BinaryOperator::Less,
                Expr::integer(18)
            )),
        })
    );
}

#[test]
fn test_parse_remove_without_where() {
    let root = parse_source("remove sessions").unwrap();

    assert_eq!(
        statement(root),
        Statement::Remove(RemoveStatement {
            source: None,
            target: "sessions".to_string(),
            where_clause: None,
        })
    );
}

#[test]
fn test_parse_create_table() {
    let root =
        parse_source("create table games { id: Auto<int> PK, title: string, tags: List<string> }")
            .unwrap();

    assert_eq!(
        statement(root),
        Statement::CreateTable(CreateTableStatement {
            source: None,
            name: "games".to_string(),
            fields: vec![
                TableField {
                    name: "id".to_string(),
                    type_name: "Auto<int>".to_string(),
                    is_primary_key: true,
                },
                TableField {
                    name: "title".to_string(),
                    type_name: "string".to_string(),
                    is_primary_key: false,
                },
                TableField {
                    name: "tags".to_string(),
                    type_name: "List<string>".to_string(),
                    is_primary_key: false,
                },
            ],
        })
    );
}

#[test]
fn test_create_table_field_requires_type() {
    // `key` is read as the next field name, which then lacks `: type`
    let error = parse_source("create table t { id: int key }").unwrap_err();

    assert_eq!(
        error.get_error(),
        &ErrorImpl::UnexpectedToken {
            expected: TokenKind::Colon,
            received: TokenKind::CloseCurly,
        }
    );
    assert_eq!(error.get_position().0, 29);
}

#[test]
fn test_parse_drop_table() {
    let root = parse_source("drop table games").unwrap();

    assert_eq!(
        statement(root),
        Statement::DropTable(DropTableStatement {
            source: None,
            name: "games".to_string()
        })
    );
}

#[test]
fn test_source_clause_is_carried_by_table_statements() {
    let source = Some(QueryFrom {
        source_name: "people".to_string(),
        where_clause: None,
    });

    let root = parse_source("from people drop table people").unwrap();
    assert_eq!(
        statement(root),
        Statement::DropTable(DropTableStatement {
            source: source.clone(),
            name: "people".to_string(),
        })
    );

    let root = parse_source("from people create table t { id: int }").unwrap();
    match statement(root) {
        Statement::CreateTable(table) => {
            assert_eq!(table.source, source);
            assert_eq!(table.name, "t");
            assert_eq!(table.fields.len(), 1);
        }
        other => panic!("unexpected statement {:?}", other),
    }
}

#[test]
fn test_source_clause_is_carried_by_remove() {
    let root = parse_source("for people where id == 1 remove people where age > 3").unwrap();

    assert_eq!(
        statement(root),
        Statement::Remove(RemoveStatement {
            source: Some(QueryFrom {
                source_name: "people".to_string(),
                where_clause: Some(Expr::binary(
                    Expr::identifier("id"),
                    BinaryOperator::Equal,
                    Expr::integer(1)
                )),
            }),
            target: "people".to_string(),
            where_clause: Some(Expr::binary(
                Expr::identifier("age"),
                BinaryOperator::Greater,
                Expr::integer(3)
            )),
        })
    );
}

#[test]
fn test_parse_modifiers_in_order() {
    let root = parse_source("from people take { * } order by age descending limit 10").unwrap();

    assert_eq!(
        root.modifiers,
        vec![
            Modifier::OrderBy(OrderByModifier {
                field: "age".to_string(),
                descending: true,
            }),
            Modifier::Limit(LimitModifier { count: 10 }),
        ]
    );
}

#[test]
fn test_modifiers_interleave_and_last_wins() {
    let root =
        parse_source("from people take { * } limit 5 order by age limit 2 order by age descending")
            .unwrap();

    assert_eq!(root.modifiers.len(), 4);
    assert_eq!(root.limit(), Some(2));
    assert_eq!(
        root.order_by(),
        Some(&OrderByModifier {
            field: "age".to_string(),
            descending: true,
        })
    );
}

#[test]
fn test_conflicting_order_by_fails() {
    let error = parse_source("from people take { * } order by age order by name").unwrap_err();

    assert_eq!(
        error.get_error(),
        &ErrorImpl::ConflictingOrderBy {
            first: "age".to_string(),
            second: "name".to_string(),
        }
    );
    assert_eq!(error.get_position().0, 45);
}

#[test]
fn test_modifiers_apply_to_mutations() {
    let root = parse_source("remove logs limit 100").unwrap();

    assert_eq!(root.limit(), Some(100));
    assert_eq!(root.order_by(), None);
}

#[test]
fn test_limit_must_be_whole_number() {
    let error = parse_source("from people take { * } limit 2.5").unwrap_err();

    assert_eq!(
        error.get_error(),
        &ErrorImpl::InvalidLimit {
            token: "2.5".to_string()
        }
    );
}

#[test]
fn test_trailing_tokens_are_rejected() {
    let error = parse_source("from people take { * } name").unwrap_err();

    assert_eq!(
        error.get_error(),
        &ErrorImpl::UnexpectedTokenDetailed {
            token: "name".to_string(),
            message: "expected `order by`, `limit` or end of input".to_string(),
        }
    );
}

#[test]
fn test_unknown_leading_keyword_fails() {
    let error = parse_source("where x take { * }").unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
    assert_eq!(error.get_position().0, 0);
}

#[test]
fn test_expect_reports_expected_and_actual() {
    let error = parse_source("from take { * }").unwrap_err();

    assert_eq!(
        error.get_error(),
        &ErrorImpl::UnexpectedToken {
            expected: TokenKind::Identifier,
            received: TokenKind::Take,
        }
    );
    assert_eq!(error.to_string(), "expected Identifier, got Take at offset 5");
}

#[test]
fn test_unclosed_selection_fails_at_eof() {
    let error = parse_source("from people take { name").unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
    assert_eq!(error.get_position().0, 23);
}

#[test]
fn test_keyword_as_field_name_fails() {
    let error = parse_source("from people take { name, limit }").unwrap_err();

    assert_eq!(
        error.get_error(),
        &ErrorImpl::UnexpectedTokenDetailed {
            token: "limit".to_string(),
            message: "keywords cannot be used as field names".to_string(),
        }
    );
    assert_eq!(error.get_position().0, 25);

    let error = parse_source("update { to: 1 }").unwrap_err();
    assert_eq!(error.get_position().0, 9);
}

#[test]
fn test_lex_errors_surface_through_parse() {
    let error = parse_source("from people take { name; }").unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Lex);
    assert_eq!(error.get_position().0, 23);
}

#[test]
fn test_empty_input_fails() {
    let error = parse_source("").unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Parse);
}
