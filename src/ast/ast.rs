use super::{
    query::{QueryFrom, QueryTake},
    statements::Statement,
};

/// Query Root
///
/// The result of parsing one source text: either a read query or a mutation,
/// followed by its `order by`/`limit` modifiers in the order they were written.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryRoot {
    pub body: QueryBody,
    pub modifiers: Vec<Modifier>,
}

impl QueryRoot {
    /// The effective ordering. When several `order by` clauses were written the
    /// last one wins.
    pub fn order_by(&self) -> Option<&OrderByModifier> {
        self.modifiers.iter().rev().find_map(|modifier| match modifier {
            Modifier::OrderBy(order) => Some(order),
            Modifier::Limit(_) => None,
        })
    }

    /// The effective row limit. When several `limit` clauses were written the
    /// last one wins.
    pub fn limit(&self) -> Option<usize> {
        self.modifiers.iter().rev().find_map(|modifier| match modifier {
            Modifier::Limit(limit) => Some(limit.count),
            Modifier::OrderBy(_) => None,
        })
    }

    pub fn is_query(&self) -> bool {
        matches!(self.body, QueryBody::Query { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryBody {
    /// `from <source> [where ...] take ...`
    Query { from: QueryFrom, take: QueryTake },
    /// `add`, `remove`, `update`, `create table` or `drop table`
    Mutation(Statement),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Modifier {
    OrderBy(OrderByModifier),
    Limit(LimitModifier),
}

/// `order by <field> [descending]`
#[derive(Debug, Clone, PartialEq)]
pub struct OrderByModifier {
    pub field: String,
    pub descending: bool,
}

/// `limit <count>`
#[derive(Debug, Clone, PartialEq)]
pub struct LimitModifier {
    pub count: usize,
}
