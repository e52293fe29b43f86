use std::fmt::Display;

// LITERALS

/// Literal value carried by number, string and boolean tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Integer(i64),
    Float(f64),
    String(String),
    Boolean(bool),
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::Integer(value) => write!(f, "{}", value),
            Literal::Float(value) => write!(f, "{}", value),
            Literal::String(value) => write!(f, "{:?}", value),
            Literal::Boolean(value) => write!(f, "{}", value),
        }
    }
}

// OPERATORS

/// Binary operators. They all share one precedence level and fold left to
/// right, so `1 + 2 * 3` is `(1 + 2) * 3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    And,
    Or,
}

impl BinaryOperator {
    pub fn from_symbol(symbol: &str) -> Option<BinaryOperator> {
        match symbol {
            "+" => Some(BinaryOperator::Add),
            "-" => Some(BinaryOperator::Subtract),
            "*" => Some(BinaryOperator::Multiply),
            "/" => Some(BinaryOperator::Divide),
            "%" => Some(BinaryOperator::Modulo),
            "==" => Some(BinaryOperator::Equal),
            "!=" => Some(BinaryOperator::NotEqual),
            "<" => Some(BinaryOperator::Less),
            "<=" => Some(BinaryOperator::LessEqual),
            ">" => Some(BinaryOperator::Greater),
            ">=" => Some(BinaryOperator::GreaterEqual),
            "&&" => Some(BinaryOperator::And),
            "||" => Some(BinaryOperator::Or),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::Less => "<",
            BinaryOperator::LessEqual => "<=",
            BinaryOperator::Greater => ">",
            BinaryOperator::GreaterEqual => ">=",
            BinaryOperator::And => "&&",
            BinaryOperator::Or => "||",
        }
    }
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Built-in functions callable from expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinFunction {
    Count,
    Exists,
}

// EXPRESSIONS

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Field reference. Arrow chains collapse into one path, e.g.
    /// `leadDeveloper->studio->country`.
    Identifier(String),
    Literal(Literal),
    Binary {
        left: Box<Expr>,
        operator: BinaryOperator,
        right: Box<Expr>,
    },
    /// `if <condition> then <then_branch> else <else_branch>`
    Conditional {
        condition: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    /// `count(...)` or `exists(...)` with at most one argument
    FunctionCall {
        function: BuiltinFunction,
        argument: Option<Box<Expr>>,
    },
}

impl Expr {
    pub fn identifier(path: &str) -> Expr {
        Expr::Identifier(path.to_string())
    }

    pub fn integer(value: i64) -> Expr {
        Expr::Literal(Literal::Integer(value))
    }

    pub fn string(value: &str) -> Expr {
        Expr::Literal(Literal::String(value.to_string()))
    }

    pub fn binary(left: Expr, operator: BinaryOperator, right: Expr) -> Expr {
        Expr::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }
}
