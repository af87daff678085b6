use std::rc::Rc;

/// Deepest syntax tree the parser produces and the image codec accepts.
///
/// A leaf has depth 1, and every node is one deeper than its deepest child.
/// The program's root block counts.
pub const MAX_NESTING: usize = 10_000;

/// An operator appearing in a [`Node::BinaryOp`].
///
/// The set is closed. Every operator has a textual symbol, which is also the
/// form stored in AST images.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Operator {
    /// Addition or string concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Logical and (`&&`)
    And,
    /// Logical or (`||`)
    Or,
    /// Logical not (`!`). The only operator without a right operand.
    Not,
}

impl Operator {
    /// All operators, in a fixed order.
    pub const ALL: [Self; 13] = [Self::Add,
                                 Self::Sub,
                                 Self::Mul,
                                 Self::Div,
                                 Self::Less,
                                 Self::Greater,
                                 Self::LessEqual,
                                 Self::GreaterEqual,
                                 Self::Equal,
                                 Self::NotEqual,
                                 Self::And,
                                 Self::Or,
                                 Self::Not];

    /// Returns the textual symbol of the operator.
    ///
    /// # Example
    /// ```
    /// use splice::ast::Operator;
    ///
    /// assert_eq!(Operator::LessEqual.symbol(), "<=");
    /// ```
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::And => "&&",
            Self::Or => "||",
            Self::Not => "!",
        }
    }

    /// Looks an operator up by its symbol.
    ///
    /// # Example
    /// ```
    /// use splice::ast::Operator;
    ///
    /// assert_eq!(Operator::from_symbol("&&"), Some(Operator::And));
    /// assert_eq!(Operator::from_symbol("^"), None);
    /// ```
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A user-defined function.
///
/// The definition node is shared between the syntax tree and the function
/// table, so registering a function never copies its body.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    /// The name of the function.
    pub name:   String,
    /// The parameter names, in declaration order.
    pub params: Vec<String>,
    /// The body, normally a [`Node::Block`].
    pub body:   Node,
}

/// An abstract syntax tree node.
///
/// One enum covers both expressions and statements. Statement-like nodes may
/// still appear where a value is expected. The evaluator then runs them and
/// yields zero.
///
/// Children are owned exclusively by their parent, which keeps the tree
/// acyclic. Optional children (`right` of a unary operation, the `else`
/// branch, a bare `return`) are modelled with `Option`.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Numeric literal. `true` and `false` are lowered to `1` and `0`.
    Number(f64),
    /// String literal.
    Str(String),
    /// Variable reference.
    Identifier(String),
    /// Binary operation, or unary `!` when `right` is `None`.
    BinaryOp {
        /// The operator.
        op:    Operator,
        /// Left operand (the only operand of `!`).
        left:  Box<Self>,
        /// Right operand.
        right: Option<Box<Self>>,
    },
    /// `let name = value`
    Let {
        /// Name of the variable.
        name:  String,
        /// Value expression.
        value: Box<Self>,
    },
    /// `name = value`
    Assign {
        /// Name of the variable.
        name:  String,
        /// Value expression.
        value: Box<Self>,
    },
    /// `print expr`
    Print(Box<Self>),
    /// `read(path)`
    Read(Box<Self>),
    /// `write(path, value)`
    Write {
        /// Path expression.
        path:  Box<Self>,
        /// Content expression.
        value: Option<Box<Self>>,
    },
    /// `raise expr`
    Raise(Box<Self>),
    /// `warn expr`
    Warn(Box<Self>),
    /// `info expr`
    Info(Box<Self>),
    /// `while condition body`
    While {
        /// Loop condition, re-evaluated before every iteration.
        condition: Box<Self>,
        /// Loop body.
        body:      Box<Self>,
    },
    /// `if condition then [else else]`. `else if` chains nest.
    If {
        /// The condition.
        condition:   Box<Self>,
        /// Executed when the condition is nonzero.
        then_branch: Box<Self>,
        /// Executed otherwise.
        else_branch: Option<Box<Self>>,
    },
    /// A sequence of statements.
    Block(Vec<Self>),
    /// `func name(params) { body }`
    FuncDef(Rc<FunctionDef>),
    /// `name(args)`
    Call {
        /// Name of the function being called.
        name: String,
        /// Argument expressions.
        args: Vec<Self>,
    },
    /// `return [expr]`
    Return(Option<Box<Self>>),
    /// `import "path"`
    Import(String),
    /// `for var in start . end { body }`, inclusive on both ends.
    For {
        /// Loop variable.
        var:   String,
        /// First value.
        start: Box<Self>,
        /// Last value.
        end:   Box<Self>,
        /// Loop body.
        body:  Box<Self>,
    },
    /// `[a, b, c]`
    ArrayLiteral(Vec<Self>),
    /// `target[index]`
    Index {
        /// The indexed expression.
        target: Box<Self>,
        /// The index expression.
        index:  Box<Self>,
    },
    /// `target[index] = value`
    IndexAssign {
        /// The array being written, an identifier when produced by the parser.
        target: Box<Self>,
        /// The index expression.
        index:  Box<Self>,
        /// Value expression.
        value:  Box<Self>,
    },
}

impl Node {
    /// Returns a short, human readable name of the node kind.
    ///
    /// Used in diagnostics and decoder errors.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Str(_) => "string",
            Self::Identifier(_) => "identifier",
            Self::BinaryOp { .. } => "binary operation",
            Self::Let { .. } => "let",
            Self::Assign { .. } => "assignment",
            Self::Print(_) => "print",
            Self::Read(_) => "read",
            Self::Write { .. } => "write",
            Self::Raise(_) => "raise",
            Self::Warn(_) => "warn",
            Self::Info(_) => "info",
            Self::While { .. } => "while",
            Self::If { .. } => "if",
            Self::Block(_) => "block",
            Self::FuncDef(_) => "function definition",
            Self::Call { .. } => "call",
            Self::Return(_) => "return",
            Self::Import(_) => "import",
            Self::For { .. } => "for",
            Self::ArrayLiteral(_) => "array literal",
            Self::Index { .. } => "index",
            Self::IndexAssign { .. } => "index assignment",
        }
    }

    /// Calls `f` with every direct child, in field order.
    pub fn for_each_child<'a>(&'a self, mut f: impl FnMut(&'a Self)) {
        match self {
            Self::Number(_) | Self::Str(_) | Self::Identifier(_) | Self::Import(_) => {},
            Self::BinaryOp { left, right, .. } => {
                f(left);
                if let Some(right) = right {
                    f(right);
                }
            },
            Self::Let { value, .. }
            | Self::Assign { value, .. }
            | Self::Print(value)
            | Self::Read(value)
            | Self::Raise(value)
            | Self::Warn(value)
            | Self::Info(value) => f(value),
            Self::Write { path, value } => {
                f(path);
                if let Some(value) = value {
                    f(value);
                }
            },
            Self::While { condition, body } => {
                f(condition);
                f(body);
            },
            Self::If { condition,
                       then_branch,
                       else_branch, } => {
                f(condition);
                f(then_branch);
                if let Some(else_branch) = else_branch {
                    f(else_branch);
                }
            },
            Self::Block(nodes) | Self::ArrayLiteral(nodes) | Self::Call { args: nodes, .. } => {
                nodes.iter().for_each(f);
            },
            Self::FuncDef(def) => f(&def.body),
            Self::Return(value) => {
                if let Some(value) = value {
                    f(value);
                }
            },
            Self::For { start, end, body, .. } => {
                f(start);
                f(end);
                f(body);
            },
            Self::Index { target, index } => {
                f(target);
                f(index);
            },
            Self::IndexAssign { target, index, value } => {
                f(target);
                f(index);
                f(value);
            },
        }
    }

    /// Returns the depth of the tree rooted at this node.
    ///
    /// The tree is walked with an explicit work list, so arbitrarily deep
    /// trees can be measured without recursion.
    ///
    /// # Example
    /// ```
    /// use splice::ast::Node;
    ///
    /// let leaf = Node::Number(1.0);
    /// let print = Node::Print(Box::new(leaf.clone()));
    ///
    /// assert_eq!(leaf.depth(), 1);
    /// assert_eq!(Node::Block(vec![print, leaf]).depth(), 3);
    /// ```
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self, 1)];

        while let Some((node, depth)) = pending.pop() {
            deepest = deepest.max(depth);
            node.for_each_child(|child| pending.push((child, depth + 1)));
        }

        deepest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_follows_the_deepest_branch() {
        let chain = (0..50).fold(Node::Number(0.0), |left, _| {
                               Node::BinaryOp { op:    Operator::Add,
                                                left:  Box::new(left),
                                                right: Some(Box::new(Node::Number(1.0))), }
                           });
        assert_eq!(chain.depth(), 51);

        let def = FunctionDef { name:   "f".into(),
                                params: Vec::new(),
                                body:   Node::Block(vec![Node::Return(Some(Box::new(chain)))]), };
        assert_eq!(Node::FuncDef(Rc::new(def)).depth(), 54);
        assert_eq!(Node::Return(None).depth(), 1);
    }
}
