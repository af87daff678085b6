/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator walks the syntax tree directly. Statements are executed for
/// their effects and expressions produce values.
///
/// # Responsibilities
/// - Executes statements, including control flow and `return`.
/// - Evaluates operators, calls, indexing and array literals.
/// - Performs program I/O and imports.
/// - Reports fatal runtime errors such as undefined functions or `raise`.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens, each
/// paired with its line number. Opcode streams (`.spbc`) are turned into the
/// same tokens by a second entry point.
///
/// # Responsibilities
/// - Converts source text into `(Token, line)` pairs ending in `Eof`.
/// - Recognizes keywords, operators, literals and import strings.
/// - Skips whitespace and `//` comments.
/// - Reports lexical errors for characters that start no token.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser is a recursive descent parser with one function per grammar
/// rule. It consumes the token stream produced by the lexer.
///
/// # Responsibilities
/// - Converts tokens into a `Node` tree rooted at a statement block.
/// - Encodes operator precedence and associativity.
/// - Reports syntax errors with the line they occurred on.
pub mod parser;
/// The runtime module holds the state tables used by the evaluator.
///
/// # Responsibilities
/// - Stores variables with stack-discipline truncation.
/// - Stores user functions, natives and native modules.
/// - Loads imported source units.
pub mod runtime;
/// The value module defines the runtime data types for evaluation.
///
/// Values are numbers, strings or shared references to arrays.
///
/// # Responsibilities
/// - Defines the `Value` enum and the `Array` object.
/// - Converts values to numbers, truthiness and text.
pub mod value;
