//! SCSS syntax: tokens, the lossless concrete syntax tree and its parser.

pub mod cst;
pub mod lexer;
pub mod parser;
pub mod token;
pub mod value;
pub mod visit;

#[doc(inline)]
pub use cst::{
    indentation_of, trivia_has_newline, trivia_newlines, AtRule, Block, Bogus, Comment,
    Declaration, Empty, Indent, Node, RuleSet, Selector, SelectorList, Stylesheet,
};
#[doc(inline)]
pub use lexer::{tokenize, Tokenizer};
#[doc(inline)]
pub use parser::{parse, parse_str, Parse, ParseError};
#[doc(inline)]
pub use token::{Position, Span, Token, TokenKind};
#[doc(inline)]
pub use value::Value;
#[doc(inline)]
pub use visit::Visit;
