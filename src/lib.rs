#[macro_use]
mod ordinal;

pub mod cst;
pub mod lexer;
pub mod parser;
pub mod span;

pub use cst::{Node, ParseError, Phrase, PhraseKind};
pub use lexer::tokenize;
pub use parser::parse;
pub use span::Span;
