use crate::cst::{Node, Phrase};
use crate::lexer::token::Token;

/// Pre-order traversal over a concrete syntax tree. Override `visit_phrase`
/// and call [`walk_phrase`] to keep descending.
pub trait Visitor<'cst> {
    fn visit_phrase(&mut self, phrase: &'cst Phrase) {
        walk_phrase(self, phrase);
    }

    fn visit_token(&mut self, _token: &'cst Token) {}
}

pub fn walk_phrase<'cst, V: Visitor<'cst> + ?Sized>(visitor: &mut V, phrase: &'cst Phrase) {
    for child in &phrase.children {
        match child {
            Node::Token(token) => visitor.visit_token(token),
            Node::Phrase(phrase) => visitor.visit_phrase(phrase),
        }
    }
}
