pub mod kind;
pub mod locator;
pub mod sexpr;
pub mod visitor;

use serde::Serialize;

use crate::lexer::token::{Token, TokenKind};
use crate::span::Span;

pub use kind::PhraseKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Node {
    Token(Token),
    Phrase(Phrase),
}

impl Node {
    pub fn as_token(&self) -> Option<&Token> {
        match self {
            Node::Token(token) => Some(token),
            Node::Phrase(_) => None,
        }
    }

    pub fn as_phrase(&self) -> Option<&Phrase> {
        match self {
            Node::Phrase(phrase) => Some(phrase),
            Node::Token(_) => None,
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            Node::Token(token) => Some(token.span()),
            Node::Phrase(phrase) => phrase.span(),
        }
    }
}

impl From<Token> for Node {
    fn from(token: Token) -> Self {
        Node::Token(token)
    }
}

impl From<Phrase> for Node {
    fn from(phrase: Phrase) -> Self {
        Node::Phrase(phrase)
    }
}

/// Interior node. Every source byte belongs to exactly one token somewhere
/// beneath the root, trivia included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Phrase {
    pub kind: PhraseKind,
    pub children: Vec<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Box<ParseError>>,
}

/// Detail of a reported syntax error, attached to the phrase that holds the
/// tokens skipped while resynchronizing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseError {
    pub unexpected: Token,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<TokenKind>,
}

impl Phrase {
    pub fn new(kind: PhraseKind) -> Self {
        Self { kind, children: Vec::new(), error: None }
    }

    pub fn with_error(kind: PhraseKind, error: ParseError) -> Self {
        Self { kind, children: Vec::new(), error: Some(Box::new(error)) }
    }

    /// A reported error, or a bare `Error` phrase holding tokens skipped on
    /// behalf of an error reported elsewhere.
    pub fn is_error(&self) -> bool {
        self.error.is_some() || self.kind == PhraseKind::Error
    }

    /// Every token beneath this phrase in document order, trivia included.
    pub fn tokens(&self) -> Tokens<'_> {
        Tokens { stack: vec![self.children.iter()] }
    }

    /// Concatenated token text; for the root this is the original input.
    pub fn text(&self, source: &str) -> String {
        let mut text = String::new();
        for token in self.tokens() {
            text.push_str(token.text(source));
        }
        text
    }

    /// Byte range from the first to the last token; `None` when the phrase
    /// holds no tokens at all.
    pub fn span(&self) -> Option<Span> {
        let first = self.first_token()?;
        let last = self.last_token().unwrap_or(first);
        Some(Span::new(first.offset, last.end()))
    }

    /// Leftmost token, descending only along the left edge of the subtree.
    pub fn first_token(&self) -> Option<&Token> {
        self.children.iter().find_map(|child| match child {
            Node::Token(token) => Some(token),
            Node::Phrase(phrase) => phrase.first_token(),
        })
    }

    pub fn last_token(&self) -> Option<&Token> {
        self.children.iter().rev().find_map(|child| match child {
            Node::Token(token) => Some(token),
            Node::Phrase(phrase) => phrase.last_token(),
        })
    }

    /// Reported syntax errors in document order.
    pub fn errors(&self) -> Vec<&ParseError> {
        let mut errors = Vec::new();
        self.collect_errors(&mut errors);
        errors
    }

    fn collect_errors<'a>(&'a self, errors: &mut Vec<&'a ParseError>) {
        if let Some(error) = &self.error {
            errors.push(error);
        }
        for child in self.child_phrases() {
            child.collect_errors(errors);
        }
    }

    pub fn child_phrases(&self) -> impl Iterator<Item = &Phrase> {
        self.children.iter().filter_map(Node::as_phrase)
    }

    pub fn child_tokens(&self) -> impl Iterator<Item = &Token> {
        self.children.iter().filter_map(Node::as_token)
    }

    pub fn first_child_phrase(&self, kind: PhraseKind) -> Option<&Phrase> {
        self.child_phrases().find(|phrase| phrase.kind == kind)
    }

    /// First phrase of `kind` in pre-order, this one included.
    pub fn find(&self, kind: PhraseKind) -> Option<&Phrase> {
        if self.kind == kind {
            return Some(self);
        }
        self.child_phrases().find_map(|child| child.find(kind))
    }

    /// Number of phrases in this subtree, this one included.
    pub fn phrase_count(&self) -> usize {
        1 + self.child_phrases().map(Phrase::phrase_count).sum::<usize>()
    }
}

pub struct Tokens<'a> {
    stack: Vec<std::slice::Iter<'a, Node>>,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a Token;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(Node::Token(token)) => return Some(token),
                Some(Node::Phrase(phrase)) => self.stack.push(phrase.children.iter()),
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}
