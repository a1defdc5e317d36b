use crate::cst::Phrase;
use crate::cst::visitor::{Visitor, walk_phrase};
use crate::lexer::token::Token;

/// Collects the chain of phrases enclosing an offset, outermost first.
pub struct Locator<'cst> {
    target: usize,
    depth: usize,
    path: Vec<&'cst Phrase>,
}

impl<'cst> Locator<'cst> {
    pub fn new(target: usize) -> Self {
        Self { target, depth: 0, path: Vec::new() }
    }

    pub fn find(root: &'cst Phrase, target: usize) -> Vec<&'cst Phrase> {
        let mut locator = Self::new(target);
        locator.visit_phrase(root);
        locator.path
    }

    /// The token covering `target`, trivia included. A zero-length token
    /// (end of file) only matches its own offset.
    pub fn token_at(root: &'cst Phrase, target: usize) -> Option<&'cst Token> {
        root.tokens().find(|token| {
            token.span().contains(target) || (token.length == 0 && token.offset == target)
        })
    }
}

impl<'cst> Visitor<'cst> for Locator<'cst> {
    fn visit_phrase(&mut self, phrase: &'cst Phrase) {
        // An earlier sibling already claimed the offset (it sat on a boundary).
        if self.path.len() > self.depth {
            return;
        }
        let Some(span) = phrase.span() else {
            return;
        };
        if span.start <= self.target && self.target <= span.end {
            self.path.push(phrase);
            self.depth += 1;
            walk_phrase(self, phrase);
            self.depth -= 1;
        }
    }
}
