use crate::cst::Phrase;
use crate::cst::visitor::{Visitor, walk_phrase};
use crate::lexer::token::Token;

/// Formats a tree one node per line, skipping trivia.
pub fn format(root: &Phrase, source: &str) -> String {
    let mut formatter = SExprFormatter::new(source, false);
    formatter.visit_phrase(root);
    formatter.finish()
}

/// Like [`format`], but comments and whitespace are printed too.
pub fn format_with_trivia(root: &Phrase, source: &str) -> String {
    let mut formatter = SExprFormatter::new(source, true);
    formatter.visit_phrase(root);
    formatter.finish()
}

pub struct SExprFormatter<'src> {
    source: &'src str,
    trivia: bool,
    output: String,
    indent: usize,
}

impl<'src> SExprFormatter<'src> {
    pub fn new(source: &'src str, trivia: bool) -> Self {
        Self { source, trivia, output: String::new(), indent: 0 }
    }

    pub fn finish(self) -> String {
        self.output
    }

    fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    fn newline(&mut self) {
        if self.output.is_empty() {
            return;
        }
        self.output.push('\n');
        for _ in 0..self.indent {
            self.output.push_str("  ");
        }
    }
}

impl<'cst> Visitor<'cst> for SExprFormatter<'_> {
    fn visit_phrase(&mut self, phrase: &'cst Phrase) {
        self.newline();
        self.write("(");
        self.write(phrase.kind.name());
        if let Some(error) = &phrase.error {
            let detail = match error.expected {
                Some(expected) => format!(" expected {} found {}", expected.name(), error.unexpected.kind.name()),
                None => format!(" unexpected {}", error.unexpected.kind.name()),
            };
            self.write(&detail);
        }
        self.indent += 1;
        walk_phrase(self, phrase);
        self.indent -= 1;
        self.write(")");
    }

    fn visit_token(&mut self, token: &'cst Token) {
        if token.is_trivia() && !self.trivia {
            return;
        }
        self.newline();
        let text = format!("{} {:?}", token.kind.name(), token.text(self.source));
        self.write(&text);
    }
}
