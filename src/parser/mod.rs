mod decl;
mod expr;
mod stmt;
pub(crate) mod token_set;

use std::collections::VecDeque;

use crate::cst::{Node, ParseError, Phrase, PhraseKind};
use crate::lexer::token::{Token, TokenKind};
use crate::lexer::{Anomaly, Lexer};

use token_set::{STATEMENT_RECOVER, STATEMENT_START, TokenSet};

/// How elements of a separated list are divided.
#[derive(Debug, Clone, Copy)]
struct Separator {
    token: TokenKind,
    /// One separator may directly precede the break token.
    trailing: bool,
    /// Separators may follow each other with nothing between (`[, $b]`).
    empty_elements: bool,
}

/// Recursive-descent parser producing a lossless concrete syntax tree.
///
/// Phrases under construction live on `stack`; a phrase is attached to its
/// parent either by `finish` or by handing it back to the caller (`end`) to
/// be pushed later, which is how operands get wrapped by the operators that
/// follow them.
pub struct Parser<'src> {
    lexer: Lexer<'src>,
    /// Lexed but unconsumed tokens, trivia included. Never holds more than
    /// one `EndOfFile`, always last.
    buffer: VecDeque<Token>,
    stack: Vec<Phrase>,
    recover: Vec<TokenSet>,
    /// An error was reported and no token has been consumed since; further
    /// errors are suppressed until the parser is back in step.
    pending_error: bool,
    /// Non-trivia tokens taken off the buffer so far.
    consumed: usize,
    reported: usize,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Self {
        Self::with_lexer(Lexer::new(source))
    }

    /// Parses from wherever `lexer` was positioned, e.g. after
    /// `Lexer::set_input` with a recorded mode stack.
    pub fn with_lexer(lexer: Lexer<'src>) -> Self {
        Self {
            lexer,
            buffer: VecDeque::new(),
            stack: Vec::new(),
            recover: Vec::new(),
            pending_error: false,
            consumed: 0,
            reported: 0,
        }
    }

    /// Lexical anomalies met while parsing.
    pub fn anomalies(&self) -> &[Anomaly] {
        self.lexer.anomalies()
    }

    /// Consumes the whole input. The result is a `StatementList` whose tokens
    /// spell out the input exactly; syntax errors are nodes in the tree.
    pub fn parse(&mut self) -> Phrase {
        self.stack.push(Phrase::new(PhraseKind::StatementList));
        self.recover.push(STATEMENT_RECOVER);
        self.list_body(|kind| STATEMENT_START.contains(kind), None, Some(TokenSet::EMPTY), Self::parse_statement);
        self.recover.pop();

        // Trailing trivia belongs to the root.
        let end = self.peek_index(0);
        let Some(root) = self.stack.last_mut() else {
            unreachable!("parser lost its root phrase");
        };
        root.children.extend(self.buffer.drain(..end).map(Node::Token));

        let root = self.end();
        if tracing::enabled!(tracing::Level::DEBUG) {
            tracing::debug!(
                bytes = self.lexer.source().len(),
                phrases = root.phrase_count(),
                errors = self.reported,
                anomalies = self.lexer.anomalies().len(),
                "parsed"
            );
        }
        root
    }

    /// Index into `buffer` of the `n`th non-trivia token ahead, lexing as
    /// needed. Looking past the end keeps answering with `EndOfFile`.
    fn peek_index(&mut self, n: usize) -> usize {
        let mut remaining = n;
        let mut index = 0;
        loop {
            if index == self.buffer.len() {
                let token = self.lexer.lex();
                self.buffer.push_back(token);
            }
            let kind = self.buffer[index].kind;
            if kind == TokenKind::EndOfFile {
                return index;
            }
            if !kind.is_trivia() {
                if remaining == 0 {
                    return index;
                }
                remaining -= 1;
            }
            index += 1;
        }
    }

    fn peek(&mut self, n: usize) -> TokenKind {
        let index = self.peek_index(n);
        self.buffer[index].kind
    }

    fn top(&mut self) -> &mut Phrase {
        let Some(top) = self.stack.last_mut() else {
            unreachable!("no open phrase");
        };
        top
    }

    fn push(&mut self, node: impl Into<Node>) {
        let node = node.into();
        self.top().children.push(node);
    }

    /// Consumes the next token (and the trivia before it) into the open
    /// phrase. At end of input only the trivia moves.
    fn bump(&mut self) -> TokenKind {
        let index = self.peek_index(0);
        let kind = self.buffer[index].kind;
        let take = if kind == TokenKind::EndOfFile { index } else { index + 1 };
        let Some(top) = self.stack.last_mut() else {
            unreachable!("no open phrase");
        };
        top.children.extend(self.buffer.drain(..take).map(Node::Token));
        if kind != TokenKind::EndOfFile {
            self.consumed += 1;
            self.pending_error = false;
        }
        kind
    }

    /// Consumes the next token without attaching it, for operands that stand
    /// as bare tokens. Trivia in front of it stays with the open phrase.
    fn take_token(&mut self) -> Token {
        self.drain_trivia();
        let token = match self.buffer.front() {
            Some(token) if token.kind != TokenKind::EndOfFile => self.buffer.pop_front(),
            _ => None,
        };
        match token {
            Some(token) => {
                self.consumed += 1;
                self.pending_error = false;
                token
            }
            None => unreachable!("take_token called at end of input"),
        }
    }

    /// Moves trivia waiting in front of the next token into the open phrase.
    fn drain_trivia(&mut self) {
        let index = self.peek_index(0);
        let Some(top) = self.stack.last_mut() else {
            return;
        };
        top.children.extend(self.buffer.drain(..index).map(Node::Token));
    }

    /// Opens a phrase. Pending trivia goes to the enclosing phrase first, so
    /// phrases begin at their first real token.
    fn start(&mut self, kind: PhraseKind) {
        self.drain_trivia();
        self.stack.push(Phrase::new(kind));
    }

    /// Opens a phrase that will adopt an already finished operand; trivia
    /// after that operand must stay behind it.
    fn start_detached(&mut self, kind: PhraseKind) {
        self.stack.push(Phrase::new(kind));
    }

    fn end(&mut self) -> Phrase {
        match self.stack.pop() {
            Some(phrase) => phrase,
            None => unreachable!("unbalanced phrase stack"),
        }
    }

    /// Closes the open phrase and attaches it to its parent.
    fn finish(&mut self) {
        let phrase = self.end();
        self.push(phrase);
    }

    fn set_kind(&mut self, kind: PhraseKind) {
        self.top().kind = kind;
    }

    fn retype_last_child(&mut self, kind: PhraseKind) {
        if let Some(Node::Phrase(last)) = self.top().children.last_mut() {
            last.kind = kind;
        }
    }

    fn optional(&mut self, kind: TokenKind) -> bool {
        if self.peek(0) == kind {
            self.bump();
            true
        } else {
            false
        }
    }

    fn optional_one_of(&mut self, kinds: TokenSet) -> Option<TokenKind> {
        let next = self.peek(0);
        if kinds.contains(next) {
            self.bump();
            Some(next)
        } else {
            None
        }
    }

    /// Consumes `kind` or reports it missing. A single stray token in front of
    /// the expected one is skipped. `?>` stands in for a `;` without being
    /// consumed.
    fn expect(&mut self, kind: TokenKind) -> bool {
        let next = self.peek(0);
        if next == kind {
            self.bump();
            return true;
        }
        if kind == TokenKind::Semicolon && next == TokenKind::CloseTag {
            return true;
        }
        self.error(Some(kind));
        if self.peek(1) == kind {
            self.skip_one();
            self.bump();
            return true;
        }
        false
    }

    fn expect_one_of(&mut self, kinds: TokenSet) -> Option<TokenKind> {
        let next = self.peek(0);
        if kinds.contains(next) {
            self.bump();
            return Some(next);
        }
        self.error(None);
        let after = self.peek(1);
        if kinds.contains(after) {
            self.skip_one();
            self.bump();
            return Some(after);
        }
        None
    }

    /// Records a syntax error at the next token as an empty error node in
    /// the open phrase. Suppressed while an earlier error is unresolved.
    fn error(&mut self, expected: Option<TokenKind>) {
        if self.pending_error {
            return;
        }
        let index = self.peek_index(0);
        let unexpected = self.buffer[index].clone();
        tracing::trace!(
            offset = unexpected.offset,
            found = unexpected.kind.name(),
            expected = expected.map(TokenKind::name),
            "syntax error"
        );
        self.reported += 1;
        self.pending_error = true;
        self.push(Phrase::with_error(PhraseKind::Error, ParseError { unexpected, expected }));
    }

    /// Discards tokens until `until` matches (or end of input). Skipped tokens
    /// land in the unresolved error node when it is the open phrase's last
    /// child, otherwise in a fresh `Error` phrase.
    fn skip(&mut self, until: impl Fn(TokenKind) -> bool) {
        let mut skipped = Vec::new();
        let mut count = 0;
        loop {
            let index = self.peek_index(0);
            let kind = self.buffer[index].kind;
            if kind == TokenKind::EndOfFile || until(kind) {
                break;
            }
            skipped.extend(self.buffer.drain(..=index));
            count += 1;
        }
        if count > 0 {
            tracing::trace!(count, "resynchronized");
            self.consumed += count;
            self.attach_skipped(skipped);
        }
    }

    fn skip_one(&mut self) {
        let index = self.peek_index(0);
        if self.buffer[index].kind == TokenKind::EndOfFile {
            return;
        }
        let skipped: Vec<Token> = self.buffer.drain(..=index).collect();
        tracing::trace!(count = 1, "resynchronized");
        self.consumed += 1;
        self.attach_skipped(skipped);
    }

    fn attach_skipped(&mut self, tokens: Vec<Token>) {
        let pending = self.pending_error;
        let top = self.top();
        match top.children.last_mut() {
            Some(Node::Phrase(last)) if pending && last.is_error() => {
                last.children.extend(tokens.into_iter().map(Node::Token));
            }
            _ => {
                let mut continuation = Phrase::new(PhraseKind::Error);
                continuation.children.extend(tokens.into_iter().map(Node::Token));
                top.children.push(Node::Phrase(continuation));
            }
        }
    }

    /// Skips to the nearest token any enclosing construct can resume at.
    fn sync(&mut self) {
        let merged = self.recover.iter().fold(TokenSet::EMPTY, |acc, set| acc.union(*set));
        self.skip(|kind| merged.contains(kind));
    }

    /// Whether a construct outside the innermost list can resume at `kind`.
    fn outer_recovers(&self, kind: TokenKind) -> bool {
        let outer = self.recover.len().saturating_sub(1);
        self.recover[..outer].iter().any(|set| set.contains(kind))
    }

    /// Undelimited list of elements. With `break_on` set, anything that is
    /// neither an element start nor a break token is an error to recover
    /// from; without it the list simply stops there.
    fn list(
        &mut self,
        kind: PhraseKind,
        starts: impl Fn(TokenKind) -> bool,
        break_on: Option<TokenSet>,
        recover: TokenSet,
        element: impl FnMut(&mut Self),
    ) {
        self.start(kind);
        self.recover.push(recover.union(break_on.unwrap_or(TokenSet::EMPTY)));
        self.list_body(starts, None, break_on, element);
        self.recover.pop();
        self.finish();
    }

    /// Elements separated by `delimiter`, ended by a token in `break_on`.
    /// `trailing` admits one delimiter directly before the break token.
    fn delimited_list(
        &mut self,
        kind: PhraseKind,
        starts: impl Fn(TokenKind) -> bool,
        delimiter: TokenKind,
        break_on: TokenSet,
        trailing: bool,
        element: impl FnMut(&mut Self),
    ) {
        let separator = Separator { token: delimiter, trailing, empty_elements: false };
        self.separated_list(kind, starts, separator, break_on, element);
    }

    fn separated_list(
        &mut self,
        kind: PhraseKind,
        starts: impl Fn(TokenKind) -> bool,
        separator: Separator,
        break_on: TokenSet,
        element: impl FnMut(&mut Self),
    ) {
        self.start(kind);
        self.recover.push(break_on.with(separator.token));
        self.list_body(starts, Some(separator), Some(break_on), element);
        self.recover.pop();
        self.finish();
    }

    /// Shared element loop. An unexpected token is reported once; when the
    /// token after it starts an element, is the separator or ends the list,
    /// only that one token is skipped, otherwise the parser syncs to the
    /// nearest recover token of any enclosing list.
    fn list_body(
        &mut self,
        starts: impl Fn(TokenKind) -> bool,
        separator: Option<Separator>,
        break_on: Option<TokenSet>,
        mut element: impl FnMut(&mut Self),
    ) {
        // Separated lists open with an element, and need one after each
        // separator.
        let mut awaiting = separator.is_some();
        let mut recovered = false;
        loop {
            let next = self.peek(0);
            let parse_element = match separator {
                None => starts(next),
                Some(separator) => awaiting && (starts(next) || !separator.empty_elements),
            };
            if parse_element {
                recovered = false;
                awaiting = false;
                let before = self.consumed;
                element(self);
                if self.consumed == before && starts(next) {
                    // The element could not use its first token.
                    self.error(None);
                    self.skip_one();
                }
                continue;
            }
            if next == TokenKind::EndOfFile {
                break;
            }
            if let Some(separator) = separator {
                if next == separator.token && (!awaiting || separator.empty_elements) {
                    self.bump();
                    recovered = false;
                    awaiting = true;
                    if separator.trailing && break_on.is_some_and(|set| set.contains(self.peek(0))) {
                        break;
                    }
                    continue;
                }
            }
            let Some(break_on) = break_on else {
                break;
            };
            if break_on.contains(next) {
                break;
            }
            if recovered {
                if self.outer_recovers(next) {
                    break;
                }
                self.skip_one();
                continue;
            }

            self.error(None);
            if separator.is_some() && starts(next) {
                // Missing separator.
                awaiting = true;
                continue;
            }
            let after = self.peek(1);
            let resumes = starts(after)
                || break_on.contains(after)
                || separator.is_some_and(|separator| separator.token == after);
            if resumes {
                self.skip_one();
                awaiting = starts(after);
            } else {
                self.sync();
            }
            recovered = true;
        }
    }

    fn parse_statement_list(&mut self, break_on: TokenSet) {
        self.list(
            PhraseKind::StatementList,
            |kind| STATEMENT_START.contains(kind),
            Some(break_on),
            STATEMENT_RECOVER,
            Self::parse_statement,
        );
    }

    /// A statement list only when one actually starts here.
    fn parse_optional_statement_list(&mut self, break_on: TokenSet) {
        if STATEMENT_START.contains(self.peek(0)) {
            self.parse_statement_list(break_on);
        }
    }

    fn parse_statement(&mut self) {
        match self.peek(0) {
            TokenKind::Namespace => {
                if self.peek(1) == TokenKind::Backslash {
                    self.parse_expression_statement()
                } else {
                    self.parse_namespace_definition()
                }
            }
            TokenKind::Use => self.parse_namespace_use_declaration(),
            TokenKind::HaltCompiler => self.parse_halt_compiler_statement(),
            TokenKind::Const => self.parse_const_declaration(),
            TokenKind::Function => {
                let after = self.peek(1);
                if after == TokenKind::OpenParenthesis
                    || (after == TokenKind::Ampersand && self.peek(2) == TokenKind::OpenParenthesis)
                {
                    self.parse_expression_statement()
                } else {
                    self.parse_function_declaration()
                }
            }
            TokenKind::Class | TokenKind::Abstract | TokenKind::Final => self.parse_class_declaration(),
            TokenKind::Trait => self.parse_trait_declaration(),
            TokenKind::Interface => self.parse_interface_declaration(),
            TokenKind::OpenBrace => self.parse_compound_statement(PhraseKind::CompoundStatement),
            TokenKind::If => self.parse_if_statement(),
            TokenKind::While => self.parse_while_statement(),
            TokenKind::Do => self.parse_do_statement(),
            TokenKind::For => self.parse_for_statement(),
            TokenKind::Switch => self.parse_switch_statement(),
            TokenKind::Break => self.parse_keyword_expression_statement(PhraseKind::BreakStatement),
            TokenKind::Continue => self.parse_keyword_expression_statement(PhraseKind::ContinueStatement),
            TokenKind::Return => self.parse_keyword_expression_statement(PhraseKind::ReturnStatement),
            TokenKind::Global => self.parse_global_declaration(),
            TokenKind::Static => {
                if self.peek(1) == TokenKind::VariableName
                    && matches!(
                        self.peek(2),
                        TokenKind::Semicolon | TokenKind::Comma | TokenKind::CloseTag | TokenKind::Equals
                    )
                {
                    self.parse_function_static_declaration()
                } else {
                    self.parse_expression_statement()
                }
            }
            TokenKind::Text | TokenKind::OpenTag | TokenKind::CloseTag => self.parse_inline_text(),
            TokenKind::ForEach => self.parse_foreach_statement(),
            TokenKind::Declare => self.parse_declare_statement(),
            TokenKind::Try => self.parse_try_statement(),
            TokenKind::Throw => self.parse_throw_statement(),
            TokenKind::Goto => self.parse_goto_statement(),
            TokenKind::Echo | TokenKind::OpenTagEcho => self.parse_echo_intrinsic(),
            TokenKind::Unset => self.parse_unset_intrinsic(),
            TokenKind::Semicolon => {
                self.start(PhraseKind::NullStatement);
                self.bump();
                self.finish();
            }
            TokenKind::Name if self.peek(1) == TokenKind::Colon => self.parse_named_label_statement(),
            _ => self.parse_expression_statement(),
        }
    }
}

/// Parses a complete PHP file.
pub fn parse(source: &str) -> Phrase {
    Parser::new(source).parse()
}
