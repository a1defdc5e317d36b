pub mod mode;
pub mod token;

mod interpolation;

use std::sync::Arc;

use memchr::{memchr, memmem};
use serde::Serialize;

pub use mode::LexMode;
pub use token::{ModeStack, Token, TokenKind};

/// Something the lexer tolerated but a caller may want to know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AnomalyKind {
    UnknownCharacter,
    UnterminatedComment,
    UnterminatedString,
    UnterminatedHeredoc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Anomaly {
    pub kind: AnomalyKind,
    pub offset: usize,
}

/// Pull-based PHP 7 scanner driven by a stack of lexical modes.
pub struct Lexer<'src> {
    source: &'src str,
    input: &'src [u8],
    position: usize,
    mode_stack: Vec<LexMode>,
    snapshot: Option<ModeStack>,
    /// `(position, length)` of encapsulated text already measured by the
    /// double-quote fast path.
    double_quote_scan: Option<(usize, usize)>,
    /// Closing labels of the open heredocs; the last one is active.
    heredoc_labels: Vec<&'src [u8]>,
    /// Kind of the last non-trivia token produced.
    previous: Option<TokenKind>,
    anomalies: Vec<Anomaly>,
    eof_checked: bool,
    finished: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        let mut lexer = Self {
            source,
            input: source.as_bytes(),
            position: 0,
            mode_stack: Vec::new(),
            snapshot: None,
            double_quote_scan: None,
            heredoc_labels: Vec::new(),
            previous: None,
            anomalies: Vec::new(),
            eof_checked: false,
            finished: false,
        };
        lexer.set_input(source, None, 0);
        lexer
    }

    /// (Re)initializes the scanner. A recorded token's `mode_stack` and
    /// `offset` resume scanning at that token without replaying the file.
    pub fn set_input(&mut self, source: &'src str, modes: Option<&[LexMode]>, offset: usize) {
        let mut offset = offset.min(source.len());
        while !source.is_char_boundary(offset) {
            offset -= 1;
        }
        self.source = source;
        self.input = source.as_bytes();
        self.position = offset;
        self.mode_stack = match modes {
            Some(modes) if !modes.is_empty() => modes.to_vec(),
            _ => vec![LexMode::Initial],
        };
        self.snapshot = None;
        self.double_quote_scan = None;
        self.heredoc_labels.clear();
        self.previous = None;
        self.anomalies.clear();
        self.eof_checked = false;
        self.finished = false;
    }

    /// Supplies the closing label when resuming inside a heredoc or nowdoc;
    /// the label is not part of the recorded mode stack.
    pub fn set_heredoc_label(&mut self, label: &'src str) {
        self.heredoc_labels.clear();
        self.heredoc_labels.push(label.as_bytes());
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn modes(&self) -> &[LexMode] {
        &self.mode_stack
    }

    pub fn anomalies(&self) -> &[Anomaly] {
        &self.anomalies
    }

    /// Produces the next token. Past the end of input this keeps returning a
    /// zero-length `EndOfFile` at the final offset.
    pub fn lex(&mut self) -> Token {
        loop {
            let before = self.snapshot();
            let start = self.position;
            if start >= self.input.len() {
                self.check_unterminated();
                return Token::new(TokenKind::EndOfFile, self.input.len(), 0, before);
            }

            let kind = match self.mode() {
                LexMode::Initial => Some(self.initial()),
                LexMode::Scripting => Some(self.scripting()),
                LexMode::LookingForProperty => self.looking_for_property(),
                LexMode::DoubleQuotes => Some(self.double_quotes()),
                LexMode::NowDoc => Some(self.nowdoc()),
                LexMode::HereDoc => Some(self.heredoc()),
                LexMode::EndHereDoc => Some(self.end_heredoc()),
                LexMode::Backtick => Some(self.backtick()),
                LexMode::VarOffset => Some(self.var_offset()),
                LexMode::LookingForVarName => self.looking_for_var_name(),
                LexMode::HaltCompiler => Some(self.halt_compiler()),
                LexMode::RawData => Some(self.raw_data()),
            };

            // A mode that yields nothing only switched modes; rescan.
            if let Some(kind) = kind {
                debug_assert!(self.position > start, "lexer made no progress at {start}");
                if kind == TokenKind::Unknown {
                    self.anomaly(AnomalyKind::UnknownCharacter, start);
                }
                if !kind.is_trivia() {
                    self.previous = Some(kind);
                }
                return Token::new(kind, start, self.position - start, before);
            }
        }
    }

    fn mode(&self) -> LexMode {
        self.mode_stack.last().copied().unwrap_or(LexMode::Scripting)
    }

    fn snapshot(&mut self) -> ModeStack {
        if let Some(snapshot) = &self.snapshot {
            return snapshot.clone();
        }
        let snapshot: ModeStack = Arc::from(self.mode_stack.as_slice());
        self.snapshot = Some(snapshot.clone());
        snapshot
    }

    fn push_mode(&mut self, mode: LexMode) {
        tracing::trace!(?mode, depth = self.mode_stack.len() + 1, "push lexer mode");
        self.mode_stack.push(mode);
        self.snapshot = None;
    }

    /// Popping the outermost mode leaves plain scripting behind.
    fn pop_mode(&mut self) {
        let popped = self.mode_stack.pop();
        tracing::trace!(?popped, depth = self.mode_stack.len(), "pop lexer mode");
        if self.mode_stack.is_empty() {
            self.mode_stack.push(LexMode::Scripting);
        }
        self.snapshot = None;
    }

    fn replace_mode(&mut self, mode: LexMode) {
        match self.mode_stack.last_mut() {
            Some(top) => *top = mode,
            None => self.mode_stack.push(mode),
        }
        self.snapshot = None;
    }

    fn anomaly(&mut self, kind: AnomalyKind, offset: usize) {
        tracing::debug!(?kind, offset, "lexical anomaly");
        self.anomalies.push(Anomaly { kind, offset });
    }

    fn check_unterminated(&mut self) {
        if self.eof_checked {
            return;
        }
        self.eof_checked = true;
        let open = self.mode_stack.iter().rev().find(|mode| mode.is_quoted()).copied();
        match open {
            Some(LexMode::HereDoc | LexMode::NowDoc | LexMode::EndHereDoc) => {
                self.anomaly(AnomalyKind::UnterminatedHeredoc, self.input.len())
            }
            Some(_) => self.anomaly(AnomalyKind::UnterminatedString, self.input.len()),
            None => {}
        }
    }

    fn byte_at(&self, index: usize) -> Option<u8> {
        self.input.get(index).copied()
    }

    fn current(&self) -> Option<u8> {
        self.byte_at(self.position)
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.current() == Some(byte) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    fn skip_while(&mut self, predicate: impl Fn(u8) -> bool) {
        while self.current().is_some_and(&predicate) {
            self.position += 1;
        }
    }

    fn label_end(&self, from: usize) -> usize {
        let mut end = from;
        while self.byte_at(end).is_some_and(is_label_char) {
            end += 1;
        }
        end
    }

    /// Text outside PHP tags, up to the next open tag.
    fn initial(&mut self) -> TokenKind {
        let start = self.position;
        let mut search = start;
        while let Some(found) = memchr(b'<', &self.input[search..]) {
            let at = search + found;
            if let Some((kind, length)) = self.open_tag_at(at) {
                if at > start {
                    self.position = at;
                    return TokenKind::Text;
                }
                self.position = at + length;
                self.replace_mode(LexMode::Scripting);
                return kind;
            }
            search = at + 1;
        }
        self.position = self.input.len();
        TokenKind::Text
    }

    fn open_tag_at(&self, at: usize) -> Option<(TokenKind, usize)> {
        let rest = &self.input[at..];
        if !rest.starts_with(b"<?") {
            return None;
        }
        if rest.len() > 5 && rest[2..5].eq_ignore_ascii_case(b"php") && is_whitespace(rest[5]) {
            let length = if rest[5] == b'\r' && rest.get(6) == Some(&b'\n') { 7 } else { 6 };
            return Some((TokenKind::OpenTag, length));
        }
        if rest.get(2) == Some(&b'=') {
            return Some((TokenKind::OpenTagEcho, 3));
        }
        None
    }

    fn scripting(&mut self) -> TokenKind {
        let c = self.input[self.position];
        self.position += 1;

        match c {
            b' ' | b'\t' | b'\n' | b'\r' => {
                self.skip_while(is_whitespace);
                TokenKind::Whitespace
            }
            b'-' => {
                if self.eat(b'>') {
                    self.push_mode(LexMode::LookingForProperty);
                    TokenKind::Arrow
                } else if self.eat(b'-') {
                    TokenKind::MinusMinus
                } else if self.eat(b'=') {
                    TokenKind::MinusEquals
                } else {
                    TokenKind::Minus
                }
            }
            b':' => {
                if self.eat(b':') { TokenKind::ColonColon } else { TokenKind::Colon }
            }
            b'.' => self.scripting_dot(),
            b'=' => {
                if self.eat(b'=') {
                    if self.eat(b'=') { TokenKind::EqualsEqualsEquals } else { TokenKind::EqualsEquals }
                } else if self.eat(b'>') {
                    TokenKind::FatArrow
                } else {
                    TokenKind::Equals
                }
            }
            b'+' => {
                if self.eat(b'+') {
                    TokenKind::PlusPlus
                } else if self.eat(b'=') {
                    TokenKind::PlusEquals
                } else {
                    TokenKind::Plus
                }
            }
            b'!' => {
                if self.eat(b'=') {
                    if self.eat(b'=') { TokenKind::ExclamationEqualsEquals } else { TokenKind::ExclamationEquals }
                } else {
                    TokenKind::Exclamation
                }
            }
            b'<' => self.scripting_less_than(),
            b'>' => {
                if self.eat(b'>') {
                    if self.eat(b'=') {
                        TokenKind::GreaterThanGreaterThanEquals
                    } else {
                        TokenKind::GreaterThanGreaterThan
                    }
                } else if self.eat(b'=') {
                    TokenKind::GreaterThanEquals
                } else {
                    TokenKind::GreaterThan
                }
            }
            b'*' => {
                if self.eat(b'*') {
                    if self.eat(b'=') { TokenKind::AsteriskAsteriskEquals } else { TokenKind::AsteriskAsterisk }
                } else if self.eat(b'=') {
                    TokenKind::AsteriskEquals
                } else {
                    TokenKind::Asterisk
                }
            }
            b'/' => {
                if self.eat(b'/') {
                    self.line_comment()
                } else if self.eat(b'*') {
                    self.block_comment()
                } else if self.eat(b'=') {
                    TokenKind::ForwardslashEquals
                } else {
                    TokenKind::ForwardSlash
                }
            }
            b'%' => {
                if self.eat(b'=') { TokenKind::PercentEquals } else { TokenKind::Percent }
            }
            b'&' => {
                if self.eat(b'&') {
                    TokenKind::AmpersandAmpersand
                } else if self.eat(b'=') {
                    TokenKind::AmpersandEquals
                } else {
                    TokenKind::Ampersand
                }
            }
            b'|' => {
                if self.eat(b'|') {
                    TokenKind::BarBar
                } else if self.eat(b'=') {
                    TokenKind::BarEquals
                } else {
                    TokenKind::Bar
                }
            }
            b'^' => {
                if self.eat(b'=') { TokenKind::CaretEquals } else { TokenKind::Caret }
            }
            b'?' => self.scripting_question(),
            b'#' => self.line_comment(),
            b'\\' => TokenKind::Backslash,
            b'$' => {
                if self.current().is_some_and(is_label_start) {
                    self.skip_while(is_label_char);
                    TokenKind::VariableName
                } else {
                    TokenKind::Dollar
                }
            }
            b'"' => self.scripting_double_quote(),
            b'\'' => self.single_quoted(),
            b'`' => {
                self.push_mode(LexMode::Backtick);
                TokenKind::Backtick
            }
            b'{' => {
                self.push_mode(LexMode::Scripting);
                TokenKind::OpenBrace
            }
            b'}' => {
                if self.mode_stack.len() > 1 {
                    self.pop_mode();
                }
                TokenKind::CloseBrace
            }
            b'(' => self.scripting_open_parenthesis(),
            b')' => TokenKind::CloseParenthesis,
            b'[' => TokenKind::OpenBracket,
            b']' => TokenKind::CloseBracket,
            b';' => TokenKind::Semicolon,
            b',' => TokenKind::Comma,
            b'~' => TokenKind::Tilde,
            b'@' => TokenKind::AtSymbol,
            b'0'..=b'9' => self.scripting_numeric(c),
            c if is_label_start(c) => self.scripting_label(c),
            _ => TokenKind::Unknown,
        }
    }

    fn scripting_dot(&mut self) -> TokenKind {
        match self.current() {
            Some(b'=') => {
                self.position += 1;
                TokenKind::DotEquals
            }
            Some(b'.') if self.byte_at(self.position + 1) == Some(b'.') => {
                self.position += 2;
                TokenKind::Ellipsis
            }
            Some(c) if c.is_ascii_digit() => self.numeric_continuation(true),
            _ => TokenKind::Dot,
        }
    }

    fn scripting_less_than(&mut self) -> TokenKind {
        let at = self.position - 1;
        if let Some(kind) = self.scripting_heredoc(at) {
            return kind;
        }
        if self.eat(b'<') {
            if self.eat(b'=') { TokenKind::LessThanLessThanEquals } else { TokenKind::LessThanLessThan }
        } else if self.eat(b'=') {
            if self.eat(b'>') { TokenKind::Spaceship } else { TokenKind::LessThanEquals }
        } else if self.eat(b'>') {
            TokenKind::ExclamationEquals
        } else {
            TokenKind::LessThan
        }
    }

    fn scripting_question(&mut self) -> TokenKind {
        if self.eat(b'>') {
            // The close tag swallows one line break, as PHP does.
            if self.eat(b'\r') {
                self.eat(b'\n');
            } else {
                self.eat(b'\n');
            }
            self.replace_mode(LexMode::Initial);
            TokenKind::CloseTag
        } else if self.eat(b'?') {
            if self.eat(b'=') { TokenKind::QuestionQuestionEquals } else { TokenKind::QuestionQuestion }
        } else {
            TokenKind::Question
        }
    }

    /// `#` or `//` comment: runs through the line break, or up to a close tag.
    fn line_comment(&mut self) -> TokenKind {
        while let Some(c) = self.current() {
            match c {
                b'\n' => {
                    self.position += 1;
                    break;
                }
                b'\r' => {
                    self.position += 1;
                    self.eat(b'\n');
                    break;
                }
                b'?' if self.byte_at(self.position + 1) == Some(b'>') => break,
                _ => self.position += 1,
            }
        }
        TokenKind::Comment
    }

    /// Position is just past `/*`.
    fn block_comment(&mut self) -> TokenKind {
        let start = self.position - 2;
        let kind = if self.current() == Some(b'*')
            && self.byte_at(self.position + 1).is_some_and(|c| c != b'/')
        {
            TokenKind::DocumentComment
        } else {
            TokenKind::Comment
        };
        match memmem::find(&self.input[self.position..], b"*/") {
            Some(found) => self.position += found + 2,
            None => {
                self.anomaly(AnomalyKind::UnterminatedComment, start);
                self.position = self.input.len();
            }
        }
        kind
    }

    /// `(` may open a cast; look ahead without consuming unless one matches.
    fn scripting_open_parenthesis(&mut self) -> TokenKind {
        let mut k = self.position;
        while matches!(self.byte_at(k), Some(b' ' | b'\t')) {
            k += 1;
        }
        let word_start = k;
        while self.byte_at(k).is_some_and(|c| c.is_ascii_alphabetic()) {
            k += 1;
        }
        let word_end = k;
        while matches!(self.byte_at(k), Some(b' ' | b'\t')) {
            k += 1;
        }
        if word_end > word_start && self.byte_at(k) == Some(b')') {
            let word = self.input[word_start..word_end].to_ascii_lowercase();
            if let Some(kind) = token::cast(&word) {
                self.position = k + 1;
                return kind;
            }
        }
        TokenKind::OpenParenthesis
    }

    fn scripting_numeric(&mut self, first: u8) -> TokenKind {
        if first == b'0' {
            match (self.current(), self.byte_at(self.position + 1)) {
                (Some(b'x' | b'X'), Some(digit)) if digit.is_ascii_hexdigit() => {
                    self.position += 2;
                    self.skip_while(|c| c.is_ascii_hexdigit());
                    return TokenKind::IntegerLiteral;
                }
                (Some(b'b' | b'B'), Some(b'0' | b'1')) => {
                    self.position += 2;
                    self.skip_while(|c| c == b'0' || c == b'1');
                    return TokenKind::IntegerLiteral;
                }
                _ => {}
            }
        }

        self.skip_while(|c| c.is_ascii_digit());
        match self.current() {
            Some(b'.') => {
                self.position += 1;
                self.numeric_continuation(true)
            }
            Some(b'e' | b'E') => self.numeric_continuation(false),
            _ => TokenKind::IntegerLiteral,
        }
    }

    /// Fraction digits and exponent after the integer part (or after a
    /// leading `.`).
    fn numeric_continuation(&mut self, has_dot: bool) -> TokenKind {
        self.skip_while(|c| c.is_ascii_digit());
        if matches!(self.current(), Some(b'e' | b'E')) {
            let mut k = self.position + 1;
            if matches!(self.byte_at(k), Some(b'+' | b'-')) {
                k += 1;
            }
            if self.byte_at(k).is_some_and(|c| c.is_ascii_digit()) {
                self.position = k;
                self.skip_while(|c| c.is_ascii_digit());
                return TokenKind::FloatingLiteral;
            }
        }
        if has_dot { TokenKind::FloatingLiteral } else { TokenKind::IntegerLiteral }
    }

    fn scripting_label(&mut self, first: u8) -> TokenKind {
        if matches!(first, b'b' | b'B') {
            match self.current() {
                Some(b'\'') => {
                    self.position += 1;
                    return self.single_quoted();
                }
                Some(b'"') => {
                    self.position += 1;
                    return self.scripting_double_quote();
                }
                Some(b'<') => {
                    if let Some(kind) = self.scripting_heredoc(self.position) {
                        return kind;
                    }
                }
                _ => {}
            }
        }

        let start = self.position - 1;
        self.skip_while(is_label_char);
        let label = &self.input[start..self.position];

        if label[0] == b'_' {
            if let Some(kind) = token::magic_constant(label) {
                return kind;
            }
        }
        if label.len() > MAX_KEYWORD_LEN {
            return TokenKind::Name;
        }
        let mut lowered = [0u8; MAX_KEYWORD_LEN];
        let lowered = &mut lowered[..label.len()];
        lowered.copy_from_slice(label);
        lowered.make_ascii_lowercase();

        match token::keyword(lowered) {
            Some(TokenKind::Yield) => self.yield_from(),
            Some(TokenKind::HaltCompiler) => {
                // As a member name it is an ordinary identifier.
                let member = matches!(
                    self.previous,
                    Some(TokenKind::ColonColon | TokenKind::Arrow | TokenKind::Function | TokenKind::Const)
                );
                if self.mode_stack.len() == 1 && !member {
                    self.replace_mode(LexMode::HaltCompiler);
                }
                TokenKind::HaltCompiler
            }
            Some(kind) => kind,
            None => TokenKind::Name,
        }
    }

    /// `yield` + whitespace + `from` is a single token.
    fn yield_from(&mut self) -> TokenKind {
        let mut k = self.position;
        while self.byte_at(k).is_some_and(is_whitespace) {
            k += 1;
        }
        let rest = &self.input[k..];
        if k > self.position
            && rest.len() >= 4
            && rest[..4].eq_ignore_ascii_case(b"from")
            && !rest.get(4).copied().is_some_and(is_label_char)
        {
            self.position = k + 4;
            TokenKind::YieldFrom
        } else {
            TokenKind::Yield
        }
    }

    /// Position is just past the opening `'`.
    fn single_quoted(&mut self) -> TokenKind {
        let start = self.position - 1;
        while let Some(c) = self.current() {
            self.position += 1;
            match c {
                b'\'' => return TokenKind::StringLiteral,
                b'\\' if self.position < self.input.len() => self.position += 1,
                _ => {}
            }
        }
        self.anomaly(AnomalyKind::UnterminatedString, start);
        TokenKind::EncapsulatedAndWhitespace
    }

    /// Position is just past the opening `"`. A string without interpolation
    /// is a single literal; otherwise emit the quote, enter `DoubleQuotes`
    /// and remember how much plain text precedes the first interpolation.
    fn scripting_double_quote(&mut self) -> TokenKind {
        let body = self.position;
        let len = self.input.len();
        let mut n = body;
        while n < len {
            match self.input[n] {
                b'"' => {
                    self.position = n + 1;
                    return TokenKind::StringLiteral;
                }
                b'$' if self.is_interpolation_dollar(n) => break,
                b'{' if self.byte_at(n + 1) == Some(b'$') => break,
                b'\\' => n += 1,
                _ => {}
            }
            n += 1;
        }
        let n = n.min(len);
        self.double_quote_scan = Some((body, n - body));
        self.push_mode(LexMode::DoubleQuotes);
        TokenKind::DoubleQuote
    }

    /// `<<<` opening at `at`: optional quotes around the label, then a line
    /// break. Returns `None` without consuming if this is not a heredoc.
    fn scripting_heredoc(&mut self, at: usize) -> Option<TokenKind> {
        let input = self.input;
        if !input[at..].starts_with(b"<<<") {
            return None;
        }
        let mut k = at + 3;
        while matches!(self.byte_at(k), Some(b' ' | b'\t')) {
            k += 1;
        }
        let quote = match self.byte_at(k) {
            Some(q @ (b'\'' | b'"')) => {
                k += 1;
                Some(q)
            }
            _ => None,
        };
        if !self.byte_at(k).is_some_and(is_label_start) {
            return None;
        }
        let label_start = k;
        k = self.label_end(k + 1);
        let label_end = k;
        if let Some(q) = quote {
            if self.byte_at(k) != Some(q) {
                return None;
            }
            k += 1;
        }
        match self.byte_at(k) {
            Some(b'\r') => {
                k += 1;
                if self.byte_at(k) == Some(b'\n') {
                    k += 1;
                }
            }
            Some(b'\n') => k += 1,
            None => {}
            Some(_) => return None,
        }

        self.position = k;
        self.heredoc_labels.push(&input[label_start..label_end]);
        self.push_mode(if quote == Some(b'\'') { LexMode::NowDoc } else { LexMode::HereDoc });
        if self.heredoc_end_at(k) {
            self.replace_mode(LexMode::EndHereDoc);
        }
        Some(TokenKind::StartHeredoc)
    }

    fn halt_compiler(&mut self) -> TokenKind {
        let c = self.input[self.position];
        self.position += 1;
        match c {
            b' ' | b'\t' | b'\n' | b'\r' => {
                self.skip_while(is_whitespace);
                TokenKind::Whitespace
            }
            b'(' => TokenKind::OpenParenthesis,
            b')' => TokenKind::CloseParenthesis,
            b';' => {
                self.replace_mode(LexMode::RawData);
                TokenKind::Semicolon
            }
            b'?' if self.current() == Some(b'>') => {
                self.position += 1;
                self.replace_mode(LexMode::RawData);
                TokenKind::CloseTag
            }
            b'#' => self.line_comment(),
            b'/' if self.current() == Some(b'/') => {
                self.position += 1;
                self.line_comment()
            }
            b'/' if self.current() == Some(b'*') => {
                self.position += 1;
                self.block_comment()
            }
            _ => {
                while !self.source.is_char_boundary(self.position) {
                    self.position += 1;
                }
                TokenKind::Unknown
            }
        }
    }

    fn raw_data(&mut self) -> TokenKind {
        self.position = self.input.len();
        TokenKind::Text
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    /// Yields every token including the final `EndOfFile`, then stops.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let token = self.lex();
        if token.kind == TokenKind::EndOfFile {
            self.finished = true;
        }
        Some(token)
    }
}

/// Tokenizes the whole input; the last token is `EndOfFile`.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).collect()
}

/// Longest keyword, `__halt_compiler`.
const MAX_KEYWORD_LEN: usize = 15;

pub(crate) fn is_label_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_' || c >= 0x80
}

pub(crate) fn is_label_char(c: u8) -> bool {
    is_label_start(c) || c.is_ascii_digit()
}

pub(crate) fn is_whitespace(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\n' | b'\r')
}
