//! Scanners for the inside of double-quoted strings, backticks, heredocs and
//! nowdocs, plus the small modes that interpolated variables push.

use memchr::memchr2;

use super::{LexMode, Lexer, TokenKind, is_label_char, is_label_start, is_whitespace};

impl<'src> Lexer<'src> {
    pub(super) fn double_quotes(&mut self) -> TokenKind {
        if let Some(kind) = self.interpolation_start(b'"') {
            return kind;
        }
        match self.double_quote_scan.take() {
            Some((at, length)) if at == self.position && length > 0 => self.position += length,
            _ => self.scan_encapsulated(b'"'),
        }
        TokenKind::EncapsulatedAndWhitespace
    }

    pub(super) fn backtick(&mut self) -> TokenKind {
        if let Some(kind) = self.interpolation_start(b'`') {
            return kind;
        }
        self.scan_encapsulated(b'`');
        TokenKind::EncapsulatedAndWhitespace
    }

    pub(super) fn heredoc(&mut self) -> TokenKind {
        if let Some(kind) = self.interpolation_start(0) {
            return kind;
        }
        while let Some(c) = self.current() {
            self.position += 1;
            match c {
                b'\\' => {
                    if self.current().is_some_and(|next| next != b'\n' && next != b'\r') {
                        self.position += 1;
                    }
                }
                b'\n' | b'\r' => {
                    if self.heredoc_end_at(self.position) {
                        self.replace_mode(LexMode::EndHereDoc);
                        break;
                    }
                }
                b'$' if self.is_interpolation_dollar(self.position - 1) => {
                    self.position -= 1;
                    break;
                }
                b'{' if self.current() == Some(b'$') => {
                    self.position -= 1;
                    break;
                }
                _ => {}
            }
        }
        TokenKind::EncapsulatedAndWhitespace
    }

    /// Nowdoc bodies are raw; only the closing label ends them.
    pub(super) fn nowdoc(&mut self) -> TokenKind {
        loop {
            match memchr2(b'\n', b'\r', &self.input[self.position..]) {
                Some(found) => {
                    self.position += found + 1;
                    if self.heredoc_end_at(self.position) {
                        self.replace_mode(LexMode::EndHereDoc);
                        break;
                    }
                }
                None => {
                    self.position = self.input.len();
                    break;
                }
            }
        }
        TokenKind::EncapsulatedAndWhitespace
    }

    pub(super) fn end_heredoc(&mut self) -> TokenKind {
        let length = match self.heredoc_labels.pop() {
            Some(label) => label.len(),
            None => (self.label_end(self.position) - self.position).max(1),
        };
        self.position = (self.position + length).min(self.input.len());
        self.pop_mode();
        TokenKind::EndHeredoc
    }

    /// `[...]` after an interpolated variable: a restricted offset grammar.
    pub(super) fn var_offset(&mut self) -> TokenKind {
        let c = self.input[self.position];
        self.position += 1;
        match c {
            b'$' if self.current().is_some_and(is_label_start) => {
                self.skip_while(is_label_char);
                TokenKind::VariableName
            }
            b'[' => TokenKind::OpenBracket,
            b']' => {
                self.pop_mode();
                TokenKind::CloseBracket
            }
            b'-' => TokenKind::Minus,
            b'0'..=b'9' => {
                match (c, self.current(), self.byte_at(self.position + 1)) {
                    (b'0', Some(b'x' | b'X'), Some(digit)) if digit.is_ascii_hexdigit() => {
                        self.position += 2;
                        self.skip_while(|c| c.is_ascii_hexdigit());
                    }
                    (b'0', Some(b'b' | b'B'), Some(b'0' | b'1')) => {
                        self.position += 2;
                        self.skip_while(|c| c == b'0' || c == b'1');
                    }
                    _ => self.skip_while(|c| c.is_ascii_digit()),
                }
                TokenKind::IntegerLiteral
            }
            c if is_label_start(c) => {
                self.skip_while(is_label_char);
                TokenKind::Name
            }
            _ => {
                self.pop_mode();
                TokenKind::Unknown
            }
        }
    }

    pub(super) fn looking_for_property(&mut self) -> Option<TokenKind> {
        let c = self.input[self.position];
        if is_whitespace(c) {
            self.skip_while(is_whitespace);
            return Some(TokenKind::Whitespace);
        }
        if is_label_start(c) {
            self.position = self.label_end(self.position + 1);
            self.pop_mode();
            return Some(TokenKind::Name);
        }
        if c == b'-' && self.byte_at(self.position + 1) == Some(b'>') {
            self.position += 2;
            return Some(TokenKind::Arrow);
        }
        self.pop_mode();
        None
    }

    /// After `${`: a label directly followed by `[` or `}` is a variable name.
    pub(super) fn looking_for_var_name(&mut self) -> Option<TokenKind> {
        let start = self.position;
        if is_label_start(self.input[start]) {
            let end = self.label_end(start + 1);
            if matches!(self.byte_at(end), Some(b'[' | b'}')) {
                self.position = end;
                self.replace_mode(LexMode::Scripting);
                return Some(TokenKind::VariableName);
            }
        }
        self.replace_mode(LexMode::Scripting);
        None
    }

    /// Shared opening of every interpolating mode: `$var`, `${`, `{$`, or the
    /// closing delimiter (`0` when the mode has none).
    fn interpolation_start(&mut self, terminator: u8) -> Option<TokenKind> {
        match self.input[self.position] {
            b'$' => self.encapsulated_dollar(),
            b'{' if self.byte_at(self.position + 1) == Some(b'$') => {
                self.position += 1;
                self.push_mode(LexMode::Scripting);
                Some(TokenKind::CurlyOpen)
            }
            c if c == terminator && terminator != 0 => {
                self.position += 1;
                self.pop_mode();
                Some(if c == b'"' { TokenKind::DoubleQuote } else { TokenKind::Backtick })
            }
            _ => None,
        }
    }

    fn encapsulated_dollar(&mut self) -> Option<TokenKind> {
        let next = self.byte_at(self.position + 1)?;
        if next == b'{' {
            self.position += 2;
            self.push_mode(LexMode::LookingForVarName);
            return Some(TokenKind::DollarCurlyOpen);
        }
        if !is_label_start(next) {
            return None;
        }
        self.position = self.label_end(self.position + 2);
        match self.current() {
            Some(b'[') => self.push_mode(LexMode::VarOffset),
            Some(b'-')
                if self.byte_at(self.position + 1) == Some(b'>')
                    && self.byte_at(self.position + 2).is_some_and(is_label_start) =>
            {
                self.push_mode(LexMode::LookingForProperty)
            }
            _ => {}
        }
        Some(TokenKind::VariableName)
    }

    pub(super) fn is_interpolation_dollar(&self, at: usize) -> bool {
        self.byte_at(at + 1).is_some_and(|next| next == b'{' || is_label_start(next))
    }

    /// Consumes literal text up to the next interpolation or the terminator,
    /// stepping over backslash escapes.
    fn scan_encapsulated(&mut self, terminator: u8) {
        let len = self.input.len();
        while let Some(c) = self.current() {
            match c {
                b'$' if self.is_interpolation_dollar(self.position) => break,
                b'{' if self.byte_at(self.position + 1) == Some(b'$') => break,
                b'\\' => {
                    self.position = (self.position + 2).min(len);
                    continue;
                }
                c if c == terminator => break,
                _ => {}
            }
            self.position += 1;
        }
    }

    /// Whether the active heredoc label starts at `at`, followed by an
    /// optional `;` and then a line break or end of input.
    pub(super) fn heredoc_end_at(&self, at: usize) -> bool {
        let Some(label) = self.heredoc_labels.last() else {
            return false;
        };
        if !self.input[at..].starts_with(label) {
            return false;
        }
        let mut end = at + label.len();
        if self.byte_at(end) == Some(b';') {
            end += 1;
        }
        matches!(self.byte_at(end), None | Some(b'\n' | b'\r'))
    }
}
