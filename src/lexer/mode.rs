use serde::Serialize;

/// Lexical context. The active mode is the top of the lexer's mode stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LexMode {
    /// Outside `<?php ... ?>`; everything is inline text.
    Initial,
    Scripting,
    /// Directly after `->`: the next label is a property name, never a keyword.
    LookingForProperty,
    DoubleQuotes,
    NowDoc,
    HereDoc,
    /// The closing heredoc label is next.
    EndHereDoc,
    Backtick,
    /// Inside `[...]` following a variable interpolated in a string.
    VarOffset,
    /// Directly after `${` inside a string.
    LookingForVarName,
    /// Between `__halt_compiler` and its terminating `;` or `?>`.
    HaltCompiler,
    /// Everything after `__halt_compiler();` is raw data.
    RawData,
}

impl LexMode {
    /// Modes that only close on an explicit delimiter; reaching end of input
    /// in one of these means the construct was left open.
    pub fn is_quoted(self) -> bool {
        matches!(
            self,
            LexMode::DoubleQuotes
                | LexMode::NowDoc
                | LexMode::HereDoc
                | LexMode::EndHereDoc
                | LexMode::Backtick
                | LexMode::VarOffset
                | LexMode::LookingForVarName
        )
    }
}
