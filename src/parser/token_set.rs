use crate::lexer::token::TokenKind;

const _: () = assert!(TokenKind::ALL.len() <= 256);

/// Fixed-size bitset over token kinds, usable in `const` position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct TokenSet([u64; 4]);

impl TokenSet {
    pub(crate) const EMPTY: TokenSet = TokenSet([0; 4]);

    pub(crate) const fn new(kinds: &[TokenKind]) -> TokenSet {
        let mut bits = [0u64; 4];
        let mut i = 0;
        while i < kinds.len() {
            let ordinal = kinds[i] as usize;
            bits[ordinal / 64] |= 1 << (ordinal % 64);
            i += 1;
        }
        TokenSet(bits)
    }

    pub(crate) const fn contains(self, kind: TokenKind) -> bool {
        let ordinal = kind as usize;
        self.0[ordinal / 64] & (1 << (ordinal % 64)) != 0
    }

    pub(crate) const fn union(self, other: TokenSet) -> TokenSet {
        TokenSet([
            self.0[0] | other.0[0],
            self.0[1] | other.0[1],
            self.0[2] | other.0[2],
            self.0[3] | other.0[3],
        ])
    }

    pub(crate) const fn with(self, kind: TokenKind) -> TokenSet {
        self.union(TokenSet::new(&[kind]))
    }
}

use TokenKind::*;

pub(crate) const EXPRESSION_START: TokenSet = TokenSet::new(&[
    VariableName, Dollar, Array, OpenBracket, StringLiteral, Static, Name, Namespace, Backslash,
    Isset, Empty, Eval, Include, IncludeOnce, Require, RequireOnce, List, OpenParenthesis, New,
    Clone, Print, Yield, YieldFrom, PlusPlus, MinusMinus, Exclamation, Minus, Plus, Tilde,
    AtSymbol, BooleanCast, UnsetCast, StringCast, ObjectCast, IntegerCast, FloatCast, ArrayCast,
    Exit, Function, IntegerLiteral, FloatingLiteral, DoubleQuote, Backtick, StartHeredoc,
    ClassConstant, DirectoryConstant, FileConstant, FunctionConstant, LineConstant,
    MethodConstant, NamespaceConstant, TraitConstant,
]);

pub(crate) const STATEMENT_START: TokenSet = EXPRESSION_START.union(TokenSet::new(&[
    Namespace, Use, HaltCompiler, Const, Function, Class, Abstract, Final, Trait, Interface,
    OpenBrace, If, While, Do, For, Switch, Break, Continue, Return, Global, Static, Echo, Unset,
    ForEach, Declare, Try, Throw, Goto, Name, Semicolon, CloseTag, Text, OpenTag, OpenTagEcho,
]));

/// Tokens that reliably begin a statement; resynchronization stops here.
pub(crate) const STATEMENT_RECOVER: TokenSet = TokenSet::new(&[
    Use, HaltCompiler, Const, Function, Class, Abstract, Final, Trait, Interface, OpenBrace, If,
    While, Do, For, Switch, Break, Continue, Return, Global, Static, Echo, Unset, ForEach, Declare,
    Try, Throw, Goto, Semicolon, CloseTag, OpenTagEcho, Text, OpenTag,
]);

pub(crate) const MEMBER_MODIFIER: TokenSet =
    TokenSet::new(&[Public, Protected, Private, Static, Abstract, Final]);

pub(crate) const CLASS_MEMBER_START: TokenSet =
    MEMBER_MODIFIER.union(TokenSet::new(&[Function, Var, Const, Use]));

pub(crate) const INTERFACE_MEMBER_START: TokenSet =
    MEMBER_MODIFIER.union(TokenSet::new(&[Function, Const]));

pub(crate) const CLASS_MEMBER_RECOVER: TokenSet = CLASS_MEMBER_START;

pub(crate) const ARGUMENT_START: TokenSet = EXPRESSION_START.with(Ellipsis);

pub(crate) const ARRAY_ELEMENT_START: TokenSet = EXPRESSION_START.with(Ampersand);

pub(crate) const TYPE_DECLARATION_START: TokenSet =
    TokenSet::new(&[Question, Name, Backslash, Namespace, Array, Callable]);

pub(crate) const PARAMETER_START: TokenSet =
    TYPE_DECLARATION_START.union(TokenSet::new(&[Ampersand, Ellipsis, VariableName]));

pub(crate) const ENCAPSULATED_VARIABLE_START: TokenSet =
    TokenSet::new(&[EncapsulatedAndWhitespace, VariableName, DollarCurlyOpen, CurlyOpen]);

pub(crate) const DEREFERENCE: TokenSet =
    TokenSet::new(&[ColonColon, Arrow, OpenBracket, OpenBrace, OpenParenthesis]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_spans_all_words() {
        let set = TokenSet::new(&[Unknown, Whitespace, Semicolon]);
        assert!(set.contains(Unknown));
        assert!(set.contains(Whitespace));
        assert!(set.contains(Semicolon));
        assert!(!set.contains(Comment));
        assert!(!TokenSet::EMPTY.contains(Unknown));
    }

    #[test]
    fn statement_recover_tokens_start_statements() {
        for kind in TokenKind::ALL {
            if STATEMENT_RECOVER.contains(*kind) {
                assert!(STATEMENT_START.contains(*kind), "{kind:?}");
            }
        }
    }
}
