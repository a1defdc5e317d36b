use std::sync::Arc;

use serde::Serialize;

use crate::lexer::mode::LexMode;
use crate::span::Span;

/// Lexical mode stack as it stood before a token was recognized.
pub type ModeStack = Arc<[LexMode]>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub offset: usize,
    pub length: usize,
    #[serde(rename = "modeStack")]
    pub mode_stack: ModeStack,
}

impl Token {
    pub fn new(kind: TokenKind, offset: usize, length: usize, mode_stack: ModeStack) -> Self {
        Self { kind, offset, length, mode_stack }
    }

    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    pub fn span(&self) -> Span {
        Span::new(self.offset, self.end())
    }

    pub fn text<'src>(&self, source: &'src str) -> &'src str {
        self.span().as_str(source)
    }

    pub fn is_trivia(&self) -> bool {
        self.kind.is_trivia()
    }
}

ordinal_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
    pub enum TokenKind {
        Unknown => "unknown character",
        EndOfFile => "end of file",

        // Keywords
        Abstract => "abstract",
        Array => "array",
        As => "as",
        Break => "break",
        Callable => "callable",
        Case => "case",
        Catch => "catch",
        Class => "class",
        Clone => "clone",
        Const => "const",
        Continue => "continue",
        Declare => "declare",
        Default => "default",
        Do => "do",
        Echo => "echo",
        Else => "else",
        ElseIf => "elseif",
        Empty => "empty",
        EndDeclare => "enddeclare",
        EndFor => "endfor",
        EndForeach => "endforeach",
        EndIf => "endif",
        EndSwitch => "endswitch",
        EndWhile => "endwhile",
        Eval => "eval",
        Exit => "exit",
        Extends => "extends",
        Final => "final",
        Finally => "finally",
        For => "for",
        ForEach => "foreach",
        Function => "function",
        Global => "global",
        Goto => "goto",
        HaltCompiler => "__halt_compiler",
        If => "if",
        Implements => "implements",
        Include => "include",
        IncludeOnce => "include_once",
        InstanceOf => "instanceof",
        InsteadOf => "insteadof",
        Interface => "interface",
        Isset => "isset",
        List => "list",
        And => "and",
        Or => "or",
        Xor => "xor",
        Namespace => "namespace",
        New => "new",
        Print => "print",
        Private => "private",
        Public => "public",
        Protected => "protected",
        Require => "require",
        RequireOnce => "require_once",
        Return => "return",
        Static => "static",
        Switch => "switch",
        Throw => "throw",
        Trait => "trait",
        Try => "try",
        Unset => "unset",
        Use => "use",
        Var => "var",
        While => "while",
        Yield => "yield",
        YieldFrom => "yield from",

        // Magic constants
        ClassConstant => "__CLASS__",
        DirectoryConstant => "__DIR__",
        FileConstant => "__FILE__",
        FunctionConstant => "__FUNCTION__",
        LineConstant => "__LINE__",
        MethodConstant => "__METHOD__",
        NamespaceConstant => "__NAMESPACE__",
        TraitConstant => "__TRAIT__",

        // Literals
        StringLiteral => "string literal",
        FloatingLiteral => "floating point literal",
        EncapsulatedAndWhitespace => "string content",
        Text => "inline text",
        IntegerLiteral => "integer literal",

        // Names
        Name => "name",
        VariableName => "variable",

        // Operators and punctuation
        Equals => "'='",
        Tilde => "'~'",
        Colon => "':'",
        Semicolon => "';'",
        Exclamation => "'!'",
        Dollar => "'$'",
        ForwardSlash => "'/'",
        Percent => "'%'",
        Comma => "','",
        AtSymbol => "'@'",
        Backtick => "'`'",
        Question => "'?'",
        DoubleQuote => "'\"'",
        LessThan => "'<'",
        GreaterThan => "'>'",
        Asterisk => "'*'",
        AmpersandAmpersand => "'&&'",
        Ampersand => "'&'",
        AmpersandEquals => "'&='",
        CaretEquals => "'^='",
        LessThanLessThan => "'<<'",
        LessThanLessThanEquals => "'<<='",
        GreaterThanGreaterThan => "'>>'",
        GreaterThanGreaterThanEquals => "'>>='",
        BarEquals => "'|='",
        Plus => "'+'",
        PlusEquals => "'+='",
        AsteriskAsterisk => "'**'",
        AsteriskAsteriskEquals => "'**='",
        Arrow => "'->'",
        OpenBrace => "'{'",
        OpenBracket => "'['",
        OpenParenthesis => "'('",
        CloseBrace => "'}'",
        CloseBracket => "']'",
        CloseParenthesis => "')'",
        QuestionQuestion => "'??'",
        QuestionQuestionEquals => "'??='",
        Bar => "'|'",
        BarBar => "'||'",
        Caret => "'^'",
        Dot => "'.'",
        DotEquals => "'.='",
        CurlyOpen => "'{$'",
        MinusMinus => "'--'",
        ForwardslashEquals => "'/='",
        DollarCurlyOpen => "'${'",
        FatArrow => "'=>'",
        ColonColon => "'::'",
        Ellipsis => "'...'",
        PlusPlus => "'++'",
        EqualsEquals => "'=='",
        GreaterThanEquals => "'>='",
        EqualsEqualsEquals => "'==='",
        ExclamationEquals => "'!='",
        ExclamationEqualsEquals => "'!=='",
        LessThanEquals => "'<='",
        Spaceship => "'<=>'",
        Minus => "'-'",
        MinusEquals => "'-='",
        PercentEquals => "'%='",
        AsteriskEquals => "'*='",
        Backslash => "'\\'",
        BooleanCast => "'(bool)'",
        UnsetCast => "'(unset)'",
        StringCast => "'(string)'",
        ObjectCast => "'(object)'",
        IntegerCast => "'(int)'",
        FloatCast => "'(float)'",
        ArrayCast => "'(array)'",
        StartHeredoc => "'<<<'",
        EndHeredoc => "heredoc end label",
        OpenTag => "'<?php'",
        OpenTagEcho => "'<?='",
        CloseTag => "'?>'",

        // Trivia
        Comment => "comment",
        DocumentComment => "doc comment",
        Whitespace => "whitespace",
    }
}

impl TokenKind {
    /// Comments and whitespace: kept in the tree, invisible to the grammar.
    pub fn is_trivia(self) -> bool {
        matches!(self, TokenKind::Comment | TokenKind::DocumentComment | TokenKind::Whitespace)
    }

    pub fn is_cast(self) -> bool {
        matches!(
            self,
            TokenKind::BooleanCast
                | TokenKind::UnsetCast
                | TokenKind::StringCast
                | TokenKind::ObjectCast
                | TokenKind::IntegerCast
                | TokenKind::FloatCast
                | TokenKind::ArrayCast
        )
    }

    pub fn is_magic_constant(self) -> bool {
        matches!(
            self,
            TokenKind::ClassConstant
                | TokenKind::DirectoryConstant
                | TokenKind::FileConstant
                | TokenKind::FunctionConstant
                | TokenKind::LineConstant
                | TokenKind::MethodConstant
                | TokenKind::NamespaceConstant
                | TokenKind::TraitConstant
        )
    }

    /// Keywords that may still name class members and constants.
    pub fn is_semi_reserved(self) -> bool {
        self.is_reserved()
            || matches!(
                self,
                TokenKind::Static
                    | TokenKind::Abstract
                    | TokenKind::Final
                    | TokenKind::Private
                    | TokenKind::Protected
                    | TokenKind::Public
            )
    }

    pub fn is_reserved(self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            Include | IncludeOnce | Eval | Require | RequireOnce | Or | Xor | And | InstanceOf
                | New | Clone | Exit | If | ElseIf | Else | EndIf | Echo | Do | While | EndWhile
                | For | EndFor | ForEach | EndForeach | Declare | EndDeclare | As | Try | Catch
                | Finally | Throw | Use | InsteadOf | Global | Var | Unset | Isset | Empty
                | Continue | Goto | Function | Const | Return | Print | Yield | List | Switch
                | EndSwitch | Case | Default | Break | Array | Callable | Extends | Implements
                | Namespace | Trait | Interface | Class | ClassConstant | TraitConstant
                | FunctionConstant | MethodConstant | LineConstant | FileConstant
                | DirectoryConstant | NamespaceConstant | HaltCompiler
        )
    }
}

/// Case-insensitive keyword lookup for a scanned label, already lowercased.
pub(crate) fn keyword(lowercase: &[u8]) -> Option<TokenKind> {
    use TokenKind::*;
    let kind = match lowercase {
        b"abstract" => Abstract,
        b"and" => And,
        b"array" => Array,
        b"as" => As,
        b"break" => Break,
        b"callable" => Callable,
        b"case" => Case,
        b"catch" => Catch,
        b"class" => Class,
        b"clone" => Clone,
        b"const" => Const,
        b"continue" => Continue,
        b"declare" => Declare,
        b"default" => Default,
        b"die" => Exit,
        b"do" => Do,
        b"echo" => Echo,
        b"else" => Else,
        b"elseif" => ElseIf,
        b"empty" => Empty,
        b"enddeclare" => EndDeclare,
        b"endfor" => EndFor,
        b"endforeach" => EndForeach,
        b"endif" => EndIf,
        b"endswitch" => EndSwitch,
        b"endwhile" => EndWhile,
        b"eval" => Eval,
        b"exit" => Exit,
        b"extends" => Extends,
        b"final" => Final,
        b"finally" => Finally,
        b"for" => For,
        b"foreach" => ForEach,
        b"function" => Function,
        b"global" => Global,
        b"goto" => Goto,
        b"__halt_compiler" => HaltCompiler,
        b"if" => If,
        b"implements" => Implements,
        b"include" => Include,
        b"include_once" => IncludeOnce,
        b"instanceof" => InstanceOf,
        b"insteadof" => InsteadOf,
        b"interface" => Interface,
        b"isset" => Isset,
        b"list" => List,
        b"namespace" => Namespace,
        b"new" => New,
        b"or" => Or,
        b"print" => Print,
        b"private" => Private,
        b"protected" => Protected,
        b"public" => Public,
        b"require" => Require,
        b"require_once" => RequireOnce,
        b"return" => Return,
        b"static" => Static,
        b"switch" => Switch,
        b"throw" => Throw,
        b"trait" => Trait,
        b"try" => Try,
        b"unset" => Unset,
        b"use" => Use,
        b"var" => Var,
        b"while" => While,
        b"xor" => Xor,
        b"yield" => Yield,
        _ => return None,
    };
    Some(kind)
}

/// Magic constants match case-sensitively and by exact name.
pub(crate) fn magic_constant(label: &[u8]) -> Option<TokenKind> {
    use TokenKind::*;
    let kind = match label {
        b"__CLASS__" => ClassConstant,
        b"__DIR__" => DirectoryConstant,
        b"__FILE__" => FileConstant,
        b"__FUNCTION__" => FunctionConstant,
        b"__LINE__" => LineConstant,
        b"__METHOD__" => MethodConstant,
        b"__NAMESPACE__" => NamespaceConstant,
        b"__TRAIT__" => TraitConstant,
        _ => return None,
    };
    Some(kind)
}

pub(crate) fn cast(lowercase: &[u8]) -> Option<TokenKind> {
    use TokenKind::*;
    let kind = match lowercase {
        b"int" | b"integer" => IntegerCast,
        b"bool" | b"boolean" => BooleanCast,
        b"float" | b"double" | b"real" => FloatCast,
        b"string" | b"binary" => StringCast,
        b"array" => ArrayCast,
        b"object" => ObjectCast,
        b"unset" => UnsetCast,
        _ => return None,
    };
    Some(kind)
}
