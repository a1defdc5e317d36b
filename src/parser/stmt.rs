use crate::cst::PhraseKind;
use crate::lexer::token::TokenKind;
use crate::parser::Parser;
use crate::parser::token_set::{EXPRESSION_START, STATEMENT_START, TokenSet};

const CLOSE_BRACE: TokenSet = TokenSet::new(&[TokenKind::CloseBrace]);
const STATEMENT_END: TokenSet = TokenSet::new(&[TokenKind::Semicolon, TokenKind::CloseTag]);
const NAME_START: TokenSet = TokenSet::new(&[TokenKind::Name, TokenKind::Backslash, TokenKind::Namespace]);

impl<'src> Parser<'src> {
    pub(super) fn parse_expression_statement(&mut self) {
        self.start(PhraseKind::ExpressionStatement);
        self.parse_expression_into(0);
        self.expect(TokenKind::Semicolon);
        self.finish();
    }

    /// `{ statements }`; also used for function and method bodies.
    pub(super) fn parse_compound_statement(&mut self, kind: PhraseKind) {
        self.start(kind);
        self.expect(TokenKind::OpenBrace);
        self.parse_optional_statement_list(CLOSE_BRACE);
        self.expect(TokenKind::CloseBrace);
        self.finish();
    }

    /// `break`, `continue` and `return`, each with an optional operand.
    pub(super) fn parse_keyword_expression_statement(&mut self, kind: PhraseKind) {
        self.start(kind);
        self.bump();
        if EXPRESSION_START.contains(self.peek(0)) {
            self.parse_expression_into(0);
        }
        self.expect(TokenKind::Semicolon);
        self.finish();
    }

    fn parse_parenthesised_condition(&mut self) {
        self.expect(TokenKind::OpenParenthesis);
        self.parse_expression_into(0);
        self.expect(TokenKind::CloseParenthesis);
    }

    /// Body of `while`, `for`, `foreach` and `declare`: a single statement,
    /// or `: statements end_keyword ;`.
    fn parse_block_or_alternative(&mut self, end_keyword: TokenKind) {
        let next = self.peek(0);
        if next == TokenKind::Colon {
            self.bump();
            self.parse_optional_statement_list(TokenSet::new(&[end_keyword]));
            self.expect(end_keyword);
            self.expect(TokenKind::Semicolon);
        } else if STATEMENT_START.contains(next) {
            self.parse_statement();
        } else {
            self.error(None);
        }
    }

    pub(super) fn parse_if_statement(&mut self) {
        self.start(PhraseKind::IfStatement);
        self.bump(); // if
        self.parse_parenthesised_condition();

        let next = self.peek(0);
        if next == TokenKind::Colon {
            self.bump();
            self.parse_optional_statement_list(TokenSet::new(&[
                TokenKind::ElseIf,
                TokenKind::Else,
                TokenKind::EndIf,
            ]));
            self.parse_else_branches(true);
            self.expect(TokenKind::EndIf);
            self.expect(TokenKind::Semicolon);
        } else if STATEMENT_START.contains(next) {
            self.parse_statement();
            self.parse_else_branches(false);
        } else {
            self.error(None);
        }
        self.finish();
    }

    fn parse_else_branches(&mut self, alternative: bool) {
        if self.peek(0) == TokenKind::ElseIf {
            self.list(
                PhraseKind::ElseIfClauseList,
                |kind| kind == TokenKind::ElseIf,
                None,
                TokenSet::EMPTY,
                |parser| parser.parse_else_if_clause(alternative),
            );
        }
        if self.peek(0) == TokenKind::Else {
            self.start(PhraseKind::ElseClause);
            self.bump();
            if alternative {
                self.expect(TokenKind::Colon);
                self.parse_optional_statement_list(TokenSet::new(&[TokenKind::EndIf]));
            } else {
                self.parse_statement();
            }
            self.finish();
        }
    }

    fn parse_else_if_clause(&mut self, alternative: bool) {
        self.start(PhraseKind::ElseIfClause);
        self.bump(); // elseif
        self.parse_parenthesised_condition();
        if alternative {
            self.expect(TokenKind::Colon);
            self.parse_optional_statement_list(TokenSet::new(&[
                TokenKind::EndIf,
                TokenKind::Else,
                TokenKind::ElseIf,
            ]));
        } else {
            self.parse_statement();
        }
        self.finish();
    }

    pub(super) fn parse_while_statement(&mut self) {
        self.start(PhraseKind::WhileStatement);
        self.bump();
        self.parse_parenthesised_condition();
        self.parse_block_or_alternative(TokenKind::EndWhile);
        self.finish();
    }

    pub(super) fn parse_do_statement(&mut self) {
        self.start(PhraseKind::DoStatement);
        self.bump();
        self.parse_statement();
        self.expect(TokenKind::While);
        self.parse_parenthesised_condition();
        self.expect(TokenKind::Semicolon);
        self.finish();
    }

    pub(super) fn parse_for_statement(&mut self) {
        self.start(PhraseKind::ForStatement);
        self.bump();
        self.expect(TokenKind::OpenParenthesis);
        self.parse_for_expression_group(PhraseKind::ForInitialiser, TokenKind::Semicolon);
        self.expect(TokenKind::Semicolon);
        self.parse_for_expression_group(PhraseKind::ForControl, TokenKind::Semicolon);
        self.expect(TokenKind::Semicolon);
        self.parse_for_expression_group(PhraseKind::ForEndOfLoop, TokenKind::CloseParenthesis);
        self.expect(TokenKind::CloseParenthesis);
        self.parse_block_or_alternative(TokenKind::EndFor);
        self.finish();
    }

    fn parse_for_expression_group(&mut self, kind: PhraseKind, terminator: TokenKind) {
        if !EXPRESSION_START.contains(self.peek(0)) {
            return;
        }
        self.delimited_list(
            kind,
            |kind| EXPRESSION_START.contains(kind),
            TokenKind::Comma,
            TokenSet::new(&[terminator]),
            false,
            |parser| parser.parse_expression_into(0),
        );
    }

    pub(super) fn parse_foreach_statement(&mut self) {
        self.start(PhraseKind::ForEachStatement);
        self.bump();
        self.expect(TokenKind::OpenParenthesis);

        self.start(PhraseKind::ForEachCollection);
        self.parse_expression_into(0);
        self.finish();

        self.expect(TokenKind::As);
        if self.peek(0) == TokenKind::Ampersand {
            self.parse_foreach_value();
        } else {
            // Key or value; only the `=>` tells.
            self.start(PhraseKind::ForEachValue);
            self.parse_expression_into(0);
            if self.optional(TokenKind::FatArrow) {
                self.set_kind(PhraseKind::ForEachKey);
                self.finish();
                self.parse_foreach_value();
            } else {
                self.finish();
            }
        }

        self.expect(TokenKind::CloseParenthesis);
        self.parse_block_or_alternative(TokenKind::EndForeach);
        self.finish();
    }

    fn parse_foreach_value(&mut self) {
        self.start(PhraseKind::ForEachValue);
        if self.optional(TokenKind::Ampersand) {
            let atom = self.parse_variable_atom();
            let variable = self.parse_variable(atom);
            self.push(variable);
        } else {
            self.parse_expression_into(0);
        }
        self.finish();
    }

    pub(super) fn parse_switch_statement(&mut self) {
        self.start(PhraseKind::SwitchStatement);
        self.bump();
        self.parse_parenthesised_condition();

        let open = self.expect_one_of(TokenSet::new(&[TokenKind::Colon, TokenKind::OpenBrace]));
        let close = if open == Some(TokenKind::Colon) { TokenKind::EndSwitch } else { TokenKind::CloseBrace };
        if matches!(self.peek(0), TokenKind::Case | TokenKind::Default) {
            self.list(
                PhraseKind::CaseStatementList,
                |kind| matches!(kind, TokenKind::Case | TokenKind::Default),
                Some(TokenSet::new(&[close])),
                TokenSet::new(&[TokenKind::Case, TokenKind::Default]),
                |parser| parser.parse_case_statement(close),
            );
        }
        self.expect(close);
        if close == TokenKind::EndSwitch {
            self.expect(TokenKind::Semicolon);
        }
        self.finish();
    }

    fn parse_case_statement(&mut self, close: TokenKind) {
        if self.peek(0) == TokenKind::Case {
            self.start(PhraseKind::CaseStatement);
            self.bump();
            self.parse_expression_into(0);
        } else {
            self.start(PhraseKind::DefaultStatement);
            self.bump();
        }
        // `case 1;` is accepted by PHP as well.
        self.expect_one_of(TokenSet::new(&[TokenKind::Colon, TokenKind::Semicolon]));
        self.parse_optional_statement_list(TokenSet::new(&[TokenKind::Case, TokenKind::Default, close]));
        self.finish();
    }

    pub(super) fn parse_global_declaration(&mut self) {
        self.start(PhraseKind::GlobalDeclaration);
        self.bump();
        self.delimited_list(
            PhraseKind::VariableNameList,
            |kind| matches!(kind, TokenKind::VariableName | TokenKind::Dollar),
            TokenKind::Comma,
            STATEMENT_END,
            false,
            |parser| {
                let variable = parser.parse_simple_variable();
                parser.push(variable);
            },
        );
        self.expect(TokenKind::Semicolon);
        self.finish();
    }

    pub(super) fn parse_function_static_declaration(&mut self) {
        self.start(PhraseKind::FunctionStaticDeclaration);
        self.bump(); // static
        self.delimited_list(
            PhraseKind::StaticVariableDeclarationList,
            |kind| kind == TokenKind::VariableName,
            TokenKind::Comma,
            STATEMENT_END,
            false,
            Self::parse_static_variable_declaration,
        );
        self.expect(TokenKind::Semicolon);
        self.finish();
    }

    fn parse_static_variable_declaration(&mut self) {
        self.start(PhraseKind::StaticVariableDeclaration);
        self.expect(TokenKind::VariableName);
        if self.peek(0) == TokenKind::Equals {
            self.start(PhraseKind::FunctionStaticInitialiser);
            self.bump();
            self.parse_expression_into(0);
            self.finish();
        }
        self.finish();
    }

    /// `?>`, inline text and `<?php`, in whichever subset is present.
    pub(super) fn parse_inline_text(&mut self) {
        self.start(PhraseKind::InlineText);
        self.optional(TokenKind::CloseTag);
        self.optional(TokenKind::Text);
        self.optional(TokenKind::OpenTag);
        self.finish();
    }

    pub(super) fn parse_declare_statement(&mut self) {
        self.start(PhraseKind::DeclareStatement);
        self.bump();
        self.expect(TokenKind::OpenParenthesis);

        self.start(PhraseKind::DeclareDirective);
        self.expect(TokenKind::Name);
        self.expect(TokenKind::Equals);
        self.expect_one_of(TokenSet::new(&[
            TokenKind::IntegerLiteral,
            TokenKind::FloatingLiteral,
            TokenKind::StringLiteral,
        ]));
        self.finish();

        self.expect(TokenKind::CloseParenthesis);
        if !self.optional(TokenKind::Semicolon) {
            self.parse_block_or_alternative(TokenKind::EndDeclare);
        }
        self.finish();
    }

    pub(super) fn parse_try_statement(&mut self) {
        self.start(PhraseKind::TryStatement);
        self.bump();
        self.parse_compound_statement(PhraseKind::CompoundStatement);
        if self.peek(0) == TokenKind::Catch {
            self.list(
                PhraseKind::CatchClauseList,
                |kind| kind == TokenKind::Catch,
                None,
                TokenSet::EMPTY,
                Self::parse_catch_clause,
            );
        }
        if self.peek(0) == TokenKind::Finally {
            self.start(PhraseKind::FinallyClause);
            self.bump();
            self.parse_compound_statement(PhraseKind::CompoundStatement);
            self.finish();
        }
        self.finish();
    }

    fn parse_catch_clause(&mut self) {
        self.start(PhraseKind::CatchClause);
        self.bump();
        self.expect(TokenKind::OpenParenthesis);
        self.delimited_list(
            PhraseKind::CatchNameList,
            |kind| NAME_START.contains(kind),
            TokenKind::Bar,
            TokenSet::new(&[TokenKind::VariableName, TokenKind::CloseParenthesis]),
            false,
            |parser| {
                let name = parser.parse_qualified_name();
                parser.push(name);
            },
        );
        self.expect(TokenKind::VariableName);
        self.expect(TokenKind::CloseParenthesis);
        self.parse_compound_statement(PhraseKind::CompoundStatement);
        self.finish();
    }

    pub(super) fn parse_throw_statement(&mut self) {
        self.start(PhraseKind::ThrowStatement);
        self.bump();
        self.parse_expression_into(0);
        self.expect(TokenKind::Semicolon);
        self.finish();
    }

    pub(super) fn parse_goto_statement(&mut self) {
        self.start(PhraseKind::GotoStatement);
        self.bump();
        self.expect(TokenKind::Name);
        self.expect(TokenKind::Semicolon);
        self.finish();
    }

    pub(super) fn parse_named_label_statement(&mut self) {
        self.start(PhraseKind::NamedLabelStatement);
        self.bump(); // name
        self.bump(); // :
        self.finish();
    }

    /// `echo a, b;` and the short `<?= a ?>` form.
    pub(super) fn parse_echo_intrinsic(&mut self) {
        self.start(PhraseKind::EchoIntrinsic);
        self.bump();
        self.delimited_list(
            PhraseKind::ExpressionList,
            |kind| EXPRESSION_START.contains(kind),
            TokenKind::Comma,
            STATEMENT_END,
            false,
            |parser| parser.parse_expression_into(0),
        );
        self.expect(TokenKind::Semicolon);
        self.finish();
    }

    pub(super) fn parse_unset_intrinsic(&mut self) {
        self.start(PhraseKind::UnsetIntrinsic);
        self.bump();
        self.expect(TokenKind::OpenParenthesis);
        if EXPRESSION_START.contains(self.peek(0)) {
            self.parse_variable_list(true);
        }
        self.expect(TokenKind::CloseParenthesis);
        self.expect(TokenKind::Semicolon);
        self.finish();
    }

    pub(super) fn parse_halt_compiler_statement(&mut self) {
        self.start(PhraseKind::HaltCompilerStatement);
        self.bump();
        self.expect(TokenKind::OpenParenthesis);
        self.expect(TokenKind::CloseParenthesis);
        self.expect(TokenKind::Semicolon);
        self.finish();
    }
}
