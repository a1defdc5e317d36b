use crate::cst::{Phrase, PhraseKind};
use crate::lexer::token::TokenKind;
use crate::parser::Parser;
use crate::parser::token_set::{
    CLASS_MEMBER_RECOVER, CLASS_MEMBER_START, INTERFACE_MEMBER_START, MEMBER_MODIFIER, PARAMETER_START,
    TYPE_DECLARATION_START, TokenSet,
};

const NAME_START: TokenSet = TokenSet::new(&[TokenKind::Name, TokenKind::Backslash, TokenKind::Namespace]);
const DECLARATION_END: TokenSet = TokenSet::new(&[TokenKind::Semicolon, TokenKind::CloseTag]);
const CLOSE_BRACE: TokenSet = TokenSet::new(&[TokenKind::CloseBrace]);

fn is_identifier(kind: TokenKind) -> bool {
    kind == TokenKind::Name || kind.is_semi_reserved()
}

impl<'src> Parser<'src> {
    /// `Name` or `\Name`, `namespace\Name`, with the matching phrase kind.
    pub(super) fn parse_qualified_name(&mut self) -> Phrase {
        self.start(PhraseKind::QualifiedName);
        match self.peek(0) {
            TokenKind::Backslash => {
                self.bump();
                self.set_kind(PhraseKind::FullyQualifiedName);
            }
            TokenKind::Namespace => {
                self.set_kind(PhraseKind::RelativeQualifiedName);
                self.bump();
                self.expect(TokenKind::Backslash);
            }
            _ => {}
        }
        self.parse_namespace_name();
        self.end()
    }

    pub(super) fn parse_namespace_name(&mut self) {
        self.start(PhraseKind::NamespaceName);
        self.expect(TokenKind::Name);
        while self.peek(0) == TokenKind::Backslash && self.peek(1) == TokenKind::Name {
            self.bump();
            self.bump();
        }
        self.finish();
    }

    fn parse_qualified_name_list(&mut self, break_on: TokenSet) {
        self.delimited_list(
            PhraseKind::QualifiedNameList,
            |kind| NAME_START.contains(kind),
            TokenKind::Comma,
            break_on,
            false,
            |parser| {
                let name = parser.parse_qualified_name();
                parser.push(name);
            },
        );
    }

    /// A name that may also be a keyword, as in member and constant names.
    pub(super) fn parse_identifier(&mut self) {
        self.start(PhraseKind::Identifier);
        if is_identifier(self.peek(0)) {
            self.bump();
        } else {
            self.error(Some(TokenKind::Name));
        }
        self.finish();
    }

    pub(super) fn parse_namespace_definition(&mut self) {
        self.start(PhraseKind::NamespaceDefinition);
        self.bump();
        if self.peek(0) == TokenKind::Name {
            self.parse_namespace_name();
            if self.optional(TokenKind::Semicolon) || self.peek(0) == TokenKind::CloseTag {
                self.finish();
                return;
            }
        }
        self.parse_compound_statement(PhraseKind::CompoundStatement);
        self.finish();
    }

    pub(super) fn parse_namespace_use_declaration(&mut self) {
        self.start(PhraseKind::NamespaceUseDeclaration);
        self.bump(); // use
        self.optional_one_of(TokenSet::new(&[TokenKind::Const, TokenKind::Function]));
        self.optional(TokenKind::Backslash);

        if self.is_use_group() {
            self.parse_namespace_name();
            self.expect(TokenKind::Backslash);
            self.expect(TokenKind::OpenBrace);
            self.delimited_list(
                PhraseKind::NamespaceUseGroupClauseList,
                |kind| matches!(kind, TokenKind::Name | TokenKind::Function | TokenKind::Const),
                TokenKind::Comma,
                CLOSE_BRACE,
                true,
                Self::parse_namespace_use_group_clause,
            );
            self.expect(TokenKind::CloseBrace);
        } else {
            self.delimited_list(
                PhraseKind::NamespaceUseClauseList,
                |kind| matches!(kind, TokenKind::Name | TokenKind::Backslash),
                TokenKind::Comma,
                DECLARATION_END,
                false,
                Self::parse_namespace_use_clause,
            );
        }
        self.expect(TokenKind::Semicolon);
        self.finish();
    }

    /// Looks past `A\B\` for the `{` of a group use.
    fn is_use_group(&mut self) -> bool {
        let mut n = 0;
        while self.peek(n) == TokenKind::Name {
            match self.peek(n + 1) {
                TokenKind::Backslash => n += 2,
                next => return next == TokenKind::OpenBrace,
            }
        }
        n > 0 && self.peek(n) == TokenKind::OpenBrace
    }

    fn parse_namespace_use_clause(&mut self) {
        self.start(PhraseKind::NamespaceUseClause);
        self.optional(TokenKind::Backslash);
        self.parse_namespace_name();
        self.parse_namespace_aliasing_clause();
        self.finish();
    }

    fn parse_namespace_use_group_clause(&mut self) {
        self.start(PhraseKind::NamespaceUseGroupClause);
        self.optional_one_of(TokenSet::new(&[TokenKind::Function, TokenKind::Const]));
        self.parse_namespace_name();
        self.parse_namespace_aliasing_clause();
        self.finish();
    }

    fn parse_namespace_aliasing_clause(&mut self) {
        if self.peek(0) != TokenKind::As {
            return;
        }
        self.start(PhraseKind::NamespaceAliasingClause);
        self.bump();
        self.expect(TokenKind::Name);
        self.finish();
    }

    pub(super) fn parse_const_declaration(&mut self) {
        self.start(PhraseKind::ConstDeclaration);
        self.bump();
        self.delimited_list(
            PhraseKind::ConstElementList,
            |kind| kind == TokenKind::Name,
            TokenKind::Comma,
            DECLARATION_END,
            false,
            |parser| {
                parser.start(PhraseKind::ConstElement);
                parser.expect(TokenKind::Name);
                parser.expect(TokenKind::Equals);
                parser.parse_expression_into(0);
                parser.finish();
            },
        );
        self.expect(TokenKind::Semicolon);
        self.finish();
    }

    pub(super) fn parse_function_declaration(&mut self) {
        self.start(PhraseKind::FunctionDeclaration);

        self.start(PhraseKind::FunctionDeclarationHeader);
        self.bump(); // function
        self.optional(TokenKind::Ampersand);
        self.expect(TokenKind::Name);
        self.parse_parameter_list();
        self.parse_return_type();
        self.finish();

        self.parse_compound_statement(PhraseKind::FunctionDeclarationBody);
        self.finish();
    }

    /// `( parameters )`.
    pub(super) fn parse_parameter_list(&mut self) {
        self.expect(TokenKind::OpenParenthesis);
        if PARAMETER_START.contains(self.peek(0)) {
            self.delimited_list(
                PhraseKind::ParameterDeclarationList,
                |kind| PARAMETER_START.contains(kind),
                TokenKind::Comma,
                TokenSet::new(&[TokenKind::CloseParenthesis]),
                false,
                Self::parse_parameter_declaration,
            );
        }
        self.expect(TokenKind::CloseParenthesis);
    }

    fn parse_parameter_declaration(&mut self) {
        self.start(PhraseKind::ParameterDeclaration);
        if TYPE_DECLARATION_START.contains(self.peek(0)) {
            self.parse_type_declaration();
        }
        self.optional(TokenKind::Ampersand);
        self.optional(TokenKind::Ellipsis);
        self.expect(TokenKind::VariableName);
        if self.optional(TokenKind::Equals) {
            self.parse_expression_into(0);
        }
        self.finish();
    }

    fn parse_type_declaration(&mut self) {
        self.start(PhraseKind::TypeDeclaration);
        self.optional(TokenKind::Question);
        match self.peek(0) {
            TokenKind::Callable | TokenKind::Array => {
                self.bump();
            }
            TokenKind::Name | TokenKind::Namespace | TokenKind::Backslash => {
                let name = self.parse_qualified_name();
                self.push(name);
            }
            _ => self.error(None),
        }
        self.finish();
    }

    pub(super) fn parse_return_type(&mut self) {
        if self.peek(0) != TokenKind::Colon {
            return;
        }
        self.start(PhraseKind::ReturnType);
        self.bump();
        self.parse_type_declaration();
        self.finish();
    }

    pub(super) fn parse_class_declaration(&mut self) {
        self.start(PhraseKind::ClassDeclaration);

        self.start(PhraseKind::ClassDeclarationHeader);
        if matches!(self.peek(0), TokenKind::Abstract | TokenKind::Final) {
            self.start(PhraseKind::ClassModifiers);
            self.bump();
            self.finish();
        }
        self.expect(TokenKind::Class);
        self.expect(TokenKind::Name);
        self.parse_class_base_clause();
        self.parse_class_interface_clause();
        self.finish();

        self.parse_class_declaration_body(
            PhraseKind::ClassDeclarationBody,
            PhraseKind::ClassMemberDeclarationList,
            CLASS_MEMBER_START,
        );
        self.finish();
    }

    fn parse_class_base_clause(&mut self) {
        if self.peek(0) != TokenKind::Extends {
            return;
        }
        self.start(PhraseKind::ClassBaseClause);
        self.bump();
        let name = self.parse_qualified_name();
        self.push(name);
        self.finish();
    }

    fn parse_class_interface_clause(&mut self) {
        if self.peek(0) != TokenKind::Implements {
            return;
        }
        self.start(PhraseKind::ClassInterfaceClause);
        self.bump();
        self.parse_qualified_name_list(TokenSet::new(&[TokenKind::OpenBrace]));
        self.finish();
    }

    /// `{ members }` of a class, interface or trait.
    fn parse_class_declaration_body(&mut self, kind: PhraseKind, list: PhraseKind, starts: TokenSet) {
        self.start(kind);
        self.expect(TokenKind::OpenBrace);
        if starts.contains(self.peek(0)) {
            self.list(
                list,
                |kind| starts.contains(kind),
                Some(CLOSE_BRACE),
                CLASS_MEMBER_RECOVER,
                Self::parse_class_member_declaration,
            );
        }
        self.expect(TokenKind::CloseBrace);
        self.finish();
    }

    /// `new class (args) extends A implements B { ... }`
    pub(super) fn parse_anonymous_class_declaration(&mut self) {
        self.start(PhraseKind::AnonymousClassDeclaration);

        self.start(PhraseKind::AnonymousClassDeclarationHeader);
        self.bump(); // class
        if self.optional(TokenKind::OpenParenthesis) {
            self.parse_optional_argument_list();
            self.expect(TokenKind::CloseParenthesis);
        }
        self.parse_class_base_clause();
        self.parse_class_interface_clause();
        self.finish();

        self.parse_class_declaration_body(
            PhraseKind::ClassDeclarationBody,
            PhraseKind::ClassMemberDeclarationList,
            CLASS_MEMBER_START,
        );
        self.finish();
    }

    pub(super) fn parse_interface_declaration(&mut self) {
        self.start(PhraseKind::InterfaceDeclaration);

        self.start(PhraseKind::InterfaceDeclarationHeader);
        self.bump();
        self.expect(TokenKind::Name);
        if self.peek(0) == TokenKind::Extends {
            self.start(PhraseKind::InterfaceBaseClause);
            self.bump();
            self.parse_qualified_name_list(TokenSet::new(&[TokenKind::OpenBrace]));
            self.finish();
        }
        self.finish();

        self.parse_class_declaration_body(
            PhraseKind::InterfaceDeclarationBody,
            PhraseKind::InterfaceMemberDeclarationList,
            INTERFACE_MEMBER_START,
        );
        self.finish();
    }

    pub(super) fn parse_trait_declaration(&mut self) {
        self.start(PhraseKind::TraitDeclaration);

        self.start(PhraseKind::TraitDeclarationHeader);
        self.bump();
        self.expect(TokenKind::Name);
        self.finish();

        self.parse_class_declaration_body(
            PhraseKind::TraitDeclarationBody,
            PhraseKind::TraitMemberDeclarationList,
            CLASS_MEMBER_START,
        );
        self.finish();
    }

    /// Property, method, class constant or trait use. The token after any
    /// modifiers decides which.
    fn parse_class_member_declaration(&mut self) {
        let mut n = 0;
        while MEMBER_MODIFIER.contains(self.peek(n)) {
            n += 1;
        }
        let modified = n > 0;
        match self.peek(n) {
            TokenKind::VariableName if modified => self.parse_property_declaration(true),
            TokenKind::Function => self.parse_method_declaration(modified),
            TokenKind::Const => self.parse_class_const_declaration(modified),
            _ if modified => {
                self.start(PhraseKind::ErrorClassMemberDeclaration);
                self.parse_member_modifier_list();
                self.error(None);
                self.finish();
            }
            TokenKind::Var => self.parse_property_declaration(false),
            TokenKind::Use => self.parse_trait_use_clause(),
            kind => unreachable!("{kind:?} does not start a class member"),
        }
    }

    fn parse_member_modifier_list(&mut self) {
        self.list(
            PhraseKind::MemberModifierList,
            |kind| MEMBER_MODIFIER.contains(kind),
            None,
            TokenSet::EMPTY,
            |parser| {
                parser.bump();
            },
        );
    }

    fn parse_property_declaration(&mut self, modified: bool) {
        self.start(PhraseKind::PropertyDeclaration);
        if modified {
            self.parse_member_modifier_list();
        } else {
            self.bump(); // var
        }
        self.delimited_list(
            PhraseKind::PropertyElementList,
            |kind| kind == TokenKind::VariableName,
            TokenKind::Comma,
            DECLARATION_END,
            false,
            |parser| {
                parser.start(PhraseKind::PropertyElement);
                parser.expect(TokenKind::VariableName);
                if parser.peek(0) == TokenKind::Equals {
                    parser.start(PhraseKind::PropertyInitialiser);
                    parser.bump();
                    parser.parse_expression_into(0);
                    parser.finish();
                }
                parser.finish();
            },
        );
        self.expect(TokenKind::Semicolon);
        self.finish();
    }

    fn parse_method_declaration(&mut self, modified: bool) {
        self.start(PhraseKind::MethodDeclaration);

        self.start(PhraseKind::MethodDeclarationHeader);
        if modified {
            self.parse_member_modifier_list();
        }
        self.bump(); // function
        self.optional(TokenKind::Ampersand);
        self.parse_identifier();
        self.parse_parameter_list();
        self.parse_return_type();
        self.finish();

        self.start(PhraseKind::MethodDeclarationBody);
        if !self.optional(TokenKind::Semicolon) {
            self.parse_compound_statement(PhraseKind::CompoundStatement);
        }
        self.finish();

        self.finish();
    }

    fn parse_class_const_declaration(&mut self, modified: bool) {
        self.start(PhraseKind::ClassConstDeclaration);
        if modified {
            self.parse_member_modifier_list();
        }
        self.bump(); // const
        self.delimited_list(
            PhraseKind::ClassConstElementList,
            is_identifier,
            TokenKind::Comma,
            DECLARATION_END,
            false,
            |parser| {
                parser.start(PhraseKind::ClassConstElement);
                parser.parse_identifier();
                parser.expect(TokenKind::Equals);
                parser.parse_expression_into(0);
                parser.finish();
            },
        );
        self.expect(TokenKind::Semicolon);
        self.finish();
    }

    fn parse_trait_use_clause(&mut self) {
        self.start(PhraseKind::TraitUseClause);
        self.bump(); // use
        self.parse_qualified_name_list(TokenSet::new(&[
            TokenKind::Semicolon,
            TokenKind::OpenBrace,
            TokenKind::CloseTag,
        ]));

        self.start(PhraseKind::TraitUseSpecification);
        let open = self.expect_one_of(TokenSet::new(&[TokenKind::Semicolon, TokenKind::OpenBrace]));
        if open == Some(TokenKind::OpenBrace) {
            if is_trait_adaptation_start(self.peek(0)) {
                self.list(
                    PhraseKind::TraitAdaptationList,
                    is_trait_adaptation_start,
                    Some(CLOSE_BRACE),
                    TokenSet::new(&[TokenKind::Semicolon]),
                    Self::parse_trait_adaptation,
                );
            }
            self.expect(TokenKind::CloseBrace);
        }
        self.finish();

        self.finish();
    }

    /// `A::foo insteadof B;` or `[A::]foo as [modifier] [bar];`
    fn parse_trait_adaptation(&mut self) {
        self.start(PhraseKind::ErrorTraitAdaptation);
        let first = self.peek(0);
        let second = self.peek(1);

        if matches!(first, TokenKind::Namespace | TokenKind::Backslash)
            || (first == TokenKind::Name && matches!(second, TokenKind::ColonColon | TokenKind::Backslash))
        {
            self.parse_method_reference();
            if self.optional(TokenKind::InsteadOf) {
                self.set_kind(PhraseKind::TraitPrecedence);
                self.parse_qualified_name_list(DECLARATION_END);
                self.expect(TokenKind::Semicolon);
                self.finish();
                return;
            }
        } else if is_identifier(first) {
            self.start(PhraseKind::MethodReference);
            self.parse_identifier();
            self.finish();
        } else {
            self.error(None);
            self.finish();
            return;
        }

        self.set_kind(PhraseKind::TraitAlias);
        self.expect(TokenKind::As);
        let next = self.peek(0);
        if next == TokenKind::Name || next.is_reserved() {
            self.parse_identifier();
        } else if MEMBER_MODIFIER.contains(next) {
            self.bump();
            if is_identifier(self.peek(0)) {
                self.parse_identifier();
            }
        } else {
            self.error(None);
        }
        self.expect(TokenKind::Semicolon);
        self.finish();
    }

    fn parse_method_reference(&mut self) {
        self.start(PhraseKind::MethodReference);
        let name = self.parse_qualified_name();
        self.push(name);
        self.expect(TokenKind::ColonColon);
        self.parse_identifier();
        self.finish();
    }
}

fn is_trait_adaptation_start(kind: TokenKind) -> bool {
    matches!(kind, TokenKind::Backslash | TokenKind::Namespace) || is_identifier(kind)
}
