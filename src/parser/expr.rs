use crate::cst::{Node, Phrase, PhraseKind};
use crate::lexer::token::TokenKind;
use crate::parser::{Parser, Separator};
use crate::parser::token_set::{
    ARGUMENT_START, ARRAY_ELEMENT_START, DEREFERENCE, ENCAPSULATED_VARIABLE_START, EXPRESSION_START, TokenSet,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Associativity {
    None,
    Left,
    Right,
}

/// Binding power of `clone`, above every operator so it takes one operand.
const CLONE_PRECEDENCE: u8 = 49;
const UNARY_PRECEDENCE: u8 = 47;
const NOT_PRECEDENCE: u8 = 45;

fn precedence(op: TokenKind) -> (u8, Associativity) {
    use Associativity::*;
    use TokenKind::*;
    match op {
        AsteriskAsterisk => (48, Right),
        PlusPlus | MinusMinus | Tilde | AtSymbol => (47, Right),
        kind if kind.is_cast() => (47, Right),
        InstanceOf => (46, None),
        Exclamation => (45, Right),
        Asterisk | ForwardSlash | Percent => (44, Left),
        Plus | Minus | Dot => (43, Left),
        LessThanLessThan | GreaterThanGreaterThan => (42, Left),
        LessThan | GreaterThan | LessThanEquals | GreaterThanEquals => (41, None),
        EqualsEquals | EqualsEqualsEquals | ExclamationEquals | ExclamationEqualsEquals | Spaceship => (40, None),
        Ampersand => (39, Left),
        Caret => (38, Left),
        Bar => (37, Left),
        AmpersandAmpersand => (36, Left),
        BarBar => (35, Left),
        QuestionQuestion => (34, Right),
        Question => (33, Left),
        Equals | PlusEquals | MinusEquals | AsteriskEquals | AsteriskAsteriskEquals | ForwardslashEquals
        | DotEquals | PercentEquals | AmpersandEquals | BarEquals | CaretEquals | LessThanLessThanEquals
        | GreaterThanGreaterThanEquals | QuestionQuestionEquals => (32, Right),
        And => (31, Left),
        Xor => (30, Left),
        Or => (29, Left),
        _ => unreachable!("{op:?} is not an operator"),
    }
}

/// Phrase built around a binary operator, or `None` if `op` does not
/// continue an expression.
fn binary_phrase_kind(op: TokenKind) -> Option<PhraseKind> {
    use TokenKind::*;
    let kind = match op {
        Dot | Plus | Minus => PhraseKind::AdditiveExpression,
        Bar | Ampersand | Caret => PhraseKind::BitwiseExpression,
        Asterisk | ForwardSlash | Percent => PhraseKind::MultiplicativeExpression,
        AsteriskAsterisk => PhraseKind::ExponentiationExpression,
        LessThanLessThan | GreaterThanGreaterThan => PhraseKind::ShiftExpression,
        AmpersandAmpersand | BarBar | And | Or | Xor => PhraseKind::LogicalExpression,
        EqualsEqualsEquals | ExclamationEqualsEquals | EqualsEquals | ExclamationEquals => {
            PhraseKind::EqualityExpression
        }
        LessThan | LessThanEquals | GreaterThan | GreaterThanEquals | Spaceship => PhraseKind::RelationalExpression,
        QuestionQuestion => PhraseKind::CoalesceExpression,
        Equals => PhraseKind::SimpleAssignmentExpression,
        PlusEquals | MinusEquals | AsteriskEquals | AsteriskAsteriskEquals | ForwardslashEquals | DotEquals
        | PercentEquals | AmpersandEquals | BarEquals | CaretEquals | LessThanLessThanEquals
        | GreaterThanGreaterThanEquals | QuestionQuestionEquals => PhraseKind::CompoundAssignmentExpression,
        InstanceOf => PhraseKind::InstanceOfExpression,
        Question => PhraseKind::TernaryExpression,
        _ => return None,
    };
    Some(kind)
}

fn phrase_kind(node: &Node) -> Option<PhraseKind> {
    node.as_phrase().map(|phrase| phrase.kind)
}

/// Operands an assignment may write to. These bind an assignment even where
/// the operator's precedence alone would not, as in `!$a = f()`.
fn is_assignable(node: &Node) -> bool {
    matches!(
        phrase_kind(node),
        Some(
            PhraseKind::SimpleVariable
                | PhraseKind::SubscriptExpression
                | PhraseKind::PropertyAccessExpression
                | PhraseKind::ScopedPropertyAccessExpression
                | PhraseKind::ListIntrinsic
                | PhraseKind::ArrayCreationExpression
        )
    )
}

fn is_assignment(kind: PhraseKind) -> bool {
    matches!(kind, PhraseKind::SimpleAssignmentExpression | PhraseKind::CompoundAssignmentExpression)
}

impl<'src> Parser<'src> {
    pub(super) fn parse_expression_into(&mut self, min_precedence: u8) {
        let expression = self.parse_expression(min_precedence);
        self.push(expression);
    }

    /// Precedence climbing over binary, assignment and ternary operators.
    /// The result is detached; literals come back as bare tokens.
    pub(super) fn parse_expression(&mut self, min_precedence: u8) -> Node {
        let mut lhs = self.parse_unary_or_atom();

        loop {
            let op = self.peek(0);
            let Some(kind) = binary_phrase_kind(op) else {
                break;
            };
            let (mut precedence, associativity) = precedence(op);
            if precedence < min_precedence && !(is_assignment(kind) && is_assignable(&lhs)) {
                break;
            }
            if associativity != Associativity::Right {
                precedence += 1;
            }

            if kind == PhraseKind::TernaryExpression {
                lhs = self.parse_ternary_expression(lhs, precedence);
                continue;
            }

            self.start_detached(kind);
            self.push(lhs);
            self.bump();
            match kind {
                PhraseKind::InstanceOfExpression => self.parse_type_designator(PhraseKind::InstanceofTypeDesignator),
                PhraseKind::SimpleAssignmentExpression if self.peek(0) == TokenKind::Ampersand => {
                    self.bump();
                    self.set_kind(PhraseKind::ByRefAssignmentExpression);
                    self.parse_expression_into(precedence);
                }
                _ => self.parse_expression_into(precedence),
            }
            lhs = Node::Phrase(self.end());
        }

        lhs
    }

    fn parse_ternary_expression(&mut self, test: Node, precedence: u8) -> Node {
        self.start_detached(PhraseKind::TernaryExpression);
        self.push(test);
        self.bump(); // ?
        if !self.optional(TokenKind::Colon) {
            self.parse_expression_into(0);
            self.expect(TokenKind::Colon);
        }
        self.parse_expression_into(precedence);
        Node::Phrase(self.end())
    }

    fn parse_unary_or_atom(&mut self) -> Node {
        use TokenKind::*;
        match self.peek(0) {
            VariableName | Dollar | Array | OpenBracket | StringLiteral | Name | Namespace | Backslash
            | OpenParenthesis => self.parse_variable_or_expression(),
            Static if self.peek(1) == Function => self.parse_anonymous_function_creation_expression(),
            Static => self.parse_variable_or_expression(),
            StartHeredoc => self.parse_string_literal(PhraseKind::HeredocStringLiteral, EndHeredoc),
            DoubleQuote => self.parse_string_literal(PhraseKind::DoubleQuotedStringLiteral, DoubleQuote),
            Backtick => self.parse_string_literal(PhraseKind::ShellCommandExpression, Backtick),
            Print => self.parse_keyword_operand(PhraseKind::PrintIntrinsic, 0),
            Yield => self.parse_yield_expression(),
            YieldFrom => self.parse_keyword_operand(PhraseKind::YieldFromExpression, 0),
            Clone => self.parse_keyword_operand(PhraseKind::CloneExpression, CLONE_PRECEDENCE),
            New => self.parse_object_creation_expression(),
            Include => self.parse_keyword_operand(PhraseKind::IncludeExpression, 0),
            IncludeOnce => self.parse_keyword_operand(PhraseKind::IncludeOnceExpression, 0),
            Require => self.parse_keyword_operand(PhraseKind::RequireExpression, 0),
            RequireOnce => self.parse_keyword_operand(PhraseKind::RequireOnceExpression, 0),
            Eval => self.parse_parenthesised_intrinsic(PhraseKind::EvalIntrinsic),
            Empty => self.parse_parenthesised_intrinsic(PhraseKind::EmptyIntrinsic),
            Isset => self.parse_isset_intrinsic(),
            Exit => self.parse_exit_intrinsic(),
            List => self.parse_list_intrinsic(),
            PlusPlus => self.parse_prefix_expression(PhraseKind::PrefixIncrementExpression),
            MinusMinus => self.parse_prefix_expression(PhraseKind::PrefixDecrementExpression),
            Plus | Minus | Exclamation | Tilde => self.parse_unary_expression(PhraseKind::UnaryOpExpression),
            AtSymbol => self.parse_unary_expression(PhraseKind::ErrorControlExpression),
            kind if kind.is_cast() => self.parse_unary_expression(PhraseKind::CastExpression),
            Function => self.parse_anonymous_function_creation_expression(),
            kind if kind == IntegerLiteral || kind == FloatingLiteral || kind.is_magic_constant() => {
                Node::Token(self.take_token())
            }
            _ => {
                self.start(PhraseKind::ErrorExpression);
                self.error(None);
                Node::Phrase(self.end())
            }
        }
    }

    fn parse_unary_expression(&mut self, kind: PhraseKind) -> Node {
        self.start(kind);
        let op = self.bump();
        let operand = if op == TokenKind::Exclamation { NOT_PRECEDENCE } else { UNARY_PRECEDENCE };
        self.parse_expression_into(operand);
        Node::Phrase(self.end())
    }

    fn parse_prefix_expression(&mut self, kind: PhraseKind) -> Node {
        self.start(kind);
        self.bump();
        let atom = self.parse_variable_atom();
        let variable = self.parse_variable(atom);
        self.push(variable);
        Node::Phrase(self.end())
    }

    fn parse_postfix_expression(&mut self, kind: PhraseKind, variable: Node) -> Node {
        self.start_detached(kind);
        self.push(variable);
        self.bump();
        Node::Phrase(self.end())
    }

    /// `print`, `clone`, `include` and friends: a keyword and one operand.
    fn parse_keyword_operand(&mut self, kind: PhraseKind, operand: u8) -> Node {
        self.start(kind);
        self.bump();
        self.parse_expression_into(operand);
        Node::Phrase(self.end())
    }

    fn parse_parenthesised_intrinsic(&mut self, kind: PhraseKind) -> Node {
        self.start(kind);
        self.bump();
        self.expect(TokenKind::OpenParenthesis);
        self.parse_expression_into(0);
        self.expect(TokenKind::CloseParenthesis);
        Node::Phrase(self.end())
    }

    fn parse_isset_intrinsic(&mut self) -> Node {
        self.start(PhraseKind::IssetIntrinsic);
        self.bump();
        self.expect(TokenKind::OpenParenthesis);
        if EXPRESSION_START.contains(self.peek(0)) {
            self.parse_variable_list(false);
        }
        self.expect(TokenKind::CloseParenthesis);
        Node::Phrase(self.end())
    }

    fn parse_exit_intrinsic(&mut self) -> Node {
        self.start(PhraseKind::ExitIntrinsic);
        self.bump();
        if self.optional(TokenKind::OpenParenthesis) {
            if EXPRESSION_START.contains(self.peek(0)) {
                self.parse_expression_into(0);
            }
            self.expect(TokenKind::CloseParenthesis);
        }
        Node::Phrase(self.end())
    }

    fn parse_yield_expression(&mut self) -> Node {
        self.start(PhraseKind::YieldExpression);
        self.bump();
        if EXPRESSION_START.contains(self.peek(0)) {
            self.parse_expression_into(0);
            if self.optional(TokenKind::FatArrow) {
                self.parse_expression_into(0);
            }
        }
        Node::Phrase(self.end())
    }

    /// Comma separated variables, as in `isset(...)` and `unset(...)`.
    pub(super) fn parse_variable_list(&mut self, trailing: bool) {
        self.delimited_list(
            PhraseKind::VariableList,
            |kind| EXPRESSION_START.contains(kind),
            TokenKind::Comma,
            TokenSet::new(&[TokenKind::CloseParenthesis]),
            trailing,
            |parser| {
                let atom = parser.parse_variable_atom();
                let variable = parser.parse_variable(atom);
                parser.push(variable);
            },
        );
    }

    fn parse_variable_or_expression(&mut self) -> Node {
        let mut part = self.parse_variable_atom();
        let mut is_variable = phrase_kind(&part) == Some(PhraseKind::SimpleVariable);

        if DEREFERENCE.contains(self.peek(0)) {
            part = self.parse_variable(part);
            is_variable = true;
        } else if matches!(
            phrase_kind(&part),
            Some(PhraseKind::QualifiedName | PhraseKind::FullyQualifiedName | PhraseKind::RelativeQualifiedName)
        ) {
            self.start_detached(PhraseKind::ConstantAccessExpression);
            self.push(part);
            return Node::Phrase(self.end());
        }

        if !is_variable {
            return part;
        }
        match self.peek(0) {
            TokenKind::PlusPlus => self.parse_postfix_expression(PhraseKind::PostfixIncrementExpression, part),
            TokenKind::MinusMinus => self.parse_postfix_expression(PhraseKind::PostfixDecrementExpression, part),
            _ => part,
        }
    }

    /// The head of a variable chain.
    pub(super) fn parse_variable_atom(&mut self) -> Node {
        match self.peek(0) {
            TokenKind::VariableName | TokenKind::Dollar => Node::Phrase(self.parse_simple_variable()),
            TokenKind::OpenParenthesis => Node::Phrase(
                self.parse_encapsulated_expression(TokenKind::OpenParenthesis, TokenKind::CloseParenthesis),
            ),
            TokenKind::Array | TokenKind::OpenBracket => self.parse_array_creation_expression(),
            TokenKind::StringLiteral => Node::Token(self.take_token()),
            TokenKind::Static => {
                self.start(PhraseKind::RelativeScope);
                self.bump();
                Node::Phrase(self.end())
            }
            TokenKind::Name | TokenKind::Namespace | TokenKind::Backslash => Node::Phrase(self.parse_qualified_name()),
            _ => {
                self.start(PhraseKind::ErrorVariableAtom);
                self.error(None);
                Node::Phrase(self.end())
            }
        }
    }

    /// Applies member access, static access, subscripts and calls to `part`
    /// for as long as they follow.
    pub(super) fn parse_variable(&mut self, mut part: Node) -> Node {
        let mut count = 0;
        loop {
            count += 1;
            part = match self.peek(0) {
                TokenKind::ColonColon => self.parse_scoped_access_expression(part),
                TokenKind::Arrow => self.parse_property_or_method_access_expression(part),
                TokenKind::OpenBracket => self.parse_subscript_expression(part, TokenKind::CloseBracket),
                TokenKind::OpenBrace => self.parse_subscript_expression(part, TokenKind::CloseBrace),
                TokenKind::OpenParenthesis => self.parse_function_call_expression(part),
                _ => {
                    if count == 1 && phrase_kind(&part) != Some(PhraseKind::SimpleVariable) {
                        self.start_detached(PhraseKind::ErrorVariable);
                        self.push(part);
                        self.error(None);
                        return Node::Phrase(self.end());
                    }
                    return part;
                }
            };
        }
    }

    /// `$name`, `$$name` or `${expr}`.
    pub(super) fn parse_simple_variable(&mut self) -> Phrase {
        self.start(PhraseKind::SimpleVariable);
        let found = self.expect_one_of(TokenSet::new(&[TokenKind::VariableName, TokenKind::Dollar]));
        if found == Some(TokenKind::Dollar) {
            match self.peek(0) {
                TokenKind::OpenBrace => {
                    self.bump();
                    self.parse_expression_into(0);
                    self.expect(TokenKind::CloseBrace);
                }
                TokenKind::Dollar | TokenKind::VariableName => {
                    let inner = self.parse_simple_variable();
                    self.push(inner);
                }
                _ => self.error(None),
            }
        }
        self.end()
    }

    fn parse_encapsulated_expression(&mut self, open: TokenKind, close: TokenKind) -> Phrase {
        self.start(PhraseKind::EncapsulatedExpression);
        self.expect(open);
        self.parse_expression_into(0);
        self.expect(close);
        self.end()
    }

    fn parse_scoped_access_expression(&mut self, lhs: Node) -> Node {
        self.start_detached(PhraseKind::ErrorScopedAccessExpression);
        self.push(lhs);
        self.bump(); // ::
        let kind = self.parse_scoped_member_name();
        self.set_kind(kind);
        if self.optional(TokenKind::OpenParenthesis) {
            self.set_kind(PhraseKind::ScopedCallExpression);
            self.parse_optional_argument_list();
            self.expect(TokenKind::CloseParenthesis);
        } else if kind == PhraseKind::ScopedCallExpression {
            // `A::{expr}` without a call is not a member access.
            self.error(Some(TokenKind::OpenParenthesis));
        }
        Node::Phrase(self.end())
    }

    /// The name after `::`; returns what kind of access it makes.
    fn parse_scoped_member_name(&mut self) -> PhraseKind {
        self.start(PhraseKind::ScopedMemberName);
        let kind = match self.peek(0) {
            TokenKind::OpenBrace => {
                let name = self.parse_encapsulated_expression(TokenKind::OpenBrace, TokenKind::CloseBrace);
                self.push(name);
                PhraseKind::ScopedCallExpression
            }
            TokenKind::VariableName | TokenKind::Dollar => {
                let variable = self.parse_simple_variable();
                self.push(variable);
                PhraseKind::ScopedPropertyAccessExpression
            }
            kind if kind == TokenKind::Name || kind.is_semi_reserved() => {
                self.parse_identifier();
                PhraseKind::ClassConstantAccessExpression
            }
            _ => {
                self.error(None);
                PhraseKind::ErrorScopedAccessExpression
            }
        };
        self.finish();
        kind
    }

    fn parse_property_or_method_access_expression(&mut self, lhs: Node) -> Node {
        self.start_detached(PhraseKind::PropertyAccessExpression);
        self.push(lhs);
        self.bump(); // ->
        self.parse_member_name();
        if self.optional(TokenKind::OpenParenthesis) {
            self.set_kind(PhraseKind::MethodCallExpression);
            self.parse_optional_argument_list();
            self.expect(TokenKind::CloseParenthesis);
        }
        Node::Phrase(self.end())
    }

    fn parse_member_name(&mut self) {
        self.start(PhraseKind::MemberName);
        match self.peek(0) {
            kind if kind == TokenKind::Name || kind.is_semi_reserved() => {
                self.bump();
            }
            TokenKind::OpenBrace => {
                let name = self.parse_encapsulated_expression(TokenKind::OpenBrace, TokenKind::CloseBrace);
                self.push(name);
            }
            TokenKind::VariableName | TokenKind::Dollar => {
                let variable = self.parse_simple_variable();
                self.push(variable);
            }
            _ => self.error(Some(TokenKind::Name)),
        }
        self.finish();
    }

    fn parse_subscript_expression(&mut self, lhs: Node, close: TokenKind) -> Node {
        self.start_detached(PhraseKind::SubscriptExpression);
        self.push(lhs);
        self.bump();
        if EXPRESSION_START.contains(self.peek(0)) {
            self.parse_expression_into(0);
        }
        self.expect(close);
        Node::Phrase(self.end())
    }

    fn parse_function_call_expression(&mut self, callee: Node) -> Node {
        self.start_detached(PhraseKind::FunctionCallExpression);
        self.push(callee);
        self.bump(); // (
        self.parse_optional_argument_list();
        self.expect(TokenKind::CloseParenthesis);
        Node::Phrase(self.end())
    }

    /// Call arguments up to (not including) the closing `)`.
    pub(super) fn parse_optional_argument_list(&mut self) {
        if !ARGUMENT_START.contains(self.peek(0)) {
            return;
        }
        self.delimited_list(
            PhraseKind::ArgumentExpressionList,
            |kind| ARGUMENT_START.contains(kind),
            TokenKind::Comma,
            TokenSet::new(&[TokenKind::CloseParenthesis]),
            true,
            |parser| {
                if parser.peek(0) == TokenKind::Ellipsis {
                    parser.start(PhraseKind::VariadicUnpacking);
                    parser.bump();
                    parser.parse_expression_into(0);
                    parser.finish();
                } else {
                    parser.parse_expression_into(0);
                }
            },
        );
    }

    /// `array(...)` or `[...]`.
    fn parse_array_creation_expression(&mut self) -> Node {
        self.start(PhraseKind::ArrayCreationExpression);
        let close = if self.bump() == TokenKind::Array {
            self.expect(TokenKind::OpenParenthesis);
            TokenKind::CloseParenthesis
        } else {
            TokenKind::CloseBracket
        };
        if self.starts_array_initialiser() {
            self.parse_array_initialiser_list(close);
        }
        self.expect(close);
        Node::Phrase(self.end())
    }

    fn starts_array_initialiser(&mut self) -> bool {
        let next = self.peek(0);
        next == TokenKind::Comma || ARRAY_ELEMENT_START.contains(next)
    }

    /// Elements may be empty (`[, $b]`, `list(, $x)`).
    fn parse_array_initialiser_list(&mut self, close: TokenKind) {
        self.separated_list(
            PhraseKind::ArrayInitialiserList,
            |kind| ARRAY_ELEMENT_START.contains(kind),
            Separator { token: TokenKind::Comma, trailing: true, empty_elements: true },
            TokenSet::new(&[close]),
            Self::parse_array_element,
        );
    }

    fn parse_array_element(&mut self) {
        self.start(PhraseKind::ArrayElement);
        if self.peek(0) == TokenKind::Ampersand {
            self.parse_by_ref_array_value();
        } else {
            self.start(PhraseKind::ArrayValue);
            self.parse_expression_into(0);
            self.finish();

            if self.peek(0) == TokenKind::FatArrow {
                self.retype_last_child(PhraseKind::ArrayKey);
                self.bump();
                if self.peek(0) == TokenKind::Ampersand {
                    self.parse_by_ref_array_value();
                } else {
                    self.start(PhraseKind::ArrayValue);
                    self.parse_expression_into(0);
                    self.finish();
                }
            }
        }
        self.finish();
    }

    fn parse_by_ref_array_value(&mut self) {
        self.start(PhraseKind::ArrayValue);
        self.bump(); // &
        let atom = self.parse_variable_atom();
        let variable = self.parse_variable(atom);
        self.push(variable);
        self.finish();
    }

    fn parse_list_intrinsic(&mut self) -> Node {
        self.start(PhraseKind::ListIntrinsic);
        self.bump();
        self.expect(TokenKind::OpenParenthesis);
        if self.starts_array_initialiser() {
            self.parse_array_initialiser_list(TokenKind::CloseParenthesis);
        }
        self.expect(TokenKind::CloseParenthesis);
        Node::Phrase(self.end())
    }

    fn parse_object_creation_expression(&mut self) -> Node {
        self.start(PhraseKind::ObjectCreationExpression);
        self.bump(); // new
        if self.peek(0) == TokenKind::Class {
            self.parse_anonymous_class_declaration();
            return Node::Phrase(self.end());
        }
        self.parse_type_designator(PhraseKind::ClassTypeDesignator);
        if self.optional(TokenKind::OpenParenthesis) {
            self.parse_optional_argument_list();
            self.expect(TokenKind::CloseParenthesis);
        }
        Node::Phrase(self.end())
    }

    /// Class reference after `new` or `instanceof`. Calls are not allowed
    /// here, and `::` only reaches static properties.
    fn parse_type_designator(&mut self, kind: PhraseKind) {
        self.start(kind);
        let mut part = self.parse_class_type_designator_atom();
        loop {
            part = match self.peek(0) {
                TokenKind::OpenBracket => self.parse_subscript_expression(part, TokenKind::CloseBracket),
                TokenKind::OpenBrace => self.parse_subscript_expression(part, TokenKind::CloseBrace),
                TokenKind::Arrow => {
                    self.start_detached(PhraseKind::PropertyAccessExpression);
                    self.push(part);
                    self.bump();
                    self.parse_member_name();
                    Node::Phrase(self.end())
                }
                TokenKind::ColonColon => {
                    self.start_detached(PhraseKind::ScopedPropertyAccessExpression);
                    self.push(part);
                    self.bump();
                    self.start(PhraseKind::ScopedMemberName);
                    if matches!(self.peek(0), TokenKind::VariableName | TokenKind::Dollar) {
                        let variable = self.parse_simple_variable();
                        self.push(variable);
                    } else {
                        self.error(Some(TokenKind::VariableName));
                    }
                    self.finish();
                    Node::Phrase(self.end())
                }
                _ => break,
            };
        }
        self.push(part);
        self.finish();
    }

    fn parse_class_type_designator_atom(&mut self) -> Node {
        match self.peek(0) {
            TokenKind::Static => {
                self.start(PhraseKind::RelativeScope);
                self.bump();
                Node::Phrase(self.end())
            }
            TokenKind::VariableName | TokenKind::Dollar => Node::Phrase(self.parse_simple_variable()),
            TokenKind::Name | TokenKind::Namespace | TokenKind::Backslash => Node::Phrase(self.parse_qualified_name()),
            _ => {
                self.start(PhraseKind::ErrorClassTypeDesignatorAtom);
                self.error(None);
                Node::Phrase(self.end())
            }
        }
    }

    fn parse_anonymous_function_creation_expression(&mut self) -> Node {
        self.start(PhraseKind::AnonymousFunctionCreationExpression);

        self.start(PhraseKind::AnonymousFunctionHeader);
        self.optional(TokenKind::Static);
        self.expect(TokenKind::Function);
        self.optional(TokenKind::Ampersand);
        self.parse_parameter_list();
        if self.peek(0) == TokenKind::Use {
            self.start(PhraseKind::AnonymousFunctionUseClause);
            self.bump();
            self.expect(TokenKind::OpenParenthesis);
            self.delimited_list(
                PhraseKind::ClosureUseList,
                |kind| matches!(kind, TokenKind::Ampersand | TokenKind::VariableName),
                TokenKind::Comma,
                TokenSet::new(&[TokenKind::CloseParenthesis]),
                false,
                |parser| {
                    parser.start(PhraseKind::AnonymousFunctionUseVariable);
                    parser.optional(TokenKind::Ampersand);
                    parser.expect(TokenKind::VariableName);
                    parser.finish();
                },
            );
            self.expect(TokenKind::CloseParenthesis);
            self.finish();
        }
        self.parse_return_type();
        self.finish();

        self.parse_compound_statement(PhraseKind::FunctionDeclarationBody);
        Node::Phrase(self.end())
    }

    /// Double quoted, heredoc and backtick strings: an opening token, the
    /// interpolated parts, and `close`.
    fn parse_string_literal(&mut self, kind: PhraseKind, close: TokenKind) -> Node {
        self.start(kind);
        self.bump();
        if ENCAPSULATED_VARIABLE_START.contains(self.peek(0)) {
            let break_on = TokenSet::new(&[close]);
            self.list(
                PhraseKind::EncapsulatedVariableList,
                |kind| ENCAPSULATED_VARIABLE_START.contains(kind),
                Some(break_on),
                break_on,
                Self::parse_encapsulated_variable,
            );
        }
        self.expect(close);
        Node::Phrase(self.end())
    }

    fn parse_encapsulated_variable(&mut self) {
        match self.peek(0) {
            TokenKind::EncapsulatedAndWhitespace => {
                self.bump();
            }
            TokenKind::VariableName => match self.peek(1) {
                TokenKind::OpenBracket => self.parse_encapsulated_dimension(),
                TokenKind::Arrow => self.parse_encapsulated_property(),
                _ => {
                    let variable = self.parse_simple_variable();
                    self.push(variable);
                }
            },
            TokenKind::DollarCurlyOpen => self.parse_dollar_curly_open_expression(),
            TokenKind::CurlyOpen => self.parse_curly_open_expression(),
            kind => unreachable!("{kind:?} does not start an interpolation"),
        }
    }

    /// `"$a[0]"`, `"$a[key]"`, `"$a[$i]"`, `"$a[-1]"`.
    fn parse_encapsulated_dimension(&mut self) {
        self.start(PhraseKind::SubscriptExpression);
        let variable = self.parse_simple_variable();
        self.push(variable);
        self.bump(); // [
        match self.peek(0) {
            TokenKind::Name | TokenKind::IntegerLiteral => {
                self.bump();
            }
            TokenKind::VariableName => {
                let offset = self.parse_simple_variable();
                self.push(offset);
            }
            TokenKind::Minus => {
                self.start(PhraseKind::UnaryOpExpression);
                self.bump();
                self.expect(TokenKind::IntegerLiteral);
                self.finish();
            }
            _ => self.error(None),
        }
        self.expect(TokenKind::CloseBracket);
        self.finish();
    }

    /// `"$a->b"`.
    fn parse_encapsulated_property(&mut self) {
        self.start(PhraseKind::PropertyAccessExpression);
        let variable = self.parse_simple_variable();
        self.push(variable);
        self.bump(); // ->
        self.start(PhraseKind::MemberName);
        self.expect(TokenKind::Name);
        self.finish();
        self.finish();
    }

    /// `"${name}"`, `"${name[expr]}"` or `"${expr}"`.
    fn parse_dollar_curly_open_expression(&mut self) {
        self.start(PhraseKind::EncapsulatedVariable);
        self.bump();
        let next = self.peek(0);
        if next == TokenKind::VariableName {
            if self.peek(1) == TokenKind::OpenBracket {
                self.start(PhraseKind::SubscriptExpression);
                self.start(PhraseKind::SimpleVariable);
                self.bump();
                self.finish();
                self.bump(); // [
                self.parse_expression_into(0);
                self.expect(TokenKind::CloseBracket);
                self.finish();
            } else {
                self.start(PhraseKind::SimpleVariable);
                self.bump();
                self.finish();
            }
        } else if EXPRESSION_START.contains(next) {
            self.parse_expression_into(0);
        } else {
            self.error(None);
        }
        self.expect(TokenKind::CloseBrace);
        self.finish();
    }

    /// `"{$a->b()}"`.
    fn parse_curly_open_expression(&mut self) {
        self.start(PhraseKind::EncapsulatedVariable);
        self.bump();
        let atom = self.parse_variable_atom();
        let variable = self.parse_variable(atom);
        self.push(variable);
        self.expect(TokenKind::CloseBrace);
        self.finish();
    }
}
