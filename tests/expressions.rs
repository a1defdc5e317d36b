use php_cst::cst::sexpr;
use php_cst::{PhraseKind, parse};

/// S-expression of the single expression in `<?php {code};`.
fn expression(code: &str) -> String {
    let source = format!("<?php {code};");
    let root = parse(&source);
    assert!(root.errors().is_empty(), "{:?}", root.errors());
    let statement = root
        .first_child_phrase(PhraseKind::ExpressionStatement)
        .expect("expression statement");
    let expression = statement.child_phrases().next().expect("expression phrase");
    sexpr::format(expression, &source)
}

/// Nesting of phrase kinds only, e.g. `Additive(Token Multiplicative(...))`.
fn shape(code: &str) -> String {
    let source = format!("<?php {code};");
    let root = parse(&source);
    let statement = root
        .first_child_phrase(PhraseKind::ExpressionStatement)
        .expect("expression statement");
    let expression = statement.child_phrases().next().expect("expression phrase");
    fn render(phrase: &php_cst::Phrase) -> String {
        let inner: Vec<String> = phrase.child_phrases().map(render).collect();
        if inner.is_empty() {
            phrase.kind.name().to_string()
        } else {
            format!("{}({})", phrase.kind.name(), inner.join(" "))
        }
    }
    render(expression)
}

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    assert_eq!(
        expression("1 + 2 * 3"),
        "(AdditiveExpression\n  IntegerLiteral \"1\"\n  Plus \"+\"\n  (MultiplicativeExpression\n    IntegerLiteral \"2\"\n    Asterisk \"*\"\n    IntegerLiteral \"3\"))"
    );
}

#[test]
fn test_left_associative_operators_group_left() {
    assert_eq!(
        expression("1 - 2 - 3"),
        "(AdditiveExpression\n  (AdditiveExpression\n    IntegerLiteral \"1\"\n    Minus \"-\"\n    IntegerLiteral \"2\")\n  Minus \"-\"\n  IntegerLiteral \"3\")"
    );
    assert_eq!(shape("$a . $b . $c"), "AdditiveExpression(AdditiveExpression(SimpleVariable SimpleVariable) SimpleVariable)");
}

#[test]
fn test_right_associative_operators_group_right() {
    assert_eq!(
        expression("2 ** 3 ** 4"),
        "(ExponentiationExpression\n  IntegerLiteral \"2\"\n  AsteriskAsterisk \"**\"\n  (ExponentiationExpression\n    IntegerLiteral \"3\"\n    AsteriskAsterisk \"**\"\n    IntegerLiteral \"4\"))"
    );
    assert_eq!(
        shape("$a ?? $b ?? $c"),
        "CoalesceExpression(SimpleVariable CoalesceExpression(SimpleVariable SimpleVariable))"
    );
    assert_eq!(
        shape("$a = $b += 1"),
        "SimpleAssignmentExpression(SimpleVariable CompoundAssignmentExpression(SimpleVariable))"
    );
}

#[test]
fn test_assignment_binds_inside_negation() {
    insta::assert_snapshot!(expression("!$a = f()"), @r#"
    (UnaryOpExpression
      Exclamation "!"
      (SimpleAssignmentExpression
        (SimpleVariable
          VariableName "$a")
        Equals "="
        (FunctionCallExpression
          (QualifiedName
            (NamespaceName
              Name "f"))
          OpenParenthesis "("
          CloseParenthesis ")")))
    "#);
}

#[test]
fn test_low_precedence_logical_operators() {
    assert_eq!(
        shape("$a = true and false"),
        "LogicalExpression(SimpleAssignmentExpression(SimpleVariable ConstantAccessExpression(QualifiedName(NamespaceName))) ConstantAccessExpression(QualifiedName(NamespaceName)))"
    );
    assert_eq!(
        shape("$a || $b && $c"),
        "LogicalExpression(SimpleVariable LogicalExpression(SimpleVariable SimpleVariable))"
    );
}

#[test]
fn test_ternary_is_left_associative() {
    assert_eq!(
        shape("$a ? $b : $c ? $d : $e"),
        "TernaryExpression(TernaryExpression(SimpleVariable SimpleVariable SimpleVariable) SimpleVariable SimpleVariable)"
    );
}

#[test]
fn test_short_ternary() {
    insta::assert_snapshot!(expression("$a ?: $b"), @r#"
    (TernaryExpression
      (SimpleVariable
        VariableName "$a")
      Question "?"
      Colon ":"
      (SimpleVariable
        VariableName "$b"))
    "#);
}

#[test]
fn test_unary_operators() {
    assert_eq!(
        shape("-1 ** 2"),
        "UnaryOpExpression(ExponentiationExpression)"
    );
    assert_eq!(
        shape("(int) $a + 1"),
        "AdditiveExpression(CastExpression(SimpleVariable))"
    );
    assert_eq!(shape("@$a[0]"), "ErrorControlExpression(SubscriptExpression(SimpleVariable))");
    assert_eq!(shape("!$a instanceof B"), "UnaryOpExpression(InstanceOfExpression(SimpleVariable InstanceofTypeDesignator(QualifiedName(NamespaceName))))");
}

#[test]
fn test_increment_and_decrement() {
    assert_eq!(shape("++$a"), "PrefixIncrementExpression(SimpleVariable)");
    assert_eq!(shape("--$a->b"), "PrefixDecrementExpression(PropertyAccessExpression(SimpleVariable MemberName))");
    assert_eq!(shape("$a++"), "PostfixIncrementExpression(SimpleVariable)");
    assert_eq!(shape("A::$b--"), "PostfixDecrementExpression(ScopedPropertyAccessExpression(QualifiedName(NamespaceName) ScopedMemberName(SimpleVariable)))");
}

#[test]
fn test_by_ref_assignment() {
    insta::assert_snapshot!(expression("$a = &$b"), @r#"
    (ByRefAssignmentExpression
      (SimpleVariable
        VariableName "$a")
      Equals "="
      Ampersand "&"
      (SimpleVariable
        VariableName "$b"))
    "#);
}

#[test]
fn test_member_access_chain() {
    assert_eq!(
        shape("$a->b(1, ...$c)[0]::D"),
        "ClassConstantAccessExpression(SubscriptExpression(MethodCallExpression(SimpleVariable MemberName ArgumentExpressionList(VariadicUnpacking(SimpleVariable)))) ScopedMemberName(Identifier))"
    );
    assert_eq!(
        shape("Foo::bar()"),
        "ScopedCallExpression(QualifiedName(NamespaceName) ScopedMemberName(Identifier))"
    );
    assert_eq!(
        shape("static::$x"),
        "ScopedPropertyAccessExpression(RelativeScope ScopedMemberName(SimpleVariable))"
    );
    assert_eq!(shape("$$a"), "SimpleVariable(SimpleVariable)");
    assert_eq!(shape("${'a' . $b}"), "SimpleVariable(AdditiveExpression(SimpleVariable))");
}

#[test]
fn test_names() {
    assert_eq!(shape("\\Foo\\BAR"), "ConstantAccessExpression(FullyQualifiedName(NamespaceName))");
    assert_eq!(shape("namespace\\f()"), "FunctionCallExpression(RelativeQualifiedName(NamespaceName))");
    assert_eq!(expression("A\\B"), "(ConstantAccessExpression\n  (QualifiedName\n    (NamespaceName\n      Name \"A\"\n      Backslash \"\\\\\"\n      Name \"B\")))");
}

#[test]
fn test_array_creation() {
    insta::assert_snapshot!(expression("[1, 'a' => &$b,]"), @r#"
    (ArrayCreationExpression
      OpenBracket "["
      (ArrayInitialiserList
        (ArrayElement
          (ArrayValue
            IntegerLiteral "1"))
        Comma ","
        (ArrayElement
          (ArrayKey
            StringLiteral "'a'")
          FatArrow "=>"
          (ArrayValue
            Ampersand "&"
            (SimpleVariable
              VariableName "$b")))
        Comma ",")
      CloseBracket "]")
    "#);
    assert_eq!(shape("array()"), "ArrayCreationExpression");
}

#[test]
fn test_list_destructuring_with_skipped_elements() {
    assert_eq!(
        shape("list($a, , $b) = $c"),
        "SimpleAssignmentExpression(ListIntrinsic(ArrayInitialiserList(ArrayElement(ArrayValue(SimpleVariable)) ArrayElement(ArrayValue(SimpleVariable)))) SimpleVariable)"
    );
    assert_eq!(
        shape("[$a, [$b]] = $c"),
        "SimpleAssignmentExpression(ArrayCreationExpression(ArrayInitialiserList(ArrayElement(ArrayValue(SimpleVariable)) ArrayElement(ArrayValue(ArrayCreationExpression(ArrayInitialiserList(ArrayElement(ArrayValue(SimpleVariable))))))) SimpleVariable)"
    );
}

#[test]
fn test_object_creation() {
    assert_eq!(
        shape("new Foo(1)"),
        "ObjectCreationExpression(ClassTypeDesignator(QualifiedName(NamespaceName)) ArgumentExpressionList)"
    );
    assert_eq!(shape("new $class"), "ObjectCreationExpression(ClassTypeDesignator(SimpleVariable))");
    assert_eq!(
        shape("new class(1) extends A {}"),
        "ObjectCreationExpression(AnonymousClassDeclaration(AnonymousClassDeclarationHeader(ArgumentExpressionList ClassBaseClause(QualifiedName(NamespaceName))) ClassDeclarationBody))"
    );
    assert_eq!(shape("clone $a->b"), "CloneExpression(PropertyAccessExpression(SimpleVariable MemberName))");
}

#[test]
fn test_anonymous_functions() {
    assert_eq!(
        shape("function &($a) use (&$b, $c): int { return $a; }"),
        "AnonymousFunctionCreationExpression(AnonymousFunctionHeader(ParameterDeclarationList(ParameterDeclaration) AnonymousFunctionUseClause(ClosureUseList(AnonymousFunctionUseVariable AnonymousFunctionUseVariable)) ReturnType(TypeDeclaration(QualifiedName(NamespaceName)))) FunctionDeclarationBody(StatementList(ReturnStatement(SimpleVariable))))"
    );
    assert_eq!(
        shape("static function () {}"),
        "AnonymousFunctionCreationExpression(AnonymousFunctionHeader FunctionDeclarationBody)"
    );
}

#[test]
fn test_intrinsics() {
    assert_eq!(shape("isset($a, $b[1])"), "IssetIntrinsic(VariableList(SimpleVariable SubscriptExpression(SimpleVariable)))");
    assert_eq!(shape("empty($a)"), "EmptyIntrinsic(SimpleVariable)");
    assert_eq!(shape("exit"), "ExitIntrinsic");
    assert_eq!(shape("die(1)"), "ExitIntrinsic");
    assert_eq!(shape("print $a"), "PrintIntrinsic(SimpleVariable)");
    assert_eq!(shape("include_once 'a.php'"), "IncludeOnceExpression");
    assert_eq!(shape("yield $k => $v"), "YieldExpression(SimpleVariable SimpleVariable)");
    assert_eq!(shape("yield from $g"), "YieldFromExpression(SimpleVariable)");
}

#[test]
fn test_double_quoted_interpolation() {
    insta::assert_snapshot!(expression("\"a$b[0]c\""), @r#"
    (DoubleQuotedStringLiteral
      DoubleQuote "\""
      (EncapsulatedVariableList
        EncapsulatedAndWhitespace "a"
        (SubscriptExpression
          (SimpleVariable
            VariableName "$b")
          OpenBracket "["
          IntegerLiteral "0"
          CloseBracket "]")
        EncapsulatedAndWhitespace "c")
      DoubleQuote "\"")
    "#);
}

#[test]
fn test_complex_interpolation_forms() {
    assert_eq!(
        shape("\"$a->b {$c->d()} ${e} ${f[1]}\""),
        "DoubleQuotedStringLiteral(EncapsulatedVariableList(PropertyAccessExpression(SimpleVariable MemberName) EncapsulatedVariable(MethodCallExpression(SimpleVariable MemberName)) EncapsulatedVariable(SimpleVariable) EncapsulatedVariable(SubscriptExpression(SimpleVariable))))"
    );
    assert_eq!(
        shape("`ls $dir`"),
        "ShellCommandExpression(EncapsulatedVariableList(SimpleVariable))"
    );
}

#[test]
fn test_heredoc() {
    let source = "<?php $x = <<<EOT\nHello $name\nEOT;\n";
    let root = parse(source);
    assert!(root.errors().is_empty());
    let heredoc = root.find(PhraseKind::HeredocStringLiteral).expect("heredoc");
    insta::assert_snapshot!(sexpr::format(heredoc, source), @r#"
    (HeredocStringLiteral
      StartHeredoc "<<<EOT\n"
      (EncapsulatedVariableList
        EncapsulatedAndWhitespace "Hello "
        (SimpleVariable
          VariableName "$name")
        EncapsulatedAndWhitespace "\n")
      EndHeredoc "EOT")
    "#);
}
