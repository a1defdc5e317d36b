use php_cst::cst::sexpr;
use php_cst::lexer::token::TokenKind;
use php_cst::parser::Parser;
use php_cst::{Phrase, PhraseKind, parse};

/// Parses `code`, checking the tree still spells out the input.
fn parse_lossless(code: &str) -> Phrase {
    let root = parse(code);
    assert_eq!(root.text(code), code);
    root
}

fn top_level(root: &Phrase) -> Vec<PhraseKind> {
    root.child_phrases().map(|phrase| phrase.kind).collect()
}

#[test]
fn test_missing_semicolon() {
    let code = "<?php
    echo 1
    echo 2;
    ";
    let root = parse_lossless(code);
    let errors = root.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].unexpected.kind, TokenKind::Echo);
    assert_eq!(errors[0].expected, None);
    assert_eq!(
        top_level(&root),
        vec![PhraseKind::InlineText, PhraseKind::EchoIntrinsic, PhraseKind::EchoIntrinsic]
    );
}

#[test]
fn test_missing_class_name() {
    let code = "<?php class { }";
    let root = parse_lossless(code);
    let class = root.find(PhraseKind::ClassDeclaration).expect("class");
    insta::assert_snapshot!(sexpr::format(class, code), @r#"
    (ClassDeclaration
      (ClassDeclarationHeader
        Class "class"
        (Error expected Name found OpenBrace))
      (ClassDeclarationBody
        OpenBrace "{"
        CloseBrace "}"))
    "#);
}

#[test]
fn test_stray_token_at_top_level() {
    let code = "<?php ) ; echo 1;";
    let root = parse_lossless(code);
    insta::assert_snapshot!(sexpr::format(&root, code), @r#"
    (StatementList
      (InlineText
        OpenTag "<?php ")
      (Error unexpected CloseParenthesis
        CloseParenthesis ")")
      (NullStatement
        Semicolon ";")
      (EchoIntrinsic
        Echo "echo"
        (ExpressionList
          IntegerLiteral "1")
        Semicolon ";"))
    "#);
    assert_eq!(root.errors().len(), 1);
}

#[test]
fn test_extra_brace() {
    let code = "<?php
    if (true) {
        echo 1;
    }
    }
    echo 2;
    ";
    let root = parse_lossless(code);
    let errors = root.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].unexpected.kind, TokenKind::CloseBrace);
    assert_eq!(
        top_level(&root),
        vec![PhraseKind::InlineText, PhraseKind::IfStatement, PhraseKind::Error, PhraseKind::EchoIntrinsic]
    );
}

#[test]
fn test_missing_expression() {
    let code = "<?php $a = ;";
    let root = parse_lossless(code);
    let errors = root.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].unexpected.kind, TokenKind::Semicolon);
    let assignment = root.find(PhraseKind::SimpleAssignmentExpression).expect("assignment");
    let kinds: Vec<PhraseKind> = assignment.child_phrases().map(|p| p.kind).collect();
    assert_eq!(kinds, vec![PhraseKind::SimpleVariable, PhraseKind::ErrorExpression]);
}

#[test]
fn test_missing_argument_delimiter() {
    let code = "<?php foo(1 2);";
    let root = parse_lossless(code);
    let errors = root.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].unexpected.kind, TokenKind::IntegerLiteral);
    assert_eq!(errors[0].unexpected.offset, 12);

    let arguments = root.find(PhraseKind::ArgumentExpressionList).expect("arguments");
    let literals = arguments.child_tokens().filter(|t| t.kind == TokenKind::IntegerLiteral).count();
    assert_eq!(literals, 2);
}

#[test]
fn test_stray_token_before_delimiter() {
    let code = "<?php f($a ; , $b);";
    let root = parse_lossless(code);
    let errors = root.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].unexpected.kind, TokenKind::Semicolon);
    assert_eq!(top_level(&root), vec![PhraseKind::InlineText, PhraseKind::ExpressionStatement]);

    let arguments = root.find(PhraseKind::ArgumentExpressionList).expect("arguments");
    let variables = arguments.child_phrases().filter(|p| p.kind == PhraseKind::SimpleVariable).count();
    assert_eq!(variables, 2);
}

#[test]
fn test_stray_token_before_array_element() {
    let code = "<?php $a = [1, ) 2, 3];";
    let root = parse_lossless(code);
    assert_eq!(root.errors().len(), 1);
    let list = root.find(PhraseKind::ArrayInitialiserList).expect("elements");
    let elements = list.child_phrases().filter(|p| p.kind == PhraseKind::ArrayElement).count();
    assert_eq!(elements, 3);
}

#[test]
fn test_unclosed_function_body() {
    let code = "<?php function f() { echo 1;";
    let root = parse_lossless(code);
    let errors = root.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].expected, Some(TokenKind::CloseBrace));
    assert_eq!(errors[0].unexpected.kind, TokenKind::EndOfFile);
    assert_eq!(errors[0].unexpected.offset, code.len());
}

#[test]
fn test_missing_class_brace() {
    let code = "<?php
    class Foo {
        public $a;
    // missing }
    ";
    let root = parse_lossless(code);
    let errors = root.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].expected, Some(TokenKind::CloseBrace));
    assert!(root.find(PhraseKind::PropertyDeclaration).is_some());
}

#[test]
fn test_one_error_per_resynchronization() {
    let code = "<?php foo(1 ] ] ]); echo 2;";
    let root = parse_lossless(code);
    assert_eq!(root.errors().len(), 1);

    // The brackets end up in the error node itself.
    let arguments = root.find(PhraseKind::ArgumentExpressionList).expect("arguments");
    let error = arguments.child_phrases().find(|p| p.is_error()).expect("error");
    let skipped = error.child_tokens().filter(|t| t.kind == TokenKind::CloseBracket).count();
    assert_eq!(skipped, 3);
    assert!(root.find(PhraseKind::EchoIntrinsic).is_some());
}

#[test]
fn test_garbage_is_kept() {
    let inputs = [
        "<?php class A { public public 1 } function ( { [",
        "<?php $a->; $b::; new; list(,,",
        "<?php \"abc {$a->",
        "<?php use A\\{B, ; trait T { use X { a as } }",
        "<?php switch ($a) { echo 1; case }",
        "<?php <<<EOT\n$a[",
        "<?php }}}}{{{ ?> <?php ((((",
    ];
    for code in inputs {
        let root = parse_lossless(code);
        assert!(!root.errors().is_empty(), "{code:?}");
    }
}

#[test]
fn test_lexical_anomalies_do_not_stop_parsing() {
    let code = "<?php echo 1; /* unterminated";
    let mut parser = Parser::new(code);
    let root = parser.parse();
    assert_eq!(root.text(code), code);
    assert!(root.errors().is_empty());
    assert_eq!(parser.anomalies().len(), 1);
}
