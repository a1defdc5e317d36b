use php_cst::cst::sexpr;
use php_cst::parse;

#[test]
fn test_sexpr_basic() {
    let code = "<?php echo 1 + 2;";
    let root = parse(code);

    assert_eq!(
        sexpr::format(&root, code),
        "(StatementList\n  (InlineText\n    OpenTag \"<?php \")\n  (EchoIntrinsic\n    Echo \"echo\"\n    (ExpressionList\n      (AdditiveExpression\n        IntegerLiteral \"1\"\n        Plus \"+\"\n        IntegerLiteral \"2\"))\n    Semicolon \";\"))"
    );
}

#[test]
fn test_sexpr_with_trivia() {
    let code = "<?php /* c */ $a;";
    let root = parse(code);

    insta::assert_snapshot!(sexpr::format_with_trivia(&root, code), @r#"
    (StatementList
      (InlineText
        OpenTag "<?php ")
      Comment "/* c */"
      Whitespace " "
      (ExpressionStatement
        (SimpleVariable
          VariableName "$a")
        Semicolon ";"))
    "#);
}

#[test]
fn test_sexpr_escapes_token_text() {
    let code = "<?php 'a\"b';";
    let root = parse(code);
    let output = sexpr::format(&root, code);
    assert!(output.contains(r#"StringLiteral "'a\"b'""#), "{output}");
}

#[test]
fn test_sexpr_reports_errors() {
    let code = "<?php foo(;";
    let root = parse(code);
    let output = sexpr::format(&root, code);
    assert!(output.contains("(Error expected CloseParenthesis found Semicolon"), "{output}");
}

#[test]
fn test_json_shape() {
    let code = "<?php $a;";
    let root = parse(code);
    let json = serde_json::to_value(&root).expect("serializable");

    assert_eq!(json["kind"], "StatementList");
    assert_eq!(json["children"][0]["kind"], "InlineText");
    assert_eq!(json["children"][0]["children"][0]["kind"], "OpenTag");
    assert_eq!(json["children"][0]["children"][0]["offset"], 0);
    assert_eq!(json["children"][0]["children"][0]["length"], 6);
    assert_eq!(json["children"][0]["children"][0]["modeStack"][0], "Initial");
    assert!(json.get("error").is_none());
}
