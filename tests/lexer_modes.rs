use php_cst::lexer::mode::LexMode;
use php_cst::lexer::token::{Token, TokenKind};
use php_cst::lexer::{AnomalyKind, Lexer};
use php_cst::tokenize;

fn significant(code: &str) -> Vec<(TokenKind, String)> {
    tokenize(code)
        .into_iter()
        .filter(|token| !token.is_trivia())
        .map(|token| (token.kind, token.text(code).to_string()))
        .collect()
}

fn kinds(code: &str) -> Vec<TokenKind> {
    significant(code).into_iter().map(|(kind, _)| kind).collect()
}

#[test]
fn test_tokens_cover_input() {
    let code = "<html><?php echo $a /* c */ . \"x{$b}\"; ?>\n<p><?= 1 ?>";
    let tokens = tokenize(code);
    let mut offset = 0;
    for token in &tokens {
        assert_eq!(token.offset, offset, "{token:?}");
        offset = token.end();
    }
    assert_eq!(offset, code.len());
    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::EndOfFile));
}

#[test]
fn test_inline_text_and_open_tag() {
    use TokenKind::*;
    assert_eq!(
        significant("<b><?php echo 1;"),
        vec![
            (Text, "<b>".to_string()),
            (OpenTag, "<?php ".to_string()),
            (Echo, "echo".to_string()),
            (IntegerLiteral, "1".to_string()),
            (Semicolon, ";".to_string()),
            (EndOfFile, String::new()),
        ]
    );
}

#[test]
fn test_close_tag_swallows_newline() {
    use TokenKind::*;
    assert_eq!(
        significant("<?php echo 1 ?>\nhi"),
        vec![
            (OpenTag, "<?php ".to_string()),
            (Echo, "echo".to_string()),
            (IntegerLiteral, "1".to_string()),
            (CloseTag, "?>\n".to_string()),
            (Text, "hi".to_string()),
            (EndOfFile, String::new()),
        ]
    );
}

#[test]
fn test_yield_from_is_one_token() {
    let kinds = kinds("<?php yield from foo(); yield 1; yield\n  FROM $g;");
    assert_eq!(kinds.iter().filter(|k| **k == TokenKind::YieldFrom).count(), 2);
    assert_eq!(kinds.iter().filter(|k| **k == TokenKind::Yield).count(), 1);
}

#[test]
fn test_keywords_are_case_insensitive() {
    use TokenKind::*;
    assert_eq!(
        kinds("<?php IF ($a) ECHO Foo;"),
        vec![OpenTag, If, OpenParenthesis, VariableName, CloseParenthesis, Echo, Name, Semicolon, EndOfFile]
    );
}

#[test]
fn test_casts() {
    use TokenKind::*;
    assert_eq!(
        kinds("<?php (int)$a; ( string )$b; (foo)"),
        vec![
            OpenTag,
            IntegerCast,
            VariableName,
            Semicolon,
            StringCast,
            VariableName,
            Semicolon,
            OpenParenthesis,
            Name,
            CloseParenthesis,
            EndOfFile,
        ]
    );
}

#[test]
fn test_plain_double_quoted_string_is_a_literal() {
    use TokenKind::*;
    assert_eq!(kinds("<?php \"abc\\\"\";"), vec![OpenTag, StringLiteral, Semicolon, EndOfFile]);
}

#[test]
fn test_binary_string_prefix() {
    use TokenKind::*;
    assert_eq!(
        significant("<?php b'x'; B\"y\";"),
        vec![
            (OpenTag, "<?php ".to_string()),
            (StringLiteral, "b'x'".to_string()),
            (Semicolon, ";".to_string()),
            (StringLiteral, "B\"y\"".to_string()),
            (Semicolon, ";".to_string()),
            (EndOfFile, String::new()),
        ]
    );
}

#[test]
fn test_double_quote_interpolation() {
    use TokenKind::*;
    assert_eq!(
        significant("<?php \"a$b[0]c\";"),
        vec![
            (OpenTag, "<?php ".to_string()),
            (DoubleQuote, "\"".to_string()),
            (EncapsulatedAndWhitespace, "a".to_string()),
            (VariableName, "$b".to_string()),
            (OpenBracket, "[".to_string()),
            (IntegerLiteral, "0".to_string()),
            (CloseBracket, "]".to_string()),
            (EncapsulatedAndWhitespace, "c".to_string()),
            (DoubleQuote, "\"".to_string()),
            (Semicolon, ";".to_string()),
            (EndOfFile, String::new()),
        ]
    );
}

#[test]
fn test_interpolated_property_and_curly_forms() {
    use TokenKind::*;
    assert_eq!(
        kinds("<?php \"$a->b {$c} ${d}\";"),
        vec![
            OpenTag,
            DoubleQuote,
            VariableName,
            Arrow,
            Name,
            EncapsulatedAndWhitespace,
            CurlyOpen,
            VariableName,
            CloseBrace,
            EncapsulatedAndWhitespace,
            DollarCurlyOpen,
            VariableName,
            CloseBrace,
            DoubleQuote,
            Semicolon,
            EndOfFile,
        ]
    );
}

#[test]
fn test_heredoc_sequence() {
    use TokenKind::*;
    let code = "<?php $x = <<<EOT\nHello $name\nEOT;\n";
    assert_eq!(
        significant(code),
        vec![
            (OpenTag, "<?php ".to_string()),
            (VariableName, "$x".to_string()),
            (Equals, "=".to_string()),
            (StartHeredoc, "<<<EOT\n".to_string()),
            (EncapsulatedAndWhitespace, "Hello ".to_string()),
            (VariableName, "$name".to_string()),
            (EncapsulatedAndWhitespace, "\n".to_string()),
            (EndHeredoc, "EOT".to_string()),
            (Semicolon, ";".to_string()),
            (EndOfFile, String::new()),
        ]
    );

    let body = tokenize(code).into_iter().find(|t| t.kind == EncapsulatedAndWhitespace);
    let body = body.expect("heredoc body token");
    assert_eq!(body.mode_stack.last(), Some(&LexMode::HereDoc));
}

#[test]
fn test_nowdoc_does_not_interpolate() {
    use TokenKind::*;
    assert_eq!(
        significant("<?php <<<'EOT'\n$a {$b}\nEOT;\n"),
        vec![
            (OpenTag, "<?php ".to_string()),
            (StartHeredoc, "<<<'EOT'\n".to_string()),
            (EncapsulatedAndWhitespace, "$a {$b}\n".to_string()),
            (EndHeredoc, "EOT".to_string()),
            (Semicolon, ";".to_string()),
            (EndOfFile, String::new()),
        ]
    );
}

#[test]
fn test_property_name_after_arrow_is_never_a_keyword() {
    use TokenKind::*;
    assert_eq!(
        kinds("<?php $a->class->list;"),
        vec![OpenTag, VariableName, Arrow, Name, Arrow, Name, Semicolon, EndOfFile]
    );
}

#[test]
fn test_halt_compiler_returns_raw_data() {
    use TokenKind::*;
    assert_eq!(
        significant("<?php __halt_compiler(); <?php raw \"data"),
        vec![
            (OpenTag, "<?php ".to_string()),
            (HaltCompiler, "__halt_compiler".to_string()),
            (OpenParenthesis, "(".to_string()),
            (CloseParenthesis, ")".to_string()),
            (Semicolon, ";".to_string()),
            (Text, " <?php raw \"data".to_string()),
            (EndOfFile, String::new()),
        ]
    );
}

#[test]
fn test_anomalies() {
    let mut lexer = Lexer::new("<?php /* open");
    lexer.by_ref().for_each(drop);
    assert_eq!(lexer.anomalies().len(), 1);
    assert_eq!(lexer.anomalies()[0].kind, AnomalyKind::UnterminatedComment);
    assert_eq!(lexer.anomalies()[0].offset, 6);

    let mut lexer = Lexer::new("<?php \"abc");
    lexer.by_ref().for_each(drop);
    assert_eq!(
        lexer.anomalies().iter().map(|a| a.kind).collect::<Vec<_>>(),
        vec![AnomalyKind::UnterminatedString]
    );

    let mut lexer = Lexer::new("<?php $a = <<<EOT\nbody");
    lexer.by_ref().for_each(drop);
    assert_eq!(
        lexer.anomalies().iter().map(|a| a.kind).collect::<Vec<_>>(),
        vec![AnomalyKind::UnterminatedHeredoc]
    );

    let mut lexer = Lexer::new("<?php \u{1};");
    let tokens: Vec<Token> = lexer.by_ref().collect();
    assert!(tokens.iter().any(|t| t.kind == TokenKind::Unknown));
    assert_eq!(lexer.anomalies()[0].kind, AnomalyKind::UnknownCharacter);
    assert_eq!(lexer.anomalies()[0].offset, 6);
}

#[test]
fn test_end_of_file_is_idempotent() {
    let code = "<?php $a;";
    let mut lexer = Lexer::new(code);
    let mut last = lexer.lex();
    while last.kind != TokenKind::EndOfFile {
        last = lexer.lex();
    }
    for _ in 0..3 {
        let again = lexer.lex();
        assert_eq!(again.kind, TokenKind::EndOfFile);
        assert_eq!(again.offset, code.len());
        assert_eq!(again.length, 0);
    }

    let through_iterator: Vec<Token> = Lexer::new(code).collect();
    let eofs = through_iterator.iter().filter(|t| t.kind == TokenKind::EndOfFile).count();
    assert_eq!(eofs, 1);
}

#[test]
fn test_resume_from_recorded_mode_stack() {
    let code = "<?php $a = \"x$y\"; echo <<<EOT\nv $z\nEOT;\n";
    let all = tokenize(code);
    let shape = |tokens: &[Token]| -> Vec<(TokenKind, usize, usize)> {
        tokens.iter().map(|t| (t.kind, t.offset, t.length)).collect()
    };

    for (index, token) in all.iter().enumerate() {
        // Heredoc labels are not part of the mode stack.
        let inside_heredoc = token.mode_stack.iter().any(|m| matches!(m, LexMode::HereDoc | LexMode::EndHereDoc));
        let mut lexer = Lexer::new(code);
        lexer.set_input(code, Some(&token.mode_stack[..]), token.offset);
        if inside_heredoc {
            lexer.set_heredoc_label("EOT");
        }
        let resumed: Vec<Token> = lexer.collect();
        assert_eq!(shape(&resumed), shape(&all[index..]), "resuming at token {index}");
    }
}

#[test]
fn test_mode_snapshots_are_shared_between_mode_changes() {
    let tokens = tokenize("<?php $a = 1 + 2;");
    let scripting: Vec<&Token> = tokens.iter().filter(|t| t.kind == TokenKind::IntegerLiteral).collect();
    assert_eq!(scripting.len(), 2);
    assert!(std::sync::Arc::ptr_eq(&scripting[0].mode_stack, &scripting[1].mode_stack));
    assert_eq!(&*scripting[0].mode_stack, &[LexMode::Scripting]);
}

#[test]
fn test_halt_compiler_as_member_name_keeps_scripting() {
    use TokenKind::*;
    assert_eq!(
        kinds("<?php Foo::__halt_compiler(); echo 1;"),
        vec![
            OpenTag,
            Name,
            ColonColon,
            HaltCompiler,
            OpenParenthesis,
            CloseParenthesis,
            Semicolon,
            Echo,
            IntegerLiteral,
            Semicolon,
            EndOfFile,
        ]
    );

    let code = "<?php Foo::__halt_compiler(); echo 1;";
    let root = php_cst::parse(code);
    assert_eq!(root.text(code), code);
    assert!(root.errors().is_empty(), "{:#?}", root.errors());
    assert!(root.find(php_cst::PhraseKind::EchoIntrinsic).is_some());
}
