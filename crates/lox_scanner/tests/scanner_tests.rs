//! Scanner integration tests.
//!
//! Verifies that the scanner correctly tokenizes lox constructs and reports
//! malformed input without stopping.

use lox_core::TextSpan;
use lox_diagnostics::DiagnosticCategory;
use lox_scanner::{scan, ScanOutput, Scanner};
use lox_syntax::{Literal, Token, TokenKind};

/// Helper: scan all tokens from source, dropping the end-of-input marker.
fn scan_all(source: &str) -> Vec<Token> {
    let mut tokens = scan(source).tokens;
    let eof = tokens.pop().expect("scan always yields an end-of-input token");
    assert_eq!(eof.kind, TokenKind::Eof);
    tokens
}

/// Helper: scan all token kinds, end-of-input included.
fn scan_kinds(source: &str) -> Vec<TokenKind> {
    scan(source).tokens.into_iter().map(|t| t.kind).collect()
}

fn messages(output: &ScanOutput) -> Vec<(u32, String)> {
    output
        .diagnostics
        .diagnostics()
        .iter()
        .map(|d| (d.line, d.message_text.clone()))
        .collect()
}

#[test]
fn test_empty_source() {
    let output = scan("");
    assert_eq!(output.tokens.len(), 1);
    let eof = &output.tokens[0];
    assert_eq!(eof.kind, TokenKind::Eof);
    assert_eq!(eof.lexeme, "");
    assert!(eof.literal.is_none());
    assert_eq!(eof.line, 1);
    assert!(output.diagnostics.is_empty());
}

#[test]
fn test_whitespace_and_comments_only() {
    for source in ["   \n\t  \r\n", "// just a comment", "/* block */", "// a\n/* b\nc */\n  "] {
        let output = scan(source);
        assert_eq!(output.tokens.len(), 1, "source {source:?}");
        assert!(output.tokens[0].is_eof());
        assert!(output.diagnostics.is_empty());
    }
}

#[test]
fn test_maximal_munch() {
    assert_eq!(scan_kinds("!="), vec![TokenKind::BangEqual, TokenKind::Eof]);
    assert_eq!(
        scan_kinds("<=="),
        vec![TokenKind::LessEqual, TokenKind::Equal, TokenKind::Eof]
    );
    assert_eq!(
        scan_kinds("===>=="),
        vec![TokenKind::EqualEqual, TokenKind::Equal, TokenKind::GreaterEqual, TokenKind::Equal, TokenKind::Eof]
    );
    assert_eq!(scan_kinds("! ="), vec![TokenKind::Bang, TokenKind::Equal, TokenKind::Eof]);
}

#[test]
fn test_string_spanning_lines() {
    let output = scan("\n\n\"a\nb\"\n");
    assert_eq!(output.tokens.len(), 2);

    let string = &output.tokens[0];
    assert_eq!(string.kind, TokenKind::String);
    assert_eq!(string.line, 3);
    assert_eq!(string.lexeme, "\"a\nb\"");
    assert_eq!(string.literal, Some(Literal::String("a\nb".into())));

    let eof = &output.tokens[1];
    assert_eq!(eof.line, 5);
}

#[test]
fn test_empty_string() {
    let tokens = scan_all("\"\"");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].literal, Some(Literal::String(String::new())));
}

#[test]
fn test_string_keeps_non_ascii_content() {
    let tokens = scan_all("\"héllo → world\"");
    assert_eq!(tokens[0].literal, Some(Literal::String("héllo → world".into())));
}

#[test]
fn test_numbers() {
    let tokens = scan_all("123");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].literal, Some(Literal::Number(123.0)));

    let tokens = scan_all("1.5");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].literal, Some(Literal::Number(1.5)));

    let tokens = scan_all("007");
    assert_eq!(tokens[0].lexeme, "007");
    assert_eq!(tokens[0].literal, Some(Literal::Number(7.0)));
}

#[test]
fn test_trailing_dot_is_not_part_of_number() {
    let tokens = scan_all("1.");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].lexeme, "1");
    assert_eq!(tokens[1].kind, TokenKind::Dot);

    // Method-call style access after a number.
    assert_eq!(
        scan_kinds("1.foo"),
        vec![TokenKind::Number, TokenKind::Dot, TokenKind::Identifier, TokenKind::Eof]
    );
    // A second fraction starts a new token.
    let tokens = scan_all("1.2.3");
    assert_eq!(tokens[0].lexeme, "1.2");
    assert_eq!(tokens[1].kind, TokenKind::Dot);
    assert_eq!(tokens[2].lexeme, "3");
}

#[test]
fn test_leading_dot_is_not_part_of_number() {
    assert_eq!(scan_kinds(".5"), vec![TokenKind::Dot, TokenKind::Number, TokenKind::Eof]);
}

#[test]
fn test_keyword_requires_full_match() {
    let tokens = scan_all("classroom");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].lexeme, "classroom");

    let tokens = scan_all("_if if_ If");
    assert!(tokens.iter().all(|t| t.kind == TokenKind::Identifier));
}

#[test]
fn test_all_keywords() {
    let source = "and class else false for fun if nil or print return super this true var while";
    assert_eq!(
        scan_kinds(source),
        vec![
            TokenKind::And,
            TokenKind::Class,
            TokenKind::Else,
            TokenKind::False,
            TokenKind::For,
            TokenKind::Fun,
            TokenKind::If,
            TokenKind::Nil,
            TokenKind::Or,
            TokenKind::Print,
            TokenKind::Return,
            TokenKind::Super,
            TokenKind::This,
            TokenKind::True,
            TokenKind::Var,
            TokenKind::While,
            TokenKind::Eof,
        ]
    );
    assert!(scan_all(source).iter().all(|t| t.literal.is_none()));
}

#[test]
fn test_identifier_with_digits() {
    let tokens = scan_all("x1 9x");
    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].lexeme, "x1");
    assert_eq!(tokens[1].kind, TokenKind::Number);
    assert_eq!(tokens[2].kind, TokenKind::Identifier);
    assert_eq!(tokens[2].lexeme, "x");
}

#[test]
fn test_unterminated_string() {
    let output = scan("\"abc");
    assert_eq!(output.tokens.len(), 1);
    assert!(output.tokens[0].is_eof());
    assert_eq!(messages(&output), vec![(1, "Unterminated string.".to_string())]);
    assert!(output.has_errors());
}

#[test]
fn test_unterminated_string_reports_line_where_scan_stopped() {
    let output = scan("print \"abc\ndef");
    assert_eq!(scan_kinds("print \"abc\ndef"), vec![TokenKind::Print, TokenKind::Eof]);
    assert_eq!(messages(&output), vec![(2, "Unterminated string.".to_string())]);
    assert_eq!(output.tokens.last().unwrap().line, 2);
}

#[test]
fn test_unexpected_character() {
    let output = scan("@");
    assert_eq!(output.tokens.len(), 1);
    assert_eq!(messages(&output), vec![(1, "Unexpected character '@'".to_string())]);

    let output = scan("a\n\n  # b");
    let kinds: Vec<_> = output.tokens.iter().map(|t| t.kind).collect();
    assert_eq!(kinds, vec![TokenKind::Identifier, TokenKind::Identifier, TokenKind::Eof]);
    assert_eq!(messages(&output), vec![(3, "Unexpected character '#'".to_string())]);
}

#[test]
fn test_scanning_continues_after_errors() {
    let output = scan("1 @ 2 $ 3");
    let numbers: Vec<_> = output
        .tokens
        .iter()
        .filter_map(|t| t.literal.as_ref().and_then(Literal::as_number))
        .collect();
    assert_eq!(numbers, vec![1.0, 2.0, 3.0]);
    assert_eq!(output.diagnostics.error_count(), 2);
}

#[test]
fn test_block_comment() {
    let output = scan("/* a\nb */+");
    assert_eq!(output.tokens.len(), 2);
    assert_eq!(output.tokens[0].kind, TokenKind::Plus);
    assert_eq!(output.tokens[0].line, 2);
    assert_eq!(output.tokens[1].line, 2);
}

#[test]
fn test_block_comments_do_not_nest() {
    assert_eq!(
        scan_kinds("/* outer /* inner */ x */"),
        vec![TokenKind::Identifier, TokenKind::Star, TokenKind::Slash, TokenKind::Eof]
    );
}

#[test]
fn test_unterminated_block_comment_is_a_warning() {
    let output = scan("x /* never\nclosed");
    assert_eq!(scan_kinds("x /* never\nclosed"), vec![TokenKind::Identifier, TokenKind::Eof]);
    let diags = output.diagnostics.diagnostics();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].category, DiagnosticCategory::Warning);
    assert_eq!(diags[0].line, 2);
    assert_eq!(diags[0].message_text, "Unterminated block comment.");
    assert!(!output.has_errors());
}

#[test]
fn test_line_comment_keeps_newline() {
    let tokens = scan_all("// first\nvar");
    assert_eq!(tokens[0].kind, TokenKind::Var);
    assert_eq!(tokens[0].line, 2);
}

#[test]
fn test_lone_star_and_dot() {
    assert_eq!(scan_kinds("*"), vec![TokenKind::Star, TokenKind::Eof]);
    assert_eq!(scan_kinds("a.b"), vec![TokenKind::Identifier, TokenKind::Dot, TokenKind::Identifier, TokenKind::Eof]);
}

#[test]
fn test_lexemes_match_source_spans() {
    let source = "fun add(a, b) {\n  return a + b >= 10.25 != \"str\ning\";\n} // done";
    let output = scan(source);
    for token in &output.tokens {
        assert_eq!(&source[token.span.to_range()], token.lexeme, "token {token}");
    }
    let eof = output.tokens.last().unwrap();
    assert_eq!(eof.span, TextSpan::empty(source.len() as u32));
}

#[test]
fn test_statement() {
    let tokens = scan_all("print (1 + 2) * 3;");
    let rendered: Vec<String> = tokens.iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        vec![
            "PRINT print null",
            "LEFT_PAREN ( null",
            "NUMBER 1 1.0",
            "PLUS + null",
            "NUMBER 2 2.0",
            "RIGHT_PAREN ) null",
            "STAR * null",
            "NUMBER 3 3.0",
            "SEMICOLON ; null",
        ]
    );
}

#[test]
fn test_scanner_instances_are_independent() {
    let first = Scanner::new("@").scan_tokens();
    let second = Scanner::new("ok").scan_tokens();
    assert!(first.has_errors());
    assert!(second.diagnostics.is_empty());
}
