use jzon::{parse, parse_prefix, parse_str, parse_with_limits, JzonError, Limits, Node, Position};

/// Helper: parse text that is expected to be valid.
fn ok(text: &str) -> Node {
    parse_str(text).unwrap_or_else(|e| panic!("failed to parse {text:?}: {e}"))
}

/// Helper: parse text that is expected to fail.
fn err(text: &[u8]) -> JzonError {
    match parse(text) {
        Ok(node) => panic!(
            "expected an error for {:?}, got {node:?}",
            String::from_utf8_lossy(text)
        ),
        Err(e) => e,
    }
}

fn string(text: &str) -> String {
    ok(text).as_str().unwrap().to_string()
}

// ============================================================================
// Scalars
// ============================================================================

#[test]
fn parse_literals() {
    assert_eq!(ok("null"), Node::Null);
    assert_eq!(ok("true"), Node::Bool(true));
    assert_eq!(ok("false"), Node::Bool(false));
}

#[test]
fn parse_integers() {
    assert_eq!(ok("1234"), Node::Integer(1234));
    assert_eq!(ok("0"), Node::Integer(0));
    assert_eq!(ok("-12"), Node::Integer(-12));
}

#[test]
fn parse_floats() {
    assert_eq!(ok("12.34"), Node::Float(12.34));
    assert_eq!(ok("1.2E+04"), Node::Float(12000.0));
    assert_eq!(ok("-0.5e-1"), Node::Float(-0.05));
    assert_eq!(ok("1.0"), Node::Float(1.0));
}

#[test]
fn integer_and_float_stay_distinct() {
    assert_ne!(ok("1"), ok("1.0"));
}

#[test]
fn overflowing_integer_becomes_float() {
    assert_eq!(ok("18446744073709551616"), Node::Float(18446744073709551616.0));
}

#[test]
fn numbers_beyond_f64_range_become_infinite() {
    assert_eq!(ok("1e400"), Node::Float(f64::INFINITY));
    assert_eq!(ok("-1e400"), Node::Float(f64::NEG_INFINITY));
    assert_eq!(ok(&"9".repeat(400)), Node::Float(f64::INFINITY));
}

#[test]
fn surrounding_whitespace_is_ignored() {
    assert_eq!(ok(" \t\r\n 42 \n"), Node::Integer(42));
}

// ============================================================================
// Strings
// ============================================================================

#[test]
fn parse_plain_and_multibyte_strings() {
    assert_eq!(string("\"hello\""), "hello");
    assert_eq!(string("\"\""), "");
    assert_eq!(string("\"é\""), "é");
    assert_eq!(string("\"值也是汉字\""), "值也是汉字");
}

#[test]
fn parse_unicode_escape() {
    let s = string("\"\\u5f20\"");
    assert_eq!(s, "张");
    assert_eq!(s.as_bytes(), [0xE5, 0xBC, 0xA0]);
    assert_eq!(string("\"\\u00e9\""), "é");
    assert_eq!(string("\"\\u0041BC\""), "ABC");
}

#[test]
fn parse_surrogate_pair() {
    assert_eq!(string("\"\\ud83d\\ude00\""), "😀");
    assert_eq!(string("\"x\\uD83D\\uDE00y\""), "x😀y");
}

#[test]
fn lone_surrogates_are_rejected() {
    assert!(matches!(err(b"\"\\ud83d\""), JzonError::InvalidCodePoint { .. }));
    assert!(matches!(err(b"\"\\ude00\""), JzonError::InvalidCodePoint { .. }));
    assert!(matches!(err(b"\"\\ud83d\\u0041\""), JzonError::InvalidCodePoint { .. }));
    assert!(matches!(err(b"\"\\u0000\""), JzonError::InvalidCodePoint { .. }));
}

#[test]
fn parse_short_escapes() {
    assert_eq!(
        string("\"a\\nb\\tc\\\"d\\\\e\\/f\\bg\\fh\\ri\""),
        "a\nb\tc\"d\\e/f\u{8}g\u{c}h\ri"
    );
}

#[test]
fn unknown_escape_is_rejected() {
    assert!(matches!(
        err(b"\"\\x\""),
        JzonError::UnexpectedByte { found: b'x', .. }
    ));
}

#[test]
fn bad_hex_digit_is_rejected() {
    assert!(matches!(
        err(b"\"\\u12g4\""),
        JzonError::UnexpectedByte { found: b'g', .. }
    ));
}

#[test]
fn raw_control_byte_is_rejected() {
    assert!(matches!(
        err(b"\"a\nb\""),
        JzonError::UnexpectedByte { found: b'\n', .. }
    ));
}

#[test]
fn invalid_utf8_is_rejected() {
    assert!(matches!(err(b"\"\xff\xfe\""), JzonError::InvalidUtf8 { .. }));
}

#[test]
fn unterminated_string_is_end_of_input() {
    assert!(matches!(err(b"\"abc"), JzonError::UnexpectedEndOfInput { .. }));
    assert!(matches!(err(b"\"abc\\"), JzonError::UnexpectedEndOfInput { .. }));
}

// ============================================================================
// Containers
// ============================================================================

#[test]
fn parse_empty_containers() {
    let object = ok("{}");
    assert_eq!(object.len().unwrap(), 0);
    assert!(object.as_object().is_ok());

    let array = ok("[ ]");
    assert_eq!(array.len().unwrap(), 0);
    assert!(array.as_array().is_ok());
}

#[test]
fn parse_nested_object() {
    let node = ok(r#"{"a": {"b": [1, 2.5, "x", null, true]}}"#);
    let items = node.value_of("a").unwrap().value_of("b").unwrap();
    assert_eq!(
        items.as_array().unwrap(),
        [
            Node::Integer(1),
            Node::Float(2.5),
            Node::from("x"),
            Node::Null,
            Node::Bool(true)
        ]
    );
}

#[test]
fn whitespace_does_not_change_the_tree() {
    assert_eq!(ok(r#"{"a":1}"#), ok("{ \"a\" :\n\t1 }"));
    assert_eq!(ok("[1,2]"), ok("[ 1 ,\r\n 2 ]"));
}

#[test]
fn object_keys_keep_input_order() {
    let node = ok(r#"{"z":1,"a":2,"m":3}"#);
    assert_eq!(node.keys().unwrap(), ["z", "a", "m"]);
}

#[test]
fn duplicate_key_last_value_wins_first_position_kept() {
    let node = ok(r#"{"a":1,"b":2,"a":3}"#);
    assert_eq!(node.len().unwrap(), 2);
    assert_eq!(node.keys().unwrap(), ["a", "b"]);
    assert_eq!(node.value_of("a").unwrap(), &Node::Integer(3));
}

#[test]
fn escaped_keys_are_decoded() {
    let node = ok("{\"key\\u002e\\\"q\\\"\": 1}");
    assert!(node.has("key.\"q\"").unwrap());
}

#[test]
fn trailing_comma_wants_a_value() {
    for text in [&b"{\"a\":1,}"[..], b"[1,]"] {
        match err(text) {
            JzonError::UnexpectedByte { expected, .. } => assert_eq!(expected, "a value"),
            other => panic!("unexpected error {other:?}"),
        }
    }
}

#[test]
fn missing_separators_are_reported() {
    assert!(matches!(
        err(br#"{"a" 1}"#),
        JzonError::UnexpectedByte { found: b'1', .. }
    ));
    assert!(matches!(
        err(br#"{"a":1 "b":2}"#),
        JzonError::UnexpectedByte { found: b'"', .. }
    ));
    assert!(matches!(
        err(b"[1 2]"),
        JzonError::UnexpectedByte { found: b'2', .. }
    ));
}

#[test]
fn unquoted_key_is_rejected() {
    match err(b"{a:1}") {
        JzonError::UnexpectedByte { expected, found, .. } => {
            assert_eq!(expected, "`\"`");
            assert_eq!(found, b'a');
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn unterminated_containers_are_end_of_input() {
    for text in [&b"[1, 2"[..], b"{\"a\":", b"{\"a\"", b"[", b"{"] {
        assert!(
            matches!(err(text), JzonError::UnexpectedEndOfInput { .. }),
            "{:?}",
            String::from_utf8_lossy(text)
        );
    }
}

// ============================================================================
// Literals and dispatch
// ============================================================================

#[test]
fn misspelled_literals_report_what_was_found() {
    match err(b"tru") {
        JzonError::UnexpectedLiteral { expected, found, .. } => {
            assert_eq!(expected, "true");
            assert_eq!(found, "tru");
        }
        other => panic!("unexpected error {other:?}"),
    }
    match err(b"[nul!]") {
        JzonError::UnexpectedLiteral { expected, found, .. } => {
            assert_eq!(expected, "null");
            assert_eq!(found, "nul!");
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert!(matches!(err(b"fals"), JzonError::UnexpectedLiteral { .. }));
}

#[test]
fn unknown_first_byte_is_rejected() {
    assert!(matches!(
        err(b"@"),
        JzonError::UnexpectedByte { found: b'@', .. }
    ));
    assert!(matches!(
        err(b"+1"),
        JzonError::UnexpectedByte { found: b'+', .. }
    ));
}

#[test]
fn empty_input_is_end_of_input() {
    assert!(matches!(err(b""), JzonError::UnexpectedEndOfInput { .. }));
    assert!(matches!(err(b"  \n "), JzonError::UnexpectedEndOfInput { .. }));
}

#[test]
fn bad_numbers_are_rejected() {
    assert!(matches!(err(b"01"), JzonError::UnexpectedByte { found: b'1', .. }));
    assert!(matches!(err(b"1."), JzonError::UnexpectedEndOfInput { .. }));
    assert!(matches!(err(b"[1.]"), JzonError::UnexpectedByte { found: b']', .. }));
    assert!(matches!(err(b"-"), JzonError::UnexpectedEndOfInput { .. }));
}

// ============================================================================
// Prefix parsing and trailing content
// ============================================================================

#[test]
fn prefix_parse_leaves_the_rest() {
    let (node, consumed) = parse_prefix(b"123.4f").unwrap();
    assert_eq!(node, Node::Float(123.4));
    assert_eq!(consumed, 5);

    let (node, consumed) = parse_prefix(b"  [1] tail").unwrap();
    assert_eq!(node, Node::Array(vec![Node::Integer(1)]));
    assert_eq!(consumed, 5);
}

#[test]
fn full_parse_rejects_trailing_content() {
    assert!(matches!(err(b"123.4f"), JzonError::TrailingContent { .. }));
    assert!(matches!(err(b"{} {}"), JzonError::TrailingContent { .. }));
    assert!(matches!(err(b"null x"), JzonError::TrailingContent { .. }));
}

#[test]
fn from_str_parses() {
    let node: Node = "[1, 2]".parse().unwrap();
    assert_eq!(node.len().unwrap(), 2);
    assert!("[1, 2".parse::<Node>().is_err());
}

// ============================================================================
// Positions
// ============================================================================

#[test]
fn errors_carry_row_and_column() {
    match err(b"{\n  \"a\": tru\n}") {
        JzonError::UnexpectedLiteral { position, .. } => {
            assert_eq!(position, Position { row: 1, col: 7 });
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn error_messages_show_one_based_position() {
    let message = err(b"[1,\r\n  x]").to_string();
    assert!(message.contains("[2:3]"), "{message}");
    assert!(message.contains("'x'"), "{message}");
}

#[test]
fn independent_parses_do_not_share_position() {
    let first = err(b"\n\n\n@").to_string();
    let second = err(b"@").to_string();
    assert!(first.contains("[4:1]"), "{first}");
    assert!(second.contains("[1:1]"), "{second}");
}

// ============================================================================
// Limits
// ============================================================================

#[test]
fn depth_limit_is_enforced() {
    assert!(parse_with_limits(b"[[1]]", Limits::new(2)).is_ok());
    assert!(matches!(
        parse_with_limits(b"[[[1]]]", Limits::new(2)),
        Err(JzonError::DepthLimitExceeded { limit: 2, .. })
    ));
    assert!(matches!(
        parse_with_limits(br#"{"a":{"b":{}}}"#, Limits::new(2)),
        Err(JzonError::DepthLimitExceeded { .. })
    ));
}

#[test]
fn default_limit_stops_runaway_nesting() {
    let deep = "[".repeat(Limits::DEFAULT_MAX_DEPTH + 1);
    assert!(matches!(
        parse(deep.as_bytes()),
        Err(JzonError::DepthLimitExceeded { .. })
    ));
}

#[test]
fn depth_counter_resets_between_siblings() {
    let text = format!("[{}]", vec!["[[1]]"; 50].join(","));
    assert!(parse_with_limits(text.as_bytes(), Limits::new(3)).is_ok());
    assert!(parse_with_limits(b"[1]", Limits::unlimited()).is_ok());
}

// ============================================================================
// Realistic document
// ============================================================================

#[test]
fn parse_deep_document() {
    let node = ok(include_str!("fixtures/deep.json"));
    assert_eq!(node.len().unwrap(), 4);
    assert_eq!(
        node.keys().unwrap(),
        ["key-object", "key-array", "key-汉字", "key-escaped-.[];-key"]
    );
    assert_eq!(node.value_of("key-array").unwrap().len().unwrap(), 3);
    assert_eq!(node.value_of("key-汉字").unwrap().as_str().unwrap(), "值也是汉字");
}
