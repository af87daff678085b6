mod common;

use std::fs;

use common::{SharedBuffer, run};
use splice::{
    ast::Node,
    codec::{decode_image, decode_tokens, encode_image, read_image, read_tokens},
    compile_bytecode, compile_image,
    error::{DecodeError, Error},
    interpreter::{
        evaluator::core::Context,
        lexer::{Token, tokenize},
    },
    parse_bytecode, parse_source, with_interpreter_stack,
};
use walkdir::WalkDir;

const SNIPPETS: &[&str] = &["print 1 + 2 * 3",
                            "let a = [1, \"two\", [3]]; a[5] = !a[0]; print a[1]",
                            "func f(x, y) { if x > y { return x } else if x == y { return } else { return y } }",
                            "for i in 1.3 { print(i); }\nwhile i > 0 i = i - 1",
                            "import \"lib.sp\"; import \"math.h\"",
                            "write(\"out.txt\"); write(\"out.txt\", read(\"in.txt\") + 1)",
                            "info 1; warn \"w\"; raise 0.25",
                            "print -x || not y && 1.5 != 2 <= 3 >= 4 < 5",
                            "{ { } }"];

/// Every sample program plus the inline snippets.
fn corpus() -> Vec<String> {
    let mut sources: Vec<String> = SNIPPETS.iter().map(ToString::to_string).collect();

    for entry in WalkDir::new("tests/programs").into_iter()
                                               .filter_map(Result::ok)
                                               .filter(|e| e.path().extension().is_some_and(|ext| ext == "sp"))
    {
        sources.push(fs::read_to_string(entry.path()).unwrap());
    }

    sources
}

#[test]
fn image_round_trip_is_exact() {
    for source in corpus() {
        let program = parse_source(&source).unwrap();
        let bytes = encode_image(&program).unwrap();
        let decoded = decode_image(&bytes).unwrap();

        assert_eq!(decoded, program, "round trip of:\n{source}");
        assert_eq!(encode_image(&decoded).unwrap(), bytes, "re-encoding of:\n{source}");
        assert_eq!(read_image(bytes.as_slice()).unwrap(), program);
    }
}

#[test]
fn bytecode_round_trip_through_the_binary_lexer() {
    for source in corpus() {
        let bytes = compile_bytecode(&source).unwrap();

        assert_eq!(parse_bytecode(&bytes).unwrap(),
                   parse_source(&source).unwrap(),
                   "bytecode of:\n{source}");
    }
}

#[test]
fn bytecode_keeps_number_values() {
    let source = "print 0.1 + 123456789.25 * 1";
    let tokens: Vec<_> = tokenize(source).unwrap()
                                         .into_iter()
                                         .map(|(token, _)| token)
                                         .filter(|token| *token != Token::Eof)
                                         .collect();

    let decoded = decode_tokens(&compile_bytecode(source).unwrap()).unwrap();
    assert_eq!(decoded, tokens);
}

#[test]
fn every_image_prefix_is_rejected() {
    for source in corpus() {
        let bytes = compile_image(&source).unwrap();

        for len in 0..bytes.len() {
            assert!(decode_image(&bytes[..len]).is_err(),
                    "prefix of {len} bytes decoded for:\n{source}");
            assert!(read_image(&bytes[..len]).is_err());
        }
    }
}

#[test]
fn bytecode_prefixes_fail_or_yield_a_token_prefix() {
    for source in corpus() {
        let bytes = compile_bytecode(&source).unwrap();
        let full = decode_tokens(&bytes).unwrap();

        for len in 0..bytes.len() {
            match decode_tokens(&bytes[..len]) {
                Ok(tokens) => assert!(full.starts_with(&tokens)),
                Err(DecodeError::UnexpectedEof { .. }) => {},
                Err(e) => panic!("unexpected error for a {len} byte prefix: {e}"),
            }
        }
    }
}

#[test]
fn streamed_bytecode_matches_in_memory_decoding() {
    for source in corpus() {
        let bytes = compile_bytecode(&source).unwrap();
        let full = decode_tokens(&bytes).unwrap();

        assert_eq!(read_tokens(bytes.as_slice()).unwrap(), full, "streamed bytecode of:\n{source}");

        for len in 0..bytes.len() {
            match read_tokens(&bytes[..len]) {
                Ok(tokens) => assert!(full.starts_with(&tokens)),
                Err(DecodeError::UnexpectedEof { .. }) => {},
                Err(e) => panic!("unexpected error for a streamed {len} byte prefix: {e}"),
            }
        }
    }
}

#[test]
fn long_operator_chains_round_trip_through_the_image() {
    let source = format!("let total = 0{}\nprint total", " + 1".repeat(1_100));

    let output = with_interpreter_stack(move || {
                     let program = parse_source(&source).unwrap();
                     let decoded = decode_image(&encode_image(&program).unwrap()).unwrap();
                     assert_eq!(decoded, program);

                     let out = SharedBuffer::default();
                     Context::new().with_output(out.clone()).run(&decoded).unwrap();
                     out.contents()
                 }).unwrap();

    assert_eq!(output, "1100\n");
}

#[test]
fn compiled_programs_behave_like_source() {
    for entry in WalkDir::new("tests/programs").into_iter()
                                               .filter_map(Result::ok)
                                               .filter(|e| e.path().extension().is_some_and(|ext| ext == "sp"))
    {
        let source = fs::read_to_string(entry.path()).unwrap();
        let expected = run(&source).stdout;

        let from_image = decode_image(&compile_image(&source).unwrap()).unwrap();
        let from_bytecode = parse_bytecode(&compile_bytecode(&source).unwrap()).unwrap();

        for program in [from_image, from_bytecode] {
            let out = SharedBuffer::default();
            let mut context = Context::new().with_output(out.clone());
            context.run(&program).unwrap();

            assert_eq!(out.contents(), expected, "compiled {:?}", entry.path());
        }
    }
}

#[test]
fn header_is_checked() {
    let mut bytes = compile_image("print 1").unwrap();
    assert_eq!(&bytes[..5], b"SPC\0\x01");

    bytes[4] = 2;
    assert!(matches!(decode_image(&bytes), Err(DecodeError::UnsupportedVersion { version: 2 })));

    bytes[0] = b'X';
    assert!(matches!(decode_image(&bytes), Err(DecodeError::BadMagic)));
}

#[test]
fn unknown_opcode_is_rejected() {
    assert!(matches!(decode_tokens(&[0x02, 0x7F]),
                     Err(DecodeError::UnknownOpcode { opcode: 0x7F })));
}

#[test]
fn build_errors_are_reported_through_the_crate_error() {
    assert!(matches!(compile_image("let x = 1 @ 2"), Err(Error::Lex(_))));
    assert!(matches!(compile_image("let = 2"), Err(Error::Parse(_))));
    // Bytecode only needs to tokenize.
    assert!(compile_bytecode("let = 2").is_ok());
}

#[test]
fn oversized_strings_cannot_be_encoded() {
    let program = Node::Print(Box::new(Node::Str("x".repeat(70_000))));
    assert!(encode_image(&program).is_err());
}
