mod common;

use std::{env, fs, path::PathBuf, process};

use common::{assert_failure, assert_output, assert_success, run, run_in};
use splice::{
    error::{Error, RuntimeError},
    interpreter::evaluator::core::{Context, MAX_CALL_DEPTH},
};
use walkdir::WalkDir;

#[test]
fn sample_programs_match_expected_output() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/programs").into_iter()
                                      .filter_map(Result::ok)
                                      .filter(|e| e.path().extension().is_some_and(|ext| ext == "sp"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected = fs::read_to_string(path.with_extension("out")).unwrap_or_else(|e| {
                                                                          panic!("Missing expected output for {path:?}: {e}")
                                                                      });

        count += 1;
        let outcome = run(&source);
        if let Err(e) = outcome.result {
            panic!("Program {path:?} failed:\n{source}\nError: {e}");
        }
        assert_eq!(outcome.stdout, expected, "output of {path:?}");
    }

    assert!(count > 0, "No programs found in tests/programs");
}

/// A file path in the temp directory that is unique to this test process.
fn temp_path(name: &str) -> PathBuf {
    env::temp_dir().join(format!("splice-{}-{name}", process::id()))
}

#[test]
fn precedence_and_grouping() {
    assert_output("print 1 + 2 * 3", "7\n");
    assert_output("print (1 + 2) * 3", "9\n");
    assert_output("print 10 - 4 - 3", "3\n");
    assert_output("print 2 * -3", "-6\n");
    assert_output("print 1 < 2 == 1", "1\n");
}

#[test]
fn number_formatting() {
    assert_output("print 10 / 4", "2.5\n");
    assert_output("print 1 / 3", "0.333333\n");
    assert_output("print 1000000", "1e+06\n");
    assert_output("print 123456", "123456\n");
    assert_output("print 1 / 0", "inf\n");
}

#[test]
fn strings_and_coercion() {
    assert_output("print \"x\" + 1", "x1\n");
    assert_output("print 1.5 + \"!\"", "1.5!\n");
    assert_output("print \"3 apples\" * 2", "6\n");
    assert_output("print \"abc\" - 1", "-1\n");
    assert_output("print \"1\" == 1", "1\n");
    assert_output("print \"1.0\" == 1", "0\n");
    assert_output("print \"abc\" != \"abd\"", "1\n");
}

#[test]
fn logic_is_eager() {
    assert_output("print 1 && 0; print 1 or 0; print !0; print not 5", "0\n1\n1\n0\n");
    assert_output("let a = []; print 0 && append(a, 1); print len(a)", "0\n1\n");
    assert_output("print true + true", "2\n");
}

#[test]
fn variables() {
    assert_output("let x = 1; x = x + 1; print x", "2\n");
    assert_output("print never_assigned + 1", "1\n");
    assert_output("let v = 1; v = \"now text\"; print v", "now text\n");
    assert_output("{ let inner = 1; } print inner", "1\n");
}

#[test]
fn control_flow() {
    assert_output("let i = 0; while i < 3 { i = i + 1; } print i", "3\n");
    assert_output("let i = 0; while i < 3 i = i + 1; print i", "3\n");
    assert_output("let n = 2; if n == 1 { print \"one\" } else if n == 2 { print \"two\" } else { print \"many\" }",
                  "two\n");
    assert_output("if 0 print 1", "");
}

#[test]
fn for_loops() {
    assert_output("for i in 1.3 { print(i); }", "1\n2\n3\n");
    assert_output("let n = 4; for k in 2 . n { print k; }", "2\n3\n4\n");
    assert_output("for k in 0 . 2.7 { print k }", "0\n1\n2\n");
    assert_output("for k in 5.1 { print k; }", "");
    assert_output("for i in 1.3 { } print i", "3\n");
}

#[test]
fn arrays() {
    assert_output("let a = []; append(a, 1); append(a, 2); append(a, 3); print len(a)", "3\n");
    assert_output("let b = []; b[5] = 7; print len(b); print b[0] + b[4]; print b[5]",
                  "6\n0\n7\n");
    assert_output("let a = [1, 2]; print a[5]; print a[-1]; print a[1.9]", "0\n0\n2\n");
    assert_output("print [1, \"two\", [3]]", "[1, two, [3]]\n");
    assert_output("let a = [[1, 2], [3]]; print a[0][1]", "2\n");
    assert_output("print len(\"abc\"); print len(5)", "0\n0\n");
}

#[test]
fn arrays_are_shared() {
    assert_output("let a = [1]; let b = a; append(b, 2); print len(a)", "2\n");
    assert_output("let a = [0]; func fill(arr) { arr[0] = 9; } fill(a); print a", "[9]\n");
}

#[test]
fn functions() {
    assert_output("func double(x) { return x * 2; } print double(21)", "42\n");
    assert_output("func fact(n) { if n <= 1 { return 1; } return n * fact(n - 1); } print fact(5)",
                  "120\n");
    assert_output("func h(a, b) { return a + b; } print h(1)", "1\n");
    assert_output("func nothing() { } print nothing()", "0\n");
    assert_output("func f() { return 1; } func f() { return 2; } print f()", "2\n");
    assert_output("func first_over(limit) { let i = 0; while 1 { i = i + 1; if i > limit { return i; } } } print first_over(3)",
                  "4\n");
}

#[test]
fn parameters_do_not_outlive_the_call() {
    assert_output("func f(p) { return p * 2; } print f(4); print p", "8\n0\n");
    assert_output("func g() { let local = 5; return local; } print g(); print local", "5\n0\n");
    assert_output("let p = 1; func f(p) { return p; } print f(7); print p", "7\n1\n");
}

#[test]
fn functions_can_update_globals() {
    assert_output("let x = 1; func set_x() { x = 9; } set_x(); print x", "9\n");
}

#[test]
fn extra_arguments_are_not_evaluated() {
    assert_output("func one(a) { return a; } print one(1, missing())", "1\n");
}

#[test]
fn top_level_return_stops_the_program() {
    assert_output("print 1; return; print 2", "1\n");
    assert_output("for i in 1.10 { if i == 2 { return } print i }", "1\n");
}

#[test]
fn info_and_warn() {
    let outcome = run("info \"starting\"; warn \"careful\"; print 1");

    assert!(outcome.result.is_ok());
    assert_eq!(outcome.stdout, "[INFO] starting\n1\n");
    assert_eq!(outcome.stderr, "[WARN] careful\n");
}

#[test]
fn raise_is_fatal_and_keeps_earlier_output() {
    let outcome = run("print \"before\"; raise \"boom \" + 42; print \"after\"");

    assert_eq!(outcome.stdout, "before\n");
    assert_eq!(outcome.stderr, "[ERROR] boom 42\n");
    assert!(matches!(outcome.result,
                     Err(Error::Runtime(RuntimeError::Raised { message })) if message == "boom 42"));
}

#[test]
fn undefined_function_is_fatal_and_keeps_earlier_output() {
    let outcome = run("print 1; nope(2); print 3");

    assert_eq!(outcome.stdout, "1\n");
    assert!(matches!(outcome.result,
                     Err(Error::Runtime(RuntimeError::UndefinedFunction { name })) if name == "nope"));
}

#[test]
fn runtime_errors() {
    assert_failure("let s = \"str\"; print s[0]");
    assert_failure("let a = [1]; a[-1] = 2");
    assert_failure("let a = [[1]]; a[0][0] = 5");
    assert_failure("let n = 3; n[0] = 1");
    assert_failure("append(5, 1)");
    assert_failure("write(1, \"x\")");

    assert!(matches!(run("let a = [1]; a[-2] = 0").result,
                     Err(Error::Runtime(RuntimeError::NegativeIndex { index: -2 }))));
}

#[test]
fn syntax_errors() {
    assert_failure("print (1");
    assert_failure("let x = 1 @ 2");
    assert_failure("let = 4");
    assert_failure("func f(1) { }");
    assert_failure("1 + 2 = 3");
}

#[test]
fn comments_are_ignored() {
    assert_output("// leading comment\nprint 1 // trailing\n// print 2", "1\n");
}

#[test]
fn noop_native() {
    assert_output("print noop(1, 2); print NOOP()", "0\n0\n");
}

#[test]
fn input_reads_lines() {
    assert_output("let line = input(\"name? \"); print \"[\" + line + \"]\"", "name? []\n");

    let outcome = run_in(|| Context::new().with_input("first\r\nsecond\n".as_bytes()),
                         "print input(); print input(); print len(input())");

    assert!(outcome.result.is_ok());
    assert_eq!(outcome.stdout, "first\nsecond\n0\n");
}

#[test]
fn read_and_write_files() {
    let path = temp_path("read-write.txt");
    let path = path.to_string_lossy();
    let _ = fs::remove_file(path.as_ref());

    assert_output(&format!("print \"[\" + read(\"{path}\") + \"]\""), "[]\n");
    assert_output(&format!("write(\"{path}\", \"hello \" + 1); print read(\"{path}\")"),
                  "hello 1\n");
    assert_output(&format!("write(\"{path}\"); print read(\"{path}\") + 1"), "01\n");

    let _ = fs::remove_file(path.as_ref());
}

#[test]
fn recursion_is_bounded() {
    let outcome = run_in(|| Context::new().with_max_call_depth(16),
                         "func down(n) { return down(n + 1); } down(0)");

    assert!(matches!(outcome.result,
                     Err(Error::Runtime(RuntimeError::CallDepthExceeded { depth: 16 }))));

    let outcome = run_in(|| Context::new().with_max_call_depth(16),
                         "func count(n) { if n == 0 { return 0; } return 1 + count(n - 1); } print count(15)");

    assert_eq!(outcome.stdout, "15\n");
}

#[test]
fn deep_recursion_runs_at_the_default_limit() {
    let count = "func count(n) { if n == 0 { return 0; } return 1 + count(n - 1); }";

    assert_output(&format!("{count} print count(4000)"), "4000\n");

    let outcome = run(&format!("{count} print count(6000)"));
    assert!(matches!(outcome.result,
                     Err(Error::Runtime(RuntimeError::CallDepthExceeded { depth: MAX_CALL_DEPTH }))));
    assert_eq!(MAX_CALL_DEPTH, 5_000);
}

#[test]
fn arrays_holding_themselves_print_once() {
    assert_output("let a = []; append(a, a); append(a, a); print len(a); print a",
                  "2\n[[...], [...]]\n");
}

#[test]
fn variables_are_restored_after_failed_calls() {
    let mut context = Context::new().with_output(Vec::new())
                                    .with_max_call_depth(4);
    let program = splice::parse_source("let keep = 1; func deep(a, b) { return deep(a, b); } deep(1, 2)").unwrap();

    assert!(context.run(&program).is_err());
    assert_eq!(context.variables.len(), 1);
    assert_eq!(context.variable("keep").to_string(), "1");
}

#[test]
fn programs_can_run_through_the_library_entry_point() {
    assert_success("let result = 2 + 2");
    assert!(splice::run_source("missing()").is_err());
}
