mod common;

use common::run_in;
use splice::{
    error::{Error, RuntimeError},
    interpreter::{
        evaluator::core::{Context, EvalResult},
        runtime::{MemoryLoader, NativeFn},
        value::core::Value,
    },
};

fn square(args: &[Value]) -> EvalResult<Value> {
    let x = args.first().map_or(0.0, Value::as_number);
    Ok(Value::Number(x * x))
}

fn sum(args: &[Value]) -> EvalResult<Value> {
    Ok(Value::Number(args.iter().map(Value::as_number).sum()))
}

fn shout(args: &[Value]) -> EvalResult<Value> {
    let text = args.iter().map(ToString::to_string).collect::<String>();
    Ok(Value::Str(text.to_uppercase()))
}

fn refuse(_args: &[Value]) -> EvalResult<Value> {
    Err(RuntimeError::TypeError { details: "refused".into() })
}

fn with_native(name: &str, func: NativeFn) -> Context {
    let mut context = Context::new();
    context.register_native(name, func);
    context
}

fn with_library(source: &str) -> impl FnOnce() -> Context + Send + '_ {
    move || Context::new().with_loader(MemoryLoader::new().with_unit("lib.sp", source))
}

#[test]
fn import_registers_only_functions() {
    let library = "print \"library body\"\nlet hidden = 5\nfunc triple(x) { return x * 3; }";
    let outcome = run_in(with_library(library), "import \"lib.sp\"; print triple(4); print hidden");

    assert!(outcome.result.is_ok());
    assert_eq!(outcome.stdout, "12\n0\n");
}

#[test]
fn imported_functions_call_each_other() {
    let library = "func inc(x) { return x + 1; }\nfunc inc_twice(x) { return inc(inc(x)); }";
    let outcome = run_in(with_library(library), "import \"lib.sp\"\nprint inc_twice(1)");

    assert_eq!(outcome.stdout, "3\n");
}

#[test]
fn later_definitions_replace_imported_ones() {
    let library = "func greet() { return \"library\"; }";
    let outcome = run_in(with_library(library),
                         "import \"lib.sp\"; func greet() { return \"local\"; } print greet()");

    assert_eq!(outcome.stdout, "local\n");
}

#[test]
fn missing_import_is_fatal() {
    let outcome = run_in(with_library(""), "print 1; import \"absent.sp\"; print 2");

    assert_eq!(outcome.stdout, "1\n");
    assert!(matches!(outcome.result,
                     Err(Error::Runtime(RuntimeError::ImportFailed { path, .. })) if path == "absent.sp"));
}

#[test]
fn invalid_imported_units_are_reported() {
    let outcome = run_in(with_library("func broken( { }"), "import \"lib.sp\"");
    assert!(matches!(outcome.result, Err(Error::Runtime(RuntimeError::Parse(_)))));

    let outcome = run_in(with_library("let x = 1 @ 2"), "import \"lib.sp\"");
    assert!(matches!(outcome.result, Err(Error::Runtime(RuntimeError::Lex(_)))));
}

#[test]
fn native_modules_are_imported_by_header_name() {
    let math = || {
        let mut context = Context::new();
        context.register_module("math", &[("square", square), ("Sum", sum)]);
        context
    };

    let outcome = run_in(math, "import \"include/math.h\"; print square(7); print sum(1, 2, 3)");

    assert!(outcome.result.is_ok());
    assert_eq!(outcome.stdout, "49\n6\n");
}

#[test]
fn module_functions_are_unknown_until_imported() {
    let math = || {
        let mut context = Context::new();
        context.register_module("math", &[("square", square)]);
        context
    };

    let outcome = run_in(math, "print square(2)");

    assert!(matches!(outcome.result,
                     Err(Error::Runtime(RuntimeError::UndefinedFunction { name })) if name == "square"));
}

#[test]
fn unknown_native_module_is_fatal() {
    let outcome = run_in(Context::new, "import \"nothing.h\"");

    assert!(matches!(outcome.result,
                     Err(Error::Runtime(RuntimeError::UnknownNativeModule { name })) if name == "nothing"));
}

#[test]
fn native_names_are_case_insensitive() {
    let outcome = run_in(|| with_native(" Shout ", shout),
                         "print shout(\"hi \", 2); print SHOUT(\"x\")");

    assert_eq!(outcome.stdout, "HI 2\nX\n");
}

#[test]
fn natives_take_precedence_over_user_functions() {
    let outcome = run_in(|| with_native("square", square),
                         "func square(x) { return 0; } print square(3)");

    assert_eq!(outcome.stdout, "9\n");
}

#[test]
fn builtins_take_precedence_over_natives() {
    let outcome = run_in(|| with_native("len", sum),
                         "print len([1, 2]); print len(5, 6)");

    // With the wrong argument count `len` falls through to the native.
    assert_eq!(outcome.stdout, "2\n11\n");
}

#[test]
fn native_errors_stop_the_program() {
    let outcome = run_in(|| with_native("refuse", refuse),
                         "print 1; refuse(); print 2");

    assert_eq!(outcome.stdout, "1\n");
    assert!(matches!(outcome.result, Err(Error::Runtime(RuntimeError::TypeError { .. }))));
}

#[test]
fn contexts_share_nothing() {
    let mut first = Context::new().with_output(Vec::new());
    first.register_native("square", square);
    let program = splice::parse_source("let x = square(3); func f() { return 1; }").unwrap();
    first.run(&program).unwrap();

    let second = Context::new();
    assert_eq!(first.variable("x"), Value::Number(9.0));
    assert_eq!(second.variable("x"), Value::ZERO);
    assert!(first.functions.contains("f"));
    assert!(!second.functions.contains("f"));
    assert!(second.natives.get("square").is_none());
}
