use std::path::PathBuf;
use std::rc::Rc;

use crate::{
    interpreter::run,
    interpreter::prelude::{
        Interpreter, RuntimeError, RuntimeErrorType, VectorOutputEmitterIO,
    },
    parser::prelude::parse_module,
    utils::prelude::Error,
};

fn interpreter_with_output() -> (Interpreter, VectorOutputEmitterIO) {
    let output = VectorOutputEmitterIO::new();
    let interpreter = Interpreter::new(Rc::new(output.clone()));

    (interpreter, output)
}

fn eval(input: &str) -> Vec<String> {
    let (mut interpreter, output) = interpreter_with_output();

    let parsed = parse_module(input);
    assert!(parsed.errors.is_empty(), "parse errors for {input:?}: {:?}", parsed.errors);

    if let Err(error) = interpreter.interpret(&parsed.program) {
        panic!("runtime error for {input:?}: {error:?}");
    }

    output.take()
}

/// Evaluates a program expected to fail, returning whatever was printed
/// before the error alongside the error itself.
fn eval_error(input: &str) -> (Vec<String>, RuntimeError) {
    let (mut interpreter, output) = interpreter_with_output();

    let parsed = parse_module(input);
    assert!(parsed.errors.is_empty(), "parse errors for {input:?}: {:?}", parsed.errors);

    let error = interpreter
        .interpret(&parsed.program)
        .expect_err("program was expected to fail");

    (output.take(), error)
}

#[test]
fn test_arithmetic_and_precedence() {
    assert_eq!(eval("print 1 + 2 * 3;"), vec!["7"]);
    assert_eq!(eval("print (1 + 2) * 3;"), vec!["9"]);
    assert_eq!(eval("print 10 - 4 / 2;"), vec!["8"]);
    assert_eq!(eval("print -3 + 1;"), vec!["-2"]);
    assert_eq!(eval("print 2.5 * 2;"), vec!["5"]);
}

#[test]
fn test_plus_concatenates() {
    assert_eq!(eval("print \"a\" + \"b\";"), vec!["ab"]);
    assert_eq!(eval("print \"a\" + 1;"), vec!["a1"]);
    assert_eq!(eval("print 1 + \"a\";"), vec!["1a"]);
}

#[test]
fn test_plus_rejects_other_mixes() {
    let (lines, error) = eval_error("print true + 1;");

    assert!(lines.is_empty());
    assert!(matches!(
        error.error,
        RuntimeErrorType::InvalidAddOperands { .. }
    ));
}

#[test]
fn test_comparison_operators() {
    assert_eq!(eval("print 1 < 2;"), vec!["true"]);
    assert_eq!(eval("print 2 <= 2;"), vec!["true"]);
    assert_eq!(eval("print 1 > 2;"), vec!["false"]);
    assert_eq!(eval("print 2 >= 3;"), vec!["false"]);

    let (_, error) = eval_error("print 1 < \"two\";");
    assert!(matches!(
        error.error,
        RuntimeErrorType::OperandsMustBeNumbers { .. }
    ));
}

#[test]
fn test_equality() {
    assert_eq!(eval("print nil == nil;"), vec!["true"]);
    assert_eq!(eval("print nil == false;"), vec!["false"]);
    assert_eq!(eval("print 1 == 1;"), vec!["true"]);
    assert_eq!(eval("print \"1\" == 1;"), vec!["false"]);
    assert_eq!(eval("print \"a\" != \"b\";"), vec!["true"]);
    // Equality never type-errors.
    assert_eq!(eval("print true == \"true\";"), vec!["false"]);
}

#[test]
fn test_callables_compare_by_identity() {
    assert_eq!(
        eval("fun f() { print 1; } print f == f;"),
        vec!["true"]
    );
    assert_eq!(
        eval("fun f() { print 1; } fun g() { print 1; } print f == g;"),
        vec!["false"]
    );
}

#[test]
fn test_division_by_zero() {
    let (_, error) = eval_error("print 1 / 0;");
    assert_eq!(error.error, RuntimeErrorType::DivisionByZero);
}

#[test]
fn test_unary_minus_needs_a_number() {
    let (_, error) = eval_error("print -\"a\";");
    assert!(matches!(
        error.error,
        RuntimeErrorType::OperandMustBeNumber { .. }
    ));
}

#[test]
fn test_truthiness() {
    // Only nil and false are falsey; 0 and "" are truthy.
    assert_eq!(eval("if (0) print \"yes\"; else print \"no\";"), vec!["yes"]);
    assert_eq!(eval("if (\"\") print \"yes\"; else print \"no\";"), vec!["yes"]);
    assert_eq!(eval("if (nil) print \"yes\"; else print \"no\";"), vec!["no"]);
    assert_eq!(eval("if (false) print \"yes\"; else print \"no\";"), vec!["no"]);
    assert_eq!(eval("print !0;"), vec!["false"]);
    assert_eq!(eval("print !nil;"), vec!["true"]);
}

#[test]
fn test_block_scoping() {
    let lines = eval(r#"
        var a = 1;
        {
            var a = 2;
            print a;
        }
        print a;
    "#);

    assert_eq!(lines, vec!["2", "1"]);
}

#[test]
fn test_assignment_reaches_outer_scope() {
    let lines = eval(r#"
        var a = 1;
        {
            a = 2;
        }
        print a;
    "#);

    assert_eq!(lines, vec!["2"]);
}

#[test]
fn test_assignment_is_an_expression() {
    assert_eq!(eval("var a = 1; print a = 2;"), vec!["2"]);
}

#[test]
fn test_assignment_to_undefined_variable() {
    let (_, error) = eval_error("a = 1;");
    assert_eq!(
        error.error,
        RuntimeErrorType::UndefinedVariable { name: "a".into() }
    );
}

#[test]
fn test_undefined_variable_read() {
    let (_, error) = eval_error("print missing;");
    assert_eq!(
        error.error,
        RuntimeErrorType::UndefinedVariable { name: "missing".into() }
    );
}

#[test]
fn test_uninitialized_read_is_an_error() {
    let (lines, error) = eval_error("var x; print x;");

    // Nothing was printed, the read itself failed.
    assert!(lines.is_empty());
    assert_eq!(
        error.error,
        RuntimeErrorType::UninitializedVariable { name: "x".into() }
    );
}

#[test]
fn test_explicit_nil_is_initialized() {
    assert_eq!(eval("var x = nil; print x;"), vec!["nil"]);
}

#[test]
fn test_assignment_initializes() {
    assert_eq!(eval("var x; x = 3; print x;"), vec!["3"]);
}

#[test]
fn test_if_else() {
    assert_eq!(eval("if (1 < 2) print \"then\";"), vec!["then"]);
    assert_eq!(eval("if (1 > 2) print \"then\";"), Vec::<String>::new());
    assert_eq!(eval("if (1 > 2) print \"then\"; else print \"else\";"), vec!["else"]);
}

#[test]
fn test_while_loop() {
    let lines = eval(r#"
        var i = 3;
        while (i > 0) {
            print i;
            i = i - 1;
        }
    "#);

    assert_eq!(lines, vec!["3", "2", "1"]);
}

#[test]
fn test_for_loop() {
    assert_eq!(
        eval("for (var i = 0; i < 3; i = i + 1) print i;"),
        vec!["0", "1", "2"]
    );
}

#[test]
fn test_for_loop_initializer_stays_scoped() {
    let (_, error) = eval_error("for (var i = 0; i < 1; i = i + 1) print i; print i;");
    assert_eq!(
        error.error,
        RuntimeErrorType::UndefinedVariable { name: "i".into() }
    );
}

#[test]
fn test_short_circuit_or_skips_right() {
    // The failing division never runs.
    assert_eq!(eval("print true or (1 / 0);"), vec!["true"]);
    // And the deciding value comes back uncoerced.
    assert_eq!(eval("print 0 or \"fallback\";"), vec!["0"]);
    assert_eq!(eval("print nil or \"fallback\";"), vec!["fallback"]);
}

#[test]
fn test_short_circuit_and_skips_right() {
    assert_eq!(eval("print false and (1 / 0);"), vec!["false"]);
    assert_eq!(eval("print nil and 1;"), vec!["nil"]);
    assert_eq!(eval("print 1 and 2;"), vec!["2"]);
}

#[test]
fn test_function_call_binds_parameters() {
    let lines = eval(r#"
        fun add(a, b) {
            print a + b;
        }
        add(1, 2);
    "#);

    assert_eq!(lines, vec!["3"]);
}

#[test]
fn test_function_call_returns_nil() {
    assert_eq!(eval("fun f() { } print f();"), vec!["nil"]);
}

#[test]
fn test_recursion() {
    let lines = eval(r#"
        fun fact(n) {
            if (n <= 1) print 1;
            else {
                print n;
                fact(n - 1);
            }
        }
        fact(3);
    "#);

    assert_eq!(lines, vec!["3", "2", "1"]);
}

#[test]
fn test_mutual_recursion_via_late_binding() {
    // `b` does not exist yet when `a` is declared; the shared global
    // environment makes the later definition visible from `a`'s body.
    let lines = eval(r#"
        fun a(n) {
            if (n > 0) b(n - 1);
            else print "a";
        }
        fun b(n) {
            if (n > 0) a(n - 1);
            else print "b";
        }
        a(3);
    "#);

    assert_eq!(lines, vec!["b"]);
}

#[test]
fn test_closure_captures_declaration_environment() {
    let lines = eval(r#"
        var salutation = "hello";
        fun greet() {
            print salutation;
        }
        {
            var salutation = "shadowed";
            greet();
        }
    "#);

    // The call site's scope is irrelevant, the body resolves against
    // the chain captured at declaration time.
    assert_eq!(lines, vec!["hello"]);
}

#[test]
fn test_arguments_evaluate_left_to_right() {
    let lines = eval(r#"
        var trace = "";
        fun note(x) {
            trace = trace + x;
        }
        fun pair(a, b) { }
        pair(note("1"), note("2"));
        print trace;
    "#);

    assert_eq!(lines, vec!["12"]);
}

#[test]
fn test_arity_mismatch() {
    let (_, error) = eval_error("fun f(a) { print a; } f(1, 2);");
    assert_eq!(
        error.error,
        RuntimeErrorType::ArityMismatch { expected: 1, got: 2 }
    );

    let (_, error) = eval_error("fun f(a) { print a; } f();");
    assert_eq!(
        error.error,
        RuntimeErrorType::ArityMismatch { expected: 1, got: 0 }
    );
}

#[test]
fn test_calling_a_non_callable() {
    let (_, error) = eval_error("42();");
    assert!(matches!(error.error, RuntimeErrorType::NotCallable { .. }));

    let (_, error) = eval_error("\"not a function\"();");
    assert!(matches!(error.error, RuntimeErrorType::NotCallable { .. }));
}

#[test]
fn test_print_renders_canonical_forms() {
    assert_eq!(eval("print nil;"), vec!["nil"]);
    assert_eq!(eval("print true;"), vec!["true"]);
    assert_eq!(eval("print 7;"), vec!["7"]);
    assert_eq!(eval("print 2.5;"), vec!["2.5"]);
    assert_eq!(eval("print \"raw text\";"), vec!["raw text"]);
    assert_eq!(eval("fun f() { } print f;"), vec!["<fn f>"]);
    assert_eq!(eval("print clock;"), vec!["<native fn clock>"]);
}

#[test]
fn test_sqrt_native() {
    assert_eq!(eval("print sqrt(9);"), vec!["3"]);
    assert_eq!(eval("print sqrt(2) < 1.5;"), vec!["true"]);

    let (_, error) = eval_error("sqrt(\"nine\");");
    assert!(matches!(
        error.error,
        RuntimeErrorType::OperandMustBeNumber { .. }
    ));

    let (_, error) = eval_error("sqrt();");
    assert_eq!(
        error.error,
        RuntimeErrorType::ArityMismatch { expected: 1, got: 0 }
    );
}

#[test]
fn test_clock_native() {
    // Seconds since the epoch: positive, and whole.
    assert_eq!(eval("print clock() > 0;"), vec!["true"]);

    let (_, error) = eval_error("clock(1);");
    assert_eq!(
        error.error,
        RuntimeErrorType::ArityMismatch { expected: 0, got: 1 }
    );
}

#[test]
fn test_interpreter_survives_runtime_errors() {
    let (mut interpreter, output) = interpreter_with_output();

    let parsed = parse_module("var a = 1; { var a = 2; print 1 / 0; }");
    assert!(parsed.errors.is_empty());
    interpreter
        .interpret(&parsed.program)
        .expect_err("division should fail");

    // The failed block's scope was unwound; the same instance keeps
    // working and still sees the outer binding.
    let parsed = parse_module("print a;");
    assert!(parsed.errors.is_empty());
    interpreter.interpret(&parsed.program).expect("interpreting after an error");

    assert_eq!(output.take(), vec!["1"]);
}

#[test]
fn test_error_aborts_remaining_statements() {
    let (lines, _) = eval_error("print 1; print 1 / 0; print 3;");

    assert_eq!(lines, vec!["1"]);
}

#[test]
fn test_run_executes_what_parsed() {
    let (mut interpreter, output) = interpreter_with_output();

    let diagnostics = run(
        PathBuf::from("<test>"),
        "print ;\nprint 2;",
        &mut interpreter,
    );

    // One parse diagnostic for the bad line, and the good line ran.
    assert_eq!(diagnostics.len(), 1);
    assert!(matches!(&diagnostics[0], Error::Parse { errors, .. } if errors.len() == 1));
    assert_eq!(output.take(), vec!["2"]);
}

#[test]
fn test_run_reports_runtime_errors() {
    let (mut interpreter, _output) = interpreter_with_output();

    let diagnostics = run(PathBuf::from("<test>"), "print 1 / 0;", &mut interpreter);

    assert_eq!(diagnostics.len(), 1);
    assert!(matches!(&diagnostics[0], Error::Runtime { .. }));
}

#[test]
fn test_run_keeps_state_across_calls() {
    let (mut interpreter, output) = interpreter_with_output();

    assert!(run(PathBuf::from("<repl>"), "var x = 1;", &mut interpreter).is_empty());
    assert!(run(PathBuf::from("<repl>"), "print x;", &mut interpreter).is_empty());

    assert_eq!(output.take(), vec!["1"]);
}
