//! pifuck interpreter: evaluates the AST with a simple tree-walking interpreter.
//!
//! All statements run against one [`Env`] holding the global variable and
//! function tables. Included files and function bodies execute inline in the
//! same namespaces, and every executed statement list ends with an empty
//! output line.

pub mod env;
pub mod interpreter;
pub mod value;

pub use env::Env;
pub use interpreter::{load_program, Interpreter};
pub use value::VariableValue;

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use pifuck_lexer::lex;
    use pifuck_parser::parse;
    use pifuck_syntax::ast::{Program, Stmt};
    use pifuck_syntax::error::{Error, ErrorKind};

    /// Run a program, returning everything printed and the error if any.
    fn run_capture(input: &str, env: &mut Env) -> (String, Option<Error>) {
        let program = parse(lex(input)).unwrap_or_else(|e| panic!("Parse failed: {}\nInput: {}", e, input));
        let mut interpreter = Interpreter::with_output(Vec::new());
        let result = interpreter.run_with_env(&program, env);
        let out = String::from_utf8(interpreter.into_output()).expect("utf-8 output");
        (out, result.err())
    }

    fn expect_output(input: &str, expected: &str) {
        let (out, err) = run_capture(input, &mut Env::new());
        if let Some(e) = err {
            panic!("Program failed: {}\nInput: {}", e, input);
        }
        assert_eq!(out, expected, "Program: {}", input);
    }

    fn expect_error(input: &str, kind: ErrorKind) -> Error {
        let (_, err) = run_capture(input, &mut Env::new());
        match err {
            Some(e) => {
                assert_eq!(e.kind, kind, "Unexpected error kind for {}: {}", input, e);
                e
            }
            None => panic!("Expected error but program succeeded: {}", input),
        }
    }

    #[test]
    fn test_print_literals() {
        expect_output("+hello+ 3.", "hello\n\n");
        expect_output("+42+ 3.\n+-1.50+ 3.", "42\n-1.50\n\n");
        expect_output("+true+ 3.\n+null+ 3.", "true\nnull\n\n");
        expect_output("", "\n");
    }

    #[test]
    fn test_print_without_expression() {
        let program = Program { stmts: vec![Stmt::Print(None)] };
        let mut interpreter = Interpreter::with_output(Vec::new());
        interpreter.run(&program).expect("run should succeed");
        assert_eq!(interpreter.output().as_slice(), b"\n\n");
    }

    #[test]
    fn test_variables_resolve_before_literals() {
        expect_output("3.1 +hello+ 3.1 +world+ 3.\n+hello+ 3.", "world\n\n");
        expect_output("3.1 +x+ 3.1 3.\n+x+ 3.", "null\n\n");
        expect_output("3.1 +x+ 3.1 +1+ 3.\n3.1 +x+ 3.1 +2+ 3.\n+x+ 3.", "2\n\n");
    }

    #[test]
    fn test_arithmetic() {
        expect_output("3.1 +x+ 3.1 +1+ 3.1415926 +8+ 3.\n+x+ 3.", "0.125\n\n");
        expect_output("3.1 +x+ 3.1 +7+ 3.14159 +10+ 3.\n+x+ 3.", "-3\n\n");
        expect_output("3.1 +x+ 3.1 +1.5+ 3.141592 +4+ 3.\n+x+ 3.", "6.0\n\n");
        expect_output("3.1 +a+ 3.1 +2+ 3.\n3.1 +b+ 3.1 +a+ 3.141592 +a+ 3.\n+b+ 3.", "4\n\n");
    }

    #[test]
    fn test_string_plus_decimal() {
        // string on the left concatenates the decimal's rendering
        expect_output("3.1 +x+ 3.1 +a+ 3.1415 +5+ 3.\n+x+ 3.", "a5\n\n");
    }

    #[test]
    fn test_decimal_plus_string() {
        // decimal on the left renders itself in front of the string
        expect_output("3.1 +x+ 3.1 +5+ 3.1415 +a+ 3.\n+x+ 3.", "5a\n\n");
    }

    #[test]
    fn test_comparisons() {
        expect_output("+3+ 3.1415926535897 +2+ 3.", "true\n\n");
        expect_output("+3+ 3.14159265358979 +2+ 3.", "false\n\n");
        expect_output("+2.0+ 3.14159265358 +2+ 3.", "true\n\n");
        expect_output("+true+ 3.141592653589 +false+ 3.", "true\n\n");
        expect_output("+5+ 3.14159265358 +five+ 3.", "false\n\n");
    }

    #[test]
    fn test_if_prints_inside_block() {
        let src = "\
3.1 +x+ 3.1 +5+ 3.
3.14 +x+ 3.14159265358 +5+ 3.
+yes+ 3.
3.14159265 3.
";
        // one blank line closes the if body, one closes the program
        expect_output(src, "yes\n\n\n");
    }

    #[test]
    fn test_if_false_skips_block() {
        let src = "\
3.14 +1+ 3.14159265358 +2+ 3.
+never+ 3.
3.14159265 3.
+after+ 3.
";
        expect_output(src, "after\n\n");
    }

    #[test]
    fn test_if_requires_boolean() {
        let err = expect_error("3.14 +5+ 3.\n+x+ 3.\n3.14159265 3.", ErrorKind::UnsupportedOperation);
        assert_eq!(err.msg, "decimal is not available in if condition.");
    }

    #[test]
    fn test_blocks_share_the_global_namespace() {
        let src = "\
3.14 +true+ 3.
3.1 +inner+ 3.1 +1+ 3.
3.14159265 3.
+inner+ 3.
";
        expect_output(src, "\n1\n\n");
    }

    #[test]
    fn test_foreach_over_decimal() {
        let src = "\
3.1 +n+ 3.1 +3+ 3.
3.141592653 +n+ +i+ 3.
+i+ 3.
3.14159265 3.
";
        let mut env = Env::new();
        let (out, err) = run_capture(src, &mut env);
        assert!(err.is_none());
        assert_eq!(out, "1\n\n2\n\n3\n\n\n");
        // the loop variable is gone afterwards
        assert!(env.get("i").is_none());
    }

    #[test]
    fn test_foreach_truncates_and_skips_non_positive() {
        let body = "3.141592653 +n+ +i+ 3.\n+i+ 3.\n3.14159265 3.\n";
        expect_output(&format!("3.1 +n+ 3.1 +2.9+ 3.\n{}", body), "1\n\n2\n\n\n");
        expect_output(&format!("3.1 +n+ 3.1 +0+ 3.\n{}", body), "\n");
        expect_output(&format!("3.1 +n+ 3.1 +-4+ 3.\n{}", body), "\n");
    }

    #[test]
    fn test_foreach_over_string() {
        let src = "\
3.1 +word+ 3.1 +ab+ 3.
3.141592653 +word+ +c+ 3.
+c+ 3.
3.14159265 3.
+c+ 3.
";
        // after the loop `c` is undeclared again and prints as a literal
        expect_output(src, "a\n\nb\n\nc\n\n");
    }

    #[test]
    fn test_foreach_errors() {
        let err = expect_error("3.141592653 +missing+ +i+ 3.\n3.14159265 3.", ErrorKind::UndeclaredName);
        assert_eq!(err.msg, "Variable missing is used before declaration.");

        let err = expect_error(
            "3.1 +b+ 3.1 +true+ 3.\n3.141592653 +b+ +i+ 3.\n3.14159265 3.",
            ErrorKind::UnsupportedOperation,
        );
        assert_eq!(err.msg, "For each is not supported on boolean");
    }

    #[test]
    fn test_for_loop_counts() {
        let src = "\
3.1 +x+ 3.1 +0+ 3.
3.141 +x+ 3.14159265358979 +3+ +x+ 3.1415 +1+ 3.
+x+ 3.
3.14159265 3.
+x+ 3.
";
        expect_output(src, "0\n\n1\n\n2\n\n3\n\n");
    }

    #[test]
    fn test_for_loop_with_string_step() {
        let src = "\
3.1 +s+ 3.1 +a+ 3.
3.141 +s+ 3.141592653589 +aaa+ +s+ 3.1415 +a+ 3.
3.14159265 3.
+s+ 3.
";
        expect_output(src, "\n\naaa\n\n");
    }

    #[test]
    fn test_for_loop_errors() {
        let err = expect_error(
            "3.1 +x+ 3.1 +0+ 3.\n3.141 +x+ +x+ 3.1415 +1+ 3.\n3.14159265 3.",
            ErrorKind::UnsupportedOperation,
        );
        assert_eq!(err.msg, "For condition should return a boolean.");

        let err = expect_error(
            "3.1 +x+ 3.1 +0+ 3.\n3.141 +x+ 3.14159265358979 +3+ +x+ 3.14159265358 +1+ 3.\n3.14159265 3.",
            ErrorKind::UnsupportedOperation,
        );
        assert_eq!(err.msg, "Expecting a arithmetic expression.");

        let err = expect_error(
            "3.1 +x+ 3.1 +0+ 3.\n3.141 +x+ 3.14159265358979 +3+ +1+ 3.1415 +x+ 3.\n3.14159265 3.",
            ErrorKind::UnsupportedOperation,
        );
        assert_eq!(err.msg, "Expect left handside to be a variable.");
    }

    #[test]
    fn test_for_loop_step_only_checked_when_body_runs() {
        let src = "3.1 +x+ 3.1 +5+ 3.\n3.141 +x+ 3.14159265358979 +3+ +x+ 3.14159265358 +1+ 3.\n3.14159265 3.";
        expect_output(src, "\n");
    }

    #[test]
    fn test_functions() {
        let src = "\
** +greet+ 3.
+hi+ 3.
3.14159265 3.
3.1415926535 +greet+ 3.
3.1415926535 +greet+ 3.
";
        expect_output(src, "hi\n\nhi\n\n\n");
    }

    #[test]
    fn test_redeclared_function_replaces_body() {
        let src = "\
** +f+ 3.
+first+ 3.
3.14159265 3.
** +f+ 3.
+second+ 3.
3.14159265 3.
3.1415926535 +f+ 3.
";
        expect_output(src, "second\n\n\n");
    }

    #[test]
    fn test_undeclared_function() {
        let err = expect_error("3.1415926535 +nope+ 3.", ErrorKind::UndeclaredName);
        assert_eq!(err.msg, "Function nope should be declared before usage.");
    }

    #[test]
    fn test_recursive_function() {
        let src = "\
3.1 +n+ 3.1 +0+ 3.
** +count+ 3.
3.1 +n+ 3.1 +n+ 3.1415 +1+ 3.
3.14 +n+ 3.14159265358979 +3+ 3.
3.1415926535 +count+ 3.
3.14159265 3.
3.14159265 3.
3.1415926535 +count+ 3.
";
        let mut env = Env::new();
        let (_, err) = run_capture(src, &mut env);
        assert!(err.is_none());
        assert_eq!(env.get("n"), Some(&VariableValue::Decimal(BigDecimal::from(3))));
        assert_eq!(env.function_names(), vec!["count".to_string()]);
    }

    #[test]
    fn test_error_keeps_earlier_output() {
        let src = "\
+before+ 3.
3.1 +x+ 3.1 +1+ 3.1415926 +3+ 3.
+after+ 3.
";
        let (out, err) = run_capture(src, &mut Env::new());
        assert_eq!(out, "before\n");
        let err = err.expect("division should fail");
        assert_eq!(err.kind, ErrorKind::Arithmetic);
    }

    #[test]
    fn test_type_errors_propagate() {
        let err = expect_error("3.1 +x+ 3.1 +true+ 3.1415 +1+ 3.", ErrorKind::Type);
        assert_eq!(err.msg, "Invalid operation 'add' on boolean and decimal");
        let err = expect_error("3.1 +x+ 3.1 3.\n+x+ 3.14159265358 +x+ 3.", ErrorKind::Type);
        assert_eq!(err.msg, "Invalid operation 'equal' on null and null");
    }

    #[test]
    fn test_errors_escape_nested_calls() {
        let src = "\
** +inner+ 3.
+1+ 3.14159265358979 +a+ 3.
3.14159265 3.
** +outer+ 3.
3.1415926535 +inner+ 3.
3.14159265 3.
3.1415926535 +outer+ 3.
+unreachable+ 3.
";
        let (out, err) = run_capture(src, &mut Env::new());
        assert_eq!(err.map(|e| e.kind), Some(ErrorKind::Type));
        assert!(!out.contains("unreachable"));
    }

    #[test]
    fn test_include_runs_inline() {
        let dir = tempfile::tempdir().expect("tempdir");
        let lib = dir.path().join("lib.pifuck");
        std::fs::write(&lib, "3.1 +greeting+ 3.1 +hi+ 3.\n** +shout+ 3.\n+greeting+ 3.\n3.14159265 3.\n")
            .expect("write lib");
        let src = format!("-- +{}+ 3.\n3.1415926535 +shout+ 3.\n", lib.display());

        let mut env = Env::new();
        let (out, err) = run_capture(&src, &mut env);
        assert!(err.is_none(), "include failed: {:?}", err);
        assert_eq!(out, "\nhi\n\n\n");
        assert_eq!(env.get("greeting"), Some(&VariableValue::Str("hi".to_string())));
    }

    #[test]
    fn test_missing_include() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("missing.pifuck");
        let err = expect_error(&format!("-- +{}+ 3.", missing.display()), ErrorKind::Io);
        assert!(err.msg.starts_with("Failed to read file"));
    }

    #[test]
    fn test_env_persists_between_runs() {
        let mut env = Env::new();
        let (_, err) = run_capture("3.1 +x+ 3.1 +41+ 3.", &mut env);
        assert!(err.is_none());
        let (out, err) = run_capture("3.1 +x+ 3.1 +x+ 3.1415 +1+ 3.\n+x+ 3.", &mut env);
        assert!(err.is_none());
        assert_eq!(out, "42\n\n");
        env.clear();
        assert!(env.vars_snapshot().is_empty());
    }
}
