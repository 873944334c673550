use rpn::{
    Engine, Number, RuntimeError, evaluate_expression,
    interpreter::value::display::{DisplayMode, Orientation},
};

fn run(src: &str) -> Engine {
    let mut engine = Engine::new();
    if let Err(e) = engine.evaluate(src) {
        panic!("Expression '{src}' failed: {e}");
    }
    engine
}

fn assert_success(src: &str, expected: &str) {
    let engine = run(src);
    let top = engine.result()
                    .unwrap_or_else(|| panic!("Expression '{src}' left an empty stack"));
    assert_eq!(top.to_string(), expected, "top of stack for '{src}'");
}

fn assert_stack(src: &str, expected: &str) {
    assert_eq!(run(src).display(), expected, "stack for '{src}'");
}

fn assert_failure(src: &str, expected: &RuntimeError) {
    let mut engine = Engine::new();
    match engine.evaluate(src) {
        Ok(()) => panic!("Expression '{src}' succeeded but was expected to fail"),
        Err(e) => assert_eq!(&e, expected, "error for '{src}'"),
    }
}

fn insufficient(required: usize, token: &str) -> RuntimeError {
    RuntimeError::InsufficientOperands { required,
                                         token: token.to_string() }
}

#[test]
fn reference_scenarios() {
    assert_success("-3 9 6 2 2 -8 2 -10 + -7 4 / 9 * cos sign", "-1");
    assert_success("-10 -1 5 1 -1 3 -7 8 9 -2 -8 * fact", "20922789888000");
    assert_success("2 -3 -2 5 / -7 * 6 -3 -5 5 -2 <= 6 0 -4 swap", "0");
    assert_success("10 2 * -4 0 9 -6 2 9 -4 3 -4 -9 4 repeat +", "-5");
    assert_success("8 10 x= x x * log", "2.0");
}

#[test]
fn multi_base_literals() {
    assert_success("0x10", "16");
    assert_success("0xFF", "255");
    assert_success("0b101", "5");
    assert_success("017", "15");
    assert_success("0o17", "15");
    assert_success("0", "0");
    assert_success("1_000_000", "1000000");
    assert_success("+7", "7");
    assert_success("09", "9.0");
    assert_success(".5", "0.5");
    assert_success("1e3", "1000.0");
    assert_success("-2.5e-1", "-0.25");
    assert_success("INF", "inf");
    assert_success("-infinity", "-inf");
    assert_success("123456789012345678901234567890", "123456789012345678901234567890");
}

#[test]
fn partial_literals_are_not_numbers() {
    for token in ["-0x10", "0x", "12abc", "1__0", "0b2"] {
        assert_failure(token,
                       &RuntimeError::UnsupportedOperation { token: token.to_string() });
    }
}

#[test]
fn arithmetic_and_promotion() {
    assert_success("2 3 +", "5");
    assert_success("2 0.5 +", "2.5");
    assert_success("2 5 -", "-3");
    assert_success("6 7 *", "42");
    assert_success("7 2 /", "3.5");
    assert_success("6 3 /", "2.0");
    assert_success("1 3 /", "0.3333333333333333");
    assert_success("0.1 0.2 +", "0.30000000000000004");
    assert_success("-7 3 %", "2");
    assert_success("7 -3 %", "-2");
    assert_success("41 ++", "42");
    assert_success("0.5 --", "-0.5");
    assert_success("2 64 exp 1 +", "18446744073709551617");
    assert_success("2 -2 exp", "0.25");
    assert_success("3 2 pow", "8");
    assert_success("1e10 1e10 *", "1e+20");
}

#[test]
fn integer_division_is_exact() {
    assert_success("200 fact 199 fact /", "200.0");
    assert_success("10 400 exp 10 399 exp /", "10.0");
    assert_success("1 10 300 exp /", "1e-300");
    assert_success("-7 2 /", "-3.5");
    assert!(matches!(evaluate_expression("10 400 exp 3 /"), Err(RuntimeError::Overflow { .. })));
}

#[test]
fn division_by_zero_is_error() {
    assert_failure("1 0 /", &RuntimeError::DivisionByZero);
    assert_failure("1.5 0.0 /", &RuntimeError::DivisionByZero);
    assert_failure("5 0 %", &RuntimeError::DivisionByZero);
    assert_failure("0 -1 exp", &RuntimeError::DivisionByZero);
}

#[test]
fn comparisons_push_one_or_zero() {
    assert_success("1 2 <", "1");
    assert_success("2 1 <", "0");
    assert_success("2 2 <=", "1");
    assert_success("1 1.0 ==", "1");
    assert_success("1 2 !=", "1");
    assert_success("3 2 >", "1");
    assert_success("2 3 >=", "0");
    assert_success("nan nan ==", "0");
    assert_success("nan nan !=", "1");
}

#[test]
fn boolean_operations() {
    assert_success("0 5 &&", "0");
    assert_success("3 5 &&", "5");
    assert_success("0 5 ||", "5");
    assert_success("3 5 ||", "3");
    assert_success("1 0 ^^", "1");
    assert_success("2 3 ^^", "0");
    assert_success("0 !", "1");
    assert_success("0.5 !", "0");
}

#[test]
fn bitwise_operations() {
    assert_success("12 10 &", "8");
    assert_success("12 10 |", "14");
    assert_success("12 10 ^", "6");
    assert_success("5 ~", "-6");
    assert_success("3 <<", "6");
    assert_success("7 >>", "3");
    assert_failure("1.5 1 &", &RuntimeError::IncompatibleOperands { token: "&".to_string() });
    assert_failure("2.0 <<", &RuntimeError::IncompatibleOperands { token: "<<".to_string() });
}

#[test]
fn rounding_and_parts() {
    assert_success("2.5 round", "2");
    assert_success("3.5 round", "4");
    assert_success("-1.5 floor", "-2");
    assert_success("-1.5 ceil", "-1");
    assert_success("-2.75 ip", "-2");
    assert_success("-2.25 fp", "-0.25");
    assert_success("9 floor", "9");
    assert_success("-0.3 sign", "-1");
    assert_success("0 sign", "0");
    assert_success("-4 abs", "4");
    assert_success("-4.5 abs", "4.5");
    assert_success("3 7 max", "7");
    assert_success("3 7 min", "3");
    assert_success("2 2.0 max", "2");
}

#[test]
fn functions_and_constants() {
    assert_success("0 cos", "1.0");
    assert_success("0 sin", "0.0");
    assert_success("16 sqrt", "4.0");
    assert_success("100 log", "2.0");
    assert_success("1 ln", "0.0");
    assert_success("pi", "3.141592653589793");
    assert_success("e", "2.718281828459045");
    assert_success("5 fact", "120");
    assert_success("0 fact", "1");
    assert_success("0x1234 hns nhs", "4660");
    assert_success("0x12345678 hnl nhl", "305419896");

    let engine = run("rand");
    let value = engine.result().and_then(|n| n.as_real().ok()).unwrap();
    assert!((0.0..1.0).contains(&value));
}

#[test]
fn math_domain_and_overflow() {
    assert_failure("-1 sqrt", &RuntimeError::MathDomain { token: "sqrt".to_string() });
    assert_failure("0 log", &RuntimeError::MathDomain { token: "log".to_string() });
    assert_failure("-1 fact", &RuntimeError::MathDomain { token: "fact".to_string() });
    assert_failure("2 asin", &RuntimeError::MathDomain { token: "asin".to_string() });
    assert_failure("5.0 fact", &RuntimeError::IncompatibleOperands { token: "fact".to_string() });
    assert_failure("inf sign", &RuntimeError::MathDomain { token: "sign".to_string() });
    assert_failure("-inf sign", &RuntimeError::MathDomain { token: "sign".to_string() });
    assert_failure("nan sign", &RuntimeError::MathDomain { token: "sign".to_string() });

    let mut engine = Engine::new();
    assert!(matches!(engine.evaluate("10 400 exp 1.0 *"), Err(RuntimeError::Overflow { .. })));
    assert!(matches!(engine.evaluate("65536 hns"), Err(RuntimeError::Overflow { .. })));
    assert!(matches!(engine.evaluate("1e308 10 *"), Ok(())));
    assert!(matches!(engine.evaluate("inf round"), Err(RuntimeError::Overflow { .. })));
}

#[test]
fn insufficient_operands() {
    assert_failure("+", &insufficient(2, "+"));
    assert_failure("1 +", &insufficient(2, "+"));
    assert_failure("sqrt", &insufficient(1, "sqrt"));
    assert_failure("drop", &insufficient(1, "drop"));
    assert_failure("dup", &insufficient(1, "dup"));
    assert_failure("1 swap", &insufficient(2, "swap"));
    assert_failure("pick", &insufficient(1, "pick"));
    assert_failure("1 2 5 dropn", &insufficient(5, "dropn"));
}

#[test]
fn stack_manipulation() {
    assert_stack("1 2 drop", "1");
    assert_stack("1 2 dup", "1 2 2");
    assert_stack("1 2 swap", "2 1");
    assert_stack("1 2 3 depth", "1 2 3 3");
    assert_stack("depth", "0");
    assert_stack("1 2 3 2 dropn", "1");
    assert_stack("1 2 3 0 dropn", "1 2 3");
    assert_stack("1 2 3 2 dupn", "1 2 3 2 3");
    assert_stack("1 2 5 dupn", "1 2 1 2");
    assert_stack("1 2 -1 dupn", "1 2");
    assert_stack("1 2 3 clr", "");
}

#[test]
fn pick_counts_from_the_top() {
    assert_success("10 20 30 0 pick", "30");
    assert_success("10 20 30 2 pick", "10");
    assert_success("10 20 30 -1 pick", "10");
    assert_success("10 20 30 -2 pick", "20");
    assert_failure("10 20 30 3 pick",
                   &RuntimeError::StackIndexOutOfRange { index: "3".to_string(),
                                                         depth: 3, });
    assert_failure("1 2.5 pick", &RuntimeError::InvalidIntegerArgument { token: "pick".to_string() });
}

#[test]
fn rotation() {
    assert_stack("1 2 3 4 5 2 roll", "4 5 1 2 3");
    assert_stack("1 2 3 4 5 2 rolld", "3 4 5 1 2");
    assert_stack("1 2 3 4 5 7 roll", "4 5 1 2 3");
    assert_stack("1 2 3 4 5 -2 roll", "3 4 5 1 2");
    assert_stack("0 roll", "");

    for n in 0..8 {
        assert_stack(&format!("1 2 3 4 5 {n} roll {n} rolld"), "1 2 3 4 5");
    }
}

#[test]
fn repeat_executes_next_token_n_times() {
    assert_eq!(run("1 2 3 4 3 repeat +").display(), run("1 2 3 4 + + +").display());
    assert_stack("5 3 repeat dup", "5 5 5 5");
    assert_stack("5 1 repeat dup", "5 5");
    assert_stack("5 0 repeat dup", "5 5");
    assert_stack("1 2 2 repeat swap", "1 2");

    let mut engine = Engine::new();
    engine.evaluate("1 3 repeat").unwrap();
    engine.evaluate("dup").unwrap();
    assert_eq!(engine.display(), "1 1 1 1");
}

#[test]
fn variables() {
    let mut engine = run("3 x= 4 y=");
    assert_eq!(engine.variable("x"), Some(&Number::from(3)));
    assert_eq!(engine.display(), "3 4");

    engine.evaluate("x y * x +").unwrap();
    assert_eq!(engine.result(), Some(&Number::from(15)));

    engine.evaluate("clv").unwrap();
    assert_eq!(engine.variable("x"), None);
    assert_failure("x", &RuntimeError::UnsupportedOperation { token: "x".to_string() });
    assert_failure("x=", &RuntimeError::NoValueToAssign { name: "x".to_string() });

    engine.evaluate("1 z= cla").unwrap();
    assert_eq!(engine.variable("z"), None);
    assert_eq!(engine.display(), "");
}

#[test]
fn variables_shadow_literals_and_operations() {
    assert_success("42 dup= dup", "42");
    assert_stack("42 dup= dup", "42 42");
    assert_success("3 inf= inf", "3");
    assert_success("7 pi= 0 pi +", "7");
}

#[test]
fn macros() {
    let mut engine = Engine::new();
    engine.evaluate("macro kib 1024 *").unwrap();
    engine.evaluate("4 kib").unwrap();
    assert_eq!(engine.result(), Some(&Number::from(4096)));

    engine.evaluate("macro sq dup *").unwrap();
    engine.evaluate("macro quad sq   sq").unwrap();
    assert_eq!(engine.macro_expansion("quad"), Some("dup * dup *"));

    engine.evaluate("clr 3 quad").unwrap();
    assert_eq!(engine.display(), "81");

    engine.evaluate("macro kib 1000 *").unwrap();
    engine.evaluate("clr 2 kib").unwrap();
    assert_eq!(engine.result(), Some(&Number::from(2000)));
    assert_eq!(engine.macros().len(), 3);
    assert_eq!(engine.macros().iter().next().map(|m| m.name.as_str()), Some("kib"));
}

#[test]
fn macros_match_whole_words_only() {
    let mut engine = Engine::new();
    engine.evaluate("macro two 2").unwrap();
    engine.evaluate("two two +").unwrap();
    assert_eq!(engine.result(), Some(&Number::from(4)));
    assert_eq!(engine.evaluate("twofold"),
               Err(RuntimeError::UnsupportedOperation { token: "twofold".to_string() }));
}

#[test]
fn malformed_macro_definitions() {
    assert_failure("macro", &RuntimeError::MalformedMacroDefinition);
    assert_failure("macro 1abc 2", &RuntimeError::MalformedMacroDefinition);
    assert_failure("macro + 2", &RuntimeError::MalformedMacroDefinition);
}

#[test]
fn failure_rolls_back_stack_only() {
    let mut engine = run("1 2 3");
    assert_eq!(engine.evaluate("4 + 0 /"), Err(RuntimeError::DivisionByZero));
    assert_eq!(engine.display(), "1 2 3");

    assert!(engine.evaluate("9 y= hex stack frob").is_err());
    assert_eq!(engine.stack(), [Number::from(1), Number::from(2), Number::from(3)]);
    assert_eq!(engine.variable("y"), Some(&Number::from(9)));
    assert_eq!(engine.mode(), DisplayMode::Hexadecimal);
    assert_eq!(engine.orientation(), Orientation::Vertical);
}

#[test]
fn display_modes_and_orientation() {
    assert_stack("255 hex", "0xff");
    assert_stack("-5 bin", "-0b101");
    assert_stack("8 oct", "0o10");
    assert_stack("8 oct dec", "8");
    assert_stack("1.5 10 hex", "1.5 0xa");
    assert_stack("1 2 stack", "1\n2");
    assert_stack("1 2 stack stack", "1 2");

    let engine = run("255 hex");
    assert_eq!(engine.result().map(ToString::to_string), Some("255".to_string()));
}

#[test]
fn bitwise_not_of_integers() {
    assert_success("0 ~", "-1");
    assert_success("-1 ~", "0");
    assert_success("2 64 exp ~", "-18446744073709551617");
    assert_failure("0.5 ~", &RuntimeError::IncompatibleOperands { token: "~".to_string() });
}

#[test]
fn scripts_evaluate_line_by_line() {
    let mut engine = Engine::new();
    let failures = engine.evaluate_lines("macro half 2 /\n10 x=\nx 0 /\nx half");

    assert_eq!(failures, [(3, RuntimeError::DivisionByZero)]);
    assert_eq!(engine.macro_expansion("half"), Some("2 /"));
    assert_eq!(engine.display(), "10 5.0");
}

#[test]
fn empty_input_is_accepted() {
    let mut engine = run("1");
    engine.evaluate("").unwrap();
    engine.evaluate("   \t ").unwrap();
    assert_eq!(engine.display(), "1");
}

#[test]
fn one_shot_evaluation() {
    assert_eq!(evaluate_expression("3 4 +"), Ok(Number::from(7)));
    assert_eq!(evaluate_expression("1 drop"), Err(RuntimeError::EmptyStack));
    assert_eq!(evaluate_expression("bogus"),
               Err(RuntimeError::UnsupportedOperation { token: "bogus".to_string() }));
}

#[test]
fn error_messages() {
    assert_eq!(RuntimeError::DivisionByZero.to_string(), "Division by zero!");
    assert_eq!(insufficient(2, "+").to_string(), "Insufficient operands: 2 required for +");
    assert_eq!(RuntimeError::UnsupportedOperation { token: "foo".to_string() }.to_string(),
               "Unsupported operation: foo");
}
