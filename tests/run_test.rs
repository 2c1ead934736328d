mod common;
use bytecode::mach::Runtime;
use common::*;

fn runtime(text: &str) -> Runtime {
    let mut r = Runtime::new();
    r.load(text);
    r
}

#[test]
fn test_addition_program() {
    let mut r = runtime("PUSH 15\nPUSH 25\nADD\nPRINT\nHALT");
    assert_eq!(exec(&mut r), "40\n");
}

#[test]
fn test_call_doubles_value() {
    let mut r = runtime("PUSH 10\nCALL double\nPRINT\nHALT\ndouble:\nDUP\nADD\nRET");
    assert_eq!(exec(&mut r), "20\n");
}

#[test]
fn test_factorial_of_five() {
    let text = "\
# factorial of 5
PUSH 5
STORE n
PUSH 1
STORE result
loop:
LOAD n
JZ end
LOAD result
LOAD n
MUL
STORE result
LOAD n
PUSH 1
SUB
STORE n
JMP loop
end:
LOAD result
PRINT
HALT";
    let mut r = runtime(text);
    assert_eq!(exec(&mut r), "120\n");
    assert_eq!(r.variables().get("result"), Some(120));
    assert_eq!(r.variables().get("n"), Some(0));
}

#[test]
fn test_countdown_with_read() {
    let text = "\
READ
STORE n
loop:
LOAD n
JZ end
LOAD n
PRINT
POP
LOAD n
PUSH 1
SUB
STORE n
JMP loop
end:
HALT";
    let mut r = runtime(text);
    assert_eq!(exec_with_input(&mut r, &["3"]), "3\n2\n1\n");
}

#[test]
fn test_division_by_zero_reports_line() {
    let mut r = runtime("PUSH 1\nPUSH 0\nDIV");
    assert_eq!(exec(&mut r), "DIVISION BY ZERO IN LINE 3\n");
    assert_eq!(r.stack(), &[] as &[i64]);
}

#[test]
fn test_error_line_numbers_count_placeholders() {
    let mut r = runtime("# header\n\nPUSH 1\nPUSH 0\nDIV");
    assert_eq!(exec(&mut r), "DIVISION BY ZERO IN LINE 5\n");
}

#[test]
fn test_final_state_is_inspectable() {
    let mut r = runtime("PUSH 7\nSTORE x\nPUSH 1\nPUSH 2");
    assert_eq!(exec(&mut r), "");
    assert_eq!(r.stack(), &[1, 2]);
    assert_eq!(r.variables().get("x"), Some(7));
    assert!(!r.is_halted());
}

#[test]
fn test_fresh_load_discards_previous_state() {
    let mut r = runtime("PUSH 7\nSTORE x");
    exec(&mut r);
    r.load("LOAD x");
    assert_eq!(exec(&mut r), "UNDEFINED VARIABLE IN LINE 1; x\n");
}
