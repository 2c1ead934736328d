use super::super::Program;
use crate::lang::Line;

#[test]
fn test_placeholders_keep_addresses_stable() {
    let program = Program::load("PUSH 1\n\n# comment\nloop:\nPUSH 2");
    assert_eq!(program.len(), 5);
    assert_eq!(program.resolve("loop"), Some(3));
    assert!(program.line(1).map(Line::is_executable) == Some(false));
    assert!(program.line(4).map(Line::is_executable) == Some(true));
}

#[test]
fn test_last_label_declaration_wins() {
    let program = Program::load("x:\nPUSH 1\nx:\nPUSH 2");
    assert_eq!(program.resolve("x"), Some(2));
}

#[test]
fn test_numeric_targets_resolve_without_labels() {
    let program = Program::load("PUSH 1\nPUSH 2");
    assert_eq!(program.resolve("1"), Some(1));
    assert_eq!(program.resolve("99"), Some(99));
    assert_eq!(program.resolve("-1"), None);
    assert_eq!(program.resolve("nowhere"), None);
}

#[test]
fn test_labels_shadow_numeric_positions() {
    let program = Program::load("PUSH 1\n2:\nPUSH 2");
    assert_eq!(program.resolve("2"), Some(1));
}

#[test]
fn test_surrounding_whitespace_is_trimmed_before_numbering() {
    let program = Program::load("\n\nstart:\nPUSH 1\n\n");
    assert_eq!(program.resolve("start"), Some(0));
}

#[test]
fn test_malformed_instructions_load_without_error() {
    let program = Program::load("FROB\nPUSH abc\nJMP");
    assert_eq!(program.len(), 3);
    assert!(program.line(0).map(Line::is_executable) == Some(true));
}

#[test]
fn test_only_a_fresh_program_is_empty() {
    assert!(Program::new().is_empty());
    // Loading anything, even a single blank, fills one table slot.
    assert!(!Program::load("").is_empty());
    assert!(!Program::load("HALT").is_empty());
}

#[test]
fn test_serialization_preserves_placeholders() {
    let text = "PUSH 1\n# note\n\nend:\nHALT";
    assert_eq!(Program::load(text).to_string(), text);
}
