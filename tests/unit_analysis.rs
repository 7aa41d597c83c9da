//! Unit tests for semantic analysis

use msocheck::analysis::{analyze, Analysis, SemanticError, SemanticWarning};
use msocheck::ast::{Sort, Span};
use msocheck::parse;

fn analysis(source: &str) -> Analysis {
    analyze(&parse(source).unwrap())
}

fn errors(source: &str) -> Vec<SemanticError> {
    analysis(source).errors.into_iter().map(|e| e.node).collect()
}

fn warnings(source: &str) -> Vec<SemanticWarning> {
    analysis(source).warnings.into_iter().map(|w| w.node).collect()
}

// ============================================================================
// Scoping
// ============================================================================

#[test]
fn test_duplicate_variable() {
    let result = analysis("∃x∃x (E(x,x))");
    assert!(!result.is_valid());
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].node, SemanticError::DuplicateVariable("x".to_string()));
    assert!(result.errors[0].node.to_string().contains('x'));
    // The second binder
    assert_eq!(result.errors[0].span, Span::new(3, 4));
}

#[test]
fn test_undeclared_variable() {
    let result = analysis("∃x E(x,y)");
    assert!(!result.is_valid());
    assert_eq!(
        result.errors.iter().map(|e| &e.node).collect::<Vec<_>>(),
        vec![&SemanticError::UndeclaredVariable("y".to_string())]
    );
    assert_eq!(result.errors[0].span, Span::new(7, 8));
    assert_eq!(result.errors[0].node.to_string(), "Variable 'y' does not exist");
}

#[test]
fn test_undeclared_set_relation() {
    assert_eq!(
        errors("∃x X(x)"),
        vec![SemanticError::UndeclaredVariable("X".to_string())]
    );
}

#[test]
fn test_scope_ends_with_quantifier() {
    // `x` is out of scope on the right of the conjunction
    assert_eq!(
        errors("∃x (x = x) ∧ ∃y (x = y)"),
        vec![SemanticError::UndeclaredVariable("x".to_string())]
    );
}

#[test]
fn test_sibling_scopes_may_reuse_names() {
    let result = analysis("(∃x (x = x)) ∧ (∃x (x ≠ x))");
    assert!(result.is_valid());
    assert!(result.errors.is_empty());
}

#[test]
fn test_errors_in_both_branches_are_reported() {
    assert_eq!(
        errors("∃x (E(x,a) ∨ E(b,x))"),
        vec![
            SemanticError::UndeclaredVariable("a".to_string()),
            SemanticError::UndeclaredVariable("b".to_string()),
        ]
    );
}

// ============================================================================
// Sorts and arity
// ============================================================================

#[test]
fn test_sort_mismatch() {
    let result = analysis("∃x∃X (x = X)");
    assert_eq!(
        result.errors[0].node,
        SemanticError::SortMismatch {
            left: "x".to_string(),
            left_sort: Sort::Element,
            right: "X".to_string(),
            right_sort: Sort::Set,
        }
    );
    assert_eq!(
        result.errors[0].node.to_string(),
        "Cannot compare element variable 'x' to set variable 'X'"
    );
    // The comparison, including the parentheses around it
    assert_eq!(result.errors[0].span, Span::new(5, 12));
}

#[test]
fn test_sort_mismatch_without_parentheses() {
    let result = analysis("∃x∃X x = X");
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].span, Span::new(5, 10));
}

#[test]
fn test_edge_arity() {
    let result = analysis("∃x E(x)");
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].node.to_string().contains("Expected 2 arguments"));
    assert_eq!(
        result.errors[0].node.to_string(),
        "Expected 2 arguments for 'E', but found 1"
    );
}

#[test]
fn test_set_arity() {
    let result = analysis("∃X∃x∃y X(x, y)");
    assert_eq!(
        result.errors.iter().map(|e| e.node.to_string()).collect::<Vec<_>>(),
        vec!["Expected 1 argument for 'X', but found 2"]
    );
    // Spans the argument list, without the parentheses
    assert_eq!(result.errors[0].span, Span::new(9, 13));
}

#[test]
fn test_set_argument() {
    let result = analysis("∃X∃Y X(Y)");
    assert_eq!(
        result.errors.iter().map(|e| e.node.to_string()).collect::<Vec<_>>(),
        vec!["Argument for 'X' must be element variable, not set variable"]
    );
}

#[test]
fn test_set_argument_and_undeclared_are_independent() {
    assert_eq!(
        errors("∃x E(x, Y)"),
        vec![
            SemanticError::SetArgument {
                relation: "E".to_string(),
                argument: "Y".to_string(),
            },
            SemanticError::UndeclaredVariable("Y".to_string()),
        ]
    );
}

// ============================================================================
// Warnings
// ============================================================================

#[test]
fn test_self_loop_warning() {
    let result = analysis("∃x E(x,x)");
    assert!(result.is_valid());
    assert!(result.errors.is_empty());
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].node.to_string(), "'E(x,x)' is always false");
}

#[test]
fn test_trivial_comparisons() {
    assert_eq!(
        warnings("∃x (x = x)"),
        vec![SemanticWarning::AlwaysTrue("x".to_string())]
    );
    assert_eq!(
        warnings("∃X (X ≠ X)"),
        vec![SemanticWarning::AlwaysFalse("X".to_string())]
    );
}

#[test]
fn test_trivial_comparison_still_checks_scope() {
    let result = analysis("∃y (x = x)");
    assert_eq!(
        result.errors.iter().map(|e| &e.node).collect::<Vec<_>>(),
        vec![&SemanticError::UndeclaredVariable("x".to_string())]
    );
    assert!(result
        .warnings
        .iter()
        .any(|w| w.node == SemanticWarning::AlwaysTrue("x".to_string())));
}

#[test]
fn test_unused_variable() {
    let result = analysis("∀x∃y E(x,x)");
    assert!(result.is_valid());
    assert!(result
        .warnings
        .iter()
        .any(|w| w.node == SemanticWarning::UnusedVariable("y".to_string())));
    assert!(!result
        .warnings
        .iter()
        .any(|w| w.node == SemanticWarning::UnusedVariable("x".to_string())));
}

#[test]
fn test_use_outside_body_does_not_count() {
    // The `x` on the right is a different, undeclared one
    let result = analysis("(∃x (∃y (y = y))) ∧ (∃z (x = z))");
    assert!(result
        .warnings
        .iter()
        .any(|w| w.node == SemanticWarning::UnusedVariable("x".to_string())));
}

#[test]
fn test_diagnostics_list_errors_then_warnings() {
    let result = analysis("∃x∃y E(x,z)");
    let diagnostics = result.diagnostics();
    assert_eq!(diagnostics.len(), 2);
    assert!(diagnostics[0].is_error());
    assert!(!diagnostics[1].is_error());
    assert_eq!(diagnostics[1].message, "Variable 'y' is never used");
}
