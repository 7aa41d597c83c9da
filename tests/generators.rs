//! Proptest generators for msocheck data structures
//!
//! Provides `Strategy` implementations for generating formulas and graphs
//! used in property tests.

#![allow(dead_code)]

use msocheck::ast::{BinaryConnective, BinaryOperator, Formula, Quantifier, Relation, Variable};
use msocheck::graph::{standard, Graph, Vertex};
use proptest::collection::vec;
use proptest::prelude::*;

// ============================================================================
// Variable Generation
// ============================================================================

/// Element variable names: lowercase initial, optional digits
pub fn arb_element_name() -> impl Strategy<Value = String> {
    "[a-z][a-z]{0,2}[0-9]{0,2}".prop_map(String::from)
}

/// Set variable names. `E` alone is the edge relation, so it is avoided.
pub fn arb_set_name() -> impl Strategy<Value = String> {
    "[A-DF-Z][a-z]{0,2}[0-9]{0,2}".prop_map(String::from)
}

pub fn arb_variable() -> impl Strategy<Value = Variable> {
    prop_oneof![
        arb_element_name().prop_map(Variable::Element),
        arb_set_name().prop_map(Variable::Set),
    ]
}

pub fn arb_quantifier() -> impl Strategy<Value = Quantifier> {
    prop_oneof![Just(Quantifier::Exists), Just(Quantifier::Forall)]
}

pub fn arb_connective() -> impl Strategy<Value = BinaryConnective> {
    prop_oneof![
        Just(BinaryConnective::And),
        Just(BinaryConnective::Or),
        Just(BinaryConnective::Implies),
        Just(BinaryConnective::Iff),
    ]
}

pub fn arb_operator() -> impl Strategy<Value = BinaryOperator> {
    prop_oneof![Just(BinaryOperator::Eq), Just(BinaryOperator::Neq)]
}

// ============================================================================
// Formula Generation
// ============================================================================

/// Any formula the parser can produce, meaningful or not
pub fn arb_formula() -> impl Strategy<Value = Formula<()>> {
    let relation = prop_oneof![
        Just(Relation::Edge),
        arb_set_name().prop_map(Relation::Set),
    ];
    let leaf = prop_oneof![
        (relation, vec(arb_variable(), 1..=3))
            .prop_map(|(relation, arguments)| Formula::relation(relation, arguments)),
        (arb_operator(), arb_variable(), arb_variable())
            .prop_map(|(operator, left, right)| Formula::compare(operator, left, right)),
    ];

    leaf.prop_recursive(5, 32, 2, |inner| {
        prop_oneof![
            (arb_connective(), inner.clone(), inner.clone())
                .prop_map(|(connective, left, right)| Formula::binary(connective, left, right)),
            inner.clone().prop_map(Formula::negate),
            (arb_quantifier(), arb_variable(), inner)
                .prop_map(|(quantifier, variable, body)| Formula::quantified(quantifier, variable, body)),
        ]
    })
}

/// Quantifier-free formulas over the element variables `x`, `y` and the set
/// variable `X`
pub fn arb_open_formula() -> impl Strategy<Value = Formula<()>> {
    let element = || prop::sample::select(vec!["x", "y"]).prop_map(|name| Variable::Element(name.to_string()));
    let leaf = prop_oneof![
        (element(), element()).prop_map(|(l, r)| Formula::edge(l, r)),
        element().prop_map(|x| Formula::member("X", x)),
        (arb_operator(), element(), element())
            .prop_map(|(operator, l, r)| Formula::compare(operator, l, r)),
    ];

    leaf.prop_recursive(3, 12, 2, |inner| {
        prop_oneof![
            (arb_connective(), inner.clone(), inner.clone())
                .prop_map(|(connective, left, right)| Formula::binary(connective, left, right)),
            inner.prop_map(Formula::negate),
        ]
    })
}

/// Close an open formula over `x`, `y` and `X` with the given quantifiers
pub fn close(body: Formula<()>, x: Quantifier, y: Quantifier, set: Quantifier) -> Formula<()> {
    Formula::quantified(
        set,
        Variable::Set("X".to_string()),
        Formula::quantified(
            y,
            Variable::Element("y".to_string()),
            Formula::quantified(x, Variable::Element("x".to_string()), body),
        ),
    )
}

// ============================================================================
// Graph Generation
// ============================================================================

/// Graphs on vertices `1..=n` for `n <= max_vertices`, each possible edge
/// present or not
pub fn arb_graph(max_vertices: usize) -> impl Strategy<Value = Graph> {
    (0..=max_vertices).prop_flat_map(|n| {
        vec(any::<bool>(), n * n.saturating_sub(1) / 2).prop_map(move |bits| {
            let mut graph = standard::edgeless(n);
            let mut bits = bits.into_iter();
            for i in 1..=n {
                for j in i + 1..=n {
                    if bits.next() == Some(true) {
                        graph
                            .add_edge(Vertex::new(i.to_string()), Vertex::new(j.to_string()))
                            .unwrap();
                    }
                }
            }
            graph
        })
    })
}
