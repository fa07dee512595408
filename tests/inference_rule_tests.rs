use mamdani_rs::api::{
    Antecedent, Consequent, FuzzyError, Implication, LevelSpec, LogicOp, Rule, Term, Variable,
    VariableKey, VariableRegistry, VariableSpec,
};

fn level(name: &str) -> LevelSpec {
    LevelSpec {
        name: name.into(),
        mf_type: None,
        mf_params: None,
    }
}

fn variable(name: &str, max: f64, value: Option<f64>, levels: &[&str]) -> VariableSpec {
    VariableSpec {
        name: name.into(),
        min: Some(0.0),
        max: Some(max),
        x: None,
        value,
        levels: levels.iter().map(|l| level(l)).collect(),
    }
}

/// Registry with the tipping variables: service=3, food=8, tip unset.
fn tipping_registry() -> (VariableRegistry, VariableKey, VariableKey, VariableKey) {
    let mut vars = VariableRegistry::new();
    let service = vars
        .insert(
            Variable::from_spec(&variable(
                "service",
                10.0,
                Some(3.0),
                &["poor", "good", "excellent"],
            ))
            .unwrap(),
        )
        .unwrap();
    let food = vars
        .insert(
            Variable::from_spec(&variable(
                "food",
                10.0,
                Some(8.0),
                &["rancid", "delicious"],
            ))
            .unwrap(),
        )
        .unwrap();
    let tip = vars
        .insert(
            Variable::from_spec(&variable(
                "tip",
                25.0,
                None,
                &["cheap", "average", "generous"],
            ))
            .unwrap(),
        )
        .unwrap();
    (vars, service, food, tip)
}

fn term(var: VariableKey, level: &str) -> Term {
    Term {
        var,
        level: level.into(),
    }
}

// ============================================================================
// Antecedent Tests
// ============================================================================

#[test]
fn test_antecedent_or_takes_maximum() {
    let (mut vars, service, food, _) = tipping_registry();
    let mut antecedent = Antecedent::new(
        LogicOp::Or,
        vec![term(service, "poor"), term(food, "rancid")],
    );
    // service poor at 3 -> 0.4; food rancid at 8 -> 0.2
    assert_eq!(antecedent.evaluate(&mut vars).unwrap(), Some(0.4));
    assert_eq!(antecedent.result(), Some(0.4));
}

#[test]
fn test_antecedent_and_takes_minimum() {
    let (mut vars, service, food, _) = tipping_registry();
    let mut antecedent = Antecedent::new(
        LogicOp::And,
        vec![term(service, "poor"), term(food, "rancid")],
    );
    assert_eq!(antecedent.evaluate(&mut vars).unwrap(), Some(0.2));
}

#[test]
fn test_antecedent_populates_fuzzy_memos() {
    let (mut vars, service, food, _) = tipping_registry();
    let mut antecedent = Antecedent::new(
        LogicOp::Or,
        vec![term(service, "poor"), term(food, "rancid")],
    );
    antecedent.evaluate(&mut vars).unwrap();

    let poor_memo = vars.get(service).levels()[0].fuzzy_value();
    let rancid_memo = vars.get(food).levels()[0].fuzzy_value();
    assert_eq!(poor_memo, Some(0.4));
    assert_eq!(rancid_memo, Some(0.2));
}

#[test]
fn test_antecedent_missing_value_does_not_fire() {
    let (mut vars, service, _, tip) = tipping_registry();
    // tip has no value; the whole antecedent stays unevaluated.
    let mut antecedent = Antecedent::new(
        LogicOp::Or,
        vec![term(service, "poor"), term(tip, "cheap")],
    );
    assert_eq!(antecedent.evaluate(&mut vars).unwrap(), None);
    assert_eq!(antecedent.result(), None);
}

#[test]
fn test_antecedent_unknown_level_fails() {
    let (mut vars, service, _, _) = tipping_registry();
    let mut antecedent = Antecedent::new(LogicOp::And, vec![term(service, "stellar")]);
    assert!(matches!(
        antecedent.evaluate(&mut vars).unwrap_err(),
        FuzzyError::UnknownLevel { .. }
    ));
}

#[test]
#[should_panic(expected = "antecedent evaluated twice")]
#[cfg(debug_assertions)]
fn test_antecedent_double_evaluation_panics() {
    let (mut vars, service, _, _) = tipping_registry();
    let mut antecedent = Antecedent::new(LogicOp::And, vec![term(service, "poor")]);
    antecedent.evaluate(&mut vars).unwrap();
    let _ = antecedent.evaluate(&mut vars);
}

// ============================================================================
// Consequent Tests
// ============================================================================

#[test]
fn test_consequent_clips_level_curve() {
    let (vars, _, _, tip) = tipping_registry();
    let mut consequent = Consequent::new(Implication::Min, vec![term(tip, "cheap")]);
    consequent.evaluate(0.4, &vars).unwrap();

    assert_eq!(
        consequent.implicated(tip).unwrap(),
        &[0.4, 0.4, 0.4, 0.4, 0.2, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]
    );
}

#[test]
fn test_consequent_unevaluated_is_none() {
    let (_vars, _, _, tip) = tipping_registry();
    let consequent = Consequent::new(Implication::Min, vec![term(tip, "cheap")]);
    assert!(consequent.implicated(tip).is_none());
}

#[test]
#[should_panic(expected = "consequent evaluated twice")]
#[cfg(debug_assertions)]
fn test_consequent_double_evaluation_panics() {
    let (vars, _, _, tip) = tipping_registry();
    let mut consequent = Consequent::new(Implication::Min, vec![term(tip, "cheap")]);
    consequent.evaluate(0.4, &vars).unwrap();
    let _ = consequent.evaluate(0.4, &vars);
}

// ============================================================================
// Rule Tests
// ============================================================================

#[test]
fn test_rule_fires_and_implicates() {
    let (mut vars, service, food, tip) = tipping_registry();
    let antecedent = Antecedent::new(
        LogicOp::Or,
        vec![term(service, "poor"), term(food, "rancid")],
    );
    let consequent = Consequent::new(Implication::Min, vec![term(tip, "cheap")]);
    let mut rule = Rule::new(antecedent, consequent, 1.0);

    rule.evaluate(&mut vars).unwrap();
    assert_eq!(rule.antecedent().result(), Some(0.4));
    assert_eq!(
        rule.consequent().implicated(tip).unwrap(),
        &[0.4, 0.4, 0.4, 0.4, 0.2, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]
    );
}

#[test]
fn test_rule_weight_scales_truth_degree() {
    let (mut vars, service, _, tip) = tipping_registry();
    let antecedent = Antecedent::new(LogicOp::And, vec![term(service, "poor")]);
    let consequent = Consequent::new(Implication::Min, vec![term(tip, "cheap")]);
    let mut rule = Rule::new(antecedent, consequent, 0.5);

    rule.evaluate(&mut vars).unwrap();
    // 0.4 * 0.5 clips the cheap curve at 0.2.
    assert_eq!(
        rule.consequent().implicated(tip).unwrap(),
        &[0.2, 0.2, 0.2, 0.2, 0.2, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]
    );
}

#[test]
fn test_rule_without_input_value_leaves_consequent_untouched() {
    let mut vars = VariableRegistry::new();
    let service = vars
        .insert(
            Variable::from_spec(&variable(
                "service",
                10.0,
                None,
                &["poor", "good", "excellent"],
            ))
            .unwrap(),
        )
        .unwrap();
    let tip = vars
        .insert(
            Variable::from_spec(&variable(
                "tip",
                25.0,
                None,
                &["cheap", "average", "generous"],
            ))
            .unwrap(),
        )
        .unwrap();

    let antecedent = Antecedent::new(LogicOp::And, vec![term(service, "poor")]);
    let consequent = Consequent::new(Implication::Min, vec![term(tip, "cheap")]);
    let mut rule = Rule::new(antecedent, consequent, 1.0);

    rule.evaluate(&mut vars).unwrap();
    assert_eq!(rule.antecedent().result(), None);
    assert!(rule.consequent().implicated(tip).is_none());
}
