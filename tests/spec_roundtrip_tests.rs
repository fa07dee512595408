use approx::assert_relative_eq;
use mamdani_rs::prelude::*;

const TIPPING_JSON: &str = r#"{
    "aggregation": "OR",
    "defuzzification": "CENTROID",
    "variables": [
        {
            "name": "service",
            "min": 0.0,
            "max": 10.0,
            "value": 3.0,
            "levels": [
                {"name": "poor"},
                {"name": "good"},
                {"name": "excellent"}
            ]
        },
        {
            "name": "food",
            "min": 0.0,
            "max": 10.0,
            "value": 8.0,
            "levels": [
                {"name": "rancid"},
                {"name": "delicious"}
            ]
        },
        {
            "name": "tip",
            "min": 0.0,
            "max": 25.0,
            "levels": [
                {"name": "cheap"},
                {"name": "average"},
                {"name": "generous"}
            ]
        }
    ],
    "rules": [
        {
            "antecedent": {
                "operator": "OR",
                "variables": [
                    {"name": "service", "level": "poor"},
                    {"name": "food", "level": "rancid"}
                ]
            },
            "consequent": {
                "implication": "MIN",
                "variables": [{"name": "tip", "level": "cheap"}]
            }
        },
        {
            "weight": 1.0,
            "antecedent": {
                "operator": "AND",
                "variables": [{"name": "service", "level": "good"}]
            },
            "consequent": {
                "implication": "MIN",
                "variables": [{"name": "tip", "level": "average"}]
            }
        },
        {
            "antecedent": {
                "operator": "OR",
                "variables": [
                    {"name": "service", "level": "excellent"},
                    {"name": "food", "level": "delicious"}
                ]
            },
            "consequent": {
                "implication": "MIN",
                "variables": [{"name": "tip", "level": "generous"}]
            }
        }
    ]
}"#;

// ============================================================================
// Deserialization Tests
// ============================================================================

#[test]
fn test_json_spec_runs_end_to_end() {
    let spec: EngineSpec = serde_json::from_str(TIPPING_JSON).unwrap();
    assert_eq!(spec.aggregation, Aggregation::Or);
    assert_eq!(spec.defuzzification, Defuzzification::Centroid);

    let mut engine = Mamdani::new(spec).build().unwrap();
    engine.run().unwrap();
    let tip = engine.variable_value("tip").unwrap().unwrap();
    assert_relative_eq!(tip, 14.140625, max_relative = 1e-12);
}

#[test]
fn test_rule_weight_defaults_to_one() {
    let spec: EngineSpec = serde_json::from_str(TIPPING_JSON).unwrap();
    assert!(spec.rules.iter().all(|r| r.weight == 1.0));
}

#[test]
fn test_unknown_aggregation_tag_rejected() {
    let json = TIPPING_JSON.replace("\"aggregation\": \"OR\"", "\"aggregation\": \"MEDIAN\"");
    let parsed: Result<EngineSpec, _> = serde_json::from_str(&json);
    assert!(parsed.is_err());
}

#[test]
fn test_unknown_operator_tag_rejected() {
    let json = TIPPING_JSON.replace("\"operator\": \"AND\"", "\"operator\": \"NAND\"");
    let parsed: Result<EngineSpec, _> = serde_json::from_str(&json);
    assert!(parsed.is_err());
}

// ============================================================================
// Round-Trip Tests
// ============================================================================

#[test]
fn test_spec_round_trip_preserves_structure() {
    let spec: EngineSpec = serde_json::from_str(TIPPING_JSON).unwrap();
    let engine = Mamdani::new(spec).build().unwrap();

    let rebuilt = Mamdani::new(engine.to_spec()).build().unwrap();

    // Identical domains and level curves.
    let original = engine.snapshot();
    let recovered = rebuilt.snapshot();
    assert_eq!(original.variables.len(), recovered.variables.len());
    for (a, b) in original.variables.iter().zip(&recovered.variables) {
        assert_eq!(a.name, b.name);
        assert_eq!(a.x, b.x);
        assert_eq!(a.value, b.value);
        for (la, lb) in a.levels.iter().zip(&b.levels) {
            assert_eq!(la.name, lb.name);
            assert_eq!(la.curve, lb.curve);
        }
    }

    // Identical rule structure.
    for (a, b) in original.rules.iter().zip(&recovered.rules) {
        assert_eq!(a.weight, b.weight);
        assert_eq!(a.antecedent.operator, b.antecedent.operator);
        assert_eq!(a.antecedent.variables, b.antecedent.variables);
        assert_eq!(a.consequent.implication, b.consequent.implication);
        assert_eq!(a.consequent.variables, b.consequent.variables);
    }
}

#[test]
fn test_round_trip_reproduces_inference() {
    let spec: EngineSpec = serde_json::from_str(TIPPING_JSON).unwrap();
    let pristine = Mamdani::new(spec).build().unwrap();
    let mut original = pristine.clone();
    let mut rebuilt = Mamdani::new(pristine.to_spec()).build().unwrap();

    original.run().unwrap();
    rebuilt.run().unwrap();

    let a = original.variable_value("tip").unwrap().unwrap();
    let b = rebuilt.variable_value("tip").unwrap().unwrap();
    assert_eq!(a.to_bits(), b.to_bits());
}

#[test]
fn test_serialized_spec_parses_back() {
    let spec: EngineSpec = serde_json::from_str(TIPPING_JSON).unwrap();
    let engine = Mamdani::new(spec).build().unwrap();

    let json = serde_json::to_string(&engine.to_spec()).unwrap();
    let reparsed: EngineSpec = serde_json::from_str(&json).unwrap();
    assert_eq!(reparsed, engine.to_spec());
}

// ============================================================================
// Snapshot Tests
// ============================================================================

#[test]
fn test_snapshot_after_run() {
    let spec: EngineSpec = serde_json::from_str(TIPPING_JSON).unwrap();
    let mut engine = Mamdani::new(spec).build().unwrap();
    engine.run().unwrap();

    let snapshot = engine.snapshot();
    let json = serde_json::to_value(&snapshot).unwrap();

    // Spec shape augmented with domains, values, curves and run state.
    assert_eq!(json["aggregation"], "OR");
    assert_eq!(json["defuzzification"], "CENTROID");
    assert_eq!(json["variables"][0]["name"], "service");
    assert_eq!(json["variables"][0]["x"].as_array().unwrap().len(), 11);
    assert_eq!(
        json["variables"][0]["levels"][0]["curve"]
            .as_array()
            .unwrap()
            .len(),
        11
    );

    // Fuzzified values memoized for the levels the rules touched.
    assert_relative_eq!(
        json["variables"][0]["levels"][0]["fuzzy_value"]
            .as_f64()
            .unwrap(),
        0.4
    );

    // Output variable carries its aggregated curve and crisp value.
    let tip = &json["variables"][2];
    assert_eq!(tip["aggregated"].as_array().unwrap().len(), 11);
    assert_relative_eq!(tip["value"].as_f64().unwrap(), 14.140625, max_relative = 1e-12);

    // Every rule fired and recorded an implicated curve per target.
    for rule in json["rules"].as_array().unwrap() {
        assert!(rule["antecedent"]["result"].as_f64().is_some());
        assert_eq!(rule["consequent"]["result"].as_array().unwrap().len(), 1);
        assert!(rule["consequent"]["result"][0].is_array());
    }
}
