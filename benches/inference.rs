use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use mamdani_rs::prelude::*;

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

fn rule(operator: LogicOp, antecedent: &[(&str, &str)], consequent: &[(&str, &str)]) -> RuleSpec {
    let terms = |pairs: &[(&str, &str)]| {
        pairs
            .iter()
            .map(|(name, lvl)| TermSpec {
                name: (*name).into(),
                level: (*lvl).into(),
            })
            .collect()
    };
    RuleSpec {
        weight: 1.0,
        antecedent: AntecedentSpec {
            operator,
            variables: terms(antecedent),
        },
        consequent: ConsequentSpec {
            implication: Implication::Min,
            variables: terms(consequent),
        },
    }
}

fn tipping_spec() -> EngineSpec {
    EngineSpec {
        aggregation: Aggregation::Or,
        defuzzification: Defuzzification::Centroid,
        variables: vec![
            variable("service", 10.0, Some(3.0), &["poor", "good", "excellent"]),
            variable("food", 10.0, Some(8.0), &["rancid", "delicious"]),
            variable("tip", 25.0, None, &["cheap", "average", "generous"]),
        ],
        rules: vec![
            rule(
                LogicOp::Or,
                &[("service", "poor"), ("food", "rancid")],
                &[("tip", "cheap")],
            ),
            rule(LogicOp::And, &[("service", "good")], &[("tip", "average")]),
            rule(
                LogicOp::Or,
                &[("service", "excellent"), ("food", "delicious")],
                &[("tip", "generous")],
            ),
        ],
    }
}

fn bench_inference(c: &mut Criterion) {
    let spec = tipping_spec();

    c.bench_function("build_engine", |b| {
        b.iter(|| Mamdani::new(black_box(spec.clone())).build().unwrap())
    });

    c.bench_function("full_inference_run", |b| {
        b.iter(|| {
            let mut engine = Mamdani::new(black_box(spec.clone())).build().unwrap();
            engine.run().unwrap();
            black_box(engine.variable_value("tip").unwrap())
        })
    });
}

criterion_group!(benches, bench_inference);
criterion_main!(benches);
