use super::{Sgd, SgdConfig};
use crate::error::ScalarGradError;
use crate::graph::Graph;
use crate::nn::Parameter;
use crate::optim::Optimizer;
use approx::assert_relative_eq;

fn param_with_grad(graph: &Graph, value: f64, grad: f64) -> Parameter {
    let p = Parameter::new(graph, value, "p");
    graph.set_grad(p.id(), grad);
    p
}

#[test]
fn test_sgd_basic_step() -> Result<(), ScalarGradError> {
    let graph = Graph::new();
    let p = param_with_grad(&graph, 1.0, 0.5);
    let mut sgd = Sgd::new([p], SgdConfig::with_lr(0.1))?;

    sgd.step(&graph)?;
    assert_relative_eq!(p.value(&graph), 0.95, epsilon = 1e-12);
    // step does not touch the gradient
    assert_eq!(p.grad(&graph), 0.5);
    Ok(())
}

#[test]
fn test_sgd_zero_grad() -> Result<(), ScalarGradError> {
    let graph = Graph::new();
    let p = param_with_grad(&graph, 1.0, 0.5);
    let q = param_with_grad(&graph, 2.0, -3.0);
    let mut sgd = Sgd::new([p, q], SgdConfig::default())?;

    sgd.zero_grad(&graph);
    assert_eq!(p.grad(&graph), 0.0);
    assert_eq!(q.grad(&graph), 0.0);
    assert_eq!(sgd.params().len(), 2);
    Ok(())
}

#[test]
fn test_sgd_weight_decay() -> Result<(), ScalarGradError> {
    let graph = Graph::new();
    let p = param_with_grad(&graph, 2.0, 1.0);
    let config = SgdConfig {
        lr: 0.1,
        weight_decay: 0.5,
        ..SgdConfig::default()
    };
    let mut sgd = Sgd::new([p], config)?;

    sgd.step(&graph)?;
    // d_p = 1.0 + 0.5 * 2.0 = 2.0
    assert_relative_eq!(p.value(&graph), 1.8, epsilon = 1e-12);
    Ok(())
}

#[test]
fn test_sgd_momentum_accumulates() -> Result<(), ScalarGradError> {
    let graph = Graph::new();
    let p = param_with_grad(&graph, 0.0, 1.0);
    let config = SgdConfig {
        lr: 0.1,
        momentum: 0.9,
        ..SgdConfig::default()
    };
    let mut sgd = Sgd::new([p], config)?;

    sgd.step(&graph)?; // buf = 1.0
    assert_relative_eq!(p.value(&graph), -0.1, epsilon = 1e-12);
    sgd.step(&graph)?; // buf = 0.9 + 1.0
    assert_relative_eq!(p.value(&graph), -0.1 - 0.19, epsilon = 1e-12);
    Ok(())
}

#[test]
fn test_sgd_nesterov() -> Result<(), ScalarGradError> {
    let graph = Graph::new();
    let p = param_with_grad(&graph, 0.0, 1.0);
    let config = SgdConfig {
        lr: 1.0,
        momentum: 0.5,
        nesterov: true,
        ..SgdConfig::default()
    };
    let mut sgd = Sgd::new([p], config)?;

    sgd.step(&graph)?; // buf = 1.0, d_p = 1.0 + 0.5
    assert_relative_eq!(p.value(&graph), -1.5, epsilon = 1e-12);
    Ok(())
}

#[test]
fn test_sgd_invalid_config() {
    let bad = [
        SgdConfig::with_lr(0.0),
        SgdConfig::with_lr(f64::NAN),
        SgdConfig { momentum: -0.1, ..SgdConfig::default() },
        SgdConfig { weight_decay: -1.0, ..SgdConfig::default() },
        SgdConfig { nesterov: true, ..SgdConfig::default() },
    ];
    for config in bad {
        assert!(matches!(
            Sgd::new(Vec::new(), config),
            Err(ScalarGradError::InvalidConfig(_))
        ));
    }
}

#[test]
fn test_sgd_set_lr() -> Result<(), ScalarGradError> {
    let mut sgd = Sgd::new(Vec::new(), SgdConfig::default())?;
    sgd.set_lr(0.5)?;
    assert_eq!(sgd.config().lr, 0.5);
    assert!(sgd.set_lr(-1.0).is_err());
    assert_eq!(sgd.config().lr, 0.5);
    Ok(())
}
