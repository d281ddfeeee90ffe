use super::{fit, predict, FitReport, TrainConfig};
use crate::error::ScalarGradError;
use crate::graph::Graph;
use crate::model::Mlp;
use crate::nn::{Module, Reduction};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn toy_dataset() -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
    let xs = vec![
        vec![2.0, 3.0, -1.0],
        vec![3.0, -1.0, 0.5],
        vec![0.5, 1.0, 1.0],
        vec![1.0, 1.0, -1.0],
    ];
    let ys = vec![vec![1.0], vec![-1.0], vec![-1.0], vec![1.0]];
    (xs, ys)
}

#[test]
fn test_fit_decreases_loss_and_rewinds_graph() -> Result<(), ScalarGradError> {
    let mut graph = Graph::new();
    let mut rng = StdRng::seed_from_u64(42);
    let mlp = Mlp::new(&graph, 3, &[4, 4, 1], &mut rng)?;
    let params_len = graph.len();
    let (xs, ys) = toy_dataset();

    let config = TrainConfig {
        iterations: 200,
        learning_rate: 0.05,
        ..TrainConfig::default()
    };
    let report = fit(&mut graph, &mlp, &xs, &ys, &config)?;

    assert_eq!(report.losses.len(), 200);
    assert_eq!(graph.len(), params_len);
    let initial = report.initial_loss().unwrap();
    let last = report.final_loss().unwrap();
    assert!(last < initial, "loss went from {} to {}", initial, last);
    Ok(())
}

#[test]
fn test_fit_updates_parameter_values() -> Result<(), ScalarGradError> {
    let mut graph = Graph::new();
    let mut rng = StdRng::seed_from_u64(3);
    let mlp = Mlp::new(&graph, 3, &[2, 1], &mut rng)?;
    let before: Vec<f64> = mlp.parameters().iter().map(|p| p.value(&graph)).collect();
    let (xs, ys) = toy_dataset();

    let config = TrainConfig {
        iterations: 5,
        ..TrainConfig::default()
    };
    fit(&mut graph, &mlp, &xs, &ys, &config)?;

    let after: Vec<f64> = mlp.parameters().iter().map(|p| p.value(&graph)).collect();
    assert_ne!(before, after);
    Ok(())
}

#[test]
fn test_fit_is_reproducible_for_a_seed() -> Result<(), ScalarGradError> {
    let run = || -> Result<FitReport, ScalarGradError> {
        let mut graph = Graph::new();
        let mut rng = StdRng::seed_from_u64(11);
        let mlp = Mlp::new(&graph, 3, &[4, 1], &mut rng)?;
        let (xs, ys) = toy_dataset();
        let config = TrainConfig {
            iterations: 20,
            reduction: Reduction::Mean,
            ..TrainConfig::default()
        };
        fit(&mut graph, &mlp, &xs, &ys, &config)
    };
    assert_eq!(run()?, run()?);
    Ok(())
}

#[test]
fn test_fit_rejects_mismatched_dataset() -> Result<(), ScalarGradError> {
    let mut graph = Graph::new();
    let mut rng = StdRng::seed_from_u64(0);
    let mlp = Mlp::new(&graph, 3, &[1], &mut rng)?;
    let (xs, mut ys) = toy_dataset();
    ys.pop();

    let result = fit(&mut graph, &mlp, &xs, &ys, &TrainConfig::default());
    assert!(matches!(result, Err(ScalarGradError::ShapeMismatch { .. })));

    let empty: Vec<Vec<f64>> = Vec::new();
    let result = fit(&mut graph, &mlp, &empty, &empty, &TrainConfig::default());
    assert!(matches!(result, Err(ScalarGradError::InvalidOperation(_))));
    Ok(())
}

#[test]
fn test_fit_rejects_wrong_target_width_and_rewinds() -> Result<(), ScalarGradError> {
    let mut graph = Graph::new();
    let mut rng = StdRng::seed_from_u64(0);
    let mlp = Mlp::new(&graph, 3, &[1], &mut rng)?;
    let params_len = graph.len();
    let (xs, _) = toy_dataset();
    let ys = vec![vec![1.0, 0.0]; xs.len()];

    let result = fit(&mut graph, &mlp, &xs, &ys, &TrainConfig::default());
    assert!(matches!(result, Err(ScalarGradError::ShapeMismatch { .. })));
    assert_eq!(graph.len(), params_len);
    Ok(())
}

#[test]
fn test_train_config_validation() {
    assert!(TrainConfig::default().validate().is_ok());
    let zero_iterations = TrainConfig {
        iterations: 0,
        ..TrainConfig::default()
    };
    assert!(matches!(
        zero_iterations.validate(),
        Err(ScalarGradError::InvalidConfig(_))
    ));
    let bad_lr = TrainConfig {
        learning_rate: -1.0,
        ..TrainConfig::default()
    };
    assert!(bad_lr.validate().is_err());
    let bad_log = TrainConfig {
        log_every: Some(0),
        ..TrainConfig::default()
    };
    assert!(bad_log.validate().is_err());
}

#[test]
fn test_predict_leaves_graph_untouched() -> Result<(), ScalarGradError> {
    let mut graph = Graph::new();
    let mut rng = StdRng::seed_from_u64(5);
    let mlp = Mlp::new(&graph, 3, &[4, 1], &mut rng)?;
    let params_len = graph.len();
    let (xs, _) = toy_dataset();

    let first = predict(&mut graph, &mlp, &xs)?;
    let second = predict(&mut graph, &mlp, &xs)?;
    assert_eq!(graph.len(), params_len);
    assert_eq!(first, second);
    assert_eq!(first.len(), 4);
    assert!(first.iter().all(|out| out.len() == 1 && out[0].abs() < 1.0));
    Ok(())
}
