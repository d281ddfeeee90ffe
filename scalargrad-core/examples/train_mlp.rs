//! Trains a 3-4-4-1 tanh MLP on four labelled points.
//!
//! Run with `RUST_LOG=info cargo run --example train_mlp` to see the loss every
//! hundred iterations.

use rand::rngs::StdRng;
use rand::SeedableRng;
use scalargrad_core::model::Mlp;
use scalargrad_core::nn::Module;
use scalargrad_core::train::{fit, predict, TrainConfig};
use scalargrad_core::{Graph, ScalarGradError};

fn main() -> Result<(), ScalarGradError> {
    env_logger::init();

    let mut graph = Graph::new();
    let mut rng = StdRng::seed_from_u64(1337);
    let mlp = Mlp::new(&graph, 3, &[4, 4, 1], &mut rng)?;
    println!("MLP created with {} parameters", mlp.num_parameters());

    let xs = vec![
        vec![2.0, 3.0, -1.0],
        vec![3.0, -1.0, 0.5],
        vec![0.5, 1.0, 1.0],
        vec![1.0, 1.0, -1.0],
    ];
    let ys = vec![vec![1.0], vec![-1.0], vec![-1.0], vec![1.0]];

    let config = TrainConfig {
        iterations: 1000,
        learning_rate: 0.01,
        ..TrainConfig::default()
    };
    let report = fit(&mut graph, &mlp, &xs, &ys, &config)?;
    if let (Some(first), Some(last)) = (report.initial_loss(), report.final_loss()) {
        println!("Loss: {:.6} -> {:.6}", first, last);
    }

    for (x, (y, p)) in xs.iter().zip(ys.iter().zip(predict(&mut graph, &mlp, &xs)?)) {
        println!("{:?} -> {:+.4} (target {:+})", x, p[0], y[0]);
    }
    Ok(())
}
