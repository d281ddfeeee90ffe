use super::Init;
use crate::error::ScalarGradError;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_default_is_symmetric_uniform() {
    let mut rng = StdRng::seed_from_u64(7);
    let values = Init::default().sample(&mut rng, 200).unwrap();
    assert_eq!(values.len(), 200);
    assert!(values.iter().all(|v| (-1.0..1.0).contains(v)));
}

#[test]
fn test_same_seed_same_values() {
    let init = Init::Normal { mean: 0.0, std: 0.5 };
    let a = init.sample(&mut StdRng::seed_from_u64(42), 16).unwrap();
    let b = init.sample(&mut StdRng::seed_from_u64(42), 16).unwrap();
    let c = init.sample(&mut StdRng::seed_from_u64(43), 16).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_constant_fills() {
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(Init::Constant(0.01).sample(&mut rng, 3).unwrap(), vec![0.01; 3]);
}

#[test]
fn test_invalid_distributions_are_rejected() {
    let mut rng = StdRng::seed_from_u64(0);
    let bad_uniform = Init::Uniform { low: 1.0, high: 1.0 };
    let bad_normal = Init::Normal { mean: 0.0, std: -1.0 };
    let bad_constant = Init::Constant(f64::NAN);

    assert!(matches!(bad_uniform.sample(&mut rng, 1), Err(ScalarGradError::InitError(_))));
    assert!(matches!(bad_normal.sample(&mut rng, 1), Err(ScalarGradError::InitError(_))));
    assert!(matches!(bad_constant.validate(), Err(ScalarGradError::InitError(_))));
}
