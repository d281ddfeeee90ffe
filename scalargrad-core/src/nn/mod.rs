// src/nn/mod.rs
// Building blocks for neural networks: parameters, modules, layers and losses.

pub mod activation;
pub mod init;
pub mod layers;
pub mod losses;
pub mod module; // Trait Module
pub mod parameter; // struct Parameter

// Re-export common items
pub use activation::Activation;
pub use init::Init;
pub use layers::{Layer, Neuron};
pub use losses::{MseLoss, Reduction};
pub use module::Module;
pub use parameter::Parameter;
