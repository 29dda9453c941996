//! Built-in models addressable from sweep files.

mod decay;
mod functions;

use sweepy_core::ModelRegistry;

pub use decay::{NoisyDecay, noisy_decay};
pub use functions::{moments, product, sin_sum, square};

/// Every built-in model, keyed by name
pub fn builtin() -> ModelRegistry {
    let mut registry = ModelRegistry::new();
    registry
        .register(square())
        .register(sin_sum())
        .register(product())
        .register(moments())
        .register(noisy_decay());
    registry
}

/// One-line descriptions for `sweepy models`
pub fn describe(name: &str) -> &'static str {
    match name {
        "square" => "x^2",
        "sin_sum" => "sin(x + 2y)",
        "product" => "w * x * y * z",
        "moments" => "(x + y, x - y, x * y); record with a 3-flag mask",
        "noisy_decay" => "object model over x, lam; outputs A, B with exponential noise",
        _ => "",
    }
}
