use rand_distr::{Distribution, Exp};
use sweepy_core::model::{Bindings, ObjectModel, Observable, RunStep};
use sweepy_core::{Result, SweepError};

/// Rate of the measurement jitter added to `A`
const JITTER_RATE: f64 = 10.0;

/// A quantity `x` decaying at rate `lam`, observed with noise.
///
/// After [`RunStep::run`], `A` is the remaining amount `x·e^(-lam)` plus
/// zero-mean exponential jitter, and `B` is one sampled decay time scaled by
/// `x` (mean `x / lam`).
#[derive(Debug, Clone, PartialEq)]
pub struct NoisyDecay {
    pub x: f64,
    pub lam: f64,
    a: Option<f64>,
    b: Option<f64>,
}

impl NoisyDecay {
    pub fn new(x: f64, lam: f64) -> Self {
        Self {
            x,
            lam,
            a: None,
            b: None,
        }
    }

    fn from_bindings(p: &Bindings) -> Result<Self> {
        Ok(Self::new(p.get("x")?, p.get("lam")?))
    }
}

impl Observable for NoisyDecay {
    fn get_output(&self, name: &str) -> Option<f64> {
        match name {
            "A" => self.a,
            "B" => self.b,
            _ => None,
        }
    }
}

impl RunStep for NoisyDecay {
    fn run(&mut self) -> Result<()> {
        if self.lam <= 0.0 {
            return Err(SweepError::model(format!(
                "decay rate must be positive, got {}",
                self.lam
            )));
        }
        let decay = Exp::new(self.lam).map_err(SweepError::model)?;
        let jitter = Exp::new(JITTER_RATE).map_err(SweepError::model)?;

        let mut rng = rand::rng();
        let noise = jitter.sample(&mut rng) - 1.0 / JITTER_RATE;
        self.a = Some(self.x * (-self.lam).exp() + noise);
        self.b = Some(self.x * decay.sample(&mut rng));
        Ok(())
    }
}

pub fn noisy_decay() -> ObjectModel<NoisyDecay> {
    ObjectModel::runnable("noisy_decay", NoisyDecay::from_bindings, &["A", "B"])
}
