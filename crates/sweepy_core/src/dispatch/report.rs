use std::fmt;

use jiff::Timestamp;
use jiff::tz::TimeZone;

use crate::grid::ParameterSpec;
use crate::model::FixedParameters;
use crate::sweep::SweepOutcome;

/// Human-readable description of a persisted run, written as `README.txt`
#[derive(Debug, Clone)]
pub struct RunReport<'a> {
    pub model: &'a str,
    pub parameters: &'a [ParameterSpec],
    pub fixed: &'a FixedParameters,
    pub reps: usize,
    pub started_at: Timestamp,
    pub finished_at: Timestamp,
}

impl<'a> RunReport<'a> {
    pub fn from_outcome(outcome: &'a SweepOutcome) -> Self {
        Self {
            model: &outcome.model,
            parameters: outcome.specs(),
            fixed: &outcome.fixed,
            reps: outcome.reps,
            started_at: outcome.started_at,
            finished_at: outcome.finished_at,
        }
    }
}

fn local_time(ts: Timestamp) -> String {
    ts.to_zoned(TimeZone::system())
        .strftime("%a %b %e %H:%M:%S %Y")
        .to_string()
}

impl fmt::Display for RunReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Automatic parameter sweep generated by sweepy")?;
        writeln!(f)?;
        writeln!(f, "Began at {}", local_time(self.started_at))?;
        writeln!(f, "Ended at {}", local_time(self.finished_at))?;
        writeln!(f)?;
        writeln!(f, "Using model {}", self.model)?;
        writeln!(f, "Repetitions: {}", self.reps)?;
        writeln!(f, "Sweep parameter(s):")?;
        for p in self.parameters {
            writeln!(
                f,
                "{} from {} to {} in {} steps",
                p.name, p.low, p.high, p.count
            )?;
        }
        if !self.fixed.is_empty() {
            writeln!(f)?;
            writeln!(f, "Fixed parameters:")?;
            for (name, value) in self.fixed {
                writeln!(f, "{name} = {value}")?;
            }
        }
        Ok(())
    }
}
