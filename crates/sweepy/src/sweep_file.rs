//! YAML sweep files.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sweepy_core::model::FixedParameters;
use sweepy_core::{Destination, OutputSelection, ParameterSpec, SweepConfig};

/// A sweep described in YAML, naming a built-in model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepFile {
    pub model: String,

    /// `[name, low, high, count]` or `{name, low, high, count}` per parameter
    pub parameters: Vec<ParameterSpec>,

    #[serde(default, skip_serializing_if = "FixedParameters::is_empty")]
    pub fixed: FixedParameters,

    #[serde(default = "default_reps")]
    pub reps: usize,

    /// `only`, or one flag per raw model output
    #[serde(default)]
    pub record_outputs: OutputSelection,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_names: Option<Vec<String>>,

    /// Persist results here; without it results are shown and printed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_directory: Option<PathBuf>,

    /// Create `output_directory` if it does not exist
    #[serde(default)]
    pub ensure_dir: bool,

    /// Extension for saved plots
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
}

fn default_reps() -> usize {
    1
}

impl SweepFile {
    /// Load from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_saphyr::Error> {
        serde_saphyr::from_str(yaml)
    }

    /// Save to YAML string
    pub fn to_yaml(&self) -> Result<String, serde_saphyr::ser::Error> {
        serde_saphyr::to_string(self)
    }

    pub fn load(path: &Path) -> color_eyre::Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(Self::from_yaml(&content)?)
    }

    /// Where results go. Without an output directory, `graphs` picks between
    /// displaying and plain return.
    pub fn destination(&self, graphs: bool) -> Destination {
        match &self.output_directory {
            Some(dir) => {
                let dest = Destination::persist(dir).create_if_missing(self.ensure_dir);
                match &self.file_type {
                    Some(ext) => dest.file_type(ext.as_str()),
                    None => dest,
                }
            }
            None if graphs => Destination::Display,
            None => Destination::Return,
        }
    }

    pub fn to_config(&self, graphs: bool) -> SweepConfig {
        let mut config = SweepConfig::new(self.parameters.clone())
            .reps(self.reps)
            .outputs(self.record_outputs.clone())
            .destination(self.destination(graphs));
        config.fixed = self.fixed.clone();
        config.output_names = self.output_names.clone();
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRODUCT: &str = r#"
model: product
parameters:
  - ["x", 0, 5, 10]
  - ["y", 1, 20, 3]
  - name: "z"
    low: 8
    high: 20
    count: 12
fixed:
  w: 12
output_directory: sample_outputs
ensure_dir: true
"#;

    #[test]
    fn test_parse_product_file() {
        let file = SweepFile::from_yaml(PRODUCT).unwrap();
        assert_eq!(file.model, "product");
        assert_eq!(file.parameters[0], ParameterSpec::new("x", 0.0, 5.0, 10));
        assert_eq!(file.parameters[2], ParameterSpec::new("z", 8.0, 20.0, 12));
        assert_eq!(file.fixed.get("w"), Some(&12.0));
        assert_eq!(file.reps, 1);
        assert_eq!(file.record_outputs, OutputSelection::Only);

        let config = file.to_config(true);
        assert_eq!(config.total_points(), Some(360));
        assert_eq!(
            config.destination,
            Destination::persist("sample_outputs").create_if_missing(true)
        );
    }

    #[test]
    fn test_mask_and_names() {
        let file = SweepFile::from_yaml(
            r#"
model: moments
parameters: [["x", -1, 1, 5], ["y", 0, 2, 3]]
reps: 3
record_outputs: [true, false, true]
output_names: [sum, product]
file_type: plot
"#,
        )
        .unwrap();

        let config = file.to_config(false);
        assert_eq!(config.outputs, OutputSelection::mask([true, false, true]));
        assert_eq!(
            config.output_names,
            Some(vec!["sum".to_string(), "product".to_string()])
        );
        assert_eq!(config.reps, 3);
        // No directory: file_type has nothing to apply to
        assert_eq!(config.destination, Destination::Return);
        assert_eq!(file.destination(true), Destination::Display);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let file = SweepFile::from_yaml(PRODUCT).unwrap();
        let yaml = file.to_yaml().unwrap();
        assert_eq!(SweepFile::from_yaml(&yaml).unwrap(), file);
    }
}
