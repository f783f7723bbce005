//! Evolution hyperparameters loaded from a TOML file.
//!
//! The file is split into sections mirroring the stages of the algorithm.
//! Every section and key is optional and falls back to the defaults shown
//! below; unknown keys are rejected so that typos surface as errors instead
//! of silently using a default.
//!
//! ```toml
//! [neat]
//! population_size = 50
//! # fitness_threshold = 5000.0
//! # seed = 42
//!
//! [genome]
//! num_inputs = 6
//! num_hidden = 4
//! num_outputs = 1
//! activation = "tanh"
//! weight_init_max = 1.0
//! weight_max = 5.0
//!
//! [reproduction]
//! elitism = 2
//! tournament_size = 3
//! blx_alpha = 0.3
//!
//! [mutation]
//! rate = 0.2
//! sigma = 0.3
//! ```

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::network::Activation;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("failed to read config file {}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[display("failed to parse config: {source}")]
    Parse { source: toml::de::Error },
    #[display("invalid config: {reason}")]
    Invalid { reason: String },
}

/// Complete configuration of the evolution engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NeatConfig {
    pub neat: PopulationSection,
    pub genome: GenomeSection,
    pub reproduction: ReproductionSection,
    pub mutation: MutationSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PopulationSection {
    /// Number of genomes evaluated per generation.
    pub population_size: usize,
    /// Stop early once the best genome of a generation reaches this fitness.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fitness_threshold: Option<f32>,
    /// Seed for genome initialization and reproduction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for PopulationSection {
    fn default() -> Self {
        Self {
            population_size: 50,
            fitness_threshold: None,
            seed: None,
        }
    }
}

/// Network topology and weight ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenomeSection {
    pub num_inputs: usize,
    /// Size of the single hidden layer; zero connects inputs to outputs directly.
    pub num_hidden: usize,
    pub num_outputs: usize,
    pub activation: Activation,
    /// Initial weights are drawn from `[-weight_init_max, weight_init_max]`.
    pub weight_init_max: f32,
    /// Weights are clamped to `[-weight_max, weight_max]` after every operator.
    pub weight_max: f32,
}

impl Default for GenomeSection {
    fn default() -> Self {
        Self {
            num_inputs: 6,
            num_hidden: 4,
            num_outputs: 1,
            activation: Activation::Tanh,
            weight_init_max: 1.0,
            weight_max: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReproductionSection {
    /// Number of top genomes copied unchanged into the next generation.
    pub elitism: usize,
    pub tournament_size: usize,
    /// BLX-α range expansion factor.
    pub blx_alpha: f32,
}

impl Default for ReproductionSection {
    fn default() -> Self {
        Self {
            elitism: 2,
            tournament_size: 3,
            blx_alpha: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MutationSection {
    /// Per-weight mutation probability.
    pub rate: f32,
    /// Standard deviation of the Gaussian perturbation.
    pub sigma: f32,
}

impl Default for MutationSection {
    fn default() -> Self {
        Self {
            rate: 0.2,
            sigma: 0.3,
        }
    }
}

impl NeatConfig {
    /// Reads, parses and validates a config file.
    pub fn from_file<P>(path: P) -> Result<Self, ConfigError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Parses and validates a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::Parse { source })?;
        config.validate()?;
        Ok(config)
    }

    /// Renders the config as TOML, e.g. to write a starter file.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Checks the values a parser cannot check on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: String| Err(ConfigError::Invalid { reason });

        let population_size = self.neat.population_size;
        if population_size == 0 {
            return invalid("neat.population_size must be at least 1".into());
        }
        if let Some(threshold) = self.neat.fitness_threshold
            && !threshold.is_finite()
        {
            return invalid(format!("neat.fitness_threshold must be finite, got {threshold}"));
        }

        let genome = &self.genome;
        if genome.num_inputs == 0 || genome.num_outputs == 0 {
            return invalid("genome.num_inputs and genome.num_outputs must be at least 1".into());
        }
        for (key, value) in [
            ("genome.weight_init_max", genome.weight_init_max),
            ("genome.weight_max", genome.weight_max),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return invalid(format!("{key} must be a positive number, got {value}"));
            }
        }

        let reproduction = &self.reproduction;
        if reproduction.elitism > population_size {
            return invalid(format!(
                "reproduction.elitism ({}) exceeds neat.population_size ({population_size})",
                reproduction.elitism,
            ));
        }
        if reproduction.tournament_size == 0 {
            return invalid("reproduction.tournament_size must be at least 1".into());
        }
        if !(reproduction.blx_alpha.is_finite() && reproduction.blx_alpha >= 0.0) {
            return invalid(format!(
                "reproduction.blx_alpha must be non-negative, got {}",
                reproduction.blx_alpha,
            ));
        }

        let mutation = &self.mutation;
        if !(0.0..=1.0).contains(&mutation.rate) {
            return invalid(format!("mutation.rate must be in [0, 1], got {}", mutation.rate));
        }
        if !(mutation.sigma.is_finite() && mutation.sigma >= 0.0) {
            return invalid(format!(
                "mutation.sigma must be non-negative, got {}",
                mutation.sigma,
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = NeatConfig::from_toml_str("").unwrap();
        assert_eq!(config, NeatConfig::default());
    }

    #[test]
    fn test_partial_sections_override_defaults() {
        let config = NeatConfig::from_toml_str(
            r#"
            [neat]
            population_size = 12
            fitness_threshold = 900.0

            [genome]
            num_hidden = 0
            activation = "identity"
            "#,
        )
        .unwrap();
        assert_eq!(config.neat.population_size, 12);
        assert_eq!(config.neat.fitness_threshold, Some(900.0));
        assert_eq!(config.genome.num_hidden, 0);
        assert_eq!(config.genome.activation, Activation::Identity);
        assert_eq!(config.genome.num_inputs, 6);
        assert_eq!(config.mutation, MutationSection::default());
    }

    #[test]
    fn test_unknown_key_is_a_parse_error() {
        let err = NeatConfig::from_toml_str("[neat]\npop_size = 3\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }), "{err}");
    }

    #[test]
    fn test_malformed_toml_is_a_parse_error() {
        let err = NeatConfig::from_toml_str("[neat\npopulation_size = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }), "{err}");
    }

    #[test]
    fn test_validation_errors() {
        let cases = [
            "[neat]\npopulation_size = 0",
            "[neat]\npopulation_size = 2\n[reproduction]\nelitism = 3",
            "[reproduction]\ntournament_size = 0",
            "[mutation]\nrate = 1.5",
            "[mutation]\nsigma = -0.1",
            "[genome]\nweight_max = 0.0",
            "[genome]\nnum_outputs = 0",
        ];
        for text in cases {
            let err = NeatConfig::from_toml_str(text).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { .. }), "{text}: {err}");
        }
    }

    #[test]
    fn test_missing_file_is_a_read_error() {
        let err = NeatConfig::from_file("/nonexistent/dodger.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }), "{err}");
        assert!(err.to_string().contains("/nonexistent/dodger.toml"));
    }

    #[test]
    fn test_rendered_defaults_parse_back() {
        let text = NeatConfig::default().to_toml_string().unwrap();
        assert_eq!(NeatConfig::from_toml_str(&text).unwrap(), NeatConfig::default());
    }
}
