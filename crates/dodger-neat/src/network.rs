//! Feed-forward networks decoded from genomes.
//!
//! A genome is a flat weight vector; [`GenomeShape`] fixes how that vector is
//! laid out as layer matrices:
//!
//! ```text
//! without hidden layer:  W (outputs x inputs) | b (outputs)
//! with hidden layer:     W1 (hidden x inputs) | b1 (hidden) | W2 (outputs x hidden) | b2 (outputs)
//! ```
//!
//! Matrices are row-major, one row per receiving neuron.

use serde::{Deserialize, Serialize};

use crate::{config::NeatConfig, genome::Genome};

/// Activation applied to every hidden and output neuron.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    #[default]
    Tanh,
    Sigmoid,
    Relu,
    Identity,
}

impl Activation {
    #[must_use]
    pub fn apply(self, x: f32) -> f32 {
        match self {
            Activation::Tanh => x.tanh(),
            Activation::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            Activation::Relu => x.max(0.0),
            Activation::Identity => x,
        }
    }
}

/// Layer sizes of the network encoded by a genome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenomeShape {
    pub inputs: usize,
    pub hidden: usize,
    pub outputs: usize,
}

impl GenomeShape {
    #[must_use]
    pub fn from_config(config: &NeatConfig) -> Self {
        Self {
            inputs: config.genome.num_inputs,
            hidden: config.genome.num_hidden,
            outputs: config.genome.num_outputs,
        }
    }

    /// Number of weights (including biases) a genome of this shape carries.
    ///
    /// ```
    /// use dodger_neat::GenomeShape;
    ///
    /// let direct = GenomeShape { inputs: 6, hidden: 0, outputs: 1 };
    /// assert_eq!(direct.weight_count(), 7);
    ///
    /// let layered = GenomeShape { inputs: 6, hidden: 4, outputs: 1 };
    /// assert_eq!(layered.weight_count(), 6 * 4 + 4 + 4 + 1);
    /// ```
    #[must_use]
    pub fn weight_count(&self) -> usize {
        if self.hidden == 0 {
            self.outputs * (self.inputs + 1)
        } else {
            self.hidden * (self.inputs + 1) + self.outputs * (self.hidden + 1)
        }
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum NetworkError {
    #[display(
        "genome {genome} carries {actual} weights but the configured topology needs {expected}"
    )]
    ShapeMismatch {
        #[error(not(source))]
        genome: crate::genome::GenomeId,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, Clone, PartialEq)]
struct Layer {
    inputs: usize,
    outputs: usize,
    /// Row-major `outputs x inputs` matrix followed by `outputs` biases.
    params: Vec<f32>,
}

impl Layer {
    fn take(inputs: usize, outputs: usize, weights: &mut &[f32]) -> Self {
        let (params, rest) = weights.split_at(outputs * (inputs + 1));
        *weights = rest;
        Self {
            inputs,
            outputs,
            params: params.to_vec(),
        }
    }

    fn forward(&self, input: &[f32], activation: Activation) -> Vec<f32> {
        let (matrix, biases) = self.params.split_at(self.inputs * self.outputs);
        matrix
            .chunks_exact(self.inputs)
            .zip(biases)
            .map(|(row, bias)| {
                let sum = row.iter().zip(input).map(|(w, x)| w * x).sum::<f32>() + bias;
                activation.apply(sum)
            })
            .collect()
    }
}

/// A fully connected feed-forward network with at most one hidden layer.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedForwardNetwork {
    layers: Vec<Layer>,
    activation: Activation,
}

impl FeedForwardNetwork {
    /// Decodes `genome` using the topology described by `config`.
    pub fn create(genome: &Genome, config: &NeatConfig) -> Result<Self, NetworkError> {
        let shape = GenomeShape::from_config(config);
        let expected = shape.weight_count();
        if genome.weights().len() != expected {
            return Err(NetworkError::ShapeMismatch {
                genome: genome.id(),
                expected,
                actual: genome.weights().len(),
            });
        }

        let mut rest = genome.weights();
        let layers = if shape.hidden == 0 {
            vec![Layer::take(shape.inputs, shape.outputs, &mut rest)]
        } else {
            vec![
                Layer::take(shape.inputs, shape.hidden, &mut rest),
                Layer::take(shape.hidden, shape.outputs, &mut rest),
            ]
        };
        debug_assert!(rest.is_empty());

        Ok(Self {
            layers,
            activation: config.genome.activation,
        })
    }

    #[must_use]
    pub fn num_inputs(&self) -> usize {
        self.layers[0].inputs
    }

    #[must_use]
    pub fn num_outputs(&self) -> usize {
        self.layers[self.layers.len() - 1].outputs
    }

    /// Propagates `inputs` through the network and returns the output layer.
    ///
    /// # Panics
    ///
    /// Panics if `inputs` does not match the network's input count.
    #[must_use]
    pub fn activate(&self, inputs: &[f32]) -> Vec<f32> {
        assert_eq!(
            inputs.len(),
            self.num_inputs(),
            "network expects {} inputs, got {}",
            self.num_inputs(),
            inputs.len(),
        );
        let mut values = inputs.to_vec();
        for layer in &self.layers {
            values = layer.forward(&values, self.activation);
        }
        values
    }
}

#[cfg(test)]
mod tests {
    use crate::genome::GenomeId;

    use super::*;

    fn config(hidden: usize, activation: Activation) -> NeatConfig {
        let mut config = NeatConfig::default();
        config.genome.num_inputs = 2;
        config.genome.num_hidden = hidden;
        config.genome.num_outputs = 1;
        config.genome.activation = activation;
        config
    }

    #[test]
    fn test_direct_network_is_weighted_sum() {
        let config = config(0, Activation::Identity);
        let genome = Genome::new(GenomeId::from(1), vec![2.0, -1.0, 0.5]);
        let net = FeedForwardNetwork::create(&genome, &config).unwrap();
        assert_eq!(net.activate(&[3.0, 4.0]), vec![2.0 * 3.0 - 4.0 + 0.5]);
    }

    #[test]
    fn test_hidden_layer_network() {
        let config = config(2, Activation::Relu);
        #[rustfmt::skip]
        let weights = vec![
            1.0, 0.0,   // h0 = relu(x0)
            0.0, -1.0,  // h1 = relu(-x1)
            0.0, 0.0,   // hidden biases
            1.0, 10.0,  // out = relu(h0 + 10 h1 - 1)
            -1.0,
        ];
        let genome = Genome::new(GenomeId::from(1), weights);
        let net = FeedForwardNetwork::create(&genome, &config).unwrap();
        assert_eq!(net.activate(&[5.0, 2.0]), vec![4.0]);
        assert_eq!(net.activate(&[0.0, -1.0]), vec![9.0]);
        assert_eq!(net.activate(&[0.5, 0.0]), vec![0.0]);
    }

    #[test]
    fn test_tanh_output_sign() {
        let config = config(0, Activation::Tanh);
        let genome = Genome::new(GenomeId::from(1), vec![1.0, -1.0, 0.0]);
        let net = FeedForwardNetwork::create(&genome, &config).unwrap();
        assert!(net.activate(&[0.0, 1.0])[0] < 0.0);
        assert!(net.activate(&[1.0, 0.0])[0] > 0.0);
        assert_eq!(net.activate(&[1.0, 1.0])[0], 0.0);
    }

    #[test]
    fn test_shape_mismatch() {
        let config = config(2, Activation::Tanh);
        let genome = Genome::new(GenomeId::from(9), vec![0.0; 3]);
        let err = FeedForwardNetwork::create(&genome, &config).unwrap_err();
        let NetworkError::ShapeMismatch {
            genome,
            expected,
            actual,
        } = err;
        assert_eq!(genome, GenomeId::from(9));
        assert_eq!(expected, 9);
        assert_eq!(actual, 3);
    }

    #[test]
    fn test_sigmoid_midpoint() {
        assert_eq!(Activation::Sigmoid.apply(0.0), 0.5);
    }
}
