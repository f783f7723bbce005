use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{config::NeatConfig, network::GenomeShape, weights};

/// Identity of a genome within one run.
///
/// Ids are handed out in increasing order; elites carried into the next
/// generation keep theirs.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct GenomeId(u64);

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum PersistError {
    #[display("failed to access genome file {}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[display("malformed genome file {}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Evolvable network weights plus the fitness they earned in the current
/// generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genome {
    id: GenomeId,
    weights: Vec<f32>,
    fitness: f32,
}

impl Genome {
    #[must_use]
    pub fn new(id: GenomeId, weights: Vec<f32>) -> Self {
        Self {
            id,
            weights,
            fitness: 0.0,
        }
    }

    /// Creates a genome with weights uniform in `±weight_init_max`, shaped
    /// for the configured topology.
    pub fn random<R>(id: GenomeId, config: &NeatConfig, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let len = GenomeShape::from_config(config).weight_count();
        let weights = weights::random(rng, config.genome.weight_init_max, len);
        Self::new(id, weights)
    }

    #[must_use]
    pub fn id(&self) -> GenomeId {
        self.id
    }

    #[must_use]
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    #[must_use]
    pub fn fitness(&self) -> f32 {
        self.fitness
    }

    pub fn add_fitness(&mut self, delta: f32) {
        self.fitness += delta;
    }

    pub fn reset_fitness(&mut self) {
        self.fitness = 0.0;
    }

    /// Writes the genome as pretty-printed JSON.
    pub fn save_json<P>(&self, path: P) -> Result<(), PersistError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let io_err = |source| PersistError::Io {
            path: path.to_owned(),
            source,
        };
        let file = File::create(path).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self).map_err(|source| PersistError::Json {
            path: path.to_owned(),
            source,
        })?;
        writer.write_all(b"\n").map_err(io_err)?;
        writer.flush().map_err(io_err)?;
        Ok(())
    }

    pub fn load_json<P>(path: P) -> Result<Self, PersistError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| PersistError::Io {
            path: path.to_owned(),
            source,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| PersistError::Json {
            path: path.to_owned(),
            source,
        })
    }
}
