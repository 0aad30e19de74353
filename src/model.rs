use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

use tracing::{debug, info};

use crate::error::{Result, ScrawlError};
use crate::matrix::{parse_matrix, WeightMatrix};
use crate::network::Network;

pub const DEFAULT_MODEL: &str = "backprop";
pub const DEFAULT_DEPTH: usize = 2;

/// Known model names. Resolving a name that is not registered fails before
/// any resource is touched.
#[derive(Debug, Clone)]
pub struct ModelCatalog {
    names: BTreeSet<String>,
}

impl Default for ModelCatalog {
    fn default() -> Self {
        ModelCatalog::new().register(DEFAULT_MODEL)
    }
}

impl ModelCatalog {
    pub fn new() -> ModelCatalog {
        ModelCatalog {
            names: BTreeSet::new(),
        }
    }

    pub fn register(mut self, name: impl Into<String>) -> Self {
        self.names.insert(name.into());
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Resource paths `{dir}/{model}-weights-{k}.csv` for `k` in `1..=depth`.
    pub fn resolve(&self, name: &str, dir: &Path, depth: usize) -> Result<Vec<PathBuf>> {
        if !self.contains(name) {
            return Err(ScrawlError::UnknownModel {
                name: name.to_string(),
            });
        }

        Ok((1..=depth)
            .map(|k| dir.join(format!("{}-weights-{}.csv", name, k)))
            .collect())
    }
}

pub fn load_matrix(path: &Path) -> Result<WeightMatrix> {
    debug!("reading weights from {}", path.display());
    let text = fs::read_to_string(path)?;
    parse_matrix(&text)
}

/// Everything needed to fetch one model's weights.
#[derive(Debug, Clone)]
pub struct ModelLoader {
    pub name: String,
    pub paths: Vec<PathBuf>,
}

impl ModelLoader {
    pub fn new(catalog: &ModelCatalog, name: &str, dir: &Path, depth: usize) -> Result<ModelLoader> {
        let paths = catalog.resolve(name, dir, depth)?;
        Ok(ModelLoader {
            name: name.to_string(),
            paths,
        })
    }

    /// Read and parse every layer, then validate the chain.
    pub fn load(&self) -> Result<Network> {
        let weights = self
            .paths
            .iter()
            .map(|p| load_matrix(p))
            .collect::<Result<Vec<WeightMatrix>>>()?;

        let nn = Network::new(weights)?;
        info!(
            "loaded model {} ({} layers, {} inputs, {} outputs)",
            self.name,
            nn.depth(),
            nn.input_width(),
            nn.output_width()
        );
        Ok(nn)
    }

    /// Run [`ModelLoader::load`] on a background thread.
    pub fn spawn(self) -> PendingModel {
        let name = self.name.clone();
        let handle = thread::spawn(move || self.load());
        PendingModel { name, handle }
    }
}

/// A model load in flight.
pub struct PendingModel {
    name: String,
    handle: JoinHandle<Result<Network>>,
}

impl PendingModel {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub fn wait(self) -> Result<Network> {
        self.handle.join().map_err(|_| ScrawlError::LoaderPanicked)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_follows_naming_convention() {
        let catalog = ModelCatalog::default();
        let paths = catalog.resolve("backprop", Path::new("weights"), 2).unwrap();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("weights/backprop-weights-1.csv"),
                PathBuf::from("weights/backprop-weights-2.csv"),
            ]
        );
    }

    #[test]
    fn unknown_model_fails_fast() {
        let catalog = ModelCatalog::default();
        assert!(matches!(
            catalog.resolve("svm", Path::new("/nonexistent"), 2),
            Err(ScrawlError::UnknownModel { .. })
        ));
    }

    #[test]
    fn register_extends_catalog() {
        let catalog = ModelCatalog::default().register("dropout");
        assert!(catalog.contains("dropout"));
        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["backprop", "dropout"]);
    }

    #[test]
    fn missing_files_are_io_errors() {
        let loader = ModelLoader::new(
            &ModelCatalog::default(),
            "backprop",
            Path::new("/nonexistent-scrawl-weights"),
            2,
        )
        .unwrap();
        assert!(matches!(loader.load(), Err(ScrawlError::Io(_))));
        assert!(matches!(loader.spawn().wait(), Err(ScrawlError::Io(_))));
    }
}
