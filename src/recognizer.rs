use std::mem;

use tracing::{debug, info, trace, warn};

use crate::config::RecognizerConfig;
use crate::error::{Result, ScrawlError};
use crate::model::{ModelCatalog, ModelLoader, PendingModel};
use crate::network::Network;
use crate::prediction::{Guess, Prediction};
use crate::raster::{extract, render_ascii, Raster};

enum ModelState {
    NotLoaded,
    Loading(PendingModel),
    Loaded(Network),
}

/// Entry point for callers holding a drawing: owns the configuration and the
/// currently installed network.
pub struct Recognizer {
    config: RecognizerConfig,
    catalog: ModelCatalog,
    state: ModelState,
}

impl Recognizer {
    pub fn new(config: RecognizerConfig) -> Recognizer {
        Recognizer::with_catalog(config, ModelCatalog::default())
    }

    pub fn with_catalog(config: RecognizerConfig, catalog: ModelCatalog) -> Recognizer {
        Recognizer {
            config,
            catalog,
            state: ModelState::NotLoaded,
        }
    }

    pub fn config(&self) -> &RecognizerConfig {
        &self.config
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, ModelState::Loaded(_))
    }

    pub fn network(&self) -> Option<&Network> {
        match &self.state {
            ModelState::Loaded(nn) => Some(nn),
            _ => None,
        }
    }

    fn loader(&self) -> Result<ModelLoader> {
        ModelLoader::new(
            &self.catalog,
            &self.config.model,
            &self.config.weights_dir,
            self.config.depth,
        )
    }

    /// Load the configured model on the calling thread. An unknown model name
    /// fails before the installed model is touched; any later failure leaves
    /// the recognizer without a model.
    pub fn load(&mut self) -> Result<()> {
        let loader = self.loader()?;
        self.state = ModelState::NotLoaded;
        self.settle(loader.load())
    }

    /// Start loading the configured model in the background. Once the model
    /// name resolves, any installed model is dropped immediately.
    pub fn begin_load(&mut self) -> Result<()> {
        let loader = self.loader()?;
        self.state = ModelState::NotLoaded;
        let pending = loader.spawn();
        debug!("loading model {} in background", pending.name());
        self.state = ModelState::Loading(pending);
        Ok(())
    }

    /// Install a background load if it has finished. Returns whether a model
    /// is ready.
    pub fn poll(&mut self) -> Result<bool> {
        let finished = match &self.state {
            ModelState::Loading(pending) => pending.is_finished(),
            ModelState::Loaded(_) => return Ok(true),
            ModelState::NotLoaded => return Ok(false),
        };

        if finished {
            self.wait()?;
        }
        Ok(self.is_ready())
    }

    /// Block until a background load completes.
    pub fn wait(&mut self) -> Result<()> {
        match mem::replace(&mut self.state, ModelState::NotLoaded) {
            ModelState::Loading(pending) => {
                let loaded = pending.wait();
                self.settle(loaded)
            }
            ModelState::Loaded(nn) => {
                self.state = ModelState::Loaded(nn);
                Ok(())
            }
            ModelState::NotLoaded => Err(ScrawlError::NotReady),
        }
    }

    /// Switch to another registered model and load it. Unknown names are
    /// rejected without disturbing the current model.
    pub fn select_model(&mut self, name: &str) -> Result<()> {
        if !self.catalog.contains(name) {
            return Err(ScrawlError::UnknownModel {
                name: name.to_string(),
            });
        }

        self.config.model = name.to_string();
        self.load()
    }

    pub fn install(&mut self, nn: Network) {
        info!("installed network with {} layers", nn.depth());
        self.state = ModelState::Loaded(nn);
    }

    fn settle(&mut self, loaded: Result<Network>) -> Result<()> {
        match loaded {
            Ok(nn) => {
                self.install(nn);
                Ok(())
            }
            Err(e) => {
                warn!("failed to load model {}: {}", self.config.model, e);
                self.state = ModelState::NotLoaded;
                Err(e)
            }
        }
    }

    pub fn predict(&self, features: &[f64]) -> Result<Prediction> {
        match &self.state {
            ModelState::Loaded(nn) => nn.predict(features),
            _ => Err(ScrawlError::NotReady),
        }
    }

    /// Extract features from a drawing with the configured layout and predict.
    pub fn recognize(&self, raster: &Raster) -> Result<Prediction> {
        if !self.is_ready() {
            return Err(ScrawlError::NotReady);
        }

        let features = extract(raster, self.config.extraction, self.config.grid)?;
        if self.config.debug {
            trace!(
                "extracted {:?} grid:\n{}",
                self.config.extraction,
                render_ascii(&features, self.config.grid)
            );
        }

        self.predict(&features)
    }

    pub fn guesses(&self, prediction: &Prediction) -> Vec<Guess> {
        prediction.guesses(self.config.labels, self.config.confidence_threshold)
    }

    pub fn digit(&self, prediction: &Prediction) -> Result<usize> {
        prediction.digit(self.config.labels)
    }
}
