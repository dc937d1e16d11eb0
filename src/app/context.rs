use crate::domain::PipelineConfig;
use crate::ports::{ArtifactStore, Clock, ModelInvoker};

/// Collaborators and settings for one enrichment run.
///
/// Client handles are owned by the caller; the pipeline only borrows them.
pub struct PipelineContext<'a, M: ModelInvoker, S: ArtifactStore, C: Clock> {
    model: &'a M,
    store: &'a S,
    clock: &'a C,
    config: &'a PipelineConfig,
}

impl<'a, M: ModelInvoker, S: ArtifactStore, C: Clock> PipelineContext<'a, M, S, C> {
    pub fn new(model: &'a M, store: &'a S, clock: &'a C, config: &'a PipelineConfig) -> Self {
        Self { model, store, clock, config }
    }

    pub fn model(&self) -> &M {
        self.model
    }

    pub fn store(&self) -> &S {
        self.store
    }

    pub fn clock(&self) -> &C {
        self.clock
    }

    pub fn config(&self) -> &PipelineConfig {
        self.config
    }
}
