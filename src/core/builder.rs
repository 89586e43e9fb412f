use std::sync::Arc;

use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

use super::{config::Config, coordinator::Coordinator, signals::SignalBridge};
use crate::error::RuntimeError;
use crate::logging::{Logger, StdLogger};

/// Builder for constructing a [`Coordinator`] with optional collaborators.
///
/// Unset options fall back to defaults:
/// - parent token: a fresh root token that is never cancelled
/// - logger: [`StdLogger`]
/// - runtime: the tokio runtime `build` is called from
pub struct CoordinatorBuilder {
    cfg: Config,
    parent: Option<CancellationToken>,
    logger: Option<Arc<dyn Logger>>,
    runtime: Option<Handle>,
}

impl CoordinatorBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            parent: None,
            logger: None,
            runtime: None,
        }
    }

    /// Sets the parent token the stop token is derived from.
    ///
    /// Cancelling the parent starts the shutdown sequence.
    pub fn with_parent(mut self, parent: CancellationToken) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Sets the logging collaborator.
    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Sets the runtime every task, cleanup, and the signal bridge run on.
    ///
    /// Lets `build` be called from a thread outside any runtime.
    pub fn with_runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Builds the coordinator and starts its signal bridge.
    ///
    /// This consumes the builder and:
    /// - resolves the runtime (explicit handle, else the current one)
    /// - derives the stop token from the parent token
    /// - installs OS signal listeners (per [`Config`])
    /// - spawns the listening loop
    ///
    /// Fails with [`RuntimeError::NoRuntime`] when no runtime was given and
    /// none is current.
    pub fn build(self) -> Result<Arc<Coordinator>, RuntimeError> {
        let runtime = match self.runtime {
            Some(runtime) => runtime,
            None => Handle::try_current()?,
        };
        let parent = self.parent.unwrap_or_else(CancellationToken::new);
        let logger = self
            .logger
            .unwrap_or_else(|| Arc::new(StdLogger::new()) as Arc<dyn Logger>);

        let bridge = {
            let _enter = runtime.enter();
            SignalBridge::install(&self.cfg)?
        };
        let coordinator = Arc::new(Coordinator::new_internal(
            self.cfg,
            &parent,
            logger,
            runtime.clone(),
        ));

        runtime.spawn(bridge.listen(Arc::clone(&coordinator), parent));
        Ok(coordinator)
    }
}
