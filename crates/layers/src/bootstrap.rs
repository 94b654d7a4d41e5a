//! Bootstrap entry point.
//!
//! Responsibilities:
//! - Derive instance paths for the supported directory layouts.
//! - Compose dotenv loading, proxy resolution and the orchestrator into a
//!   single call.
//!
//! Does NOT handle:
//! - Firing host triggers after orchestration.
//!
//! Invariants:
//! - A malformed `.env` file fails before any layer runs.
//! - Layers read request facts only after proxy resolution.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use envlayer_config::{ConfigError, Env, RequestContext, load_dotenv, resolve_proxy_facts};
use tracing::info;

use crate::host::Host;
use crate::layer::Layer;
use crate::layers::default_layers;
use crate::orchestrator::Orchestrator;

/// Directory layout of an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Content lives in `<instance>/content`.
    #[default]
    Standard,
    /// Content lives in `<instance>/app`.
    Bedrock,
}

/// Paths of an instance, without trailing slashes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstancePaths {
    pub instance: PathBuf,
    /// Directory holding `.env`: the parent of the instance.
    pub dotenv_dir: PathBuf,
    /// Core files directory.
    pub abs_path: PathBuf,
    pub content_path: PathBuf,
}

impl InstancePaths {
    pub fn new(instance: impl Into<PathBuf>, layout: Layout) -> Self {
        let instance = instance.into();
        let dotenv_dir = instance
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| instance.clone());
        let content_dir = match layout {
            Layout::Standard => "content",
            Layout::Bedrock => "app",
        };
        Self {
            abs_path: instance.join("wp"),
            content_path: instance.join(content_dir),
            dotenv_dir,
            instance,
        }
    }
}

/// The configured entry point an instance's config file invokes.
pub struct EnvLayer {
    dotenv_dir: PathBuf,
    orchestrator: Orchestrator,
}

impl EnvLayer {
    /// Custom composition.
    pub fn new(dotenv_dir: impl Into<PathBuf>, layers: Vec<Arc<dyn Layer>>) -> Self {
        Self {
            dotenv_dir: dotenv_dir.into(),
            orchestrator: Orchestrator::new(layers),
        }
    }

    pub fn create_with_defaults(instance: impl Into<PathBuf>) -> Self {
        Self::with_layout(instance, Layout::Standard)
    }

    pub fn create_with_bedrock_defaults(instance: impl Into<PathBuf>) -> Self {
        Self::with_layout(instance, Layout::Bedrock)
    }

    /// Default layers for `layout`.
    pub fn with_layout(instance: impl Into<PathBuf>, layout: Layout) -> Self {
        let paths = InstancePaths::new(instance, layout);
        let layers = default_layers(&paths);
        Self::new(paths.dotenv_dir, layers)
    }

    pub fn dotenv_dir(&self) -> &Path {
        &self.dotenv_dir
    }

    pub fn layers(&self) -> &[Arc<dyn Layer>] {
        self.orchestrator.layers()
    }

    /// Loads `.env`, resolves proxy facts and orchestrates every layer.
    ///
    /// Returns the request context as adjusted by the proxy resolver. Layers
    /// see the process environment first and the adjusted request facts as
    /// the fallback.
    ///
    /// # Errors
    ///
    /// Returns dotenv errors, proxy configuration errors, and the first error
    /// raised by an immediate layer.
    pub fn bootstrap(
        &self,
        request: RequestContext,
        host: &mut dyn Host,
    ) -> Result<RequestContext, ConfigError> {
        load_dotenv(&self.dotenv_dir)?;

        let request = resolve_proxy_facts(request.clone(), &Env::with_fallback(request.to_source()))?;
        let env = Arc::new(Env::with_fallback(request.to_source()));

        info!(layers = self.orchestrator.layers().len(), "bootstrapping layers");
        self.orchestrator.bootstrap(env, host)?;
        Ok(request)
    }
}
