//! Startup orchestration.
//!
//! # Responsibilities
//! - Load the optional config file and overlay command-line flags
//! - Validate the merged configuration
//! - Register every module pair and freeze the router
//!
//! # Design Decisions
//! - Fail fast: any error here is fatal and reported before binding
//! - Split in two so logging can start from the merged config before rules
//!   are registered
//! - Command-line pairs register before config-file modules

use thiserror::Error;

use crate::config::args::{Args, ArgsError};
use crate::config::loader::{load_config, ConfigError};
use crate::config::schema::{ModuleConfig, RedirectorConfig};
use crate::config::validation::{validate_config, ValidationError};
use crate::routing::{Router, RuleError, RuleRegistry};

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to load config file: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Args(#[from] ArgsError),

    #[error("invalid configuration: {}", join(.0))]
    Validation(Vec<ValidationError>),

    #[error("module {import_path:?}: {source}")]
    Rule {
        import_path: String,
        #[source]
        source: RuleError,
    },

    #[error("no modules configured; pass <import> <repo> pairs or use --config")]
    NoModules,
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load the config file (if any), overlay `args`, and validate the result.
pub fn configure(args: &Args) -> Result<RedirectorConfig, StartupError> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => RedirectorConfig::default(),
    };
    args.apply(&mut config);
    validate_config(&config).map_err(StartupError::Validation)?;
    Ok(config)
}

/// Register command-line pairs, then `config` modules, into a frozen router.
pub fn compile(args: &Args, config: &RedirectorConfig) -> Result<Router, StartupError> {
    let modules: Vec<ModuleConfig> = args
        .modules()?
        .into_iter()
        .chain(config.modules.iter().cloned())
        .collect();
    build_router(&modules, &config.redirect.vcs)
}

/// Register `modules` in order and freeze them with the default `vcs`.
pub fn build_router(modules: &[ModuleConfig], vcs: &str) -> Result<Router, StartupError> {
    let mut registry = RuleRegistry::new();
    for module in modules {
        registry
            .register(&module.import_path, &module.repo_path)
            .map_err(|source| StartupError::Rule {
                import_path: module.import_path.clone(),
                source,
            })?;
    }
    if registry.is_empty() {
        return Err(StartupError::NoModules);
    }
    Ok(Router::new(registry.finalize(), vcs))
}
