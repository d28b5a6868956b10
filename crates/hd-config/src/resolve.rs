//! Model resolution: explicit path → environment → XDG config → embedded default.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::model::ModelConfig;
use crate::validate::ValidationResult;

/// Environment variable naming a model file.
pub const MODEL_ENV_VAR: &str = "HEREDITY_MODEL";

/// File name looked up under `<config dir>/heredity/`.
pub const MODEL_FILE_NAME: &str = "model.json";

/// Where the resolved model came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSource {
    Explicit(PathBuf),
    Env(PathBuf),
    Xdg(PathBuf),
    Embedded,
}

impl fmt::Display for ModelSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelSource::Explicit(p) => write!(f, "explicit:{}", p.display()),
            ModelSource::Env(p) => write!(f, "env:{}", p.display()),
            ModelSource::Xdg(p) => write!(f, "xdg:{}", p.display()),
            ModelSource::Embedded => write!(f, "embedded"),
        }
    }
}

/// Resolve and validate the model using the process environment.
pub fn resolve_model(explicit: Option<&Path>) -> ValidationResult<(ModelConfig, ModelSource)> {
    resolve_model_with(
        explicit,
        std::env::var_os(MODEL_ENV_VAR),
        dirs::config_dir(),
    )
}

/// Resolve and validate the model from explicit inputs.
///
/// An explicit or environment path must exist; the XDG file is optional and
/// falls through to the embedded default when absent.
pub fn resolve_model_with(
    explicit: Option<&Path>,
    env_path: Option<OsString>,
    config_dir: Option<PathBuf>,
) -> ValidationResult<(ModelConfig, ModelSource)> {
    let (model, source) = if let Some(path) = explicit {
        (
            ModelConfig::from_file(path)?,
            ModelSource::Explicit(path.to_path_buf()),
        )
    } else if let Some(path) = env_path.filter(|p| !p.is_empty()).map(PathBuf::from) {
        (ModelConfig::from_file(&path)?, ModelSource::Env(path))
    } else {
        match config_dir
            .map(|dir| dir.join("heredity").join(MODEL_FILE_NAME))
            .filter(|p| p.is_file())
        {
            Some(path) => (ModelConfig::from_file(&path)?, ModelSource::Xdg(path)),
            None => (ModelConfig::default(), ModelSource::Embedded),
        }
    };

    Ok((model.validated()?, source))
}
