use crate::error::AppError;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Resolve `<crate>/config` whether the process runs from the workspace root
/// or from inside the crate directory.
pub fn configuration_directory(crate_dir: &str) -> Result<PathBuf, AppError> {
    let base_path = std::env::current_dir()?;

    if base_path.ends_with(crate_dir) {
        Ok(base_path.join("config"))
    } else {
        Ok(base_path.join(crate_dir).join("config"))
    }
}

/// Load `base.yaml` from `directory`, then overlay `APP_`-prefixed environment
/// variables (`APP_SECTION__KEY`).
pub fn load_configuration<T: DeserializeOwned>(directory: &Path) -> Result<T, AppError> {
    dotenvy::dotenv().ok();

    let settings = config::Config::builder()
        .add_source(config::File::from(directory.join("base.yaml")).required(true))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize::<T>()?)
}
