use crate::config::Config;
use crate::error::Error;
use crate::rota::{FsDataSource, RotaHandle};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load the configuration and apply its locale
pub fn load_config() -> miette::Result<Config> {
    match Config::load() {
        Ok(config) => {
            crate::utils::i18n::set_locale(&config.locale);
            info!("Setting locale to {}", config.locale);
            Ok(config)
        }
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Load every dataset from the configured directory
pub async fn load_handle(config: &Config) -> miette::Result<RotaHandle> {
    let source = FsDataSource::new(&config.data_dir);
    match RotaHandle::load(&source, config.lookup_settings()).await {
        Ok(handle) => Ok(handle),
        Err(e) => {
            error!("Failed to load schedule data: {:?}", e);
            Err(e.into())
        }
    }
}
