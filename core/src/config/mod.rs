mod load;
mod types;

pub use load::{
    apply_env_overrides, get_prefixout_data_dir, load_default, load_from, CONFIG_FILE_NAME,
    LOCAL_CONFIG_FILE_NAME,
};
pub use types::{AppConfig, ColorMode, LoggingConfig, OutputConfig, RelayConfig};
