use tosec_import::ImportConfig;
use tosec_import::config::settings_path;

pub(crate) fn run_config(config: &ImportConfig) {
    log::info!("Settings file: {}", settings_path().display());
    log::info!("DAT root:      {}", config.dat_root.display());
    log::info!("Catalog dir:   {}", config.base_dir().display());
    log::info!("Database:      {}", config.db_path.display());
}
