use std::path::PathBuf;

use tosec_import::ImportConfig;

#[test]
fn base_dir_is_tosec_subdirectory() {
    let config = ImportConfig::new("/srv/dats");
    assert_eq!(config.base_dir(), PathBuf::from("/srv/dats/TOSEC"));
}

#[test]
fn settings_file_supplies_paths() {
    let dir = tempfile::tempdir().unwrap();
    let settings = dir.path().join("settings.toml");
    std::fs::write(
        &settings,
        "[import]\ndat_path = \"/srv/dats\"\ndb_path = \"/srv/tosec.db\"\n",
    )
    .unwrap();

    let config = ImportConfig::resolve_with(&settings, None, None);
    assert_eq!(config.dat_root, PathBuf::from("/srv/dats"));
    assert_eq!(config.db_path, PathBuf::from("/srv/tosec.db"));
}

#[test]
fn overrides_beat_settings_file() {
    let dir = tempfile::tempdir().unwrap();
    let settings = dir.path().join("settings.toml");
    std::fs::write(&settings, "[import]\ndat_path = \"/srv/dats\"\n").unwrap();

    let config = ImportConfig::resolve_with(
        &settings,
        Some(PathBuf::from("/other")),
        Some(PathBuf::from("/other/db.sqlite")),
    );
    assert_eq!(config.dat_root, PathBuf::from("/other"));
    assert_eq!(config.db_path, PathBuf::from("/other/db.sqlite"));
}

#[test]
fn missing_or_malformed_settings_fall_back() {
    let dir = tempfile::tempdir().unwrap();
    let cwd = std::env::current_dir().unwrap();

    let config = ImportConfig::resolve_with(&dir.path().join("absent.toml"), None, None);
    assert_eq!(config.dat_root, cwd);
    assert_eq!(config.db_path, tosec_import::config::default_db_path());

    let bad = dir.path().join("bad.toml");
    std::fs::write(&bad, "this is = = not toml").unwrap();
    let config = ImportConfig::resolve_with(&bad, None, None);
    assert_eq!(config.dat_root, cwd);
}
