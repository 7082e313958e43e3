use std::cell::RefCell;
use std::path::{Path, PathBuf};

use tosec_dat::RecordSkipped;
use tosec_db::*;
use tosec_import::*;

const C64_DAT: &str = r#"header (
	name "Commodore C64 - Games - [D64]"
	description "Commodore C64 - Games - [D64] (TOSEC-v2023-01-01_CM)"
	category "TOSEC"
	version 2023-01-01
	author "Cassiel"
)

game (
	name "1942 (1986)(Elite)"
	description "1942 (1986)(Elite)"
	rom ( name "1942 (1986)(Elite).d64" size 174848 crc 0a1b2c3d md5 4187a797e33bc96a96993220da6f09f7 )
)

game (
	name "Barbarian (1987)(Palace)"
	description "Barbarian (1987)(Palace)"
	rom ( name "Barbarian (1987)(Palace).d64" size 174848 crc 3d564757 )
)
"#;

const AMIGA_DAT_WITH_BAD_ROM: &str = r#"header (
	name "Commodore Amiga - Games - [ADF]"
	version 2023-01-01
)

game (
	name "Lemmings (1991)(Psygnosis)"
	rom ( name "Lemmings (1991)(Psygnosis)(Disk 1 of 2).adf" size 901120 crc 11111111 )
	rom ( name "Lemmings (1991)(Psygnosis)(Disk 2 of 2).adf" size 901120 crc 22222222 )
)

game (
	name "No Checksum (1990)(Nobody)"
	rom ( name "No Checksum (1990)(Nobody).adf" size 901120 )
)

game (
	name "Turrican (1990)(Rainbow Arts)"
	rom ( name "Turrican (1990)(Rainbow Arts).adf" size 901120 crc 33333333 )
)
"#;

/// Records every notification for later inspection.
#[derive(Default)]
struct RecordingProgress {
    events: RefCell<Vec<String>>,
}

impl RecordingProgress {
    fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }
}

fn file_name(path: &Path) -> String {
    path.file_name().unwrap().to_string_lossy().into_owned()
}

impl ImportProgress for RecordingProgress {
    fn on_file(&self, current: usize, total: usize, path: &Path) {
        self.events
            .borrow_mut()
            .push(format!("file {current}/{total} {}", file_name(path)));
    }

    fn on_skipped(&self, path: &Path, skipped: &RecordSkipped) {
        self.events
            .borrow_mut()
            .push(format!("skipped {} {}", file_name(path), skipped.game));
    }

    fn on_file_failed(&self, path: &Path, _error: &ImportError) {
        self.events
            .borrow_mut()
            .push(format!("failed {}", file_name(path)));
    }

    fn on_file_done(&self, path: &Path, stats: &FileStats) {
        self.events
            .borrow_mut()
            .push(format!("done {} {}", file_name(path), stats.games));
    }

    fn on_complete(&self, summary: &BatchSummary) {
        self.events
            .borrow_mut()
            .push(format!("complete {}/{}", summary.files_imported, summary.files_total));
    }
}

fn write_dat(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn config_for(root: &Path) -> ImportConfig {
    ImportConfig::new(root).with_db_path(root.join("unused.db"))
}

#[test]
fn import_minimal_file() {
    let conn = open_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = write_dat(
        dir.path(),
        "min.dat",
        "header ( name \"Test\" description \"Desc\" category \"Cat\" version \"1.0\" author \"Me\" )\n\
         game ( name \"G1\" description \"D1\" rom ( name \"f.rom\" size 1024 crc abcd1234 ) )\n",
    );

    let importer = Importer::new(&conn, config_for(dir.path()));
    let stats = importer.import_file(&path).unwrap();
    assert_eq!(stats.games, 1);
    assert_eq!(stats.roms, 1);

    let category = find_category(&conn, stats.category_id).unwrap().unwrap();
    assert_eq!(category.name, "Test");
    assert_eq!(category.description, "Desc");
    assert_eq!(category.category, "Cat");
    assert_eq!(category.version, "1.0");
    assert_eq!(category.author, "Me");
    assert_eq!(category.source_path.as_deref(), Some(path.to_str().unwrap()));

    let games = games_for_category(&conn, stats.category_id).unwrap();
    assert_eq!(games[0].name, "G1");
    assert_eq!(games[0].description, "D1");

    let roms = roms_for_game(&conn, games[0].id).unwrap();
    assert_eq!(roms.len(), 1);
    assert_eq!(roms[0].name, "f.rom");
    assert_eq!(roms[0].size, 1024);
    assert_eq!(roms[0].crc, "abcd1234");
    assert_eq!(roms[0].md5, "");
    assert_eq!(roms[0].sha1, "");
}

#[test]
fn second_file_skip_does_not_affect_first() {
    let conn = open_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let c64 = write_dat(dir.path(), "c64.dat", C64_DAT);
    let amiga = write_dat(dir.path(), "amiga.dat", AMIGA_DAT_WITH_BAD_ROM);

    let progress = RecordingProgress::default();
    let importer = Importer::new(&conn, config_for(dir.path())).with_progress(&progress);
    let summary = importer.run(vec![c64, amiga]).unwrap();

    assert!(summary.is_success());
    assert_eq!(summary.files_imported, 2);
    assert_eq!(summary.games, 4);
    assert_eq!(summary.roms, 5);
    assert_eq!(summary.skipped, 1);

    let categories = list_categories(&conn).unwrap();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0].category.name, "Commodore C64 - Games - [D64]");
    assert_eq!(categories[0].game_count, 2);
    assert_eq!(categories[1].game_count, 2);

    let amiga_games: Vec<_> = games_for_category(&conn, categories[1].category.id)
        .unwrap()
        .into_iter()
        .map(|g| g.name)
        .collect();
    assert_eq!(
        amiga_games,
        ["Lemmings (1991)(Psygnosis)", "Turrican (1990)(Rainbow Arts)"]
    );

    assert_eq!(
        progress.events(),
        [
            "file 1/2 c64.dat",
            "done c64.dat 2",
            "file 2/2 amiga.dat",
            "skipped amiga.dat No Checksum (1990)(Nobody)",
            "done amiga.dat 2",
            "complete 2/2",
        ]
    );
}

#[test]
fn truncated_file_fails_without_rows_and_batch_continues() {
    let conn = open_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let broken = write_dat(
        dir.path(),
        "broken.dat",
        "header ( name \"Broken\" )\ngame (\n\tname \"Half\"\n\trom ( name h.bin size 1 crc 1 )\n",
    );
    let good = write_dat(dir.path(), "c64.dat", C64_DAT);

    let progress = RecordingProgress::default();
    let importer = Importer::new(&conn, config_for(dir.path())).with_progress(&progress);

    let err = importer.import_file(&broken).unwrap_err();
    assert!(matches!(
        err,
        ImportError::Parse {
            source: tosec_dat::DatError::UnclosedBlock { .. },
            ..
        }
    ));
    assert_eq!(catalog_stats(&conn).unwrap(), CatalogStats::default());

    let summary = importer.run(vec![broken.clone(), good]).unwrap();
    assert_eq!(summary.files_imported, 1);
    assert_eq!(summary.files_failed(), 1);
    assert_eq!(summary.failures[0].0, broken);
    assert_eq!(catalog_stats(&conn).unwrap().categories, 1);
    assert!(progress.events().contains(&"failed broken.dat".to_string()));
}

#[test]
fn store_failure_mid_file_rolls_back_everything() {
    let conn = open_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();
    // Two roms with the same name in one game violate UNIQUE(game_id, name)
    // after the category and the first game were already written.
    let path = write_dat(
        dir.path(),
        "dupe.dat",
        r#"header ( name "Dupes" )
game ( name "Fine" rom ( name a.bin size 1 crc 00000001 ) )
game ( name "Dupe" rom ( name b.bin size 1 crc 00000002 ) rom ( name b.bin size 1 crc 00000003 ) )
"#,
    );

    let importer = Importer::new(&conn, config_for(dir.path()));
    let err = importer.import_file(&path).unwrap_err();
    assert!(err.is_validation());
    assert!(!err.is_fatal_to_run());
    assert_eq!(catalog_stats(&conn).unwrap(), CatalogStats::default());
}

#[test]
fn log_progress_reports_mixed_batch() {
    let conn = open_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let c64 = write_dat(dir.path(), "c64.dat", C64_DAT);
    let amiga = write_dat(dir.path(), "amiga.dat", AMIGA_DAT_WITH_BAD_ROM);
    let missing = dir.path().join("missing.dat");

    let importer = Importer::new(&conn, config_for(dir.path())).with_progress(&LogProgress);
    let summary = importer.run(vec![c64, missing.clone(), amiga]).unwrap();

    assert_eq!(summary.files_total, 3);
    assert_eq!(summary.files_imported, 2);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].0, missing);
    assert_eq!(catalog_stats(&conn).unwrap().categories, 2);
}

#[test]
fn missing_header_name_is_validation_error() {
    let conn = open_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = write_dat(
        dir.path(),
        "noheader.dat",
        "game ( name \"G\" rom ( name g.bin size 1 crc 1 ) )\n",
    );

    let importer = Importer::new(&conn, config_for(dir.path()));
    let err = importer.import_file(&path).unwrap_err();
    assert!(matches!(err, ImportError::Validation(_)));
    assert!(err.is_validation());
    assert_eq!(catalog_stats(&conn).unwrap(), CatalogStats::default());
}

#[test]
fn empty_game_list_creates_category_only() {
    let conn = open_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = write_dat(dir.path(), "empty.dat", "header ( name \"Empty\" )\n");

    let importer = Importer::new(&conn, config_for(dir.path()));
    let stats = importer.import_file(&path).unwrap();
    assert_eq!(stats.games, 0);
    assert_eq!(
        catalog_stats(&conn).unwrap(),
        CatalogStats {
            categories: 1,
            games: 0,
            roms: 0
        }
    );
}

#[test]
fn reimport_creates_second_category() {
    let conn = open_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = write_dat(dir.path(), "c64.dat", C64_DAT);

    let importer = Importer::new(&conn, config_for(dir.path()));
    let first = importer.import_file(&path).unwrap();
    let second = importer.import_file(&path).unwrap();

    assert_ne!(first.category_id, second.category_id);
    assert_eq!(
        catalog_stats(&conn).unwrap(),
        CatalogStats {
            categories: 2,
            games: 4,
            roms: 4
        }
    );
}

#[test]
fn default_scan_reads_base_directory_only() {
    let conn = open_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("TOSEC");
    std::fs::create_dir_all(base.join("nested")).unwrap();
    write_dat(&base, "b.dat", AMIGA_DAT_WITH_BAD_ROM);
    write_dat(&base, "a.dat", C64_DAT);
    write_dat(&base.join("nested"), "ignored.dat", C64_DAT);

    let importer = Importer::new(&conn, config_for(dir.path()));
    let inputs = importer.resolve_inputs(Vec::new()).unwrap();
    assert_eq!(inputs, vec![base.join("a.dat"), base.join("b.dat")]);

    let summary = importer.run(Vec::new()).unwrap();
    assert_eq!(summary.files_total, 2);
    assert_eq!(summary.files_imported, 2);
}

#[test]
fn explicit_paths_bypass_base_directory() {
    let conn = open_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = write_dat(dir.path(), "c64.dat", C64_DAT);

    // No TOSEC directory exists, but explicit inputs don't need it
    let importer = Importer::new(&conn, config_for(dir.path()));
    let summary = importer.run(vec![path]).unwrap();
    assert_eq!(summary.files_imported, 1);
}

#[test]
fn missing_base_directory_is_configuration_error() {
    let conn = open_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();

    let progress = RecordingProgress::default();
    let importer = Importer::new(&conn, config_for(dir.path())).with_progress(&progress);
    let err = importer.run(Vec::new()).unwrap_err();

    match &err {
        ImportError::Configuration { path } => assert_eq!(path, &dir.path().join("TOSEC")),
        other => panic!("expected Configuration, got {other:?}"),
    }
    assert!(err.is_fatal_to_run());
    assert!(progress.events().is_empty());
}

#[test]
fn unreadable_file_is_reported_and_skipped() {
    let conn = open_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.dat");
    let good = write_dat(dir.path(), "c64.dat", C64_DAT);

    let importer = Importer::new(&conn, config_for(dir.path()));
    let summary = importer.run(vec![missing.clone(), good]).unwrap();
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].0, missing);
    assert_eq!(summary.files_imported, 1);
}

#[test]
fn import_dat_writes_parsed_records() {
    let conn = open_memory().unwrap();
    let dat = tosec_dat::parse_dat_str(AMIGA_DAT_WITH_BAD_ROM).unwrap();

    let stats = import_dat(&conn, &dat, None).unwrap();
    assert_eq!(
        stats,
        FileStats {
            category_id: stats.category_id,
            games: 2,
            roms: 3,
            skipped: 1,
        }
    );

    let category = find_category(&conn, stats.category_id).unwrap().unwrap();
    assert_eq!(category.source_path, None);

    let lemmings = &games_for_category(&conn, stats.category_id).unwrap()[0];
    let roms: Vec<_> = roms_for_game(&conn, lemmings.id)
        .unwrap()
        .into_iter()
        .map(|r| r.crc)
        .collect();
    assert_eq!(roms, ["11111111", "22222222"]);
}

#[test]
fn xml_dat_imports_like_text() {
    let conn = open_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = write_dat(
        dir.path(),
        "c64.xml.dat",
        r#"<?xml version="1.0"?>
<datafile>
    <header><name>Commodore C64 - Games</name><version>2023</version></header>
    <game name="1942 (1986)(Elite)">
        <description>1942 (1986)(Elite)</description>
        <rom name="1942 (1986)(Elite).d64" size="174848" crc="0A1B2C3D"/>
    </game>
</datafile>"#,
    );

    let importer = Importer::new(&conn, config_for(dir.path()));
    let stats = importer.import_file(&path).unwrap();
    assert_eq!(stats.games, 1);
    assert_eq!(find_roms_by_crc(&conn, "0a1b2c3d").unwrap().len(), 1);
}
