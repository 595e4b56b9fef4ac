use std::path::PathBuf;

use markpad::config::{ConfigFlags, ThemeMode, load_config_flags, parse_flag_tokens};

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".markpadrc");
    let content = r#"
# comment
--no-autosave

--theme dark

--export-dir=exports
"#;
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.no_autosave);
    assert_eq!(flags.theme, Some(ThemeMode::Dark));
    assert_eq!(flags.export_dir, Some(PathBuf::from("exports")));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".markpadrc");
    let content = "--no-autosave\n--theme light\n--storage file.json\n";
    std::fs::write(&path, content).unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "markpad".to_string(),
        "--theme".to_string(),
        "dark".to_string(),
        "--log-file".to_string(),
        "run.log".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.no_autosave, "file flags should remain enabled");
    assert_eq!(
        effective.log_file,
        Some(PathBuf::from("run.log")),
        "cli flags should be applied"
    );
    assert_eq!(effective.theme, Some(ThemeMode::Dark), "cli should override theme");
    assert_eq!(
        effective.storage,
        Some(PathBuf::from("file.json")),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_local_config_overrides_global() {
    let dir = tempfile::tempdir().unwrap();
    let global = dir.path().join("config");
    let local = dir.path().join(".markpadrc");
    std::fs::write(&global, "--theme dark\n--export-dir global-out\n").unwrap();
    std::fs::write(&local, "--export-dir local-out\n").unwrap();

    let effective =
        load_config_flags(&global).unwrap().union(&load_config_flags(&local).unwrap());
    assert_eq!(effective.theme, Some(ThemeMode::Dark));
    assert_eq!(effective.export_dir, Some(PathBuf::from("local-out")));
}

#[test]
fn test_config_union_merges_booleans() {
    let file = ConfigFlags {
        no_autosave: true,
        ..ConfigFlags::default()
    };
    let merged = file.union(&ConfigFlags::default());
    assert!(merged.no_autosave);
    assert!(!ConfigFlags::default().union(&ConfigFlags::default()).no_autosave);
}
