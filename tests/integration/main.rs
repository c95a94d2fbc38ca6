//! Integration tests for avakit

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn avakit(config: &Path) -> Command {
        let mut cmd = cargo_bin_cmd!("avakit");
        cmd.env("AVAKIT_CONFIG", config)
            .env("AVAKIT_PLAIN", "1")
            .env_remove("AVAKIT_API_KEY");
        cmd
    }

    /// Temp dir holding a config whose cache lives inside it
    fn sandbox(extra: &str) -> (TempDir, std::path::PathBuf) {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.toml");
        let cache_dir = temp.path().join("cache");
        let content = format!(
            "[cache]\ndir = {:?}\n{}\n",
            cache_dir.display().to_string(),
            extra
        );
        std::fs::write(&config_path, content).unwrap();
        (temp, config_path)
    }

    #[test]
    fn help_displays() {
        let temp = TempDir::new().unwrap();
        avakit(&temp.path().join("config.toml"))
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("API key validation"));
    }

    #[test]
    fn version_displays() {
        let temp = TempDir::new().unwrap();
        avakit(&temp.path().join("config.toml"))
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("avakit"));
    }

    #[test]
    fn platforms_lists_table() {
        let temp = TempDir::new().unwrap();
        avakit(&temp.path().join("config.toml"))
            .arg("platforms")
            .assert()
            .success()
            .stdout(predicate::str::contains("https://api.platformA.example/credits"))
            .stdout(predicate::str::contains("X-Api-Key"))
            .stdout(predicate::str::contains("xi-api-key"));
    }

    #[test]
    fn config_path() {
        let temp = TempDir::new().unwrap();
        avakit(&temp.path().join("config.toml"))
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show_defaults() {
        let temp = TempDir::new().unwrap();
        avakit(&temp.path().join("config.toml"))
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[validator]"))
            .stdout(predicate::str::contains("ttl_hours = 24"));
    }

    #[test]
    fn config_init_writes_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.toml");
        avakit(&path).args(["config", "init"]).assert().success();
        assert!(path.exists());
    }

    #[test]
    fn invalid_config_reports_hint() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[cache]\nttl_hours = \"forever\"\n").unwrap();

        avakit(&path)
            .arg("platforms")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration"))
            .stderr(predicate::str::contains("avakit config init --force"));
    }

    #[test]
    fn validate_blank_key_fails_without_network() {
        let temp = TempDir::new().unwrap();
        avakit(&temp.path().join("config.toml"))
            .args(["validate", "platformB", "--key", "   "])
            .assert()
            .failure()
            .stdout(predicate::str::contains("Please enter an API key"))
            .stderr(predicate::str::contains("VALIDATION"));
    }

    #[test]
    fn validate_blank_key_json() {
        let temp = TempDir::new().unwrap();
        avakit(&temp.path().join("config.toml"))
            .args(["validate", "platformC", "--key", "", "--format", "json"])
            .assert()
            .failure()
            .stdout(predicate::str::contains("\"is_valid\": false"))
            .stdout(predicate::str::contains("\"error_kind\": \"VALIDATION\""));
    }

    #[test]
    fn validate_unknown_platform() {
        let temp = TempDir::new().unwrap();
        avakit(&temp.path().join("config.toml"))
            .args(["validate", "platformZ", "--key", "abc"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown platform: platformZ"));
    }

    #[test]
    fn cache_ttl_follows_config() {
        let (_temp, config) = sandbox("ttl_hours = 6");
        avakit(&config)
            .args(["cache", "ttl"])
            .assert()
            .success()
            .stdout(predicate::str::diff("6\n"));
    }

    #[test]
    fn cache_import_show_clear() {
        let (temp, config) = sandbox("max_avatars = 2");
        let items = temp.path().join("avatars.json");
        std::fs::write(&items, r#"[{"id": "a"}, {"id": "b"}, {"id": "c"}]"#).unwrap();

        avakit(&config)
            .args(["cache", "import", "avatars", "platformA"])
            .arg(&items)
            .assert()
            .success()
            .stdout(predicate::str::contains("Cached 2 of 3"));

        avakit(&config)
            .args(["cache", "show", "avatars", "platformA", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"valid\": true"))
            .stdout(predicate::str::contains("\"id\": \"b\""))
            .stdout(predicate::str::contains("\"id\": \"c\"").not());

        avakit(&config)
            .args(["cache", "clear-all", "platformA", "--yes"])
            .assert()
            .success();

        avakit(&config)
            .args(["cache", "show", "avatars", "platformA", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"valid\": false"));
    }

    #[test]
    fn cache_import_rejects_non_array() {
        let (temp, config) = sandbox("");
        let items = temp.path().join("voices.json");
        std::fs::write(&items, r#"{"id": "a"}"#).unwrap();

        avakit(&config)
            .args(["cache", "import", "voices", "platformB"])
            .arg(&items)
            .assert()
            .failure()
            .stderr(predicate::str::contains("must contain a JSON array"));
    }

    #[test]
    fn cache_show_unknown_kind() {
        let (_temp, config) = sandbox("");
        avakit(&config)
            .args(["cache", "show", "videos", "platformA"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown resource kind"));
    }

    #[test]
    fn cache_show_survives_corrupt_entry() {
        let (temp, config) = sandbox("");
        let cache_dir = temp.path().join("cache");
        std::fs::create_dir_all(&cache_dir).unwrap();
        std::fs::write(cache_dir.join("voices_cache_platformB.json"), "{not json").unwrap();

        avakit(&config)
            .args(["cache", "show", "voices", "platformB", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"valid\": false"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn cache_override_leaves_state_dir_alone() {
        let (temp, config) = sandbox("");
        let state_home = temp.path().join("state");

        avakit(&config)
            .env("XDG_STATE_HOME", &state_home)
            .args(["cache", "clear", "avatars", "platformA"])
            .assert()
            .success();

        assert!(temp.path().join("cache").exists());
        assert!(!state_home.join("avakit").exists());
    }
}
