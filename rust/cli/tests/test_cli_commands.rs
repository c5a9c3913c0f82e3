use holdem_cli::config::{BUYIN_ENV, CONFIG_ENV, REBUY_CAP_ENV, SEATS_ENV, SEED_ENV};
use holdem_cli::run;
use serial_test::serial;

struct TempEnvVar {
    key: &'static str,
    previous: Option<String>,
}

impl TempEnvVar {
    fn set(key: &'static str, value: &str) -> Self {
        let previous = std::env::var(key).ok();
        // SAFETY: every test touching the environment runs under #[serial]
        unsafe { std::env::set_var(key, value) };
        Self { key, previous }
    }

    fn unset(key: &'static str) -> Self {
        let previous = std::env::var(key).ok();
        unsafe { std::env::remove_var(key) };
        Self { key, previous }
    }
}

impl Drop for TempEnvVar {
    fn drop(&mut self) {
        match &self.previous {
            Some(prev) => unsafe { std::env::set_var(self.key, prev) },
            None => unsafe { std::env::remove_var(self.key) },
        }
    }
}

fn clean_env() -> Vec<TempEnvVar> {
    [CONFIG_ENV, SEED_ENV, BUYIN_ENV, SEATS_ENV, REBUY_CAP_ENV]
        .into_iter()
        .map(TempEnvVar::unset)
        .collect()
}

fn run_cli(args: &[&str]) -> (i32, String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = run(args.iter().copied(), &mut out, &mut err);
    (
        code,
        String::from_utf8_lossy(&out).into_owned(),
        String::from_utf8_lossy(&err).into_owned(),
    )
}

#[test]
#[serial]
fn help_lists_expected_commands() {
    let (code, stdout, _) = run_cli(&["holdem", "--help"]);
    assert_eq!(code, 0);
    for cmd in ["play", "verify", "cfg"] {
        assert!(stdout.contains(cmd), "help should list subcommand `{}`", cmd);
    }
}

#[test]
#[serial]
fn cfg_shows_default_settings() {
    let _env = clean_env();
    let (code, stdout, _) = run_cli(&["holdem", "cfg"]);
    assert_eq!(code, 0);

    let v: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(v["buyin"]["value"], 100);
    assert_eq!(v["buyin"]["source"], "default");
    assert_eq!(v["small_blind"]["value"], 1);
    assert_eq!(v["big_blind"]["value"], 2);
    assert_eq!(v["seats"]["value"], 6);
    assert_eq!(v["rebuy_cap"]["value"], 1);
    assert!(v["seed"]["value"].is_null());
    assert_eq!(v["rebuy"]["value"]["reactivate"], true);
}

#[test]
#[serial]
fn env_overrides_file_and_file_overrides_defaults() {
    let _env = clean_env();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("table.toml");
    std::fs::write(&path, "buyin = 500\nseats = 4\nrebuy_cap = 3\n").unwrap();

    let _cfg = TempEnvVar::set(CONFIG_ENV, path.to_str().unwrap());
    let _seats = TempEnvVar::set(SEATS_ENV, "9");
    let _seed = TempEnvVar::set(SEED_ENV, "77");

    let (code, stdout, stderr) = run_cli(&["holdem", "cfg"]);
    assert_eq!(code, 0, "stderr: {}", stderr);
    let v: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(v["buyin"]["value"], 500);
    assert_eq!(v["buyin"]["source"], "file");
    assert_eq!(v["rebuy_cap"]["value"], 3);
    assert_eq!(v["rebuy_cap"]["source"], "file");
    assert_eq!(v["seats"]["value"], 9);
    assert_eq!(v["seats"]["source"], "env");
    assert_eq!(v["seed"]["value"], 77);
    assert_eq!(v["seed"]["source"], "env");
    assert_eq!(v["big_blind"]["source"], "default");
}

#[test]
#[serial]
fn rebuy_policy_can_be_set_from_file() {
    let _env = clean_env();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("table.toml");
    std::fs::write(
        &path,
        "[rebuy]\neligible = [\"SKIP\"]\nreactivate = false\n",
    )
    .unwrap();
    let _cfg = TempEnvVar::set(CONFIG_ENV, path.to_str().unwrap());

    let (code, stdout, stderr) = run_cli(&["holdem", "cfg"]);
    assert_eq!(code, 0, "stderr: {}", stderr);
    let v: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(v["rebuy"]["source"], "file");
    assert_eq!(v["rebuy"]["value"]["reactivate"], false);
}

#[test]
#[serial]
fn invalid_env_value_is_a_config_error() {
    let _env = clean_env();
    let _buyin = TempEnvVar::set(BUYIN_ENV, "lots");

    let (code, _, stderr) = run_cli(&["holdem", "cfg"]);
    assert_eq!(code, 2);
    assert!(stderr.contains(BUYIN_ENV), "stderr: {}", stderr);
}

#[test]
#[serial]
fn invalid_table_from_file_is_rejected() {
    let _env = clean_env();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("table.toml");
    std::fs::write(&path, "small_blind = 10\nbig_blind = 5\n").unwrap();
    let _cfg = TempEnvVar::set(CONFIG_ENV, path.to_str().unwrap());

    let (code, _, stderr) = run_cli(&["holdem", "cfg"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("small_blind"), "stderr: {}", stderr);
}

#[test]
#[serial]
fn unknown_arguments_exit_with_two() {
    let (code, _, stderr) = run_cli(&["holdem", "play", "--bogus"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("Commands:"));
}

#[test]
#[serial]
fn verify_requires_input() {
    let (code, _, stderr) = run_cli(&["holdem", "verify"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("input required"));
}
