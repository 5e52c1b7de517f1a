//! Configuration errors surface immediately instead of falling back to
//! defaults.

use std::ffi::{OsStr, OsString};
use std::fs;
use std::sync::{Mutex, MutexGuard};

use esm_config::Config;
use once_cell::sync::Lazy;
use ortho_config::OrthoConfig as _;
use tempfile::TempDir;

static ENV_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

struct EnvOverride {
    key: &'static str,
    previous: Option<OsString>,
    guard: Option<MutexGuard<'static, ()>>,
}

impl EnvOverride {
    fn set_var(key: &'static str, value: &OsStr) -> Self {
        let guard = ENV_MUTEX.lock().expect("env mutex poisoned");
        let previous = std::env::var_os(key);
        unsafe { std::env::set_var(key, value) };
        Self {
            key,
            previous,
            guard: Some(guard),
        }
    }

    fn lock_only() -> Self {
        let guard = ENV_MUTEX.lock().expect("env mutex poisoned");
        Self {
            key: "ESM_LOG_FORMAT",
            previous: std::env::var_os("ESM_LOG_FORMAT"),
            guard: Some(guard),
        }
    }
}

impl Drop for EnvOverride {
    fn drop(&mut self) {
        match self.previous.take() {
            Some(value) => unsafe { std::env::set_var(self.key, value) },
            None => unsafe { std::env::remove_var(self.key) },
        }
        drop(self.guard.take());
    }
}

fn args(extra: &[&OsStr]) -> Vec<OsString> {
    let mut args = vec![OsString::from("es")];
    args.extend(extra.iter().map(|value| value.to_os_string()));
    args
}

#[test]
fn malformed_config_file_is_rejected() {
    let _lock = EnvOverride::lock_only();
    let temp_dir = TempDir::new().expect("create temp dir");
    let path = temp_dir.path().join("esm.toml");
    fs::write(&path, "log_filter = \"info\" log_format =").expect("write malformed config");

    let result = Config::load_from_iter(args(&[
        OsStr::new("--config-path"),
        path.as_os_str(),
    ]));

    assert!(result.is_err(), "malformed TOML must fail to load");
}

#[test]
fn unknown_log_format_in_environment_is_rejected() {
    let _override = EnvOverride::set_var("ESM_LOG_FORMAT", OsStr::new("pretty"));

    let result = Config::load_from_iter(args(&[]));

    assert!(result.is_err(), "unknown log format must fail to load");
}

#[test]
fn unknown_log_format_on_command_line_is_rejected() {
    let _lock = EnvOverride::lock_only();

    let result = Config::load_from_iter(args(&[
        OsStr::new("--log-format"),
        OsStr::new("pretty"),
    ]));

    assert!(result.is_err(), "unknown log format must fail to load");
}
