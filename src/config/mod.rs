use std::{
    collections::HashMap,
    env,
    fs,
    io::{BufRead, BufReader},
    ops::Range,
    path::{Path, PathBuf},
};

use directories::BaseDirs;

/// Layered settings: built-in defaults, then `.sedovrc`, then environment.
#[derive(Debug, Clone)]
pub struct Config {
    inner: HashMap<String, String>,
    pub config_path: PathBuf,
}

impl Config {
    pub fn load() -> Self {
        let config_path = default_config_path();
        let mut cfg = Self::from_file(&config_path);

        // Overlay environment variables (take precedence)
        for (k, v) in env::vars() {
            if is_config_key(&k) {
                cfg.inner.insert(k, v);
            }
        }

        cfg
    }

    /// Defaults overlaid with the rc file at `path`, without consulting the environment.
    pub fn from_file(path: &Path) -> Self {
        let mut map = default_map();
        if let Ok(file) = fs::File::open(path) {
            let reader = BufReader::new(file);
            for line in reader.lines().map_while(Result::ok) {
                if let Some((k, v)) = parse_line(&line) {
                    map.insert(k, v);
                }
            }
        }
        Self { inner: map, config_path: path.to_path_buf() }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key).cloned()
    }

    #[cfg(test)]
    pub fn set(&mut self, key: &str, value: &str) {
        self.inner.insert(key.to_string(), value.to_string());
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(|v| v.trim().parse::<f64>().ok())
    }

    fn get_or_default(&self, key: &str) -> String {
        self.get(key)
            .filter(|v| !v.trim().is_empty())
            .or_else(|| default_map().remove(key))
            .unwrap_or_default()
    }

    pub fn build_subdir(&self) -> PathBuf {
        PathBuf::from(self.get_or_default("SEDOV_BUILD_SUBDIR"))
    }

    /// Build program followed by its leading arguments.
    pub fn build_command(&self) -> Vec<String> {
        let cmd: Vec<String> = self
            .get_or_default("SEDOV_BUILD_CMD")
            .split_whitespace()
            .map(str::to_string)
            .collect();
        if cmd.is_empty() {
            vec!["make".to_string()]
        } else {
            cmd
        }
    }

    pub fn program(&self) -> String {
        self.get_or_default("SEDOV_PROGRAM")
    }

    /// Falls back to the program target when no explicit prefix is set.
    pub fn exe_prefix(&self) -> String {
        self.get("SEDOV_EXE_PREFIX")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| self.program())
    }

    pub fn exe_suffix(&self) -> String {
        self.get_or_default("SEDOV_EXE_SUFFIX")
    }

    pub fn analytic_path(&self) -> PathBuf {
        PathBuf::from(self.get_or_default("SEDOV_ANALYTIC_PATH"))
    }

    pub fn profile_out(&self) -> PathBuf {
        PathBuf::from(self.get_or_default("SEDOV_PROFILE_OUT"))
    }

    pub fn figure_out(&self) -> PathBuf {
        PathBuf::from(self.get_or_default("SEDOV_FIGURE_OUT"))
    }

    pub fn x_range(&self) -> Range<f64> {
        let lo = self.get_f64("SEDOV_X_MIN").unwrap_or(DEFAULT_X_MIN);
        let hi = self.get_f64("SEDOV_X_MAX").unwrap_or(DEFAULT_X_MAX);
        if lo.is_finite() && hi.is_finite() && lo < hi {
            lo..hi
        } else {
            DEFAULT_X_MIN..DEFAULT_X_MAX
        }
    }
}

const DEFAULT_X_MIN: f64 = 0.0;
const DEFAULT_X_MAX: f64 = 0.4;

fn parse_line(line: &str) -> Option<(String, String)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let (k, v) = line.split_once('=')?;
    let k = k.trim();
    if !is_config_key(k) {
        return None;
    }
    Some((k.to_string(), v.trim().to_string()))
}

fn is_config_key(k: &str) -> bool {
    const KEYS: &[&str] = &[
        "SEDOV_BUILD_SUBDIR",
        "SEDOV_BUILD_CMD",
        "SEDOV_PROGRAM",
        "SEDOV_EXE_PREFIX",
        "SEDOV_EXE_SUFFIX",
        "SEDOV_ANALYTIC_PATH",
        "SEDOV_PROFILE_OUT",
        "SEDOV_FIGURE_OUT",
        "SEDOV_X_MIN",
        "SEDOV_X_MAX",
    ];

    KEYS.contains(&k)
}

fn default_config_path() -> PathBuf {
    let base = BaseDirs::new()
        .map(|b| b.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.config"));
    base.join("sedov_verify").join(".sedovrc")
}

fn default_map() -> HashMap<String, String> {
    let mut m = HashMap::new();

    // Build
    m.insert("SEDOV_BUILD_SUBDIR".into(), "Diagnostics/Sedov".into());
    m.insert("SEDOV_BUILD_CMD".into(), "make".into());
    m.insert("SEDOV_PROGRAM".into(), "fsedov2d_cyl_in_cartcoords".into());
    m.insert("SEDOV_EXE_SUFFIX".into(), ".exe".into());

    // Data files
    m.insert(
        "SEDOV_ANALYTIC_PATH".into(),
        "Exec/Sedov/Verification/cylindrical_sedov.dat".into(),
    );
    m.insert("SEDOV_PROFILE_OUT".into(), "sedov_2d_cyl_in_cart.out".into());
    m.insert("SEDOV_FIGURE_OUT".into(), "sedov_2d_cyl_in_cart.png".into());

    // Plot window
    m.insert("SEDOV_X_MIN".into(), DEFAULT_X_MIN.to_string());
    m.insert("SEDOV_X_MAX".into(), DEFAULT_X_MAX.to_string());

    m
}
