use anyhow::{Context, Result};
use serde::Deserialize;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

const ENV_FILE: &str = ".env";
const PASSWORD_VAR: &str = "LINEUP_DASH_PASSWORD";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub thresholds: ThresholdConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    /// Season folder holding one CSV per game.
    #[serde(default = "default_folder")]
    pub folder: PathBuf,
    #[serde(default)]
    pub columns: ColumnConfig,
}

fn default_folder() -> PathBuf {
    PathBuf::from("game-csv-2023")
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            folder: default_folder(),
            columns: ColumnConfig::default(),
        }
    }
}

/// Header names in the game sheets.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ColumnConfig {
    #[serde(default = "default_lineup_col")]
    pub lineup: String,
    #[serde(default = "default_result_col")]
    pub result: String,
    #[serde(default = "default_role_col")]
    pub role: String,
    #[serde(default = "default_action_col")]
    pub action: String,
    #[serde(default = "default_transition_col")]
    pub transition: String,
}

fn default_lineup_col() -> String { "ON COURT".to_string() }
fn default_result_col() -> String { "Result".to_string() }
fn default_role_col() -> String { "O/D".to_string() }
fn default_action_col() -> String { "Half Court Action".to_string() }
fn default_transition_col() -> String { "Transition".to_string() }

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            lineup: default_lineup_col(),
            result: default_result_col(),
            role: default_role_col(),
            action: default_action_col(),
            transition: default_transition_col(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    #[serde(default = "default_min_possessions")]
    pub min_possessions: u32,
    /// Step used by the +/- keys.
    #[serde(default = "default_possession_step")]
    pub possession_step: u32,
}

fn default_min_possessions() -> u32 { 5 }
fn default_possession_step() -> u32 { 5 }

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            min_possessions: default_min_possessions(),
            possession_step: default_possession_step(),
        }
    }
}

/// Colour cut-offs for rate cells. At or above `good` renders green, at or
/// below `bad` renders red. Turnover % is inverted.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ThresholdConfig {
    #[serde(default = "default_fg")]
    pub fg_pct: Band,
    #[serde(default = "default_three")]
    pub three_pct: Band,
    #[serde(default = "default_ft")]
    pub ft_pct: Band,
    #[serde(default = "default_ppp")]
    pub ppp: Band,
    #[serde(default = "default_turnover")]
    pub turnover_pct: Band,
    #[serde(default = "default_off_reb")]
    pub off_reb_pct: Band,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct Band {
    pub good: f64,
    pub bad: f64,
}

fn default_fg() -> Band { Band { good: 50.0, bad: 40.0 } }
fn default_three() -> Band { Band { good: 36.0, bad: 28.0 } }
fn default_ft() -> Band { Band { good: 75.0, bad: 60.0 } }
fn default_ppp() -> Band { Band { good: 1.1, bad: 0.85 } }
fn default_turnover() -> Band { Band { good: 12.0, bad: 20.0 } }
fn default_off_reb() -> Band { Band { good: 30.0, bad: 20.0 } }

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            fg_pct: default_fg(),
            three_pct: default_three(),
            ft_pct: default_ft(),
            ppp: default_ppp(),
            turnover_pct: default_turnover(),
            off_reb_pct: default_off_reb(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .with_context(|| "Failed to parse config TOML")?;
        Ok(config)
    }

    /// Load .env file into process environment. Real env vars take precedence.
    pub fn load_env_file() {
        let path = Path::new(ENV_FILE);
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return,
        };
        // Strip BOM if present (common on Windows-created files)
        let content = content.strip_prefix('\u{feff}').unwrap_or(&content);
        for line in content.lines() {
            let line = line.trim().trim_matches('\r');
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                let value = value.trim().trim_matches('"').trim_matches('\'');
                if std::env::var(key).is_err() {
                    std::env::set_var(key, value);
                }
            }
        }
    }

    /// Dashboard password from the environment, if one is configured.
    pub fn dashboard_password() -> Option<String> {
        match std::env::var(PASSWORD_VAR) {
            Ok(p) if !p.is_empty() => Some(sanitize_secret(&p)),
            _ => None,
        }
    }

    /// Ask for the dashboard password when one is configured. No password
    /// set means the gate is open.
    pub fn check_password() -> Result<()> {
        let Some(expected) = Self::dashboard_password() else {
            return Ok(());
        };
        // stderr keeps the prompt out of `--json` output on stdout.
        gate(&expected, &mut io::stdin().lock(), &mut io::stderr())
    }
}

fn password_matches(expected: &str, entered: &str) -> bool {
    sanitize_secret(entered) == expected
}

fn gate<R: BufRead, W: Write>(expected: &str, input: &mut R, out: &mut W) -> Result<()> {
    let entered = prompt("Dashboard password", input, out)?;
    if !password_matches(expected, &entered) {
        anyhow::bail!("incorrect dashboard password");
    }
    Ok(())
}

fn prompt<R: BufRead, W: Write>(label: &str, input: &mut R, out: &mut W) -> Result<String> {
    write!(out, "  {} > ", label)?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    let value = line.trim().to_string();
    if value.is_empty() {
        anyhow::bail!("{} cannot be empty", label);
    }
    Ok(value)
}

/// Strip carriage returns, BOM, and other invisible chars from a secret.
fn sanitize_secret(raw: &str) -> String {
    raw.replace(['\r', '\u{feff}', '\u{200b}'], "")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_parses() {
        let config = Config::load(Path::new("config.toml")).unwrap();
        assert_eq!(config.data.columns.lineup, "ON COURT");
        assert_eq!(config.data.columns.result, "Result");
        assert_eq!(config.dashboard.min_possessions, 5);
        assert_eq!(config.thresholds.fg_pct.good, 50.0);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.data.folder, PathBuf::from("game-csv-2023"));
        assert_eq!(config.data.columns, ColumnConfig::default());
        assert_eq!(config.dashboard.possession_step, 5);
        assert_eq!(config.thresholds, ThresholdConfig::default());
    }

    #[test]
    fn test_partial_sections() {
        let config = Config::parse(
            r#"
            [data]
            folder = "game-csv-2024"

            [data.columns]
            role = "Side"

            [thresholds.ppp]
            good = 1.2
            bad = 0.9
            "#,
        )
        .unwrap();
        assert_eq!(config.data.folder, PathBuf::from("game-csv-2024"));
        assert_eq!(config.data.columns.role, "Side");
        assert_eq!(config.data.columns.result, "Result");
        assert_eq!(config.thresholds.ppp, Band { good: 1.2, bad: 0.9 });
        assert_eq!(config.thresholds.fg_pct, default_fg());
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        assert!(Config::parse("[dashboard\nmin_possessions = ").is_err());
    }

    #[test]
    fn test_gate_writes_prompt_only_to_given_writer() {
        let mut out = Vec::new();
        gate("hoops", &mut "hoops\n".as_bytes(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "  Dashboard password > ");

        let mut out: Vec<u8> = Vec::new();
        assert!(gate("hoops", &mut "airball\n".as_bytes(), &mut out).is_err());
        assert!(gate("hoops", &mut "\n".as_bytes(), &mut Vec::<u8>::new()).is_err());
    }

    #[test]
    fn test_password_comparison_ignores_invisible_chars() {
        assert!(password_matches("hoops", "hoops\r"));
        assert!(password_matches("hoops", "\u{feff}hoops"));
        assert!(!password_matches("hoops", "Hoops"));
    }
}
