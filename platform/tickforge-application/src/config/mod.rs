use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tickforge_domain::services::price_path::PricePathConfig;
use tickforge_domain::services::schedule::TickSchedule;
use tickforge_domain::services::symbols::DEFAULT_SYMBOL_PREFIX;

pub const DEFAULT_OUT: &str = "ticks.csv";
pub const DEFAULT_SYMBOLS: usize = 100;
pub const DEFAULT_DAYS: u32 = 7;
pub const DEFAULT_RATE: u32 = 24;

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub generator: GeneratorConfig,
    pub price: Option<PriceConfig>,
    pub volume: Option<VolumeConfig>,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    pub out: Option<String>,
    pub symbols: Option<usize>,
    pub days: Option<u32>,
    pub rate: Option<u32>,
    pub seed: Option<u64>,
    pub symbol_prefix: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PriceConfig {
    pub initial_min: Option<f64>,
    pub initial_max: Option<f64>,
    pub step_min: Option<f64>,
    pub step_max: Option<f64>,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct VolumeConfig {
    pub min: Option<u32>,
    pub max: Option<u32>,
}

pub fn load_config(path: &Path) -> Result<Config, String> {
    let contents = fs::read_to_string(path)
        .map_err(|err| format!("failed to read config {}: {}", path.display(), err))?;
    toml::from_str(&contents)
        .map_err(|err| format!("failed to parse TOML {}: {}", path.display(), err))
}

/// Values given on the command line. They win over the config file.
#[derive(Debug, Clone, Default)]
pub struct GenerateOverrides {
    pub out: Option<PathBuf>,
    pub symbols: Option<usize>,
    pub days: Option<u32>,
    pub rate: Option<u32>,
    pub seed: Option<u64>,
}

/// Fully resolved inputs of one generator run.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateSettings {
    pub out: PathBuf,
    pub symbols: usize,
    pub schedule: TickSchedule,
    pub seed: Option<u64>,
    pub symbol_prefix: String,
    pub price_path: PricePathConfig,
}

impl Default for GenerateSettings {
    fn default() -> Self {
        Self {
            out: PathBuf::from(DEFAULT_OUT),
            symbols: DEFAULT_SYMBOLS,
            schedule: TickSchedule::new(DEFAULT_DAYS, DEFAULT_RATE),
            seed: None,
            symbol_prefix: DEFAULT_SYMBOL_PREFIX.to_string(),
            price_path: PricePathConfig::default(),
        }
    }
}

impl GenerateSettings {
    /// Precedence: overrides, then the config file, then defaults.
    pub fn resolve(config: Option<&Config>, overrides: &GenerateOverrides) -> Result<Self, String> {
        let defaults = Self::default();
        let file = config.cloned().unwrap_or_default();
        let generator = file.generator;
        let price = file.price.unwrap_or_default();
        let volume = file.volume.unwrap_or_default();
        let base_path = defaults.price_path;

        let settings = Self {
            out: overrides
                .out
                .clone()
                .or_else(|| generator.out.map(PathBuf::from))
                .unwrap_or(defaults.out),
            symbols: overrides
                .symbols
                .or(generator.symbols)
                .unwrap_or(defaults.symbols),
            schedule: TickSchedule::new(
                overrides
                    .days
                    .or(generator.days)
                    .unwrap_or(defaults.schedule.days),
                overrides
                    .rate
                    .or(generator.rate)
                    .unwrap_or(defaults.schedule.rate),
            ),
            seed: overrides.seed.or(generator.seed),
            symbol_prefix: generator.symbol_prefix.unwrap_or(defaults.symbol_prefix),
            price_path: PricePathConfig {
                initial_min: price.initial_min.unwrap_or(base_path.initial_min),
                initial_max: price.initial_max.unwrap_or(base_path.initial_max),
                step_min: price.step_min.unwrap_or(base_path.step_min),
                step_max: price.step_max.unwrap_or(base_path.step_max),
                volume_min: volume.min.unwrap_or(base_path.volume_min),
                volume_max: volume.max.unwrap_or(base_path.volume_max),
            },
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.out.as_os_str().is_empty() {
            return Err("out path must not be empty".to_string());
        }
        if self.symbol_prefix.is_empty() {
            return Err("symbol_prefix must not be empty".to_string());
        }
        if self
            .symbol_prefix
            .chars()
            .any(|c| matches!(c, ',' | '"' | '\n' | '\r'))
        {
            return Err(format!(
                "symbol_prefix must not contain commas, quotes or line breaks: {:?}",
                self.symbol_prefix
            ));
        }
        self.price_path
            .validate()
            .map_err(|err| format!("invalid price path config: {err}"))
    }

    pub fn expected_rows(&self) -> u64 {
        self.schedule.expected_rows(self.symbols)
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, GenerateOverrides, GenerateSettings};
    use std::path::PathBuf;

    fn parse_config(toml_str: &str) -> Config {
        toml::from_str(toml_str).expect("config should parse")
    }

    #[test]
    fn parse_config_rejects_malformed_toml() {
        let err = toml::from_str::<Config>("[generator\nsymbols = 1").expect_err("malformed");
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn parse_config_rejects_unknown_fields() {
        let toml_str = r#"
[generator]
symbols = 3
tickers = 4
"#;
        assert!(toml::from_str::<Config>(toml_str).is_err());
    }

    #[test]
    fn empty_config_resolves_to_defaults() {
        let config = parse_config("");
        let settings = GenerateSettings::resolve(Some(&config), &GenerateOverrides::default())
            .expect("defaults");
        assert_eq!(settings, GenerateSettings::default());
        assert_eq!(settings.out, PathBuf::from("ticks.csv"));
        assert_eq!(settings.symbols, 100);
        assert_eq!(settings.schedule.days, 7);
        assert_eq!(settings.schedule.rate, 24);
        assert_eq!(settings.symbol_prefix, "SYM");
        assert_eq!(settings.expected_rows(), 16_800);
    }

    #[test]
    fn overrides_beat_file_which_beats_defaults() {
        let config = parse_config(
            r#"
[generator]
out = "from_file.csv"
symbols = 5
days = 2
seed = 9

[price]
initial_min = 50.0
initial_max = 60.0

[volume]
max = 10
"#,
        );
        let overrides = GenerateOverrides {
            out: Some(PathBuf::from("cli.csv")),
            days: Some(3),
            ..GenerateOverrides::default()
        };
        let settings = GenerateSettings::resolve(Some(&config), &overrides).expect("resolve");
        assert_eq!(settings.out, PathBuf::from("cli.csv"));
        assert_eq!(settings.symbols, 5);
        assert_eq!(settings.schedule.days, 3);
        assert_eq!(settings.schedule.rate, 24);
        assert_eq!(settings.seed, Some(9));
        assert_eq!(settings.price_path.initial_min, 50.0);
        assert_eq!(settings.price_path.initial_max, 60.0);
        assert_eq!(settings.price_path.step_min, 0.999);
        assert_eq!(settings.price_path.volume_min, 1);
        assert_eq!(settings.price_path.volume_max, 10);
    }

    #[test]
    fn resolve_rejects_invalid_ranges_and_prefixes() {
        let config = parse_config(
            r#"
[price]
step_min = 0.0
"#,
        );
        let err = GenerateSettings::resolve(Some(&config), &GenerateOverrides::default())
            .expect_err("step_min 0");
        assert!(err.contains("invalid price path config"));

        let config = parse_config(
            r#"
[generator]
symbol_prefix = "A,B"
"#,
        );
        assert!(GenerateSettings::resolve(Some(&config), &GenerateOverrides::default()).is_err());

        let config = parse_config(
            r#"
[generator]
symbol_prefix = ""
"#,
        );
        assert!(GenerateSettings::resolve(Some(&config), &GenerateOverrides::default()).is_err());
    }

    #[test]
    fn load_config_reports_parse_errors_with_path() {
        let path = std::env::temp_dir().join(format!(
            "tickforge_bad_config_{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[generator]\nsymbols = \"many\"\n").unwrap();
        let err = super::load_config(&path).expect_err("bad symbols");
        assert!(err.starts_with("failed to parse TOML"), "{err}");
        assert!(err.contains(&path.display().to_string()), "{err}");
        let _ = std::fs::remove_file(&path);
    }
}
