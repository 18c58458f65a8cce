#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::env;
use std::path;
use std::time::Duration;

use anyhow::bail;
use anyhow::Context;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::Arg;
use clap::ArgMatches;
use clap::Command;
use codenote_types::CommentLevel;
use codenote_types::Language;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use strum::VariantNames;
use tokio::fs;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

#[derive(Clone, Copy, Debug, Eq, PartialEq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    BackendUrl,
    ConfigFile,
    CredentialFile,
    Language,
    CommentLevel,
    RequestTimeout,
}

fn app_dir(base: Option<path::PathBuf>) -> path::PathBuf {
    return base.unwrap_or_else(env::temp_dir).join("codenote");
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn default(key: ConfigKey) -> String {
        let res = match key {
            ConfigKey::BackendUrl => "http://localhost:8000".to_string(),
            ConfigKey::Language => Language::default().to_string(),
            ConfigKey::CommentLevel => CommentLevel::default().to_string(),
            ConfigKey::RequestTimeout => "60000".to_string(),

            // Special
            ConfigKey::ConfigFile => app_dir(dirs::config_dir())
                .join("config.toml")
                .to_string_lossy()
                .to_string(),
            ConfigKey::CredentialFile => app_dir(dirs::cache_dir())
                .join("credentials.json")
                .to_string_lossy()
                .to_string(),
        };

        return res;
    }

    fn help(key: ConfigKey) -> &'static str {
        match key {
            ConfigKey::BackendUrl => "Base URL of the annotation backend",
            ConfigKey::ConfigFile => "Path to the config file",
            ConfigKey::CredentialFile => "Where the session credential is kept between runs",
            ConfigKey::Language => "Language assumed for pasted code",
            ConfigKey::CommentLevel => "How verbose the generated comments should be",
            ConfigKey::RequestTimeout => "Backend request timeout in milliseconds",
        }
    }

    /// Global arguments, one per key, for any command that loads config.
    pub fn args() -> Vec<Arg> {
        return ConfigKey::iter()
            .map(|key| {
                let name = key.to_string();
                let env_name = format!("CODENOTE_{}", name.replace('-', "_").to_uppercase());
                let mut arg = Arg::new(name.clone())
                    .long(name)
                    .env(env_name)
                    .global(true)
                    .num_args(1)
                    .help(Config::help(key));

                match key {
                    ConfigKey::Language => {
                        arg = arg.value_parser(PossibleValuesParser::new(Language::VARIANTS));
                    }
                    ConfigKey::CommentLevel => {
                        arg = arg.value_parser(PossibleValuesParser::new(CommentLevel::VARIANTS));
                    }
                    _ => {}
                }

                return arg;
            })
            .collect();
    }

    pub async fn load(cmd: Command, clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key))
        }

        let mut config_file = Config::default(ConfigKey::ConfigFile);
        for matches in clap_arg_matches.as_slice() {
            if let Ok(Some(arg_config_file)) =
                matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                config_file = arg_config_file.to_string();
            }
        }

        let config_path = path::PathBuf::from(config_file);
        if config_path.exists() {
            let toml_str = fs::read_to_string(config_path).await?;
            let doc = toml_str.parse::<toml_edit::Document>()?;

            for key in ConfigKey::iter() {
                if let Some(val) = doc.get(&key.to_string()) {
                    // Use clap value parsers to do validation.
                    let mut possible_values = vec![];
                    if let Some(arg) = cmd
                        .get_arguments()
                        .find(|e| return e.get_long() == Some(key.to_string().as_str()))
                    {
                        possible_values = arg
                            .get_possible_values()
                            .iter()
                            .map(|e| return e.get_name().to_string())
                            .collect::<Vec<String>>();
                    }

                    if let Some(val_int) = val.as_integer() {
                        Config::set(key, &val_int.to_string());
                    } else if let Some(val_str) = val.as_str() {
                        if val_str.is_empty() {
                            continue;
                        }
                        if !possible_values.is_empty()
                            && !possible_values.contains(&val_str.to_string())
                        {
                            bail!(format!("config.toml has an invalid value for key '{key}': {val_str}\nPossible values are: {}", possible_values.join(", ")));
                        }
                        Config::set(key, val_str);
                    }
                }
            }
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    Config::set(key, val)
                }
            }
        }

        tracing::debug!(
            backend_url = Config::get(ConfigKey::BackendUrl),
            language = Config::get(ConfigKey::Language),
            comment_level = Config::get(ConfigKey::CommentLevel),
            request_timeout = Config::get(ConfigKey::RequestTimeout),
            "config"
        );

        return Ok(());
    }

    pub fn language() -> Result<Language> {
        let raw = Config::get(ConfigKey::Language);
        return raw
            .parse::<Language>()
            .with_context(|| format!("unknown language '{raw}'"));
    }

    pub fn comment_level() -> Result<CommentLevel> {
        let raw = Config::get(ConfigKey::CommentLevel);
        return raw
            .parse::<CommentLevel>()
            .with_context(|| format!("unknown comment level '{raw}'"));
    }

    pub fn request_timeout() -> Result<Duration> {
        let raw = Config::get(ConfigKey::RequestTimeout);
        let millis = match raw.parse::<u64>() {
            Ok(millis) if millis > 0 => millis,
            _ => bail!("request-timeout must be a positive number of milliseconds, got '{raw}'"),
        };

        return Ok(Duration::from_millis(millis));
    }

    pub fn serialize_default(cmd: Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key == ConfigKey::ConfigFile {
                    return None;
                }

                let arg = cmd
                    .get_arguments()
                    .find(|e| return e.get_long() == Some(key.to_string().as_str()))?;

                let mut description = arg
                    .get_help()
                    .map(|help| help.to_string())
                    .unwrap_or_default();

                if !arg.get_possible_values().is_empty() {
                    let possible_values = arg
                        .get_possible_values()
                        .iter()
                        .map(|e| return e.get_name().to_string())
                        .collect::<Vec<_>>()
                        .join(", ");
                    description = format!("{description} [possible values: {}]", possible_values);
                }

                let mut val = Config::default(key);
                if val.is_empty() {
                    val = format!("# {key} = \"\"");
                } else if val.parse::<i64>().is_ok() {
                    val = format!("{key} = {val}");
                } else {
                    val = format!("{key} = \"{val}\"");
                }

                return Some(format!("# {description}\n{val}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}
