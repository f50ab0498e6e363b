//! Command-line argument parsing for the demo binary.
//!
//! Flags that take a value accept both `--flag value` and `--flag=value`.
//! `--mapping-id` and `--provider-id` also accept preset names such as
//! `Kroger` or `ADP`.

use crate::error::ConfigError;
use crate::models::presets::{self, Preset};
use crate::models::{Environment, ProductSettingsPatch, ProductType};
use crate::state::SettingsStore;

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Fetch a bridge token (default)
    Run(RunOptions),
}

/// Overrides applied to the store before the controller starts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOptions {
    pub env: Option<Environment>,
    pub product: Option<ProductType>,
    pub mapping_id: Option<String>,
    pub provider_id: Option<String>,
    /// Drive the widget gate once a token arrives
    pub open: bool,
}

impl RunOptions {
    /// Whether any option would override a stored setting.
    pub fn overrides_settings(&self) -> bool {
        self.env.is_some()
            || self.product.is_some()
            || self.mapping_id.is_some()
            || self.provider_id.is_some()
    }

    /// Push the options into `store`, leaving unspecified values alone.
    pub fn apply(&self, store: &SettingsStore) {
        if let Some(env) = self.env {
            store.set_env(env);
        }
        if let Some(product) = self.product {
            store.set_product(product);
        }

        let mut patch = ProductSettingsPatch::new();
        if let Some(id) = &self.mapping_id {
            patch = patch.mapping_id(id.clone());
        }
        if let Some(id) = &self.provider_id {
            patch = patch.provider_id(id.clone());
        }
        if !patch.is_empty() {
            store.update_product_settings(patch);
        }
    }
}

/// Error parsing command-line arguments.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArgsError {
    #[error("missing value for {0}")]
    MissingValue(String),
    #[error("unknown argument '{0}'")]
    UnknownArgument(String),
    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

/// Parse command-line arguments and return the appropriate command.
///
/// # Examples
///
/// ```
/// use citadel_demo::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["citadel-demo".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()).unwrap(), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, ArgsError>
where
    I: Iterator<Item = String>,
{
    let mut options = RunOptions::default();
    // Skip the program name
    let mut args = args.skip(1);

    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag.to_string(), Some(value.to_string())),
            _ => (arg.clone(), None),
        };

        let mut value = || {
            inline
                .clone()
                .or_else(|| args.next())
                .ok_or_else(|| ArgsError::MissingValue(flag.clone()))
        };

        match flag.as_str() {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "--open" => options.open = true,
            "--env" => {
                let env = value()?.parse::<Environment>().map_err(ConfigError::environment_flag)?;
                options.env = Some(env);
            }
            "--product" => {
                let product = value()?.parse::<ProductType>().map_err(ConfigError::from)?;
                options.product = Some(product);
            }
            "--mapping-id" => {
                options.mapping_id = Some(resolve_preset(value()?, presets::company_mapping))
            }
            "--provider-id" => {
                options.provider_id = Some(resolve_preset(value()?, presets::provider))
            }
            _ => return Err(ArgsError::UnknownArgument(arg)),
        }
    }

    Ok(CliCommand::Run(options))
}

fn resolve_preset(value: String, lookup: fn(&str) -> Option<&'static Preset>) -> String {
    match lookup(&value) {
        Some(preset) => preset.value.to_string(),
        None => value,
    }
}
