use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    controller::Variant,
    errors::{CalcError, Result},
    format::NumberFormat,
    render::SortOrder,
    utils::paths,
};

const TMP_SUFFIX: &str = "tmp";

/// Keys accepted by [`Config::set`], in display order.
pub const CONFIG_KEYS: &[&str] = &[
    "default_variant",
    "invoice_order",
    "sum_order",
    "confirm_deletes",
    "decimal_separator",
    "grouping_separator",
    "max_fraction_digits",
    "quiet",
    "plain",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub default_variant: Variant,
    pub invoice_order: SortOrder,
    pub sum_order: SortOrder,
    /// Ask before deleting entries in interactive mode.
    pub confirm_deletes: bool,
    #[serde(flatten)]
    pub number: NumberFormat,
    pub quiet: bool,
    pub plain: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_variant: Variant::Invoice,
            invoice_order: SortOrder::Descending,
            sum_order: SortOrder::Descending,
            confirm_deletes: true,
            number: NumberFormat::default(),
            quiet: false,
            plain: false,
        }
    }
}

impl Config {
    pub fn order_for(&self, variant: Variant) -> SortOrder {
        match variant {
            Variant::Invoice => self.invoice_order,
            Variant::Sum => self.sum_order,
        }
    }

    /// Updates one setting from its textual form. The configuration is left
    /// untouched when the value is rejected.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut next = self.clone();
        next.apply(key, value)?;
        if next.number.decimal_separator == next.number.grouping_separator {
            return Err(CalcError::Config(
                "decimal and grouping separators must differ".into(),
            ));
        }
        *self = next;
        Ok(())
    }

    fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "default_variant" => self.default_variant = value.parse().map_err(CalcError::Config)?,
            "invoice_order" => self.invoice_order = value.parse().map_err(CalcError::Config)?,
            "sum_order" => self.sum_order = value.parse().map_err(CalcError::Config)?,
            "confirm_deletes" => self.confirm_deletes = parse_flag(value)?,
            "decimal_separator" => self.number.decimal_separator = parse_char(value)?,
            "grouping_separator" => self.number.grouping_separator = parse_char(value)?,
            "max_fraction_digits" => {
                self.number.max_fraction_digits = value
                    .parse::<u8>()
                    .ok()
                    .filter(|digits| *digits <= 10)
                    .ok_or_else(|| {
                        CalcError::Config(format!("`{value}` is not a digit count between 0 and 10"))
                    })?
            }
            "quiet" => self.quiet = parse_flag(value)?,
            "plain" => self.plain = parse_flag(value)?,
            other => {
                return Err(CalcError::Config(format!(
                    "unknown setting `{other}` (known: {})",
                    CONFIG_KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }

    /// Settings as `(key, value)` pairs for display.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("default_variant", self.default_variant.to_string()),
            ("invoice_order", self.invoice_order.to_string()),
            ("sum_order", self.sum_order.to_string()),
            ("confirm_deletes", self.confirm_deletes.to_string()),
            ("decimal_separator", self.number.decimal_separator.to_string()),
            ("grouping_separator", self.number.grouping_separator.to_string()),
            ("max_fraction_digits", self.number.max_fraction_digits.to_string()),
            ("quiet", self.quiet.to_string()),
            ("plain", self.plain.to_string()),
        ]
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(CalcError::Config(format!("`{value}` is not yes/no"))),
    }
}

fn parse_char(value: &str) -> Result<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) if !ch.is_ascii_digit() && ch != '-' => Ok(ch),
        _ => Err(CalcError::Config(format!(
            "`{value}` is not a single separator character"
        ))),
    }
}

/// Loads and saves [`Config`] as JSON under the application directory.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(paths::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        paths::ensure_dir(&base)?;
        Ok(Self {
            path: paths::config_file_in(&base),
        })
    }

    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            paths::ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), "configuration saved");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
