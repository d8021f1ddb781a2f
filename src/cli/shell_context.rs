use dialoguer::theme::ColorfulTheme;

use crate::{
    config::{Config, ConfigManager},
    controller::{Calculator, Variant},
};

use super::commands;
use super::core::CliError;
use super::output::{self, OutputPreferences};
use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// Everything one shell session owns: both calculators, the active one,
/// configuration and the command table.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub theme: ColorfulTheme,
    pub config_manager: ConfigManager,
    pub config: Config,
    invoice: Calculator,
    sum: Calculator,
    active: Variant,
    /// Text to pre-populate the next interactive prompt with.
    pub pending_input: Option<String>,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode, variant: Option<Variant>) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        Self::with_config_manager(mode, variant, config_manager)
    }

    pub fn with_config_manager(
        mode: CliMode,
        variant: Option<Variant>,
        config_manager: ConfigManager,
    ) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config = config_manager.load()?;
        output::set_preferences(OutputPreferences::from_config(&config));

        let active = variant.unwrap_or(config.default_variant);
        tracing::debug!(variant = %active, ?mode, "shell context ready");

        Ok(Self {
            mode,
            registry,
            theme: ColorfulTheme::default(),
            invoice: Calculator::new(Variant::Invoice, config.order_for(Variant::Invoice)),
            sum: Calculator::new(Variant::Sum, config.order_for(Variant::Sum)),
            config_manager,
            config,
            active,
            pending_input: None,
            last_command: None,
            running: true,
        })
    }

    pub fn active_variant(&self) -> Variant {
        self.active
    }

    pub fn calculator(&self) -> &Calculator {
        match self.active {
            Variant::Invoice => &self.invoice,
            Variant::Sum => &self.sum,
        }
    }

    pub fn calculator_mut(&mut self) -> &mut Calculator {
        match self.active {
            Variant::Invoice => &mut self.invoice,
            Variant::Sum => &mut self.sum,
        }
    }

    pub fn calculator_for_mut(&mut self, variant: Variant) -> &mut Calculator {
        match variant {
            Variant::Invoice => &mut self.invoice,
            Variant::Sum => &mut self.sum,
        }
    }

    /// Makes `variant` the active calculator. The other keeps its entries.
    pub fn switch_to(&mut self, variant: Variant) {
        self.active = variant;
        self.pending_input = None;
    }
}
