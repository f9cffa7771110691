use crate::registry::{BackendKind, ToolRecord};
use crate::settings::SettingEntry;

/// Prefix every setting environment variable is expected to carry.
const ENV_PREFIX: &str = "MISE_";

/// A non-fatal issue found while normalizing source data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The data source (e.g., "registry", "settings").
    pub source: String,
    /// The tool or setting key that triggered the warning.
    pub item: String,
    /// Human-readable warning message.
    pub message: String,
}

impl ValidationWarning {
    /// Create a warning for `item` from `source`.
    #[must_use]
    pub fn new(
        source: impl Into<String>,
        item: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            item: item.into(),
            message: message.into(),
        }
    }
}

/// Trait for source data validators.
///
/// Validators never fail a load; they report entries that will render
/// poorly so authors can fix them.
pub trait ConfigValidator {
    /// Validate the data and return any warnings found.
    fn validate(&self) -> Vec<ValidationWarning>;

    /// Return a human-readable name for this validator.
    fn name(&self) -> &'static str;
}

/// Validator for normalized registry records.
#[derive(Debug)]
pub struct RegistryValidator<'a> {
    tools: &'a [ToolRecord],
}

impl<'a> RegistryValidator<'a> {
    /// Validate `tools`.
    #[must_use]
    pub const fn new(tools: &'a [ToolRecord]) -> Self {
        Self { tools }
    }
}

impl ConfigValidator for RegistryValidator<'_> {
    fn validate(&self) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        for tool in self.tools {
            if tool.backends.is_empty() {
                warnings.push(ValidationWarning::new(
                    self.name(),
                    &tool.name,
                    "tool has no backends",
                ));
            }

            for (index, backend) in tool.backends.iter().enumerate() {
                let Some(kind) = backend.kind() else {
                    warnings.push(ValidationWarning::new(
                        self.name(),
                        &tool.name,
                        format!("backend #{} is not a valid prefix:slug descriptor", index + 1),
                    ));
                    continue;
                };

                if !kind.is_known() {
                    warnings.push(ValidationWarning::new(
                        self.name(),
                        &tool.name,
                        format!("unknown backend prefix: {kind}"),
                    ));
                } else if backend.url.is_empty() && kind != BackendKind::Http {
                    warnings.push(ValidationWarning::new(
                        self.name(),
                        &tool.name,
                        format!("no url could be resolved for {}", backend.name),
                    ));
                }
            }
        }

        warnings
    }

    fn name(&self) -> &'static str {
        "registry"
    }
}

/// Validator for loaded settings.
#[derive(Debug)]
pub struct SettingsValidator<'a> {
    entries: &'a [SettingEntry],
}

impl<'a> SettingsValidator<'a> {
    /// Validate `entries`.
    #[must_use]
    pub const fn new(entries: &'a [SettingEntry]) -> Self {
        Self { entries }
    }
}

impl ConfigValidator for SettingsValidator<'_> {
    fn validate(&self) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        for element in self.entries.iter().flat_map(SettingEntry::elements) {
            if let (Some(default), Some(allowed)) =
                (&element.declared_default, &element.enum_values)
                && !allowed.contains(default)
            {
                warnings.push(ValidationWarning::new(
                    self.name(),
                    &element.key,
                    format!("default {default} is not one of the enum values"),
                ));
            }

            if let Some(env) = &element.env
                && !env.name.starts_with(ENV_PREFIX)
            {
                warnings.push(ValidationWarning::new(
                    self.name(),
                    &element.key,
                    format!("env var {} does not start with {ENV_PREFIX}", env.name),
                ));
            }
        }

        warnings
    }

    fn name(&self) -> &'static str {
        "settings"
    }
}
