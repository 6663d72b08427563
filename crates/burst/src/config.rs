use std::path::Path;

use anyhow::Context;
use burst_args::{
    Basic, Flattener, Group, OptionSpec, Parser, Posix, Registry, TrailingValue, ValuePolicy,
};
use serde::{Deserialize, Serialize};

use crate::persist::{self, Json, Persist, Toml};

#[derive(Default, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub settings: Settings,
    pub options: Vec<OptionEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<GroupEntry>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub style: Style,
    pub stop_at_non_option: bool,
    pub trailing_value: Trailing,
    pub reject_option_values: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            style: Style::Posix,
            stop_at_non_option: false,
            trailing_value: Trailing::NextToken,
            reject_option_values: false,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    Posix,
    Basic,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trailing {
    NextToken,
    Flatten,
}

impl From<Trailing> for TrailingValue {
    fn from(trailing: Trailing) -> Self {
        match trailing {
            Trailing::NextToken => Self::NextToken,
            Trailing::Flatten => Self::Flatten,
        }
    }
}

/// One option, either as a usage line (`-o, --output <file>`) or spelled
/// out key by key. `value` names the value and makes the option take one.
#[derive(Default, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short: Option<char>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

impl OptionEntry {
    pub fn usage(usage: &str, help: &str) -> Self {
        Self {
            usage: Some(usage.to_string()),
            help: Some(help.to_string()),
            ..Self::default()
        }
    }

    pub fn spec(&self) -> anyhow::Result<OptionSpec> {
        let mut spec = match (&self.usage, self.short, &self.long) {
            (Some(usage), ..) => OptionSpec::usage(usage)?,
            (None, Some(short), Some(long)) => OptionSpec::short(short).with_long(long.as_str()),
            (None, Some(short), None) => OptionSpec::short(short),
            (None, None, Some(long)) => OptionSpec::long(long.as_str()),
            (None, None, None) => return Err(burst_args::Error::NoKey.into()),
        };

        if let Some(name) = &self.value {
            spec = spec.with_value(name.as_str());
        }
        if self.required {
            spec = spec.required();
        }
        if let Some(help) = &self.help {
            spec = spec.with_help(help.as_str());
        }
        Ok(spec)
    }
}

/// Options of which only one may be given, named by any of their keys.
#[derive(Default, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupEntry {
    pub members: Vec<String>,
    pub required: bool,
}

impl GroupEntry {
    pub fn group(&self) -> Group {
        let group = self
            .members
            .iter()
            .fold(Group::new(), |group, key| group.with(key.as_str()));
        if self.required {
            group.required()
        } else {
            group
        }
    }
}

impl Config {
    pub const DEFAULT_PATH: &'static str = "burst.toml";

    /// Loads a config, as JSON if the file ends in `.json` and TOML otherwise.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let config = if persist::is_json(path) {
            <Json as Persist<Self>>::load_from(path)?
        } else {
            <Toml as Persist<Self>>::load_from(path)?
        };
        log::debug!(
            "loaded {} option(s) from '{}'",
            config.options.len(),
            path.display()
        );
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if persist::is_json(path) {
            Json::save(path, self)
        } else {
            Toml::save(path, self)
        }
    }

    /// Writes [`Config::example`] to `path`, refusing to replace a file.
    pub fn write_default(path: &Path) -> anyhow::Result<()> {
        anyhow::ensure!(
            !path.exists(),
            "'{}' already exists, not overwriting it",
            path.display()
        );
        Self::example().save(path)
    }

    pub fn example() -> Self {
        Self {
            settings: Settings::default(),
            options: vec![
                OptionEntry::usage("-v, --verbose", "print more"),
                OptionEntry::usage("-q, --quiet", "print less"),
                OptionEntry::usage("-o, --output <file>", "where to write"),
                OptionEntry {
                    short: Some('n'),
                    long: Some("lines".into()),
                    value: Some("count".into()),
                    help: Some("how many lines".into()),
                    ..OptionEntry::default()
                },
            ],
            groups: vec![GroupEntry {
                members: vec!["verbose".into(), "quiet".into()],
                required: false,
            }],
        }
    }

    pub fn registry(&self) -> anyhow::Result<Registry> {
        let mut registry = Registry::new();
        for (i, entry) in self.options.iter().enumerate() {
            let spec = entry
                .spec()
                .with_context(|| format!("invalid option #{}", i + 1))?;
            registry
                .register(spec)
                .with_context(|| format!("cannot register option #{}", i + 1))?;
        }
        for (i, entry) in self.groups.iter().enumerate() {
            registry
                .add_group(entry.group())
                .with_context(|| format!("cannot register group #{}", i + 1))?;
        }
        Ok(registry)
    }

    /// Builds the parser the settings describe. `stop_at_non_option` can only
    /// turn stopping on.
    pub fn parser(&self, stop_at_non_option: bool) -> Parser<Box<dyn Flattener>> {
        let flattener: Box<dyn Flattener> = match self.settings.style {
            Style::Posix => {
                Box::new(Posix::new().trailing_value(self.settings.trailing_value.into()))
            }
            Style::Basic => Box::new(Basic),
        };

        let values = if self.settings.reject_option_values {
            ValuePolicy::RejectOptions
        } else {
            ValuePolicy::AnyToken
        };

        Parser::new(flattener)
            .stop_at_non_option(self.settings.stop_at_non_option || stop_at_non_option)
            .value_policy(values)
    }
}
