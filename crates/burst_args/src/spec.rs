use std::fmt;

use crate::{Error, Result};

/// A single option a [`Registry`](crate::Registry) knows about.
///
/// Built with [`OptionSpec::short`], [`OptionSpec::long`] or from a usage
/// line with [`OptionSpec::usage`], so it always has at least one key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OptionSpec {
    short: Option<char>,
    long: Option<Box<str>>,
    takes_value: bool,
    required: bool,
    value_name: Option<Box<str>>,
    help: Option<Box<str>>,
}

impl OptionSpec {
    const START: &'static str = "<";
    const END: &'static str = ">";

    pub fn short(key: char) -> Self {
        Self {
            short: Some(key),
            ..Self::empty()
        }
    }

    pub fn long(key: impl Into<Box<str>>) -> Self {
        Self {
            long: Some(key.into()),
            ..Self::empty()
        }
    }

    /// Parses a usage line such as `-o, --output <file>`.
    ///
    /// `-x` is the short key, `--name` the long key and a trailing `<name>`
    /// marks the option as taking a value.
    pub fn usage(input: &str) -> Result<Self> {
        let (mut short, mut long, mut value_name) = (None, None, None);

        let parts = input
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty());

        for part in parts {
            if let Some(name) = Self::trim_value(part) {
                if name.is_empty() || value_name.replace(name).is_some() {
                    return Err(Error::InvalidKey(part.to_string()));
                }
                continue;
            }

            if let Some(key) = part.strip_prefix("--") {
                if long.replace(key).is_some() {
                    return Err(Error::DuplicateKey(part.to_string()));
                }
                continue;
            }

            let key = part
                .strip_prefix('-')
                .ok_or_else(|| Error::InvalidKey(part.to_string()))?;

            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => {
                    if short.replace(ch).is_some() {
                        return Err(Error::DuplicateKey(part.to_string()));
                    }
                }
                _ => return Err(Error::InvalidKey(part.to_string())),
            }
        }

        let mut spec = match (short, long) {
            (Some(short), Some(long)) => Self::short(short).with_long(long),
            (Some(short), None) => Self::short(short),
            (None, Some(long)) => Self::long(long),
            (None, None) => return Err(Error::NoKey),
        };

        if let Some(name) = value_name {
            spec = spec.with_value(name);
        }

        spec.validate()?;
        Ok(spec)
    }

    pub fn with_short(mut self, key: char) -> Self {
        self.short.replace(key);
        self
    }

    pub fn with_long(mut self, key: impl Into<Box<str>>) -> Self {
        self.long.replace(key.into());
        self
    }

    pub const fn takes_value(mut self) -> Self {
        self.takes_value = true;
        self
    }

    /// Marks the option as taking a value, shown as `<name>`.
    pub fn with_value(mut self, name: impl Into<Box<str>>) -> Self {
        self.value_name.replace(name.into());
        self.takes_value()
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_help(mut self, help: impl Into<Box<str>>) -> Self {
        self.help.replace(help.into());
        self
    }

    pub const fn short_key(&self) -> Option<char> {
        self.short
    }

    pub fn long_key(&self) -> Option<&str> {
        self.long.as_deref()
    }

    pub const fn has_value(&self) -> bool {
        self.takes_value
    }

    pub const fn is_required(&self) -> bool {
        self.required
    }

    pub fn value_name(&self) -> Option<&str> {
        self.value_name.as_deref()
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// The short key if there is one, otherwise the long key.
    pub fn key(&self) -> String {
        match (self.short, &self.long) {
            (Some(short), _) => short.to_string(),
            (None, Some(long)) => long.to_string(),
            (None, None) => String::new(),
        }
    }

    /// The option as it is written on a command line, `-a` or `--alpha`.
    pub fn flag(&self) -> String {
        match (self.short, &self.long) {
            (Some(short), _) => format!("-{}", short),
            (None, Some(long)) => format!("--{}", long),
            (None, None) => String::new(),
        }
    }

    /// Whether `key` names this option, with or without its hyphens.
    pub fn matches(&self, key: &str) -> bool {
        let key = strip_hyphens(key);
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) if self.short == Some(ch) => true,
            _ => self.long_key() == Some(key),
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.short.is_none() && self.long.is_none() {
            return Err(Error::NoKey);
        }

        if let Some(short) = self.short {
            if !Self::is_short_key(short) {
                return Err(Error::InvalidKey(format!("-{}", short)));
            }
        }

        if let Some(long) = self.long_key() {
            if !Self::is_long_key(long) {
                return Err(Error::InvalidKey(format!("--{}", long)));
            }
        }

        Ok(())
    }

    fn is_short_key(ch: char) -> bool {
        ch.is_ascii_alphanumeric() || matches!(ch, '?' | '@')
    }

    fn is_long_key(key: &str) -> bool {
        key.chars().nth(1).is_some()
            && !key.starts_with('-')
            && key
                .chars()
                .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_'))
    }

    fn trim_value(input: &str) -> Option<&str> {
        input
            .strip_prefix(Self::START)
            .and_then(|s| s.strip_suffix(Self::END))
    }

    const fn empty() -> Self {
        Self {
            short: None,
            long: None,
            takes_value: false,
            required: false,
            value_name: None,
            help: None,
        }
    }
}

/// Strips one leading `--` or `-`.
pub(crate) fn strip_hyphens(key: &str) -> &str {
    key.strip_prefix("--")
        .or_else(|| key.strip_prefix('-'))
        .unwrap_or(key)
}

impl fmt::Display for OptionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = "";
        if let Some(short) = self.short {
            write!(f, "-{}", short)?;
            sep = ", ";
        }
        if let Some(long) = &self.long {
            write!(f, "{}--{}", sep, long)?;
        }
        if self.takes_value {
            let name = self.value_name().unwrap_or("value");
            write!(f, " {}{}{}", Self::START, name, Self::END)?;
        }
        Ok(())
    }
}
