use std::collections::HashMap;

use crate::{spec::strip_hyphens, Error, Group, OptionSpec, Result};

/// The set of options known to the flattener and the parser.
///
/// Keys are unique across the whole registry. Options are kept in the
/// order they were registered.
#[derive(Default, Clone, Debug)]
pub struct Registry {
    options: Vec<OptionSpec>,
    short: HashMap<char, usize>,
    long: HashMap<Box<str>, usize>,
    groups: Vec<Group>,
    // option key to the group it belongs to
    grouped: HashMap<Box<str>, usize>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, spec: OptionSpec) -> Result<Self> {
        self.register(spec)?;
        Ok(self)
    }

    /// Adds `spec`. The registry is left untouched if this fails.
    pub fn register(&mut self, spec: OptionSpec) -> Result<()> {
        spec.validate()?;

        if let Some(short) = spec.short_key() {
            if self.short.contains_key(&short) {
                return Err(Error::DuplicateKey(format!("-{}", short)));
            }
        }

        if let Some(long) = spec.long_key() {
            if self.long.contains_key(long) {
                return Err(Error::DuplicateKey(format!("--{}", long)));
            }
        }

        let index = self.options.len();
        if let Some(short) = spec.short_key() {
            self.short.insert(short, index);
        }
        if let Some(long) = spec.long_key() {
            self.long.insert(long.into(), index);
        }

        log::trace!("registered option: {}", spec);
        self.options.push(spec);
        Ok(())
    }

    pub fn with_group(mut self, group: Group) -> Result<Self> {
        self.add_group(group)?;
        Ok(self)
    }

    /// Adds `group`. Its members must be registered already and belong to no
    /// other group. The registry is left untouched if this fails.
    pub fn add_group(&mut self, group: Group) -> Result<()> {
        let mut members: Vec<Box<str>> = Vec::new();
        for key in group.members() {
            let spec = self
                .lookup(key)
                .ok_or_else(|| Error::UnrecognizedOption(key.to_string()))?;

            let key: Box<str> = spec.key().into();
            if self.grouped.contains_key(&key) || members.contains(&key) {
                return Err(Error::DuplicateKey(spec.flag()));
            }
            members.push(key);
        }

        if members.is_empty() {
            return Err(Error::NoKey);
        }

        let index = self.groups.len();
        for key in &members {
            self.grouped.insert(key.clone(), index);
        }

        let group = group.with_members(members);
        log::trace!("registered group: {}", group);
        self.groups.push(group);
        Ok(())
    }

    /// The group the option named by `key` belongs to.
    pub fn group(&self, key: &str) -> Option<&Group> {
        let spec = self.lookup(key)?;
        self.grouped
            .get(spec.key().as_str())
            .map(|&index| &self.groups[index])
    }

    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter()
    }

    /// Options whose long key starts with `prefix`. An exact match is the
    /// only result.
    pub fn matching(&self, prefix: &str) -> Vec<&OptionSpec> {
        let prefix = strip_hyphens(prefix);
        if let Some(spec) = self.long(prefix) {
            return vec![spec];
        }

        self.iter()
            .filter(|spec| spec.long_key().map_or(false, |long| long.starts_with(prefix)))
            .collect()
    }

    /// Finds an option by key. One leading `--` or `-` is stripped, a single
    /// character is a short key and anything longer is a long key.
    pub fn lookup(&self, key: &str) -> Option<&OptionSpec> {
        let key = strip_hyphens(key);
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => self.short(ch),
            (Some(..), Some(..)) => self.long(key),
            _ => None,
        }
    }

    pub fn short(&self, key: char) -> Option<&OptionSpec> {
        self.short.get(&key).map(|&index| &self.options[index])
    }

    pub fn long(&self, key: &str) -> Option<&OptionSpec> {
        self.long.get(key).map(|&index| &self.options[index])
    }

    pub fn iter(&self) -> impl Iterator<Item = &OptionSpec> {
        self.options.iter()
    }

    pub fn required(&self) -> impl Iterator<Item = &OptionSpec> {
        self.iter().filter(|spec| spec.is_required())
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a OptionSpec;
    type IntoIter = std::slice::Iter<'a, OptionSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.options.iter()
    }
}
