use crate::OptionSpec;

/// An option seen while parsing, with every value given to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matched<'r> {
    pub spec: &'r OptionSpec,
    pub occurrences: usize,
    pub values: Vec<String>,
}

/// The result of a parse: the options that were present and the
/// positional arguments, in order.
///
/// Lookups accept either key of an option, with or without hyphens.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Matches<'r> {
    options: Vec<Matched<'r>>,
    positional: Vec<String>,
}

impl<'r> Matches<'r> {
    pub fn is_present(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn occurrences(&self, key: &str) -> usize {
        self.get(key).map_or(0, |m| m.occurrences)
    }

    /// The first value given to the option.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(|m| m.values.first())
            .map(String::as_str)
    }

    /// The first value given to the option, or `default` without one.
    pub fn value_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.value(key).unwrap_or(default)
    }

    pub fn values(&self, key: &str) -> &[String] {
        self.get(key).map_or(&[][..], |m| &m.values[..])
    }

    pub fn positional(&self) -> &[String] {
        &self.positional
    }

    pub fn get(&self, key: &str) -> Option<&Matched<'r>> {
        self.options.iter().find(|m| m.spec.matches(key))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Matched<'r>> {
        self.options.iter()
    }

    pub fn into_positional(self) -> Vec<String> {
        self.positional
    }

    pub(crate) fn record(&mut self, spec: &'r OptionSpec, value: Option<String>) {
        let index = match self
            .options
            .iter()
            .position(|m| std::ptr::eq(m.spec, spec))
        {
            Some(index) => index,
            None => {
                self.options.push(Matched {
                    spec,
                    occurrences: 0,
                    values: vec![],
                });
                self.options.len() - 1
            }
        };

        let matched = &mut self.options[index];
        matched.occurrences += 1;
        matched.values.extend(value);
    }

    pub(crate) fn push_positional(&mut self, token: impl Into<String>) {
        self.positional.push(token.into())
    }

    pub(crate) fn contains(&self, spec: &OptionSpec) -> bool {
        self.options.iter().any(|m| std::ptr::eq(m.spec, spec))
    }
}
