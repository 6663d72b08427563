use crate::{Basic, Error, Flattener, Matches, OptionSpec, Posix, Registry, Result};

/// What an option that takes a value accepts as that value.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ValuePolicy {
    /// Whatever token follows the option.
    AnyToken,
    /// Any following token except `--` or another registered option, which
    /// leave the option without its value.
    RejectOptions,
}

impl Default for ValuePolicy {
    fn default() -> Self {
        Self::AnyToken
    }
}

impl ValuePolicy {
    fn accepts(self, registry: &Registry, token: &str) -> bool {
        match self {
            Self::AnyToken => true,
            Self::RejectOptions => {
                token != "--" && !(token.starts_with('-') && registry.lookup(token).is_some())
            }
        }
    }
}

/// Flattens and then parses an argument vector.
///
/// The flattener is a strategy, [`Posix`] or [`Basic`] or anything else that
/// implements [`Flattener`]. A parser holds no state between calls.
#[derive(Clone, Debug, Default)]
pub struct Parser<F = Posix> {
    flattener: F,
    stop_at_non_option: bool,
    values: ValuePolicy,
}

impl Parser<Posix> {
    pub fn posix() -> Self {
        Self::new(Posix::new())
    }
}

impl Parser<Basic> {
    pub fn basic() -> Self {
        Self::new(Basic)
    }
}

impl<F> Parser<F>
where
    F: Flattener,
{
    pub fn new(flattener: F) -> Self {
        Self {
            flattener,
            stop_at_non_option: false,
            values: ValuePolicy::default(),
        }
    }

    /// Treat everything from the first non-option onwards as positional.
    pub fn stop_at_non_option(mut self, stop: bool) -> Self {
        self.stop_at_non_option = stop;
        self
    }

    pub fn value_policy(mut self, policy: ValuePolicy) -> Self {
        self.values = policy;
        self
    }

    pub fn flatten(&self, registry: &Registry, args: &[&str]) -> Vec<String> {
        self.flattener.flatten(registry, args, self.stop_at_non_option)
    }

    pub fn parse<'r>(&self, registry: &'r Registry, args: &[&str]) -> Result<Matches<'r>> {
        let tokens = self.flatten(registry, args);
        log::debug!("flattened {:?} into {:?}", args, tokens);
        parse_with(registry, &tokens, self.values)
    }
}

/// Parses already flattened `tokens`, binding values to options and
/// collecting positional arguments.
///
/// Every required option or group that never showed up is reported in a
/// single [`Error::MissingOptions`]. Giving two members of a
/// [`Group`](crate::Group) is an [`Error::ConflictingOptions`].
pub fn parse<'r, S>(registry: &'r Registry, tokens: &[S]) -> Result<Matches<'r>>
where
    S: AsRef<str>,
{
    parse_with(registry, tokens, ValuePolicy::default())
}

fn parse_with<'r, S>(
    registry: &'r Registry,
    tokens: &[S],
    policy: ValuePolicy,
) -> Result<Matches<'r>>
where
    S: AsRef<str>,
{
    let mut matches = Matches::default();

    let mut iter = tokens.iter().map(AsRef::<str>::as_ref);
    while let Some(token) = iter.next() {
        match token {
            "--" => {
                iter.by_ref().for_each(|s| matches.push_positional(s));
                break;
            }
            "-" => matches.push_positional(token),
            _ if token.starts_with('-') => {
                let spec = registry
                    .lookup(token)
                    .ok_or_else(|| Error::UnrecognizedOption(token.to_string()))?;

                check_group(registry, &matches, spec, token)?;

                if !spec.has_value() {
                    matches.record(spec, None);
                    continue;
                }

                match iter.next() {
                    Some(value) if policy.accepts(registry, value) => {
                        matches.record(spec, Some(value.to_string()))
                    }
                    _ => return Err(Error::MissingArgument(token.to_string())),
                }
            }
            _ => matches.push_positional(token),
        }
    }

    let groups = registry
        .groups()
        .filter(|group| group.is_required())
        .filter(|group| {
            !group
                .members()
                .filter_map(|key| registry.lookup(key))
                .any(|spec| matches.contains(spec))
        })
        .map(ToString::to_string);

    let missing = registry
        .required()
        .filter(|spec| !matches.contains(spec))
        .map(ToString::to_string)
        .chain(groups)
        .collect::<Vec<_>>();

    if !missing.is_empty() {
        return Err(Error::MissingOptions(missing));
    }

    Ok(matches)
}

// another member of the option's group was already given
fn check_group(
    registry: &Registry,
    matches: &Matches<'_>,
    spec: &OptionSpec,
    token: &str,
) -> Result<()> {
    let group = match registry.group(&spec.key()) {
        Some(group) => group,
        None => return Ok(()),
    };

    let taken = group
        .members()
        .filter_map(|key| registry.lookup(key))
        .find(|other| !std::ptr::eq(*other, spec) && matches.contains(other));

    match taken {
        Some(other) => Err(Error::ConflictingOptions(token.to_string(), other.flag())),
        None => Ok(()),
    }
}
