use crate::{OptionSpec, Registry};

const TERMINATOR: &str = "--";

/// Where a value-taking option finds its value when nothing follows it in
/// its own token (`-o` at the end of a burst, or a bare `--output`).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TrailingValue {
    /// The next raw token is the value and is copied verbatim.
    NextToken,
    /// The next raw token is flattened like any other. A positional token is
    /// still taken as the value and never starts the boundary.
    Flatten,
}

impl Default for TrailingValue {
    fn default() -> Self {
        Self::NextToken
    }
}

/// Normalizes a raw argument vector into one option or value per token.
pub trait Flattener {
    fn flatten(
        &self,
        registry: &Registry,
        args: &[&str],
        stop_at_non_option: bool,
    ) -> Vec<String>;
}

impl<F> Flattener for Box<F>
where
    F: Flattener + ?Sized,
{
    fn flatten(
        &self,
        registry: &Registry,
        args: &[&str],
        stop_at_non_option: bool,
    ) -> Vec<String> {
        (**self).flatten(registry, args, stop_at_non_option)
    }
}

impl<F> Flattener for &F
where
    F: Flattener + ?Sized,
{
    fn flatten(
        &self,
        registry: &Registry,
        args: &[&str],
        stop_at_non_option: bool,
    ) -> Vec<String> {
        (**self).flatten(registry, args, stop_at_non_option)
    }
}

/// POSIX style flattening: `-abc` is burst into `-a -b -c` and
/// `--name=value` is split into `--name value`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Posix {
    trailing: TrailingValue,
}

impl Posix {
    pub const fn new() -> Self {
        Self {
            trailing: TrailingValue::NextToken,
        }
    }

    pub const fn trailing_value(mut self, trailing: TrailingValue) -> Self {
        self.trailing = trailing;
        self
    }
}

impl Flattener for Posix {
    fn flatten(
        &self,
        registry: &Registry,
        args: &[&str],
        stop_at_non_option: bool,
    ) -> Vec<String> {
        if !has_options(args) {
            return args.iter().map(|s| s.to_string()).collect();
        }

        let mut state = State {
            registry,
            stop_at_non_option,
            out: Vec::with_capacity(args.len()),
            pending: false,
        };

        let mut iter = args.iter();
        while let Some(&token) = iter.next() {
            let pending = std::mem::take(&mut state.pending);
            if pending && self.trailing == TrailingValue::NextToken {
                log::trace!("'{}' is the value of the previous option", token);
                state.push(token);
                continue;
            }

            let flow = match token {
                TERMINATOR => {
                    state.push(token);
                    Flow::Rest
                }
                "-" => {
                    state.push(token);
                    Flow::Continue
                }
                _ if token.starts_with(TERMINATOR) => state.long(token),
                _ if token.starts_with('-') => state.burst(token, pending),
                _ => state.non_option(token, pending),
            };

            if let Flow::Rest = flow {
                state.out.extend(iter.map(|s| s.to_string()));
                break;
            }
        }

        state.out
    }
}

/// Flattening without bursting or `=` splitting. Tokens are only copied,
/// with the `--` boundary inserted when stopping at the first non-option.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Basic;

impl Flattener for Basic {
    fn flatten(
        &self,
        registry: &Registry,
        args: &[&str],
        stop_at_non_option: bool,
    ) -> Vec<String> {
        if !has_options(args) {
            return args.iter().map(|s| s.to_string()).collect();
        }

        let mut state = State {
            registry,
            stop_at_non_option,
            out: Vec::with_capacity(args.len()),
            pending: false,
        };

        let mut iter = args.iter();
        while let Some(&token) = iter.next() {
            let pending = std::mem::take(&mut state.pending);

            let flow = match token {
                TERMINATOR => {
                    state.push(token);
                    Flow::Rest
                }
                _ if token.starts_with('-') => {
                    state.pending = registry.lookup(token).map_or(false, OptionSpec::has_value);
                    state.push(token);
                    Flow::Continue
                }
                _ => state.non_option(token, pending),
            };

            if let Flow::Rest = flow {
                state.out.extend(iter.map(|s| s.to_string()));
                break;
            }
        }

        state.out
    }
}

enum Flow {
    Continue,
    // the rest of the input is copied as is
    Rest,
}

struct State<'a> {
    registry: &'a Registry,
    stop_at_non_option: bool,
    out: Vec<String>,
    // the last option emitted is still waiting for its value
    pending: bool,
}

impl<'a> State<'a> {
    fn push(&mut self, token: impl Into<String>) {
        self.out.push(token.into())
    }

    fn long(&mut self, token: &str) -> Flow {
        match token.split_once('=') {
            Some((option, value)) => {
                log::trace!("splitting '{}' into '{}' '{}'", token, option, value);
                self.push(option);
                self.push(value);
                if option == TERMINATOR {
                    return Flow::Rest;
                }
            }
            None => {
                self.pending = self
                    .registry
                    .lookup(token)
                    .map_or(false, OptionSpec::has_value);
                self.push(token);
            }
        }
        Flow::Continue
    }

    fn burst(&mut self, token: &str, pending: bool) -> Flow {
        let registry = self.registry;
        let body = &token[1..];
        for (pos, ch) in body.char_indices() {
            let spec = match registry.short(ch) {
                Some(spec) => spec,
                None if pos == 0 => return self.non_option(token, pending),
                None => {
                    log::trace!("stopped bursting '{}' at '{}'", token, ch);
                    return self.non_option(&body[pos..], false);
                }
            };

            self.push(format!("-{}", ch));
            if spec.has_value() {
                let rest = &body[pos + ch.len_utf8()..];
                if rest.is_empty() {
                    self.pending = true;
                } else {
                    self.push(rest);
                }
                break;
            }
        }
        Flow::Continue
    }

    fn non_option(&mut self, token: &str, pending: bool) -> Flow {
        if self.stop_at_non_option && !pending {
            log::trace!("stopping at non-option '{}'", token);
            self.push(TERMINATOR);
            self.push(token);
            return Flow::Rest;
        }
        self.push(token);
        Flow::Continue
    }
}

fn has_options(args: &[&str]) -> bool {
    args.iter().any(|s| s.starts_with('-'))
}

/// Flattens `args` with the default [`Posix`] flattener.
pub fn flatten(registry: &Registry, args: &[&str], stop_at_non_option: bool) -> Vec<String> {
    Posix::new().flatten(registry, args, stop_at_non_option)
}
