use std::path::PathBuf;

use burst_args::{OptionSpec, Parser, Registry};

use crate::Config;

const OPTIONS: &[(&str, &str)] = &[
    ("-c, --config <file>", "the option definitions to load"),
    ("-j, --json", "print json instead of text"),
    ("-t, --tokens", "only print the flattened tokens"),
    ("-s, --stop-at-non-option", "stop at the first non-option"),
    ("-i, --init", "write an example config and exit"),
    ("-h, --help", "print this message and exit"),
];

/// The flags `burst` takes for itself. Everything from the first token it
/// does not know is the argument vector to parse.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Args {
    pub config: Option<PathBuf>,
    pub json: bool,
    pub tokens: bool,
    pub stop_at_non_option: bool,
    pub init: bool,
    pub help: bool,
    pub rest: Vec<String>,
}

impl Args {
    pub fn parse(args: &[&str]) -> anyhow::Result<Self> {
        let registry = Self::registry()?;
        let matches = Parser::posix()
            .stop_at_non_option(true)
            .parse(&registry, args)?;

        Ok(Self {
            config: matches.value("config").map(PathBuf::from),
            json: matches.is_present("json"),
            tokens: matches.is_present("tokens"),
            stop_at_non_option: matches.is_present("stop-at-non-option"),
            init: matches.is_present("init"),
            help: matches.is_present("help"),
            rest: matches.into_positional(),
        })
    }

    /// `--config`, then `BURST_CONFIG`, then `burst.toml`.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .or_else(|| std::env::var_os("BURST_CONFIG").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(Config::DEFAULT_PATH))
    }

    pub fn usage() -> anyhow::Result<String> {
        let registry = Self::registry()?;
        let options = registry.iter().map(|spec| spec.to_string()).collect::<Vec<_>>();
        let width = options.iter().map(String::len).max().unwrap_or_default();

        let mut out = String::from("usage: burst [options] [--] [args...]\n\n");
        for (option, spec) in options.iter().zip(registry.iter()) {
            out.push_str(&format!(
                "  {:width$}  {}\n",
                option,
                spec.help().unwrap_or_default(),
                width = width
            ));
        }
        Ok(out)
    }

    fn registry() -> anyhow::Result<Registry> {
        let mut registry = Registry::new();
        for (usage, help) in OPTIONS {
            registry.register(OptionSpec::usage(usage)?.with_help(*help))?;
        }
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn own_flags() {
        let args = Args::parse(&["-jc", "x.toml", "-abc", "foo"]).unwrap();
        assert!(args.json);
        assert_eq!(args.config, Some(PathBuf::from("x.toml")));
        assert_eq!(args.rest, vec!["-abc", "foo"]);
        assert_eq!(args.config_path(), PathBuf::from("x.toml"));

        let args = Args::parse(&["-t", "--", "-j", "x"]).unwrap();
        assert!(args.tokens);
        assert!(!args.json);
        assert_eq!(args.rest, vec!["-j", "x"]);

        let args = Args::parse(&["--config=a.json", "--stop-at-non-option", "x", "-t"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("a.json")));
        assert!(args.stop_at_non_option);
        assert!(!args.tokens);
        assert_eq!(args.rest, vec!["x", "-t"]);

        let args = Args::parse(&["-tj-x"]).unwrap();
        assert!(args.tokens && args.json);
        assert_eq!(args.rest, vec!["-x"]);

        assert_eq!(Args::parse(&[]).unwrap(), Args::default());
    }

    #[test]
    fn own_flag_errors() {
        let err = Args::parse(&["-c"]).unwrap_err();
        assert_eq!(err.to_string(), "missing argument for option: -c");

        let err = Args::parse(&["--bogus"]).unwrap_err();
        assert_eq!(err.to_string(), "unrecognized option: --bogus");
    }

    #[test]
    fn usage() {
        let usage = Args::usage().unwrap();
        assert!(usage.starts_with("usage: burst"));
        assert!(usage.contains("  -c, --config <file>       the option definitions to load\n"));
        assert_eq!(usage.lines().count(), 2 + OPTIONS.len());
    }
}
