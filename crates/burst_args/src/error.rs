#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    NoKey,
    InvalidKey(String),
    DuplicateKey(String),
    UnrecognizedOption(String),
    MissingArgument(String),
    ConflictingOptions(String, String),
    MissingOptions(Vec<String>),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoKey => f.write_str("an option needs a short or a long key"),
            Self::InvalidKey(key) => write!(f, "invalid option key: {}", key),
            Self::DuplicateKey(key) => write!(f, "duplicate key found: {}", key),
            Self::UnrecognizedOption(token) => write!(f, "unrecognized option: {}", token),
            Self::MissingArgument(token) => write!(f, "missing argument for option: {}", token),
            Self::ConflictingOptions(option, other) => {
                write!(f, "option {} cannot be used with {}", option, other)
            }
            Self::MissingOptions(missing) => {
                let s = if missing.len() > 1 { "s" } else { "" };
                write!(f, "missing required option{}: {}", s, missing.join(", "))
            }
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
