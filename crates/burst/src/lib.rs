mod cli;
pub use cli::Args;

mod config;
pub use config::{Config, GroupEntry, OptionEntry, Settings, Style, Trailing};

mod persist;
pub use persist::{Json, Persist, Toml};

mod report;
pub use report::{Entry, Report};
