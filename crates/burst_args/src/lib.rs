mod error;
pub use error::{Error, Result};

mod spec;
pub use spec::OptionSpec;

mod group;
pub use group::Group;

mod registry;
pub use registry::Registry;

mod flatten;
pub use flatten::{flatten, Basic, Flattener, Posix, TrailingValue};

mod matches;
pub use matches::{Matched, Matches};

mod parser;
pub use parser::{parse, Parser, ValuePolicy};
