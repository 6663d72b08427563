use std::fmt;

/// Options of which at most one may be given.
///
/// Members are named by key and must already be in the
/// [`Registry`](crate::Registry) the group is added to. A required group
/// needs exactly one of its members.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Group {
    members: Vec<Box<str>>,
    required: bool,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<Box<str>>) -> Self {
        self.members.push(key.into());
        self
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// The members' keys, without hyphens once the group is registered.
    pub fn members(&self) -> impl Iterator<Item = &str> + '_ {
        self.members.iter().map(|key| &**key)
    }

    pub(crate) fn with_members(self, members: Vec<Box<str>>) -> Self {
        Self { members, ..self }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, key) in self.members().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            let hyphens = if key.chars().nth(1).is_some() { "--" } else { "-" };
            write!(f, "{}{}", hyphens, key)?;
        }
        f.write_str("]")
    }
}
