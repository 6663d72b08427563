use std::fmt;

use burst_args::Matches;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Report {
    pub options: Vec<Entry>,
    pub positional: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Entry {
    pub option: String,
    pub occurrences: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

impl Report {
    pub fn new(matches: &Matches<'_>) -> Self {
        let options = matches
            .iter()
            .map(|m| Entry {
                option: m.spec.to_string(),
                occurrences: m.occurrences,
                values: m.values.clone(),
            })
            .collect();

        Self {
            options,
            positional: matches.positional().to_vec(),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for Entry {
            option,
            occurrences,
            values,
        } in &self.options
        {
            write!(f, "{}", option)?;
            if *occurrences > 1 {
                write!(f, " (x{})", occurrences)?;
            }
            if !values.is_empty() {
                write!(f, " = {}", values.join(", "))?;
            }
            writeln!(f)?;
        }

        if !self.positional.is_empty() {
            writeln!(f, "positional: {}", self.positional.join(" "))?;
        }
        Ok(())
    }
}
