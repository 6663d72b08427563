use ::serde::{Deserialize, Serialize};
use anyhow::Context;
use std::path::Path;

pub trait Persist<T>
where
    for<'de> T: Deserialize<'de> + Serialize,
{
    fn load(data: &[u8]) -> anyhow::Result<T>;

    fn load_from<P>(file: P) -> anyhow::Result<T>
    where
        P: AsRef<Path>,
    {
        let file = file.as_ref();
        let data =
            std::fs::read(file).with_context(|| format!("cannot read '{}'", file.display()))?;
        Self::load(&data).with_context(|| format!("cannot load '{}'", file.display()))
    }

    fn save<P>(path: P, element: &T) -> anyhow::Result<()>
    where
        P: AsRef<Path>;
}

pub struct Json;

impl<T> Persist<T> for Json
where
    for<'de> T: Deserialize<'de> + Serialize,
{
    fn load(data: &[u8]) -> anyhow::Result<T> {
        serde_json::from_slice(data).context("cannot deserialize json config")
    }

    fn save<P>(path: P, element: &T) -> anyhow::Result<()>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        std::fs::write(path, serde_json::to_vec_pretty(element)?)
            .with_context(|| format!("cannot save to '{}'", path.display()))
    }
}

pub struct Toml;

impl<T> Persist<T> for Toml
where
    for<'de> T: Deserialize<'de> + Serialize,
{
    fn load(data: &[u8]) -> anyhow::Result<T> {
        toml::from_slice(data).context("cannot deserialize toml config")
    }

    fn save<P>(path: P, element: &T) -> anyhow::Result<()>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        std::fs::write(path, toml::to_string_pretty(element)?.as_bytes())
            .with_context(|| format!("cannot save to '{}'", path.display()))
    }
}

/// Whether `path` should be read as JSON rather than TOML.
pub fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("json"))
}
