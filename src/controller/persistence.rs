use std::path::Path;

use super::options::ControllerOptions;

/// Failure to load or save [`ControllerOptions`].
#[derive(Debug)]
pub enum OptionsError {
    RonSerialize(ron::Error),
    RonDeserialize(ron::error::SpannedError),
    Io(std::io::Error),
}

impl std::fmt::Display for OptionsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RonSerialize(err) => write!(f, "ron serialize error: {err}"),
            Self::RonDeserialize(err) => write!(f, "ron deserialize error: {err}"),
            Self::Io(err) => write!(f, "io error: {err}"),
        }
    }
}

impl std::error::Error for OptionsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::RonSerialize(err) => Some(err),
            Self::RonDeserialize(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for OptionsError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ron::Error> for OptionsError {
    fn from(err: ron::Error) -> Self {
        Self::RonSerialize(err)
    }
}

impl From<ron::error::SpannedError> for OptionsError {
    fn from(err: ron::error::SpannedError) -> Self {
        Self::RonDeserialize(err)
    }
}

fn pretty_ron_config() -> ron::ser::PrettyConfig {
    ron::ser::PrettyConfig::new()
        .depth_limit(4)
        .separate_tuple_members(true)
        .enumerate_arrays(false)
}

impl ControllerOptions {
    /// Missing fields keep their defaults.
    pub fn from_ron_str(text: &str) -> Result<Self, OptionsError> {
        Ok(ron::from_str(text)?)
    }

    pub fn from_ron_file(path: impl AsRef<Path>) -> Result<Self, OptionsError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ron_str(&text)
    }

    pub fn to_ron_string(&self) -> Result<String, OptionsError> {
        Ok(ron::ser::to_string_pretty(self, pretty_ron_config())?)
    }

    pub fn save_to_ron_file(&self, path: impl AsRef<Path>) -> Result<(), OptionsError> {
        std::fs::write(path, self.to_ron_string()?)?;
        Ok(())
    }
}
