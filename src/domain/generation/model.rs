use std::fmt;
use std::str::FromStr;

/// The set of models the frontend selector presents. Which of them are
/// actually usable depends on configuration: a key without a configured
/// upstream endpoint is rejected at request time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKey {
    MusicGen,
    Riffusion,
    Suno,
    Udio,
    AceStep,
    Yue,
}

impl ModelKey {
    pub const ALL: [ModelKey; 6] = [
        ModelKey::MusicGen,
        ModelKey::Riffusion,
        ModelKey::Suno,
        ModelKey::Udio,
        ModelKey::AceStep,
        ModelKey::Yue,
    ];

    /// Wire identifier, as used by the frontend selector and the JSON body.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKey::MusicGen => "musicgen",
            ModelKey::Riffusion => "riffusion",
            ModelKey::Suno => "suno",
            ModelKey::Udio => "udio",
            ModelKey::AceStep => "ace-step",
            ModelKey::Yue => "yue",
        }
    }
}

impl fmt::Display for ModelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "musicgen" => Ok(ModelKey::MusicGen),
            "riffusion" => Ok(ModelKey::Riffusion),
            "suno" => Ok(ModelKey::Suno),
            "udio" => Ok(ModelKey::Udio),
            "ace-step" => Ok(ModelKey::AceStep),
            "yue" => Ok(ModelKey::Yue),
            _ => Err(()),
        }
    }
}
