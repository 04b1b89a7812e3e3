use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Environment variable consulted by `BridgeConfig::from_env`.
pub const POLAR_ENV: &str = "RIFT_POLAR";

/// Calling-language family a bridge session declares to the native factory.
/// Discriminants match the native enum. Deserialization accepts every
/// spelling `FromStr` does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
#[repr(i32)]
pub enum Polar {
    #[default]
    #[serde(rename = "c")]
    C = 0,
    #[serde(rename = "cpp")]
    Cpp = 1,
    #[serde(rename = "cs")]
    CSharp = 2,
}

impl Polar {
    pub fn as_str(self) -> &'static str {
        match self {
            Polar::C => "C",
            Polar::Cpp => "C++",
            Polar::CSharp => "C#",
        }
    }

    pub fn raw(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for Polar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Polar {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "c" => Ok(Polar::C),
            "cpp" | "c++" | "cxx" => Ok(Polar::Cpp),
            "cs" | "c#" | "csharp" => Ok(Polar::CSharp),
            other => Err(format!("unknown polar: {}", other)),
        }
    }
}

impl TryFrom<String> for Polar {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Settings for creating a bridge handle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub polar: Polar,
}

impl BridgeConfig {
    pub fn new(polar: Polar) -> Self {
        Self { polar }
    }

    /// Defaults, overridden by `RIFT_POLAR` when set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` with a caller-supplied variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup(POLAR_ENV) {
            match raw.parse::<Polar>() {
                Ok(polar) => config.polar = polar,
                Err(e) => {
                    tracing::warn!("Ignoring {}={:?}: {}", POLAR_ENV, raw, e);
                }
            }
        }
        config
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
