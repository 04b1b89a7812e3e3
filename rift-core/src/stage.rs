use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Pipeline stage identifiers. The numeric code is the stage's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    Tokenization,
    Process,
    Semantic,
    Ir,
    Ast,
    Target,
    Bridge,
}

static STAGE_FAILURE_REGEX: OnceLock<Regex> = OnceLock::new();

impl Stage {
    pub fn code(self) -> u16 {
        match self {
            Stage::Tokenization => 0,
            Stage::Process => 1,
            Stage::Semantic => 111,
            Stage::Ir => 222,
            Stage::Ast => 333,
            Stage::Target => 444,
            Stage::Bridge => 555,
        }
    }

    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            0 => Some(Stage::Tokenization),
            1 => Some(Stage::Process),
            111 => Some(Stage::Semantic),
            222 => Some(Stage::Ir),
            333 => Some(Stage::Ast),
            444 => Some(Stage::Target),
            555 => Some(Stage::Bridge),
            _ => None,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Stage::Tokenization => "Tokenization",
            Stage::Process => "Process/Procedure",
            Stage::Semantic => "Semantic",
            Stage::Ir => "IR",
            Stage::Ast => "AST",
            Stage::Target => "Target",
            Stage::Bridge => "Bridge",
        }
    }

    /// Pull the failing stage out of a native error such as
    /// `"Stage 333 failed: unexpected token"`.
    pub fn from_error_message(message: &str) -> Option<Self> {
        let re = STAGE_FAILURE_REGEX.get_or_init(|| {
            Regex::new(r"^Stage ([0-9]{3}) failed").expect("Invalid Stage Regex")
        });
        let code = re.captures(message.trim_start())?.get(1)?.as_str();
        Self::from_code(code.parse().ok()?)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03} ({})", self.code(), self.description())
    }
}
