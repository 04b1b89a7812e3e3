use regex::Regex;
use std::sync::OnceLock;

/// Binds a regex capture group (zero-based, not counting the whole match)
/// to a symbolic name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureBinding {
    pub index: usize,
    pub name: &'static str,
}

/// A pattern plus the names of its capture groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternDescriptor {
    pub pattern: &'static str,
    pub captures: &'static [CaptureBinding],
}

impl PatternDescriptor {
    pub fn binding(&self, index: usize) -> Option<&CaptureBinding> {
        self.captures.iter().find(|b| b.index == index)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.captures.iter().find(|b| b.name == name).map(|b| b.index)
    }
}

/// One uppercase letter followed by one digit, at the end of the input.
pub const HEX_PATTERN: PatternDescriptor = PatternDescriptor {
    pattern: r"([A-Z])([0-9])$",
    captures: &[
        CaptureBinding {
            index: 0,
            name: "args",
        },
        CaptureBinding {
            index: 1,
            name: "vargs",
        },
    ],
};

static HEX_REGEX: OnceLock<Regex> = OnceLock::new();

/// A named sub-match, borrowed from the matched input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternCapture<'a> {
    pub index: usize,
    pub name: &'static str,
    pub slice: &'a str,
}

/// Result of a successful hex match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexMatch<'a> {
    pub alpha: char,
    pub numeric: u8,
    captures: [PatternCapture<'a>; 2],
}

impl<'a> HexMatch<'a> {
    pub fn captures(&self) -> &[PatternCapture<'a>] {
        &self.captures
    }

    pub fn capture(&self, name: &str) -> Option<&PatternCapture<'a>> {
        self.captures.iter().find(|c| c.name == name)
    }
}

/// Stateless matcher for the `[A-Z][0-9]` end anchor.
pub struct HexMatcher;

impl HexMatcher {
    pub fn descriptor() -> &'static PatternDescriptor {
        &HEX_PATTERN
    }

    /// `None` when the input does not end in letter + digit. That is an
    /// ordinary outcome, not an error.
    pub fn matches(input: &str) -> Option<HexMatch<'_>> {
        let re = HEX_REGEX
            .get_or_init(|| Regex::new(HEX_PATTERN.pattern).expect("Invalid Hex Regex"));

        let caps = re.captures(input)?;
        let alpha_slice = caps.get(1)?.as_str();
        let digit_slice = caps.get(2)?.as_str();

        let alpha = alpha_slice.chars().next()?;
        let numeric = digit_slice.parse::<u8>().ok()?;

        let [args, vargs] = [&HEX_PATTERN.captures[0], &HEX_PATTERN.captures[1]];

        Some(HexMatch {
            alpha,
            numeric,
            captures: [
                PatternCapture {
                    index: args.index,
                    name: args.name,
                    slice: alpha_slice,
                },
                PatternCapture {
                    index: vargs.index,
                    name: vargs.name,
                    slice: digit_slice,
                },
            ],
        })
    }

    pub fn is_match(input: &str) -> bool {
        Self::matches(input).is_some()
    }
}
