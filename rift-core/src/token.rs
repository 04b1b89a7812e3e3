//! Token triplet model (type, value, memory) plus the packed validation word.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token payload is locked and cannot be replaced")]
    Locked,

    #[error("unknown token kind tag: {0}")]
    UnknownKind(u32),
}

/// Lexical kind of a token. Discriminants match the native tag values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum TokenType {
    Unknown = 0,
    Int = 1,
    Role = 2,
    Mask = 3,
    Op = 4,
    QByte = 5,
    QRole = 6,
    QMatrix = 7,
    Identifier = 8,
    Keyword = 9,
    Literal = 10,
    Operator = 11,
    Delimiter = 12,
    Eof = 13,
}

impl TokenType {
    pub const ALL: [TokenType; 14] = [
        TokenType::Unknown,
        TokenType::Int,
        TokenType::Role,
        TokenType::Mask,
        TokenType::Op,
        TokenType::QByte,
        TokenType::QRole,
        TokenType::QMatrix,
        TokenType::Identifier,
        TokenType::Keyword,
        TokenType::Literal,
        TokenType::Operator,
        TokenType::Delimiter,
        TokenType::Eof,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TokenType::Unknown => "UNKNOWN",
            TokenType::Int => "INT",
            TokenType::Role => "ROLE",
            TokenType::Mask => "MASK",
            TokenType::Op => "OP",
            TokenType::QByte => "QBYTE",
            TokenType::QRole => "QROLE",
            TokenType::QMatrix => "QMATRIX",
            TokenType::Identifier => "IDENTIFIER",
            TokenType::Keyword => "KEYWORD",
            TokenType::Literal => "LITERAL",
            TokenType::Operator => "OPERATOR",
            TokenType::Delimiter => "DELIMITER",
            TokenType::Eof => "EOF",
        }
    }

    /// The native numeric tag.
    pub fn tag(self) -> u32 {
        self as u32
    }
}

impl TryFrom<u32> for TokenType {
    type Error = TokenError;

    fn try_from(tag: u32) -> Result<Self, Self::Error> {
        TokenType::ALL
            .get(tag as usize)
            .copied()
            .ok_or(TokenError::UnknownKind(tag))
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The payload of a triplet. Only one representation is ever meaningful,
/// so it is a sum type rather than three parallel fields.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum TokenValue {
    #[default]
    None,
    Int(i64),
    Float(f64),
    /// Owned copy. Never points into a native buffer.
    Str(String),
}

impl TokenValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            TokenValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            TokenValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TokenValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, TokenValue::None)
    }
}

/// Memory bookkeeping carried alongside every token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenMemory {
    pub alignment: u32,
    pub size: u32,
    pub flags: u32,
}

impl TokenMemory {
    pub fn new(alignment: u32, size: u32, flags: u32) -> Self {
        Self {
            alignment,
            size,
            flags,
        }
    }
}

/// Packed validation word.
///
/// Bit 0 = allocated, bit 1 = initialized, bit 2 = locked. The remaining
/// bits are carried through untouched so a value read from the native side
/// round-trips exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationBits(u32);

impl ValidationBits {
    pub const ALLOCATED: u32 = 0x01;
    pub const INITIALIZED: u32 = 0x02;
    pub const LOCKED: u32 = 0x04;

    const VALID_MASK: u32 = Self::ALLOCATED | Self::INITIALIZED;

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Allocated + initialized, not locked.
    pub const fn valid() -> Self {
        Self(Self::VALID_MASK)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_valid(self) -> bool {
        self.0 & Self::VALID_MASK == Self::VALID_MASK
    }

    pub const fn is_locked(self) -> bool {
        self.0 & Self::LOCKED != 0
    }

    const fn with_lock(self) -> Self {
        Self(self.0 | Self::LOCKED)
    }
}

/// Where a token sits in its validation life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    Unvalidated,
    Valid,
    ValidLocked,
}

/// One lexical unit: kind, payload, memory descriptor and validation word.
///
/// Fields are private; a triplet is built in one step and only moves forward
/// (`lock`), never back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenTriplet {
    kind: TokenType,
    value: TokenValue,
    memory: TokenMemory,
    validation: ValidationBits,
}

impl TokenTriplet {
    /// Build a triplet with an explicit validation word, e.g. one copied off
    /// the native side.
    pub fn new(
        kind: TokenType,
        value: TokenValue,
        memory: TokenMemory,
        validation: ValidationBits,
    ) -> Self {
        Self {
            kind,
            value,
            memory,
            validation,
        }
    }

    /// Build a finalized triplet (allocated + initialized).
    pub fn valid(kind: TokenType, value: TokenValue, memory: TokenMemory) -> Self {
        Self::new(kind, value, memory, ValidationBits::valid())
    }

    pub fn kind(&self) -> TokenType {
        self.kind
    }

    pub fn value(&self) -> &TokenValue {
        &self.value
    }

    pub fn memory(&self) -> TokenMemory {
        self.memory
    }

    pub fn alignment(&self) -> u32 {
        self.memory.alignment
    }

    pub fn size(&self) -> u32 {
        self.memory.size
    }

    pub fn flags(&self) -> u32 {
        self.memory.flags
    }

    pub fn validation_bits(&self) -> ValidationBits {
        self.validation
    }

    pub fn is_valid(&self) -> bool {
        self.validation.is_valid()
    }

    pub fn is_locked(&self) -> bool {
        self.validation.is_locked()
    }

    pub fn state(&self) -> TokenState {
        match (self.is_valid(), self.is_locked()) {
            (false, _) => TokenState::Unvalidated,
            (true, false) => TokenState::Valid,
            (true, true) => TokenState::ValidLocked,
        }
    }

    /// Set the lock bit. There is no way back.
    pub fn lock(self) -> Self {
        Self {
            validation: self.validation.with_lock(),
            ..self
        }
    }

    /// Replace the payload, keeping everything else.
    pub fn with_value(self, value: TokenValue) -> Result<Self, TokenError> {
        if self.is_locked() {
            return Err(TokenError::Locked);
        }
        Ok(Self { value, ..self })
    }
}

impl fmt::Display for TokenTriplet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        match &self.value {
            TokenValue::None => {}
            TokenValue::Int(v) => write!(f, "({})", v)?,
            TokenValue::Float(v) => write!(f, "({})", v)?,
            TokenValue::Str(s) => write!(f, "({:?})", s)?,
        }
        write!(f, " [bits=0x{:02x}]", self.validation.bits())
    }
}
