use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("unreadable catalog record: {0}")]
    InvalidRecord(String),
    #[error("missing TLE line {0}")]
    MissingLine(u8),
    #[error("line {line}: expected 69 ASCII characters, got {len}")]
    MalformedLength { line: u8, len: usize },
    #[error("line {line}: expected line number {line}, found {found:?}")]
    WrongLineNumber { line: u8, found: char },
    #[error("line {line}: checksum mismatch (expected {expected}, found {found})")]
    ChecksumMismatch { line: u8, expected: u8, found: char },
    #[error("catalog number differs between lines ({line1} vs {line2})")]
    CatalogMismatch { line1: u32, line2: u32 },
    #[error("invalid or non-finite field: {field}")]
    NonFiniteField { field: &'static str },
    #[error("mean motion must be positive, got {0}")]
    NonPositiveMeanMotion(f64),
}
