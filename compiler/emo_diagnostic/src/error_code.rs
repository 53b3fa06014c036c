use std::fmt;

/// Error codes for all compiler diagnostics.
///
/// Format: E#### where the first digit indicates the phase:
/// - E1xxx: Type-expression syntax errors
/// - E2xxx: Type errors
///
/// Warnings use W#### with the same phase digits.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Syntax Errors (E1xxx)
    /// Unexpected token
    E1001,
    /// Expected a type
    E1002,

    // Type Errors (E2xxx)
    /// Unknown type
    E2002,
    /// Unknown namespace
    E2003,
    /// Wrong number of generic arguments
    E2004,
    /// Generic argument violates its constraint
    E2005,
    /// Dynamic or generic type not allowed here
    E2006,

    // Type Warnings (W2xxx)
    /// Inferred common type is ambiguous
    W2001,
}

impl ErrorCode {
    /// Get the code as a string (e.g., "E2004").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::W2001 => "W2001",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests;
