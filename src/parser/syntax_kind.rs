//! Token kinds produced by the Natural lexer
//!
//! Keywords are only the ones the reference scanner and parser act on;
//! every other word is an `IDENT`.

/// All token kinds in Natural source
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (never emitted in `Lexed::tokens`, tracked for positions only)
    // =========================================================================
    WHITESPACE = 0,
    NEWLINE,
    COMMENT,

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,   // #VAR, CALC-TAX, +AIV
    INTEGER, // 42
    DECIMAL, // 3.14
    STRING,  // 'text' or "text"

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_PAREN,   // (
    R_PAREN,   // )
    L_BRACKET, // [
    R_BRACKET, // ]
    LT,        // <
    GT,        // >
    EQ,        // =
    COMMA,     // ,
    COLON,     // :
    SEMICOLON, // ;
    DOT,       // .
    STAR,      // *
    PLUS,      // +
    MINUS,     // -
    SLASH,     // /

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    DEFINE_KW,
    DATA_KW,
    LOCAL_KW,
    PARAMETER_KW,
    GLOBAL_KW,
    INDEPENDENT_KW,
    USING_KW,
    END_DEFINE_KW,
    SUBROUTINE_KW,
    END_SUBROUTINE_KW,
    FUNCTION_KW,
    END_FUNCTION_KW,
    PERFORM_KW,
    CALLNAT_KW,
    FETCH_KW,
    RETURN_KW,
    REPEAT_KW,
    INCLUDE_KW,
    MAP_KW,
    END_KW,

    // Special
    ERROR,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace or comment)
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::NEWLINE | Self::COMMENT)
    }

    /// Check if this is a keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::DEFINE_KW as u16) && (self as u16) <= (Self::END_KW as u16)
    }

    /// Check if this is a literal
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::IDENT | Self::INTEGER | Self::DECIMAL | Self::STRING
        )
    }

    /// Map an identifier to its keyword kind. Natural keywords are case-insensitive.
    pub fn from_keyword(text: &str) -> Option<Self> {
        let kind = match text.to_ascii_uppercase().as_str() {
            "DEFINE" => Self::DEFINE_KW,
            "DATA" => Self::DATA_KW,
            "LOCAL" => Self::LOCAL_KW,
            "PARAMETER" => Self::PARAMETER_KW,
            "GLOBAL" => Self::GLOBAL_KW,
            "INDEPENDENT" => Self::INDEPENDENT_KW,
            "USING" => Self::USING_KW,
            "END-DEFINE" => Self::END_DEFINE_KW,
            "SUBROUTINE" => Self::SUBROUTINE_KW,
            "END-SUBROUTINE" => Self::END_SUBROUTINE_KW,
            "FUNCTION" => Self::FUNCTION_KW,
            "END-FUNCTION" => Self::END_FUNCTION_KW,
            "PERFORM" => Self::PERFORM_KW,
            "CALLNAT" => Self::CALLNAT_KW,
            "FETCH" => Self::FETCH_KW,
            "RETURN" => Self::RETURN_KW,
            "REPEAT" => Self::REPEAT_KW,
            "INCLUDE" => Self::INCLUDE_KW,
            "MAP" => Self::MAP_KW,
            "END" => Self::END_KW,
            _ => return None,
        };
        Some(kind)
    }
}
