//! Commonly used constants

/// Default length of generated identifiers
pub const ID_LENGTH: usize = 20;

/// Characters to use for generating NanoID
pub(crate) const ALPHABETS: [char; 62] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i',
    'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'A', 'B',
    'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U',
    'V', 'W', 'X', 'Y', 'Z',
];

/// Error code used when a connector response carries none
pub const NO_ERROR_CODE: &str = "No error code";

/// Error message used when a connector response carries none
pub const NO_ERROR_MESSAGE: &str = "No error message";

/// Value written in place of a redacted secret
pub const FILTERED: &str = "[FILTERED]";
