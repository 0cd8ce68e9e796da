//! The fixed 41-symbol cipher alphabet and its symbol <-> index maps.
//!
//! Order is significant: the position of a symbol in [`ALPHABET`] is its
//! residue in Z_41, and the alphabet size is the ring modulus.

use crate::errors::HillCipherError;
use crate::ring::Vector;

use lazy_static::lazy_static;
use std::collections::HashMap;

/// The cipher alphabet, in index order: `A`-`Z`, `0`-`9`, `.`, `,`, `:`, `?`, space.
pub const ALPHABET: [char; 41] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
    '.', ',', ':', '?', ' ',
];

/// Ring modulus, equal to the alphabet size. 41 is prime, so every nonzero
/// residue has a multiplicative inverse.
pub const MODULUS: u64 = ALPHABET.len() as u64;

/// Symbol appended to fill an incomplete final block.
pub const PAD_SYMBOL: char = 'X';
/// Index of [`PAD_SYMBOL`] in the alphabet.
pub const PAD_INDEX: i64 = 23;

lazy_static! {
    /// A static HashMap mapping an index (0 to 40) to its corresponding
    /// alphabet symbol.
    pub static ref INDEX_TO_SYMBOL_MAP: HashMap<u8, char> = {
        let mut map = HashMap::new();

        for (index, &ch) in ALPHABET.iter().enumerate() {
            map.insert(index as u8, ch);
        }

        map
    };

    /// A static HashMap mapping an alphabet symbol to its index (0 to 40).
    pub static ref SYMBOL_TO_INDEX_MAP: HashMap<char, u8> = {
        let mut map = HashMap::new();

        for (&index, &ch) in INDEX_TO_SYMBOL_MAP.iter() {
            map.insert(ch, index);
        }

        map
    };
}

/// Maps a character to its alphabet index.
///
/// Lookup is case-insensitive: the character is upper-cased first.
///
/// # Errors
///
/// Returns `HillCipherError::UnknownSymbol` if the (upper-cased) character is
/// not one of the 41 alphabet symbols. Unknown input is never mapped to a
/// sentinel index, so it can never leak into the modular arithmetic.
pub fn encode_char(ch: char) -> Result<i64, HillCipherError> {
    let upper = ch.to_ascii_uppercase();
    SYMBOL_TO_INDEX_MAP
        .get(&upper)
        .map(|&index| index as i64)
        .ok_or(HillCipherError::UnknownSymbol(ch))
}

/// Maps an alphabet index back to its symbol.
///
/// Indices produced by the cipher are already reduced mod 41, so callers
/// always pass values in `[0, 40]`; anything else is an internal misuse.
pub fn decode_index(index: i64) -> Result<char, HillCipherError> {
    INDEX_TO_SYMBOL_MAP
        .get(&u8::try_from(index).map_err(|_| {
            HillCipherError::InternalError(format!("Alphabet index {} out of range", index))
        })?)
        .copied()
        .ok_or_else(|| {
            HillCipherError::InternalError(format!("Alphabet index {} out of range", index))
        })
}

/// Encodes a whole string into alphabet indices.
///
/// The first character outside the alphabet aborts the call.
pub fn encode_str(text: &str) -> Result<Vector, HillCipherError> {
    text.chars().map(encode_char).collect()
}
