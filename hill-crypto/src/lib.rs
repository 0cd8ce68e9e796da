//! Classical Hill cipher over the 41-symbol alphabet
//! `A`-`Z`, `0`-`9`, `.`, `,`, `:`, `?`, space.
//!
//! Blocks of symbol indices are multiplied against an invertible key matrix
//! mod 41 to encrypt, and against its modular inverse to decrypt. Not a
//! secure cipher; see [`cipher`] for the public operations.

pub mod alphabet;
pub mod cipher;
pub mod errors;
pub mod ring;

pub use cipher::{HillKey, decrypt, encrypt, genkey};
pub use errors::HillCipherError;
