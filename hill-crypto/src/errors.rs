#[derive(thiserror::Error, Debug)]
pub enum HillCipherError {
    /// Error when an input character is not part of the cipher alphabet.
    #[error("UnknownSymbol: character {0:?} is not in the alphabet")]
    UnknownSymbol(char),
    /// Error when a key matrix has no inverse modulo the alphabet size.
    #[error("SingularKey: {0}")]
    SingularKey(String),
    /// Error when trying to find a modular inverse that doesn't exist (gcd(a, k) != 1).
    #[error("NoInverse: {0}")]
    NoInverse(String),
    /// Error when creating a ring with an invalid modulus (k <= 1).
    #[error("InvalidModulus: {0}")]
    InvalidModulus(String),
    #[error("DimensionMismatch: {0}")]
    DimensionMismatch(String),
    #[error("InternalError: {0}")]
    InternalError(String),

    #[error("Data serialization: {0}")]
    SerializationError(#[from] serde_json::Error),
}
