//! Hill cipher core: key handling, block segmentation, encryption and
//! decryption over the 41-symbol alphabet.

use crate::alphabet::{MODULUS, PAD_INDEX, decode_index, encode_str};
use crate::errors::HillCipherError;
use crate::ring::matrix_ops::{matrix_inverse, matrix_vector_mul, square_dim};
use crate::ring::{Matrix, Ring, Vector};

use serde::{Deserialize, Serialize};

use tracing::debug;

/// An n×n Hill cipher key over Z_41.
///
/// Entries may exceed the modulus in the source matrix; they are reduced
/// mod 41 at use time. Encryption works with any square key; decryption
/// additionally requires the key to be invertible mod 41.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HillKey {
    matrix: Matrix,
}

impl HillKey {
    /// Wraps a matrix as a cipher key, validating that it is square, has a
    /// positive dimension and no ragged rows.
    ///
    /// # Errors
    ///
    /// Returns `HillCipherError::DimensionMismatch` otherwise.
    pub fn try_with(matrix: Matrix) -> Result<Self, HillCipherError> {
        square_dim(&matrix)?;
        Ok(Self { matrix })
    }

    /// The key dimension n, which is also the cipher block size.
    pub fn dimension(&self) -> usize {
        self.matrix.len()
    }

    /// The underlying matrix.
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// Serializes the key matrix to JSON.
    pub fn to_json(&self) -> Result<String, HillCipherError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserializes a key from JSON, re-validating its shape.
    pub fn from_json(data: &str) -> Result<Self, HillCipherError> {
        let key: HillKey = serde_json::from_str(data)?;
        Self::try_with(key.matrix)
    }
}

/// Generates a random `size`×`size` key with entries uniform in `[0, 40]`.
///
/// Makes no invertibility promise; callers that need a decryptable key
/// should regenerate on a `SingularKey` failure from [`decrypt`].
///
/// # Errors
///
/// Returns `HillCipherError::DimensionMismatch` if `size` is zero.
pub fn genkey(size: usize) -> Result<HillKey, HillCipherError> {
    if size == 0 {
        return Err(HillCipherError::DimensionMismatch(
            "Key dimension must be positive".into(),
        ));
    }

    let ring = Ring::try_with(MODULUS)?;
    let mut matrix = vec![vec![0i64; size]; size];
    for row in &mut matrix {
        for x in row.iter_mut() {
            *x = ring.normalize(rand::random::<i64>());
        }
    }

    HillKey::try_with(matrix)
}

/// Groups `indices` into consecutive blocks of `block_size`, right-padding
/// the final short block with [`PAD_INDEX`] (`X`).
///
/// Every returned block has length exactly `block_size`; empty input yields
/// no blocks.
pub fn segment(indices: &Vector, block_size: usize) -> Vec<Vector> {
    let mut blocks: Vec<Vector> = indices
        .chunks(block_size)
        .map(|chunk| chunk.to_vec())
        .collect();

    if let Some(last) = blocks.last_mut() {
        while last.len() < block_size {
            last.push(PAD_INDEX);
        }
    }

    blocks
}

/// Encrypts `message` with `key`: encode to indices, segment into blocks of
/// the key dimension, multiply each block by the key matrix mod 41, decode.
///
/// Deterministic; the ciphertext length is always a multiple of the key
/// dimension. Never fails on key singularity.
///
/// # Errors
///
/// Returns `HillCipherError::UnknownSymbol` if `message` contains a
/// character outside the alphabet.
pub fn encrypt(message: &str, key: &HillKey) -> Result<String, HillCipherError> {
    let indices = encode_str(message)?;

    debug!(
        dimension = key.dimension(),
        symbols = indices.len(),
        "encrypting"
    );

    apply_blocks(&indices, key.matrix())
}

/// Decrypts `ciphertext` with `key` by applying the key's modular inverse
/// block-wise.
///
/// For any plaintext P and invertible key K, `decrypt(encrypt(P, K), K)`
/// reproduces P padded with `X` up to a multiple of the key dimension.
///
/// # Errors
///
/// Returns `HillCipherError::SingularKey` if the key has no inverse mod 41
/// and `HillCipherError::UnknownSymbol` for ciphertext characters outside
/// the alphabet.
pub fn decrypt(ciphertext: &str, key: &HillKey) -> Result<String, HillCipherError> {
    let inverse = matrix_inverse(key.matrix(), &Ring::try_with(MODULUS)?)?;
    let indices = encode_str(ciphertext)?;

    debug!(
        dimension = key.dimension(),
        symbols = indices.len(),
        "decrypting"
    );

    apply_blocks(&indices, &inverse)
}

/// Shared block pipeline: segment `indices` by the matrix dimension, map
/// each block through `matrix` mod 41 and decode the result in block order.
fn apply_blocks(indices: &Vector, matrix: &Matrix) -> Result<String, HillCipherError> {
    let block_size = matrix.len();
    let ring = Ring::try_with(MODULUS)?;

    let mut output = String::with_capacity(indices.len().next_multiple_of(block_size.max(1)));
    for block in segment(indices, block_size) {
        let transformed = matrix_vector_mul(matrix, &block, &ring)?;
        for value in transformed {
            output.push(decode_index(value)?);
        }
    }

    Ok(output)
}
