/*
    Ed25519 family keys: the SLIP10 standard form plus the Blake2b
    (Nano style) and Monero variants.

    Private keys are the 32 byte seed form. The Blake2b variant hashes
    the seed with Blake2b-512 instead of SHA-512 before clamping; the
    Monero variant treats the bytes as an already reduced scalar and
    multiplies the generator directly, so its validity rule is stricter
    than the seed form.
*/

use curve25519_dalek::{
    edwards::{CompressedEdwardsY, EdwardsPoint},
    scalar::Scalar,
    traits::Identity,
};
use ed25519_dalek::SigningKey;
use num_bigint::BigUint;
use zeroize::Zeroizing;

use crate::ecc::Curve;
use crate::error::Error;
use crate::hash::blake2b_512;

/// Group order l = 2^252 + 27742317777372353535851937790883648493.
pub fn order() -> BigUint {
    BigUint::parse_bytes(
        b"7237005577332262213973186563042994240857116359379907606001950938285454250989",
        10,
    )
    .expect("curve constant")
}

/// True if the bytes are a canonical reduced scalar (< l).
pub fn is_valid_scalar(bytes: &[u8; 32]) -> bool {
    Option::<Scalar>::from(Scalar::from_canonical_bytes(*bytes)).is_some()
}

#[derive(Debug, Clone)]
pub struct Ed25519PrivateKey {
    curve: Curve,
    bytes: Zeroizing<[u8; 32]>,
}

impl Ed25519PrivateKey {
    pub fn from_bytes(curve: Curve, bytes: &[u8]) -> Result<Self, Error> {
        debug_assert!(matches!(
            curve,
            Curve::Ed25519 | Curve::Ed25519Blake2b | Curve::Ed25519Monero
        ));
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| Error::InvalidKeyBytes(curve.name()))?;

        //Monero keys are raw scalars, not seeds, and must already be reduced
        if curve == Curve::Ed25519Monero && !is_valid_scalar(&bytes) {
            return Err(Error::InvalidKeyBytes(curve.name()));
        }
        Ok(Self { curve, bytes: Zeroizing::new(bytes) })
    }

    pub fn curve(&self) -> Curve {
        self.curve
    }

    pub fn to_bytes(&self) -> [u8; 32] {
        *self.bytes
    }

    pub fn public_key(&self) -> Ed25519PublicKey {
        let point = match self.curve {
            Curve::Ed25519 => {
                let signing_key = SigningKey::from_bytes(&self.bytes);
                let compressed = CompressedEdwardsY(signing_key.verifying_key().to_bytes());
                compressed.decompress().expect("verifying key point")
            }
            Curve::Ed25519Blake2b => {
                let h = Zeroizing::new(blake2b_512(&*self.bytes));
                let mut scalar_bytes = Zeroizing::new([0u8; 32]);
                scalar_bytes.copy_from_slice(&h[..32]);
                EdwardsPoint::mul_base_clamped(*scalar_bytes)
            }
            Curve::Ed25519Monero => {
                let scalar = Option::<Scalar>::from(Scalar::from_canonical_bytes(*self.bytes))
                    .expect("validated at construction");
                EdwardsPoint::mul_base(&scalar)
            }
            _ => unreachable!("non-edwards curve in ed25519 key"),
        };
        Ed25519PublicKey(point)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ed25519PublicKey(EdwardsPoint);

impl Ed25519PublicKey {
    /// Accepts the 32 byte Edwards encoding or the 0x00 prefixed
    /// 33 byte compressed form. The identity point is rejected.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let raw: &[u8] = match bytes.len() {
            32 => bytes,
            33 if bytes[0] == 0x00 => &bytes[1..],
            _ => return Err(Error::InvalidKeyBytes("Ed25519")),
        };
        let compressed = CompressedEdwardsY::from_slice(raw)
            .map_err(|_| Error::InvalidKeyBytes("Ed25519"))?;
        let point = compressed
            .decompress()
            .ok_or(Error::InvalidKeyBytes("Ed25519"))?;
        Self::from_point(point)
    }

    pub fn from_point(point: EdwardsPoint) -> Result<Self, Error> {
        if point == EdwardsPoint::identity() {
            return Err(Error::InvalidPoint("identity point"));
        }
        Ok(Self(point))
    }

    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.compress().to_bytes()
    }

    /// 0x00 prefixed form, length matched with the SEC1 compressed
    /// encodings of the Weierstrass curves.
    pub fn to_bytes_prefixed(&self) -> [u8; 33] {
        let mut out = [0u8; 33];
        out[1..].copy_from_slice(&self.to_bytes());
        out
    }

    pub fn point(&self) -> &EdwardsPoint {
        &self.0
    }
}
