/*
    Elliptic curve layer.

    Each supported curve family implements the same capability set
    (private key, public key, point arithmetic) in its own module. The
    engine selects an implementation through the Curve tag and match
    dispatch; there is no runtime registry.
*/

pub mod secp256k1;
pub mod nist256p1;
pub mod ed25519;
pub mod kholaw;

use num_bigint::BigUint;

use crate::error::{DerivationError, Error};

pub use self::secp256k1::{Secp256k1PrivateKey, Secp256k1PublicKey};
pub use self::nist256p1::{Nist256p1PrivateKey, Nist256p1PublicKey};
pub use self::ed25519::{Ed25519PrivateKey, Ed25519PublicKey};
pub use self::kholaw::KholawPrivateKey;

/// Supported curve families and their vendor variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Curve {
    Secp256k1,
    Nist256p1,
    Ed25519,
    Ed25519Blake2b,
    Ed25519Monero,
    KholawEd25519,
}

impl Curve {
    pub fn name(&self) -> &'static str {
        match self {
            Curve::Secp256k1 => "Secp256k1",
            Curve::Nist256p1 => "Nist256p1",
            Curve::Ed25519 => "Ed25519",
            Curve::Ed25519Blake2b => "Ed25519-Blake2b",
            Curve::Ed25519Monero => "Ed25519-Monero",
            Curve::KholawEd25519 => "Kholaw-Ed25519",
        }
    }

    /// HMAC domain separation key for master key generation.
    pub fn hmac_key(&self) -> &'static [u8] {
        match self {
            Curve::Secp256k1 => b"Bitcoin seed",
            Curve::Nist256p1 => b"Nist256p1 seed",
            Curve::Ed25519
            | Curve::Ed25519Blake2b
            | Curve::Ed25519Monero
            | Curve::KholawEd25519 => b"ed25519 seed",
        }
    }

    /// Group order of the curve.
    pub fn order(&self) -> BigUint {
        match self {
            Curve::Secp256k1 => secp256k1::order(),
            Curve::Nist256p1 => nist256p1::order(),
            Curve::Ed25519
            | Curve::Ed25519Blake2b
            | Curve::Ed25519Monero
            | Curve::KholawEd25519 => ed25519::order(),
        }
    }

    pub fn private_key_length(&self) -> usize {
        match self {
            Curve::KholawEd25519 => 64,
            _ => 32,
        }
    }

    /// Length of the compressed public key encoding, prefix included.
    pub fn public_key_length(&self) -> usize {
        33
    }
}

impl std::fmt::Display for Curve {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A validated private key for one of the supported curves.
#[derive(Debug, Clone)]
pub enum PrivateKey {
    Secp256k1(Secp256k1PrivateKey),
    Nist256p1(Nist256p1PrivateKey),
    Ed25519(Ed25519PrivateKey),
    KholawEd25519(KholawPrivateKey),
}

impl PrivateKey {
    /// Constructs a private key from raw bytes, validating the
    /// curve specific invariants. Never returns a partially valid key.
    pub fn from_bytes(curve: Curve, bytes: &[u8]) -> Result<Self, Error> {
        match curve {
            Curve::Secp256k1 => Ok(Self::Secp256k1(Secp256k1PrivateKey::from_bytes(bytes)?)),
            Curve::Nist256p1 => Ok(Self::Nist256p1(Nist256p1PrivateKey::from_bytes(bytes)?)),
            Curve::Ed25519 | Curve::Ed25519Blake2b | Curve::Ed25519Monero => {
                Ok(Self::Ed25519(Ed25519PrivateKey::from_bytes(curve, bytes)?))
            }
            Curve::KholawEd25519 => Ok(Self::KholawEd25519(KholawPrivateKey::from_bytes(bytes)?)),
        }
    }

    pub fn curve(&self) -> Curve {
        match self {
            Self::Secp256k1(_) => Curve::Secp256k1,
            Self::Nist256p1(_) => Curve::Nist256p1,
            Self::Ed25519(k) => k.curve(),
            Self::KholawEd25519(_) => Curve::KholawEd25519,
        }
    }

    /// Raw key bytes: 32 bytes, or 64 (kL|kR) for Kholaw-Ed25519.
    pub fn raw(&self) -> Vec<u8> {
        match self {
            Self::Secp256k1(k) => k.to_bytes().to_vec(),
            Self::Nist256p1(k) => k.to_bytes().to_vec(),
            Self::Ed25519(k) => k.to_bytes().to_vec(),
            Self::KholawEd25519(k) => k.to_bytes().to_vec(),
        }
    }

    pub fn public_key(&self) -> PublicKey {
        match self {
            Self::Secp256k1(k) => PublicKey::Secp256k1(k.public_key()),
            Self::Nist256p1(k) => PublicKey::Nist256p1(k.public_key()),
            Self::Ed25519(k) => PublicKey::Ed25519(k.public_key()),
            Self::KholawEd25519(k) => PublicKey::Ed25519(k.public_key()),
        }
    }

    /*
        Adds a 32 byte big endian tweak to the key scalar mod the curve
        order. Only defined for the short Weierstrass curves; the Ed25519
        family derives children with its own rules.
    */
    pub fn tweak_add(&self, tweak: &[u8; 32]) -> Result<Self, Error> {
        match self {
            Self::Secp256k1(k) => Ok(Self::Secp256k1(k.tweak_add(tweak)?)),
            Self::Nist256p1(k) => Ok(Self::Nist256p1(k.tweak_add(tweak)?)),
            _ => Err(DerivationError::SchemeMismatch.into()),
        }
    }
}

/// A validated public key for one of the supported curves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicKey {
    Secp256k1(Secp256k1PublicKey),
    Nist256p1(Nist256p1PublicKey),
    Ed25519(Ed25519PublicKey),
}

impl PublicKey {
    /// Constructs a public key from compressed or uncompressed point
    /// bytes, rejecting points that are not on the curve or are the
    /// identity.
    pub fn from_bytes(curve: Curve, bytes: &[u8]) -> Result<Self, Error> {
        match curve {
            Curve::Secp256k1 => Ok(Self::Secp256k1(Secp256k1PublicKey::from_bytes(bytes)?)),
            Curve::Nist256p1 => Ok(Self::Nist256p1(Nist256p1PublicKey::from_bytes(bytes)?)),
            Curve::Ed25519
            | Curve::Ed25519Blake2b
            | Curve::Ed25519Monero
            | Curve::KholawEd25519 => {
                Ok(Self::Ed25519(Ed25519PublicKey::from_bytes(bytes)?))
            }
        }
    }

    /// Compressed encoding: SEC1 (33 bytes) for Weierstrass curves,
    /// 0x00 prefixed Edwards y (33 bytes) for the Ed25519 family.
    pub fn raw_compressed(&self) -> Vec<u8> {
        match self {
            Self::Secp256k1(k) => k.to_bytes_compressed().to_vec(),
            Self::Nist256p1(k) => k.to_bytes_compressed().to_vec(),
            Self::Ed25519(k) => k.to_bytes_prefixed().to_vec(),
        }
    }

    /// Uncompressed encoding where the curve has one (65 byte SEC1);
    /// the Ed25519 family has a single point encoding.
    pub fn raw_uncompressed(&self) -> Vec<u8> {
        match self {
            Self::Secp256k1(k) => k.to_bytes_uncompressed().to_vec(),
            Self::Nist256p1(k) => k.to_bytes_uncompressed().to_vec(),
            Self::Ed25519(k) => k.to_bytes_prefixed().to_vec(),
        }
    }

    /// Adds tweak*G to the public point. Only defined for the short
    /// Weierstrass curves.
    pub fn tweak_add(&self, tweak: &[u8; 32]) -> Result<Self, Error> {
        match self {
            Self::Secp256k1(k) => Ok(Self::Secp256k1(k.tweak_add(tweak)?)),
            Self::Nist256p1(k) => Ok(Self::Nist256p1(k.tweak_add(tweak)?)),
            Self::Ed25519(_) => Err(DerivationError::PublicDerivationUnsupported.into()),
        }
    }
}
