/*
    nist256p1 (P-256) keys and points, backed by the p256 crate.
    Same capability surface as the secp256k1 module; SLIP10 derives on
    this curve with the exact BIP32 rule, only the HMAC domain key
    differs.
*/

use p256::{
    elliptic_curve::{
        sec1::{FromEncodedPoint, ToEncodedPoint},
        Field, PrimeField,
    },
    AffinePoint, EncodedPoint, FieldBytes, ProjectivePoint, Scalar,
};
use num_bigint::BigUint;

use crate::error::{DerivationError, Error};

const CURVE_NAME: &str = "Nist256p1";

/// Group order n.
pub fn order() -> BigUint {
    BigUint::parse_bytes(
        b"ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551",
        16,
    )
    .expect("curve constant")
}

fn scalar_from_bytes(bytes: &[u8; 32]) -> Option<Scalar> {
    let repr = FieldBytes::clone_from_slice(bytes);
    Option::<Scalar>::from(Scalar::from_repr(repr))
}

#[derive(Debug, Clone)]
pub struct Nist256p1PrivateKey(Scalar);

impl Nist256p1PrivateKey {
    /// Validates 1 <= k < n.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| Error::InvalidKeyBytes(CURVE_NAME))?;
        let scalar = scalar_from_bytes(&bytes).ok_or(Error::InvalidKeyBytes(CURVE_NAME))?;
        if bool::from(scalar.is_zero()) {
            return Err(Error::InvalidKeyBytes(CURVE_NAME));
        }
        Ok(Self(scalar))
    }

    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_repr().into()
    }

    pub fn public_key(&self) -> Nist256p1PublicKey {
        Nist256p1PublicKey(ProjectivePoint::GENERATOR * self.0)
    }

    pub fn tweak_add(&self, tweak: &[u8; 32]) -> Result<Self, Error> {
        let t = scalar_from_bytes(tweak).ok_or(Error::Derivation(DerivationError::UnluckyIndex))?;
        let sum = self.0 + t;
        if bool::from(sum.is_zero()) {
            return Err(DerivationError::UnluckyIndex.into());
        }
        Ok(Self(sum))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nist256p1PublicKey(ProjectivePoint);

impl Nist256p1PublicKey {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let encoded =
            EncodedPoint::from_bytes(bytes).map_err(|_| Error::InvalidKeyBytes(CURVE_NAME))?;
        let affine = Option::<AffinePoint>::from(AffinePoint::from_encoded_point(&encoded))
            .ok_or(Error::InvalidKeyBytes(CURVE_NAME))?;
        if affine == AffinePoint::IDENTITY {
            return Err(Error::InvalidKeyBytes(CURVE_NAME));
        }
        Ok(Self(ProjectivePoint::from(affine)))
    }

    pub fn to_bytes_compressed(&self) -> [u8; 33] {
        let encoded = self.0.to_affine().to_encoded_point(true);
        encoded.as_bytes().try_into().expect("compressed sec1")
    }

    pub fn to_bytes_uncompressed(&self) -> [u8; 65] {
        let encoded = self.0.to_affine().to_encoded_point(false);
        encoded.as_bytes().try_into().expect("uncompressed sec1")
    }

    pub fn tweak_add(&self, tweak: &[u8; 32]) -> Result<Self, Error> {
        let t = scalar_from_bytes(tweak).ok_or(Error::Derivation(DerivationError::UnluckyIndex))?;
        let sum = self.0 + ProjectivePoint::GENERATOR * t;
        if sum == ProjectivePoint::IDENTITY {
            return Err(DerivationError::UnluckyIndex.into());
        }
        Ok(Self(sum))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn private_key_validation() {
        assert!(Nist256p1PrivateKey::from_bytes(&[0u8; 32]).is_err());
        assert!(Nist256p1PrivateKey::from_bytes(&[1u8; 32]).is_ok());
        assert!(Nist256p1PrivateKey::from_bytes(&[1u8; 16]).is_err());
    }

    #[test]
    fn tweak_consistency_between_private_and_public() {
        let mut one = [0u8; 32];
        one[31] = 1;
        let mut five = [0u8; 32];
        five[31] = 5;

        let k = Nist256p1PrivateKey::from_bytes(&one).unwrap();
        let tweaked_priv = k.tweak_add(&five).unwrap();
        let tweaked_pub = k.public_key().tweak_add(&five).unwrap();
        assert_eq!(
            tweaked_priv.public_key().to_bytes_compressed(),
            tweaked_pub.to_bytes_compressed()
        );
    }

    #[test]
    fn public_key_round_trip() {
        let mut one = [0u8; 32];
        one[31] = 1;
        let p = Nist256p1PrivateKey::from_bytes(&one).unwrap().public_key();
        let bytes = p.to_bytes_compressed();
        assert_eq!(Nist256p1PublicKey::from_bytes(&bytes).unwrap(), p);
    }
}
