/*
    secp256k1 keys and points, backed by the k256 arithmetic crate.

    Also hosts the x-only point lift used by Taproot style outputs. The
    lift is computed over the base field with the crate's own modular
    arithmetic and the result is re-validated by k256 before it is
    handed out.
*/

use k256::{
    elliptic_curve::{
        sec1::{FromEncodedPoint, ToEncodedPoint},
        PrimeField,
    },
    AffinePoint, EncodedPoint, FieldBytes, ProjectivePoint, Scalar,
};
use num_bigint::BigUint;

use crate::error::{DerivationError, Error};
use crate::field::FieldElement;

const CURVE_NAME: &str = "Secp256k1";

/// Base field prime p.
pub fn field_size() -> BigUint {
    BigUint::parse_bytes(
        b"fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f",
        16,
    )
    .expect("curve constant")
}

/// Group order n.
pub fn order() -> BigUint {
    BigUint::parse_bytes(
        b"fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141",
        16,
    )
    .expect("curve constant")
}

fn scalar_from_bytes(bytes: &[u8; 32]) -> Option<Scalar> {
    let repr = FieldBytes::clone_from_slice(bytes);
    Option::<Scalar>::from(Scalar::from_repr(repr))
}

#[derive(Debug, Clone)]
pub struct Secp256k1PrivateKey(Scalar);

impl Secp256k1PrivateKey {
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

    pub fn public_key(&self) -> Secp256k1PublicKey {
        Secp256k1PublicKey(ProjectivePoint::GENERATOR * self.0)
    }

    /// (k + tweak) mod n, rejecting tweaks outside the group and zero
    /// results. Both rejections are the unlucky-index case of BIP32.
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
pub struct Secp256k1PublicKey(ProjectivePoint);

impl Secp256k1PublicKey {
    /// Accepts compressed (33 byte) or uncompressed (65 byte) SEC1
    /// encodings. The identity is rejected.
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

    /// P + tweak*G, rejecting the identity result.
    pub fn tweak_add(&self, tweak: &[u8; 32]) -> Result<Self, Error> {
        let t = scalar_from_bytes(tweak).ok_or(Error::Derivation(DerivationError::UnluckyIndex))?;
        let sum = self.0 + ProjectivePoint::GENERATOR * t;
        if sum == ProjectivePoint::IDENTITY {
            return Err(DerivationError::UnluckyIndex.into());
        }
        Ok(Self(sum))
    }
}

/*
    Lifts a 32 byte x coordinate to the even-y point on the curve, per
    the BIP-340 convention:

        c = x^3 + 7 mod p
        y = c^((p+1)/4) mod p

    Fails with InvalidPoint when x >= p or when c has no square root
    (y^2 != c).
*/
pub fn lift_x(x_bytes: &[u8; 32]) -> Result<Secp256k1PublicKey, Error> {
    let p = field_size();
    let x_int = BigUint::from_bytes_be(x_bytes);
    if x_int >= p {
        return Err(Error::InvalidPoint("x coordinate not in field"));
    }

    let x = FieldElement::new(x_int, p.clone())?;
    let seven = FieldElement::new(BigUint::from(7u8), p.clone())?;
    let c = x.pow(&BigUint::from(3u8)).add(&seven);

    //p = 3 mod 4, so a square root of c (if any) is c^((p+1)/4)
    let exponent = (&p + BigUint::from(1u8)) / BigUint::from(4u8);
    let y = c.pow(&exponent);
    if y.mul(&y) != c {
        return Err(Error::InvalidPoint("x coordinate has no square root"));
    }

    //Choose the even-y representative
    let y = if y.is_even() { y } else { y.neg() };

    let mut encoded = Vec::with_capacity(65);
    encoded.push(0x04);
    encoded.extend_from_slice(&x.to_bytes_be(32));
    encoded.extend_from_slice(&y.to_bytes_be(32));
    Secp256k1PublicKey::from_bytes(&encoded)
}
