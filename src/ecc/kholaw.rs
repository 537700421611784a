/*
    Kholaw-Ed25519: the Cardano extended private key form.

    Keys are 64 bytes, kL | kR. kL is the (little endian) signing
    scalar; kR is unclamped drift entropy that feeds child derivation
    but never touches the curve. This is the one curve variant where
    the private key length and "scalar" are not synonymous.
*/

use curve25519_dalek::{edwards::EdwardsPoint, scalar::Scalar};
use zeroize::Zeroizing;

use crate::ecc::ed25519::Ed25519PublicKey;
use crate::error::Error;

const CURVE_NAME: &str = "Kholaw-Ed25519";

#[derive(Debug, Clone)]
pub struct KholawPrivateKey {
    bytes: Zeroizing<[u8; 64]>,
}

impl KholawPrivateKey {
    /// Validates the 64 byte length. The bit-5 (0x20) rule on the last
    /// kL byte is an accept condition of the Cardano root generation
    /// loops, not a property of every derived child, so it is enforced
    /// there rather than here.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let bytes: [u8; 64] = bytes
            .try_into()
            .map_err(|_| Error::InvalidKeyBytes(CURVE_NAME))?;
        Ok(Self { bytes: Zeroizing::new(bytes) })
    }

    pub fn to_bytes(&self) -> [u8; 64] {
        *self.bytes
    }

    /// Left half: the signing scalar, little endian.
    pub fn kl(&self) -> [u8; 32] {
        self.bytes[..32].try_into().expect("kl half")
    }

    /// Right half: derivation drift entropy.
    pub fn kr(&self) -> [u8; 32] {
        self.bytes[32..].try_into().expect("kr half")
    }

    pub fn public_key(&self) -> Ed25519PublicKey {
        let scalar = Scalar::from_bytes_mod_order(self.kl());
        let point = EdwardsPoint::mul_base(&scalar);
        //kL = 0 mod order never reaches here: root generation clamps
        //bit 6 and child derivation rejects zero scalars as unlucky
        Ed25519PublicKey::from_point(point).expect("non-zero scalar")
    }
}
