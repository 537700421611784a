/*
    Modular arithmetic over an explicit prime modulus.

    Underlies the secp256k1 x-only point lift. Operations are pure and
    total over the field; values outside the field are rejected at
    construction rather than silently reduced, so the curve layer stays
    in control of validation.
*/

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldElement {
    value: BigUint,
    modulus: BigUint,
}

impl FieldElement {
    /// Constructs a field element, rejecting values outside [0, modulus).
    pub fn new(value: BigUint, modulus: BigUint) -> Result<Self, Error> {
        if value >= modulus {
            return Err(Error::InvalidPoint("value not in field"));
        }
        Ok(Self { value, modulus })
    }

    /// Constructs a field element from big endian bytes.
    pub fn from_bytes_be(bytes: &[u8], modulus: BigUint) -> Result<Self, Error> {
        Self::new(BigUint::from_bytes_be(bytes), modulus)
    }

    pub fn value(&self) -> &BigUint {
        &self.value
    }

    /// Big endian byte representation, left padded to the given width.
    pub fn to_bytes_be(&self, width: usize) -> Vec<u8> {
        let mut bytes = self.value.to_bytes_be();
        while bytes.len() < width {
            bytes.insert(0, 0);
        }
        bytes
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// True if the integer value is even. Used to pick the even-y
    /// representative when lifting x-only points.
    pub fn is_even(&self) -> bool {
        (&self.value % 2u8).is_zero()
    }

    pub fn add(&self, other: &Self) -> Self {
        Self {
            value: (&self.value + &other.value) % &self.modulus,
            modulus: self.modulus.clone(),
        }
    }

    pub fn sub(&self, other: &Self) -> Self {
        Self {
            value: (&self.value + &self.modulus - &other.value) % &self.modulus,
            modulus: self.modulus.clone(),
        }
    }

    pub fn mul(&self, other: &Self) -> Self {
        Self {
            value: (&self.value * &other.value) % &self.modulus,
            modulus: self.modulus.clone(),
        }
    }

    pub fn pow(&self, exponent: &BigUint) -> Self {
        Self {
            value: self.value.modpow(exponent, &self.modulus),
            modulus: self.modulus.clone(),
        }
    }

    /*
        Modular inverse by Fermat's little theorem. The modulus is prime
        for every curve this crate supports, so a^(p-2) is the inverse of
        any non-zero a.
    */
    pub fn inv(&self) -> Result<Self, Error> {
        if self.value.is_zero() {
            return Err(Error::InvalidPoint("no inverse for zero"));
        }
        let exponent = &self.modulus - BigUint::from(2u8);
        Ok(self.pow(&exponent))
    }

    /// Additive negation.
    pub fn neg(&self) -> Self {
        if self.value.is_zero() {
            return self.clone();
        }
        Self {
            value: &self.modulus - &self.value,
            modulus: self.modulus.clone(),
        }
    }

    pub fn one(modulus: BigUint) -> Self {
        Self { value: BigUint::one(), modulus }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fe(v: u32, m: u32) -> FieldElement {
        FieldElement::new(BigUint::from(v), BigUint::from(m)).unwrap()
    }

    #[test]
    fn rejects_out_of_field_values() {
        assert!(FieldElement::new(BigUint::from(17u8), BigUint::from(17u8)).is_err());
        assert!(FieldElement::new(BigUint::from(16u8), BigUint::from(17u8)).is_ok());
    }

    #[test]
    fn arithmetic_mod_17() {
        let a = fe(9, 17);
        let b = fe(12, 17);

        assert_eq!(a.add(&b), fe(4, 17));
        assert_eq!(a.sub(&b), fe(14, 17));
        assert_eq!(a.mul(&b), fe(6, 17));   //108 mod 17
        assert_eq!(a.pow(&BigUint::from(2u8)), fe(13, 17));
    }

    #[test]
    fn inverse_round_trips() {
        let a = fe(9, 17);
        let inv = a.inv().unwrap();
        assert_eq!(a.mul(&inv), fe(1, 17));
        assert!(fe(0, 17).inv().is_err());
    }

    #[test]
    fn negation() {
        assert_eq!(fe(5, 17).neg(), fe(12, 17));
        assert_eq!(fe(0, 17).neg(), fe(0, 17));
    }

    #[test]
    fn padded_byte_encoding() {
        let a = fe(1, 65535);
        assert_eq!(a.to_bytes_be(4), vec![0, 0, 0, 1]);
    }
}
