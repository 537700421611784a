/*
    Cardano key derivation over Kholaw-Ed25519.

    Five schemes share one child transition. They differ in how the root
    key is generated from the seed (Byron-Legacy double hash loop, Icarus
    PBKDF2 stretch, Ledger HMAC retry loop) and, for Byron-Legacy only,
    in index endianness and in the child arithmetic (historical no-carry
    byte rules instead of proper little endian integers).
*/

use curve25519_dalek::{edwards::EdwardsPoint, scalar::Scalar, traits::Identity};
use num_bigint::BigUint;
use zeroize::Zeroizing;

use crate::ecc::{KholawPrivateKey, PrivateKey, PublicKey};
use crate::error::{DerivationError, Error};
use crate::hash::{hmac_sha256, hmac_sha512, pbkdf2_hmac_sha512, sha512};
use crate::hdwallet::node::{HdNode, Scheme};
use crate::util::{add_no_carry, multiply_scalar_no_carry, try_into};

/// Root generation loop bound. The accept conditions hold for roughly
/// half of all iterations, so a conforming seed converges in a handful
/// of rounds and hitting the cap signals corrupted input.
const RETRY_CAP: u32 = 64;

const PBKDF2_ROUNDS: u32 = 4096;
const PBKDF2_OUTPUT_LENGTH: usize = 96;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardanoScheme {
    ByronLegacy,
    ByronIcarus,
    ByronLedger,
    ShelleyIcarus,
    ShelleyLedger,
}

impl CardanoScheme {
    /// Byron-Legacy keeps big endian child indices and the historical
    /// no-carry byte arithmetic; every later scheme is little endian.
    pub fn is_legacy(&self) -> bool {
        matches!(self, CardanoScheme::ByronLegacy)
    }

    pub fn is_icarus(&self) -> bool {
        matches!(self, CardanoScheme::ByronIcarus | CardanoScheme::ShelleyIcarus)
    }

    pub fn is_ledger(&self) -> bool {
        matches!(self, CardanoScheme::ByronLedger | CardanoScheme::ShelleyLedger)
    }
}

impl std::fmt::Display for CardanoScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", match self {
            CardanoScheme::ByronLegacy => "Byron-Legacy",
            CardanoScheme::ByronIcarus => "Byron-Icarus",
            CardanoScheme::ByronLedger => "Byron-Ledger",
            CardanoScheme::ShelleyIcarus => "Shelley-Icarus",
            CardanoScheme::ShelleyLedger => "Shelley-Ledger",
        })
    }
}

pub(crate) fn master_from_seed(
    scheme: CardanoScheme,
    seed: &[u8],
    passphrase: &str,
) -> Result<HdNode, Error> {
    let (private_key, chain_code) = match scheme {
        CardanoScheme::ByronLegacy => master_byron_legacy(seed)?,
        CardanoScheme::ByronIcarus | CardanoScheme::ShelleyIcarus => {
            master_icarus(seed, passphrase)?
        }
        CardanoScheme::ByronLedger | CardanoScheme::ShelleyLedger => master_ledger(seed)?,
    };

    let private_key = PrivateKey::KholawEd25519(private_key);
    let public_key = private_key.public_key();
    Ok(HdNode {
        scheme: Scheme::Cardano(scheme),
        private_key: Some(private_key),
        public_key,
        chain_code,
        depth: 0,
        index: 0,
        parent_fingerprint: [0u8; 4],
    })
}

/// Standard Kholaw clamp on the kL half: clear the lowest 3 bits of the
/// first byte, clear the highest bit of the last byte, set bit 6.
fn clamp_kl(data: &mut [u8]) {
    data[0] &= 0xF8;
    data[31] &= 0x7F;
    data[31] |= 0x40;
}

/*
    Byron-Legacy root: the seed must be exactly 32 bytes. Each round
    HMACs the CBOR encoded seed with "Root Seed Chain <n>", stretches the
    left half through SHA-512 and clamps it; the round is accepted when
    bit 5 of the last kL byte is clear.
*/
fn master_byron_legacy(seed: &[u8]) -> Result<(KholawPrivateKey, [u8; 32]), Error> {
    if seed.len() != 32 {
        return Err(Error::InvalidSeedLength {
            expected: "exactly 32",
            got: seed.len(),
        });
    }

    let mut cbor_seed = Zeroizing::new(Vec::with_capacity(seed.len() + 2));
    ciborium::ser::into_writer(
        &ciborium::value::Value::Bytes(seed.to_vec()),
        &mut *cbor_seed,
    )
    .expect("cbor to vec");

    for iteration in 1..=RETRY_CAP {
        let message = format!("Root Seed Chain {}", iteration);
        let i = Zeroizing::new(hmac_sha512(&cbor_seed, message.as_bytes()));

        let mut il = Zeroizing::new(sha512(&i[..32]));
        clamp_kl(&mut il[..32]);

        if il[31] & 0x20 == 0 {
            let private_key = KholawPrivateKey::from_bytes(&*il)?;
            let chain_code: [u8; 32] = try_into(i[32..].to_vec());
            return Ok((private_key, chain_code));
        }
    }
    Err(DerivationError::RetriesExhausted.into())
}

/*
    Icarus root: 96 bytes of PBKDF2-HMAC-SHA512(passphrase, seed, 4096).
    The Icarus clamp clears the highest 3 bits of the last kL byte where
    the standard clamp clears only the highest one, so no retry loop is
    needed.
*/
fn master_icarus(seed: &[u8], passphrase: &str) -> Result<(KholawPrivateKey, [u8; 32]), Error> {
    if seed.len() < 16 {
        return Err(Error::InvalidSeedLength {
            expected: "at least 16",
            got: seed.len(),
        });
    }

    let mut key = Zeroizing::new(pbkdf2_hmac_sha512(
        passphrase.as_bytes(),
        seed,
        PBKDF2_ROUNDS,
        PBKDF2_OUTPUT_LENGTH,
    ));
    key[0] &= 0xF8;
    key[31] &= 0x1F;
    key[31] |= 0x40;

    let private_key = KholawPrivateKey::from_bytes(&key[..64])?;
    let chain_code: [u8; 32] = try_into(key[64..].to_vec());
    Ok((private_key, chain_code))
}

/*
    Ledger root: HMAC-SHA512("ed25519 seed", seed), feeding the output
    back in as the message until bit 5 of the last kL byte comes out
    clear. The chain code is a separate single HMAC-SHA256 over the
    0x01 prefixed seed and does not participate in the retry loop.
*/
fn master_ledger(seed: &[u8]) -> Result<(KholawPrivateKey, [u8; 32]), Error> {
    if seed.len() < 16 {
        return Err(Error::InvalidSeedLength {
            expected: "at least 16",
            got: seed.len(),
        });
    }

    const HMAC_KEY: &[u8] = b"ed25519 seed";

    let mut data = Zeroizing::new(seed.to_vec());
    for _ in 0..RETRY_CAP {
        let mut i = Zeroizing::new(hmac_sha512(HMAC_KEY, &data));
        if i[31] & 0x20 == 0 {
            clamp_kl(&mut i[..32]);
            let private_key = KholawPrivateKey::from_bytes(&*i)?;

            let mut prefixed_seed = Zeroizing::new(Vec::with_capacity(seed.len() + 1));
            prefixed_seed.push(0x01);
            prefixed_seed.extend_from_slice(seed);
            let chain_code = hmac_sha256(HMAC_KEY, &prefixed_seed);
            return Ok((private_key, chain_code));
        }
        *data = i.to_vec();
    }
    Err(DerivationError::RetriesExhausted.into())
}

//Little endian serialization of a value known to fit in 32 bytes
fn to_le_bytes_32(value: &BigUint) -> [u8; 32] {
    let mut bytes = value.to_bytes_le();
    bytes.resize(32, 0);
    try_into(bytes)
}

/*
    The Kholaw child transition. Two HMACs over the chain code: the Z
    HMAC feeds the key arithmetic and the second supplies the child
    chain code in its right half. Tags 0x00/0x01 cover the hardened
    (private key) form, 0x02/0x03 the public form.
*/
pub(crate) fn derive(
    parent: &HdNode,
    scheme: CardanoScheme,
    index: u32,
) -> Result<HdNode, Error> {
    if parent.depth == u8::MAX {
        return Err(DerivationError::DepthOverflow.into());
    }
    let hardened = index & 0x8000_0000 != 0;
    let index_bytes = if scheme.is_legacy() {
        index.to_be_bytes()
    } else {
        index.to_le_bytes()
    };

    match &parent.private_key {
        Some(PrivateKey::KholawEd25519(parent_key)) => {
            let (z_hmac, cc_hmac) = if hardened {
                let raw = Zeroizing::new(parent_key.to_bytes());
                (
                    keyed_hmac(&parent.chain_code, 0x00, &*raw, &index_bytes),
                    keyed_hmac(&parent.chain_code, 0x01, &*raw, &index_bytes),
                )
            } else {
                let public = parent.public_key.raw_compressed();
                (
                    keyed_hmac(&parent.chain_code, 0x02, &public[1..], &index_bytes),
                    keyed_hmac(&parent.chain_code, 0x03, &public[1..], &index_bytes),
                )
            };

            let kl = child_key_left(scheme, &z_hmac[..32], &parent_key.kl())?;
            let kr = child_key_right(scheme, &z_hmac[32..], &parent_key.kr());

            let mut child_bytes = Zeroizing::new([0u8; 64]);
            child_bytes[..32].copy_from_slice(&kl);
            child_bytes[32..].copy_from_slice(&kr);
            let child_key = PrivateKey::KholawEd25519(KholawPrivateKey::from_bytes(&*child_bytes)?);
            let public_key = child_key.public_key();

            Ok(HdNode {
                scheme: parent.scheme,
                private_key: Some(child_key),
                public_key,
                chain_code: try_into(cc_hmac[32..].to_vec()),
                depth: parent.depth + 1,
                index,
                parent_fingerprint: parent.fingerprint(),
            })
        }
        Some(_) => Err(DerivationError::SchemeMismatch.into()),
        None => {
            if hardened {
                return Err(DerivationError::HardenedRequiresPrivateKey.into());
            }
            let public = parent.public_key.raw_compressed();
            let z_hmac = keyed_hmac(&parent.chain_code, 0x02, &public[1..], &index_bytes);
            let cc_hmac = keyed_hmac(&parent.chain_code, 0x03, &public[1..], &index_bytes);

            let parent_point = match &parent.public_key {
                PublicKey::Ed25519(k) => *k.point(),
                _ => return Err(DerivationError::SchemeMismatch.into()),
            };
            let point = parent_point + EdwardsPoint::mul_base(&child_point_scalar(scheme, &z_hmac[..32]));
            if point == EdwardsPoint::identity() {
                return Err(DerivationError::UnluckyIndex.into());
            }
            let public_key = PublicKey::Ed25519(crate::ecc::Ed25519PublicKey::from_point(point)?);

            Ok(HdNode {
                scheme: parent.scheme,
                private_key: None,
                public_key,
                chain_code: try_into(cc_hmac[32..].to_vec()),
                depth: parent.depth + 1,
                index,
                parent_fingerprint: parent.fingerprint(),
            })
        }
    }
}

fn keyed_hmac(chain_code: &[u8; 32], tag: u8, key_material: &[u8], index_bytes: &[u8; 4]) -> [u8; 64] {
    let mut data = Zeroizing::new(Vec::with_capacity(1 + key_material.len() + 4));
    data.push(tag);
    data.extend_from_slice(key_material);
    data.extend_from_slice(index_bytes);
    hmac_sha512(chain_code, &data)
}

/*
    New kL. The modern rule multiplies the first 28 bytes of zL by 8
    and adds the parent kL as little endian integers, rejecting a child
    that lands on a multiple of the group order. Byron-Legacy instead
    multiplies all 32 zL bytes with the no-carry rule and reduces the
    sum mod the order.
*/
fn child_key_left(scheme: CardanoScheme, zl: &[u8], kl: &[u8; 32]) -> Result<[u8; 32], Error> {
    let order = crate::ecc::ed25519::order();
    if scheme.is_legacy() {
        let zl = BigUint::from_bytes_le(&multiply_scalar_no_carry(zl, 8));
        let kl = BigUint::from_bytes_le(kl);
        let child = (zl + kl) % order;
        //A zero scalar maps to the identity point and has no public key
        if child == BigUint::from(0u8) {
            return Err(DerivationError::UnluckyIndex.into());
        }
        Ok(to_le_bytes_32(&child))
    } else {
        let zl = BigUint::from_bytes_le(&zl[..28]);
        let kl = BigUint::from_bytes_le(kl);
        let child = zl * 8u8 + kl;
        if (&child % order) == BigUint::from(0u8) {
            return Err(DerivationError::UnluckyIndex.into());
        }
        Ok(to_le_bytes_32(&child))
    }
}

/*
    New kR: zR + kR mod 2^256 little endian, except Byron-Legacy which
    adds byte-wise with no carry propagation at all.
*/
fn child_key_right(scheme: CardanoScheme, zr: &[u8], kr: &[u8; 32]) -> [u8; 32] {
    if scheme.is_legacy() {
        try_into(add_no_carry(zr, kr))
    } else {
        let sum = BigUint::from_bytes_le(zr) + BigUint::from_bytes_le(kr);
        let mut bytes = sum.to_bytes_le();
        bytes.resize(33, 0);
        //mod 2^256: drop everything past the 32nd byte
        bytes.truncate(32);
        try_into(bytes)
    }
}

/// The scalar added to the parent point in public derivation, matching
/// the private kL arithmetic mod the group order.
fn child_point_scalar(scheme: CardanoScheme, zl: &[u8]) -> Scalar {
    if scheme.is_legacy() {
        Scalar::from_bytes_mod_order(try_into(multiply_scalar_no_carry(zl, 8)))
    } else {
        let zl8 = BigUint::from_bytes_le(&zl[..28]) * 8u8;
        Scalar::from_bytes_mod_order(to_le_bytes_32(&zl8))
    }
}
