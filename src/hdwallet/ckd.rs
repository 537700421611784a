/*
    Child key derivation for the BIP32 rule (secp256k1, nist256p1) and
    the SLIP10 Ed25519 rule, plus the matching master key generation.

    Reference:
        https://github.com/bitcoin/bips/blob/master/bip-0032.mediawiki
        https://github.com/satoshilabs/slips/blob/master/slip-0010.md
*/

use zeroize::Zeroizing;

use crate::ecc::{Curve, PrivateKey};
use crate::error::{DerivationError, Error};
use crate::hash::hmac_sha512;
use crate::hdwallet::node::{HdNode, Scheme};
use crate::util::try_into;

const MIN_SEED_LENGTH: usize = 16;
const HARDENED_OFFSET: u32 = 0x8000_0000;

/*
    Master key for the short Weierstrass curves:
        I = HMAC-SHA512(curve domain key, seed)
    Left half must be a valid scalar for the curve, otherwise the seed
    is rejected; right half is the chain code.
*/
pub(crate) fn master_weierstrass(curve: Curve, seed: &[u8]) -> Result<HdNode, Error> {
    if seed.len() < MIN_SEED_LENGTH {
        return Err(Error::InvalidSeedLength {
            expected: "at least 16",
            got: seed.len(),
        });
    }

    let i = Zeroizing::new(hmac_sha512(curve.hmac_key(), seed));
    let private_key = PrivateKey::from_bytes(curve, &i[..32])?;
    let public_key = private_key.public_key();

    Ok(HdNode {
        scheme: Scheme::Bip32,
        private_key: Some(private_key),
        public_key,
        chain_code: try_into(i[32..].to_vec()),
        depth: 0,
        index: 0,
        parent_fingerprint: [0u8; 4],
    })
}

/*
    SLIP10 Ed25519 master key. Any left half is a valid seed-form key,
    so no scalar check applies here.
*/
pub(crate) fn master_slip10_ed25519(curve: Curve, seed: &[u8]) -> Result<HdNode, Error> {
    if seed.len() < MIN_SEED_LENGTH {
        return Err(Error::InvalidSeedLength {
            expected: "at least 16",
            got: seed.len(),
        });
    }

    let i = Zeroizing::new(hmac_sha512(curve.hmac_key(), seed));
    let private_key = PrivateKey::from_bytes(curve, &i[..32])?;
    let public_key = private_key.public_key();

    Ok(HdNode {
        scheme: Scheme::Slip10Ed25519,
        private_key: Some(private_key),
        public_key,
        chain_code: try_into(i[32..].to_vec()),
        depth: 0,
        index: 0,
        parent_fingerprint: [0u8; 4],
    })
}

/*
    BIP32 transition. Hardened children hash the private key, normal
    children the compressed public key; the left HMAC half tweaks the
    parent scalar (or point, for public-only nodes) and the right half
    becomes the child chain code.
*/
pub(crate) fn derive_weierstrass(parent: &HdNode, index: u32) -> Result<HdNode, Error> {
    if parent.depth == u8::MAX {
        return Err(DerivationError::DepthOverflow.into());
    }
    let hardened = index & HARDENED_OFFSET != 0;

    let data: Zeroizing<Vec<u8>> = if hardened {
        let private_key = parent
            .private_key
            .as_ref()
            .ok_or(Error::Derivation(DerivationError::HardenedRequiresPrivateKey))?;

        //0x00 | parent private key | index
        let mut data = Vec::with_capacity(37);
        data.push(0x00);
        data.extend_from_slice(&private_key.raw());
        data.extend_from_slice(&index.to_be_bytes());
        Zeroizing::new(data)
    } else {
        //parent compressed public key | index
        let mut data = Vec::with_capacity(37);
        data.extend_from_slice(&parent.public_key.raw_compressed());
        data.extend_from_slice(&index.to_be_bytes());
        Zeroizing::new(data)
    };

    let i = Zeroizing::new(hmac_sha512(&parent.chain_code, &data));
    let tweak: [u8; 32] = try_into(i[..32].to_vec());
    let chain_code: [u8; 32] = try_into(i[32..].to_vec());

    let (private_key, public_key) = match &parent.private_key {
        Some(parent_key) => {
            let child_key = parent_key.tweak_add(&tweak)?;
            let child_public = child_key.public_key();
            (Some(child_key), child_public)
        }
        None => (None, parent.public_key.tweak_add(&tweak)?),
    };

    Ok(HdNode {
        scheme: parent.scheme,
        private_key,
        public_key,
        chain_code,
        depth: parent.depth + 1,
        index,
        parent_fingerprint: parent.fingerprint(),
    })
}

/*
    SLIP10 Ed25519 transition. Only hardened derivation is defined for
    this curve; the left half becomes the child key directly and there
    is no public-only rule.
*/
pub(crate) fn derive_slip10_ed25519(parent: &HdNode, index: u32) -> Result<HdNode, Error> {
    if parent.depth == u8::MAX {
        return Err(DerivationError::DepthOverflow.into());
    }
    if index & HARDENED_OFFSET == 0 {
        return Err(DerivationError::HardenedOnly.into());
    }
    let private_key = parent
        .private_key
        .as_ref()
        .ok_or(Error::Derivation(DerivationError::HardenedRequiresPrivateKey))?;

    let mut data = Zeroizing::new(Vec::with_capacity(37));
    data.push(0x00);
    data.extend_from_slice(&private_key.raw());
    data.extend_from_slice(&index.to_be_bytes());

    let i = Zeroizing::new(hmac_sha512(&parent.chain_code, &data));
    let child_key = PrivateKey::from_bytes(private_key.curve(), &i[..32])?;
    let public_key = child_key.public_key();

    Ok(HdNode {
        scheme: parent.scheme,
        private_key: Some(child_key),
        public_key,
        chain_code: try_into(i[32..].to_vec()),
        depth: parent.depth + 1,
        index,
        parent_fingerprint: parent.fingerprint(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hdwallet::path::ChildOptions;

    fn test_seed() -> Vec<u8> {
        hex::decode("000102030405060708090a0b0c0d0e0f").unwrap()
    }

    #[test]
    fn rejects_short_seeds() {
        let err = master_weierstrass(Curve::Secp256k1, &[0u8; 8]).unwrap_err();
        assert!(matches!(err, Error::InvalidSeedLength { .. }));
        assert!(master_slip10_ed25519(Curve::Ed25519, &[0u8; 15]).is_err());
    }

    //BIP32 test vector 1 master key
    #[test]
    fn bip32_vector_1_master() {
        let node = master_weierstrass(Curve::Secp256k1, &test_seed()).unwrap();
        assert_eq!(
            hex::encode(node.private_key().unwrap().raw()),
            "e8f32e723decf4051aefac8e2c93c9c5b214313817cdb01a1494b917c8436b35"
        );
        assert_eq!(
            hex::encode(node.chain_code()),
            "873dff81c02f525623fd1fe5167eac3a55a049de3d314bb42ee227ffed37d508"
        );
        assert_eq!(node.depth(), 0);
        assert_eq!(node.parent_fingerprint(), [0u8; 4]);
    }

    //SLIP-0010 ed25519 test vector 1
    #[test]
    fn slip10_ed25519_vector_1() {
        let node = master_slip10_ed25519(Curve::Ed25519, &test_seed()).unwrap();
        assert_eq!(
            hex::encode(node.private_key().unwrap().raw()),
            "2b4be7f19ee27bbf30c667b642d5f4aa69fd169872f8fc3059c08ebae2eb19e7"
        );
        assert_eq!(
            hex::encode(node.chain_code()),
            "90046a93de5380a72b5e45010748567d5ea02bbf6522f979e05c0d8d8ca9fffb"
        );
        assert_eq!(
            hex::encode(node.public_key().raw_compressed()),
            "00a4b2856bfec510abab89753fac1ac0e1112364e7d250545963f135f2a33188ed"
        );

        //m/0'
        let child = node.drive(ChildOptions::Hardened(0)).unwrap();
        assert_eq!(
            hex::encode(child.private_key().unwrap().raw()),
            "68e0fe46dfb67e368c75379acec591dad19df3cde26e63b93a8e704f1dade7a3"
        );
        assert_eq!(
            hex::encode(child.chain_code()),
            "8b59aa11380b624e81507a27fedda59fea6d0b779a778918a2fd3590e16e9c69"
        );
        assert_eq!(
            hex::encode(child.public_key().raw_compressed()),
            "008c8a13df77a28f3445213a0f432fde644acaa215fc72dcdf300d5efaa85d350c"
        );
    }

    //SLIP-0010 nist256p1 test vector 1
    #[test]
    fn slip10_nist256p1_vector_1() {
        let node = master_weierstrass(Curve::Nist256p1, &test_seed()).unwrap();
        assert_eq!(
            hex::encode(node.private_key().unwrap().raw()),
            "612091aaa12e22dd2abef664f8a01a82cae99ad7441b7ef8110424915c268bc2"
        );
        assert_eq!(
            hex::encode(node.chain_code()),
            "beeb672fe4621673f722f38529c07392fecaa61015c80c34f29ce8b41b3cb6ea"
        );
        assert_eq!(
            hex::encode(node.public_key().raw_compressed()),
            "0266874dc6ade47b3ecd096745ca09bcd29638dd52c2c12117b11ed3e458cfa9e8"
        );
    }

    #[test]
    fn slip10_ed25519_is_hardened_only() {
        let node = master_slip10_ed25519(Curve::Ed25519, &test_seed()).unwrap();
        let err = node.drive(ChildOptions::Normal(0)).unwrap_err();
        assert_eq!(err, Error::Derivation(DerivationError::HardenedOnly));
    }

    #[test]
    fn hardened_derivation_requires_private_key() {
        let node = master_weierstrass(Curve::Secp256k1, &test_seed()).unwrap();
        let public_node = node.public_only();
        let err = public_node.drive(ChildOptions::Hardened(0)).unwrap_err();
        assert_eq!(
            err,
            Error::Derivation(DerivationError::HardenedRequiresPrivateKey)
        );
    }

    #[test]
    fn public_and_private_derivation_agree() {
        let node = master_weierstrass(Curve::Secp256k1, &test_seed()).unwrap();
        let child_private = node.drive(ChildOptions::Normal(5)).unwrap();
        let child_public = node.public_only().drive(ChildOptions::Normal(5)).unwrap();

        assert_eq!(
            child_private.public_key().raw_compressed(),
            child_public.public_key().raw_compressed()
        );
        assert_eq!(child_private.chain_code(), child_public.chain_code());
        assert!(child_public.private_key().is_none());
    }

    #[test]
    fn depth_increments_by_one() {
        let node = master_weierstrass(Curve::Secp256k1, &test_seed()).unwrap();
        let child = node.drive(ChildOptions::Hardened(44)).unwrap();
        let grandchild = child.drive(ChildOptions::Normal(0)).unwrap();
        assert_eq!(node.depth(), 0);
        assert_eq!(child.depth(), 1);
        assert_eq!(grandchild.depth(), 2);
        assert_eq!(grandchild.parent_fingerprint(), child.fingerprint());
    }

    #[test]
    fn derivation_is_deterministic() {
        let a = master_weierstrass(Curve::Secp256k1, &test_seed())
            .unwrap()
            .drive(ChildOptions::Hardened(44))
            .unwrap()
            .drive(ChildOptions::Normal(0))
            .unwrap();
        let b = master_weierstrass(Curve::Secp256k1, &test_seed())
            .unwrap()
            .drive(ChildOptions::Hardened(44))
            .unwrap()
            .drive(ChildOptions::Normal(0))
            .unwrap();
        assert_eq!(a.private_key().unwrap().raw(), b.private_key().unwrap().raw());
        assert_eq!(a.chain_code(), b.chain_code());
    }

    #[test]
    fn failed_drive_leaves_parent_usable() {
        let node = master_slip10_ed25519(Curve::Ed25519, &test_seed()).unwrap();
        assert!(node.drive(ChildOptions::Normal(0)).is_err());
        //Parent still derives fine afterwards
        assert!(node.drive(ChildOptions::Hardened(0)).is_ok());
    }
}
