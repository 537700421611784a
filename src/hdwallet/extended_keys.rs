/*
    The 78 byte extended key serialization format and its Base58Check
    string form:

        version(4, BE) | depth(1) | parent fingerprint(4) |
        index(4, BE) | chain code(32) | key(33)

    Private keys pad to 33 bytes with a 0x00 prefix; public keys are the
    compressed point encoding. Decode is the exact inverse and rejects
    any other length, unknown prefixes and bad checksums.
*/

use crate::ecc::{Curve, PrivateKey, PublicKey};
use crate::encoding::{check_decode, check_encode, VersionPrefix};
use crate::error::Error;
use crate::hdwallet::node::{HdNode, Scheme};
use crate::util::{as_u32_be, try_into};

pub const SERIALIZED_LENGTH: usize = 78;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendedKey {
    pub version: VersionPrefix,
    pub depth: u8,
    pub parent_fingerprint: [u8; 4],
    pub index: u32,
    pub chain_code: [u8; 32],
    pub key: [u8; 33],
}

impl ExtendedKey {
    /// Extended private key for the node. Only the 32 byte key forms
    /// serialize; the 64 byte Kholaw form has no 78 byte encoding.
    pub fn from_private(node: &HdNode, version: VersionPrefix) -> Result<Self, Error> {
        let private_key = node
            .private_key()
            .ok_or(Error::InvalidKeyBytes("no private key in node"))?;
        let raw = private_key.raw();
        if raw.len() != 32 {
            return Err(Error::InvalidKeyBytes("key does not fit the 33 byte field"));
        }

        let mut key = [0u8; 33];
        key[1..].copy_from_slice(&raw);
        Ok(Self {
            version,
            depth: node.depth(),
            parent_fingerprint: node.parent_fingerprint(),
            index: node.index(),
            chain_code: node.chain_code(),
            key,
        })
    }

    /// Extended public key for the node.
    pub fn from_public(node: &HdNode, version: VersionPrefix) -> Self {
        Self {
            version,
            depth: node.depth(),
            parent_fingerprint: node.parent_fingerprint(),
            index: node.index(),
            chain_code: node.chain_code(),
            key: try_into(node.public_key().raw_compressed()),
        }
    }

    pub fn serialize(&self) -> [u8; SERIALIZED_LENGTH] {
        let mut out = [0u8; SERIALIZED_LENGTH];
        out[0..4].copy_from_slice(&self.version.to_bytes());
        out[4] = self.depth;
        out[5..9].copy_from_slice(&self.parent_fingerprint);
        out[9..13].copy_from_slice(&self.index.to_be_bytes());
        out[13..45].copy_from_slice(&self.chain_code);
        out[45..78].copy_from_slice(&self.key);
        out
    }

    pub fn deserialize(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != SERIALIZED_LENGTH {
            return Err(Error::InvalidExtendedKeyLength(bytes.len()));
        }
        let version = VersionPrefix::from_u32(as_u32_be(&try_into(bytes[0..4].to_vec())))?;

        Ok(Self {
            version,
            depth: bytes[4],
            parent_fingerprint: try_into(bytes[5..9].to_vec()),
            index: as_u32_be(&try_into(bytes[9..13].to_vec())),
            chain_code: try_into(bytes[13..45].to_vec()),
            key: try_into(bytes[45..78].to_vec()),
        })
    }

    /// Base58Check string form ("xprv...", "xpub...").
    pub fn encode(&self) -> String {
        check_encode(&self.serialize())
    }

    pub fn decode(encoded: &str) -> Result<Self, Error> {
        Self::deserialize(&check_decode(encoded)?)
    }

    pub fn is_private(&self) -> bool {
        self.version.is_private()
    }

    /*
        Rebuilds a derivation node. The wire format does not carry the
        scheme or curve, so the caller supplies them; the key field is
        interpreted as private or public from the version prefix.
    */
    pub fn into_node(&self, scheme: Scheme, curve: Curve) -> Result<HdNode, Error> {
        let (private_key, public_key) = if self.is_private() {
            let private_key = PrivateKey::from_bytes(curve, &self.key[1..])?;
            let public_key = private_key.public_key();
            (Some(private_key), public_key)
        } else {
            (None, PublicKey::from_bytes(curve, &self.key)?)
        };

        Ok(HdNode {
            scheme,
            private_key,
            public_key,
            chain_code: self.chain_code,
            depth: self.depth,
            index: self.index,
            parent_fingerprint: self.parent_fingerprint,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hdwallet::path::Path;

    fn vector_1_master() -> HdNode {
        let seed = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
        HdNode::from_seed(Scheme::Bip32, Curve::Secp256k1, &seed).unwrap()
    }

    fn assert_node_strings(node: &HdNode, xprv: &str, xpub: &str) {
        assert_eq!(
            ExtendedKey::from_private(node, VersionPrefix::Xprv)
                .unwrap()
                .encode(),
            xprv
        );
        assert_eq!(
            ExtendedKey::from_public(node, VersionPrefix::Xpub).encode(),
            xpub
        );
    }

    //BIP32 test vector 1, the full published chain
    #[test]
    fn bip32_vector_1_chain() {
        let master = vector_1_master();
        assert_node_strings(
            &master,
            "xprv9s21ZrQH143K3QTDL4LXw2F7HEK3wJUD2nW2nRk4stbPy6cq3jPPqjiChkVvvNKmPGJxWUtg6LnF5kejMRNNU3TGtRBeJgk33yuGBxrMPHi",
            "xpub661MyMwAqRbcFtXgS5sYJABqqG9YLmC4Q1Rdap9gSE8NqtwybGhePY2gZ29ESFjqJoCu1Rupje8YtGqsefD265TMg7usUDFdp6W1EGMcet8",
        );

        let node = master.derive_path(&Path::from_str("m/0'").unwrap()).unwrap();
        assert_node_strings(
            &node,
            "xprv9uHRZZhk6KAJC1avXpDAp4MDc3sQKNxDiPvvkX8Br5ngLNv1TxvUxt4cV1rGL5hj6KCesnDYUhd7oWgT11eZG7XnxHrnYeSvkzY7d2bhkJ7",
            "xpub68Gmy5EdvgibQVfPdqkBBCHxA5htiqg55crXYuXoQRKfDBFA1WEjWgP6LHhwBZeNK1VTsfTFUHCdrfp1bgwQ9xv5ski8PX9rL2dZXvgGDnw",
        );

        let node = master.derive_path(&Path::from_str("m/0'/1").unwrap()).unwrap();
        assert_node_strings(
            &node,
            "xprv9wTYmMFdV23N2TdNG573QoEsfRrWKQgWeibmLntzniatZvR9BmLnvSxqu53Kw1UmYPxLgboyZQaXwTCg8MSY3H2EU4pWcQDnRnrVA1xe8fs",
            "xpub6ASuArnXKPbfEwhqN6e3mwBcDTgzisQN1wXN9BJcM47sSikHjJf3UFHKkNAWbWMiGj7Wf5uMash7SyYq527Hqck2AxYysAA7xmALppuCkwQ",
        );

        let node = master
            .derive_path(&Path::from_str("m/0'/1/2'").unwrap())
            .unwrap();
        assert_node_strings(
            &node,
            "xprv9z4pot5VBttmtdRTWfWQmoH1taj2axGVzFqSb8C9xaxKymcFzXBDptWmT7FwuEzG3ryjH4ktypQSAewRiNMjANTtpgP4mLTj34bhnZX7UiM",
            "xpub6D4BDPcP2GT577Vvch3R8wDkScZWzQzMMUm3PWbmWvVJrZwQY4VUNgqFJPMM3No2dFDFGTsxxpG5uJh7n7epu4trkrX7x7DogT5Uv6fcLW5",
        );

        let node = master
            .derive_path(&Path::from_str("m/0'/1/2'/2").unwrap())
            .unwrap();
        assert_node_strings(
            &node,
            "xprvA2JDeKCSNNZky6uBCviVfJSKyQ1mDYahRjijr5idH2WwLsEd4Hsb2Tyh8RfQMuPh7f7RtyzTtdrbdqqsunu5Mm3wDvUAKRHSC34sJ7in334",
            "xpub6FHa3pjLCk84BayeJxFW2SP4XRrFd1JYnxeLeU8EqN3vDfZmbqBqaGJAyiLjTAwm6ZLRQUMv1ZACTj37sR62cfN7fe5JnJ7dh8zL4fiyLHV",
        );

        let node = master
            .derive_path(&Path::from_str("m/0'/1/2'/2/1000000000").unwrap())
            .unwrap();
        assert_node_strings(
            &node,
            "xprvA41z7zogVVwxVSgdKUHDy1SKmdb533PjDz7J6N6mV6uS3ze1ai8FHa8kmHScGpWmj4WggLyQjgPie1rFSruoUihUZREPSL39UNdE3BBDu76",
            "xpub6H1LXWLaKsWFhvm6RVpEL9P4KfRZSW7abD2ttkWP3SSQvnyA8FSVqNTEcYFgJS2UaFcxupHiYkro49S8yGasTvXEYBVPamhGW6cFJodrTHy",
        );
    }

    #[test]
    fn decode_recovers_the_serialized_fields() {
        let master = vector_1_master();
        let xprv = ExtendedKey::from_private(&master, VersionPrefix::Xprv).unwrap();
        let decoded = ExtendedKey::decode(&xprv.encode()).unwrap();
        assert_eq!(decoded, xprv);
        assert!(decoded.is_private());
        assert_eq!(decoded.depth, 0);
        assert_eq!(decoded.index, 0);
        assert_eq!(decoded.parent_fingerprint, [0u8; 4]);
        assert_eq!(decoded.key[0], 0x00);
    }

    #[test]
    fn decoded_node_keeps_deriving() {
        let master = vector_1_master();
        let expected = master
            .derive_path(&Path::from_str("m/0'/1").unwrap())
            .unwrap();

        let xprv = ExtendedKey::from_private(&master, VersionPrefix::Xprv).unwrap();
        let restored = ExtendedKey::decode(&xprv.encode())
            .unwrap()
            .into_node(Scheme::Bip32, Curve::Secp256k1)
            .unwrap();
        let derived = restored
            .derive_path(&Path::from_str("m/0'/1").unwrap())
            .unwrap();
        assert_eq!(
            derived.private_key().unwrap().raw(),
            expected.private_key().unwrap().raw()
        );
        assert_eq!(derived.chain_code(), expected.chain_code());
    }

    #[test]
    fn public_key_into_node_cannot_derive_hardened() {
        let master = vector_1_master();
        let xpub = ExtendedKey::from_public(&master, VersionPrefix::Xpub);
        let node = xpub.into_node(Scheme::Bip32, Curve::Secp256k1).unwrap();
        assert!(node.private_key().is_none());
        assert!(node.derive_path(&Path::from_str("m/0'").unwrap()).is_err());
        assert!(node.derive_path(&Path::from_str("m/0").unwrap()).is_ok());
    }

    #[test]
    fn rejects_wrong_length_and_unknown_prefix() {
        let master = vector_1_master();
        let bytes = ExtendedKey::from_public(&master, VersionPrefix::Xpub).serialize();

        assert_eq!(
            ExtendedKey::deserialize(&bytes[..77]).unwrap_err(),
            Error::InvalidExtendedKeyLength(77)
        );

        let mut unknown = bytes;
        unknown[0..4].copy_from_slice(&0xDEADBEEFu32.to_be_bytes());
        assert_eq!(
            ExtendedKey::deserialize(&unknown).unwrap_err(),
            Error::UnknownVersionPrefix
        );
    }

    #[test]
    fn rejects_corrupted_checksum() {
        let master = vector_1_master();
        let mut encoded = ExtendedKey::from_public(&master, VersionPrefix::Xpub).encode();
        //Swap the last character for a different alphabet member
        let last = encoded.pop().unwrap();
        encoded.push(if last == '3' { '4' } else { '3' });
        assert_eq!(
            ExtendedKey::decode(&encoded).unwrap_err(),
            Error::ChecksumMismatch
        );
    }

    #[test]
    fn kholaw_keys_do_not_serialize() {
        let seed =
            hex::decode("000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f")
                .unwrap();
        let node = HdNode::from_seed(
            Scheme::Cardano(crate::hdwallet::cardano::CardanoScheme::ShelleyIcarus),
            Curve::KholawEd25519,
            &seed,
        )
        .unwrap();
        assert!(ExtendedKey::from_private(&node, VersionPrefix::Xprv).is_err());
    }
}
