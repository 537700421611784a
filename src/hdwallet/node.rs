/*
    The HD node: one position in a derivation tree.

    A node is an immutable value. drive() returns a new node and leaves
    the parent untouched, so callers can keep ancestor nodes around and
    branch from them cheaply, and a failed derivation never leaves a
    half-applied cursor behind.
*/

use crate::ecc::{Curve, PrivateKey, PublicKey};
use crate::error::{DerivationError, Error};
use crate::hash::hash160;
use crate::hdwallet::cardano::{self, CardanoScheme};
use crate::hdwallet::ckd;
use crate::hdwallet::path::{ChildOptions, Path};
use crate::util::try_into;

/// Derivation rule families. The curve alone does not determine the
/// rule (Ed25519 derives differently under SLIP10 and under Cardano),
/// so nodes carry an explicit scheme tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// BIP32 rule: secp256k1 and nist256p1 (SLIP10 uses the same
    /// transition for short Weierstrass curves).
    Bip32,
    /// SLIP10 Ed25519: hardened-only, no scalar addition.
    Slip10Ed25519,
    /// Cardano Kholaw-Ed25519 schemes.
    Cardano(CardanoScheme),
}

#[derive(Debug, Clone)]
pub struct HdNode {
    pub(crate) scheme: Scheme,
    pub(crate) private_key: Option<PrivateKey>,
    pub(crate) public_key: PublicKey,
    pub(crate) chain_code: [u8; 32],
    pub(crate) depth: u8,
    pub(crate) index: u32,
    pub(crate) parent_fingerprint: [u8; 4],
}

impl HdNode {
    /*
        Derives the root node of a tree from a seed. The seed is an
        opaque byte sequence produced externally; minimum lengths are
        scheme specific. Icarus passphrases go through
        from_seed_with_passphrase.
    */
    pub fn from_seed(scheme: Scheme, curve: Curve, seed: &[u8]) -> Result<Self, Error> {
        Self::from_seed_with_passphrase(scheme, curve, seed, "")
    }

    pub fn from_seed_with_passphrase(
        scheme: Scheme,
        curve: Curve,
        seed: &[u8],
        passphrase: &str,
    ) -> Result<Self, Error> {
        match scheme {
            Scheme::Bip32 => match curve {
                Curve::Secp256k1 | Curve::Nist256p1 => ckd::master_weierstrass(curve, seed),
                _ => Err(DerivationError::SchemeMismatch.into()),
            },
            Scheme::Slip10Ed25519 => match curve {
                Curve::Ed25519 | Curve::Ed25519Blake2b | Curve::Ed25519Monero => {
                    ckd::master_slip10_ed25519(curve, seed)
                }
                _ => Err(DerivationError::SchemeMismatch.into()),
            },
            Scheme::Cardano(cardano_scheme) => match curve {
                Curve::KholawEd25519 => {
                    cardano::master_from_seed(cardano_scheme, seed, passphrase)
                }
                _ => Err(DerivationError::SchemeMismatch.into()),
            },
        }
    }

    /*
        The core transition: derive the child at the given index,
        returning the next node. The wire index carries the hardened
        flag in its top bit.
    */
    pub fn drive(&self, options: ChildOptions) -> Result<Self, Error> {
        let index = options.to_index()?;
        self.drive_index(index)
    }

    /// Same as drive, with the hardened flag already OR'd into the index.
    pub fn drive_index(&self, index: u32) -> Result<Self, Error> {
        match self.scheme {
            Scheme::Bip32 => ckd::derive_weierstrass(self, index),
            Scheme::Slip10Ed25519 => ckd::derive_slip10_ed25519(self, index),
            Scheme::Cardano(cardano_scheme) => cardano::derive(self, cardano_scheme, index),
        }
    }

    /// Drives every index of the path in order, returning the final node.
    pub fn derive_path(&self, path: &Path) -> Result<Self, Error> {
        let mut node = self.clone();
        for child in &path.children {
            node = node.drive(*child)?;
        }
        Ok(node)
    }

    /// Copy of this node with the private half dropped. Further
    /// derivation is restricted to non-hardened public rules.
    pub fn public_only(&self) -> Self {
        Self {
            private_key: None,
            ..self.clone()
        }
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    pub fn curve(&self) -> Curve {
        match &self.private_key {
            Some(k) => k.curve(),
            None => match &self.public_key {
                PublicKey::Secp256k1(_) => Curve::Secp256k1,
                PublicKey::Nist256p1(_) => Curve::Nist256p1,
                PublicKey::Ed25519(_) => match self.scheme {
                    Scheme::Cardano(_) => Curve::KholawEd25519,
                    _ => Curve::Ed25519,
                },
            },
        }
    }

    pub fn private_key(&self) -> Option<&PrivateKey> {
        self.private_key.as_ref()
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn chain_code(&self) -> [u8; 32] {
        self.chain_code
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Wire index of this node (top bit = hardened). Zero for roots.
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn parent_fingerprint(&self) -> [u8; 4] {
        self.parent_fingerprint
    }

    /// First four bytes of hash160 of the compressed public key.
    pub fn fingerprint(&self) -> [u8; 4] {
        try_into(hash160(self.public_key.raw_compressed())[0..4].to_vec())
    }
}
