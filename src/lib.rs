/*
    Library for multi-curve hierarchical deterministic key derivation:
    BIP 32 over secp256k1 and nist256p1, SLIP 10 over the Ed25519
    variants, and the Cardano Kholaw-Ed25519 schemes, with the 78 byte
    extended key serialization format on top.

    References:
        - BIP 32 (https://github.com/bitcoin/bips/blob/master/bip-0032.mediawiki)
            the derivation rule for the short Weierstrass curves

        - SLIP 10 (https://github.com/satoshilabs/slips/blob/master/slip-0010.md)
            multi-curve master key generation and the Ed25519 rule

        - Khovratovich & Law, "BIP32-Ed25519" (https://input-output-hk.github.io/adrestia/static/Ed25519_BIP.pdf)
            the extended Ed25519 derivation used by Cardano
*/

//Outward facing modules
pub mod ecc;
pub mod hdwallet;
pub mod encoding;

//Modules for internal use
pub mod hash;
pub mod field;
pub mod util;
mod error;

pub use error::{DerivationError, Error};
