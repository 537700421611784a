/*
    Hierarchical deterministic key derivation.

    node holds the tree position value type and dispatches on the
    derivation scheme; ckd implements the BIP 32 and SLIP 10 transitions,
    cardano the Kholaw-Ed25519 ones. path models the m/44'/... grammar
    and extended_keys the 78 byte wire format.

    References:
        - https://github.com/bitcoin/bips/blob/master/bip-0032.mediawiki
        - https://github.com/satoshilabs/slips/blob/master/slip-0010.md
        - https://input-output-hk.github.io/adrestia/static/Ed25519_BIP.pdf
*/

pub mod node;
pub mod path;
pub mod extended_keys;
pub mod cardano;
mod ckd;

pub use self::cardano::CardanoScheme;
pub use self::extended_keys::ExtendedKey;
pub use self::node::{HdNode, Scheme};
pub use self::path::{Bip44Path, Change, ChildOptions, Path};
