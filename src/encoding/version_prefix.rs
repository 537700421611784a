/*
    Four byte version prefixes for serialized extended keys. The prefix
    selects both the network and the script intent of the tree, and its
    low bit of meaning is the private/public split used when decoding.
*/

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionPrefix {
    //BIP-32
    Xprv = 0x0488ADE4, //Legacy P2PKH
    Xpub = 0x0488B21E,
    Tprv = 0x04358394,
    Tpub = 0x043587CF,
    //BIP-49
    Yprv = 0x049d7878, //P2SH nested P2WPKH
    Ypub = 0x049d7cb2,
    Uprv = 0x044a4e28,
    Upub = 0x044a5262,
    //BIP-84
    Zprv = 0x04b2430c, //P2WPKH
    Zpub = 0x04b24746,
    Vprv = 0x045f18bc,
    Vpub = 0x045f1cf6,
}

impl VersionPrefix {
    pub fn to_u32(self) -> u32 {
        self as u32
    }

    pub fn to_bytes(self) -> [u8; 4] {
        (self as u32).to_be_bytes()
    }

    pub fn from_u32(int: u32) -> Result<Self, Error> {
        Ok(match int {
            0x0488ADE4 => Self::Xprv,
            0x0488B21E => Self::Xpub,
            0x04358394 => Self::Tprv,
            0x043587CF => Self::Tpub,
            0x049d7878 => Self::Yprv,
            0x049d7cb2 => Self::Ypub,
            0x044a4e28 => Self::Uprv,
            0x044a5262 => Self::Upub,
            0x04b2430c => Self::Zprv,
            0x04b24746 => Self::Zpub,
            0x045f18bc => Self::Vprv,
            0x045f1cf6 => Self::Vpub,

            _ => return Err(Error::UnknownVersionPrefix),
        })
    }

    pub fn is_private(self) -> bool {
        matches!(
            self,
            Self::Xprv | Self::Tprv | Self::Yprv | Self::Uprv | Self::Zprv | Self::Vprv
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_u32() {
        for prefix in [
            VersionPrefix::Xprv,
            VersionPrefix::Xpub,
            VersionPrefix::Zprv,
            VersionPrefix::Vpub,
        ] {
            assert_eq!(VersionPrefix::from_u32(prefix.to_u32()).unwrap(), prefix);
        }
    }

    #[test]
    fn unknown_prefix_is_rejected() {
        assert_eq!(
            VersionPrefix::from_u32(0xDEADBEEF).unwrap_err(),
            Error::UnknownVersionPrefix
        );
    }

    #[test]
    fn private_public_split() {
        assert!(VersionPrefix::Xprv.is_private());
        assert!(!VersionPrefix::Xpub.is_private());
        assert_eq!(VersionPrefix::Xprv.to_bytes(), [0x04, 0x88, 0xAD, 0xE4]);
    }
}
