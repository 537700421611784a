/*
    Derivation path model.

    Parses and prints the m/44'/0'/0'/0/0 grammar and provides a typed
    BIP-44 path builder. Rebuilding any single BIP-44 component
    recomputes the whole path, so the string form and the index list can
    never disagree.
*/

use crate::error::{DerivationError, Error};

/**
    Enum to pattern match child key derivation options.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildOptions {
    Normal(u32),
    Hardened(u32),
}

impl ChildOptions {
    /// The wire index: the raw index with the hardened flag OR'd into
    /// the top bit. Indices that do not fit in 31 bits are rejected.
    pub fn to_index(&self) -> Result<u32, Error> {
        match self {
            ChildOptions::Normal(x) => {
                if *x >= 1 << 31 {
                    return Err(DerivationError::IndexReserved(*x).into());
                }
                Ok(*x)
            }
            ChildOptions::Hardened(x) => {
                if *x >= 1 << 31 {
                    return Err(DerivationError::IndexTooLarge(*x).into());
                }
                Ok(*x | 0x8000_0000)
            }
        }
    }

    pub fn is_hardened(&self) -> bool {
        matches!(self, ChildOptions::Hardened(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    pub children: Vec<ChildOptions>,
}

impl Path {
    pub fn empty() -> Self {
        Self { children: vec![] }
    }

    pub fn from_str(path: &str) -> Result<Self, Error> {
        let mut components: Vec<&str> = path.split('/').collect();
        if components.is_empty() || components[0] != "m" {
            return Err(Error::InvalidPath(path.to_string()));
        }
        components.remove(0);

        //"m" on its own is the root path
        let mut children: Vec<ChildOptions> = vec![];
        for component in components {
            let (digits, hardened) = match component.strip_suffix('\'') {
                Some(digits) => (digits, true),
                None => (component, false),
            };

            //Leading '+'/'-' and empty components are malformed
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(Error::InvalidPath(path.to_string()));
            }
            let index: u32 = digits
                .parse()
                .map_err(|_| Error::InvalidPath(path.to_string()))?;
            if index >= 1 << 31 {
                return Err(Error::InvalidPath(path.to_string()));
            }

            children.push(if hardened {
                ChildOptions::Hardened(index)
            } else {
                ChildOptions::Normal(index)
            });
        }

        Ok(Self { children })
    }

    /// The flat list of wire indices (hardened flag pre-OR'd).
    pub fn to_indexes(&self) -> Result<Vec<u32>, Error> {
        self.children.iter().map(|c| c.to_index()).collect()
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut path: Vec<String> = vec!["m".to_string()];
        for child in &self.children {
            path.push(match child {
                ChildOptions::Normal(x) => format!("{}", x),
                ChildOptions::Hardened(x) => format!("{}'", x),
            });
        }
        write!(f, "{}", path.join("/"))
    }
}

/// BIP-44 change chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    ExternalChain,
    InternalChain,
}

impl Change {
    pub fn index(&self) -> u32 {
        match self {
            Change::ExternalChain => 0,
            Change::InternalChain => 1,
        }
    }
}

/*
    Typed BIP-44 path: m / 44' / coin_type' / account' / change / address.
    Every setter rebuilds the whole path.
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bip44Path {
    coin_type: u32,
    account: u32,
    change: Change,
    address: u32,
    path: Path,
}

impl Bip44Path {
    pub const PURPOSE: u32 = 44;

    pub fn new(coin_type: u32, account: u32, change: Change, address: u32) -> Result<Self, Error> {
        let mut p = Self {
            coin_type,
            account,
            change,
            address,
            path: Path::empty(),
        };
        p.rebuild()?;
        Ok(p)
    }

    fn rebuild(&mut self) -> Result<(), Error> {
        let children = vec![
            ChildOptions::Hardened(Self::PURPOSE),
            ChildOptions::Hardened(self.coin_type),
            ChildOptions::Hardened(self.account),
            ChildOptions::Normal(self.change.index()),
            ChildOptions::Normal(self.address),
        ];
        //Validate every component so the stored path is always usable
        for child in &children {
            child.to_index()?;
        }
        self.path = Path { children };
        Ok(())
    }

    pub fn with_coin_type(mut self, coin_type: u32) -> Result<Self, Error> {
        self.coin_type = coin_type;
        self.rebuild()?;
        Ok(self)
    }

    pub fn with_account(mut self, account: u32) -> Result<Self, Error> {
        self.account = account;
        self.rebuild()?;
        Ok(self)
    }

    pub fn with_change(mut self, change: Change) -> Result<Self, Error> {
        self.change = change;
        self.rebuild()?;
        Ok(self)
    }

    pub fn with_address(mut self, address: u32) -> Result<Self, Error> {
        self.address = address;
        self.rebuild()?;
        Ok(self)
    }

    pub fn coin_type(&self) -> u32 {
        self.coin_type
    }

    pub fn account(&self) -> u32 {
        self.account
    }

    pub fn change(&self) -> Change {
        self.change
    }

    pub fn address(&self) -> u32 {
        self.address
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl std::fmt::Display for Bip44Path {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_round_trip() {
        let path_str = "m/84'/0'/0'/0/0";
        let path = Path::from_str(path_str).unwrap();
        assert_eq!(
            path.children,
            vec![
                ChildOptions::Hardened(84),
                ChildOptions::Hardened(0),
                ChildOptions::Hardened(0),
                ChildOptions::Normal(0),
                ChildOptions::Normal(0)
            ]
        );
        assert_eq!(path.to_string(), path_str);
    }

    #[test]
    fn root_path_is_empty() {
        assert_eq!(Path::from_str("m").unwrap(), Path::empty());
    }

    #[test]
    fn rejects_malformed_paths() {
        assert!(Path::from_str("44'/0'").is_err()); //no m
        assert!(Path::from_str("m//0").is_err()); //empty component
        assert!(Path::from_str("m/abc").is_err());
        assert!(Path::from_str("m/-1").is_err());
        assert!(Path::from_str("m/2147483648").is_err()); //2^31
        assert!(Path::from_str("m/2147483647'").is_ok());
    }

    #[test]
    fn wire_indexes_carry_hardened_bit() {
        let path = Path::from_str("m/44'/0'/1'/0/5").unwrap();
        assert_eq!(
            path.to_indexes().unwrap(),
            vec![0x8000002C, 0x80000000, 0x80000001, 0, 5]
        );
    }

    #[test]
    fn bip44_rebuild_keeps_string_and_indexes_in_sync() {
        let path = Bip44Path::new(0, 0, Change::ExternalChain, 0).unwrap();
        assert_eq!(path.to_string(), "m/44'/0'/0'/0/0");

        let path = path
            .with_coin_type(60)
            .unwrap()
            .with_account(2)
            .unwrap()
            .with_change(Change::InternalChain)
            .unwrap()
            .with_address(7)
            .unwrap();
        assert_eq!(path.to_string(), "m/44'/60'/2'/1/7");
        assert_eq!(
            path.path().to_indexes().unwrap(),
            vec![0x8000002C, 0x8000003C, 0x80000002, 1, 7]
        );
    }

    #[test]
    fn bip44_rejects_oversized_components() {
        assert!(Bip44Path::new(1 << 31, 0, Change::ExternalChain, 0).is_err());
    }
}
