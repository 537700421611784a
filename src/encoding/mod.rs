/*
    Encoding layer: Base58Check and the extended key version prefixes.
*/

pub mod bs58check;
pub mod version_prefix;

pub use self::bs58check::{check_decode, check_encode, decode, encode};
pub use self::version_prefix::VersionPrefix;
