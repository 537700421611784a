/*
    Hash module wrapping the digest, HMAC and PBKDF2 primitives used by
    the derivation engine and the extended key codec.
*/

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256, Sha512};
use ripemd::Ripemd160;
use blake2::Blake2b512;

use crate::util::try_into;

type HmacSha256 = Hmac<Sha256>;
type HmacSha512 = Hmac<Sha512>;

/*
    Takes in a byte array and returns the sha256 hash of it
*/
pub fn sha256<T>(input: T) -> [u8; 32]
where T: AsRef<[u8]>
{
    let mut r = Sha256::new();
    r.update(input.as_ref());
    try_into(r.finalize().to_vec())
}

/*
    Double sha256. Used for Base58Check checksums.
*/
pub fn sha256d<T>(input: T) -> [u8; 32]
where T: AsRef<[u8]>
{
    sha256(sha256(input))
}

pub fn sha512<T>(input: T) -> [u8; 64]
where T: AsRef<[u8]>
{
    let mut r = Sha512::new();
    r.update(input.as_ref());
    try_into(r.finalize().to_vec())
}

pub fn ripemd160<T>(input: T) -> [u8; 20]
where T: AsRef<[u8]>
{
    let mut r = Ripemd160::new();
    r.update(input.as_ref());
    try_into(r.finalize().to_vec())
}

/*
    ripemd160(sha256(input)). Used for key fingerprints.
*/
pub fn hash160<T>(input: T) -> [u8; 20]
where T: AsRef<[u8]>
{
    ripemd160(sha256(input))
}

pub fn blake2b_512<T>(input: T) -> [u8; 64]
where T: AsRef<[u8]>
{
    let mut r = Blake2b512::new();
    r.update(input.as_ref());
    try_into(r.finalize().to_vec())
}

pub fn hmac_sha512(key: &[u8], data: &[u8]) -> [u8; 64] {
    //HMAC accepts keys of any length
    let mut mac = HmacSha512::new_from_slice(key).expect("hmac key");
    mac.update(data);
    try_into(mac.finalize().into_bytes().to_vec())
}

pub fn hmac_sha256(key: &[u8], data: &[u8]) -> [u8; 32] {
    let mut mac = HmacSha256::new_from_slice(key).expect("hmac key");
    mac.update(data);
    try_into(mac.finalize().into_bytes().to_vec())
}

pub fn pbkdf2_hmac_sha512(password: &[u8], salt: &[u8], rounds: u32, output_length: usize) -> Vec<u8> {
    let mut out = vec![0u8; output_length];
    pbkdf2::pbkdf2_hmac::<Sha512>(password, salt, rounds, &mut out);
    out
}

/*
    BIP-340 style tagged hash:
        sha256( sha256(tag) | sha256(tag) | data )
    Exposed together with lift_x for external address encoders.
*/
pub fn tagged_hash(tag: &str, data: &[u8]) -> [u8; 32] {
    let tag_hash = sha256(tag.as_bytes());
    let mut preimage: Vec<u8> = Vec::with_capacity(64 + data.len());
    preimage.extend_from_slice(&tag_hash);
    preimage.extend_from_slice(&tag_hash);
    preimage.extend_from_slice(data);
    sha256(&preimage)
}
