/*
    Base58 and Base58Check encoding on top of the bs58 crate. The
    checksum is the first 4 bytes of double sha256 over the payload.
*/

use crate::error::Error;
use crate::hash::sha256d;
use crate::util::try_into;

const CHECKSUM_LENGTH: usize = 4;

/**
    Returns the Base58Check encoded value of the input data: the payload
    followed by the first 4 bytes of its double sha256.
*/
pub fn check_encode(data: &[u8]) -> String {
    let mut data = data.to_vec();
    let checksum: Vec<u8> = sha256d(&data)[0..CHECKSUM_LENGTH].to_vec();
    data.extend_from_slice(&checksum);
    bs58::encode(data).into_string()
}

/**
    Decodes a Base58Check string, validating and stripping the checksum.
*/
pub fn check_decode(encoded: &str) -> Result<Vec<u8>, Error> {
    let bytes = decode(encoded)?;
    if bytes.len() < CHECKSUM_LENGTH {
        return Err(Error::ChecksumMismatch);
    }

    let payload = &bytes[..bytes.len() - CHECKSUM_LENGTH];
    let extracted_checksum: [u8; 4] = try_into(bytes[bytes.len() - CHECKSUM_LENGTH..].to_vec());
    let derived_checksum: [u8; 4] = try_into(sha256d(payload)[0..CHECKSUM_LENGTH].to_vec());

    if extracted_checksum != derived_checksum {
        return Err(Error::ChecksumMismatch);
    }
    Ok(payload.to_vec())
}

/**
    Encodes a given u8 slice into base 58 without a checksum
*/
pub fn encode(data: &[u8]) -> String {
    bs58::encode(data).into_string()
}

/**
    Decodes a given Base58 string into a byte vector
*/
pub fn decode(encoded: &str) -> Result<Vec<u8>, Error> {
    bs58::decode(encoded)
        .into_vec()
        .map_err(|_| Error::ChecksumMismatch)
}
