use std::convert::TryInto;

/*
    Converts a vector into a fixed size array.
    Only used where the length is known to be correct.
*/
pub fn try_into<T, const N: usize>(v: Vec<T>) -> [T; N] {
    v.try_into()
        .unwrap_or_else(|v: Vec<T>| panic!("Expected {}, found {}", N, v.len()))
}

//Converts a big endian byte array to int
pub fn as_u32_be(array: &[u8; 4]) -> u32 {
    u32::from_be_bytes(*array)
}

/*
    Byte-wise addition without carry propagation between bytes.
    This is the historical Byron-Legacy rule for the right half of a
    Kholaw private key.
*/
pub fn add_no_carry(a: &[u8], b: &[u8]) -> Vec<u8> {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| x.wrapping_add(*y))
        .collect()
}

/*
    Multiplies a little endian byte string by a small scalar, propagating
    carries between bytes and discarding any final overflow. Equivalent to
    (x * scalar) mod 2^(8*len) on the little endian integer value.
*/
pub fn multiply_scalar_no_carry(data: &[u8], scalar: u8) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    let mut carry: u32 = 0;
    for byte in data {
        let v = (*byte as u32) * (scalar as u32) + carry;
        out.push((v & 0xFF) as u8);
        carry = v >> 8;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_no_carry_drops_byte_overflow() {
        assert_eq!(add_no_carry(&[0xFF, 0x01], &[0x02, 0x03]), vec![0x01, 0x04]);
    }

    #[test]
    fn multiply_no_carry_shifts_le_value() {
        //0x0100 (little endian [0x00, 0x01]) * 8 = 0x0800
        assert_eq!(multiply_scalar_no_carry(&[0x00, 0x01], 8), vec![0x00, 0x08]);
        //Overflow past the top byte is discarded
        assert_eq!(multiply_scalar_no_carry(&[0x00, 0xFF], 8), vec![0x00, 0xF8]);
    }
}
