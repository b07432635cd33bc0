//! Sensirion CRC-8 checksum
//!
//! Every 16-bit word on the SCD4x wire is followed by this checksum:
//! polynomial 0x31, initialization 0xFF, no final XOR.

#[inline]
pub(crate) const fn crc8(data: &[u8]) -> u8 {
    const CRC8_POLYNOMIAL: u8 = 0x31;
    let mut crc: u8 = u8::MAX;
    let mut i = 0;

    while i < data.len() {
        crc ^= data[i];
        i += 1;

        let mut bit = 0;
        while bit < 8 {
            bit += 1;
            if crc & 0x80 != 0 {
                crc = (crc << 1) ^ CRC8_POLYNOMIAL;
            } else {
                crc <<= 1;
            }
        }
    }

    crc
}
