//! Bit packing for the payload stream, independent of pixel addressing.

/// Bits of `bytes`, each byte most-significant bit first.
pub fn pack_bits(bytes: &[u8]) -> impl Iterator<Item = bool> + '_ {
    bytes
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |shift| (byte >> shift) & 1 == 1))
}

/// Reassemble up to `count` bytes from MSB-first `bits`.
///
/// Stops early, dropping any incomplete trailing byte, if `bits` runs out.
pub fn unpack_bits(bits: impl IntoIterator<Item = bool>, count: usize) -> Vec<u8> {
    let mut bits = bits.into_iter();
    let mut out = Vec::new();
    for _ in 0..count {
        let mut byte = 0u8;
        for _ in 0..8 {
            let Some(bit) = bits.next() else {
                return out;
            };
            byte = (byte << 1) | u8::from(bit);
        }
        out.push(byte);
    }
    out
}

/// Which bit of a carrier byte holds a payload bit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BitPlane {
    /// Bit 0. Visually imperceptible.
    #[default]
    Lsb,
    /// Bit 7. Survives more processing but is plainly visible.
    Msb,
}

impl BitPlane {
    fn mask(self) -> u8 {
        match self {
            Self::Lsb => 0x01,
            Self::Msb => 0x80,
        }
    }

    /// `byte` with this plane's bit set to `bit`; other bits unchanged.
    pub fn write(self, byte: u8, bit: bool) -> u8 {
        if bit {
            byte | self.mask()
        } else {
            byte & !self.mask()
        }
    }

    /// This plane's bit of `byte`.
    pub fn read(self, byte: u8) -> bool {
        byte & self.mask() != 0
    }
}

impl core::str::FromStr for BitPlane {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lsb" => Ok(Self::Lsb),
            "msb" => Ok(Self::Msb),
            other => Err(format!("unknown bit plane {other:?}, expected lsb or msb")),
        }
    }
}

impl core::fmt::Display for BitPlane {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Lsb => "lsb",
            Self::Msb => "msb",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_msb_first() {
        let bits: Vec<bool> = pack_bits(&[0b1000_0001, 0b0100_0000]).collect();
        assert_eq!(bits.len(), 16);
        assert_eq!(
            &bits[..8],
            &[true, false, false, false, false, false, false, true]
        );
        assert_eq!(&bits[8..10], &[false, true]);
    }

    #[test]
    fn unpack_reverses_pack() {
        let data = b"Hi\x00\xff";
        assert_eq!(unpack_bits(pack_bits(data), data.len()), data.to_vec());
    }

    #[test]
    fn unpack_stops_when_bits_run_out() {
        let bits = pack_bits(b"ab").take(12);
        assert_eq!(unpack_bits(bits, 2), b"a".to_vec());
    }

    #[test]
    fn unpack_continues_from_shared_iterator() {
        let data = [1u8, 2, 3, 4, 5];
        let mut bits = pack_bits(&data);
        assert_eq!(unpack_bits(&mut bits, 2), vec![1, 2]);
        assert_eq!(unpack_bits(&mut bits, 3), vec![3, 4, 5]);
    }

    #[test]
    fn planes_touch_one_bit() {
        assert_eq!(BitPlane::Lsb.write(0b1010_1010, true), 0b1010_1011);
        assert_eq!(BitPlane::Lsb.write(0b1010_1011, false), 0b1010_1010);
        assert_eq!(BitPlane::Msb.write(0b0010_1010, true), 0b1010_1010);
        assert_eq!(BitPlane::Msb.write(0b1111_1111, false), 0b0111_1111);
        assert!(BitPlane::Msb.read(0x80));
        assert!(!BitPlane::Lsb.read(0xFE));
    }

    #[test]
    fn plane_parses_case_insensitively() {
        assert_eq!("MSB".parse::<BitPlane>(), Ok(BitPlane::Msb));
        assert_eq!("lsb".parse::<BitPlane>(), Ok(BitPlane::Lsb));
        assert!("mid".parse::<BitPlane>().is_err());
    }
}
