//! Conversions to and from other representations of a [`Nat`].

use crate::{Limb, Nat, Word};

impl Nat {
    /// Create a [`Nat`] from a little-endian vector of [`Word`]s. Trailing
    /// zero words are trimmed.
    pub fn from_words(words: impl IntoIterator<Item = Word>) -> Self {
        let mut ret = Self {
            limbs: words.into_iter().map(Limb).collect(),
        };
        ret.norm();
        ret
    }

    /// Copy the limbs into a little-endian [`Word`] vector.
    pub fn to_words(&self) -> Vec<Word> {
        self.limbs.iter().map(|limb| limb.0).collect()
    }

    /// Decode a [`Nat`] from a big-endian byte slice. Leading zero bytes
    /// are accepted and trimmed.
    pub fn from_be_slice(bytes: &[u8]) -> Self {
        let mut limbs = Vec::with_capacity(bytes.len().div_ceil(Limb::BYTES));
        let mut limb: Word = 0;
        let mut shift = 0u32;

        for &byte in bytes.iter().rev() {
            limb |= (byte as Word) << shift;
            shift += 8;
            if shift == Limb::BITS {
                limbs.push(Limb(limb));
                limb = 0;
                shift = 0;
            }
        }
        if shift != 0 {
            limbs.push(Limb(limb));
        }

        let mut ret = Self { limbs };
        ret.norm();
        ret
    }

    /// Encode to big-endian bytes without leading zero bytes; 0 encodes to
    /// an empty vector.
    pub fn to_be_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.limbs.len() * Limb::BYTES);
        for limb in self.limbs.iter().rev() {
            bytes.extend_from_slice(&limb.0.to_be_bytes());
        }

        let leading = bytes.iter().take_while(|&&byte| byte == 0).count();
        bytes.drain(..leading);
        bytes
    }
}

impl From<Word> for Nat {
    fn from(word: Word) -> Self {
        if word == 0 {
            Self::zero()
        } else {
            Self {
                limbs: vec![Limb(word)],
            }
        }
    }
}

impl From<Limb> for Nat {
    fn from(limb: Limb) -> Self {
        Self::from(limb.0)
    }
}

// On 64-bit targets `u64` is already `Word`; on 32-bit it splits in two.
#[cfg(target_pointer_width = "32")]
impl From<u64> for Nat {
    fn from(value: u64) -> Self {
        let mut ret = Self {
            limbs: vec![Limb(value as Word), Limb((value >> 32) as Word)],
        };
        ret.norm();
        ret
    }
}

#[cfg(target_pointer_width = "64")]
impl From<u32> for Nat {
    fn from(value: u32) -> Self {
        Self::from(value as Word)
    }
}

#[cfg(test)]
mod tests {
    use crate::Nat;

    #[test]
    fn be_bytes_round_trip() {
        let x = Nat::from_be_slice(&[0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef, 0x42]);
        assert_eq!(
            x.to_be_bytes(),
            vec![0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef, 0x42]
        );
    }

    #[test]
    fn be_slice_leading_zeros() {
        assert_eq!(Nat::from_be_slice(&[0, 0, 7]), Nat::from(7u64));
        assert!(Nat::from_be_slice(&[0, 0]).is_zero());
        assert!(Nat::from_be_slice(&[]).is_zero());
    }

    #[test]
    fn from_words_trims() {
        let x = Nat::from_words(vec![5, 0]);
        assert_eq!(x.nlimbs(), 1);
        assert_eq!(x.to_words(), vec![5]);
    }
}
