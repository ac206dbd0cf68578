use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Length of a seed string.
pub const SEED_LEN: usize = 8;

/// The game's seed alphabet: digits and uppercase letters, minus `O` (too
/// easily confused with `0` — the source game excludes it from seed
/// generation).
pub const ALPHABET: &[u8; 35] = b"0123456789ABCDEFGHIJKLMNPQRSTUVWXYZ";

fn digit_of(b: u8) -> Option<u8> {
    ALPHABET.iter().position(|&c| c == b).map(|i| i as u8)
}

/// An 8-character base-35 seed string.
///
/// Stored as raw ASCII bytes rather than a `String` so a batch of `W` seeds
/// is a small, `Copy`, cache-friendly array rather than a heap allocation
/// per lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Seed([u8; SEED_LEN]);

impl Seed {
    /// The lexicographically first seed, `00000000`.
    pub const MIN: Seed = Seed([b'0'; SEED_LEN]);

    /// The lexicographically last seed, `ZZZZZZZZ`.
    pub const MAX: Seed = Seed([b'Z'; SEED_LEN]);

    pub fn as_bytes(&self) -> &[u8; SEED_LEN] {
        &self.0
    }

    /// Advance to the next seed in lexicographic order (odometer increment
    /// over the base-35 alphabet), wrapping from `MAX` back to `MIN`.
    pub fn next(self) -> Seed {
        let mut bytes = self.0;
        for i in (0..SEED_LEN).rev() {
            let digit = digit_of(bytes[i]).expect("seed byte is in ALPHABET");
            if (digit as usize) + 1 < ALPHABET.len() {
                bytes[i] = ALPHABET[digit as usize + 1];
                return Seed(bytes);
            }
            bytes[i] = ALPHABET[0];
        }
        Seed(bytes)
    }

    /// Advance by `n` seeds, wrapping around the seed space.
    ///
    /// Adds `n` to the seed's base-35 digits directly, carrying from the
    /// least-significant byte, rather than stepping through `next()` `n`
    /// times — the driver calls this with `n` in the hundreds of billions
    /// to seek a batch's start seed, where a per-seed loop would be
    /// O(n) per call and O(total_batches²) in aggregate.
    pub fn advance(self, mut n: u64) -> Seed {
        let mut bytes = self.0;
        for i in (0..SEED_LEN).rev() {
            if n == 0 {
                break;
            }
            let digit = digit_of(bytes[i]).expect("seed byte is in ALPHABET") as u64;
            let total = digit + n % ALPHABET.len() as u64;
            n /= ALPHABET.len() as u64;
            if total >= ALPHABET.len() as u64 {
                n += 1;
            }
            bytes[i] = ALPHABET[(total % ALPHABET.len() as u64) as usize];
        }
        Seed(bytes)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // SAFETY-free: every byte comes from ALPHABET, which is ASCII.
        write!(f, "{}", std::str::from_utf8(&self.0).unwrap())
    }
}

#[derive(Debug, Clone, Error)]
pub enum SeedParseError {
    #[error("seed must be exactly {SEED_LEN} characters, got {0}")]
    WrongLength(usize),
    #[error("seed byte {0:?} is not in the base-35 alphabet")]
    InvalidChar(char),
}

impl FromStr for Seed {
    type Err = SeedParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != SEED_LEN {
            return Err(SeedParseError::WrongLength(s.len()));
        }
        let mut bytes = [0u8; SEED_LEN];
        for (i, c) in s.chars().enumerate() {
            let upper = c.to_ascii_uppercase();
            if !upper.is_ascii() || digit_of(upper as u8).is_none() {
                return Err(SeedParseError::InvalidChar(c));
            }
            bytes[i] = upper as u8;
        }
        Ok(Seed(bytes))
    }
}
