use std::sync::atomic::{AtomicU64, Ordering};

const ALPHABET: &[u8; 26] = b"abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 4;
/// Number of distinct suffixes: 26^4.
const SPACE: u64 = 456_976;
/// Step between consecutive suffixes. Coprime with `SPACE`, so a full cycle visits every suffix once.
const STRIDE: u64 = 7_919;

/// Generates `<cluster>-rmdata-<suffix>` job names.
///
/// The starting point is random per namer; after that suffixes walk a full-period cycle,
/// so one namer never repeats a suffix within 26^4 consecutive names.
#[derive(Debug)]
pub struct JobNamer {
    offset: u64,
    next: AtomicU64,
}

impl JobNamer {
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Deterministic namer, for reproducible names in tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            offset: seed % SPACE,
            next: AtomicU64::new(0),
        }
    }

    /// Next lowercase suffix of four letters.
    pub fn suffix(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed) % SPACE;
        let mut v = (self.offset + n * STRIDE) % SPACE;

        let mut out = [b'a'; SUFFIX_LEN];
        for slot in out.iter_mut().rev() {
            *slot = ALPHABET[(v % 26) as usize];
            v /= 26;
        }
        out.iter().map(|&b| b as char).collect()
    }

    pub fn job_name(&self, cluster: &str) -> String {
        format!("{cluster}-rmdata-{}", self.suffix())
    }
}

impl Default for JobNamer {
    fn default() -> Self {
        Self::new()
    }
}
