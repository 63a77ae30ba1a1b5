/// Deterministic per-title random sequence.
///
/// The seed is a 32-bit wrapping hash of the title (the classic
/// `h = h * 31 + c` string hash) feeding a small linear congruential
/// generator. The same title always produces the same draw sequence,
/// and different titles diverge, which keeps mid-band classification
/// and synthetic padding stable across runs without any global state.
#[derive(Debug, Clone)]
pub struct TitleRng {
    state: i64,
}

impl TitleRng {
    pub fn from_title(title: &str) -> Self {
        let mut hash: i32 = 0;
        for unit in title.encode_utf16() {
            hash = hash
                .wrapping_shl(5)
                .wrapping_sub(hash)
                .wrapping_add(unit as i32);
        }
        Self { state: hash as i64 }
    }

    /// Next draw in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.state = (self.state * 9301 + 49297).rem_euclid(233_280);
        self.state as f64 / 233_280.0
    }

    /// A draw compared against a probability threshold.
    pub fn chance(&mut self, probability: f64) -> bool {
        self.next_f64() < probability
    }
}
