use rand::Rng;

/// Inclusive bounds on the trimmed length of an eligible word.
///
/// Invariant: `min <= max`. The setters keep the invariant by refusing any
/// value that would break it; rejected values leave the bound unchanged and
/// are not reported as errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LengthBounds {
    min: usize,
    max: usize,
}

impl LengthBounds {
    pub fn new(min: usize, max: usize) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max }
        }
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn contains(&self, len: usize) -> bool {
        len >= self.min && len <= self.max
    }

    /// Returns true if the new minimum was accepted.
    pub fn set_min(&mut self, value: usize) -> bool {
        if value <= self.max {
            self.min = value;
            true
        } else {
            false
        }
    }

    /// Returns true if the new maximum was accepted.
    pub fn set_max(&mut self, value: usize) -> bool {
        if value >= self.min {
            self.max = value;
            true
        } else {
            false
        }
    }
}

impl Default for LengthBounds {
    fn default() -> Self {
        Self { min: 1, max: 10 }
    }
}

/// Pick a uniformly random word of the text whose trimmed length falls
/// within `bounds`, or an empty string when no word qualifies.
///
/// Tokens are produced by splitting on single spaces, so consecutive spaces
/// yield empty tokens and a token may carry inner newlines or tabs. Length
/// is measured on the trimmed token but the untrimmed token is returned.
pub fn derive_target<R: Rng>(text: &str, bounds: LengthBounds, rng: &mut R) -> String {
    let eligible: Vec<&str> = text
        .split(' ')
        .filter(|token| bounds.contains(token.trim().chars().count()))
        .collect();

    if eligible.is_empty() {
        return String::new();
    }
    eligible[rng.gen_range(0..eligible.len())].to_string()
}

/// One space-delimited token of the practice text, flagged when it equals
/// the target word exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HighlightSpan<'a> {
    pub word: &'a str,
    pub is_target: bool,
}

/// Re-derive the highlight sequence from text and target alone.
///
/// Comparison is exact: untrimmed, case-sensitive. A target drawn with
/// surrounding whitespace inside the token only matches that exact token.
pub fn highlight<'a>(text: &'a str, target: &str) -> Vec<HighlightSpan<'a>> {
    text.split(' ')
        .map(|word| HighlightSpan {
            word,
            is_target: word == target,
        })
        .collect()
}

/// Presentation signal for the retype field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Feedback {
    #[default]
    Neutral,
    Match,
    Miss,
}
