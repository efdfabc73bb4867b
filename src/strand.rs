/// Transcript orientation guessed from the dinucleotides in an alignment trace
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strand {
    Forward,
    Reverse,
}

impl Strand {
    pub fn as_char(self) -> char {
        match self {
            Strand::Forward => '+',
            Strand::Reverse => '-',
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Guess the strand of a whole alignment trace.
///
/// A reverse-strand intron reads `CT....AC` on the reference, so a trace with
/// more `CT` than `AG` (case-insensitive substring counts) is called
/// [`Strand::Reverse`]. Ties and everything else default to forward.
pub fn infer_strand(alignment: &str) -> Strand {
    let upper = alignment.to_ascii_uppercase();
    let ct = upper.matches("CT").count();
    let ag = upper.matches("AG").count();

    if ct > ag {
        Strand::Reverse
    } else {
        Strand::Forward
    }
}
