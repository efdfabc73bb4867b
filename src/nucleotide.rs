/// Watson-Crick complement of an uppercase base; anything else passes through
pub fn complement(base: char) -> char {
    match base {
        'A' => 'T',
        'C' => 'G',
        'G' => 'C',
        'T' => 'A',
        other => other,
    }
}

/// Uppercase, complement and reverse a sequence.
///
/// Characters outside `ACGT` (after uppercasing) are kept as they are, so the
/// result always has as many characters as the input.
pub fn reverse_complement(seq: &str) -> String {
    seq.to_ascii_uppercase().chars().rev().map(complement).collect()
}
