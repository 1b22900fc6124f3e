pub fn normalize_seq(seq: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(seq.len());
    for &b in seq {
        let up = b.to_ascii_uppercase();
        let nb = match up {
            b'A' | b'C' | b'G' | b'T' | b'N' => up,
            b'U' => b'T',
            _ => b'N',
        };
        out.push(nb);
    }
    out
}

#[inline]
pub fn complement(base: u8) -> u8 {
    match base.to_ascii_uppercase() {
        b'A' => b'T',
        b'C' => b'G',
        b'G' => b'C',
        b'T' | b'U' => b'A',
        _ => b'N',
    }
}

pub fn revcomp(seq: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(seq.len());
    for &b in seq.iter().rev() {
        out.push(complement(b));
    }
    out
}
