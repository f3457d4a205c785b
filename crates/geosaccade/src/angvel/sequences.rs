use std::ops::Range;

/// Iterator over the maximal runs of `true` in a mask.
#[derive(Debug, Clone)]
pub struct Sequences<'a> {
    mask: &'a [bool],
    pos: usize,
}

impl Iterator for Sequences<'_> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Range<usize>> {
        let n = self.mask.len();
        let start = self.pos + self.mask[self.pos..].iter().position(|&b| b)?;
        let end = self.mask[start..]
            .iter()
            .position(|&b| !b)
            .map_or(n, |k| start + k);
        self.pos = end;
        Some(start..end)
    }
}

/// Maximal runs of consecutive `true` values, as half-open index ranges.
pub fn find_sequences(mask: &[bool]) -> Sequences<'_> {
    Sequences { mask, pos: 0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runs(bits: &[u8]) -> Vec<Range<usize>> {
        let mask: Vec<bool> = bits.iter().map(|&b| b != 0).collect();
        find_sequences(&mask).collect()
    }

    #[test]
    fn finds_all_true_runs() {
        let cases: [(&[u8], Vec<Range<usize>>); 7] = [
            (&[0, 0, 0, 0, 0], vec![]),
            (&[1, 0, 0, 0, 0], vec![0..1]),
            (&[1, 1, 1, 0, 0], vec![0..3]),
            (&[0, 1, 1, 0, 0], vec![1..3]),
            (&[0, 1, 1, 1, 1], vec![1..5]),
            (&[1, 1, 1, 1, 1], vec![0..5]),
            (&[1, 1, 0, 1, 1], vec![0..2, 3..5]),
        ];
        for (bits, expected) in cases {
            assert_eq!(runs(bits), expected, "failure for {:?}", bits);
        }
    }

    #[test]
    fn empty_mask_has_no_runs() {
        assert_eq!(find_sequences(&[]).count(), 0);
    }
}
