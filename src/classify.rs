//! Scale3x neighborhood classifier.
//!
//! Maps the 3x3 neighborhood of one source pixel to the 3x3 block that
//! replaces it in the upscaled image. The rule only ever picks the center or
//! one of its four orthogonal neighbors, so no new colors are introduced.
//!
//! # Algorithm
//!
//! For each input pixel E with neighbors:
//! ```text
//!   A B C
//!   D E F
//!   G H I
//! ```
//!
//! The output 3x3 block is computed as:
//! ```text
//!   E0 E1 E2
//!   E3 E4 E5
//!   E6 E7 E8
//! ```
//!
//! If `B == H` or `D == F` no edge direction exists and all nine outputs are E.
//! Otherwise:
//! - E0 = D == B ? D : E
//! - E1 = (D == B && E != C) || (B == F && E != A) ? B : E
//! - E2 = B == F ? F : E
//! - E3 = (D == B && E != G) || (D == H && E != A) ? D : E
//! - E4 = E
//! - E5 = (B == F && E != I) || (H == F && E != C) ? F : E
//! - E6 = D == H ? D : E
//! - E7 = (D == H && E != I) || (H == F && E != G) ? H : E
//! - E8 = H == F ? F : E
//!
//! # Example
//!
//! ```
//! use scale3x::classify::{classify, Neighborhood};
//!
//! let n = Neighborhood { a: 9, b: 1, c: 9, d: 1, e: 2, f: 3, g: 9, h: 4, i: 9 };
//! let block = classify(n);
//! assert_eq!(block.0, [1, 1, 2, 1, 2, 2, 2, 2, 2]);
//! ```

/// The 3x3 window of source pixels centered on `e`.
///
/// `b`, `d`, `f`, `h` are the up, left, right and down neighbors.
/// The diagonals `a`, `c`, `g`, `i` only act as tie-breaks for the
/// edge-midpoint outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighborhood<T> {
    pub a: T,
    pub b: T,
    pub c: T,
    pub d: T,
    pub e: T,
    pub f: T,
    pub g: T,
    pub h: T,
    pub i: T,
}

impl<T: Copy + PartialEq> Neighborhood<T> {
    /// A neighborhood where every position holds `p`.
    pub fn uniform(p: T) -> Self {
        Self { a: p, b: p, c: p, d: p, e: p, f: p, g: p, h: p, i: p }
    }

    /// Build from a row-major `[A, B, C, D, E, F, G, H, I]` array.
    pub fn from_array([a, b, c, d, e, f, g, h, i]: [T; 9]) -> Self {
        Self { a, b, c, d, e, f, g, h, i }
    }

    /// True when no edge direction can be inferred and the block is a flat copy.
    pub fn is_degenerate(&self) -> bool {
        self.b == self.h || self.d == self.f
    }
}

/// The 3x3 block of output pixels, row-major `E0..E8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputBlock<T>(pub [T; 9]);

impl<T: Copy> OutputBlock<T> {
    /// A block filled with `p`.
    pub fn flat(p: T) -> Self {
        Self([p; 9])
    }

    /// Pixel at column `col` and row `row`, both in `0..3`.
    pub fn get(&self, col: usize, row: usize) -> T {
        self.0[row * 3 + col]
    }

    /// The block as three rows of three pixels.
    pub fn rows(&self) -> [[T; 3]; 3] {
        let p = &self.0;
        [[p[0], p[1], p[2]], [p[3], p[4], p[5]], [p[6], p[7], p[8]]]
    }
}

/// Apply the Scale3x rule to one neighborhood.
pub fn classify<T: Copy + PartialEq>(n: Neighborhood<T>) -> OutputBlock<T> {
    let Neighborhood { a, b, c, d, e, f, g, h, i } = n;

    if n.is_degenerate() {
        return OutputBlock::flat(e);
    }

    let db = d == b;
    let bf = b == f;
    let dh = d == h;
    let hf = h == f;

    let pick = |cond: bool, p: T| if cond { p } else { e };

    OutputBlock([
        pick(db, d),
        pick((db && e != c) || (bf && e != a), b),
        pick(bf, f),
        pick((db && e != g) || (dh && e != a), d),
        e,
        pick((bf && e != i) || (hf && e != c), f),
        pick(dh, d),
        pick((dh && e != i) || (hf && e != g), h),
        pick(hf, f),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    /// Neighborhood with all diagonals set to 9 and the given cross.
    fn cross(b: u8, d: u8, e: u8, f: u8, h: u8) -> Neighborhood<u8> {
        Neighborhood { a: 9, b, c: 9, d, e, f, g: 9, h, i: 9 }
    }

    #[test]
    fn test_reference_oracle() {
        let block = classify(cross(1, 1, 2, 3, 4));
        assert_eq!(block.0, [1, 1, 2, 1, 2, 2, 2, 2, 2]);
    }

    #[test]
    fn test_center_identity() {
        for values in [[0u8; 9], [1, 2, 3, 4, 5, 6, 7, 8, 9], [9, 1, 9, 1, 2, 3, 9, 4, 9]] {
            let n = Neighborhood::from_array(values);
            assert_eq!(classify(n).get(1, 1), n.e);
        }
    }

    #[test]
    fn test_degenerate_guard_ignores_diagonals() {
        // B == H and D == F
        for diag in [0u8, 5, 7] {
            let n = Neighborhood { a: diag, b: 1, c: diag + 1, d: 3, e: 5, f: 3, g: 2, h: 1, i: 4 };
            assert!(n.is_degenerate());
            assert_eq!(classify(n), OutputBlock::flat(5));
        }
    }

    #[test]
    fn test_single_matching_pair_is_degenerate() {
        // B == H alone already blocks the rule
        assert_eq!(classify(cross(1, 1, 2, 3, 1)), OutputBlock::flat(2));
        // D == F alone already blocks the rule
        assert_eq!(classify(cross(1, 3, 2, 3, 4)), OutputBlock::flat(2));
    }

    #[test]
    fn test_uniform_neighborhood() {
        let red = Rgba([255u8, 0, 0, 255]);
        assert_eq!(classify(Neighborhood::uniform(red)), OutputBlock::flat(red));
    }

    #[test]
    fn test_corner_bottom_right() {
        // H == F, everything else distinct
        let block = classify(cross(1, 2, 5, 3, 3));
        assert_eq!(block.rows(), [[5, 5, 5], [5, 5, 3], [5, 3, 3]]);
    }

    #[test]
    fn test_corner_top_right() {
        // B == F
        let block = classify(cross(3, 2, 5, 3, 4));
        assert_eq!(block.rows(), [[5, 3, 3], [5, 5, 3], [5, 5, 5]]);
    }

    #[test]
    fn test_corner_bottom_left() {
        // D == H
        let block = classify(cross(1, 4, 5, 3, 4));
        assert_eq!(block.rows(), [[5, 5, 5], [4, 5, 5], [4, 4, 5]]);
    }

    #[test]
    fn test_diagonal_tiebreak_suppresses_midpoints() {
        // D == B, but E matches both C and G so E1 and E3 stay E
        let n = Neighborhood { a: 9, b: 1, c: 2, d: 1, e: 2, f: 3, g: 2, h: 4, i: 9 };
        let block = classify(n);
        assert_eq!(block.get(0, 0), 1);
        assert_eq!(block.get(1, 0), 2);
        assert_eq!(block.get(0, 1), 2);
    }

    #[test]
    fn test_midpoint_from_second_clause() {
        // B == F with E != A fires E1 even when D != B
        let n = Neighborhood { a: 9, b: 3, c: 5, d: 2, e: 5, f: 3, g: 9, h: 4, i: 9 };
        let block = classify(n);
        assert_eq!(block.get(1, 0), 3);
        // E5 needs E != I for the B == F clause
        assert_eq!(block.get(2, 1), 3);
    }

    #[test]
    fn test_output_block_accessors() {
        let block = OutputBlock([0, 1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(block.get(2, 0), 2);
        assert_eq!(block.get(0, 2), 6);
        assert_eq!(block.rows()[1], [3, 4, 5]);
    }
}
