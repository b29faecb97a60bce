//! Topology-preserving thinning of ridge masks.
//!
//! Zhang-Suen: two alternating sub-iterations peel boundary pixels until the
//! mask stops changing. Pixels whose removal would split a ridge (more than one
//! background-to-foreground transition around them) or shorten a ridge end
//! (fewer than two neighbors) are kept, so endings and bifurcations survive as
//! one-pixel-wide loci.

use crate::image::BinaryImage;

/// Neighbors in the order P2..P9: N, NE, E, SE, S, SW, W, NW.
const RING: [(isize, isize); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// Thins a ridge mask to one-pixel-wide centerlines.
pub fn thin(mask: &BinaryImage) -> BinaryImage {
    let mut out = mask.clone();
    let mut doomed: Vec<(usize, usize)> = Vec::new();
    loop {
        let mut changed = false;
        for pass in [SubIteration::First, SubIteration::Second] {
            doomed.clear();
            for y in 0..out.height() {
                for x in 0..out.width() {
                    if out.get(x, y) == Some(true) && removable(&out, x, y, pass) {
                        doomed.push((x, y));
                    }
                }
            }
            for &(x, y) in &doomed {
                out.set(x, y, false);
            }
            changed |= !doomed.is_empty();
        }
        if !changed {
            return out;
        }
    }
}

#[derive(Clone, Copy)]
enum SubIteration {
    First,
    Second,
}

fn removable(mask: &BinaryImage, x: usize, y: usize, pass: SubIteration) -> bool {
    let mut p = [false; 8];
    for (slot, (dx, dy)) in p.iter_mut().zip(RING) {
        *slot = mask.get_or_background(x as isize + dx, y as isize + dy);
    }

    let neighbors = p.iter().filter(|&&v| v).count();
    if !(2..=6).contains(&neighbors) {
        return false;
    }
    let rises = (0..8).filter(|&i| !p[i] && p[(i + 1) % 8]).count();
    if rises != 1 {
        return false;
    }

    let [p2, _, p4, _, p6, _, p8, _] = p;
    match pass {
        SubIteration::First => !(p2 && p4 && p6) && !(p4 && p6 && p8),
        SubIteration::Second => !(p2 && p4 && p8) && !(p2 && p6 && p8),
    }
}

#[cfg(test)]
mod tests {
    use super::thin;
    use crate::image::BinaryImage;

    fn mask_from_rows(rows: &[&str]) -> BinaryImage {
        let mut mask = BinaryImage::new(rows[0].len(), rows.len()).unwrap();
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                mask.set(x, y, ch == '#');
            }
        }
        mask
    }

    #[test]
    fn single_pixel_line_is_stable() {
        let mask = mask_from_rows(&[".......", ".#####.", "......."]);
        assert_eq!(thin(&mask), mask);
    }

    #[test]
    fn thick_bar_collapses_to_one_pixel_width() {
        let mask = mask_from_rows(&[
            "............",
            ".##########.",
            ".##########.",
            ".##########.",
            "............",
        ]);
        let thinned = thin(&mask);
        assert!(thinned.count() > 0);
        for x in 0..thinned.width() {
            let column: usize = (0..thinned.height())
                .filter(|&y| thinned.get(x, y) == Some(true))
                .count();
            assert!(column <= 1, "column {x} has {column} pixels");
        }
    }

    #[test]
    fn empty_mask_stays_empty() {
        let mask = BinaryImage::new(4, 4).unwrap();
        assert_eq!(thin(&mask).count(), 0);
    }
}
