//! Crossing-number classification of skeleton pixels.

use crate::image::BinaryImage;
use crate::minutia::MinutiaKind;

/// 8-neighborhood in cyclic order: NW, N, NE, E, SE, S, SW, W.
const CYCLE: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
];

/// Half the number of foreground/background changes around `(x, y)`.
pub fn crossing_number(skeleton: &BinaryImage, x: usize, y: usize) -> usize {
    let mut ring = [false; 8];
    for (slot, (dx, dy)) in ring.iter_mut().zip(CYCLE) {
        *slot = skeleton.get_or_background(x as isize + dx, y as isize + dy);
    }
    let changes = (0..8).filter(|&i| ring[i] != ring[(i + 1) % 8]).count();
    changes / 2
}

/// Maps a crossing number to a minutia kind: 1 is an ending, 3 a bifurcation.
pub fn classify(crossing: usize) -> Option<MinutiaKind> {
    match crossing {
        1 => Some(MinutiaKind::Ending),
        3 => Some(MinutiaKind::Bifurcation),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{classify, crossing_number};
    use crate::image::BinaryImage;
    use crate::minutia::MinutiaKind;

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
    fn line_end_and_interior() {
        let mask = mask_from_rows(&[".....", "###..", "....."]);
        assert_eq!(crossing_number(&mask, 2, 1), 1);
        assert_eq!(crossing_number(&mask, 1, 1), 2);
    }

    #[test]
    fn fork_has_three_crossings() {
        let mask = mask_from_rows(&["...#", "###.", "...#"]);
        assert_eq!(crossing_number(&mask, 2, 1), 3);
    }

    #[test]
    fn isolated_pixel_is_not_a_minutia() {
        let mask = mask_from_rows(&["...", ".#.", "..."]);
        assert_eq!(crossing_number(&mask, 1, 1), 0);
        assert_eq!(classify(0), None);
        assert_eq!(classify(2), None);
        assert_eq!(classify(4), None);
        assert_eq!(classify(1), Some(MinutiaKind::Ending));
        assert_eq!(classify(3), Some(MinutiaKind::Bifurcation));
    }
}
