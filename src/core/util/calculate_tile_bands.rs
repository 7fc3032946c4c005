use std::num::NonZeroUsize;
use std::ops::Range;

/// Splits `height` rows into one contiguous band per worker.
///
/// Bands differ by at most one row; the first `height % bands` bands take the
/// extra rows. Never returns more bands than rows, and never an empty band.
pub fn calculate_tile_bands(height: u32, workers: NonZeroUsize) -> Vec<Range<u32>> {
    if height == 0 {
        return Vec::new();
    }

    let bands = u32::try_from(workers.get()).unwrap_or(u32::MAX).min(height);
    let band_height = height / bands;
    let remainder = height % bands;

    let mut top = 0;
    (0..bands)
        .map(|band| {
            let rows = band_height + u32::from(band < remainder);
            let range = top..top + rows;
            top += rows;
            range
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workers(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn single_worker_takes_every_row() {
        assert_eq!(calculate_tile_bands(7, workers(1)), vec![0..7]);
    }

    #[test]
    fn even_split() {
        assert_eq!(
            calculate_tile_bands(12, workers(4)),
            vec![0..3, 3..6, 6..9, 9..12]
        );
    }

    #[test]
    fn remainder_goes_to_the_first_bands() {
        assert_eq!(
            calculate_tile_bands(10, workers(4)),
            vec![0..3, 3..6, 6..8, 8..10]
        );
    }

    #[test]
    fn more_workers_than_rows_gives_one_row_each() {
        assert_eq!(calculate_tile_bands(3, workers(8)), vec![0..1, 1..2, 2..3]);
    }

    #[test]
    fn bands_cover_every_row_exactly_once() {
        for height in 1..50 {
            for n in 1..10 {
                let bands = calculate_tile_bands(height, workers(n));
                let rows: Vec<u32> = bands.iter().flat_map(Clone::clone).collect();

                assert_eq!(rows, (0..height).collect::<Vec<_>>());
                assert!(bands.iter().all(|band| !band.is_empty()));
            }
        }
    }

    #[test]
    fn zero_height_has_no_bands() {
        assert!(calculate_tile_bands(0, workers(4)).is_empty());
    }
}
