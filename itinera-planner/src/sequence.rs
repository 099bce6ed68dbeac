//! Nearest-neighbour ordering of selected stops.

use itinera_core::{DesiredStop, GeoPoint, Place, StopSequencer, haversine_km};

/// Default [`StopSequencer`]: from the departure, repeatedly travel to the
/// closest unvisited stop.
///
/// Distances come from a full great-circle matrix over the departure and
/// every stop. Equal distances resolve to the stop listed first.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NearestNeighbourSequencer;

impl StopSequencer for NearestNeighbourSequencer {
    fn sequence(
        &self,
        departure: &Place,
        stops: Vec<DesiredStop>,
        _return_to_departure: bool,
    ) -> Vec<DesiredStop> {
        if stops.len() < 2 {
            return stops;
        }

        let points: Vec<GeoPoint> = std::iter::once(departure.location)
            .chain(stops.iter().map(|stop| stop.place.location))
            .collect();
        let matrix = distance_matrix(&points);

        let mut remaining: Vec<Option<DesiredStop>> = stops.into_iter().map(Some).collect();
        let mut ordered = Vec::with_capacity(remaining.len());
        let mut current = 0_usize;
        while let Some(next) = closest_unvisited(&matrix, current, &remaining) {
            if let Some(stop) = remaining.get_mut(next).and_then(Option::take) {
                ordered.push(stop);
            }
            // Matrix row 0 is the departure, so stop `i` lives at row `i + 1`.
            current = next + 1;
        }
        ordered
    }
}

/// Symmetric great-circle distances in kilometres between every pair of
/// points.
#[must_use]
pub fn distance_matrix(points: &[GeoPoint]) -> Vec<Vec<f64>> {
    points
        .iter()
        .map(|&from| points.iter().map(|&to| haversine_km(from, to)).collect())
        .collect()
}

fn closest_unvisited(
    matrix: &[Vec<f64>],
    current: usize,
    remaining: &[Option<DesiredStop>],
) -> Option<usize> {
    let row = matrix.get(current)?;
    let mut best: Option<(usize, f64)> = None;
    for (index, slot) in remaining.iter().enumerate() {
        if slot.is_none() {
            continue;
        }
        let distance = row.get(index + 1).copied().unwrap_or(f64::INFINITY);
        if best.is_none_or(|(_, shortest)| distance < shortest) {
            best = Some((index, distance));
        }
    }
    best.map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use itinera_core::test_support::{place, stop};
    use rstest::rstest;

    fn order(stops: &[DesiredStop]) -> Vec<&str> {
        stops.iter().map(|s| s.id.0.as_str()).collect()
    }

    #[rstest]
    fn empty_and_single_inputs_pass_through() {
        let home = place("Home", 0.0, 0.0);
        assert!(
            NearestNeighbourSequencer
                .sequence(&home, Vec::new(), false)
                .is_empty()
        );
        let only = vec![stop("a", place("A", 10.0, 10.0), &["ana"], 3, 0.0)];
        let ordered = NearestNeighbourSequencer.sequence(&home, only, true);
        assert_eq!(order(&ordered), vec!["a"]);
    }

    #[rstest]
    fn visits_closest_stop_first() {
        let home = place("Home", 0.0, 0.0);
        let stops = vec![
            stop("far", place("Far", 0.0, 3.0), &["ana"], 3, 0.0),
            stop("near", place("Near", 0.0, 1.0), &["ana"], 3, 0.0),
            stop("mid", place("Mid", 0.0, 2.0), &["ana"], 3, 0.0),
        ];
        let ordered = NearestNeighbourSequencer.sequence(&home, stops, false);
        assert_eq!(order(&ordered), vec!["near", "mid", "far"]);
    }

    #[rstest]
    fn equal_distances_keep_input_order() {
        let home = place("Home", 0.0, 0.0);
        let stops = vec![
            stop("east", place("East", 1.0, 0.0), &["ana"], 3, 0.0),
            stop("west", place("West", -1.0, 0.0), &["ana"], 3, 0.0),
        ];
        let ordered = NearestNeighbourSequencer.sequence(&home, stops, false);
        assert_eq!(order(&ordered), vec!["east", "west"]);
    }

    #[rstest]
    fn output_is_a_permutation() {
        let home = place("Home", 0.0, 0.0);
        let stops: Vec<DesiredStop> = (0..6)
            .map(|i| {
                let offset = f64::from(i);
                stop(
                    &format!("s{i}"),
                    place("P", offset * 1.7 % 5.0, offset),
                    &["ana"],
                    3,
                    0.0,
                )
            })
            .collect();
        let ordered = NearestNeighbourSequencer.sequence(&home, stops.clone(), false);
        let mut expected = order(&stops);
        let mut actual = order(&ordered);
        expected.sort_unstable();
        actual.sort_unstable();
        assert_eq!(expected, actual);
    }

    #[rstest]
    fn matrix_is_symmetric_with_zero_diagonal() {
        let points = [
            GeoPoint { x: 0.0, y: 0.0 },
            GeoPoint { x: 2.0, y: 1.0 },
            GeoPoint { x: -3.0, y: 4.0 },
        ];
        let matrix = distance_matrix(&points);
        for (i, row) in matrix.iter().enumerate() {
            assert!(row[i].abs() < 1e-9);
            for (j, value) in row.iter().enumerate() {
                assert!((value - matrix[j][i]).abs() < 1e-9);
            }
        }
    }
}
