//! The Conway transition function.
//!
//! Pure and total: a cell's next state depends only on whether it is
//! alive now and how many of its eight neighbours are alive.
//!
//! - A live cell survives iff it has 2 or 3 live neighbours.
//! - A dead cell is born iff it has exactly 3 live neighbours.

/// Decide whether a cell is alive in the next generation.
///
/// `live_neighbours` is the count of live cells among the eight Moore
/// neighbours, so only values 0..=8 are meaningful; larger counts fall
/// through to `false`.
pub const fn next_alive(alive: bool, live_neighbours: u8) -> bool {
    if alive {
        matches!(live_neighbours, 2 | 3)
    } else {
        live_neighbours == 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn live_cell_survives_on_two_or_three() {
        assert!(next_alive(true, 2));
        assert!(next_alive(true, 3));
    }

    #[test]
    fn live_cell_dies_otherwise() {
        for n in [0, 1, 4, 5, 6, 7, 8] {
            assert!(!next_alive(true, n), "live cell with {n} neighbours");
        }
    }

    #[test]
    fn dead_cell_born_only_on_exactly_three() {
        assert!(next_alive(false, 3));
        for n in [0, 1, 2, 4, 5, 6, 7, 8] {
            assert!(!next_alive(false, n), "dead cell with {n} neighbours");
        }
    }
}
