//! Cycle-detection driver.
//!
//! Advances a board generation by generation until it reaches a fixed
//! point, revisits a state seen within the sliding history window, or
//! exhausts its attempt budget. A progress callback is invoked
//! synchronously for every newly computed generation, in strict order
//! 0, 1, 2, ... up to and including the terminal generation.
//!
//! The history window of 20 fingerprints covers every natural
//! short-period oscillator (blinker, toad and beacon at 2, pulsar at 3,
//! pentadecathlon at 15); longer periods degrade to a timeout.

use std::collections::VecDeque;

use lifeway_types::Grid;

use crate::board::SparseBoard;
use crate::error::EngineError;

/// Number of recent state fingerprints kept for oscillation matching.
pub const HISTORY_WINDOW: usize = 20;

/// Terminal result of a detection run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The board reached a fixed point. `generation` is the generation
    /// whose state is returned: the smallest G with state(G+1) equal to
    /// state(G). G = 0 means the seed itself is stable.
    Stable {
        /// Generation of the returned state.
        generation: u64,
        /// Dense rendering of the stable state.
        state: Grid,
    },

    /// The board revisited a state seen within the history window.
    Oscillating {
        /// Generation at which the recurrence was observed.
        generation: u64,
        /// Distance in generations back to the matching state.
        period: u64,
        /// Dense rendering of the recurring state.
        state: Grid,
    },

    /// The attempt budget ran out without a recurrence.
    Timeout {
        /// Equal to the attempt budget.
        generation: u64,
        /// Dense rendering of the last computed state.
        state: Grid,
    },
}

impl Outcome {
    /// Generation of the state carried by this outcome.
    pub const fn generation(&self) -> u64 {
        match self {
            Self::Stable { generation, .. }
            | Self::Oscillating { generation, .. }
            | Self::Timeout { generation, .. } => *generation,
        }
    }

    /// The dense state carried by this outcome.
    pub const fn state(&self) -> &Grid {
        match self {
            Self::Stable { state, .. }
            | Self::Oscillating { state, .. }
            | Self::Timeout { state, .. } => state,
        }
    }
}

/// Drive `seed` for up to `max_attempts` generations.
///
/// `progress` is called once per generation with the generation number
/// and its dense state, starting at generation 0 (the seed) and ending
/// at the terminal generation. An error from the callback aborts the
/// run and propagates.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInput`] when `max_attempts` is zero
/// (no progress is emitted), or whatever error the callback raised.
pub fn run_detection<F>(
    seed: &SparseBoard,
    max_attempts: u64,
    mut progress: F,
) -> Result<Outcome, EngineError>
where
    F: FnMut(u64, &Grid) -> Result<(), EngineError>,
{
    if max_attempts == 0 {
        return Err(EngineError::InvalidInput(
            "maxAttempts must be at least 1".to_owned(),
        ));
    }

    let mut current = seed.clone();
    progress(0, &current.to_dense())?;

    // Fingerprints of the generations strictly before `current`, oldest
    // first, trimmed to the window.
    let mut history: VecDeque<String> = VecDeque::with_capacity(HISTORY_WINDOW);

    for generation in 1..=max_attempts {
        let current_fp = current.fingerprint();
        let next = current.next_generation();
        let next_fp = next.fingerprint();

        if next_fp == current_fp {
            // Fixed point: the state computed at `generation - 1` maps
            // to itself. The redundant identical frame is not emitted;
            // the terminal frame was the previous one.
            return Ok(Outcome::Stable {
                generation: generation - 1,
                state: current.to_dense(),
            });
        }

        progress(generation, &next.to_dense())?;

        // history[j] holds the fingerprint of generation
        // (generation - 1 - history.len() + j), so a match at j lies
        // history.len() + 1 - j generations behind `next`.
        if let Some(j) = history.iter().position(|fp| *fp == next_fp) {
            let period = u64::try_from(history.len() - j).unwrap_or(u64::MAX).saturating_add(1);
            return Ok(Outcome::Oscillating {
                generation,
                period,
                state: next.to_dense(),
            });
        }

        history.push_back(current_fp);
        if history.len() > HISTORY_WINDOW {
            history.pop_front();
        }
        current = next;
    }

    Ok(Outcome::Timeout {
        generation: max_attempts,
        state: current.to_dense(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifeway_types::Grid;

    fn dense(grid: &[&[u8]]) -> Grid {
        grid.iter().map(|line| line.to_vec()).collect()
    }

    fn collect_progress(
        events: &mut Vec<(u64, Grid)>,
    ) -> impl FnMut(u64, &Grid) -> Result<(), EngineError> {
        move |generation, state| {
            events.push((generation, state.clone()));
            Ok(())
        }
    }

    #[test]
    fn block_is_stable_at_generation_zero() {
        let seed_grid = dense(&[
            &[0, 0, 0, 0],
            &[0, 1, 1, 0],
            &[0, 1, 1, 0],
            &[0, 0, 0, 0],
        ]);
        let seed = SparseBoard::from_dense(&seed_grid);

        let mut events = Vec::new();
        let outcome = run_detection(&seed, 10, collect_progress(&mut events));

        assert_eq!(
            outcome.ok(),
            Some(Outcome::Stable {
                generation: 0,
                state: seed_grid,
            })
        );
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].0, 0);
    }

    #[test]
    fn blinker_reports_period_two() {
        let seed = SparseBoard::from_dense(&dense(&[
            &[0, 0, 0, 0, 0],
            &[0, 0, 1, 0, 0],
            &[0, 0, 1, 0, 0],
            &[0, 0, 1, 0, 0],
            &[0, 0, 0, 0, 0],
        ]));
        let generation_one = dense(&[
            &[0, 0, 0, 0, 0],
            &[0, 0, 0, 0, 0],
            &[0, 1, 1, 1, 0],
            &[0, 0, 0, 0, 0],
            &[0, 0, 0, 0, 0],
        ]);

        let mut events = Vec::new();
        let outcome = run_detection(&seed, 10, collect_progress(&mut events))
            .expect("detection succeeds");

        let Outcome::Oscillating {
            generation,
            period,
            state,
        } = outcome
        else {
            panic!("expected oscillation, got {outcome:?}");
        };
        assert_eq!(period, 2);
        assert_eq!(generation, 2);
        assert_eq!(state, seed.to_dense());
        assert_eq!(events[1].1, generation_one);
        assert_eq!(events[2].1, seed.to_dense());
    }

    #[test]
    fn lone_cell_stabilises_empty_at_generation_one() {
        let seed = SparseBoard::from_dense(&dense(&[&[0, 0, 0], &[0, 1, 0], &[0, 0, 0]]));
        let empty = dense(&[&[0, 0, 0], &[0, 0, 0], &[0, 0, 0]]);

        let mut events = Vec::new();
        let outcome = run_detection(&seed, 10, collect_progress(&mut events));

        assert_eq!(
            outcome.ok(),
            Some(Outcome::Stable {
                generation: 1,
                state: empty,
            })
        );
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn glider_times_out_with_full_progress() {
        // Standard glider in a roomy grid; 5 attempts are not enough to
        // reach the corner, so the run exhausts its budget.
        let mut grid = vec![vec![0u8; 20]; 20];
        for (r, c) in [(0usize, 1usize), (1, 2), (2, 0), (2, 1), (2, 2)] {
            grid[r][c] = 1;
        }
        let seed = SparseBoard::from_dense(&grid);

        let mut events = Vec::new();
        let outcome = run_detection(&seed, 5, collect_progress(&mut events))
            .expect("detection succeeds");

        let Outcome::Timeout { generation, state } = outcome else {
            panic!("expected timeout, got {outcome:?}");
        };
        assert_eq!(generation, 5);
        let live: usize = state.iter().flatten().map(|&c| usize::from(c)).sum();
        assert_eq!(live, 5);

        // Progress for generations 0..=5 inclusive, strictly ordered.
        let generations: Vec<u64> = events.iter().map(|(g, _)| *g).collect();
        assert_eq!(generations, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn progress_never_exceeds_attempts_plus_one() {
        let seed = SparseBoard::from_dense(&dense(&[
            &[0, 1, 0],
            &[0, 1, 1],
            &[1, 0, 0],
        ]));
        for attempts in 1..=8 {
            let mut events = Vec::new();
            let _ = run_detection(&seed, attempts, collect_progress(&mut events));
            assert!(events.len() <= usize::try_from(attempts).unwrap_or(usize::MAX) + 1);
        }
    }

    #[test]
    fn zero_attempts_is_rejected_without_progress() {
        let seed = SparseBoard::from_dense(&dense(&[&[1]]));
        let mut events = Vec::new();
        let outcome = run_detection(&seed, 0, collect_progress(&mut events));
        assert!(matches!(outcome, Err(EngineError::InvalidInput(_))));
        assert!(events.is_empty());
    }

    #[test]
    fn callback_error_aborts_the_run() {
        let seed = SparseBoard::from_dense(&dense(&[&[0, 1, 0], &[0, 1, 0], &[0, 1, 0]]));
        let mut calls = 0;
        let outcome = run_detection(&seed, 10, |_, _| {
            calls += 1;
            if calls > 1 {
                Err(EngineError::Cancelled("sink closed".to_owned()))
            } else {
                Ok(())
            }
        });
        assert!(matches!(outcome, Err(EngineError::Cancelled(_))));
        assert_eq!(calls, 2);
    }

    #[test]
    fn empty_board_is_trivially_stable() {
        let seed = SparseBoard::from_dense(&dense(&[&[0, 0], &[0, 0]]));
        let outcome = run_detection(&seed, 3, |_, _| Ok(()));
        assert!(matches!(outcome, Ok(Outcome::Stable { generation: 0, .. })));
    }
}
