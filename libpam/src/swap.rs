use crate::matrix::DistanceMatrix;
use crate::tracker::MedoidTracker;

/// ```text
/// Scanning --improving swap--> Applying --iterations < cap--> Scanning
///     |                            |
///     +--none--> Converged         +--iterations == cap--> Exhausted
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwapState {
    Scanning,
    Applying,
    Converged,
    Exhausted,
}

impl SwapState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Converged | Self::Exhausted)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Convergence {
    Converged,
    /// The iteration budget ran out. The clustering is valid, but a further
    /// exchange might still improve it.
    Exhausted,
}

/// Replacing `medoid` with `non_medoid` changes the total distance by `delta`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Swap {
    pub medoid: usize,
    pub non_medoid: usize,
    pub delta: f64,
}

/// Finds the exchange that lowers the total distance the most, or `None` if
/// no exchange lowers it by more than the rounding error of the sums.
///
/// For a candidate `x` and an object `o` served by `m`, the cost of `o` is
/// `min(d[o, x], second[o])` after replacing `m` and `min(d[o, x], nearest[o])`
/// after replacing any other medoid. The deltas of all `k` exchanges with `x`
/// are therefore a shared term plus a correction for the objects of the
/// removed medoid. Candidates within rounding error of the best one lose to
/// it, so ties go to the lowest non-medoid, then to the lowest medoid.
pub fn best_swap(d: &DistanceMatrix, tracker: &MedoidTracker) -> Option<Swap> {
    let n = d.len();
    let medoids: Vec<usize> = tracker.medoids().iter().copied().collect();
    let mut position = vec![usize::MAX; n];
    for (p, &m) in medoids.iter().enumerate() {
        position[m] = p;
    }

    let assignment = tracker.assignment();
    let nearest = tracker.nearest();
    let second = tracker.second();
    let eps = (n + 2) as f64 * f64::EPSILON;

    let mut best: Option<Swap> = None;
    let mut removal = vec![0.0; medoids.len()];
    for &x in tracker.non_medoids() {
        removal.fill(0.0);
        let mut shared = 0.0;
        let mut magnitude = tracker.total_distance();
        for o in 0..n {
            let dox = d.get(o, x);
            let replaced = dox.min(second[o]);
            let gain = (dox - nearest[o]).min(0.0);
            shared += gain;
            removal[position[assignment[o]]] += replaced - nearest[o] - gain;
            magnitude += replaced + nearest[o];
        }

        let tolerance = eps * magnitude;
        for (p, &r) in removal.iter().enumerate() {
            let delta = shared + r;
            let threshold = best.map_or(0.0, |b| b.delta);
            if delta < threshold - tolerance {
                best = Some(Swap {
                    medoid: medoids[p],
                    non_medoid: x,
                    delta,
                });
            }
        }
    }
    best
}

/// Drives the SWAP phase one transition at a time.
pub struct SwapEngine<'a> {
    d: &'a DistanceMatrix,
    tracker: MedoidTracker,
    max_iterations: usize,
    iterations: usize,
    swaps: usize,
    state: SwapState,
    pending: Option<Swap>,
}

/// The result of a complete run of the SWAP phase.
#[derive(Clone, Debug)]
pub struct SwapOutcome {
    pub tracker: MedoidTracker,
    pub convergence: Convergence,
    /// Number of scans performed.
    pub iterations: usize,
    /// Number of exchanges committed.
    pub swaps: usize,
}

impl<'a> SwapEngine<'a> {
    /// With a budget of zero the engine starts exhausted.
    pub fn new(d: &'a DistanceMatrix, tracker: MedoidTracker, max_iterations: usize) -> Self {
        let state = if max_iterations == 0 {
            SwapState::Exhausted
        } else {
            SwapState::Scanning
        };
        Self {
            d,
            tracker,
            max_iterations,
            iterations: 0,
            swaps: 0,
            state,
            pending: None,
        }
    }

    pub fn state(&self) -> SwapState {
        self.state
    }

    pub fn tracker(&self) -> &MedoidTracker {
        &self.tracker
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn swaps(&self) -> usize {
        self.swaps
    }

    /// The exchange selected by the last scan, while in [`SwapState::Applying`].
    pub fn pending(&self) -> Option<Swap> {
        self.pending
    }

    /// Performs a single transition. Terminal states are left unchanged.
    pub fn step(&mut self) -> SwapState {
        self.state = match self.state {
            SwapState::Scanning => {
                self.iterations += 1;
                match best_swap(self.d, &self.tracker) {
                    Some(swap) => {
                        log::trace!(
                            "iteration {}: best swap {} -> {} ({})",
                            self.iterations,
                            swap.medoid,
                            swap.non_medoid,
                            swap.delta
                        );
                        self.pending = Some(swap);
                        SwapState::Applying
                    }
                    None => SwapState::Converged,
                }
            }
            SwapState::Applying => {
                if let Some(swap) = self.pending.take() {
                    self.tracker
                        .apply_swap(self.d, swap.medoid, swap.non_medoid, swap.delta);
                    self.swaps += 1;
                    log::debug!(
                        "swapped medoid {} for {}, total distance {}",
                        swap.medoid,
                        swap.non_medoid,
                        self.tracker.total_distance()
                    );
                }
                if self.iterations >= self.max_iterations {
                    SwapState::Exhausted
                } else {
                    SwapState::Scanning
                }
            }
            terminal => terminal,
        };
        self.state
    }

    pub fn run(mut self) -> SwapOutcome {
        while !self.state.is_terminal() {
            self.step();
        }

        let convergence = match self.state {
            SwapState::Exhausted => {
                log::warn!(
                    "swap phase stopped after {} iterations without converging",
                    self.iterations
                );
                Convergence::Exhausted
            }
            _ => {
                log::debug!(
                    "swap phase converged after {} iterations ({} swaps)",
                    self.iterations,
                    self.swaps
                );
                Convergence::Converged
            }
        };

        SwapOutcome {
            tracker: self.tracker,
            convergence,
            iterations: self.iterations,
            swaps: self.swaps,
        }
    }
}
