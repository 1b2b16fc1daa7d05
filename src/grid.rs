// src/grid.rs

/// Uniform 1D sampling grid over [start, stop], endpoints included.
#[derive(Debug, Clone, Copy)]
pub struct Grid1D {
    pub start: f64,
    pub stop: f64,
    pub n: usize,
}

impl Grid1D {
    pub fn new(start: f64, stop: f64, n: usize) -> Self {
        Self { start, stop, n }
    }

    /// Spacing between neighbouring samples (0 for fewer than two samples).
    pub fn step(&self) -> f64 {
        if self.n < 2 {
            0.0
        } else {
            (self.stop - self.start) / (self.n - 1) as f64
        }
    }

    /// Coordinate of sample `i`. The last sample is exactly `stop`.
    #[inline]
    pub fn at(&self, i: usize) -> f64 {
        debug_assert!(i < self.n);
        if i + 1 == self.n && self.n > 1 {
            self.stop
        } else {
            self.start + self.step() * i as f64
        }
    }

    pub fn points(&self) -> Vec<f64> {
        (0..self.n).map(|i| self.at(i)).collect()
    }
}

/// `n` evenly spaced samples from `start` to `stop` inclusive.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    Grid1D::new(start, stop, n).points()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_hits_both_ends() {
        let xs = linspace(0.0, 3.0, 1000);
        assert_eq!(xs.len(), 1000);
        assert_eq!(xs[0], 0.0);
        assert_eq!(xs[999], 3.0);
        assert!(xs.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn degenerate_sizes() {
        assert!(linspace(1.0, 2.0, 0).is_empty());
        assert_eq!(linspace(1.0, 2.0, 1), vec![1.0]);
        assert_eq!(Grid1D::new(1.0, 2.0, 1).step(), 0.0);
    }

    #[test]
    fn step_and_index_agree() {
        let g = Grid1D::new(-1.0, 1.0, 5);
        assert_eq!(g.step(), 0.5);
        assert_eq!(g.at(1), -0.5);
        assert_eq!(g.at(2), 0.0);
        assert_eq!(g.at(4), 1.0);
    }
}
