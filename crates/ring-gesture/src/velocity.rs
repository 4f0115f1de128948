//! Sliding-window velocity smoothing

use std::collections::VecDeque;

/// Mean of the most recent velocity samples
#[derive(Debug, Clone)]
pub struct VelocityWindow {
    samples: VecDeque<f64>,
    capacity: usize,
}

impl VelocityWindow {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a sample, evicting the oldest once full
    pub fn push(&mut self, velocity: f64) {
        if !velocity.is_finite() {
            return;
        }
        while self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(velocity);
    }

    /// Mean of the window, zero when empty
    pub fn mean(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        self.samples.iter().sum::<f64>() / self.samples.len() as f64
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Change the window length, keeping the newest samples
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_over_last_samples() {
        let mut window = VelocityWindow::new(6);
        assert_eq!(window.mean(), 0.0);

        for v in 1..=8 {
            window.push(v as f64);
        }
        assert_eq!(window.len(), 6);
        // 3 + 4 + 5 + 6 + 7 + 8
        assert_eq!(window.mean(), 5.5);
    }

    #[test]
    fn test_rejects_non_finite() {
        let mut window = VelocityWindow::new(3);
        window.push(10.0);
        window.push(f64::NAN);
        window.push(f64::INFINITY);
        assert_eq!(window.len(), 1);
        assert_eq!(window.mean(), 10.0);
    }

    #[test]
    fn test_shrinking_capacity_keeps_newest() {
        let mut window = VelocityWindow::new(4);
        for v in [1.0, 2.0, 3.0, 4.0] {
            window.push(v);
        }
        window.set_capacity(2);
        assert_eq!(window.mean(), 3.5);
    }
}
