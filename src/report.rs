// src/report.rs
//! Bounded diagnostic sampling.

/// Counts occurrences of one diagnostic kind and admits only the first
/// `limit` of them for individual logging.
#[derive(Debug, Clone)]
pub struct Sampler {
    limit: usize,
    seen: u64,
}

impl Sampler {
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self { limit, seen: 0 }
    }

    /// Records one occurrence; true while still within the sample.
    pub fn sample(&mut self) -> bool {
        self.seen += 1;
        self.seen <= self.limit as u64
    }

    #[must_use]
    pub fn count(&self) -> u64 {
        self.seen
    }
}

#[cfg(test)]
mod tests {
    use super::Sampler;

    #[test]
    fn admits_only_first_n() {
        let mut s = Sampler::new(2);
        let admitted: Vec<bool> = (0..4).map(|_| s.sample()).collect();
        assert_eq!(admitted, vec![true, true, false, false]);
        assert_eq!(s.count(), 4);
    }
}
