//! Per-step and cumulative simulation statistics.

use std::time::Duration;

/// Counters shown beside the grid and stored in save files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Statistics {
    pub generation: u64,
    pub population: usize,
    pub births: usize,
    pub deaths: usize,
    pub total_births: u64,
    pub total_deaths: u64,
    pub max_population: usize,
    /// Wall-clock time since the last reset.
    pub runtime: Duration,
}

impl Statistics {
    /// Folds the outcome of one generation into the counters.
    pub fn record_step(&mut self, births: usize, deaths: usize, population: usize) {
        self.generation += 1;
        self.births = births;
        self.deaths = deaths;
        self.total_births += births as u64;
        self.total_deaths += deaths as u64;
        self.population = population;
        self.max_population = self.max_population.max(population);
    }

    /// Updates the live population reading after an edit.
    ///
    /// Edits are not generations, so the running maximum is left alone.
    pub fn observe_population(&mut self, population: usize) {
        self.population = population;
    }

    /// Zeroes every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Population as a percentage of `cells`.
    pub fn density(&self, cells: usize) -> f32 {
        if cells == 0 {
            return 0.0;
        }
        self.population as f32 / cells as f32 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_step_accumulates() {
        let mut stats = Statistics::default();
        stats.record_step(5, 0, 5);
        stats.record_step(2, 4, 3);

        assert_eq!(stats.generation, 2);
        assert_eq!((stats.births, stats.deaths), (2, 4));
        assert_eq!((stats.total_births, stats.total_deaths), (7, 4));
        assert_eq!(stats.population, 3);
        assert_eq!(stats.max_population, 5);
    }

    #[test]
    fn observe_population_keeps_maximum() {
        let mut stats = Statistics::default();
        stats.record_step(4, 0, 4);
        stats.observe_population(40);
        assert_eq!(stats.population, 40);
        assert_eq!(stats.max_population, 4);
    }

    #[test]
    fn reset_zeroes_everything() {
        let mut stats = Statistics::default();
        stats.record_step(9, 1, 8);
        stats.runtime = Duration::from_secs(3);
        stats.reset();
        assert_eq!(stats, Statistics::default());
    }

    #[test]
    fn density_handles_empty_area() {
        let stats = Statistics {
            population: 25,
            ..Default::default()
        };
        assert_eq!(stats.density(0), 0.0);
        assert!((stats.density(100) - 25.0).abs() < f32::EPSILON);
    }
}
