use rand::Rng;

/// Source of randomness for the report generator.
pub trait RandomSource: Send + Sync {
    /// Uniform value in `[0, 1)`.
    fn next_unit(&self) -> f64;
    /// Uniform integer in `[0, bound)`.
    fn next_below(&self, bound: u32) -> u32;
}

/// Thread-local `rand` generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_unit(&self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }

    fn next_below(&self, bound: u32) -> u32 {
        rand::thread_rng().gen_range(0..bound)
    }
}
