// Random source seam for the live feed
use rand::Rng;

/// Supplies uniform draws in `[0, 1)` for telemetry jitter.
pub trait JitterSource: Send {
    fn unit(&mut self) -> f64;
}

impl<R: Rng + Send> JitterSource for R {
    fn unit(&mut self) -> f64 {
        self.random::<f64>()
    }
}
