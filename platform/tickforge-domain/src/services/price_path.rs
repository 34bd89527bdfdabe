use rand::Rng;

/// Smallest increment an emitted price can carry.
pub const PRICE_TICK: f64 = 0.0001;
const PRICE_SCALE: f64 = 10_000.0;

/// Ranges the random walk and volume draws are taken from (all inclusive).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePathConfig {
    pub initial_min: f64,
    pub initial_max: f64,
    pub step_min: f64,
    pub step_max: f64,
    pub volume_min: u32,
    pub volume_max: u32,
}

impl Default for PricePathConfig {
    fn default() -> Self {
        Self {
            initial_min: 10.0,
            initial_max: 200.0,
            step_min: 0.999,
            step_max: 1.002,
            volume_min: 1,
            volume_max: 1000,
        }
    }
}

impl PricePathConfig {
    pub fn validate(&self) -> Result<(), String> {
        check_positive_range("initial price", self.initial_min, self.initial_max)?;
        check_positive_range("step factor", self.step_min, self.step_max)?;
        if self.volume_min == 0 {
            return Err("volume min must be >= 1".to_string());
        }
        if self.volume_min > self.volume_max {
            return Err(format!(
                "volume range is empty (min={} > max={})",
                self.volume_min, self.volume_max
            ));
        }
        Ok(())
    }

    pub fn volume_range(&self) -> (u32, u32) {
        (self.volume_min, self.volume_max)
    }
}

fn check_positive_range(label: &str, min: f64, max: f64) -> Result<(), String> {
    if !min.is_finite() || !max.is_finite() {
        return Err(format!("{label} range must be finite (min={min}, max={max})"));
    }
    if min <= 0.0 {
        return Err(format!("{label} min must be > 0 (got {min})"));
    }
    if min > max {
        return Err(format!("{label} range is empty (min={min} > max={max})"));
    }
    Ok(())
}

/// Multiplicative random walk for one symbol. No drift correction or
/// mean reversion; the asymmetric default factor range biases it upward.
#[derive(Debug, Clone)]
pub struct PricePath {
    config: PricePathConfig,
    price: f64,
}

impl PricePath {
    pub fn start<R: Rng + ?Sized>(config: PricePathConfig, rng: &mut R) -> Self {
        let price = rng.gen_range(config.initial_min..=config.initial_max);
        Self { config, price }
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    /// Applies one factor draw and returns the full-precision price.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> f64 {
        self.price *= rng.gen_range(self.config.step_min..=self.config.step_max);
        self.price
    }
}

/// Rounds to 4 decimals for emission, never below [`PRICE_TICK`].
pub fn round_price(price: f64) -> f64 {
    let scaled = price * PRICE_SCALE;
    if !scaled.is_finite() {
        return price.max(PRICE_TICK);
    }
    (scaled.round() / PRICE_SCALE).max(PRICE_TICK)
}

pub fn draw_volume<R: Rng + ?Sized>(config: &PricePathConfig, rng: &mut R) -> u32 {
    rng.gen_range(config.volume_min..=config.volume_max)
}
