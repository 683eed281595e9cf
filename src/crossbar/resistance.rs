//! Conversion of network weights to crossbar resistances
//!
//! Positive and negative weights are placed in two separate crossbars. The largest weight
//! magnitude is mapped to the lowest resistance, and a zero weight to the highest one.
//! A zero entry in a resistance file means that no resistor is placed.

use rand::Rng;
use tracing::debug;

/// Linear mapping from weights to resistances
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResistanceMap {
    /// Resistance for the largest weight magnitude
    pub rmin: f64,
    /// Resistance for a zero weight
    pub rmax: f64,
}

impl Default for ResistanceMap {
    fn default() -> Self {
        ResistanceMap {
            rmin: 1e4,
            rmax: 1e6,
        }
    }
}

/// Largest weight magnitude, considering both signs
pub fn max_weight(weights: &[Vec<f64>]) -> f64 {
    let mut max_positive = 0.0f64;
    let mut min_negative = 0.0f64;
    for w in weights.iter().flatten() {
        max_positive = max_positive.max(*w);
        min_negative = min_negative.min(*w);
    }
    max_positive.max(-min_negative)
}

impl ResistanceMap {
    /// Signed resistance for a weight: positive for positive weights, negative otherwise
    pub fn resistance(&self, w: f64, max_weight: f64) -> f64 {
        let ratio = if max_weight == 0.0 {
            0.0
        } else {
            w.abs() / max_weight
        };
        let r = (self.rmin - self.rmax) * ratio + self.rmax;
        if w > 0.0 {
            r
        } else {
            -r
        }
    }

    /// Resistances of the positive and negative crossbars, with 0 where no resistor is placed
    pub fn split(&self, weights: &[Vec<f64>]) -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
        let max_w = max_weight(weights);
        debug!("Largest weight magnitude is {}", max_w);
        let mut positive = Vec::with_capacity(weights.len());
        let mut negative = Vec::with_capacity(weights.len());
        for row in weights {
            let r: Vec<f64> = row.iter().map(|w| self.resistance(*w, max_w)).collect();
            positive.push(r.iter().map(|x| if *x > 0.0 { *x } else { 0.0 }).collect());
            negative.push(r.iter().map(|x| if *x > 0.0 { 0.0 } else { -x }).collect());
        }
        (positive, negative)
    }
}

/// Sample from a standard normal distribution (Box-Muller transform)
fn standard_normal<R: Rng>(rng: &mut R) -> f64 {
    // 1 - u is in (0, 1], so that the logarithm is finite
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

/// Random perturbation of resistances, modeling manufacturing variability
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Variability {
    /// Standard deviation of the additive noise, in ohms
    pub sigma: f64,
}

impl Variability {
    /// Noise with a standard deviation relative to the resistance range
    pub fn relative(map: &ResistanceMap, ratio: f64) -> Self {
        Variability {
            sigma: ratio * (map.rmax - map.rmin),
        }
    }

    /// Add gaussian noise to every placed resistance; absent resistors stay absent
    pub fn apply<R: Rng>(&self, resistances: &[Vec<f64>], rng: &mut R) -> Vec<Vec<f64>> {
        resistances
            .iter()
            .map(|row| {
                row.iter()
                    .map(|r| {
                        if *r > 0.0 {
                            r + self.sigma * standard_normal(rng)
                        } else {
                            0.0
                        }
                    })
                    .collect()
            })
            .collect()
    }
}

impl Default for Variability {
    /// 3% of the default resistance range
    fn default() -> Self {
        Variability::relative(&ResistanceMap::default(), 0.03)
    }
}
