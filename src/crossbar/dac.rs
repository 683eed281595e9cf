//! Digital to analog conversion of input vectors

use tracing::debug;

use crate::{Error, Result};

/// Quantization of values in [0, 1] on a number of bits, mapped to a voltage range
///
/// A value `x` is quantized to `q = floor(x * (2^bits - 1))`, then mapped back to
/// `q / (2^bits - 1) * (upper - lower) + lower`.
///
/// ```
/// # use crossnet::crossbar::Dac;
/// let dac = Dac::default();
/// assert_eq!(dac.convert(0.0), -3.0);
/// assert_eq!(dac.convert(1.0), 3.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dac {
    /// Resolution of the converter
    pub bits: u32,
    /// Voltage for the lowest code
    pub lower: f64,
    /// Voltage for the highest code
    pub upper: f64,
}

impl Default for Dac {
    /// 10 bits, staying within the ±3V read region
    fn default() -> Self {
        Dac {
            bits: 10,
            lower: -3.0,
            upper: 3.0,
        }
    }
}

impl Dac {
    /// Largest supported resolution
    pub const MAX_BITS: u32 = 63;

    /// Create a converter, checking its resolution
    pub fn new(bits: u32, lower: f64, upper: f64) -> Result<Dac> {
        let dac = Dac { bits, lower, upper };
        dac.check()?;
        Ok(dac)
    }

    /// Check that the resolution is between 1 and [`Dac::MAX_BITS`]
    pub fn check(&self) -> Result<()> {
        if self.bits == 0 || self.bits > Self::MAX_BITS {
            return Err(Error::Resolution(self.bits));
        }
        Ok(())
    }

    /// Largest code
    fn max_code(&self) -> f64 {
        ((1u64 << self.bits) - 1) as f64
    }

    /// Digital code of a value
    pub fn quantize(&self, x: f64) -> i64 {
        (x * self.max_code()).floor() as i64
    }

    /// Voltage of a digital code
    pub fn voltage(&self, code: i64) -> f64 {
        (code as f64 / self.max_code()) * (self.upper - self.lower) + self.lower
    }

    /// Voltage applied for a value
    pub fn convert(&self, x: f64) -> f64 {
        self.voltage(self.quantize(x))
    }

    /// Voltages applied for a whole input vector
    pub fn convert_row(&self, row: &[f64]) -> Vec<f64> {
        row.iter().map(|x| self.convert(*x)).collect()
    }
}

/// Selection of the input vectors worth simulating
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputSelection {
    /// Maximum number of vectors to keep
    pub count: usize,
    /// Vectors must have strictly more non-zero values than this
    pub min_nonzero: usize,
}

impl Default for InputSelection {
    fn default() -> Self {
        InputSelection {
            count: 20,
            min_nonzero: 100,
        }
    }
}

impl InputSelection {
    /// Keep the first vectors with enough non-zero values
    pub fn select<'a>(&self, rows: &'a [Vec<f64>]) -> Vec<&'a [f64]> {
        let selected: Vec<&[f64]> = rows
            .iter()
            .filter(|r| r.iter().filter(|x| **x != 0.0).count() > self.min_nonzero)
            .take(self.count)
            .map(|r| r.as_slice())
            .collect();
        debug!(
            "Selected {} input vectors out of {}",
            selected.len(),
            rows.len()
        );
        selected
    }
}

#[cfg(test)]
mod tests {
    use super::{Dac, InputSelection};
    use crate::Error;

    #[test]
    fn test_quantize() {
        let dac = Dac::default();
        assert_eq!(dac.quantize(0.0), 0);
        assert_eq!(dac.quantize(1.0), 1023);
        assert_eq!(dac.quantize(0.5), 511);
        assert_eq!(dac.voltage(0), -3.0);
        assert_eq!(dac.voltage(1023), 3.0);
    }

    #[test]
    fn test_convert() {
        let dac = Dac {
            bits: 2,
            lower: 0.0,
            upper: 3.0,
        };
        // 0.5 * 3 = 1.5 is floored to code 1
        assert_eq!(dac.convert(0.5), 1.0);
        assert_eq!(dac.convert_row(&[0.0, 0.34, 1.0]), vec![0.0, 1.0, 3.0]);
    }

    #[test]
    fn test_resolution() {
        assert!(matches!(Dac::new(0, -3.0, 3.0), Err(Error::Resolution(0))));
        assert!(matches!(Dac::new(64, -3.0, 3.0), Err(Error::Resolution(64))));
        let dac = Dac::new(1, 0.0, 1.0).unwrap();
        assert_eq!(dac.convert(1.0), 1.0);
        let dac = Dac::new(63, -3.0, 3.0).unwrap();
        assert_eq!(dac.convert(0.0), -3.0);
        assert_eq!(dac.convert(1.0), 3.0);
        assert!(Dac::default().check().is_ok());
    }

    #[test]
    fn test_select() {
        let rows = vec![
            vec![0.0, 0.0, 1.0],
            vec![1.0, 1.0, 0.0],
            vec![0.0, 0.0, 0.0],
            vec![1.0, 1.0, 1.0],
            vec![0.5, 0.0, 0.5],
        ];
        let sel = InputSelection {
            count: 2,
            min_nonzero: 1,
        };
        let kept = sel.select(&rows);
        assert_eq!(kept, vec![&rows[1][..], &rows[3][..]]);

        let sel = InputSelection {
            count: 10,
            min_nonzero: 0,
        };
        assert_eq!(sel.select(&rows).len(), 4);
    }
}
