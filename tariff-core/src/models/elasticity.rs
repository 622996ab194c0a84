/// A demand elasticity: percentage change in quantity per percentage change in price
///
/// Negative values are the economically ordinary case (price up, quantity
/// down); the more negative the value, the more elastic the segment. The
/// value must be finite and nonzero, since a zero elasticity would divide
/// by zero in the Ramsey price formula.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "f64", into = "f64")
)]
pub struct Elasticity(f64);

impl Elasticity {
    /// Creates a new elasticity with validation
    pub fn new(value: f64) -> Result<Self, ElasticityError> {
        Self::try_from(value)
    }

    /// Creates a new elasticity without validation
    ///
    /// # Safety
    /// The caller must guarantee the value is finite and nonzero.
    pub unsafe fn new_unchecked(value: f64) -> Self {
        Self(value)
    }

    /// The underlying elasticity value
    pub fn value(&self) -> f64 {
        self.0
    }

    /// The Ramsey price for this elasticity at markup factor `k`:
    /// `MC / (1 − k·ε)`
    ///
    /// Returns `None` when the denominator is not strictly positive, in
    /// which case the formula has no meaningful price (the markup factor
    /// has crossed the elasticity's pole at `k = 1/ε`).
    pub fn ramsey_price(&self, marginal_cost: f64, k: f64) -> Option<f64> {
        let denominator = 1.0 - k * self.0;
        if denominator > 0.0 {
            Some(marginal_cost / denominator)
        } else {
            None
        }
    }
}

impl Into<f64> for Elasticity {
    fn into(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Elasticity {
    type Error = ElasticityError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value.is_nan() {
            return Err(ElasticityError::NaN);
        }
        if value.is_infinite() {
            return Err(ElasticityError::Infinite);
        }
        if value == 0.0 {
            return Err(ElasticityError::Zero);
        }
        Ok(Self(value))
    }
}

/// The various ways in which an elasticity can be invalid
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ElasticityError {
    /// Error when the value is NaN
    #[error("NaN value encountered")]
    NaN,
    /// Error when the value is infinite
    #[error("Infinite value encountered")]
    Infinite,
    /// Error when the value is zero (divides by zero in the Ramsey formula)
    #[error("Elasticity must be nonzero")]
    Zero,
}
