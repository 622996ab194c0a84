/// A linear demand curve `q(p) = intercept − slope·p`
///
/// Each consumer segment's willingness to buy is summarized by two positive
/// coefficients: the quantity demanded at a price of zero (the intercept)
/// and the reduction in quantity per unit of price (the slope). The curve
/// is meaningful on prices in `[0, choke_price]`, where the quantity
/// demanded stays non-negative.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawLinearDemand", into = "RawLinearDemand")
)]
pub struct LinearDemand {
    intercept: f64,
    slope: f64,
}

impl LinearDemand {
    /// Creates a new linear demand curve with validation
    ///
    /// Both coefficients must be finite and strictly positive.
    pub fn new(intercept: f64, slope: f64) -> Result<Self, DemandError> {
        Self::try_from(RawLinearDemand { intercept, slope })
    }

    /// Creates a new curve without validating the coefficients
    ///
    /// # Safety
    /// This function bypasses validation of the coefficients. It should only
    /// be used when the caller can guarantee both are finite and positive.
    pub unsafe fn new_unchecked(intercept: f64, slope: f64) -> Self {
        Self { intercept, slope }
    }

    /// The quantity demanded at a price of zero
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// The reduction in quantity demanded per unit of price
    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// The quantity demanded at the given price: `intercept − slope·price`
    ///
    /// Not clamped: prices beyond the choke price yield negative values,
    /// which callers are expected to treat as out of domain.
    pub fn quantity(&self, price: f64) -> f64 {
        self.intercept - self.slope * price
    }

    /// The price at which quantity demanded reaches zero
    pub fn choke_price(&self) -> f64 {
        self.intercept / self.slope
    }

    /// Revenue raised from this segment at the given price: `price · q(price)`
    pub fn revenue(&self, price: f64) -> f64 {
        price * self.quantity(price)
    }

    /// Whether the given price lies within the curve's support `[0, choke_price]`
    ///
    /// This is the precondition for [`consumer_surplus`](Self::consumer_surplus)
    /// to produce an economically meaningful value.
    pub fn supports(&self, price: f64) -> bool {
        price >= 0.0 && price <= self.choke_price()
    }

    /// Consumer surplus at the given price
    ///
    /// The area of the triangle bounded by the demand curve above the price
    /// line: `0.5 · (intercept − slope·price) · (choke_price − price)`.
    ///
    /// The caller must ensure `0 ≤ price ≤ choke_price`; outside that range
    /// the triangle formula returns a positive but meaningless number.
    pub fn consumer_surplus(&self, price: f64) -> f64 {
        let base = self.quantity(price);
        let height = self.choke_price() - price;
        0.5 * base * height
    }
}

/// A DTO to ensure that we always validate when we deserialize from an untrusted source
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug)]
pub struct RawLinearDemand {
    /// The quantity demanded at a price of zero (finite, positive)
    pub intercept: f64,
    /// The reduction in quantity per unit of price (finite, positive)
    pub slope: f64,
}

impl Into<RawLinearDemand> for LinearDemand {
    fn into(self) -> RawLinearDemand {
        RawLinearDemand {
            intercept: self.intercept,
            slope: self.slope,
        }
    }
}

impl TryFrom<RawLinearDemand> for LinearDemand {
    type Error = DemandError;

    fn try_from(value: RawLinearDemand) -> Result<Self, Self::Error> {
        let RawLinearDemand { intercept, slope } = value;

        if intercept.is_nan() || slope.is_nan() {
            return Err(DemandError::NaN);
        }
        if intercept.is_infinite() || slope.is_infinite() {
            return Err(DemandError::Infinite);
        }
        if intercept <= 0.0 || slope <= 0.0 {
            return Err(DemandError::NonPositive);
        }

        Ok(Self { intercept, slope })
    }
}

/// The various ways in which a demand curve can be invalid
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum DemandError {
    /// Error when a coefficient is NaN
    #[error("NaN value encountered")]
    NaN,
    /// Error when a coefficient is infinite
    #[error("Infinite value encountered")]
    Infinite,
    /// Error when a coefficient is zero or negative
    #[error("Demand coefficients must be strictly positive")]
    NonPositive,
}
