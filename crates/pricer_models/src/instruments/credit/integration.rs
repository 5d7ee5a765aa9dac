//! Protection-leg integration strategies.
//!
//! The protection leg of a CDS pays at the default time, so its value is the
//! discounted default density
//!
//! ```text
//! ∫₀ᵀ D(t) (-dS/dt) dt = ∫₀ᵀ λ(t) S(t) D(t) dt
//! ```
//!
//! per unit of loss. Integrators evaluate this over a grid on which the
//! hazard rate is constant on every interval (premium payment times merged
//! with the survival curve knots).
//!
//! | Method | Per-interval approximation |
//! |---|---|
//! | [`MidpointRule`] | `(S(tₖ₋₁) - S(tₖ)) · D((tₖ₋₁ + tₖ) / 2)` |
//! | [`GaussLegendreRule`] | `λₖ ∫ S(t) D(t) dt` with an n-point Gauss-Legendre rule |
//!
//! The midpoint rule is exact when discounting is flat across each interval;
//! the two methods typically differ in the third or fourth significant digit
//! of the protection leg for quarterly grids.

use num_traits::Float;
use pricer_core::market_data::curves::{CreditCurve, DiscountCurve};
use pricer_core::market_data::MarketDataError;
use pricer_core::math::quadrature::{GaussLegendre, QuadratureError};
use pricer_core::types::constant;

/// Default number of Gauss-Legendre points per grid interval.
pub const DEFAULT_QUADRATURE_POINTS: usize = 8;

/// Capability: integrate the discounted default density over a grid.
pub trait ProtectionIntegrator<T: Float> {
    /// `∫ D(t) dQ(t)` over `[grid[0], grid[last]]`, where `Q = 1 - S`.
    ///
    /// `grid` is strictly increasing and starts at 0; the hazard rate must be
    /// constant on each `(grid[k-1], grid[k]]`.
    fn integrate_protection_leg<C, D>(
        &self,
        grid: &[T],
        credit: &C,
        discount: &D,
    ) -> Result<T, MarketDataError>
    where
        C: CreditCurve<T> + ?Sized,
        D: DiscountCurve<T> + ?Sized;
}

/// Default-probability increments discounted at interval midpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MidpointRule;

impl<T: Float> ProtectionIntegrator<T> for MidpointRule {
    fn integrate_protection_leg<C, D>(
        &self,
        grid: &[T],
        credit: &C,
        discount: &D,
    ) -> Result<T, MarketDataError>
    where
        C: CreditCurve<T> + ?Sized,
        D: DiscountCurve<T> + ?Sized,
    {
        let two = constant::<T>(2.0);
        let mut total = T::zero();
        let mut s_prev = match grid.first() {
            Some(&t0) => credit.survival_probability(t0)?,
            None => return Ok(total),
        };
        for pair in grid.windows(2) {
            let s = credit.survival_probability(pair[1])?;
            let df = discount.discount_factor((pair[0] + pair[1]) / two)?;
            total = total + (s_prev - s) * df;
            s_prev = s;
        }
        Ok(total)
    }
}

/// Gauss-Legendre quadrature of `λ S(t) D(t)` on each grid interval.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussLegendreRule<T: Float> {
    rule: GaussLegendre<T>,
}

impl<T: Float> GaussLegendreRule<T> {
    /// Rule with `points` nodes per grid interval.
    pub fn new(points: usize) -> Result<Self, QuadratureError> {
        Ok(Self {
            rule: GaussLegendre::new(points)?,
        })
    }

    /// Nodes per grid interval.
    #[inline]
    pub fn points(&self) -> usize {
        self.rule.points()
    }
}

impl<T: Float> ProtectionIntegrator<T> for GaussLegendreRule<T> {
    fn integrate_protection_leg<C, D>(
        &self,
        grid: &[T],
        credit: &C,
        discount: &D,
    ) -> Result<T, MarketDataError>
    where
        C: CreditCurve<T> + ?Sized,
        D: DiscountCurve<T> + ?Sized,
    {
        let mut total = T::zero();
        for pair in grid.windows(2) {
            let hazard = credit.hazard_rate(pair[1])?;
            if hazard == T::zero() {
                continue;
            }
            let integral = self.rule.integrate(pair[0], pair[1], |t| {
                Ok::<T, MarketDataError>(
                    credit.survival_probability(t)? * discount.discount_factor(t)?,
                )
            })?;
            total = total + hazard * integral;
        }
        Ok(total)
    }
}

/// Configuration-level choice of protection-leg integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case", tag = "method"))]
pub enum IntegrationMethod {
    /// [`MidpointRule`].
    #[default]
    Midpoint,
    /// [`GaussLegendreRule`] with the given number of points per interval.
    GaussLegendre {
        /// Nodes per grid interval.
        points: usize,
    },
}

impl IntegrationMethod {
    /// Gauss-Legendre with [`DEFAULT_QUADRATURE_POINTS`].
    pub fn gauss_legendre() -> Self {
        Self::GaussLegendre {
            points: DEFAULT_QUADRATURE_POINTS,
        }
    }

    /// Short label for reports.
    pub fn label(&self) -> String {
        match self {
            Self::Midpoint => "midpoint".to_string(),
            Self::GaussLegendre { points } => format!("gauss-legendre({})", points),
        }
    }
}

impl std::fmt::Display for IntegrationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

/// Built integrator dispatching to the configured strategy.
#[derive(Debug, Clone, PartialEq)]
pub enum Integrator<T: Float> {
    /// Midpoint rule.
    Midpoint(MidpointRule),
    /// Gauss-Legendre rule.
    GaussLegendre(GaussLegendreRule<T>),
}

impl<T: Float> Integrator<T> {
    /// Build the integrator for `method`.
    pub fn from_method(method: IntegrationMethod) -> Result<Self, QuadratureError> {
        Ok(match method {
            IntegrationMethod::Midpoint => Self::Midpoint(MidpointRule),
            IntegrationMethod::GaussLegendre { points } => {
                Self::GaussLegendre(GaussLegendreRule::new(points)?)
            }
        })
    }

    /// The method this integrator implements.
    pub fn method(&self) -> IntegrationMethod {
        match self {
            Self::Midpoint(_) => IntegrationMethod::Midpoint,
            Self::GaussLegendre(rule) => IntegrationMethod::GaussLegendre {
                points: rule.points(),
            },
        }
    }
}

impl<T: Float> ProtectionIntegrator<T> for Integrator<T> {
    fn integrate_protection_leg<C, D>(
        &self,
        grid: &[T],
        credit: &C,
        discount: &D,
    ) -> Result<T, MarketDataError>
    where
        C: CreditCurve<T> + ?Sized,
        D: DiscountCurve<T> + ?Sized,
    {
        match self {
            Self::Midpoint(rule) => rule.integrate_protection_leg(grid, credit, discount),
            Self::GaussLegendre(rule) => rule.integrate_protection_leg(grid, credit, discount),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::market_data::curves::{FlatCurve, SurvivalCurve};

    fn grid(n: usize, tenor: f64) -> Vec<f64> {
        (0..=n).map(|i| tenor * i as f64 / n as f64).collect()
    }

    /// `λ/(r+λ) (1 - e^{-(r+λ)T})`.
    fn exact(hazard: f64, rate: f64, tenor: f64) -> f64 {
        let k = hazard + rate;
        hazard / k * (1.0 - (-k * tenor).exp())
    }

    // ========================================
    // Midpoint Rule Tests
    // ========================================

    #[test]
    fn test_midpoint_zero_rate_is_exact() {
        let credit = SurvivalCurve::flat(0.02, 5.0).unwrap();
        let discount = FlatCurve::new(0.0);
        let value = MidpointRule
            .integrate_protection_leg(&grid(4, 5.0), &credit, &discount)
            .unwrap();
        assert_relative_eq!(value, 1.0 - (-0.1_f64).exp(), epsilon = 1e-15);
    }

    #[test]
    fn test_midpoint_close_to_exact() {
        let credit = SurvivalCurve::flat(0.0167, 5.0).unwrap();
        let discount = FlatCurve::new(0.04);
        let value = MidpointRule
            .integrate_protection_leg(&grid(20, 5.0), &credit, &discount)
            .unwrap();
        assert_relative_eq!(value, exact(0.0167, 0.04, 5.0), max_relative = 1e-4);
    }

    #[test]
    fn test_empty_and_single_point_grid() {
        let credit = SurvivalCurve::flat(0.02, 5.0).unwrap();
        let discount = FlatCurve::new(0.04);
        assert_eq!(
            MidpointRule
                .integrate_protection_leg(&[], &credit, &discount)
                .unwrap(),
            0.0
        );
        assert_eq!(
            MidpointRule
                .integrate_protection_leg(&[0.0], &credit, &discount)
                .unwrap(),
            0.0
        );
    }

    // ========================================
    // Gauss-Legendre Rule Tests
    // ========================================

    #[test]
    fn test_gauss_legendre_matches_closed_form() {
        let credit = SurvivalCurve::flat(0.0167, 5.0).unwrap();
        let discount = FlatCurve::new(0.04);
        let rule = GaussLegendreRule::new(8).unwrap();
        let value = rule
            .integrate_protection_leg(&grid(20, 5.0), &credit, &discount)
            .unwrap();
        assert_relative_eq!(value, exact(0.0167, 0.04, 5.0), epsilon = 1e-14);
    }

    #[test]
    fn test_gauss_legendre_piecewise_hazard() {
        let credit = SurvivalCurve::from_pillars(&[3.0, 5.0], &[0.0133, 0.0208]).unwrap();
        let discount = FlatCurve::new(0.04);
        let rule = GaussLegendreRule::new(8).unwrap();
        let value = rule
            .integrate_protection_leg(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0], &credit, &discount)
            .unwrap();

        let s3 = (-0.0133_f64 * 3.0).exp();
        let d3 = (-0.04_f64 * 3.0).exp();
        let expected = exact(0.0133, 0.04, 3.0) + s3 * d3 * exact(0.0208, 0.04, 2.0);
        assert_relative_eq!(value, expected, epsilon = 1e-14);
    }

    #[test]
    fn test_zero_hazard_gives_zero() {
        let credit = SurvivalCurve::flat(0.0, 5.0).unwrap();
        let discount = FlatCurve::new(0.04);
        let rule = GaussLegendreRule::new(8).unwrap();
        assert_eq!(
            rule.integrate_protection_leg(&grid(5, 5.0), &credit, &discount)
                .unwrap(),
            0.0
        );
    }

    // ========================================
    // Dispatch Tests
    // ========================================

    #[test]
    fn test_integrator_from_method() {
        let midpoint = Integrator::<f64>::from_method(IntegrationMethod::Midpoint).unwrap();
        assert_eq!(midpoint.method(), IntegrationMethod::Midpoint);

        let gl = Integrator::<f64>::from_method(IntegrationMethod::gauss_legendre()).unwrap();
        assert_eq!(gl.method(), IntegrationMethod::GaussLegendre { points: 8 });

        assert!(Integrator::<f64>::from_method(IntegrationMethod::GaussLegendre { points: 0 })
            .is_err());
    }

    #[test]
    fn test_method_labels() {
        assert_eq!(IntegrationMethod::Midpoint.to_string(), "midpoint");
        assert_eq!(
            IntegrationMethod::gauss_legendre().to_string(),
            "gauss-legendre(8)"
        );
    }
}
