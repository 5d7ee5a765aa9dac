//! Independent curve strips across issuers.
//!
//! Each issuer's bootstrap is sequential, but issuers share nothing, so with
//! the `parallel` feature they are distributed over the Rayon thread pool.

use num_traits::Float;
use pricer_core::market_data::curves::DiscountCurve;
use pricer_models::instruments::credit::MarketQuote;

use super::error::BootstrapError;
use super::stripper::{CurveStripper, StrippedCurve};

/// Quote set for one reference entity.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IssuerQuotes<T: Float> {
    /// Issuer identifier.
    pub issuer: String,
    /// Quotes in ascending tenor order.
    pub quotes: Vec<MarketQuote<T>>,
}

impl<T: Float> IssuerQuotes<T> {
    /// Bundle an issuer with its quotes.
    pub fn new(issuer: impl Into<String>, quotes: Vec<MarketQuote<T>>) -> Self {
        Self {
            issuer: issuer.into(),
            quotes,
        }
    }
}

/// Strip every issuer's curve; results are returned in input order.
///
/// One issuer's failure does not affect the others.
#[cfg(feature = "parallel")]
pub fn strip_curves<T, D>(
    stripper: &CurveStripper<T>,
    requests: &[IssuerQuotes<T>],
    discount: &D,
) -> Vec<Result<StrippedCurve<T>, BootstrapError>>
where
    T: Float + Send + Sync,
    D: DiscountCurve<T> + Sync + ?Sized,
{
    use rayon::prelude::*;

    let results: Vec<_> = requests
        .par_iter()
        .map(|request| stripper.strip(&request.quotes, discount))
        .collect();
    log_batch(&results);
    results
}

/// Strip every issuer's curve; results are returned in input order.
///
/// One issuer's failure does not affect the others.
#[cfg(not(feature = "parallel"))]
pub fn strip_curves<T, D>(
    stripper: &CurveStripper<T>,
    requests: &[IssuerQuotes<T>],
    discount: &D,
) -> Vec<Result<StrippedCurve<T>, BootstrapError>>
where
    T: Float,
    D: DiscountCurve<T> + ?Sized,
{
    let results: Vec<_> = requests
        .iter()
        .map(|request| stripper.strip(&request.quotes, discount))
        .collect();
    log_batch(&results);
    results
}

fn log_batch<T: Float>(results: &[Result<StrippedCurve<T>, BootstrapError>]) {
    let failures = results.iter().filter(|result| result.is_err()).count();
    tracing::info!(issuers = results.len(), failures, "batch strip finished");
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_core::market_data::curves::FlatCurve;

    fn requests() -> Vec<IssuerQuotes<f64>> {
        vec![
            IssuerQuotes::new(
                "ALPHA",
                vec![MarketQuote::new(3.0, 0.008), MarketQuote::new(5.0, 0.010)],
            ),
            IssuerQuotes::new(
                "BETA",
                vec![MarketQuote::new(5.0, 0.010), MarketQuote::new(3.0, 0.008)],
            ),
            IssuerQuotes::new(
                "GAMMA",
                vec![MarketQuote::new(1.0, 0.020), MarketQuote::new(5.0, 0.030)],
            ),
        ]
    }

    #[test]
    fn test_results_in_input_order() {
        let stripper = CurveStripper::new(0.4, 4).unwrap();
        let discount = FlatCurve::new(0.04);
        let results = strip_curves(&stripper, &requests(), &discount);

        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].as_ref().unwrap_err().is_validation());
        assert!(results[2].is_ok());
    }

    #[test]
    fn test_matches_sequential_strip() {
        let stripper = CurveStripper::new(0.4, 4).unwrap();
        let discount = FlatCurve::new(0.04);
        let requests = requests();
        let results = strip_curves(&stripper, &requests, &discount);

        for (request, result) in requests.iter().zip(&results) {
            assert_eq!(result, &stripper.strip(&request.quotes, &discount));
        }
    }

    #[test]
    fn test_empty_batch() {
        let stripper = CurveStripper::<f64>::new(0.4, 4).unwrap();
        let results = strip_curves(&stripper, &[], &FlatCurve::new(0.04));
        assert!(results.is_empty());
    }
}
