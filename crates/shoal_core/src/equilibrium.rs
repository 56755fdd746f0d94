use crate::stability::StabilityCoefficients;
use crate::traits::RateLaw;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stability {
    /// Nearby trajectories converge (negative slope).
    Stable,
    /// Nearby trajectories diverge (positive slope).
    Unstable,
    /// Double root; the linearization is inconclusive.
    Degenerate,
}

impl Stability {
    fn from_slope(slope: f64) -> Self {
        if slope < 0.0 {
            Self::Stable
        } else if slope > 0.0 {
            Self::Unstable
        } else {
            Self::Degenerate
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Stable => "stable",
            Self::Unstable => "unstable",
            Self::Degenerate => "degenerate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Equilibrium {
    pub population: f64,
    /// `d(dp/dt)/dp` at the equilibrium, the 1x1 Jacobian of the flow.
    pub slope: f64,
    pub stability: Stability,
}

impl Equilibrium {
    fn classify(coefficients: &StabilityCoefficients, population: f64) -> Self {
        let slope = coefficients.slope(population);
        Self {
            population,
            slope,
            stability: Stability::from_slope(slope),
        }
    }
}

/// Real roots of `r p - c p^2 - d = 0`, ascending, each classified by the sign of
/// the rate law's slope.
pub fn find_equilibria(coefficients: &StabilityCoefficients) -> Vec<Equilibrium> {
    let a = -coefficients.crowding;
    let b = coefficients.growth;
    let c = -coefficients.removal;

    if a == 0.0 {
        if b == 0.0 {
            return Vec::new();
        }
        return vec![Equilibrium::classify(coefficients, -c / b)];
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return Vec::new();
    }
    if discriminant == 0.0 {
        let population = -b / (2.0 * a);
        return vec![Equilibrium {
            population,
            slope: 0.0,
            stability: Stability::Degenerate,
        }];
    }

    // q and b share a sign, so neither root loses digits to cancellation.
    let q = -0.5 * (b + b.signum() * discriminant.sqrt());
    let mut roots = [q / a, c / q];
    roots.sort_by(|lhs, rhs| lhs.total_cmp(rhs));
    roots
        .into_iter()
        .map(|population| Equilibrium::classify(coefficients, population))
        .collect()
}
