//! Response curves: the `[0, 1] → ℝ` shaping function of a consideration.
//!
//! A consideration normalizes its raw input into `[0, 1]` and feeds the result
//! through a `ResponseCurve`.  The input is always clamped before evaluation;
//! the output is whatever the curve yields.  Every built-in shape stays inside
//! `[0, 1]` for in-range inputs, `Constant` and `Custom` are the caller's
//! responsibility.
//!
//! # Text form
//!
//! Curves embedded in CSV templates use a compact `kind[:arg[:arg]]` syntax:
//!
//! | Text               | Curve                                          |
//! |--------------------|------------------------------------------------|
//! | `linear`           | `Linear`                                       |
//! | `inverse`          | `InverseLinear`                                |
//! | `poly:2`           | `Polynomial { exponent: 2.0 }`                 |
//! | `logistic:10:0.5`  | `Logistic { steepness: 10.0, midpoint: 0.5 }`  |
//! | `step:0.5`         | `Step { threshold: 0.5 }`                      |
//! | `const:0.3`        | `Constant { value: 0.3 }`                      |
//! | `keys:0=0;1=1`     | `Keyframes { points: [(0, 0), (1, 1)] }`       |

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::{UaError, UaResult};

// ── CustomCurve ───────────────────────────────────────────────────────────────

/// A user-supplied curve function.  Compared by pointer identity.
#[derive(Clone)]
pub struct CustomCurve(Arc<dyn Fn(f32) -> f32 + Send + Sync>);

impl CustomCurve {
    #[inline]
    pub fn eval(&self, x: f32) -> f32 {
        (self.0)(x)
    }
}

impl fmt::Debug for CustomCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomCurve(..)")
    }
}

impl PartialEq for CustomCurve {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

// ── ResponseCurve ─────────────────────────────────────────────────────────────

/// The shaping function applied to a normalized consideration input.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum ResponseCurve {
    /// `y = x`
    #[default]
    Linear,
    /// `y = 1 - x`
    InverseLinear,
    /// `y = x^exponent`
    Polynomial { exponent: f32 },
    /// `y = 1 / (1 + e^(-steepness · (x - midpoint)))`
    Logistic { steepness: f32, midpoint: f32 },
    /// `y = 1` when `x >= threshold`, else `0`.
    Step { threshold: f32 },
    /// `y = v` regardless of input.
    Constant { value: f32 },
    /// Piecewise-linear through `(x, y)` points sorted by `x`; flat outside
    /// the first/last point.
    Keyframes { points: Vec<(f32, f32)> },
    /// Arbitrary function.  Not serializable.
    #[cfg_attr(feature = "serde", serde(skip))]
    Custom(CustomCurve),
}

impl ResponseCurve {
    /// Build a keyframe curve, sorting the points by `x`.
    ///
    /// Fails on an empty point list or non-finite coordinates.
    pub fn keyframes(mut points: Vec<(f32, f32)>) -> UaResult<Self> {
        if points.is_empty() {
            return Err(UaError::Config("keyframe curve needs at least one point".into()));
        }
        if points.iter().any(|(x, y)| !x.is_finite() || !y.is_finite()) {
            return Err(UaError::Config("keyframe curve points must be finite".into()));
        }
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        Ok(ResponseCurve::Keyframes { points })
    }

    /// Wrap an arbitrary function.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(f32) -> f32 + Send + Sync + 'static,
    {
        ResponseCurve::Custom(CustomCurve(Arc::new(f)))
    }

    /// Evaluate the curve at `x` (expected in `[0, 1]`).
    pub fn evaluate(&self, x: f32) -> f32 {
        match self {
            ResponseCurve::Linear => x,
            ResponseCurve::InverseLinear => 1.0 - x,
            ResponseCurve::Polynomial { exponent } => x.powf(*exponent),
            ResponseCurve::Logistic { steepness, midpoint } => {
                1.0 / (1.0 + (-steepness * (x - midpoint)).exp())
            }
            ResponseCurve::Step { threshold } => {
                if x >= *threshold { 1.0 } else { 0.0 }
            }
            ResponseCurve::Constant { value } => *value,
            ResponseCurve::Keyframes { points } => eval_keyframes(points, x),
            ResponseCurve::Custom(f) => f.eval(x),
        }
    }
}

fn eval_keyframes(points: &[(f32, f32)], x: f32) -> f32 {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return 0.0;
    };
    if x <= first.0 {
        return first.1;
    }
    if x >= last.0 {
        return last.1;
    }
    // First segment whose right end is at or past x.
    let right = points.partition_point(|p| p.0 < x);
    let (x1, y1) = points[right];
    let (x0, y0) = points[right - 1];
    let span = x1 - x0;
    if span <= f32::EPSILON {
        return y1;
    }
    y0 + (y1 - y0) * (x - x0) / span
}

// ── Text form ─────────────────────────────────────────────────────────────────

impl FromStr for ResponseCurve {
    type Err = UaError;

    fn from_str(s: &str) -> UaResult<Self> {
        let s = s.trim();
        let mut parts = s.split(':');
        let kind = parts.next().unwrap_or_default().to_ascii_lowercase();
        let args: Vec<&str> = parts.collect();

        let num = |i: usize| -> UaResult<f32> {
            args.get(i)
                .ok_or_else(|| UaError::Parse(format!("curve {s:?}: missing argument {}", i + 1)))?
                .trim()
                .parse::<f32>()
                .map_err(|e| UaError::Parse(format!("curve {s:?}: {e}")))
        };

        match kind.as_str() {
            "" | "linear" => Ok(ResponseCurve::Linear),
            "inverse" => Ok(ResponseCurve::InverseLinear),
            "poly" => Ok(ResponseCurve::Polynomial { exponent: num(0)? }),
            "logistic" => Ok(ResponseCurve::Logistic {
                steepness: num(0)?,
                midpoint:  num(1)?,
            }),
            "step" => Ok(ResponseCurve::Step { threshold: num(0)? }),
            "const" => Ok(ResponseCurve::Constant { value: num(0)? }),
            "keys" => {
                let body = args.first().copied().unwrap_or_default();
                let points = body
                    .split(';')
                    .filter(|p| !p.trim().is_empty())
                    .map(|p| parse_point(s, p))
                    .collect::<UaResult<Vec<_>>>()?;
                ResponseCurve::keyframes(points)
            }
            other => Err(UaError::Parse(format!(
                "unknown curve kind {other:?}: expected linear, inverse, poly, logistic, step, const, or keys"
            ))),
        }
    }
}

fn parse_point(curve: &str, p: &str) -> UaResult<(f32, f32)> {
    let (x, y) = p
        .split_once('=')
        .ok_or_else(|| UaError::Parse(format!("curve {curve:?}: keyframe {p:?} is not x=y")))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f32>()
            .map_err(|e| UaError::Parse(format!("curve {curve:?}: {e}")))
    };
    Ok((parse(x)?, parse(y)?))
}
