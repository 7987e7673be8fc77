use crate::data::PricePoint;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::cmp::Ordering;

const MIN_POINTS: usize = 10;
const COARSE_STEPS: usize = 100;
const REFINE_STEPS: usize = 50;
const REFINE_ROUNDS: usize = 3;
const MIN_STEP: f64 = 1e-6;

//log-regression baseline price = exp(a * ln(b + day) + c), with band layout for the chart
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RainbowModel {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub band_width: f64,
    pub num_bands: u32,
    pub i_decrease: f64,
}

impl RainbowModel {
    fn from_fit(fit: Fit) -> Self {
        RainbowModel {
            a: fit.a,
            b: fit.b,
            c: fit.c,
            band_width: 0.3,
            num_bands: 9,
            i_decrease: 1.5,
        }
    }

    //baseline price on the given 1-based day index
    pub fn baseline(&self, day: f64) -> f64 {
        (self.a * (self.b + day).ln() + self.c).exp()
    }
}

#[derive(Debug, Clone, Copy)]
struct Fit {
    a: f64,
    b: f64,
    c: f64,
    sse: f64,
}

//fits the model over the positive prices of a series
//returns None when fewer than ten usable points remain
pub fn fit_rainbow_model(series: &[PricePoint]) -> Option<RainbowModel> {
    let y: Vec<f64> = series
        .iter()
        .map(|p| p.price)
        .filter(|price| price.is_finite() && *price > 0.0)
        .map(f64::ln)
        .collect();

    let n = y.len();
    if n < MIN_POINTS {
        return None;
    }

    let b_min = 0.0;
    let b_max = (n as f64 * 2.0).min(10000.0).max(2000.0);

    let mut step = (b_max - b_min) / COARSE_STEPS as f64;
    let mut best = search(&y, b_min, step, COARSE_STEPS)?;

    for _ in 0..REFINE_ROUNDS {
        let span = step * 2.0;
        let left = (best.b - span).max(b_min);
        let right = (best.b + span).min(b_max);
        let round_step = (right - left) / REFINE_STEPS as f64;

        if let Some(candidate) = search(&y, left, round_step, REFINE_STEPS) {
            if candidate.sse < best.sse {
                best = candidate;
            }
        }
        step = round_step.max(MIN_STEP);
    }

    Some(RainbowModel::from_fit(best))
}

//evaluates steps + 1 evenly spaced shifts, earliest wins on ties
fn search(y: &[f64], start: f64, step: f64, steps: usize) -> Option<Fit> {
    (0..=steps)
        .into_par_iter()
        .map(|i| evaluate(y, start + i as f64 * step))
        .min_by(|l, r| l.sse.partial_cmp(&r.sse).unwrap_or(Ordering::Equal))
}

fn evaluate(y: &[f64], b: f64) -> Fit {
    let x: Vec<f64> = (1..=y.len()).map(|day| (b + day as f64).ln()).collect();
    let (a, c) = linear_fit(&x, y);

    let sse = x
        .iter()
        .zip(y)
        .map(|(xi, yi)| {
            let residual = yi - (a * xi + c);
            residual * residual
        })
        .sum();

    Fit { a, b, c, sse }
}

//least squares y = slope * x + intercept
fn linear_fit(x: &[f64], y: &[f64]) -> (f64, f64) {
    let x_mean = x.mean();
    let y_mean = y.mean();
    let variance = x.variance();

    let slope = if variance > 0.0 {
        x.covariance(y) / variance
    } else {
        0.0
    };

    (slope, y_mean - slope * x_mean)
}
