//! Quantity/column mapping and per-panel series for the comparison figure.

use std::ops::Range;

use tracing::warn;

use crate::{error::VerifyError, table::Table};

pub mod figure;

pub use figure::render_comparison;

/// Radius column in the analytic reference table.
pub const ANALYTIC_RADIUS: usize = 1;
/// Radius column in the extracted profile.
pub const PROFILE_RADIUS: usize = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    Density,
    Velocity,
    Pressure,
    InternalEnergy,
}

impl Quantity {
    /// Subplot order, row-major over the 2x2 grid.
    pub const ALL: [Quantity; 4] = [
        Quantity::Density,
        Quantity::Velocity,
        Quantity::Pressure,
        Quantity::InternalEnergy,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Quantity::Density => "density",
            Quantity::Velocity => "velocity",
            Quantity::Pressure => "pressure",
            Quantity::InternalEnergy => "internal energy",
        }
    }

    pub fn analytic_column(self) -> usize {
        match self {
            Quantity::Density => 2,
            Quantity::Velocity => 5,
            Quantity::Pressure => 4,
            Quantity::InternalEnergy => 3,
        }
    }

    pub fn profile_column(self) -> usize {
        match self {
            Quantity::Density => 1,
            Quantity::Velocity => 2,
            Quantity::Pressure => 3,
            Quantity::InternalEnergy => 4,
        }
    }

    pub fn log_scale(self) -> bool {
        matches!(self, Quantity::InternalEnergy)
    }
}

/// Everything needed to draw one cell: both series clipped to the x window and a fitted y range.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub quantity: Quantity,
    pub analytic: Vec<(f64, f64)>,
    pub profile: Vec<(f64, f64)>,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
}

impl Panel {
    pub fn from_tables(
        quantity: Quantity,
        analytic: &Table,
        profile: &Table,
        x_range: Range<f64>,
    ) -> Result<Self, VerifyError> {
        let log = quantity.log_scale();
        let mut dropped = 0;
        let mut clip = |points: Vec<(f64, f64)>| -> Vec<(f64, f64)> {
            let mut kept = Vec::with_capacity(points.len());
            for (x, y) in points {
                if !(x >= x_range.start && x <= x_range.end) || !y.is_finite() {
                    continue;
                }
                if log && y <= 0.0 {
                    dropped += 1;
                    continue;
                }
                kept.push((x, y));
            }
            kept
        };

        let analytic_pts = clip(analytic.pairs(ANALYTIC_RADIUS, quantity.analytic_column())?);
        let profile_pts = clip(profile.pairs(PROFILE_RADIUS, quantity.profile_column())?);

        if dropped > 0 {
            warn!(quantity = quantity.label(), dropped, "non-positive values left off log axis");
        }

        let y_range = fit_range(analytic_pts.iter().chain(&profile_pts).map(|&(_, y)| y), log);

        Ok(Self {
            quantity,
            analytic: analytic_pts,
            profile: profile_pts,
            x_range,
            y_range,
        })
    }
}

/// One panel per quantity, in subplot order.
pub fn build_panels(
    analytic: &Table,
    profile: &Table,
    x_range: Range<f64>,
) -> Result<Vec<Panel>, VerifyError> {
    Quantity::ALL
        .iter()
        .map(|&q| Panel::from_tables(q, analytic, profile, x_range.clone()))
        .collect()
}

/// Data extent with a margin; degenerate or empty inputs get a usable window.
fn fit_range<I: Iterator<Item = f64>>(values: I, log: bool) -> Range<f64> {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });

    if log {
        if !lo.is_finite() || !hi.is_finite() {
            return 1.0..10.0;
        }
        if lo == hi {
            return lo / 2.0..hi * 2.0;
        }
        return lo * 0.8..hi * 1.25;
    }

    if !lo.is_finite() || !hi.is_finite() {
        return 0.0..1.0;
    }
    if lo == hi {
        let pad = if lo == 0.0 { 1.0 } else { lo.abs() * 0.1 };
        return lo - pad..hi + pad;
    }
    let pad = (hi - lo) * 0.05;
    lo - pad..hi + pad
}
