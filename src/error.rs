use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types: every undefined physical case is a variant, never a NaN
// ---------------------------------------------------------------------------

/// Why a simulation stopped before the projectile reached the target plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnreachableReason {
    /// Downrange position stopped increasing for the configured stall window.
    Stalled,
    /// The tick budget ran out.
    TickBudgetExhausted,
    /// The simulated-time budget ran out.
    TimeBudgetExhausted,
    /// Position or velocity became non-finite.
    NonFinite,
}

impl std::fmt::Display for UnreachableReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            UnreachableReason::Stalled => "no downrange progress",
            UnreachableReason::TickBudgetExhausted => "tick budget exhausted",
            UnreachableReason::TimeBudgetExhausted => "time budget exhausted",
            UnreachableReason::NonFinite => "state became non-finite",
        };
        f.write_str(s)
    }
}

#[derive(Error, Debug)]
pub enum BallisticsError {
    /// A parameter was rejected before any computation started.
    #[error("invalid {field} = {value}: {reason}")]
    InvalidConfig {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("division by zero")]
    DivisionByZero,

    /// The barometric formula is only defined below ~44 331 m.
    #[error("altitude {altitude_m} m is outside the barometric model domain")]
    AltitudeOutOfRange { altitude_m: f64 },

    #[error("air density undefined: {reason}")]
    DensityUndefined { reason: &'static str },

    #[error(
        "no launch angle reaches {range_m} m at {altitude_delta_m} m elevation \
         with muzzle speed {muzzle_speed} m/s"
    )]
    NoElevationSolution {
        range_m: f64,
        altitude_delta_m: f64,
        muzzle_speed: f64,
    },

    #[error("target unreachable after {ticks} ticks ({time_s:.3} s, {downrange_m:.3} m downrange): {reason}")]
    Unreachable {
        reason: UnreachableReason,
        ticks: u64,
        time_s: f64,
        downrange_m: f64,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl BallisticsError {
    pub(crate) fn invalid(field: &'static str, value: f64, reason: &'static str) -> Self {
        BallisticsError::InvalidConfig { field, value, reason }
    }

    /// True for the non-termination outcomes of a simulation.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, BallisticsError::Unreachable { .. })
    }
}

pub type Result<T> = std::result::Result<T, BallisticsError>;
