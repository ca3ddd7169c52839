use crate::error::{BallisticsError, Result};
use crate::physics::gravity::G0;
use crate::units::celsius_to_kelvin;

// ---------------------------------------------------------------------------
// Gas constants
// ---------------------------------------------------------------------------

pub const MOLAR_MASS_DRY_AIR: f64 = 0.028_964_4; // kg/mol
pub const MOLAR_MASS_WATER_VAPOR: f64 = 0.018_016; // kg/mol
pub const UNIV_GAS_CONSTANT: f64 = 8.314_47; // J/(K·mol)
pub const GAS_CONSTANT_DRY_AIR: f64 = 287.058; // J/(kg·K)
const GAMMA: f64 = 1.4; // ratio of specific heats

// ---------------------------------------------------------------------------
// Standard troposphere (barometric formula)
// ---------------------------------------------------------------------------

const P0_KPA: f64 = 101.325; // sea-level pressure
const T0: f64 = 288.15; // sea-level temperature, K
const LAPSE: f64 = 0.0065; // K/m

/// Altitude at which the barometric base `1 - L·H/T0` reaches zero (~44 331 m).
pub const MAX_BAROMETRIC_ALTITUDE: f64 = T0 / LAPSE;

/// Absolute pressure (kPa) at `altitude_m` above sea level.
///
/// Negative altitudes are valid and give pressures above 101.325 kPa.
/// At or above [`MAX_BAROMETRIC_ALTITUDE`] the formula has no real value and
/// an `AltitudeOutOfRange` error is returned.
pub fn pressure_at_altitude(altitude_m: f64) -> Result<f64> {
    let base = 1.0 - LAPSE * altitude_m / T0;
    if !altitude_m.is_finite() || base <= 0.0 {
        return Err(BallisticsError::AltitudeOutOfRange { altitude_m });
    }
    let exponent = G0 * MOLAR_MASS_DRY_AIR / (UNIV_GAS_CONSTANT * LAPSE);
    Ok(P0_KPA * base.powf(exponent))
}

// ---------------------------------------------------------------------------
// Humid air
// ---------------------------------------------------------------------------

/// Saturation vapour pressure of water (Pa), Magnus form, `T` in °C.
pub fn saturation_vapor_pressure(temperature_c: f64) -> f64 {
    let hpa = 6.1078 * (17.27 * temperature_c / (temperature_c + 237.3)).exp();
    hpa * 100.0
}

/// Density of humid air (kg/m³).
///
/// `humidity` is relative humidity as a fraction (1.0 = saturated),
/// `temperature_c` in °C, `pressure_pa` the observed absolute pressure in Pa.
pub fn air_density(humidity: f64, temperature_c: f64, pressure_pa: f64) -> Result<f64> {
    if !(0.0..=1.0).contains(&humidity) {
        return Err(BallisticsError::DensityUndefined {
            reason: "relative humidity must be within [0, 1]",
        });
    }
    let p_v = humidity * saturation_vapor_pressure(temperature_c);
    humid_air_density(pressure_pa, p_v, temperature_c)
}

/// Density of a dry-air / water-vapour mixture (kg/m³) from the total
/// pressure and the vapour partial pressure, both in Pa.
pub fn humid_air_density(pressure_pa: f64, vapor_pressure_pa: f64, temperature_c: f64) -> Result<f64> {
    if !pressure_pa.is_finite() || pressure_pa <= 0.0 {
        return Err(BallisticsError::DensityUndefined {
            reason: "pressure must be positive and finite",
        });
    }
    let t_k = celsius_to_kelvin(temperature_c);
    if !t_k.is_finite() || t_k <= 0.0 {
        return Err(BallisticsError::DensityUndefined {
            reason: "temperature must be above absolute zero",
        });
    }
    if !(vapor_pressure_pa >= 0.0) {
        return Err(BallisticsError::DensityUndefined {
            reason: "vapour pressure must be non-negative",
        });
    }

    let p_d = pressure_pa - vapor_pressure_pa;
    if p_d < 0.0 {
        return Err(BallisticsError::DensityUndefined {
            reason: "vapour pressure exceeds total pressure",
        });
    }

    Ok((p_d * MOLAR_MASS_DRY_AIR + vapor_pressure_pa * MOLAR_MASS_WATER_VAPOR) / (UNIV_GAS_CONSTANT * t_k))
}

/// Speed of sound in dry air (m/s).
pub fn speed_of_sound(temperature_c: f64) -> f64 {
    (GAMMA * GAS_CONSTANT_DRY_AIR * celsius_to_kelvin(temperature_c)).sqrt()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
