// ---------------------------------------------------------------------------
// Unit conversions between shooter-facing units and the SI core
// ---------------------------------------------------------------------------

pub const MG_PER_GRAIN: f64 = 64.798_91;
pub const KG_PER_GRAM: f64 = 0.001;
pub const M_PER_INCH: f64 = 0.0254;
/// G1 ballistic coefficients are quoted in lb/in²; 1 lb/in² = 703.0696 kg/m².
pub const KG_PER_M2_PER_LB_PER_IN2: f64 = 703.069_6;
pub const ZERO_CELSIUS_K: f64 = 273.15;

pub fn grains_to_grams(grains: f64) -> f64 {
    grains * MG_PER_GRAIN / 1000.0
}

pub fn grains_to_kg(grains: f64) -> f64 {
    grains_to_grams(grains) * KG_PER_GRAM
}

pub fn celsius_to_kelvin(celsius: f64) -> f64 {
    celsius + ZERO_CELSIUS_K
}

pub fn mrad_to_rad(mrad: f64) -> f64 {
    mrad / 1000.0
}

pub fn rad_to_mrad(rad: f64) -> f64 {
    rad * 1000.0
}

pub fn inches_to_m(inches: f64) -> f64 {
    inches * M_PER_INCH
}

pub fn bc_to_si(bc_lb_per_in2: f64) -> f64 {
    bc_lb_per_in2 * KG_PER_M2_PER_LB_PER_IN2
}
