//! Fixed-order Gauss-Legendre quadrature on `[0, 1]`.

/// Positive abscissae of the 24-point Gauss-Legendre rule on `[-1, 1]`.
/// Each is paired with its negation.
const ABSCISSAE: [f64; 12] = [
    0.064_056_892_862_605_63,
    0.191_118_867_473_616_3,
    0.315_042_679_696_163_4,
    0.433_793_507_626_045_1,
    0.545_421_471_388_839_6,
    0.648_093_651_936_975_5,
    0.740_124_191_578_554_4,
    0.820_001_985_973_903,
    0.886_415_527_004_401_1,
    0.938_274_552_002_732_8,
    0.974_728_555_971_309_5,
    0.995_187_219_997_021_3,
];

/// Weights matching [`ABSCISSAE`].
const WEIGHTS: [f64; 12] = [
    0.127_938_195_346_752_24,
    0.125_837_456_346_828_39,
    0.121_670_472_927_803_35,
    0.115_505_668_053_725_61,
    0.107_444_270_115_965_62,
    0.097_618_652_104_113_9,
    0.086_190_161_531_953_22,
    0.073_346_481_411_080_27,
    0.059_298_584_915_436_66,
    0.044_277_438_817_419_676,
    0.028_531_388_628_933_813,
    0.012_341_229_799_987_334,
];

/// Integrates `f` over `[0, 1]`.
#[must_use]
pub fn integrate_unit<F: Fn(f64) -> f64>(f: F) -> f64 {
    let half = 0.5;
    ABSCISSAE
        .iter()
        .zip(WEIGHTS.iter())
        .map(|(x, w)| w * (f(half - half * x) + f(half + half * x)))
        .sum::<f64>()
        * half
}
