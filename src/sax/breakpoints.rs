//! Normal-distribution breakpoints for SAX alphabets
//!
//! For an alphabet of size `a` the cuts split N(0, 1) into `a` equiprobable
//! regions. A value maps to the number of cuts at or below it.

/// Largest alphabet with a breakpoint table
pub const MAX_ALPHABET_SIZE: usize = 10;

const CUTS_1: &[f64] = &[];
const CUTS_2: &[f64] = &[0.0];
const CUTS_3: &[f64] = &[-0.430_727_299_295_457, 0.430_727_299_295_457];
const CUTS_4: &[f64] = &[-0.674_489_750_196_082, 0.0, 0.674_489_750_196_082];
const CUTS_5: &[f64] = &[
    -0.841_621_233_572_914,
    -0.253_347_103_135_8,
    0.253_347_103_135_8,
    0.841_621_233_572_914,
];
const CUTS_6: &[f64] = &[
    -0.967_421_566_101_701,
    -0.430_727_299_295_457,
    0.0,
    0.430_727_299_295_457,
    0.967_421_566_101_701,
];
const CUTS_7: &[f64] = &[
    -1.067_570_523_878_14,
    -0.565_948_821_932_863,
    -0.180_012_369_792_705,
    0.180_012_369_792_705,
    0.565_948_821_932_863,
    1.067_570_523_878_14,
];
const CUTS_8: &[f64] = &[
    -1.150_349_380_376_01,
    -0.674_489_750_196_082,
    -0.318_639_363_964_375,
    0.0,
    0.318_639_363_964_375,
    0.674_489_750_196_082,
    1.150_349_380_376_01,
];
const CUTS_9: &[f64] = &[
    -1.220_640_348_847_35,
    -0.764_709_673_786_387,
    -0.430_727_299_295_457,
    -0.139_710_298_881_862,
    0.139_710_298_881_862,
    0.430_727_299_295_457,
    0.764_709_673_786_387,
    1.220_640_348_847_35,
];
const CUTS_10: &[f64] = &[
    -1.281_551_565_544_6,
    -0.841_621_233_572_914,
    -0.524_400_512_708_041,
    -0.253_347_103_135_8,
    0.0,
    0.253_347_103_135_8,
    0.524_400_512_708_041,
    0.841_621_233_572_914,
    1.281_551_565_544_6,
];

/// Breakpoints for `alphabet_size` symbols, `None` outside `1..=MAX_ALPHABET_SIZE`
///
/// A one-letter alphabet has no cuts: everything maps to `a`.
pub fn cuts(alphabet_size: usize) -> Option<&'static [f64]> {
    match alphabet_size {
        1 => Some(CUTS_1),
        2 => Some(CUTS_2),
        3 => Some(CUTS_3),
        4 => Some(CUTS_4),
        5 => Some(CUTS_5),
        6 => Some(CUTS_6),
        7 => Some(CUTS_7),
        8 => Some(CUTS_8),
        9 => Some(CUTS_9),
        10 => Some(CUTS_10),
        _ => None,
    }
}

/// Alphabet position of `value` given sorted `cuts`
#[inline]
pub fn symbol_index(value: f64, cuts: &[f64]) -> usize {
    cuts.iter().take_while(|&&cut| cut <= value).count()
}
