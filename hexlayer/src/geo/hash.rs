//! Deterministic coordinate hashing.
//!
//! Entity sampling needs a "random" decision that never changes between
//! render passes. Instead of a seeded generator we hash the textual form of
//! the coordinates, so the same point always produces the same value on
//! every platform and in every run.
//!
//! The arithmetic is fixed: changing any step changes which entities are
//! shown for given coordinates.

/// Multiplier of the rolling string hash.
const HASH_MULTIPLIER: i32 = 31;

/// Number of buckets the hash is reduced to before scaling into `[0, 1)`.
const UNIT_BUCKETS: i32 = 100;

/// Builds the `"{lat}:{lon}"` key that is fed to [`stable_hash`].
///
/// Numbers use the shortest representation that round-trips (`1.0` becomes
/// `"1"`, `103.959` stays `"103.959"`). Exponent notation is never used:
/// `5e-7` is written as `"0.0000005"`. Negative zero is normalised so that
/// `-0.0` and `0.0` hash identically.
pub fn coordinate_key(lat: f64, lon: f64) -> String {
    format!("{}:{}", normalize_zero(lat), normalize_zero(lon))
}

#[inline]
fn normalize_zero(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

/// Rolling hash over a string's UTF-16 code units.
///
/// `hash = hash * 31 + unit`, wrapping at 32 bits.
pub fn hash_str(input: &str) -> i32 {
    input.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_mul(HASH_MULTIPLIER)
            .wrapping_add(i32::from(unit))
    })
}

/// Deterministic 32-bit signed hash of a coordinate pair.
///
/// # Example
///
/// ```
/// use hexlayer::geo::stable_hash;
///
/// assert_eq!(stable_hash(1.0, 2.0), 48937);
/// ```
#[inline]
pub fn stable_hash(lat: f64, lon: f64) -> i32 {
    hash_str(&coordinate_key(lat, lon))
}

/// Maps a coordinate pair to a value in `[0, 1)` with two decimal places.
///
/// Computed as `|stable_hash(lat, lon) mod 100| / 100`, where `mod` keeps
/// the sign of the dividend. Not a random number generator: there is no
/// seed and no state.
#[inline]
pub fn pseudo_random_unit(lat: f64, lon: f64) -> f64 {
    let bucket = (stable_hash(lat, lon) % UNIT_BUCKETS).abs();
    f64::from(bucket) / f64::from(UNIT_BUCKETS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_key_integral_values() {
        assert_eq!(coordinate_key(1.0, 2.0), "1:2");
    }

    #[test]
    fn test_coordinate_key_fractional_values() {
        assert_eq!(coordinate_key(1.343, 103.959), "1.343:103.959");
        assert_eq!(coordinate_key(40.7128, -74.006), "40.7128:-74.006");
    }

    #[test]
    fn test_coordinate_key_small_magnitude_is_plain_decimal() {
        assert_eq!(coordinate_key(5e-7, 0.0), "0.0000005:0");
        assert_eq!(stable_hash(5e-7, 0.0), 1458557933);
        assert_eq!(pseudo_random_unit(5e-7, 0.0), 0.33);
    }

    #[test]
    fn test_coordinate_key_negative_zero() {
        assert_eq!(coordinate_key(-0.0, -0.0), coordinate_key(0.0, 0.0));
    }

    #[test]
    fn test_stable_hash_reference_values() {
        // Locked reference values, computed from the rolling hash by hand
        assert_eq!(stable_hash(1.0, 2.0), 48937);
        assert_eq!(stable_hash(0.0, 0.0), 47974);
        assert_eq!(stable_hash(1.343, 103.959), -654361122);
        assert_eq!(stable_hash(-33.8688, 151.2093), 741862708);
    }

    #[test]
    fn test_hash_str_wraps_instead_of_overflowing() {
        let long = "9".repeat(64);
        // Must not panic in debug builds
        let _ = hash_str(&long);
    }

    #[test]
    fn test_pseudo_random_unit_reference_values() {
        assert_eq!(pseudo_random_unit(1.0, 2.0), 0.37);
        assert_eq!(pseudo_random_unit(0.0, 0.0), 0.74);
        // Negative hash: remainder keeps sign, then abs
        assert_eq!(pseudo_random_unit(1.343, 103.959), 0.22);
        assert_eq!(pseudo_random_unit(-33.8688, 151.2093), 0.08);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_stable_hash_is_pure(
                lat in -90.0..90.0_f64,
                lon in -180.0..180.0_f64
            ) {
                prop_assert_eq!(stable_hash(lat, lon), stable_hash(lat, lon));
                prop_assert_eq!(pseudo_random_unit(lat, lon), pseudo_random_unit(lat, lon));
            }

            #[test]
            fn test_pseudo_random_unit_in_range(
                lat in -90.0..90.0_f64,
                lon in -180.0..180.0_f64
            ) {
                let unit = pseudo_random_unit(lat, lon);
                prop_assert!((0.0..1.0).contains(&unit), "unit {} out of range", unit);
            }
        }
    }
}
