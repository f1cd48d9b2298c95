/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-9,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

/// `x` is zero up to `eps`.
pub fn is_zero(x: Real, eps: Real) -> bool {
    x.abs() <= eps
}

/// Amount by which `|value|` exceeds `limit`, zero when within the limit.
pub fn overload(value: Real, limit: Real) -> Real {
    (value.abs() - limit).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn overload_is_one_sided() {
        assert_eq!(overload(5.0, 2.0), 3.0);
        assert_eq!(overload(-5.0, 2.0), 3.0);
        assert_eq!(overload(2.0, 2.0), 0.0);
        assert_eq!(overload(-1.0, 2.0), 0.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn overload_never_negative(v in -1e6_f64..1e6, limit in 0.0_f64..1e6) {
            let o = overload(v, limit);
            prop_assert!(o >= 0.0);
            prop_assert!(o <= v.abs());
        }
    }
}
