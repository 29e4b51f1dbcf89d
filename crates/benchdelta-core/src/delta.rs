/// Percentage change from `before` to `after`.
///
/// - both zero: `0.0`
/// - zero `before`, non-zero `after`: exactly `100.0`. This is a fixed
///   sentinel for "from nothing to something", not a computed ratio, and it
///   does not depend on the magnitude or sign of `after`.
/// - otherwise `(after - before) / before * 100.0`, unbounded in both
///   directions.
///
/// Total over finite inputs. A negative `before` is divided through as is;
/// the sign of the result is then not meaningful.
pub fn pct_delta(before: f64, after: f64) -> f64 {
    if before == 0.0 && after == 0.0 {
        return 0.0;
    }
    if before == 0.0 {
        return 100.0;
    }
    ((after - before) / before) * 100.0
}
