use std::f64::consts::PI;

#[inline(always)]
pub fn pi(v: f64) -> f64 {
    PI * v
}

/// Fractional part wrapped onto `[0, 1)`, i.e. a coordinate on the unit torus.
pub fn frac(v: f64) -> f64 {
    let f = v - v.floor();
    // `v - floor(v)` can round up to exactly 1.0 for tiny negative inputs.
    if f >= 1.0 {
        0.0
    } else {
        f
    }
}

/// Rotates `p` by `theta` radians about `center`.
pub fn rotate((x, y): (f64, f64), theta: f64, (cx, cy): (f64, f64)) -> (f64, f64) {
    let (sin, cos) = theta.sin_cos();
    let (dx, dy) = (x - cx, y - cy);
    (cx + dx * cos - dy * sin, cy + dx * sin + dy * cos)
}

pub fn dist((x1, y1): (f64, f64), (x2, y2): (f64, f64)) -> f64 {
    f64::hypot(x2 - x1, y2 - y1)
}

/// Squared distance between two points of the unit torus.
pub fn torus_dist_sq((x1, y1): (f64, f64), (x2, y2): (f64, f64)) -> f64 {
    let wrap = |d: f64| {
        let d = d.abs();
        d.min(1.0 - d)
    };
    let dx = wrap(x1 - x2);
    let dy = wrap(y1 - y2);
    dx * dx + dy * dy
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn assert_close(actual: (f64, f64), expected: (f64, f64)) {
        if (actual.0 - expected.0).abs() > EPSILON || (actual.1 - expected.1).abs() > EPSILON {
            panic!("got {:?}, want {:?}", actual, expected);
        }
    }

    #[test]
    fn test_pi() {
        assert_eq!(pi(0.0), 0.0);
        assert_eq!(pi(1.0), PI);
        assert_eq!(pi(-3.7), -3.7 * PI);
    }

    #[test]
    fn test_frac() {
        assert_eq!(frac(0.0), 0.0);
        assert_eq!(frac(0.25), 0.25);
        assert_eq!(frac(1.25), 0.25);
        assert_eq!(frac(1.0), 0.0);
        assert_eq!(frac(-0.25), 0.75);
        assert!(frac(-1e-20) < 1.0);
    }

    #[test]
    fn test_rotate_quarter_turns() {
        let center = (10.0, 20.0);
        assert_close(rotate((11.0, 20.0), pi(0.5), center), (10.0, 21.0));
        assert_close(rotate((11.0, 20.0), pi(1.0), center), (9.0, 20.0));
        assert_close(rotate((11.0, 20.0), pi(2.0), center), (11.0, 20.0));
        assert_close(rotate(center, 1.234, center), center);
    }

    #[test]
    fn test_rotate_preserves_distance() {
        const TEST_CASES: &[((f64, f64), f64, (f64, f64))] = &[
            ((3.0, 4.0), 0.3, (0.0, 0.0)),
            ((-7.5, 2.25), 2.0, (1.0, -1.0)),
            ((100.0, 250.0), -31.4, (95.0, 240.0)),
            ((0.0, 0.0), 1e6, (12.0, 5.0)),
        ];
        for &(p, theta, c) in TEST_CASES {
            let before = dist(p, c);
            let after = dist(rotate(p, theta, c), c);
            if (before - after).abs() > EPSILON * before.max(1.0) {
                panic!("rotate({:?}, {}, {:?}): |p-c| {} became {}", p, theta, c, before, after);
            }
        }
    }

    #[test]
    fn test_torus_dist_sq() {
        assert!((torus_dist_sq((0.1, 0.5), (0.9, 0.5)) - 0.04).abs() < EPSILON);
        assert_eq!(torus_dist_sq((0.25, 0.0), (0.75, 0.0)), 0.25);
        assert_eq!(torus_dist_sq((0.5, 0.5), (0.5, 0.5)), 0.0);
        assert!(torus_dist_sq((0.0, 0.0), (0.5, 0.5)) <= 0.5);
    }
}
