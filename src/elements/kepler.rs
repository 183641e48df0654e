use std::f64::consts::{PI, TAU};

pub const KEPLER_MAX_ITERATIONS: usize = 10;
pub const KEPLER_TOLERANCE: f64 = 1e-8;

/// Solve Kepler's equation `M = E - e sin E` by Newton iteration.
///
/// Angles in radians; the result lies in [0, 2π). Starts from the first-order
/// estimate (π for e ≥ 0.8) and stops after [`KEPLER_MAX_ITERATIONS`] steps
/// even if [`KEPLER_TOLERANCE`] was not reached.
pub fn eccentric_anomaly(mean_anomaly: f64, e: f64) -> f64 {
    let m = mean_anomaly.rem_euclid(TAU);
    let mut ecc = if e < 0.8 {
        eccentric_anomaly_first_order(m, e)
    } else {
        PI
    };

    for _ in 0..KEPLER_MAX_ITERATIONS {
        let f = ecc - e * ecc.sin() - m;
        let step = f / (1.0 - e * ecc.cos());
        ecc -= step;
        if step.abs() < KEPLER_TOLERANCE {
            break;
        }
    }

    ecc.rem_euclid(TAU)
}

/// Single first-order correction `E ≈ M + e sin M`.
pub(crate) fn eccentric_anomaly_first_order(mean_anomaly: f64, e: f64) -> f64 {
    (mean_anomaly + e * mean_anomaly.sin()).rem_euclid(TAU)
}

/// True anomaly from eccentric anomaly via the half-angle tangent relation.
pub fn true_anomaly(ecc_anomaly: f64, e: f64) -> f64 {
    let half = ecc_anomaly / 2.0;
    let nu = 2.0 * ((1.0 + e).sqrt() * half.sin()).atan2((1.0 - e).sqrt() * half.cos());
    nu.rem_euclid(TAU)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(1.0, 0.0005)]
    #[case(0.3, 0.1)]
    #[case(2.5, 0.5)]
    #[case(5.9, 0.72)]
    #[case(0.2, 0.85)]
    #[case(3.1, 0.95)]
    fn newton_solution_satisfies_keplers_equation(#[case] m: f64, #[case] e: f64) {
        let ecc = eccentric_anomaly(m, e);
        let residual = (ecc - e * ecc.sin() - m).rem_euclid(TAU);
        let residual = residual.min(TAU - residual);
        assert!(residual < 1e-8, "M={m} e={e} residual={residual}");
    }

    #[test]
    fn converges_from_first_order_start_near_apsides() {
        for m in [0.0, 1e-9, PI - 1e-9, PI, TAU - 1e-9] {
            for e in [0.0, 0.3, 0.79] {
                let ecc = eccentric_anomaly(m, e);
                let residual = (ecc - e * ecc.sin() - m.rem_euclid(TAU)).rem_euclid(TAU);
                assert!(residual.min(TAU - residual) < 1e-8, "M={m} e={e}");
            }
        }
    }

    #[test]
    fn circular_orbit_anomalies_coincide() {
        for m in [0.0, 1.0, 3.0, 6.0] {
            assert!((eccentric_anomaly(m, 0.0) - m).abs() < 1e-12);
            assert!((true_anomaly(m, 0.0) - m).abs() < 1e-12);
        }
    }

    #[test]
    fn first_order_is_close_only_for_small_eccentricity() {
        let m = 1.0;
        let exact = eccentric_anomaly(m, 0.001);
        assert!((eccentric_anomaly_first_order(m, 0.001) - exact).abs() < 1e-5);

        let exact = eccentric_anomaly(m, 0.7);
        assert!((eccentric_anomaly_first_order(m, 0.7) - exact).abs() > 0.05);
    }

    #[test]
    fn true_anomaly_leads_eccentric_anomaly_before_apoapsis() {
        let e = 0.5;
        let ecc = 1.0;
        let nu = true_anomaly(ecc, e);
        assert!(nu > ecc && nu < PI);
        // cos ν = (cos E - e) / (1 - e cos E)
        let expected = (ecc.cos() - e) / (1.0 - e * ecc.cos());
        assert!((nu.cos() - expected).abs() < 1e-12);
    }
}
