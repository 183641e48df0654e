//! Element-set fixtures shared by unit tests.

use crate::tle::{checksum, parse_tle, TleRecord, TLE_LINE_LEN};

pub const ISS_L1: &str = "1 25544U 98067A   23028.71505935  .00015130  00000+0  27247-3 0  9994";
pub const ISS_L2: &str = "2 25544  51.6422 260.8093 0005032 282.2911 174.0627 15.50001033380719";

/// Recompute the checksum column of a 69-character line.
pub fn fix_checksum(line: &str) -> String {
    let body = &line[..TLE_LINE_LEN - 1];
    format!("{}{}", body, checksum(line))
}

/// Builder over the ISS element set for tweaking individual fields.
#[derive(Debug, Clone)]
pub struct TleFixture {
    pub line1: String,
    pub line2: String,
}

impl Default for TleFixture {
    fn default() -> Self {
        Self {
            line1: ISS_L1.to_string(),
            line2: ISS_L2.to_string(),
        }
    }
}

impl TleFixture {
    pub fn catalog(mut self, id: u32) -> Self {
        self.line1 = splice(&self.line1, 2, &format!("{:05}", id));
        self.line2 = splice(&self.line2, 2, &format!("{:05}", id));
        self
    }

    /// Raw five-character catalog field, e.g. an Alpha-5 `A0001`.
    pub fn catalog_code(mut self, code: &str) -> Self {
        self.line1 = splice(&self.line1, 2, code);
        self.line2 = splice(&self.line2, 2, code);
        self
    }

    /// Epoch as `YYDDD.DDDDDDDD` (14 characters).
    pub fn epoch(mut self, epoch: &str) -> Self {
        self.line1 = splice(&self.line1, 18, &format!("{:<14}", epoch));
        self
    }

    pub fn inclination_deg(mut self, deg: f64) -> Self {
        self.line2 = splice(&self.line2, 8, &format!("{:8.4}", deg));
        self
    }

    /// Eccentricity as a plain fraction, e.g. `0.7`.
    pub fn eccentricity(mut self, e: f64) -> Self {
        let digits = format!("{:07}", (e * 1e7).round() as u64);
        self.line2 = splice(&self.line2, 26, &digits);
        self
    }

    pub fn mean_motion(mut self, revs_per_day: f64) -> Self {
        self.line2 = splice(&self.line2, 52, &format!("{:11.8}", revs_per_day));
        self
    }

    pub fn bstar_zero(mut self) -> Self {
        self.line1 = splice(&self.line1, 53, " 00000+0");
        self
    }

    pub fn lines(&self) -> (String, String) {
        (fix_checksum(&self.line1), fix_checksum(&self.line2))
    }

    pub fn record(&self) -> TleRecord {
        let (line1, line2) = self.lines();
        parse_tle(None, &line1, &line2).expect("fixture must parse")
    }
}

fn splice(line: &str, start: usize, field: &str) -> String {
    format!("{}{}{}", &line[..start], field, &line[start + field.len()..])
}

/// Near-circular geostationary elements.
pub fn geo() -> TleFixture {
    TleFixture::default()
        .catalog(28884)
        .inclination_deg(0.05)
        .eccentricity(0.0002)
        .mean_motion(1.00271)
        .bstar_zero()
}

/// Circular GNSS-like medium orbit.
pub fn meo() -> TleFixture {
    TleFixture::default()
        .catalog(40294)
        .inclination_deg(55.0)
        .eccentricity(0.001)
        .mean_motion(2.00563)
        .bstar_zero()
}

/// Highly elliptical super-synchronous orbit with a low perigee.
pub fn heo_low_perigee() -> TleFixture {
    TleFixture::default()
        .catalog(41001)
        .inclination_deg(63.4)
        .eccentricity(0.85)
        .mean_motion(0.9)
        .bstar_zero()
}

/// Elliptical super-synchronous orbit with perigee well above 2000 km.
pub fn heo_high_perigee() -> TleFixture {
    TleFixture::default()
        .catalog(41002)
        .inclination_deg(10.0)
        .eccentricity(0.3)
        .mean_motion(0.95)
        .bstar_zero()
}
