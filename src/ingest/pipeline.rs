use std::thread;

use chrono::{DateTime, Utc};

use super::error::RecordError;
use super::metadata::{RawSatellite, SatelliteMetadata};
use super::report::CatalogEntry;
use crate::classify::{age_days, classify_activity, classify_orbit_type, IngestMode};
use crate::elements::derive_elements;
use crate::frame::{teme_to_geodetic, EarthOrientation};
use crate::propagate::propagate_at_epoch;
use crate::tle::parse_tle;

/// Inputs shared by every record of a batch.
pub(crate) struct EvalContext<'a> {
    pub mode: IngestMode,
    pub now: DateTime<Utc>,
    pub orientation: &'a dyn EarthOrientation,
}

/// Parse, propagate, transform, derive and classify one record.
pub(crate) fn evaluate(raw: &RawSatellite, ctx: &EvalContext) -> Result<CatalogEntry, RecordError> {
    let lines = raw.tle_lines()?;
    let record = parse_tle(lines.name.as_deref(), &lines.line1, &lines.line2)?;
    let state = propagate_at_epoch(&record)?;
    let geodetic = teme_to_geodetic(&state, ctx.orientation)?;
    let elements = derive_elements(&record, &state, geodetic)?;

    let orbit_type = classify_orbit_type(elements.perigee_alt_km, elements.apogee_alt_km);
    let age = age_days(ctx.now, record.epoch);
    let activity = classify_activity(orbit_type, age, elements.perigee_alt_km, ctx.mode);

    Ok(CatalogEntry {
        record,
        elements,
        orbit_type,
        activity,
        age_days: age,
        metadata: SatelliteMetadata::from(raw),
    })
}

/// Evaluate every record on at most `workers` threads. Results keep input order.
pub(crate) fn evaluate_all(
    inputs: &[RawSatellite],
    workers: usize,
    ctx: &EvalContext,
) -> Vec<Result<CatalogEntry, RecordError>> {
    let workers = workers.clamp(1, inputs.len().max(1));
    if workers == 1 {
        return inputs.iter().map(|raw| evaluate(raw, ctx)).collect();
    }

    let chunk_size = inputs.len().div_ceil(workers);
    thread::scope(|scope| {
        let handles: Vec<_> = inputs
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || chunk.iter().map(|raw| evaluate(raw, ctx)).collect::<Vec<_>>())
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|handle| match handle.join() {
                Ok(results) => results,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    })
}
