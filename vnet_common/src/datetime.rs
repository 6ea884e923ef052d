/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

use std::time::Duration;
use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};

// simple Duration ctors that don't require nightly features
#[inline] pub fn secs (n: u64)->Duration { Duration::from_secs(n) }
#[inline] pub fn minutes (n: u64)->Duration { Duration::from_secs(n * 60) }

/// this should be used wherever we might have to use sim clock instead of wall clock
#[inline]
pub fn utc_now()->DateTime<Utc> {
    Utc::now()
}

/// the Unix epoch, used as "never" for timestamps we compare against
pub const ZERO: DateTime<Utc> = DateTime::<Utc>::UNIX_EPOCH;

/// saturating difference between two points in time (zero if `dt_later` is actually earlier)
pub fn duration_since (dt_later: &DateTime<Utc>, dt_earlier: &DateTime<Utc>)->Duration {
    (*dt_later - *dt_earlier).to_std().unwrap_or(Duration::ZERO)
}

/// is `dt` more than `dur` before `now`
pub fn is_older_than (dt: &DateTime<Utc>, now: &DateTime<Utc>, dur: Duration)->bool {
    match TimeDelta::from_std(dur) {
        Ok(delta) => *dt < *now - delta,
        Err(_) => false // out of range durations are never exceeded
    }
}

/// parse the compact `yyyymmddHHMMSS` UTC format used in network feed headers
pub fn parse_compact_utc (s: &str)->Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str( s.trim(), "%Y%m%d%H%M%S").ok().map( |ndt| ndt.and_utc())
}

pub fn short_utc_datetime_string (dt: &DateTime<Utc>) -> String {
    format!("{}", dt.format("%Y-%m-%dT%H:%M:%S%Z"))
}
