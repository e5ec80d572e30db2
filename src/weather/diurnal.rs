//! The 24-hour diurnal FFMC/wind model that expands daily observations
//! into an hourly stream (§4.4).

use crate::weather::record::{DailyWeather, HourlyWeather, RhCategory};

/// Fixed 24-hour wind-speed proportion table (index = hour of day, `0..24`),
/// applied against the day's noon-observed wind speed. Midday (`12:00`)
/// is the reference hour and is exactly `1.0`; wind eases off overnight
/// and builds back up through the afternoon.
pub const WIND_DIURNAL_PROPORTIONS: [f64; 24] = [
    0.55, 0.50, 0.47, 0.45, 0.45, 0.48, // 00-05
    0.55, 0.65, 0.78, 0.90, 0.97, 1.00, // 06-11
    1.00, 1.05, 1.08, 1.08, 1.05, 1.00, // 12-17
    0.90, 0.80, 0.72, 0.66, 0.61, 0.58, // 18-23
];

const MORNING_ASYMPTOTE: [f64; 3] = [95.0, 88.0, 78.0]; // Low, Medium, High
const MORNING_RATE: [f64; 3] = [0.12, 0.08, 0.05];

const AFTERNOON_DROP: [f64; 3] = [0.0, 5.0, 12.0]; // Low, Medium, High
const AFTERNOON_RATE: f64 = 0.15;

const CATEGORIES: [RhCategory; 3] = [RhCategory::Low, RhCategory::Medium, RhCategory::High];

fn category_index(category: RhCategory) -> usize {
    match category {
        RhCategory::Low => 0,
        RhCategory::Medium => 1,
        RhCategory::High => 2,
    }
}

/// FFMC recovery curve used for the overnight-to-morning stretch (hours
/// measured since the previous day's 20:00 anchor).
fn morning_recovery(category: RhCategory, hours_since_prev_20: f64, ffmc_prev_20: f64) -> f64 {
    let idx = category_index(category);
    let asymptote = MORNING_ASYMPTOTE[idx];
    let rate = MORNING_RATE[idx];
    asymptote - (asymptote - ffmc_prev_20) * (-rate * hours_since_prev_20).exp()
}

/// FFMC decay curve used for the afternoon stretch (hours measured since
/// noon), anchored to the day's observed noon FFMC.
fn afternoon_decay(category: RhCategory, hours_since_noon: f64, noon_ffmc: f64) -> f64 {
    let idx = category_index(category);
    let asymptote = noon_ffmc - AFTERNOON_DROP[idx];
    asymptote + (noon_ffmc - asymptote) * (-AFTERNOON_RATE * hours_since_noon).exp()
}

/// Pick the RH category whose morning-recovery curve, run forward from
/// `ffmc_prev_20` to noon (16 hours later), lands closest to `target_noon`.
/// This is the "best matches... minimizing absolute residual" rule of §4.4.
fn select_morning_category(ffmc_prev_20: f64, target_noon: f64) -> RhCategory {
    CATEGORIES
        .into_iter()
        .min_by(|&a, &b| {
            let residual_a = (morning_recovery(a, 16.0, ffmc_prev_20) - target_noon).abs();
            let residual_b = (morning_recovery(b, 16.0, ffmc_prev_20) - target_noon).abs();
            residual_a
                .partial_cmp(&residual_b)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .unwrap_or(RhCategory::Medium)
}

/// Expand a sequence of daily noon observations into a full hourly series.
///
/// `daily` must be in strictly increasing day order (checked upstream by
/// the stream builder, not here). Precipitation is attributed to the noon
/// hour only, per §4.4.
#[must_use]
pub fn build_hourly_series(daily: &[DailyWeather]) -> Vec<HourlyWeather> {
    let mut out = Vec::with_capacity(daily.len() * 24);

    // ffmc_20[d] = the afternoon curve's value at hour 20 for day d, using
    // that day's own observed noon RH category.
    let mut ffmc_20 = vec![0.0_f64; daily.len()];
    for (d, day) in daily.iter().enumerate() {
        ffmc_20[d] = afternoon_decay(day.rh_category(), 8.0, day.ffmc);
    }

    for (d, day) in daily.iter().enumerate() {
        let ffmc_prev_20 = if d == 0 { day.ffmc } else { ffmc_20[d - 1] };
        let morning_category = select_morning_category(ffmc_prev_20, day.ffmc);

        let ffmc_06_next = if d + 1 < daily.len() {
            let next_category = select_morning_category(ffmc_20[d], daily[d + 1].ffmc);
            morning_recovery(next_category, 10.0, ffmc_20[d])
        } else {
            ffmc_20[d]
        };

        for hour in 0_u8..24 {
            let ffmc = match hour {
                6..=11 => {
                    let hours_since_prev_20 = f64::from(hour) + 4.0;
                    morning_recovery(morning_category, hours_since_prev_20, ffmc_prev_20)
                }
                12 => day.ffmc,
                13..=20 => afternoon_decay(day.rh_category(), f64::from(hour - 12), day.ffmc),
                _ => {
                    // Night: 21:00-23:00 interpolate toward next-day 06:00;
                    // 00:00-05:00 interpolate from this day's 20:00 anchor.
                    let (frac, span_start, span_end) = if hour >= 21 {
                        (f64::from(hour - 20) / 10.0, ffmc_20[d], ffmc_06_next)
                    } else {
                        (f64::from(hour + 4) / 10.0, ffmc_20[d], ffmc_06_next)
                    };
                    span_start + (span_end - span_start) * frac
                }
            };

            let wind_speed_kmh = day.wind_speed_kmh * WIND_DIURNAL_PROPORTIONS[hour as usize];
            let precip_mm = if hour == 12 { day.precip_mm } else { 0.0 };

            out.push(HourlyWeather {
                hour_of_day: hour,
                precip_mm,
                temp_c: day.temp_c,
                rh_pct: day.rh_pct,
                wind_speed_kmh,
                wind_dir_deg: day.wind_dir_deg,
                ffmc,
                dmc: day.dmc,
                dc: day.dc,
                isi: day.isi,
                bui: day.bui,
                fwi: day.fwi,
            });
        }
    }

    out
}
