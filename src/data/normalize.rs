use super::model::{NormalizedRecord, RentalRecord, Season, Weather, Year};

/// Attach year, season and weather labels to every record.
///
/// Total over all inputs: codes outside their domain become `Unknown` and the
/// record is kept, so downstream sums still account for it.
pub fn normalize(records: &[RentalRecord]) -> Vec<NormalizedRecord> {
    let out: Vec<NormalizedRecord> = records.iter().map(normalize_one).collect();

    let unknown = out
        .iter()
        .filter(|r| {
            r.year == Year::Unknown || r.season == Season::Unknown || r.weather == Weather::Unknown
        })
        .count();
    if unknown > 0 {
        log::warn!("{unknown} of {} records carry an out-of-domain code", out.len());
    }

    out
}

pub fn normalize_one(record: &RentalRecord) -> NormalizedRecord {
    NormalizedRecord {
        raw: *record,
        year: Year::from_flag(record.year_flag),
        season: Season::from_code(record.season_code),
        weather: Weather::from_code(record.weather_code),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(yr: i64, season: i64, weather: i64) -> RentalRecord {
        RentalRecord {
            year_flag: yr,
            season_code: season,
            weather_code: weather,
            casual: 1,
            registered: 2,
            total: 3,
        }
    }

    #[test]
    fn maps_every_code() {
        let out = normalize(&[raw(0, 1, 1), raw(1, 4, 4)]);
        assert_eq!(out[0].year, Year::Y2011);
        assert_eq!(out[0].season, Season::Spring);
        assert_eq!(out[0].weather, Weather::Clear);
        assert_eq!(out[1].year, Year::Y2012);
        assert_eq!(out[1].season, Season::Winter);
        assert_eq!(out[1].weather, Weather::HeavyRainSnow);
    }

    #[test]
    fn keeps_records_with_unknown_codes() {
        let input = [raw(7, 5, 9), raw(0, 2, 2)];
        let out = normalize(&input);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].year, Year::Unknown);
        assert_eq!(out[0].season, Season::Unknown);
        assert_eq!(out[0].weather, Weather::Unknown);
        assert_eq!(out[0].raw, input[0]);
    }
}
