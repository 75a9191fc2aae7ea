use crate::message::Message;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Query for `GET /hotels/search-with-images`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HotelSearchRequest {
    pub city: String,
    pub check_in: NaiveDate, // Just date, the provider ignores time
    pub check_out: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchRejection {
    #[error("city is blank")]
    CityMissing,
    #[error("check-in or check-out missing")]
    DatesMissing,
    #[error("check-out {check_out} is not after check-in {check_in}")]
    CheckOutNotAfterCheckIn { check_in: NaiveDate, check_out: NaiveDate },
}

impl SearchRejection {
    pub fn message(&self) -> Message {
        match self {
            SearchRejection::CityMissing => Message::SearchCityMissing,
            SearchRejection::DatesMissing => Message::SearchDatesMissing,
            SearchRejection::CheckOutNotAfterCheckIn { .. } => Message::CheckOutNotAfterCheckIn,
        }
    }
}

/// Search bar state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchDraft {
    pub city: String,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
}

impl SearchDraft {
    /// Moving check-in on or past check-out pushes check-out to the next day.
    pub fn set_check_in(&mut self, check_in: NaiveDate) {
        self.check_in = Some(check_in);
        if self.check_out.is_some_and(|out| out <= check_in) {
            self.check_out = Some(check_in + Duration::days(1));
        }
    }

    pub fn validate(&self) -> Result<HotelSearchRequest, SearchRejection> {
        let city = self.city.trim();
        if city.is_empty() {
            return Err(SearchRejection::CityMissing);
        }
        let (check_in, check_out) = match (self.check_in, self.check_out) {
            (Some(i), Some(o)) => (i, o),
            _ => return Err(SearchRejection::DatesMissing),
        };
        if check_out <= check_in {
            return Err(SearchRejection::CheckOutNotAfterCheckIn { check_in, check_out });
        }
        Ok(HotelSearchRequest {
            city: city.to_string(),
            check_in,
            check_out,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, d).unwrap()
    }

    #[test]
    fn test_search_request_serialization() {
        let json = r#"
            {
                "city": "Hong Kong",
                "checkIn": "2025-07-01",
                "checkOut": "2025-07-03"
            }
        "#;
        let req: HotelSearchRequest = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(req.city, "Hong Kong");
        assert_eq!(req.check_in, day(1));
    }

    #[test]
    fn test_check_out_must_follow_check_in() {
        let draft = SearchDraft { city: " Hong Kong ".into(), check_in: Some(day(3)), check_out: Some(day(3)) };
        assert_eq!(draft.validate().unwrap_err().message(), Message::CheckOutNotAfterCheckIn);

        let draft = SearchDraft { check_out: Some(day(5)), ..draft };
        assert_eq!(draft.validate().unwrap().city, "Hong Kong");
    }

    #[test]
    fn test_moving_check_in_bumps_check_out() {
        let mut draft = SearchDraft { city: "HK".into(), check_in: Some(day(1)), check_out: Some(day(3)) };
        draft.set_check_in(day(4));
        assert_eq!(draft.check_out, Some(day(5)));

        draft.set_check_in(day(2));
        assert_eq!(draft.check_out, Some(day(5)));
    }

    #[test]
    fn test_blank_city_rejected() {
        let draft = SearchDraft { city: "   ".into(), check_in: Some(day(1)), check_out: Some(day(2)) };
        assert_eq!(draft.validate(), Err(SearchRejection::CityMissing));
    }
}
