//! Serializes an optional date filter into the `?startDate=..&endDate=..` fragment
//! every analytics endpoint accepts.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::range::DateWindow;

/// Optional date bounds for a request. Either side may be left open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl DateRangeParams {
    pub fn is_empty(&self) -> bool {
        self.start_date.is_none() && self.end_date.is_none()
    }
}

impl From<DateWindow> for DateRangeParams {
    fn from(w: DateWindow) -> Self {
        Self {
            start_date: Some(w.start_date),
            end_date: Some(w.end_date),
        }
    }
}

impl From<&DateWindow> for DateRangeParams {
    fn from(w: &DateWindow) -> Self {
        (*w).into()
    }
}

/// Builds the query fragment for `params`.
///
/// Returns `""` for `None` or an empty filter; otherwise a string starting with
/// `?` that lists `startDate` then `endDate`, each only when present.
pub fn build(params: Option<&DateRangeParams>) -> String {
    let Some(params) = params.filter(|p| !p.is_empty()) else {
        return String::new();
    };

    let mut ser = form_urlencoded::Serializer::new(String::new());
    if let Some(start) = params.start_date {
        ser.append_pair("startDate", &start.format("%Y-%m-%d").to_string());
    }
    if let Some(end) = params.end_date {
        ser.append_pair("endDate", &end.format("%Y-%m-%d").to_string());
    }
    format!("?{}", ser.finish())
}

/// Shorthand for [`build`] over a computed window.
pub fn for_window(window: Option<&DateWindow>) -> String {
    build(window.map(DateRangeParams::from).as_ref())
}
