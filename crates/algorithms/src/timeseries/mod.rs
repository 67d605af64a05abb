//! Monthly vegetation index time series
//!
//! - Reference dates: last day of each of the N months before today
//! - Builder: one image source request per date, converted to an index grid
//! - Series: points ordered most recent first

mod builder;
mod dates;
mod series;

pub use builder::{
    build_series, build_series_now, build_series_with, CancelFlag, FetchPolicy, SeriesConfig,
};
pub use dates::{last_day_of_month, months_before, reference_dates};
pub use series::{SampleOrigin, TimePoint, TimeSeries};
