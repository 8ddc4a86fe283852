use serde::Deserialize;
use time::Date;

#[derive(Debug, Deserialize)]
pub struct LogWeightRequest {
    pub date: Date,
    pub weight: f64,
}
