//! Domain types shared by the indicator, the providers and the front-ends.

pub mod price;

pub use price::{PriceSample, PriceSeries};
