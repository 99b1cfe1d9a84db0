pub mod analysis;
pub mod candle;
pub mod indicator;
pub mod level;
pub mod pattern;

pub use analysis::*;
pub use candle::{Candle, CandleSeries};
pub use indicator::*;
pub use level::*;
pub use pattern::*;
