pub mod analysis;
pub mod config;
pub mod daily_log;
pub mod macros;
pub mod models;

pub use analysis::{NutritionClient, NutritionError};
pub use config::FoodConfig;
pub use daily_log::FoodLog;
pub use macros::{macro_breakdown, Macro, MacroShare};
pub use models::{DailyTotals, LogEntry, NutritionEstimate};
