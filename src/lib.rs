pub mod api;
pub mod commands;
pub mod config;
pub mod food;
pub mod providers;
pub mod shell;

// Re-export commonly used items
pub use food::{FoodConfig, FoodLog, NutritionClient, NutritionError, NutritionEstimate};
pub use shell::{AppShell, RequestStatus};
