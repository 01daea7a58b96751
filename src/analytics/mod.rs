pub mod aggregate;
pub mod heatmap;
pub mod reminder;
pub mod streak;
