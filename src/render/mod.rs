pub mod encode;
pub mod heatmap;
pub mod pitch;
pub mod shotmap;
