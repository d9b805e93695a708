pub mod board;
pub mod coalition;
pub mod pressure;
pub mod trending;

pub use board::{
    build_pressure_board, build_pressure_board_at, group_by_company, PressureChange,
    PressureEntry,
};
pub use coalition::{coalition_pressure, coalition_pressure_at, CoalitionPressure};
pub use pressure::{
    pressure_score, pressure_score_at, pressure_velocity, PressureComponents, UNKNOWN_AGE_DAYS,
};
pub use trending::{
    heat_level, heat_level_at, sort_by_trending, sort_by_trending_at, top_trending,
    top_trending_at, trending_score, trending_score_at, HeatLevel, TrendingScore,
};
