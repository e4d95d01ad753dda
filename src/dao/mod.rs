/// List-query paging, sorting and result metadata.
pub mod filters;
/// Game persistence seam and its backends.
pub mod game_store;
/// Catalog entity definitions.
pub mod models;
/// Wire codec for the score field.
pub mod score;
/// Error taxonomy shared by store backends.
pub mod storage;
