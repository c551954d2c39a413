pub mod catalog;
pub mod normalize;
pub mod options;
pub mod picker;
pub mod query;
pub mod roulette;

pub use roulette::WatchRoulette;
