pub mod api;
pub mod error;
pub mod fisher_yates;
pub mod in_place;
pub mod permutable;
pub mod random;
pub mod sort_based;
pub mod strategy;

pub use api::WeightedShuffle;
pub use error::WeightError;
pub use permutable::Permutable;
pub use strategy::Strategy;

pub mod prelude {
    pub use super::api::WeightedShuffle;
    pub use super::error::WeightError;
    pub use super::fisher_yates::fisher_yates;
    pub use super::in_place::{weighted_order_in_place, weighted_shuffle_in_place};
    pub use super::permutable::Permutable;
    pub use super::sort_based::{weighted_order_sort, weighted_shuffle_sort};
    pub use super::strategy::{Strategy, IN_PLACE_RECOMMENDED_MAX_LEN};
}

#[cfg(test)]
mod statistical_tests;
