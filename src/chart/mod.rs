//! Pure chart builders: turn a [`FilteredView`](crate::data::store::FilteredView)
//! into the numbers the plot widgets draw. No egui types in here.

pub mod histogram;
pub mod scatter;
