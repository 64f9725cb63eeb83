#[path = "property/normalization.rs"]
mod normalization;

#[path = "property/round_trip.rs"]
mod round_trip;

#[path = "property/influence_monotonicity.rs"]
mod influence_monotonicity;

#[path = "property/duplicates.rs"]
mod duplicates;
