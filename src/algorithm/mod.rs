//! Analysis algorithms over county census data

pub mod vulnerability;
