//! Pure habitability logic for ExoHab.
//!
//! This crate contains the scoring heuristic and catalog rules that are
//! independent of any storage backend, network service, or randomness
//! source. Functions take plain data and return results, so the numbers a
//! dashboard shows can be unit-tested exactly.
//!
//! Random inputs (score jitter, simulated confidence, simulated processing
//! time) are passed in explicitly as [`prediction::Draws`]; sampling them is
//! the caller's job.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`catalog`] | Reference exoplanet entries, catalog queries and sorting |
//! | [`classification`] | Four habitability bands and their score thresholds |
//! | [`factors`] | Per-factor breakdown (score, flag, description) |
//! | [`params`] | Planetary and stellar input parameters |
//! | [`prediction`] | Assembles a full prediction from parameters and draws |
//! | [`scoring`] | Temperature/size/orbital/stellar sub-scores and the weighted composite |

pub mod catalog;
pub mod classification;
pub mod factors;
pub mod params;
pub mod prediction;
pub mod scoring;
