//! Bike-share station status map.
//!
//! A web application that answers: "which stations near me have bikes?"
//! It joins a GBFS station information feed with the matching status feed,
//! classifies every station, and serves a Leaflet map of the result.

pub mod cache;
pub mod config;
pub mod domain;
pub mod gbfs;
pub mod join;
pub mod snapshot;
pub mod web;
