//! Road trip itinerary planner.
//!
//! A web application that answers: "I'm driving from here to there over
//! this many days. Where should I sleep each night, and what is worth
//! stopping for on the way?"

pub mod cache;
pub mod domain;
pub mod osm;
pub mod planner;
pub mod web;
