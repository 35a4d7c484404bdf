//! Organizational assessment core.
//!
//! Tracks each respondent's submission through a multi-domain Likert
//! questionnaire, scores sub-indices and domains, and rolls results up per
//! organization and per administrator's team.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
