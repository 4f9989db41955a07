//! Client for the Communauto/reservauto car-sharing site.
//!
//! The site exposes no public API: logging in is a three-step form
//! handshake, and every result is extracted from server-rendered HTML.
//! This crate drives the handshake, issues availability and reservation
//! queries over the resulting cookie session, and parses the responses
//! into structured records.

pub mod domain;
pub mod geo;
pub mod output;
pub mod reservauto;
pub mod session;
pub mod stations;
