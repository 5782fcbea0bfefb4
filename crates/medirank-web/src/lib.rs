//! medirank-web: Web front end for the MediRank diagnosis calculator.
//! Provides:
//!   - Patient input form and ranked results page with charts
//!   - PDF report download
//!   - JSON ranking API and reference-table listing

pub mod error;
pub mod form;
pub mod handlers;
pub mod router;
pub mod state;
