//! Ella Rises - Staff and Visitor Portal
//!
//! Staff sign in to browse and maintain the organisation's participants,
//! events, surveys, milestones and donations. Managers can add, edit and
//! delete records in any managed table. Visitors use the public pages to
//! browse events and submit surveys, milestones and donations.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
