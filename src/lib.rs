//! Gym Manager - Back office for a gym or fitness studio
//!
//! This crate covers billing status, membership pricing and attendance:
//! payments carry a display status derived from their due date, plan prices
//! come from the membership catalog (with retired plan codes remapped), and
//! open check-ins are closed by a periodic auto check-out sweep.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
