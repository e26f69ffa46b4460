//! The Movie Database (TMDB) metadata provider.

pub mod api;
pub mod client;

pub use client::{TmdbClient, TmdbSettings};
