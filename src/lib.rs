//! Region selection and annotation engine for screenshot editors
//!
//! A [`session::Session`] receives a captured backdrop, lets the user pick a
//! region, draw annotations over it and export the result through a
//! [`render::export::Compositor`].

pub mod annotations;
pub mod config;
pub mod domain;
pub mod region;
pub mod render;
pub mod session;
