//! Command line front end for the GameCube and Wii format readers.
//!

pub mod commands;
