//! Main module for tagchunk library functionality

pub mod ast;
pub mod chunking;
pub mod config;
pub mod formats;
pub mod glossary;
pub mod grammar;
pub mod input;
pub mod notation;
pub mod testing;
