//! Filesystem helpers shared by the assembler.

pub mod fs;
