// tcdata: scoring and corpus tools for text classification exercises
//
// This is the library root. `evaluation` scores submissions against ground
// truth; `corpus` turns the Reuters SGML archive into per-topic text files.

pub mod config;
pub mod corpus;
pub mod evaluation;
pub mod output;
