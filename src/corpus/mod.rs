// Reuters corpus extraction — SGML scanning, topic bucketing, and output.

pub mod archive;
pub mod buckets;
pub mod categories;
pub mod diagnostics;
pub mod scanner;
pub mod sgml;
pub mod tokenize;
pub mod writer;
