// Résumé analysis pipeline: preprocessing, skill matching, similarity,
// heuristic quality metrics and report assembly.
// Nothing in here touches the network or the database.

pub mod handlers;
pub mod knowledge;
pub mod metrics;
pub mod preprocess;
pub mod report;
pub mod similarity;
pub mod skills;
pub mod upload;
