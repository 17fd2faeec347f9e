// Resume analysis: prompt composition, report generation and response interpretation.
// All model calls go through the ModelGateway; nothing here talks HTTP upstream.

pub mod composer;
pub mod handlers;
pub mod interpreter;
pub mod prompts;
pub mod reports;
