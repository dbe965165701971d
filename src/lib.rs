//! coachgen - Generate per-agent coaching plan documents
//!
//! A sequential pipeline over spreadsheet performance data: load one
//! worksheet, select (agent, date) pairs, build a coaching prompt per agent,
//! call the Gemini API, fill a .docx template with the parsed response, and
//! bundle the batch into a zip archive. Model failures degrade per agent to
//! blank coaching fields; the batch always completes.

pub mod archive;
pub mod cli;
pub mod config;
pub mod docx;
pub mod gate;
pub mod llm;
pub mod pipeline;
pub mod selection;
pub mod session;
pub mod sheets;
pub mod table;
pub mod util;
