// Contact Assessment - API Core
//
// Backend for the contact review tool: fetches conversation transcripts,
// classifies them for complaints and vulnerability, and stores the results
// alongside reviewer feedback and upload bookkeeping.
//
// Persistence lives in domains/*/models, pipelines in domains/*/activities.

pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
