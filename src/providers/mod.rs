//! Provider adapter implementations.

pub mod brave;
pub mod jina;
pub mod serper;
pub mod tavily;

pub use brave::Brave;
pub use jina::{JinaScrape, JinaSearch};
pub use serper::{SerperScrape, SerperSearch};
pub use tavily::Tavily;
