//! Domain logic for the song catalog: error taxonomy, page arithmetic,
//! verse pagination and request field rules. Nothing here touches storage.

pub mod error;
pub mod lyrics;
pub mod pagination;
pub mod search;
pub mod song;
pub mod types;
