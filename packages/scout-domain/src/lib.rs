pub mod card;
pub mod catalog;
pub mod extract;
pub mod genre;
pub mod names;
pub mod prompt;

pub use card::DisplayCard;
pub use catalog::{CatalogItem, Entity, EntityRef, ExternalUrls, Followers, Image};
