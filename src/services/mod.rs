// Service exports
pub mod appwrite;
pub mod gazetteer;

pub use appwrite::{AppwriteClient, AppwriteCollections, AppwriteError};
pub use gazetteer::CampusGazetteer;
