// Service exports
pub mod appwrite;
pub mod geocoder;

pub use appwrite::{AppwriteClient, AppwriteCollections, AppwriteError, AppwriteFunctions};
pub use geocoder::{GeocodeError, ZipGeocoder};
