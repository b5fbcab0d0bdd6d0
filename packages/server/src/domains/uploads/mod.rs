pub mod models;

pub use models::{NewUpload, UploadDetail, UploadOverview};
