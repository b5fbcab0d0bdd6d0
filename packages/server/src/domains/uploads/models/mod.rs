pub mod upload;

pub use upload::{NewUpload, UploadDetail, UploadOverview};
