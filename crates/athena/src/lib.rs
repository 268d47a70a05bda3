pub mod client;
pub mod output;
pub mod presign;
pub mod status;

pub use client::{AthenaClient, AthenaError, QueryEngine};
pub use output::OutputLocation;
pub use presign::{PresignedUrl, S3Presigner, UrlPresigner};
pub use status::{QueryState, QueryStatus};
