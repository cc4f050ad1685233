pub mod client;
pub mod credentials;
pub mod error;
pub mod transport;

pub use client::{license_md5, MovebankClient, LICENSE_MARKER};
pub use credentials::MovebankCredentials;
pub use error::{ClientError, Result};
pub use transport::{
    DirectReadRequest, HttpResponse, HttpTransport, ReqwestTransport, DIRECT_READ_URL,
};

#[cfg(any(test, feature = "testing"))]
pub use transport::MockHttpTransport;
