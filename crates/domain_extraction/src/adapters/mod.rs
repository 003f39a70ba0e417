//! Default collaborator adapters
//!
//! Out-of-the-box implementations of the kernel ports so the service runs
//! without extra wiring. Each can be replaced through the
//! [`core_kernel::CollaboratorRegistry`].

pub mod lopdf_renderer;
pub mod tesseract;
pub mod docx_zip;

pub use lopdf_renderer::LopdfRenderer;
pub use tesseract::TesseractCli;
pub use docx_zip::ZipDocxReader;
