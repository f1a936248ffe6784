//! Image download infrastructure.

pub mod downloader;

pub use downloader::HttpImageDownloader;
