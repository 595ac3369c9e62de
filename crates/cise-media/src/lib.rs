//! Song search and download-link lookup.
//!
//! Two ports back the song resolution chain:
//! - [`MediaSearch`]: free-text query to ranked candidates (yt-dlp adapter)
//! - [`DownloadLinkProvider`]: canonical URL to a direct link (downloader API adapter)

pub mod downloader;
pub mod error;
pub mod port;
pub mod search;

pub use downloader::{DownloaderClient, DownloaderConfig};
pub use error::{MediaError, MediaResult};
pub use port::{DownloadLink, DownloadLinkProvider, LinkMode, MediaSearch};
pub use search::{SearchConfig, YtDlpSearch};
