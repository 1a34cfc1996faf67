//! File storage domain - download responses, naming and the storage backend trait

mod naming;
mod provider;
mod response;

pub use naming::{
    render_path_template, FileNamingPolicy, LowercaseFileNamingPolicy,
    PACKAGE_FILE_SAVE_PATH_TEMPLATE, SYMBOL_PACKAGES_FOLDER_NAME, SYMBOL_PACKAGE_FILE_EXTENSION,
};
pub use provider::FileStorage;
pub use response::{
    DownloadResponse, FileBody, FileBodyStream, FileLocation, FileStream, OCTET_STREAM_CONTENT_TYPE,
};

#[cfg(test)]
pub use provider::MockFileStorage;
