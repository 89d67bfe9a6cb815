use wayland_client::globals::{BindError, GlobalError};
use wayland_client::{ConnectError, DispatchError};

/// 查看器的致命错误（全部在 main 里记录日志后以非 0 退出）
#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error(transparent)]
    Engine(#[from] letterbox::Error),

    #[error(transparent)]
    Resource(#[from] letterbox::ResourceError),

    #[error("failed to connect to the Wayland display: {0}")]
    Connect(#[from] ConnectError),

    #[error("failed to enumerate Wayland globals: {0}")]
    Globals(#[from] GlobalError),

    #[error("required Wayland global is missing: {0}")]
    Bind(#[from] BindError),

    #[error("Wayland connection failed: {0}")]
    Dispatch(#[from] DispatchError),

    #[cfg(not(target_os = "linux"))]
    #[error("only Linux (memfd + Wayland) is supported")]
    Unsupported,
}
