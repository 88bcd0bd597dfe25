//! Telemetry source 错误类型

use thiserror::Error;

/// 录制数据装载错误
#[derive(Debug, Error)]
pub enum SourceError {
    /// 录制文件读取失败
    #[error("failed to read recording: {0}")]
    Io(#[from] std::io::Error),

    /// 单行记录解析失败
    #[error("malformed lap record at line {line}: {message}")]
    MalformedRecord {
        /// 行号 (1 起)
        line: usize,
        /// 错误消息
        message: String,
    },

    /// 录制内容为空
    #[error("recording contains no laps")]
    EmptyRecording,
}

/// Source Result 类型别名
pub type Result<T> = std::result::Result<T, SourceError>;
