//! Application Layer - 应用层
//!
//! 职责：编排领域状态、合成和缓冲池，对外只暴露事件入口和显示端接口
//!
//! 模块：
//! - event: 显示会话事件和事件队列
//! - presenter: 显示端 trait + buffer 描述
//! - driver: 呈现驱动（事件 → 状态 → 合成 → 呈现）

pub mod driver;
pub mod event;
pub mod presenter;

pub use driver::{Control, DriverStats, PresentationDriver};
pub use event::{DisplayEvent, EventQueue};
pub use presenter::{BufferDescriptor, Presenter};
