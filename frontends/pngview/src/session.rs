//! Wayland 会话
//!
//! 职责：
//! - 连接 display，绑定 wl_compositor / wl_shm / xdg_wm_base
//! - 创建 xdg toplevel，设置标题和 app id
//! - 把协议回调翻译成 `DisplayEvent`（ping/pong、configure ack 就地处理）
//! - 通过 `ShmPresenter` 把帧缓冲池共享给合成器
//!
//! 主循环：
//!
//! ```text
//! loop {
//!     blocking_dispatch   ─→ 回调把事件压进 EventQueue
//!     handle_events       ─→ Closed 则退出
//!     render              ─→ 按需合成 / 呈现
//! }
//! ```

use std::os::fd::{AsFd, OwnedFd};

use letterbox::config::SHM_NAME;
use letterbox::{
    BufferDescriptor, Control, DisplayEvent, EventQueue, FrameBufferPool, Image, MemfdStorage,
    PixelFormat, PresentationDriver, Presenter, ResourceError, ViewerConfig,
};
use wayland_client::globals::{registry_queue_init, GlobalListContents};
use wayland_client::protocol::{
    wl_buffer, wl_compositor, wl_registry, wl_shm, wl_shm_pool, wl_surface,
};
use wayland_client::{delegate_noop, Connection, Dispatch, DispatchError, QueueHandle};
use wayland_protocols::xdg::shell::client::{xdg_surface, xdg_toplevel, xdg_wm_base};

use crate::error::ViewerError;

/// 分派状态：回调只往队列里压事件
#[derive(Default)]
pub struct Session {
    events: EventQueue,
}

/// 运行查看器直到窗口关闭
pub fn run(image: Image, config: &ViewerConfig) -> Result<(), ViewerError> {
    let conn = Connection::connect_to_env()?;
    let (globals, mut queue) = registry_queue_init::<Session>(&conn)?;
    let qh = queue.handle();

    // damage_buffer 需要 wl_surface v4；configure_bounds 需要 xdg_wm_base v4
    let compositor: wl_compositor::WlCompositor = globals.bind(&qh, 4..=6, ())?;
    let shm: wl_shm::WlShm = globals.bind(&qh, 1..=1, ())?;
    let wm_base: xdg_wm_base::XdgWmBase = globals.bind(&qh, 1..=5, ())?;

    let surface = compositor.create_surface(&qh, ());
    let xdg_surface = wm_base.get_xdg_surface(&surface, &qh, ());
    let toplevel = xdg_surface.get_toplevel(&qh, ());
    toplevel.set_title(config.title.clone());
    toplevel.set_app_id(config.app_id.clone());
    // 不带 buffer 的首次提交，请求第一个 configure
    surface.commit();

    let storage = MemfdStorage::new(SHM_NAME)?;
    let fd = storage.try_clone_fd()?;
    let mut presenter = ShmPresenter::new(surface, shm, fd, qh.clone());
    let mut driver = PresentationDriver::new(image, FrameBufferPool::new(storage), config);
    let mut session = Session::default();

    tracing::info!("[Session] window '{}' ({}) created", config.title, config.app_id);

    loop {
        queue.blocking_dispatch(&mut session)?;
        if driver.handle_events(session.events.drain()) == Control::Exit {
            break;
        }
        driver.render(&mut presenter)?;
    }

    toplevel.destroy();
    xdg_surface.destroy();
    presenter.destroy();
    wm_base.destroy();
    conn.flush().map_err(DispatchError::Backend)?;

    let stats = driver.stats();
    tracing::info!(
        "[Session] closed after {} composites, {} commits",
        stats.composites,
        stats.commits
    );
    Ok(())
}

/// 合成器那一侧的 wl_shm_pool
struct ShmPool {
    pool: wl_shm_pool::WlShmPool,
    size: i32,
}

/// 通过 wl_shm 呈现的显示端
///
/// wl_shm_pool 在第一次呈现时才创建，之后只在帧缓冲池增长时 resize
struct ShmPresenter {
    surface: wl_surface::WlSurface,
    shm: wl_shm::WlShm,
    /// 与帧缓冲池共享同一个 memfd 的描述符
    fd: OwnedFd,
    pool: Option<ShmPool>,
    qh: QueueHandle<Session>,
}

impl ShmPresenter {
    fn new(
        surface: wl_surface::WlSurface,
        shm: wl_shm::WlShm,
        fd: OwnedFd,
        qh: QueueHandle<Session>,
    ) -> Self {
        Self {
            surface,
            shm,
            fd,
            pool: None,
            qh,
        }
    }

    /// 保证合成器那一侧的池至少有 `bytes` 字节
    fn ensure_pool(&mut self, bytes: i32) -> &wl_shm_pool::WlShmPool {
        let pool = match self.pool.take() {
            Some(mut pool) => {
                if bytes > pool.size {
                    tracing::debug!("[Session] wl_shm_pool resize {} -> {}", pool.size, bytes);
                    pool.pool.resize(bytes);
                    pool.size = bytes;
                }
                pool
            }
            None => {
                tracing::debug!("[Session] wl_shm_pool create {}", bytes);
                ShmPool {
                    pool: self.shm.create_pool(self.fd.as_fd(), bytes, &self.qh, ()),
                    size: bytes,
                }
            }
        };
        &self.pool.insert(pool).pool
    }

    fn destroy(self) {
        if let Some(pool) = self.pool {
            pool.pool.destroy();
        }
        self.surface.destroy();
    }
}

fn wire_format(format: PixelFormat) -> wl_shm::Format {
    match format {
        PixelFormat::Argb8888 => wl_shm::Format::Argb8888,
        PixelFormat::Xrgb8888 => wl_shm::Format::Xrgb8888,
    }
}

/// 协议里所有尺寸都是 i32
fn to_wire(value: usize, buffer: &BufferDescriptor) -> Result<i32, ResourceError> {
    i32::try_from(value).map_err(|_| ResourceError::TooLarge {
        width: buffer.width,
        height: buffer.height,
    })
}

impl Presenter for ShmPresenter {
    fn present(
        &mut self,
        buffer: &BufferDescriptor,
        pool_bytes: usize,
    ) -> Result<(), ResourceError> {
        let pool_size = to_wire(pool_bytes, buffer)?;
        let offset = to_wire(buffer.offset, buffer)?;
        let stride = to_wire(buffer.stride, buffer)?;
        let width = to_wire(buffer.width as usize, buffer)?;
        let height = to_wire(buffer.height as usize, buffer)?;

        let qh = self.qh.clone();
        let wl_buffer = self.ensure_pool(pool_size).create_buffer(
            offset,
            width,
            height,
            stride,
            wire_format(buffer.format),
            &qh,
            (),
        );

        self.surface.attach(Some(&wl_buffer), 0, 0);
        self.surface.damage_buffer(0, 0, width, height);
        Ok(())
    }

    fn commit(&mut self) {
        self.surface.commit();
    }
}

impl Dispatch<wl_registry::WlRegistry, GlobalListContents> for Session {
    fn event(
        _state: &mut Self,
        _registry: &wl_registry::WlRegistry,
        _event: wl_registry::Event,
        _data: &GlobalListContents,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
    ) {
    }
}

impl Dispatch<xdg_wm_base::XdgWmBase, ()> for Session {
    fn event(
        _state: &mut Self,
        wm_base: &xdg_wm_base::XdgWmBase,
        event: xdg_wm_base::Event,
        _data: &(),
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
    ) {
        if let xdg_wm_base::Event::Ping { serial } = event {
            wm_base.pong(serial);
        }
    }
}

impl Dispatch<xdg_surface::XdgSurface, ()> for Session {
    fn event(
        state: &mut Self,
        xdg_surface: &xdg_surface::XdgSurface,
        event: xdg_surface::Event,
        _data: &(),
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
    ) {
        if let xdg_surface::Event::Configure { serial } = event {
            xdg_surface.ack_configure(serial);
            state.events.push(DisplayEvent::ConfigureAcknowledged);
        }
    }
}

impl Dispatch<xdg_toplevel::XdgToplevel, ()> for Session {
    fn event(
        state: &mut Self,
        _toplevel: &xdg_toplevel::XdgToplevel,
        event: xdg_toplevel::Event,
        _data: &(),
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
    ) {
        match event {
            xdg_toplevel::Event::Configure { width, height, .. } => {
                state
                    .events
                    .push(DisplayEvent::DestinationSizeChanged { width, height });
            }
            xdg_toplevel::Event::ConfigureBounds { width, height } => {
                state.events.push(DisplayEvent::BoundsChanged { width, height });
            }
            xdg_toplevel::Event::Close => {
                state.events.push(DisplayEvent::Closed);
            }
            _ => {}
        }
    }
}

impl Dispatch<wl_buffer::WlBuffer, ()> for Session {
    fn event(
        _state: &mut Self,
        buffer: &wl_buffer::WlBuffer,
        event: wl_buffer::Event,
        _data: &(),
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
    ) {
        // 每次呈现都新建 buffer，合成器用完即销毁
        if let wl_buffer::Event::Release = event {
            buffer.destroy();
        }
    }
}

delegate_noop!(Session: wl_compositor::WlCompositor);
delegate_noop!(Session: wl_shm_pool::WlShmPool);
delegate_noop!(Session: ignore wl_shm::WlShm);
delegate_noop!(Session: ignore wl_surface::WlSurface);
