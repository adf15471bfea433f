use anyhow::Context;
use std::time::{Duration, Instant};
use winit::{
    dpi::LogicalSize,
    event::*,
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

use heart_core::{
    DriverState, FrameDriver, Scene, SystemClock, TARGET_FPS, WINDOW_HEIGHT, WINDOW_TITLE,
    WINDOW_WIDTH,
};

mod gfx;

use gfx::GpuState;

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(err) = run() {
        log::error!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let event_loop = EventLoop::new().context("creating event loop")?;
    let window = WindowBuilder::new()
        .with_title(WINDOW_TITLE)
        .with_inner_size(LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT))
        .build(&event_loop)
        .context("creating window")?;

    let mut gpu = pollster::block_on(GpuState::new(&window)).context("initializing GPU")?;

    let mut driver = FrameDriver::new(Scene::from_entropy(), SystemClock::new());
    let frame_interval = Duration::from_secs_f64(1.0 / TARGET_FPS as f64);
    let mut next_frame = Instant::now();

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::Resized(size),
                ..
            } => gpu.resize(size),
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                // Redraws may never arrive for a hidden window; close here.
                driver.close();
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::RedrawRequested,
                ..
            } => match driver.step(std::iter::empty(), &mut gpu) {
                Ok(DriverState::Running) => {}
                Ok(DriverState::Closed) => elwt.exit(),
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu.reconfigure(),
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("[gfx] out of GPU memory; exiting");
                    elwt.exit();
                }
                Err(err) => log::warn!("[gfx] frame skipped: {err}"),
            },
            Event::AboutToWait => {
                let now = Instant::now();
                if now >= next_frame {
                    gpu.window.request_redraw();
                    next_frame = now + frame_interval;
                }
                elwt.set_control_flow(ControlFlow::WaitUntil(next_frame));
            }
            Event::LoopExiting => {
                log::info!("[app] exiting after {} frames", driver.scene.frame_count());
            }
            _ => {}
        })
        .context("running event loop")?;
    Ok(())
}
