use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use cursorkit_core::{
    CursorConfigBuilder, CursorManager, CursorStyle, FollowSource, Follower, PositionSampler, Size,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or(EnvFilter::new("debug"));
    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(env_filter)
        .init();

    let config = CursorConfigBuilder::default()
        .lerp_factor(0.12)
        .sample_window_ms(100)
        .build()?;
    let manager = CursorManager::new(config.clone());

    // A dot riding the smoothed position and a ring with its own, slower, smoothing
    let mut dot = Follower::new(FollowSource::Smoothed).with_size(Size::new(8., 8.));
    let mut ring = Follower::new(FollowSource::Raw {
        factor: config.follower_factor,
    })
    .with_size(Size::new(40., 40.));
    let sampler = Rc::new(RefCell::new(PositionSampler::new(config.sample_window())));

    let s = sampler.clone();
    let _subscription = manager.subscribe(move |state| {
        if state.velocity.square_length() > 0. {
            s.borrow_mut().push(state.position, Instant::now());
        }
    });

    manager.set_base_style(CursorStyle::Crosshair);

    cursorkit_winit::Window::open_blocking("cursorkit", 800, 600, manager, move |manager| {
        let state = manager.get_state();
        let dot_at = dot.step(&state);
        let ring_at = ring.step(&state);
        if let Some(settled) = sampler.borrow_mut().poll(Instant::now()) {
            info!(x = settled.x, y = settled.y, ?dot_at, ?ring_at, "pointer settled");
        }
    })
}
